use anyhow::{Context, Result};

use crate::cli::InfoArgs;
use crate::commands::Session;
use crate::constants::DEFAULT_PLACES_YEAR;
use crate::county::CountyFilter;
use crate::enrich::optional;
use crate::measures::{Measure, resolve};
use crate::output::{Outcome, Sink};
use crate::row::CountyRow;
use crate::sources::cms::ACCESS_MEASURES;
use crate::sources::hrsa::HPSA_MEASURES;
use crate::sources::places::{PLACES_MEASURES, Prevalence};
use crate::topics::TOPICS;

pub const INFO_HEADER: [&str; 3] = ["County", "Field", "Value"];

/// Profile rows for every county whose name contains `args.county`.
///
/// Census is the primary source and any failure there is fatal. PLACES, CMS
/// and HRSA rows are appended best-effort, matched on the normalized county
/// name. Returns `NoMatchingRows` (after printing a notice) when no county
/// matches.
pub async fn run(session: &Session, args: InfoArgs) -> Result<Outcome> {
    let census_measures = resolve(TOPICS, &["all"], "topic")?;
    let key = session.credentials.resolve()?;
    let rows = session
        .census
        .fetch_year(&census_measures, args.year, &key)
        .await
        .context("Failed fetching Census data")?;

    let filter = CountyFilter::new(&args.county);
    let mut matches: Vec<CountyRow> = rows
        .into_iter()
        .filter(|row| filter.matches(&row.county))
        .collect();
    if matches.is_empty() {
        eprintln!("No county matching '{}' found.", args.county);
        return Ok(Outcome::NoMatchingRows);
    }
    matches.sort_by(|a, b| a.county.cmp(&b.county));

    let mut records = Vec::new();
    append_section(&mut records, &matches, None, &census_measures, "");

    let places_measures = resolve(PLACES_MEASURES, &["all"], "PLACES group")?;
    let places = optional(
        "CDC PLACES",
        session
            .places
            .fetch(&places_measures, DEFAULT_PLACES_YEAR, Prevalence::AgeAdjusted),
    )
    .await;
    if let Some(places) = places {
        append_section(&mut records, &matches, Some(places.as_slice()), &places_measures, "PLACES: ");
    }

    let access_measures = resolve(ACCESS_MEASURES, &["all"], "access group")?;
    if let Some(access) = optional("CMS", session.cms.fetch()).await {
        append_section(&mut records, &matches, Some(access.as_slice()), &access_measures, "Access: ");
    }

    let shortage_measures = resolve(HPSA_MEASURES, &["all"], "shortage group")?;
    if let Some(shortage) = optional("HRSA", session.hrsa.fetch(&shortage_measures)).await {
        append_section(&mut records, &matches, Some(shortage.as_slice()), &shortage_measures, "Shortage: ");
    }

    let written = Sink::from_arg(args.output.clone()).listing(&INFO_HEADER, &records)?;
    Ok(Outcome::Written { rows: written })
}

/// Adds `County,Field,Value` rows for each matched county. With `source`
/// set, values come from the source row carrying the same county name and
/// counties absent from the source are skipped.
fn append_section(
    records: &mut Vec<Vec<String>>,
    matches: &[CountyRow],
    source: Option<&[CountyRow]>,
    measures: &[Measure],
    prefix: &str,
) {
    for county in matches {
        let row = match source {
            None => county,
            Some(rows) => match rows.iter().find(|r| r.county == county.county) {
                Some(row) => row,
                None => continue,
            },
        };
        for measure in measures {
            records.push(vec![
                county.county.clone(),
                format!("{prefix}{}", measure.label),
                row.get(&measure.id).render(measure.format),
            ]);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::measures::FormatKind;
    use crate::value::Cell;

    #[test]
    fn enrichment_rows_match_by_county_name() {
        let measures = [Measure::new("DIABETES", "Diabetes", "", FormatKind::Percent)];
        let matches = [CountyRow::new("Saint Clair"), CountyRow::new("Wayne")];
        let mut saint_clair = CountyRow::new("Saint Clair");
        saint_clair.set("DIABETES", Cell::Decimal(0.112));
        let source = vec![CountyRow::new("Clair"), saint_clair];

        let mut records = Vec::new();
        append_section(&mut records, &matches, Some(source.as_slice()), &measures, "PLACES: ");
        assert_eq!(records, [vec!["Saint Clair", "PLACES: Diabetes", "0.112"]]);
    }
}
