use anyhow::{Context, Result, bail};

use crate::cli::AccessArgs;
use crate::commands::Session;
use crate::measures::{Measure, MeasureGroup, find_group, group_names, resolve};
use crate::merge::merge_sources;
use crate::output::{Outcome, Sink};
use crate::sources::cms::ACCESS_MEASURES;
use crate::sources::hrsa::HPSA_MEASURES;

/// Requested groups split by the source that serves them.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct AccessSelection {
    pub cms: Vec<String>,
    pub hrsa: Vec<String>,
}

pub fn split_groups(groups: &[String]) -> Result<AccessSelection> {
    if groups.is_empty() {
        bail!("Provide access group names or 'all'. Run 'access-topics' to see available groups.");
    }
    if groups.iter().any(|g| g == "all") {
        return Ok(AccessSelection {
            cms: names(ACCESS_MEASURES),
            hrsa: names(HPSA_MEASURES),
        });
    }

    let unknown: Vec<&str> = groups
        .iter()
        .map(String::as_str)
        .filter(|g| find_group(ACCESS_MEASURES, g).is_none() && find_group(HPSA_MEASURES, g).is_none())
        .collect();
    if !unknown.is_empty() {
        let mut available = group_names(ACCESS_MEASURES);
        available.extend(group_names(HPSA_MEASURES));
        available.sort_unstable();
        bail!(
            "Unknown access group(s): {}. Available: {}",
            unknown.join(", "),
            available.join(", ")
        );
    }

    let pick = |table: &[MeasureGroup]| -> Vec<String> {
        groups
            .iter()
            .filter(|g| find_group(table, g).is_some())
            .cloned()
            .collect()
    };
    Ok(AccessSelection {
        cms: pick(ACCESS_MEASURES),
        hrsa: pick(HPSA_MEASURES),
    })
}

fn names(table: &[MeasureGroup]) -> Vec<String> {
    group_names(table).into_iter().map(str::to_string).collect()
}

pub async fn run(session: &Session, args: AccessArgs) -> Result<Outcome> {
    let selection = split_groups(&args.groups)?;
    let cms_measures = resolve(ACCESS_MEASURES, &selection.cms, "access group")?;
    let hrsa_measures = resolve(HPSA_MEASURES, &selection.hrsa, "shortage group")?;

    let cms_rows = if cms_measures.is_empty() {
        Vec::new()
    } else {
        session.cms.fetch().await.context("Failed fetching CMS hospital data")?
    };
    let hrsa_rows = if hrsa_measures.is_empty() {
        Vec::new()
    } else {
        session
            .hrsa
            .fetch(&hrsa_measures)
            .await
            .context("Failed fetching HRSA shortage data")?
    };

    let rows = merge_sources([cms_rows, hrsa_rows]);
    let measures: Vec<Measure> = cms_measures.into_iter().chain(hrsa_measures).collect();
    Sink::from_arg(args.table.output.clone()).table(rows, &measures, &args.table.options(false))
}
