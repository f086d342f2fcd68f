//! Final table shaping: county filter, sort, header and CSV emission.

use anyhow::{Context, Result};
use csv::Writer;
use std::cmp::Ordering;
use std::io::{self, Write};
use std::path::PathBuf;

use crate::county::CountyFilter;
use crate::measures::Measure;
use crate::row::{CountyRow, sort_by_county};

pub const COUNTY_HEADER: &str = "County";
pub const YEAR_HEADER: &str = "Year";

#[derive(Debug, Clone, Default)]
pub struct TableOptions {
    /// Case-insensitive substring matched against the county name, as typed
    /// or cleaned (`St. Clair` finds `Saint Clair`).
    pub county_filter: Option<String>,
    /// Measure label (or raw id) to sort descending by.
    pub sort_by: Option<String>,
    /// Prepend the Year column. Only set in multi-year mode.
    pub show_year: bool,
    pub header: bool,
}

/// Result of writing a table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Written { rows: usize },
    /// The county filter left nothing to write. Not an error.
    NoMatchingRows,
}

/// Resolves a sort label to a measure id: case-insensitive label match
/// first, then the input itself as a literal id.
pub fn resolve_sort_field(measures: &[Measure], label: &str) -> String {
    measures
        .iter()
        .find(|m| m.label.eq_ignore_ascii_case(label))
        .map(|m| m.id.to_string())
        .unwrap_or_else(|| label.to_string())
}

/// Applies the county filter and ordering. Without a sort label the order is
/// (county, year) ascending; with one it is descending by that field's
/// numeric value, ties kept in county order.
pub fn select_rows(mut rows: Vec<CountyRow>, measures: &[Measure], opts: &TableOptions) -> Vec<CountyRow> {
    if let Some(filter) = opts.county_filter.as_deref() {
        let filter = CountyFilter::new(filter);
        rows.retain(|row| filter.matches(&row.county));
    }

    sort_by_county(&mut rows);
    if let Some(label) = opts.sort_by.as_deref() {
        let id = resolve_sort_field(measures, label);
        rows.sort_by(|a, b| {
            b.get(&id)
                .sort_key()
                .partial_cmp(&a.get(&id).sort_key())
                .unwrap_or(Ordering::Equal)
        });
    }
    rows
}

pub fn header_row(measures: &[Measure], show_year: bool) -> Vec<String> {
    let mut header = Vec::with_capacity(measures.len() + 2);
    if show_year {
        header.push(YEAR_HEADER.to_string());
    }
    header.push(COUNTY_HEADER.to_string());
    header.extend(measures.iter().map(|m| m.label.to_string()));
    header
}

fn data_row(row: &CountyRow, measures: &[Measure], show_year: bool) -> Vec<String> {
    let mut out = Vec::with_capacity(measures.len() + 2);
    if show_year {
        out.push(row.year.map(|y| y.to_string()).unwrap_or_default());
    }
    out.push(row.county.clone());
    out.extend(measures.iter().map(|m| row.get(&m.id).render(m.format)));
    out
}

/// Filters, sorts and writes county rows as CSV.
pub fn write_table<W: Write>(
    writer: W,
    rows: Vec<CountyRow>,
    measures: &[Measure],
    opts: &TableOptions,
) -> Result<Outcome> {
    let rows = select_rows(rows, measures, opts);
    if rows.is_empty() {
        return Ok(Outcome::NoMatchingRows);
    }

    let mut csv = Writer::from_writer(writer);
    if opts.header {
        csv.write_record(header_row(measures, opts.show_year))
            .context("Failed writing CSV header")?;
    }
    for row in &rows {
        csv.write_record(data_row(row, measures, opts.show_year))
            .with_context(|| format!("Failed writing CSV row for {}", row.county))?;
    }
    csv.flush().context("Failed flushing CSV output")?;
    Ok(Outcome::Written { rows: rows.len() })
}

/// Writes a plain listing (catalogs, county profiles) with a fixed header.
pub fn write_listing<W: Write>(writer: W, header: &[&str], records: &[Vec<String>]) -> Result<usize> {
    let mut csv = Writer::from_writer(writer);
    csv.write_record(header).context("Failed writing CSV header")?;
    for record in records {
        csv.write_record(record).context("Failed writing CSV row")?;
    }
    csv.flush().context("Failed flushing CSV output")?;
    Ok(records.len())
}

/// Where CSV output goes: stdout, or a file named by `--output`.
#[derive(Debug, Clone, Default)]
pub enum Sink {
    #[default]
    Stdout,
    File(PathBuf),
}

impl Sink {
    pub fn from_arg(output: Option<PathBuf>) -> Self {
        output.map(Sink::File).unwrap_or_default()
    }

    pub fn table(&self, rows: Vec<CountyRow>, measures: &[Measure], opts: &TableOptions) -> Result<Outcome> {
        let outcome = match self {
            Sink::Stdout => write_table(io::stdout().lock(), rows, measures, opts)?,
            Sink::File(path) => {
                // Filter before touching the file so a no-match leaves nothing behind.
                let rows = select_rows(rows, measures, opts);
                if rows.is_empty() {
                    Outcome::NoMatchingRows
                } else {
                    let file = std::fs::File::create(path)
                        .with_context(|| format!("Failed creating output file {}", path.display()))?;
                    write_table(file, rows, measures, opts)?
                }
            }
        };
        self.report(outcome);
        Ok(outcome)
    }

    pub fn listing(&self, header: &[&str], records: &[Vec<String>]) -> Result<usize> {
        let written = match self {
            Sink::Stdout => write_listing(io::stdout().lock(), header, records)?,
            Sink::File(path) => {
                let file = std::fs::File::create(path)
                    .with_context(|| format!("Failed creating output file {}", path.display()))?;
                write_listing(file, header, records)?
            }
        };
        self.report(Outcome::Written { rows: written });
        Ok(written)
    }

    fn report(&self, outcome: Outcome) {
        match (outcome, self) {
            (Outcome::NoMatchingRows, _) => eprintln!("No matching rows found."),
            (Outcome::Written { .. }, Sink::File(path)) => {
                eprintln!("Wrote CSV to {}", path.display())
            }
            (Outcome::Written { .. }, Sink::Stdout) => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::measures::FormatKind;
    use crate::value::Cell;

    fn measures() -> Vec<Measure> {
        vec![
            Measure::new("B01003_001E", "Total Population", "", FormatKind::Number),
            Measure::new("B01002_001E", "Median Age", "", FormatKind::Decimal),
        ]
    }

    fn row(county: &str, pop: Option<i64>, age: f64) -> CountyRow {
        let mut row = CountyRow::new(county);
        if let Some(pop) = pop {
            row.set("B01003_001E", Cell::Integer(pop));
        }
        row.set("B01002_001E", Cell::Decimal(age));
        row
    }

    fn sample() -> Vec<CountyRow> {
        vec![
            row("Wayne", Some(1_750_000), 38.0),
            row("Keweenaw", None, 58.3),
            row("Oakland", Some(1_270_000), 41.2),
            row("Washtenaw", Some(370_000), 34.4),
        ]
    }

    fn opts() -> TableOptions {
        TableOptions {
            header: true,
            ..TableOptions::default()
        }
    }

    fn render(rows: Vec<CountyRow>, opts: &TableOptions) -> (Outcome, String) {
        let mut buf = Vec::new();
        let outcome = write_table(&mut buf, rows, &measures(), opts).unwrap();
        (outcome, String::from_utf8(buf).unwrap())
    }

    #[test]
    fn default_order_is_by_county() {
        let (outcome, csv) = render(sample(), &opts());
        assert_eq!(outcome, Outcome::Written { rows: 4 });
        let lines: Vec<_> = csv.lines().collect();
        assert_eq!(lines[0], "County,Total Population,Median Age");
        assert_eq!(lines[1], "Keweenaw,,58.3");
        assert_eq!(lines[2], "Oakland,1270000,41.2");
        assert_eq!(lines[4], "Wayne,1750000,38.0");
    }

    #[test]
    fn filter_is_case_insensitive_substring() {
        let opts = TableOptions {
            county_filter: Some("WASH".to_string()),
            ..opts()
        };
        let (_, csv) = render(sample(), &opts);
        assert_eq!(csv.lines().count(), 2);
        assert!(csv.contains("Washtenaw"));
    }

    #[test]
    fn filter_accepts_county_suffix() {
        let opts = TableOptions {
            county_filter: Some("Wayne County".to_string()),
            ..opts()
        };
        let (outcome, csv) = render(sample(), &opts);
        assert_eq!(outcome, Outcome::Written { rows: 1 });
        assert!(csv.lines().nth(1).is_some_and(|l| l.starts_with("Wayne,")));
    }

    #[test]
    fn filter_with_no_match_is_distinct() {
        let opts = TableOptions {
            county_filter: Some("Nowhere".to_string()),
            ..opts()
        };
        let (outcome, csv) = render(sample(), &opts);
        assert_eq!(outcome, Outcome::NoMatchingRows);
        assert!(csv.is_empty());
    }

    #[test]
    fn sort_by_label_is_descending_with_missing_as_zero() {
        let opts = TableOptions {
            sort_by: Some("total population".to_string()),
            ..opts()
        };
        let rows = select_rows(sample(), &measures(), &opts);
        let keys: Vec<f64> = rows.iter().map(|r| r.get("B01003_001E").sort_key()).collect();
        assert!(keys.windows(2).all(|w| w[0] >= w[1]));
        assert_eq!(rows.last().map(|r| r.county.as_str()), Some("Keweenaw"));
    }

    #[test]
    fn sort_falls_back_to_literal_id() {
        assert_eq!(resolve_sort_field(&measures(), "Median Age"), "B01002_001E");
        assert_eq!(resolve_sort_field(&measures(), "B01002_001E"), "B01002_001E");
        let opts = TableOptions {
            sort_by: Some("B01002_001E".to_string()),
            ..opts()
        };
        let rows = select_rows(sample(), &measures(), &opts);
        assert_eq!(rows[0].county, "Keweenaw");
    }

    #[test]
    fn year_column_leads_in_multi_year_mode() {
        let rows = vec![
            row("Wayne", Some(1), 1.0).with_year(Some(2023)),
            row("Wayne", Some(2), 2.0).with_year(Some(2019)),
        ];
        let opts = TableOptions {
            show_year: true,
            ..opts()
        };
        let (_, csv) = render(rows, &opts);
        let lines: Vec<_> = csv.lines().collect();
        assert_eq!(lines[0], "Year,County,Total Population,Median Age");
        assert!(lines[1].starts_with("2019,Wayne"));
        assert!(lines[2].starts_with("2023,Wayne"));
    }

    #[test]
    fn header_can_be_suppressed() {
        let opts = TableOptions {
            header: false,
            ..TableOptions::default()
        };
        let (_, csv) = render(sample(), &opts);
        assert_eq!(csv.lines().count(), 4);
    }

    #[test]
    fn embedded_commas_are_quoted() {
        let mut buf = Vec::new();
        write_listing(&mut buf, &["County", "Field", "Value"], &[vec![
            "Wayne".to_string(),
            "Label, with comma".to_string(),
            "1".to_string(),
        ]])
        .unwrap();
        let csv = String::from_utf8(buf).unwrap();
        assert!(csv.contains("\"Label, with comma\""));
    }
}
