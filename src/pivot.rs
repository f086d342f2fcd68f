//! Long-to-wide reshaping for sources that return one record per
//! (county, measure) pair.

use std::collections::BTreeMap;

use crate::county::clean_county_name;
use crate::row::{CountyRow, RawRecord, field};
use crate::value::{Cell, round_to};

/// Field names of the long-format record.
#[derive(Debug, Clone, Copy)]
pub struct LongLayout {
    pub county: &'static str,
    pub measure: &'static str,
    pub value: &'static str,
}

/// Converts a raw percentage to a fraction rounded to four places. Values
/// that are not numeric are kept as they came.
pub fn percent_to_fraction(raw: &str) -> Cell {
    match Cell::parse(raw).as_f64() {
        Some(n) => Cell::from_f64(round_to(n / 100.0, 4)),
        None => Cell::parse(raw),
    }
}

/// One row per normalized county with one cell per measure id present in the
/// input. A measure with no record for a county is simply missing from that
/// row. Duplicate (county, measure) records resolve through
/// [`Cell::prefer`], so input order never matters.
pub fn pivot(records: &[RawRecord], layout: LongLayout) -> Vec<CountyRow> {
    let mut by_county: BTreeMap<String, CountyRow> = BTreeMap::new();

    for record in records {
        let county = clean_county_name(field(record, layout.county));
        let measure = field(record, layout.measure).trim();
        if county.is_empty() || measure.is_empty() {
            continue;
        }

        let cell = percent_to_fraction(field(record, layout.value));
        let row = by_county
            .entry(county.clone())
            .or_insert_with(|| CountyRow::new(county));
        let cell = if row.contains(measure) {
            row.get(measure).clone().prefer(cell)
        } else {
            cell
        };
        row.set(measure, cell);
    }

    by_county.into_values().collect()
}
