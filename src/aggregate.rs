//! Folds per-facility / per-designation records into one row per county.
//!
//! Each output column is described by a [`Column`] with a [`Reducer`]. All
//! reducers are commutative, so the result never depends on record order.

use std::collections::BTreeMap;

use crate::county::{county_for_fips, normalize_county_key};
use crate::row::{CountyRow, RawRecord, field};
use crate::value::{Cell, round_to};

/// How a record is assigned to a county.
#[derive(Debug, Clone, Copy)]
pub enum CountyKey {
    /// Free-form county name in `field`, title-cased and normalized.
    Name(&'static str),
    /// State+county FIPS code in `field`, resolved through the Michigan table.
    Fips(&'static str),
}

impl CountyKey {
    pub fn resolve(&self, record: &RawRecord) -> Option<String> {
        match self {
            CountyKey::Name(name) => normalize_county_key(field(record, name)),
            CountyKey::Fips(name) => county_for_fips(field(record, name)).map(str::to_string),
        }
    }
}

/// Case-insensitive test on one source field.
#[derive(Debug, Clone, Copy)]
pub enum Predicate {
    Contains(&'static str, &'static str),
    OneOf(&'static str, &'static [&'static str]),
}

impl Predicate {
    pub fn matches(&self, record: &RawRecord) -> bool {
        match self {
            Predicate::Contains(name, needle) => field(record, name)
                .to_lowercase()
                .contains(&needle.to_lowercase()),
            Predicate::OneOf(name, values) => {
                let value = field(record, name).trim();
                values.iter().any(|v| v.eq_ignore_ascii_case(value))
            }
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub enum Reducer {
    Count,
    CountIf(Predicate),
    /// Mean of valid observations, rounded to one decimal place.
    Mean(&'static str),
    Max(&'static str),
    /// Integer sum of valid observations, saturating at the `i64` bounds.
    Sum(&'static str),
}

#[derive(Debug, Clone)]
pub struct Column {
    pub id: String,
    pub reducer: Reducer,
}

impl Column {
    pub fn new(id: impl Into<String>, reducer: Reducer) -> Self {
        Self {
            id: id.into(),
            reducer,
        }
    }
}

#[derive(Debug, Clone)]
enum Accumulator {
    Count(i64),
    Observations(Vec<f64>),
    Sum { total: i64, seen: usize },
}

impl Accumulator {
    fn for_reducer(reducer: &Reducer) -> Self {
        match reducer {
            Reducer::Count | Reducer::CountIf(_) => Accumulator::Count(0),
            Reducer::Mean(_) | Reducer::Max(_) => Accumulator::Observations(Vec::new()),
            Reducer::Sum(_) => Accumulator::Sum { total: 0, seen: 0 },
        }
    }

    fn fold(&mut self, reducer: &Reducer, record: &RawRecord) {
        match (self, reducer) {
            (Accumulator::Count(n), Reducer::Count) => *n += 1,
            (Accumulator::Count(n), Reducer::CountIf(predicate)) => {
                if predicate.matches(record) {
                    *n += 1;
                }
            }
            (Accumulator::Observations(values), Reducer::Mean(name) | Reducer::Max(name)) => {
                if let Some(v) = Cell::parse(field(record, name)).as_f64() {
                    values.push(v);
                }
            }
            (Accumulator::Sum { total, seen }, Reducer::Sum(name)) => {
                if let Some(v) = parse_integer(field(record, name)) {
                    *total = total.saturating_add(v);
                    *seen += 1;
                }
            }
            _ => {}
        }
    }

    fn finish(self, reducer: &Reducer) -> Cell {
        match (self, reducer) {
            (Accumulator::Count(n), _) => Cell::Integer(n),
            (Accumulator::Observations(mut values), Reducer::Mean(_)) => {
                if values.is_empty() {
                    return Cell::Absent;
                }
                values.sort_by(f64::total_cmp);
                let mean = values.iter().sum::<f64>() / values.len() as f64;
                Cell::from_f64(round_to(mean, 1))
            }
            (Accumulator::Observations(values), _) => values
                .into_iter()
                .reduce(f64::max)
                .map(Cell::from_f64)
                .unwrap_or(Cell::Absent),
            (Accumulator::Sum { total, seen }, _) => {
                if seen == 0 {
                    Cell::Absent
                } else {
                    Cell::Integer(total)
                }
            }
        }
    }
}

fn parse_integer(raw: &str) -> Option<i64> {
    match Cell::parse(raw) {
        Cell::Integer(n) => Some(n),
        Cell::Decimal(n) => Some(n.trunc() as i64),
        _ => None,
    }
}

#[derive(Debug, Clone)]
pub struct Aggregator {
    pub key: CountyKey,
    pub columns: Vec<Column>,
}

impl Aggregator {
    pub fn new(key: CountyKey, columns: Vec<Column>) -> Self {
        Self { key, columns }
    }

    /// One row per resolvable county, ascending by county name. Records whose
    /// county cannot be resolved are dropped.
    pub fn aggregate(&self, records: &[RawRecord]) -> Vec<CountyRow> {
        let mut groups: BTreeMap<String, Vec<Accumulator>> = BTreeMap::new();
        let mut dropped = 0usize;

        for record in records {
            let Some(county) = self.key.resolve(record) else {
                dropped += 1;
                continue;
            };
            let accumulators = groups.entry(county).or_insert_with(|| {
                self.columns
                    .iter()
                    .map(|c| Accumulator::for_reducer(&c.reducer))
                    .collect()
            });
            for (acc, column) in accumulators.iter_mut().zip(&self.columns) {
                acc.fold(&column.reducer, record);
            }
        }

        if dropped > 0 {
            tracing::debug!("Dropped {} records without a resolvable county", dropped);
        }

        groups
            .into_iter()
            .map(|(county, accumulators)| {
                let mut row = CountyRow::new(county);
                for (acc, column) in accumulators.into_iter().zip(&self.columns) {
                    row.set(column.id.clone(), acc.finish(&column.reducer));
                }
                row
            })
            .collect()
    }
}
