use std::collections::{BTreeMap, HashMap};

use serde_json::{Map, Value};

use crate::common::value_to_string;
use crate::value::Cell;

/// One upstream record as field name -> string value. Lives only until it is
/// folded into a [`CountyRow`].
pub type RawRecord = HashMap<String, String>;

pub fn record_from_json(object: &Map<String, Value>) -> RawRecord {
    object
        .iter()
        .map(|(k, v)| (k.clone(), value_to_string(v)))
        .collect()
}

pub fn field<'a>(record: &'a RawRecord, name: &str) -> &'a str {
    record.get(name).map(String::as_str).unwrap_or("")
}

static ABSENT: Cell = Cell::Absent;

/// Per-county output row: display name, optional vintage and measure cells.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CountyRow {
    pub county: String,
    pub year: Option<u16>,
    cells: BTreeMap<String, Cell>,
}

impl CountyRow {
    pub fn new(county: impl Into<String>) -> Self {
        Self {
            county: county.into(),
            year: None,
            cells: BTreeMap::new(),
        }
    }

    pub fn with_year(mut self, year: Option<u16>) -> Self {
        self.year = year;
        self
    }

    /// Missing measures read as [`Cell::Absent`].
    pub fn get(&self, id: &str) -> &Cell {
        self.cells.get(id).unwrap_or(&ABSENT)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.cells.contains_key(id)
    }

    pub fn set(&mut self, id: impl Into<String>, cell: Cell) {
        self.cells.insert(id.into(), cell);
    }

    /// Folds every cell of `other` into this row; `other` wins on collisions.
    pub fn absorb(&mut self, other: CountyRow) {
        self.cells.extend(other.cells);
    }

    pub fn key(&self) -> (String, Option<u16>) {
        (self.county.clone(), self.year)
    }
}

pub fn sort_by_county(rows: &mut [CountyRow]) {
    rows.sort_by(|a, b| a.county.cmp(&b.county).then(a.year.cmp(&b.year)));
}
