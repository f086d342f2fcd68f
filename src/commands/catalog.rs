//! Static measure listings (`topics`, `places-topics`, `access-topics`).

use anyhow::Result;
use std::io::Write;

use crate::measures::{Measure, MeasureGroup};
use crate::output::write_listing;
use crate::sources::cms::ACCESS_MEASURES;
use crate::sources::hrsa::HPSA_MEASURES;
use crate::sources::places::PLACES_MEASURES;
use crate::topics::TOPICS;

pub fn topics<W: Write>(writer: W) -> Result<usize> {
    let records = rows(TOPICS, |group, m| {
        vec![group.to_string(), m.id.to_string(), m.label.to_string(), m.format.to_string()]
    });
    write_listing(writer, &["Topic", "Variable Code", "Label", "Format"], &records)
}

pub fn places_topics<W: Write>(writer: W) -> Result<usize> {
    let records = rows(PLACES_MEASURES, |group, m| {
        vec![group.to_string(), m.id.to_string(), m.label.to_string(), m.description.to_string()]
    });
    write_listing(writer, &["Group", "Measure ID", "Label", "Short Question"], &records)
}

pub fn access_topics<W: Write>(writer: W) -> Result<usize> {
    let mut records = rows(ACCESS_MEASURES, |group, m| access_record("CMS", group, m));
    records.extend(rows(HPSA_MEASURES, |group, m| access_record("HRSA", group, m)));
    write_listing(writer, &["Source", "Group", "Measure ID", "Label", "Description"], &records)
}

fn access_record(source: &str, group: &str, m: &Measure) -> Vec<String> {
    vec![
        source.to_string(),
        group.to_string(),
        m.id.to_string(),
        m.label.to_string(),
        m.description.to_string(),
    ]
}

fn rows<F>(table: &[MeasureGroup], mut record: F) -> Vec<Vec<String>>
where
    F: FnMut(&str, &Measure) -> Vec<String>,
{
    table
        .iter()
        .flat_map(|group| group.measures.iter().map(move |m| (group.name, m)))
        .map(|(name, m)| record(name, m))
        .collect()
}
