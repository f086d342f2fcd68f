use std::collections::BTreeMap;

use crate::row::CountyRow;

/// Unions independently aggregated row sets by (county, year).
///
/// Every county present in any source appears once. Fields are unioned; when
/// two sources carry the same field for the same county the later source in
/// `sources` wins. Output is ascending by county name, then year.
pub fn merge_sources<I>(sources: I) -> Vec<CountyRow>
where
    I: IntoIterator<Item = Vec<CountyRow>>,
{
    let mut merged: BTreeMap<(String, Option<u16>), CountyRow> = BTreeMap::new();
    for rows in sources {
        for row in rows {
            match merged.get_mut(&row.key()) {
                Some(existing) => existing.absorb(row),
                None => {
                    merged.insert(row.key(), row);
                }
            }
        }
    }
    merged.into_values().collect()
}
