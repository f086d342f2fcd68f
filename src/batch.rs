//! Splits an oversized field list across several calls and stitches the
//! partial records back together.

use std::collections::HashMap;
use std::future::Future;

use crate::error::QueryError;
use crate::row::{RawRecord, field};

/// Fetches `fields` in chunks of at most `cap` and merges records that share
/// the composite `key_fields` (for example `state` + `county`).
///
/// A single chunk is returned as fetched. Otherwise later chunks add their
/// fields to the record first seen for a key; a field already present is left
/// alone, which only happens for identity fields every chunk re-sends.
pub async fn fetch_batched<F, Fut>(
    fields: &[String],
    cap: usize,
    key_fields: &[&str],
    mut fetch_chunk: F,
) -> Result<Vec<RawRecord>, QueryError>
where
    F: FnMut(Vec<String>) -> Fut,
    Fut: Future<Output = Result<Vec<RawRecord>, QueryError>>,
{
    let cap = cap.max(1);
    if fields.len() <= cap {
        return fetch_chunk(fields.to_vec()).await;
    }

    let chunks: Vec<Vec<String>> = fields.chunks(cap).map(<[String]>::to_vec).collect();
    tracing::debug!(
        "Splitting {} fields into {} batches of at most {}",
        fields.len(),
        chunks.len(),
        cap
    );

    let mut order: Vec<String> = Vec::new();
    let mut merged: HashMap<String, RawRecord> = HashMap::new();
    for chunk in chunks {
        for record in fetch_chunk(chunk).await? {
            let key = composite_key(&record, key_fields);
            match merged.get_mut(&key) {
                Some(existing) => {
                    for (name, value) in record {
                        existing.entry(name).or_insert(value);
                    }
                }
                None => {
                    order.push(key.clone());
                    merged.insert(key, record);
                }
            }
        }
    }

    Ok(order
        .into_iter()
        .filter_map(|key| merged.remove(&key))
        .collect())
}

fn composite_key(record: &RawRecord, key_fields: &[&str]) -> String {
    key_fields
        .iter()
        .map(|name| field(record, name))
        .collect::<Vec<_>>()
        .join("\u{1f}")
}
