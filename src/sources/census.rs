//! Census ACS 5-year county estimates.

use reqwest::Client;
use serde_json::Value;
use std::collections::HashSet;

use crate::batch::fetch_batched;
use crate::common::{get_json, value_to_string};
use crate::constants::{CENSUS_MAX_VARS_PER_CALL, MICHIGAN_FIPS};
use crate::county::clean_county_name;
use crate::error::{Api, QueryError};
use crate::measures::Measure;
use crate::row::{CountyRow, RawRecord, field};
use crate::value::Cell;

const NAME_FIELD: &str = "NAME";
const MERGE_KEY: &[&str] = &["state", "county"];

#[derive(Debug, Clone)]
pub struct CensusClient {
    http: Client,
    base_url: String,
    max_vars: usize,
}

impl CensusClient {
    pub fn new(http: Client, base_url: impl Into<String>) -> Self {
        Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            max_vars: CENSUS_MAX_VARS_PER_CALL,
        }
    }

    pub fn with_max_vars(mut self, max_vars: usize) -> Self {
        self.max_vars = max_vars.max(1);
        self
    }

    /// One row per Michigan county for a single vintage. Rows carry no year.
    pub async fn fetch_year(&self, measures: &[Measure], year: u16, key: &str) -> Result<Vec<CountyRow>, QueryError> {
        let records = self.fetch_records(measures, year, key).await?;
        Ok(to_rows(&records, measures, None))
    }

    /// Sequential fetch of several vintages; each row is tagged with its year.
    /// A year listed more than once is fetched once.
    pub async fn fetch_years(
        &self,
        measures: &[Measure],
        years: &[u16],
        key: &str,
    ) -> Result<Vec<CountyRow>, QueryError> {
        let mut seen = HashSet::new();
        let mut rows = Vec::new();
        for &year in years.iter().filter(|year| seen.insert(**year)) {
            let records = self.fetch_records(measures, year, key).await?;
            rows.extend(to_rows(&records, measures, Some(year)));
        }
        Ok(rows)
    }

    async fn fetch_records(&self, measures: &[Measure], year: u16, key: &str) -> Result<Vec<RawRecord>, QueryError> {
        let codes: Vec<String> = measures.iter().map(|m| m.id.to_string()).collect();
        fetch_batched(&codes, self.max_vars, MERGE_KEY, move |chunk| {
            self.fetch_chunk(chunk, year, key)
        })
        .await
    }

    async fn fetch_chunk(&self, codes: Vec<String>, year: u16, key: &str) -> Result<Vec<RawRecord>, QueryError> {
        let url = format!("{}/{}/acs/acs5", self.base_url, year);
        tracing::debug!("GET {} ({} variables)", url, codes.len());
        let get = format!("{NAME_FIELD},{}", codes.join(","));
        let state = format!("state:{MICHIGAN_FIPS}");
        let request = self.http.get(&url).query(&[
            ("get", get.as_str()),
            ("for", "county:*"),
            ("in", state.as_str()),
            ("key", key),
        ]);
        let table: Vec<Vec<Value>> = get_json(Api::Census, request, true).await?;
        table_to_records(table)
    }
}

/// Census answers with a JSON array of arrays; the first row is the header.
fn table_to_records(table: Vec<Vec<Value>>) -> Result<Vec<RawRecord>, QueryError> {
    let mut rows = table.into_iter();
    let header: Vec<String> = rows
        .next()
        .ok_or_else(|| QueryError::Decode {
            api: Api::Census,
            message: "empty response table".to_string(),
        })?
        .iter()
        .map(value_to_string)
        .collect();

    Ok(rows
        .map(|row| {
            header
                .iter()
                .cloned()
                .zip(row.iter().map(value_to_string))
                .collect()
        })
        .collect())
}

fn to_rows(records: &[RawRecord], measures: &[Measure], year: Option<u16>) -> Vec<CountyRow> {
    records
        .iter()
        .map(|record| {
            let mut row = CountyRow::new(clean_county_name(field(record, NAME_FIELD))).with_year(year);
            for measure in measures {
                row.set(measure.id.to_string(), Cell::parse(field(record, &measure.id)));
            }
            row
        })
        .collect()
}
