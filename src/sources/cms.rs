//! CMS Provider Data hospital directory, folded into per-county access counts.

use reqwest::Client;
use serde_json::Value;

use crate::aggregate::{Aggregator, Column, CountyKey, Predicate, Reducer};
use crate::common::get_json;
use crate::constants::{CMS_PAGE_SIZE, MICHIGAN_STATE_ABBR};
use crate::error::{Api, QueryError};
use crate::fetch::{Page, fetch_all};
use crate::measures::{FormatKind::*, Measure, MeasureGroup};
use crate::row::{CountyRow, RawRecord, record_from_json};

pub static ACCESS_MEASURES: &[MeasureGroup] = &[MeasureGroup {
    name: "hospital_access",
    measures: &[
        Measure::new("hospital_count", "Hospital Count", "Total hospitals in county", Number),
        Measure::new("acute_care_hospitals", "Acute Care Hospitals", "Acute care hospital count", Number),
        Measure::new("critical_access_hospitals", "Critical Access Hospitals", "Critical access hospital count", Number),
        Measure::new("emergency_services", "Emergency Services", "Hospitals with emergency services", Number),
        Measure::new("birthing_friendly", "Birthing Friendly", "Birthing-friendly designated hospitals", Number),
        Measure::new("avg_hospital_rating", "Avg Hospital Rating", "Average CMS overall hospital rating", Decimal),
    ],
}];

pub fn hospital_aggregator() -> Aggregator {
    Aggregator::new(
        CountyKey::Name("countyparish"),
        vec![
            Column::new("hospital_count", Reducer::Count),
            Column::new(
                "acute_care_hospitals",
                Reducer::CountIf(Predicate::Contains("hospital_type", "Acute Care")),
            ),
            Column::new(
                "critical_access_hospitals",
                Reducer::CountIf(Predicate::Contains("hospital_type", "Critical Access")),
            ),
            Column::new(
                "emergency_services",
                Reducer::CountIf(Predicate::OneOf("emergency_services", &["yes", "y", "true"])),
            ),
            Column::new(
                "birthing_friendly",
                Reducer::CountIf(Predicate::OneOf(
                    "meets_criteria_for_birthing_friendly_designation",
                    &["y"],
                )),
            ),
            Column::new("avg_hospital_rating", Reducer::Mean("hospital_overall_rating")),
        ],
    )
}

#[derive(Debug, Clone)]
pub struct CmsClient {
    http: Client,
    base_url: String,
    page_size: usize,
}

impl CmsClient {
    pub fn new(http: Client, base_url: impl Into<String>) -> Self {
        Self {
            http,
            base_url: base_url.into(),
            page_size: CMS_PAGE_SIZE,
        }
    }

    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size.max(1);
        self
    }

    /// Every Michigan hospital in the directory.
    pub async fn fetch_hospitals(&self) -> Result<Vec<RawRecord>, QueryError> {
        let records = fetch_all(self.page_size, move |offset, limit| self.fetch_page(offset, limit)).await?;
        tracing::info!("Fetched {} CMS hospital records", records.len());
        Ok(records)
    }

    /// Hospital access columns, one row per county with at least one hospital.
    pub async fn fetch(&self) -> Result<Vec<CountyRow>, QueryError> {
        let records = self.fetch_hospitals().await?;
        Ok(hospital_aggregator().aggregate(&records))
    }

    async fn fetch_page(&self, offset: usize, limit: usize) -> Result<Page, QueryError> {
        tracing::debug!("GET {} offset={} limit={}", self.base_url, offset, limit);
        let offset_param = offset.to_string();
        let limit_param = limit.to_string();
        let request = self.http.get(&self.base_url).query(&[
            ("offset", offset_param.as_str()),
            ("limit", limit_param.as_str()),
            ("conditions[0][property]", "state"),
            ("conditions[0][value]", MICHIGAN_STATE_ABBR),
            ("conditions[0][operator]", "="),
        ]);
        let body: Value = get_json(Api::Cms, request, false).await?;
        Ok(Page::sized(results(body)?))
    }
}

/// The datastore wraps rows in `{"results": [...]}`; a bare array is also
/// accepted.
fn results(body: Value) -> Result<Vec<RawRecord>, QueryError> {
    let items = match body {
        Value::Array(items) => items,
        Value::Object(mut object) => match object.remove("results") {
            Some(Value::Array(items)) => items,
            None | Some(Value::Null) => Vec::new(),
            Some(_) => return Err(decode_error("`results` is not an array")),
        },
        _ => return Err(decode_error("expected an object or array")),
    };
    Ok(items
        .iter()
        .filter_map(Value::as_object)
        .map(record_from_json)
        .collect())
}

fn decode_error(message: &str) -> QueryError {
    QueryError::Decode {
        api: Api::Cms,
        message: message.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::Cell;
    use serde_json::json;

    fn hospital(county: &str, kind: &str, er: &str, birthing: &str, rating: &str) -> RawRecord {
        RawRecord::from([
            ("countyparish".to_string(), county.to_string()),
            ("hospital_type".to_string(), kind.to_string()),
            ("emergency_services".to_string(), er.to_string()),
            (
                "meets_criteria_for_birthing_friendly_designation".to_string(),
                birthing.to_string(),
            ),
            ("hospital_overall_rating".to_string(), rating.to_string()),
        ])
    }

    #[test]
    fn hospitals_fold_into_access_counts() {
        let records = vec![
            hospital("WASHTENAW", "Acute Care Hospitals", "Yes", "Y", "5"),
            hospital("WASHTENAW", "Acute Care Hospitals", "No", "", "4"),
            hospital("WASHTENAW", "Psychiatric", "No", "", "Not Available"),
            hospital("ALGER", "Critical Access Hospitals", "Yes", "", "Not Available"),
        ];
        let rows = hospital_aggregator().aggregate(&records);
        assert_eq!(rows.len(), 2);

        let alger = &rows[0];
        assert_eq!(alger.county, "Alger");
        assert_eq!(alger.get("critical_access_hospitals"), &Cell::Integer(1));
        assert_eq!(alger.get("avg_hospital_rating"), &Cell::Absent);

        let washtenaw = &rows[1];
        assert_eq!(washtenaw.get("hospital_count"), &Cell::Integer(3));
        assert_eq!(washtenaw.get("acute_care_hospitals"), &Cell::Integer(2));
        assert_eq!(washtenaw.get("emergency_services"), &Cell::Integer(1));
        assert_eq!(washtenaw.get("birthing_friendly"), &Cell::Integer(1));
        assert_eq!(washtenaw.get("avg_hospital_rating").render(Decimal), "4.5");
    }

    #[test]
    fn results_accepts_wrapped_or_bare_arrays() {
        let wrapped = results(json!({"results": [{"countyparish": "WAYNE"}], "count": 1})).unwrap();
        assert_eq!(wrapped.len(), 1);
        let bare = results(json!([{"countyparish": "WAYNE"}, {"countyparish": "KENT"}])).unwrap();
        assert_eq!(bare.len(), 2);
        assert!(results(json!({"count": 0})).unwrap().is_empty());
        assert!(results(json!("nope")).is_err());
    }
}
