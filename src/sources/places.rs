//! CDC PLACES county estimates (Socrata API).
//!
//! PLACES publishes one record per (county, measure), so pages are pivoted
//! into one row per county. Values are percentages and come out as fractions.

use clap::ValueEnum;
use reqwest::Client;
use serde_json::{Map, Value};

use crate::common::get_json;
use crate::constants::{MICHIGAN_STATE_ABBR, PLACES_PAGE_SIZE};
use crate::error::{Api, QueryError};
use crate::fetch::{Page, fetch_all};
use crate::measures::{FormatKind::Percent, Measure, MeasureGroup};
use crate::pivot::{LongLayout, pivot};
use crate::row::{CountyRow, record_from_json};

const LAYOUT: LongLayout = LongLayout {
    county: "locationname",
    measure: "measureid",
    value: "data_value",
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum Prevalence {
    #[default]
    #[value(name = "age_adjusted")]
    AgeAdjusted,
    #[value(name = "crude")]
    Crude,
}

impl Prevalence {
    pub fn data_value_type(self) -> &'static str {
        match self {
            Prevalence::AgeAdjusted => "AgeAdjPrv",
            Prevalence::Crude => "CrdPrv",
        }
    }
}

#[derive(Debug, Clone)]
pub struct PlacesClient {
    http: Client,
    base_url: String,
    page_size: usize,
}

impl PlacesClient {
    pub fn new(http: Client, base_url: impl Into<String>) -> Self {
        Self {
            http,
            base_url: base_url.into(),
            page_size: PLACES_PAGE_SIZE,
        }
    }

    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size.max(1);
        self
    }

    /// One row per county with a fraction cell per requested measure found.
    pub async fn fetch(
        &self,
        measures: &[Measure],
        year: u16,
        prevalence: Prevalence,
    ) -> Result<Vec<CountyRow>, QueryError> {
        let filter = where_clause(measures, year, prevalence);
        let filter = filter.as_str();
        let records = fetch_all(self.page_size, move |offset, limit| self.fetch_page(filter, offset, limit)).await?;
        tracing::info!("Fetched {} PLACES records", records.len());
        Ok(pivot(&records, LAYOUT))
    }

    async fn fetch_page(&self, filter: &str, offset: usize, limit: usize) -> Result<Page, QueryError> {
        tracing::debug!("GET {} offset={} limit={}", self.base_url, offset, limit);
        let select = format!("{},{},{}", LAYOUT.county, LAYOUT.measure, LAYOUT.value);
        let limit_param = limit.to_string();
        let offset_param = offset.to_string();
        let request = self.http.get(&self.base_url).query(&[
            ("$where", filter),
            ("$select", select.as_str()),
            ("$limit", limit_param.as_str()),
            ("$offset", offset_param.as_str()),
        ]);
        let objects: Vec<Map<String, Value>> = get_json(Api::Places, request, false).await?;
        Ok(Page::sized(objects.iter().map(record_from_json).collect()))
    }
}

/// SoQL filter: Michigan counties (the state-level row excluded) for one
/// year, one prevalence type and the requested measure ids.
pub fn where_clause(measures: &[Measure], year: u16, prevalence: Prevalence) -> String {
    let ids = measures
        .iter()
        .map(|m| format!("'{}'", m.id))
        .collect::<Vec<_>>()
        .join(",");
    format!(
        "stateabbr='{st}' AND year='{year}' AND datavaluetypeid='{kind}' AND locationname != '{st}' AND measureid in({ids})",
        st = MICHIGAN_STATE_ABBR,
        kind = prevalence.data_value_type(),
    )
}

pub static PLACES_MEASURES: &[MeasureGroup] = &[
    MeasureGroup {
        name: "chronic_disease",
        measures: &[
            Measure::new("DIABETES", "Diabetes", "Diagnosed diabetes among adults", Percent),
            Measure::new("COPD", "COPD", "Chronic obstructive pulmonary disease among adults", Percent),
            Measure::new("CHD", "Coronary Heart Disease", "Coronary heart disease among adults", Percent),
            Measure::new("OBESITY", "Obesity", "Obesity among adults", Percent),
            Measure::new("CSMOKING", "Smoking", "Current smoking among adults", Percent),
            Measure::new("CASTHMA", "Current Asthma", "Current asthma among adults", Percent),
            Measure::new("STROKE", "Stroke", "Stroke among adults", Percent),
            Measure::new("BPHIGH", "High Blood Pressure", "High blood pressure among adults", Percent),
            Measure::new("HIGHCHOL", "High Cholesterol", "High cholesterol among adults", Percent),
            Measure::new("DEPRESSION", "Depression", "Depression among adults", Percent),
            Measure::new("ARTHRITIS", "Arthritis", "Arthritis among adults", Percent),
            Measure::new("CANCER", "Cancer (excl skin)", "Cancer (non-skin) among adults", Percent),
        ],
    },
    MeasureGroup {
        name: "health_behaviors",
        measures: &[
            Measure::new("BINGE", "Binge Drinking", "Binge drinking among adults", Percent),
            Measure::new("LPA", "Physical Inactivity", "No leisure-time physical activity among adults", Percent),
            Measure::new("SLEEP", "Short Sleep", "Sleeping less than 7 hours among adults", Percent),
        ],
    },
    MeasureGroup {
        name: "prevention",
        measures: &[
            Measure::new("CHECKUP", "Annual Checkup", "Visits to doctor for routine checkup", Percent),
            Measure::new("DENTAL", "Dental Visit", "Visits to dentist or dental clinic", Percent),
            Measure::new("CHOLSCREEN", "Cholesterol Screening", "Cholesterol screening among adults", Percent),
            Measure::new("MAMMOUSE", "Mammography", "Mammography use among women 50-74", Percent),
            Measure::new("COLON_SCREEN", "Colorectal Screening", "Colorectal cancer screening among adults 45-75", Percent),
        ],
    },
    MeasureGroup {
        name: "disability",
        measures: &[
            Measure::new("DISABILITY", "Any Disability", "Any disability among adults", Percent),
            Measure::new("HEARING", "Hearing Disability", "Hearing disability among adults", Percent),
            Measure::new("VISION", "Vision Disability", "Vision disability among adults", Percent),
            Measure::new("COGNITION", "Cognitive Disability", "Cognitive disability among adults", Percent),
            Measure::new("MOBILITY", "Mobility Disability", "Mobility disability among adults", Percent),
        ],
    },
    MeasureGroup {
        name: "sdoh",
        measures: &[
            Measure::new("FOODINSECU", "Food Insecurity", "Food insecurity among adults", Percent),
            Measure::new("HOUSINSECU", "Housing Insecurity", "Housing insecurity among adults", Percent),
            Measure::new("LACKTRPT", "Transportation Barriers", "Lack of transportation among adults", Percent),
        ],
    },
    MeasureGroup {
        name: "mental_health",
        measures: &[
            Measure::new("MHLTH", "Frequent Mental Distress", "Frequent mental distress among adults", Percent),
            Measure::new("EMOTIONSPT", "Lack of Emotional Support", "Lack of social and emotional support among adults", Percent),
            Measure::new("LONELINESS", "Loneliness", "Loneliness among adults", Percent),
        ],
    },
];

#[cfg(test)]
mod tests {
    use super::*;
    use crate::measures::resolve;
    use std::collections::HashSet;

    #[test]
    fn where_clause_quotes_measure_ids() {
        let measures = resolve(PLACES_MEASURES, &["sdoh"], "PLACES group").unwrap();
        let clause = where_clause(&measures, 2023, Prevalence::Crude);
        assert_eq!(
            clause,
            "stateabbr='MI' AND year='2023' AND datavaluetypeid='CrdPrv' AND locationname != 'MI' \
             AND measureid in('FOODINSECU','HOUSINSECU','LACKTRPT')"
        );
    }

    #[test]
    fn measure_ids_are_unique() {
        let all = resolve(PLACES_MEASURES, &["all"], "PLACES group").unwrap();
        let ids: HashSet<_> = all.iter().map(|m| &*m.id).collect();
        assert_eq!(ids.len(), all.len());
        assert_eq!(all.len(), 31);
    }

    #[test]
    fn every_group_is_a_subset_of_all() {
        let all: HashSet<_> = resolve(PLACES_MEASURES, &["all"], "PLACES group")
            .unwrap()
            .into_iter()
            .map(|m| m.id)
            .collect();
        for group in PLACES_MEASURES {
            for m in resolve(PLACES_MEASURES, &[group.name], "PLACES group").unwrap() {
                assert!(all.contains(&m.id));
            }
        }
    }

    #[test]
    fn prevalence_type_codes() {
        assert_eq!(Prevalence::default().data_value_type(), "AgeAdjPrv");
        assert_eq!(Prevalence::Crude.data_value_type(), "CrdPrv");
    }
}
