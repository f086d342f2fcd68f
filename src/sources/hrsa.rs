//! HRSA Health Professional Shortage Area designations (ArcGIS MapServer).
//!
//! Each discipline lives in its own layer. Designations are keyed by county
//! FIPS code and folded into count, score and underserved-population columns
//! prefixed by the layer (`pc_`, `mh_`).

use reqwest::Client;
use serde::Deserialize;
use serde_json::{Map, Value};
use std::collections::HashSet;

use crate::aggregate::{Aggregator, Column, CountyKey, Reducer};
use crate::common::get_json;
use crate::constants::{HRSA_PAGE_SIZE, MICHIGAN_STATE_NAME};
use crate::error::{Api, QueryError};
use crate::fetch::{Page, fetch_all};
use crate::measures::{FormatKind::*, Measure, MeasureGroup};
use crate::merge::merge_sources;
use crate::row::{CountyRow, RawRecord, record_from_json};

const OUT_FIELDS: &str = "CMN_STATE_COUNTY_FIPS_CD,HPSA_SCORE,HPSA_STATUS_DESC,\
                          HPSA_DEGREE_OF_SHORTAGE,HPSA_FORMAL_RATIO,HPSA_ESTIMATED_UNDERSERVED_POP";

#[derive(Debug, Clone, Copy)]
pub struct HpsaLayer {
    pub group: &'static str,
    /// Query path under the MapServer root.
    pub path: &'static str,
    pub prefix: &'static str,
}

pub static HPSA_LAYERS: &[HpsaLayer] = &[
    HpsaLayer {
        group: "primary_care_shortage",
        path: "/9/query",
        prefix: "pc",
    },
    HpsaLayer {
        group: "mental_health_shortage",
        path: "/5/query",
        prefix: "mh",
    },
];

pub static HPSA_MEASURES: &[MeasureGroup] = &[
    MeasureGroup {
        name: "primary_care_shortage",
        measures: &[
            Measure::new("pc_hpsa_count", "Primary Care HPSA Count", "Number of primary care HPSA designations", Number),
            Measure::new("pc_hpsa_max_score", "Primary Care Max HPSA Score", "Maximum HPSA score (higher = greater shortage)", Decimal),
            Measure::new("pc_hpsa_avg_score", "Primary Care Avg HPSA Score", "Average HPSA score across designations", Decimal),
            Measure::new("pc_underserved_pop", "Primary Care Underserved Pop", "Estimated underserved population", Number),
        ],
    },
    MeasureGroup {
        name: "mental_health_shortage",
        measures: &[
            Measure::new("mh_hpsa_count", "Mental Health HPSA Count", "Number of mental health HPSA designations", Number),
            Measure::new("mh_hpsa_max_score", "Mental Health Max HPSA Score", "Maximum HPSA score (higher = greater shortage)", Decimal),
            Measure::new("mh_hpsa_avg_score", "Mental Health Avg HPSA Score", "Average HPSA score across designations", Decimal),
            Measure::new("mh_underserved_pop", "Mental Health Underserved Pop", "Estimated underserved population", Number),
        ],
    },
];

pub fn hpsa_aggregator(prefix: &str) -> Aggregator {
    Aggregator::new(
        CountyKey::Fips("CMN_STATE_COUNTY_FIPS_CD"),
        vec![
            Column::new(format!("{prefix}_hpsa_count"), Reducer::Count),
            Column::new(format!("{prefix}_hpsa_max_score"), Reducer::Max("HPSA_SCORE")),
            Column::new(format!("{prefix}_hpsa_avg_score"), Reducer::Mean("HPSA_SCORE")),
            Column::new(
                format!("{prefix}_underserved_pop"),
                Reducer::Sum("HPSA_ESTIMATED_UNDERSERVED_POP"),
            ),
        ],
    )
}

#[derive(Debug, Deserialize)]
struct FeaturePage {
    #[serde(default)]
    features: Vec<Feature>,
    #[serde(default, rename = "exceededTransferLimit")]
    exceeded_transfer_limit: bool,
    /// ArcGIS reports query failures in the body with a 200 status.
    #[serde(default)]
    error: Option<ServiceError>,
}

#[derive(Debug, Deserialize)]
struct Feature {
    #[serde(default)]
    attributes: Map<String, Value>,
}

#[derive(Debug, Deserialize)]
struct ServiceError {
    #[serde(default)]
    code: u16,
    #[serde(default)]
    message: String,
}

#[derive(Debug, Clone)]
pub struct HrsaClient {
    http: Client,
    base_url: String,
    page_size: usize,
}

impl HrsaClient {
    pub fn new(http: Client, base_url: impl Into<String>) -> Self {
        Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            page_size: HRSA_PAGE_SIZE,
        }
    }

    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size.max(1);
        self
    }

    /// Shortage rows for the requested measures. Only layers owning at least
    /// one requested measure are queried; their rows are merged by county.
    pub async fn fetch(&self, measures: &[Measure]) -> Result<Vec<CountyRow>, QueryError> {
        let wanted: HashSet<&str> = measures.iter().map(|m| &*m.id).collect();
        let mut per_layer = Vec::new();
        for layer in layers_for(&wanted) {
            let features = self.fetch_layer(layer).await?;
            tracing::info!("Fetched {} {} designations", features.len(), layer.group);
            per_layer.push(hpsa_aggregator(layer.prefix).aggregate(&features));
        }
        Ok(merge_sources(per_layer))
    }

    pub async fn fetch_layer(&self, layer: &HpsaLayer) -> Result<Vec<RawRecord>, QueryError> {
        let url = format!("{}{}", self.base_url, layer.path);
        let url = url.as_str();
        fetch_all(self.page_size, move |offset, limit| self.fetch_page(url, offset, limit)).await
    }

    async fn fetch_page(&self, url: &str, offset: usize, limit: usize) -> Result<Page, QueryError> {
        tracing::debug!("GET {} offset={} limit={}", url, offset, limit);
        let filter = format!("PRIMARY_STATE_NM='{MICHIGAN_STATE_NAME}'");
        let offset_param = offset.to_string();
        let limit_param = limit.to_string();
        let request = self.http.get(url).query(&[
            ("where", filter.as_str()),
            ("outFields", OUT_FIELDS),
            ("returnGeometry", "false"),
            ("f", "json"),
            ("resultOffset", offset_param.as_str()),
            ("resultRecordCount", limit_param.as_str()),
        ]);
        let page: FeaturePage = get_json(Api::Hrsa, request, false).await?;
        if let Some(error) = page.error {
            return Err(QueryError::Upstream {
                api: Api::Hrsa,
                status: error.code,
                body: error.message,
            });
        }
        let records = page.features.iter().map(|f| record_from_json(&f.attributes)).collect();
        Ok(Page::flagged(records, page.exceeded_transfer_limit))
    }
}

/// Layers whose measure group intersects `wanted`, in table order.
pub fn layers_for(wanted: &HashSet<&str>) -> Vec<&'static HpsaLayer> {
    HPSA_LAYERS
        .iter()
        .filter(|layer| {
            HPSA_MEASURES
                .iter()
                .filter(|g| g.name == layer.group)
                .flat_map(|g| g.measures)
                .any(|m| wanted.contains(&*m.id))
        })
        .collect()
}
