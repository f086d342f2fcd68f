//! Command orchestration: resolve selectors, fetch, merge, write.

pub mod access;
pub mod catalog;
pub mod info;
pub mod login;
pub mod places;
pub mod query;

use anyhow::Result;
use std::path::PathBuf;
use std::time::Duration;

use crate::cli::{GlobalArgs, TableArgs};
use crate::common::build_http_client;
use crate::credentials::{CredentialChain, default_config_path};
use crate::output::TableOptions;
use crate::sources::census::CensusClient;
use crate::sources::cms::CmsClient;
use crate::sources::hrsa::HrsaClient;
use crate::sources::places::PlacesClient;

/// Everything a command needs to reach the outside world.
#[derive(Debug)]
pub struct Session {
    pub census: CensusClient,
    pub places: PlacesClient,
    pub cms: CmsClient,
    pub hrsa: HrsaClient,
    pub credentials: CredentialChain,
    /// Where `login` saves the key and the chain looks for it.
    pub config_path: Option<PathBuf>,
}

impl Session {
    pub fn from_args(global: &GlobalArgs) -> Result<Self> {
        let http = build_http_client(Duration::from_secs(global.timeout_secs))?;
        let config_path = global.config_path.clone().or_else(default_config_path);
        Ok(Self {
            census: CensusClient::new(http.clone(), &global.census_base_url),
            places: PlacesClient::new(http.clone(), &global.places_base_url),
            cms: CmsClient::new(http.clone(), &global.cms_base_url),
            hrsa: HrsaClient::new(http, &global.hrsa_base_url),
            credentials: CredentialChain::standard(global.api_key.clone(), config_path.clone()),
            config_path,
        })
    }
}

impl TableArgs {
    pub fn options(&self, show_year: bool) -> TableOptions {
        TableOptions {
            county_filter: self.county.clone(),
            sort_by: self.sort.clone(),
            show_year,
            header: !self.no_header,
        }
    }
}
