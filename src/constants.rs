pub const DEFAULT_CENSUS_BASE_URL: &str = "https://api.census.gov/data";
pub const DEFAULT_PLACES_BASE_URL: &str = "https://data.cdc.gov/resource/swc5-untb.json";
pub const DEFAULT_CMS_BASE_URL: &str =
    "https://data.cms.gov/provider-data/api/1/datastore/query/xubh-q36u/0";
pub const DEFAULT_HRSA_BASE_URL: &str = "https://gisportal.hrsa.gov/server/rest/services/Shortage/HealthProfessionalShortageAreas_FS/MapServer";

pub const CENSUS_KEY_SIGNUP_URL: &str = "https://api.census.gov/data/key_signup.html";
pub const CENSUS_API_KEY_ENV: &str = "CENSUS_API_KEY";

pub const MICHIGAN_FIPS: &str = "26";
pub const MICHIGAN_STATE_ABBR: &str = "MI";
pub const MICHIGAN_STATE_NAME: &str = "Michigan";

pub const DEFAULT_ACS_YEAR: u16 = 2024;
pub const DEFAULT_PLACES_YEAR: u16 = 2023;

/// Census allows 50 fields per call and NAME always takes one of them.
pub const CENSUS_MAX_VARS_PER_CALL: usize = 49;
pub const PLACES_PAGE_SIZE: usize = 10_000;
pub const CMS_PAGE_SIZE: usize = 500;
pub const HRSA_PAGE_SIZE: usize = 1_000;

pub const DEFAULT_TIMEOUT_SECS: u64 = 30;
pub const USER_AGENT: &str = "acs-cli/0.1";
