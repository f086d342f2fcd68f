use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::constants::{
    DEFAULT_ACS_YEAR, DEFAULT_CENSUS_BASE_URL, DEFAULT_CMS_BASE_URL, DEFAULT_HRSA_BASE_URL,
    DEFAULT_PLACES_BASE_URL, DEFAULT_PLACES_YEAR, DEFAULT_TIMEOUT_SECS,
};
use crate::sources::places::Prevalence;

#[derive(Parser, Debug)]
#[command(name = "acs_cli")]
#[command(about = "Michigan county data from Census ACS, CDC PLACES, CMS and HRSA as CSV", long_about = None)]
pub struct Args {
    #[command(flatten)]
    pub global: GlobalArgs,

    #[command(subcommand)]
    pub cmd: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Save your Census API key (from --api-key, or prompted for).
    Login,
    /// Query ACS 5-year data for Michigan counties.
    Query(QueryArgs),
    /// List available ACS topics and their variables.
    Topics,
    /// Full profile for the counties matching a name, enriched with PLACES and access data.
    Info(InfoArgs),
    /// Query CDC PLACES health measures for Michigan counties.
    Places(PlacesArgs),
    /// List PLACES measure groups and their measures.
    PlacesTopics,
    /// Query hospital access (CMS) and shortage area (HRSA) data for Michigan counties.
    Access(AccessArgs),
    /// List access and shortage measure groups.
    AccessTopics,
}

#[derive(clap::Args, Debug, Clone)]
pub struct GlobalArgs {
    /// Census API key (overrides CENSUS_API_KEY and the saved key).
    #[arg(long, global = true)]
    pub api_key: Option<String>,

    /// Location of the saved API key (default: ~/.config/acs-cli/config).
    #[arg(long, global = true)]
    pub config_path: Option<PathBuf>,

    /// Per-request timeout in seconds.
    #[arg(long, global = true, default_value_t = DEFAULT_TIMEOUT_SECS)]
    pub timeout_secs: u64,

    /// Census data API root.
    #[arg(long, global = true, default_value = DEFAULT_CENSUS_BASE_URL)]
    pub census_base_url: String,

    /// CDC PLACES county dataset endpoint.
    #[arg(long, global = true, default_value = DEFAULT_PLACES_BASE_URL)]
    pub places_base_url: String,

    /// CMS hospital directory datastore query endpoint.
    #[arg(long, global = true, default_value = DEFAULT_CMS_BASE_URL)]
    pub cms_base_url: String,

    /// HRSA shortage area MapServer root.
    #[arg(long, global = true, default_value = DEFAULT_HRSA_BASE_URL)]
    pub hrsa_base_url: String,
}

/// Filtering, sorting and destination shared by every table command.
#[derive(clap::Args, Debug, Clone, Default)]
pub struct TableArgs {
    /// Keep counties whose name contains this text (case-insensitive).
    #[arg(short = 'c', long)]
    pub county: Option<String>,

    /// Sort descending by this column label (or raw field id).
    #[arg(short = 's', long)]
    pub sort: Option<String>,

    /// Write CSV to this file instead of stdout.
    #[arg(short = 'o', long)]
    pub output: Option<PathBuf>,

    /// Omit the header row.
    #[arg(long)]
    pub no_header: bool,
}

#[derive(clap::Args, Debug, Clone)]
pub struct QueryArgs {
    /// Topic names (e.g. population income) or 'all'.
    pub topics: Vec<String>,

    /// Raw Census variable codes; bypasses topics.
    #[arg(short = 'v', long = "variable")]
    pub variables: Vec<String>,

    /// ACS vintage year.
    #[arg(short = 'y', long, default_value_t = DEFAULT_ACS_YEAR)]
    pub year: u16,

    /// Comma-separated years, e.g. 2019,2020,2023 (overrides --year).
    #[arg(long, value_delimiter = ',', value_parser = parse_year)]
    pub years: Vec<u16>,

    #[command(flatten)]
    pub table: TableArgs,
}

#[derive(clap::Args, Debug, Clone)]
pub struct InfoArgs {
    /// County name (or substring) to profile.
    pub county: String,

    /// ACS vintage year.
    #[arg(short = 'y', long, default_value_t = DEFAULT_ACS_YEAR)]
    pub year: u16,

    /// Write CSV to this file instead of stdout.
    #[arg(short = 'o', long)]
    pub output: Option<PathBuf>,
}

#[derive(clap::Args, Debug, Clone)]
pub struct PlacesArgs {
    /// PLACES measure groups (e.g. chronic_disease) or 'all'.
    pub groups: Vec<String>,

    /// PLACES release year.
    #[arg(short = 'y', long, default_value_t = DEFAULT_PLACES_YEAR)]
    pub year: u16,

    /// Prevalence type.
    #[arg(short = 'p', long, value_enum, default_value_t = Prevalence::AgeAdjusted)]
    pub prevalence: Prevalence,

    #[command(flatten)]
    pub table: TableArgs,
}

#[derive(clap::Args, Debug, Clone)]
pub struct AccessArgs {
    /// Access groups (e.g. hospital_access primary_care_shortage) or 'all'.
    pub groups: Vec<String>,

    #[command(flatten)]
    pub table: TableArgs,
}

/// Year list entries may carry spaces around the commas ("2019, 2023").
fn parse_year(raw: &str) -> Result<u16, String> {
    let trimmed = raw.trim();
    trimmed
        .parse()
        .map_err(|_| format!("'{trimmed}' is not a valid year"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Args::command().debug_assert();
    }

    #[test]
    fn query_parses_years_and_shared_options() {
        let args = Args::parse_from([
            "acs_cli", "query", "population", "--years", "2019,2023", "-c", "wash", "-s", "Total Population",
        ]);
        let Command::Query(q) = args.cmd else {
            panic!("expected query");
        };
        assert_eq!(q.topics, ["population"]);
        assert_eq!(q.years, [2019, 2023]);
        assert_eq!(q.table.county.as_deref(), Some("wash"));
        assert_eq!(q.table.sort.as_deref(), Some("Total Population"));
        assert_eq!(args.global.timeout_secs, DEFAULT_TIMEOUT_SECS);
    }

    #[test]
    fn years_tolerate_spaces_after_commas() {
        let args = Args::parse_from(["acs_cli", "query", "-v", "B01003_001E", "--years", "2019, 2023"]);
        let Command::Query(q) = args.cmd else {
            panic!("expected query");
        };
        assert_eq!(q.years, [2019, 2023]);
        assert!(Args::try_parse_from(["acs_cli", "query", "--years", "2019,soon"]).is_err());
    }

    #[test]
    fn places_prevalence_uses_snake_case_names() {
        let args = Args::parse_from(["acs_cli", "places", "all", "-p", "crude"]);
        let Command::Places(p) = args.cmd else {
            panic!("expected places");
        };
        assert_eq!(p.prevalence, Prevalence::Crude);
        assert_eq!(p.year, DEFAULT_PLACES_YEAR);
    }

    #[test]
    fn global_options_follow_the_subcommand() {
        let args = Args::parse_from(["acs_cli", "topics", "--census-base-url", "http://localhost:1"]);
        assert_eq!(args.global.census_base_url, "http://localhost:1");
    }
}
