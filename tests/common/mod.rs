#![allow(dead_code)]

use acs_cli::cli::{Args, Command};
use acs_cli::commands::{self, Session};
use acs_cli::output::Outcome;
use clap::Parser;
use httpmock::MockServer;
use serde_json::{Value, json};
use std::path::Path;

pub const TEST_KEY: &str = "test-key";
pub const PLACES_PATH: &str = "/resource/places.json";
pub const CMS_PATH: &str = "/cms/query";
pub const HRSA_ROOT: &str = "/hrsa/MapServer";

/// CLI arguments pointing every upstream at `server`.
pub fn parse(server: &MockServer, args: &[&str]) -> Args {
    let census = server.base_url();
    let places = server.url(PLACES_PATH);
    let cms = server.url(CMS_PATH);
    let hrsa = server.url(HRSA_ROOT);
    let mut argv = vec!["acs_cli"];
    argv.extend_from_slice(args);
    argv.extend_from_slice(&[
        "--api-key",
        TEST_KEY,
        "--timeout-secs",
        "5",
        "--census-base-url",
        census.as_str(),
        "--places-base-url",
        places.as_str(),
        "--cms-base-url",
        cms.as_str(),
        "--hrsa-base-url",
        hrsa.as_str(),
    ]);
    Args::parse_from(argv)
}

pub fn session(args: &Args) -> Session {
    Session::from_args(&args.global).expect("session")
}

/// Runs a table or profile command the way `main` dispatches it.
pub async fn dispatch(session: &Session, cmd: Command) -> anyhow::Result<Outcome> {
    match cmd {
        Command::Query(cmd) => commands::query::run(session, cmd).await,
        Command::Places(cmd) => commands::places::run(session, cmd).await,
        Command::Access(cmd) => commands::access::run(session, cmd).await,
        Command::Info(cmd) => commands::info::run(session, cmd).await,
        other => panic!("not a data command: {other:?}"),
    }
}

pub async fn run(server: &MockServer, args: &[&str]) -> anyhow::Result<Outcome> {
    let args = parse(server, args);
    let session = session(&args);
    dispatch(&session, args.cmd).await
}

pub fn read_lines(path: &Path) -> Vec<String> {
    std::fs::read_to_string(path)
        .expect("output file")
        .lines()
        .map(str::to_string)
        .collect()
}

/// Census-style JSON table: header row then data rows.
pub fn census_table(header: &[&str], rows: &[&[&str]]) -> Value {
    let mut table = vec![json!(header)];
    table.extend(rows.iter().map(|row| json!(row)));
    Value::Array(table)
}
