use anyhow::Context;
use clap::Parser;
use std::io;
use std::process::ExitCode;

use acs_cli::cli::{self, Command};
use acs_cli::commands::{self, Session};
use acs_cli::output::Outcome;

#[tokio::main]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();

    let args = cli::Args::parse();

    match run(args).await {
        Ok(code) => code,
        Err(err) => {
            eprintln!("Error: {err:#}");
            ExitCode::FAILURE
        }
    }
}

async fn run(args: cli::Args) -> anyhow::Result<ExitCode> {
    let session = Session::from_args(&args.global)?;

    match args.cmd {
        Command::Login => {
            commands::login::run(
                session.config_path.as_deref(),
                args.global.api_key.as_deref(),
                io::stdin().lock(),
            )
            .context("login failed")?;
        }
        Command::Query(cmd) => {
            commands::query::run(&session, cmd).await.context("query failed")?;
        }
        Command::Topics => {
            commands::catalog::topics(io::stdout().lock()).context("topics failed")?;
        }
        Command::Info(cmd) => {
            let outcome = commands::info::run(&session, cmd).await.context("info failed")?;
            if outcome == Outcome::NoMatchingRows {
                return Ok(ExitCode::FAILURE);
            }
        }
        Command::Places(cmd) => {
            commands::places::run(&session, cmd).await.context("places failed")?;
        }
        Command::PlacesTopics => {
            commands::catalog::places_topics(io::stdout().lock()).context("places-topics failed")?;
        }
        Command::Access(cmd) => {
            commands::access::run(&session, cmd).await.context("access failed")?;
        }
        Command::AccessTopics => {
            commands::catalog::access_topics(io::stdout().lock()).context("access-topics failed")?;
        }
    }
    Ok(ExitCode::SUCCESS)
}
