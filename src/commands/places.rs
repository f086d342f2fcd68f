use anyhow::{Context, Result, bail};

use crate::cli::PlacesArgs;
use crate::commands::Session;
use crate::measures::resolve;
use crate::output::{Outcome, Sink};
use crate::sources::places::PLACES_MEASURES;

pub async fn run(session: &Session, args: PlacesArgs) -> Result<Outcome> {
    if args.groups.is_empty() {
        bail!("Provide PLACES group names or 'all'. Run 'places-topics' to see available groups.");
    }
    let measures = resolve(PLACES_MEASURES, &args.groups, "PLACES group")?;

    tracing::info!(
        "Querying {} PLACES measures for {} ({})",
        measures.len(),
        args.year,
        args.prevalence.data_value_type()
    );
    let rows = session
        .places
        .fetch(&measures, args.year, args.prevalence)
        .await
        .context("Failed fetching CDC PLACES data")?;

    Sink::from_arg(args.table.output.clone()).table(rows, &measures, &args.table.options(false))
}
