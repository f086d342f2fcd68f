use anyhow::{Context, Result, bail};

use crate::cli::QueryArgs;
use crate::commands::Session;
use crate::measures::{Measure, resolve};
use crate::output::{Outcome, Sink};
use crate::topics::TOPICS;

/// Raw `--variable` codes win over topics and render as plain numbers.
pub fn resolve_variables(topics: &[String], variables: &[String]) -> Result<Vec<Measure>> {
    if !variables.is_empty() {
        return Ok(variables.iter().map(|code| Measure::raw(code)).collect());
    }
    if topics.is_empty() {
        bail!("Provide topic names or use --variable / -v. Run 'topics' to see available topics.");
    }
    Ok(resolve(TOPICS, topics, "topic")?)
}

pub async fn run(session: &Session, args: QueryArgs) -> Result<Outcome> {
    let measures = resolve_variables(&args.topics, &args.variables)?;
    let key = session.credentials.resolve()?;

    let multi_year = !args.years.is_empty();
    let rows = if multi_year {
        tracing::info!("Querying {} variables for years {:?}", measures.len(), args.years);
        session
            .census
            .fetch_years(&measures, &args.years, &key)
            .await
            .context("Failed fetching Census data")?
    } else {
        tracing::info!("Querying {} variables for {}", measures.len(), args.year);
        session
            .census
            .fetch_year(&measures, args.year, &key)
            .await
            .context("Failed fetching Census data")?
    };

    Sink::from_arg(args.table.output.clone()).table(rows, &measures, &args.table.options(multi_year))
}
