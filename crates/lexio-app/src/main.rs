use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use lexio_config::Config;
use lexio_core::LookupService;
use lexio_dictionary::HttpDictionary;
use lexio_enrich::{EnrichmentClient, HealthMonitor, HealthProbe};
use lexio_store::{SqliteStore, TxError};
use tokio::signal;
use tokio_util::sync::CancellationToken;

mod history;
mod telemetry;

#[cfg(test)]
mod tests;

#[derive(Parser)]
#[command(
    name = "lexio",
    about = "Dictionary lookup with AI-generated example sentences"
)]
struct Cli {
    /// Term to look up
    term: String,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    telemetry::init_telemetry();

    let cli = Cli::parse();
    let config = Config::from_env();

    let dictionary = Arc::new(HttpDictionary::new(&config.dictionary)?);
    let enrichment = EnrichmentClient::from_config(&config.enrichment)?;
    if enrichment.is_none() {
        tracing::info!("AI examples disabled; lookups return base entries only");
    }

    let monitor = HealthMonitor::new(
        enrichment
            .clone()
            .map(|client| Arc::new(client) as Arc<dyn HealthProbe>),
        Duration::from_millis(config.enrichment.probe_timeout_ms),
    );

    let cancel = CancellationToken::new();
    // The poll loop's first tick fires immediately, so no initial refresh
    // is needed on top of it.
    let monitor_task = tokio::spawn(monitor.clone().run(
        Duration::from_millis(config.enrichment.health_interval_ms),
        cancel.child_token(),
    ));

    let service = LookupService::new(
        dictionary,
        enrichment,
        Duration::from_millis(config.enrichment.job_timeout_ms),
    );

    let outcome = match service.lookup(&cli.term, &cancel).await {
        Ok(outcome) => outcome,
        Err(error) => {
            tracing::debug!(code = ?error.code, cause = ?error.cause, "lookup failed");
            cancel.cancel();
            // `message` is the user-facing half; codes stay in the logs.
            anyhow::bail!("{error}");
        }
    };

    tracing::info!(lookup_id = %outcome.lookup_id, word = %outcome.entry.word, "base entry ready");
    println!("{}", serde_json::to_string_pretty(&outcome.entry)?);

    // Resolve enrichment off the main task and hand the result back over a
    // channel, so ctrl-c can cancel the job instead of waiting it out.
    let (tx, rx) = kanal::bounded_async(1);
    let base = outcome.entry.clone();
    let job = outcome.job;
    tokio::spawn(async move {
        let enriched = lexio_core::resolve(&base, job).await;
        let _ = tx.send(enriched).await;
    });

    tokio::select! {
        enriched = rx.recv() => match enriched {
            Ok(entry) => println!("{}", serde_json::to_string_pretty(&entry)?),
            Err(e) => tracing::error!("resolver channel closed: {e}"),
        },
        _ = signal::ctrl_c() => {
            tracing::info!("shutdown requested");
            cancel.cancel();
        }
    }

    persist_history(&config, &outcome.entry.word).await?;

    let status = monitor.status().await;
    tracing::info!(state = ?status.state, "enrichment backend health");

    cancel.cancel();
    monitor_task.abort();

    Ok(())
}

async fn persist_history(config: &Config, word: &str) -> anyhow::Result<()> {
    let mut store = SqliteStore::open(&config.storage.db_path)?;
    store.init_schema(history::SCHEMA)?;

    match history::record_lookup(&mut store, word).await {
        Ok(()) => Ok(()),
        Err(TxError::RollbackFailed { cause, rollback }) => {
            // Store state is unknown; this one needs an operator, not a retry.
            tracing::error!("history write failed and rollback failed: {cause}; {rollback}");
            Err(anyhow::anyhow!("lookup history store state is unknown"))
        }
        Err(other) => {
            tracing::warn!("history write failed: {other}");
            Ok(())
        }
    }
}
