use std::sync::Arc;
use std::time::Duration;

use lexio_dictionary::Dictionary;
use lexio_enrich::{EnrichmentClient, EnrichmentJob, dispatch};
use lexio_types::{AppError, WordEntry};
use tokio_util::sync::CancellationToken;
use uuid::Uuid;

use crate::merge;
use crate::validate::normalize_term;

/// Base entry plus the handle to its still-running enrichment job.
///
/// `lookup_id` identifies this lookup; when a newer search supersedes an
/// older one, callers discard the old outcome by id, not by arrival order.
#[derive(Debug)]
pub struct LookupOutcome {
    pub lookup_id: Uuid,
    pub entry: WordEntry,
    pub job: EnrichmentJob,
}

/// Orchestrates one lookup: validate, fetch the base entry, dispatch
/// enrichment, return immediately.
pub struct LookupService {
    dictionary: Arc<dyn Dictionary>,
    enrichment: Option<EnrichmentClient>,
    job_timeout: Duration,
}

impl LookupService {
    pub fn new(
        dictionary: Arc<dyn Dictionary>,
        enrichment: Option<EnrichmentClient>,
        job_timeout: Duration,
    ) -> Self {
        Self {
            dictionary,
            enrichment,
            job_timeout,
        }
    }

    /// Look up `raw_term`. The base entry is awaited; the enrichment job is
    /// only dispatched, never awaited here, so the entry is always in hand
    /// before the job can resolve. A fetch failure is fatal; a job failure
    /// is not.
    pub async fn lookup(
        &self,
        raw_term: &str,
        cancel: &CancellationToken,
    ) -> Result<LookupOutcome, AppError> {
        let term = normalize_term(raw_term)?;

        let entry = self.dictionary.fetch(&term).await?;
        tracing::debug!(word = %entry.word, "base entry fetched");

        let entry = if self.enrichment.is_some() {
            merge::mark_examples_pending(entry)
        } else {
            entry
        };

        let job = dispatch(
            self.enrichment.clone(),
            entry.word.clone(),
            entry.meanings.clone(),
            self.job_timeout,
            cancel,
        );

        Ok(LookupOutcome {
            lookup_id: Uuid::new_v4(),
            entry,
            job,
        })
    }
}

/// Await the enrichment job and fold its updates into the entry.
///
/// A failed job degrades gracefully: the merge runs with an empty batch, so
/// every pending flag clears and the base entry stays usable.
pub async fn resolve(entry: &WordEntry, job: EnrichmentJob) -> WordEntry {
    let updates = match job.updates().await {
        Ok(updates) => updates,
        Err(error) => {
            tracing::warn!(code = ?error.code, "enrichment failed: {error}");
            Vec::new()
        }
    };

    merge::merge(entry, &updates)
}
