use std::future::Future;
use std::time::Duration;

use lexio_types::{AppError, EnrichmentUpdate, Meaning, Scope};
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

use crate::client::EnrichmentClient;

/// Handle to an independently running enrichment job.
///
/// The job resolves to the updates it gathered, or to the `AppError` that
/// stopped it. Failure here is never fatal to the lookup that spawned it;
/// the base entry stays usable.
#[derive(Debug)]
pub struct EnrichmentJob {
    inner: JobInner,
}

#[derive(Debug)]
enum JobInner {
    Running {
        handle: JoinHandle<Result<Vec<EnrichmentUpdate>, AppError>>,
        cancel: CancellationToken,
    },
    /// Resolved before anything was spawned, e.g. the feature gate is closed.
    Failed(AppError),
}

impl EnrichmentJob {
    pub fn failed(error: AppError) -> Self {
        Self {
            inner: JobInner::Failed(error),
        }
    }

    /// Abort in-flight network calls and suppress any further updates.
    /// Safe to call more than once.
    pub fn cancel(&self) {
        if let JobInner::Running { cancel, .. } = &self.inner {
            cancel.cancel();
        }
    }

    /// Wait for the job to resolve.
    pub async fn updates(self) -> Result<Vec<EnrichmentUpdate>, AppError> {
        match self.inner {
            JobInner::Failed(error) => Err(error),
            JobInner::Running { handle, .. } => match handle.await {
                Ok(result) => result,
                Err(join_error) => Err(AppError::classify(
                    Scope::Examples,
                    anyhow::Error::new(join_error),
                )),
            },
        }
    }
}

/// Launch the enrichment job for an already-fetched entry and return its
/// handle immediately.
///
/// With no client configured this fails synchronously, without spawning:
/// that is a configuration gate, not a transient fault.
pub fn dispatch(
    client: Option<EnrichmentClient>,
    word: String,
    meanings: Vec<Meaning>,
    job_timeout: Duration,
    parent: &CancellationToken,
) -> EnrichmentJob {
    let Some(client) = client else {
        return EnrichmentJob::failed(AppError::feature_disabled(Scope::Examples));
    };

    spawn_job(
        async move { client.fetch_examples(&word, &meanings).await },
        job_timeout,
        parent.child_token(),
    )
}

/// Run `work` under the job's own timeout and cancellation token. The
/// timeout is distinct from the client's per-request one and bounds the
/// whole job.
fn spawn_job<F>(work: F, job_timeout: Duration, cancel: CancellationToken) -> EnrichmentJob
where
    F: Future<Output = Result<Vec<EnrichmentUpdate>, AppError>> + Send + 'static,
{
    let guard = cancel.clone();
    let handle = tokio::spawn(async move {
        tokio::select! {
            _ = guard.cancelled() => {
                tracing::debug!("enrichment job cancelled");
                Err(AppError::classify(
                    Scope::Examples,
                    anyhow::anyhow!("enrichment job cancelled"),
                ))
            }
            result = tokio::time::timeout(job_timeout, work) => match result {
                Ok(outcome) => outcome,
                Err(_) => Err(AppError::timeout(Scope::Examples)),
            }
        }
    });

    EnrichmentJob {
        inner: JobInner::Running { handle, cancel },
    }
}
