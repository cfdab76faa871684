use futures_util::future::BoxFuture;
use lexio_types::AppError;

use crate::{StoreError, TransactionalStore};

/// Unit-of-work outcome when the happy path didn't happen.
///
/// `Op` means the operation failed but the store was rolled back cleanly;
/// `RollbackFailed` means the store's state is unknown and an operator
/// should look at it. Neither side of a failed rollback is ever dropped.
#[derive(Debug, thiserror::Error)]
pub enum TxError {
    #[error("failed to begin transaction: {0}")]
    Begin(#[source] StoreError),

    #[error("failed to commit transaction: {0}")]
    Commit(#[source] StoreError),

    /// The operation failed; its writes were rolled back.
    #[error("{0}")]
    Op(AppError),

    /// The operation failed and so did the rollback. Store state is unknown.
    #[error("operation failed ({cause}) and rollback failed ({rollback}); store state is unknown")]
    RollbackFailed {
        cause: AppError,
        #[source]
        rollback: StoreError,
    },
}

/// Run `operation` inside a begin/commit/rollback envelope.
///
/// Either all of the operation's writes apply or none of them do. Nested
/// transactions are unsupported: the operation must not call back into
/// `run_in_transaction` for the same store (the `&mut` borrow makes that
/// unrepresentable in safe code).
pub async fn run_in_transaction<S, T, F>(store: &mut S, operation: F) -> Result<T, TxError>
where
    S: TransactionalStore,
    F: for<'a> FnOnce(&'a mut S) -> BoxFuture<'a, Result<T, AppError>>,
{
    store.begin().await.map_err(TxError::Begin)?;

    match operation(store).await {
        Ok(value) => {
            store.commit().await.map_err(TxError::Commit)?;
            Ok(value)
        }
        Err(cause) => match store.rollback().await {
            Ok(()) => Err(TxError::Op(cause)),
            Err(rollback) => Err(TxError::RollbackFailed { cause, rollback }),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use futures_util::FutureExt;

    /// In-memory fake recording the statements the wrapper issues.
    #[derive(Default)]
    struct MemStore {
        journal: Vec<String>,
        fail_rollback: bool,
    }

    #[async_trait]
    impl TransactionalStore for MemStore {
        async fn begin(&mut self) -> Result<(), StoreError> {
            self.journal.push("BEGIN".to_string());
            Ok(())
        }

        async fn commit(&mut self) -> Result<(), StoreError> {
            self.journal.push("COMMIT".to_string());
            Ok(())
        }

        async fn rollback(&mut self) -> Result<(), StoreError> {
            if self.fail_rollback {
                return Err(StoreError::Backend("rollback refused".to_string()));
            }
            self.journal.push("ROLLBACK".to_string());
            Ok(())
        }

        async fn execute(&mut self, sql: &str, _params: &[&str]) -> Result<usize, StoreError> {
            self.journal.push(sql.to_string());
            Ok(1)
        }
    }

    #[tokio::test]
    async fn success_commits_all_writes() {
        let mut store = MemStore::default();

        let result = run_in_transaction(&mut store, |store| {
            async move {
                store.execute("INSERT a", &[]).await.unwrap();
                store.execute("INSERT b", &[]).await.unwrap();
                Ok(42)
            }
            .boxed()
        })
        .await;

        assert_eq!(result.unwrap(), 42);
        assert_eq!(store.journal, ["BEGIN", "INSERT a", "INSERT b", "COMMIT"]);
    }

    #[tokio::test]
    async fn failure_with_clean_rollback_returns_original_error() {
        let mut store = MemStore::default();
        let original = AppError::validation("nope");

        let expected = original.clone();
        let result: Result<(), TxError> = run_in_transaction(&mut store, move |store| {
            async move {
                store.execute("INSERT a", &[]).await.unwrap();
                Err(original)
            }
            .boxed()
        })
        .await;

        match result.unwrap_err() {
            TxError::Op(cause) => assert_eq!(cause, expected),
            other => panic!("expected Op, got {other:?}"),
        }
        assert_eq!(store.journal, ["BEGIN", "INSERT a", "ROLLBACK"]);
    }

    #[tokio::test]
    async fn failed_rollback_surfaces_both_causes() {
        let mut store = MemStore {
            fail_rollback: true,
            ..MemStore::default()
        };
        let original = AppError::validation("nope");

        let expected = original.clone();
        let result: Result<(), TxError> =
            run_in_transaction(&mut store, move |_| async move { Err(original) }.boxed()).await;

        match result.unwrap_err() {
            TxError::RollbackFailed { cause, rollback } => {
                assert_eq!(cause, expected);
                assert!(rollback.to_string().contains("rollback refused"));
            }
            other => panic!("expected RollbackFailed, got {other:?}"),
        }
    }
}
