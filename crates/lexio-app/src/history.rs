use futures_util::FutureExt;
use lexio_store::{StoreError, TransactionalStore, TxError, run_in_transaction};
use lexio_types::{AppError, ErrorKind};

pub const SCHEMA: &str = "
    CREATE TABLE IF NOT EXISTS lookup_history (
        word TEXT NOT NULL,
        looked_up_at TEXT NOT NULL
    );
    CREATE TABLE IF NOT EXISTS lookup_stats (
        total INTEGER NOT NULL
    );
    INSERT INTO lookup_stats (total)
    SELECT 0 WHERE NOT EXISTS (SELECT 1 FROM lookup_stats);
";

fn storage_error(error: StoreError) -> AppError {
    AppError {
        kind: ErrorKind::Unknown,
        message: "Couldn't save your lookup history.".to_string(),
        code: Some("STORE_WRITE".to_string()),
        cause: Some(error.to_string()),
        retryable: Some(false),
    }
}

/// Append a history row and bump the aggregate counter in one unit of work;
/// either both writes land or neither does.
pub async fn record_lookup<S: TransactionalStore>(store: &mut S, word: &str) -> Result<(), TxError> {
    let word = word.to_string();

    run_in_transaction(store, move |store| {
        async move {
            store
                .execute(
                    "INSERT INTO lookup_history (word, looked_up_at) VALUES (?1, datetime('now'))",
                    &[word.as_str()],
                )
                .await
                .map_err(storage_error)?;
            store
                .execute("UPDATE lookup_stats SET total = total + 1", &[])
                .await
                .map_err(storage_error)?;
            Ok(())
        }
        .boxed()
    })
    .await
}
