pub mod sqlite;
pub mod txn;

use async_trait::async_trait;

pub use sqlite::SqliteStore;
pub use txn::{TxError, run_in_transaction};

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("store backend error: {0}")]
    Backend(String),
}

/// Minimal transactional surface of the persistent store.
///
/// `execute` is only meaningful between `begin` and the closing
/// `commit`/`rollback`; the unit-of-work wrapper owns that framing. Locking
/// is delegated to the backend's own exclusive-transaction primitive.
#[async_trait]
pub trait TransactionalStore: Send {
    async fn begin(&mut self) -> Result<(), StoreError>;
    async fn commit(&mut self) -> Result<(), StoreError>;
    async fn rollback(&mut self) -> Result<(), StoreError>;
    async fn execute(&mut self, sql: &str, params: &[&str]) -> Result<usize, StoreError>;
}
