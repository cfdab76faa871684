use std::path::Path;

use async_trait::async_trait;
use rusqlite::Connection;

use crate::{StoreError, TransactionalStore};

/// sqlite-backed store. Transactions use `BEGIN IMMEDIATE` so the write
/// lock is taken up front and writers block other writers for the duration
/// of one unit of work.
pub struct SqliteStore {
    conn: Connection,
}

impl SqliteStore {
    pub fn open(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        Ok(Self {
            conn: Connection::open(path)?,
        })
    }

    pub fn open_in_memory() -> Result<Self, StoreError> {
        Ok(Self {
            conn: Connection::open_in_memory()?,
        })
    }

    /// Run DDL outside any transaction.
    pub fn init_schema(&self, schema_sql: &str) -> Result<(), StoreError> {
        self.conn.execute_batch(schema_sql)?;
        Ok(())
    }

    pub fn query_i64(&self, sql: &str) -> Result<i64, StoreError> {
        Ok(self.conn.query_row(sql, [], |row| row.get(0))?)
    }
}

#[async_trait]
impl TransactionalStore for SqliteStore {
    async fn begin(&mut self) -> Result<(), StoreError> {
        self.conn.execute_batch("BEGIN IMMEDIATE")?;
        Ok(())
    }

    async fn commit(&mut self) -> Result<(), StoreError> {
        self.conn.execute_batch("COMMIT")?;
        Ok(())
    }

    async fn rollback(&mut self) -> Result<(), StoreError> {
        self.conn.execute_batch("ROLLBACK")?;
        Ok(())
    }

    async fn execute(&mut self, sql: &str, params: &[&str]) -> Result<usize, StoreError> {
        Ok(self.conn.execute(sql, rusqlite::params_from_iter(params))?)
    }
}
