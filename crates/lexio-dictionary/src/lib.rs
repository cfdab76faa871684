pub mod http;

use async_trait::async_trait;
use lexio_types::{AppError, WordEntry};

pub use http::HttpDictionary;

/// Canonical entry source for a validated term.
///
/// A fetch failure is fatal to the whole lookup: no base entry, no result.
#[async_trait]
pub trait Dictionary: Send + Sync {
    async fn fetch(&self, term: &str) -> Result<WordEntry, AppError>;
}
