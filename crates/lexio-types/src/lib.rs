pub mod entry;
pub mod error;
pub mod health;

pub use entry::{Definition, EnrichmentUpdate, Meaning, WordEntry};
pub use error::{AppError, ErrorKind, Scope};
pub use health::{HealthState, HealthStatus};
