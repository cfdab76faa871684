pub mod client;
pub mod health;
pub mod job;

pub use client::EnrichmentClient;
pub use health::{HealthMonitor, HealthProbe};
pub use job::{EnrichmentJob, dispatch};
