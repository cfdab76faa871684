use std::time::SystemTime;

use serde::{Deserialize, Serialize};

/// Availability of the enrichment backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HealthState {
    /// No backend configured; stays this way until configuration changes.
    Unavailable,
    Healthy,
    Degraded,
}

/// Process-wide health snapshot, re-derived on every check. Never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HealthStatus {
    pub state: HealthState,
    pub last_checked_at: Option<SystemTime>,
    pub error_message: Option<String>,
}

impl HealthStatus {
    pub fn unavailable() -> Self {
        Self {
            state: HealthState::Unavailable,
            last_checked_at: None,
            error_message: None,
        }
    }

    /// Pessimistic default for a configured backend before its first check.
    pub fn unchecked() -> Self {
        Self {
            state: HealthState::Degraded,
            last_checked_at: None,
            error_message: None,
        }
    }
}
