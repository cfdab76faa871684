use std::env;

use serde::{Deserialize, Serialize};

fn default_enabled() -> bool {
    false
}

fn default_request_timeout_ms() -> u64 {
    8_000
}

fn default_job_timeout_ms() -> u64 {
    20_000
}

fn default_health_interval_ms() -> u64 {
    30_000
}

fn default_probe_timeout_ms() -> u64 {
    5_000
}

/// AI proxy settings. The feature is gated: with `enabled=false` or an empty
/// `proxy_url`, the dispatcher and the health monitor treat enrichment as
/// administratively disabled.
#[derive(Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct EnrichmentConfig {
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    #[serde(default)]
    pub proxy_url: String,
    /// Timeout for a single network call to the proxy.
    #[serde(default = "default_request_timeout_ms")]
    pub request_timeout_ms: u64,
    /// Overall budget for one enrichment job, distinct from the per-call one.
    #[serde(default = "default_job_timeout_ms")]
    pub job_timeout_ms: u64,
    #[serde(default = "default_health_interval_ms")]
    pub health_interval_ms: u64,
    #[serde(default = "default_probe_timeout_ms")]
    pub probe_timeout_ms: u64,
}

impl EnrichmentConfig {
    pub fn from_env() -> Self {
        let enabled = env::var("AI_EXAMPLES_ENABLED")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or_else(default_enabled);

        let proxy_url = env::var("AI_PROXY_URL").unwrap_or_default();

        let request_timeout_ms = env::var("AI_REQUEST_TIMEOUT_MS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or_else(default_request_timeout_ms);

        let job_timeout_ms = env::var("AI_JOB_TIMEOUT_MS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or_else(default_job_timeout_ms);

        let health_interval_ms = env::var("AI_HEALTH_INTERVAL_MS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or_else(default_health_interval_ms);

        let probe_timeout_ms = env::var("AI_PROBE_TIMEOUT_MS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or_else(default_probe_timeout_ms);

        Self {
            enabled,
            proxy_url,
            request_timeout_ms,
            job_timeout_ms,
            health_interval_ms,
            probe_timeout_ms,
        }
    }

    /// Proxy base URL, present only when the feature gate is open.
    pub fn endpoint(&self) -> Option<&str> {
        if self.enabled && !self.proxy_url.is_empty() {
            Some(&self.proxy_url)
        } else {
            None
        }
    }
}

impl Default for EnrichmentConfig {
    fn default() -> Self {
        Self {
            enabled: default_enabled(),
            proxy_url: String::new(),
            request_timeout_ms: default_request_timeout_ms(),
            job_timeout_ms: default_job_timeout_ms(),
            health_interval_ms: default_health_interval_ms(),
            probe_timeout_ms: default_probe_timeout_ms(),
        }
    }
}
