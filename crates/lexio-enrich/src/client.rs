use std::time::Duration;

use async_trait::async_trait;
use lexio_config::enrichment::EnrichmentConfig;
use lexio_types::{AppError, EnrichmentUpdate, Meaning, Scope};
use serde::Serialize;

use crate::health::HealthProbe;

/// Client for the AI proxy. Built only when the feature gate is open.
#[derive(Clone)]
pub struct EnrichmentClient {
    base_url: String,
    client: reqwest::Client,
}

#[derive(Serialize)]
struct ExamplesRequest<'a> {
    word: &'a str,
    meanings: &'a [Meaning],
}

impl EnrichmentClient {
    /// Returns `Ok(None)` when enrichment is administratively disabled. A
    /// client that cannot be built is an error, not a silent fallback: the
    /// configured request timeout must never be dropped.
    pub fn from_config(config: &EnrichmentConfig) -> Result<Option<Self>, AppError> {
        let Some(endpoint) = config.endpoint() else {
            return Ok(None);
        };

        let client = reqwest::Client::builder()
            .timeout(Duration::from_millis(config.request_timeout_ms))
            .build()
            .map_err(|e| AppError::classify(Scope::Examples, e.into()))?;

        Ok(Some(Self {
            base_url: endpoint.trim_end_matches('/').to_string(),
            client,
        }))
    }

    /// Request example sentences for every definition slot of `word`.
    ///
    /// The proxy may answer for any subset of slots; the response order is
    /// preserved as-is.
    pub async fn fetch_examples(
        &self,
        word: &str,
        meanings: &[Meaning],
    ) -> Result<Vec<EnrichmentUpdate>, AppError> {
        let request = ExamplesRequest { word, meanings };

        let response = self
            .client
            .post(format!("{}/examples", self.base_url))
            .json(&request)
            .send()
            .await
            .map_err(|e| AppError::classify(Scope::Examples, e.into()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(AppError::http(Scope::Examples, status.as_u16()));
        }

        response
            .json::<Vec<EnrichmentUpdate>>()
            .await
            .map_err(|_| AppError::invalid_payload(Scope::Examples))
    }
}

#[async_trait]
impl HealthProbe for EnrichmentClient {
    async fn probe(&self) -> Result<String, AppError> {
        let response = self
            .client
            .get(format!("{}/health", self.base_url))
            .send()
            .await
            .map_err(|e| AppError::classify(Scope::Examples, e.into()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(AppError::http(Scope::Examples, status.as_u16()));
        }

        let payload: serde_json::Value = response
            .json()
            .await
            .map_err(|_| AppError::invalid_payload(Scope::Examples))?;

        // A missing or non-string status field maps to an empty report,
        // which the monitor treats as degraded.
        Ok(payload["status"].as_str().unwrap_or_default().to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_config_respects_the_feature_gate() {
        let mut config = EnrichmentConfig::default();
        assert!(EnrichmentClient::from_config(&config).unwrap().is_none());

        config.enabled = true;
        config.proxy_url = "http://localhost:9090/".to_string();
        let client = EnrichmentClient::from_config(&config)
            .unwrap()
            .expect("gated-on config builds a client");
        assert_eq!(client.base_url, "http://localhost:9090");
    }
}
