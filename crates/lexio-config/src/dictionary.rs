use std::env;

use serde::{Deserialize, Serialize};

fn default_api_url() -> String {
    "https://api.dictionaryapi.dev/api/v2/entries/en".to_string()
}

fn default_timeout_ms() -> u64 {
    10_000
}

#[derive(Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct DictionaryConfig {
    #[serde(default = "default_api_url")]
    pub api_url: String,
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
}

impl DictionaryConfig {
    pub fn from_env() -> Self {
        let api_url = env::var("DICTIONARY_API_URL").unwrap_or_else(|_| default_api_url());

        let timeout_ms = env::var("DICTIONARY_TIMEOUT_MS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or_else(default_timeout_ms);

        Self { api_url, timeout_ms }
    }
}

impl Default for DictionaryConfig {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
            timeout_ms: default_timeout_ms(),
        }
    }
}
