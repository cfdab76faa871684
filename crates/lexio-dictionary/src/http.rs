use std::time::Duration;

use async_trait::async_trait;
use lexio_config::dictionary::DictionaryConfig;
use lexio_types::{AppError, Definition, Meaning, Scope, WordEntry};

use crate::Dictionary;

/// Dictionary backed by the upstream HTTP data source. The upstream payload
/// is consumed as opaque JSON and mapped into the `WordEntry` shape here.
#[derive(Clone)]
pub struct HttpDictionary {
    api_url: String,
    client: reqwest::Client,
}

impl HttpDictionary {
    pub fn new(config: &DictionaryConfig) -> Result<Self, AppError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_millis(config.timeout_ms))
            .build()
            .map_err(|e| AppError::classify(Scope::Lookup, e.into()))?;

        Ok(Self {
            api_url: config.api_url.trim_end_matches('/').to_string(),
            client,
        })
    }
}

#[async_trait]
impl Dictionary for HttpDictionary {
    async fn fetch(&self, term: &str) -> Result<WordEntry, AppError> {
        let url = format!("{}/{}", self.api_url, term);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| AppError::classify(Scope::Lookup, e.into()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(AppError::http(Scope::Lookup, status.as_u16()));
        }

        let payload: serde_json::Value = response
            .json()
            .await
            .map_err(|_| AppError::invalid_payload(Scope::Lookup))?;

        tracing::debug!(%term, "dictionary payload received");
        entry_from_payload(&payload).ok_or_else(|| AppError::invalid_payload(Scope::Lookup))
    }
}

/// Map the upstream array-of-entries payload into a `WordEntry`. Only the
/// first entry is used; audio comes from the first non-empty `phonetics`
/// audio field.
pub fn entry_from_payload(payload: &serde_json::Value) -> Option<WordEntry> {
    let entry = payload.get(0)?;
    let word = entry["word"].as_str()?.to_lowercase();

    let phonetic = entry["phonetic"].as_str().map(str::to_string);

    let audio_url = entry["phonetics"]
        .as_array()
        .into_iter()
        .flatten()
        .filter_map(|p| p["audio"].as_str())
        .find(|a| !a.is_empty())
        .map(str::to_string);

    let meanings = entry["meanings"]
        .as_array()
        .into_iter()
        .flatten()
        .map(|m| Meaning {
            part_of_speech: m["partOfSpeech"].as_str().map(str::to_string),
            definitions: m["definitions"]
                .as_array()
                .into_iter()
                .flatten()
                .filter_map(|d| {
                    let gloss = d["definition"].as_str()?;
                    let mut definition = Definition::new(gloss);
                    definition.example = d["example"].as_str().map(str::to_string);
                    Some(definition)
                })
                .collect(),
        })
        .collect();

    Some(WordEntry {
        word,
        phonetic,
        audio_url,
        meanings,
    })
}
