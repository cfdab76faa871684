use serde::{Deserialize, Serialize};

use self::dictionary::DictionaryConfig;
use self::enrichment::EnrichmentConfig;
use self::storage::StorageConfig;

pub mod dictionary;
pub mod enrichment;
pub mod storage;

#[derive(Default, Serialize, Deserialize)]
pub struct Config {
    pub dictionary: DictionaryConfig,
    pub enrichment: EnrichmentConfig,
    pub storage: StorageConfig,
}

impl Config {
    /// Build from environment variables, falling back to defaults.
    pub fn from_env() -> Self {
        Config {
            dictionary: DictionaryConfig::from_env(),
            enrichment: EnrichmentConfig::from_env(),
            storage: StorageConfig::from_env(),
        }
    }
}
