use std::env;

use serde::{Deserialize, Serialize};

fn default_db_path() -> String {
    "lexio.db".to_string()
}

#[derive(Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct StorageConfig {
    #[serde(default = "default_db_path")]
    pub db_path: String,
}

impl StorageConfig {
    pub fn from_env() -> Self {
        let db_path = env::var("LEXIO_DB_PATH").unwrap_or_else(|_| default_db_path());

        Self { db_path }
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            db_path: default_db_path(),
        }
    }
}
