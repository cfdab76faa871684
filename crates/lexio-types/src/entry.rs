use serde::{Deserialize, Serialize};

/// One looked-up dictionary entry, enriched or awaiting enrichment.
///
/// `meanings` keeps source order and is never reordered after fetch;
/// enrichment always produces a new `WordEntry` value instead of mutating
/// an existing one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WordEntry {
    pub word: String,
    #[serde(default)]
    pub phonetic: Option<String>,
    #[serde(default)]
    pub audio_url: Option<String>,
    pub meanings: Vec<Meaning>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Meaning {
    #[serde(default)]
    pub part_of_speech: Option<String>,
    pub definitions: Vec<Definition>,
}

/// A single definition slot, addressed by `(meaning_index, definition_index)`
/// within its entry. Both indices are 0-based and stable for the lifetime of
/// one `WordEntry` instance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Definition {
    pub definition: String,
    #[serde(default)]
    pub example: Option<String>,
    /// Original gloss, kept when a translation overwrites `definition`.
    #[serde(default)]
    pub original_definition: Option<String>,
    #[serde(default)]
    pub pending_example: bool,
    #[serde(default)]
    pub pending_translation: bool,
}

impl Definition {
    pub fn new(definition: impl Into<String>) -> Self {
        Self {
            definition: definition.into(),
            example: None,
            original_definition: None,
            pending_example: false,
            pending_translation: false,
        }
    }
}

/// One AI-generated fact targeted at a specific definition slot.
///
/// A batch of updates may cover only a subset of an entry's slots; slots it
/// does not cover are treated as "no new content, pending cleared".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnrichmentUpdate {
    pub meaning_index: usize,
    pub definition_index: usize,
    #[serde(default)]
    pub example: Option<String>,
}
