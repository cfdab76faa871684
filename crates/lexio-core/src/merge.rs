use std::collections::HashMap;

use lexio_types::{EnrichmentUpdate, WordEntry};

/// Fold a batch of enrichment updates into a base entry.
///
/// Every definition slot is visited: a matching update with a non-empty
/// example lands in `example`, and the slot's pending flags clear whether or
/// not an update covered it. An empty batch is the give-up path: it clears
/// every pending flag and changes nothing else. The input is never mutated.
pub fn merge(base: &WordEntry, updates: &[EnrichmentUpdate]) -> WordEntry {
    let mut by_slot: HashMap<(usize, usize), &EnrichmentUpdate> = HashMap::new();
    for update in updates {
        // Last write wins on duplicate slots.
        by_slot.insert((update.meaning_index, update.definition_index), update);
    }

    let mut entry = base.clone();
    for (meaning_index, meaning) in entry.meanings.iter_mut().enumerate() {
        for (definition_index, definition) in meaning.definitions.iter_mut().enumerate() {
            if let Some(update) = by_slot.get(&(meaning_index, definition_index))
                && let Some(example) = update.example.as_deref().filter(|e| !e.is_empty())
            {
                definition.example = Some(example.to_string());
            }

            definition.pending_example = false;
            // Translation shares the enrichment pending cycle: any merge
            // pass resolves it.
            definition.pending_translation = false;
        }
    }

    entry
}

/// Mark every definition slot as awaiting an example. Used when an
/// enrichment job has been dispatched for the entry.
pub fn mark_examples_pending(mut entry: WordEntry) -> WordEntry {
    for meaning in &mut entry.meanings {
        for definition in &mut meaning.definitions {
            definition.pending_example = true;
        }
    }
    entry
}

#[cfg(test)]
mod tests {
    use super::*;
    use lexio_types::{Definition, Meaning};

    fn entry() -> WordEntry {
        let pending = |gloss: &str| {
            let mut d = Definition::new(gloss);
            d.pending_example = true;
            d.pending_translation = true;
            d
        };

        WordEntry {
            word: "run".to_string(),
            phonetic: Some("/rʌn/".to_string()),
            audio_url: None,
            meanings: vec![
                Meaning {
                    part_of_speech: Some("verb".to_string()),
                    definitions: vec![pending("move fast on foot"), pending("operate")],
                },
                Meaning {
                    part_of_speech: Some("noun".to_string()),
                    definitions: vec![pending("an act of running")],
                },
            ],
        }
    }

    fn update(mi: usize, di: usize, example: &str) -> EnrichmentUpdate {
        EnrichmentUpdate {
            meaning_index: mi,
            definition_index: di,
            example: Some(example.to_string()),
        }
    }

    #[test]
    fn empty_batch_clears_every_pending_flag_and_nothing_else() {
        let base = entry();
        let merged = merge(&base, &[]);

        for (mi, meaning) in merged.meanings.iter().enumerate() {
            for (di, definition) in meaning.definitions.iter().enumerate() {
                assert!(!definition.pending_example);
                assert!(!definition.pending_translation);
                assert_eq!(
                    definition.definition,
                    base.meanings[mi].definitions[di].definition
                );
                assert_eq!(definition.example, None);
            }
        }
        // Input untouched.
        assert!(base.meanings[0].definitions[0].pending_example);
    }

    #[test]
    fn empty_batch_merge_is_idempotent() {
        let base = entry();
        let once = merge(&base, &[]);
        let twice = merge(&once, &[]);
        assert_eq!(once, twice);
    }

    #[test]
    fn targeted_update_fills_only_its_slot() {
        let base = entry();
        let merged = merge(&base, &[update(1, 0, "She went for a run at dawn.")]);

        assert_eq!(
            merged.meanings[1].definitions[0].example.as_deref(),
            Some("She went for a run at dawn.")
        );
        assert_eq!(merged.meanings[0].definitions[0].example, None);
        assert_eq!(merged.meanings[0].definitions[1].example, None);

        // Definitions untouched, all pending flags resolved.
        for (mi, meaning) in merged.meanings.iter().enumerate() {
            for (di, definition) in meaning.definitions.iter().enumerate() {
                assert_eq!(
                    definition.definition,
                    base.meanings[mi].definitions[di].definition
                );
                assert!(!definition.pending_example);
                assert!(!definition.pending_translation);
            }
        }
    }

    #[test]
    fn empty_example_does_not_overwrite() {
        let mut base = entry();
        base.meanings[0].definitions[0].example = Some("kept".to_string());

        let merged = merge(
            &base,
            &[EnrichmentUpdate {
                meaning_index: 0,
                definition_index: 0,
                example: Some(String::new()),
            }],
        );

        assert_eq!(merged.meanings[0].definitions[0].example.as_deref(), Some("kept"));
        assert!(!merged.meanings[0].definitions[0].pending_example);
    }

    #[test]
    fn duplicate_slots_last_write_wins() {
        let merged = merge(&entry(), &[update(0, 0, "first"), update(0, 0, "second")]);
        assert_eq!(merged.meanings[0].definitions[0].example.as_deref(), Some("second"));
    }

    #[test]
    fn out_of_range_updates_are_ignored() {
        let merged = merge(&entry(), &[update(7, 3, "nowhere to land")]);
        for meaning in &merged.meanings {
            for definition in &meaning.definitions {
                assert_eq!(definition.example, None);
            }
        }
    }

    #[test]
    fn mark_examples_pending_touches_every_slot() {
        let base = WordEntry {
            word: "x".to_string(),
            phonetic: None,
            audio_url: None,
            meanings: vec![Meaning {
                part_of_speech: None,
                definitions: vec![Definition::new("a"), Definition::new("b")],
            }],
        };

        let marked = mark_examples_pending(base);
        for definition in &marked.meanings[0].definitions {
            assert!(definition.pending_example);
            assert!(!definition.pending_translation);
        }
    }
}
