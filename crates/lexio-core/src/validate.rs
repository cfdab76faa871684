use lexio_types::AppError;
use unicode_normalization::UnicodeNormalization;

/// Normalize a raw search term: trim, NFKC-fold, lowercase.
///
/// Rejects empty input and anything containing characters outside
/// lowercase letters, whitespace, apostrophe and hyphen. Pure, no I/O.
pub fn normalize_term(raw: &str) -> Result<String, AppError> {
    let term: String = raw.trim().nfkc().collect::<String>().to_lowercase();

    if term.is_empty() {
        return Err(AppError::validation("Please enter a word to look up."));
    }

    let well_formed = term
        .chars()
        .all(|c| c.is_ascii_lowercase() || c.is_whitespace() || c == '\'' || c == '-');
    if !well_formed {
        return Err(AppError::validation(
            "Words can only contain letters, spaces, apostrophes and hyphens.",
        ));
    }

    Ok(term)
}

#[cfg(test)]
mod tests {
    use super::*;
    use lexio_types::ErrorKind;

    #[test]
    fn trims_and_lowercases() {
        assert_eq!(normalize_term("  Hello ").unwrap(), "hello");
    }

    #[test]
    fn accepts_apostrophes_hyphens_and_spaces() {
        assert_eq!(normalize_term("mother-in-law").unwrap(), "mother-in-law");
        assert_eq!(normalize_term("o'clock").unwrap(), "o'clock");
        assert_eq!(normalize_term("give up").unwrap(), "give up");
    }

    #[test]
    fn rejects_empty_input() {
        let err = normalize_term("   ").unwrap_err();
        assert_eq!(err.kind, ErrorKind::Validation);
        assert!(err.message.contains("enter a word"));
    }

    #[test]
    fn rejects_invalid_characters() {
        for raw in ["123", "héllo", "word!", "a_b"] {
            let err = normalize_term(raw).unwrap_err();
            assert_eq!(err.kind, ErrorKind::Validation, "{raw:?} should be rejected");
            assert!(err.message.contains("only contain"));
        }
    }
}
