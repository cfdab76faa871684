use serde::{Deserialize, Serialize};

const TRANSIENT_MESSAGE: &str = "Couldn't reach the example service. Please try again.";
const UNAVAILABLE_MESSAGE: &str = "AI examples aren't ready yet. Check back later.";
const SERVER_MESSAGE: &str = "The example service had a problem. Please try again.";

/// Closed set of failure categories shared across the whole system.
///
/// `Auth` is not produced by the lookup core but belongs to the shared
/// taxonomy for future account flows; `Unknown` is the catch-all for
/// failures with no recognizable shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ErrorKind {
    Network,
    Server,
    Auth,
    Validation,
    Unknown,
}

/// Logical sub-operation a failure belongs to. Drives the diagnostic code
/// prefix so telemetry can tell an examples failure from a speech one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scope {
    Lookup,
    Examples,
    Speech,
}

impl Scope {
    pub fn code_prefix(self) -> &'static str {
        match self {
            Scope::Lookup => "DICT_LOOKUP",
            Scope::Examples => "AI_EXAMPLES",
            Scope::Speech => "AI_SPEECH",
        }
    }
}

/// The one error value the rest of the system deals in.
///
/// Constructed once at the point a failure is classified and never mutated.
/// `message` is safe to show to users; `code` is a machine-stable diagnostic
/// id and must never reach the UI.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error, Serialize, Deserialize)]
#[error("{message}")]
pub struct AppError {
    pub kind: ErrorKind,
    pub message: String,
    #[serde(default)]
    pub code: Option<String>,
    /// Original failure rendered to text, for logs only.
    #[serde(default)]
    pub cause: Option<String>,
    #[serde(default)]
    pub retryable: Option<bool>,
}

impl AppError {
    /// Classify an arbitrary failure for the given scope.
    ///
    /// An `AppError` passes through unchanged, so classification never
    /// double-wraps. Anything whose rendered message looks abort- or
    /// timeout-shaped lands in the `_TIMEOUT` bucket; every other failure
    /// is treated as transport trouble.
    pub fn classify(scope: Scope, failure: anyhow::Error) -> AppError {
        let failure = match failure.downcast::<AppError>() {
            Ok(already_classified) => return already_classified,
            Err(other) => other,
        };

        let rendered = format!("{failure:#}");
        let lowered = rendered.to_lowercase();
        let aborted = ["abort", "cancel", "timed out", "timeout"]
            .iter()
            .any(|needle| lowered.contains(needle));

        AppError {
            kind: ErrorKind::Network,
            message: TRANSIENT_MESSAGE.to_string(),
            code: Some(format!(
                "{}_{}",
                scope.code_prefix(),
                if aborted { "TIMEOUT" } else { "NETWORK" }
            )),
            cause: Some(rendered),
            retryable: Some(true),
        }
    }

    /// HTTP-level failure with a known status code.
    ///
    /// 5xx, 429 and 408 are worth retrying; other 4xx are not, though they
    /// stay non-fatal to the caller.
    pub fn http(scope: Scope, status: u16) -> AppError {
        AppError {
            kind: ErrorKind::Server,
            message: SERVER_MESSAGE.to_string(),
            code: Some(format!("{}_HTTP_{status}", scope.code_prefix())),
            cause: None,
            retryable: Some(status >= 500 || status == 429 || status == 408),
        }
    }

    /// The feature is administratively disabled. A configuration gate, not a
    /// transient fault: never retried automatically.
    pub fn feature_disabled(scope: Scope) -> AppError {
        AppError {
            kind: ErrorKind::Validation,
            message: UNAVAILABLE_MESSAGE.to_string(),
            code: Some(format!("{}_UNAVAILABLE", scope.code_prefix())),
            cause: None,
            retryable: Some(false),
        }
    }

    /// The backend answered but the body didn't parse into the expected shape.
    pub fn invalid_payload(scope: Scope) -> AppError {
        AppError {
            kind: ErrorKind::Server,
            message: SERVER_MESSAGE.to_string(),
            code: Some(format!("{}_INVALID_PAYLOAD", scope.code_prefix())),
            cause: None,
            retryable: Some(true),
        }
    }

    /// The bounded per-job timeout elapsed.
    pub fn timeout(scope: Scope) -> AppError {
        AppError {
            kind: ErrorKind::Network,
            message: TRANSIENT_MESSAGE.to_string(),
            code: Some(format!("{}_TIMEOUT", scope.code_prefix())),
            cause: None,
            retryable: Some(true),
        }
    }

    /// Caller-input problem, e.g. a malformed search term.
    pub fn validation(message: impl Into<String>) -> AppError {
        AppError {
            kind: ErrorKind::Validation,
            message: message.into(),
            code: None,
            cause: None,
            retryable: Some(false),
        }
    }

    /// Whether automatic retry is worthwhile. Falls back to a kind-based
    /// default when the classifier left `retryable` unset: transport and
    /// backend failures are retried, everything else is not.
    pub fn is_retryable(&self) -> bool {
        self.retryable
            .unwrap_or(matches!(self.kind, ErrorKind::Network | ErrorKind::Server))
    }
}
