use thiserror::Error;

/// Errors surfaced through the public API.
///
/// `classify` and `render` are total functions and never return an error —
/// malformed input is handled by falling back to `LogFormat::Unknown` /
/// the generic renderer, per the crate's error-handling design.
#[derive(Debug, Error)]
pub enum SearchError {
    #[error("invalid search pattern: {0}")]
    InvalidPattern(#[from] regex::Error),
}
