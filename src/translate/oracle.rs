//! The translation-oracle abstraction.
//!
//! Providers implement [`Translator`]; the engine only ever sees this trait.
//! A provider must preserve order and count on success. Rate limiting is a
//! distinct, retryable condition; everything else collapses to `Failed`.

use async_trait::async_trait;
use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum OracleError {
    /// The provider signalled throttling. Retryable with backoff.
    #[error("translation service rate limit hit")]
    RateLimited,
    /// Any other provider failure. Not retried within a run.
    #[error("translation failed: {0}")]
    Failed(String),
}

impl From<reqwest::Error> for OracleError {
    fn from(err: reqwest::Error) -> Self {
        OracleError::Failed(err.to_string())
    }
}

/// A batch translation service.
#[async_trait]
pub trait Translator: Send + Sync {
    /// Translate `texts` from `from` to `to`, preserving order and count.
    async fn translate(
        &self,
        from: &str,
        to: &str,
        texts: &[String],
    ) -> Result<Vec<String>, OracleError>;

    /// Provider name for reporting.
    fn name(&self) -> &str;
}

/// Check that a locale code is plausibly a language tag: non-empty, ASCII
/// alphanumerics plus `-`/`_`.
pub fn validate_locale(locale: &str) -> Result<(), String> {
    if locale.is_empty() {
        return Err("locale code is empty".to_string());
    }
    if !locale
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
    {
        return Err(format!("invalid characters in locale code: \"{}\"", locale));
    }
    Ok(())
}
