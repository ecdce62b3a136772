//! Deterministic in-memory translator.
//!
//! Lets the engine be exercised without API keys or network access. Each mode
//! simulates one provider behavior; the call counter backs assertions like
//! "this run issued zero oracle calls".

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;

use super::oracle::{OracleError, Translator};

#[derive(Debug, Clone)]
pub enum MockMode {
    /// Append the target locale: "Hello" → "Hello [fr]".
    Suffix,
    /// Predefined (text, target locale) → translation; unknown pairs fall
    /// back to the suffix form.
    Mappings(HashMap<(String, String), String>),
    /// Every call reports rate limiting.
    RateLimited,
    /// Every call fails with the given message.
    Failed(String),
}

#[derive(Debug)]
pub struct MockTranslator {
    mode: MockMode,
    calls: AtomicUsize,
}

impl MockTranslator {
    pub fn new(mode: MockMode) -> Self {
        Self {
            mode,
            calls: AtomicUsize::new(0),
        }
    }

    /// Build a `Mappings` mock from (source text, target locale, translation)
    /// triples.
    pub fn with_mappings<I>(triples: I) -> Self
    where
        I: IntoIterator<Item = (&'static str, &'static str, &'static str)>,
    {
        let map = triples
            .into_iter()
            .map(|(text, to, out)| ((text.to_string(), to.to_string()), out.to_string()))
            .collect();
        Self::new(MockMode::Mappings(map))
    }

    /// Number of oracle invocations so far.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Translator for MockTranslator {
    async fn translate(
        &self,
        _from: &str,
        to: &str,
        texts: &[String],
    ) -> Result<Vec<String>, OracleError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match &self.mode {
            MockMode::Suffix => Ok(texts
                .iter()
                .map(|t| format!("{} [{}]", t, to))
                .collect()),
            MockMode::Mappings(map) => Ok(texts
                .iter()
                .map(|t| {
                    map.get(&(t.clone(), to.to_string()))
                        .cloned()
                        .unwrap_or_else(|| format!("{} [{}]", t, to))
                })
                .collect()),
            MockMode::RateLimited => Err(OracleError::RateLimited),
            MockMode::Failed(msg) => Err(OracleError::Failed(msg.clone())),
        }
    }

    fn name(&self) -> &str {
        "mock"
    }
}
