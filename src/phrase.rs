//! Domain types for phrases and their translations.
//!
//! These types are what the store persists: the canonical source phrases and,
//! per locale, the translated values with their provenance.

use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};

/// Unix timestamp in seconds.
pub type Timestamp = u64;

/// Current time as a unix timestamp in seconds.
pub fn now_timestamp() -> Timestamp {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}

/// A canonical source-language phrase, keyed by a stable identifier.
///
/// One record per key; created on first sync, its value and timestamp are
/// rewritten whenever the incoming catalog changes, never deleted by sync.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SourcePhrase {
    pub value: String,
    pub last_updated: Timestamp,
}

/// How a translated value came to be.
///
/// `Manual` marks a human-corrected value; the sync path must never rewrite
/// it back to `Automatic`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Provenance {
    Automatic,
    Manual,
}

/// A translated value for one (phrase key, locale) pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Translation {
    pub value: String,
    pub provenance: Provenance,
    pub last_updated: Timestamp,
}

impl Translation {
    /// A freshly machine-translated value.
    pub fn automatic(value: impl Into<String>, last_updated: Timestamp) -> Self {
        Self {
            value: value.into(),
            provenance: Provenance::Automatic,
            last_updated,
        }
    }

    pub fn is_manual(&self) -> bool {
        self.provenance == Provenance::Manual
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn provenance_serializes_lowercase() {
        let json = serde_json::to_string(&Provenance::Automatic).unwrap();
        assert_eq!(json, "\"automatic\"");
        let json = serde_json::to_string(&Provenance::Manual).unwrap();
        assert_eq!(json, "\"manual\"");
    }

    #[test]
    fn translation_roundtrip() {
        let t = Translation::automatic("Bonjour", 1700000000);
        let json = serde_json::to_string(&t).unwrap();
        let back: Translation = serde_json::from_str(&json).unwrap();
        assert_eq!(back, t);
        assert!(!back.is_manual());
    }

    #[test]
    fn unknown_provenance_is_rejected() {
        let result: Result<Translation, _> = serde_json::from_str(
            r#"{"value": "x", "provenance": "azure", "lastUpdated": 0}"#,
        );
        assert!(result.is_err());
    }

    #[test]
    fn now_timestamp_is_reasonable() {
        // Any date after 2024-01-01.
        assert!(now_timestamp() > 1_704_067_200);
    }
}
