//! Change detection between the incoming catalog and the stored phrases.

use std::collections::BTreeMap;

use crate::catalog::SourceCatalog;
use crate::phrase::SourcePhrase;

/// Delta computation mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeltaMode {
    /// Only entries that are new or whose value changed.
    Changed,
    /// Every incoming entry, for full (re)translation runs.
    ForceAll,
}

/// Entries of `incoming` that are absent from `stored` or whose value
/// differs, in the iteration order of `incoming`.
///
/// Pure: no side effects, same inputs give the same delta. The comparison is
/// against the canonical store only; locales play no part here.
pub fn compute_delta(
    incoming: &SourceCatalog,
    stored: &BTreeMap<String, SourcePhrase>,
    mode: DeltaMode,
) -> Vec<(String, String)> {
    incoming
        .entries()
        .iter()
        .filter(|(key, value)| match mode {
            DeltaMode::ForceAll => true,
            DeltaMode::Changed => stored.get(key).map(|p| &p.value) != Some(value),
        })
        .cloned()
        .collect()
}
