//! Sync orchestration: diff the incoming catalog against the store, translate
//! what changed, and export locale-complete bundles.
//!
//! A run moves through planning (load + diff) and execution (persist source
//! phrases, then per-locale translation and export). Planning does no writes,
//! so callers can decide whether a run is a no-op before touching the oracle
//! or its credentials.

use std::collections::BTreeMap;
use std::path::PathBuf;

use thiserror::Error;

use crate::catalog::{Bundle, CatalogError, SourceCatalog, read_bundle, write_bundle};
use crate::diff::{DeltaMode, compute_delta};
use crate::phrase::{SourcePhrase, Translation, now_timestamp};
use crate::store::{Store, StoreError};
use crate::translate::{BatchOptions, ChunkSink, Translator, translate_batches};

/// Everything a run needs to know besides its inputs.
#[derive(Debug, Clone)]
pub struct SyncOptions {
    pub source_locale: String,
    /// Target locales, processed strictly in order.
    pub locales: Vec<String>,
    pub mode: DeltaMode,
    pub batch: BatchOptions,
    /// Directory the per-locale bundle files are exported into.
    pub bundle_root: PathBuf,
}

/// The work a run would do: the canonical delta plus, per locale, recorded
/// failures from earlier runs that are still present in the incoming catalog.
///
/// Failed keys need this second channel: their source phrases were already
/// committed by the run that failed them, so the plain diff no longer sees
/// them.
#[derive(Debug, Default)]
pub struct SyncPlan {
    pub delta: Vec<(String, String)>,
    pub retry: BTreeMap<String, Vec<(String, String)>>,
}

impl SyncPlan {
    pub fn has_work(&self) -> bool {
        !self.delta.is_empty() || self.retry.values().any(|entries| !entries.is_empty())
    }
}

/// Per-locale outcome of a run.
#[derive(Debug, Clone)]
pub struct LocaleReport {
    pub locale: String,
    /// Keys translated and persisted this run.
    pub translated: usize,
    /// Keys left untouched because an operator marked them manual.
    pub skipped_manual: usize,
    /// Keys recorded in the locale's failure artifact.
    pub failed: usize,
    /// Translations that came back byte-identical to the source value, a
    /// likely sign of an untranslated pass-through. Reported, never fatal.
    pub passthrough: usize,
    /// Set when a storage or bundle failure abandoned this locale.
    pub error: Option<String>,
}

impl LocaleReport {
    fn abandoned(locale: &str, error: String) -> Self {
        Self {
            locale: locale.to_string(),
            translated: 0,
            skipped_manual: 0,
            failed: 0,
            passthrough: 0,
            error: Some(error),
        }
    }
}

/// Run-level outcome.
#[derive(Debug, Clone, Default)]
pub struct SyncReport {
    /// Size of the canonical delta (new or changed source phrases).
    pub diffed: usize,
    pub locales: Vec<LocaleReport>,
}

impl SyncReport {
    pub fn has_failures(&self) -> bool {
        self.locales
            .iter()
            .any(|l| l.failed > 0 || l.error.is_some())
    }
}

#[derive(Debug, Error)]
enum LocaleError {
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error(transparent)]
    Catalog(#[from] CatalogError),
}

/// Diff the incoming catalog against the store and collect per-locale retry
/// work. Read-only; the store is not touched.
pub fn plan(
    store: &Store,
    incoming: &SourceCatalog,
    options: &SyncOptions,
) -> Result<SyncPlan, StoreError> {
    let stored = store.source_phrases()?;
    let delta = compute_delta(incoming, &stored, options.mode);

    let mut retry = BTreeMap::new();
    for locale in &options.locales {
        let entries: Vec<(String, String)> = store
            .failed_keys(locale)?
            .into_iter()
            .filter(|key| !delta.iter().any(|(k, _)| k == key))
            .filter_map(|key| {
                incoming
                    .get(&key)
                    .map(|value| (key, value.to_string()))
            })
            .collect();
        if !entries.is_empty() {
            retry.insert(locale.clone(), entries);
        }
    }

    Ok(SyncPlan { delta, retry })
}

/// Execute a planned run.
///
/// Source phrases are committed once, up front; a failure here aborts the
/// run before any locale is touched. Locales are then processed strictly in
/// order; a storage failure inside one locale abandons it (recorded on its
/// report entry) and the run continues with the next. Oracle failures never
/// abort anything; they degrade to per-key entries in the failure artifact.
pub async fn execute(
    store: &Store,
    oracle: &dyn Translator,
    plan: &SyncPlan,
    options: &SyncOptions,
) -> Result<SyncReport, StoreError> {
    let now = now_timestamp();
    let phrases: Vec<(String, SourcePhrase)> = plan
        .delta
        .iter()
        .map(|(key, value)| {
            (
                key.clone(),
                SourcePhrase {
                    value: value.clone(),
                    last_updated: now,
                },
            )
        })
        .collect();
    store.save_source_phrases(&phrases)?;

    let mut locales = Vec::with_capacity(options.locales.len());
    for locale in &options.locales {
        let report = match sync_locale(store, oracle, plan, locale, options).await {
            Ok(report) => report,
            Err(err) => LocaleReport::abandoned(locale, err.to_string()),
        };
        locales.push(report);
    }

    Ok(SyncReport {
        diffed: plan.delta.len(),
        locales,
    })
}

/// Persists each successful chunk as soon as the oracle returns it.
struct StoreSink<'a> {
    store: &'a Store,
    locale: &'a str,
}

impl ChunkSink for StoreSink<'_> {
    fn commit(&mut self, chunk: &[(String, String)]) -> Result<(), StoreError> {
        let now = now_timestamp();
        let entries: Vec<(String, Translation)> = chunk
            .iter()
            .map(|(key, value)| (key.clone(), Translation::automatic(value.clone(), now)))
            .collect();
        self.store.save_translations(self.locale, &entries)
    }
}

async fn sync_locale(
    store: &Store,
    oracle: &dyn Translator,
    plan: &SyncPlan,
    locale: &str,
    options: &SyncOptions,
) -> Result<LocaleReport, LocaleError> {
    let existing = store.translations_for(locale)?;

    let mut pending: Vec<(String, String)> = plan.delta.clone();
    if let Some(extra) = plan.retry.get(locale) {
        pending.extend(extra.iter().cloned());
    }

    let (manual, to_translate): (Vec<_>, Vec<_>) = pending.into_iter().partition(|(key, _)| {
        existing.get(key).map(|t| t.is_manual()).unwrap_or(false)
    });
    let skipped_manual = manual.len();

    // Record the whole work set up front so keys are never silently dropped
    // if this locale dies mid-batch; rewritten with the real failure set
    // below.
    let pending_keys: Vec<String> = to_translate.iter().map(|(key, _)| key.clone()).collect();
    store.save_failed_keys(locale, &pending_keys)?;

    let mut sink = StoreSink { store, locale };
    let outcome = translate_batches(
        oracle,
        &options.source_locale,
        locale,
        &to_translate,
        &options.batch,
        &mut sink,
    )
    .await?;

    store.save_failed_keys(locale, &outcome.failed_keys)?;

    let passthrough = outcome
        .merged
        .iter()
        .filter(|(key, value)| {
            to_translate
                .iter()
                .any(|(k, source)| k == *key && source == *value)
        })
        .count();

    // Export reflects full current state, not just this run's delta.
    let translations = store.translations_for(locale)?;
    let bundle_path = options.bundle_root.join(format!("{}.json", locale));
    let previous = read_bundle(&bundle_path)?;
    let bundle = Bundle {
        mapping: translations
            .into_iter()
            .map(|(key, t)| (key, t.value))
            .collect(),
        metadata: previous.metadata,
    };
    write_bundle(&bundle_path, &bundle)?;

    Ok(LocaleReport {
        locale: locale.to_string(),
        translated: outcome.merged.len(),
        skipped_manual,
        failed: outcome.failed_keys.len(),
        passthrough,
        error: None,
    })
}
