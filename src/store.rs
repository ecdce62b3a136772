//! Durable phrase/translation store.
//!
//! The store is a directory of JSON tables: `source.json` for the canonical
//! phrases, `translations/<locale>.json` per locale, and `failed/<locale>.json`
//! for the recoverable per-locale failure artifact. Each table is committed as
//! one unit by writing a sibling temp file and renaming it into place, so a
//! reader never observes a half-written table. Cross-table atomicity is not
//! provided.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;
use serde::de::DeserializeOwned;
use thiserror::Error;

use crate::phrase::{Provenance, SourcePhrase, Translation, now_timestamp};

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("invalid store table {path}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
}

/// Failure of the operator-facing mark-manual operation.
#[derive(Debug, Error)]
pub enum MarkError {
    /// A phrase cannot be marked manual before it has been translated at
    /// least once; there would be no value to preserve.
    #[error("no translation for \"{key}\" in locale {locale}")]
    NotFound { key: String, locale: String },
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// File-backed store rooted at a directory.
///
/// Opening performs no I/O; directories are created on first write and a
/// missing table reads as empty.
#[derive(Debug, Clone)]
pub struct Store {
    root: PathBuf,
}

impl Store {
    pub fn open(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn source_path(&self) -> PathBuf {
        self.root.join("source.json")
    }

    fn translations_path(&self, locale: &str) -> PathBuf {
        self.root.join("translations").join(format!("{}.json", locale))
    }

    fn failed_path(&self, locale: &str) -> PathBuf {
        self.root.join("failed").join(format!("{}.json", locale))
    }

    /// All recorded source phrases.
    pub fn source_phrases(&self) -> Result<BTreeMap<String, SourcePhrase>, StoreError> {
        read_table(&self.source_path())
    }

    /// Upsert source phrases as a single atomic commit.
    pub fn save_source_phrases(
        &self,
        phrases: &[(String, SourcePhrase)],
    ) -> Result<(), StoreError> {
        if phrases.is_empty() {
            return Ok(());
        }
        let mut table = self.source_phrases()?;
        for (key, phrase) in phrases {
            table.insert(key.clone(), phrase.clone());
        }
        write_table(&self.source_path(), &table)
    }

    pub fn translation(&self, key: &str, locale: &str) -> Result<Option<Translation>, StoreError> {
        let table: BTreeMap<String, Translation> = read_table(&self.translations_path(locale))?;
        Ok(table.get(key).cloned())
    }

    /// Whether (key, locale) carries a human-corrected value. `false` when
    /// the translation is absent.
    pub fn is_manual(&self, key: &str, locale: &str) -> Result<bool, StoreError> {
        Ok(self
            .translation(key, locale)?
            .map(|t| t.is_manual())
            .unwrap_or(false))
    }

    pub fn save_translation(
        &self,
        locale: &str,
        key: &str,
        translation: Translation,
    ) -> Result<(), StoreError> {
        self.save_translations(locale, &[(key.to_string(), translation)])
    }

    /// Upsert one locale's translations as a single atomic commit.
    ///
    /// Callers hand in entries for one locale at a time; each call is one
    /// table write, so batched multi-record updates within a locale are never
    /// observable half-done.
    pub fn save_translations(
        &self,
        locale: &str,
        entries: &[(String, Translation)],
    ) -> Result<(), StoreError> {
        if entries.is_empty() {
            return Ok(());
        }
        let path = self.translations_path(locale);
        let mut table: BTreeMap<String, Translation> = read_table(&path)?;
        for (key, translation) in entries {
            table.insert(key.clone(), translation.clone());
        }
        write_table(&path, &table)
    }

    pub fn translations_for(
        &self,
        locale: &str,
    ) -> Result<BTreeMap<String, Translation>, StoreError> {
        read_table(&self.translations_path(locale))
    }

    /// Locales that have a translation table on disk.
    pub fn locales(&self) -> Result<Vec<String>, StoreError> {
        let dir = self.root.join("translations");
        if !dir.exists() {
            return Ok(Vec::new());
        }
        let entries = fs::read_dir(&dir).map_err(|source| StoreError::Read {
            path: dir.clone(),
            source,
        })?;
        let mut locales = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|source| StoreError::Read {
                path: dir.clone(),
                source,
            })?;
            let name = entry.file_name();
            let name = name.to_string_lossy();
            if let Some(locale) = name.strip_suffix(".json") {
                locales.push(locale.to_string());
            }
        }
        locales.sort();
        Ok(locales)
    }

    /// Keys recorded as failed for a locale by a previous run.
    pub fn failed_keys(&self, locale: &str) -> Result<Vec<String>, StoreError> {
        read_table(&self.failed_path(locale))
    }

    /// Rewrite a locale's failure artifact; an empty set removes the file.
    pub fn save_failed_keys(&self, locale: &str, keys: &[String]) -> Result<(), StoreError> {
        let path = self.failed_path(locale);
        if keys.is_empty() {
            if path.exists() {
                fs::remove_file(&path).map_err(|source| StoreError::Write { path, source })?;
            }
            return Ok(());
        }
        write_table(&path, &keys)
    }

    /// Flip a translation's provenance to `Manual`, preserving its value.
    ///
    /// Fails when no translation exists yet for (key, locale). Idempotent on
    /// already-manual entries.
    pub fn mark_manual(&self, locale: &str, key: &str) -> Result<(), MarkError> {
        let mut translation =
            self.translation(key, locale)?
                .ok_or_else(|| MarkError::NotFound {
                    key: key.to_string(),
                    locale: locale.to_string(),
                })?;
        translation.provenance = Provenance::Manual;
        translation.last_updated = now_timestamp();
        self.save_translation(locale, key, translation)?;
        Ok(())
    }
}

fn read_table<T: DeserializeOwned + Default>(path: &Path) -> Result<T, StoreError> {
    if !path.exists() {
        return Ok(T::default());
    }
    let content = fs::read_to_string(path).map_err(|source| StoreError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&content).map_err(|source| StoreError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// Commit a table: write a sibling temp file, then rename into place.
fn write_table<T: Serialize>(path: &Path, table: &T) -> Result<(), StoreError> {
    let write_err = |source| StoreError::Write {
        path: path.to_path_buf(),
        source,
    };

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(write_err)?;
    }
    let content = serde_json::to_string_pretty(table).map_err(|source| StoreError::Parse {
        path: path.to_path_buf(),
        source,
    })?;
    let tmp = path.with_extension("json.tmp");
    fs::write(&tmp, format!("{}\n", content)).map_err(write_err)?;
    fs::rename(&tmp, path).map_err(write_err)
}
