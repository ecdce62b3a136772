//! Catalog file handling: the per-locale bundle format and the canonical
//! source catalog.
//!
//! Bundles are flat JSON objects mapping phrase keys to strings. Keys starting
//! with `@` are reserved for metadata and are excluded from diff/translation
//! processing; on export they are carried over from the existing file
//! untouched.
//!
//! The source catalog is an ordered JSON array of single-entry objects.
//! Duplicate keys resolve last-write-wins in input order.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde_json::{Map, Value};
use thiserror::Error;

/// Reserved prefix for non-translatable metadata keys.
pub const METADATA_PREFIX: char = '@';

#[derive(Debug, Error)]
pub enum CatalogError {
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
    #[error("invalid JSON in {path}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("{path}: expected {expected}")]
    Shape { path: PathBuf, expected: String },
    #[error("{path}: value for key \"{key}\" is not a string")]
    NotAString { path: PathBuf, key: String },
}

/// The canonical source phrase set for one run, in input order.
///
/// Built from the ordered list form; duplicate keys keep their first position
/// and take the last value seen.
#[derive(Debug, Clone, Default)]
pub struct SourceCatalog {
    entries: Vec<(String, String)>,
}

impl SourceCatalog {
    pub fn from_entries<I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let mut entries: Vec<(String, String)> = Vec::new();
        for (key, value) in pairs {
            match entries.iter_mut().find(|(k, _)| *k == key) {
                Some((_, existing)) => *existing = value,
                None => entries.push((key, value)),
            }
        }
        Self { entries }
    }

    pub fn entries(&self) -> &[(String, String)] {
        &self.entries
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.iter().any(|(k, _)| k == key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Load the source catalog from its on-disk list form.
///
/// The file is a JSON array of single-entry objects:
/// `[{"greeting": "Hello"}, {"farewell": "Bye"}]`. Reserved-prefix keys are
/// skipped. Non-string values are an error; the catalog is machine-written
/// and a wrong type means a broken producer, not data to tolerate.
pub fn load_source_catalog(path: &Path) -> Result<SourceCatalog, CatalogError> {
    let content = fs::read_to_string(path).map_err(|source| CatalogError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let root: Value = serde_json::from_str(&content).map_err(|source| CatalogError::Parse {
        path: path.to_path_buf(),
        source,
    })?;
    let list = root.as_array().ok_or_else(|| CatalogError::Shape {
        path: path.to_path_buf(),
        expected: "an array of single-entry objects".to_string(),
    })?;

    let mut pairs = Vec::new();
    for item in list {
        let obj = item.as_object().ok_or_else(|| CatalogError::Shape {
            path: path.to_path_buf(),
            expected: "an array of single-entry objects".to_string(),
        })?;
        for (key, value) in obj {
            if key.starts_with(METADATA_PREFIX) {
                continue;
            }
            let text = value.as_str().ok_or_else(|| CatalogError::NotAString {
                path: path.to_path_buf(),
                key: key.clone(),
            })?;
            pairs.push((key.clone(), text.to_string()));
        }
    }
    Ok(SourceCatalog::from_entries(pairs))
}

/// One locale's exported bundle: translatable mapping plus any reserved
/// metadata entries found in the file.
#[derive(Debug, Clone, Default)]
pub struct Bundle {
    pub mapping: BTreeMap<String, String>,
    pub metadata: Map<String, Value>,
}

/// Read a bundle file, separating metadata from the translatable mapping.
///
/// A missing file is an empty bundle; the exporter creates it.
pub fn read_bundle(path: &Path) -> Result<Bundle, CatalogError> {
    if !path.exists() {
        return Ok(Bundle::default());
    }
    let content = fs::read_to_string(path).map_err(|source| CatalogError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let root: Value = serde_json::from_str(&content).map_err(|source| CatalogError::Parse {
        path: path.to_path_buf(),
        source,
    })?;
    let obj = match root {
        Value::Object(map) => map,
        _ => {
            return Err(CatalogError::Shape {
                path: path.to_path_buf(),
                expected: "a flat JSON object".to_string(),
            });
        }
    };

    let mut bundle = Bundle::default();
    for (key, value) in obj {
        if key.starts_with(METADATA_PREFIX) {
            bundle.metadata.insert(key, value);
            continue;
        }
        let text = value.as_str().ok_or_else(|| CatalogError::NotAString {
            path: path.to_path_buf(),
            key: key.clone(),
        })?;
        bundle.mapping.insert(key, text.to_string());
    }
    Ok(bundle)
}

/// Write a bundle file: metadata entries first, then keys in sorted order.
///
/// Creates parent directories, pretty-prints with a trailing newline.
pub fn write_bundle(path: &Path, bundle: &Bundle) -> Result<(), CatalogError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|source| CatalogError::Write {
            path: path.to_path_buf(),
            source,
        })?;
    }

    let mut out = Map::new();
    for (key, value) in &bundle.metadata {
        out.insert(key.clone(), value.clone());
    }
    for (key, value) in &bundle.mapping {
        out.insert(key.clone(), Value::String(value.clone()));
    }

    let content = serde_json::to_string_pretty(&Value::Object(out)).map_err(|source| {
        CatalogError::Parse {
            path: path.to_path_buf(),
            source,
        }
    })?;
    fs::write(path, format!("{}\n", content)).map_err(|source| CatalogError::Write {
        path: path.to_path_buf(),
        source,
    })
}
