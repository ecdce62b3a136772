use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::translate::validate_locale;

pub const CONFIG_FILE_NAME: &str = ".locsyncrc.json";

/// Environment variable that overrides the key file.
pub const KEY_ENV_VAR: &str = "LOCSYNC_TRANSLATOR_KEY";

#[derive(Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    #[serde(default = "default_source_locale")]
    pub source_locale: String,
    /// Target locales, processed in listed order.
    #[serde(default)]
    pub locales: Vec<String>,
    #[serde(default = "default_source_file")]
    pub source_file: String,
    #[serde(default = "default_bundle_root")]
    pub bundle_root: String,
    #[serde(default = "default_store_root")]
    pub store_root: String,
    /// File holding the translation-service API key; overridden by the
    /// LOCSYNC_TRANSLATOR_KEY environment variable.
    #[serde(default = "default_key_file")]
    pub key_file: String,
    /// Region of the translator resource, when it is a regional one.
    #[serde(default)]
    pub region: Option<String>,
    #[serde(default = "default_batch_size")]
    pub batch_size: usize,
}

fn default_source_locale() -> String {
    "en".to_string()
}

fn default_source_file() -> String {
    "./phrases.json".to_string()
}

fn default_bundle_root() -> String {
    "./messages".to_string()
}

fn default_store_root() -> String {
    "./.locsync".to_string()
}

fn default_key_file() -> String {
    "./.translator-key".to_string()
}

fn default_batch_size() -> usize {
    100
}

impl Default for Config {
    fn default() -> Self {
        Self {
            source_locale: default_source_locale(),
            locales: Vec::new(),
            source_file: default_source_file(),
            bundle_root: default_bundle_root(),
            store_root: default_store_root(),
            key_file: default_key_file(),
            region: None,
            batch_size: default_batch_size(),
        }
    }
}

impl Config {
    /// Validate configuration values.
    ///
    /// Checks locale codes, that the source locale is not also a target, and
    /// that the batch size is usable.
    pub fn validate(&self) -> Result<()> {
        validate_locale(&self.source_locale)
            .map_err(|msg| anyhow::anyhow!("invalid 'sourceLocale': {}", msg))?;
        for locale in &self.locales {
            validate_locale(locale)
                .map_err(|msg| anyhow::anyhow!("invalid entry in 'locales': {}", msg))?;
            if locale == &self.source_locale {
                anyhow::bail!(
                    "'locales' must not contain the source locale \"{}\"",
                    self.source_locale
                );
            }
        }
        if self.batch_size == 0 {
            anyhow::bail!("'batchSize' must be at least 1");
        }
        Ok(())
    }
}

pub fn default_config_json() -> Result<String> {
    let config = Config::default();
    serde_json::to_string_pretty(&config).context("Failed to generate default config.")
}

pub fn find_config_file(start_dir: &Path) -> Option<PathBuf> {
    let mut current = start_dir.to_path_buf();

    loop {
        let config_path = current.join(CONFIG_FILE_NAME);
        if config_path.exists() {
            return Some(config_path);
        }
        if current.join(".git").exists() {
            return None;
        }
        if !current.pop() {
            return None;
        }
    }
}

/// Result of loading configuration.
pub struct ConfigLoadResult {
    pub config: Config,
    /// Directory the config file was found in; paths in the config resolve
    /// relative to it. Falls back to the start directory.
    pub root: PathBuf,
    /// True if config was loaded from a file, false if using defaults.
    pub from_file: bool,
}

impl ConfigLoadResult {
    pub fn resolve(&self, configured: &str) -> PathBuf {
        let path = Path::new(configured);
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.root.join(path)
        }
    }
}

pub fn load_config(start_dir: &Path) -> Result<ConfigLoadResult> {
    match find_config_file(start_dir) {
        Some(path) => {
            let content = fs::read_to_string(&path)?;
            let config: Config = serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse config file: {:?}", path))?;
            config.validate()?;
            let root = path
                .parent()
                .map(Path::to_path_buf)
                .unwrap_or_else(|| start_dir.to_path_buf());
            Ok(ConfigLoadResult {
                config,
                root,
                from_file: true,
            })
        }
        None => Ok(ConfigLoadResult {
            config: Config::default(),
            root: start_dir.to_path_buf(),
            from_file: false,
        }),
    }
}
