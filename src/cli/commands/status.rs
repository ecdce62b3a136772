use anyhow::Result;

use super::super::{args::StatusCommand, exit_status::ExitStatus, report};
use crate::config::load_config;
use crate::store::Store;

/// Per-locale counts shown by `locsync status`.
#[derive(Debug)]
pub struct StatusRow {
    pub locale: String,
    pub translated: usize,
    pub manual: usize,
    pub failed: usize,
}

pub fn status(cmd: StatusCommand) -> Result<ExitStatus> {
    let args = cmd.args;
    let loaded = load_config(&args.common.path)?;
    let store = Store::open(loaded.resolve(&loaded.config.store_root));

    let phrases = store.source_phrases()?;

    // Configured locales first, then any extra locales the store has tables
    // for (e.g. ones removed from the config).
    let mut locales = loaded.config.locales.clone();
    for locale in store.locales()? {
        if !locales.contains(&locale) {
            locales.push(locale);
        }
    }

    let mut rows = Vec::with_capacity(locales.len());
    for locale in locales {
        let translations = store.translations_for(&locale)?;
        let manual = translations.values().filter(|t| t.is_manual()).count();
        let failed = store.failed_keys(&locale)?.len();
        rows.push(StatusRow {
            locale,
            translated: translations.len(),
            manual,
            failed,
        });
    }

    report::print_status(phrases.len(), &rows);
    Ok(ExitStatus::Success)
}
