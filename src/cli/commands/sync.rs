use std::fs;

use anyhow::{Context, Result};

use super::super::{args::SyncCommand, exit_status::ExitStatus, report};
use crate::catalog::load_source_catalog;
use crate::config::{CONFIG_FILE_NAME, ConfigLoadResult, KEY_ENV_VAR, load_config};
use crate::diff::DeltaMode;
use crate::store::Store;
use crate::sync::{self, SyncOptions};
use crate::translate::{AzureTranslator, BatchOptions};

pub fn sync(cmd: SyncCommand) -> Result<ExitStatus> {
    let args = cmd.args;
    let loaded = load_config(&args.common.path)?;
    let config = &loaded.config;

    if config.locales.is_empty() {
        anyhow::bail!(
            "no target locales configured; add a \"locales\" list to {}",
            CONFIG_FILE_NAME
        );
    }
    let locales = if args.locales.is_empty() {
        config.locales.clone()
    } else {
        for locale in &args.locales {
            if !config.locales.contains(locale) {
                anyhow::bail!("locale \"{}\" is not in the configured locales", locale);
            }
        }
        args.locales.clone()
    };

    let source_path = loaded.resolve(&config.source_file);
    let incoming = load_source_catalog(&source_path)
        .with_context(|| format!("failed to load source catalog {}", source_path.display()))?;
    let store = Store::open(loaded.resolve(&config.store_root));

    let options = SyncOptions {
        source_locale: config.source_locale.clone(),
        locales,
        mode: if args.force {
            DeltaMode::ForceAll
        } else {
            DeltaMode::Changed
        },
        batch: BatchOptions {
            batch_size: config.batch_size,
            ..BatchOptions::default()
        },
        bundle_root: loaded.resolve(&config.bundle_root),
    };

    let plan = sync::plan(&store, &incoming, &options)?;
    if !plan.has_work() {
        report::print_no_changes(incoming.len());
        return Ok(ExitStatus::Success);
    }

    // The translator (and its credentials) are only needed once there is
    // actual work; a no-change run never gets here.
    let oracle = build_translator(&loaded)?;
    let outcome = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?
        .block_on(sync::execute(&store, &oracle, &plan, &options))?;

    report::print_sync_report(&outcome, args.common.verbose);
    Ok(if outcome.has_failures() {
        ExitStatus::Failure
    } else {
        ExitStatus::Success
    })
}

fn build_translator(loaded: &ConfigLoadResult) -> Result<AzureTranslator> {
    let key = match std::env::var(KEY_ENV_VAR) {
        Ok(key) if !key.trim().is_empty() => key,
        _ => {
            let path = loaded.resolve(&loaded.config.key_file);
            fs::read_to_string(&path).with_context(|| {
                format!(
                    "failed to read API key file {} (set {} to override)",
                    path.display(),
                    KEY_ENV_VAR
                )
            })?
        }
    };

    AzureTranslator::new(key.trim().to_string(), loaded.config.region.clone())
        .map_err(|err| anyhow::anyhow!("failed to initialize translator: {}", err))
}
