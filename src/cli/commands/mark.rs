use anyhow::Result;

use super::super::{args::MarkCommand, exit_status::ExitStatus, report};
use crate::config::load_config;
use crate::store::{MarkError, Store};

pub fn mark(cmd: MarkCommand) -> Result<ExitStatus> {
    let args = cmd.args;
    let loaded = load_config(&args.common.path)?;
    let store = Store::open(loaded.resolve(&loaded.config.store_root));

    let mut marked = 0;
    let mut missing = 0;
    for key in &args.keys {
        match store.mark_manual(&args.locale, key) {
            Ok(()) => marked += 1,
            Err(MarkError::NotFound { .. }) => {
                missing += 1;
                report::print_mark_missing(key, &args.locale);
            }
            Err(MarkError::Store(err)) => return Err(err.into()),
        }
    }

    report::print_mark_summary(marked, missing, &args.locale);
    Ok(if missing > 0 {
        ExitStatus::Failure
    } else {
        ExitStatus::Success
    })
}
