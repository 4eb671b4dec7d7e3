//! The `link` command: reconcile every declared symlink.

use anyhow::Result;

use crate::cli::{GlobalOpts, LinkOpts};
use crate::logging::Logger;
use crate::operations::SystemFileSystemOps;
use crate::prompt::TerminalPrompt;
use crate::reconcile::{BackupOverride, BackupPolicy, BatchOrchestrator};

use super::CommandSetup;

/// Run the link command.
///
/// # Errors
///
/// Returns an error if configuration loading fails or any mapping fails to
/// reconcile.
pub fn run(global: &GlobalOpts, opts: &LinkOpts, log: &Logger) -> Result<()> {
    let version = option_env!("DOTLINK_VERSION").unwrap_or(env!("CARGO_PKG_VERSION"));
    log.info(&format!("dotlink {version}"));

    let setup = CommandSetup::init(global, log)?;
    let mappings = setup.config.mappings();

    if global.dry_run {
        log.stage("Previewing symlinks");
    } else {
        log.stage("Reconciling symlinks");
    }

    let force = backup_override(opts);
    let fs = SystemFileSystemOps;
    let prompt = TerminalPrompt::new(log);
    let orchestrator =
        BatchOrchestrator::new(&fs, BackupPolicy::new(force), &prompt, log, global.dry_run);
    let all_ok = orchestrator.apply(&mappings);

    log.print_summary();

    // Double faults are the one case where displaced content no longer lives
    // at its original path; repeat them after the summary so they cannot be
    // missed.
    for name in log.double_faults() {
        log.error(&format!(
            "{name}: original content remains in its .bak backup slot"
        ));
    }

    if !all_ok {
        anyhow::bail!("one or more symlinks failed");
    }
    Ok(())
}

const fn backup_override(opts: &LinkOpts) -> BackupOverride {
    if opts.backup {
        BackupOverride::Always
    } else if opts.no_backup {
        BackupOverride::Never
    } else {
        BackupOverride::Ask
    }
}
