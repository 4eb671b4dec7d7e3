//! The `status` command: report the state of every declared symlink.

use anyhow::Result;

use crate::cli::{GlobalOpts, StatusOpts};
use crate::error::LinkErrorKind;
use crate::logging::{Logger, MappingStatus};
use crate::reconcile::classifier::classify;
use crate::reconcile::DestinationState;

use super::CommandSetup;

/// Run the status command. Pure inspection: nothing on disk changes.
///
/// # Errors
///
/// Returns an error if configuration loading fails or a declared source is
/// missing. Pending or conflicting links are reported, not treated as
/// command failure.
pub fn run(global: &GlobalOpts, _opts: &StatusOpts, log: &Logger) -> Result<()> {
    let setup = CommandSetup::init(global, log)?;

    log.stage("Checking symlinks");

    for mapping in setup.config.mappings() {
        let name = mapping.destination.display().to_string();

        let Ok(canonical) = dunce::canonicalize(&mapping.source) else {
            log.warn(&format!(
                "source does not exist: {}",
                mapping.source.display()
            ));
            log.record_mapping(
                &name,
                MappingStatus::Failed,
                Some(&LinkErrorKind::SourceMissing.to_string()),
            );
            continue;
        };

        let state = classify(&mapping.destination, &canonical);
        if state == DestinationState::CorrectLink {
            log.debug(&format!("{name}: {}", state.describe()));
            log.record_mapping(&name, MappingStatus::AlreadyCorrect, None);
        } else {
            log.info(&format!("{name}: {}", state.describe()));
            log.record_mapping(&name, MappingStatus::Pending, Some(state.describe()));
        }
    }

    log.print_summary();

    if log.has_failures() {
        anyhow::bail!("one or more declared sources are missing");
    }
    Ok(())
}
