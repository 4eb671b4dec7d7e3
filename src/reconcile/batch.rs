//! Ordered, best-effort reconciliation of a whole mapping list.

use crate::error::LinkErrorKind;
use crate::logging::{Log, MappingStatus};
use crate::operations::FileSystemOps;
use crate::prompt::Confirm;

use super::backup::BackupPolicy;
use super::classifier::classify;
use super::{DestinationState, LinkMapping, Reconciler};

/// Applies a list of mappings in declared order.
///
/// One mapping failing never stops the batch: every mapping is attempted,
/// each outcome is recorded on the log's summary, and the aggregate result
/// says whether the whole batch succeeded.
#[derive(Debug)]
pub struct BatchOrchestrator<'a> {
    fs: &'a dyn FileSystemOps,
    policy: BackupPolicy,
    confirm: &'a dyn Confirm,
    log: &'a dyn Log,
    dry_run: bool,
}

impl<'a> BatchOrchestrator<'a> {
    /// Create an orchestrator with its injected collaborators.
    #[must_use]
    pub const fn new(
        fs: &'a dyn FileSystemOps,
        policy: BackupPolicy,
        confirm: &'a dyn Confirm,
        log: &'a dyn Log,
        dry_run: bool,
    ) -> Self {
        Self {
            fs,
            policy,
            confirm,
            log,
            dry_run,
        }
    }

    /// Apply every mapping in order. Returns `true` only if no mapping
    /// failed.
    #[must_use]
    pub fn apply(&self, mappings: &[LinkMapping]) -> bool {
        let reconciler = Reconciler::new(self.fs, self.policy, self.confirm, self.log);
        let mut all_ok = true;

        for mapping in mappings {
            if self.dry_run {
                if !self.preview(mapping) {
                    all_ok = false;
                }
                continue;
            }

            if !self.ensure_parent(mapping) {
                all_ok = false;
                continue;
            }

            let outcome = reconciler.reconcile(mapping);
            let message = outcome.error_kind().map(|kind| kind.to_string());
            self.log.record_mapping(
                &mapping.destination.display().to_string(),
                outcome.status(),
                message.as_deref(),
            );
            if outcome.is_failure() {
                all_ok = false;
            }
        }

        all_ok
    }

    /// Report what a real run would do, touching nothing. Returns `false`
    /// when the mapping would fail (missing source), so the preview aggregate
    /// matches a real run's.
    fn preview(&self, mapping: &LinkMapping) -> bool {
        let name = mapping.destination.display().to_string();

        let Ok(canonical) = dunce::canonicalize(&mapping.source) else {
            self.log.warn(&format!(
                "source does not exist: {}",
                mapping.source.display()
            ));
            self.log.record_mapping(
                &name,
                MappingStatus::Failed,
                Some(&LinkErrorKind::SourceMissing.to_string()),
            );
            return false;
        };

        let state = classify(&mapping.destination, &canonical);
        if state == DestinationState::CorrectLink {
            self.log.debug(&format!("already linked: {name}"));
            self.log
                .record_mapping(&name, MappingStatus::AlreadyCorrect, None);
        } else {
            self.log.dry_run(&format!(
                "would link {name} -> {} ({})",
                canonical.display(),
                state.describe()
            ));
            self.log.record_mapping(&name, MappingStatus::DryRun, None);
        }
        true
    }

    /// Create the destination's parent directory if it is missing.
    ///
    /// A parent that cannot be created counts as the destination not being
    /// clear for linking; the mapping is recorded as failed and the batch
    /// moves on.
    fn ensure_parent(&self, mapping: &LinkMapping) -> bool {
        let Some(parent) = mapping.destination.parent() else {
            return true;
        };
        if parent.as_os_str().is_empty() || parent.exists() {
            return true;
        }

        if let Err(err) = self.fs.create_dir_all(parent) {
            self.log.error(&format!(
                "could not create parent directory {}: {err}",
                parent.display()
            ));
            self.log.record_mapping(
                &mapping.destination.display().to_string(),
                MappingStatus::Failed,
                Some(&LinkErrorKind::DestinationNotClear.to_string()),
            );
            return false;
        }
        true
    }
}
