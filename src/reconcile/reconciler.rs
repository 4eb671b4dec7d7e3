//! Single-mapping reconciliation: the backup/link/restore state machine.

use std::path::Path;

use crate::error::LinkErrorKind;
use crate::logging::Log;
use crate::operations::FileSystemOps;
use crate::prompt::Confirm;

use super::backup::{backup_path, rotate_slot, BackupDecision, BackupPolicy};
use super::classifier::classify;
use super::{DestinationState, LinkMapping, ReconcileOutcome};

/// Drives one mapping from its current destination state to the desired
/// symlink.
///
/// Synchronous and single-threaded; each call runs the full sequence
/// (canonicalise, classify, clear, link) from scratch and carries no state
/// between calls. Failures are reported through the injected log and
/// returned as a [`ReconcileOutcome`], never raised.
#[derive(Debug)]
pub struct Reconciler<'a> {
    fs: &'a dyn FileSystemOps,
    policy: BackupPolicy,
    confirm: &'a dyn Confirm,
    log: &'a dyn Log,
}

impl<'a> Reconciler<'a> {
    /// Create a reconciler with its injected collaborators.
    #[must_use]
    pub const fn new(
        fs: &'a dyn FileSystemOps,
        policy: BackupPolicy,
        confirm: &'a dyn Confirm,
        log: &'a dyn Log,
    ) -> Self {
        Self {
            fs,
            policy,
            confirm,
            log,
        }
    }

    /// Reconcile one mapping.
    ///
    /// The sequence: resolve the source to canonical form, classify the
    /// destination, short-circuit if already correct, clear a conflicting
    /// destination (backup or discard per policy), create the symlink, and
    /// restore the backup if link creation fails after the destination was
    /// cleared.
    #[must_use]
    pub fn reconcile(&self, mapping: &LinkMapping) -> ReconcileOutcome {
        let destination = &mapping.destination;

        let Ok(canonical_source) = dunce::canonicalize(&mapping.source) else {
            self.log.error(&format!(
                "source does not exist: {}",
                mapping.source.display()
            ));
            return ReconcileOutcome::Failed(LinkErrorKind::SourceMissing);
        };

        let state = classify(destination, &canonical_source);
        if state == DestinationState::CorrectLink {
            self.log
                .debug(&format!("already linked: {}", destination.display()));
            return ReconcileOutcome::AlreadyCorrect;
        }

        let mut backup_slot = None;
        if state.is_conflict() {
            match self
                .policy
                .resolve(destination, state, self.confirm, self.log)
            {
                BackupDecision::Backup => {
                    let slot = backup_path(destination);
                    if let Err(err) = rotate_slot(self.fs, &slot)
                        .and_then(|()| self.fs.rename(destination, &slot))
                    {
                        self.log.error(&format!(
                            "could not back up {}: {err}",
                            destination.display()
                        ));
                        return ReconcileOutcome::Failed(LinkErrorKind::DestinationNotClear);
                    }
                    self.log
                        .info(&format!("Created backup: {}", slot.display()));
                    backup_slot = Some(slot);
                }
                BackupDecision::Discard => {
                    if let Err(err) = self.discard(destination, state) {
                        self.log.error(&format!(
                            "could not remove {}: {err}",
                            destination.display()
                        ));
                        return ReconcileOutcome::Failed(LinkErrorKind::DestinationNotClear);
                    }
                }
            }
        }

        match self.fs.symlink(&canonical_source, destination) {
            Ok(()) => {
                self.log.success(&format!(
                    "Created symlink: {} -> {}",
                    destination.display(),
                    canonical_source.display()
                ));
                ReconcileOutcome::Created
            }
            Err(err) => {
                self.log.error(&format!(
                    "could not create symlink {}: {err}",
                    destination.display()
                ));
                self.recover(destination, backup_slot.as_deref())
            }
        }
    }

    /// Remove a conflicting destination without preserving it. A real
    /// directory needs recursive removal; everything else is a single unlink.
    fn discard(&self, destination: &Path, state: DestinationState) -> std::io::Result<()> {
        if state == DestinationState::Directory {
            self.fs.remove_dir_all(destination)
        } else {
            self.fs.remove_file(destination)
        }
    }

    /// After a failed link creation, put the backup back where it came from
    /// (if one was taken).
    fn recover(&self, destination: &Path, slot: Option<&Path>) -> ReconcileOutcome {
        let Some(slot) = slot else {
            return ReconcileOutcome::Failed(LinkErrorKind::LinkCreationFailed);
        };

        self.log.info(&format!(
            "restoring backup to {}",
            destination.display()
        ));
        match self.fs.rename(slot, destination) {
            Ok(()) => ReconcileOutcome::Restored,
            Err(err) => {
                self.log.error(&format!(
                    "could not restore backup, content remains at {}: {err}",
                    slot.display()
                ));
                ReconcileOutcome::Failed(LinkErrorKind::DoubleFault)
            }
        }
    }
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use std::path::PathBuf;

    use super::*;
    use crate::operations::{FaultyFileSystemOps, SystemFileSystemOps};
    use crate::prompt::CannedConfirm;
    use crate::reconcile::test_helpers::RecordingLog;

    struct Fixture {
        tmp: tempfile::TempDir,
        source: PathBuf,
        destination: PathBuf,
    }

    impl Fixture {
        fn new() -> Self {
            let tmp = tempfile::tempdir().expect("create temp dir");
            let source = tmp.path().join("links/zshrc");
            std::fs::create_dir_all(source.parent().unwrap()).unwrap();
            std::fs::write(&source, "export EDITOR=vim\n").unwrap();
            let destination = tmp.path().join("home/.zshrc");
            std::fs::create_dir_all(destination.parent().unwrap()).unwrap();
            Self {
                tmp,
                source,
                destination,
            }
        }

        fn mapping(&self) -> LinkMapping {
            LinkMapping::new(self.source.clone(), self.destination.clone())
        }

        fn slot(&self) -> PathBuf {
            self.tmp.path().join("home/.zshrc.bak")
        }
    }

    fn reconcile_with(
        fs: &dyn FileSystemOps,
        fixture: &Fixture,
        answer: bool,
        log: &RecordingLog,
    ) -> ReconcileOutcome {
        let confirm = CannedConfirm::new(answer);
        let reconciler = Reconciler::new(fs, BackupPolicy::default(), &confirm, log);
        reconciler.reconcile(&fixture.mapping())
    }

    #[test]
    fn reconciler_is_debug_formattable() {
        let confirm = CannedConfirm::new(true);
        let log = RecordingLog::new();
        let reconciler =
            Reconciler::new(&SystemFileSystemOps, BackupPolicy::default(), &confirm, &log);
        assert!(format!("{reconciler:?}").contains("Reconciler"));
    }

    #[cfg(unix)]
    #[test]
    fn absent_destination_is_linked() {
        let fixture = Fixture::new();
        let log = RecordingLog::new();

        let outcome = reconcile_with(&SystemFileSystemOps, &fixture, true, &log);

        assert_eq!(outcome, ReconcileOutcome::Created);
        let resolved = dunce::canonicalize(&fixture.destination).unwrap();
        assert_eq!(resolved, dunce::canonicalize(&fixture.source).unwrap());
        assert_eq!(log.messages_at("success").len(), 1);
    }

    #[cfg(unix)]
    #[test]
    fn second_run_is_already_correct() {
        let fixture = Fixture::new();
        let log = RecordingLog::new();

        assert_eq!(
            reconcile_with(&SystemFileSystemOps, &fixture, true, &log),
            ReconcileOutcome::Created
        );
        assert_eq!(
            reconcile_with(&SystemFileSystemOps, &fixture, true, &log),
            ReconcileOutcome::AlreadyCorrect
        );
        assert!(
            !fixture.slot().exists(),
            "an idempotent rerun must not create a backup"
        );
    }

    #[test]
    fn missing_source_fails_without_touching_destination() {
        let fixture = Fixture::new();
        std::fs::write(&fixture.destination, "precious").unwrap();
        std::fs::remove_file(&fixture.source).unwrap();
        let log = RecordingLog::new();

        let outcome = reconcile_with(&SystemFileSystemOps, &fixture, true, &log);

        assert_eq!(
            outcome,
            ReconcileOutcome::Failed(LinkErrorKind::SourceMissing)
        );
        assert_eq!(
            std::fs::read_to_string(&fixture.destination).unwrap(),
            "precious"
        );
        assert!(!fixture.slot().exists());
        assert_eq!(log.messages_at("error").len(), 1);
    }

    #[cfg(unix)]
    #[test]
    fn regular_file_is_backed_up_on_yes() {
        let fixture = Fixture::new();
        std::fs::write(&fixture.destination, "old rc").unwrap();
        let log = RecordingLog::new();

        let outcome = reconcile_with(&SystemFileSystemOps, &fixture, true, &log);

        assert_eq!(outcome, ReconcileOutcome::Created);
        assert_eq!(std::fs::read_to_string(fixture.slot()).unwrap(), "old rc");
        assert!(fixture.destination.symlink_metadata().unwrap().is_symlink());
    }

    #[cfg(unix)]
    #[test]
    fn regular_file_is_discarded_on_no() {
        let fixture = Fixture::new();
        std::fs::write(&fixture.destination, "old rc").unwrap();
        let log = RecordingLog::new();

        let outcome = reconcile_with(&SystemFileSystemOps, &fixture, false, &log);

        assert_eq!(outcome, ReconcileOutcome::Created);
        assert!(!fixture.slot().exists(), "no backup was requested");
        assert!(fixture.destination.symlink_metadata().unwrap().is_symlink());
    }

    #[cfg(unix)]
    #[test]
    fn directory_destination_is_backed_up_whole() {
        let fixture = Fixture::new();
        std::fs::create_dir(&fixture.destination).unwrap();
        std::fs::write(fixture.destination.join("nested"), "x").unwrap();
        let log = RecordingLog::new();

        let outcome = reconcile_with(&SystemFileSystemOps, &fixture, true, &log);

        assert_eq!(outcome, ReconcileOutcome::Created);
        assert_eq!(
            std::fs::read_to_string(fixture.slot().join("nested")).unwrap(),
            "x"
        );
    }

    #[cfg(unix)]
    #[test]
    fn stale_backup_is_rotated_not_nested() {
        let fixture = Fixture::new();
        std::fs::write(&fixture.destination, "new content").unwrap();
        std::fs::write(fixture.slot(), "stale backup").unwrap();
        let log = RecordingLog::new();

        let outcome = reconcile_with(&SystemFileSystemOps, &fixture, true, &log);

        assert_eq!(outcome, ReconcileOutcome::Created);
        assert_eq!(
            std::fs::read_to_string(fixture.slot()).unwrap(),
            "new content"
        );
        let nested = fixture.tmp.path().join("home/.zshrc.bak.bak");
        assert!(!nested.exists(), "backups must never nest");
    }

    #[cfg(unix)]
    #[test]
    fn dangling_symlink_is_a_conflict() {
        let fixture = Fixture::new();
        std::os::unix::fs::symlink(fixture.tmp.path().join("gone"), &fixture.destination)
            .unwrap();
        let log = RecordingLog::new();

        let outcome = reconcile_with(&SystemFileSystemOps, &fixture, false, &log);

        assert_eq!(outcome, ReconcileOutcome::Created);
        let resolved = dunce::canonicalize(&fixture.destination).unwrap();
        assert_eq!(resolved, dunce::canonicalize(&fixture.source).unwrap());
    }

    #[cfg(unix)]
    #[test]
    fn wrong_symlink_is_replaced() {
        let fixture = Fixture::new();
        let other = fixture.tmp.path().join("other");
        std::fs::write(&other, "y").unwrap();
        std::os::unix::fs::symlink(&other, &fixture.destination).unwrap();
        let log = RecordingLog::new();

        let outcome = reconcile_with(&SystemFileSystemOps, &fixture, false, &log);

        assert_eq!(outcome, ReconcileOutcome::Created);
        let resolved = dunce::canonicalize(&fixture.destination).unwrap();
        assert_eq!(resolved, dunce::canonicalize(&fixture.source).unwrap());
    }

    #[test]
    fn failed_removal_leaves_destination_intact() {
        let fixture = Fixture::new();
        std::fs::write(&fixture.destination, "locked").unwrap();
        let fs = FaultyFileSystemOps::new().failing_remove();
        let log = RecordingLog::new();

        let outcome = reconcile_with(&fs, &fixture, false, &log);

        assert_eq!(
            outcome,
            ReconcileOutcome::Failed(LinkErrorKind::DestinationNotClear)
        );
        assert_eq!(
            std::fs::read_to_string(&fixture.destination).unwrap(),
            "locked"
        );
    }

    #[test]
    fn failed_backup_rename_leaves_destination_intact() {
        let fixture = Fixture::new();
        std::fs::write(&fixture.destination, "locked").unwrap();
        let fs = FaultyFileSystemOps::new().failing_rename_from(&fixture.destination);
        let log = RecordingLog::new();

        let outcome = reconcile_with(&fs, &fixture, true, &log);

        assert_eq!(
            outcome,
            ReconcileOutcome::Failed(LinkErrorKind::DestinationNotClear)
        );
        assert_eq!(
            std::fs::read_to_string(&fixture.destination).unwrap(),
            "locked"
        );
        assert!(!fixture.slot().exists());
    }

    #[test]
    fn link_failure_after_backup_restores_the_original() {
        let fixture = Fixture::new();
        std::fs::write(&fixture.destination, "old rc").unwrap();
        let fs = FaultyFileSystemOps::new().failing_symlink();
        let log = RecordingLog::new();

        let outcome = reconcile_with(&fs, &fixture, true, &log);

        assert_eq!(outcome, ReconcileOutcome::Restored);
        assert_eq!(
            outcome.error_kind(),
            Some(LinkErrorKind::LinkCreationFailed)
        );
        assert_eq!(
            std::fs::read_to_string(&fixture.destination).unwrap(),
            "old rc"
        );
        assert!(!fixture.slot().exists(), "slot was renamed back");
    }

    #[test]
    fn link_failure_without_backup_is_plain_failure() {
        let fixture = Fixture::new();
        let fs = FaultyFileSystemOps::new().failing_symlink();
        let log = RecordingLog::new();

        let outcome = reconcile_with(&fs, &fixture, true, &log);

        assert_eq!(
            outcome,
            ReconcileOutcome::Failed(LinkErrorKind::LinkCreationFailed)
        );
    }

    #[test]
    fn double_fault_preserves_content_in_the_slot() {
        let fixture = Fixture::new();
        std::fs::write(&fixture.destination, "old rc").unwrap();
        let fs = FaultyFileSystemOps::new()
            .failing_symlink()
            .failing_rename_from(fixture.slot());
        let log = RecordingLog::new();

        let outcome = reconcile_with(&fs, &fixture, true, &log);

        assert_eq!(
            outcome,
            ReconcileOutcome::Failed(LinkErrorKind::DoubleFault)
        );
        assert_eq!(
            std::fs::read_to_string(fixture.slot()).unwrap(),
            "old rc",
            "displaced content must survive in the slot"
        );
        let errors = log.messages_at("error");
        assert!(
            errors.iter().any(|m| m.contains(".zshrc.bak")),
            "the error must name the slot path, got: {errors:?}"
        );
    }
}
