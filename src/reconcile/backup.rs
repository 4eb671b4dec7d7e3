//! Backup policy: whether to preserve displaced content, and slot rotation.

use std::path::{Path, PathBuf};

use crate::logging::Log;
use crate::operations::FileSystemOps;
use crate::prompt::Confirm;

use super::DestinationState;

/// Batch-level override for the per-conflict backup question.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BackupOverride {
    /// Consult the confirmation collaborator per conflict.
    #[default]
    Ask,
    /// Always back up without asking.
    Always,
    /// Always discard without asking.
    Never,
}

/// What to do with a conflicting destination before linking.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackupDecision {
    /// Rename the destination into its backup slot.
    Backup,
    /// Remove the destination outright.
    Discard,
}

/// Decides whether displaced content is preserved.
#[derive(Debug, Clone, Copy, Default)]
pub struct BackupPolicy {
    force: BackupOverride,
}

impl BackupPolicy {
    /// Create a policy with the given batch-level override.
    #[must_use]
    pub const fn new(force: BackupOverride) -> Self {
        Self { force }
    }

    /// Resolve the backup decision for a conflicting destination.
    ///
    /// Only called for conflict states; `Absent` and `CorrectLink` never
    /// reach the policy. Without an override the confirmation collaborator
    /// is asked per conflict; its unavailable-channel default is backup,
    /// never silent deletion.
    #[must_use]
    pub fn resolve(
        self,
        destination: &Path,
        state: DestinationState,
        confirm: &dyn Confirm,
        log: &dyn Log,
    ) -> BackupDecision {
        debug_assert!(state.is_conflict());

        match self.force {
            BackupOverride::Always => BackupDecision::Backup,
            BackupOverride::Never => BackupDecision::Discard,
            BackupOverride::Ask => {
                let name = display_name(destination);
                log.debug(&format!("destination {name} is a {}", state.describe()));
                let prompt = format!("File {name} exists. Create backup to {name}.bak?");
                if confirm.ask_yes_no(&prompt) {
                    BackupDecision::Backup
                } else {
                    BackupDecision::Discard
                }
            }
        }
    }
}

/// The deterministic backup slot for a destination: the destination's own
/// name with a fixed `.bak` suffix, as a sibling path. No timestamp, so at
/// most one backup exists per destination.
#[must_use]
pub fn backup_path(destination: &Path) -> PathBuf {
    let name = destination
        .file_name()
        .map_or_else(|| "backup".into(), std::ffi::OsStr::to_os_string);
    let mut bak = name;
    bak.push(".bak");
    destination.with_file_name(bak)
}

/// Prune a pre-existing backup slot so the new backup never nests
/// (`X.bak.bak` is never created).
///
/// A real directory in the slot is removed recursively; anything else
/// (file, symlink, dangling symlink) is a single unlink. A vacant slot is a
/// no-op.
///
/// # Errors
///
/// Returns an error if the existing slot content cannot be removed.
pub fn rotate_slot(fs: &dyn FileSystemOps, slot: &Path) -> std::io::Result<()> {
    let Ok(meta) = slot.symlink_metadata() else {
        return Ok(());
    };
    if meta.is_dir() && !meta.is_symlink() {
        fs.remove_dir_all(slot)
    } else {
        fs.remove_file(slot)
    }
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map_or_else(|| path.display().to_string(), |n| n.to_string_lossy().into_owned())
}
