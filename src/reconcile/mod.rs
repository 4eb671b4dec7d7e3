//! The symlink reconciliation engine.
//!
//! One [`LinkMapping`] at a time, [`Reconciler`] classifies the destination
//! ([`classifier`]), decides whether to preserve displaced content
//! ([`backup`]), performs the replacement, and restores the backup if link
//! creation fails. [`BatchOrchestrator`] drives an ordered sequence of
//! mappings with best-effort semantics.
//!
//! Mappings and the derived states are transient: everything is recomputed
//! on each call, and the only durable artifact beyond the links themselves
//! is the backup file.

pub mod backup;
pub mod batch;
pub mod classifier;
pub mod reconciler;

pub use backup::{BackupDecision, BackupOverride, BackupPolicy};
pub use batch::BatchOrchestrator;
pub use reconciler::Reconciler;

use std::path::PathBuf;

use crate::error::LinkErrorKind;
use crate::logging::MappingStatus;

/// A declared source→destination symlink pairing to reconcile.
///
/// The source is canonicalised by the reconciler before any comparison; the
/// destination is a filesystem path, possibly nonexistent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkMapping {
    /// Path the symlink should point at.
    pub source: PathBuf,
    /// Path the symlink should live at.
    pub destination: PathBuf,
}

impl LinkMapping {
    /// Create a new mapping.
    #[must_use]
    pub const fn new(source: PathBuf, destination: PathBuf) -> Self {
        Self {
            source,
            destination,
        }
    }
}

/// State of a destination path relative to its mapping's canonical source.
///
/// Derived purely from the destination's current filesystem state; computing
/// it has no side effects.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DestinationState {
    /// Nothing at the destination (not even a dangling symlink).
    Absent,
    /// A symlink resolving to the canonical source.
    CorrectLink,
    /// A symlink resolving somewhere else.
    WrongLink,
    /// A symlink whose target cannot be resolved. An expected, handled case.
    BrokenLink,
    /// A regular file (or other non-directory, non-symlink entry).
    RegularFile,
    /// A real directory (not a directory symlink).
    Directory,
}

impl DestinationState {
    /// Whether this state requires clearing the destination before linking.
    ///
    /// `Absent` needs no clearing and `CorrectLink` needs nothing at all;
    /// every other state is a conflict.
    #[must_use]
    pub const fn is_conflict(self) -> bool {
        !matches!(self, Self::Absent | Self::CorrectLink)
    }

    /// Short human-readable description for prompts and log lines.
    #[must_use]
    pub const fn describe(self) -> &'static str {
        match self {
            Self::Absent => "absent",
            Self::CorrectLink => "already linked",
            Self::WrongLink => "links elsewhere",
            Self::BrokenLink => "broken symlink",
            Self::RegularFile => "regular file",
            Self::Directory => "directory",
        }
    }
}

/// Terminal outcome of reconciling one mapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReconcileOutcome {
    /// Destination was already the desired symlink; nothing was touched.
    AlreadyCorrect,
    /// The desired symlink was created.
    Created,
    /// Link creation failed after a successful backup, and the backup was
    /// renamed back into place: the destination holds its pre-run content.
    Restored,
    /// The mapping failed; the kind says what and how recoverable it is.
    Failed(LinkErrorKind),
}

impl ReconcileOutcome {
    /// The failure kind, if this outcome is a failure.
    ///
    /// [`Restored`](Self::Restored) reports
    /// [`LinkCreationFailed`](LinkErrorKind::LinkCreationFailed): the link
    /// was never created even though the destination was left intact.
    #[must_use]
    pub const fn error_kind(self) -> Option<LinkErrorKind> {
        match self {
            Self::AlreadyCorrect | Self::Created => None,
            Self::Restored => Some(LinkErrorKind::LinkCreationFailed),
            Self::Failed(kind) => Some(kind),
        }
    }

    /// Whether this outcome counts against the batch aggregate.
    #[must_use]
    pub const fn is_failure(self) -> bool {
        self.error_kind().is_some()
    }

    /// Map the outcome onto a summary status.
    #[must_use]
    pub const fn status(self) -> MappingStatus {
        match self {
            Self::AlreadyCorrect => MappingStatus::AlreadyCorrect,
            Self::Created => MappingStatus::Created,
            Self::Restored => MappingStatus::Restored,
            Self::Failed(LinkErrorKind::DoubleFault) => MappingStatus::DoubleFault,
            Self::Failed(_) => MappingStatus::Failed,
        }
    }
}
