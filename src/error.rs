//! Per-mapping failure taxonomy for the reconciliation engine.
//!
//! Every failure kind here is terminal for a single mapping and never fatal
//! for the process on its own: the reconciler converts each into a
//! [`ReconcileOutcome`](crate::reconcile::ReconcileOutcome) plus a reporter
//! call, and the batch orchestrator aggregates a boolean that command
//! handlers map to a non-zero exit via [`anyhow::bail!`].

use thiserror::Error;

/// Why a single mapping failed to reconcile.
///
/// Ordered roughly by severity; [`DoubleFault`](Self::DoubleFault) is the
/// only kind after which the displaced content may no longer live at its
/// original path (it remains in the backup slot).
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkErrorKind {
    /// The canonical source path does not exist or cannot be resolved.
    /// The destination is never touched.
    #[error("source path does not exist")]
    SourceMissing,

    /// Backing up or removing the existing destination failed (permissions,
    /// locked file). The destination is left exactly as it was found.
    #[error("existing destination could not be backed up or removed")]
    DestinationNotClear,

    /// Symlink creation failed. If a backup had been taken it was restored;
    /// the original content is back at the destination path.
    #[error("symlink creation failed")]
    LinkCreationFailed,

    /// Both symlink creation and backup restoration failed. The displaced
    /// content survives only in the backup slot, not at its original path.
    #[error("symlink creation and backup restoration both failed")]
    DoubleFault,
}

impl LinkErrorKind {
    /// Whether this failure can leave the original content away from its
    /// original path.
    #[must_use]
    pub const fn is_double_fault(self) -> bool {
        matches!(self, Self::DoubleFault)
    }
}
