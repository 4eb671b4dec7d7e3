//! Core logging types: per-mapping entries, status, and the [`Log`] trait.

/// Recorded result of one reconciled mapping, for summary reporting.
#[derive(Debug, Clone)]
pub struct MappingEntry {
    /// Destination path (or another human-readable mapping name).
    pub name: String,
    /// Final status of the mapping.
    pub status: MappingStatus,
    /// Optional detail message (e.g., the failure kind).
    pub message: Option<String>,
}

/// Final status of one mapping in the run summary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MappingStatus {
    /// A new symlink was created.
    Created,
    /// The destination was already the desired symlink; nothing was touched.
    AlreadyCorrect,
    /// Dry-run preview; no change was applied.
    DryRun,
    /// Not yet the desired symlink; reported by read-only inspection.
    Pending,
    /// Link creation failed but the displaced content was restored.
    Restored,
    /// The mapping failed and was skipped.
    Failed,
    /// Link creation and backup restoration both failed; the displaced
    /// content survives only in the backup slot.
    DoubleFault,
}

impl MappingStatus {
    /// Whether this status counts against the overall batch result.
    #[must_use]
    pub const fn is_failure(self) -> bool {
        matches!(self, Self::Restored | Self::Failed | Self::DoubleFault)
    }
}

/// Abstraction over logging backends.
///
/// All methods are fire-and-forget: they never fail and return nothing the
/// core consumes. The reconciler and orchestrator only ever see this trait,
/// so tests can substitute a recording sink for the real [`Logger`].
pub trait Log: Send + Sync + std::fmt::Debug {
    /// Log a stage header (major section).
    fn stage(&self, msg: &str);
    /// Log a success message (green check on the console).
    fn success(&self, msg: &str);
    /// Log an informational message.
    fn info(&self, msg: &str);
    /// Log a debug message (may be suppressed on console).
    fn debug(&self, msg: &str);
    /// Log a warning message.
    fn warn(&self, msg: &str);
    /// Log an error message.
    fn error(&self, msg: &str);
    /// Log a dry-run action message.
    fn dry_run(&self, msg: &str);
    /// Record a mapping result for the summary.
    fn record_mapping(&self, name: &str, status: MappingStatus, message: Option<&str>);
}
