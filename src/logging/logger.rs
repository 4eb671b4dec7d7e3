//! Structured logger with run-summary collection.
use std::path::PathBuf;
use std::sync::Mutex;

use super::types::{Log, MappingEntry, MappingStatus};
use super::utils::log_file_path;

/// Implement the display methods of [`Log`] by delegating to inherent methods
/// of the same name on the implementing type.
///
/// `record_mapping` is **not** included because its signature differs from
/// the `fn(&self, &str)` pattern shared by the display methods.
macro_rules! forward_log_methods {
    ($($method:ident),+ $(,)?) => {
        $(
            fn $method(&self, msg: &str) {
                self.$method(msg);
            }
        )+
    };
}

/// Structured logger with summary collection.
///
/// All messages are also written to a persistent log file at
/// `$XDG_CACHE_HOME/dotlink/<command>.log` (default `~/.cache/dotlink/<command>.log`)
/// with timestamps and ANSI codes stripped, regardless of the verbose flag.
#[derive(Debug)]
pub struct Logger {
    entries: Mutex<Vec<MappingEntry>>,
    log_file: Option<PathBuf>,
}

impl Logger {
    /// Create a new logger.
    ///
    /// Stores the log file path for display in the run summary. The log file
    /// itself is created and initialised by
    /// [`init_subscriber`](super::subscriber::init_subscriber); this
    /// constructor does not write to the file.
    #[must_use]
    pub fn new(command: &str) -> Self {
        Self {
            entries: Mutex::new(Vec::new()),
            log_file: log_file_path(command),
        }
    }

    /// Log an error message.
    pub fn error(&self, msg: &str) {
        tracing::error!("{msg}");
    }

    /// Log a warning message.
    pub fn warn(&self, msg: &str) {
        tracing::warn!("{msg}");
    }

    /// Log a stage header (major section).
    pub fn stage(&self, msg: &str) {
        tracing::info!(target: "dotlink::stage", "{msg}");
    }

    /// Log a success message.
    pub fn success(&self, msg: &str) {
        tracing::info!(target: "dotlink::success", "{msg}");
    }

    /// Log an informational message.
    pub fn info(&self, msg: &str) {
        tracing::info!("{msg}");
    }

    /// Log a debug message (suppressed on console unless verbose; always
    /// written to the log file).
    pub fn debug(&self, msg: &str) {
        tracing::debug!("{msg}");
    }

    /// Log a dry-run action message.
    pub fn dry_run(&self, msg: &str) {
        tracing::info!(target: "dotlink::dry_run", "{msg}");
    }

    /// Record a mapping result for the summary.
    pub fn record_mapping(&self, name: &str, status: MappingStatus, message: Option<&str>) {
        if let Ok(mut guard) = self.entries.lock() {
            guard.push(MappingEntry {
                name: name.to_string(),
                status,
                message: message.map(String::from),
            });
        }
    }

    /// Return `true` if any recorded mapping failed.
    #[must_use]
    pub fn has_failures(&self) -> bool {
        self.failure_count() > 0
    }

    /// Count the number of failed mappings.
    #[must_use]
    pub fn failure_count(&self) -> usize {
        self.entries.lock().map_or(0, |guard| {
            guard.iter().filter(|e| e.status.is_failure()).count()
        })
    }

    /// Return the destinations whose mappings double-faulted.
    ///
    /// These are surfaced again after the summary: they are the one case
    /// where displaced content no longer lives at its original path.
    #[must_use]
    pub fn double_faults(&self) -> Vec<String> {
        self.entries.lock().map_or_else(
            |_| Vec::new(),
            |guard| {
                guard
                    .iter()
                    .filter(|e| e.status == MappingStatus::DoubleFault)
                    .map(|e| e.name.clone())
                    .collect()
            },
        )
    }

    /// Return a clone of all recorded mapping entries (test-only).
    #[cfg(test)]
    pub(crate) fn mapping_entries(&self) -> Vec<MappingEntry> {
        self.entries.lock().map_or_else(|_| vec![], |g| g.clone())
    }

    /// Print the summary of all recorded mappings.
    pub fn print_summary(&self) {
        let Ok(guard) = self.entries.lock() else {
            return;
        };
        let entries = guard.clone();
        drop(guard);
        if entries.is_empty() {
            return;
        }

        println!();
        self.stage("Summary");

        let mut created = 0u32;
        let mut correct = 0u32;
        let mut dry_run = 0u32;
        let mut pending = 0u32;
        let mut failed = 0u32;

        for entry in &entries {
            let (icon, color) = match entry.status {
                MappingStatus::Created => {
                    created += 1;
                    ("✓", "\x1b[32m")
                }
                MappingStatus::AlreadyCorrect => {
                    correct += 1;
                    ("·", "\x1b[2m")
                }
                MappingStatus::DryRun => {
                    dry_run += 1;
                    ("~", "\x1b[37m")
                }
                MappingStatus::Pending => {
                    pending += 1;
                    ("○", "\x1b[33m")
                }
                MappingStatus::Restored => {
                    failed += 1;
                    ("↩", "\x1b[33m")
                }
                MappingStatus::Failed => {
                    failed += 1;
                    ("✗", "\x1b[31m")
                }
                MappingStatus::DoubleFault => {
                    failed += 1;
                    ("✗✗", "\x1b[1;31m")
                }
            };

            let suffix = entry
                .message
                .as_ref()
                .map_or_else(String::new, |msg| format!(" ({msg})"));

            self.info(&format!("{color}{icon} {}{suffix}\x1b[0m", entry.name));
        }

        println!();
        let total = created + correct + dry_run + pending + failed;
        self.info(&format!(
            "{total} links: \x1b[32m{created} created\x1b[0m, \x1b[2m{correct} already ok\x1b[0m, \x1b[37m{dry_run} dry-run\x1b[0m, \x1b[33m{pending} pending\x1b[0m, \x1b[31m{failed} failed\x1b[0m"
        ));

        if let Some(path) = &self.log_file {
            self.info(&format!("\x1b[2mlog: {}\x1b[0m", path.display()));
        }
    }
}

impl Log for Logger {
    forward_log_methods!(stage, success, info, debug, warn, error, dry_run);

    fn record_mapping(&self, name: &str, status: MappingStatus, message: Option<&str>) {
        self.record_mapping(name, status, message);
    }
}
