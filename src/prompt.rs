//! Interactive confirmation abstraction.
//!
//! Backup decisions may need a yes/no answer from the user. The [`Confirm`]
//! trait keeps that blocking terminal read out of the reconciliation core so
//! automated tests can supply canned answers instead of driving a real input
//! stream.

use std::io::{BufRead as _, Write as _};

use crate::logging::Log;

/// A collaborator that can answer yes/no questions.
pub trait Confirm: Send + Sync + std::fmt::Debug {
    /// Ask the user a yes/no question and block until answered.
    ///
    /// When no interactive channel is available the implementation must
    /// return the documented default `true` (create a backup) rather than
    /// blocking indefinitely, and report a warning.
    fn ask_yes_no(&self, prompt: &str) -> bool;
}

/// Production [`Confirm`] implementation that prompts on the terminal.
///
/// Reads one line from stdin per question. On EOF or a read error (no
/// interactive channel) it emits a warning through the logger and answers
/// `true`, so displaced content is backed up, never silently deleted.
pub struct TerminalPrompt<'a> {
    log: &'a dyn Log,
}

impl std::fmt::Debug for TerminalPrompt<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TerminalPrompt").finish()
    }
}

impl<'a> TerminalPrompt<'a> {
    /// Create a prompt that reports fallback warnings through `log`.
    #[must_use]
    pub const fn new(log: &'a dyn Log) -> Self {
        Self { log }
    }
}

impl Confirm for TerminalPrompt<'_> {
    fn ask_yes_no(&self, prompt: &str) -> bool {
        print!("{prompt} [Y/n]: ");
        std::io::stdout().flush().ok();

        let mut answer = String::new();
        match std::io::stdin().lock().read_line(&mut answer) {
            Ok(n) if n > 0 => {
                let answer = answer.trim().to_lowercase();
                answer.is_empty() || answer == "y" || answer == "yes"
            }
            _ => {
                // EOF or broken stdin: no interactive channel.
                self.log
                    .warn("no input received, defaulting to creating a backup");
                true
            }
        }
    }
}

/// Test [`Confirm`] implementation returning a fixed answer.
#[cfg(test)]
#[derive(Debug)]
pub struct CannedConfirm {
    answer: bool,
    asked: std::sync::atomic::AtomicUsize,
}

#[cfg(test)]
impl CannedConfirm {
    /// Create a confirm stub that always answers `answer`.
    #[must_use]
    pub const fn new(answer: bool) -> Self {
        Self {
            answer,
            asked: std::sync::atomic::AtomicUsize::new(0),
        }
    }

    /// Number of questions asked so far.
    #[must_use]
    pub fn asked(&self) -> usize {
        self.asked.load(std::sync::atomic::Ordering::SeqCst)
    }
}

#[cfg(test)]
impl Confirm for CannedConfirm {
    fn ask_yes_no(&self, _prompt: &str) -> bool {
        self.asked
            .fetch_add(1, std::sync::atomic::Ordering::SeqCst);
        self.answer
    }
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn canned_confirm_returns_fixed_answer() {
        let yes = CannedConfirm::new(true);
        let no = CannedConfirm::new(false);
        assert!(yes.ask_yes_no("backup?"));
        assert!(!no.ask_yes_no("backup?"));
    }

    #[test]
    fn canned_confirm_counts_questions() {
        let confirm = CannedConfirm::new(true);
        assert_eq!(confirm.asked(), 0);
        confirm.ask_yes_no("one");
        confirm.ask_yes_no("two");
        assert_eq!(confirm.asked(), 2);
    }
}
