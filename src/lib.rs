//! Symlink reconciliation engine for personal machine configuration.
//!
//! Reconciles a declared set of source→destination pairs (from
//! `conf/links.toml`) into real filesystem symlinks, displacing whatever is
//! already at a destination into a deterministic `.bak` sibling and rolling
//! the displacement back if link creation fails.
//!
//! The public API is organised into four layers:
//!
//! - **[`config`]** — parse the link manifest and derive destinations
//! - **[`reconcile`]** — the core state machine: classify, back up, link, restore
//! - **[`commands`]** — top-level subcommand orchestration (`link`, `status`)
//! - **[`logging`]** / **[`prompt`]** / **[`operations`]** — injected collaborators
#![deny(clippy::or_fun_call)]
#![deny(clippy::bool_to_int_with_if)]

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod logging;
pub mod operations;
pub mod prompt;
pub mod reconcile;
