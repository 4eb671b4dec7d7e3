//! Command-line interface definitions.
use clap::{Parser, Subcommand};

/// Top-level CLI entry point for the symlink reconciliation engine.
#[derive(Parser, Debug)]
#[command(
    name = "dotlink",
    about = "Declarative symlink reconciliation for a personal machine",
    version
)]
pub struct Cli {
    /// Subcommand to run.
    #[command(subcommand)]
    pub command: Command,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Options shared across all subcommands.
    #[command(flatten)]
    pub global: GlobalOpts,
}

/// Options shared across all subcommands.
#[derive(Parser, Debug, Clone, Default)]
pub struct GlobalOpts {
    /// Override the dotfiles repository root directory
    #[arg(long, global = true)]
    pub root: Option<std::path::PathBuf>,

    /// Override the home directory links are created under
    #[arg(long, global = true)]
    pub home: Option<std::path::PathBuf>,

    /// Preview changes without applying
    #[arg(short = 'd', long, global = true)]
    pub dry_run: bool,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Reconcile all declared symlinks
    Link(LinkOpts),
    /// Report the state of every declared symlink without changing anything
    Status(StatusOpts),
    /// Print version information
    Version,
}

/// Options for the `link` subcommand.
#[derive(Parser, Debug, Clone, Default)]
pub struct LinkOpts {
    /// Always back up displaced destinations without prompting
    #[arg(long, conflicts_with = "no_backup")]
    pub backup: bool,

    /// Discard displaced destinations without prompting
    #[arg(long)]
    pub no_backup: bool,
}

/// Options for the `status` subcommand.
#[derive(Parser, Debug, Clone, Default)]
pub struct StatusOpts;
