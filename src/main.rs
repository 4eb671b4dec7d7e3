//! `dotlink` binary entry point.

use anyhow::Result;
use clap::Parser as _;

use dotlink_cli::cli::{Cli, Command};
use dotlink_cli::commands;
use dotlink_cli::logging::{init_subscriber, Logger};

fn main() -> Result<()> {
    let _ = enable_ansi_support::enable_ansi_support();
    let args = Cli::parse();

    let command_name = match args.command {
        Command::Link(_) => "link",
        Command::Status(_) => "status",
        Command::Version => {
            let version = option_env!("DOTLINK_VERSION").unwrap_or(env!("CARGO_PKG_VERSION"));
            println!("dotlink {version}");
            return Ok(());
        }
    };

    init_subscriber(args.verbose, command_name);
    let log = Logger::new(command_name);

    // A mid-run interrupt leaves at most one mapping partially handled; the
    // backup slot survives, so a rerun picks up cleanly.
    ctrlc::set_handler(|| {
        eprintln!();
        eprintln!("interrupted");
        std::process::exit(130);
    })?;

    match args.command {
        Command::Link(opts) => commands::link::run(&args.global, &opts, &log),
        Command::Status(opts) => commands::status::run(&args.global, &opts, &log),
        Command::Version => Ok(()),
    }
}
