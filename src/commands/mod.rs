//! Top-level subcommand orchestration and shared command setup.

pub mod link;
pub mod status;

use anyhow::Result;
use std::path::PathBuf;

use crate::cli::GlobalOpts;
use crate::config::Config;
use crate::logging::Logger;

/// Shared state produced by the common command setup sequence.
///
/// Encapsulates root and home resolution plus configuration loading so that
/// each command does not have to repeat the boilerplate.
#[derive(Debug)]
pub struct CommandSetup {
    /// Loaded configuration: root, home, and the declared links.
    pub config: Config,
}

impl CommandSetup {
    /// Resolve the repository root and home directory, then load the link
    /// manifest.
    ///
    /// # Errors
    ///
    /// Returns an error if the root or home directory cannot be determined or
    /// the manifest fails to parse.
    pub fn init(global: &GlobalOpts, log: &Logger) -> Result<Self> {
        let root = resolve_root(global)?;
        let home = resolve_home(global)?;

        log.stage("Loading configuration");
        log.debug(&format!("root: {}", root.display()));
        log.debug(&format!("home: {}", home.display()));

        let config = Config::load(&root, &home)?;
        log.info(&format!("loaded {} links", config.links.len()));

        Ok(Self { config })
    }
}

/// Resolve the dotfiles root directory from CLI arguments or auto-detection.
///
/// # Errors
///
/// Returns an error if the root directory cannot be determined.
pub fn resolve_root(global: &GlobalOpts) -> Result<PathBuf> {
    if let Some(ref root) = global.root {
        return Ok(root.clone());
    }

    if let Ok(root) = std::env::var("DOTLINK_ROOT") {
        return Ok(PathBuf::from(root));
    }

    // Try to find the repository root from the current binary's location
    if let Ok(exe) = std::env::current_exe()
        && let Some(parent) = exe.parent()
    {
        // target/release/ or bin/ → repo root
        let candidates = [parent.join("../.."), parent.join("..")];
        for candidate in &candidates {
            if candidate.join("conf").exists() && candidate.join("links").exists() {
                return Ok(dunce::canonicalize(candidate)?);
            }
        }
    }

    // Last resort: current directory
    let cwd = std::env::current_dir()?;
    if cwd.join("conf").exists() {
        return Ok(cwd);
    }

    anyhow::bail!("cannot determine dotfiles root. Use --root or set DOTLINK_ROOT env var");
}

/// Resolve the home directory links are created under.
///
/// # Errors
///
/// Returns an error if no home directory can be determined.
pub fn resolve_home(global: &GlobalOpts) -> Result<PathBuf> {
    if let Some(ref home) = global.home {
        return Ok(home.clone());
    }

    for var in ["HOME", "USERPROFILE"] {
        if let Some(home) = std::env::var_os(var)
            && !home.is_empty()
        {
            return Ok(PathBuf::from(home));
        }
    }

    anyhow::bail!("cannot determine home directory. Use --home or set HOME");
}
