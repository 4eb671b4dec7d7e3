//! Configuration loading: the link manifest plus explicitly-passed paths.
//!
//! The home directory and repository root are resolved once at the CLI
//! boundary and carried here as plain values; nothing below this layer reads
//! the environment.
pub mod links;

use anyhow::{Context as _, Result};
use std::path::{Path, PathBuf};

use crate::reconcile::LinkMapping;

/// All loaded configuration for one run.
#[derive(Debug)]
pub struct Config {
    /// Repository root containing `conf/` and `links/`.
    pub root: PathBuf,
    /// Home directory links are created under.
    pub home: PathBuf,
    /// Declared links, in manifest order.
    pub links: Vec<links::Link>,
}

impl Config {
    /// Load configuration from the `conf/` directory under `root`.
    ///
    /// # Errors
    ///
    /// Returns an error if the link manifest exists but cannot be parsed.
    pub fn load(root: &Path, home: &Path) -> Result<Self> {
        let manifest = root.join("conf").join("links.toml");
        let links = links::load(&manifest).context("loading links.toml")?;

        Ok(Self {
            root: root.to_path_buf(),
            home: home.to_path_buf(),
            links,
        })
    }

    /// Directory containing link sources.
    #[must_use]
    pub fn links_dir(&self) -> PathBuf {
        self.root.join("links")
    }

    /// Expand the declared links into concrete source→destination mappings,
    /// preserving manifest order.
    #[must_use]
    pub fn mappings(&self) -> Vec<LinkMapping> {
        let links_dir = self.links_dir();
        self.links
            .iter()
            .map(|link| LinkMapping {
                source: links_dir.join(&link.source),
                destination: links::compute_destination(&self.home, link),
            })
            .collect()
    }
}
