//! Link manifest loading.
use anyhow::{Context as _, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// A symlink to create: source (under `links/`) → destination (under `$HOME`).
#[derive(Debug, Clone)]
pub struct Link {
    /// Relative path under the `links/` directory.
    pub source: String,
    /// Explicit destination path relative to `$HOME`; derived by convention
    /// when absent.
    pub target: Option<String>,
}

/// A single entry in the manifest — either a plain source path or a
/// structured `{ source, target }` pair for an explicit destination.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum LinkEntry {
    /// Plain string: `"zshrc"` — destination is derived by convention.
    Simple(String),
    /// Structured: `{ source = "foo", target = "bin/foo" }` — explicit destination.
    WithTarget {
        source: String,
        target: String,
    },
}

/// Top-level manifest shape.
#[derive(Debug, Default, Deserialize)]
struct Manifest {
    #[serde(default)]
    links: Vec<LinkEntry>,
}

/// Load links from `links.toml`.
///
/// A missing file yields an empty list, so a fresh checkout without a
/// manifest is not an error.
///
/// # Errors
///
/// Returns an error if the file exists but cannot be read or parsed.
pub fn load(path: &Path) -> Result<Vec<Link>> {
    let manifest: Manifest = if path.exists() {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read manifest: {}", path.display()))?;
        toml::from_str(&content)
            .with_context(|| format!("Failed to parse TOML manifest: {}", path.display()))?
    } else {
        Manifest::default()
    };

    Ok(manifest
        .links
        .into_iter()
        .map(|entry| match entry {
            LinkEntry::Simple(source) => Link {
                source,
                target: None,
            },
            LinkEntry::WithTarget { source, target } => Link {
                source,
                target: Some(target),
            },
        })
        .collect())
}

/// Compute the destination path under `home` for a link.
///
/// An explicit `target` is joined onto `home` as-is. Otherwise the
/// destination is derived by the dot-prefix convention: `"zshrc"` maps to
/// `$HOME/.zshrc`, `"config/starship.toml"` to `$HOME/.config/starship.toml`.
#[must_use]
pub fn compute_destination(home: &Path, link: &Link) -> PathBuf {
    link.target.as_ref().map_or_else(
        || home.join(format!(".{}", link.source)),
        |target| home.join(target),
    )
}
