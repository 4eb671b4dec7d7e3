//! Destination state classification.
//!
//! Pure inspection: nothing here mutates the filesystem.

use std::path::{Path, PathBuf};

use super::DestinationState;

/// Classify `destination` against the mapping's canonical source.
///
/// A symlink destination is resolved and compared against `canonical_source`
/// in canonical form, so relative link targets and platform path prefixes
/// never produce a false `WrongLink`. A symlink that cannot be resolved is a
/// dangling link and classifies as `BrokenLink` — an expected case, not an
/// error.
#[must_use]
pub fn classify(destination: &Path, canonical_source: &Path) -> DestinationState {
    let Ok(meta) = destination.symlink_metadata() else {
        return DestinationState::Absent;
    };

    if meta.is_symlink() {
        return match dunce::canonicalize(destination) {
            Ok(resolved) if paths_equal(&resolved, canonical_source) => {
                DestinationState::CorrectLink
            }
            Ok(_) => DestinationState::WrongLink,
            Err(_) => DestinationState::BrokenLink,
        };
    }

    if meta.is_dir() {
        DestinationState::Directory
    } else {
        DestinationState::RegularFile
    }
}

/// Compare two paths for equality, normalising the `\\?\` prefix that
/// Windows `canonicalize` prepends to extended-length paths.
fn paths_equal(a: &Path, b: &Path) -> bool {
    strip_win_prefix(a) == strip_win_prefix(b)
}

fn strip_win_prefix(p: &Path) -> PathBuf {
    let s = p.to_string_lossy();
    s.strip_prefix(r"\\?\")
        .map_or_else(|| p.to_path_buf(), PathBuf::from)
}
