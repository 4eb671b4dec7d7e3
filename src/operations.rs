//! Filesystem operation abstractions for dependency injection.
//!
//! Provides the [`FileSystemOps`] trait covering the mutating primitives the
//! reconciler relies on, so the failure paths (link creation refused, restore
//! refused) can be unit-tested without real permission games. Production code
//! uses [`SystemFileSystemOps`]; tests use `FaultyFileSystemOps`.

use std::io;
use std::path::Path;

/// Abstraction over the filesystem mutations performed by reconciliation.
///
/// Classification is pure inspection and reads the real filesystem directly;
/// only the mutating primitives go through this trait.
pub trait FileSystemOps: Send + Sync + std::fmt::Debug {
    /// Create `path` and all missing parent directories.
    ///
    /// # Errors
    ///
    /// Returns an error if a directory cannot be created.
    fn create_dir_all(&self, path: &Path) -> io::Result<()>;

    /// Rename `from` to `to`, atomically within one volume.
    ///
    /// # Errors
    ///
    /// Returns an error if the rename fails.
    fn rename(&self, from: &Path, to: &Path) -> io::Result<()>;

    /// Remove the file or symlink at `path` (a single unlink, never recursive).
    ///
    /// # Errors
    ///
    /// Returns an error if removal fails.
    fn remove_file(&self, path: &Path) -> io::Result<()>;

    /// Recursively remove the directory at `path`.
    ///
    /// # Errors
    ///
    /// Returns an error if removal fails.
    fn remove_dir_all(&self, path: &Path) -> io::Result<()>;

    /// Create a symlink at `destination` pointing to `source`.
    ///
    /// # Errors
    ///
    /// Returns an error if the link cannot be created.
    fn symlink(&self, source: &Path, destination: &Path) -> io::Result<()>;
}

/// Production [`FileSystemOps`] implementation that delegates to [`std::fs`].
#[derive(Debug, Default)]
pub struct SystemFileSystemOps;

impl FileSystemOps for SystemFileSystemOps {
    fn create_dir_all(&self, path: &Path) -> io::Result<()> {
        std::fs::create_dir_all(path)
    }

    fn rename(&self, from: &Path, to: &Path) -> io::Result<()> {
        std::fs::rename(from, to)
    }

    fn remove_file(&self, path: &Path) -> io::Result<()> {
        std::fs::remove_file(path)
    }

    fn remove_dir_all(&self, path: &Path) -> io::Result<()> {
        std::fs::remove_dir_all(path)
    }

    fn symlink(&self, source: &Path, destination: &Path) -> io::Result<()> {
        #[cfg(unix)]
        {
            std::os::unix::fs::symlink(source, destination)
        }

        #[cfg(windows)]
        {
            if source.is_dir() {
                std::os::windows::fs::symlink_dir(source, destination)
            } else {
                std::os::windows::fs::symlink_file(source, destination)
            }
        }
    }
}

/// Fault-injecting [`FileSystemOps`] for unit tests.
///
/// Delegates every call to [`SystemFileSystemOps`] unless the call matches a
/// configured fault, in which case a `PermissionDenied` error is returned
/// without touching the filesystem. Used to force the reconciler down its
/// `LinkCreationFailed`, `DoubleFault`, and `DestinationNotClear` paths.
#[cfg(test)]
#[derive(Debug, Default)]
pub struct FaultyFileSystemOps {
    inner: SystemFileSystemOps,
    fail_symlink: bool,
    fail_rename_from: Option<std::path::PathBuf>,
    fail_remove: bool,
}

#[cfg(test)]
impl FaultyFileSystemOps {
    /// Create a mock with no faults configured (behaves like the real thing).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every `symlink` call fail.
    #[must_use]
    pub const fn failing_symlink(mut self) -> Self {
        self.fail_symlink = true;
        self
    }

    /// Make `rename` calls whose `from` equals `path` fail.
    ///
    /// A backup rename moves *from* the destination; a restore rename moves
    /// *from* the backup slot — so this selects which of the two fails.
    #[must_use]
    pub fn failing_rename_from(mut self, path: impl Into<std::path::PathBuf>) -> Self {
        self.fail_rename_from = Some(path.into());
        self
    }

    /// Make every `remove_file` / `remove_dir_all` call fail.
    #[must_use]
    pub const fn failing_remove(mut self) -> Self {
        self.fail_remove = true;
        self
    }

    fn denied() -> io::Error {
        io::Error::new(io::ErrorKind::PermissionDenied, "injected fault")
    }
}

#[cfg(test)]
impl FileSystemOps for FaultyFileSystemOps {
    fn create_dir_all(&self, path: &Path) -> io::Result<()> {
        self.inner.create_dir_all(path)
    }

    fn rename(&self, from: &Path, to: &Path) -> io::Result<()> {
        if self.fail_rename_from.as_deref() == Some(from) {
            return Err(Self::denied());
        }
        self.inner.rename(from, to)
    }

    fn remove_file(&self, path: &Path) -> io::Result<()> {
        if self.fail_remove {
            return Err(Self::denied());
        }
        self.inner.remove_file(path)
    }

    fn remove_dir_all(&self, path: &Path) -> io::Result<()> {
        if self.fail_remove {
            return Err(Self::denied());
        }
        self.inner.remove_dir_all(path)
    }

    fn symlink(&self, source: &Path, destination: &Path) -> io::Result<()> {
        if self.fail_symlink {
            return Err(Self::denied());
        }
        self.inner.symlink(source, destination)
    }
}
