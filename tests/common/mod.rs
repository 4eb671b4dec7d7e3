// Shared helpers for integration tests.
//
// Provides a temporary-directory-backed dotfiles repository plus a fake home
// directory so each integration test can set up an isolated environment
// without repeating filesystem boilerplate.
//
// Used by all integration test binaries that declare `mod common;`.
#![allow(dead_code)]

use std::path::{Path, PathBuf};

use dotlink_cli::config::Config;
use dotlink_cli::logging::Logger;
use dotlink_cli::operations::SystemFileSystemOps;
use dotlink_cli::prompt::Confirm;
use dotlink_cli::reconcile::{BackupOverride, BackupPolicy, BatchOrchestrator, LinkMapping};

/// An isolated test repository backed by a [`tempfile::TempDir`].
///
/// Layout mirrors a real checkout: `conf/links.toml`, `links/` holding the
/// source files, and a sibling `home/` directory standing in for `$HOME`.
/// Everything is deleted when the context is dropped.
pub struct IntegrationTestContext {
    /// Temporary directory containing the repository and the fake home.
    pub tmp: tempfile::TempDir,
}

impl IntegrationTestContext {
    /// Create a context with an empty manifest and an empty home.
    pub fn new() -> Self {
        let tmp = tempfile::tempdir().expect("create temp dir");
        std::fs::create_dir_all(tmp.path().join("repo/conf")).expect("create conf dir");
        std::fs::create_dir_all(tmp.path().join("repo/links")).expect("create links dir");
        std::fs::create_dir_all(tmp.path().join("home")).expect("create home dir");
        std::fs::write(tmp.path().join("repo/conf/links.toml"), "links = []\n")
            .expect("write manifest");
        Self { tmp }
    }

    /// Path to the repository root.
    pub fn root(&self) -> PathBuf {
        self.tmp.path().join("repo")
    }

    /// Path to the fake home directory.
    pub fn home(&self) -> PathBuf {
        self.tmp.path().join("home")
    }

    /// Path to a source file under `links/`.
    pub fn source(&self, name: &str) -> PathBuf {
        self.root().join("links").join(name)
    }

    /// Path to an entry under the fake home.
    pub fn dest(&self, name: &str) -> PathBuf {
        self.home().join(name)
    }

    /// Write a source file under `links/`, creating parent directories.
    pub fn add_source(&self, name: &str, content: &str) -> &Self {
        let path = self.source(name);
        std::fs::create_dir_all(path.parent().expect("source has a parent"))
            .expect("create source parent");
        std::fs::write(path, content).expect("write source");
        self
    }

    /// Replace the manifest content.
    pub fn write_manifest(&self, toml: &str) -> &Self {
        std::fs::write(self.root().join("conf/links.toml"), toml).expect("write manifest");
        self
    }

    /// Load the configuration and expand it into mappings.
    pub fn mappings(&self) -> Vec<LinkMapping> {
        Config::load(&self.root(), &self.home())
            .expect("load config")
            .mappings()
    }

    /// Assert that `dest` is a symlink resolving to the source named `name`.
    pub fn assert_linked(&self, dest: &str, name: &str) {
        let dest = self.dest(dest);
        assert!(
            dest.symlink_metadata()
                .unwrap_or_else(|_| panic!("nothing at {}", dest.display()))
                .is_symlink(),
            "{} is not a symlink",
            dest.display()
        );
        let resolved = resolve(&dest);
        let expected = resolve(&self.source(name));
        assert_eq!(resolved, expected, "{} links elsewhere", dest.display());
    }
}

fn resolve(path: &Path) -> PathBuf {
    std::fs::canonicalize(path).unwrap_or_else(|_| panic!("cannot resolve {}", path.display()))
}

/// A [`Confirm`] implementation returning a fixed answer, for driving the
/// backup prompt non-interactively.
#[derive(Debug)]
pub struct FixedAnswer(pub bool);

impl Confirm for FixedAnswer {
    fn ask_yes_no(&self, _prompt: &str) -> bool {
        self.0
    }
}

/// Apply every mapping in the context with the given policy and canned
/// prompt answer. Returns the batch aggregate.
pub fn apply(
    ctx: &IntegrationTestContext,
    force: BackupOverride,
    answer: bool,
    dry_run: bool,
) -> bool {
    let log = Logger::new("test");
    let fs = SystemFileSystemOps;
    let confirm = FixedAnswer(answer);
    let orchestrator =
        BatchOrchestrator::new(&fs, BackupPolicy::new(force), &confirm, &log, dry_run);
    orchestrator.apply(&ctx.mappings())
}
