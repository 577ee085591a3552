//! Result-tree discovery.
//!
//! Criterion writes one directory per benchmark. Depending on how the bench was
//! declared, that directory sits directly under the group directory
//! (`<root>/<group>/<function>/`) or one level deeper under a parameter
//! directory (`<root>/<group>/<function>/<value>/`). Both layouts can appear in
//! the same tree, so the scanner walks a bounded depth and recognises result
//! directories by their artifacts instead of by their position.

use crossbench_types::{BENCHMARK_FILE, DEFAULT_SNAPSHOT, ESTIMATES_FILE};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};
use walkdir::WalkDir;

/// Result directories live at least this many levels below the root
/// (root / group / benchmark).
pub const MIN_RESULT_DEPTH: usize = 2;

pub const DEFAULT_MAX_DEPTH: usize = 3;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanOptions {
    /// Name of the per-result directory holding the artifacts ("base", "new").
    pub snapshot: String,

    /// Deepest level below the root that may hold a result directory.
    pub max_depth: usize,
}

impl Default for ScanOptions {
    fn default() -> Self {
        Self {
            snapshot: DEFAULT_SNAPSHOT.to_string(),
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

/// A directory whose snapshot holds both artifacts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultLocation {
    pub dir: PathBuf,
    depth: Option<usize>,
    snapshot_dir: PathBuf,
}

impl ResultLocation {
    pub fn new(dir: impl Into<PathBuf>, snapshot: &str) -> Self {
        let dir = dir.into();
        let snapshot_dir = dir.join(snapshot);
        Self {
            dir,
            depth: None,
            snapshot_dir,
        }
    }

    /// Levels below the scanned root; `None` for locations not produced by a scan.
    pub fn depth(&self) -> Option<usize> {
        self.depth
    }

    pub fn estimates_path(&self) -> PathBuf {
        self.snapshot_dir.join(ESTIMATES_FILE)
    }

    pub fn benchmark_path(&self) -> PathBuf {
        self.snapshot_dir.join(BENCHMARK_FILE)
    }

    fn is_complete(&self) -> bool {
        self.estimates_path().is_file() && self.benchmark_path().is_file()
    }
}

/// Lazy iterator over the result locations under a root directory.
pub struct ResultLocations {
    walker: walkdir::IntoIter,
    snapshot: String,
}

/// Walk `root` and yield every result location between
/// [`MIN_RESULT_DEPTH`] and `options.max_depth`.
///
/// Unreadable entries (including a missing root and symlink loops) are logged
/// and skipped. Symlinked directories are followed. Entries are visited in
/// file-name order.
pub fn scan_results(root: &Path, options: &ScanOptions) -> ResultLocations {
    let walker = WalkDir::new(root)
        .min_depth(1)
        .max_depth(options.max_depth)
        .follow_links(true)
        .sort_by_file_name()
        .into_iter();

    ResultLocations {
        walker,
        snapshot: options.snapshot.clone(),
    }
}

impl Iterator for ResultLocations {
    type Item = ResultLocation;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let entry = match self.walker.next()? {
                Ok(entry) => entry,
                Err(err) => {
                    warn!(error = %err, "skipping unreadable entry in result tree");
                    continue;
                }
            };

            if !entry.file_type().is_dir() {
                continue;
            }

            if entry.depth() < MIN_RESULT_DEPTH {
                continue;
            }

            // Groups and functions may share the snapshot's name, so a
            // directory is judged only by what it holds.
            let mut location = ResultLocation::new(entry.path(), &self.snapshot);
            if !location.snapshot_dir.is_dir() {
                continue;
            }

            // A result directory never nests further results, and its own
            // snapshot is read through it.
            self.walker.skip_current_dir();

            if !location.is_complete() {
                debug!(
                    location = %location.dir.display(),
                    "result directory is missing an artifact; skipping"
                );
                continue;
            }

            location.depth = Some(entry.depth());
            return Some(location);
        }
    }
}
