//! Tree pruning for Trellis.
//! Applies a removal plan to a freshly generated project: deletes the paths
//! of unselected features, then removes the fixed candidate directories that
//! the deletions left empty. Absent paths are skipped silently, which makes
//! the whole pass idempotent.

use crate::error::{Error, Result};
use crate::resolver::RemovalPlan;
use log::debug;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// What a pruning pass actually did, for reporting and tests.
#[derive(Debug, Default)]
pub struct PruneReport {
    /// Paths removed, in deletion order
    pub removed: Vec<PathBuf>,
    /// Paths from the plan that were already absent
    pub skipped: usize,
}

fn remove_dir_traced(path: &Path) -> Result<()> {
    for entry in WalkDir::new(path).into_iter().filter_map(|e| e.ok()) {
        debug!("removing: {}", entry.path().display());
    }
    fs::remove_dir_all(path).map_err(Error::IoError)
}

fn is_empty_dir(path: &Path) -> Result<bool> {
    Ok(fs::read_dir(path).map_err(Error::IoError)?.next().is_none())
}

/// Applies a removal plan beneath `project_dir`.
///
/// Each planned path is deleted if present (directories recursively) and
/// skipped otherwise. After all deletions the empty-directory candidates are
/// checked in their listed order, so a directory emptied by an earlier
/// removal is itself removed by a later check.
///
/// # Errors
/// * `Error::ProjectDirMissing` if `project_dir` does not exist
/// * `Error::IoError` for any deletion failure other than an absent path
pub fn prune(project_dir: &Path, plan: &RemovalPlan) -> Result<PruneReport> {
    if !project_dir.is_dir() {
        return Err(Error::ProjectDirMissing { project_dir: project_dir.to_path_buf() });
    }

    let mut report = PruneReport::default();

    for path in plan.paths() {
        let full_path = project_dir.join(path);
        let file_type = match fs::symlink_metadata(&full_path) {
            Ok(metadata) => metadata.file_type(),
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!("already absent: {}", full_path.display());
                report.skipped += 1;
                continue;
            }
            Err(e) => return Err(Error::IoError(e)),
        };

        if file_type.is_dir() {
            remove_dir_traced(&full_path)?;
        } else {
            debug!("removing: {}", full_path.display());
            fs::remove_file(&full_path).map_err(Error::IoError)?;
        }
        report.removed.push(path.to_path_buf());
    }

    for candidate in &plan.empty_dir_candidates {
        let full_path = project_dir.join(candidate);
        if full_path.is_dir() && is_empty_dir(&full_path)? {
            debug!("removing empty directory: {}", full_path.display());
            fs::remove_dir(&full_path).map_err(Error::IoError)?;
            report.removed.push(candidate.clone());
        }
    }

    Ok(report)
}
