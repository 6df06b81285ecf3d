//! Removal of editor and writer lock files left next to an output.
//!
//! Office, LibreOffice and some PDF writers drop sibling files such as
//! `~$report.docx` or `.~lock.report.docx#` while a document is open or being
//! written. A failed conversion can leave them behind.

use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Prefix shared by Office owner files.
const OFFICE_LOCK_PREFIX: &str = "~$";

/// Every lock file that may accompany `path`.
pub fn lock_candidates(path: &Path) -> Vec<PathBuf> {
    let parent = path.parent().unwrap_or_else(|| Path::new(""));
    let Some(name) = path.file_name().map(|n| n.to_string_lossy()) else {
        return Vec::new();
    };
    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy())
        .unwrap_or_else(|| name.clone());

    [
        format!("~${name}"),
        format!("~${name}.tmp"),
        format!(".~lock.{name}#"),
        format!("{name}.lock"),
        format!("~${stem}.ppwritelock"),
        format!("~${name}.ppwritelock"),
    ]
    .into_iter()
    .map(|candidate| parent.join(candidate))
    .collect()
}

/// Remove one lock file. Failures are logged, never raised.
fn remove_lock(path: &Path) -> bool {
    if !path.is_file() {
        return false;
    }
    match fs::remove_file(path) {
        Ok(()) => {
            debug!(path = %path.display(), "removed lock file");
            true
        }
        Err(e) => {
            warn!(path = %path.display(), error = %e, "failed to remove lock file");
            false
        }
    }
}

/// Remove the lock files belonging to `path`. Returns how many were removed.
pub fn cleanup_lock_files(path: &Path) -> usize {
    let removed = lock_candidates(path)
        .iter()
        .filter(|candidate| remove_lock(candidate))
        .count();
    if removed > 0 {
        info!(path = %path.display(), removed, "cleaned up lock files");
    }
    removed
}

/// Sweep `dir`: the lock files of every regular file in it, then any remaining
/// Office owner file (`~$*`).
pub fn cleanup_directory(dir: &Path) -> std::io::Result<usize> {
    let mut files = Vec::new();
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        if path.is_file() {
            files.push(path);
        }
    }

    let (owners, documents): (Vec<_>, Vec<_>) =
        files.into_iter().partition(|f| is_office_lock(f));

    let mut removed: usize = documents.iter().map(|f| cleanup_lock_files(f)).sum();
    removed += owners.iter().filter(|f| remove_lock(f)).count();
    Ok(removed)
}

fn is_office_lock(path: &Path) -> bool {
    path.file_name()
        .is_some_and(|n| n.to_string_lossy().starts_with(OFFICE_LOCK_PREFIX))
}
