use std::path::{Path, PathBuf};

use anyhow::{Result, bail};
use tracing::{debug, warn};
use walkdir::WalkDir;

/// Maximum number of page files loaded from one directory (prevents resource exhaustion)
pub const MAX_PAGE_FILES: usize = 1000;

/// Find `*.json` page files under `dir`, sorted by path
///
/// Symlinks are not followed. Unreadable entries are logged and skipped.
///
/// # Errors
///
/// Returns an error if `dir` is not a directory or holds more than [`MAX_PAGE_FILES`] pages.
pub fn discover_page_files(dir: &Path) -> Result<Vec<PathBuf>> {
    if !dir.is_dir() {
        bail!("Not a directory: {}", dir.display());
    }

    let mut files = Vec::new();
    for entry in WalkDir::new(dir).follow_links(false).sort_by_file_name() {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                warn!(dir = %dir.display(), error = %e, "skipping unreadable entry");
                continue;
            }
        };

        if entry.file_type().is_file() && is_page_file(entry.path()) {
            files.push(entry.into_path());
            if files.len() > MAX_PAGE_FILES {
                bail!(
                    "Too many page files in {} (max {})",
                    dir.display(),
                    MAX_PAGE_FILES
                );
            }
        }
    }

    debug!(dir = %dir.display(), files = files.len(), "discovered page files");
    Ok(files)
}

fn is_page_file(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"))
}
