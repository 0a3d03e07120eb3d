//! Controller discovery.
//!
//! A startup-time, depth-first scan of the controller asset tree. A directory
//! entry whose name contains no `.` is treated as a subdirectory and recursed
//! into, except for the single configured excluded directory name (reserved
//! content such as the error controller's internals). File stems are
//! collected case-sensitively; `Blog` on disk does not make `blog`
//! routable.
//!
//! The scan runs once when the factory is built; request handling checks the
//! resulting set, never the filesystem.

use crate::error::FrameworkError;
use std::collections::BTreeSet;
use std::path::Path;
use tracing::debug;

/// Collect every controller name under `root`, skipping `excluded_dir`.
pub fn scan_controllers(
    root: &Path,
    excluded_dir: &str,
) -> Result<BTreeSet<String>, FrameworkError> {
    let mut names = BTreeSet::new();
    scan_into(root, excluded_dir, &mut names)?;
    debug!(root = %root.display(), count = names.len(), "controller tree scanned");
    Ok(names)
}

/// Depth-first search for a single case-sensitive name match.
pub fn controller_exists(
    root: &Path,
    name: &str,
    excluded_dir: &str,
) -> Result<bool, FrameworkError> {
    Ok(scan_controllers(root, excluded_dir)?.contains(name))
}

fn scan_into(
    dir: &Path,
    excluded_dir: &str,
    names: &mut BTreeSet<String>,
) -> Result<(), FrameworkError> {
    let entries = std::fs::read_dir(dir).map_err(|source| FrameworkError::DirectoryUnreadable {
        path: dir.to_path_buf(),
        source,
    })?;

    for entry in entries {
        let entry = entry.map_err(|source| FrameworkError::DirectoryUnreadable {
            path: dir.to_path_buf(),
            source,
        })?;
        let Some(file_name) = entry.file_name().to_str().map(str::to_string) else {
            continue;
        };

        // No extension means subdirectory; recurse unless excluded.
        match file_name.split_once('.') {
            None => {
                if file_name != excluded_dir {
                    scan_into(&entry.path(), excluded_dir, names)?;
                }
            }
            Some((stem, _)) => {
                if !stem.is_empty() {
                    names.insert(stem.to_string());
                }
            }
        }
    }

    Ok(())
}
