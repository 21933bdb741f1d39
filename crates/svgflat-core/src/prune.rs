use crate::error::Result;
use crate::io::is_empty_dir;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Remove every empty directory under `root`, deepest first.
///
/// Children are visited before their parent, so a directory that only held
/// empty directories is gone by the end of the same pass. `root` itself is
/// never removed. Returns the removed paths in removal order.
pub fn prune_empty_dirs(root: &Path) -> Result<Vec<PathBuf>> {
    let mut removed = Vec::new();
    for entry in WalkDir::new(root)
        .min_depth(1)
        .contents_first(true)
        .follow_links(false)
    {
        let entry = entry?;
        if !entry.file_type().is_dir() {
            continue;
        }
        if is_empty_dir(entry.path())? {
            std::fs::remove_dir(entry.path())?;
            tracing::info!(path = %entry.path().display(), "removed empty folder");
            removed.push(entry.into_path());
        }
    }
    Ok(removed)
}
