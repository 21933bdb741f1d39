//! Directory traversal: find every SVG under the root.

use crate::error::{Result, SvgflatError};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// True if the file name, lowercased, ends with `.svg`.
pub fn is_svg(path: &Path) -> bool {
    path.file_name()
        .map(|name| name.to_string_lossy().to_lowercase().ends_with(".svg"))
        .unwrap_or(false)
}

/// Collect every SVG file under `root`.
///
/// The whole tree is listed before anything is processed, so files written
/// into the output directory during a run are never picked up again.
/// Files sitting directly in `output_dir` come first, then the rest by path:
/// an icon that is already in place claims its name before any nested
/// namesake is considered.
pub fn find_svgs(root: &Path, output_dir: &Path) -> Result<Vec<PathBuf>> {
    if !root.is_dir() {
        return Err(SvgflatError::RootNotFound(root.to_path_buf()));
    }

    let mut files = Vec::new();
    for entry in WalkDir::new(root).follow_links(false) {
        let entry = entry?;
        // Symlinks are not descended into, but a link to a file is still an icon
        let is_file = entry.file_type().is_file()
            || (entry.path_is_symlink() && entry.path().is_file());
        if is_file && is_svg(entry.path()) {
            files.push(entry.into_path());
        }
    }

    files.sort_by(|a, b| {
        let a_nested = a.parent() != Some(output_dir);
        let b_nested = b.parent() != Some(output_dir);
        a_nested.cmp(&b_nested).then_with(|| a.cmp(b))
    });

    tracing::debug!(root = %root.display(), count = files.len(), "scanned for svg files");
    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn touch(root: &Path, rel: &str) {
        let path = root.join(rel);
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(path, "<svg/>").unwrap();
    }

    #[test]
    fn extension_match_is_case_insensitive() {
        assert!(is_svg(Path::new("a/star.svg")));
        assert!(is_svg(Path::new("a/STAR.SVG")));
        assert!(is_svg(Path::new("Moon.Svg")));
        assert!(!is_svg(Path::new("star.svgz")));
        assert!(!is_svg(Path::new("star.png")));
        assert!(!is_svg(Path::new("svg")));
    }

    #[test]
    fn finds_nested_svgs_only() {
        let dir = TempDir::new().unwrap();
        touch(dir.path(), "a/star.svg");
        touch(dir.path(), "a/b/MOON.SVG");
        touch(dir.path(), "a/readme.txt");
        std::fs::create_dir_all(dir.path().join("dir.svg")).unwrap();

        let found = find_svgs(dir.path(), dir.path()).unwrap();
        assert_eq!(
            found,
            vec![dir.path().join("a/b/MOON.SVG"), dir.path().join("a/star.svg")]
        );
    }

    #[test]
    fn top_level_files_come_first() {
        let dir = TempDir::new().unwrap();
        touch(dir.path(), "a/alpha.svg");
        touch(dir.path(), "zeta.svg");

        let found = find_svgs(dir.path(), dir.path()).unwrap();
        assert_eq!(found[0], dir.path().join("zeta.svg"));
        assert_eq!(found[1], dir.path().join("a/alpha.svg"));
    }

    #[cfg(unix)]
    #[test]
    fn symlinked_files_are_included() {
        let dir = TempDir::new().unwrap();
        let target = TempDir::new().unwrap();
        touch(target.path(), "real.svg");
        std::fs::create_dir_all(dir.path().join("a")).unwrap();
        std::os::unix::fs::symlink(target.path().join("real.svg"), dir.path().join("a/link.svg"))
            .unwrap();
        std::os::unix::fs::symlink(target.path(), dir.path().join("linked-dir")).unwrap();

        let found = find_svgs(dir.path(), dir.path()).unwrap();
        assert_eq!(found, vec![dir.path().join("a/link.svg")]);
    }

    #[test]
    fn missing_root_is_an_error() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("nope");
        assert!(matches!(
            find_svgs(&missing, &missing),
            Err(SvgflatError::RootNotFound(_))
        ));
    }
}
