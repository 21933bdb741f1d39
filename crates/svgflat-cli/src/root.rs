use std::path::{Path, PathBuf};

/// Resolve the icon root directory.
///
/// `--root` / `SVGFLAT_ROOT` (passed in as `explicit`) wins; otherwise the
/// current directory.
pub fn resolve_root(explicit: Option<&Path>) -> PathBuf {
    if let Some(p) = explicit {
        return p.to_path_buf();
    }
    std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."))
}
