use crate::output::print_json;
use anyhow::Context;
use std::path::Path;
use svgflat_core::prune::prune_empty_dirs;

/// `svgflat prune` — remove empty directories under the root without converting anything.
pub fn run(root: &Path, json: bool) -> anyhow::Result<()> {
    if !root.is_dir() {
        anyhow::bail!("root directory not found: {}", root.display());
    }
    let removed = prune_empty_dirs(root)
        .with_context(|| format!("failed to prune {}", root.display()))?;

    if json {
        return print_json(&serde_json::json!({ "pruned": removed }));
    }
    for dir in &removed {
        println!("Removed empty folder: {}", dir.display());
    }
    if removed.is_empty() {
        println!("No empty folders.");
    }
    Ok(())
}
