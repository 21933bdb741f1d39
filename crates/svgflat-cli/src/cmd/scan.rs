use super::{load_config, ConfigOverrides};
use crate::output::{print_json, print_table};
use anyhow::Context;
use std::path::Path;
use svgflat_core::pipeline::{self, Outcome};

/// `svgflat scan` — list matched icons and where each would land.
pub fn run(root: &Path, overrides: ConfigOverrides, json: bool) -> anyhow::Result<()> {
    let cfg = load_config(root, overrides)?;
    let report = pipeline::plan(root, &cfg, |_| {})
        .with_context(|| format!("failed to scan {}", root.display()))?;

    if json {
        let files: Vec<_> = report
            .files
            .iter()
            .map(|f| {
                let placement = match &f.outcome {
                    Outcome::Planned { placement } => Some(placement.as_str()),
                    _ => None,
                };
                serde_json::json!({
                    "source": f.source,
                    "dest": f.dest,
                    "placement": placement,
                })
            })
            .collect();
        return print_json(&files);
    }

    if report.files.is_empty() {
        println!("No SVG files under {}.", root.display());
        return Ok(());
    }

    let rows = report
        .files
        .iter()
        .map(|f| {
            let plan = match &f.outcome {
                Outcome::Planned { placement } => placement.as_str().to_string(),
                _ => String::new(),
            };
            vec![
                relative(root, &f.source),
                relative(root, &f.dest),
                plan,
            ]
        })
        .collect();
    print_table(&["SOURCE", "DEST", "PLAN"], rows);
    Ok(())
}

fn relative(root: &Path, path: &Path) -> String {
    path.strip_prefix(root)
        .unwrap_or(path)
        .display()
        .to_string()
}
