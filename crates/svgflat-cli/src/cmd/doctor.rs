use super::{load_config, ConfigOverrides};
use crate::output::print_json;
use svgflat_core::normalize::{detect_runner, CommandNormalizer, Normalize};
use std::path::Path;

/// `svgflat doctor` — show which normalizer command a run would use.
pub fn run(root: &Path, overrides: ConfigOverrides, json: bool) -> anyhow::Result<()> {
    let cfg = load_config(root, overrides)?;
    let configured = cfg.normalizer.command.is_some();
    let normalizer = CommandNormalizer::from_config(&cfg.normalizer);

    if json {
        let value = serde_json::json!({
            "configured": configured,
            "detected_runner": detect_runner().map(|r| r.name()),
            "command": normalizer.as_ref().ok().map(|n| n.describe()),
            "error": normalizer.as_ref().err().map(|e| e.to_string()),
        });
        print_json(&value)?;
    } else {
        match &normalizer {
            Ok(n) => {
                let source = if configured { "configured" } else { "detected" };
                println!("normalizer ({source}): {}", n.describe());
            }
            Err(e) => println!("normalizer: unavailable ({e})"),
        }
    }

    normalizer?;
    Ok(())
}
