pub mod config;
pub mod doctor;
pub mod prune;
pub mod run;
pub mod scan;

use anyhow::Context;
use clap::Args;
use std::path::{Path, PathBuf};
use svgflat_core::config::{CollisionPolicy, Config};

/// Flags that override values from `.svgflat.yaml` for a single invocation.
#[derive(Args, Debug, Default)]
pub struct ConfigOverrides {
    /// Literal text to strip from normalized output (repeatable; replaces the configured list)
    #[arg(long = "pattern", value_name = "TEXT")]
    pub patterns: Vec<String>,

    /// Directory to write flattened icons into (relative to the root)
    #[arg(long)]
    pub output: Option<PathBuf>,

    /// What to do when an output name is taken: skip, overwrite, or error
    #[arg(long, value_name = "POLICY", value_parser = parse_policy)]
    pub on_collision: Option<CollisionPolicy>,

    /// Normalizer command prefix, whitespace-separated (e.g. "uvx picosvg")
    #[arg(long, value_name = "COMMAND")]
    pub normalizer: Option<String>,
}

fn parse_policy(s: &str) -> Result<CollisionPolicy, String> {
    s.parse().map_err(|e: svgflat_core::SvgflatError| e.to_string())
}

impl ConfigOverrides {
    pub fn apply(self, cfg: &mut Config) {
        if !self.patterns.is_empty() {
            cfg.patterns = self.patterns;
        }
        if let Some(output) = self.output {
            cfg.output = Some(output);
        }
        if let Some(policy) = self.on_collision {
            cfg.on_collision = policy;
        }
        if let Some(cmd) = self.normalizer {
            cfg.normalizer.command = Some(cmd.split_whitespace().map(str::to_string).collect());
        }
    }
}

/// Load `.svgflat.yaml` from `root` and layer the command-line overrides on top.
pub fn load_config(root: &Path, overrides: ConfigOverrides) -> anyhow::Result<Config> {
    let mut cfg = Config::load(root).context("failed to load .svgflat.yaml")?;
    overrides.apply(&mut cfg);
    Ok(cfg)
}
