use crate::output::print_json;
use anyhow::Context;
use clap::Subcommand;
use std::path::Path;
use svgflat_core::config::{config_path, Config, WarnLevel, CONFIG_FILE};

// ---------------------------------------------------------------------------
// Subcommand types
// ---------------------------------------------------------------------------

#[derive(Subcommand)]
pub enum ConfigSubcommand {
    /// Print the effective configuration
    Show,

    /// Validate the config for common mistakes
    Validate,

    /// Write a default .svgflat.yaml if none exists
    Init,
}

// ---------------------------------------------------------------------------
// Entry point
// ---------------------------------------------------------------------------

pub fn run(root: &Path, subcmd: ConfigSubcommand, json: bool) -> anyhow::Result<()> {
    match subcmd {
        ConfigSubcommand::Show => show(root, json),
        ConfigSubcommand::Validate => validate(root, json),
        ConfigSubcommand::Init => init(root, json),
    }
}

fn show(root: &Path, json: bool) -> anyhow::Result<()> {
    let config = Config::load(root).context("failed to load config")?;
    if json {
        return print_json(&config);
    }
    let source = if config_path(root).exists() {
        CONFIG_FILE
    } else {
        "defaults"
    };
    println!("# source: {source}");
    println!("# output dir: {}", config.output_dir(root).display());
    print!("{}", serde_yaml::to_string(&config)?);
    Ok(())
}

// ---------------------------------------------------------------------------
// validate
// ---------------------------------------------------------------------------

fn validate(root: &Path, json: bool) -> anyhow::Result<()> {
    let config = Config::load(root).context("failed to load config")?;
    let warnings = config.validate();

    if json {
        let value = serde_json::json!({
            "warnings": warnings,
        });
        print_json(&value)?;
    } else if warnings.is_empty() {
        println!("Config is valid. No warnings.");
    } else {
        for w in &warnings {
            let prefix = match w.level {
                WarnLevel::Warning => "warning",
                WarnLevel::Error => "error",
            };
            println!("[{prefix}] {}", w.message);
        }
    }

    let has_errors = warnings.iter().any(|w| w.level == WarnLevel::Error);
    if has_errors {
        anyhow::bail!("config validation found errors");
    }

    Ok(())
}

fn init(root: &Path, json: bool) -> anyhow::Result<()> {
    let path = config_path(root);
    let data = serde_yaml::to_string(&Config::default())?;
    let written = svgflat_core::io::write_if_missing(&path, data.as_bytes())
        .with_context(|| format!("failed to write {}", path.display()))?;

    if json {
        return print_json(&serde_json::json!({
            "path": path,
            "written": written,
        }));
    }
    if written {
        println!("Wrote {}", path.display());
    } else {
        println!("{} already exists, left unchanged.", path.display());
    }
    Ok(())
}
