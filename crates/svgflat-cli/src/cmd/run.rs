use super::{load_config, ConfigOverrides};
use crate::output::print_json;
use anyhow::Context;
use std::path::Path;
use svgflat_core::normalize::CommandNormalizer;
use svgflat_core::pipeline::{self, Event, FileReport, Outcome, RunReport};

/// `svgflat run` — normalize, strip, flatten, and prune.
pub fn run(root: &Path, overrides: ConfigOverrides, dry_run: bool, json: bool) -> anyhow::Result<()> {
    let cfg = load_config(root, overrides)?;

    let result = if dry_run {
        pipeline::plan(root, &cfg, |event| {
            if !json {
                print_event(&event)
            }
        })
    } else {
        let normalizer =
            CommandNormalizer::from_config(&cfg.normalizer).context("cannot run picosvg")?;
        pipeline::run(root, &cfg, &normalizer, |event| {
            if !json {
                print_event(&event)
            }
        })
    };
    let report = result.with_context(|| format!("processing {} failed", root.display()))?;

    if json {
        print_json(&report)?;
    } else {
        print_summary(&report);
    }
    Ok(())
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

fn print_event(event: &Event<'_>) {
    match event {
        Event::Processing(path) => println!("Processing: {}", path.display()),
        Event::File(file) => print_file(file),
        Event::Pruned(dir) => println!("Removed empty folder: {}", dir.display()),
    }
}

fn print_file(file: &FileReport) {
    let name = file_name(&file.source);
    match &file.outcome {
        Outcome::Moved => println!("Converted, cleaned, and moved: {name}"),
        Outcome::Overwrote => println!(
            "Converted, cleaned, and moved: {name} (overwrote existing {})",
            file.dest.display()
        ),
        Outcome::InPlace => println!("Converted and cleaned in place: {name}"),
        Outcome::Collision => println!(
            "Skipped: {} (output {} already exists)",
            file.source.display(),
            file.dest.display()
        ),
        Outcome::Failed { reason } => println!("Failed to process: {name}, Error: {reason}"),
        Outcome::Planned { placement } => println!(
            "  {}: {} -> {}",
            placement.as_str(),
            file.source.display(),
            file.dest.display()
        ),
    }
}

fn print_summary(report: &RunReport) {
    if report.dry_run {
        println!(
            "\nDry run: {} file(s) found, {} would overwrite, {} collision(s). Nothing was changed.",
            report.files.len(),
            report.overwritten(),
            report.collisions()
        );
        return;
    }
    println!(
        "\nProcessing complete: {} converted, {} failed, {} skipped, {} overwritten, {} folder(s) removed.",
        report.converted(),
        report.failed(),
        report.collisions(),
        report.overwritten(),
        report.pruned.len()
    );
}
