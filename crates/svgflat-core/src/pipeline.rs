//! One full pass: scan, normalize, strip, relocate, prune.

use crate::config::{CollisionPolicy, Config};
use crate::error::{Result, SvgflatError};
use crate::normalize::Normalize;
use crate::prune::prune_empty_dirs;
use crate::relocate::{apply, classify, destination, Placement};
use crate::scan::find_svgs;
use crate::strip::strip_patterns;
use serde::Serialize;
use std::collections::HashSet;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Outcome {
    Moved,
    InPlace,
    Overwrote,
    Collision,
    Failed { reason: String },
    Planned { placement: Placement },
}

#[derive(Debug, Clone, Serialize)]
pub struct FileReport {
    pub source: PathBuf,
    pub dest: PathBuf,
    #[serde(flatten)]
    pub outcome: Outcome,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct RunReport {
    pub dry_run: bool,
    pub files: Vec<FileReport>,
    pub pruned: Vec<PathBuf>,
}

impl RunReport {
    pub fn converted(&self) -> usize {
        self.count(|o| matches!(o, Outcome::Moved | Outcome::InPlace | Outcome::Overwrote))
    }

    pub fn failed(&self) -> usize {
        self.count(|o| matches!(o, Outcome::Failed { .. }))
    }

    /// Files that replaced a different file already at their destination.
    pub fn overwritten(&self) -> usize {
        self.count(|o| {
            matches!(
                o,
                Outcome::Overwrote
                    | Outcome::Planned {
                        placement: Placement::Overwrite
                    }
            )
        })
    }

    /// Files left in place because their output name was taken.
    pub fn collisions(&self) -> usize {
        self.count(|o| {
            matches!(
                o,
                Outcome::Collision
                    | Outcome::Planned {
                        placement: Placement::Collision
                    }
            )
        })
    }

    fn count(&self, pred: impl Fn(&Outcome) -> bool) -> usize {
        self.files.iter().filter(|f| pred(&f.outcome)).count()
    }
}

/// Progress notifications, delivered as the pass runs.
#[derive(Debug)]
pub enum Event<'a> {
    Processing(&'a Path),
    File(&'a FileReport),
    Pruned(&'a Path),
}

/// Classify every SVG under `root` without running the normalizer or
/// touching the filesystem. Names claimed by earlier files count as taken.
pub fn plan(root: &Path, cfg: &Config, mut on_event: impl FnMut(Event<'_>)) -> Result<RunReport> {
    let output_dir = cfg.output_dir(root);
    let sources = find_svgs(root, &output_dir)?;

    let mut report = RunReport {
        dry_run: true,
        ..RunReport::default()
    };
    let mut claimed: HashSet<PathBuf> = HashSet::new();

    for source in sources {
        let Some(dest) = destination(&source, &output_dir) else {
            continue;
        };
        on_event(Event::Processing(&source));

        let mut placement = classify(&source, &dest, cfg.on_collision);
        if placement == Placement::Move && claimed.contains(&dest) {
            placement = match cfg.on_collision {
                CollisionPolicy::Overwrite => Placement::Overwrite,
                CollisionPolicy::Skip | CollisionPolicy::Error => Placement::Collision,
            };
        }
        if placement != Placement::Collision {
            claimed.insert(dest.clone());
        }

        let entry = FileReport {
            source,
            dest,
            outcome: Outcome::Planned { placement },
        };
        on_event(Event::File(&entry));
        report.files.push(entry);
    }
    Ok(report)
}

/// Process every SVG under `root` once, then prune empty directories.
///
/// Per-file conversion failures and skipped collisions are recorded in the
/// report and do not stop the pass. Filesystem errors, and collisions under
/// `on_collision: error`, abort it.
pub fn run(
    root: &Path,
    cfg: &Config,
    normalizer: &dyn Normalize,
    mut on_event: impl FnMut(Event<'_>),
) -> Result<RunReport> {
    let output_dir = cfg.output_dir(root);
    let sources = find_svgs(root, &output_dir)?;
    crate::io::ensure_dir(&output_dir)?;
    tracing::debug!(normalizer = %normalizer.describe(), files = sources.len(), "starting pass");

    let mut report = RunReport::default();
    for source in sources {
        let Some(dest) = destination(&source, &output_dir) else {
            continue;
        };
        on_event(Event::Processing(&source));

        let outcome = process_file(&source, &dest, cfg, normalizer)?;
        let entry = FileReport {
            source,
            dest,
            outcome,
        };
        on_event(Event::File(&entry));
        report.files.push(entry);
    }

    report.pruned = prune_empty_dirs(root)?;
    for dir in &report.pruned {
        on_event(Event::Pruned(dir));
    }

    tracing::info!(
        converted = report.converted(),
        failed = report.failed(),
        overwritten = report.overwritten(),
        collisions = report.collisions(),
        pruned = report.pruned.len(),
        "pass complete"
    );
    Ok(report)
}

fn process_file(
    source: &Path,
    dest: &Path,
    cfg: &Config,
    normalizer: &dyn Normalize,
) -> Result<Outcome> {
    let output = match normalizer.normalize(source) {
        Ok(out) => out,
        Err(e @ SvgflatError::NormalizerSpawnFailed { .. }) => {
            tracing::warn!(path = %source.display(), error = %e, "normalizer did not start");
            return Ok(Outcome::Failed {
                reason: e.to_string(),
            });
        }
        Err(e) => return Err(e),
    };

    if !output.is_success() {
        let reason = failure_reason(output.exit_code, &output.stderr);
        tracing::warn!(path = %source.display(), %reason, "normalization failed");
        return Ok(Outcome::Failed { reason });
    }

    let cleaned = strip_patterns(&output.stdout, &cfg.patterns);
    let placement = classify(source, dest, cfg.on_collision);

    if placement == Placement::Collision {
        if cfg.on_collision == CollisionPolicy::Error {
            return Err(SvgflatError::Collision {
                source_path: source.to_path_buf(),
                dest: dest.to_path_buf(),
            });
        }
        tracing::warn!(path = %source.display(), dest = %dest.display(), "output name taken, skipping");
        return Ok(Outcome::Collision);
    }

    if placement == Placement::Overwrite {
        tracing::warn!(path = %source.display(), dest = %dest.display(), "output name taken, overwriting");
    }

    apply(source, dest, &cleaned, placement)?;
    Ok(match placement {
        Placement::InPlace => Outcome::InPlace,
        Placement::Overwrite => Outcome::Overwrote,
        _ => Outcome::Moved,
    })
}

fn failure_reason(exit_code: Option<i32>, stderr: &str) -> String {
    let stderr = stderr.trim();
    if !stderr.is_empty() {
        return stderr.to_string();
    }
    match exit_code {
        Some(0) => "normalizer produced no output".to_string(),
        Some(code) => format!("normalizer exited with code {code}"),
        None => "normalizer was terminated by a signal".to_string(),
    }
}
