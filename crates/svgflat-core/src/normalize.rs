//! Runner detection and subprocess invocation for picosvg.
//!
//! picosvg is a Python tool, usually launched through a package runner.
//! When no command is configured this module picks the first available of:
//! 1. pipx  — `pipx run picosvg <path>`
//! 2. uv    — `uvx picosvg <path>`
//! 3. a `picosvg` executable already on `PATH`
//!
//! The normalized SVG is whatever the tool prints on stdout. A run counts as
//! successful only when the exit code is zero and stdout is non-empty.

use std::path::Path;
use std::process::{Command, Stdio};

use crate::config::NormalizerConfig;
use crate::error::{Result, SvgflatError};

/// The picosvg launchers we know about, in priority order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Runner {
    Pipx,
    Uvx,
    Picosvg,
}

impl Runner {
    pub fn name(&self) -> &'static str {
        match self {
            Runner::Pipx => "pipx",
            Runner::Uvx => "uvx",
            Runner::Picosvg => "picosvg",
        }
    }

    /// Command prefix for this runner; the SVG path goes last.
    pub fn command(&self) -> Vec<String> {
        let parts: &[&str] = match self {
            Runner::Pipx => &["pipx", "run", "picosvg"],
            Runner::Uvx => &["uvx", "picosvg"],
            Runner::Picosvg => &["picosvg"],
        };
        parts.iter().map(|s| s.to_string()).collect()
    }
}

/// Detect the best available picosvg runner.
/// Returns None if nothing suitable is on `PATH`.
pub fn detect_runner() -> Option<Runner> {
    detect_runner_with(|program| which::which(program).is_ok())
}

/// Priority-ordered detection against an arbitrary "is this installed" check.
pub fn detect_runner_with(installed: impl Fn(&str) -> bool) -> Option<Runner> {
    [Runner::Pipx, Runner::Uvx, Runner::Picosvg]
        .into_iter()
        .find(|r| installed(r.name()))
}

/// Captured result of one normalizer invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizeOutput {
    /// `None` when the process was killed by a signal.
    pub exit_code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

impl NormalizeOutput {
    pub fn is_success(&self) -> bool {
        self.exit_code == Some(0) && !self.stdout.is_empty()
    }
}

/// Turns one SVG file into normalized SVG text.
pub trait Normalize {
    fn normalize(&self, path: &Path) -> Result<NormalizeOutput>;

    /// Human-readable command line, for logs and `doctor`.
    fn describe(&self) -> String;
}

/// Runs an external command with the SVG path appended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandNormalizer {
    program: String,
    args: Vec<String>,
}

impl CommandNormalizer {
    pub fn new(command: Vec<String>) -> Result<Self> {
        let mut parts = command.into_iter();
        let program = parts
            .next()
            .filter(|p| !p.trim().is_empty())
            .ok_or_else(|| {
                SvgflatError::InvalidConfig("normalizer.command must name a program".into())
            })?;
        Ok(Self {
            program,
            args: parts.collect(),
        })
    }

    /// Build from config, auto-detecting a runner when no command is set.
    pub fn from_config(cfg: &NormalizerConfig) -> Result<Self> {
        match &cfg.command {
            Some(cmd) => Self::new(cmd.clone()),
            None => {
                let runner = detect_runner().ok_or(SvgflatError::NoNormalizer)?;
                Self::new(runner.command())
            }
        }
    }
}

impl Normalize for CommandNormalizer {
    fn normalize(&self, path: &Path) -> Result<NormalizeOutput> {
        tracing::debug!(program = %self.program, path = %path.display(), "running normalizer");

        let output = Command::new(&self.program)
            .args(&self.args)
            .arg(path)
            .stdin(Stdio::null())
            .output()
            .map_err(|e| SvgflatError::NormalizerSpawnFailed {
                program: self.program.clone(),
                reason: e.to_string(),
            })?;

        Ok(NormalizeOutput {
            exit_code: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        })
    }

    fn describe(&self) -> String {
        let mut parts = vec![self.program.as_str()];
        parts.extend(self.args.iter().map(String::as_str));
        parts.push("<file>");
        parts.join(" ")
    }
}
