use crate::error::{Result, SvgflatError};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Component, Path, PathBuf};
use std::str::FromStr;

pub const CONFIG_FILE: &str = ".svgflat.yaml";

/// Attribute removed from every normalized icon unless configured otherwise.
pub const DEFAULT_PATTERN: &str = "fill=\"#09244B\"";

pub fn config_path(root: &Path) -> PathBuf {
    root.join(CONFIG_FILE)
}

// ---------------------------------------------------------------------------
// ConfigWarning / WarnLevel
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfigWarning {
    pub level: WarnLevel,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WarnLevel {
    Warning,
    Error,
}

// ---------------------------------------------------------------------------
// CollisionPolicy
// ---------------------------------------------------------------------------

/// What to do when a flattened output name is already taken by another file.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CollisionPolicy {
    /// Leave the source in place and report the collision.
    Skip,
    /// Replace whatever is at the destination, reporting what was replaced.
    #[default]
    Overwrite,
    /// Abort the run.
    Error,
}

impl CollisionPolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            CollisionPolicy::Skip => "skip",
            CollisionPolicy::Overwrite => "overwrite",
            CollisionPolicy::Error => "error",
        }
    }
}

impl fmt::Display for CollisionPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CollisionPolicy {
    type Err = SvgflatError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "skip" => Ok(CollisionPolicy::Skip),
            "overwrite" => Ok(CollisionPolicy::Overwrite),
            "error" => Ok(CollisionPolicy::Error),
            other => Err(SvgflatError::InvalidConfig(format!(
                "unknown collision policy '{other}' (expected skip, overwrite, or error)"
            ))),
        }
    }
}

// ---------------------------------------------------------------------------
// NormalizerConfig
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NormalizerConfig {
    /// Command prefix; the SVG path is appended as the final argument.
    /// `None` means auto-detect pipx / uvx / picosvg.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub command: Option<Vec<String>>,
}

// ---------------------------------------------------------------------------
// Config
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_patterns")]
    pub patterns: Vec<String>,
    /// Flattened output directory, relative to the root unless absolute.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output: Option<PathBuf>,
    #[serde(default)]
    pub on_collision: CollisionPolicy,
    #[serde(default)]
    pub normalizer: NormalizerConfig,
}

fn default_patterns() -> Vec<String> {
    vec![DEFAULT_PATTERN.to_string()]
}

impl Default for Config {
    fn default() -> Self {
        Self {
            patterns: default_patterns(),
            output: None,
            on_collision: CollisionPolicy::default(),
            normalizer: NormalizerConfig::default(),
        }
    }
}

impl Config {
    /// Load `<root>/.svgflat.yaml`, falling back to defaults when it is absent.
    pub fn load(root: &Path) -> Result<Self> {
        let path = config_path(root);
        if !path.exists() {
            return Ok(Self::default());
        }
        let data = std::fs::read_to_string(&path)?;
        let cfg: Config = serde_yaml::from_str(&data)?;
        Ok(cfg)
    }

    pub fn save(&self, root: &Path) -> Result<()> {
        let path = config_path(root);
        let data = serde_yaml::to_string(self)?;
        crate::io::atomic_write(&path, data.as_bytes())
    }

    /// Directory that flattened icons are written into.
    pub fn output_dir(&self, root: &Path) -> PathBuf {
        match &self.output {
            Some(p) if p.is_absolute() => p.clone(),
            Some(p) => root.join(p),
            None => root.to_path_buf(),
        }
    }

    // -----------------------------------------------------------------------
    // Validation
    // -----------------------------------------------------------------------

    pub fn validate(&self) -> Vec<ConfigWarning> {
        let mut warnings = Vec::new();

        if self.patterns.is_empty() {
            warnings.push(ConfigWarning {
                level: WarnLevel::Warning,
                message: "patterns is empty: icons will be normalized but nothing stripped"
                    .to_string(),
            });
        }

        for (i, pattern) in self.patterns.iter().enumerate() {
            if pattern.is_empty() {
                warnings.push(ConfigWarning {
                    level: WarnLevel::Warning,
                    message: format!("patterns[{i}] is empty and will be ignored"),
                });
            }
        }

        if let Some(cmd) = &self.normalizer.command {
            if cmd.first().map_or(true, |p| p.trim().is_empty()) {
                warnings.push(ConfigWarning {
                    level: WarnLevel::Error,
                    message: "normalizer.command must name a program".to_string(),
                });
            }
        }

        if let Some(output) = &self.output {
            let escapes = output.is_absolute()
                || output.components().any(|c| matches!(c, Component::ParentDir));
            if escapes {
                warnings.push(ConfigWarning {
                    level: WarnLevel::Warning,
                    message: format!(
                        "output '{}' may point outside the root; flattened icons there are not rescanned",
                        output.display()
                    ),
                });
            }
        }

        warnings
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn missing_file_yields_defaults() {
        let dir = TempDir::new().unwrap();
        let cfg = Config::load(dir.path()).unwrap();
        assert_eq!(cfg, Config::default());
        assert_eq!(cfg.patterns, vec!["fill=\"#09244B\"".to_string()]);
        assert_eq!(cfg.on_collision, CollisionPolicy::Overwrite);
        assert!(cfg.normalizer.command.is_none());
    }

    #[test]
    fn partial_yaml_fills_defaults() {
        let dir = TempDir::new().unwrap();
        std::fs::write(
            config_path(dir.path()),
            "on_collision: skip\nnormalizer:\n  command: [uvx, picosvg]\n",
        )
        .unwrap();
        let cfg = Config::load(dir.path()).unwrap();
        assert_eq!(cfg.on_collision, CollisionPolicy::Skip);
        assert_eq!(
            cfg.normalizer.command,
            Some(vec!["uvx".to_string(), "picosvg".to_string()])
        );
        assert_eq!(cfg.patterns, default_patterns());
    }

    #[test]
    fn save_then_load_preserves_fields() {
        let dir = TempDir::new().unwrap();
        let cfg = Config {
            patterns: vec!["stroke=\"#000\"".to_string()],
            output: Some(PathBuf::from("flat")),
            on_collision: CollisionPolicy::Error,
            normalizer: NormalizerConfig::default(),
        };
        cfg.save(dir.path()).unwrap();
        assert_eq!(Config::load(dir.path()).unwrap(), cfg);
    }

    #[test]
    fn malformed_yaml_is_an_error() {
        let dir = TempDir::new().unwrap();
        std::fs::write(config_path(dir.path()), "on_collision: sideways\n").unwrap();
        assert!(matches!(
            Config::load(dir.path()),
            Err(SvgflatError::Yaml(_))
        ));
    }

    #[test]
    fn output_dir_resolution() {
        let root = Path::new("/icons");
        let mut cfg = Config::default();
        assert_eq!(cfg.output_dir(root), PathBuf::from("/icons"));
        cfg.output = Some(PathBuf::from("flat"));
        assert_eq!(cfg.output_dir(root), PathBuf::from("/icons/flat"));
        cfg.output = Some(PathBuf::from("/tmp/out"));
        assert_eq!(cfg.output_dir(root), PathBuf::from("/tmp/out"));
    }

    #[test]
    fn collision_policy_parses() {
        assert_eq!("skip".parse::<CollisionPolicy>().unwrap(), CollisionPolicy::Skip);
        assert_eq!(
            "overwrite".parse::<CollisionPolicy>().unwrap(),
            CollisionPolicy::Overwrite
        );
        assert!("clobber".parse::<CollisionPolicy>().is_err());
    }

    #[test]
    fn validate_default_config_no_warnings() {
        assert!(Config::default().validate().is_empty());
    }

    #[test]
    fn validate_flags_empty_command_as_error() {
        let mut cfg = Config::default();
        cfg.normalizer.command = Some(vec![]);
        let warnings = cfg.validate();
        assert!(warnings
            .iter()
            .any(|w| w.level == WarnLevel::Error && w.message.contains("normalizer.command")));
    }

    #[test]
    fn validate_warns_on_empty_pattern_and_escaping_output() {
        let mut cfg = Config::default();
        cfg.patterns.push(String::new());
        cfg.output = Some(PathBuf::from("../elsewhere"));
        let warnings = cfg.validate();
        assert!(warnings.iter().any(|w| w.message.contains("patterns[1]")));
        assert!(warnings.iter().any(|w| w.message.contains("outside the root")));
        assert!(warnings.iter().all(|w| w.level == WarnLevel::Warning));
    }
}
