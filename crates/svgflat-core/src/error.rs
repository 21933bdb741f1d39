use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SvgflatError {
    #[error("root directory not found: {0}")]
    RootNotFound(PathBuf),

    #[error("no picosvg runner found: install pipx, uv, or picosvg, or set normalizer.command")]
    NoNormalizer,

    #[error("failed to start normalizer '{program}': {reason}")]
    NormalizerSpawnFailed { program: String, reason: String },

    #[error("output collision: {source_path} would overwrite {dest}")]
    Collision { source_path: PathBuf, dest: PathBuf },

    #[error("invalid config: {0}")]
    InvalidConfig(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Walk(#[from] walkdir::Error),

    #[error(transparent)]
    Yaml(#[from] serde_yaml::Error),
}

pub type Result<T> = std::result::Result<T, SvgflatError>;
