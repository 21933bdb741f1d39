//! Writing cleaned icons into the flat output directory.

use crate::config::CollisionPolicy;
use crate::error::Result;
use crate::io::atomic_write;
use serde::Serialize;
use std::path::{Path, PathBuf};

/// How a source file maps onto its flattened destination.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Placement {
    /// Destination is free: write it, then delete the source.
    Move,
    /// Source already is the destination: rewrite it, keep it.
    InPlace,
    /// Destination holds another file and the policy says replace it.
    Overwrite,
    /// Destination holds another file and the policy says leave both alone.
    Collision,
}

impl Placement {
    pub fn as_str(&self) -> &'static str {
        match self {
            Placement::Move => "move",
            Placement::InPlace => "in_place",
            Placement::Overwrite => "overwrite",
            Placement::Collision => "collision",
        }
    }
}

/// `<output_dir>/<file name of source>`. `None` only for paths with no file name.
pub fn destination(source: &Path, output_dir: &Path) -> Option<PathBuf> {
    source.file_name().map(|name| output_dir.join(name))
}

fn same_file(a: &Path, b: &Path) -> bool {
    if a == b {
        return true;
    }
    match (a.canonicalize(), b.canonicalize()) {
        (Ok(a), Ok(b)) => a == b,
        _ => false,
    }
}

/// Decide what writing `source` to `dest` would do under `policy`.
///
/// `CollisionPolicy::Error` classifies as `Collision`; aborting is up to the caller.
pub fn classify(source: &Path, dest: &Path, policy: CollisionPolicy) -> Placement {
    if same_file(source, dest) {
        Placement::InPlace
    } else if dest.exists() {
        match policy {
            CollisionPolicy::Overwrite => Placement::Overwrite,
            CollisionPolicy::Skip | CollisionPolicy::Error => Placement::Collision,
        }
    } else {
        Placement::Move
    }
}

/// Carry out a placement decided by [`classify`].
///
/// The destination is written atomically before the source is removed, so an
/// interrupted run never loses an icon. In-place rewrites never delete.
pub fn apply(source: &Path, dest: &Path, text: &str, placement: Placement) -> Result<()> {
    match placement {
        Placement::Collision => {}
        Placement::InPlace => {
            atomic_write(dest, text.as_bytes())?;
            tracing::info!(path = %dest.display(), "rewrote in place");
        }
        Placement::Move | Placement::Overwrite => {
            atomic_write(dest, text.as_bytes())?;
            std::fs::remove_file(source)?;
            tracing::info!(from = %source.display(), to = %dest.display(), "relocated");
        }
    }
    Ok(())
}
