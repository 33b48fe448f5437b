// src/pipeline/cleanup.rs

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::errors::{DagvizError, Result};

/// What happened to a single cleanup target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Removal {
    Removed,
    Absent,
}

/// Summary of a clean stage.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CleanReport {
    pub removed: Vec<PathBuf>,
    pub absent: Vec<PathBuf>,
}

impl CleanReport {
    pub fn record(&mut self, path: &Path, removal: Removal) {
        match removal {
            Removal::Removed => self.removed.push(path.to_path_buf()),
            Removal::Absent => self.absent.push(path.to_path_buf()),
        }
    }
}

/// Delete a generated artifact.
///
/// A missing file counts as success. Any other failure (permissions, the path
/// being a directory, ...) is returned as [`DagvizError::Cleanup`].
pub fn remove_artifact(path: &Path) -> Result<Removal> {
    match fs::remove_file(path) {
        Ok(()) => {
            info!(path = ?path, "removed artifact");
            Ok(Removal::Removed)
        }
        Err(e) if e.kind() == ErrorKind::NotFound => {
            debug!(path = ?path, "artifact not present, nothing to remove");
            Ok(Removal::Absent)
        }
        Err(source) => Err(DagvizError::Cleanup {
            path: path.to_path_buf(),
            source,
        }),
    }
}
