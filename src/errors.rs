// src/errors.rs

//! Crate-wide error type and result alias.

use std::path::PathBuf;

use thiserror::Error;

use crate::pipeline::Stage;

#[derive(Error, Debug)]
pub enum DagvizError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error("JSON parsing error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("Task '{task}' depends on unknown task '{dependency}'")]
    UnknownDependency { task: String, dependency: String },

    #[error("Cycle detected in task DAG: {0}")]
    DagCycle(String),

    #[error("{stage} stage could not start '{program}': {source}")]
    StageSpawn {
        stage: Stage,
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("{stage} stage failed with exit code {code}")]
    StageFailed { stage: Stage, code: i32 },

    #[error("Failed to remove {path:?}: {source}")]
    Cleanup {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl DagvizError {
    /// Process exit code to report for this error.
    ///
    /// A stage that exited non-zero hands its own code through; everything
    /// else (including signal termination, reported as -1) maps to 1.
    pub fn exit_code(&self) -> i32 {
        match self {
            DagvizError::StageFailed { code, .. } if *code > 0 => *code,
            _ => 1,
        }
    }
}

pub type Result<T> = std::result::Result<T, DagvizError>;
