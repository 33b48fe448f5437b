// src/pipeline/stage.rs

use std::fmt;

/// One of the three steps of a build.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stage {
    Clean,
    Generate,
    Render,
}

impl Stage {
    pub fn as_str(&self) -> &'static str {
        match self {
            Stage::Clean => "clean",
            Stage::Generate => "generate",
            Stage::Render => "render",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How far a pipeline run has progressed.
///
/// Runs only ever move forward through these states:
///
/// `NotStarted -> Cleaned -> Generated -> Rendered -> Done`
///
/// A failed stage leaves the state at the last stage that completed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum PipelineState {
    NotStarted,
    Cleaned,
    Generated,
    Rendered,
    Done,
}

impl PipelineState {
    /// State reached once `stage` has completed successfully.
    pub fn after(stage: Stage) -> Self {
        match stage {
            Stage::Clean => PipelineState::Cleaned,
            Stage::Generate => PipelineState::Generated,
            Stage::Render => PipelineState::Rendered,
        }
    }

    /// Advance to the state following `stage`.
    ///
    /// Panics in debug builds if this would move the pipeline backwards.
    pub fn advance(&mut self, stage: Stage) {
        let next = Self::after(stage);
        debug_assert!(next > *self, "pipeline moved backwards: {self:?} -> {next:?}");
        *self = next;
    }
}

/// Result of a single external tool invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StageOutcome {
    Success,
    Failed(i32), // exit code, -1 if terminated by a signal
}

impl StageOutcome {
    pub fn from_status(status: std::process::ExitStatus) -> Self {
        if status.success() {
            StageOutcome::Success
        } else {
            StageOutcome::Failed(status.code().unwrap_or(-1))
        }
    }
}
