// src/pipeline/mod.rs

//! The clean -> generate -> render pipeline.
//!
//! - [`stage`] names the stages and the linear states a run moves through.
//! - [`config`] turns the validated [`ConfigFile`](crate::config::ConfigFile)
//!   into the explicit `PipelineConfig` the orchestrator is built with.
//! - [`template`] expands `{placeholder}`s in tool argument templates.
//! - [`cleanup`] deletes generated artifacts.
//! - [`digest`] fingerprints the intermediate file.
//! - [`orchestrator`] sequences the stages and propagates failures.

pub mod cleanup;
pub mod config;
pub mod digest;
pub mod orchestrator;
pub mod stage;
pub mod template;

pub use cleanup::{CleanReport, Removal, remove_artifact};
pub use config::{PipelineConfig, ToolCommand};
pub use orchestrator::{Orchestrator, RunReport};
pub use stage::{PipelineState, Stage, StageOutcome};

/// Named entry points of the pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Target {
    /// Clean, generate and render.
    Build,
    /// Clean and generate; no rendering.
    Generate,
    /// Delete generated artifacts only.
    Clean,
}

impl Target {
    /// Stages this target runs, in execution order.
    pub fn stages(&self) -> &'static [Stage] {
        match self {
            Target::Build => &[Stage::Clean, Stage::Generate, Stage::Render],
            Target::Generate => &[Stage::Clean, Stage::Generate],
            Target::Clean => &[Stage::Clean],
        }
    }
}
