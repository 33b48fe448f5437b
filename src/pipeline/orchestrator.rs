// src/pipeline/orchestrator.rs

use std::path::{Path, PathBuf};

use tracing::{debug, error, info, warn};

use crate::errors::{DagvizError, Result};
use crate::exec::{Invocation, ProcessBackend};
use crate::pipeline::cleanup::{CleanReport, remove_artifact};
use crate::pipeline::config::PipelineConfig;
use crate::pipeline::digest::file_digest;
use crate::pipeline::stage::{PipelineState, Stage, StageOutcome};
use crate::pipeline::Target;

/// Outcome of a successful `run_default` or `generate_only`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunReport {
    pub state: PipelineState,
    pub clean: CleanReport,
    pub intermediate: PathBuf,
    /// BLAKE3 hex digest of the intermediate file.
    pub intermediate_digest: String,
    /// Rendered image; `None` when rendering was not part of the run.
    pub output: Option<PathBuf>,
}

/// Sequences clean, generate and render.
///
/// Stages run strictly one after another: each external tool is awaited
/// before the next stage starts, and the first failure aborts the rest.
pub struct Orchestrator<B: ProcessBackend> {
    config: PipelineConfig,
    backend: B,
    state: PipelineState,
}

impl<B: ProcessBackend> Orchestrator<B> {
    pub fn new(config: PipelineConfig, backend: B) -> Self {
        Self {
            config,
            backend,
            state: PipelineState::NotStarted,
        }
    }

    /// State reached by the most recent operation.
    pub fn state(&self) -> PipelineState {
        self.state
    }

    /// Clean, generate, render.
    pub async fn run_default(&mut self) -> Result<RunReport> {
        info!(
            input = ?self.config.input,
            output = ?self.config.output,
            "starting full build"
        );
        self.state = PipelineState::NotStarted;

        let clean = self.clean_stage()?;
        let intermediate_digest = self.generate_stage().await?;
        self.render_stage().await?;
        self.state = PipelineState::Done;

        info!(output = ?self.config.output, "build finished");
        Ok(RunReport {
            state: self.state,
            clean,
            intermediate: self.config.intermediate.clone(),
            intermediate_digest,
            output: Some(self.config.output.clone()),
        })
    }

    /// Clean and generate the intermediate file; no rendering.
    pub async fn generate_only(&mut self) -> Result<RunReport> {
        info!(input = ?self.config.input, "generating intermediate file");
        self.state = PipelineState::NotStarted;

        let clean = self.clean_stage()?;
        let intermediate_digest = self.generate_stage().await?;

        Ok(RunReport {
            state: self.state,
            clean,
            intermediate: self.config.intermediate.clone(),
            intermediate_digest,
            output: None,
        })
    }

    /// Delete the intermediate and output files if present.
    pub fn clean(&mut self) -> Result<CleanReport> {
        self.state = PipelineState::NotStarted;
        self.clean_stage()
    }

    /// Invocations `target` would perform, without running anything.
    pub fn plan(&self, target: Target) -> Vec<String> {
        target
            .stages()
            .iter()
            .map(|stage| match stage {
                Stage::Clean => {
                    let [intermediate, output] = self.config.artifacts();
                    format!(
                        "clean: remove {} {}",
                        intermediate.display(),
                        output.display()
                    )
                }
                Stage::Generate => format!(
                    "generate: {}",
                    self.config.generate_invocation().command_line()
                ),
                Stage::Render => format!(
                    "render: {}",
                    self.config.render_invocation().command_line()
                ),
            })
            .collect()
    }

    fn clean_stage(&mut self) -> Result<CleanReport> {
        let mut report = CleanReport::default();
        for path in self.config.artifacts() {
            let removal = remove_artifact(path)?;
            report.record(path, removal);
        }
        self.state.advance(Stage::Clean);
        Ok(report)
    }

    /// Run the generator; returns the digest of the intermediate file.
    ///
    /// On failure the partially written intermediate file is removed.
    async fn generate_stage(&mut self) -> Result<String> {
        let invocation = self.config.generate_invocation();
        if let Err(err) = self.run_tool(&invocation).await {
            self.discard(&self.config.intermediate);
            return Err(err);
        }

        let digest = file_digest(&self.config.intermediate)?;
        debug!(digest = %digest, path = ?self.config.intermediate, "intermediate file written");
        self.state.advance(Stage::Generate);
        Ok(digest)
    }

    /// Run the renderer. On failure nothing is left at the output path.
    async fn render_stage(&mut self) -> Result<()> {
        let invocation = self.config.render_invocation();
        if let Err(err) = self.run_tool(&invocation).await {
            self.discard(&self.config.output);
            return Err(err);
        }

        if let Some(ref produced) = invocation.produces {
            if !produced.exists() {
                warn!(
                    path = ?produced,
                    "renderer exited successfully but did not write the output file"
                );
            }
        }

        self.state.advance(Stage::Render);
        Ok(())
    }

    async fn run_tool(&mut self, invocation: &Invocation) -> Result<()> {
        debug!(stage = %invocation.stage, cmd = %invocation.command_line(), "running stage");

        match self.backend.run(invocation).await? {
            StageOutcome::Success => Ok(()),
            StageOutcome::Failed(code) => {
                error!(stage = %invocation.stage, exit_code = code, "stage failed");
                Err(DagvizError::StageFailed {
                    stage: invocation.stage,
                    code,
                })
            }
        }
    }

    /// Best-effort removal of a file left behind by a failed stage.
    fn discard(&self, path: &Path) {
        if let Err(err) = remove_artifact(path) {
            warn!(path = ?path, error = %err, "could not remove leftover file");
        }
    }
}
