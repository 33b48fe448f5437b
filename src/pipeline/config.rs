// src/pipeline/config.rs

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::config::ConfigFile;
use crate::config::model::{
    DEFAULT_DOT_FILE, GeneratorSection, RawConfigFile, RendererSection,
};
use crate::errors::Result;
use crate::exec::Invocation;
use crate::pipeline::Stage;
use crate::pipeline::template::expand;

/// An external tool: program plus unexpanded argument template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolCommand {
    pub program: String,
    pub args: Vec<String>,
}

impl ToolCommand {
    pub fn new<I, S>(program: impl Into<String>, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            program: program.into(),
            args: args.into_iter().map(Into::into).collect(),
        }
    }
}

/// Everything the orchestrator needs to know, passed in explicitly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineConfig {
    /// Task-DAG JSON input; only ever read.
    pub input: PathBuf,
    /// Intermediate graph description; generator stdout lands here.
    pub intermediate: PathBuf,
    /// Rendered image.
    pub output: PathBuf,
    pub generator: ToolCommand,
    pub renderer: ToolCommand,
    /// Substituted for `{format}` in the renderer arguments.
    pub format: String,
}

impl PipelineConfig {
    /// Default pipeline for the given input and output paths: this
    /// executable's `convert` as generator, `dot -Tsvg` as renderer.
    pub fn new(input: impl Into<PathBuf>, output: impl Into<PathBuf>) -> Result<Self> {
        let mut raw = RawConfigFile::default();
        raw.paths.tdag_file = input.into();
        raw.paths.svg_file = output.into();
        raw.paths.dot_file = PathBuf::from(DEFAULT_DOT_FILE);
        let cfg = ConfigFile::try_from(raw)?;
        Self::from_config(&cfg)
    }

    pub fn from_config(cfg: &ConfigFile) -> Result<Self> {
        Ok(Self {
            input: cfg.paths.tdag_file.clone(),
            intermediate: cfg.paths.dot_file.clone(),
            output: cfg.paths.svg_file.clone(),
            generator: generator_command(&cfg.generator)?,
            renderer: renderer_command(&cfg.renderer),
            format: cfg.renderer.format.clone(),
        })
    }

    /// Generation: `<generator> {input}` with stdout redirected to the
    /// intermediate file.
    pub fn generate_invocation(&self) -> Invocation {
        let values = self.placeholder_values(&self.input, &self.intermediate);
        Invocation {
            stage: Stage::Generate,
            program: self.generator.program.clone(),
            args: expand_all(&self.generator.args, &values),
            stdout_to: Some(self.intermediate.clone()),
            produces: None,
        }
    }

    /// Rendering: `<renderer>` reading the intermediate file and writing the
    /// output image itself.
    pub fn render_invocation(&self) -> Invocation {
        let values = self.placeholder_values(&self.intermediate, &self.output);
        Invocation {
            stage: Stage::Render,
            program: self.renderer.program.clone(),
            args: expand_all(&self.renderer.args, &values),
            stdout_to: None,
            produces: Some(self.output.clone()),
        }
    }

    /// Files the clean stage deletes. The input is never among them.
    pub fn artifacts(&self) -> [&Path; 2] {
        [self.intermediate.as_path(), self.output.as_path()]
    }

    fn placeholder_values(&self, input: &Path, output: &Path) -> HashMap<&'static str, String> {
        let mut values = HashMap::new();
        values.insert("input", input.display().to_string());
        values.insert("output", output.display().to_string());
        values.insert("format", self.format.clone());
        values
    }
}

fn expand_all(args: &[String], values: &HashMap<&str, String>) -> Vec<String> {
    args.iter().map(|arg| expand(arg, values)).collect()
}

fn generator_command(section: &GeneratorSection) -> Result<ToolCommand> {
    let program = match section.program {
        Some(ref program) => program.clone(),
        None => std::env::current_exe()?.display().to_string(),
    };
    Ok(ToolCommand::new(program, section.effective_args()))
}

fn renderer_command(section: &RendererSection) -> ToolCommand {
    ToolCommand::new(section.program.clone(), section.args.clone())
}
