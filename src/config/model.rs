// src/config/model.rs

use std::path::PathBuf;

use serde::Deserialize;

/// Default path of the task-DAG JSON input (`TDAG_FILE_NAME`).
pub const DEFAULT_TDAG_FILE: &str = "task_DAG.json";
/// Default path of the rendered image (`SVG_FILE_NAME`).
pub const DEFAULT_SVG_FILE: &str = "output.svg";
/// Default path of the intermediate graph description.
pub const DEFAULT_DOT_FILE: &str = "task_DAG.dot";

/// Top-level configuration as read from a TOML file.
///
/// ```toml
/// [paths]
/// tdag_file = "task_DAG.json"
/// svg_file = "output.svg"
/// dot_file = "task_DAG.dot"
///
/// [generator]
/// program = "python3"
/// args = ["convert_dag.py", "{input}"]
///
/// [renderer]
/// program = "dot"
/// args = ["-T{format}", "{input}", "-o", "{output}"]
/// format = "svg"
/// ```
///
/// All sections are optional and have reasonable defaults. This is the raw
/// deserialized form; use `ConfigFile::try_from` to validate it.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawConfigFile {
    #[serde(default)]
    pub paths: PathsSection,

    #[serde(default)]
    pub generator: GeneratorSection,

    #[serde(default)]
    pub renderer: RendererSection,
}

/// Validated configuration.
///
/// Can only be obtained through `TryFrom<RawConfigFile>` (see
/// `config::validate`), so holders may rely on its invariants: non-empty,
/// pairwise distinct paths and argument templates with known placeholders.
#[derive(Debug, Clone)]
pub struct ConfigFile {
    pub paths: PathsSection,
    pub generator: GeneratorSection,
    pub renderer: RendererSection,
}

impl ConfigFile {
    pub(crate) fn new_unchecked(
        paths: PathsSection,
        generator: GeneratorSection,
        renderer: RendererSection,
    ) -> Self {
        Self {
            paths,
            generator,
            renderer,
        }
    }
}

/// `[paths]` section.
#[derive(Debug, Clone, Deserialize)]
pub struct PathsSection {
    /// Task-DAG JSON input. Never written or deleted.
    #[serde(default = "default_tdag_file")]
    pub tdag_file: PathBuf,

    /// Rendered image output.
    #[serde(default = "default_svg_file")]
    pub svg_file: PathBuf,

    /// Intermediate graph description written by the generator.
    #[serde(default = "default_dot_file")]
    pub dot_file: PathBuf,
}

fn default_tdag_file() -> PathBuf {
    PathBuf::from(DEFAULT_TDAG_FILE)
}

fn default_svg_file() -> PathBuf {
    PathBuf::from(DEFAULT_SVG_FILE)
}

fn default_dot_file() -> PathBuf {
    PathBuf::from(DEFAULT_DOT_FILE)
}

impl Default for PathsSection {
    fn default() -> Self {
        Self {
            tdag_file: default_tdag_file(),
            svg_file: default_svg_file(),
            dot_file: default_dot_file(),
        }
    }
}

/// `[generator]` section.
///
/// When `program` is omitted the generator is this executable's own
/// `convert` subcommand.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct GeneratorSection {
    #[serde(default)]
    pub program: Option<String>,

    /// Argument template; `{input}` and `{output}` are substituted.
    #[serde(default)]
    pub args: Option<Vec<String>>,
}

impl GeneratorSection {
    /// Arguments to use when none are configured.
    ///
    /// The built-in converter needs its subcommand name; a custom program is
    /// handed the input path as its sole argument.
    pub fn effective_args(&self) -> Vec<String> {
        match (&self.args, &self.program) {
            (Some(args), _) => args.clone(),
            (None, None) => vec!["convert".to_string(), "{input}".to_string()],
            (None, Some(_)) => vec!["{input}".to_string()],
        }
    }
}

/// `[renderer]` section.
#[derive(Debug, Clone, Deserialize)]
pub struct RendererSection {
    #[serde(default = "default_renderer_program")]
    pub program: String,

    /// Argument template; `{input}`, `{output}` and `{format}` are substituted.
    #[serde(default = "default_renderer_args")]
    pub args: Vec<String>,

    /// Output format handed to the renderer (`-Tsvg` for Graphviz).
    #[serde(default = "default_renderer_format")]
    pub format: String,
}

fn default_renderer_program() -> String {
    "dot".to_string()
}

fn default_renderer_args() -> Vec<String> {
    ["-T{format}", "{input}", "-o", "{output}"]
        .iter()
        .map(|s| s.to_string())
        .collect()
}

fn default_renderer_format() -> String {
    "svg".to_string()
}

impl Default for RendererSection {
    fn default() -> Self {
        Self {
            program: default_renderer_program(),
            args: default_renderer_args(),
            format: default_renderer_format(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_toml_yields_defaults() {
        let raw: RawConfigFile = toml::from_str("").unwrap();
        assert_eq!(raw.paths.tdag_file, PathBuf::from("task_DAG.json"));
        assert_eq!(raw.paths.svg_file, PathBuf::from("output.svg"));
        assert_eq!(raw.renderer.program, "dot");
        assert_eq!(raw.renderer.format, "svg");
        assert!(raw.generator.program.is_none());
    }

    #[test]
    fn generator_args_depend_on_program() {
        let builtin = GeneratorSection::default();
        assert_eq!(builtin.effective_args(), vec!["convert", "{input}"]);

        let custom = GeneratorSection {
            program: Some("python3".to_string()),
            args: None,
        };
        assert_eq!(custom.effective_args(), vec!["{input}"]);
    }
}
