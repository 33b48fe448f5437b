// src/config/validate.rs

use std::path::{Component, Path};

use crate::config::model::{ConfigFile, RawConfigFile};
use crate::errors::{DagvizError, Result};
use crate::pipeline::template::placeholders;

const GENERATOR_PLACEHOLDERS: &[&str] = &["input", "output"];
const RENDERER_PLACEHOLDERS: &[&str] = &["input", "output", "format"];

impl TryFrom<RawConfigFile> for ConfigFile {
    type Error = DagvizError;

    fn try_from(raw: RawConfigFile) -> std::result::Result<Self, Self::Error> {
        validate_raw_config(&raw)?;
        Ok(ConfigFile::new_unchecked(raw.paths, raw.generator, raw.renderer))
    }
}

fn validate_raw_config(cfg: &RawConfigFile) -> Result<()> {
    validate_paths(cfg)?;
    validate_generator(cfg)?;
    validate_renderer(cfg)?;
    Ok(())
}

fn validate_paths(cfg: &RawConfigFile) -> Result<()> {
    let named = [
        ("tdag_file", cfg.paths.tdag_file.as_path()),
        ("dot_file", cfg.paths.dot_file.as_path()),
        ("svg_file", cfg.paths.svg_file.as_path()),
    ];

    for (key, path) in named {
        if path.as_os_str().is_empty() {
            return Err(DagvizError::ConfigError(format!(
                "[paths].{key} must not be empty"
            )));
        }
    }

    // Cleanup deletes dot_file and svg_file, so neither may alias the input
    // or each other.
    for (i, (key_a, path_a)) in named.iter().enumerate() {
        for (key_b, path_b) in named.iter().skip(i + 1) {
            if same_path(path_a, path_b) {
                return Err(DagvizError::ConfigError(format!(
                    "[paths].{key_a} and [paths].{key_b} both point to {:?}",
                    path_a
                )));
            }
        }
    }

    Ok(())
}

fn same_path(a: &Path, b: &Path) -> bool {
    fn significant(p: &Path) -> Vec<Component<'_>> {
        p.components()
            .filter(|c| !matches!(c, Component::CurDir))
            .collect()
    }
    significant(a) == significant(b)
}

fn validate_generator(cfg: &RawConfigFile) -> Result<()> {
    if let Some(ref program) = cfg.generator.program {
        if program.trim().is_empty() {
            return Err(DagvizError::ConfigError(
                "[generator].program must not be empty when set".to_string(),
            ));
        }
    }

    check_placeholders(
        "generator",
        &cfg.generator.effective_args(),
        GENERATOR_PLACEHOLDERS,
    )
}

fn validate_renderer(cfg: &RawConfigFile) -> Result<()> {
    if cfg.renderer.program.trim().is_empty() {
        return Err(DagvizError::ConfigError(
            "[renderer].program must not be empty".to_string(),
        ));
    }

    if cfg.renderer.format.trim().is_empty() {
        return Err(DagvizError::ConfigError(
            "[renderer].format must not be empty".to_string(),
        ));
    }

    check_placeholders("renderer", &cfg.renderer.args, RENDERER_PLACEHOLDERS)
}

fn check_placeholders(section: &str, args: &[String], allowed: &[&str]) -> Result<()> {
    for arg in args {
        for name in placeholders(arg) {
            if !allowed.contains(&name.as_str()) {
                return Err(DagvizError::ConfigError(format!(
                    "[{section}].args uses unknown placeholder '{{{name}}}' (allowed: {})",
                    allowed.join(", ")
                )));
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;

    #[test]
    fn defaults_are_valid() {
        assert!(ConfigFile::try_from(RawConfigFile::default()).is_ok());
    }

    #[test]
    fn output_may_not_overwrite_input() {
        let mut raw = RawConfigFile::default();
        raw.paths.svg_file = PathBuf::from("./task_DAG.json");

        match ConfigFile::try_from(raw) {
            Err(DagvizError::ConfigError(msg)) => {
                assert!(msg.contains("tdag_file"));
                assert!(msg.contains("svg_file"));
            }
            other => panic!("expected ConfigError, got {other:?}"),
        }
    }

    #[test]
    fn same_path_ignores_current_dir_components() {
        assert!(same_path(Path::new("./out/a.svg"), Path::new("out/./a.svg")));
        assert!(!same_path(Path::new("out/a.svg"), Path::new("a.svg")));
    }

    #[test]
    fn empty_path_is_rejected() {
        let mut raw = RawConfigFile::default();
        raw.paths.dot_file = PathBuf::new();
        assert!(matches!(
            ConfigFile::try_from(raw),
            Err(DagvizError::ConfigError(_))
        ));
    }

    #[test]
    fn unknown_placeholder_is_rejected() {
        let mut raw = RawConfigFile::default();
        raw.renderer.args = vec!["{input}".to_string(), "{dpi}".to_string()];

        match ConfigFile::try_from(raw) {
            Err(DagvizError::ConfigError(msg)) => assert!(msg.contains("{dpi}")),
            other => panic!("expected ConfigError, got {other:?}"),
        }
    }

    #[test]
    fn generator_may_not_use_format() {
        let mut raw = RawConfigFile::default();
        raw.generator.args = Some(vec!["{format}".to_string()]);
        assert!(ConfigFile::try_from(raw).is_err());
    }
}
