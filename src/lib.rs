// src/lib.rs

pub mod cli;
pub mod config;
pub mod dag;
pub mod errors;
pub mod exec;
pub mod logging;
pub mod pipeline;

use std::io::Write;
use std::path::Path;

use tracing::{debug, info};

use crate::cli::{CliArgs, Command};
use crate::config::{ConfigFile, default_config_path, load_or_default};
use crate::errors::Result;
use crate::exec::RealProcessBackend;
use crate::pipeline::{Orchestrator, PipelineConfig, Target};

/// High-level entry point used by `main.rs`.
///
/// This wires together:
/// - config loading (file + CLI overrides)
/// - the orchestrator with the real process backend
/// - the `convert` subcommand, which bypasses the pipeline entirely
pub async fn run(args: CliArgs) -> Result<()> {
    let command = args.command.clone().unwrap_or(Command::Build);

    let target = match command {
        Command::Convert { ref file } => return convert_to_stdout(file),
        Command::Build => Target::Build,
        Command::Generate => Target::Generate,
        Command::Clean => Target::Clean,
    };

    let cfg = resolve_config(&args)?;
    let pipeline = PipelineConfig::from_config(&cfg)?;
    let mut orchestrator = Orchestrator::new(pipeline, RealProcessBackend::new());

    if args.dry_run {
        println!("dagviz dry-run ({target:?})");
        for step in orchestrator.plan(target) {
            println!("  {step}");
        }
        return Ok(());
    }

    match target {
        Target::Build => {
            let report = orchestrator.run_default().await?;
            info!(
                output = ?report.output,
                digest = %report.intermediate_digest,
                "image rendered"
            );
        }
        Target::Generate => {
            let report = orchestrator.generate_only().await?;
            info!(
                intermediate = ?report.intermediate,
                digest = %report.intermediate_digest,
                "graph description generated"
            );
        }
        Target::Clean => {
            let report = orchestrator.clean()?;
            info!(
                removed = report.removed.len(),
                absent = report.absent.len(),
                "clean finished"
            );
        }
    }

    Ok(())
}

/// Build the validated configuration for this invocation.
///
/// CLI path flags override values from the config file, which override the
/// built-in defaults.
pub fn resolve_config(args: &CliArgs) -> Result<ConfigFile> {
    let (path, explicit) = match args.config {
        Some(ref path) => (path.clone(), true),
        None => (default_config_path(), false),
    };

    let mut raw = load_or_default(&path, explicit)?;

    if let Some(ref tdag) = args.tdag_file {
        raw.paths.tdag_file = tdag.clone();
    }
    if let Some(ref svg) = args.svg_file {
        raw.paths.svg_file = svg.clone();
    }
    if let Some(ref dot) = args.dot_file {
        raw.paths.dot_file = dot.clone();
    }

    debug!(paths = ?raw.paths, "resolved pipeline paths");
    ConfigFile::try_from(raw)
}

fn convert_to_stdout(file: &Path) -> Result<()> {
    let dot = dag::convert(file)?;
    let mut stdout = std::io::stdout().lock();
    writeln!(stdout, "{dot}")?;
    stdout.flush()?;
    Ok(())
}
