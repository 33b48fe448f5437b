// src/cli.rs

//! CLI argument parsing using `clap`.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

/// Command-line arguments for `dagviz`.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "dagviz",
    version,
    about = "Render a task-dependency-graph JSON file as an SVG via Graphviz.",
    long_about = None
)]
pub struct CliArgs {
    /// What to do. Defaults to `build`.
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Path to the config file (TOML).
    ///
    /// Default: `Dagviz.toml` in the current working directory, used only if
    /// it exists.
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Task-DAG JSON input (`TDAG_FILE_NAME`).
    #[arg(long, global = true, value_name = "PATH")]
    pub tdag_file: Option<PathBuf>,

    /// Rendered image output (`SVG_FILE_NAME`).
    #[arg(long, global = true, value_name = "PATH")]
    pub svg_file: Option<PathBuf>,

    /// Intermediate graph description file.
    #[arg(long, global = true, value_name = "PATH")]
    pub dot_file: Option<PathBuf>,

    /// Logging level (error, warn, info, debug, trace).
    ///
    /// If omitted, `DAGVIZ_LOG` or a default level will be used.
    #[arg(long, global = true, value_enum, value_name = "LEVEL")]
    pub log_level: Option<LogLevel>,

    /// Print the steps that would run without touching any file.
    #[arg(long, global = true)]
    pub dry_run: bool,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Clean, generate the graph description, render the image.
    Build,
    /// Clean and generate the graph description only.
    Generate,
    /// Delete the graph description and the rendered image.
    Clean,
    /// Convert a task-DAG JSON file to DOT on stdout.
    Convert {
        /// Task-DAG JSON file to read.
        file: PathBuf,
    },
}

/// Log level as exposed on the CLI.
#[derive(Debug, Copy, Clone, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// Convenience wrapper around `CliArgs::parse()`.
pub fn parse() -> CliArgs {
    CliArgs::parse()
}
