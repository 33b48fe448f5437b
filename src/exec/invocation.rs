// src/exec/invocation.rs

use std::path::PathBuf;

use crate::pipeline::Stage;

/// A fully expanded external tool call for one pipeline stage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub stage: Stage,
    pub program: String,
    pub args: Vec<String>,
    /// File that receives the tool's stdout (created or truncated).
    ///
    /// `None` means stdout is inherited from this process.
    pub stdout_to: Option<PathBuf>,
    /// File the tool is expected to write on its own.
    pub produces: Option<PathBuf>,
}

impl Invocation {
    /// Human readable rendering, e.g. `dot -Tsvg graph.dot -o out.svg`.
    ///
    /// Only used for logs and dry runs; arguments are not shell-quoted.
    pub fn command_line(&self) -> String {
        let mut line = self.program.clone();
        for arg in &self.args {
            line.push(' ');
            line.push_str(arg);
        }
        if let Some(ref path) = self.stdout_to {
            line.push_str(&format!(" > {}", path.display()));
        }
        line
    }
}
