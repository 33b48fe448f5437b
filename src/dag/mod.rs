// src/dag/mod.rs

//! Task-DAG model and the built-in JSON-to-DOT converter.
//!
//! - [`model`] holds the serde mapping of the task-DAG JSON file.
//! - [`graph`] validates the graph, orders it topologically and prunes
//!   inactive tasks.
//! - [`dot`] renders a [`TaskDag`] as a Graphviz record graph.

pub mod dot;
pub mod graph;
pub mod model;

pub use dot::to_dot;
pub use graph::{Task, TaskDag};
pub use model::{TaskBody, TaskDagFile};

use std::path::Path;

use crate::errors::Result;

/// Load a task-DAG JSON file, drop inactive tasks and return its DOT text.
///
/// This is what `dagviz convert <FILE>` prints.
pub fn convert(path: impl AsRef<Path>) -> Result<String> {
    let mut dag = TaskDag::load(path)?;
    dag.remove_inactive_tasks();
    Ok(to_dot(&dag))
}
