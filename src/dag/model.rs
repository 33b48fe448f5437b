// src/dag/model.rs

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use anyhow::Context;
use serde::Deserialize;
use serde_json::{Map, Value};

use crate::errors::Result;

/// Task-DAG JSON file: task name -> task body.
///
/// ```json
/// {
///   "fetch": {"data": {"status": "done"}},
///   "build": {"deps": ["fetch"], "data": {"target": "release"}}
/// }
/// ```
///
/// Keys are kept sorted so that everything derived from the file is
/// deterministic.
pub type TaskDagFile = BTreeMap<String, TaskBody>;

/// Body of a single task. Unknown keys are ignored.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct TaskBody {
    /// Names of the tasks this one depends on.
    #[serde(default)]
    pub deps: Vec<String>,

    /// Free-form task parameters, in document order. `status` is
    /// interpreted by
    /// [`TaskDag::remove_inactive_tasks`](crate::dag::TaskDag::remove_inactive_tasks).
    #[serde(default)]
    pub data: Map<String, Value>,
}

pub fn parse_task_dag(json: &str) -> Result<TaskDagFile> {
    Ok(serde_json::from_str(json)?)
}

pub fn read_task_dag(path: impl AsRef<Path>) -> Result<TaskDagFile> {
    let path = path.as_ref();
    let contents =
        fs::read_to_string(path).with_context(|| format!("reading task DAG {:?}", path))?;
    parse_task_dag(&contents)
}
