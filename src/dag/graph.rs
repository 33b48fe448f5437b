// src/dag/graph.rs

use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;

use petgraph::algo::toposort;
use petgraph::graphmap::DiGraphMap;
use serde_json::{Map, Value};
use tracing::{debug, info};

use crate::dag::model::{TaskDagFile, parse_task_dag, read_task_dag};
use crate::errors::{DagvizError, Result};

/// `data.status` values that mark a task (and everything below it) inactive.
const INACTIVE_STATUSES: &[&str] = &["done", "failed"];

/// A task in the validated graph.
#[derive(Debug, Clone, PartialEq)]
pub struct Task {
    pub name: String,
    pub data: Map<String, Value>,
    /// Direct dependencies, in the order they were listed.
    pub deps: Vec<String>,
    /// Direct dependents: tasks that list this one in their `deps`.
    pub dependents: Vec<String>,
}

/// Validated, acyclic task graph.
///
/// Tasks are kept in a fixed topological order (dependencies before
/// dependents) which is deterministic for a given input file.
#[derive(Debug, Clone)]
pub struct TaskDag {
    tasks: BTreeMap<String, Task>,
    order: Vec<String>,
}

impl TaskDag {
    /// Build and validate a DAG from a parsed task-DAG file.
    ///
    /// Fails if a dependency names an unknown task or the graph has a cycle
    /// (self-dependencies included).
    pub fn from_file(file: TaskDagFile) -> Result<Self> {
        for (name, body) in file.iter() {
            for dep in body.deps.iter() {
                if !file.contains_key(dep) {
                    return Err(DagvizError::UnknownDependency {
                        task: name.clone(),
                        dependency: dep.clone(),
                    });
                }
            }
        }

        let order = topological_order(&file)?;

        let mut tasks: BTreeMap<String, Task> = file
            .into_iter()
            .map(|(name, body)| {
                let mut seen = BTreeSet::new();
                let deps = body
                    .deps
                    .into_iter()
                    .filter(|dep| seen.insert(dep.clone()))
                    .collect();
                let task = Task {
                    name: name.clone(),
                    data: body.data,
                    deps,
                    dependents: Vec::new(),
                };
                (name, task)
            })
            .collect();

        // Populate dependents in topological order so the lists are stable.
        for name in order.iter() {
            let deps = tasks
                .get(name)
                .map(|t| t.deps.clone())
                .unwrap_or_default();
            for dep in deps {
                if let Some(dep_task) = tasks.get_mut(&dep) {
                    dep_task.dependents.push(name.clone());
                }
            }
        }

        debug!(tasks = order.len(), "task DAG validated");
        Ok(Self { tasks, order })
    }

    pub fn from_json_str(json: &str) -> Result<Self> {
        Self::from_file(parse_task_dag(json)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        Self::from_file(read_task_dag(path)?)
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn get(&self, name: &str) -> Option<&Task> {
        self.tasks.get(name)
    }

    /// All tasks, dependencies first.
    pub fn tasks(&self) -> impl Iterator<Item = &Task> {
        self.order.iter().filter_map(|name| self.tasks.get(name))
    }

    /// Total number of dependency edges.
    pub fn edge_count(&self) -> usize {
        self.tasks.values().map(|t| t.deps.len()).sum()
    }

    /// Tasks with no remaining dependencies: the ones that could run now.
    pub fn current_tasks(&self) -> Vec<&str> {
        self.tasks()
            .filter(|t| t.deps.is_empty())
            .map(|t| t.name.as_str())
            .collect()
    }

    /// Tasks nothing depends on: the end points of the graph.
    pub fn final_tasks(&self) -> Vec<&str> {
        self.tasks()
            .filter(|t| t.dependents.is_empty())
            .map(|t| t.name.as_str())
            .collect()
    }

    /// Drop every task whose `data.status` is `done` or `failed`, together
    /// with everything it (transitively) depends on.
    ///
    /// Surviving tasks lose their links to removed tasks. Returns the removed
    /// task names in topological order.
    pub fn remove_inactive_tasks(&mut self) -> Vec<String> {
        let mut inactive: BTreeSet<String> = BTreeSet::new();
        let mut stack: Vec<String> = self
            .tasks()
            .filter(|t| is_inactive(t))
            .map(|t| t.name.clone())
            .collect();

        while let Some(name) = stack.pop() {
            if !inactive.insert(name.clone()) {
                continue;
            }
            if let Some(task) = self.tasks.get(&name) {
                stack.extend(task.deps.iter().cloned());
            }
        }

        if inactive.is_empty() {
            return Vec::new();
        }

        for name in inactive.iter() {
            self.tasks.remove(name);
        }
        for task in self.tasks.values_mut() {
            task.deps.retain(|d| !inactive.contains(d));
            task.dependents.retain(|d| !inactive.contains(d));
        }

        let (removed, kept): (Vec<String>, Vec<String>) = std::mem::take(&mut self.order)
            .into_iter()
            .partition(|name| inactive.contains(name));
        self.order = kept;

        info!(removed = ?removed, "removed inactive tasks");
        removed
    }
}

impl Task {
    /// The `data.status` value, if it is a string.
    pub fn status(&self) -> Option<&str> {
        self.data.get("status").and_then(Value::as_str)
    }
}

fn is_inactive(task: &Task) -> bool {
    task.status().is_some_and(|s| INACTIVE_STATUSES.contains(&s))
}

/// Dependency-first ordering of all tasks.
///
/// Edge direction: dep -> task. For `"B": {"deps": ["A"]}` we add A -> B.
fn topological_order(file: &TaskDagFile) -> Result<Vec<String>> {
    let mut graph: DiGraphMap<&str, ()> = DiGraphMap::new();

    for name in file.keys() {
        graph.add_node(name.as_str());
    }

    for (name, body) in file.iter() {
        for dep in body.deps.iter() {
            graph.add_edge(dep.as_str(), name.as_str(), ());
        }
    }

    match toposort(&graph, None) {
        Ok(order) => Ok(order.into_iter().map(str::to_string).collect()),
        Err(cycle) => Err(DagvizError::DagCycle(format!(
            "cycle detected in task DAG involving task '{}'",
            cycle.node_id()
        ))),
    }
}
