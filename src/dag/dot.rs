// src/dag/dot.rs

use std::collections::HashMap;
use std::fmt::Write;

use serde_json::Value;

use crate::dag::graph::{Task, TaskDag};

const HEADER: &str = "digraph graphname {\nrankdir=LR;\nnode[shape=record];\n";

/// Render the DAG as a left-to-right Graphviz record graph.
///
/// Nodes are named `task_<i>` by their position in the DAG's topological
/// order. Each node line is followed by one edge line per dependency:
///
/// ```text
/// digraph graphname {
/// rankdir=LR;
/// node[shape=record];
///
/// task_0 [label="A" shape=Mrecord]
/// task_1 [label="B | {retries | 3}" shape=Mrecord]
/// task_0 -> task_1;
/// }
/// ```
///
/// The result carries no trailing newline.
pub fn to_dot(dag: &TaskDag) -> String {
    let ids: HashMap<&str, String> = dag
        .tasks()
        .enumerate()
        .map(|(i, task)| (task.name.as_str(), format!("task_{i}")))
        .collect();

    let mut body = String::new();
    for task in dag.tasks() {
        let id = &ids[task.name.as_str()];
        let _ = write!(body, "\n{id} [label=\"{}\" shape=Mrecord]", label(task));
        for dep in task.deps.iter() {
            if let Some(dep_id) = ids.get(dep.as_str()) {
                let _ = write!(body, "\n{dep_id} -> {id};");
            }
        }
    }

    format!("{HEADER}{body}\n}}")
}

/// `name | {key | value} | ...`
fn label(task: &Task) -> String {
    let mut label = escape(&task.name);
    for (key, value) in task.data.iter() {
        let _ = write!(
            label,
            " | {{{} | {}}}",
            escape(key),
            escape(&value_text(value))
        );
    }
    label
}

fn value_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Backslash-escape characters that carry meaning inside a quoted record label.
fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        if matches!(ch, '\\' | '"' | '{' | '}' | '|' | '<' | '>') {
            out.push('\\');
        }
        out.push(ch);
    }
    out
}
