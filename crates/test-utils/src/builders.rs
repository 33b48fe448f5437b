#![allow(dead_code)]

use std::path::{Path, PathBuf};

use serde_json::{Map, Value, json};

use dagviz::pipeline::{PipelineConfig, ToolCommand};

/// Builder for `PipelineConfig` rooted in a (temporary) directory.
pub struct PipelineConfigBuilder {
    config: PipelineConfig,
}

impl PipelineConfigBuilder {
    /// `task_DAG.json`, `task_DAG.dot` and `output.svg` inside `dir`, with the
    /// default generator/renderer argument templates.
    pub fn in_dir(dir: &Path) -> Self {
        Self {
            config: PipelineConfig {
                input: dir.join("task_DAG.json"),
                intermediate: dir.join("task_DAG.dot"),
                output: dir.join("output.svg"),
                generator: ToolCommand::new("dagviz", ["convert", "{input}"]),
                renderer: ToolCommand::new("dot", ["-T{format}", "{input}", "-o", "{output}"]),
                format: "svg".to_string(),
            },
        }
    }

    pub fn input(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.input = path.into();
        self
    }

    pub fn intermediate(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.intermediate = path.into();
        self
    }

    pub fn output(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.output = path.into();
        self
    }

    pub fn generator(mut self, program: &str, args: &[&str]) -> Self {
        self.config.generator = ToolCommand::new(program, args.iter().copied());
        self
    }

    pub fn renderer(mut self, program: &str, args: &[&str]) -> Self {
        self.config.renderer = ToolCommand::new(program, args.iter().copied());
        self
    }

    pub fn format(mut self, format: &str) -> Self {
        self.config.format = format.to_string();
        self
    }

    pub fn build(self) -> PipelineConfig {
        self.config
    }
}

/// Builder for task-DAG JSON documents.
#[derive(Default)]
pub struct TaskDagBuilder {
    tasks: Map<String, Value>,
}

impl TaskDagBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a task depending on `deps`.
    pub fn task(mut self, name: &str, deps: &[&str]) -> Self {
        self.tasks.insert(name.to_string(), json!({ "deps": deps }));
        self
    }

    /// Set `data.<key> = value` on an existing task (created if missing).
    pub fn data(mut self, name: &str, key: &str, value: Value) -> Self {
        let body = self
            .tasks
            .entry(name.to_string())
            .or_insert_with(|| json!({}));
        if let Value::Object(obj) = body {
            let data = obj.entry("data").or_insert_with(|| json!({}));
            if let Value::Object(data) = data {
                data.insert(key.to_string(), value);
            }
        }
        self
    }

    pub fn status(self, name: &str, status: &str) -> Self {
        self.data(name, "status", json!(status))
    }

    pub fn to_json(&self) -> String {
        Value::Object(self.tasks.clone()).to_string()
    }

    pub fn write_to(&self, path: impl AsRef<Path>) -> std::io::Result<()> {
        std::fs::write(path, self.to_json())
    }
}
