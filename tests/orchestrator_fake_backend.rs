// tests/orchestrator_fake_backend.rs

mod common;
use crate::common::{init_tracing, with_timeout};

use std::error::Error;
use std::fs;
use std::sync::{Arc, Mutex};

use dagviz::errors::DagvizError;
use dagviz::exec::Invocation;
use dagviz::pipeline::{Orchestrator, PipelineState, Stage, Target};
use dagviz_test_utils::builders::{PipelineConfigBuilder, TaskDagBuilder};
use dagviz_test_utils::fake_backend::{FAKE_SVG, FakeBackend};

type TestResult = Result<(), Box<dyn Error>>;

fn stages(executed: &Arc<Mutex<Vec<Invocation>>>) -> Vec<Stage> {
    executed.lock().unwrap().iter().map(|i| i.stage).collect()
}

fn entries(dir: &std::path::Path) -> Vec<String> {
    let mut names: Vec<String> = fs::read_dir(dir)
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    names
}

#[tokio::test]
async fn full_build_runs_generate_then_render() -> TestResult {
    with_timeout(async {
        init_tracing();

        let dir = tempfile::tempdir()?;
        let cfg = PipelineConfigBuilder::in_dir(dir.path()).build();
        TaskDagBuilder::new()
            .task("A", &[])
            .task("B", &["A"])
            .write_to(&cfg.input)?;

        let executed = Arc::new(Mutex::new(Vec::new()));
        let mut orchestrator = Orchestrator::new(cfg.clone(), FakeBackend::new(executed.clone()));

        let report = orchestrator.run_default().await?;

        assert_eq!(report.state, PipelineState::Done);
        assert_eq!(orchestrator.state(), PipelineState::Done);
        assert_eq!(stages(&executed), vec![Stage::Generate, Stage::Render]);

        // Exactly one intermediate and one output next to the input.
        assert_eq!(
            entries(dir.path()),
            vec!["output.svg", "task_DAG.dot", "task_DAG.json"]
        );
        let dot = fs::read_to_string(&cfg.intermediate)?;
        assert!(dot.contains("task_0 -> task_1;"));
        assert_eq!(fs::read_to_string(&cfg.output)?, FAKE_SVG);

        // The generator got the input as its argument and stdout went to the
        // intermediate file; the renderer read the intermediate.
        let calls = executed.lock().unwrap().clone();
        assert_eq!(calls[0].args, vec!["convert".to_string(), cfg.input.display().to_string()]);
        assert_eq!(calls[0].stdout_to.as_deref(), Some(cfg.intermediate.as_path()));
        assert!(calls[1].args.contains(&cfg.intermediate.display().to_string()));
        assert!(calls[1].args.contains(&"-Tsvg".to_string()));

        Ok(())
    })
    .await
}

#[tokio::test]
async fn rebuild_replaces_stale_artifacts_and_is_deterministic() -> TestResult {
    with_timeout(async {
        init_tracing();

        let dir = tempfile::tempdir()?;
        let cfg = PipelineConfigBuilder::in_dir(dir.path()).build();
        TaskDagBuilder::new()
            .task("fetch", &[])
            .task("build", &["fetch"])
            .data("build", "target", serde_json::json!("release"))
            .write_to(&cfg.input)?;

        fs::write(&cfg.intermediate, "stale")?;
        fs::write(&cfg.output, "stale")?;

        let executed = Arc::new(Mutex::new(Vec::new()));
        let mut orchestrator = Orchestrator::new(cfg.clone(), FakeBackend::new(executed));

        let first = orchestrator.run_default().await?;
        assert_eq!(first.clean.removed.len(), 2);
        let first_dot = fs::read(&cfg.intermediate)?;

        let second = orchestrator.run_default().await?;
        let second_dot = fs::read(&cfg.intermediate)?;

        assert_eq!(first_dot, second_dot);
        assert_eq!(first.intermediate_digest, second.intermediate_digest);
        assert_ne!(first_dot, b"stale".to_vec());

        Ok(())
    })
    .await
}

#[tokio::test]
async fn missing_input_fails_generation_and_leaves_nothing() -> TestResult {
    with_timeout(async {
        init_tracing();

        let dir = tempfile::tempdir()?;
        let cfg = PipelineConfigBuilder::in_dir(dir.path()).build();
        fs::write(&cfg.output, "old image")?;

        let executed = Arc::new(Mutex::new(Vec::new()));
        let mut orchestrator = Orchestrator::new(cfg.clone(), FakeBackend::new(executed.clone()));

        match orchestrator.run_default().await {
            Err(DagvizError::StageFailed { stage, code }) => {
                assert_eq!(stage, Stage::Generate);
                assert_eq!(code, 1);
            }
            other => panic!("expected generate failure, got {other:?}"),
        }

        assert_eq!(stages(&executed), vec![Stage::Generate]);
        assert_eq!(orchestrator.state(), PipelineState::Cleaned);
        assert!(!cfg.output.exists());
        assert!(!cfg.intermediate.exists());

        Ok(())
    })
    .await
}

#[tokio::test]
async fn render_failure_leaves_no_output() -> TestResult {
    with_timeout(async {
        init_tracing();

        let dir = tempfile::tempdir()?;
        let cfg = PipelineConfigBuilder::in_dir(dir.path()).build();
        TaskDagBuilder::new().task("A", &[]).write_to(&cfg.input)?;
        fs::write(&cfg.output, "previous image")?;

        let executed = Arc::new(Mutex::new(Vec::new()));
        let backend = FakeBackend::new(executed.clone()).fail_stage(Stage::Render, 2);
        let mut orchestrator = Orchestrator::new(cfg.clone(), backend);

        let err = orchestrator.run_default().await.unwrap_err();
        assert!(matches!(
            err,
            DagvizError::StageFailed {
                stage: Stage::Render,
                code: 2
            }
        ));
        assert_eq!(err.exit_code(), 2);

        assert_eq!(orchestrator.state(), PipelineState::Generated);
        assert!(!cfg.output.exists());
        assert!(cfg.intermediate.exists());

        Ok(())
    })
    .await
}

#[tokio::test]
async fn generator_exit_code_aborts_before_render() -> TestResult {
    with_timeout(async {
        init_tracing();

        let dir = tempfile::tempdir()?;
        let cfg = PipelineConfigBuilder::in_dir(dir.path()).build();
        TaskDagBuilder::new().task("A", &[]).write_to(&cfg.input)?;

        let executed = Arc::new(Mutex::new(Vec::new()));
        let backend = FakeBackend::new(executed.clone()).fail_stage(Stage::Generate, 7);
        let mut orchestrator = Orchestrator::new(cfg.clone(), backend);

        let err = orchestrator.run_default().await.unwrap_err();
        assert_eq!(err.exit_code(), 7);
        assert_eq!(stages(&executed), vec![Stage::Generate]);
        // The partial intermediate written before the failure is discarded.
        assert!(!cfg.intermediate.exists());

        Ok(())
    })
    .await
}

#[tokio::test]
async fn generate_only_does_not_render() -> TestResult {
    with_timeout(async {
        init_tracing();

        let dir = tempfile::tempdir()?;
        let cfg = PipelineConfigBuilder::in_dir(dir.path()).build();
        fs::write(&cfg.input, "{}")?;
        fs::write(&cfg.output, "old")?;

        let executed = Arc::new(Mutex::new(Vec::new()));
        let backend = FakeBackend::new(executed.clone())
            .with_stdout(Stage::Generate, "digraph g {}\n");
        let mut orchestrator = Orchestrator::new(cfg.clone(), backend);

        let report = orchestrator.generate_only().await?;

        assert_eq!(report.state, PipelineState::Generated);
        assert_eq!(report.output, None);
        assert_eq!(stages(&executed), vec![Stage::Generate]);
        assert_eq!(fs::read_to_string(&cfg.intermediate)?, "digraph g {}\n");
        assert!(!cfg.output.exists());

        Ok(())
    })
    .await
}

#[tokio::test]
async fn clean_without_artifacts_succeeds() -> TestResult {
    with_timeout(async {
        init_tracing();

        let dir = tempfile::tempdir()?;
        let cfg = PipelineConfigBuilder::in_dir(dir.path()).build();
        fs::write(&cfg.input, "{}")?;

        let executed = Arc::new(Mutex::new(Vec::new()));
        let mut orchestrator = Orchestrator::new(cfg.clone(), FakeBackend::new(executed.clone()));

        let report = orchestrator.clean()?;
        assert!(report.removed.is_empty());
        assert_eq!(report.absent.len(), 2);
        assert_eq!(orchestrator.state(), PipelineState::Cleaned);
        assert!(executed.lock().unwrap().is_empty());
        // The input is never touched.
        assert!(cfg.input.exists());

        Ok(())
    })
    .await
}

#[tokio::test]
async fn undeletable_artifact_stops_the_build() -> TestResult {
    with_timeout(async {
        init_tracing();

        let dir = tempfile::tempdir()?;
        let cfg = PipelineConfigBuilder::in_dir(dir.path()).build();
        TaskDagBuilder::new().task("A", &[]).write_to(&cfg.input)?;
        fs::create_dir(&cfg.intermediate)?;

        let executed = Arc::new(Mutex::new(Vec::new()));
        let mut orchestrator = Orchestrator::new(cfg.clone(), FakeBackend::new(executed.clone()));

        match orchestrator.run_default().await {
            Err(DagvizError::Cleanup { path, .. }) => assert_eq!(path, cfg.intermediate),
            other => panic!("expected cleanup failure, got {other:?}"),
        }
        assert!(executed.lock().unwrap().is_empty());
        assert_eq!(orchestrator.state(), PipelineState::NotStarted);

        Ok(())
    })
    .await
}

#[test]
fn plan_lists_expanded_invocations() {
    let dir = tempfile::tempdir().unwrap();
    let cfg = PipelineConfigBuilder::in_dir(dir.path())
        .renderer("dot", &["-T{format}", "{input}", "-o", "{output}"])
        .format("png")
        .build();

    let executed = Arc::new(Mutex::new(Vec::new()));
    let orchestrator = Orchestrator::new(cfg.clone(), FakeBackend::new(executed.clone()));

    let plan = orchestrator.plan(Target::Build);
    assert_eq!(plan.len(), 3);
    assert!(plan[0].starts_with("clean: remove"));
    assert!(plan[1].contains(&format!("> {}", cfg.intermediate.display())));
    assert!(plan[2].contains("-Tpng"));

    assert_eq!(orchestrator.plan(Target::Clean).len(), 1);
    assert_eq!(orchestrator.plan(Target::Generate).len(), 2);
    assert!(executed.lock().unwrap().is_empty());
    assert!(!cfg.intermediate.exists());
}
