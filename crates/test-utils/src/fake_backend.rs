use std::collections::HashMap;
use std::fs;
use std::future::Future;
use std::pin::Pin;
use std::sync::{Arc, Mutex};

use dagviz::errors::Result;
use dagviz::exec::{Invocation, ProcessBackend};
use dagviz::pipeline::{Stage, StageOutcome};

/// Contents the fake renderer writes on success.
pub const FAKE_SVG: &str = "<svg xmlns=\"http://www.w3.org/2000/svg\"/>\n";

/// A fake process backend that:
/// - records every invocation it is asked to run
/// - simulates the generator by running the built-in converter in-process
///   on the invocation's last argument (or writes canned stdout)
/// - simulates the renderer by writing [`FAKE_SVG`] to the produced path
/// - can be told to make a stage exit with a given code; a failing stage
///   still leaves partial output behind, like a real tool would
pub struct FakeBackend {
    executed: Arc<Mutex<Vec<Invocation>>>,
    failures: HashMap<Stage, i32>,
    canned_stdout: HashMap<Stage, Vec<u8>>,
}

impl FakeBackend {
    pub fn new(executed: Arc<Mutex<Vec<Invocation>>>) -> Self {
        Self {
            executed,
            failures: HashMap::new(),
            canned_stdout: HashMap::new(),
        }
    }

    /// Make `stage` exit with `code`.
    pub fn fail_stage(mut self, stage: Stage, code: i32) -> Self {
        self.failures.insert(stage, code);
        self
    }

    /// Write `bytes` to the stage's stdout target instead of simulating it.
    pub fn with_stdout(mut self, stage: Stage, bytes: impl Into<Vec<u8>>) -> Self {
        self.canned_stdout.insert(stage, bytes.into());
        self
    }

    fn simulate(&self, invocation: &Invocation) -> StageOutcome {
        if let Some(&code) = self.failures.get(&invocation.stage) {
            self.leave_partial_output(invocation);
            return StageOutcome::Failed(code);
        }

        if let Some(ref target) = invocation.stdout_to {
            let bytes = match self.canned_stdout.get(&invocation.stage) {
                Some(bytes) => bytes.clone(),
                None => match self.generate(invocation) {
                    Some(dot) => dot.into_bytes(),
                    None => {
                        // The shell redirect has already created the file.
                        let _ = fs::write(target, b"");
                        return StageOutcome::Failed(1);
                    }
                },
            };
            if fs::write(target, bytes).is_err() {
                return StageOutcome::Failed(1);
            }
        }

        if let Some(ref produced) = invocation.produces {
            if fs::write(produced, FAKE_SVG).is_err() {
                return StageOutcome::Failed(1);
            }
        }

        StageOutcome::Success
    }

    fn generate(&self, invocation: &Invocation) -> Option<String> {
        let input = invocation.args.last()?;
        dagviz::dag::convert(input).ok().map(|dot| dot + "\n")
    }

    fn leave_partial_output(&self, invocation: &Invocation) {
        if let Some(ref target) = invocation.stdout_to {
            let _ = fs::write(target, b"digraph graphname {\n");
        }
        if let Some(ref produced) = invocation.produces {
            let _ = fs::write(produced, b"<svg");
        }
    }
}

impl ProcessBackend for FakeBackend {
    fn run<'a>(
        &'a mut self,
        invocation: &'a Invocation,
    ) -> Pin<Box<dyn Future<Output = Result<StageOutcome>> + Send + 'a>> {
        {
            let mut guard = self.executed.lock().unwrap();
            guard.push(invocation.clone());
        }

        let outcome = self.simulate(invocation);
        Box::pin(async move { Ok(outcome) })
    }
}
