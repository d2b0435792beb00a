//! Compile/execute pipeline.
//!
//! Every discovered document is compiled together so cross-document
//! references resolve, but only primary template units are executed.

use std::io;
use std::process::ExitCode;

use jamplate_core::{Compilation, Document, Engine, Environment};
use tracing::{debug, info};

/// Headline written before diagnostics when compilation fails.
pub const COMPILATION_ERROR: &str = "Compilation Error";

/// Headline written before diagnostics when execution fails.
pub const RUNTIME_ERROR: &str = "Runtime Error";

/// Position of a pipeline run.
///
/// `Executed`, `CompileFailed` and `ExecuteFailed` are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Ready,
    Compiled,
    Executed,
    CompileFailed,
    ExecuteFailed,
}

impl Stage {
    pub fn is_terminal(self) -> bool {
        matches!(
            self,
            Stage::Executed | Stage::CompileFailed | Stage::ExecuteFailed
        )
    }
}

/// Drives an engine through compile and execute.
pub struct Pipeline<'a, E: ?Sized> {
    engine: &'a E,
    stage: Stage,
}

impl<'a, E: Engine + ?Sized> Pipeline<'a, E> {
    pub fn new(engine: &'a E) -> Self {
        Self {
            engine,
            stage: Stage::Ready,
        }
    }

    pub fn stage(&self) -> Stage {
        self.stage
    }

    /// Run the pipeline to a terminal stage.
    ///
    /// Compile and execute failures are not errors here: they flush the
    /// diagnostics under a headline and end in a failed stage. Only writing
    /// to the diagnostic sink can fail. A pipeline that already finished
    /// returns its stage without running again.
    pub fn run(&mut self, env: &mut Environment, documents: &[Document]) -> io::Result<Stage> {
        if self.stage.is_terminal() {
            return Ok(self.stage);
        }

        debug!("Compiling {} documents", documents.len());
        if !self.engine.compile(env, documents) {
            self.transition(Stage::CompileFailed);
            env.diagnostic_mut().announce(COMPILATION_ERROR)?;
            env.diagnostic_mut().flush()?;
            return Ok(self.stage);
        }
        self.transition(Stage::Compiled);

        let templates = select_templates(env.compilation_set());
        info!(
            "Executing {} of {} compilations",
            templates.len(),
            env.compilation_set().len()
        );

        if !self.engine.execute(env, &templates) {
            self.transition(Stage::ExecuteFailed);
            env.diagnostic_mut().announce(RUNTIME_ERROR)?;
            env.diagnostic_mut().flush()?;
            return Ok(self.stage);
        }
        self.transition(Stage::Executed);

        env.diagnostic_mut().flush()?;
        Ok(self.stage)
    }

    fn transition(&mut self, next: Stage) {
        debug!("Pipeline {:?} -> {:?}", self.stage, next);
        self.stage = next;
    }
}

/// Compilations whose root document is a primary template unit, in order.
pub fn select_templates(compilations: &[Compilation]) -> Vec<Compilation> {
    compilations
        .iter()
        .filter(|c| c.is_template())
        .cloned()
        .collect()
}

/// Final result of one command-line run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Success,
    ParseFailed,
    CompileFailed,
    ExecuteFailed,
}

impl Outcome {
    pub fn exit_code(self) -> ExitCode {
        match self {
            Outcome::Success => ExitCode::SUCCESS,
            Outcome::CompileFailed | Outcome::ExecuteFailed => ExitCode::from(1),
            Outcome::ParseFailed => ExitCode::from(2),
        }
    }
}

impl From<Stage> for Outcome {
    fn from(stage: Stage) -> Self {
        match stage {
            Stage::CompileFailed => Outcome::CompileFailed,
            Stage::ExecuteFailed => Outcome::ExecuteFailed,
            Stage::Ready | Stage::Compiled | Stage::Executed => Outcome::Success,
        }
    }
}
