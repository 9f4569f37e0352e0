use std::cell::Cell;
use std::iter::FusedIterator;

use crate::error::FungeError;
use crate::instruction::Instruction;
use crate::state::{ExecutionState, RunStats};

/// Configuration for an interpreter.
#[derive(Debug, Clone, Default)]
pub struct InterpreterConfig {
    /// Seed for the `?` instruction. `None` seeds from system entropy.
    pub seed: Option<u64>,
}

/// Result of executing a single instruction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
    /// The instruction ran and produced no output.
    Continue,
    /// The instruction produced an output fragment.
    Output(String),
    /// The halt flag is set; no instruction ran.
    Halted,
}

/// Collected output of a bounded run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outcome {
    pub output: String,
    pub stats: RunStats,
}

/// The interpreter driver.
///
/// One interpreter runs at most one program at a time. [`Interpreter::run`]
/// returns a lazy [`Run`]; until it halts or is dropped, further calls to
/// `run` fail with [`FungeError::RunInProgress`]. Statistics of the current or most
/// recent run are available through [`Interpreter::stats`].
#[derive(Debug, Default)]
pub struct Interpreter {
    config: InterpreterConfig,
    running: Cell<bool>,
    stats: Cell<RunStats>,
}

impl Interpreter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: InterpreterConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    pub fn config(&self) -> &InterpreterConfig {
        &self.config
    }

    pub fn is_running(&self) -> bool {
        self.running.get()
    }

    /// Instruction count and halt flag of the live run, or of the last one.
    pub fn stats(&self) -> RunStats {
        self.stats.get()
    }

    /// Start a run over `text`. Nothing executes until the returned [`Run`]
    /// is stepped or iterated.
    pub fn run(&self, text: &str) -> Result<Run<'_>, FungeError> {
        let guard = RunGuard::acquire(&self.running)?;
        let state = ExecutionState::new(text, self.config.seed)?;
        self.stats.set(RunStats::default());
        log::debug!(
            "starting run on {}x{} grid (seed {:?})",
            state.grid.width(),
            state.grid.height(),
            self.config.seed
        );
        Ok(Run {
            state,
            stats: &self.stats,
            guard: Some(guard),
        })
    }

    /// Run `text` to completion and concatenate all of its output.
    /// Never returns if the program never halts.
    pub fn run_to_string(&self, text: &str) -> Result<String, FungeError> {
        Ok(self.run(text)?.collect())
    }

    /// Run `text` until it halts or `max_steps` instructions have executed.
    pub fn run_bounded(&self, text: &str, max_steps: u64) -> Result<Outcome, FungeError> {
        let mut run = self.run(text)?;
        let mut output = String::new();
        while run.instructions() < max_steps {
            match run.step() {
                Step::Continue => {}
                Step::Output(fragment) => output.push_str(&fragment),
                Step::Halted => break,
            }
        }
        if !run.halted() {
            log::debug!("run stopped after {max_steps} instructions without halting");
        }
        Ok(Outcome {
            output,
            stats: run.stats(),
        })
    }
}

/// Marks an interpreter busy for as long as it lives.
#[derive(Debug)]
struct RunGuard<'a> {
    running: &'a Cell<bool>,
}

impl<'a> RunGuard<'a> {
    fn acquire(running: &'a Cell<bool>) -> Result<Self, FungeError> {
        if running.replace(true) {
            return Err(FungeError::RunInProgress);
        }
        Ok(Self { running })
    }
}

impl Drop for RunGuard<'_> {
    fn drop(&mut self) {
        self.running.set(false);
    }
}

/// A live run: owns its execution state and yields output fragments on
/// demand. The interpreter is freed once the run halts, or when it is
/// dropped before halting.
pub struct Run<'a> {
    state: ExecutionState,
    stats: &'a Cell<RunStats>,
    guard: Option<RunGuard<'a>>,
}

impl Run<'_> {
    /// Fetch, decode and execute one instruction, then advance.
    pub fn step(&mut self) -> Step {
        if self.state.halted {
            return Step::Halted;
        }

        let cell = self.state.current();
        let instr = Instruction::decode(cell);
        log::trace!(
            "({}, {}) {:?} {instr} stack={}",
            self.state.ip.x,
            self.state.ip.y,
            self.state.ip.dir,
            self.state.stack.size()
        );

        let output = instr.execute(&mut self.state);
        self.state.instructions += 1;
        self.state.advance();
        self.stats.set(self.state.stats());

        if self.state.halted {
            log::debug!("halted after {} instructions", self.state.instructions);
            self.guard.take();
        }

        match output {
            Some(fragment) => Step::Output(fragment),
            None => Step::Continue,
        }
    }

    pub fn instructions(&self) -> u64 {
        self.state.instructions
    }

    pub fn halted(&self) -> bool {
        self.state.halted
    }

    pub fn stats(&self) -> RunStats {
        self.state.stats()
    }

    /// Read-only view of the execution state, for diagnostics.
    pub fn state(&self) -> &ExecutionState {
        &self.state
    }
}

impl Iterator for Run<'_> {
    type Item = String;

    /// Execute until the next output fragment, or `None` once halted.
    fn next(&mut self) -> Option<String> {
        loop {
            match self.step() {
                Step::Continue => {}
                Step::Output(fragment) => return Some(fragment),
                Step::Halted => return None,
            }
        }
    }
}

impl FusedIterator for Run<'_> {}
