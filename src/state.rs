use rand::SeedableRng;
use rand::rngs::SmallRng;

use crate::error::FungeError;
use crate::grid::Grid;
use crate::ip::Ip;
use crate::stack::Stack;

/// Counters a host can read during or after a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RunStats {
    /// Instructions dispatched so far, including the final `@`.
    pub instructions: u64,
    pub halted: bool,
}

/// Everything one run mutates: the grid, the instruction pointer, the
/// stack and the random source for `?`.
pub struct ExecutionState {
    pub grid: Grid,
    pub ip: Ip,
    pub stack: Stack,
    pub rng: SmallRng,
    pub instructions: u64,
    pub halted: bool,
}

impl ExecutionState {
    /// Build a fresh state from program text. `seed` of `None` draws from
    /// system entropy.
    pub fn new(text: &str, seed: Option<u64>) -> Result<Self, FungeError> {
        let grid = Grid::parse(text)?;
        let rng = match seed {
            Some(seed) => SmallRng::seed_from_u64(seed),
            None => SmallRng::from_entropy(),
        };
        Ok(Self {
            grid,
            ip: Ip::new(),
            stack: Stack::new(),
            rng,
            instructions: 0,
            halted: false,
        })
    }

    /// Cell under the instruction pointer.
    #[inline(always)]
    pub fn current(&self) -> i64 {
        self.grid.read(self.ip.x, self.ip.y)
    }

    /// Move the instruction pointer one cell along its heading.
    #[inline(always)]
    pub fn advance(&mut self) {
        self.ip.advance(self.grid.width(), self.grid.height());
    }

    pub fn stats(&self) -> RunStats {
        RunStats {
            instructions: self.instructions,
            halted: self.halted,
        }
    }
}
