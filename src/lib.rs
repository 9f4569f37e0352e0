pub mod error;
pub mod grid;
pub mod stack;
pub mod ip;
pub mod state;
pub mod instruction;
pub mod interpreter;

pub use crate::error::FungeError;
pub use crate::grid::Grid;
pub use crate::instruction::Instruction;
pub use crate::interpreter::{Interpreter, InterpreterConfig, Outcome, Run, Step};
pub use crate::ip::{Direction, Ip};
pub use crate::stack::Stack;
pub use crate::state::{ExecutionState, RunStats};
