use thiserror::Error;

/// Errors reported by the interpreter before any instruction executes.
///
/// Stack underflow and division by zero are not errors: both produce 0.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FungeError {
    /// The program text has no lines, or its lines are all empty.
    #[error("program is empty")]
    EmptyProgram,

    /// A line's length differs from the first line's.
    #[error("non-rectangular program: line {line} has {found} characters, expected {expected}")]
    NonRectangular {
        /// 1-based line number of the offending line.
        line: usize,
        expected: usize,
        found: usize,
    },

    /// A run was started while another is still live on the same interpreter.
    #[error("a run is already in progress on this interpreter")]
    RunInProgress,
}
