use thiserror::Error;

/// Faults the interpreter itself can raise. Host-side failures (file I/O,
/// terminal setup) stay in the host's own error types.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum MachineError {
    /// the program doesn't fit between 0x200 and the top of RAM
    #[error("program is {len} bytes, only {max} fit above 0x200")]
    ProgramTooLarge { len: usize, max: usize },

    /// a call nested deeper than the 16-slot stack allows
    #[error("call stack overflow (more than {0} nested calls)")]
    StackOverflow(usize),

    /// a return with nothing on the stack
    #[error("return with an empty call stack")]
    StackUnderflow,
}
