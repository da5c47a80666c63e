//! Callback interface from native operators into the interpreter.
//!
//! Operators live in [`Value`]s, and values cannot name the interpreter
//! type, so operators receive `&mut dyn Executor` instead. The interpreter
//! is the only implementor.

use crate::{ErrorKind, Exception, FrameId, FrameKind, Identifier, List, Symbol, Value};

/// Result of any fallible evaluation step.
pub type EvalResult<T = Value> = Result<T, Exception>;

/// Native operator callback: raw (or pre-evaluated) arguments and the
/// calling frame.
pub type OperatorFn = fn(&mut dyn Executor, &List, FrameId) -> EvalResult;

/// Outcome of path resolution.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Resolution {
    /// Where an assignment binds, and where a call frame is parented.
    pub exec: FrameId,
    /// Whose table holds the value that was found.
    pub func: FrameId,
}

impl Resolution {
    #[inline]
    pub fn at(frame: FrameId) -> Self {
        Resolution {
            exec: frame,
            func: frame,
        }
    }
}

pub trait Executor {
    /// Evaluate one value in `frame`.
    fn evaluate(&mut self, value: &Value, frame: FrameId) -> EvalResult;

    /// Evaluate each element in order; the last result, or `none`.
    fn evaluate_body(&mut self, body: &List, frame: FrameId) -> EvalResult;

    fn get(&mut self, path: &Identifier, frame: FrameId) -> EvalResult;

    fn set(&mut self, path: &Identifier, value: Value, frame: FrameId) -> EvalResult<()>;

    fn new_frame(&mut self, parent: FrameId, kind: FrameKind, name: Option<Symbol>) -> FrameId;

    /// Build an exception attributed to `frame`.
    fn raise(&self, kind: ErrorKind, frame: FrameId) -> Exception;

    /// Write one line to the host's print sink.
    fn print_line(&mut self, line: &str);
}
