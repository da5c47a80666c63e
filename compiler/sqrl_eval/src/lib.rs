//! Squirrel Eval - scope engine and evaluator for the squirrel language.
//!
//! This crate provides the tree-walking interpreter.
//!
//! # Architecture
//!
//! The evaluator uses:
//! - `Frames`: an arena of scope frames addressed by `FrameId`
//! - `find_owner`: path resolution with `parent`/`global`/`class`/`object`/
//!   `local` prefixes and class-to-object method lookup
//! - `call_function`: dispatch to user functions, native operators and
//!   class instantiation
//! - `register_builtins`: the operator library installed in the global frame
//!
//! # Re-exports
//!
//! Value types from `sqrl_value` are re-exported for embedders:
//! - `Value`, `ValueKind`, `List`, `Identifier`
//! - `Exception`, `ErrorKind`, `EvalResult`, `Executor`

mod builtins;
pub mod interpreter;
mod print_handler;
mod scope;

pub use sqrl_value::{
    Assoc, ErrorKind, EvalResult, Exception, Executor, FrameId, FrameKind, Identifier, List,
    OperatorFn, Resolution, Symbol, SymbolTable, Value, ValueKind,
};

pub use builtins::register_builtins;
pub use interpreter::{Interpreter, InterpreterBuilder, DEFAULT_MAX_CALL_DEPTH};
pub use print_handler::{
    buffer_handler, silent_handler, stdout_handler, BufferPrintHandler, PrintHandlerImpl,
    SharedPrintHandler, StdoutPrintHandler,
};
