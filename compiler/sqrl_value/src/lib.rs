//! Squirrel Value - the runtime value model.
//!
//! This crate provides:
//! - `Value` / `ValueKind`: the closed set of tagged runtime values, each
//!   carrying a quote flag
//! - `List`: shared-backing sequences with zero-copy windows
//! - `Identifier` / `Index`: dotted, optionally subscripted name paths
//! - `Exception` / `ErrorKind`: script errors as values with a provenance chain
//! - `Executor`: the interface native operators use to call back into the
//!   interpreter
//!
//! Scope frames live in the interpreter's arena; values refer to them by
//! `FrameId` only.

mod exception;
mod executor;
mod frame;
mod list;
mod path;
mod value;

pub use exception::{ErrorKind, Exception};
pub use executor::{EvalResult, Executor, OperatorFn, Resolution};
pub use frame::{FrameId, FrameKind};
pub use list::List;
pub use path::{Identifier, Index};
pub use value::{Assoc, ClassValue, FunctionValue, ObjectValue, OperatorValue, Value, ValueKind};

pub use sqrl_ir::{Number, Symbol, SymbolTable};
