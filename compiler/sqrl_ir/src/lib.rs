//! Squirrel IR - names and literals shared across the interpreter crates.
//!
//! - [`SymbolTable`] interns names into [`Symbol`] handles whose identity is a
//!   small integer code. Codes of unreferenced symbols are reclaimed
//!   explicitly via [`SymbolTable::reclaim`] and reused lowest-first.
//! - [`literal`] holds the numeric literal grammar used both by the parser and
//!   by string-to-number conversion.

pub mod literal;
mod symbol;

pub use literal::{scan_number, Number};
pub use symbol::{Reserved, Symbol, SymbolTable};
