//! Tree-walking interpreter.
//!
//! # Evaluation
//!
//! - A quoted value evaluates to itself.
//! - A path reads a binding through the scope engine ([`resolve`]).
//! - A list is a call: a path head names the callee, a list head makes the
//!   whole list a body of statements, anything else is data.
//!
//! Calls are dispatched in [`call`]. Every fallible step returns
//! [`EvalResult`]; an exception is wrapped with each frame it leaves so the
//! chain records where it travelled.

mod builder;
mod call;
mod resolve;

use sqrl_ir::SymbolTable;
use sqrl_stack::ensure_sufficient_stack;
use sqrl_value::{
    Assoc, ErrorKind, EvalResult, Exception, Executor, FrameId, FrameKind, Identifier, List,
    OperatorFn, Symbol, Value, ValueKind,
};

pub use builder::InterpreterBuilder;

use crate::print_handler::SharedPrintHandler;
use crate::scope::Frames;

/// Default ceiling on nested function frames.
pub const DEFAULT_MAX_CALL_DEPTH: u32 = 1000;

pub struct Interpreter {
    pub(crate) frames: Frames,
    symbols: SymbolTable,
    print_handler: SharedPrintHandler,
    max_call_depth: u32,
}

impl Interpreter {
    /// Interpreter with the built-in operators and stdout printing.
    pub fn new() -> Self {
        InterpreterBuilder::new().build()
    }

    pub fn builder() -> InterpreterBuilder {
        InterpreterBuilder::new()
    }

    #[inline]
    pub fn global(&self) -> FrameId {
        FrameId::GLOBAL
    }

    pub fn symbols(&self) -> &SymbolTable {
        &self.symbols
    }

    pub fn symbols_mut(&mut self) -> &mut SymbolTable {
        &mut self.symbols
    }

    /// Free symbols no longer referenced by any value or frame.
    pub fn reclaim_symbols(&mut self) -> usize {
        self.symbols.reclaim()
    }

    pub fn print_handler(&self) -> &SharedPrintHandler {
        &self.print_handler
    }

    #[inline]
    pub fn max_call_depth(&self) -> u32 {
        self.max_call_depth
    }

    /// Bind `name` in the global frame.
    pub fn define_global(&mut self, name: &str, value: Value) {
        let sym = self.symbols.intern(name);
        self.frames.get_mut(FrameId::GLOBAL).bind(sym, value);
    }

    /// Install a native operator in the global frame.
    ///
    /// With `no_eval` the operator receives its arguments unevaluated.
    pub fn register(
        &mut self,
        name: &str,
        func: OperatorFn,
        precedence: u8,
        assoc: Assoc,
        no_eval: bool,
    ) {
        let sym = self.symbols.intern(name);
        let op = Value::operator(sym.clone(), func, precedence, assoc).quoted(no_eval);
        self.frames.get_mut(FrameId::GLOBAL).bind(sym, op);
    }

    pub fn parse(&mut self, text: &str) -> List {
        sqrl_parse::parse(text, &mut self.symbols)
    }

    /// Parse `text` and evaluate it in the global frame as one list.
    ///
    /// Never fails: an exception comes back as an exception value.
    pub fn evaluate_source(&mut self, text: &str) -> Value {
        let program = Value::list(self.parse(text));
        match self.evaluate(&program, FrameId::GLOBAL) {
            Ok(value) => value,
            Err(ex) => {
                tracing::debug!(error = %ex.kind(), depth = ex.depth(), "evaluation failed");
                Value::exception(ex)
            }
        }
    }

    pub fn evaluate(&mut self, value: &Value, frame: FrameId) -> EvalResult {
        if value.is_quoted() {
            return Ok(value.clone());
        }
        match &value.kind {
            ValueKind::Path(path) => self.get(path, frame),
            ValueKind::List(list) | ValueKind::Infix(list) => {
                ensure_sufficient_stack(|| self.evaluate_call(value, list, frame))
            }
            _ => Ok(value.clone()),
        }
    }

    fn evaluate_call(&mut self, value: &Value, list: &List, frame: FrameId) -> EvalResult {
        let Some(head) = list.first() else {
            return Ok(value.clone());
        };
        if head.is_list_like() {
            return self.evaluate_body(list, frame);
        }
        let Some(name) = head.as_path() else {
            return Ok(value.clone());
        };
        tracing::trace!(call = %name, %frame, "evaluate");
        let args = list.sub(1, None);
        self.call_function(name, &args, frame)
            .map_err(|ex| self.wrap(ex, frame))
    }

    /// Evaluate statements in order, returning the last result.
    pub fn evaluate_body(&mut self, body: &List, frame: FrameId) -> EvalResult {
        let mut result = Value::none();
        for statement in body.values() {
            result = self.evaluate(&statement, frame)?;
        }
        Ok(result)
    }

    /// Evaluate each element into a fresh list.
    pub fn evaluate_list(&mut self, list: &List, frame: FrameId) -> EvalResult<List> {
        let values = list.values();
        let mut out = Vec::with_capacity(values.len());
        for value in &values {
            out.push(self.evaluate(value, frame)?);
        }
        Ok(List::from_vec(out))
    }

    pub(crate) fn new_frame_at(
        &mut self,
        parent: FrameId,
        kind: FrameKind,
        name: Option<Symbol>,
        depth: u32,
    ) -> FrameId {
        self.frames.alloc(parent, kind, name, depth)
    }

    /// Exception attributed to `frame`.
    pub(crate) fn raise(&self, kind: ErrorKind, frame: FrameId) -> Exception {
        Exception::new(kind, frame, self.frames.get(frame).display_name())
    }

    pub(crate) fn wrap(&self, ex: Exception, frame: FrameId) -> Exception {
        ex.wrap(frame, self.frames.get(frame).display_name())
    }
}

impl Default for Interpreter {
    fn default() -> Self {
        Self::new()
    }
}

impl Executor for Interpreter {
    fn evaluate(&mut self, value: &Value, frame: FrameId) -> EvalResult {
        Interpreter::evaluate(self, value, frame)
    }

    fn evaluate_body(&mut self, body: &List, frame: FrameId) -> EvalResult {
        Interpreter::evaluate_body(self, body, frame)
    }

    fn get(&mut self, path: &Identifier, frame: FrameId) -> EvalResult {
        Interpreter::get(self, path, frame)
    }

    fn set(&mut self, path: &Identifier, value: Value, frame: FrameId) -> EvalResult<()> {
        Interpreter::set(self, path, value, frame)
    }

    fn new_frame(&mut self, parent: FrameId, kind: FrameKind, name: Option<Symbol>) -> FrameId {
        let depth = self.frames.get(parent).depth();
        self.new_frame_at(parent, kind, name, depth)
    }

    fn raise(&self, kind: ErrorKind, frame: FrameId) -> Exception {
        Interpreter::raise(self, kind, frame)
    }

    fn print_line(&mut self, line: &str) {
        self.print_handler.println(line);
    }
}

#[cfg(test)]
#[expect(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]
mod tests;
