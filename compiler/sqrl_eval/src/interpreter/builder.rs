use sqrl_ir::SymbolTable;

use super::{Interpreter, DEFAULT_MAX_CALL_DEPTH};
use crate::print_handler::{stdout_handler, SharedPrintHandler};
use crate::scope::Frames;

/// Configures an [`Interpreter`] before construction.
///
/// ```text
/// let interp = Interpreter::builder()
///     .max_call_depth(200)
///     .print_handler(buffer_handler())
///     .build();
/// ```
pub struct InterpreterBuilder {
    max_call_depth: u32,
    print_handler: Option<SharedPrintHandler>,
    builtins: bool,
}

impl InterpreterBuilder {
    pub fn new() -> Self {
        InterpreterBuilder {
            max_call_depth: DEFAULT_MAX_CALL_DEPTH,
            print_handler: None,
            builtins: true,
        }
    }

    /// Deepest function nesting allowed before `StackLimit` is raised.
    #[must_use]
    pub fn max_call_depth(mut self, depth: u32) -> Self {
        self.max_call_depth = depth;
        self
    }

    /// Sink for `print`. Defaults to stdout.
    #[must_use]
    pub fn print_handler(mut self, handler: SharedPrintHandler) -> Self {
        self.print_handler = Some(handler);
        self
    }

    /// Whether to install the built-in operators. An interpreter without
    /// them knows no names at all.
    #[must_use]
    pub fn with_builtins(mut self, enabled: bool) -> Self {
        self.builtins = enabled;
        self
    }

    pub fn build(self) -> Interpreter {
        let mut interp = Interpreter {
            frames: Frames::new(),
            symbols: SymbolTable::new(),
            print_handler: self.print_handler.unwrap_or_else(stdout_handler),
            max_call_depth: self.max_call_depth,
        };
        if self.builtins {
            crate::builtins::register_builtins(&mut interp);
        }
        tracing::debug!(max_call_depth = self.max_call_depth, builtins = self.builtins, "interpreter ready");
        interp
    }
}

impl Default for InterpreterBuilder {
    fn default() -> Self {
        Self::new()
    }
}
