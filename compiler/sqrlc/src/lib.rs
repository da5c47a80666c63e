//! Squirrel driver - line-oriented front end over `sqrl_eval`.
//!
//! Every input line is parsed into its top-level list and evaluated as one
//! value in the global frame; the rendered result is written back. Blank
//! lines are skipped.

use std::io::{self, BufRead, Write};
use std::sync::Once;

use sqrl_eval::{Interpreter, Value};

static TRACING_INIT: Once = Once::new();

/// Initialize tracing for debug output.
///
/// Safe to call multiple times. Enable with `RUST_LOG=sqrl_eval=debug` or
/// `RUST_LOG=sqrl_eval=trace`.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        // Only initialize if RUST_LOG is set
        if std::env::var("RUST_LOG").is_ok() {
            let filter = EnvFilter::from_default_env();
            tracing_subscriber::registry()
                .with(
                    fmt::layer()
                        .with_target(true)
                        .with_level(true)
                        .with_writer(io::stderr),
                )
                .with(filter)
                .init();
        }
    });
}

/// One interpreter fed line by line.
pub struct Session {
    interp: Interpreter,
}

impl Session {
    pub fn new(interp: Interpreter) -> Self {
        Session { interp }
    }

    pub fn interpreter(&mut self) -> &mut Interpreter {
        &mut self.interp
    }

    /// Evaluate one line. `None` for a blank line.
    pub fn eval_line(&mut self, line: &str) -> Option<Value> {
        if line.trim().is_empty() {
            return None;
        }
        let value = self.interp.evaluate_source(line);
        if let Some(ex) = value.as_exception() {
            tracing::debug!(line, links = ex.depth(), "line raised");
        }
        Some(value)
    }

    /// Evaluate every line of `input`, writing each result to `out`.
    ///
    /// With a prompt, it is written before each line is read. Returns the
    /// result of the last non-blank line.
    pub fn run<R: BufRead, W: Write>(
        &mut self,
        input: R,
        out: &mut W,
        prompt: Option<&str>,
    ) -> io::Result<Option<Value>> {
        let mut last = None;
        let mut lines = input.lines();
        loop {
            if let Some(prompt) = prompt {
                write!(out, "{prompt}")?;
                out.flush()?;
            }
            let Some(line) = lines.next() else {
                break;
            };
            if let Some(value) = self.eval_line(&line?) {
                writeln!(out, "{}", value.to_print_string())?;
                last = Some(value);
            }
        }
        if prompt.is_some() {
            writeln!(out)?;
        }
        Ok(last)
    }
}

impl Default for Session {
    fn default() -> Self {
        Session::new(Interpreter::new())
    }
}

/// Whether a run's final value calls for a failing exit status.
pub fn ended_in_exception(last: Option<&Value>) -> bool {
    last.is_some_and(|value| value.as_exception().is_some())
}

#[cfg(test)]
#[expect(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]
mod tests;
