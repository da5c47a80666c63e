//! Stack growth for the recursive evaluator.
//!
//! A script call chain recurses through `evaluate` → `call_function` →
//! `evaluate_body` → `evaluate` for every nested call, and the interpreter
//! permits up to a thousand nested function frames by default. Debug builds
//! and test threads (2MB stacks) cannot hold that many native frames, so the
//! evaluator wraps each nesting step in [`ensure_sufficient_stack`].
//!
//! On WASM the closure is called directly.

/// Grow the stack when less than this much remains.
const RED_ZONE: usize = 128 * 1024;

/// Size of each freshly allocated stack segment.
const SEGMENT_SIZE: usize = 2 * 1024 * 1024;

/// Run `f`, first moving onto a new stack segment if the current one is
/// nearly exhausted.
#[inline]
#[cfg(not(target_arch = "wasm32"))]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    stacker::maybe_grow(RED_ZONE, SEGMENT_SIZE, f)
}

/// WASM manages its own stack.
#[inline]
#[cfg(target_arch = "wasm32")]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    f()
}
