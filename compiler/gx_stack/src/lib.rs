//! Stack growth for deeply nested expression graphs.
//!
//! Galaxy programs build long right-nested cons chains and combinator
//! towers; reducing them recurses once per nesting level. Wrapping the
//! recursive step in [`ensure_sufficient_stack`] lets the evaluator, the
//! parser and the codec walk those graphs without blowing the native stack.
//!
//! On native targets this defers to `stacker`. On WASM it is a passthrough.

/// Remaining stack below which a new segment is allocated (128KB).
const RED_ZONE: usize = 128 * 1024;

/// Size of each newly allocated stack segment (2MB).
const SEGMENT_SIZE: usize = 2 * 1024 * 1024;

/// Run `f`, first growing the stack if less than the red zone remains.
#[inline]
#[cfg(not(target_arch = "wasm32"))]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    stacker::maybe_grow(RED_ZONE, SEGMENT_SIZE, f)
}

/// WASM manages its own stack; call straight through.
#[inline]
#[cfg(target_arch = "wasm32")]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    f()
}
