//! Native stack growth for deep recursion
//!
//! Every Beacon call costs several Rust frames (`eval`, `dispatch`, the call
//! node, the body block), so a program recursing up to the configured call
//! depth can exhaust a thread's stack long before the depth guard fires.
//! Node evaluation runs through [`ensure_sufficient_stack`], which moves onto
//! a freshly allocated segment whenever the remaining stack gets low.

/// Grow when less than this much stack remains (100KB).
const RED_ZONE: usize = 100 * 1024;

/// Size of each newly allocated stack segment (1MB).
const STACK_PER_RECURSION: usize = 1024 * 1024;

/// Run `f`, first growing the stack if it is close to exhausted.
#[inline]
#[cfg(not(target_arch = "wasm32"))]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    stacker::maybe_grow(RED_ZONE, STACK_PER_RECURSION, f)
}

/// WASM manages its own stack.
#[inline]
#[cfg(target_arch = "wasm32")]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    f()
}
