//! Stack safety for the recursive parser and evaluator.
//!
//! Two separate concerns live here:
//!
//! - [`ensure_sufficient_stack`] grows the native stack before a recursive
//!   step (nested parentheses, nested blocks, long operator chains), so deep
//!   input fails with a diagnostic instead of a segfault.
//! - [`DepthCounter`] bounds *semantic* recursion (a closure calling itself)
//!   with a configurable limit, independent of how much stack is available.
//!
//! On `wasm32` stack growth is a passthrough.

/// Grow when less than this much stack remains.
const RED_ZONE: usize = 128 * 1024;

/// Size of each newly allocated stack segment.
const GROWTH: usize = 2 * 1024 * 1024;

/// Run `f`, first growing the stack if it is close to exhaustion.
#[inline]
#[cfg(not(target_arch = "wasm32"))]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    stacker::maybe_grow(RED_ZONE, GROWTH, f)
}

#[inline]
#[cfg(target_arch = "wasm32")]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    f()
}

/// Returned by [`DepthCounter::enter`] when the limit would be exceeded.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct DepthExceeded {
    pub limit: usize,
}

/// Counts nested calls against a fixed limit.
#[derive(Clone, Debug)]
pub struct DepthCounter {
    depth: usize,
    limit: usize,
}

impl DepthCounter {
    pub fn new(limit: usize) -> Self {
        DepthCounter { depth: 0, limit }
    }

    #[inline]
    pub fn depth(&self) -> usize {
        self.depth
    }

    #[inline]
    pub fn limit(&self) -> usize {
        self.limit
    }

    /// Record one more level of nesting.
    ///
    /// Every successful `enter` must be paired with a [`leave`](Self::leave).
    pub fn enter(&mut self) -> Result<(), DepthExceeded> {
        if self.depth >= self.limit {
            return Err(DepthExceeded { limit: self.limit });
        }
        self.depth += 1;
        Ok(())
    }

    #[inline]
    pub fn leave(&mut self) {
        self.depth = self.depth.saturating_sub(1);
    }
}
