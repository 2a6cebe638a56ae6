//! Stack safety for the recursive passes.
//!
//! Two tools:
//! - [`ensure_sufficient_stack`] grows the native stack on demand, so deeply
//!   nested source (long `else if` chains, nested groupings) parses and
//!   evaluates without overflowing.
//! - [`DepthCounter`] bounds user-level recursion, so a runaway recursive
//!   Lox function becomes a reported runtime error instead of exhausting
//!   memory.
//!
//! # Platform Support
//!
//! - **Native targets**: `stacker` grows the stack in 1MB segments when less
//!   than 100KB remains.
//! - **WASM targets**: passthrough.

use std::cell::Cell;
use std::rc::Rc;

/// Minimum stack space to keep available (100KB red zone).
const RED_ZONE: usize = 100 * 1024;

/// Stack space to allocate when growing (1MB).
const STACK_PER_RECURSION: usize = 1024 * 1024;

/// Run `f`, first growing the stack if less than the red zone remains.
#[inline]
#[cfg(not(target_arch = "wasm32"))]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    stacker::maybe_grow(RED_ZONE, STACK_PER_RECURSION, f)
}

#[inline]
#[cfg(target_arch = "wasm32")]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    f()
}

/// Returned by [`DepthCounter::enter`] when the limit would be exceeded.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct DepthLimitExceeded {
    pub limit: usize,
}

/// Counts active nested calls against a fixed limit.
///
/// [`enter`](Self::enter) hands out a [`DepthGuard`] that owns its slot; the
/// depth drops back when the guard is dropped, including on early `?`
/// returns. The guard does not borrow the counter, so the caller can keep
/// using `&mut self` while it is alive.
#[derive(Clone, Debug)]
pub struct DepthCounter {
    current: Rc<Cell<usize>>,
    limit: usize,
}

impl DepthCounter {
    pub fn new(limit: usize) -> Self {
        DepthCounter {
            current: Rc::new(Cell::new(0)),
            limit,
        }
    }

    /// Take one level of depth.
    pub fn enter(&self) -> Result<DepthGuard, DepthLimitExceeded> {
        let depth = self.current.get();
        if depth >= self.limit {
            return Err(DepthLimitExceeded { limit: self.limit });
        }
        self.current.set(depth + 1);
        Ok(DepthGuard {
            current: Rc::clone(&self.current),
        })
    }

    /// Number of levels currently held.
    pub fn depth(&self) -> usize {
        self.current.get()
    }

    pub fn limit(&self) -> usize {
        self.limit
    }
}

/// One held level of a [`DepthCounter`].
#[derive(Debug)]
#[must_use = "the depth is released as soon as the guard is dropped"]
pub struct DepthGuard {
    current: Rc<Cell<usize>>,
}

impl Drop for DepthGuard {
    fn drop(&mut self) {
        self.current.set(self.current.get().saturating_sub(1));
    }
}
