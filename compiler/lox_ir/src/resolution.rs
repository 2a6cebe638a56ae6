//! Resolver output: the hop-count table.

use rustc_hash::FxHashMap;

use crate::ExprId;

/// Hop counts for variable references, keyed by expression identity.
///
/// A recorded depth `n` means "walk `n` enclosing frames out from the
/// innermost active frame". References with no entry are globals and are
/// looked up by name in the global frame.
#[derive(Clone, Default, Debug, PartialEq, Eq)]
pub struct Resolutions {
    depths: FxHashMap<ExprId, u32>,
}

impl Resolutions {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn record(&mut self, expr: ExprId, depth: u32) {
        self.depths.insert(expr, depth);
    }

    /// Hop count for `expr`, or `None` for a global reference.
    #[inline]
    pub fn depth(&self, expr: ExprId) -> Option<u32> {
        self.depths.get(&expr).copied()
    }

    pub fn len(&self) -> usize {
        self.depths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.depths.is_empty()
    }
}
