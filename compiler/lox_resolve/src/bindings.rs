//! The resolver's output side table.

use lox_ir::ExprId;
use rustc_hash::FxHashMap;

/// Hop counts for every local variable reference, assignment, `this` and
/// `super` expression.
///
/// Absence of an entry means the name is global and is looked up by name at
/// run time.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Bindings {
    depths: FxHashMap<ExprId, usize>,
}

impl Bindings {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn insert(&mut self, id: ExprId, depth: usize) {
        self.depths.insert(id, depth);
    }

    /// Number of environment hops from the use site to the declaring scope.
    #[inline]
    pub fn depth(&self, id: ExprId) -> Option<usize> {
        self.depths.get(&id).copied()
    }

    /// Absorb another table, e.g. one REPL line's bindings into the session's.
    pub fn extend(&mut self, other: &Bindings) {
        self.depths.extend(other.iter());
    }

    pub fn len(&self) -> usize {
        self.depths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.depths.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (ExprId, usize)> + '_ {
        self.depths.iter().map(|(&id, &d)| (id, d))
    }
}
