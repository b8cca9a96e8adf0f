//! Name → expression bindings.
//!
//! An environment is built once, by [`Environment::standard`] and then by
//! the program loader, and is read-only for the rest of its life. The
//! evaluator only ever looks names up.

use gx_ir::{Builtin, ExprArena, ExprId, Name, StringInterner};
use rustc_hash::FxHashMap;

#[derive(Clone, Debug, Default)]
pub struct Environment {
    bindings: FxHashMap<Name, ExprId>,
}

impl Environment {
    /// Every public builtin bound to its zero-argument node.
    pub fn standard(arena: &ExprArena, interner: &mut StringInterner) -> Self {
        let mut env = Environment::default();
        for &builtin in Builtin::ALL.iter().filter(|b| b.is_public()) {
            env.bind(interner.intern(builtin.name()), arena.builtin(builtin));
        }
        env
    }

    /// Bind `name`, shadowing any earlier binding.
    ///
    /// Loading is the only caller; an environment handed to an evaluator is
    /// never rebound.
    pub fn bind(&mut self, name: Name, expr: ExprId) {
        self.bindings.insert(name, expr);
    }

    pub fn lookup(&self, name: Name) -> Option<ExprId> {
        self.bindings.get(&name).copied()
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }
}
