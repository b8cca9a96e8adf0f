//! A loaded program: the arena, the names it interns, and its bindings.

use gx_ir::{ExprArena, ExprId, StringInterner};

use crate::environment::Environment;
use crate::transport::Transport;
use crate::Evaluator;

#[derive(Clone, Debug)]
pub struct Program {
    pub interner: StringInterner,
    pub arena: ExprArena,
    pub env: Environment,
}

impl Program {
    /// A program that binds only the standard builtins.
    pub fn standard() -> Self {
        let mut interner = StringInterner::new();
        let arena = ExprArena::new();
        let env = Environment::standard(&arena, &mut interner);
        Program {
            interner,
            arena,
            env,
        }
    }

    /// The expression bound to `name`.
    pub fn lookup(&self, name: &str) -> Option<ExprId> {
        self.interner.get(name).and_then(|n| self.env.lookup(n))
    }

    /// An evaluator over this program's graph.
    pub fn evaluator<'a>(&'a mut self, transport: &'a mut dyn Transport) -> Evaluator<'a> {
        Evaluator::new(&mut self.arena, &self.env, &self.interner, transport)
    }
}

impl Default for Program {
    fn default() -> Self {
        Program::standard()
    }
}
