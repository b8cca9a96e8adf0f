//! Expression arena.
//!
//! The lazy graph is a flat `Vec` of nodes addressed by [`ExprId`]. Nodes
//! are never removed; a host that runs many independent evaluations keeps
//! a clone of the loaded arena and puts it back afterwards. Reducing an `Apply` replaces its operand links with
//! the cached value ([`Thunk::Forced`]), so nothing reachable from a
//! reduced node keeps the unevaluated subgraph alive for later readers.
//!
//! Zero-argument builtin values are preallocated, one node per builtin, so
//! that rewriting rules like `car p = p t` do not allocate for `t`.

use num::BigInt;

use crate::{Builtin, Data, ExprId, FunctionValue, Name, Value};

/// State of an application node.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Thunk {
    /// Not yet reduced.
    Pending { lhs: ExprId, rhs: ExprId },
    /// Reduced; operand links released.
    Forced(Value),
}

/// A node in the expression graph.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ExprKind {
    /// Already a value.
    Value(Value),
    /// Function application.
    Apply(Thunk),
    /// Name looked up in the environment, with a per-occurrence cache.
    Reference { name: Name, cache: Option<Value> },
}

/// Flat storage for expression nodes.
#[derive(Clone, Debug)]
pub struct ExprArena {
    nodes: Vec<ExprKind>,
}

impl ExprArena {
    /// Create an arena holding one zero-argument node per builtin.
    pub fn new() -> Self {
        let nodes = Builtin::ALL
            .iter()
            .map(|&b| ExprKind::Value(Value::builtin(b)))
            .collect();
        ExprArena { nodes }
    }

    /// Allocate a node, returning its ID.
    ///
    /// # Panics
    /// Panics if the arena grows past `u32::MAX` nodes.
    pub fn alloc(&mut self, kind: ExprKind) -> ExprId {
        let index = u32::try_from(self.nodes.len())
            .unwrap_or_else(|_| panic!("expression arena exceeded {} nodes", u32::MAX));
        self.nodes.push(kind);
        ExprId::new(index)
    }

    pub fn alloc_value(&mut self, value: Value) -> ExprId {
        self.alloc(ExprKind::Value(value))
    }

    pub fn alloc_number(&mut self, n: impl Into<BigInt>) -> ExprId {
        self.alloc_value(Value::Number(n.into()))
    }

    pub fn alloc_reference(&mut self, name: Name) -> ExprId {
        self.alloc(ExprKind::Reference { name, cache: None })
    }

    /// `lhs rhs`
    pub fn apply(&mut self, lhs: ExprId, rhs: ExprId) -> ExprId {
        self.alloc(ExprKind::Apply(Thunk::Pending { lhs, rhs }))
    }

    /// `f a b`
    pub fn apply2(&mut self, f: ExprId, a: ExprId, b: ExprId) -> ExprId {
        let fa = self.apply(f, a);
        self.apply(fa, b)
    }

    /// `f a b c`
    pub fn apply3(&mut self, f: ExprId, a: ExprId, b: ExprId, c: ExprId) -> ExprId {
        let fab = self.apply2(f, a, b);
        self.apply(fab, c)
    }

    /// Shared node holding `builtin` with no arguments applied.
    #[inline]
    pub fn builtin(&self, builtin: Builtin) -> ExprId {
        ExprId::new(builtin.index())
    }

    /// Node for the boolean `t` or `f`.
    #[inline]
    pub fn boolean(&self, b: bool) -> ExprId {
        self.builtin(if b { Builtin::True } else { Builtin::False })
    }

    /// A cons cell already holding both halves: `cons car cdr`.
    pub fn alloc_cons(&mut self, car: ExprId, cdr: ExprId) -> ExprId {
        self.alloc_value(Value::Function(FunctionValue::with_args(
            Builtin::Cons,
            &[car, cdr],
        )))
    }

    /// Rebuild a data tree as graph nodes.
    ///
    /// Cons cells become two-argument partials of `cons`, so the result is
    /// already in normal form and costs no reduction to inspect.
    pub fn alloc_data(&mut self, data: &Data) -> ExprId {
        let mut spine = Vec::new();
        let mut cur = data;
        let tail = loop {
            match cur {
                Data::Cons(car, cdr) => {
                    spine.push(&**car);
                    cur = cdr;
                }
                Data::Nil => break self.builtin(Builtin::Nil),
                Data::Number(n) => break self.alloc_number(n.clone()),
            }
        };
        spine.into_iter().rev().fold(tail, |cdr, car| {
            let car = gx_stack::ensure_sufficient_stack(|| self.alloc_data(car));
            self.alloc_cons(car, cdr)
        })
    }

    #[inline]
    pub fn kind(&self, id: ExprId) -> &ExprKind {
        &self.nodes[id.index()]
    }

    /// Record the value of an application and drop its operand links.
    pub fn force_apply(&mut self, id: ExprId, value: Value) {
        let node = &mut self.nodes[id.index()];
        debug_assert!(matches!(node, ExprKind::Apply(_)));
        *node = ExprKind::Apply(Thunk::Forced(value));
    }

    /// Record the resolved value of a reference occurrence.
    pub fn cache_reference(&mut self, id: ExprId, value: Value) {
        if let ExprKind::Reference { cache, .. } = &mut self.nodes[id.index()] {
            *cache = Some(value);
        }
    }

    /// Cached value of a reduced node, if any.
    pub fn cached(&self, id: ExprId) -> Option<&Value> {
        match self.kind(id) {
            ExprKind::Value(v)
            | ExprKind::Apply(Thunk::Forced(v))
            | ExprKind::Reference { cache: Some(v), .. } => Some(v),
            ExprKind::Apply(Thunk::Pending { .. }) | ExprKind::Reference { cache: None, .. } => {
                None
            }
        }
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

impl Default for ExprArena {
    fn default() -> Self {
        Self::new()
    }
}
