//! The reducer.
//!
//! # Tail chains
//!
//! Evaluating `Apply` runs a builtin body that returns another expression,
//! and the `Apply` takes that expression's value. Long chains of these are
//! the common case (every recursive protocol step is one), so they are
//! walked in a loop: each `Apply` on the chain is remembered and forced
//! with the final value once the chain ends. Only operator positions and
//! builtin argument forcing recurse, under `ensure_sufficient_stack`.

use gx_ir::{
    BigInt, Builtin, Data, ExprArena, ExprId, ExprKind, FunctionValue, Name, StringInterner,
    Thunk, Value,
};
use gx_stack::ensure_sufficient_stack;
use tracing::debug;

use crate::audit::SharedAuditLog;
use crate::diagnostics::EvalCounters;
use crate::environment::Environment;
use crate::errors::{
    invalid_function_call, not_a_list, not_modulatable, undefined_reference, EvalError,
    EvalResult,
};
use crate::transport::Transport;

/// Answers of `candidate probe NIL_SENTINEL CONS_SENTINEL`.
const NIL_SENTINEL: i64 = 123;
const CONS_SENTINEL: i64 = 456;

/// What a single look at a node tells us.
enum Step {
    Done(Value),
    Apply { lhs: ExprId, rhs: ExprId },
    Resolve(Name),
}

/// Lazy evaluator over one program's expression graph.
///
/// Holds the arena mutably for its lifetime: the graph is rewritten as it is
/// reduced, so one evaluation owns it at a time.
pub struct Evaluator<'a> {
    arena: &'a mut ExprArena,
    env: &'a Environment,
    interner: &'a StringInterner,
    transport: &'a mut dyn Transport,
    audit: Option<SharedAuditLog>,
    counters: Option<EvalCounters>,
}

impl<'a> Evaluator<'a> {
    pub fn new(
        arena: &'a mut ExprArena,
        env: &'a Environment,
        interner: &'a StringInterner,
        transport: &'a mut dyn Transport,
    ) -> Self {
        Evaluator {
            arena,
            env,
            interner,
            transport,
            audit: None,
            counters: None,
        }
    }

    /// Record every `send` round trip into `log`.
    #[must_use]
    pub fn with_audit_log(mut self, log: SharedAuditLog) -> Self {
        self.audit = Some(log);
        self
    }

    /// Enable evaluation counters.
    #[must_use]
    pub fn with_counters(mut self) -> Self {
        self.counters = Some(EvalCounters::default());
        self
    }

    pub fn counters(&self) -> Option<&EvalCounters> {
        self.counters.as_ref()
    }

    pub fn audit_log(&self) -> Option<&SharedAuditLog> {
        self.audit.as_ref()
    }

    pub fn arena(&self) -> &ExprArena {
        &*self.arena
    }

    /// Mutable access for building new input expressions between evaluations.
    pub fn arena_mut(&mut self) -> &mut ExprArena {
        &mut *self.arena
    }

    /// Evaluate a top-level expression.
    #[tracing::instrument(level = "debug", skip(self))]
    pub fn evaluate_root(&mut self, id: ExprId) -> EvalResult {
        let value = self.evaluate(id)?;
        debug!(%value, nodes = self.arena.len(), "evaluated");
        Ok(value)
    }

    /// Force `id` to a value, caching the result on every node reduced.
    pub fn evaluate(&mut self, id: ExprId) -> EvalResult {
        ensure_sufficient_stack(|| self.evaluate_chain(id))
    }

    fn evaluate_chain(&mut self, id: ExprId) -> EvalResult {
        let mut chain = Vec::new();
        let mut current = id;
        let value = loop {
            self.count(EvalCounters::count_force);
            match self.step(current) {
                Step::Done(value) => break value,
                Step::Apply { lhs, rhs } => {
                    let func = match self.evaluate(lhs)? {
                        Value::Function(func) => func,
                        other => return Err(invalid_function_call(other.kind_name())),
                    };
                    chain.push(current);
                    current = self.call(func, rhs)?;
                }
                Step::Resolve(name) => {
                    let bound = self
                        .env
                        .lookup(name)
                        .ok_or_else(|| undefined_reference(self.interner.lookup(name)))?;
                    let value = self.evaluate(bound)?;
                    self.arena.cache_reference(current, value.clone());
                    break value;
                }
            }
        };
        for node in chain {
            self.arena.force_apply(node, value.clone());
        }
        Ok(value)
    }

    fn step(&self, id: ExprId) -> Step {
        match self.arena.kind(id) {
            ExprKind::Value(value)
            | ExprKind::Apply(Thunk::Forced(value))
            | ExprKind::Reference {
                cache: Some(value), ..
            } => Step::Done(value.clone()),
            ExprKind::Apply(Thunk::Pending { lhs, rhs }) => Step::Apply {
                lhs: *lhs,
                rhs: *rhs,
            },
            ExprKind::Reference { name, cache: None } => Step::Resolve(*name),
        }
    }

    /// Supply one unevaluated argument to a function value.
    ///
    /// Returns the expression the application reduces to: a new partial if
    /// the builtin still needs arguments, otherwise whatever its body yields.
    fn call(&mut self, func: FunctionValue, arg: ExprId) -> Result<ExprId, EvalError> {
        let FunctionValue { builtin, mut args } = func;
        args.push(arg);
        if args.len() < builtin.arity() {
            return Ok(self
                .arena
                .alloc_value(Value::Function(FunctionValue { builtin, args })));
        }
        self.count(EvalCounters::count_builtin_call);
        self.run_builtin(builtin, &args)
    }

    #[inline]
    pub(crate) fn count(&mut self, bump: impl FnOnce(&mut EvalCounters)) {
        if let Some(counters) = &mut self.counters {
            bump(counters);
        }
    }

    pub(crate) fn car_of(&mut self, pair: ExprId) -> ExprId {
        let car = self.arena.builtin(Builtin::Car);
        self.arena.apply(car, pair)
    }

    pub(crate) fn cdr_of(&mut self, pair: ExprId) -> ExprId {
        let cdr = self.arena.builtin(Builtin::Cdr);
        self.arena.apply(cdr, pair)
    }

    /// Tell nil from a cons cell without looking inside either.
    ///
    /// The candidate is applied to a probe and two sentinels: nil selects
    /// the first sentinel, a cons cell hands its fields to the probe, which
    /// selects the second.
    pub fn is_nil(&mut self, id: ExprId) -> Result<bool, EvalError> {
        let candidate = self.evaluate(id)?;
        if !matches!(candidate, Value::Function(_)) {
            return Err(not_a_list(candidate.kind_name()));
        }
        let probe = self.arena.builtin(Builtin::IsNilProbe);
        let on_nil = self.arena.alloc_number(NIL_SENTINEL);
        let on_cons = self.arena.alloc_number(CONS_SENTINEL);
        let test = self.arena.apply3(id, probe, on_nil, on_cons);
        match self.evaluate(test)? {
            Value::Number(n) if n == BigInt::from(NIL_SENTINEL) => Ok(true),
            Value::Number(n) if n == BigInt::from(CONS_SENTINEL) => Ok(false),
            other => Err(not_a_list(other.kind_name())),
        }
    }

    /// Walk a proper list, returning its (unevaluated) element expressions.
    pub fn list_elements(&mut self, id: ExprId) -> Result<Vec<ExprId>, EvalError> {
        let mut items = Vec::new();
        let mut current = id;
        while !self.is_nil(current)? {
            items.push(self.car_of(current));
            current = self.cdr_of(current);
        }
        Ok(items)
    }

    /// Force an expression all the way down into a detached data tree.
    pub fn reify(&mut self, id: ExprId) -> Result<Data, EvalError> {
        ensure_sufficient_stack(|| self.reify_spine(id))
    }

    // Iterative along the cdr spine; recursive only into cars.
    fn reify_spine(&mut self, id: ExprId) -> Result<Data, EvalError> {
        let mut cars = Vec::new();
        let mut current = id;
        let tail = loop {
            match self.evaluate(current)? {
                Value::Number(n) => break Data::Number(n),
                Value::Picture(_) => return Err(not_modulatable("picture")),
                Value::Function(_) => {
                    if self.is_nil(current)? {
                        break Data::Nil;
                    }
                    let car = self.car_of(current);
                    cars.push(self.reify(car)?);
                    current = self.cdr_of(current);
                }
            }
        };
        Ok(cars
            .into_iter()
            .rev()
            .fold(tail, |cdr, car| Data::cons(car, cdr)))
    }

    /// Reify and encode.
    pub fn modulate(&mut self, id: ExprId) -> Result<String, EvalError> {
        let data = self.reify(id)?;
        Ok(gx_modem::modulate(&data))
    }

    /// One transport round trip for an already reified request.
    #[tracing::instrument(level = "debug", skip_all)]
    pub fn send(&mut self, request: Data) -> Result<Data, EvalError> {
        let bits = gx_modem::modulate(&request);
        let reply = self.transport.send_bits(&bits)?;
        let response = gx_modem::demodulate(reply.trim())?;
        debug!(%request, %response, "send round trip");
        self.count(EvalCounters::count_send);
        if let Some(log) = &self.audit {
            log.record(request, response.clone());
        }
        Ok(response)
    }
}
