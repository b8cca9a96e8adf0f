//! Builtin bodies.
//!
//! Each body receives its full argument list unevaluated and returns the
//! expression the application reduces to. A body forces only the positions
//! its rule needs; everything else is rewired into new graph nodes.

use gx_ir::{BigInt, Builtin, ExprId, Picture, Value};
use num::Zero;

use crate::errors::{division_by_zero, type_mismatch, wrong_arg_type, EvalError};
use crate::picture::picture_from_data;
use crate::Evaluator;

impl Evaluator<'_> {
    pub(crate) fn run_builtin(
        &mut self,
        builtin: Builtin,
        args: &[ExprId],
    ) -> Result<ExprId, EvalError> {
        debug_assert_eq!(args.len(), builtin.arity());
        match builtin {
            // Arithmetic and comparison
            Builtin::Inc => self.unary_number(builtin, args[0], |n| n + BigInt::from(1)),
            Builtin::Dec => self.unary_number(builtin, args[0], |n| n - BigInt::from(1)),
            Builtin::Neg => self.unary_number(builtin, args[0], |n| -n),
            Builtin::Add => {
                let (a, b) = self.number_pair(builtin, args)?;
                Ok(self.arena_mut().alloc_number(a + b))
            }
            Builtin::Mul => {
                let (a, b) = self.number_pair(builtin, args)?;
                Ok(self.arena_mut().alloc_number(a * b))
            }
            Builtin::Div => {
                let (a, b) = self.number_pair(builtin, args)?;
                if b.is_zero() {
                    return Err(division_by_zero());
                }
                // `BigInt` division truncates toward zero.
                Ok(self.arena_mut().alloc_number(a / b))
            }
            Builtin::Eq => {
                let (a, b) = self.number_pair(builtin, args)?;
                Ok(self.arena().boolean(a == b))
            }
            Builtin::Lt => {
                let (a, b) = self.number_pair(builtin, args)?;
                Ok(self.arena().boolean(a < b))
            }

            // Booleans
            Builtin::True => Ok(args[0]),
            Builtin::False => Ok(args[1]),

            // Combinators
            Builtin::S => {
                let arena = self.arena_mut();
                let lhs = arena.apply(args[0], args[2]);
                let rhs = arena.apply(args[1], args[2]);
                Ok(arena.apply(lhs, rhs))
            }
            Builtin::C => {
                let arena = self.arena_mut();
                let lhs = arena.apply(args[0], args[2]);
                Ok(arena.apply(lhs, args[1]))
            }
            Builtin::B => {
                let arena = self.arena_mut();
                let rhs = arena.apply(args[1], args[2]);
                Ok(arena.apply(args[0], rhs))
            }
            Builtin::I => Ok(args[0]),

            // Lists
            Builtin::Cons => Ok(self.arena_mut().apply2(args[2], args[0], args[1])),
            Builtin::Car => {
                let t = self.arena().boolean(true);
                Ok(self.arena_mut().apply(args[0], t))
            }
            Builtin::Cdr => {
                let f = self.arena().boolean(false);
                Ok(self.arena_mut().apply(args[0], f))
            }
            Builtin::Nil => Ok(self.arena().boolean(true)),
            Builtin::IsNil => {
                let probe = self.arena().builtin(Builtin::IsNilProbe);
                Ok(self.arena_mut().apply(args[0], probe))
            }
            Builtin::IsNilProbe => Ok(self.arena().boolean(false)),

            // Pictures
            Builtin::Draw => {
                let data = self.reify(args[0])?;
                let picture = picture_from_data(&data)?;
                Ok(self.arena_mut().alloc_value(Value::Picture(picture)))
            }
            Builtin::Checkerboard => {
                let n = self.force_number(builtin, args[0])?;
                let n = i64::try_from(&n)
                    .map_err(|_| type_mismatch("64-bit size", "number out of range"))?;
                Ok(self
                    .arena_mut()
                    .alloc_value(Value::Picture(Picture::checkerboard(n))))
            }
            Builtin::MultipleDraw => Ok(self.multiple_draw(args[0])),

            // Protocol
            Builtin::Send => {
                let request = self.reify(args[0])?;
                let response = self.send(request)?;
                Ok(self.arena_mut().alloc_data(&response))
            }
            Builtin::If0 => {
                let n = self.force_number(builtin, args[0])?;
                Ok(self.arena().boolean(n.is_zero()))
            }
            Builtin::Interact => {
                let arena = self.arena_mut();
                let step = arena.apply2(args[0], args[1], args[2]);
                let f38 = arena.builtin(Builtin::F38);
                Ok(arena.apply2(f38, args[0], step))
            }
            Builtin::F38 => self.f38(args[0], args[1]),
            Builtin::Modem => {
                let data = self.reify(args[0])?;
                let normalized = gx_modem::round_trip(&data)?;
                Ok(self.arena_mut().alloc_data(&normalized))
            }
        }
    }

    pub(crate) fn force_number(
        &mut self,
        builtin: Builtin,
        id: ExprId,
    ) -> Result<BigInt, EvalError> {
        match self.evaluate(id)? {
            Value::Number(n) => Ok(n),
            other => Err(wrong_arg_type(builtin.name(), "number", other.kind_name())),
        }
    }

    fn number_pair(
        &mut self,
        builtin: Builtin,
        args: &[ExprId],
    ) -> Result<(BigInt, BigInt), EvalError> {
        let a = self.force_number(builtin, args[0])?;
        let b = self.force_number(builtin, args[1])?;
        Ok((a, b))
    }

    fn unary_number(
        &mut self,
        builtin: Builtin,
        arg: ExprId,
        op: impl FnOnce(BigInt) -> BigInt,
    ) -> Result<ExprId, EvalError> {
        let n = self.force_number(builtin, arg)?;
        Ok(self.arena_mut().alloc_number(op(n)))
    }

    /// `isnil x nil (cons (draw (car x)) (multipledraw (cdr x)))`
    fn multiple_draw(&mut self, list: ExprId) -> ExprId {
        let head = self.car_of(list);
        let tail = self.cdr_of(list);
        let arena = self.arena_mut();
        let draw = arena.builtin(Builtin::Draw);
        let drawn = arena.apply(draw, head);
        let multiple_draw = arena.builtin(Builtin::MultipleDraw);
        let rest = arena.apply(multiple_draw, tail);
        let cell = arena.alloc_cons(drawn, rest);
        let isnil = arena.builtin(Builtin::IsNil);
        let test = arena.apply(isnil, list);
        let nil = arena.builtin(Builtin::Nil);
        arena.apply2(test, nil, cell)
    }

    /// One protocol step. Finish with `(modem next, multipledraw data)` on flag 0; otherwise
    /// send `data` now and resume `interact protocol (modem next) reply`.
    fn f38(&mut self, protocol: ExprId, triple: ExprId) -> Result<ExprId, EvalError> {
        let flag = self.car_of(triple);
        let rest = self.cdr_of(triple);
        let next = self.car_of(rest);
        let rest = self.cdr_of(rest);
        let data = self.car_of(rest);

        let flag = self.force_number(Builtin::F38, flag)?;
        let arena = self.arena_mut();
        let modem = arena.builtin(Builtin::Modem);
        let state = arena.apply(modem, next);

        if flag.is_zero() {
            let multiple_draw = arena.builtin(Builtin::MultipleDraw);
            let pictures = arena.apply(multiple_draw, data);
            let nil = arena.builtin(Builtin::Nil);
            let pictures = arena.alloc_cons(pictures, nil);
            return Ok(arena.alloc_cons(state, pictures));
        }

        let request = self.reify(data)?;
        let response = self.send(request)?;
        let arena = self.arena_mut();
        let reply = arena.alloc_data(&response);
        let interact = arena.builtin(Builtin::Interact);
        Ok(arena.apply3(interact, protocol, state, reply))
    }
}
