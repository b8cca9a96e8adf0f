//! Fully reduced values.

use std::fmt;
use std::sync::Arc;

use num::BigInt;
use smallvec::SmallVec;

use crate::{Builtin, ExprId};

/// Arguments supplied to a partial application so far.
///
/// The widest builtin takes three arguments, so partials never spill.
pub type PartialArgs = SmallVec<[ExprId; 3]>;

/// Result of reducing an expression.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Value {
    /// Arbitrary-precision signed integer.
    Number(BigInt),
    /// A builtin waiting for more arguments.
    Function(FunctionValue),
    /// Points produced by `draw` and friends. Never modulated.
    Picture(Picture),
}

impl Value {
    pub fn number(n: impl Into<BigInt>) -> Self {
        Value::Number(n.into())
    }

    /// A builtin with no arguments supplied yet.
    pub fn builtin(builtin: Builtin) -> Self {
        Value::Function(FunctionValue::new(builtin))
    }

    /// Kind name used in type mismatch messages.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Value::Number(_) => "number",
            Value::Function(_) => "function",
            Value::Picture(_) => "picture",
        }
    }

    pub fn as_number(&self) -> Option<&BigInt> {
        match self {
            Value::Number(n) => Some(n),
            _ => None,
        }
    }

    pub fn as_function(&self) -> Option<&FunctionValue> {
        match self {
            Value::Function(f) => Some(f),
            _ => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Number(n) => write!(f, "{n}"),
            Value::Function(func) => write!(f, "{func}"),
            Value::Picture(p) => write!(f, "<picture: {} points>", p.points.len()),
        }
    }
}

/// A builtin plus the (unevaluated) arguments it has been given.
///
/// `args.len()` is always below `builtin.arity()`; supplying the last
/// argument runs the builtin's body instead of growing the partial.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FunctionValue {
    pub builtin: Builtin,
    pub args: PartialArgs,
}

impl FunctionValue {
    pub fn new(builtin: Builtin) -> Self {
        FunctionValue {
            builtin,
            args: PartialArgs::new(),
        }
    }

    pub fn with_args(builtin: Builtin, args: &[ExprId]) -> Self {
        debug_assert!(args.len() < builtin.arity());
        FunctionValue {
            builtin,
            args: PartialArgs::from_slice(args),
        }
    }

    /// Arguments still needed before the body runs.
    pub fn remaining(&self) -> usize {
        self.builtin.arity() - self.args.len()
    }
}

impl fmt::Display for FunctionValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.args.is_empty() {
            write!(f, "{}", self.builtin.name())
        } else {
            write!(f, "<{} applied to {}>", self.builtin.name(), self.args.len())
        }
    }
}

/// A grid coordinate.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Point {
    pub x: i64,
    pub y: i64,
}

impl Point {
    pub const fn new(x: i64, y: i64) -> Self {
        Point { x, y }
    }
}

/// Ordered collection of points, as handed to a renderer.
///
/// Points are shared, so copying a picture value out of a cached node
/// does not copy the points.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Picture {
    pub points: Arc<[Point]>,
}

impl Default for Picture {
    fn default() -> Self {
        Picture::new(Vec::new())
    }
}

impl Picture {
    pub fn new(points: Vec<Point>) -> Self {
        Picture {
            points: points.into(),
        }
    }

    /// Every point of an `n`-by-`n` grid whose coordinates sum to an even number.
    ///
    /// Points are listed column by column.
    pub fn checkerboard(n: i64) -> Self {
        let mut points = Vec::new();
        for x in 0..n.max(0) {
            for y in (0..n).filter(|y| (x + y) % 2 == 0) {
                points.push(Point::new(x, y));
            }
        }
        Picture::new(points)
    }
}
