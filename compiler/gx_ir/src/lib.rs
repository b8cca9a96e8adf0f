//! Galaxy IR - expression graph and value types.
//!
//! This crate holds the data model shared by every other crate:
//! - [`ExprArena`]: index-addressed storage for the lazy expression graph
//! - [`Value`]: fully reduced results (numbers, partial builtins, pictures)
//! - [`Data`]: detached number/nil/cons trees used on the wire and as state
//! - [`Builtin`]: the closed set of primitive functions
//! - [`Name`] and [`StringInterner`] for binding names
//!
//! # Design Philosophy
//!
//! - **Flatten the graph**: nodes refer to each other by [`ExprId`], so
//!   releasing a reduced node's operands is a state change, not a free.
//! - **Closed functions**: a function value is a builtin identifier plus the
//!   argument expressions supplied so far, never an opaque closure.

mod arena;
mod builtin;
mod data;
mod expr_id;
mod interner;
mod name;
mod span;
mod value;

pub use arena::{ExprArena, ExprKind, Thunk};
pub use builtin::Builtin;
pub use data::Data;
pub use expr_id::ExprId;
pub use interner::StringInterner;
pub use name::Name;
pub use span::Span;
pub use value::{FunctionValue, PartialArgs, Picture, Point, Value};

pub use num::BigInt;
