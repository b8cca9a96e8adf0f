//! Galaxy Eval - lazy, memoizing graph reduction.
//!
//! # Architecture
//!
//! - [`Environment`]: name → expression bindings, built once per program
//! - [`Evaluator`]: forces expressions to [`Value`]s, caching every reduced
//!   `Apply` and `Reference` node in the [`ExprArena`]
//! - builtin bodies: arithmetic, combinators, lists, pictures, protocol
//! - [`Transport`] and [`AuditLog`]: the seams `send` talks through
//! - [`interact`]: the host loop that drives a protocol function across
//!   send/draw steps
//!
//! Arguments are handed to builtins unevaluated; a builtin forces exactly
//! the positions its semantics need. That is the whole of the laziness.

mod audit;
mod builtins;
mod diagnostics;
mod environment;
pub mod errors;
mod evaluator;
pub mod interact;
mod picture;
mod program;
mod transport;

pub use audit::{shared_audit_log, AuditLog, SendRecord, SharedAuditLog};
pub use diagnostics::EvalCounters;
pub use environment::Environment;
pub use errors::{EvalError, EvalErrorKind, EvalResult};
pub use evaluator::Evaluator;
pub use interact::{interact, Frame, InteractConfig};
pub use picture::pictures_from_data;
pub use program::Program;
pub use transport::{OfflineTransport, ScriptedTransport, Transport, TransportError};

pub use gx_ir::{Builtin, Data, ExprArena, ExprId, Picture, Point, StringInterner, Value};

/// Decode a bit string straight into graph nodes.
pub fn demodulate(arena: &mut ExprArena, bits: &str) -> Result<ExprId, gx_modem::SignalError> {
    let data = gx_modem::demodulate(bits)?;
    Ok(arena.alloc_data(&data))
}

#[cfg(test)]
mod tests;
