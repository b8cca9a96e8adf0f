//! Error types for evaluation.
//!
//! `EvalErrorKind` is the typed category, matched on by drivers and tests.
//! Factory functions (e.g. `division_by_zero()`) are the public way to build
//! errors; they fill in both `kind` and `message`.

use std::fmt;

use gx_ir::Value;
use gx_modem::SignalError;

use crate::transport::TransportError;

/// Result of evaluation.
pub type EvalResult = Result<Value, EvalError>;

/// Typed error category.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum EvalErrorKind {
    #[error("type mismatch: expected {expected}, got {got}")]
    TypeMismatch { expected: String, got: String },

    #[error("undefined reference: {name}")]
    UndefinedReference { name: String },

    #[error("division by zero")]
    DivisionByZero,

    #[error("malformed signal: {0}")]
    MalformedSignal(SignalError),

    #[error("transport failure: {0}")]
    TransportFailure(TransportError),

    #[error("unsupported interaction flag {flag}")]
    UnsupportedFlag { flag: String },

    #[error("interaction exceeded {limit} sends")]
    SendLimitExceeded { limit: usize },
}

/// Evaluation error.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EvalError {
    /// Structured error category.
    pub kind: EvalErrorKind,
    /// Human-readable error message.
    ///
    /// For most factory-created errors this equals `kind.to_string()`.
    pub message: String,
    /// Context notes, innermost first.
    pub notes: Vec<String>,
}

impl EvalError {
    /// Create an error whose message is the kind's display text.
    pub fn from_kind(kind: EvalErrorKind) -> Self {
        let message = kind.to_string();
        EvalError {
            kind,
            message,
            notes: Vec::new(),
        }
    }

    /// Create an error with a message that differs from the kind's display.
    pub fn with_message(kind: EvalErrorKind, message: impl Into<String>) -> Self {
        EvalError {
            kind,
            message: message.into(),
            notes: Vec::new(),
        }
    }

    /// Add a context note to this error.
    #[must_use]
    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.notes.push(note.into());
        self
    }

    pub fn is_type_mismatch(&self) -> bool {
        matches!(self.kind, EvalErrorKind::TypeMismatch { .. })
    }
}

impl fmt::Display for EvalError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)?;
        for note in &self.notes {
            write!(f, "\n  note: {note}")?;
        }
        Ok(())
    }
}

impl std::error::Error for EvalError {}

impl From<SignalError> for EvalError {
    fn from(err: SignalError) -> Self {
        malformed_signal(err)
    }
}

impl From<TransportError> for EvalError {
    fn from(err: TransportError) -> Self {
        transport_failure(err)
    }
}

// Type errors

/// A forced value had the wrong kind.
#[cold]
pub fn type_mismatch(expected: &str, got: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::TypeMismatch {
        expected: expected.to_string(),
        got: got.to_string(),
    })
}

/// An argument of `builtin` forced to the wrong kind.
#[cold]
pub fn wrong_arg_type(builtin: &str, expected: &str, got: &str) -> EvalError {
    let kind = EvalErrorKind::TypeMismatch {
        expected: expected.to_string(),
        got: got.to_string(),
    };
    EvalError::with_message(kind, format!("{builtin} expects a {expected} argument, got {got}"))
}

/// The left side of an application is not a function.
#[cold]
pub fn invalid_function_call(got: &str) -> EvalError {
    let kind = EvalErrorKind::TypeMismatch {
        expected: "function".to_string(),
        got: got.to_string(),
    };
    EvalError::with_message(kind, format!("invalid function call: cannot apply a {got}"))
}

/// The nil/cons probe answered with something other than a sentinel.
#[cold]
pub fn not_a_list(got: &str) -> EvalError {
    let kind = EvalErrorKind::TypeMismatch {
        expected: "nil or cons".to_string(),
        got: got.to_string(),
    };
    EvalError::with_message(kind, "isnil probe yielded neither sentinel")
}

/// A picture has no data representation.
#[cold]
pub fn not_modulatable(got: &str) -> EvalError {
    let kind = EvalErrorKind::TypeMismatch {
        expected: "number or list".to_string(),
        got: got.to_string(),
    };
    EvalError::with_message(kind, format!("cannot modulate a {got}"))
}

// Lookup errors

#[cold]
pub fn undefined_reference(name: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::UndefinedReference {
        name: name.to_string(),
    })
}

// Arithmetic errors

#[cold]
pub fn division_by_zero() -> EvalError {
    EvalError::from_kind(EvalErrorKind::DivisionByZero)
}

// Protocol errors

#[cold]
pub fn malformed_signal(err: SignalError) -> EvalError {
    EvalError::from_kind(EvalErrorKind::MalformedSignal(err))
}

#[cold]
pub fn transport_failure(err: TransportError) -> EvalError {
    EvalError::from_kind(EvalErrorKind::TransportFailure(err))
}

#[cold]
pub fn unsupported_flag(flag: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::UnsupportedFlag {
        flag: flag.to_string(),
    })
}

#[cold]
pub fn send_limit_exceeded(limit: usize) -> EvalError {
    EvalError::from_kind(EvalErrorKind::SendLimitExceeded { limit })
}
