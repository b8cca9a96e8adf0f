use gx_ir::Span;

/// Why program text was rejected.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    #[error("excess token `{token}`")]
    ExcessToken { token: String, span: Span },

    #[error("missing token")]
    MissingToken { span: Span },

    #[error("invalid number `{text}`")]
    InvalidNumber { text: String, span: Span },

    #[error("unrecognized token")]
    UnrecognizedToken { span: Span },

    #[error("line is not a binding")]
    MissingBinding { span: Span },
}

impl ParseError {
    /// Location of the offending text.
    pub fn span(&self) -> Span {
        match self {
            ParseError::ExcessToken { span, .. }
            | ParseError::MissingToken { span }
            | ParseError::InvalidNumber { span, .. }
            | ParseError::UnrecognizedToken { span }
            | ParseError::MissingBinding { span } => *span,
        }
    }

    /// Short text for a label under the span.
    pub fn label(&self) -> &'static str {
        match self {
            ParseError::ExcessToken { .. } => "expression already ended here",
            ParseError::MissingToken { .. } => "expected an expression here",
            ParseError::InvalidNumber { .. } => "not a number",
            ParseError::UnrecognizedToken { .. } => "unexpected input",
            ParseError::MissingBinding { .. } => "expected `name = expression`",
        }
    }
}
