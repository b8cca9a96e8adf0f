//! Tokens of program text.
//!
//! Every whitespace-separated word is exactly one token: the keyword `ap`,
//! an optionally negative decimal number, or a name. Names are anything
//! else, including punctuation like `:1029`.

use gx_ir::Span;
use logos::Logos;

#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
#[logos(skip r"[ \t\r\n\f]+")]
pub enum TokenKind {
    #[token("ap")]
    Ap,

    #[regex(r"-?[0-9]+", priority = 3)]
    Number,

    #[regex(r"[^ \t\r\n\f]+", priority = 1)]
    Name,
}

/// Tokenize `text`, for diagnostics and tests.
///
/// Unrecognized input is reported as `None`.
pub fn tokenize(text: &str) -> Vec<(Option<TokenKind>, Span)> {
    TokenKind::lexer(text)
        .spanned()
        .map(|(token, range)| (token.ok(), Span::from_range(range)))
        .collect()
}
