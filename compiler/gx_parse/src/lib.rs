//! Galaxy Parse - program text into expression graphs.
//!
//! Two layers:
//! - [`parse_expr`]: one expression in prefix form (`ap ap add 1 2`)
//! - [`parse_environment`]: newline-separated `name = expression` bindings
//!   over the standard library
//!
//! All spans are byte offsets into the text handed to the entry point.

mod error;
pub mod lexer;
mod parser;

pub use error::ParseError;
pub use lexer::TokenKind;
pub use parser::{extend_environment, parse_environment, parse_expr};

#[cfg(test)]
mod tests;
