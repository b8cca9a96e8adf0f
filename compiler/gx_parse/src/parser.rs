//! Recursive descent over prefix expressions, and the line-based loader.

use std::ops::Range;

use gx_eval::{Environment, Program};
use gx_ir::{BigInt, ExprArena, ExprId, Span, StringInterner};
use gx_stack::ensure_sufficient_stack;
use logos::{Logos, SpannedIter};
use tracing::{debug, trace};

use crate::error::ParseError;
use crate::lexer::TokenKind;

const BINDING_SEPARATOR: &str = " = ";

struct Parser<'src, 'a> {
    source: &'src str,
    tokens: SpannedIter<'src, TokenKind>,
    /// Offset of `source` within the text the caller sees.
    base: usize,
    arena: &'a mut ExprArena,
    interner: &'a mut StringInterner,
}

impl<'src, 'a> Parser<'src, 'a> {
    fn new(
        source: &'src str,
        base: usize,
        arena: &'a mut ExprArena,
        interner: &'a mut StringInterner,
    ) -> Self {
        Parser {
            source,
            tokens: TokenKind::lexer(source).spanned(),
            base,
            arena,
            interner,
        }
    }

    fn span(&self, range: Range<usize>) -> Span {
        Span::from_range(range).offset_by(self.base)
    }

    /// Exactly one expression, then end of input.
    fn parse_all(mut self) -> Result<ExprId, ParseError> {
        let expr = self.expr()?;
        if let Some((_, range)) = self.tokens.next() {
            return Err(ParseError::ExcessToken {
                token: self.source[range.clone()].to_string(),
                span: self.span(range),
            });
        }
        Ok(expr)
    }

    fn expr(&mut self) -> Result<ExprId, ParseError> {
        let Some((token, range)) = self.tokens.next() else {
            let end = self.source.len();
            return Err(ParseError::MissingToken {
                span: self.span(end..end),
            });
        };
        match token {
            Ok(TokenKind::Ap) => {
                let func = ensure_sufficient_stack(|| self.expr())?;
                let arg = ensure_sufficient_stack(|| self.expr())?;
                Ok(self.arena.apply(func, arg))
            }
            Ok(TokenKind::Number) => {
                let text = &self.source[range.clone()];
                let n: BigInt = text.parse().map_err(|_| ParseError::InvalidNumber {
                    text: text.to_string(),
                    span: self.span(range),
                })?;
                Ok(self.arena.alloc_number(n))
            }
            Ok(TokenKind::Name) => {
                let name = self.interner.intern(&self.source[range]);
                Ok(self.arena.alloc_reference(name))
            }
            Err(()) => Err(ParseError::UnrecognizedToken {
                span: self.span(range),
            }),
        }
    }
}

/// Parse one prefix expression into `arena`.
///
/// On failure the arena may hold unreachable nodes from the partial parse;
/// no binding refers to them.
pub fn parse_expr(
    arena: &mut ExprArena,
    interner: &mut StringInterner,
    text: &str,
) -> Result<ExprId, ParseError> {
    trace!(len = text.len(), "parse_expr");
    Parser::new(text, 0, arena, interner).parse_all()
}

/// Load newline-separated bindings over the standard library.
pub fn parse_environment(text: &str) -> Result<Program, ParseError> {
    let mut program = Program::standard();
    extend_environment(&mut program, text)?;
    Ok(program)
}

/// Add the bindings in `text` to an existing program.
///
/// All or nothing: if any line fails, `program.env` is left as it was.
pub fn extend_environment(program: &mut Program, text: &str) -> Result<(), ParseError> {
    trace!(len = text.len(), "parse_environment");
    let mut env = program.env.clone();
    let count = bind_lines(text, &mut env, &mut program.arena, &mut program.interner)?;
    program.env = env;
    debug!(bindings = count, total = program.env.len(), "loaded environment");
    Ok(())
}

fn bind_lines(
    text: &str,
    env: &mut Environment,
    arena: &mut ExprArena,
    interner: &mut StringInterner,
) -> Result<usize, ParseError> {
    let mut count = 0;
    let mut offset = 0;
    for raw in text.split_inclusive('\n') {
        let line_start = offset;
        offset += raw.len();
        let line = raw.trim_end_matches(['\n', '\r']);
        if line.trim().is_empty() {
            continue;
        }
        let missing = || ParseError::MissingBinding {
            span: Span::from_range(line_start..line_start + line.len()),
        };
        let (name, rhs_start) = match line.find(BINDING_SEPARATOR) {
            Some(at) => (line[..at].trim(), at + BINDING_SEPARATOR.len()),
            None => return Err(missing()),
        };
        if name.is_empty() || name.contains(char::is_whitespace) {
            return Err(missing());
        }
        let rhs = &line[rhs_start..];
        let expr = Parser::new(rhs, line_start + rhs_start, arena, interner).parse_all()?;
        env.bind(interner.intern(name), expr);
        count += 1;
    }
    Ok(count)
}
