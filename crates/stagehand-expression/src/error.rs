//! Expression errors.

use std::ops::Range;

/// Errors raised while lexing, parsing or evaluating a gating expression.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ExpressionError {
    /// The lexer hit input it cannot tokenize.
    #[error("unrecognized input '{fragment}' at {}..{}", span.start, span.end)]
    Lex {
        /// Byte range of the offending input.
        span: Range<usize>,
        /// The offending source text.
        fragment: String,
    },

    /// The parser found a token it did not expect.
    #[error("expected {expected}, found '{found}' at {}..{}", span.start, span.end)]
    UnexpectedToken {
        /// Byte range of the offending token.
        span: Range<usize>,
        /// What the parser found.
        found: String,
        /// What the parser was looking for.
        expected: String,
    },

    /// The expression ended early.
    #[error("unexpected end of expression, expected {expected}")]
    UnexpectedEnd {
        /// What the parser was looking for.
        expected: String,
    },

    /// Brackets and prefix operators are nested deeper than the parser
    /// allows.
    #[error("expression nested deeper than {limit} levels at {}..{}", span.start, span.end)]
    NestingTooDeep {
        /// Byte range of the token that went over the limit.
        span: Range<usize>,
        /// The nesting limit.
        limit: usize,
    },

    /// The expression has more tokens than the parser accepts.
    #[error("expression has {tokens} tokens, more than the limit of {limit}")]
    TooLong {
        /// Number of tokens in the expression.
        tokens: usize,
        /// The token limit.
        limit: usize,
    },

    /// The expression parsed but could not be evaluated (type mismatch,
    /// division by zero, overflow).
    #[error("evaluation error: {0}")]
    Evaluation(String),
}
