//! Tokenizer for gating expressions.

use std::fmt;
use std::ops::Range;

use logos::Logos;

use crate::error::ExpressionError;

/// Token type for gating expressions.
///
/// Word operators (`and`, `or`, `not`, `in`) and the literals `true`,
/// `false` and `null` come out of the lexer as [`Token::Ident`]; the parser
/// recognises them by spelling.
#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    /// Integer literal.
    Integer(i64),
    /// Floating-point literal.
    Float(f64),
    /// Quoted string literal, escapes resolved.
    Str(String),
    /// Bare identifier or word operator.
    Ident(String),
    /// `.`
    Dot,
    /// `,`
    Comma,
    /// `(`
    LParen,
    /// `)`
    RParen,
    /// `[`
    LBracket,
    /// `]`
    RBracket,
    /// `+`
    Plus,
    /// `-`
    Minus,
    /// `*`
    Star,
    /// `/`
    Slash,
    /// `%`
    Percent,
    /// `~`
    Tilde,
    /// `!`
    Bang,
    /// `==`
    Eq,
    /// `===`
    StrictEq,
    /// `!=`
    NotEq,
    /// `!==`
    StrictNotEq,
    /// `<`
    Lt,
    /// `<=`
    Le,
    /// `>`
    Gt,
    /// `>=`
    Ge,
    /// `&&`
    AndAnd,
    /// `||`
    OrOr,
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Integer(n) => write!(f, "{n}"),
            Token::Float(n) => write!(f, "{n}"),
            Token::Str(s) => write!(f, "\"{s}\""),
            Token::Ident(w) => write!(f, "{w}"),
            Token::Dot => write!(f, "."),
            Token::Comma => write!(f, ","),
            Token::LParen => write!(f, "("),
            Token::RParen => write!(f, ")"),
            Token::LBracket => write!(f, "["),
            Token::RBracket => write!(f, "]"),
            Token::Plus => write!(f, "+"),
            Token::Minus => write!(f, "-"),
            Token::Star => write!(f, "*"),
            Token::Slash => write!(f, "/"),
            Token::Percent => write!(f, "%"),
            Token::Tilde => write!(f, "~"),
            Token::Bang => write!(f, "!"),
            Token::Eq => write!(f, "=="),
            Token::StrictEq => write!(f, "==="),
            Token::NotEq => write!(f, "!="),
            Token::StrictNotEq => write!(f, "!=="),
            Token::Lt => write!(f, "<"),
            Token::Le => write!(f, "<="),
            Token::Gt => write!(f, ">"),
            Token::Ge => write!(f, ">="),
            Token::AndAnd => write!(f, "&&"),
            Token::OrOr => write!(f, "||"),
        }
    }
}

/// Internal logos token; borrows from source during lexing.
#[derive(Logos, Debug, Clone, Copy, PartialEq)]
#[logos(skip r"[ \t\r\n]+")]
enum RawToken {
    #[regex(r"[0-9]+\.[0-9]+")]
    Float,

    #[regex(r"[0-9]+")]
    Integer,

    #[regex(r#""([^"\\]|\\.)*""#)]
    DoubleQuoted,

    #[regex(r"'([^'\\]|\\.)*'")]
    SingleQuoted,

    #[regex(r"[a-zA-Z_][a-zA-Z0-9_]*")]
    Ident,

    #[token(".")]
    Dot,
    #[token(",")]
    Comma,
    #[token("(")]
    LParen,
    #[token(")")]
    RParen,
    #[token("[")]
    LBracket,
    #[token("]")]
    RBracket,
    #[token("+")]
    Plus,
    #[token("-")]
    Minus,
    #[token("*")]
    Star,
    #[token("/")]
    Slash,
    #[token("%")]
    Percent,
    #[token("~")]
    Tilde,
    #[token("!")]
    Bang,
    #[token("==")]
    Eq,
    #[token("===")]
    StrictEq,
    #[token("!=")]
    NotEq,
    #[token("!==")]
    StrictNotEq,
    #[token("<")]
    Lt,
    #[token("<=")]
    Le,
    #[token(">")]
    Gt,
    #[token(">=")]
    Ge,
    #[token("&&")]
    AndAnd,
    #[token("||")]
    OrOr,
}

/// Resolve backslash escapes inside a quoted literal (quotes already stripped).
fn unescape(body: &str) -> String {
    let mut out = String::with_capacity(body.len());
    let mut chars = body.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('n') => out.push('\n'),
            Some('t') => out.push('\t'),
            Some(other) => out.push(other),
            None => out.push('\\'),
        }
    }
    out
}

/// Lex an expression into `(Token, Span)` pairs.
///
/// # Errors
///
/// Returns `ExpressionError::Lex` at the first fragment that is not a valid
/// token, or for a numeric literal that does not fit its type.
pub fn lex(source: &str) -> Result<Vec<(Token, Range<usize>)>, ExpressionError> {
    let mut tokens = Vec::new();
    let mut lexer = RawToken::lexer(source);

    while let Some(result) = lexer.next() {
        let span = lexer.span();
        let slice = lexer.slice();
        let lex_error = || ExpressionError::Lex {
            span: span.clone(),
            fragment: slice.to_owned(),
        };

        let raw = result.map_err(|()| lex_error())?;
        let token = match raw {
            RawToken::Float => Token::Float(slice.parse().map_err(|_| lex_error())?),
            RawToken::Integer => Token::Integer(slice.parse().map_err(|_| lex_error())?),
            RawToken::DoubleQuoted | RawToken::SingleQuoted => {
                Token::Str(unescape(&slice[1..slice.len() - 1]))
            }
            RawToken::Ident => Token::Ident(slice.to_owned()),
            RawToken::Dot => Token::Dot,
            RawToken::Comma => Token::Comma,
            RawToken::LParen => Token::LParen,
            RawToken::RParen => Token::RParen,
            RawToken::LBracket => Token::LBracket,
            RawToken::RBracket => Token::RBracket,
            RawToken::Plus => Token::Plus,
            RawToken::Minus => Token::Minus,
            RawToken::Star => Token::Star,
            RawToken::Slash => Token::Slash,
            RawToken::Percent => Token::Percent,
            RawToken::Tilde => Token::Tilde,
            RawToken::Bang => Token::Bang,
            RawToken::Eq => Token::Eq,
            RawToken::StrictEq => Token::StrictEq,
            RawToken::NotEq => Token::NotEq,
            RawToken::StrictNotEq => Token::StrictNotEq,
            RawToken::Lt => Token::Lt,
            RawToken::Le => Token::Le,
            RawToken::Gt => Token::Gt,
            RawToken::Ge => Token::Ge,
            RawToken::AndAnd => Token::AndAnd,
            RawToken::OrOr => Token::OrOr,
        };
        tokens.push((token, span));
    }

    Ok(tokens)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(source: &str) -> Vec<Token> {
        lex(source).unwrap().into_iter().map(|(t, _)| t).collect()
    }

    #[test]
    fn test_member_comparison() {
        assert_eq!(
            kinds("character.level >= 5"),
            vec![
                Token::Ident("character".into()),
                Token::Dot,
                Token::Ident("level".into()),
                Token::Ge,
                Token::Integer(5),
            ]
        );
    }

    #[test]
    fn test_longest_operator_wins() {
        assert_eq!(
            kinds("a !== b != c === d"),
            vec![
                Token::Ident("a".into()),
                Token::StrictNotEq,
                Token::Ident("b".into()),
                Token::NotEq,
                Token::Ident("c".into()),
                Token::StrictEq,
                Token::Ident("d".into()),
            ]
        );
    }

    #[test]
    fn test_string_literals_unescape() {
        assert_eq!(
            kinds(r#"'it\'s' "say \"hi\"""#),
            vec![Token::Str("it's".into()), Token::Str("say \"hi\"".into())]
        );
    }

    #[test]
    fn test_float_and_integer() {
        assert_eq!(kinds("1.5 2"), vec![Token::Float(1.5), Token::Integer(2)]);
    }

    #[test]
    fn test_invalid_character_is_error() {
        let err = lex("gold > 5 # comment").unwrap_err();
        match err {
            ExpressionError::Lex { span, fragment } => {
                assert_eq!(fragment, "#");
                assert_eq!(span.start, 9);
            }
            other => panic!("expected Lex, got {other:?}"),
        }
    }

    #[test]
    fn test_single_equals_is_error() {
        assert!(lex("gold = 5").is_err());
    }
}
