//! Parser for gating expressions, built with chumsky over the logos tokens.
//!
//! Precedence, loosest first:
//!
//! | level | operators |
//! |---|---|
//! | or | `or`, `\|\|` |
//! | and | `and`, `&&` |
//! | comparison | `==` `!=` `===` `!==` `<` `<=` `>` `>=` `in` `not in` |
//! | additive | `+` `-` `~` |
//! | multiplicative | `*` `/` `%` |
//! | unary | `not` `!` `-` `+` |
//! | postfix | `.field` |

use std::ops::Range;

use chumsky::input::{Stream, ValueInput};
use chumsky::prelude::*;

use crate::ast::{ArithmeticOp, BinaryOp, Expr, LogicalOp, UnaryOp};
use crate::error::ExpressionError;
use crate::lexer::{Token, lex};
use crate::value::Value;

type Span = SimpleSpan;

/// Deepest nesting of brackets and prefix operators an expression may use.
pub const MAX_DEPTH: usize = 64;

/// Most tokens an expression may contain.
pub const MAX_TOKENS: usize = 512;

/// Word operators; never valid as names.
const KEYWORDS: [&str; 4] = ["and", "or", "in", "not"];

/// Parse an expression source string into an [`Expr`].
///
/// Nesting and length are checked on the token stream before parsing, so
/// the parser and the evaluator only ever see bounded trees.
///
/// # Errors
///
/// Returns the lexing error, `NestingTooDeep` or `TooLong` when a limit is
/// exceeded, or the first parsing error.
pub fn parse(source: &str) -> Result<Expr, ExpressionError> {
    let tokens = lex(source)?;
    check_nesting(&tokens)?;
    if tokens.len() > MAX_TOKENS {
        return Err(ExpressionError::TooLong {
            tokens: tokens.len(),
            limit: MAX_TOKENS,
        });
    }

    let len = tokens.last().map_or(0, |(_, s)| s.end);
    let eoi: Span = (len..len).into();
    let token_iter = tokens
        .into_iter()
        .map(|(token, span)| (token, Span::from(span)));
    let stream = Stream::from_iter(token_iter).map(eoi, |(t, s): (_, _)| (t, s));

    let (output, errors) = expression_parser().parse(stream).into_output_errors();
    if let Some(error) = errors.first() {
        return Err(to_expression_error(error));
    }
    output.ok_or_else(|| ExpressionError::UnexpectedEnd {
        expected: "a value".to_owned(),
    })
}

/// Build the expression parser.
fn expression_parser<'a, I>() -> impl Parser<'a, I, Expr, extra::Err<Rich<'a, Token>>> + Clone
where
    I: ValueInput<'a, Token = Token, Span = Span>,
{
    let keyword =
        |k: &'static str| select! { Token::Ident(ref w) if w.as_str() == k => () }.labelled(k);

    let expr = recursive(|expr| {
        let scalar = select! {
            Token::Integer(n) => Expr::Literal(Value::Int(n)),
            Token::Float(n) => Expr::Literal(Value::Float(n)),
            Token::Str(s) => Expr::Literal(Value::Str(s)),
            Token::Ident(w) if !KEYWORDS.contains(&w.as_str()) => word(w),
        };

        let array = expr
            .clone()
            .separated_by(just(Token::Comma))
            .allow_trailing()
            .collect::<Vec<Expr>>()
            .delimited_by(just(Token::LBracket), just(Token::RBracket))
            .map(Expr::Array);

        let parenthesized = expr.delimited_by(just(Token::LParen), just(Token::RParen));

        let atom = choice((scalar, array, parenthesized)).labelled("a value");

        let field = select! { Token::Ident(w) => w }.labelled("field name");
        let member = atom.foldl(
            just(Token::Dot).ignore_then(field).repeated(),
            |target, field| Expr::Member(Box::new(target), field),
        );

        let prefix = choice((
            just(Token::Bang).to(Some(UnaryOp::Not)),
            keyword("not").to(Some(UnaryOp::Not)),
            just(Token::Minus).to(Some(UnaryOp::Negate)),
            just(Token::Plus).to(None),
        ));
        let unary = prefix
            .repeated()
            .foldr(member, |op, operand| match op {
                Some(op) => Expr::Unary(op, Box::new(operand)),
                None => operand,
            });

        let product_op = choice((
            just(Token::Star).to(BinaryOp::Arithmetic(ArithmeticOp::Mul)),
            just(Token::Slash).to(BinaryOp::Arithmetic(ArithmeticOp::Div)),
            just(Token::Percent).to(BinaryOp::Arithmetic(ArithmeticOp::Mod)),
        ));
        let product = unary
            .clone()
            .foldl(product_op.then(unary).repeated(), fold_binary);

        let sum_op = choice((
            just(Token::Plus).to(BinaryOp::Arithmetic(ArithmeticOp::Add)),
            just(Token::Minus).to(BinaryOp::Arithmetic(ArithmeticOp::Sub)),
            just(Token::Tilde).to(BinaryOp::Concat),
        ));
        let sum = product
            .clone()
            .foldl(sum_op.then(product).repeated(), fold_binary);

        let comparison_op = choice((
            keyword("not").then(keyword("in")).to(BinaryOp::NotIn),
            keyword("in").to(BinaryOp::In),
            just(Token::Eq).to(BinaryOp::Eq),
            just(Token::NotEq).to(BinaryOp::NotEq),
            just(Token::StrictEq).to(BinaryOp::StrictEq),
            just(Token::StrictNotEq).to(BinaryOp::StrictNotEq),
            just(Token::Le).to(BinaryOp::Le),
            just(Token::Lt).to(BinaryOp::Lt),
            just(Token::Ge).to(BinaryOp::Ge),
            just(Token::Gt).to(BinaryOp::Gt),
        ));
        let comparison = sum
            .clone()
            .foldl(comparison_op.then(sum).repeated(), fold_binary);

        let and_op = choice((just(Token::AndAnd).ignored(), keyword("and")));
        let conjunction = comparison.clone().foldl(
            and_op.ignore_then(comparison).repeated(),
            |left, right| logical(LogicalOp::And, left, right),
        );

        let or_op = choice((just(Token::OrOr).ignored(), keyword("or")));
        conjunction.clone().foldl(
            or_op.ignore_then(conjunction).repeated(),
            |left, right| logical(LogicalOp::Or, left, right),
        )
    });

    expr.then_ignore(end())
}

/// A bare word: one of the literal keywords or a name.
fn word(text: String) -> Expr {
    let literal = match text.as_str() {
        "true" => Some(Value::Bool(true)),
        "false" => Some(Value::Bool(false)),
        "null" => Some(Value::Null),
        _ => None,
    };
    literal.map_or_else(|| Expr::Name(text), Expr::Literal)
}

fn fold_binary(left: Expr, (op, right): (BinaryOp, Expr)) -> Expr {
    Expr::Binary(op, Box::new(left), Box::new(right))
}

fn logical(op: LogicalOp, left: Expr, right: Expr) -> Expr {
    Expr::Logical(op, Box::new(left), Box::new(right))
}

fn to_expression_error(error: &Rich<'_, Token>) -> ExpressionError {
    let mut expected: Vec<String> = error.expected().map(ToString::to_string).collect();
    expected.sort();
    expected.dedup();
    let expected = if expected.is_empty() {
        "a valid expression".to_owned()
    } else {
        expected.join(" or ")
    };

    match error.found() {
        Some(token) => ExpressionError::UnexpectedToken {
            span: error.span().into_range(),
            found: token.to_string(),
            expected,
        },
        None => ExpressionError::UnexpectedEnd { expected },
    }
}

/// Rejects token streams whose brackets and prefix operators nest deeper
/// than [`MAX_DEPTH`].
///
/// A prefix operator counts until its operand is complete; a bracket counts
/// until it closes.
fn check_nesting(tokens: &[(Token, Range<usize>)]) -> Result<(), ExpressionError> {
    let mut open: Vec<usize> = Vec::new();
    let mut depth = 0_usize;
    let mut after_operand = false;

    for (token, span) in tokens {
        match token {
            Token::LParen | Token::LBracket => {
                open.push(depth);
                depth += 1;
                after_operand = false;
            }
            Token::RParen | Token::RBracket => {
                open.pop();
                depth = base_depth(&open);
                after_operand = true;
            }
            Token::Bang | Token::Minus | Token::Plus if !after_operand => depth += 1,
            Token::Ident(w) if w == "not" && !after_operand => depth += 1,
            _ => {
                depth = base_depth(&open);
                after_operand = ends_operand(token);
            }
        }
        if depth > MAX_DEPTH {
            return Err(ExpressionError::NestingTooDeep {
                span: span.clone(),
                limit: MAX_DEPTH,
            });
        }
    }
    Ok(())
}

fn base_depth(open: &[usize]) -> usize {
    open.last().map_or(0, |depth| depth + 1)
}

fn ends_operand(token: &Token) -> bool {
    match token {
        Token::Integer(_) | Token::Float(_) | Token::Str(_) => true,
        Token::Ident(w) => !KEYWORDS.contains(&w.as_str()),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn name(n: &str) -> Box<Expr> {
        Box::new(Expr::Name(n.to_owned()))
    }

    fn int(n: i64) -> Box<Expr> {
        Box::new(Expr::Literal(Value::Int(n)))
    }

    #[test]
    fn test_member_comparison() {
        let expr = parse("character.level >= 5").unwrap();
        assert_eq!(
            expr,
            Expr::Binary(
                BinaryOp::Ge,
                Box::new(Expr::Member(name("character"), "level".to_owned())),
                int(5),
            )
        );
    }

    #[test]
    fn test_and_binds_tighter_than_or() {
        let expr = parse("a or b and c").unwrap();
        assert_eq!(
            expr,
            Expr::Logical(
                LogicalOp::Or,
                name("a"),
                Box::new(Expr::Logical(LogicalOp::And, name("b"), name("c"))),
            )
        );
    }

    #[test]
    fn test_symbolic_and_word_operators_agree() {
        assert_eq!(parse("a && !b").unwrap(), parse("a and not b").unwrap());
        assert_eq!(parse("a || b").unwrap(), parse("a or b").unwrap());
    }

    #[test]
    fn test_multiplication_binds_tighter_than_addition() {
        let expr = parse("1 + 2 * 3").unwrap();
        assert_eq!(
            expr,
            Expr::Binary(
                BinaryOp::Arithmetic(ArithmeticOp::Add),
                int(1),
                Box::new(Expr::Binary(
                    BinaryOp::Arithmetic(ArithmeticOp::Mul),
                    int(2),
                    int(3)
                )),
            )
        );
    }

    #[test]
    fn test_subtraction_is_left_associative() {
        let expr = parse("10 - 3 - 2").unwrap();
        let sub = BinaryOp::Arithmetic(ArithmeticOp::Sub);
        assert_eq!(
            expr,
            Expr::Binary(sub, Box::new(Expr::Binary(sub, int(10), int(3))), int(2))
        );
    }

    #[test]
    fn test_literal_words() {
        assert_eq!(parse("true").unwrap(), Expr::Literal(Value::Bool(true)));
        assert_eq!(parse("null").unwrap(), Expr::Literal(Value::Null));
    }

    #[test]
    fn test_not_in() {
        let expr = parse("equipment.weapon not in ['Stick', 'Rock']").unwrap();
        match expr {
            Expr::Binary(BinaryOp::NotIn, _, right) => {
                assert!(matches!(*right, Expr::Array(ref items) if items.len() == 2));
            }
            other => panic!("expected NotIn, got {other:?}"),
        }
    }

    #[test]
    fn test_unary_not_and_parentheses() {
        let expr = parse("not (gold > 10)").unwrap();
        assert!(matches!(expr, Expr::Unary(UnaryOp::Not, _)));
    }

    #[test]
    fn test_trailing_comma_in_array() {
        assert!(parse("[1, 2,]").is_ok());
    }

    #[test]
    fn test_keyword_is_not_a_name() {
        assert!(parse("and > 1").is_err());
    }

    #[test]
    fn test_trailing_tokens_rejected() {
        let err = parse("gold > 5 6").unwrap_err();
        assert!(matches!(err, ExpressionError::UnexpectedToken { .. }));
    }

    #[test]
    fn test_dangling_operator_is_unexpected_end() {
        let err = parse("character.level >=").unwrap_err();
        assert!(matches!(err, ExpressionError::UnexpectedEnd { .. }));
    }

    #[test]
    fn test_unbalanced_parenthesis() {
        assert!(parse("(gold > 5").is_err());
    }

    #[test]
    fn test_nesting_up_to_the_limit_parses() {
        let source = format!("{}1{}", "(".repeat(MAX_DEPTH), ")".repeat(MAX_DEPTH));

        assert_eq!(parse(&source).unwrap(), Expr::Literal(Value::Int(1)));
    }

    #[test]
    fn test_nesting_past_the_limit_is_rejected() {
        let parens = format!("{}1{}", "(".repeat(1000), ")".repeat(1000));
        let brackets = format!("{}{}", "[".repeat(MAX_DEPTH + 1), "]".repeat(MAX_DEPTH + 1));
        let negations = format!("{}true", "not ".repeat(MAX_DEPTH + 1));

        for source in [parens, brackets, negations] {
            let err = parse(&source).unwrap_err();
            assert!(
                matches!(err, ExpressionError::NestingTooDeep { limit: MAX_DEPTH, .. }),
                "got {err:?}"
            );
        }
    }

    #[test]
    fn test_sibling_groups_do_not_add_up() {
        let source = vec!["not (gold > 1)"; 40].join(" and ");

        assert!(parse(&source).is_ok());
    }

    #[test]
    fn test_too_many_tokens_is_rejected() {
        let source = format!("gold{}", " - 1".repeat(MAX_TOKENS));

        let err = parse(&source).unwrap_err();

        assert!(matches!(err, ExpressionError::TooLong { limit: MAX_TOKENS, .. }));
    }
}
