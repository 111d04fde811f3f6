//! Stagehand — gating expression language.
//!
//! Scene connections carry author-written expressions such as
//! `character.level >= 5 and gold > 100` that decide whether the connection
//! is offered to the player. This crate lexes, parses and evaluates them
//! against a read-only [`ExpressionContext`].
//!
//! Evaluation is fail-open: [`Evaluator::evaluate`] treats any lexing,
//! parsing or runtime error as `true` and logs it, so broken author content
//! never locks a player out of the game. [`Evaluator::try_evaluate`] exposes
//! the underlying `Result` for callers (such as content validation) that want
//! to see the error.

pub mod ast;
pub mod context;
pub mod error;
pub mod evaluator;
pub mod lexer;
pub mod parser;
pub mod value;

pub use context::ExpressionContext;
pub use error::ExpressionError;
pub use evaluator::Evaluator;
pub use parser::parse;
pub use value::Value;
