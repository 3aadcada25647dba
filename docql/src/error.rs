use crate::grammar;
use thiserror::Error;

/// Custom error type for parsing errors
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("Syntax error: {0}")]
    SyntaxError(String),
    #[error("Empty expression")]
    EmptyExpression,
    #[error("Expected {expected}, got {got:?}")]
    UnexpectedRule { expected: &'static str, got: grammar::Rule },
    #[error("Missing {0} operand")]
    MissingOperand(&'static str),
}

impl From<pest::error::Error<grammar::Rule>> for ParseError {
    fn from(err: pest::error::Error<grammar::Rule>) -> Self { ParseError::SyntaxError(err.to_string()) }
}

/// Errors raised while turning grouped aggregation output back into caller-facing rows
#[derive(Debug, Error, PartialEq)]
pub enum GroupDecodeError {
    #[error("row {index} has no group identifier document")]
    MissingGroupId { index: usize },
}
