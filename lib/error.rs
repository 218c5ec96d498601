use thiserror::Error;

use crate::token::Token;

#[derive(Error, Debug, PartialEq, Clone)]
pub enum LexError {
    #[error("<{remainder}> invalid token at offset {offset}")]
    InvalidToken { offset: usize, remainder: String },

    #[error("invalid number format: {literal} at offset {offset}")]
    InvalidNumberFormat { offset: usize, literal: String },
}

#[derive(Error, Debug, PartialEq, Clone)]
#[error("{}: {message}", describe(.token))]
pub struct ParseError {
    pub token: Option<Token>,
    pub message: String,
}

impl ParseError {
    pub fn new(token: Option<Token>, message: impl Into<String>) -> Self {
        Self {
            token,
            message: message.into(),
        }
    }
}

fn describe(token: &Option<Token>) -> String {
    match token {
        Some(token) => format!("unexpected '{}'", token),
        None => "unexpected end of input".to_string(),
    }
}

#[derive(Error, Debug, PartialEq, Clone)]
pub enum EvalError {
    /// A tree shape the parser never builds, such as a boolean operand to
    /// arithmetic.
    #[error("internal inconsistency: {0}")]
    InternalInconsistency(String),
}

#[derive(Error, Debug, PartialEq, Clone)]
pub enum Error {
    #[error("lex error: {0}")]
    Lex(#[from] LexError),

    #[error("parse error: {0}")]
    Parse(#[from] ParseError),

    #[error("eval error: {0}")]
    Eval(#[from] EvalError),
}
