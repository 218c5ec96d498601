pub mod ast;
pub mod engine;
pub mod error;
pub mod evaluator;
pub mod lexer;
pub mod parser;
pub mod store;
pub mod token;
pub mod value;

pub use ast::{Command, Node};
pub use engine::{interpret, new_interpreter, Engine, Interpreter};
pub use error::{Error, EvalError, LexError, ParseError};
pub use evaluator::evaluate;
pub use lexer::{scan, Lexer};
pub use parser::{parse, Parser};
pub use store::VariableStore;
pub use token::{Number, Token, TokenKind};
pub use value::Value;
