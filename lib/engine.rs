use anyhow::Result;
use tracing::debug;

use crate::{
    error::Error, evaluator::evaluate, lexer::scan, parser::parse, store::VariableStore,
    value::Value,
};

pub trait Engine {
    fn run(&mut self, input: &str) -> Result<Value>;

    fn store(&self) -> &VariableStore;
}

pub fn new_interpreter() -> Box<dyn Engine> {
    Box::new(Interpreter::new())
}

/// Runs one statement through scan, parse and evaluate against `store`.
pub fn interpret(input: &str, store: &mut VariableStore) -> std::result::Result<Value, Error> {
    let tokens = scan(input)?;
    debug!(tokens = tokens.len(), "scanned statement");

    let node = parse(tokens)?;
    debug!(ast = %node, "parsed statement");

    let value = evaluate(&node, store)?;
    debug!(%value, "evaluated statement");

    Ok(value)
}

/// A session: one variable store shared by every statement it runs.
#[derive(Debug, Default)]
pub struct Interpreter {
    store: VariableStore,
}

impl Interpreter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn interpret(&mut self, input: &str) -> std::result::Result<Value, Error> {
        interpret(input, &mut self.store)
    }

}

impl Engine for Interpreter {
    fn run(&mut self, input: &str) -> Result<Value> {
        Ok(self.interpret(input)?)
    }

    fn store(&self) -> &VariableStore {
        &self.store
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{LexError, ParseError};
    use crate::token::Token;

    #[test]
    fn test_session() {
        let mut interpreter = Interpreter::new();
        let tests = vec![
            ("a := 1 + 3;", Value::Integer(4)),
            ("a*2;", Value::Integer(8)),
            ("b := a / 8;", Value::Float(0.5)),
            ("a + b ;", Value::Float(4.5)),
            ("a > b; // compare", Value::Bool(true)),
            ("c;", Value::Undefined),
            ("QUIT", Value::Quit),
        ];

        for (input, expected) in tests {
            assert_eq!(interpreter.interpret(input).unwrap(), expected, "input: {input}");
        }
        assert_eq!(interpreter.store().len(), 2);
    }

    #[test]
    fn test_errors_do_not_touch_store() {
        let mut interpreter = Interpreter::new();
        interpreter.interpret("a := 2;").unwrap();

        let tests = vec![
            (
                "a := 345.3435.345;",
                Error::Lex(LexError::InvalidNumberFormat {
                    offset: 5,
                    literal: "345.3435".to_string(),
                }),
            ),
            (
                "a := 1 +;",
                Error::Parse(ParseError::new(
                    Some(Token::Semi),
                    "expected an identifier, a number or '('",
                )),
            ),
            (
                "a := 3",
                Error::Parse(ParseError::new(None, "semicolon required")),
            ),
        ];

        for (input, expected) in tests {
            assert_eq!(interpreter.interpret(input).unwrap_err(), expected, "input: {input}");
        }
        assert_eq!(interpreter.store().get("a"), Value::Integer(2));
    }

    #[test]
    fn test_engine() {
        let mut engine = new_interpreter();
        engine.run("x := 10;").unwrap();
        assert_eq!(engine.run("x - 4;").unwrap(), Value::Integer(6));

        let err = engine.run("x ? 1;").unwrap_err();
        assert_eq!(err.to_string(), "lex error: <? 1;> invalid token at offset 2");
    }
}
