use std::{cmp::Ordering, fmt};

use crate::{
    ast::{Command, Node},
    error::EvalError,
    store::VariableStore,
    value::Value,
};

type Result<T> = std::result::Result<T, EvalError>;

#[derive(Debug, Clone, Copy, PartialEq)]
enum Operator {
    Add,
    Sub,
    Multiply,
    Divide,
    Lt,
    Le,
    Gt,
    Ge,
    Neq,
    Eq,
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Operator::Add => write!(f, "+"),
            Operator::Sub => write!(f, "-"),
            Operator::Multiply => write!(f, "*"),
            Operator::Divide => write!(f, "/"),
            Operator::Lt => write!(f, "<"),
            Operator::Le => write!(f, "<="),
            Operator::Gt => write!(f, ">"),
            Operator::Ge => write!(f, ">="),
            Operator::Neq => write!(f, "<>"),
            Operator::Eq => write!(f, "="),
        }
    }
}

/// Evaluates one statement tree against `store`. Only `Assign` writes to the
/// store, and only after its right-hand side evaluated successfully.
pub fn evaluate(node: &Node, store: &mut VariableStore) -> Result<Value> {
    let value = match node {
        Node::Integer(value) => Value::Integer(*value),
        Node::Float(value) => Value::Float(*value),
        Node::Bool(value) => Value::Bool(*value),
        Node::Id(name) => store.get(name),
        Node::Assign { name, value } => {
            let value = evaluate(value, store)?;
            store.set(name, value)
        }
        Node::Negate(right) => {
            let right = evaluate(right, store)?;
            eval_negate(right)?
        }
        Node::Add(left, right) => eval_infix(left, Operator::Add, right, store)?,
        Node::Sub(left, right) => eval_infix(left, Operator::Sub, right, store)?,
        Node::Multiply(left, right) => eval_infix(left, Operator::Multiply, right, store)?,
        Node::Divide(left, right) => eval_infix(left, Operator::Divide, right, store)?,
        Node::Lt(left, right) => eval_infix(left, Operator::Lt, right, store)?,
        Node::Le(left, right) => eval_infix(left, Operator::Le, right, store)?,
        Node::Gt(left, right) => eval_infix(left, Operator::Gt, right, store)?,
        Node::Ge(left, right) => eval_infix(left, Operator::Ge, right, store)?,
        Node::Neq(left, right) => eval_infix(left, Operator::Neq, right, store)?,
        Node::Eq(left, right) => eval_infix(left, Operator::Eq, right, store)?,
        Node::Command(Command::Quit) => Value::Quit,
    };
    Ok(value)
}

fn eval_infix(
    left: &Node,
    operator: Operator,
    right: &Node,
    store: &mut VariableStore,
) -> Result<Value> {
    let left = evaluate(left, store)?;
    let right = evaluate(right, store)?;
    match operator {
        Operator::Add | Operator::Sub | Operator::Multiply | Operator::Divide => {
            eval_arithmetic(left, operator, right)
        }
        _ => eval_comparison(left, operator, right).map(Value::Bool),
    }
}

fn eval_negate(right: Value) -> Result<Value> {
    match right {
        Value::Integer(value) => Ok(value
            .checked_neg()
            .map(Value::Integer)
            .unwrap_or(Value::Float(-(value as f64)))),
        Value::Float(value) => Ok(Value::Float(-value)),
        Value::Undefined => Ok(Value::Float(f64::NAN)),
        _ => Err(inconsistency(format!("-{}", right))),
    }
}

fn eval_arithmetic(left: Value, operator: Operator, right: Value) -> Result<Value> {
    match (left, right) {
        (Value::Integer(left), Value::Integer(right)) => {
            Ok(eval_integer_arithmetic(left, operator, right))
        }
        (Value::Integer(_) | Value::Float(_), Value::Integer(_) | Value::Float(_)) => {
            match (left.as_f64(), right.as_f64()) {
                (Some(left), Some(right)) => Ok(eval_float_arithmetic(left, operator, right)),
                _ => Err(inconsistency(format!("{} {} {}", left, operator, right))),
            }
        }
        // An unassigned operand poisons the result the same way 0 / 0 does.
        (Value::Undefined, Value::Undefined) => Ok(Value::Float(f64::NAN)),
        (Value::Undefined, other) | (other, Value::Undefined) if other.is_numeric() => {
            Ok(Value::Float(f64::NAN))
        }
        (left, right) => Err(inconsistency(format!("{} {} {}", left, operator, right))),
    }
}

/// Stays integral while the result is exact and in range, otherwise falls
/// back to floating point.
fn eval_integer_arithmetic(left: i64, operator: Operator, right: i64) -> Value {
    let exact = match operator {
        Operator::Add => left.checked_add(right),
        Operator::Sub => left.checked_sub(right),
        Operator::Multiply => left.checked_mul(right),
        Operator::Divide => match (left.checked_rem(right), left.checked_div(right)) {
            (Some(0), Some(quotient)) => Some(quotient),
            _ => None,
        },
        _ => None,
    };
    match exact {
        Some(value) => Value::Integer(value),
        None => eval_float_arithmetic(left as f64, operator, right as f64),
    }
}

// Division by zero is left to IEEE 754: inf, -inf or NaN.
fn eval_float_arithmetic(left: f64, operator: Operator, right: f64) -> Value {
    let value = match operator {
        Operator::Add => left + right,
        Operator::Sub => left - right,
        Operator::Multiply => left * right,
        _ => left / right,
    };
    Value::Float(value)
}

fn eval_comparison(left: Value, operator: Operator, right: Value) -> Result<bool> {
    let ordering = match (left, right) {
        (Value::Integer(left), Value::Integer(right)) => Some(left.cmp(&right)),
        (Value::Integer(_) | Value::Float(_), Value::Integer(_) | Value::Float(_)) => {
            match (left.as_f64(), right.as_f64()) {
                (Some(left), Some(right)) => left.partial_cmp(&right),
                _ => None,
            }
        }
        (Value::Bool(left), Value::Bool(right)) => Some(left.cmp(&right)),
        (Value::Undefined, Value::Undefined) => return Ok(operator == Operator::Eq),
        (Value::Undefined, other) | (other, Value::Undefined)
            if other.is_numeric() || matches!(other, Value::Bool(_)) =>
        {
            None
        }
        (left, right) => return Err(inconsistency(format!("{} {} {}", left, operator, right))),
    };

    Ok(match operator {
        Operator::Eq => ordering == Some(Ordering::Equal),
        Operator::Neq => ordering != Some(Ordering::Equal),
        Operator::Lt => ordering == Some(Ordering::Less),
        Operator::Le => matches!(ordering, Some(Ordering::Less | Ordering::Equal)),
        Operator::Gt => ordering == Some(Ordering::Greater),
        Operator::Ge => matches!(ordering, Some(Ordering::Greater | Ordering::Equal)),
        _ => false,
    })
}

fn inconsistency(shape: String) -> EvalError {
    EvalError::InternalInconsistency(format!("unsupported operands: {}", shape))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexer::scan;
    use crate::parser::parse;

    fn test_eval(input: &str, store: &mut VariableStore) -> Result<Value> {
        let tokens = scan(input).unwrap();
        let node = parse(tokens).unwrap();
        evaluate(&node, store)
    }

    fn boxed(node: Node) -> Box<Node> {
        Box::new(node)
    }

    #[test]
    fn test_eval_integer_expression() {
        let tests = vec![
            ("5;", 5),
            ("-5;", -5),
            ("5 + 5 + 5 + 5 - 10;", 10),
            ("2 * 2 * 2 * 2 * 2;", 32),
            ("-50 + 100 + -50;", 0),
            ("5 * 2 + 10;", 20),
            ("5 + 2 * 10;", 25),
            ("20 + 2 * -10;", 0),
            ("50 / 2 * 2 + 10;", 60),
            ("2 * (5 + 10);", 30),
            ("(5 + 10 * 2 + 15 / 3) * 2 + -10;", 50),
            ("3 - 500 / 10;", -47),
        ];

        for (input, expected) in tests {
            let evaluated = test_eval(input, &mut VariableStore::new()).unwrap();
            assert_eq!(evaluated, Value::Integer(expected), "input: {input}");
        }
    }

    #[test]
    fn test_eval_float_expression() {
        let tests = vec![
            ("7 / 2;", 3.5),
            ("1.5 + 1;", 2.5),
            ("0.25 * 2 ;", 0.5),
            ("-1.5 * 2;", -3.0),
            ("9223372036854775807 + 1;", 9223372036854775808.0),
        ];

        for (input, expected) in tests {
            let evaluated = test_eval(input, &mut VariableStore::new()).unwrap();
            assert_eq!(evaluated, Value::Float(expected), "input: {input}");
        }
    }

    #[test]
    fn test_division_by_zero() {
        let mut store = VariableStore::new();

        assert_eq!(test_eval("1 / 0;", &mut store).unwrap(), Value::Float(f64::INFINITY));
        assert_eq!(
            test_eval("-1 / 0;", &mut store).unwrap(),
            Value::Float(f64::NEG_INFINITY)
        );
        match test_eval("0 / 0;", &mut store).unwrap() {
            Value::Float(value) => assert!(value.is_nan()),
            other => panic!("expected NaN, got {other}"),
        }
    }

    #[test]
    fn test_eval_comparison_expression() {
        let tests = vec![
            ("1 < 2;", true),
            ("1 > 2;", false),
            ("1 < 1;", false),
            ("1 <= 1;", true),
            ("1 >= 2;", false),
            ("1 = 1;", true),
            ("1 <> 1;", false),
            ("1 <> 2;", true),
            ("(3-500/10)>100;", false),
            ("2 = 2.0 ;", true),
            ("7 / 2 > 3;", true),
            ("0 / 0 = 0 / 0;", false),
            ("0 / 0 <> 0 / 0;", true),
        ];

        for (input, expected) in tests {
            let evaluated = test_eval(input, &mut VariableStore::new()).unwrap();
            assert_eq!(evaluated, Value::Bool(expected), "input: {input}");
        }
    }

    #[test]
    fn test_store_persists_across_statements() {
        let mut store = VariableStore::new();

        assert_eq!(test_eval("a := 1 + 3;", &mut store).unwrap(), Value::Integer(4));
        assert_eq!(test_eval("a*2;", &mut store).unwrap(), Value::Integer(8));

        test_eval("e := 10;", &mut store).unwrap();
        test_eval("bcd := a * 2;", &mut store).unwrap();
        assert_eq!(test_eval("e > bcd;", &mut store).unwrap(), Value::Bool(true));
        test_eval("e := 3;", &mut store).unwrap();
        assert_eq!(test_eval("e > bcd;", &mut store).unwrap(), Value::Bool(false));

        for _ in 0..3 {
            assert_eq!(test_eval("bcd;", &mut store).unwrap(), Value::Integer(8));
        }
    }

    #[test]
    fn test_undefined_identifier() {
        let mut store = VariableStore::new();
        let tests = vec![
            ("nope;", Value::Undefined),
            ("nope = nope;", Value::Bool(true)),
            ("nope + 1 = nope + 1;", Value::Bool(false)),
            ("nope * 2 <> nope * 2;", Value::Bool(true)),
            ("nope - 1 < 0;", Value::Bool(false)),
            ("nope <> 1;", Value::Bool(true)),
            ("nope = 1;", Value::Bool(false)),
            ("nope > 1;", Value::Bool(false)),
            ("nope <= 1;", Value::Bool(false)),
            ("nope >= nope;", Value::Bool(false)),
        ];

        for (input, expected) in tests {
            assert_eq!(test_eval(input, &mut store).unwrap(), expected, "input: {input}");
        }
        assert!(store.is_empty());
    }

    #[test]
    fn test_arithmetic_on_undefined_is_nan() {
        let mut store = VariableStore::new();
        let tests = vec!["nope + 1;", "2 * nope;", "nope / nope;", "a := nope - 3;"];

        for input in tests {
            match test_eval(input, &mut store).unwrap() {
                Value::Float(value) => assert!(value.is_nan(), "input: {input}"),
                other => panic!("expected NaN for {input}, got {other}"),
            }
        }

        match evaluate(&Node::Negate(boxed(Node::Id("x".to_string()))), &mut store).unwrap() {
            Value::Float(value) => assert!(value.is_nan()),
            other => panic!("expected NaN, got {other}"),
        }
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_quit_command() {
        let mut store = VariableStore::new();
        assert_eq!(test_eval("quit", &mut store).unwrap(), Value::Quit);
    }

    #[test]
    fn test_hand_built_trees() {
        let mut store = VariableStore::new();
        let tests = vec![
            (Node::Negate(boxed(Node::Integer(3))), Value::Integer(-3)),
            (Node::Negate(boxed(Node::Float(0.5))), Value::Float(-0.5)),
            (
                Node::Negate(boxed(Node::Integer(i64::MIN))),
                Value::Float(-(i64::MIN as f64)),
            ),
            (Node::Bool(true), Value::Bool(true)),
            (
                Node::Eq(boxed(Node::Bool(true)), boxed(Node::Bool(true))),
                Value::Bool(true),
            ),
            (
                Node::Lt(boxed(Node::Bool(false)), boxed(Node::Bool(true))),
                Value::Bool(true),
            ),
        ];

        for (node, expected) in tests {
            assert_eq!(evaluate(&node, &mut store).unwrap(), expected, "node: {node}");
        }
    }

    #[test]
    fn test_error_handling() {
        let tests = vec![
            (
                Node::Add(boxed(Node::Integer(5)), boxed(Node::Bool(true))),
                "internal inconsistency: unsupported operands: 5 + true",
            ),
            (
                Node::Negate(boxed(Node::Bool(true))),
                "internal inconsistency: unsupported operands: -true",
            ),
            (
                Node::Gt(boxed(Node::Bool(true)), boxed(Node::Float(1.5))),
                "internal inconsistency: unsupported operands: true > 1.5",
            ),
            (
                Node::Multiply(boxed(Node::Command(Command::Quit)), boxed(Node::Integer(2))),
                "internal inconsistency: unsupported operands: quit * 2",
            ),
        ];

        for (node, expected) in tests {
            let err = evaluate(&node, &mut VariableStore::new()).unwrap_err();
            assert_eq!(err.to_string(), expected);
        }
    }

    #[test]
    fn test_failed_assignment_does_not_commit() {
        let mut store = VariableStore::new();
        let node = Node::assign(
            "a",
            Node::Add(boxed(Node::Integer(1)), boxed(Node::Bool(false))),
        );

        assert!(evaluate(&node, &mut store).is_err());
        assert_eq!(store.get("a"), Value::Undefined);
        assert!(store.is_empty());
    }
}
