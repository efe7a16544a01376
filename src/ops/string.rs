use crate::{
    error::EvalError,
    interpreter::{
        evaluator::{
            core::{Environment, EvalResult},
            node::{Node, Operation, eval_constant},
        },
        lexer::literal::parse_number,
        value::core::{ConstantValue, Value},
    },
    ops::{constant, number},
    util::num::usize_to_f64_checked,
};

/// `len(s)`: the number of characters in a string.
#[derive(Debug, Clone, Copy, Default)]
pub struct Length;

impl Operation for Length {
    fn name(&self) -> &'static str {
        "Length"
    }

    fn arity(&self) -> usize {
        1
    }

    fn eval(&self, operands: &[Node], env: &mut Environment) -> EvalResult<Value> {
        let a = eval_constant(self, operands, 0, env)?;
        let len = a.as_str()?.chars().count();
        number(usize_to_f64_checked(len)?.into())
    }
}

/// Reads `s` as a boolean or finite number literal.
fn read_literal(s: &str) -> Option<ConstantValue> {
    match s {
        "true" | "True" | "TRUE" => Some(true.into()),
        "false" | "False" | "FALSE" => Some(false.into()),
        _ => parse_number(s).and_then(|n| n.checked().ok()).map(Into::into),
    }
}

/// `parse(s)`: reads a string as a boolean or number literal.
///
/// Fails when the string holds neither.
///
/// # Example
/// ```
/// use opcalc::{defaults::advanced_parser, evaluate, interpreter::evaluator::core::Environment};
///
/// let parser = advanced_parser(Vec::new(), Vec::new()).unwrap();
/// let mut env = Environment::new();
/// assert_eq!(evaluate(&parser, "parse '2.5' * 2", &mut env).unwrap().to_string(), "5");
/// assert_eq!(evaluate(&parser, "parse 'TRUE'", &mut env).unwrap().to_string(), "True");
/// assert!(evaluate(&parser, "parse 'two'", &mut env).is_err());
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct StrictParse;

impl Operation for StrictParse {
    fn name(&self) -> &'static str {
        "StrictParse"
    }

    fn arity(&self) -> usize {
        1
    }

    fn eval(&self, operands: &[Node], env: &mut Environment) -> EvalResult<Value> {
        let a = eval_constant(self, operands, 0, env)?;
        let s = a.as_str()?;
        let value = read_literal(s).ok_or_else(|| {
                        EvalError::invalid_argument(format!(
                            "cannot parse '{s}' into a number or boolean value"
                        ))
                    })?;
        constant(value)
    }
}

/// `tryparse(s)`: like `parse`, but hands back the string itself when it
/// holds no literal.
///
/// # Example
/// ```
/// use opcalc::{defaults::advanced_parser, evaluate, interpreter::evaluator::core::Environment};
///
/// let parser = advanced_parser(Vec::new(), Vec::new()).unwrap();
/// let mut env = Environment::new();
/// assert_eq!(evaluate(&parser, "tryparse '-3' + 1", &mut env).unwrap().to_string(), "-2");
/// assert_eq!(evaluate(&parser, "tryparse 'two' + 1", &mut env).unwrap().to_string(), "two1");
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct Parse;

impl Operation for Parse {
    fn name(&self) -> &'static str {
        "Parse"
    }

    fn arity(&self) -> usize {
        1
    }

    fn eval(&self, operands: &[Node], env: &mut Environment) -> EvalResult<Value> {
        let a = eval_constant(self, operands, 0, env)?;
        match read_literal(a.as_str()?) {
            Some(value) => constant(value),
            None => Ok(Value::Constant(a.without_dummy())),
        }
    }
}
