use std::rc::Rc;

use crate::{
    error::EvalError,
    interpreter::{
        evaluator::{
            core::{Environment, EvalResult},
            node::{Node, Operation, Operator, eval_constant, operand},
        },
        value::core::{ConstantValue, Value},
    },
    ops::{constant, number},
    util::num::f64_to_usize_checked,
};

/// `a; b` and `pass(a, b)`: evaluates both operands and returns the second.
///
/// The second value is handed on untouched, so dummy constants and bindings
/// pass through.
///
/// # Example
/// ```
/// use opcalc::{defaults::advanced_parser, evaluate, interpreter::evaluator::core::Environment};
///
/// let parser = advanced_parser(Vec::new(), Vec::new()).unwrap();
/// let value = evaluate(&parser, "pass(1, _)", &mut Environment::new()).unwrap();
/// assert!(value.into_constant().is_dummy());
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct Pass;

impl Operation for Pass {
    fn name(&self) -> &'static str {
        "Pass"
    }

    fn arity(&self) -> usize {
        2
    }

    fn eval(&self, operands: &[Node], env: &mut Environment) -> EvalResult<Value> {
        operand(self, operands, 0)?.eval(env)?;
        operand(self, operands, 1)?.eval(env)
    }
}

/// `dummy(a)`: returns the constant flagged as a placeholder.
#[derive(Debug, Clone, Copy, Default)]
pub struct Dummize;

impl Operation for Dummize {
    fn name(&self) -> &'static str {
        "Dummize"
    }

    fn arity(&self) -> usize {
        1
    }

    fn eval(&self, operands: &[Node], env: &mut Environment) -> EvalResult<Value> {
        Ok(Value::Constant(eval_constant(self, operands, 0, env)?.with_dummy()))
    }
}

/// `solid(a)`: returns the constant with its placeholder flag cleared.
#[derive(Debug, Clone, Copy, Default)]
pub struct Dedummize;

impl Operation for Dedummize {
    fn name(&self) -> &'static str {
        "Dedummize"
    }

    fn arity(&self) -> usize {
        1
    }

    fn eval(&self, operands: &[Node], env: &mut Environment) -> EvalResult<Value> {
        Ok(Value::Constant(eval_constant(self, operands, 0, env)?.without_dummy()))
    }
}

/// `reverse(op)`: evaluates an operator node with its operands reversed.
///
/// # Example
/// ```
/// use opcalc::{defaults::advanced_parser, evaluate, interpreter::evaluator::core::Environment};
///
/// let parser = advanced_parser(Vec::new(), Vec::new()).unwrap();
/// let value = evaluate(&parser, "reverse(2 - 10)", &mut Environment::new()).unwrap();
/// assert_eq!(value.to_string(), "8");
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct Reverse;

impl Operation for Reverse {
    fn name(&self) -> &'static str {
        "Reverse"
    }

    fn arity(&self) -> usize {
        1
    }

    fn eval(&self, operands: &[Node], env: &mut Environment) -> EvalResult<Value> {
        let Node::Operator(inner) = operand(self, operands, 0)? else {
            return Err(EvalError::invalid_argument("reverse only applies to an operation"));
        };
        let reversed = inner.operands().iter().rev().cloned().collect();
        Operator::new(Rc::clone(inner.operation()), reversed)?.eval(env)
    }
}

/// `raise(message)`: fails with the operand as the error message.
#[derive(Debug, Clone, Copy, Default)]
pub struct Raise;

impl Operation for Raise {
    fn name(&self) -> &'static str {
        "Raise"
    }

    fn arity(&self) -> usize {
        1
    }

    fn eval(&self, operands: &[Node], env: &mut Environment) -> EvalResult<Value> {
        let message = eval_constant(self, operands, 0, env)?.to_string();
        Err(EvalError::Raised { message })
    }
}

/// Prefix `.n`: reads the digits of `n` as a decimal fraction.
///
/// Accepts non-negative integers and strings made of digits only, so
/// `.25` and `.'007'` give `0.25` and `0.007`.
#[derive(Debug, Clone, Copy, Default)]
pub struct DecimalPoint;

impl Operation for DecimalPoint {
    fn name(&self) -> &'static str {
        "DecimalPoint"
    }

    fn arity(&self) -> usize {
        1
    }

    fn eval(&self, operands: &[Node], env: &mut Environment) -> EvalResult<Value> {
        let a = eval_constant(self, operands, 0, env)?;
        let digits = match a.value() {
            ConstantValue::Number(n) if n.is_integer() && n.re >= 0.0 => n.to_string(),
            ConstantValue::Str(s) if s.chars().all(|c| c.is_ascii_digit()) => s.clone(),
            _ => {
                return Err(EvalError::invalid_argument(format!(
                    "'{a}' is neither a non-negative integer nor a string of digits"
                )));
            },
        };
        let fraction = format!("0.{digits}")
            .parse::<f64>()
            .map_err(|e| EvalError::invalid_argument(e.to_string()))?;
        number(fraction.into())
    }
}

/// `move(a)`: extracts the constant held by a binding.
#[derive(Debug, Clone, Copy, Default)]
pub struct Move;

impl Operation for Move {
    fn name(&self) -> &'static str {
        "Move"
    }

    fn arity(&self) -> usize {
        1
    }

    fn eval(&self, operands: &[Node], env: &mut Environment) -> EvalResult<Value> {
        Ok(Value::Constant(eval_constant(self, operands, 0, env)?))
    }
}

/// `type(a)`: the name of the operand's type.
#[derive(Debug, Clone, Copy, Default)]
pub struct Type;

impl Operation for Type {
    fn name(&self) -> &'static str {
        "Type"
    }

    fn arity(&self) -> usize {
        1
    }

    fn eval(&self, operands: &[Node], env: &mut Environment) -> EvalResult<Value> {
        constant(eval_constant(self, operands, 0, env)?.kind().name())
    }
}

/// `str(a)`: the display form of the operand.
#[derive(Debug, Clone, Copy, Default)]
pub struct Stringify;

impl Operation for Stringify {
    fn name(&self) -> &'static str {
        "Stringify"
    }

    fn arity(&self) -> usize {
        1
    }

    fn eval(&self, operands: &[Node], env: &mut Environment) -> EvalResult<Value> {
        constant(eval_constant(self, operands, 0, env)?.to_string())
    }
}

/// `print(a)`: the printable form of the operand.
///
/// Complex numbers print as `(a+bj)`; everything else prints like `str`.
#[derive(Debug, Clone, Copy, Default)]
pub struct Print;

impl Operation for Print {
    fn name(&self) -> &'static str {
        "Print"
    }

    fn arity(&self) -> usize {
        1
    }

    fn eval(&self, operands: &[Node], env: &mut Environment) -> EvalResult<Value> {
        let a = eval_constant(self, operands, 0, env)?;
        match a.value() {
            ConstantValue::Number(n) if !n.is_real() => {
                constant(format!("({}+{}j)", n.re, n.im))
            },
            _ => constant(a.to_string()),
        }
    }
}

/// `repeat(n, expr)`: evaluates `expr` `n` times and returns the last value.
///
/// # Example
/// ```
/// use opcalc::{defaults::advanced_parser, evaluate, interpreter::evaluator::core::Environment};
///
/// let parser = advanced_parser(Vec::new(), Vec::new()).unwrap();
/// let mut env = Environment::new();
/// let value = evaluate(&parser, "x := 0; repeat(4, x = x + 3)", &mut env).unwrap();
/// assert_eq!(value.into_constant().to_string(), "12");
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct RepeatTimes;

impl Operation for RepeatTimes {
    fn name(&self) -> &'static str {
        "RepeatTimes"
    }

    fn arity(&self) -> usize {
        2
    }

    fn eval(&self, operands: &[Node], env: &mut Environment) -> EvalResult<Value> {
        let count = eval_constant(self, operands, 0, env)?;
        let n = match count.value() {
            ConstantValue::Number(n) if n.is_integer() && n.re > 0.0 => {
                f64_to_usize_checked(n.re)?
            },
            _ => {
                return Err(EvalError::invalid_argument(format!(
                    "cannot repeat '{count}' times, expected a positive integer"
                )));
            },
        };

        let body = operand(self, operands, 1)?;
        let mut last = body.eval(env)?;
        for _ in 1..n {
            last = body.eval(env)?;
        }
        Ok(last)
    }
}

/// `twice(expr)`: evaluates `expr` two times and returns the second value.
#[derive(Debug, Clone, Copy, Default)]
pub struct RepeatTwice;

impl Operation for RepeatTwice {
    fn name(&self) -> &'static str {
        "RepeatTwice"
    }

    fn arity(&self) -> usize {
        1
    }

    fn eval(&self, operands: &[Node], env: &mut Environment) -> EvalResult<Value> {
        let body = operand(self, operands, 0)?;
        body.eval(env)?;
        body.eval(env)
    }
}
