use std::cmp::Ordering;

use crate::{
    error::EvalError,
    interpreter::{
        evaluator::{
            core::{Environment, EvalResult},
            node::{Node, Operation, eval_constant, eval_pair, operand},
        },
        value::core::{Constant, ConstantValue, Value},
    },
    ops::{constant, number},
    util::num::f64_to_usize_checked,
};

/// `a + b`.
///
/// Strings concatenate (the other side is cast to a string), two booleans
/// give their disjunction, anything else is cast to numbers and added.
#[derive(Debug, Clone, Copy, Default)]
pub struct Plus;

impl Operation for Plus {
    fn name(&self) -> &'static str {
        "Plus"
    }

    fn arity(&self) -> usize {
        2
    }

    fn eval(&self, operands: &[Node], env: &mut Environment) -> EvalResult<Value> {
        let (a, b) = eval_pair(self, operands, env)?;
        if a.is_str() || b.is_str() {
            return constant(a.to_str()? + &b.to_str()?);
        }
        if let (ConstantValue::Bool(x), ConstantValue::Bool(y)) = (a.value(), b.value()) {
            return constant(*x || *y);
        }
        number(a.to_number()? + b.to_number()?)
    }
}

/// `a - b`.
///
/// Two booleans give `a and not b`; strings are rejected.
#[derive(Debug, Clone, Copy, Default)]
pub struct Minus;

impl Operation for Minus {
    fn name(&self) -> &'static str {
        "Minus"
    }

    fn arity(&self) -> usize {
        2
    }

    fn eval(&self, operands: &[Node], env: &mut Environment) -> EvalResult<Value> {
        let (a, b) = eval_pair(self, operands, env)?;
        if a.is_str() || b.is_str() {
            return Err(EvalError::type_mismatch("strings cannot be subtracted"));
        }
        if let (ConstantValue::Bool(x), ConstantValue::Bool(y)) = (a.value(), b.value()) {
            return constant(*x && !*y);
        }
        number(a.to_number()? - b.to_number()?)
    }
}

/// `a * b`.
///
/// A string times a non-negative integer repeats the string, up to
/// [`MAX_REPEAT_BYTES`] bytes. Two booleans give their conjunction, anything
/// else is cast to numbers and multiplied.
#[derive(Debug, Clone, Copy, Default)]
pub struct Multiply;

impl Operation for Multiply {
    fn name(&self) -> &'static str {
        "Multiply"
    }

    fn arity(&self) -> usize {
        2
    }

    fn eval(&self, operands: &[Node], env: &mut Environment) -> EvalResult<Value> {
        let (a, b) = eval_pair(self, operands, env)?;
        match (a.value(), b.value()) {
            (ConstantValue::Str(_), ConstantValue::Str(_)) => {
                Err(EvalError::type_mismatch("strings cannot be multiplied together"))
            },
            (ConstantValue::Str(s), _) => repeat(s, &b),
            (_, ConstantValue::Str(s)) => repeat(s, &a),
            (ConstantValue::Bool(x), ConstantValue::Bool(y)) => constant(*x && *y),
            _ => number(a.to_number()? * b.to_number()?),
        }
    }
}

/// Longest string, in bytes, that string repetition may build.
pub const MAX_REPEAT_BYTES: usize = 1 << 28;

fn repeat(s: &str, count: &Constant) -> EvalResult<Value> {
    let n = repeat_count(count)?;
    match s.len().checked_mul(n) {
        Some(bytes) if bytes <= MAX_REPEAT_BYTES => constant(s.repeat(n)),
        _ => Err(EvalError::Overflow),
    }
}

fn repeat_count(count: &Constant) -> EvalResult<usize> {
    let n = count.to_number()?;
    if !n.is_integer() {
        return Err(EvalError::invalid_argument(format!("cannot repeat a string {n} times")));
    }
    f64_to_usize_checked(n.re)
}

/// `a / b`, for numbers only.
#[derive(Debug, Clone, Copy, Default)]
pub struct Divide;

impl Operation for Divide {
    fn name(&self) -> &'static str {
        "Divide"
    }

    fn arity(&self) -> usize {
        2
    }

    fn eval(&self, operands: &[Node], env: &mut Environment) -> EvalResult<Value> {
        let (a, b) = eval_pair(self, operands, env)?;
        let (a, b) = (a.as_number()?, b.as_number()?);
        if b.is_zero() {
            return Err(EvalError::DivisionByZero);
        }
        number(a / b)
    }
}

/// Evaluates both operands as real numbers and rejects a zero divisor.
fn real_division_operands(operation: &dyn Operation,
                          operands: &[Node],
                          env: &mut Environment)
                          -> EvalResult<(f64, f64)> {
    let (a, b) = eval_pair(operation, operands, env)?;
    let (a, b) = (a.as_number()?.as_real()?, b.as_number()?.as_real()?);
    if b == 0.0 {
        return Err(EvalError::DivisionByZero);
    }
    Ok((a, b))
}

/// `a // b`, the floor of the quotient of two reals.
#[derive(Debug, Clone, Copy, Default)]
pub struct IntegerDivide;

impl Operation for IntegerDivide {
    fn name(&self) -> &'static str {
        "IntegerDivide"
    }

    fn arity(&self) -> usize {
        2
    }

    fn eval(&self, operands: &[Node], env: &mut Environment) -> EvalResult<Value> {
        let (a, b) = real_division_operands(self, operands, env)?;
        number((a / b).floor().into())
    }
}

/// `a % b`, with the sign of the divisor.
///
/// # Example
/// ```
/// use opcalc::{defaults::basic_parser, evaluate, interpreter::evaluator::core::Environment};
///
/// let parser = basic_parser().unwrap();
/// let value = evaluate(&parser, "-7 % 3", &mut Environment::new()).unwrap();
/// assert_eq!(value.to_string(), "2");
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct Modulo;

impl Operation for Modulo {
    fn name(&self) -> &'static str {
        "Modulo"
    }

    fn arity(&self) -> usize {
        2
    }

    fn eval(&self, operands: &[Node], env: &mut Environment) -> EvalResult<Value> {
        let (a, b) = real_division_operands(self, operands, env)?;
        number(b.mul_add(-(a / b).floor(), a).into())
    }
}

/// Prefix `+`: returns a number unchanged but processed.
#[derive(Debug, Clone, Copy, Default)]
pub struct Positive;

impl Operation for Positive {
    fn name(&self) -> &'static str {
        "Positive"
    }

    fn arity(&self) -> usize {
        1
    }

    fn eval(&self, operands: &[Node], env: &mut Environment) -> EvalResult<Value> {
        let a = eval_constant(self, operands, 0, env)?;
        a.as_number()?;
        Ok(Value::Constant(a.without_dummy()))
    }
}

/// Prefix `-`: negates a number.
#[derive(Debug, Clone, Copy, Default)]
pub struct Negative;

impl Operation for Negative {
    fn name(&self) -> &'static str {
        "Negative"
    }

    fn arity(&self) -> usize {
        1
    }

    fn eval(&self, operands: &[Node], env: &mut Environment) -> EvalResult<Value> {
        let a = eval_constant(self, operands, 0, env)?;
        number(-a.as_number()?)
    }
}

/// Logical negation of the operand cast to a boolean.
#[derive(Debug, Clone, Copy, Default)]
pub struct Not;

impl Operation for Not {
    fn name(&self) -> &'static str {
        "Not"
    }

    fn arity(&self) -> usize {
        1
    }

    fn eval(&self, operands: &[Node], env: &mut Environment) -> EvalResult<Value> {
        let a = eval_constant(self, operands, 0, env)?;
        constant(!a.to_bool()?)
    }
}

/// `a . b`: both operands cast to strings and joined.
///
/// # Example
/// ```
/// use opcalc::{defaults::basic_parser, evaluate, interpreter::evaluator::core::Environment};
///
/// let parser = basic_parser().unwrap();
/// let mut env = Environment::new();
/// assert_eq!(evaluate(&parser, "3 + 2 . 5", &mut env).unwrap().to_string(), "55");
/// assert_eq!(evaluate(&parser, "3 . 2 + 5", &mut env).unwrap().to_string(), "325");
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct Concat;

impl Operation for Concat {
    fn name(&self) -> &'static str {
        "Concat"
    }

    fn arity(&self) -> usize {
        2
    }

    fn eval(&self, operands: &[Node], env: &mut Environment) -> EvalResult<Value> {
        let (a, b) = eval_pair(self, operands, env)?;
        constant(a.to_str()? + &b.to_str()?)
    }
}

/// `a == b`. Constants of different types are never equal.
#[derive(Debug, Clone, Copy, Default)]
pub struct Equal;

impl Operation for Equal {
    fn name(&self) -> &'static str {
        "Equal"
    }

    fn arity(&self) -> usize {
        2
    }

    fn eval(&self, operands: &[Node], env: &mut Environment) -> EvalResult<Value> {
        let (a, b) = eval_pair(self, operands, env)?;
        constant(a == b)
    }
}

/// `a != b`. Constants of different types are always unequal.
#[derive(Debug, Clone, Copy, Default)]
pub struct NotEqual;

impl Operation for NotEqual {
    fn name(&self) -> &'static str {
        "NotEqual"
    }

    fn arity(&self) -> usize {
        2
    }

    fn eval(&self, operands: &[Node], env: &mut Environment) -> EvalResult<Value> {
        let (a, b) = eval_pair(self, operands, env)?;
        constant(a != b)
    }
}

/// An ordering test between two constants.
///
/// Booleans count as `1` and `0`. Real numbers compare numerically and
/// strings lexicographically. When either number has an imaginary part the
/// test degrades to equality, as complex numbers have no order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Comparison {
    /// `a < b`
    Less,
    /// `a <= b`
    LessEqual,
    /// `a > b`
    Greater,
    /// `a >= b`
    GreaterEqual,
}

impl Comparison {
    const fn accepts(self, ordering: Ordering) -> bool {
        match self {
            Self::Less => matches!(ordering, Ordering::Less),
            Self::LessEqual => !matches!(ordering, Ordering::Greater),
            Self::Greater => matches!(ordering, Ordering::Greater),
            Self::GreaterEqual => !matches!(ordering, Ordering::Less),
        }
    }

    fn compare(self, a: &Constant, b: &Constant) -> EvalResult<bool> {
        let a = if a.is_bool() { Constant::new(a.to_number()?) } else { a.clone() };
        let b = if b.is_bool() { Constant::new(b.to_number()?) } else { b.clone() };

        match (a.value(), b.value()) {
            (ConstantValue::Number(x), ConstantValue::Number(y)) => {
                if !(x.is_real() && y.is_real()) {
                    return Ok(x == y);
                }
                Ok(x.re
                    .partial_cmp(&y.re)
                    .is_some_and(|ordering| self.accepts(ordering)))
            },
            (ConstantValue::Str(x), ConstantValue::Str(y)) => Ok(self.accepts(x.cmp(y))),
            _ => Err(EvalError::type_mismatch(format!("cannot compare a {} with a {}",
                                                      a.kind().name(),
                                                      b.kind().name()))),
        }
    }
}

impl Operation for Comparison {
    fn name(&self) -> &'static str {
        match self {
            Self::Less => "Less",
            Self::LessEqual => "LessEqual",
            Self::Greater => "Greater",
            Self::GreaterEqual => "GreaterEqual",
        }
    }

    fn arity(&self) -> usize {
        2
    }

    fn eval(&self, operands: &[Node], env: &mut Environment) -> EvalResult<Value> {
        let (a, b) = eval_pair(self, operands, env)?;
        constant(self.compare(&a, &b)?)
    }
}

/// `if(condition, then, else)`.
///
/// Only the chosen branch is evaluated, and its value is returned as is, so a
/// branch that names a variable yields the binding itself.
#[derive(Debug, Clone, Copy, Default)]
pub struct IfThenElse;

impl Operation for IfThenElse {
    fn name(&self) -> &'static str {
        "IfThenElse"
    }

    fn arity(&self) -> usize {
        3
    }

    fn eval(&self, operands: &[Node], env: &mut Environment) -> EvalResult<Value> {
        let condition = eval_constant(self, operands, 0, env)?.to_bool()?;
        let branch = if condition { 1 } else { 2 };
        operand(self, operands, branch)?.eval(env)
    }
}
