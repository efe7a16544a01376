use crate::{
    error::EvalError,
    interpreter::{
        evaluator::{
            core::{Environment, EvalResult},
            node::{Node, Operation, eval_constant, eval_pair, operand},
        },
        value::{
            complex::{ComplexNumber, ONE},
            core::{Constant, Value},
        },
    },
    ops::number,
    util::num::{f64_to_usize_checked, usize_to_f64_checked},
};

/// `a ** b`, for numbers only.
///
/// Integral exponents use exact repeated squaring. A non-negative real base
/// with a real exponent uses the real power, and everything else goes through
/// the principal complex logarithm.
///
/// # Example
/// ```
/// use opcalc::{defaults::basic_parser, evaluate, interpreter::evaluator::core::Environment};
///
/// let parser = basic_parser().unwrap();
/// let mut env = Environment::new();
/// assert_eq!(evaluate(&parser, "2 ** 10", &mut env).unwrap().to_string(), "1024");
/// assert_eq!(evaluate(&parser, "4 ** 0.5", &mut env).unwrap().to_string(), "2");
/// assert_eq!(evaluate(&parser, "-1 ** 0.5", &mut env).unwrap().to_string(), "1i");
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct Power;

impl Operation for Power {
    fn name(&self) -> &'static str {
        "Power"
    }

    fn arity(&self) -> usize {
        2
    }

    #[allow(clippy::cast_possible_truncation)]
    fn eval(&self, operands: &[Node], env: &mut Environment) -> EvalResult<Value> {
        let (a, b) = eval_pair(self, operands, env)?;
        let (base, exp) = (a.as_number()?, b.as_number()?);

        if exp.is_integer() && exp.re.abs() <= f64::from(i32::MAX) {
            return number(base.checked_powi(exp.re as i64)?);
        }
        if base.is_real() && base.re >= 0.0 && exp.is_real() {
            return number(base.re.powf(exp.re).into());
        }
        number(round_components(base.powc(exp)))
    }
}

/// Clears the rounding noise the complex logarithm leaves on a zero part.
fn round_components(mut n: ComplexNumber) -> ComplexNumber {
    const EPSILON: f64 = 1e-12;
    let scale = n.abs().max(1.0);
    if n.re.abs() < EPSILON * scale {
        n.re = 0.0;
    }
    if n.im.abs() < EPSILON * scale {
        n.im = 0.0;
    }
    n
}

/// `abs(a)`, the magnitude of a number as a real.
///
/// Like the rest of this module, it rejects strings and booleans instead of
/// casting them.
#[derive(Debug, Clone, Copy, Default)]
pub struct Abs;

impl Operation for Abs {
    fn name(&self) -> &'static str {
        "Abs"
    }

    fn arity(&self) -> usize {
        1
    }

    fn eval(&self, operands: &[Node], env: &mut Environment) -> EvalResult<Value> {
        let a = eval_constant(self, operands, 0, env)?.as_number()?;
        number(a.abs().into())
    }
}

/// Postfix `n!` for non-negative integers.
///
/// # Example
/// ```
/// use opcalc::{defaults::basic_parser, evaluate, interpreter::evaluator::core::Environment};
///
/// let parser = basic_parser().unwrap();
/// let mut env = Environment::new();
/// assert_eq!(evaluate(&parser, "5!", &mut env).unwrap().to_string(), "120");
/// assert!(evaluate(&parser, "2.5!", &mut env).is_err());
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct Factorial;

impl Operation for Factorial {
    fn name(&self) -> &'static str {
        "Factorial"
    }

    fn arity(&self) -> usize {
        1
    }

    fn eval(&self, operands: &[Node], env: &mut Environment) -> EvalResult<Value> {
        let n = eval_constant(self, operands, 0, env)?.as_number()?.as_real()?;
        let n = f64_to_usize_checked(n)?;

        let mut product = 1.0_f64;
        for k in 2..=n {
            product *= usize_to_f64_checked(k)?;
            if !product.is_finite() {
                return Err(EvalError::Overflow);
            }
        }
        number(product.into())
    }
}

/// `re(a)`, the real part of a number.
#[derive(Debug, Clone, Copy, Default)]
pub struct RealPart;

impl Operation for RealPart {
    fn name(&self) -> &'static str {
        "RealPart"
    }

    fn arity(&self) -> usize {
        1
    }

    fn eval(&self, operands: &[Node], env: &mut Environment) -> EvalResult<Value> {
        let a = eval_constant(self, operands, 0, env)?.as_number()?;
        number(a.re.into())
    }
}

/// `im(a)`, the imaginary part of a number as a real.
#[derive(Debug, Clone, Copy, Default)]
pub struct ImaginaryPart;

impl Operation for ImaginaryPart {
    fn name(&self) -> &'static str {
        "ImaginaryPart"
    }

    fn arity(&self) -> usize {
        1
    }

    fn eval(&self, operands: &[Node], env: &mut Environment) -> EvalResult<Value> {
        let a = eval_constant(self, operands, 0, env)?.as_number()?;
        number(a.im.into())
    }
}

/// `++x`, `--x`, `x++` and `x--` on a binding that holds a number.
///
/// The prefix forms return the updated binding, the postfix forms the value
/// held before the update.
///
/// # Example
/// ```
/// use opcalc::{defaults::advanced_parser, evaluate, interpreter::evaluator::core::Environment};
///
/// let parser = advanced_parser(Vec::new(), Vec::new()).unwrap();
/// let mut env = Environment::new();
/// evaluate(&parser, "x := 41", &mut env).unwrap();
/// assert_eq!(evaluate(&parser, "++x", &mut env).unwrap().to_string(), "<x: 42>");
/// assert_eq!(evaluate(&parser, "x--", &mut env).unwrap().to_string(), "42");
/// assert_eq!(evaluate(&parser, "x", &mut env).unwrap().to_string(), "<x: 41>");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// Prefix `++`.
    Increment,
    /// Prefix `--`.
    Decrement,
    /// Postfix `++`.
    PostIncrement,
    /// Postfix `--`.
    PostDecrement,
}

impl Operation for Step {
    fn name(&self) -> &'static str {
        match self {
            Self::Increment => "Increment",
            Self::Decrement => "Decrement",
            Self::PostIncrement => "PostIncrement",
            Self::PostDecrement => "PostDecrement",
        }
    }

    fn arity(&self) -> usize {
        1
    }

    fn eval(&self, operands: &[Node], env: &mut Environment) -> EvalResult<Value> {
        let Value::LValue(lv) = operand(self, operands, 0)?.eval(env)? else {
            return Err(EvalError::NotAnLValue { operator: self.name() });
        };

        let previous = lv.borrow().content().clone();
        let n = previous.as_number()?;
        let updated = match self {
            Self::Increment | Self::PostIncrement => n + ONE,
            Self::Decrement | Self::PostDecrement => n - ONE,
        };
        lv.borrow_mut().set_content(Constant::new(updated.checked()?));

        match self {
            Self::Increment | Self::Decrement => Ok(Value::LValue(lv)),
            Self::PostIncrement | Self::PostDecrement => {
                Ok(Value::Constant(previous.without_dummy()))
            },
        }
    }
}
