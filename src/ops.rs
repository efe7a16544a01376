use crate::interpreter::{
    evaluator::core::EvalResult,
    value::{
        complex::ComplexNumber,
        core::{Constant, ConstantValue, Value},
    },
};

/// Assignment and declaration operators.
///
/// `=` stores into an existing binding, `:=` declares a new one and `:=&`
/// makes a name alias an existing binding.
pub mod assign;
/// Arithmetic, comparison and string operators.
///
/// Implements the four arithmetic operations with integer division and
/// modulo, sign and negation prefixes, concatenation, equality, ordering and
/// the ternary conditional.
pub mod basic;
/// Boolean connectives.
///
/// One type covers and, or, exclusive or, equivalence, nand, nor and the four
/// implications, short-circuiting whenever the left operand decides the
/// result.
pub mod logic;
/// Numeric operators.
///
/// Powers, absolute value, factorial, the real and imaginary parts, and the
/// increment and decrement operators that update a binding in place.
pub mod num;
/// String operators.
pub mod string;
/// Control and bookkeeping operators.
///
/// Sequencing, dummy flag control, operand reversal, user errors, repetition
/// and conversions to text.
pub mod utils;

/// Wraps a freshly computed payload into a processed constant.
pub(crate) fn constant(value: impl Into<ConstantValue>) -> EvalResult<Value> {
    Ok(Value::Constant(Constant::new(value)))
}

/// Wraps a freshly computed number, rejecting non-finite results.
pub(crate) fn number(n: ComplexNumber) -> EvalResult<Value> {
    constant(n.checked()?)
}
