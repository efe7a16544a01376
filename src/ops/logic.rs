use crate::{
    interpreter::{
        evaluator::{
            core::{Environment, EvalResult},
            node::{Node, Operation, eval_constant},
        },
        value::core::Value,
    },
    ops::constant,
};

/// The binary boolean connectives.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Connective {
    /// True when both sides are.
    And,
    /// True when either side is.
    Or,
    /// False only when the left side holds and the right does not.
    Implies,
    /// True when exactly one side is.
    Xor,
    /// True when both sides agree.
    Iff,
    /// Negated `And`.
    Nand,
    /// Negated `Or`.
    Nor,
    /// Negated `Implies`: the left side holds and the right does not.
    Nimpl,
    /// `Implies` read right to left: false only when the right side holds and
    /// the left does not.
    ConverseImpl,
    /// Negated `ConverseImpl`.
    ConverseNimpl,
}

impl Connective {
    /// The result decided by the left operand alone, if any.
    const fn short_circuit(self, left: bool) -> Option<bool> {
        match (self, left) {
            (Self::And | Self::Nimpl, false) | (Self::Nor | Self::ConverseNimpl, true) => {
                Some(false)
            },
            (Self::Or | Self::ConverseImpl, true) | (Self::Implies | Self::Nand, false) => {
                Some(true)
            },
            _ => None,
        }
    }

    const fn combine(self, left: bool, right: bool) -> bool {
        match self {
            Self::And => left && right,
            Self::Or => left || right,
            Self::Implies => !left || right,
            Self::Xor => left ^ right,
            Self::Iff => left == right,
            Self::Nand => !(left && right),
            Self::Nor => !(left || right),
            Self::Nimpl => left && !right,
            Self::ConverseImpl => left || !right,
            Self::ConverseNimpl => !left && right,
        }
    }
}

/// A boolean connective applied to two operands cast to booleans.
///
/// The right operand is skipped whenever the left one already decides the
/// result, so `false && undefined` evaluates to `False` without an error.
///
/// # Example
/// ```
/// use opcalc::{defaults::basic_parser, evaluate, interpreter::evaluator::core::Environment};
///
/// let parser = basic_parser().unwrap();
/// let mut env = Environment::new();
/// assert_eq!(evaluate(&parser, "0 && missing", &mut env).unwrap().to_string(), "False");
/// assert_eq!(evaluate(&parser, "1 -> 0", &mut env).unwrap().to_string(), "False");
/// assert!(evaluate(&parser, "1 && missing", &mut env).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BooleanConnective(pub Connective);

impl Operation for BooleanConnective {
    fn name(&self) -> &'static str {
        match self.0 {
            Connective::And => "And",
            Connective::Or => "Or",
            Connective::Implies => "Implies",
            Connective::Xor => "Xor",
            Connective::Iff => "Iff",
            Connective::Nand => "Nand",
            Connective::Nor => "Nor",
            Connective::Nimpl => "Nimpl",
            Connective::ConverseImpl => "ConverseImpl",
            Connective::ConverseNimpl => "ConverseNimpl",
        }
    }

    fn arity(&self) -> usize {
        2
    }

    fn eval(&self, operands: &[Node], env: &mut Environment) -> EvalResult<Value> {
        let left = eval_constant(self, operands, 0, env)?.to_bool()?;
        if let Some(decided) = self.0.short_circuit(left) {
            return constant(decided);
        }
        let right = eval_constant(self, operands, 1, env)?.to_bool()?;
        constant(self.0.combine(left, right))
    }
}

