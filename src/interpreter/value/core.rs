use std::fmt;

use crate::{
    error::EvalError,
    interpreter::{
        evaluator::core::EvalResult,
        lexer::literal::parse_number,
        value::{
            complex::{ComplexNumber, ONE, ZERO},
            lvalue::LValueRef,
        },
    },
};

/// The payload of a constant.
///
/// Constants are a closed sum of numbers, booleans and strings. Two payloads
/// are only equal when they are of the same variant.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ConstantValue {
    /// A complex number; reals have a zero imaginary part.
    Number(ComplexNumber),
    /// A boolean value.
    Bool(bool),
    /// A string value.
    Str(String),
}

/// The type of a constant, used as the target of a cast.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConstantKind {
    /// [`ConstantValue::Number`].
    Number,
    /// [`ConstantValue::Bool`].
    Bool,
    /// [`ConstantValue::Str`].
    Str,
}

impl ConstantKind {
    /// Returns the user facing name of the type.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Number => "number",
            Self::Bool => "boolean",
            Self::Str => "string",
        }
    }
}

impl From<ComplexNumber> for ConstantValue {
    fn from(n: ComplexNumber) -> Self {
        Self::Number(n)
    }
}

impl From<f64> for ConstantValue {
    fn from(n: f64) -> Self {
        Self::Number(n.into())
    }
}

impl From<i32> for ConstantValue {
    fn from(n: i32) -> Self {
        Self::Number(n.into())
    }
}

impl From<bool> for ConstantValue {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

impl From<String> for ConstantValue {
    fn from(s: String) -> Self {
        Self::Str(s)
    }
}

impl From<&str> for ConstantValue {
    fn from(s: &str) -> Self {
        Self::Str(s.to_string())
    }
}

/// An immutable value produced by literals and operators.
///
/// Besides its payload a constant carries a *dummy* flag. A dummy constant is
/// an unprocessed placeholder: pass-through operators hand it on untouched,
/// while every operator that computes something returns a fresh constant with
/// the flag cleared. The flag takes no part in equality.
#[derive(Debug, Clone)]
pub struct Constant {
    value: ConstantValue,
    dummy: bool,
}

impl PartialEq for Constant {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
    }
}

impl Eq for Constant {}

impl Constant {
    /// Creates a processed constant.
    ///
    /// # Example
    /// ```
    /// use opcalc::interpreter::value::core::Constant;
    ///
    /// let c = Constant::new(42);
    /// assert!(c.is_number());
    /// assert!(!c.is_dummy());
    /// ```
    #[must_use]
    pub fn new(value: impl Into<ConstantValue>) -> Self {
        Self { value: value.into(),
               dummy: false, }
    }

    /// Creates a constant with the dummy flag set.
    #[must_use]
    pub fn dummy(value: impl Into<ConstantValue>) -> Self {
        Self { value: value.into(),
               dummy: true, }
    }

    /// Returns the payload.
    #[must_use]
    pub const fn value(&self) -> &ConstantValue {
        &self.value
    }

    /// Consumes the constant and returns its payload.
    #[must_use]
    pub fn into_value(self) -> ConstantValue {
        self.value
    }

    /// Returns `true` if the constant is an unprocessed placeholder.
    #[must_use]
    pub const fn is_dummy(&self) -> bool {
        self.dummy
    }

    /// Returns the same payload with the dummy flag set.
    #[must_use]
    pub fn with_dummy(mut self) -> Self {
        self.dummy = true;
        self
    }

    /// Returns the same payload with the dummy flag cleared.
    #[must_use]
    pub fn without_dummy(mut self) -> Self {
        self.dummy = false;
        self
    }

    /// Returns the type of the payload.
    #[must_use]
    pub const fn kind(&self) -> ConstantKind {
        match self.value {
            ConstantValue::Number(_) => ConstantKind::Number,
            ConstantValue::Bool(_) => ConstantKind::Bool,
            ConstantValue::Str(_) => ConstantKind::Str,
        }
    }

    /// Returns `true` for numbers.
    #[must_use]
    pub const fn is_number(&self) -> bool {
        matches!(self.value, ConstantValue::Number(_))
    }

    /// Returns `true` for booleans.
    #[must_use]
    pub const fn is_bool(&self) -> bool {
        matches!(self.value, ConstantValue::Bool(_))
    }

    /// Returns `true` for strings.
    #[must_use]
    pub const fn is_str(&self) -> bool {
        matches!(self.value, ConstantValue::Str(_))
    }

    /// Converts the constant to another type.
    ///
    /// Casting to the constant's own type returns it unchanged, dummy flag
    /// included; every other cast produces a fresh constant.
    ///
    /// | from \ to | number | boolean | string |
    /// |-----------|--------|---------|--------|
    /// | number    | itself | non-zero | decimal form |
    /// | boolean   | 1 / 0  | itself  | `True` / `False` |
    /// | string    | numeric literal | non-empty | itself |
    ///
    /// # Errors
    /// Returns `EvalError::InvalidCast` when a string does not hold a numeric
    /// literal.
    ///
    /// # Example
    /// ```
    /// use opcalc::interpreter::value::core::{Constant, ConstantKind};
    ///
    /// let s = Constant::new("2.5").cast(ConstantKind::Number).unwrap();
    /// assert_eq!(s, Constant::new(2.5));
    ///
    /// let b = Constant::new(true).cast(ConstantKind::Str).unwrap();
    /// assert_eq!(b, Constant::new("True"));
    /// ```
    pub fn cast(&self, to: ConstantKind) -> EvalResult<Self> {
        if self.kind() == to {
            return Ok(self.clone());
        }

        let value = match (&self.value, to) {
            (ConstantValue::Number(n), ConstantKind::Bool) => ConstantValue::Bool(!n.is_zero()),
            (ConstantValue::Number(n), ConstantKind::Str) => ConstantValue::Str(n.to_string()),
            (ConstantValue::Bool(b), ConstantKind::Number) => {
                ConstantValue::Number(if *b { ONE } else { ZERO })
            },
            (ConstantValue::Bool(b), ConstantKind::Str) => {
                ConstantValue::Str(if *b { "True" } else { "False" }.to_string())
            },
            (ConstantValue::Str(s), ConstantKind::Number) => {
                ConstantValue::Number(parse_number(s).ok_or_else(|| EvalError::InvalidCast {
                                          value:  s.clone(),
                                          target: ConstantKind::Number.name(),
                                      })?)
            },
            (ConstantValue::Str(s), ConstantKind::Bool) => ConstantValue::Bool(!s.is_empty()),
            (value, _) => value.clone(),
        };

        Ok(Self::new(value))
    }

    /// Casts to a number and returns it.
    pub fn to_number(&self) -> EvalResult<ComplexNumber> {
        match self.cast(ConstantKind::Number)?.value {
            ConstantValue::Number(n) => Ok(n),
            _ => Err(self.invalid_cast(ConstantKind::Number)),
        }
    }

    /// Casts to a boolean and returns it.
    pub fn to_bool(&self) -> EvalResult<bool> {
        match self.cast(ConstantKind::Bool)?.value {
            ConstantValue::Bool(b) => Ok(b),
            _ => Err(self.invalid_cast(ConstantKind::Bool)),
        }
    }

    /// Casts to a string and returns it.
    pub fn to_str(&self) -> EvalResult<String> {
        match self.cast(ConstantKind::Str)?.value {
            ConstantValue::Str(s) => Ok(s),
            _ => Err(self.invalid_cast(ConstantKind::Str)),
        }
    }

    /// Returns the number without casting, or a type error.
    pub fn as_number(&self) -> EvalResult<ComplexNumber> {
        match &self.value {
            ConstantValue::Number(n) => Ok(*n),
            _ => Err(EvalError::type_mismatch(format!("expected a number, found {}",
                                                      self.kind().name()))),
        }
    }

    /// Returns the string without casting, or a type error.
    pub fn as_str(&self) -> EvalResult<&str> {
        match &self.value {
            ConstantValue::Str(s) => Ok(s),
            _ => Err(EvalError::type_mismatch(format!("expected a string, found {}",
                                                      self.kind().name()))),
        }
    }

    fn invalid_cast(&self, to: ConstantKind) -> EvalError {
        EvalError::InvalidCast { value:  self.to_string(),
                                 target: to.name(), }
    }
}

impl fmt::Display for Constant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.value {
            ConstantValue::Number(n) => write!(f, "{n}"),
            ConstantValue::Bool(b) => write!(f, "{}", if *b { "True" } else { "False" }),
            ConstantValue::Str(s) => write!(f, "{s}"),
        }
    }
}

/// The result of evaluating a semantic tree node.
///
/// A value is either an immutable constant or a live binding of the
/// environment. Assignment-style operators need the latter.
#[derive(Debug, Clone)]
pub enum Value {
    /// An immutable constant.
    Constant(Constant),
    /// A mutable binding owned by the environment.
    LValue(LValueRef),
}

impl Value {
    /// Returns `true` if the value is a binding.
    #[must_use]
    pub const fn is_lvalue(&self) -> bool {
        matches!(self, Self::LValue(_))
    }

    /// Returns the constant a value stands for; bindings yield their current
    /// content.
    #[must_use]
    pub fn into_constant(self) -> Constant {
        match self {
            Self::Constant(c) => c,
            Self::LValue(lv) => lv.borrow().content().clone(),
        }
    }

    /// Returns the binding, if the value is one.
    #[must_use]
    pub const fn as_lvalue(&self) -> Option<&LValueRef> {
        match self {
            Self::LValue(lv) => Some(lv),
            Self::Constant(_) => None,
        }
    }
}

impl From<Constant> for Value {
    fn from(c: Constant) -> Self {
        Self::Constant(c)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Constant(c) => write!(f, "{c}"),
            Self::LValue(lv) => write!(f, "{}", lv.borrow()),
        }
    }
}
