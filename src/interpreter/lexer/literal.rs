use std::fmt::Debug;

use logos::Logos;

use crate::interpreter::value::{complex::ComplexNumber, core::Constant};

/// The literal forms a word can take.
///
/// A word only counts as a literal when a single `Literal` token spans all of
/// it; anything else (`x1`, `2x`, `1.2.3`) is left to the variable fallback.
#[derive(Logos, Debug, PartialEq, Clone, Copy)]
pub enum Literal {
    /// Boolean literals in lower, title or upper case.
    #[token("true", parse_bool)]
    #[token("True", parse_bool)]
    #[token("TRUE", parse_bool)]
    #[token("false", parse_bool)]
    #[token("False", parse_bool)]
    #[token("FALSE", parse_bool)]
    Bool(bool),
    /// `_`, a placeholder that evaluates to a dummy zero.
    #[token("_")]
    Wildcard,
    /// Decimal literals such as `42`, `007` or `3.14`.
    #[regex(r"[0-9]+(\.[0-9]+)?", parse_real)]
    Real(f64),
    /// Imaginary literals such as `i`, `J` or `2.5j`.
    #[regex(r"([0-9]+(\.[0-9]+)?)?[iIjJ]", parse_imaginary)]
    Imaginary(f64),
}

/// Parses a decimal literal from the current token slice.
///
/// # Parameters
/// - `lex`: Reference to the Logos lexer at the current token.
///
/// # Returns
/// - `Some(f64)`: The parsed value.
/// - `None`: If the slice does not fit in an `f64`.
fn parse_real(lex: &logos::Lexer<Literal>) -> Option<f64> {
    lex.slice().parse().ok()
}

/// Parses a boolean literal in any of its three casings.
///
/// # Returns
/// - `Some(true)` for `true`, `True` and `TRUE`.
/// - `Some(false)` for `false`, `False` and `FALSE`.
/// - `None` otherwise.
fn parse_bool(lex: &logos::Lexer<Literal>) -> Option<bool> {
    match lex.slice() {
        "true" | "True" | "TRUE" => Some(true),
        "false" | "False" | "FALSE" => Some(false),
        _ => None,
    }
}

/// Parses the coefficient of an imaginary literal; a bare unit means `1`.
fn parse_imaginary(lex: &logos::Lexer<Literal>) -> Option<f64> {
    let slice = lex.slice();
    let coefficient = &slice[..slice.len() - 1];
    if coefficient.is_empty() { Some(1.0) } else { coefficient.parse().ok() }
}

impl Literal {
    /// Builds the constant the literal stands for.
    #[must_use]
    pub fn to_constant(self) -> Constant {
        match self {
            Self::Bool(b) => Constant::new(b),
            Self::Wildcard => Constant::dummy(0),
            Self::Real(x) => Constant::new(x),
            Self::Imaginary(y) => Constant::new(ComplexNumber::new(0.0, y)),
        }
    }
}

/// Scans `word` as a single literal.
///
/// # Returns
/// - `Some(Literal)`: If exactly one literal token covers the whole word.
/// - `None`: Otherwise.
///
/// # Example
/// ```
/// use opcalc::interpreter::lexer::literal::{Literal, scan_literal};
///
/// assert_eq!(scan_literal("3.5"), Some(Literal::Real(3.5)));
/// assert_eq!(scan_literal("2j"), Some(Literal::Imaginary(2.0)));
/// assert_eq!(scan_literal("True"), Some(Literal::Bool(true)));
/// assert_eq!(scan_literal("x1"), None);
/// assert_eq!(scan_literal("12abc"), None);
/// ```
#[must_use]
pub fn scan_literal(word: &str) -> Option<Literal> {
    let mut lex = Literal::lexer(word);
    let literal = lex.next()?.ok()?;
    (lex.span() == (0..word.len())).then_some(literal)
}

/// Parses a possibly signed numeric literal, as used by string to number
/// casts.
///
/// Surrounding whitespace is ignored. Booleans and the wildcard are not
/// numbers.
///
/// # Example
/// ```
/// use opcalc::interpreter::{lexer::literal::parse_number, value::complex::ComplexNumber};
///
/// assert_eq!(parse_number(" -2.5 "), Some(ComplexNumber::from(-2.5)));
/// assert_eq!(parse_number("+i"), Some(ComplexNumber::new(0.0, 1.0)));
/// assert_eq!(parse_number("abc"), None);
/// ```
#[must_use]
pub fn parse_number(s: &str) -> Option<ComplexNumber> {
    let s = s.trim();
    let (negative, digits) = match s.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, s.strip_prefix('+').unwrap_or(s)),
    };
    let n = match scan_literal(digits)? {
        Literal::Real(x) => ComplexNumber::from(x),
        Literal::Imaginary(y) => ComplexNumber::new(0.0, y),
        Literal::Bool(_) | Literal::Wildcard => return None,
    };
    Some(if negative { -n } else { n })
}

/// Turns non-operator words into constants.
///
/// The parser consults the recognizer for every word that is not an operator
/// spelling. Words it declines become variable references.
pub trait LiteralRecognizer: Debug {
    /// Returns the constant `word` denotes, or `None` for a variable name.
    fn recognize(&self, word: &str) -> Option<Constant>;
}

/// The stock literal forms: booleans, the `_` wildcard, decimal and imaginary
/// numbers.
#[derive(Debug, Default, Clone, Copy)]
pub struct DefaultLiterals;

impl LiteralRecognizer for DefaultLiterals {
    fn recognize(&self, word: &str) -> Option<Constant> {
        scan_literal(word).map(Literal::to_constant)
    }
}
