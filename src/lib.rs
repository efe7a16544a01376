//! # opcalc
//!
//! opcalc is an embeddable expression language with a configurable grammar.
//! A lexer and an operator-precedence parser turn text into a semantic tree,
//! which is then evaluated against a caller-owned environment of variable
//! bindings.
//!
//! Operators are ordinary values: any type implementing
//! [`Operation`](interpreter::evaluator::node::Operation) can be bound to a
//! prefix, postfix or infix spelling, and prefix and postfix spellings may be
//! overloaded by arity.

#![warn(
    clippy::redundant_clone,
    clippy::needless_pass_by_value,
    clippy::similar_names,
    clippy::large_enum_variant,
    clippy::string_lit_as_bytes,
    clippy::match_same_arms,
    clippy::cargo,
    clippy::nursery,
    clippy::perf,
    clippy::style,
    clippy::suspicious,
    clippy::correctness,
    clippy::complexity,
    clippy::pedantic,
    //missing_docs,
)]
#![allow(clippy::missing_errors_doc)]

use crate::{
    error::Error,
    interpreter::{evaluator::core::Environment, parser::core::Parser, value::core::Value},
};

/// Ready-made grammars.
///
/// Wires the operator library into a basic calculator grammar and an advanced
/// one with word operators, assignments and sequencing.
pub mod defaults;
/// Provides unified error types for grammar construction, parsing and
/// evaluation.
///
/// # Responsibilities
/// - Defines one error enum per phase: configuration, lexing and parsing,
///   evaluation.
/// - Attaches source columns to lexing and parsing errors.
/// - Offers a crate-wide `Error` for one-shot evaluation.
pub mod error;
/// Grammar configuration.
///
/// Holds the operator tables, precedence layers, reserved glyphs and character
/// classes a parser is built from, and validates them once at construction.
pub mod grammar;
/// Orchestrates tokenizing, parsing and evaluation.
///
/// # Responsibilities
/// - Splits text into tokens.
/// - Builds semantic trees with an operator-precedence parser.
/// - Evaluates trees against an environment of bindings.
pub mod interpreter;
/// The operator library.
///
/// Concrete operations for arithmetic, logic, numbers, strings, assignment
/// and control, each a small type implementing `Operation`.
pub mod ops;
/// General utilities for safe numeric conversion.
///
/// # Responsibilities
/// - Safely convert between `usize` and `f64` without silent data loss.
/// - Test whether a float holds an integer.
pub mod util;

/// Parses `source` with `parser` and evaluates it against `env`.
///
/// # Errors
/// Returns `Error::Parse` if the text does not parse and `Error::Eval` if
/// evaluation fails. Bindings made before an evaluation error stay in `env`.
///
/// # Examples
/// ```
/// use opcalc::{defaults::basic_parser, evaluate, interpreter::evaluator::core::Environment};
///
/// let parser = basic_parser().unwrap();
/// let mut env = Environment::new();
///
/// let value = evaluate(&parser, "(3 + 5) * 6", &mut env).unwrap();
/// assert_eq!(value.to_string(), "48");
///
/// // `x` is not bound.
/// assert!(evaluate(&parser, "x + 1", &mut env).is_err());
/// ```
pub fn evaluate(parser: &Parser, source: &str, env: &mut Environment) -> Result<Value, Error> {
    let tree = parser.parse(source)?;
    Ok(tree.eval(env)?)
}

/// Evaluates every line of `script` against one shared environment.
///
/// Blank lines and lines starting with `#` are skipped. Evaluation stops at
/// the first failing line; the error is returned together with its 1-based
/// line number.
///
/// # Examples
/// ```
/// use opcalc::{
///     defaults::advanced_parser, evaluate_script, interpreter::evaluator::core::Environment,
/// };
///
/// let parser = advanced_parser(Vec::new(), Vec::new()).unwrap();
/// let mut env = Environment::new();
/// let script = "# setup\nx := 20\n\nx * 2 + 2\n";
///
/// let values = evaluate_script(&parser, script, &mut env).unwrap();
/// assert_eq!(values.len(), 2);
/// assert_eq!(values[1].to_string(), "42");
/// ```
pub fn evaluate_script(parser: &Parser,
                       script: &str,
                       env: &mut Environment)
                       -> Result<Vec<Value>, (usize, Error)> {
    let mut values = Vec::new();
    evaluate_lines(parser, script, env, |_, value| values.push(value))?;
    Ok(values)
}

/// Like [`evaluate_script`], but hands each value to `on_value` together with
/// its 1-based line number as soon as the line is evaluated.
///
/// # Examples
/// ```
/// use opcalc::{defaults::basic_parser, evaluate_lines, interpreter::evaluator::core::Environment};
///
/// let parser = basic_parser().unwrap();
/// let mut seen = Vec::new();
/// let result = evaluate_lines(&parser, "1 + 1\n\n1 / 0\n3", &mut Environment::new(), |line, v| {
///     seen.push((line, v.to_string()));
/// });
///
/// assert_eq!(seen, vec![(1, "2".to_string())]);
/// assert_eq!(result.unwrap_err().0, 3);
/// ```
pub fn evaluate_lines(parser: &Parser,
                      script: &str,
                      env: &mut Environment,
                      mut on_value: impl FnMut(usize, Value))
                      -> Result<(), (usize, Error)> {
    for (index, line) in script.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let value = evaluate(parser, line, env).map_err(|e| (index + 1, e))?;
        on_value(index + 1, value);
    }
    Ok(())
}
