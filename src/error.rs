/// Grammar construction errors.
///
/// Raised once, while a parser is being built, when the operator tables or the
/// lexer glyphs violate an invariant. No parsing happens with a grammar that
/// failed validation.
pub mod config_error;
/// Lexing and parsing errors.
///
/// Defines the errors raised while turning source text into a semantic tree.
/// Every variant carries the 1-based column of the offending character or
/// token.
pub mod parse_error;
/// Evaluation errors.
///
/// Contains all error types that can be raised while a semantic tree is
/// evaluated against an environment, such as undefined variables, operand type
/// mismatches, or assignments to something that is not a binding.
pub mod runtime_error;

pub use config_error::ConfigError;
pub use parse_error::{LexError, ParseError};
pub use runtime_error::EvalError;

/// Any error the crate can produce, for callers that parse and evaluate in one
/// go.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The grammar could not be built.
    #[error(transparent)]
    Config(#[from] ConfigError),
    /// The source text could not be parsed.
    #[error(transparent)]
    Parse(#[from] ParseError),
    /// The semantic tree failed during evaluation.
    #[error(transparent)]
    Eval(#[from] EvalError),
}
