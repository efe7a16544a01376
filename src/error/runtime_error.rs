use thiserror::Error;

/// Represents all errors that can occur while evaluating a semantic tree.
///
/// Evaluation errors carry no source position; they are raised by the operator
/// that failed and propagate unchanged to the caller of `eval`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EvalError {
    /// A variable was read before any declaration bound it.
    #[error("Variable \"{name}\" is undefined.")]
    UndefinedVariable {
        /// The name of the variable.
        name: String,
    },
    /// A declaration targeted a name that is already bound.
    #[error("The variable {name} has existed.")]
    AlreadyDeclared {
        /// The name of the variable.
        name: String,
    },
    /// An assignment-style operator received something that is not a binding.
    #[error("Operator '{operator}' only applies to variables.")]
    NotAnLValue {
        /// The operator that required a binding.
        operator: &'static str,
    },
    /// A declaration-style operator did not receive a bare variable name.
    #[error("Operator '{operator}' needs a variable name.")]
    ExpectedVariable {
        /// The operator that required a name.
        operator: &'static str,
    },
    /// An operand had an unsupported type.
    #[error("Type error: {details}.")]
    TypeMismatch {
        /// Details about the mismatch.
        details: String,
    },
    /// A constant could not be converted to the requested type.
    #[error("Cannot convert '{value}' to {target}.")]
    InvalidCast {
        /// Display form of the source value.
        value:  String,
        /// Name of the target type.
        target: &'static str,
    },
    /// An operand was of the right type but outside the valid domain.
    #[error("Invalid argument: {details}.")]
    InvalidArgument {
        /// Details about why the argument is invalid.
        details: String,
    },
    /// An operator was built with the wrong number of operands.
    #[error("Operator '{operator}' expects {expected} operands, found {found}.")]
    ArityMismatch {
        /// The operator name.
        operator: &'static str,
        /// Declared arity.
        expected: usize,
        /// Supplied operand count.
        found:    usize,
    },
    /// Attempted division by zero.
    #[error("Division by zero.")]
    DivisionByZero,
    /// A numeric result is not finite, or a repeated string would outgrow
    /// `MAX_REPEAT_BYTES`.
    #[error("Numeric overflow while computing the result.")]
    Overflow,
    /// A user expression raised an error on purpose.
    #[error("{message}")]
    Raised {
        /// The user supplied message.
        message: String,
    },
}

impl EvalError {
    pub(crate) fn type_mismatch(details: impl Into<String>) -> Self {
        Self::TypeMismatch { details: details.into() }
    }

    pub(crate) fn invalid_argument(details: impl Into<String>) -> Self {
        Self::InvalidArgument { details: details.into() }
    }
}
