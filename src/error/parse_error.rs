use thiserror::Error;

/// Errors raised by the lexer while splitting source text into tokens.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LexError {
    /// A quoted literal was opened but never closed.
    #[error("At column {column}: Quote not closed.")]
    UnterminatedQuote {
        /// Column of the opening quote.
        column: usize,
    },
    /// A run of symbol characters cannot be split into known operators.
    #[error("At column {column}: Cannot split the symbols '{symbols}' into known operators.")]
    UnknownSymbols {
        /// The maximal symbol run.
        symbols: String,
        /// Column of the first character of the run.
        column:  usize,
    },
}

impl LexError {
    /// Returns the 1-based column the error points at.
    #[must_use]
    pub const fn column(&self) -> usize {
        match self {
            Self::UnterminatedQuote { column } | Self::UnknownSymbols { column, .. } => *column,
        }
    }
}

/// Represents all errors that can occur while lexing or parsing an expression.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// The lexer rejected the input.
    #[error(transparent)]
    Lex(#[from] LexError),
    /// There was nothing to parse.
    #[error("At column {column}: No valid input to parse.")]
    EmptyInput {
        /// Column just past the end of the input.
        column: usize,
    },
    /// A token arrived that the current parser state cannot accept.
    #[error("At column {column}: Unexpected token '{token}' while waiting for {expected}.")]
    UnexpectedToken {
        /// The token text.
        token:    String,
        /// What the parser was waiting for.
        expected: &'static str,
        /// Column of the token.
        column:   usize,
    },
    /// The input ended right after an operator.
    #[error("At column {column}: Operator '{symbol}' is missing its operand.")]
    DanglingOperator {
        /// The operator spelling.
        symbol: String,
        /// Column of the operator.
        column: usize,
    },
    /// A closing parenthesis has no matching opening parenthesis.
    #[error("At column {column}: Unmatched closing parenthesis.")]
    UnmatchedClose {
        /// Column of the closing parenthesis.
        column: usize,
    },
    /// An opening parenthesis was never closed.
    #[error("At column {column}: Parenthesis is never closed.")]
    UnclosedParen {
        /// Column of the opening parenthesis.
        column: usize,
    },
    /// A comma appeared outside of any parenthesised group.
    #[error("At column {column}: Comma outside of parentheses.")]
    CommaOutsideGroup {
        /// Column of the comma.
        column: usize,
    },
    /// A group ends with a comma, omitting its last element.
    #[error("At column {column}: Tuple element after the comma is missing.")]
    TrailingComma {
        /// Column of the comma.
        column: usize,
    },
    /// A tuple was placed inside another tuple.
    #[error("At column {column}: Tuples cannot be nested.")]
    NestedTuple {
        /// Column of the inner tuple.
        column: usize,
    },
    /// A tuple survived as the whole expression.
    #[error("At column {column}: A tuple is only valid as an operator's argument list.")]
    BareTuple {
        /// Column where the tuple starts.
        column: usize,
    },
    /// A tuple was used where a single value is needed.
    #[error("At column {column}: A tuple cannot be used as a value.")]
    TupleAsValue {
        /// Column where the tuple starts.
        column: usize,
    },
    /// No implementation is registered for an operator with this many operands.
    #[error("At column {column}: {fixity} operator '{symbol}' is not {arity}-ary.")]
    UnknownArity {
        /// Either `"Prefix"` or `"Postfix"`.
        fixity: &'static str,
        /// The operator spelling.
        symbol: String,
        /// The number of operands supplied.
        arity:  usize,
        /// Column of the operator.
        column: usize,
    },
    /// The parser stacks ended up in a shape no rule produces.
    #[error("At column {column}: Malformed expression: {details}.")]
    Malformed {
        /// What went wrong.
        details: String,
        /// Column of the nearest token.
        column:  usize,
    },
}

impl ParseError {
    /// Returns the 1-based column the error points at.
    ///
    /// # Example
    /// ```
    /// use opcalc::defaults::basic_parser;
    ///
    /// let parser = basic_parser().unwrap();
    /// let err = parser.parse("42)").unwrap_err();
    /// assert_eq!(err.column(), 3);
    /// ```
    #[must_use]
    pub const fn column(&self) -> usize {
        match self {
            Self::Lex(e) => e.column(),
            Self::EmptyInput { column }
            | Self::UnexpectedToken { column, .. }
            | Self::DanglingOperator { column, .. }
            | Self::UnmatchedClose { column }
            | Self::UnclosedParen { column }
            | Self::CommaOutsideGroup { column }
            | Self::TrailingComma { column }
            | Self::NestedTuple { column }
            | Self::BareTuple { column }
            | Self::TupleAsValue { column }
            | Self::UnknownArity { column, .. }
            | Self::Malformed { column, .. } => *column,
        }
    }
}
