use thiserror::Error;

/// Represents every way a grammar or lexer setup can be rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// Two operators in one precedence layer share a spelling.
    #[error("Two operators in the same precedence layer use the symbol '{symbol}'.")]
    DuplicateLayerSymbol {
        /// The repeated spelling.
        symbol: String,
    },
    /// A precedence layer holds an operator that is not binary.
    #[error("Infix operator '{symbol}' is {arity}-ary, but infix operators must be binary.")]
    NonBinaryInfix {
        /// The operator spelling.
        symbol: String,
        /// The arity of the offending operator.
        arity:  usize,
    },
    /// The same infix spelling appears in two different layers.
    #[error("Two infix operators use the symbol '{symbol}'.")]
    DuplicateInfix {
        /// The repeated spelling.
        symbol: String,
    },
    /// Two prefix (or postfix) operators share both spelling and arity.
    #[error("Two {fixity} operators use the symbol '{symbol}' with arity {arity}.")]
    DuplicateOverload {
        /// Either `"prefix"` or `"postfix"`.
        fixity: &'static str,
        /// The repeated spelling.
        symbol: String,
        /// The repeated arity.
        arity:  usize,
    },
    /// A spelling is registered both as infix and as postfix.
    #[error("The symbol '{symbol}' is both infix and postfix, which is not allowed.")]
    InfixPostfixClash {
        /// The ambiguous spelling.
        symbol: String,
    },
    /// Two precedence layers were registered under the same rank.
    #[error("Precedence rank {rank} is used by more than one layer.")]
    DuplicateRank {
        /// The repeated rank.
        rank: i32,
    },
    /// An operator spelling contains a glyph reserved by the lexer or parser.
    #[error("Operator '{symbol}' contains the reserved glyph '{glyph}'.")]
    ReservedGlyph {
        /// The operator spelling.
        symbol: String,
        /// The reserved glyph found inside it.
        glyph:  char,
    },
    /// An operator spelling is empty.
    #[error("Empty operator symbols are not allowed.")]
    EmptySymbol,
    /// An operator spelling contains whitespace.
    #[error("Operator '{symbol}' contains a space character.")]
    SymbolWithSpace {
        /// The operator spelling.
        symbol: String,
    },
    /// An operator spelling mixes word characters and symbol characters.
    #[error("Operator '{symbol}' mixes word characters and symbol characters.")]
    MixedSymbol {
        /// The operator spelling.
        symbol: String,
    },
    /// Two reserved glyphs were configured to the same character.
    #[error("The glyph '{glyph}' is reserved for both {first} and {second}.")]
    GlyphClash {
        /// The shared character.
        glyph:  char,
        /// Role of the first glyph.
        first:  &'static str,
        /// Role of the second glyph.
        second: &'static str,
    },
    /// A reserved glyph does not belong to the character class its role needs.
    #[error("The {role} glyph '{glyph}' must be {expected}.")]
    GlyphClass {
        /// The configured character.
        glyph:    char,
        /// Role of the glyph.
        role:     &'static str,
        /// Description of the required class.
        expected: &'static str,
    },
}
