use std::rc::Rc;

use tracing::debug;

use crate::{
    error::ConfigError,
    grammar::{
        glyphs::{CharClasses, Glyphs},
        operator::{OperatorInfo, PrecedenceLayer},
        table::Grammar,
    },
    interpreter::{
        lexer::{
            core::Lexer,
            literal::{DefaultLiterals, LiteralRecognizer},
        },
        parser::core::Parser,
    },
};

/// Collects everything a parser is made of and validates it in one go.
///
/// # Example
/// ```
/// use std::rc::Rc;
///
/// use opcalc::{
///     grammar::{
///         builder::GrammarBuilder,
///         operator::{OperatorInfo, PrecedenceLayer},
///     },
///     interpreter::evaluator::core::Environment,
///     ops::basic::{Multiply, Plus},
/// };
///
/// let parser = GrammarBuilder::new()
///     .layer(10, PrecedenceLayer::left(vec![OperatorInfo::new("*", Rc::new(Multiply))]).unwrap())
///     .layer(20, PrecedenceLayer::left(vec![OperatorInfo::new("+", Rc::new(Plus))]).unwrap())
///     .build()
///     .unwrap();
///
/// let value = parser.parse("1 + 2 * 3").unwrap().eval(&mut Environment::new()).unwrap();
/// assert_eq!(value.to_string(), "7");
/// ```
#[derive(Debug)]
pub struct GrammarBuilder {
    prefix:        Vec<OperatorInfo>,
    postfix:       Vec<OperatorInfo>,
    table:         Vec<(i32, PrecedenceLayer)>,
    glyphs:        Glyphs,
    classes:       CharClasses,
    literals:      Rc<dyn LiteralRecognizer>,
    decimal_words: bool,
}

impl Default for GrammarBuilder {
    fn default() -> Self {
        Self { prefix:        Vec::new(),
               postfix:       Vec::new(),
               table:         Vec::new(),
               glyphs:        Glyphs::default(),
               classes:       CharClasses::default(),
               literals:      Rc::new(DefaultLiterals),
               decimal_words: true, }
    }
}

impl GrammarBuilder {
    /// Starts from an empty grammar with the default glyphs, character classes
    /// and literal forms.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a prefix operator.
    #[must_use]
    pub fn prefix(mut self, op: OperatorInfo) -> Self {
        self.prefix.push(op);
        self
    }

    /// Adds several prefix operators.
    #[must_use]
    pub fn prefixes(mut self, ops: impl IntoIterator<Item = OperatorInfo>) -> Self {
        self.prefix.extend(ops);
        self
    }

    /// Adds a postfix operator.
    #[must_use]
    pub fn postfix(mut self, op: OperatorInfo) -> Self {
        self.postfix.push(op);
        self
    }

    /// Adds several postfix operators.
    #[must_use]
    pub fn postfixes(mut self, ops: impl IntoIterator<Item = OperatorInfo>) -> Self {
        self.postfix.extend(ops);
        self
    }

    /// Adds a precedence layer under `rank`; smaller ranks bind tighter.
    #[must_use]
    pub fn layer(mut self, rank: i32, layer: PrecedenceLayer) -> Self {
        self.table.push((rank, layer));
        self
    }

    /// Replaces the reserved glyphs.
    #[must_use]
    pub const fn glyphs(mut self, glyphs: Glyphs) -> Self {
        self.glyphs = glyphs;
        self
    }

    /// Replaces the character classes.
    #[must_use]
    pub fn char_classes(mut self, classes: CharClasses) -> Self {
        self.classes = classes;
        self
    }

    /// Replaces the literal recognizer.
    #[must_use]
    pub fn literals(mut self, literals: impl LiteralRecognizer + 'static) -> Self {
        self.literals = Rc::new(literals);
        self
    }

    /// Controls whether `3.14` is lexed as a single word.
    #[must_use]
    pub const fn decimal_words(mut self, enabled: bool) -> Self {
        self.decimal_words = enabled;
        self
    }

    /// Validates the configuration and builds the parser.
    ///
    /// # Errors
    /// Returns the first `ConfigError` found in the glyphs, the operator
    /// tables or the operator spellings.
    pub fn build(self) -> Result<Parser, ConfigError> {
        self.glyphs.validate(&self.classes)?;

        let layers = self.table.len();
        let grammar = Grammar::new(self.prefix, self.postfix, self.table)?;
        let lexer = Lexer::new(self.glyphs,
                               self.classes,
                               grammar.spellings(),
                               self.decimal_words)?;
        debug!(layers,
               spellings = grammar.spellings().len(),
               decimal_words = self.decimal_words,
               "grammar built");

        Ok(Parser::from_parts(grammar, lexer, self.glyphs, self.literals))
    }
}
