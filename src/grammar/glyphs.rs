use std::{fmt, rc::Rc};

use crate::error::ConfigError;

/// The characters the lexer and parser reserve for themselves.
///
/// No operator spelling may contain any of them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Glyphs {
    /// Opens a group or an argument list.
    pub left_paren:   char,
    /// Closes a group or an argument list.
    pub right_paren:  char,
    /// Separates the elements of an argument list.
    pub comma:        char,
    /// The first quote glyph.
    pub single_quote: char,
    /// The second quote glyph.
    pub double_quote: char,
    /// Inside a quoted literal, copies the next character verbatim.
    pub escape:       char,
}

impl Default for Glyphs {
    fn default() -> Self {
        Self { left_paren:   '(',
               right_paren:  ')',
               comma:        ',',
               single_quote: '\'',
               double_quote: '"',
               escape:       '\\', }
    }
}

impl Glyphs {
    /// Returns every glyph with the name of its role.
    #[must_use]
    pub const fn roles(&self) -> [(char, &'static str); 6] {
        [(self.left_paren, "left parenthesis"),
         (self.right_paren, "right parenthesis"),
         (self.comma, "comma"),
         (self.single_quote, "single quote"),
         (self.double_quote, "double quote"),
         (self.escape, "escape")]
    }

    /// Returns `true` if `c` opens a quoted literal.
    #[must_use]
    pub const fn is_quote(&self, c: char) -> bool {
        c == self.single_quote || c == self.double_quote
    }

    /// The glyphs the parser turns into punctuation tokens.
    #[must_use]
    pub fn punctuation(&self) -> [String; 3] {
        [self.left_paren.to_string(), self.right_paren.to_string(), self.comma.to_string()]
    }

    /// Checks that the glyphs are distinct and fit the character classes.
    ///
    /// Punctuation must be made of symbol characters so that the lexer splits
    /// it out of symbol runs; quotes and the escape glyph must not be spaces.
    ///
    /// # Errors
    /// Returns `ConfigError::GlyphClash` or `ConfigError::GlyphClass`.
    pub fn validate(&self, classes: &CharClasses) -> Result<(), ConfigError> {
        let roles = self.roles();
        for (i, &(glyph, first)) in roles.iter().enumerate() {
            if let Some(&(_, second)) = roles[i + 1..].iter().find(|(other, _)| *other == glyph) {
                return Err(ConfigError::GlyphClash { glyph, first, second });
            }
        }

        for &(glyph, role) in &roles[..3] {
            if classes.is_space(glyph) || classes.is_word(glyph) {
                return Err(ConfigError::GlyphClass { glyph,
                                                     role,
                                                     expected: "a symbol character" });
            }
        }
        for &(glyph, role) in &roles[3..] {
            if classes.is_space(glyph) {
                return Err(ConfigError::GlyphClass { glyph,
                                                     role,
                                                     expected: "a non-space character" });
            }
        }
        Ok(())
    }
}

/// A character predicate.
pub type CharPredicate = Rc<dyn Fn(char) -> bool>;

/// Decides which characters are spaces, word characters or symbol characters.
///
/// Spaces are checked first. Among the rest, either a word predicate or a
/// symbol predicate decides; the other class is its complement.
#[derive(Clone)]
pub struct CharClasses {
    space: CharPredicate,
    class: WordOrSymbol,
}

#[derive(Clone)]
enum WordOrSymbol {
    Word(CharPredicate),
    Symbol(CharPredicate),
}

fn default_word(c: char) -> bool {
    c.is_alphanumeric() || c == '_' || !c.is_ascii()
}

impl Default for CharClasses {
    /// Whitespace separates tokens; alphanumerics, `_` and every non-ASCII
    /// character form words; everything else is a symbol.
    fn default() -> Self {
        Self { space: Rc::new(char::is_whitespace),
               class: WordOrSymbol::Word(Rc::new(default_word)), }
    }
}

impl CharClasses {
    /// Replaces the space predicate.
    #[must_use]
    pub fn with_space(mut self, space: impl Fn(char) -> bool + 'static) -> Self {
        self.space = Rc::new(space);
        self
    }

    /// Lets `word` decide word characters; every other non-space is a symbol.
    #[must_use]
    pub fn with_word(mut self, word: impl Fn(char) -> bool + 'static) -> Self {
        self.class = WordOrSymbol::Word(Rc::new(word));
        self
    }

    /// Lets `symbol` decide symbol characters; every other non-space belongs
    /// to words.
    ///
    /// # Example
    /// ```
    /// use opcalc::grammar::glyphs::CharClasses;
    ///
    /// let classes = CharClasses::default().with_symbol(|c| "+-*/()=,".contains(c));
    /// assert!(classes.is_word('$'));
    /// assert!(classes.is_symbol('+'));
    /// ```
    #[must_use]
    pub fn with_symbol(mut self, symbol: impl Fn(char) -> bool + 'static) -> Self {
        self.class = WordOrSymbol::Symbol(Rc::new(symbol));
        self
    }

    /// Returns `true` for separators.
    #[must_use]
    pub fn is_space(&self, c: char) -> bool {
        (self.space)(c)
    }

    /// Returns `true` for word characters. Spaces are never word characters.
    #[must_use]
    pub fn is_word(&self, c: char) -> bool {
        !self.is_space(c)
        && match &self.class {
            WordOrSymbol::Word(word) => word(c),
            WordOrSymbol::Symbol(symbol) => !symbol(c),
        }
    }

    /// Returns `true` for symbol characters. Spaces are never symbol
    /// characters.
    #[must_use]
    pub fn is_symbol(&self, c: char) -> bool {
        !self.is_space(c) && !self.is_word(c)
    }
}

impl fmt::Debug for CharClasses {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let class = match self.class {
            WordOrSymbol::Word(_) => "word predicate",
            WordOrSymbol::Symbol(_) => "symbol predicate",
        };
        f.debug_struct("CharClasses").field("class", &class).finish_non_exhaustive()
    }
}
