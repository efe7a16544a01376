use std::fmt;

use tracing::trace;

use crate::{
    error::{ConfigError, LexError},
    grammar::glyphs::{CharClasses, Glyphs},
    interpreter::lexer::symbols::SymbolTable,
};

/// The three kinds of token the lexer produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    /// A run of word characters, such as `x`, `42`, `3.14` or `abs`.
    Word,
    /// The contents of a quoted literal, quotes and escapes removed.
    Str,
    /// A registered operator spelling or a punctuation glyph.
    Symbol,
}

/// Represents a lexical token together with its source position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    /// What kind of token this is.
    pub kind:   TokenKind,
    /// The token text.
    pub text:   String,
    /// 1-based column of the first source character.
    pub column: usize,
}

impl Token {
    /// Creates a token.
    #[must_use]
    pub fn new(kind: TokenKind, text: impl Into<String>, column: usize) -> Self {
        Self { kind,
               text: text.into(),
               column }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            TokenKind::Str => write!(f, "{:?}", self.text),
            TokenKind::Word | TokenKind::Symbol => write!(f, "{}", self.text),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Free,
    InWord,
    InQuote { quote: char, start: usize },
    InQuoteEscape { quote: char, start: usize },
}

/// Splits source text into words, string literals and symbols.
///
/// Words and spaces are recognised through [`CharClasses`]. Quoted literals
/// open with either quote glyph and close with the same glyph; inside them
/// the escape glyph copies the next character verbatim. Maximal runs of symbol
/// characters are split into registered spellings by a memoizing
/// [`SymbolTable`].
#[derive(Debug)]
pub struct Lexer {
    glyphs:        Glyphs,
    classes:       CharClasses,
    symbols:       SymbolTable,
    decimal_words: bool,
}

impl Lexer {
    /// Creates a lexer for the given operator spellings.
    ///
    /// Spellings made only of word characters are matched as whole words by
    /// the parser and need no entry in the symbol table. The punctuation
    /// glyphs are always registered.
    ///
    /// # Parameters
    /// - `glyphs`: Reserved punctuation, quote and escape glyphs.
    /// - `classes`: Character classification.
    /// - `spellings`: Every operator spelling of the grammar.
    /// - `decimal_words`: Whether `3.14` is read as one word.
    ///
    /// # Errors
    /// Returns a `ConfigError` if a spelling is empty, contains a space or a
    /// reserved glyph, or mixes word and symbol characters.
    pub fn new<'a>(glyphs: Glyphs,
                   classes: CharClasses,
                   spellings: impl IntoIterator<Item = &'a str>,
                   decimal_words: bool)
                   -> Result<Self, ConfigError> {
        let mut symbols: Vec<String> = Vec::new();
        for spelling in spellings {
            if spelling.is_empty() {
                return Err(ConfigError::EmptySymbol);
            }
            if spelling.chars().any(|c| classes.is_space(c)) {
                return Err(ConfigError::SymbolWithSpace { symbol: spelling.to_string() });
            }
            if let Some(glyph) = spelling.chars()
                                         .find(|&c| glyphs.roles().iter().any(|&(g, _)| g == c))
            {
                return Err(ConfigError::ReservedGlyph { symbol: spelling.to_string(),
                                                        glyph });
            }
            if spelling.chars().all(|c| classes.is_word(c)) {
                continue;
            }
            if !spelling.chars().all(|c| classes.is_symbol(c)) {
                return Err(ConfigError::MixedSymbol { symbol: spelling.to_string() });
            }
            symbols.push(spelling.to_string());
        }
        symbols.extend(glyphs.punctuation());

        Ok(Self { glyphs,
                  classes,
                  symbols: SymbolTable::new(symbols),
                  decimal_words })
    }

    /// The symbol table with its decomposition memo.
    #[must_use]
    pub const fn symbols(&self) -> &SymbolTable {
        &self.symbols
    }

    /// Splits `text` into tokens.
    ///
    /// # Errors
    /// Returns `LexError::UnterminatedQuote` if a quoted literal is never
    /// closed and `LexError::UnknownSymbols` if a symbol run cannot be split
    /// into registered spellings.
    ///
    /// # Example
    /// ```
    /// use opcalc::{defaults::basic_parser, interpreter::lexer::core::TokenKind};
    ///
    /// let parser = basic_parser().unwrap();
    /// let tokens = parser.lexer().tokenize("-x*'a b'").unwrap();
    /// let kinds: Vec<_> = tokens.iter().map(|t| (t.kind, t.text.as_str(), t.column)).collect();
    /// assert_eq!(kinds,
    ///            vec![(TokenKind::Symbol, "-", 1),
    ///                 (TokenKind::Word, "x", 2),
    ///                 (TokenKind::Symbol, "*", 3),
    ///                 (TokenKind::Str, "a b", 4)]);
    /// ```
    pub fn tokenize(&self, text: &str) -> Result<Vec<Token>, LexError> {
        let mut tokens = Vec::new();
        let mut state = State::Free;
        let mut buffer = String::new();
        let mut buffer_start = 1;

        let chars: Vec<char> = text.chars().collect();
        for (index, &c) in chars.iter().enumerate() {
            let column = index + 1;
            state = match state {
                State::InQuoteEscape { quote, start } => {
                    buffer.push(c);
                    State::InQuote { quote, start }
                },
                State::InQuote { quote, start } => {
                    if c == self.glyphs.escape {
                        State::InQuoteEscape { quote, start }
                    } else if c == quote {
                        let literal = std::mem::take(&mut buffer);
                        tokens.push(Token::new(TokenKind::Str, literal, start));
                        State::Free
                    } else {
                        buffer.push(c);
                        state
                    }
                },
                State::InWord => {
                    if self.classes.is_word(c)
                       || self.continues_decimal(&buffer, c, chars.get(index + 1))
                    {
                        buffer.push(c);
                        State::InWord
                    } else {
                        let word = std::mem::take(&mut buffer);
                        tokens.push(Token::new(TokenKind::Word, word, buffer_start));
                        self.start(c, column, &mut buffer, &mut buffer_start)
                    }
                },
                State::Free => {
                    if self.classes.is_symbol(c) && !self.glyphs.is_quote(c) {
                        if buffer.is_empty() {
                            buffer_start = column;
                        }
                        buffer.push(c);
                        State::Free
                    } else {
                        self.flush_symbols(&mut buffer, buffer_start, &mut tokens)?;
                        self.start(c, column, &mut buffer, &mut buffer_start)
                    }
                },
            };
        }

        match state {
            State::InQuote { start, .. } | State::InQuoteEscape { start, .. } => {
                Err(LexError::UnterminatedQuote { column: start })
            },
            State::InWord => {
                tokens.push(Token::new(TokenKind::Word, buffer, buffer_start));
                Ok(tokens)
            },
            State::Free => {
                self.flush_symbols(&mut buffer, buffer_start, &mut tokens)?;
                Ok(tokens)
            },
        }
    }

    /// Begins a new token at `c`, after the previous one was flushed.
    fn start(&self,
             c: char,
             column: usize,
             buffer: &mut String,
             buffer_start: &mut usize)
             -> State {
        *buffer_start = column;
        if self.classes.is_space(c) {
            State::Free
        } else if self.glyphs.is_quote(c) {
            State::InQuote { quote: c, start: column }
        } else if self.classes.is_word(c) {
            buffer.push(c);
            State::InWord
        } else {
            buffer.push(c);
            State::Free
        }
    }

    /// A `.` between digits keeps an all-digit word going.
    fn continues_decimal(&self, word: &str, c: char, next: Option<&char>) -> bool {
        self.decimal_words
        && c == '.'
        && word.bytes().all(|b| b.is_ascii_digit())
        && next.is_some_and(char::is_ascii_digit)
    }

    fn flush_symbols(&self,
                     buffer: &mut String,
                     start: usize,
                     tokens: &mut Vec<Token>)
                     -> Result<(), LexError> {
        if buffer.is_empty() {
            return Ok(());
        }
        let run = std::mem::take(buffer);
        let parts =
            self.symbols
                .decompose(&run)
                .ok_or_else(|| LexError::UnknownSymbols { symbols: run.clone(),
                                                          column:  start, })?;
        trace!(run, ?parts, "split symbol run");

        let mut column = start;
        for part in parts {
            let width = part.chars().count();
            tokens.push(Token::new(TokenKind::Symbol, part, column));
            column += width;
        }
        Ok(())
    }
}
