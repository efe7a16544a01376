use std::{fmt, rc::Rc};

use tracing::trace;

use crate::{
    error::{ConfigError, ParseError},
    grammar::{
        builder::GrammarBuilder,
        glyphs::Glyphs,
        operator::{Associativity, OperatorInfo, PrecedenceLayer},
        table::Grammar,
    },
    interpreter::{
        evaluator::node::Node,
        lexer::{
            core::{Lexer, Token, TokenKind},
            literal::LiteralRecognizer,
        },
        parser::syntax::{Marker, SyntaxNode, apply_postfix, merge, seal},
    },
};

/// Result type used by the parser.
pub type ParseResult<T> = Result<T, ParseError>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Initial,
    WaitLiteral,
    WaitInfix,
}

/// How the parser reads a token.
enum Role<'a> {
    LeftParen,
    RightParen,
    Comma,
    Operator(&'a str),
    Operand(SyntaxNode),
}

/// An operator-precedence parser for one grammar.
///
/// Parsing runs a three state machine over two stacks: pending operators and
/// built operands. Prefix operators bind to the next complete operand at
/// once, infix operators are reduced by rank and associativity, postfix
/// operators apply to the operand before them, and commas collect flat
/// argument tuples inside parentheses.
///
/// A parser is immutable apart from the lexer's decomposition memo, so one
/// instance can parse any number of inputs.
pub struct Parser {
    grammar:  Grammar,
    lexer:    Lexer,
    glyphs:   Glyphs,
    literals: Rc<dyn LiteralRecognizer>,
}

impl fmt::Debug for Parser {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Parser")
         .field("grammar", &self.grammar)
         .field("glyphs", &self.glyphs)
         .field("literals", &self.literals)
         .finish_non_exhaustive()
    }
}

impl Parser {
    /// Builds a parser with the default glyphs, character classes and
    /// literal forms.
    ///
    /// # Parameters
    /// - `prefix`: Prefix operators.
    /// - `postfix`: Postfix operators.
    /// - `table`: Precedence layers keyed by rank; smaller ranks bind tighter.
    ///
    /// # Errors
    /// Returns a `ConfigError` if the tables are inconsistent.
    pub fn new(prefix: Vec<OperatorInfo>,
               postfix: Vec<OperatorInfo>,
               table: Vec<(i32, PrecedenceLayer)>)
               -> Result<Self, ConfigError> {
        table.into_iter()
             .fold(GrammarBuilder::new().prefixes(prefix).postfixes(postfix),
                   |builder, (rank, layer)| builder.layer(rank, layer))
             .build()
    }

    pub(crate) fn from_parts(grammar: Grammar,
                             lexer: Lexer,
                             glyphs: Glyphs,
                             literals: Rc<dyn LiteralRecognizer>)
                             -> Self {
        Self { grammar,
               lexer,
               glyphs,
               literals }
    }

    /// The operator tables.
    #[must_use]
    pub const fn grammar(&self) -> &Grammar {
        &self.grammar
    }

    /// The lexer.
    #[must_use]
    pub const fn lexer(&self) -> &Lexer {
        &self.lexer
    }

    pub(crate) fn literals(&self) -> &dyn LiteralRecognizer {
        self.literals.as_ref()
    }

    /// Parses `text` into a semantic tree.
    ///
    /// # Errors
    /// Returns a `ParseError` carrying the column of the offending token.
    ///
    /// # Example
    /// ```
    /// use opcalc::defaults::basic_parser;
    ///
    /// let parser = basic_parser().unwrap();
    /// let tree = parser.parse("3 ** 3 ** 3").unwrap();
    /// assert_eq!(tree.to_string(), "Power(3, Power(3, 3))");
    ///
    /// assert!(parser.parse("5 *").is_err());
    /// ```
    pub fn parse(&self, text: &str) -> ParseResult<Node> {
        let syntax = self.parse_syntax(text)?;
        self.resolve(syntax)
    }

    /// Parses `text` into a syntax tree without resolving operators or
    /// literals.
    ///
    /// # Errors
    /// Returns a `ParseError` carrying the column of the offending token.
    pub fn parse_syntax(&self, text: &str) -> ParseResult<SyntaxNode> {
        let tokens = self.lexer.tokenize(text)?;
        let end = text.chars().count() + 1;

        let mut markers: Vec<Marker> = Vec::new();
        let mut operands: Vec<SyntaxNode> = Vec::new();
        let mut state = State::Initial;

        for token in &tokens {
            trace!(?state, token = %token, column = token.column, "parser step");
            let role = self.role(token);
            state = match state {
                State::Initial | State::WaitLiteral => {
                    self.on_literal(token, role, &mut markers, &mut operands)?
                },
                State::WaitInfix => self.on_infix(token, role, &mut markers, &mut operands)?,
            };
        }

        match state {
            State::Initial => return Err(ParseError::EmptyInput { column: end }),
            State::WaitLiteral => {
                return Err(match markers.last() {
                    Some(Marker::Prefix { symbol, column }
                         | Marker::Infix { symbol, column, .. }) => {
                        ParseError::DanglingOperator { symbol: symbol.clone(),
                                                       column: *column, }
                    },
                    Some(Marker::Paren { column }) => ParseError::UnclosedParen { column: *column },
                    Some(Marker::Comma { column }) => ParseError::TrailingComma { column: *column },
                    None => ParseError::Malformed { details: "no operand".to_string(),
                                                    column:  end, },
                });
            },
            State::WaitInfix => {},
        }

        while let Some(marker) = markers.pop() {
            merge(marker, &mut operands)?;
        }

        let root = operands.pop()
                           .ok_or_else(|| ParseError::Malformed { details: "no operand".to_string(),
                                                                  column:  end, })?;
        if let Some(extra) = operands.last() {
            return Err(ParseError::Malformed { details: "unconsumed operands".to_string(),
                                               column:  extra.column(), });
        }
        if root.is_tuple() {
            return Err(ParseError::BareTuple { column: root.column() });
        }
        Ok(root)
    }

    fn role<'t>(&self, token: &'t Token) -> Role<'t> {
        let text = token.text.as_str();
        match token.kind {
            TokenKind::Str => Role::Operand(SyntaxNode::Str { text:   token.text.clone(),
                                                              column: token.column, }),
            TokenKind::Symbol if is_glyph(text, self.glyphs.left_paren) => Role::LeftParen,
            TokenKind::Symbol if is_glyph(text, self.glyphs.right_paren) => Role::RightParen,
            TokenKind::Symbol if is_glyph(text, self.glyphs.comma) => Role::Comma,
            TokenKind::Symbol => Role::Operator(text),
            TokenKind::Word if self.grammar.is_operator(text) => Role::Operator(text),
            TokenKind::Word => Role::Operand(SyntaxNode::Word { text:   token.text.clone(),
                                                               column: token.column, }),
        }
    }

    /// Handles a token while a value is expected.
    fn on_literal(&self,
                  token: &Token,
                  role: Role<'_>,
                  markers: &mut Vec<Marker>,
                  operands: &mut Vec<SyntaxNode>)
                  -> ParseResult<State> {
        match role {
            Role::Operand(node) => {
                operands.push(node);
                reduce_prefixes(markers, operands)?;
                Ok(State::WaitInfix)
            },
            Role::LeftParen => {
                markers.push(Marker::Paren { column: token.column });
                Ok(State::WaitLiteral)
            },
            Role::RightParen => match markers.last() {
                Some(Marker::Paren { column }) => {
                    let column = *column;
                    markers.pop();
                    operands.push(SyntaxNode::Tuple { elements: Vec::new(),
                                                      column,
                                                      sealed: true });
                    reduce_prefixes(markers, operands)?;
                    Ok(State::WaitInfix)
                },
                Some(Marker::Comma { column }) => {
                    Err(ParseError::TrailingComma { column: *column })
                },
                None => Err(ParseError::UnmatchedClose { column: token.column }),
                Some(_) => Err(unexpected(token, "a value")),
            },
            Role::Operator(symbol) if self.grammar.is_prefix(symbol) => {
                markers.push(Marker::Prefix { symbol: symbol.to_string(),
                                              column: token.column, });
                Ok(State::WaitLiteral)
            },
            Role::Operator(_) | Role::Comma => Err(unexpected(token, "a value")),
        }
    }

    /// Handles a token while an operator is expected.
    fn on_infix(&self,
                token: &Token,
                role: Role<'_>,
                markers: &mut Vec<Marker>,
                operands: &mut Vec<SyntaxNode>)
                -> ParseResult<State> {
        match role {
            Role::RightParen => {
                let Some(paren) = merge_to_paren(markers, operands)? else {
                    return Err(ParseError::UnmatchedClose { column: token.column });
                };
                markers.pop();
                seal(operands, paren);
                reduce_prefixes(markers, operands)?;
                Ok(State::WaitInfix)
            },
            Role::Comma => {
                if merge_to_paren(markers, operands)?.is_none() {
                    return Err(ParseError::CommaOutsideGroup { column: token.column });
                }
                markers.push(Marker::Comma { column: token.column });
                Ok(State::WaitLiteral)
            },
            Role::Operator(symbol) => {
                if let Some(entry) = self.grammar.infix(symbol) {
                    reduce_infixes(markers, operands, entry.precedence, entry.associativity)?;
                    markers.push(Marker::Infix { symbol:        symbol.to_string(),
                                                 column:        token.column,
                                                 precedence:    entry.precedence,
                                                 associativity: entry.associativity, });
                    Ok(State::WaitLiteral)
                } else if self.grammar.is_postfix(symbol) {
                    apply_postfix(symbol.to_string(), token.column, operands)?;
                    Ok(State::WaitInfix)
                } else {
                    Err(unexpected(token, "an infix or postfix operator"))
                }
            },
            Role::LeftParen | Role::Operand(_) => {
                Err(unexpected(token, "an infix or postfix operator"))
            },
        }
    }
}

fn is_glyph(text: &str, glyph: char) -> bool {
    let mut chars = text.chars();
    chars.next() == Some(glyph) && chars.next().is_none()
}

fn unexpected(token: &Token, expected: &'static str) -> ParseError {
    ParseError::UnexpectedToken { token: token.to_string(),
                                  expected,
                                  column: token.column }
}

/// Binds every pending prefix operator on top of the stack to the operand
/// just completed.
fn reduce_prefixes(markers: &mut Vec<Marker>, operands: &mut Vec<SyntaxNode>) -> ParseResult<()> {
    while matches!(markers.last(), Some(Marker::Prefix { .. })) {
        if let Some(marker) = markers.pop() {
            merge(marker, operands)?;
        }
    }
    Ok(())
}

/// Reduces pending infix operators that bind at least as tight as an incoming
/// one of the given rank.
fn reduce_infixes(markers: &mut Vec<Marker>,
                  operands: &mut Vec<SyntaxNode>,
                  precedence: i32,
                  associativity: Associativity)
                  -> ParseResult<()> {
    while let Some(Marker::Infix { precedence: top, .. }) = markers.last() {
        let reduce = match precedence.cmp(top) {
            std::cmp::Ordering::Greater => true,
            std::cmp::Ordering::Less => false,
            std::cmp::Ordering::Equal => associativity == Associativity::Left,
        };
        if !reduce {
            break;
        }
        if let Some(marker) = markers.pop() {
            merge(marker, operands)?;
        }
    }
    Ok(())
}

/// Merges everything above the nearest open parenthesis, commas included.
///
/// # Returns
/// - `Some(column)`: The column of the parenthesis, left on the stack.
/// - `None`: If no parenthesis is open.
fn merge_to_paren(markers: &mut Vec<Marker>,
                  operands: &mut Vec<SyntaxNode>)
                  -> ParseResult<Option<usize>> {
    loop {
        match markers.last() {
            None => return Ok(None),
            Some(Marker::Paren { column }) => return Ok(Some(*column)),
            Some(_) => {
                if let Some(marker) = markers.pop() {
                    merge(marker, operands)?;
                }
            },
        }
    }
}
