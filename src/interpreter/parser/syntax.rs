use crate::{
    error::ParseError,
    grammar::operator::Associativity,
    interpreter::parser::core::ParseResult,
};

/// A node of the syntax tree, as it sits on the operand stack.
///
/// Operator nodes keep their operand grouped: a multi-argument operator holds
/// a single `Tuple`, an infix operator always holds a `Tuple` of two.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyntaxNode {
    /// A word that is not an operator spelling.
    Word {
        /// The word.
        text:   String,
        /// Column of its first character.
        column: usize,
    },
    /// The contents of a quoted literal.
    Str {
        /// The unescaped contents.
        text:   String,
        /// Column of the opening quote.
        column: usize,
    },
    /// A prefix operator applied to its operand.
    Prefix {
        /// The operator spelling.
        symbol:  String,
        /// Column of the operator.
        column:  usize,
        /// A single value or an argument tuple.
        operand: Box<SyntaxNode>,
    },
    /// An infix operator applied to a pair.
    Infix {
        /// The operator spelling.
        symbol:  String,
        /// Column of the operator.
        column:  usize,
        /// Always a two element tuple.
        operand: Box<SyntaxNode>,
    },
    /// A postfix operator applied to its operand.
    Postfix {
        /// The operator spelling.
        symbol:  String,
        /// Column of the operator.
        column:  usize,
        /// A single value or an argument tuple.
        operand: Box<SyntaxNode>,
    },
    /// A comma separated list.
    ///
    /// A tuple is sealed once its closing parenthesis is read; a sealed tuple
    /// can no longer absorb elements from an enclosing list.
    Tuple {
        /// The elements, in source order.
        elements: Vec<SyntaxNode>,
        /// Column of the opening parenthesis, or of the first element while
        /// unsealed.
        column:   usize,
        /// Whether the group has been closed.
        sealed:   bool,
    },
}

impl SyntaxNode {
    /// Column the node starts at.
    #[must_use]
    pub const fn column(&self) -> usize {
        match self {
            Self::Word { column, .. }
            | Self::Str { column, .. }
            | Self::Prefix { column, .. }
            | Self::Infix { column, .. }
            | Self::Postfix { column, .. }
            | Self::Tuple { column, .. } => *column,
        }
    }

    /// Returns `true` for tuples.
    #[must_use]
    pub const fn is_tuple(&self) -> bool {
        matches!(self, Self::Tuple { .. })
    }
}

/// A pending entry of the operator stack.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Marker {
    /// A prefix operator still waiting for its operand.
    Prefix {
        /// The operator spelling.
        symbol: String,
        /// Column of the operator.
        column: usize,
    },
    /// An infix operator waiting for its right operand.
    Infix {
        /// The operator spelling.
        symbol:        String,
        /// Column of the operator.
        column:        usize,
        /// Rank of its layer.
        precedence:    i32,
        /// Associativity of its layer.
        associativity: Associativity,
    },
    /// An open parenthesis.
    Paren {
        /// Column of the parenthesis.
        column: usize,
    },
    /// A comma inside a group.
    Comma {
        /// Column of the comma.
        column: usize,
    },
}

impl Marker {
    /// Column of the token that pushed the marker.
    #[must_use]
    pub const fn column(&self) -> usize {
        match self {
            Self::Prefix { column, .. }
            | Self::Infix { column, .. }
            | Self::Paren { column }
            | Self::Comma { column } => *column,
        }
    }
}

fn pop_operand(operands: &mut Vec<SyntaxNode>, column: usize) -> ParseResult<SyntaxNode> {
    operands.pop()
            .ok_or_else(|| ParseError::Malformed { details: "missing operand".to_string(),
                                                   column })
}

/// Applies an operator marker to the operand stack.
///
/// Prefix markers wrap the top operand. Infix markers pop two operands and
/// wrap them as a pair. Commas pop two operands and build or extend an
/// unsealed tuple.
///
/// # Errors
/// - `ParseError::NestedTuple` if a comma meets a sealed tuple on its left or
///   any tuple on its right.
/// - `ParseError::UnclosedParen` for a parenthesis marker, which is never
///   merged.
pub fn merge(marker: Marker, operands: &mut Vec<SyntaxNode>) -> ParseResult<()> {
    match marker {
        Marker::Prefix { symbol, column } => {
            let operand = pop_operand(operands, column)?;
            operands.push(SyntaxNode::Prefix { symbol,
                                               column,
                                               operand: Box::new(operand) });
        },
        Marker::Infix { symbol, column, .. } => {
            let right = pop_operand(operands, column)?;
            let left = pop_operand(operands, column)?;
            let pair = SyntaxNode::Tuple { column:   left.column(),
                                           elements: vec![left, right],
                                           sealed:   true, };
            operands.push(SyntaxNode::Infix { symbol,
                                              column,
                                              operand: Box::new(pair) });
        },
        Marker::Comma { column } => {
            let right = pop_operand(operands, column)?;
            if right.is_tuple() {
                return Err(ParseError::NestedTuple { column: right.column() });
            }
            let left = pop_operand(operands, column)?;
            let tuple = match left {
                SyntaxNode::Tuple { mut elements,
                                    column,
                                    sealed: false, } => {
                    elements.push(right);
                    SyntaxNode::Tuple { elements,
                                        column,
                                        sealed: false }
                },
                SyntaxNode::Tuple { column, .. } => {
                    return Err(ParseError::NestedTuple { column });
                },
                left => SyntaxNode::Tuple { column:   left.column(),
                                            elements: vec![left, right],
                                            sealed:   false, },
            };
            operands.push(tuple);
        },
        Marker::Paren { column } => return Err(ParseError::UnclosedParen { column }),
    }
    Ok(())
}

/// Wraps an operand in a postfix operator.
pub fn apply_postfix(symbol: String,
                     column: usize,
                     operands: &mut Vec<SyntaxNode>)
                     -> ParseResult<()> {
    let operand = pop_operand(operands, column)?;
    operands.push(SyntaxNode::Postfix { symbol,
                                        column,
                                        operand: Box::new(operand) });
    Ok(())
}

/// Seals the tuple a group just produced and moves its column to the opening
/// parenthesis.
pub fn seal(operands: &mut [SyntaxNode], paren_column: usize) {
    if let Some(SyntaxNode::Tuple { column, sealed, .. }) = operands.last_mut()
       && !*sealed
    {
        *sealed = true;
        *column = paren_column;
    }
}
