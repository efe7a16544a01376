use std::rc::Rc;

use crate::{
    error::ParseError,
    interpreter::{
        evaluator::node::{Node, Operation, Operator, Var},
        parser::{
            core::{ParseResult, Parser},
            syntax::SyntaxNode,
        },
        value::core::Constant,
    },
};

impl Parser {
    /// Turns a syntax tree into a semantic tree.
    ///
    /// Words go through the literal recognizer and fall back to variables,
    /// string literals become string constants, and every operator node is
    /// bound to the operation registered for its spelling and operand count.
    ///
    /// # Errors
    /// - `ParseError::UnknownArity` if a prefix or postfix spelling has no
    ///   overload for the number of operands supplied.
    /// - `ParseError::TupleAsValue` if a tuple appears where a single value is
    ///   needed.
    pub fn resolve(&self, node: SyntaxNode) -> ParseResult<Node> {
        match node {
            SyntaxNode::Word { text, .. } => {
                Ok(self.literals()
                       .recognize(&text)
                       .map_or_else(|| Node::Var(Var::new(text)), Node::Constant))
            },
            SyntaxNode::Str { text, .. } => Ok(Node::Constant(Constant::new(text))),
            SyntaxNode::Prefix { symbol,
                                 column,
                                 operand, } => {
                let operands = spread(*operand);
                let operation =
                    self.grammar()
                        .prefix(&symbol, operands.len())
                        .ok_or_else(|| unknown_arity("Prefix", &symbol, &operands, column))?;
                self.apply(Rc::clone(operation), operands, column)
            },
            SyntaxNode::Postfix { symbol,
                                  column,
                                  operand, } => {
                let operands = spread(*operand);
                let operation =
                    self.grammar()
                        .postfix(&symbol, operands.len())
                        .ok_or_else(|| unknown_arity("Postfix", &symbol, &operands, column))?;
                self.apply(Rc::clone(operation), operands, column)
            },
            SyntaxNode::Infix { symbol,
                                column,
                                operand, } => {
                let operands = spread(*operand);
                let malformed = |details: String| ParseError::Malformed { details, column };
                let entry =
                    self.grammar()
                        .infix(&symbol)
                        .ok_or_else(|| malformed(format!("'{symbol}' is not an infix operator")))?;
                if operands.len() != 2 {
                    return Err(malformed(format!("'{symbol}' needs two operands")));
                }
                self.apply(Rc::clone(&entry.operation), operands, column)
            },
            SyntaxNode::Tuple { column, .. } => Err(ParseError::TupleAsValue { column }),
        }
    }

    fn apply(&self,
             operation: Rc<dyn Operation>,
             operands: Vec<SyntaxNode>,
             column: usize)
             -> ParseResult<Node> {
        let operands = operands.into_iter()
                               .map(|operand| self.resolve(operand))
                               .collect::<ParseResult<Vec<_>>>()?;
        Operator::new(operation, operands)
            .map(Node::Operator)
            .map_err(|e| ParseError::Malformed { details: e.to_string(),
                                                 column })
    }
}

fn unknown_arity(fixity: &'static str,
                 symbol: &str,
                 operands: &[SyntaxNode],
                 column: usize)
                 -> ParseError {
    ParseError::UnknownArity { fixity,
                               symbol: symbol.to_string(),
                               arity: operands.len(),
                               column }
}

/// An argument tuple supplies its elements; anything else is one operand.
fn spread(operand: SyntaxNode) -> Vec<SyntaxNode> {
    match operand {
        SyntaxNode::Tuple { elements, .. } => elements,
        single => vec![single],
    }
}
