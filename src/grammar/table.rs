use std::{
    collections::{HashMap, HashSet},
    rc::Rc,
};

use crate::{
    error::ConfigError,
    grammar::operator::{Associativity, OperatorInfo, PrecedenceLayer},
    interpreter::evaluator::node::Operation,
};

/// What the parser needs to know about an infix spelling.
#[derive(Debug, Clone)]
pub struct InfixEntry {
    /// The binary operation.
    pub operation:     Rc<dyn Operation>,
    /// The rank of its layer; smaller ranks bind tighter.
    pub precedence:    i32,
    /// The associativity of its layer.
    pub associativity: Associativity,
}

/// The validated operator tables of a grammar.
///
/// Infix spellings map to a single binary operation. Prefix and postfix
/// spellings may be overloaded by arity, so they are keyed by
/// `(symbol, arity)`.
#[derive(Debug, Default, Clone)]
pub struct Grammar {
    infix:   HashMap<String, InfixEntry>,
    prefix:  HashMap<(String, usize), Rc<dyn Operation>>,
    postfix: HashMap<(String, usize), Rc<dyn Operation>>,
}

impl Grammar {
    /// Builds the tables.
    ///
    /// # Parameters
    /// - `prefix`: Prefix operators, possibly several per spelling.
    /// - `postfix`: Postfix operators, possibly several per spelling.
    /// - `table`: Precedence layers keyed by rank.
    ///
    /// # Errors
    /// - `ConfigError::DuplicateRank` if two layers share a rank.
    /// - `ConfigError::DuplicateInfix` if two layers share a spelling.
    /// - `ConfigError::DuplicateOverload` if a prefix or postfix spelling is
    ///   registered twice with the same arity.
    /// - `ConfigError::InfixPostfixClash` if a spelling is both infix and
    ///   postfix.
    pub fn new(prefix: Vec<OperatorInfo>,
               postfix: Vec<OperatorInfo>,
               table: Vec<(i32, PrecedenceLayer)>)
               -> Result<Self, ConfigError> {
        let mut grammar = Self::default();

        let mut ranks = HashSet::new();
        for (rank, layer) in table {
            if !ranks.insert(rank) {
                return Err(ConfigError::DuplicateRank { rank });
            }
            for op in layer.operators() {
                let entry = InfixEntry { operation:     Rc::clone(op.operation()),
                                         precedence:    rank,
                                         associativity: layer.associativity(), };
                if grammar.infix.insert(op.symbol().to_string(), entry).is_some() {
                    return Err(ConfigError::DuplicateInfix { symbol: op.symbol().to_string() });
                }
            }
        }

        Self::register(&mut grammar.prefix, prefix, "prefix")?;

        if let Some(op) = postfix.iter().find(|op| grammar.infix.contains_key(op.symbol())) {
            return Err(ConfigError::InfixPostfixClash { symbol: op.symbol().to_string() });
        }
        Self::register(&mut grammar.postfix, postfix, "postfix")?;

        Ok(grammar)
    }

    fn register(map: &mut HashMap<(String, usize), Rc<dyn Operation>>,
                operators: Vec<OperatorInfo>,
                fixity: &'static str)
                -> Result<(), ConfigError> {
        for op in operators {
            let key = (op.symbol().to_string(), op.arity());
            if map.contains_key(&key) {
                return Err(ConfigError::DuplicateOverload { fixity,
                                                            symbol: key.0,
                                                            arity: key.1 });
            }
            map.insert(key, Rc::clone(op.operation()));
        }
        Ok(())
    }

    /// Looks up an infix spelling.
    #[must_use]
    pub fn infix(&self, symbol: &str) -> Option<&InfixEntry> {
        self.infix.get(symbol)
    }

    /// Looks up the prefix overload of `symbol` taking `arity` operands.
    #[must_use]
    pub fn prefix(&self, symbol: &str, arity: usize) -> Option<&Rc<dyn Operation>> {
        self.prefix.get(&(symbol.to_string(), arity))
    }

    /// Looks up the postfix overload of `symbol` taking `arity` operands.
    #[must_use]
    pub fn postfix(&self, symbol: &str, arity: usize) -> Option<&Rc<dyn Operation>> {
        self.postfix.get(&(symbol.to_string(), arity))
    }

    /// Returns `true` if some prefix overload uses `symbol`.
    #[must_use]
    pub fn is_prefix(&self, symbol: &str) -> bool {
        self.prefix.keys().any(|(s, _)| s == symbol)
    }

    /// Returns `true` if some postfix overload uses `symbol`.
    #[must_use]
    pub fn is_postfix(&self, symbol: &str) -> bool {
        self.postfix.keys().any(|(s, _)| s == symbol)
    }

    /// Returns `true` if `symbol` is any kind of operator.
    #[must_use]
    pub fn is_operator(&self, symbol: &str) -> bool {
        self.infix.contains_key(symbol) || self.is_prefix(symbol) || self.is_postfix(symbol)
    }

    /// Every distinct operator spelling.
    #[must_use]
    pub fn spellings(&self) -> Vec<&str> {
        let mut spellings: Vec<&str> = self.infix
                                           .keys()
                                           .chain(self.prefix.keys().map(|(s, _)| s))
                                           .chain(self.postfix.keys().map(|(s, _)| s))
                                           .map(String::as_str)
                                           .collect();
        spellings.sort_unstable();
        spellings.dedup();
        spellings
    }
}
