use std::{fmt, rc::Rc};

use crate::{error::ConfigError, interpreter::evaluator::node::Operation};

/// A surface spelling bound to an operation.
#[derive(Clone)]
pub struct OperatorInfo {
    symbol:    String,
    operation: Rc<dyn Operation>,
}

impl OperatorInfo {
    /// Binds `symbol` to `operation`.
    ///
    /// # Example
    /// ```
    /// use std::rc::Rc;
    ///
    /// use opcalc::{grammar::operator::OperatorInfo, ops::basic::Plus};
    ///
    /// let plus = OperatorInfo::new("+", Rc::new(Plus));
    /// assert_eq!(plus.symbol(), "+");
    /// assert_eq!(plus.arity(), 2);
    /// ```
    pub fn new(symbol: impl Into<String>, operation: Rc<dyn Operation>) -> Self {
        Self { symbol: symbol.into(),
               operation }
    }

    /// Binds several spellings to one shared operation.
    #[must_use]
    pub fn spellings(operation: &Rc<dyn Operation>, symbols: &[&str]) -> Vec<Self> {
        symbols.iter()
               .map(|symbol| Self::new(*symbol, Rc::clone(operation)))
               .collect()
    }

    /// The spelling.
    #[must_use]
    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    /// The bound operation.
    #[must_use]
    pub const fn operation(&self) -> &Rc<dyn Operation> {
        &self.operation
    }

    /// The arity of the bound operation.
    #[must_use]
    pub fn arity(&self) -> usize {
        self.operation.arity()
    }
}

impl fmt::Debug for OperatorInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({}/{})", self.symbol, self.operation.name(), self.arity())
    }
}

/// Decides how operators of equal precedence group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Associativity {
    /// `a - b - c` reads as `(a - b) - c`.
    Left,
    /// `a ** b ** c` reads as `a ** (b ** c)`.
    Right,
}

/// Binary operators that share a precedence rank and an associativity.
#[derive(Debug, Clone)]
pub struct PrecedenceLayer {
    associativity: Associativity,
    operators:     Vec<OperatorInfo>,
}

impl PrecedenceLayer {
    /// Creates a layer.
    ///
    /// # Errors
    /// - `ConfigError::DuplicateLayerSymbol` if two operators share a
    ///   spelling.
    /// - `ConfigError::NonBinaryInfix` if an operator is not binary.
    pub fn new(associativity: Associativity,
               operators: Vec<OperatorInfo>)
               -> Result<Self, ConfigError> {
        for (i, op) in operators.iter().enumerate() {
            if operators[..i].iter().any(|other| other.symbol == op.symbol) {
                return Err(ConfigError::DuplicateLayerSymbol { symbol: op.symbol.clone() });
            }
            if op.arity() != 2 {
                return Err(ConfigError::NonBinaryInfix { symbol: op.symbol.clone(),
                                                         arity:  op.arity(), });
            }
        }
        Ok(Self { associativity,
                  operators })
    }

    /// Creates a left-associative layer.
    pub fn left(operators: Vec<OperatorInfo>) -> Result<Self, ConfigError> {
        Self::new(Associativity::Left, operators)
    }

    /// Creates a right-associative layer.
    pub fn right(operators: Vec<OperatorInfo>) -> Result<Self, ConfigError> {
        Self::new(Associativity::Right, operators)
    }

    /// How operators of this layer group.
    #[must_use]
    pub const fn associativity(&self) -> Associativity {
        self.associativity
    }

    /// The operators of the layer.
    #[must_use]
    pub fn operators(&self) -> &[OperatorInfo] {
        &self.operators
    }
}
