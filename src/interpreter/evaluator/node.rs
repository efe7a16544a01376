use std::{
    fmt,
    hash::{Hash, Hasher},
    rc::Rc,
};

use crate::{
    error::EvalError,
    interpreter::{
        evaluator::core::{Environment, EvalResult},
        value::core::{Constant, ConstantValue, Value},
    },
};

/// A variable reference.
///
/// Variables without a scope are *naive*: they compare equal to any variable
/// of the same name. Two scoped variables are only equal when their scopes
/// match as well.
#[derive(Debug, Clone)]
pub struct Var {
    name:  String,
    scope: Option<String>,
}

impl Var {
    /// Creates a naive variable.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self { name:  name.into(),
               scope: None, }
    }

    /// Creates a variable bound to `scope`.
    #[must_use]
    pub fn scoped(name: impl Into<String>, scope: impl Into<String>) -> Self {
        Self { name:  name.into(),
               scope: Some(scope.into()), }
    }

    /// The variable name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The scope, if any.
    #[must_use]
    pub fn scope(&self) -> Option<&str> {
        self.scope.as_deref()
    }

    /// Replaces the scope.
    pub fn set_scope(&mut self, scope: Option<String>) {
        self.scope = scope;
    }

    /// Resolves the variable through the environment.
    ///
    /// # Errors
    /// Returns `EvalError::UndefinedVariable` if nothing binds the name.
    pub fn eval(&self, env: &Environment) -> EvalResult<Value> {
        env.get(self)
           .map(Value::LValue)
           .ok_or_else(|| EvalError::UndefinedVariable { name: self.name.clone() })
    }
}

impl PartialEq for Var {
    fn eq(&self, other: &Self) -> bool {
        if self.name != other.name {
            return false;
        }
        match (&self.scope, &other.scope) {
            (Some(a), Some(b)) => a == b,
            _ => true,
        }
    }
}

impl Eq for Var {}

// Naive variables equal scoped ones, so only the name may feed the hash.
impl Hash for Var {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.name.hash(state);
    }
}

impl fmt::Display for Var {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.scope {
            None => write!(f, "{}", self.name),
            Some(scope) => write!(f, "<{scope}.{}>", self.name),
        }
    }
}

/// The behaviour of an operator, independent of its spelling.
///
/// A grammar maps `(symbol, arity)` pairs to shared `Operation`s; the parser
/// then pairs an operation with exactly `arity()` operand nodes.
///
/// Implementations receive the operand nodes unevaluated, so they decide
/// which operands to evaluate, in what order, and how often. Computed
/// constants must come back with their dummy flag cleared unless the operation
/// is a pure pass-through.
pub trait Operation: fmt::Debug {
    /// A readable name used in errors and tree dumps.
    fn name(&self) -> &'static str;
    /// The fixed number of operands.
    fn arity(&self) -> usize;
    /// Evaluates the operation over its operands.
    fn eval(&self, operands: &[Node], env: &mut Environment) -> EvalResult<Value>;
}

/// An operation applied to its operands.
#[derive(Clone)]
pub struct Operator {
    operation: Rc<dyn Operation>,
    operands:  Vec<Node>,
}

impl Operator {
    /// Applies `operation` to `operands`.
    ///
    /// # Errors
    /// Returns `EvalError::ArityMismatch` if the operand count differs from
    /// the declared arity.
    pub fn new(operation: Rc<dyn Operation>, operands: Vec<Node>) -> EvalResult<Self> {
        if operands.len() != operation.arity() {
            return Err(EvalError::ArityMismatch { operator: operation.name(),
                                                  expected: operation.arity(),
                                                  found:    operands.len(), });
        }
        Ok(Self { operation, operands })
    }

    /// The operation applied by this node.
    #[must_use]
    pub const fn operation(&self) -> &Rc<dyn Operation> {
        &self.operation
    }

    /// The operand nodes.
    #[must_use]
    pub fn operands(&self) -> &[Node] {
        &self.operands
    }

    /// Evaluates the operator against `env`.
    pub fn eval(&self, env: &mut Environment) -> EvalResult<Value> {
        self.operation.eval(&self.operands, env)
    }
}

impl fmt::Debug for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{self}")
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}(", self.operation.name())?;
        for (i, operand) in self.operands.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{operand}")?;
        }
        write!(f, ")")
    }
}

/// A node of the semantic tree.
///
/// Semantic trees are immutable once parsed and can be evaluated any number
/// of times, against the same or different environments.
#[derive(Debug, Clone)]
pub enum Node {
    /// An operation with its operands.
    Operator(Operator),
    /// A literal constant.
    Constant(Constant),
    /// A variable reference.
    Var(Var),
}

impl Node {
    /// Evaluates the node.
    ///
    /// Constants evaluate to themselves, variables to the binding the
    /// environment holds for them, and operators to whatever their operation
    /// returns.
    ///
    /// # Example
    /// ```
    /// use opcalc::{defaults::basic_parser, interpreter::evaluator::core::Environment};
    ///
    /// let parser = basic_parser().unwrap();
    /// let tree = parser.parse("3 + 5 * 6").unwrap();
    /// let value = tree.eval(&mut Environment::new()).unwrap();
    /// assert_eq!(value.to_string(), "33");
    /// ```
    pub fn eval(&self, env: &mut Environment) -> EvalResult<Value> {
        match self {
            Self::Operator(op) => op.eval(env),
            Self::Constant(c) => Ok(Value::Constant(c.clone())),
            Self::Var(var) => var.eval(env),
        }
    }

    /// Calls `f` for every variable reachable from this node, depth first.
    pub fn visit_vars(&self, f: &mut impl FnMut(&Var)) {
        match self {
            Self::Operator(op) => {
                for operand in &op.operands {
                    operand.visit_vars(f);
                }
            },
            Self::Constant(_) => {},
            Self::Var(var) => f(var),
        }
    }

    /// Collects the distinct variables referenced by the tree, in order of
    /// first appearance.
    #[must_use]
    pub fn collect_vars(&self) -> Vec<Var> {
        let mut vars: Vec<Var> = Vec::new();
        self.visit_vars(&mut |var| {
                if !vars.contains(var) {
                    vars.push(var.clone());
                }
            });
        vars
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Operator(op) => write!(f, "{op}"),
            Self::Constant(c) => match c.value() {
                ConstantValue::Str(s) => write!(f, "{s:?}"),
                _ => write!(f, "{c}"),
            },
            Self::Var(var) => write!(f, "{var}"),
        }
    }
}

impl From<Constant> for Node {
    fn from(c: Constant) -> Self {
        Self::Constant(c)
    }
}

impl From<Var> for Node {
    fn from(var: Var) -> Self {
        Self::Var(var)
    }
}

impl From<Operator> for Node {
    fn from(op: Operator) -> Self {
        Self::Operator(op)
    }
}

/// Returns operand `index`.
///
/// # Errors
/// Returns `EvalError::ArityMismatch` if the slice is too short, which only
/// happens when an operation is driven by hand with too few operands.
pub fn operand<'a>(operation: &dyn Operation,
                   operands: &'a [Node],
                   index: usize)
                   -> EvalResult<&'a Node> {
    operands.get(index)
            .ok_or(EvalError::ArityMismatch { operator: operation.name(),
                                              expected: operation.arity(),
                                              found:    operands.len(), })
}

/// Evaluates operand `index` and extracts its constant.
pub fn eval_constant(operation: &dyn Operation,
                     operands: &[Node],
                     index: usize,
                     env: &mut Environment)
                     -> EvalResult<Constant> {
    Ok(operand(operation, operands, index)?.eval(env)?.into_constant())
}

/// Evaluates the first two operands, left to right, and extracts their
/// constants.
pub fn eval_pair(operation: &dyn Operation,
                 operands: &[Node],
                 env: &mut Environment)
                 -> EvalResult<(Constant, Constant)> {
    let a = eval_constant(operation, operands, 0, env)?;
    let b = eval_constant(operation, operands, 1, env)?;
    Ok((a, b))
}
