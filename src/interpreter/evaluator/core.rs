use std::collections::HashMap;

use tracing::debug;

use crate::{
    error::EvalError,
    interpreter::{
        evaluator::node::Var,
        value::{
            core::Constant,
            lvalue::{LValue, LValueRef},
        },
    },
};

/// Result type used by the evaluator.
///
/// All evaluation functions return either a value of type `T` or an
/// `EvalError` describing the failure.
pub type EvalResult<T> = Result<T, EvalError>;

/// Stores the variable bindings a semantic tree is evaluated against.
///
/// The environment maps variables to shared `LValue` cells. It is owned by the
/// caller and mutated in place by declaration and assignment operators, so
/// evaluating a tree that assigns is not idempotent.
///
/// Bindings are grouped by name and kept in declaration order. A scoped
/// variable only matches the binding made for its own scope or a naive one,
/// while a naive variable matches any binding of its name, so a naive lookup
/// resolves to the earliest declared binding of that name.
///
/// An environment is not `Clone`: its cells are shared handles, and a copy
/// would write through to the original.
///
/// ## Usage
///
/// `Environment` is created once and reused across evaluations:
///
/// ```
/// use opcalc::{defaults::advanced_parser, interpreter::evaluator::core::Environment};
///
/// let parser = advanced_parser(Vec::new(), Vec::new()).unwrap();
/// let mut env = Environment::new();
///
/// parser.parse("x := 2").unwrap().eval(&mut env).unwrap();
/// let value = parser.parse("x * 21").unwrap().eval(&mut env).unwrap();
/// assert_eq!(value.to_string(), "42");
/// ```
#[derive(Debug, Default)]
pub struct Environment {
    bindings: HashMap<String, Vec<(Var, LValueRef)>>,
}

impl Environment {
    /// Creates an empty environment.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a fresh binding for `var` holding `content`.
    ///
    /// # Errors
    /// Returns `EvalError::AlreadyDeclared` if a variable equal to `var` is
    /// already bound. A naive name therefore cannot be declared next to a
    /// scoped binding of the same name, and the other way round.
    ///
    /// # Example
    /// ```
    /// use opcalc::interpreter::{
    ///     evaluator::{core::Environment, node::Var},
    ///     value::core::Constant,
    /// };
    ///
    /// let mut env = Environment::new();
    /// env.declare(Var::scoped("x", "a"), Constant::new(1)).unwrap();
    /// env.declare(Var::scoped("x", "b"), Constant::new(2)).unwrap();
    /// assert!(env.declare(Var::new("x"), Constant::new(3)).is_err());
    /// ```
    pub fn declare(&mut self, var: Var, content: Constant) -> EvalResult<LValueRef> {
        if self.contains(&var) {
            return Err(EvalError::AlreadyDeclared { name: var.name().to_string() });
        }
        debug!(var = %var, content = %content, "declare");
        let lv = LValue::new(var.clone(), content).into_ref();
        self.insert(var, lv.clone());
        Ok(lv)
    }

    /// Makes `var` an alias of an existing binding.
    ///
    /// # Errors
    /// Returns `EvalError::AlreadyDeclared` if `var` is already bound.
    pub fn bind(&mut self, var: Var, lv: LValueRef) -> EvalResult<LValueRef> {
        if self.contains(&var) {
            return Err(EvalError::AlreadyDeclared { name: var.name().to_string() });
        }
        debug!(var = %var, target = %lv.borrow().var(), "bind reference");
        self.insert(var, lv.clone());
        Ok(lv)
    }

    fn insert(&mut self, var: Var, lv: LValueRef) {
        self.bindings.entry(var.name().to_string()).or_default().push((var, lv));
    }

    /// Returns the earliest declared binding equal to `var`, if any.
    #[must_use]
    pub fn get(&self, var: &Var) -> Option<LValueRef> {
        self.bindings
            .get(var.name())?
            .iter()
            .find(|(bound, _)| bound == var)
            .map(|(_, lv)| lv.clone())
    }

    /// Returns the binding of the naive variable called `name`, which is the
    /// earliest declared binding of that name whatever its scope.
    #[must_use]
    pub fn lookup(&self, name: &str) -> Option<LValueRef> {
        self.get(&Var::new(name))
    }

    /// Returns `true` if `var` is bound.
    #[must_use]
    pub fn contains(&self, var: &Var) -> bool {
        self.get(var).is_some()
    }

    /// Removes the earliest declared binding equal to `var` and returns it.
    pub fn remove(&mut self, var: &Var) -> Option<LValueRef> {
        let entries = self.bindings.get_mut(var.name())?;
        let index = entries.iter().position(|(bound, _)| bound == var)?;
        let (_, lv) = entries.remove(index);
        if entries.is_empty() {
            self.bindings.remove(var.name());
        }
        Some(lv)
    }

    /// Number of bindings.
    #[must_use]
    pub fn len(&self) -> usize {
        self.bindings.values().map(Vec::len).sum()
    }

    /// Returns `true` if nothing is bound.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    /// Iterates over all bindings. Names come in arbitrary order, bindings of
    /// one name in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (&Var, &LValueRef)> {
        self.bindings.values().flatten().map(|(var, lv)| (var, lv))
    }

    /// Returns a copy of the current values keyed by name alone.
    ///
    /// Scopes are dropped; when several variables share a name, the earliest
    /// declared one wins, as in [`Environment::lookup`].
    #[must_use]
    pub fn flatten(&self) -> HashMap<String, Constant> {
        self.bindings
            .iter()
            .filter_map(|(name, entries)| {
                entries.first()
                       .map(|(_, lv)| (name.clone(), lv.borrow().content().clone()))
            })
            .collect()
    }
}
