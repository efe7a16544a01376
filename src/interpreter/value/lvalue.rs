use std::{cell::RefCell, fmt, rc::Rc};

use crate::interpreter::{evaluator::node::Var, value::core::Constant};

/// Shared handle to a binding.
///
/// The environment owns the binding; reference declarations may make several
/// variables point at the same cell.
pub type LValueRef = Rc<RefCell<LValue>>;

/// A mutable binding cell.
///
/// An `LValue` owns exactly one constant slot and remembers the variable that
/// introduced it.
#[derive(Debug)]
pub struct LValue {
    var:     Var,
    content: Constant,
}

impl LValue {
    /// Creates a binding of `var` holding `content`.
    #[must_use]
    pub const fn new(var: Var, content: Constant) -> Self {
        Self { var, content }
    }

    /// Wraps the binding into a shared handle.
    #[must_use]
    pub fn into_ref(self) -> LValueRef {
        Rc::new(RefCell::new(self))
    }

    /// The variable that introduced the binding.
    #[must_use]
    pub const fn var(&self) -> &Var {
        &self.var
    }

    /// The constant currently held.
    #[must_use]
    pub const fn content(&self) -> &Constant {
        &self.content
    }

    /// Replaces the held constant.
    pub fn set_content(&mut self, content: Constant) {
        self.content = content;
    }
}

impl fmt::Display for LValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<{}: {}>", self.var, self.content)
    }
}
