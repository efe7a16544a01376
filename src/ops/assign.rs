use tracing::debug;

use crate::{
    error::EvalError,
    interpreter::{
        evaluator::{
            core::{Environment, EvalResult},
            node::{Node, Operation, Var, eval_constant, operand},
        },
        value::core::Value,
    },
};

/// Returns the variable named by operand 0 without evaluating it.
fn target<'a>(operation: &dyn Operation, operands: &'a [Node]) -> EvalResult<&'a Var> {
    match operand(operation, operands, 0)? {
        Node::Var(var) => Ok(var),
        _ => Err(EvalError::ExpectedVariable { operator: operation.name() }),
    }
}

/// `a = b`: stores `b` into the existing binding `a`.
///
/// The right side is evaluated after the left, and the stored constant loses
/// its dummy flag. The binding itself is returned, so assignments chain.
///
/// # Example
/// ```
/// use opcalc::{defaults::advanced_parser, evaluate, interpreter::evaluator::core::Environment};
///
/// let parser = advanced_parser(Vec::new(), Vec::new()).unwrap();
/// let mut env = Environment::new();
/// evaluate(&parser, "a := 1; b := 2", &mut env).unwrap();
/// evaluate(&parser, "a = b = 7", &mut env).unwrap();
/// assert_eq!(env.lookup("a").unwrap().borrow().content().to_string(), "7");
/// assert_eq!(env.lookup("b").unwrap().borrow().content().to_string(), "7");
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct Assign;

impl Operation for Assign {
    fn name(&self) -> &'static str {
        "Assign"
    }

    fn arity(&self) -> usize {
        2
    }

    fn eval(&self, operands: &[Node], env: &mut Environment) -> EvalResult<Value> {
        let Value::LValue(lv) = operand(self, operands, 0)?.eval(env)? else {
            return Err(EvalError::NotAnLValue { operator: self.name() });
        };
        let content = eval_constant(self, operands, 1, env)?.without_dummy();
        debug!(var = %lv.borrow().var(), content = %content, "assign");
        lv.borrow_mut().set_content(content);
        Ok(Value::LValue(lv))
    }
}

/// `a := b`: declares a fresh binding `a` holding `b`.
///
/// The right side is evaluated first, so it cannot refer to the variable
/// being declared.
#[derive(Debug, Clone, Copy, Default)]
pub struct Declare;

impl Operation for Declare {
    fn name(&self) -> &'static str {
        "Declare"
    }

    fn arity(&self) -> usize {
        2
    }

    fn eval(&self, operands: &[Node], env: &mut Environment) -> EvalResult<Value> {
        let var = target(self, operands)?.clone();
        let content = eval_constant(self, operands, 1, env)?.without_dummy();
        env.declare(var, content).map(Value::LValue)
    }
}

/// `a :=& b`: declares `a` as another name for the binding `b` evaluates to.
///
/// # Example
/// ```
/// use opcalc::{defaults::advanced_parser, evaluate, interpreter::evaluator::core::Environment};
///
/// let parser = advanced_parser(Vec::new(), Vec::new()).unwrap();
/// let mut env = Environment::new();
/// evaluate(&parser, "x := 1; y :=& x; y = 5", &mut env).unwrap();
/// assert_eq!(evaluate(&parser, "x", &mut env).unwrap().to_string(), "<x: 5>");
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct DeclareReference;

impl Operation for DeclareReference {
    fn name(&self) -> &'static str {
        "DeclareReference"
    }

    fn arity(&self) -> usize {
        2
    }

    fn eval(&self, operands: &[Node], env: &mut Environment) -> EvalResult<Value> {
        let var = target(self, operands)?.clone();
        let Value::LValue(lv) = operand(self, operands, 1)?.eval(env)? else {
            return Err(EvalError::NotAnLValue { operator: self.name() });
        };
        env.bind(var, lv).map(Value::LValue)
    }
}
