/// Core evaluation state.
///
/// Contains the `EvalResult` alias and the `Environment` that maps variables
/// to their bindings.
pub mod core;

/// Semantic tree nodes.
///
/// Defines variables, operator nodes and the `Operation` trait every concrete
/// operator implements, plus small helpers operators use to evaluate their
/// operands.
pub mod node;
