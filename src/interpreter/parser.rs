/// The parser state machine.
///
/// Defines `Parser` and its `parse` entry points. Tokens are consumed by a
/// three state machine driving an operator stack and an operand stack.
pub mod core;
/// Semantic resolution.
///
/// Binds syntax tree operators to the operations of the grammar, picking
/// prefix and postfix overloads by operand count, and turns words into
/// constants or variables.
pub mod semantic;
/// Syntax tree nodes and stack reductions.
///
/// Declares the operand and operator stack entries and the merge rules that
/// combine them, including tuple construction for commas.
pub mod syntax;
