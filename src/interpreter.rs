/// The evaluator module runs semantic trees.
///
/// It defines the semantic tree nodes, the `Operation` trait that concrete
/// operators implement, and the `Environment` that holds variable bindings.
///
/// # Responsibilities
/// - Evaluates constants, variables and operator nodes.
/// - Resolves variables to their bindings or reports them as undefined.
/// - Collects the variables a tree refers to.
pub mod evaluator;
/// The lexer module tokenizes source text for the parser.
///
/// The lexer reads the raw text one character at a time and produces words,
/// string literals and operator symbols, each tagged with its column.
///
/// # Responsibilities
/// - Handles quoted literals with escapes.
/// - Splits symbol runs into registered operator spellings.
/// - Recognizes boolean, wildcard and numeric literal words.
pub mod lexer;
/// The parser module builds semantic trees from tokens.
///
/// An operator-precedence parser turns the token stream into a syntax tree
/// and then binds every operator to its implementation.
///
/// # Responsibilities
/// - Applies precedence, associativity and operator fixity.
/// - Builds argument tuples for multi-operand operators.
/// - Reports structural errors with the column of the offending token.
pub mod parser;
/// The value module defines the runtime data types for evaluation.
///
/// This module declares the complex numbers, the constants and the mutable
/// bindings evaluation produces, along with the casts between constant types.
///
/// # Responsibilities
/// - Defines `Constant`, `Value` and `LValue`.
/// - Implements casts between numbers, booleans and strings.
/// - Tracks the dummy flag of placeholder constants.
pub mod value;
