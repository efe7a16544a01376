/// Complex number support.
///
/// Defines the `ComplexNumber` type that backs every number of the language.
/// Reals are complex numbers with a zero imaginary part.
pub mod complex;
/// Constants and evaluation results.
///
/// Declares the `Constant` type, its closed set of payloads and the cast table
/// between them, plus the `Value` enum returned by evaluation.
pub mod core;
/// Mutable bindings.
///
/// Defines the `LValue` cell a variable resolves to once it is declared.
pub mod lvalue;
