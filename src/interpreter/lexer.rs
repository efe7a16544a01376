/// The tokenizer state machine.
///
/// Defines `Token`, `TokenKind` and the `Lexer`, which walks the source text
/// one character at a time and emits words, string literals and symbols, each
/// tagged with the column it starts at.
pub mod core;
/// Literal recognition for words.
///
/// A `logos` scanner for boolean, wildcard, decimal and imaginary literals,
/// plus the `LiteralRecognizer` hook the parser consults for every word that
/// is not an operator.
pub mod literal;
/// Symbol run decomposition.
///
/// Splits runs such as `**-` into registered operator spellings, trying the
/// longest prefix first and caching every answer.
pub mod symbols;
