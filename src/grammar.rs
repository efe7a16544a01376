/// Parser construction.
///
/// `GrammarBuilder` gathers operator tables, glyphs, character classes and the
/// literal hook, validates them and produces a ready `Parser`.
pub mod builder;
/// Reserved glyphs and character classes.
///
/// Declares the punctuation, quote and escape glyphs the lexer and parser
/// reserve, and the pluggable predicates that sort characters into spaces,
/// word characters and symbol characters.
pub mod glyphs;
/// Operator spellings and precedence layers.
///
/// Binds surface symbols to operations and groups binary operators into
/// ranked layers with an associativity.
pub mod operator;
/// Validated operator tables.
///
/// Indexes infix operators by spelling and prefix or postfix operators by
/// spelling and arity, rejecting ambiguous or duplicate registrations.
pub mod table;
