use std::rc::Rc;

use opcalc::{
    defaults::{advanced_parser, basic_parser},
    error::{ConfigError, EvalError, LexError, ParseError},
    grammar::{
        builder::GrammarBuilder,
        glyphs::{CharClasses, Glyphs},
        operator::{OperatorInfo, PrecedenceLayer},
    },
    interpreter::{
        evaluator::{
            core::{Environment, EvalResult},
            node::{Node, Operation, Operator, Var},
        },
        lexer::{
            core::TokenKind,
            literal::{DefaultLiterals, LiteralRecognizer},
        },
        parser::core::Parser,
        value::core::{Constant, Value},
    },
    ops::{
        basic::{Concat, Minus, Multiply, Negative, Not, Plus},
        num::Factorial,
    },
};
use pretty_assertions::assert_eq;

/// Always evaluates to zero; used to register a nullary overload.
#[derive(Debug)]
struct Zero;

impl Operation for Zero {
    fn name(&self) -> &'static str {
        "Zero"
    }

    fn arity(&self) -> usize {
        0
    }

    fn eval(&self, _: &[Node], _: &mut Environment) -> EvalResult<Value> {
        Ok(Constant::new(0).into())
    }
}

/// Reads `0x..` words as hexadecimal numbers.
#[derive(Debug)]
struct HexLiterals;

impl LiteralRecognizer for HexLiterals {
    fn recognize(&self, word: &str) -> Option<Constant> {
        match word.strip_prefix("0x") {
            Some(digits) => {
                u32::from_str_radix(digits, 16).ok().map(|n| Constant::new(f64::from(n)))
            },
            None => DefaultLiterals.recognize(word),
        }
    }
}

fn op(symbol: &str, operation: impl Operation + 'static) -> OperatorInfo {
    OperatorInfo::new(symbol, Rc::new(operation))
}

fn arithmetic() -> GrammarBuilder {
    GrammarBuilder::new().layer(10, PrecedenceLayer::left(vec![op("*", Multiply)]).unwrap())
                         .layer(20,
                                PrecedenceLayer::left(vec![op("+", Plus),
                                                           op("-", Minus),
                                                           op(".", Concat)]).unwrap())
                         .prefix(op("-", Negative))
}

fn parse_error(parser: &Parser, src: &str) -> ParseError {
    match parser.parse(src) {
        Ok(tree) => panic!("{src:?} parsed as {tree} but was expected to fail"),
        Err(e) => e,
    }
}

fn eval(parser: &Parser, src: &str) -> String {
    parser.parse(src)
          .unwrap_or_else(|e| panic!("{src:?} failed to parse: {e}"))
          .eval(&mut Environment::new())
          .unwrap_or_else(|e| panic!("{src:?} failed to evaluate: {e}"))
          .to_string()
}

#[test]
fn layers_reject_duplicates_and_non_binary_operators() {
    let err = PrecedenceLayer::left(vec![op("+", Plus), op("+", Minus)]).unwrap_err();
    assert_eq!(err, ConfigError::DuplicateLayerSymbol { symbol: "+".to_string() });

    let err = PrecedenceLayer::left(vec![op("~", Not)]).unwrap_err();
    assert_eq!(err,
               ConfigError::NonBinaryInfix { symbol: "~".to_string(),
                                             arity:  1, });
}

#[test]
fn operator_tables_are_validated() {
    let err = GrammarBuilder::new().layer(10, PrecedenceLayer::left(vec![op("+", Plus)]).unwrap())
                                   .layer(20, PrecedenceLayer::left(vec![op("+", Minus)]).unwrap())
                                   .build()
                                   .unwrap_err();
    assert_eq!(err, ConfigError::DuplicateInfix { symbol: "+".to_string() });

    let err = arithmetic().layer(10, PrecedenceLayer::left(vec![op("//", Minus)]).unwrap())
                          .build()
                          .unwrap_err();
    assert_eq!(err, ConfigError::DuplicateRank { rank: 10 });

    let err = arithmetic().prefix(op("-", Not)).build().unwrap_err();
    assert_eq!(err,
               ConfigError::DuplicateOverload { fixity: "prefix",
                                                symbol: "-".to_string(),
                                                arity:  1, });

    let err = arithmetic().layer(30, PrecedenceLayer::left(vec![op("!", Minus)]).unwrap())
                          .postfix(op("!", Factorial))
                          .build()
                          .unwrap_err();
    assert_eq!(err, ConfigError::InfixPostfixClash { symbol: "!".to_string() });
}

#[test]
fn spellings_are_validated() {
    let err = arithmetic().prefix(op("+(", Negative)).build().unwrap_err();
    assert_eq!(err,
               ConfigError::ReservedGlyph { symbol: "+(".to_string(),
                                            glyph:  '(', });

    let err = arithmetic().prefix(op("neg-", Negative)).build().unwrap_err();
    assert_eq!(err, ConfigError::MixedSymbol { symbol: "neg-".to_string() });

    let err = arithmetic().prefix(op("", Negative)).build().unwrap_err();
    assert_eq!(err, ConfigError::EmptySymbol);

    let err = arithmetic().prefix(op("a b", Negative)).build().unwrap_err();
    assert_eq!(err, ConfigError::SymbolWithSpace { symbol: "a b".to_string() });
}

#[test]
fn glyphs_are_validated() {
    let glyphs = Glyphs { comma: '(',
                          ..Glyphs::default() };
    let err = arithmetic().glyphs(glyphs).build().unwrap_err();
    assert_eq!(err,
               ConfigError::GlyphClash { glyph:  '(',
                                         first:  "left parenthesis",
                                         second: "comma", });

    let classes = CharClasses::default().with_word(|c| c.is_alphanumeric() || c == ',');
    let err = arithmetic().char_classes(classes).build().unwrap_err();
    assert_eq!(err,
               ConfigError::GlyphClass { glyph:    ',',
                                         role:     "comma",
                                         expected: "a symbol character", });
}

#[test]
fn built_in_grammars_are_valid() {
    assert!(basic_parser().is_ok());
    assert!(advanced_parser(Vec::new(), Vec::new()).is_ok());

    let err = advanced_parser(vec![op("abs", Negative)], Vec::new()).unwrap_err();
    assert_eq!(err,
               ConfigError::DuplicateOverload { fixity: "prefix",
                                                symbol: "abs".to_string(),
                                                arity:  1, });
}

#[test]
fn prefix_overloads_are_chosen_by_arity() {
    let parser = arithmetic().prefix(op("f", Zero))
                             .prefix(op("f", Negative))
                             .prefix(op("add", Plus))
                             .build()
                             .unwrap();

    assert_eq!(parser.parse("f()").unwrap().to_string(), "Zero()");
    assert_eq!(parser.parse("f(3)").unwrap().to_string(), "Negative(3)");
    assert_eq!(parser.parse("f 3").unwrap().to_string(), "Negative(3)");
    assert_eq!(parser.parse("add(1, 2 * 3)").unwrap().to_string(), "Plus(1, Multiply(2, 3))");
    assert_eq!(eval(&parser, "f() + add(1, 2) * 2"), "6");

    assert_eq!(parse_error(&parser, "f(1, 2)"),
               ParseError::UnknownArity { fixity: "Prefix",
                                          symbol: "f".to_string(),
                                          arity:  2,
                                          column: 1, });
    assert_eq!(parse_error(&parser, "1 + add(1)"),
               ParseError::UnknownArity { fixity: "Prefix",
                                          symbol: "add".to_string(),
                                          arity:  1,
                                          column: 5, });
}

#[test]
fn postfix_operators_take_argument_tuples() {
    let parser = arithmetic().postfix(op("sum", Plus))
                             .postfix(op("!", Factorial))
                             .build()
                             .unwrap();

    assert_eq!(parser.parse("(2, 3) sum").unwrap().to_string(), "Plus(2, 3)");
    assert_eq!(eval(&parser, "(2, 3) sum * 2"), "10");
    assert_eq!(eval(&parser, "3! !"), "720");
    assert_eq!(parse_error(&parser, "4 sum"),
               ParseError::UnknownArity { fixity: "Postfix",
                                          symbol: "sum".to_string(),
                                          arity:  1,
                                          column: 3, });
}

#[test]
fn structural_errors_point_at_the_right_column() {
    let parser = basic_parser().unwrap();

    assert_eq!(parse_error(&parser, ""), ParseError::EmptyInput { column: 1 });
    assert_eq!(parse_error(&parser, "   "), ParseError::EmptyInput { column: 4 });
    assert_eq!(parse_error(&parser, "1 +"),
               ParseError::DanglingOperator { symbol: "+".to_string(),
                                              column: 3, });
    assert_eq!(parse_error(&parser, "-"),
               ParseError::DanglingOperator { symbol: "-".to_string(),
                                              column: 1, });
    assert_eq!(parse_error(&parser, "5*"),
               ParseError::DanglingOperator { symbol: "*".to_string(),
                                              column: 2, });
    assert_eq!(parse_error(&parser, "*5"),
               ParseError::UnexpectedToken { token:    "*".to_string(),
                                             expected: "a value",
                                             column:   1, });
    assert_eq!(parse_error(&parser, "42)"), ParseError::UnmatchedClose { column: 3 });
    assert_eq!(parse_error(&parser, ")"), ParseError::UnmatchedClose { column: 1 });
    assert_eq!(parse_error(&parser, "(1"), ParseError::UnclosedParen { column: 1 });
    assert_eq!(parse_error(&parser, "2 * (1"), ParseError::UnclosedParen { column: 5 });
    assert_eq!(parse_error(&parser, "1 2"),
               ParseError::UnexpectedToken { token:    "2".to_string(),
                                             expected: "an infix or postfix operator",
                                             column:   3, });
    assert_eq!(parse_error(&parser, "1 + * 2"),
               ParseError::UnexpectedToken { token:    "*".to_string(),
                                             expected: "a value",
                                             column:   5, });
}

#[test]
fn tuples_are_only_argument_lists() {
    let parser = basic_parser().unwrap();

    assert_eq!(parse_error(&parser, "1, 2"), ParseError::CommaOutsideGroup { column: 2 });
    assert_eq!(parse_error(&parser, "foo, bar"), ParseError::CommaOutsideGroup { column: 4 });
    assert_eq!(parse_error(&parser, "(1, 2)"), ParseError::BareTuple { column: 1 });
    assert_eq!(parse_error(&parser, "()"), ParseError::BareTuple { column: 1 });
    assert_eq!(parse_error(&parser, "(1,)"), ParseError::TrailingComma { column: 3 });
    assert_eq!(parse_error(&parser, "((1, 2), 3)"), ParseError::NestedTuple { column: 2 });
    assert_eq!(parse_error(&parser, "(1, (2, 3))"), ParseError::NestedTuple { column: 5 });
    assert_eq!(parse_error(&parser, "1 + (2, 3)"), ParseError::TupleAsValue { column: 5 });
    assert_eq!(parse_error(&parser, "-(1, 2)"),
               ParseError::UnknownArity { fixity: "Prefix",
                                          symbol: "-".to_string(),
                                          arity:  2,
                                          column: 1, });

    // Redundant parentheses around a single value are not tuples.
    assert_eq!(parser.parse("((1)) + (2)").unwrap().to_string(), "Plus(1, 2)");
}

#[test]
fn lexing_errors_surface_through_the_parser() {
    let parser = basic_parser().unwrap();

    let err = parse_error(&parser, "'abc");
    assert_eq!(err, ParseError::Lex(LexError::UnterminatedQuote { column: 1 }));
    assert_eq!(err.column(), 1);

    let err = parse_error(&parser, "1 @ 2");
    assert_eq!(err,
               ParseError::Lex(LexError::UnknownSymbols { symbols: "@".to_string(),
                                                          column:  3, }));
    assert_eq!(err.to_string(), "At column 3: Cannot split the symbols '@' into known operators.");
}

#[test]
fn symbol_runs_split_with_backtracking() {
    let parser = basic_parser().unwrap();

    assert_eq!(parser.parse("1 *- 2").unwrap().to_string(), "Multiply(1, Negative(2))");
    assert_eq!(parser.parse("1<-2").unwrap().to_string(), "Less(1, Negative(2))");
    assert_eq!(parser.parse("1<->2").unwrap().to_string(), "Iff(1, 2)");
    assert_eq!(parser.parse("-(-1)").unwrap().to_string(), "Negative(Negative(1))");
}

#[test]
fn symbol_decompositions_are_memoized() {
    let parser = basic_parser().unwrap();
    let symbols = parser.lexer().symbols();
    assert_eq!(symbols.cached(), 0);

    parser.parse("1 *- 2").unwrap();
    // `*-` and the `-` left over after `*`.
    assert_eq!(symbols.cached(), 2);

    parser.parse("3 - 4 *- 5").unwrap();
    assert_eq!(symbols.cached(), 2);

    parser.parse("1 @ 2").unwrap_err();
    parser.parse("1 @ 2").unwrap_err();
    assert_eq!(symbols.cached(), 3);
}

#[test]
fn tokens_carry_kinds_and_columns() {
    let parser = basic_parser().unwrap();
    let tokens = parser.lexer().tokenize(r#"abs(x, "a\"b") ** 3.14"#).unwrap();
    let tokens: Vec<_> = tokens.iter().map(|t| (t.kind, t.text.as_str(), t.column)).collect();

    assert_eq!(tokens,
               vec![(TokenKind::Word, "abs", 1),
                    (TokenKind::Symbol, "(", 4),
                    (TokenKind::Word, "x", 5),
                    (TokenKind::Symbol, ",", 6),
                    (TokenKind::Str, "a\"b", 8),
                    (TokenKind::Symbol, ")", 14),
                    (TokenKind::Symbol, "**", 16),
                    (TokenKind::Word, "3.14", 19)]);
}

#[test]
fn decimal_words_can_be_disabled() {
    let with = arithmetic().build().unwrap();
    let without = arithmetic().decimal_words(false).build().unwrap();

    assert_eq!(with.parse("3.14").unwrap().to_string(), "3.14");
    assert_eq!(without.parse("3.14").unwrap().to_string(), "Concat(3, 14)");
    assert_eq!(eval(&without, "3.14"), "314");

    // A dot not followed by a digit never joins a word.
    assert_eq!(with.parse("3.x").unwrap().to_string(), "Concat(3, x)");
}

#[test]
fn glyphs_can_be_replaced() {
    let glyphs = Glyphs { left_paren: '[',
                          right_paren: ']',
                          comma: ';',
                          single_quote: '`',
                          ..Glyphs::default() };
    let parser = arithmetic().prefix(op("add", Plus)).glyphs(glyphs).build().unwrap();

    assert_eq!(eval(&parser, "[1 + 2] * 3"), "9");
    assert_eq!(eval(&parser, "add[4; 5]"), "9");
    assert_eq!(eval(&parser, "`it's` . 1"), "it's1");
    assert!(matches!(parse_error(&parser, "(1)"),
                     ParseError::Lex(LexError::UnknownSymbols { column: 1, .. })));
}

#[test]
fn character_classes_can_be_replaced() {
    let classes = CharClasses::default().with_word(|c| c.is_alphanumeric() || c == '$');
    let parser = arithmetic().char_classes(classes).build().unwrap();

    let tree = parser.parse("$x + 1").unwrap();
    assert_eq!(tree.to_string(), "Plus($x, 1)");
    assert_eq!(tree.collect_vars(), vec![Var::new("$x")]);

    let default = arithmetic().build().unwrap();
    assert!(matches!(parse_error(&default, "$x + 1"),
                     ParseError::Lex(LexError::UnknownSymbols { .. })));
}

#[test]
fn literal_recognizer_can_be_replaced() {
    let parser = arithmetic().literals(HexLiterals).build().unwrap();

    assert_eq!(eval(&parser, "0xff + 1"), "256");
    assert_eq!(eval(&parser, "2 * 3.5"), "7");
    assert_eq!(parser.parse("0xzz").unwrap().collect_vars(), vec![Var::new("0xzz")]);
}

#[test]
fn word_operators_need_whole_words() {
    let parser = advanced_parser(Vec::new(), Vec::new()).unwrap();

    assert_eq!(parser.parse("not x").unwrap().to_string(), "Not(x)");
    assert_eq!(parser.parse("notx").unwrap().to_string(), "notx");
    assert_eq!(parser.parse("a and b").unwrap().to_string(), "And(a, b)");
}

#[test]
fn collected_variables_are_distinct_and_ordered() {
    let parser = basic_parser().unwrap();
    let tree = parser.parse("x + y * x - z").unwrap();
    let names: Vec<_> = tree.collect_vars().iter().map(|v| v.name().to_string()).collect();
    assert_eq!(names, vec!["x", "y", "z"]);
}

#[test]
fn variable_scopes() {
    let naive = Var::new("x");
    let a = Var::scoped("x", "a");
    let b = Var::scoped("x", "b");

    assert_eq!(naive, a);
    assert_eq!(naive, b);
    assert_ne!(a, b);
    assert_ne!(naive, Var::new("y"));
    assert_eq!(a.to_string(), "<a.x>");
    assert_eq!(naive.to_string(), "x");
}

#[test]
fn scoped_bindings_share_a_name() {
    let parser = basic_parser().unwrap();
    let mut env = Environment::new();
    let first = env.declare(Var::scoped("x", "a"), Constant::new(1)).unwrap();
    env.declare(Var::scoped("x", "b"), Constant::new(2)).unwrap();
    assert_eq!(env.len(), 2);

    assert_eq!(env.declare(Var::new("x"), Constant::new(3)).unwrap_err(),
               EvalError::AlreadyDeclared { name: "x".to_string() });
    assert!(env.declare(Var::scoped("x", "a"), Constant::new(4)).is_err());

    let content = |env: &Environment, var: Var| {
        env.get(&var).map(|lv| lv.borrow().content().to_string())
    };
    assert_eq!(content(&env, Var::scoped("x", "a")), Some("1".to_string()));
    assert_eq!(content(&env, Var::scoped("x", "b")), Some("2".to_string()));
    assert_eq!(content(&env, Var::scoped("x", "c")), None);

    // A naive name resolves to the earliest declared binding.
    assert!(Rc::ptr_eq(&env.lookup("x").unwrap(), &first));
    assert_eq!(env.flatten().get("x"), Some(&Constant::new(1)));
    let tree = parser.parse("x + 10").unwrap();
    assert_eq!(tree.eval(&mut env).unwrap().to_string(), "11");

    assert!(env.remove(&Var::scoped("x", "a")).is_some());
    assert_eq!(content(&env, Var::new("x")), Some("2".to_string()));
    assert_eq!(tree.eval(&mut env).unwrap().to_string(), "12");
    assert!(env.remove(&Var::new("x")).is_some());
    assert!(env.is_empty());
}

#[test]
fn naive_bindings_block_scoped_ones() {
    let mut env = Environment::new();
    env.declare(Var::new("y"), Constant::new(0)).unwrap();

    assert_eq!(env.declare(Var::scoped("y", "a"), Constant::new(1)).unwrap_err(),
               EvalError::AlreadyDeclared { name: "y".to_string() });
    let lv = env.get(&Var::scoped("y", "a")).unwrap();
    assert_eq!(lv.borrow().var(), &Var::new("y"));
    assert_eq!(env.len(), 1);
}

#[test]
fn trees_evaluate_against_any_environment() {
    let parser = basic_parser().unwrap();
    let tree = parser.parse("x * 10").unwrap();

    let mut first = Environment::new();
    first.declare(Var::new("x"), Constant::new(2)).unwrap();
    let mut second = Environment::new();
    second.declare(Var::new("x"), Constant::new(7)).unwrap();

    assert_eq!(tree.eval(&mut first).unwrap().to_string(), "20");
    assert_eq!(tree.eval(&mut second).unwrap().to_string(), "70");
    assert_eq!(tree.eval(&mut Environment::new()).unwrap_err(),
               EvalError::UndefinedVariable { name: "x".to_string() });
}

#[test]
fn operators_check_their_operand_count() {
    let err = Operator::new(Rc::new(Plus), vec![Node::from(Constant::new(1))]).unwrap_err();
    assert_eq!(err,
               EvalError::ArityMismatch { operator: "Plus",
                                          expected: 2,
                                          found:    1, });
}
