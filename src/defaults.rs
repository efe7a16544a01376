use std::rc::Rc;

use crate::{
    error::ConfigError,
    grammar::operator::{OperatorInfo, PrecedenceLayer},
    interpreter::{evaluator::node::Operation, parser::core::Parser},
    ops::{
        assign::{Assign, Declare, DeclareReference},
        basic::{
            Comparison, Concat, Divide, Equal, IfThenElse, IntegerDivide, Minus, Modulo, Multiply,
            Negative, Not, NotEqual, Plus, Positive,
        },
        logic::{BooleanConnective, Connective},
        num::{Abs, Factorial, ImaginaryPart, Power, RealPart, Step},
        string::{Length, Parse, StrictParse},
        utils::{
            DecimalPoint, Dedummize, Dummize, Move, Pass, Print, Raise, RepeatTimes, RepeatTwice,
            Reverse, Stringify, Type,
        },
    },
};

type Table = Vec<(i32, PrecedenceLayer)>;

fn op(symbol: &str, operation: impl Operation + 'static) -> OperatorInfo {
    OperatorInfo::new(symbol, Rc::new(operation))
}

fn connective(symbol: &str, connective: Connective) -> OperatorInfo {
    op(symbol, BooleanConnective(connective))
}

/// Ranks 10 to 80: arithmetic, concatenation, ordering and equality.
fn arithmetic_layers() -> Result<Table, ConfigError> {
    Ok(vec![(10,
             PrecedenceLayer::left(vec![op("*", Multiply),
                                        op("/", Divide),
                                        op("//", IntegerDivide),
                                        op("%", Modulo)])?),
            (20,
             PrecedenceLayer::left(vec![op("+", Plus), op("-", Minus), op(".", Concat)])?),
            (70,
             PrecedenceLayer::left(vec![op("<", Comparison::Less),
                                        op("<=", Comparison::LessEqual),
                                        op(">", Comparison::Greater),
                                        op(">=", Comparison::GreaterEqual)])?),
            (80, PrecedenceLayer::left(vec![op("==", Equal), op("!=", NotEqual)])?)])
}

/// The basic calculator grammar.
///
/// | rank | associativity | operators |
/// |------|---------------|-----------|
/// | 9    | right | `**` |
/// | 10   | left  | `*` `/` `//` `%` |
/// | 20   | left  | `+` `-` `.` |
/// | 70   | left  | `<` `<=` `>` `>=` |
/// | 80   | left  | `==` `!=` |
/// | 110  | right | `&&` `\|\|` `->` `^` (xor) `<->` |
///
/// Prefix operators are `+`, `-` and `~`; postfix `!` is the factorial.
///
/// # Errors
/// Never fails in practice; the error comes from the shared validation path.
///
/// # Example
/// ```
/// use opcalc::defaults::basic_parser;
///
/// let parser = basic_parser().unwrap();
/// assert_eq!(parser.parse("1 + 2 * -3").unwrap().to_string(),
///            "Plus(1, Multiply(2, Negative(3)))");
/// ```
pub fn basic_parser() -> Result<Parser, ConfigError> {
    let mut table = vec![(9, PrecedenceLayer::right(vec![op("**", Power)])?)];
    table.extend(arithmetic_layers()?);
    table.push((110,
                PrecedenceLayer::right(vec![connective("&&", Connective::And),
                                            connective("||", Connective::Or),
                                            connective("->", Connective::Implies),
                                            connective("^", Connective::Xor),
                                            connective("<->", Connective::Iff)])?));

    let prefix = vec![op("+", Positive), op("-", Negative), op("~", Not)];
    let postfix = vec![op("!", Factorial)];

    Parser::new(prefix, postfix, table)
}

/// The advanced grammar: the basic one plus word operators, assignment and
/// sequencing.
///
/// Compared to [`basic_parser`], `^` is a second spelling of the power,
/// exclusive or is spelled `xor`, and the boolean layer gains `and`, `or`,
/// `nand`, `nor`, `nimpl`, `cimpl` and `cnimpl`. Two more layers follow:
/// assignments (`=`, `:=`, `:=&`) at rank 200, right associative, and the
/// sequencing `;` at rank 10000.
///
/// The prefix operators cover signs, `++` and `--`, negation (`~`, `not`,
/// `!`), `abs`, `re`, `im`, `len`, `parse`, `tryparse`, `print`, `str`, `type`,
/// `pass`, `dummy`, `solid`, `reverse`, `raise`/`throw`, the decimal point
/// `.`, `move`, `if`, `repeat` and `twice`. The postfix operators are `!`,
/// `++` and `--`; since `--` is a single token, `1--2` needs a space to read
/// as a subtraction. `extra_prefix` and `extra_postfix` are appended to the
/// built-in lists.
///
/// # Errors
/// Returns a `ConfigError` when an extra operator clashes with a built-in one.
///
/// # Example
/// ```
/// use opcalc::{defaults::advanced_parser, evaluate, interpreter::evaluator::core::Environment};
///
/// let parser = advanced_parser(Vec::new(), Vec::new()).unwrap();
/// let mut env = Environment::new();
/// let value = evaluate(&parser, "n := 5; if(n > 3 and not false, n!, 0)", &mut env).unwrap();
/// assert_eq!(value.to_string(), "120");
/// ```
pub fn advanced_parser(extra_prefix: Vec<OperatorInfo>,
                       extra_postfix: Vec<OperatorInfo>)
                       -> Result<Parser, ConfigError> {
    let power: Rc<dyn Operation> = Rc::new(Power);
    let and: Rc<dyn Operation> = Rc::new(BooleanConnective(Connective::And));
    let or: Rc<dyn Operation> = Rc::new(BooleanConnective(Connective::Or));

    let mut table = vec![(9,
                          PrecedenceLayer::right(OperatorInfo::spellings(&power, &["**", "^"]))?)];
    table.extend(arithmetic_layers()?);

    let mut boolean = OperatorInfo::spellings(&and, &["&&", "and"]);
    boolean.extend(OperatorInfo::spellings(&or, &["||", "or"]));
    boolean.extend([connective("->", Connective::Implies),
                    connective("xor", Connective::Xor),
                    connective("<->", Connective::Iff),
                    connective("nand", Connective::Nand),
                    connective("nor", Connective::Nor),
                    connective("nimpl", Connective::Nimpl),
                    connective("cimpl", Connective::ConverseImpl),
                    connective("cnimpl", Connective::ConverseNimpl)]);
    table.push((110, PrecedenceLayer::right(boolean)?));
    table.push((200,
                PrecedenceLayer::right(vec![op("=", Assign),
                                            op(":=", Declare),
                                            op(":=&", DeclareReference)])?));
    table.push((10000, PrecedenceLayer::left(vec![op(";", Pass)])?));

    let not: Rc<dyn Operation> = Rc::new(Not);
    let raise: Rc<dyn Operation> = Rc::new(Raise);

    let mut prefix = vec![op("+", Positive),
                          op("-", Negative),
                          op("++", Step::Increment),
                          op("--", Step::Decrement)];
    prefix.extend(OperatorInfo::spellings(&not, &["~", "not", "!"]));
    prefix.extend([op("abs", Abs),
                   op("re", RealPart),
                   op("im", ImaginaryPart),
                   op("len", Length),
                   op("parse", StrictParse),
                   op("tryparse", Parse),
                   op("print", Print),
                   op("str", Stringify),
                   op("type", Type),
                   op("pass", Pass),
                   op("dummy", Dummize),
                   op("solid", Dedummize),
                   op("reverse", Reverse)]);
    prefix.extend(OperatorInfo::spellings(&raise, &["raise", "throw"]));
    prefix.extend([op(".", DecimalPoint),
                   op("move", Move),
                   op("if", IfThenElse),
                   op("repeat", RepeatTimes),
                   op("twice", RepeatTwice)]);
    prefix.extend(extra_prefix);

    let mut postfix = vec![op("!", Factorial),
                           op("++", Step::PostIncrement),
                           op("--", Step::PostDecrement)];
    postfix.extend(extra_postfix);

    Parser::new(prefix, postfix, table)
}
