use std::fs;

use opcalc::{
    defaults::{advanced_parser, basic_parser},
    error::{Error, EvalError},
    evaluate, evaluate_script,
    interpreter::{
        evaluator::core::Environment,
        parser::core::Parser,
        value::core::{Constant, Value},
    },
    ops::basic::MAX_REPEAT_BYTES,
};
use pretty_assertions::assert_eq;
use walkdir::WalkDir;

#[test]
fn book_examples_work() {
    let parser = advanced_parser(Vec::new(), Vec::new()).unwrap();
    let mut count = 0;

    for entry in
        WalkDir::new("book/src").into_iter()
                                .filter_map(Result::ok)
                                .filter(|e| e.path().extension().is_some_and(|ext| ext == "md"))
    {
        let path = entry.path();
        let content =
            fs::read_to_string(path).unwrap_or_else(|e| panic!("Failed to read {path:?}: {e}"));

        for (i, code) in extract_blocks(&content).into_iter().enumerate() {
            count += 1;
            if let Err((line, e)) = evaluate_script(&parser, &code, &mut Environment::new()) {
                panic!("Example {} in {:?} failed at line {}:\n{}\nError: {}",
                       i + 1,
                       path,
                       line,
                       code,
                       e);
            }
        }
    }

    assert!(count > 0, "No examples found in book/src");
}

fn extract_blocks(content: &str) -> Vec<String> {
    let mut blocks = Vec::new();
    let mut inside = false;
    let mut buf = String::new();

    for line in content.lines() {
        let trimmed = line.trim_start();
        if trimmed.starts_with("```opcalc") {
            inside = true;
            buf.clear();
            continue;
        }
        if inside && trimmed.starts_with("```") {
            inside = false;
            blocks.push(buf.clone());
            continue;
        }
        if inside {
            buf.push_str(line);
            buf.push('\n');
        }
    }

    blocks
}

fn run(parser: &Parser, src: &str) -> Result<Value, Error> {
    let mut env = Environment::new();
    let mut last = None;
    for line in src.lines() {
        last = Some(evaluate(parser, line, &mut env)?);
    }
    Ok(last.unwrap_or_else(|| panic!("No lines in {src:?}")))
}

fn value_of(parser: &Parser, src: &str) -> Constant {
    run(parser, src).unwrap_or_else(|e| panic!("{src:?} failed: {e}"))
                    .into_constant()
}

fn assert_basic(src: &str, expected: &str) {
    let parser = basic_parser().unwrap();
    assert_eq!(value_of(&parser, src).to_string(), expected, "{src}");
}

fn assert_advanced(src: &str, expected: &str) {
    let parser = advanced_parser(Vec::new(), Vec::new()).unwrap();
    assert_eq!(value_of(&parser, src).to_string(), expected, "{src}");
}

fn assert_failure(src: &str) {
    let parser = advanced_parser(Vec::new(), Vec::new()).unwrap();
    if let Ok(value) = run(&parser, src) {
        panic!("{src:?} succeeded with {value} but was expected to fail");
    }
}

fn eval_error(src: &str) -> EvalError {
    let parser = advanced_parser(Vec::new(), Vec::new()).unwrap();
    match run(&parser, src) {
        Err(Error::Eval(e)) => e,
        other => panic!("{src:?} was expected to fail during evaluation, got {other:?}"),
    }
}

#[test]
fn multiplication_binds_tighter_than_addition() {
    assert_basic("3 + 5 * 6", "33");
    assert_basic("(3 + 5) * 6", "48");
    assert_basic("2 * 3 + 4 * 5", "26");
}

#[test]
fn same_rank_operators_group_left() {
    assert_basic("10 - 4 - 3", "3");
    assert_basic("2 / 4 * 8", "4");
    assert_basic("3 + 2 . 5", "55");
    assert_basic("3 . 2 + 5", "325");
}

#[test]
fn power_groups_right() {
    let parser = basic_parser().unwrap();
    assert_eq!(parser.parse("3 ** 3 ** 3").unwrap().to_string(), "Power(3, Power(3, 3))");
    assert_eq!(parser.parse("(3 ** 3) ** 3").unwrap().to_string(), "Power(Power(3, 3), 3)");
    assert_basic("2 ** 3 ** 2", "512");
    assert_basic("(2 ** 3) ** 2", "64");
}

#[test]
fn prefix_operators_bind_before_infix_ones() {
    assert_basic("-3 ** 2", "9");
    assert_basic("-(3 ** 2)", "-9");
    assert_basic("2 * -3", "-6");
    assert_basic("- - 4", "4");
    assert_basic("~0 && 1", "True");
}

#[test]
fn postfix_factorial() {
    assert_basic("5!", "120");
    assert_basic("3!!", "720");
    assert_basic("2 * 3!", "12");
    assert_basic("0!", "1");
}

#[test]
fn division_and_modulo() {
    assert_basic("7 / 2", "3.5");
    assert_basic("7 // 2", "3");
    assert_basic("-7 // 2", "-4");
    assert_basic("7 % 3", "1");
    assert_basic("-7 % 3", "2");
    assert_basic("7 % -3", "-2");
    assert_eq!(eval_error("1 / 0"), EvalError::DivisionByZero);
    assert_eq!(eval_error("5 % 0"), EvalError::DivisionByZero);
    assert_eq!(eval_error("5 // 0"), EvalError::DivisionByZero);
}

#[test]
fn complex_numbers() {
    assert_basic("i * i", "-1");
    assert_basic("2 + 3i", "2 + 3i");
    assert_basic("(1 + i) * (1 - i)", "2");
    assert_basic("2j - 5", "-5 + 2i");
    assert_advanced("abs(3 + 4i)", "5");
    assert_advanced("re(3 - 4i)", "3");
    assert_advanced("im(3 - 4i)", "-4");
}

#[test]
fn powers() {
    assert_basic("2 ** 10", "1024");
    assert_basic("2 ** -1", "0.5");
    assert_basic("4 ** 0.5", "2");
    assert_basic("i ** 2", "-1");
    assert_advanced("2 ^ 8", "256");
    assert_eq!(eval_error("0 ** -1"), EvalError::DivisionByZero);
}

#[test]
fn comparisons() {
    assert_basic("1 < 2", "True");
    assert_basic("2 <= 2", "True");
    assert_basic("3 > 4", "False");
    assert_basic("1 < 2 == true", "True");
    assert_basic("'apple' < 'banana'", "True");
    assert_basic("true > false", "True");
    assert_basic("i < i", "True");
    assert_basic("i < 2", "False");
    assert_failure("'a' < 1");
}

#[test]
fn equality_requires_the_same_type() {
    assert_basic("1 == 1.0", "True");
    assert_basic("1 == '1'", "False");
    assert_basic("1 != true", "True");
    assert_basic("'a' == 'a'", "True");
}

#[test]
fn boolean_connectives() {
    assert_basic("true && false", "False");
    assert_basic("true || false", "True");
    assert_basic("true -> false", "False");
    assert_basic("false -> false", "True");
    assert_basic("1 ^ 1", "False");
    assert_basic("true <-> 1", "True");
    assert_advanced("true and not false", "True");
    assert_advanced("false or false", "False");
    assert_advanced("true xor false", "True");
    assert_advanced("true nand true", "False");
    assert_advanced("false nor false", "True");
    assert_advanced("true nimpl false", "True");
    assert_advanced("true nimpl true", "False");
    assert_advanced("false cimpl true", "False");
    assert_advanced("false cimpl false", "True");
    assert_advanced("false cnimpl true", "True");
    assert_advanced("true cnimpl false", "False");
}

#[test]
fn boolean_connectives_short_circuit() {
    assert_basic("false && missing", "False");
    assert_basic("true || missing", "True");
    assert_basic("false -> missing", "True");
    assert_failure("true && missing");
    assert_failure("true xor missing");
    assert_advanced("false nimpl missing", "False");
    assert_advanced("true cimpl missing", "True");
    assert_advanced("true cnimpl missing", "False");
    assert_failure("false cimpl missing");
}

#[test]
fn boolean_arithmetic() {
    assert_basic("true + false", "True");
    assert_basic("true - true", "False");
    assert_basic("true * false", "False");
    assert_basic("true + 1", "2");
}

#[test]
fn string_operators() {
    assert_basic("'ab' * 3", "ababab");
    assert_basic("2 * 'xy'", "xyxy");
    assert_basic("'a' + 1", "a1");
    assert_basic("\"it's\" . ' fine'", "it's fine");
    assert_advanced("len 'héllo'", "5");
    assert_advanced("len('')", "0");
    assert_failure("'a' * 'b'");
    assert_failure("'a' - 'b'");
    assert_failure("'a' * 1.5");
    assert_failure("len 5");
}

#[test]
fn string_repetition_is_bounded() {
    assert_advanced("len('ab' * 1000)", "2000");
    assert_eq!(eval_error(&format!("'ab' * {}", MAX_REPEAT_BYTES / 2 + 1)), EvalError::Overflow);
    assert_eq!(eval_error("'ab' * 9007199254740991"), EvalError::Overflow);
}

#[test]
fn quoted_literals_escape_any_character() {
    assert_basic(r"'a\'b'", "a'b");
    assert_basic(r#""say \"hi\"""#, "say \"hi\"");
    assert_basic(r"'back\\slash'", r"back\slash");
    assert_basic("'(, )'", "(, )");
}

#[test]
fn literal_forms() {
    assert_basic("007", "7");
    assert_basic("3.25", "3.25");
    assert_basic("TRUE", "True");
    assert_basic("False", "False");
    assert_basic("J", "1i");
    assert_basic("2.5j", "2.5i");
    assert_basic("3 . 14", "314");
}

#[test]
fn decimal_point_prefix() {
    assert_advanced(".5", "0.5");
    assert_advanced(".'007'", "0.007");
    assert_advanced("1 + .25", "1.25");
    assert_failure(".'1a'");
    let parser = basic_parser().unwrap();
    assert!(parser.parse(".14").is_err());
}

#[test]
fn variables_need_a_declaration() {
    assert_eq!(eval_error("x"), EvalError::UndefinedVariable { name: "x".to_string() });
    assert_eq!(eval_error("y = 3"), EvalError::UndefinedVariable { name: "y".to_string() });
    assert_advanced("x := 4\nx * 2", "8");
    assert_advanced("x := 4; x = x + 1; x", "5");
    assert_eq!(eval_error("x := 1; x := 2"),
               EvalError::AlreadyDeclared { name: "x".to_string() });
}

#[test]
fn assignment_targets() {
    assert_eq!(eval_error("5 = 3"), EvalError::NotAnLValue { operator: "Assign" });
    assert_eq!(eval_error("(1 + 2) := 3"), EvalError::ExpectedVariable { operator: "Declare" });
    assert_eq!(eval_error("x := 1; y :=& 2"),
               EvalError::NotAnLValue { operator: "DeclareReference" });
}

#[test]
fn assignments_chain_and_return_the_binding() {
    let parser = advanced_parser(Vec::new(), Vec::new()).unwrap();
    let mut env = Environment::new();
    evaluate(&parser, "a := 0; b := 0", &mut env).unwrap();

    let value = evaluate(&parser, "a = b = 2 * 3", &mut env).unwrap();
    assert!(value.is_lvalue());
    assert_eq!(value.to_string(), "<a: 6>");
    assert_eq!(evaluate(&parser, "a + b", &mut env).unwrap().to_string(), "12");
}

#[test]
fn reference_declarations_share_a_binding() {
    let parser = advanced_parser(Vec::new(), Vec::new()).unwrap();
    let mut env = Environment::new();
    evaluate(&parser, "x := 1; y :=& x", &mut env).unwrap();
    evaluate(&parser, "y = 42", &mut env).unwrap();

    assert_eq!(env.lookup("x").unwrap().borrow().content(), &Constant::new(42));
    assert_eq!(env.len(), 2);
}

#[test]
fn declarations_see_the_previous_environment() {
    assert_failure("x := x");
    assert_advanced("x := 3; y := x * x; y", "9");
}

#[test]
fn dummy_constants_pass_through() {
    let parser = advanced_parser(Vec::new(), Vec::new()).unwrap();

    assert!(value_of(&parser, "_").is_dummy());
    assert!(value_of(&parser, "pass(1, _)").is_dummy());
    assert!(value_of(&parser, "1; dummy(5)").is_dummy());
    assert!(value_of(&parser, "move(dummy 5)").is_dummy());

    assert!(!value_of(&parser, "_ + 1").is_dummy());
    assert!(!value_of(&parser, "-_").is_dummy());
    assert!(!value_of(&parser, "dummy(5) * 1").is_dummy());
    assert!(!value_of(&parser, "solid _").is_dummy());
    assert!(!value_of(&parser, "x := _; x").is_dummy());
}

#[test]
fn conditional_evaluates_one_branch() {
    assert_advanced("if(1 < 2, 'yes', missing)", "yes");
    assert_advanced("if(0, missing, 'no')", "no");
    assert_advanced("x := 1; if(true, x, 0) = 9; x", "9");
    assert_failure("if(1, 2)");
}

#[test]
fn repetition() {
    assert_advanced("x := 1; repeat(5, x = x * 2)", "32");
    assert_advanced("x := 1; twice(x = x + 10)", "21");
    assert_failure("repeat(0, 1)");
    assert_failure("repeat(1.5, 1)");
}

#[test]
fn reverse_swaps_operands() {
    assert_advanced("reverse(2 - 10)", "8");
    assert_advanced("reverse('a' . 'b')", "ba");
    assert_failure("reverse 3");
}

#[test]
fn conversions() {
    assert_advanced("type 1", "number");
    assert_advanced("type 'a'", "string");
    assert_advanced("type(1 < 2)", "boolean");
    assert_advanced("str(1 < 2)", "True");
    assert_advanced("str 2.5 . '!'", "2.5!");
    assert_advanced("print(1 + 2i)", "(1+2j)");
    assert_advanced("print 7", "7");
    assert_advanced("parse '12' + 1", "13");
    assert_advanced("parse ' -2.5 '", "-2.5");
    assert_advanced("parse 'false'", "False");
    assert_failure("parse 'twelve'");
    assert_failure("parse 12");
    assert_failure("parse('9' * 400)");
    assert_advanced("tryparse '12' + 1", "13");
    assert_advanced("tryparse 'TRUE'", "True");
    assert_advanced("tryparse 'twelve'", "twelve");
    assert_advanced("len tryparse('9' * 400)", "400");
    assert_failure("tryparse 12");
}

#[test]
fn increments_update_the_binding() {
    let parser = advanced_parser(Vec::new(), Vec::new()).unwrap();
    let mut env = Environment::new();
    evaluate(&parser, "x := 42", &mut env).unwrap();

    let value = evaluate(&parser, "++x", &mut env).unwrap();
    assert!(value.is_lvalue());
    assert_eq!(value.to_string(), "<x: 43>");

    let value = evaluate(&parser, "x--", &mut env).unwrap();
    assert!(!value.is_lvalue());
    assert_eq!(value.to_string(), "43");

    assert_eq!(evaluate(&parser, "x++ + x", &mut env).unwrap().to_string(), "85");
    assert_eq!(evaluate(&parser, "--x; x", &mut env).unwrap().to_string(), "<x: 42>");
    assert_eq!(evaluate(&parser, "y :=& x; y++; x", &mut env).unwrap().to_string(), "<x: 43>");
}

#[test]
fn increments_need_numeric_bindings() {
    assert_eq!(eval_error("++3"), EvalError::NotAnLValue { operator: "Increment" });
    assert_eq!(eval_error("(1 + 2)--"), EvalError::NotAnLValue { operator: "PostDecrement" });
    assert!(matches!(eval_error("s := 'a'; s++"), EvalError::TypeMismatch { .. }));
    assert_advanced("1 - -2", "3");
    assert_failure("1--2");
}

#[test]
fn raised_errors_carry_the_message() {
    assert_eq!(eval_error("raise 'boom'"), EvalError::Raised { message: "boom".to_string() });
    assert_eq!(eval_error("throw(1 + 1)"), EvalError::Raised { message: "2".to_string() });
    assert_advanced("true || raise 'unreachable'", "True");
}

#[test]
fn operands_are_cast_where_needed() {
    assert_basic("true * 3", "3");
    assert_basic("~''", "True");
    assert_basic("~'0'", "False");
    assert_advanced("parse '2' ** 3", "8");
}

#[test]
fn numeric_functions_take_numbers_only() {
    for src in ["'2' ** 3", "true ** 2", "2 ** '3'", "abs '-3'", "re '1'", "im true", "'3'!"] {
        assert!(matches!(eval_error(src), EvalError::TypeMismatch { .. }), "{src}");
    }
}

#[test]
fn environment_survives_errors() {
    let parser = advanced_parser(Vec::new(), Vec::new()).unwrap();
    let mut env = Environment::new();

    assert!(evaluate(&parser, "x := 1; x = 2; 1 / 0", &mut env).is_err());
    assert_eq!(evaluate(&parser, "x", &mut env).unwrap().to_string(), "<x: 2>");

    let flat = env.flatten();
    assert_eq!(flat.get("x"), Some(&Constant::new(2)));
}

#[test]
fn scripts_report_the_failing_line() {
    let parser = advanced_parser(Vec::new(), Vec::new()).unwrap();
    let mut env = Environment::new();
    let script = "x := 1\n# comment\n\nx = x +\n";

    let (line, err) = evaluate_script(&parser, script, &mut env).unwrap_err();
    assert_eq!(line, 4);
    assert!(matches!(err, Error::Parse(_)));
    assert!(env.lookup("x").is_some());
}

#[test]
fn example_script_works() {
    let parser = advanced_parser(Vec::new(), Vec::new()).unwrap();
    let contents = fs::read_to_string("tests/example.calc").unwrap();
    let values = evaluate_script(&parser, &contents, &mut Environment::new()).unwrap();
    assert_eq!(values.last().map(ToString::to_string), Some("<total: 55>".to_string()));
}
