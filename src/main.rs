use std::{fs, process::ExitCode};

use clap::{Parser, ValueEnum};
use opcalc::{
    defaults::{advanced_parser, basic_parser},
    evaluate_lines,
    interpreter::evaluator::core::Environment,
};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// The built-in grammars.
#[derive(ValueEnum, Clone, Copy, Debug, Default)]
enum Grammar {
    /// Arithmetic, comparison and symbolic boolean operators.
    Basic,
    /// Adds word operators, assignment, declaration and `;`.
    #[default]
    Advanced,
}

/// opcalc evaluates expressions line by line against one shared set of
/// variables.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Tells opcalc to read expressions from a file instead of the argument.
    #[arg(short, long)]
    file: bool,

    /// The grammar expressions are parsed with.
    #[arg(short, long, value_enum, default_value_t)]
    grammar: Grammar,

    /// Logs grammar construction, lexing and parsing decisions.
    #[arg(short, long)]
    verbose: bool,

    contents: String,
}

fn main() -> ExitCode {
    let args = Args::parse();

    let default_level = if args.verbose { "debug" } else { "warn" };
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| default_level.into()))
        .with(fmt::layer().with_writer(std::io::stderr))
        .init();

    let script = if args.file {
        match fs::read_to_string(&args.contents) {
            Ok(script) => script,
            Err(_) => {
                eprintln!("Failed to read the input file '{}'. Perhaps this file does not exist?",
                          &args.contents);
                return ExitCode::FAILURE;
            },
        }
    } else {
        args.contents
    };

    let parser = match args.grammar {
        Grammar::Basic => basic_parser(),
        Grammar::Advanced => advanced_parser(Vec::new(), Vec::new()),
    };
    let parser = match parser {
        Ok(parser) => parser,
        Err(e) => {
            eprintln!("{e}");
            return ExitCode::FAILURE;
        },
    };

    let printed = evaluate_lines(&parser, &script, &mut Environment::new(), |_, value| {
        println!("{}", value.into_constant());
    });
    if let Err((line, e)) = printed {
        eprintln!("Line {line}: {e}");
        return ExitCode::FAILURE;
    }

    ExitCode::SUCCESS
}
