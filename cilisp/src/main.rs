//! CI LISP CLI

use clap::{Parser, Subcommand};
use cilisp::error::{Error, report_error, report_warning};
use std::path::PathBuf;
use std::sync::Once;

#[derive(Parser)]
#[command(name = "cilisp", version, about = "CI LISP - prefix arithmetic with let scopes")]
struct Cli {
    /// Log evaluation steps (overridden by RUST_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Evaluate every expression in a source file
    Run {
        /// Source file to run
        file: PathBuf,
    },
    /// Evaluate expressions given on the command line
    Eval {
        /// Program text, e.g. "(add 1 2)"
        expr: String,
    },
    /// Parse and dump the syntax tree as JSON (debug)
    Parse {
        /// Source file to parse
        file: PathBuf,
    },
    /// Tokenize and dump tokens (debug)
    Tokens {
        /// Source file to tokenize
        file: PathBuf,
    },
    /// Start the interactive prompt
    Repl,
}

static TRACING_INIT: Once = Once::new();

/// Install the tracing subscriber when RUST_LOG is set or `--verbose` is passed
fn init_tracing(verbose: bool) {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{EnvFilter, fmt, prelude::*};

        let filter = if std::env::var("RUST_LOG").is_ok() {
            EnvFilter::from_default_env()
        } else if verbose {
            EnvFilter::new("cilisp=debug")
        } else {
            return;
        };
        tracing_subscriber::registry()
            .with(fmt::layer().with_target(true).with_level(true).with_writer(std::io::stderr))
            .with(filter)
            .init();
    });
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result = match cli.command.unwrap_or(Command::Repl) {
        Command::Run { file } => run_file(&file),
        Command::Eval { expr } => run_text("<eval>", &expr),
        Command::Parse { file } => parse_file(&file),
        Command::Tokens { file } => tokenize_file(&file),
        Command::Repl => start_repl(),
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

fn run_file(path: &PathBuf) -> Result<(), Box<dyn std::error::Error>> {
    let source = std::fs::read_to_string(path)?;
    let filename = path.display().to_string();
    run_text(&filename, &source)
}

/// Evaluate each top-level expression, printing warnings before its value.
/// The first fatal error is reported and ends the run.
fn run_text(filename: &str, source: &str) -> Result<(), Box<dyn std::error::Error>> {
    let program = match cilisp::compile(source) {
        Ok(program) => program,
        Err(e) => return fail(filename, source, e.into()),
    };

    for expr in &program.exprs {
        match cilisp::eval_expr(expr) {
            Ok(outcome) => {
                for warning in &outcome.warnings {
                    report_warning(filename, source, warning)?;
                }
                println!("{}", outcome.value);
            }
            Err(e) => return fail(filename, source, e.into()),
        }
    }

    Ok(())
}

fn fail(filename: &str, source: &str, error: Error) -> Result<(), Box<dyn std::error::Error>> {
    report_error(filename, source, &error)?;
    Err(Box::new(error))
}

fn parse_file(path: &PathBuf) -> Result<(), Box<dyn std::error::Error>> {
    let source = std::fs::read_to_string(path)?;
    let program = cilisp::compile(&source)?;

    println!("{}", serde_json::to_string_pretty(&program)?);
    Ok(())
}

fn tokenize_file(path: &PathBuf) -> Result<(), Box<dyn std::error::Error>> {
    let source = std::fs::read_to_string(path)?;

    let tokens = cilisp::lexer::tokenize(&source)?;
    for (tok, span) in &tokens {
        println!("{:?} @ {}..{}", tok, span.start, span.end);
    }

    Ok(())
}

fn start_repl() -> Result<(), Box<dyn std::error::Error>> {
    let mut repl = cilisp::repl::Repl::new()?;
    repl.run()?;
    Ok(())
}
