//! REPL (Read-Eval-Print Loop) for CI LISP

use crate::ast::BUILTIN_NAMES;
use crate::error::{Error, report_error, report_warning};
use crate::{compile, eval_expr};
use rustyline::error::ReadlineError;
use rustyline::{DefaultEditor, Result as RlResult};
use std::path::PathBuf;

const PROMPT: &str = "> ";
const HISTORY_FILE: &str = ".cilisp_history";
const SOURCE_NAME: &str = "<repl>";

/// REPL state
pub struct Repl {
    editor: DefaultEditor,
    history_path: Option<PathBuf>,
}

impl Repl {
    /// Create a new REPL
    pub fn new() -> RlResult<Self> {
        let editor = DefaultEditor::new()?;

        // Try to find history file in home directory
        let history_path = dirs_home().map(|h| h.join(HISTORY_FILE));

        let mut repl = Repl {
            editor,
            history_path,
        };

        if let Some(ref path) = repl.history_path
            && repl.editor.load_history(path).is_err()
        {
            tracing::debug!(path = %path.display(), "no history loaded");
        }

        Ok(repl)
    }

    /// Run the REPL
    pub fn run(&mut self) -> RlResult<()> {
        println!("CI LISP REPL v{}", env!("CARGO_PKG_VERSION"));
        println!("Type :help for help, :quit to exit.\n");

        loop {
            match self.editor.readline(PROMPT) {
                Ok(line) => {
                    let line = line.trim();

                    if line.is_empty() {
                        continue;
                    }

                    self.editor.add_history_entry(line)?;

                    if line.starts_with(':') {
                        if self.handle_command(line) {
                            break;
                        }
                        continue;
                    }

                    self.eval_line(line);
                }
                Err(ReadlineError::Interrupted) => {
                    println!("^C");
                    continue;
                }
                Err(ReadlineError::Eof) => {
                    println!("Goodbye!");
                    break;
                }
                Err(err) => {
                    eprintln!("Error: {err}");
                    break;
                }
            }
        }

        if let Some(ref path) = self.history_path {
            self.editor.save_history(path)?;
        }

        Ok(())
    }

    /// Handle REPL commands (starting with :). Returns true to exit.
    fn handle_command(&mut self, cmd: &str) -> bool {
        match cmd {
            ":quit" | ":q" | ":exit" => {
                println!("Goodbye!");
                true
            }
            ":help" | ":h" | ":?" => {
                print_help();
                false
            }
            _ => {
                println!("Unknown command: {cmd}");
                println!("Type :help for help.");
                false
            }
        }
    }

    /// Evaluate one line as a complete program
    fn eval_line(&mut self, line: &str) {
        for rendered in eval_to_strings(line) {
            match rendered {
                Ok(value) => println!("{value}"),
                Err(error) => {
                    if let Err(io_err) = report_error(SOURCE_NAME, line, &error) {
                        eprintln!("Error: {error} ({io_err})");
                    }
                }
            }
        }
    }
}

/// Evaluate every expression on `line`, reporting warnings as they arise and
/// returning the rendered values. A fatal error ends the line.
fn eval_to_strings(line: &str) -> Vec<Result<String, Error>> {
    let program = match compile(line) {
        Ok(program) => program,
        Err(e) => return vec![Err(e.into())],
    };

    let mut rendered = Vec::with_capacity(program.exprs.len());
    for expr in &program.exprs {
        match eval_expr(expr) {
            Ok(outcome) => {
                for warning in &outcome.warnings {
                    if report_warning(SOURCE_NAME, line, warning).is_err() {
                        eprintln!("{warning}");
                    }
                }
                rendered.push(Ok(outcome.value.to_string()));
            }
            Err(e) => {
                rendered.push(Err(e.into()));
                break;
            }
        }
    }
    rendered
}

fn print_help() {
    println!("CI LISP REPL Commands:");
    println!("  :help, :h, :?   Show this help");
    println!("  :quit, :q       Exit the REPL");
    println!();
    println!("You can enter:");
    println!("  - Numbers: 42, -1.5");
    println!("  - Calls: (add 1 (mult 2 3))");
    println!("  - Scopes: ((let (x 10) (y 5)) (add x y))");
    println!();
    println!("Built-in functions:");
    println!("  {}", BUILTIN_NAMES.join(" "));
}

/// Get home directory
fn dirs_home() -> Option<PathBuf> {
    #[cfg(windows)]
    {
        std::env::var("USERPROFILE").ok().map(PathBuf::from)
    }
    #[cfg(not(windows))]
    {
        std::env::var("HOME").ok().map(PathBuf::from)
    }
}
