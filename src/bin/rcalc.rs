//! rcalc shell
//!
//! Interactive calculator and batch expression runner.

use std::fs;
use std::path::{Path, PathBuf};
use std::process;

use clap::Parser;
use rcalc::Calculator;
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;

/// Evaluate arithmetic expressions such as `2^3^2` or `sqrt(2)*pi`.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Evaluate each non-blank line of this file instead of the arguments.
    #[arg(short, long)]
    file: Option<PathBuf>,

    /// Developer mode: print the postfix program under each result.
    #[arg(short, long)]
    postfix: bool,

    /// Expressions to evaluate. Starts an interactive shell when empty.
    expressions: Vec<String>,
}

/// Numbered evaluation log, one entry per expression
struct Session {
    calc: Calculator,
    count: usize,
    show_postfix: bool,
}

impl Session {
    fn new(show_postfix: bool) -> Self {
        Session {
            calc: Calculator::new(),
            count: 0,
            show_postfix,
        }
    }

    /// Evaluate one expression and render its log entry
    fn entry(&mut self, expression: &str) -> String {
        self.count += 1;
        let evaluation = self.calc.run(expression);

        let shown = if expression.is_empty() { "?" } else { expression };
        let mut out = format!("{}: {} = {}", self.count, shown, evaluation.outcome);
        if self.show_postfix {
            out.push_str("\n   ");
            out.push_str(&evaluation.postfix());
        }
        out
    }
}

fn main() {
    env_logger::init();
    let args = Args::parse();
    let mut session = Session::new(args.postfix);

    if let Some(path) = &args.file {
        run_file(&mut session, path);
    } else if !args.expressions.is_empty() {
        for expression in &args.expressions {
            println!("{}", session.entry(expression.trim()));
        }
    } else if let Err(e) = run_repl(&mut session) {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

fn run_file(session: &mut Session, path: &Path) {
    let source = match fs::read_to_string(path) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("Error reading {}: {}", path.display(), e);
            process::exit(1);
        }
    };

    for line in source.lines().map(str::trim).filter(|l| !l.is_empty()) {
        println!("{}", session.entry(line));
    }
}

fn run_repl(session: &mut Session) -> rustyline::Result<()> {
    println!("rcalc {}", env!("CARGO_PKG_VERSION"));
    println!("Type an expression to evaluate, Ctrl+D to exit.\n");

    let mut editor = DefaultEditor::new()?;

    loop {
        match editor.readline("> ") {
            Ok(line) => {
                let line = line.trim();
                if !line.is_empty() {
                    editor.add_history_entry(line)?;
                }
                println!("{}", session.entry(line));
            }
            Err(ReadlineError::Interrupted) => continue,
            Err(ReadlineError::Eof) => {
                println!();
                break;
            }
            Err(e) => return Err(e),
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entries_are_numbered() {
        let mut session = Session::new(false);

        assert_eq!(session.entry("1+1"), "1: 1+1 = 2");
        assert_eq!(session.entry("1/0"), "2: 1/0 = Infinity");
        assert_eq!(session.entry(""), "3: ? = error");
    }

    #[test]
    fn test_postfix_mode() {
        let mut session = Session::new(true);

        assert_eq!(session.entry("2^3^2"), "1: 2^3^2 = 512\n   2 3 2 ^ ^");
        assert_eq!(session.entry("(1"), "2: (1 = error\n   ");
    }

    #[test]
    fn test_args() {
        let args = Args::parse_from(["rcalc", "-p", "1+2", "pi"]);
        assert!(args.postfix);
        assert_eq!(args.expressions, vec!["1+2", "pi"]);
        assert!(args.file.is_none());
    }
}
