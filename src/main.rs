//! lisp101 command-line interpreter
//!
//! Usage:
//!   lisp101                   interactive REPL
//!   lisp101 <file>            evaluate a file, printing non-void results
//!   lisp101 --tokens <file>   dump the token stream as JSON

use std::io;
use std::path::Path;

use anyhow::{bail, Context, Result};
use lisp101::repl::Repl;
use lisp101::{Evaluator, Scanner, Value};

fn main() -> Result<()> {
    init_tracing();

    let args: Vec<String> = std::env::args().skip(1).collect();

    match args.as_slice() {
        [] => run_repl(),
        [flag, path] if flag == "--tokens" => dump_tokens(Path::new(path)),
        [flag] if flag == "--help" || flag == "-h" => {
            print_usage();
            Ok(())
        }
        [path] if !path.starts_with('-') => run_file(Path::new(path)),
        _ => {
            print_usage();
            bail!("unrecognized arguments: {}", args.join(" "))
        }
    }
}

/// Logs go to stderr; `RUST_LOG` overrides the default `warn` level
fn init_tracing() {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(io::stderr).with_target(true))
        .with(filter)
        .init();
}

fn print_usage() {
    eprintln!("lisp101 {}", lisp101::VERSION);
    eprintln!();
    eprintln!("Usage:");
    eprintln!("  lisp101                   start the interactive REPL");
    eprintln!("  lisp101 <file>            evaluate a file");
    eprintln!("  lisp101 --tokens <file>   print the token stream as JSON");
}

fn run_repl() -> Result<()> {
    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut repl = Repl::new(stdin.lock(), stdout.lock());

    let summary = repl.run().context("REPL I/O failed")?;
    tracing::info!(
        evaluated = summary.evaluated,
        failed = summary.failed,
        "REPL finished"
    );
    Ok(())
}

fn read_source(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))
}

fn run_file(path: &Path) -> Result<()> {
    let source = read_source(path)?;

    let mut evaluator = Evaluator::new();
    let results = evaluator
        .run(&source)
        .with_context(|| format!("failed to evaluate {}", path.display()))?;

    for value in results.iter().filter(|v| !matches!(v, Value::Void)) {
        println!("{}", value);
    }
    Ok(())
}

fn dump_tokens(path: &Path) -> Result<()> {
    let source = read_source(path)?;

    let tokens = Scanner::new(&source)
        .scan_tokens()
        .with_context(|| format!("failed to tokenize {}", path.display()))?;

    println!("{}", serde_json::to_string_pretty(&tokens)?);
    Ok(())
}
