//! Interactive read-eval-print loop
//!
//! Reads one line per iteration and evaluates it against a single
//! [`LispEvaluator`], so definitions persist from line to line. A failing
//! line is reported and the loop moves on to the next one.

use std::io::{self, BufRead, Write};

use crate::runtime::{LispEvaluator, Value};

/// REPL settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReplConfig {
    /// Printed before each line is read
    pub prompt: String,
    /// A line equal to this (after trimming) ends the loop
    pub exit_keyword: String,
    /// Print every top-level result instead of only the first
    pub show_all_results: bool,
}

impl Default for ReplConfig {
    fn default() -> Self {
        ReplConfig {
            prompt: "> ".to_string(),
            exit_keyword: "quit".to_string(),
            show_all_results: false,
        }
    }
}

/// Counts reported when the loop ends
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReplSummary {
    /// Lines that evaluated without error
    pub evaluated: usize,
    /// Lines that failed to parse or evaluate
    pub failed: usize,
}

/// Line-oriented REPL over any reader/writer pair
pub struct Repl<R: BufRead, W: Write> {
    input: R,
    output: W,
    config: ReplConfig,
    evaluator: LispEvaluator,
}

impl<R: BufRead, W: Write> Repl<R, W> {
    /// Creates a REPL with the default configuration and a fresh session
    pub fn new(input: R, output: W) -> Self {
        Self::with_config(input, output, ReplConfig::default())
    }

    /// Creates a REPL with a custom configuration
    pub fn with_config(input: R, output: W, config: ReplConfig) -> Self {
        Repl {
            input,
            output,
            config,
            evaluator: LispEvaluator::new(),
        }
    }

    /// Replaces the session the REPL evaluates against
    pub fn with_evaluator(mut self, evaluator: LispEvaluator) -> Self {
        self.evaluator = evaluator;
        self
    }

    /// The session, for inspecting bindings after the loop
    pub fn evaluator(&self) -> &LispEvaluator {
        &self.evaluator
    }

    /// Runs until end of input or the exit keyword
    ///
    /// Only I/O failures on the reader or writer end the loop early.
    pub fn run(&mut self) -> io::Result<ReplSummary> {
        let mut summary = ReplSummary::default();
        let mut line = String::new();

        loop {
            write!(self.output, "{}", self.config.prompt)?;
            self.output.flush()?;

            line.clear();
            if self.input.read_line(&mut line)? == 0 {
                break; // EOF
            }

            let input = line.trim();
            if input.is_empty() {
                continue;
            }
            if input == self.config.exit_keyword {
                break;
            }

            match self.evaluator.run(input) {
                Ok(results) => {
                    summary.evaluated += 1;
                    self.print_results(&results)?;
                }
                Err(err) => {
                    summary.failed += 1;
                    tracing::warn!(error = %err, input = %input, "evaluation failed");
                    writeln!(self.output, "error: {}", err)?;
                }
            }
        }

        Ok(summary)
    }

    fn print_results(&mut self, results: &[Value]) -> io::Result<()> {
        if self.config.show_all_results {
            for value in results {
                writeln!(self.output, "{}", value)?;
            }
        } else if let Some(first) = results.first() {
            writeln!(self.output, "{}", first)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn session(input: &str, config: ReplConfig) -> (ReplSummary, String) {
        let mut output = Vec::new();
        let summary = {
            let mut repl = Repl::with_config(Cursor::new(input.to_string()), &mut output, config);
            repl.run().unwrap()
        };
        (summary, String::from_utf8(output).unwrap())
    }

    fn quiet() -> ReplConfig {
        ReplConfig {
            prompt: String::new(),
            ..ReplConfig::default()
        }
    }

    #[test]
    fn test_default_config() {
        let config = ReplConfig::default();
        assert_eq!(config.prompt, "> ");
        assert_eq!(config.exit_keyword, "quit");
        assert!(!config.show_all_results);
    }

    #[test]
    fn test_definitions_persist_between_lines() {
        let (summary, out) = session("(define x 4)\n(* x x)\n", quiet());
        assert_eq!(out, "#<void>\n16\n");
        assert_eq!(summary, ReplSummary { evaluated: 2, failed: 0 });
    }

    #[test]
    fn test_strings_print_quoted() {
        let (_, out) = session("(if #t \"large\" \"small\") 'sym\n'sym\n", quiet());
        assert_eq!(out, "\"large\"\n'sym\n");
    }

    #[test]
    fn test_prints_first_result_only() {
        let (_, out) = session("1 2 3\n", quiet());
        assert_eq!(out, "1\n");
    }

    #[test]
    fn test_show_all_results() {
        let config = ReplConfig {
            show_all_results: true,
            ..quiet()
        };
        let (_, out) = session("1 2 3\n", config);
        assert_eq!(out, "1\n2\n3\n");
    }

    #[test]
    fn test_error_is_reported_and_loop_continues() {
        let (summary, out) = session("(car 5)\nzzz\n(+ 1 1)\n", quiet());
        let lines: Vec<&str> = out.lines().collect();
        assert!(lines[0].starts_with("error: Type error"));
        assert_eq!(lines[1], "error: Unbound variable: zzz");
        assert_eq!(lines[2], "2");
        assert_eq!(summary, ReplSummary { evaluated: 1, failed: 2 });
    }

    #[test]
    fn test_syntax_error_keeps_session() {
        let (summary, out) = session("(define y 9)\n(+ y\ny\n", quiet());
        let lines: Vec<&str> = out.lines().collect();
        assert!(lines[1].starts_with("error: Syntax error"));
        assert_eq!(lines[2], "9");
        assert_eq!(summary.failed, 1);
    }

    #[test]
    fn test_quit_stops_loop() {
        let (summary, out) = session("1\n  quit  \n2\n", quiet());
        assert_eq!(out, "1\n");
        assert_eq!(summary.evaluated, 1);
    }

    #[test]
    fn test_blank_lines_and_prompt() {
        let (summary, out) = session("\n   \n(+ 1 2)\n", ReplConfig::default());
        assert_eq!(out, "> > > 3\n> ");
        assert_eq!(summary, ReplSummary { evaluated: 1, failed: 0 });
    }

    #[test]
    fn test_empty_program_prints_nothing() {
        let (summary, out) = session("; only a comment\n", quiet());
        assert_eq!(out, "");
        assert_eq!(summary.evaluated, 1);
    }

    #[test]
    fn test_session_inspectable_after_run() {
        let mut output = Vec::new();
        let mut repl = Repl::new(Cursor::new("(define z 1)\n"), &mut output);
        repl.run().unwrap();
        assert!(repl.evaluator().env().lookup("z").is_some());
    }
}
