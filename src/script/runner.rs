//! Script runner for executing .mocha files

use std::fs;
use std::path::Path;

use crate::database::MochaDatabase;
use crate::engine::{ExecutionContext, MochaResult};
use crate::error::{MochaError, Result};
use crate::output::{format_output, OutputFormat};

pub const SCRIPT_EXTENSION: &str = "mocha";

/// One executable line of a script
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScriptLine {
    /// 1-based line number in the source file
    pub line: usize,
    pub command: String,
}

/// Split script text into commands, skipping blanks and `--` / `//` comments
pub fn parse_script(content: &str) -> Vec<ScriptLine> {
    content
        .lines()
        .enumerate()
        .filter_map(|(i, raw)| {
            let command = raw.trim();
            if command.is_empty() || command.starts_with("--") || command.starts_with("//") {
                None
            } else {
                Some(ScriptLine {
                    line: i + 1,
                    command: command.to_string(),
                })
            }
        })
        .collect()
}

/// Read and split a `.mocha` file; other extensions are rejected unread
pub fn read_script_file(path: &Path) -> Result<Vec<ScriptLine>> {
    if path.extension().is_none_or(|e| e != SCRIPT_EXTENSION) {
        return Err(MochaError::InvalidOperation(format!(
            "script file must have .{} extension: {}",
            SCRIPT_EXTENSION,
            path.display()
        )));
    }
    let content = fs::read_to_string(path)?;
    Ok(parse_script(&content))
}

/// A command that failed while running a script
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScriptFailure {
    pub line: usize,
    pub command: String,
    pub message: String,
}

impl std::fmt::Display for ScriptFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "line {}: {} ({})", self.line, self.message, self.command)
    }
}

/// Result of script execution
#[derive(Debug)]
pub struct ScriptResult {
    /// Results of the commands that succeeded, in order
    pub results: Vec<MochaResult>,
    pub statements_executed: usize,
    pub failures: Vec<ScriptFailure>,
}

impl ScriptResult {
    pub fn success(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Runs script lines against one open database
pub struct ScriptRunner<'a> {
    db: &'a mut MochaDatabase,
    exec_ctx: ExecutionContext,
    keep_going: bool,
    echo: bool,
}

impl<'a> ScriptRunner<'a> {
    pub fn new(db: &'a mut MochaDatabase, exec_ctx: ExecutionContext) -> Self {
        Self {
            db,
            exec_ctx,
            keep_going: false,
            echo: true,
        }
    }

    /// Continue past failing lines instead of stopping at the first one
    pub fn keep_going(mut self, keep_going: bool) -> Self {
        self.keep_going = keep_going;
        self
    }

    /// Print each non-empty result as it is produced
    pub fn echo(mut self, echo: bool) -> Self {
        self.echo = echo;
        self
    }

    /// Load and run a script file
    pub fn run_file(&mut self, path: &Path) -> Result<ScriptResult> {
        let lines = read_script_file(path)?;
        Ok(self.run_script(&lines))
    }

    pub fn run_str(&mut self, content: &str) -> ScriptResult {
        self.run_script(&parse_script(content))
    }

    pub fn run_script(&mut self, lines: &[ScriptLine]) -> ScriptResult {
        let mut results = Vec::new();
        let mut statements_executed = 0;
        let mut failures = Vec::new();

        for script_line in lines {
            log::debug!("line {}: {}", script_line.line, script_line.command);
            match self.db.execute(&script_line.command) {
                Ok(result) => {
                    statements_executed += 1;
                    if self.echo {
                        self.print(&result);
                    }
                    results.push(result);
                }
                Err(e) => {
                    let failure = ScriptFailure {
                        line: script_line.line,
                        command: script_line.command.clone(),
                        message: e.to_string(),
                    };
                    log::warn!("{}", failure);
                    failures.push(failure);
                    if !self.keep_going {
                        break;
                    }
                }
            }
        }

        ScriptResult {
            results,
            statements_executed,
            failures,
        }
    }

    fn print(&self, result: &MochaResult) {
        match result {
            MochaResult::Empty if !self.exec_ctx.verbose => {}
            _ => println!("{}", format_output(result, &self.exec_ctx.output_format)),
        }
    }

    pub fn output_format(&self) -> &OutputFormat {
        &self.exec_ctx.output_format
    }
}
