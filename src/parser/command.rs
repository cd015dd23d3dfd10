//! Colon-delimited command lines: `KEYWORD[:arg[:arg...]]`

use crate::error::{MochaError, Result};

/// Explicit no-op recognised before any other parsing
pub const BREAK_QUERY: &str = "BREAKQUERY";

/// Leading sentinel asking a mutation to report success as a boolean
pub const FLAG_PREFIX: char = '#';

pub fn is_break_query(command: &str) -> bool {
    command.trim().eq_ignore_ascii_case(BREAK_QUERY)
}

/// A tokenized command
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandLine {
    /// Command started with `#`
    pub flagged: bool,
    /// Upper-cased operation token
    pub keyword: String,
    pub args: Vec<String>,
}

impl CommandLine {
    /// Split on `:` and check that every non-final argument is present
    pub fn parse(command: &str) -> Result<Self> {
        let trimmed = command.trim();
        let (flagged, body) = match trimmed.strip_prefix(FLAG_PREFIX) {
            Some(rest) => (true, rest.trim_start()),
            None => (false, trimmed),
        };

        let mut segments = body.split(':');
        let keyword = segments.next().unwrap_or_default().trim().to_uppercase();
        if keyword.is_empty() {
            return Err(MochaError::invalid_query());
        }

        let args: Vec<String> = segments.map(str::to_string).collect();
        if let Some((_, leading)) = args.split_last() {
            if leading.iter().any(|arg| arg.is_empty()) {
                return Err(MochaError::Command("parameter not found".to_string()));
            }
        }

        Ok(Self {
            flagged,
            keyword,
            args,
        })
    }

    pub fn arity(&self) -> usize {
        self.args.len()
    }

    pub fn arg_refs(&self) -> Vec<&str> {
        self.args.iter().map(String::as_str).collect()
    }
}
