//! Decide how a command is executed from its leading keyword

use serde::Serialize;

use crate::parser::command::FLAG_PREFIX;

/// Namespace for disk, directory and file keywords
pub const FILE_SYSTEM_NAMESPACE: &str = "FILESYSTEM_";

const MUTATING_PREFIXES: &[&str] = &[
    "RESET", "SET", "ADD", "CREATE", "CLEAR", "REMOVE", "RENAME", "UPDATE", "RESTORE",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum CommandKind {
    /// Changes the database, returns nothing
    Mutating,
    /// Returns a value; `#` commands also mutate
    ValueReturning,
    /// `SELECT ... FROM ...`
    Declarative,
}

/// `None` when no rule matches; callers reject such commands
pub fn classify(command: &str) -> Option<CommandKind> {
    let trimmed = command.trim();
    let first_token = trimmed.split_whitespace().next()?;
    if first_token.eq_ignore_ascii_case("SELECT") {
        return Some(CommandKind::Declarative);
    }
    if trimmed.starts_with(FLAG_PREFIX) {
        return Some(CommandKind::ValueReturning);
    }

    let keyword = trimmed.split(':').next().unwrap_or_default().trim().to_uppercase();
    let keyword = keyword.strip_prefix(FILE_SYSTEM_NAMESPACE).unwrap_or(&keyword);
    if keyword.starts_with("GET") || keyword.starts_with("EXISTS") || keyword.ends_with("COUNT") {
        return Some(CommandKind::ValueReturning);
    }
    if MUTATING_PREFIXES.iter().any(|prefix| keyword.starts_with(prefix)) {
        return Some(CommandKind::Mutating);
    }
    None
}

pub fn is_mutating(command: &str) -> bool {
    classify(command) == Some(CommandKind::Mutating)
}

pub fn is_value_returning(command: &str) -> bool {
    classify(command) == Some(CommandKind::ValueReturning)
}

pub fn is_declarative(command: &str) -> bool {
    classify(command) == Some(CommandKind::Declarative)
}
