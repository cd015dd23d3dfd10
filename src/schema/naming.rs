//! Identifier and attribute-value legality checks

use std::sync::OnceLock;

use regex::Regex;

use crate::document::{
    DATA, DATA_TYPE, DESCRIPTION, ENTRY_TYPE, FILE_SYSTEM, LOG, LOGS, PASSWORD, ROOT_NODE,
    ROOT_SECTION, SECTORS, STACKS, TABLES, VERSION,
};
use crate::error::{MochaError, Result};

/// Element names the document layout reserves
pub const RESERVED_NAMES: &[&str] = &[
    ROOT_NODE,
    ROOT_SECTION,
    TABLES,
    SECTORS,
    STACKS,
    FILE_SYSTEM,
    LOGS,
    LOG,
    DATA,
];

/// Attribute keys the document layout reserves
pub const RESERVED_ATTRIBUTES: &[&str] = &[DESCRIPTION, DATA_TYPE, PASSWORD, VERSION, ENTRY_TYPE, "ID", "Time"];

fn identifier_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    // No whitespace, no command separator, no path separator, no select list separator
    PATTERN.get_or_init(|| Regex::new(r"^[^\s:/,]+$").expect("identifier pattern is valid"))
}

/// Check a table, column, stack, stack-item or sector name
pub fn check_name(name: &str) -> Result<()> {
    if name.trim().is_empty() {
        return Err(MochaError::Naming("name cannot be empty".to_string()));
    }
    if !identifier_pattern().is_match(name) {
        return Err(MochaError::Naming(format!(
            "'{}' contains whitespace or one of ':', '/', ','",
            name
        )));
    }
    if RESERVED_NAMES.iter().any(|r| r.eq_ignore_ascii_case(name)) {
        return Err(MochaError::Naming(format!("'{}' is a reserved name", name)));
    }
    Ok(())
}

/// Check a free-form attribute key
pub fn check_attribute_name(name: &str) -> Result<()> {
    check_name(name)?;
    if RESERVED_ATTRIBUTES.iter().any(|r| r.eq_ignore_ascii_case(name)) {
        return Err(MochaError::Naming(format!(
            "'{}' is a reserved attribute",
            name
        )));
    }
    Ok(())
}

/// Check an attribute value can be stored and echoed back verbatim
pub fn check_value(value: &str) -> Result<()> {
    if value.chars().any(char::is_control) {
        return Err(MochaError::Naming(
            "value cannot contain control characters".to_string(),
        ));
    }
    Ok(())
}

/// Non-empty segments of a `/` path
pub(crate) fn path_segments(path: &str) -> impl Iterator<Item = &str> {
    path.split('/').filter(|s| !s.is_empty())
}

/// Split `a/b/c` into (`a/b`, `c`)
pub(crate) fn split_path(path: &str) -> (&str, &str) {
    let path = path.trim_matches('/');
    match path.rsplit_once('/') {
        Some((parent, name)) => (parent, name),
        None => ("", path),
    }
}

pub fn check_password(password: &str) -> Result<()> {
    check_value(password)?;
    if password.contains(':') {
        return Err(MochaError::Naming("password cannot contain ':'".to_string()));
    }
    Ok(())
}
