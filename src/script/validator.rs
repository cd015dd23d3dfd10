//! Script validation for MochaQ
//!
//! Checks every line against the classifier and dispatch table without
//! touching a database.

use crate::engine::{lookup, Handler};
use crate::parser::{classify, is_break_query, parse_select, CommandKind, CommandLine};
use crate::script::runner::ScriptLine;

/// Keywords that wipe data in bulk
pub const DESTRUCTIVE_KEYWORDS: [&str; 4] = ["RESETMOCHA", "CLEARALL", "CLEARTABLES", "CLEARLOGS"];

/// Errors that can occur during script validation
#[derive(Debug, Clone)]
pub struct ScriptValidationError {
    pub line: Option<usize>,
    pub message: String,
    pub severity: ValidationSeverity,
}

/// Severity level for validation issues
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationSeverity {
    Error,
    Warning,
}

impl std::fmt::Display for ScriptValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let prefix = match self.severity {
            ValidationSeverity::Error => "ERROR",
            ValidationSeverity::Warning => "WARNING",
        };
        if let Some(line) = self.line {
            write!(f, "{} (line {}): {}", prefix, line, self.message)
        } else {
            write!(f, "{}: {}", prefix, self.message)
        }
    }
}

/// Validation options
#[derive(Debug, Clone)]
pub struct ValidationOptions {
    /// Mutations are errors when the target database is opened read-only
    pub read_only: bool,
    /// Warn on bulk-clearing keywords
    pub warn_destructive: bool,
}

impl Default for ValidationOptions {
    fn default() -> Self {
        Self {
            read_only: false,
            warn_destructive: true,
        }
    }
}

/// Validate parsed script lines
pub fn validate_script(lines: &[ScriptLine], options: &ValidationOptions) -> Vec<ScriptValidationError> {
    let mut errors = Vec::new();

    for script_line in lines {
        validate_command(&script_line.command, options, &mut errors, script_line.line);
    }

    errors
}

fn validate_command(
    command: &str,
    options: &ValidationOptions,
    errors: &mut Vec<ScriptValidationError>,
    line: usize,
) {
    let mut error = |message: String| {
        errors.push(ScriptValidationError {
            line: Some(line),
            message,
            severity: ValidationSeverity::Error,
        })
    };

    if is_break_query(command) {
        return;
    }

    let kind = match classify(command) {
        Some(kind) => kind,
        None => return error(format!("unrecognised command: {}", command)),
    };

    if kind == CommandKind::Declarative {
        if let Err(e) = parse_select(command) {
            error(e.to_string());
        }
        return;
    }

    let parsed = match CommandLine::parse(command) {
        Ok(parsed) => parsed,
        Err(e) => return error(e.to_string()),
    };

    let operation = match lookup(parsed.arity(), &parsed.keyword) {
        Some(operation) => operation,
        None => {
            return error(format!(
                "{} does not take {} argument(s)",
                parsed.keyword,
                parsed.arity()
            ))
        }
    };

    let routable = match (kind, operation.handler) {
        (CommandKind::Mutating, Handler::Get(_)) => false,
        (CommandKind::Declarative, _) => false,
        (CommandKind::Mutating, _) | (CommandKind::ValueReturning, _) => true,
    };
    if !routable {
        return error(format!("{} cannot be used in this form", parsed.keyword));
    }

    if options.read_only && operation.is_mutating() {
        return error(format!("{} modifies a read-only database", parsed.keyword));
    }

    if options.warn_destructive && DESTRUCTIVE_KEYWORDS.contains(&operation.keyword) {
        errors.push(ScriptValidationError {
            line: Some(line),
            message: format!("{} discards stored data", operation.keyword),
            severity: ValidationSeverity::Warning,
        });
    }
}

/// Check if a script has any validation errors (not just warnings)
pub fn has_errors(errors: &[ScriptValidationError]) -> bool {
    errors
        .iter()
        .any(|e| e.severity == ValidationSeverity::Error)
}

/// Check if a script has any validation warnings
pub fn has_warnings(errors: &[ScriptValidationError]) -> bool {
    errors
        .iter()
        .any(|e| e.severity == ValidationSeverity::Warning)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::script::parse_script;

    fn check(content: &str) -> Vec<ScriptValidationError> {
        validate_script(&parse_script(content), &ValidationOptions::default())
    }

    #[test]
    fn test_validate_clean_script() {
        let errors = check(
            "CREATETABLE:People\nCREATECOLUMN:People:Age:Int32\n#REMOVETABLE:Ghost\n\
             ROWCOUNT:People\nSELECT Age FROM People\nBREAKQUERY",
        );
        assert!(errors.is_empty(), "{:?}", errors);
    }

    #[test]
    fn test_unknown_keyword() {
        let errors = check("DROPTABLE:People");
        assert!(has_errors(&errors));
        assert_eq!(errors[0].line, Some(1));
    }

    #[test]
    fn test_wrong_arity() {
        let errors = check("CREATETABLE:People\nUPDATEDATA:People:Name:0");
        assert!(has_errors(&errors));
        assert_eq!(errors[0].line, Some(2));
    }

    #[test]
    fn test_missing_parameter() {
        assert!(has_errors(&check("CREATECOLUMN::Name")));
    }

    #[test]
    fn test_bad_select() {
        assert!(has_errors(&check("SELECT Name People")));
    }

    #[test]
    fn test_get_without_flag_must_be_query() {
        assert!(has_errors(&check("GETREMOVETABLE:People")));
        assert!(!has_errors(&check("#CREATETABLE:People")));
    }

    #[test]
    fn test_destructive_warnings() {
        let errors = check("CLEARALL\nRESETMOCHA");
        assert!(!has_errors(&errors));
        assert!(has_warnings(&errors));
        assert_eq!(errors.len(), 2);

        let quiet = ValidationOptions {
            warn_destructive: false,
            ..Default::default()
        };
        assert!(validate_script(&parse_script("CLEARALL"), &quiet).is_empty());
    }

    #[test]
    fn test_read_only() {
        let options = ValidationOptions {
            read_only: true,
            ..Default::default()
        };
        let errors = validate_script(&parse_script("GETTABLES\nCREATETABLE:X"), &options);
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].line, Some(2));
    }
}
