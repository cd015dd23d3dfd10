//! Script execution module for MochaDB
//!
//! Handles loading, validating, and executing .mocha script files.

pub mod runner;
pub mod validator;

pub use runner::{parse_script, read_script_file, ScriptFailure, ScriptLine, ScriptResult, ScriptRunner, SCRIPT_EXTENSION};
pub use validator::{validate_script, ScriptValidationError, ValidationOptions, ValidationSeverity, has_errors, has_warnings};
