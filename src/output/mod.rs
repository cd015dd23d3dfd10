//! Output formatting module

pub mod formatter;
pub mod human;
pub mod json;

pub use formatter::{OutputFormat, format_output};
