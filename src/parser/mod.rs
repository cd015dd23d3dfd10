//! MochaQ command parsing: tokenizer, classifier and select grammar

pub mod classifier;
pub mod command;
pub mod select;

pub use classifier::{classify, is_declarative, is_mutating, is_value_returning, CommandKind};
pub use command::{is_break_query, CommandLine, BREAK_QUERY};
pub use select::{parse_select, SelectQuery};
