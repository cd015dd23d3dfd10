//! REPL module for interactive mode

pub mod interactive;

pub use interactive::run_repl;
