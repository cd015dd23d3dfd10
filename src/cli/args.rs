//! CLI argument parsing

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::database::DatabaseOptions;
use crate::engine::ExecutionContext;
use crate::output::OutputFormat;

#[derive(Parser)]
#[command(name = "mocha")]
#[command(author, version, about = "Embedded table store driven by MochaQ commands", long_about = None)]
pub struct Args {
    #[command(subcommand)]
    pub command: SubCommand,

    /// Database file (created when missing)
    #[arg(short, long, global = true, env = "MOCHA_DB", default_value = "mocha.json")]
    pub database: PathBuf,

    /// Password of a protected database
    #[arg(long, global = true, env = "MOCHA_PASSWORD", hide_env_values = true)]
    pub password: Option<String>,

    /// Open without creating or modifying the file
    #[arg(long, global = true)]
    pub read_only: bool,

    /// Snapshot the database before every change
    #[arg(long, global = true)]
    pub log_changes: bool,

    /// Output format as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

impl Args {
    pub fn database_options(&self) -> DatabaseOptions {
        DatabaseOptions {
            read_only: self.read_only,
            password: self.password.clone(),
            log_changes: self.log_changes,
            ..Default::default()
        }
    }

    pub fn execution_context(&self) -> ExecutionContext {
        ExecutionContext {
            output_format: if self.json { OutputFormat::Json } else { OutputFormat::Human },
            verbose: self.verbose,
        }
    }
}

#[derive(Subcommand)]
pub enum SubCommand {
    /// Classify a command and execute it
    Query {
        /// Any MochaQ command or select
        command: String,
    },

    /// Execute a mutating command
    Run {
        command: String,
    },

    /// Execute a command and print its value (mutations print OK or a flag)
    Get {
        command: String,
    },

    /// Run SELECT <columns> FROM <table>
    Select {
        query: String,
    },

    /// Run a MochaQ script file (.mocha)
    Script {
        file: PathBuf,

        /// Continue after a failing line
        #[arg(long)]
        keep_going: bool,
    },

    /// Validate a script without executing it
    Check {
        file: PathBuf,
    },

    /// Start interactive REPL mode
    Repl,
}
