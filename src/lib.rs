//! MochaDB - an embedded, file-backed table store driven by MochaQ
//!
//! A database is one JSON document holding tables, stacks, sectors, virtual
//! disks and a bounded list of snapshot logs. Every change is committed through
//! the persistence layer before the in-memory copy is replaced.
//!
//! # Example
//!
//! ```no_run
//! use mochadb::{format_output, DatabaseOptions, MochaDatabase, OutputFormat};
//!
//! let mut db = MochaDatabase::open("people.json", DatabaseOptions::default()).unwrap();
//! db.run("CREATETABLE:People").unwrap();
//! db.run("CREATECOLUMN:People:Name").unwrap();
//! db.run("ADDDATA:People:Name:Alice").unwrap();
//! let result = db.execute("SELECT Name FROM People").unwrap();
//! println!("{}", format_output(&result, &OutputFormat::Human));
//! ```

pub mod cli;
pub mod database;
pub mod document;
pub mod engine;
pub mod error;
pub mod output;
pub mod parser;
pub mod schema;
pub mod script;
pub mod types;

#[cfg(feature = "repl")]
pub mod repl;

pub use database::{DatabaseOptions, MochaDatabase};
pub use document::{Document, FilePersistence, MemoryPersistence, Persistence, SaveHook};
pub use engine::{ExecutionContext, MochaResult, ResultValue};
pub use error::{MochaError, Result};
pub use output::{format_output, OutputFormat};
pub use parser::{classify, CommandKind};
pub use schema::{
    Collection, Column, Data, Directory, Disk, DiskFile, Folder, LogEntry, Named, Row, Sector, Stack,
    StackItem, Table,
};
pub use script::{validate_script, ScriptResult, ScriptRunner};
pub use types::{ScalarType, Value};
