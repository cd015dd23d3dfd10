//! In-memory entities rebuilt from the document on every read

mod collection;
mod column;
mod data;
mod filesystem;
mod log_entry;
pub mod naming;
mod row;
mod sector;
mod stack;
mod table;

pub use collection::{Collection, Named};
pub use column::Column;
pub use data::Data;
pub use filesystem::{Directory, Disk, DiskFile, Folder};
pub use log_entry::LogEntry;
pub use row::Row;
pub use sector::Sector;
pub use stack::{Stack, StackItem};
pub use table::Table;
