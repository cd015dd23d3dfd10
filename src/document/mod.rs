//! The backing document: a path-addressed tree plus the collaborators
//! that persist it.
//!
//! Layout of a database document:
//!
//! ```text
//! Mocha (Version)
//! ├── Root
//! │   ├── Password
//! │   └── Description
//! ├── Sectors/<sector> (Description, free-form attributes)
//! ├── Stacks/<stack>/<item>/<item>...
//! ├── Tables/<table>/<column> (DataType, Description)/Data*
//! ├── FileSystem/<disk>/<directory (Type)>.../<file (Type)>
//! └── Logs/Log (ID, Time)/<snapshot sections>
//! ```

pub mod hooks;
pub mod node;
pub mod persistence;

pub use hooks::{ChangeLogHook, PendingSave, SaveHook, MAX_LOGS};
pub use node::*;
pub use persistence::{FilePersistence, MemoryPersistence, Persistence};
