//! Execution engine for MochaQ commands

pub mod dispatch;
pub mod executor;
pub mod result;

pub use dispatch::{lookup, operations, Handler, Operation, MAX_ARITY};
pub use executor::ExecutionContext;
pub use result::{MochaResult, ResultValue};
