//! Scalar type model

mod scalar;
mod value;

pub use scalar::{ScalarType, DATETIME_FORMAT};
pub use value::Value;
