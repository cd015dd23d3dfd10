//! Typed scalar values

use std::fmt;

use chrono::NaiveDateTime;
use serde::Serialize;

use crate::types::{ScalarType, DATETIME_FORMAT};

/// A parsed scalar value; the variant carries its `ScalarType`
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Value {
    String(String),
    Int16(i16),
    Int32(i32),
    Int64(i64),
    UInt16(u16),
    UInt32(u32),
    UInt64(u64),
    Byte(u8),
    SByte(i8),
    Float(f32),
    Double(f64),
    Decimal(rust_decimal::Decimal),
    Boolean(bool),
    Char(char),
    DateTime(NaiveDateTime),
    AutoInt(i64),
    Unique(String),
}

impl Value {
    pub fn data_type(&self) -> ScalarType {
        match self {
            Value::String(_) => ScalarType::String,
            Value::Int16(_) => ScalarType::Int16,
            Value::Int32(_) => ScalarType::Int32,
            Value::Int64(_) => ScalarType::Int64,
            Value::UInt16(_) => ScalarType::UInt16,
            Value::UInt32(_) => ScalarType::UInt32,
            Value::UInt64(_) => ScalarType::UInt64,
            Value::Byte(_) => ScalarType::Byte,
            Value::SByte(_) => ScalarType::SByte,
            Value::Float(_) => ScalarType::Float,
            Value::Double(_) => ScalarType::Double,
            Value::Decimal(_) => ScalarType::Decimal,
            Value::Boolean(_) => ScalarType::Boolean,
            Value::Char(_) => ScalarType::Char,
            Value::DateTime(_) => ScalarType::DateTime,
            Value::AutoInt(_) => ScalarType::AutoInt,
            Value::Unique(_) => ScalarType::Unique,
        }
    }

    /// Empty string values; exempt from uniqueness checks
    pub fn is_empty(&self) -> bool {
        match self {
            Value::String(s) | Value::Unique(s) => s.is_empty(),
            _ => false,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Int16(v) => Some(i64::from(*v)),
            Value::Int32(v) => Some(i64::from(*v)),
            Value::Int64(v) | Value::AutoInt(v) => Some(*v),
            Value::UInt16(v) => Some(i64::from(*v)),
            Value::UInt32(v) => Some(i64::from(*v)),
            Value::UInt64(v) => i64::try_from(*v).ok(),
            Value::Byte(v) => Some(i64::from(*v)),
            Value::SByte(v) => Some(i64::from(*v)),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) | Value::Unique(s) => Some(s),
            _ => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::String(s) | Value::Unique(s) => f.write_str(s),
            Value::Int16(v) => write!(f, "{}", v),
            Value::Int32(v) => write!(f, "{}", v),
            Value::Int64(v) | Value::AutoInt(v) => write!(f, "{}", v),
            Value::UInt16(v) => write!(f, "{}", v),
            Value::UInt32(v) => write!(f, "{}", v),
            Value::UInt64(v) => write!(f, "{}", v),
            Value::Byte(v) => write!(f, "{}", v),
            Value::SByte(v) => write!(f, "{}", v),
            Value::Float(v) => write!(f, "{}", v),
            Value::Double(v) => write!(f, "{}", v),
            Value::Decimal(v) => write!(f, "{}", v),
            Value::Boolean(v) => write!(f, "{}", v),
            Value::Char(c) => write!(f, "{}", c),
            Value::DateTime(dt) => write!(f, "{}", dt.format(DATETIME_FORMAT)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_round_trips_through_parse() {
        let samples = [
            (ScalarType::Double, "0.1"),
            (ScalarType::Float, "3.25"),
            (ScalarType::DateTime, "2023-12-31 23:59:59.250"),
            (ScalarType::Decimal, "-0.0001"),
            (ScalarType::Boolean, "true"),
        ];
        for (ty, text) in samples {
            let value = ty.parse(text).unwrap();
            assert_eq!(ty.parse(&value.to_string()).unwrap(), value);
        }
    }

    #[test]
    fn test_data_type_matches_variant() {
        assert_eq!(Value::AutoInt(3).data_type(), ScalarType::AutoInt);
        assert_eq!(Value::Unique("a".into()).data_type(), ScalarType::Unique);
    }

    #[test]
    fn test_is_empty_only_for_strings() {
        assert!(Value::Unique(String::new()).is_empty());
        assert!(!Value::Int32(0).is_empty());
    }

    #[test]
    fn test_as_i64() {
        assert_eq!(Value::AutoInt(9).as_i64(), Some(9));
        assert_eq!(Value::UInt64(u64::MAX).as_i64(), None);
        assert_eq!(Value::String("1".into()).as_i64(), None);
    }
}
