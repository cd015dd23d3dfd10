//! Scalar type tags and text conversions

use std::fmt;
use std::str::FromStr;

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::error::{MochaError, Result};
use crate::types::Value;

/// Canonical text form of `DateTime` values
pub const DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.f";

const DATETIME_INPUT_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y/%m/%d %H:%M:%S%.f",
    "%d.%m.%Y %H:%M:%S%.f",
];

const DATE_INPUT_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d", "%d.%m.%Y"];

/// Tag identifying how a data value is parsed, validated and serialized
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ScalarType {
    String,
    Int16,
    Int32,
    Int64,
    UInt16,
    UInt32,
    UInt64,
    Byte,
    SByte,
    Float,
    Double,
    Decimal,
    Boolean,
    Char,
    DateTime,
    AutoInt,
    Unique,
}

impl ScalarType {
    pub const ALL: [ScalarType; 17] = [
        ScalarType::String,
        ScalarType::Int16,
        ScalarType::Int32,
        ScalarType::Int64,
        ScalarType::UInt16,
        ScalarType::UInt32,
        ScalarType::UInt64,
        ScalarType::Byte,
        ScalarType::SByte,
        ScalarType::Float,
        ScalarType::Double,
        ScalarType::Decimal,
        ScalarType::Boolean,
        ScalarType::Char,
        ScalarType::DateTime,
        ScalarType::AutoInt,
        ScalarType::Unique,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ScalarType::String => "String",
            ScalarType::Int16 => "Int16",
            ScalarType::Int32 => "Int32",
            ScalarType::Int64 => "Int64",
            ScalarType::UInt16 => "UInt16",
            ScalarType::UInt32 => "UInt32",
            ScalarType::UInt64 => "UInt64",
            ScalarType::Byte => "Byte",
            ScalarType::SByte => "SByte",
            ScalarType::Float => "Float",
            ScalarType::Double => "Double",
            ScalarType::Decimal => "Decimal",
            ScalarType::Boolean => "Boolean",
            ScalarType::Char => "Char",
            ScalarType::DateTime => "DateTime",
            ScalarType::AutoInt => "AutoInt",
            ScalarType::Unique => "Unique",
        }
    }

    /// Case-insensitive lookup by type name
    pub fn from_name(name: &str) -> Result<ScalarType> {
        let name = name.trim();
        Self::ALL
            .iter()
            .copied()
            .find(|t| t.as_str().eq_ignore_ascii_case(name))
            .ok_or_else(|| MochaError::Command(format!("Unknown data type: {}", name)))
    }

    /// Parse raw text into a value of this type
    pub fn parse(self, text: &str) -> Result<Value> {
        let mismatch = || {
            MochaError::TypeMismatch(format!("'{}' is not a valid {} value", text, self))
        };
        let trimmed = text.trim();

        match self {
            ScalarType::String => Ok(Value::String(text.to_string())),
            ScalarType::Unique => Ok(Value::Unique(text.to_string())),
            ScalarType::Int16 => trimmed.parse().map(Value::Int16).map_err(|_| mismatch()),
            ScalarType::Int32 => trimmed.parse().map(Value::Int32).map_err(|_| mismatch()),
            ScalarType::Int64 => trimmed.parse().map(Value::Int64).map_err(|_| mismatch()),
            ScalarType::UInt16 => trimmed.parse().map(Value::UInt16).map_err(|_| mismatch()),
            ScalarType::UInt32 => trimmed.parse().map(Value::UInt32).map_err(|_| mismatch()),
            ScalarType::UInt64 => trimmed.parse().map(Value::UInt64).map_err(|_| mismatch()),
            ScalarType::Byte => trimmed.parse().map(Value::Byte).map_err(|_| mismatch()),
            ScalarType::SByte => trimmed.parse().map(Value::SByte).map_err(|_| mismatch()),
            ScalarType::Float => trimmed.parse().map(Value::Float).map_err(|_| mismatch()),
            ScalarType::Double => trimmed.parse().map(Value::Double).map_err(|_| mismatch()),
            ScalarType::Decimal => rust_decimal::Decimal::from_str(trimmed)
                .map(Value::Decimal)
                .map_err(|_| mismatch()),
            ScalarType::AutoInt => trimmed.parse().map(Value::AutoInt).map_err(|_| mismatch()),
            ScalarType::Boolean => match trimmed.to_ascii_lowercase().as_str() {
                "true" => Ok(Value::Boolean(true)),
                "false" => Ok(Value::Boolean(false)),
                _ => Err(mismatch()),
            },
            ScalarType::Char => {
                let mut chars = text.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) => Ok(Value::Char(c)),
                    _ => Err(mismatch()),
                }
            }
            ScalarType::DateTime => parse_datetime(trimmed)
                .map(Value::DateTime)
                .ok_or_else(mismatch),
        }
    }

    /// True iff `parse` would succeed
    pub fn is_type(self, text: &str) -> bool {
        self.parse(text).is_ok()
    }

    /// The zero/empty value used to backfill new slots
    pub fn empty_value(self) -> Value {
        match self {
            ScalarType::String => Value::String(String::new()),
            ScalarType::Unique => Value::Unique(String::new()),
            ScalarType::Int16 => Value::Int16(0),
            ScalarType::Int32 => Value::Int32(0),
            ScalarType::Int64 => Value::Int64(0),
            ScalarType::UInt16 => Value::UInt16(0),
            ScalarType::UInt32 => Value::UInt32(0),
            ScalarType::UInt64 => Value::UInt64(0),
            ScalarType::Byte => Value::Byte(0),
            ScalarType::SByte => Value::SByte(0),
            ScalarType::Float => Value::Float(0.0),
            ScalarType::Double => Value::Double(0.0),
            ScalarType::Decimal => Value::Decimal(rust_decimal::Decimal::ZERO),
            ScalarType::Boolean => Value::Boolean(false),
            ScalarType::Char => Value::Char(' '),
            ScalarType::DateTime => Value::DateTime(NaiveDateTime::default()),
            ScalarType::AutoInt => Value::AutoInt(0),
        }
    }

    /// Best-effort conversion: falls back to `empty_value` when the text does not parse.
    ///
    /// Only used to backfill slots the caller never supplied; the write path
    /// goes through `parse` and fails on bad input.
    pub fn try_get_data(self, text: &str) -> Value {
        self.parse(text).unwrap_or_else(|_| self.empty_value())
    }

    pub fn is_numeric(self) -> bool {
        !matches!(
            self,
            ScalarType::String
                | ScalarType::Unique
                | ScalarType::Boolean
                | ScalarType::Char
                | ScalarType::DateTime
        )
    }
}

impl fmt::Display for ScalarType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ScalarType {
    type Err = MochaError;

    fn from_str(s: &str) -> Result<Self> {
        ScalarType::from_name(s)
    }
}

fn parse_datetime(text: &str) -> Option<NaiveDateTime> {
    if let Ok(dt) = chrono::DateTime::parse_from_rfc3339(text) {
        return Some(dt.naive_utc());
    }
    for format in DATETIME_INPUT_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(text, format) {
            return Some(dt);
        }
    }
    DATE_INPUT_FORMATS
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(text, format).ok())
        .and_then(|date| date.and_hms_opt(0, 0, 0))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_name_is_case_insensitive() {
        assert_eq!(ScalarType::from_name("int32").unwrap(), ScalarType::Int32);
        assert_eq!(ScalarType::from_name(" AUTOINT ").unwrap(), ScalarType::AutoInt);
        assert_eq!("uint64".parse::<ScalarType>().unwrap(), ScalarType::UInt64);
    }

    #[test]
    fn test_from_name_unknown() {
        let err = ScalarType::from_name("Money").unwrap_err();
        assert!(matches!(err, MochaError::Command(_)));
    }

    #[test]
    fn test_parse_integers() {
        assert_eq!(ScalarType::Int32.parse(" 42 ").unwrap(), Value::Int32(42));
        assert_eq!(ScalarType::SByte.parse("-7").unwrap(), Value::SByte(-7));
        assert!(ScalarType::Byte.parse("256").is_err());
        assert!(ScalarType::UInt16.parse("-1").is_err());
    }

    #[test]
    fn test_parse_failure_is_type_mismatch() {
        let err = ScalarType::Int32.parse("ten").unwrap_err();
        assert!(matches!(err, MochaError::TypeMismatch(_)));
    }

    #[test]
    fn test_parse_boolean() {
        assert_eq!(ScalarType::Boolean.parse("True").unwrap(), Value::Boolean(true));
        assert_eq!(ScalarType::Boolean.parse("false").unwrap(), Value::Boolean(false));
        assert!(!ScalarType::Boolean.is_type("yes"));
    }

    #[test]
    fn test_parse_char() {
        assert_eq!(ScalarType::Char.parse("x").unwrap(), Value::Char('x'));
        assert!(!ScalarType::Char.is_type("xy"));
        assert!(!ScalarType::Char.is_type(""));
    }

    #[test]
    fn test_parse_datetime_formats() {
        let expected = NaiveDate::from_ymd_opt(2024, 3, 5)
            .unwrap()
            .and_hms_opt(10, 30, 0)
            .unwrap();
        assert_eq!(
            ScalarType::DateTime.parse("2024-03-05 10:30:00").unwrap(),
            Value::DateTime(expected)
        );
        assert_eq!(
            ScalarType::DateTime.parse("2024-03-05T10:30:00Z").unwrap(),
            Value::DateTime(expected)
        );
        let midnight = NaiveDate::from_ymd_opt(2024, 3, 5)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        assert_eq!(
            ScalarType::DateTime.parse("2024-03-05").unwrap(),
            Value::DateTime(midnight)
        );
    }

    #[test]
    fn test_decimal_keeps_precision() {
        let value = ScalarType::Decimal.parse("12.50").unwrap();
        assert_eq!(value.to_string(), "12.50");
    }

    #[test]
    fn test_try_get_data_falls_back_to_empty() {
        assert_eq!(ScalarType::Int64.try_get_data("abc"), Value::Int64(0));
        assert_eq!(ScalarType::Int64.try_get_data("5"), Value::Int64(5));
        assert_eq!(
            ScalarType::String.try_get_data("abc"),
            Value::String("abc".to_string())
        );
    }

    #[test]
    fn test_string_accepts_anything() {
        assert!(ScalarType::String.is_type(""));
        assert!(ScalarType::Unique.is_type("anything at all"));
    }
}
