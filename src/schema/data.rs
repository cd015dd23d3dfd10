//! A single typed cell

use serde::ser::SerializeStruct;
use serde::{Serialize, Serializer};

use crate::error::{MochaError, Result};
use crate::types::{ScalarType, Value};

/// A typed value as stored in a column
#[derive(Debug, Clone, PartialEq)]
pub struct Data {
    value: Value,
}

impl Data {
    pub fn new(value: Value) -> Self {
        Self { value }
    }

    /// Parse text as `data_type`, failing with `TypeMismatch`
    pub fn parse(data_type: ScalarType, text: &str) -> Result<Self> {
        data_type.parse(text).map(Self::new)
    }

    pub fn empty(data_type: ScalarType) -> Self {
        Self::new(data_type.empty_value())
    }

    /// Parse text as `data_type`, substituting the empty value on failure
    pub fn lenient(data_type: ScalarType, text: &str) -> Self {
        Self::new(data_type.try_get_data(text))
    }

    pub fn data_type(&self) -> ScalarType {
        self.value.data_type()
    }

    pub fn value(&self) -> &Value {
        &self.value
    }

    pub fn into_value(self) -> Value {
        self.value
    }

    /// Canonical text form, as written to the document
    pub fn text(&self) -> String {
        self.value.to_string()
    }

    pub fn is_empty(&self) -> bool {
        self.value.is_empty()
    }

    /// Replace the value, keeping the type. AutoInt values are engine-assigned.
    pub fn set_value(&mut self, text: &str) -> Result<()> {
        let data_type = self.data_type();
        if data_type == ScalarType::AutoInt {
            return Err(MochaError::InvalidOperation(
                "AutoInt values are assigned automatically".to_string(),
            ));
        }
        self.value = data_type.parse(text)?;
        Ok(())
    }

    /// Re-read this value's text as another type
    pub fn convert(&self, target: ScalarType) -> Result<Data> {
        if self.data_type() == target {
            return Ok(self.clone());
        }
        Data::parse(target, &self.text())
    }
}

impl From<Value> for Data {
    fn from(value: Value) -> Self {
        Self::new(value)
    }
}

impl std::fmt::Display for Data {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.value.fmt(f)
    }
}

impl Serialize for Data {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("Data", 2)?;
        state.serialize_field("type", &self.data_type())?;
        state.serialize_field("value", &self.value)?;
        state.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_and_text() {
        let data = Data::parse(ScalarType::Int32, "42").unwrap();
        assert_eq!(data.data_type(), ScalarType::Int32);
        assert_eq!(data.text(), "42");
    }

    #[test]
    fn test_set_value_checks_type() {
        let mut data = Data::parse(ScalarType::Int32, "1").unwrap();
        assert!(matches!(data.set_value("x"), Err(MochaError::TypeMismatch(_))));
        assert_eq!(data.text(), "1");
        data.set_value("7").unwrap();
        assert_eq!(data.value(), &Value::Int32(7));
    }

    #[test]
    fn test_autoint_rejects_direct_write() {
        let mut data = Data::new(Value::AutoInt(3));
        let err = data.set_value("4").unwrap_err();
        assert!(matches!(err, MochaError::InvalidOperation(_)));
    }

    #[test]
    fn test_convert() {
        let data = Data::parse(ScalarType::String, "10").unwrap();
        assert_eq!(data.convert(ScalarType::Int64).unwrap().value(), &Value::Int64(10));
        let bad = Data::parse(ScalarType::String, "ten").unwrap();
        assert!(bad.convert(ScalarType::Int64).is_err());
    }

    #[test]
    fn test_lenient() {
        assert_eq!(Data::lenient(ScalarType::Byte, "300").value(), &Value::Byte(0));
    }

    #[test]
    fn test_serialize() {
        let data = Data::parse(ScalarType::Boolean, "true").unwrap();
        let json = serde_json::to_string(&data).unwrap();
        assert_eq!(json, r#"{"type":"Boolean","value":true}"#);
    }
}
