//! Uniform results of value-returning commands

use serde::Serialize;

use crate::schema::{
    Column, Data, Directory, Disk, DiskFile, LogEntry, Row, Sector, Stack, StackItem, Table,
};
use crate::types::ScalarType;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", content = "value")]
pub enum ResultValue {
    Bool(bool),
    Count(usize),
    Text(String),
    DataType(ScalarType),
    Data(Data),
    Row(Row),
    Column(Column),
    Table(Table),
    Sector(Sector),
    Stack(Stack),
    StackItem(StackItem),
    Disk(Disk),
    Directory(Directory),
    File(DiskFile),
    Log(LogEntry),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", content = "value")]
pub enum MochaResult {
    /// Mutating commands return nothing
    Empty,
    Single(ResultValue),
    Collection(Vec<ResultValue>),
}

impl MochaResult {
    pub fn single(value: impl Into<ResultValue>) -> Self {
        MochaResult::Single(value.into())
    }

    pub fn collection<T: Into<ResultValue>>(values: impl IntoIterator<Item = T>) -> Self {
        MochaResult::Collection(values.into_iter().map(Into::into).collect())
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            MochaResult::Single(ResultValue::Bool(b)) => Some(*b),
            _ => None,
        }
    }

    pub fn as_count(&self) -> Option<usize> {
        match self {
            MochaResult::Single(ResultValue::Count(n)) => Some(*n),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            MochaResult::Single(ResultValue::Text(s)) => Some(s),
            _ => None,
        }
    }

    pub fn into_table(self) -> Option<Table> {
        match self {
            MochaResult::Single(ResultValue::Table(t)) => Some(t),
            _ => None,
        }
    }

    /// Number of values carried
    pub fn len(&self) -> usize {
        match self {
            MochaResult::Empty => 0,
            MochaResult::Single(_) => 1,
            MochaResult::Collection(values) => values.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

macro_rules! impl_from_value {
    ($($ty:ty => $variant:ident),* $(,)?) => {
        $(
            impl From<$ty> for ResultValue {
                fn from(value: $ty) -> Self {
                    ResultValue::$variant(value)
                }
            }

            impl From<$ty> for MochaResult {
                fn from(value: $ty) -> Self {
                    MochaResult::Single(ResultValue::$variant(value))
                }
            }
        )*
    };
}

impl_from_value! {
    bool => Bool,
    usize => Count,
    String => Text,
    ScalarType => DataType,
    Data => Data,
    Row => Row,
    Column => Column,
    Table => Table,
    Sector => Sector,
    Stack => Stack,
    StackItem => StackItem,
    Disk => Disk,
    Directory => Directory,
    DiskFile => File,
    LogEntry => Log,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accessors() {
        assert_eq!(MochaResult::from(true).as_bool(), Some(true));
        assert_eq!(MochaResult::from(3usize).as_count(), Some(3));
        assert_eq!(MochaResult::from("x".to_string()).as_text(), Some("x"));
        assert_eq!(MochaResult::from(true).as_count(), None);
        assert!(MochaResult::Empty.is_empty());
    }

    #[test]
    fn test_collection() {
        let result = MochaResult::collection(vec!["a".to_string(), "b".to_string()]);
        assert_eq!(result.len(), 2);
        assert_eq!(result.as_text(), None);
    }

    #[test]
    fn test_serialize_tags() {
        let json = serde_json::to_string(&MochaResult::from(2usize)).unwrap();
        assert_eq!(json, r#"{"kind":"Single","value":{"kind":"Count","value":2}}"#);
        let json = serde_json::to_string(&MochaResult::Empty).unwrap();
        assert_eq!(json, r#"{"kind":"Empty"}"#);
    }
}
