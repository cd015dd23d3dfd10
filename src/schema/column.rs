//! Columns: the source of truth for table data

use serde::Serialize;

use crate::document::{Node, DATA, DATA_TYPE, DESCRIPTION};
use crate::error::{MochaError, Result};
use crate::schema::collection::Named;
use crate::schema::naming::{check_name, check_value};
use crate::schema::Data;
use crate::types::{ScalarType, Value};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Column {
    name: String,
    description: String,
    data_type: ScalarType,
    datas: Vec<Data>,
}

impl Column {
    pub fn new(name: &str, data_type: ScalarType) -> Result<Self> {
        check_name(name)?;
        Ok(Self {
            name: name.to_string(),
            description: String::new(),
            data_type,
            datas: Vec::new(),
        })
    }

    pub fn with_description(mut self, description: &str) -> Result<Self> {
        self.set_description(description)?;
        Ok(self)
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn set_description(&mut self, description: &str) -> Result<()> {
        check_value(description)?;
        self.description = description.to_string();
        Ok(())
    }

    pub fn data_type(&self) -> ScalarType {
        self.data_type
    }

    pub fn datas(&self) -> &[Data] {
        &self.datas
    }

    pub fn len(&self) -> usize {
        self.datas.len()
    }

    pub fn is_empty(&self) -> bool {
        self.datas.is_empty()
    }

    pub fn get(&self, index: usize) -> Result<&Data> {
        self.datas.get(index).ok_or_else(|| {
            MochaError::Range(format!(
                "index {} out of range for column '{}' ({} values)",
                index,
                self.name,
                self.datas.len()
            ))
        })
    }

    /// True when some value's text equals `text`
    pub fn contains_text(&self, text: &str) -> bool {
        self.datas.iter().any(|d| d.text() == text)
    }

    /// Append a value, converting it to the column's type
    pub fn add_data(&mut self, data: Data) -> Result<()> {
        let data = self.prepare(data, None)?;
        self.datas.push(data);
        Ok(())
    }

    pub fn add_text(&mut self, text: &str) -> Result<()> {
        self.reject_autoint()?;
        let data = Data::parse(self.data_type, text)?;
        self.add_data(data)
    }

    /// Overwrite the value at `index`
    pub fn update_data(&mut self, index: usize, text: &str) -> Result<()> {
        self.reject_autoint()?;
        self.get(index)?;
        let data = self.prepare(Data::parse(self.data_type, text)?, Some(index))?;
        self.datas[index] = data;
        Ok(())
    }

    /// Validate a caller-supplied value for this column.
    ///
    /// `skip` excludes one position from the uniqueness check (the slot being
    /// overwritten).
    pub(crate) fn prepare(&self, data: Data, skip: Option<usize>) -> Result<Data> {
        self.reject_autoint()?;
        let data = self.coerce(data)?;
        self.check_unique(data.value(), skip)?;
        Ok(data)
    }

    fn coerce(&self, data: Data) -> Result<Data> {
        if data.data_type() == self.data_type {
            return Ok(data);
        }
        Data::parse(self.data_type, &data.text())
    }

    fn reject_autoint(&self) -> Result<()> {
        if self.data_type == ScalarType::AutoInt {
            return Err(MochaError::InvalidOperation(format!(
                "column '{}' is AutoInt; its values are assigned automatically",
                self.name
            )));
        }
        Ok(())
    }

    /// Empty values are exempt
    pub fn check_unique(&self, value: &Value, skip: Option<usize>) -> Result<()> {
        if self.data_type != ScalarType::Unique || value.is_empty() {
            return Ok(());
        }
        let duplicate = self
            .datas
            .iter()
            .enumerate()
            .any(|(i, d)| Some(i) != skip && d.value() == value);
        if duplicate {
            return Err(MochaError::Conflict(format!(
                "value '{}' already exists in unique column '{}'",
                value, self.name
            )));
        }
        Ok(())
    }

    /// 1 + the current maximum, or 1 when the column is empty
    pub fn next_auto_int(&self) -> i64 {
        self.datas
            .iter()
            .filter_map(|d| d.value().as_i64())
            .max()
            .map_or(1, |max| max + 1)
    }

    /// The value the engine puts in a new slot this column did not receive
    pub(crate) fn generated(&self) -> Data {
        match self.data_type {
            ScalarType::AutoInt => Data::new(Value::AutoInt(self.next_auto_int())),
            other => Data::empty(other),
        }
    }

    pub(crate) fn push_generated(&mut self) {
        let data = self.generated();
        self.datas.push(data);
    }

    /// Push without validation; callers have already prepared the value
    pub(crate) fn push_unchecked(&mut self, data: Data) {
        self.datas.push(data);
    }

    pub(crate) fn replace_datas(&mut self, datas: Vec<Data>) {
        self.datas = datas;
    }

    pub fn into_datas(self) -> Vec<Data> {
        self.datas
    }

    /// Retype the column, converting every value or changing nothing.
    ///
    /// AutoInt renumbers the values 1..n; Unique wipes them.
    pub fn set_data_type(&mut self, target: ScalarType) -> Result<()> {
        if target == self.data_type {
            return Ok(());
        }
        let converted = match target {
            ScalarType::AutoInt => (1..=self.datas.len() as i64)
                .map(|n| Data::new(Value::AutoInt(n)))
                .collect(),
            ScalarType::Unique => vec![Data::empty(ScalarType::Unique); self.datas.len()],
            _ => self
                .datas
                .iter()
                .map(|d| d.convert(target))
                .collect::<Result<Vec<_>>>()?,
        };
        self.data_type = target;
        self.datas = converted;
        Ok(())
    }

    pub fn remove_at(&mut self, index: usize) -> Option<Data> {
        if index < self.datas.len() {
            Some(self.datas.remove(index))
        } else {
            None
        }
    }

    pub fn clear(&mut self) {
        self.datas.clear();
    }

    pub fn to_node(&self) -> Node {
        let mut node = Node::new(&self.name).with_attribute(DATA_TYPE, self.data_type.as_str());
        if !self.description.is_empty() {
            node.set_attribute(DESCRIPTION, &self.description);
        }
        node.children = self
            .datas
            .iter()
            .map(|d| Node::with_value(DATA, d.text()))
            .collect();
        node
    }

    pub fn from_node(node: &Node) -> Result<Self> {
        let data_type = match node.attribute(DATA_TYPE) {
            Some(name) => ScalarType::from_name(name)?,
            None => ScalarType::String,
        };
        let datas = node
            .children_named(DATA)
            .map(|d| {
                Data::parse(data_type, &d.value).unwrap_or_else(|e| {
                    log::warn!("column '{}': {}; stored as empty", node.name, e);
                    Data::lenient(data_type, &d.value)
                })
            })
            .collect();
        Ok(Self {
            name: node.name.clone(),
            description: node.attribute(DESCRIPTION).unwrap_or_default().to_string(),
            data_type,
            datas,
        })
    }
}

impl Named for Column {
    fn name(&self) -> &str {
        &self.name
    }

    fn set_name(&mut self, name: String) {
        self.name = name;
    }
}
