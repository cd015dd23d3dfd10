use serde::Serialize;

use crate::error::{MochaError, Result};
use crate::schema::Data;

/// One value per column, aligned with the table's column order
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(transparent)]
pub struct Row {
    datas: Vec<Data>,
}

impl Row {
    pub fn new(datas: Vec<Data>) -> Self {
        Self { datas }
    }

    pub fn datas(&self) -> &[Data] {
        &self.datas
    }

    pub fn into_datas(self) -> Vec<Data> {
        self.datas
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
                "index {} out of range for row of {} values",
                index,
                self.datas.len()
            ))
        })
    }

    pub fn push(&mut self, data: Data) {
        self.datas.push(data);
    }

    pub fn texts(&self) -> Vec<String> {
        self.datas.iter().map(Data::text).collect()
    }
}

impl From<Vec<Data>> for Row {
    fn from(datas: Vec<Data>) -> Self {
        Self::new(datas)
    }
}

impl FromIterator<Data> for Row {
    fn from_iter<I: IntoIterator<Item = Data>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}
