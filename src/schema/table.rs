//! Tables: columns are stored, rows are recomputed from them

use serde::Serialize;

use crate::document::{Node, DESCRIPTION};
use crate::error::{MochaError, Result};
use crate::schema::collection::{Collection, Named};
use crate::schema::naming::{check_name, check_value};
use crate::schema::{Column, Data, Row};
use crate::types::ScalarType;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Table {
    name: String,
    description: String,
    columns: Collection<Column>,
    rows: Vec<Row>,
}

impl Table {
    pub fn new(name: &str) -> Result<Self> {
        check_name(name)?;
        Ok(Self {
            name: name.to_string(),
            description: String::new(),
            columns: Collection::new("column"),
            rows: Vec::new(),
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

    pub fn columns(&self) -> &Collection<Column> {
        &self.columns
    }

    pub fn column(&self, name: &str) -> Result<&Column> {
        self.columns.require(name)
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn row(&self, index: usize) -> Result<&Row> {
        self.rows.get(index).ok_or_else(|| {
            MochaError::Range(format!(
                "row {} out of range for table '{}' ({} rows)",
                index,
                self.name,
                self.rows.len()
            ))
        })
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Add a column. An empty column is backfilled to the current row count;
    /// a populated one must match it unless the table holds no rows yet.
    pub fn add_column(&mut self, mut column: Column) -> Result<()> {
        let row_count = self.row_count();
        if column.len() < row_count {
            if !column.is_empty() {
                return Err(column_length_mismatch(&column, row_count));
            }
            for _ in 0..row_count {
                column.push_generated();
            }
        }
        if column.len() > row_count && row_count > 0 {
            return Err(column_length_mismatch(&column, row_count));
        }

        let new_rows = column.len() - row_count;
        self.columns.add(column)?;
        if new_rows > 0 {
            let added = self.columns.len() - 1;
            for existing in self.columns.iter_mut().take(added) {
                for _ in 0..new_rows {
                    existing.push_generated();
                }
            }
        }
        self.set_rows_by_datas();
        Ok(())
    }

    pub fn remove_column(&mut self, name: &str) -> bool {
        let removed = self.columns.remove(name).is_some();
        if removed {
            self.set_rows_by_datas();
        }
        removed
    }

    pub fn rename_column(&mut self, name: &str, new_name: &str) -> Result<()> {
        self.columns.rename(name, new_name)
    }

    pub fn set_column_description(&mut self, name: &str, description: &str) -> Result<()> {
        self.columns.require_mut(name)?.set_description(description)
    }

    pub fn set_column_data_type(&mut self, name: &str, data_type: ScalarType) -> Result<()> {
        self.columns.require_mut(name)?.set_data_type(data_type)?;
        self.set_rows_by_datas();
        Ok(())
    }

    /// Append one value to a column; every other column gets a generated slot
    pub fn add_data(&mut self, column: &str, text: &str) -> Result<()> {
        self.columns.require_mut(column)?.add_text(text)?;
        for other in self.columns.iter_mut() {
            if other.name() != column {
                other.push_generated();
            }
        }
        self.set_rows_by_datas();
        Ok(())
    }

    pub fn update_data(&mut self, column: &str, index: usize, text: &str) -> Result<()> {
        self.columns.require_mut(column)?.update_data(index, text)?;
        self.set_rows_by_datas();
        Ok(())
    }

    /// Append a row. AutoInt positions ignore the supplied value.
    pub fn add_row(&mut self, row: Row) -> Result<()> {
        self.require_columns()?;
        if row.len() != self.columns.len() {
            return Err(data_count_mismatch());
        }
        let prepared = self
            .columns
            .iter()
            .zip(row.into_datas())
            .map(|(column, data)| match column.data_type() {
                ScalarType::AutoInt => Ok(column.generated()),
                _ => column.prepare(data, None),
            })
            .collect::<Result<Vec<_>>>()?;

        for (column, data) in self.columns.iter_mut().zip(prepared) {
            column.push_unchecked(data);
        }
        self.set_rows_by_datas();
        Ok(())
    }

    /// Append a row of empty values
    pub fn add_empty_row(&mut self) -> Result<()> {
        self.require_columns()?;
        for column in self.columns.iter_mut() {
            column.push_generated();
        }
        self.set_rows_by_datas();
        Ok(())
    }

    /// Returns false when `index` is out of range
    pub fn remove_row(&mut self, index: usize) -> bool {
        if index >= self.row_count() {
            return false;
        }
        for column in self.columns.iter_mut() {
            column.remove_at(index);
        }
        self.set_rows_by_datas();
        true
    }

    pub fn clear_rows(&mut self) {
        for column in self.columns.iter_mut() {
            column.clear();
        }
        self.rows.clear();
    }

    /// Replace all data with `rows`, validating every row before anything changes
    pub fn set_rows(&mut self, rows: &[Row]) -> Result<()> {
        let staged = self.columns_from_rows(rows)?;
        self.apply_columns(staged);
        Ok(())
    }

    /// Rewrite the columns from the current rows; AutoInt columns are renumbered
    pub fn set_datas_by_rows(&mut self) -> Result<()> {
        let staged = self.columns_from_rows(&self.rows)?;
        self.apply_columns(staged);
        Ok(())
    }

    /// Rebuild rows from the columns, padding short columns with empty values
    pub fn set_rows_by_datas(&mut self) {
        let count = self.columns.iter().map(Column::len).max().unwrap_or(0);
        let rows: Vec<Row> = (0..count)
            .map(|index| {
                self.columns
                    .iter()
                    .map(|column| {
                        column
                            .datas()
                            .get(index)
                            .cloned()
                            .unwrap_or_else(|| Data::empty(column.data_type()))
                    })
                    .collect::<Row>()
            })
            .collect();
        self.rows = rows;
    }

    fn columns_from_rows(&self, rows: &[Row]) -> Result<Vec<Vec<Data>>> {
        let mut staged: Vec<Column> = self
            .columns
            .iter()
            .map(|column| {
                let mut column = column.clone();
                column.clear();
                column
            })
            .collect();

        for row in rows {
            if row.len() != staged.len() {
                return Err(data_count_mismatch());
            }
            for (column, data) in staged.iter_mut().zip(row.datas()) {
                let data = match column.data_type() {
                    ScalarType::AutoInt => column.generated(),
                    _ => column.prepare(data.clone(), None)?,
                };
                column.push_unchecked(data);
            }
        }
        Ok(staged.into_iter().map(Column::into_datas).collect())
    }

    fn apply_columns(&mut self, staged: Vec<Vec<Data>>) {
        for (column, datas) in self.columns.iter_mut().zip(staged) {
            column.replace_datas(datas);
        }
        self.set_rows_by_datas();
    }

    fn require_columns(&self) -> Result<()> {
        if self.columns.is_empty() {
            return Err(MochaError::InvalidOperation(format!(
                "table '{}' has no columns",
                self.name
            )));
        }
        Ok(())
    }

    /// A table with the same name holding copies of the named columns, in the given order
    pub fn select(&self, names: &[&str]) -> Result<Table> {
        let mut projection = Table::new(&self.name)?;
        projection.description = self.description.clone();
        for name in names {
            projection.add_column(self.columns.require(name)?.clone())?;
        }
        Ok(projection)
    }

    pub fn to_node(&self) -> Node {
        let mut node = Node::new(&self.name);
        if !self.description.is_empty() {
            node.set_attribute(DESCRIPTION, &self.description);
        }
        node.children = self.columns.iter().map(Column::to_node).collect();
        node
    }

    pub fn from_node(node: &Node) -> Result<Self> {
        let mut table = Table::new(&node.name)?;
        table.description = node.attribute(DESCRIPTION).unwrap_or_default().to_string();
        for child in &node.children {
            table.columns.add(Column::from_node(child)?)?;
        }
        table.set_rows_by_datas();
        Ok(table)
    }
}

impl Named for Table {
    fn name(&self) -> &str {
        &self.name
    }

    fn set_name(&mut self, name: String) {
        self.name = name;
    }
}

fn data_count_mismatch() -> MochaError {
    MochaError::InvalidOperation("data count must equal column count".to_string())
}

fn column_length_mismatch(column: &Column, row_count: usize) -> MochaError {
    MochaError::InvalidOperation(format!(
        "column '{}' has {} values but the table has {} rows",
        column.name(),
        column.len(),
        row_count
    ))
}
