//! Table, column, row and data operations

use crate::database::entity;
use crate::database::MochaDatabase;
use crate::error::Result;
use crate::schema::{Column, Data, Row, Table};
use crate::types::ScalarType;

impl MochaDatabase {
    pub fn create_table(&mut self, name: &str) -> Result<()> {
        let table = Table::new(name)?;
        self.add_table(&table)
    }

    /// Store a fully built table under its own name
    pub fn add_table(&mut self, table: &Table) -> Result<()> {
        self.commit("CREATETABLE", |doc| entity::insert(doc, table))
    }

    /// Returns whether the table existed
    pub fn remove_table(&mut self, name: &str) -> Result<bool> {
        self.commit("REMOVETABLE", |doc| entity::remove::<Table>(doc, name))
    }

    pub fn rename_table(&mut self, name: &str, new_name: &str) -> Result<()> {
        self.commit("RENAMETABLE", |doc| {
            entity::rename::<Table>(doc, name, new_name)
        })
    }

    pub fn set_table_description(&mut self, name: &str, description: &str) -> Result<()> {
        self.commit("SETTABLEDESCRIPTION", |doc| {
            entity::edit(doc, name, |table: &mut Table| table.set_description(description))
        })
    }

    /// Remove every row of one table, keeping its columns
    pub fn reset_table(&mut self, name: &str) -> Result<()> {
        self.commit("RESETTABLE", |doc| {
            entity::edit(doc, name, |table: &mut Table| {
                table.clear_rows();
                Ok(())
            })
        })
    }

    /// Remove every row of every table
    pub fn reset_tables(&mut self) -> Result<()> {
        self.commit("RESETTABLES", |doc| {
            for name in entity::names::<Table>(doc)? {
                entity::edit(doc, &name, |table: &mut Table| {
                    table.clear_rows();
                    Ok(())
                })?;
            }
            Ok(())
        })
    }

    pub fn clear_tables(&mut self) -> Result<()> {
        self.commit("CLEARTABLES", entity::clear::<Table>)
    }

    pub fn create_column(&mut self, table: &str, name: &str, data_type: ScalarType) -> Result<()> {
        let column = Column::new(name, data_type)?;
        self.add_column(table, &column)
    }

    pub fn add_column(&mut self, table: &str, column: &Column) -> Result<()> {
        self.commit("CREATECOLUMN", |doc| {
            entity::edit(doc, table, |t: &mut Table| t.add_column(column.clone()))
        })
    }

    /// Returns whether the column existed; the table must exist
    pub fn remove_column(&mut self, table: &str, name: &str) -> Result<bool> {
        self.commit("REMOVECOLUMN", |doc| {
            entity::edit(doc, table, |t: &mut Table| Ok(t.remove_column(name)))
        })
    }

    pub fn rename_column(&mut self, table: &str, name: &str, new_name: &str) -> Result<()> {
        self.commit("RENAMECOLUMN", |doc| {
            entity::edit(doc, table, |t: &mut Table| t.rename_column(name, new_name))
        })
    }

    pub fn set_column_description(&mut self, table: &str, name: &str, description: &str) -> Result<()> {
        self.commit("SETCOLUMNDESCRIPTION", |doc| {
            entity::edit(doc, table, |t: &mut Table| {
                t.set_column_description(name, description)
            })
        })
    }

    /// Retype a column; fails without changes when any value does not convert
    pub fn set_column_data_type(&mut self, table: &str, name: &str, data_type: ScalarType) -> Result<()> {
        self.commit("SETCOLUMNDATATYPE", |doc| {
            entity::edit(doc, table, |t: &mut Table| {
                t.set_column_data_type(name, data_type)
            })
        })
    }

    pub fn add_data(&mut self, table: &str, column: &str, value: &str) -> Result<()> {
        self.commit("ADDDATA", |doc| {
            entity::edit(doc, table, |t: &mut Table| t.add_data(column, value))
        })
    }

    pub fn update_data(&mut self, table: &str, column: &str, index: usize, value: &str) -> Result<()> {
        self.commit("UPDATEDATA", |doc| {
            entity::edit(doc, table, |t: &mut Table| t.update_data(column, index, value))
        })
    }

    pub fn add_row(&mut self, table: &str, row: Row) -> Result<()> {
        self.commit("ADDROW", |doc| {
            entity::edit(doc, table, |t: &mut Table| t.add_row(row))
        })
    }

    /// Append a row of empty values; AutoInt columns get their next value
    pub fn add_empty_row(&mut self, table: &str) -> Result<()> {
        self.commit("ADDROW", |doc| {
            entity::edit(doc, table, |t: &mut Table| t.add_empty_row())
        })
    }

    /// Returns false when the index is out of range
    pub fn remove_row(&mut self, table: &str, index: usize) -> Result<bool> {
        self.commit("REMOVEROW", |doc| {
            entity::edit(doc, table, |t: &mut Table| Ok(t.remove_row(index)))
        })
    }

    /// Replace every row of a table
    pub fn set_rows(&mut self, table: &str, rows: &[Row]) -> Result<()> {
        self.commit("SETROWS", |doc| {
            entity::edit(doc, table, |t: &mut Table| t.set_rows(rows))
        })
    }

    pub fn table(&self, name: &str) -> Result<Table> {
        entity::load(&self.document, name)
    }

    pub fn tables(&self) -> Result<Vec<Table>> {
        entity::load_all(&self.document)
    }

    pub fn table_count(&self) -> usize {
        entity::count::<Table>(&self.document)
    }

    pub fn exists_table(&self, name: &str) -> bool {
        entity::exists::<Table>(&self.document, name)
    }

    pub fn table_description(&self, name: &str) -> Result<String> {
        Ok(self.table(name)?.description().to_string())
    }

    pub fn columns(&self, table: &str) -> Result<Vec<Column>> {
        Ok(self.table(table)?.columns().iter().cloned().collect())
    }

    pub fn column(&self, table: &str, name: &str) -> Result<Column> {
        self.table(table)?.column(name).cloned()
    }

    pub fn column_count(&self, table: &str) -> Result<usize> {
        Ok(self.table(table)?.columns().len())
    }

    /// False when either the table or the column is missing
    pub fn exists_column(&self, table: &str, name: &str) -> bool {
        self.table(table)
            .map(|t| t.columns().contains(name))
            .unwrap_or(false)
    }

    pub fn column_description(&self, table: &str, name: &str) -> Result<String> {
        Ok(self.column(table, name)?.description().to_string())
    }

    pub fn column_data_type(&self, table: &str, name: &str) -> Result<ScalarType> {
        Ok(self.column(table, name)?.data_type())
    }

    pub fn rows(&self, table: &str) -> Result<Vec<Row>> {
        Ok(self.table(table)?.rows().to_vec())
    }

    pub fn row(&self, table: &str, index: usize) -> Result<Row> {
        self.table(table)?.row(index).cloned()
    }

    pub fn row_count(&self, table: &str) -> Result<usize> {
        Ok(self.table(table)?.row_count())
    }

    pub fn datas(&self, table: &str, column: &str) -> Result<Vec<Data>> {
        Ok(self.column(table, column)?.into_datas())
    }

    pub fn data_count(&self, table: &str, column: &str) -> Result<usize> {
        Ok(self.column(table, column)?.len())
    }

    pub fn data(&self, table: &str, column: &str, index: usize) -> Result<Data> {
        self.column(table, column)?.get(index).cloned()
    }

    /// Whether any value of the column has the given text; false when it is missing
    pub fn exists_data(&self, table: &str, column: &str, value: &str) -> bool {
        self.column(table, column)
            .map(|c| c.contains_text(value))
            .unwrap_or(false)
    }
}
