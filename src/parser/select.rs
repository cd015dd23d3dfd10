//! Pest grammar for the declarative select form

use pest::Parser;
use pest_derive::Parser;

use crate::error::{MochaError, Result};

#[derive(Parser)]
#[grammar = "../grammar/mochaq.pest"]
pub struct MochaQParser;

/// A parsed `SELECT <columns> FROM <table>`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectQuery {
    pub columns: Vec<String>,
    pub table: String,
}

impl SelectQuery {
    pub fn column_refs(&self) -> Vec<&str> {
        self.columns.iter().map(String::as_str).collect()
    }
}

pub fn parse_select(input: &str) -> Result<SelectQuery> {
    let pair = MochaQParser::parse(Rule::select_query, input.trim())
        .map_err(|e| MochaError::Command(format!("invalid select: {}", e)))?
        .next()
        .ok_or_else(|| MochaError::Command("invalid select: empty input".to_string()))?;

    let mut columns = Vec::new();
    let mut table = String::new();
    for inner in pair.into_inner() {
        match inner.as_rule() {
            Rule::column_list => {
                columns = inner
                    .into_inner()
                    .map(|column| column.as_str().to_string())
                    .collect();
            }
            Rule::table_name => table = inner.as_str().to_string(),
            _ => {}
        }
    }

    Ok(SelectQuery { columns, table })
}
