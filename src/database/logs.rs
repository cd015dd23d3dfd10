//! Change-log access and restore

use crate::database::MochaDatabase;
use crate::document::{Document, LOG, LOGS};
use crate::error::{MochaError, Result};
use crate::schema::LogEntry;

impl MochaDatabase {
    /// Oldest first
    pub fn logs(&self) -> Result<Vec<LogEntry>> {
        self.document
            .section(LOGS)?
            .children_named(LOG)
            .map(LogEntry::from_node)
            .collect()
    }

    pub fn log(&self, id: &str) -> Result<LogEntry> {
        find_log(&self.document, id)
    }

    pub fn exists_log(&self, id: &str) -> bool {
        self.document
            .section(LOGS)
            .map(|logs| logs.children_named(LOG).any(|node| node.attribute("ID") == Some(id)))
            .unwrap_or(false)
    }

    pub fn log_count(&self) -> usize {
        self.document
            .section(LOGS)
            .map(|logs| logs.children_named(LOG).count())
            .unwrap_or(0)
    }

    pub fn first_log(&self) -> Result<LogEntry> {
        self.logs()?.into_iter().next().ok_or_else(no_logs)
    }

    pub fn last_log(&self) -> Result<LogEntry> {
        self.logs()?.into_iter().last().ok_or_else(no_logs)
    }

    /// Returns whether the entry existed
    pub fn remove_log(&mut self, id: &str) -> Result<bool> {
        self.commit_logs("REMOVELOG", |doc| {
            let logs = doc.section_mut(LOGS)?;
            let before = logs.children.len();
            logs.children.retain(|node| node.attribute("ID") != Some(id));
            Ok(logs.children.len() != before)
        })
    }

    pub fn clear_logs(&mut self) -> Result<()> {
        self.commit_logs("CLEARLOGS", |doc| {
            doc.section_mut(LOGS)?.children.clear();
            Ok(())
        })
    }

    /// Replace tables, sectors, stacks and the root section with a logged snapshot
    pub fn restore_to_log(&mut self, id: &str) -> Result<()> {
        self.commit("RESTORETOLOG", |doc| {
            let entry = find_log(doc, id)?;
            doc.restore_sections(entry.into_snapshot());
            Ok(())
        })
    }

    pub fn restore_to_first_log(&mut self) -> Result<()> {
        let id = self.first_log()?.id().to_string();
        self.restore_to_log(&id)
    }

    pub fn restore_to_last_log(&mut self) -> Result<()> {
        let id = self.last_log()?.id().to_string();
        self.restore_to_log(&id)
    }
}

fn find_log(document: &Document, id: &str) -> Result<LogEntry> {
    let node = document
        .section(LOGS)?
        .children_named(LOG)
        .find(|node| node.attribute("ID") == Some(id))
        .ok_or_else(|| MochaError::NotFound(format!("log '{}'", id)))?;
    LogEntry::from_node(node)
}

fn no_logs() -> MochaError {
    MochaError::NotFound("no log entries".to_string())
}
