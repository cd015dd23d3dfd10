//! Pre-save hooks

use crate::document::{Document, LOGS};
use crate::error::Result;
use crate::schema::LogEntry;

/// Default cap on retained change-log entries
pub const MAX_LOGS: usize = 1000;

/// A commit about to be handed to persistence
pub struct PendingSave<'a> {
    pub previous: &'a Document,
    pub next: &'a mut Document,
    /// Keyword of the operation being committed
    pub operation: &'a str,
    /// The operation edits the log section itself
    pub touches_logs: bool,
}

/// Called by the database after an edit succeeds and before it is saved
pub trait SaveHook {
    fn before_save(&mut self, save: &mut PendingSave<'_>) -> Result<()>;
}

/// Records a snapshot of the previous state on every change
#[derive(Debug, Clone)]
pub struct ChangeLogHook {
    capacity: usize,
}

impl ChangeLogHook {
    pub fn new(capacity: usize) -> Self {
        Self { capacity }
    }
}

impl Default for ChangeLogHook {
    fn default() -> Self {
        Self::new(MAX_LOGS)
    }
}

impl SaveHook for ChangeLogHook {
    fn before_save(&mut self, save: &mut PendingSave<'_>) -> Result<()> {
        if save.touches_logs || self.capacity == 0 {
            return Ok(());
        }

        let entry = LogEntry::capture(save.previous);
        let logs = save.next.section_mut(LOGS)?;
        logs.children.push(entry.to_node());

        let excess = logs.children.len().saturating_sub(self.capacity);
        if excess > 0 {
            logs.children.drain(..excess);
        }

        log::trace!("logged state before {} as {}", save.operation, entry.id());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::{Node, TABLES};

    fn pending_run(hook: &mut ChangeLogHook, previous: &Document, next: &mut Document, touches_logs: bool) {
        let mut save = PendingSave {
            previous,
            next,
            operation: "TEST",
            touches_logs,
        };
        hook.before_save(&mut save).unwrap();
    }

    #[test]
    fn test_change_log_snapshots_previous() {
        let previous = Document::new();
        let mut next = previous.clone();
        next.add_child(TABLES, Node::new("People")).unwrap();

        let mut hook = ChangeLogHook::default();
        pending_run(&mut hook, &previous, &mut next, false);

        let logs = next.section(LOGS).unwrap();
        assert_eq!(logs.children.len(), 1);
        let entry = LogEntry::from_node(&logs.children[0]).unwrap();
        let tables = entry.snapshot().iter().find(|n| n.name == TABLES).unwrap();
        assert!(tables.children.is_empty());
    }

    #[test]
    fn test_change_log_respects_capacity() {
        let mut hook = ChangeLogHook::new(2);
        let mut doc = Document::new();
        for _ in 0..5 {
            let previous = doc.clone();
            pending_run(&mut hook, &previous, &mut doc, false);
        }
        assert_eq!(doc.section(LOGS).unwrap().children.len(), 2);
    }

    #[test]
    fn test_change_log_skips_log_operations() {
        let previous = Document::new();
        let mut next = previous.clone();
        let mut hook = ChangeLogHook::default();
        pending_run(&mut hook, &previous, &mut next, true);
        assert!(next.section(LOGS).unwrap().children.is_empty());
    }
}
