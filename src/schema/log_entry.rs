//! Change-log entries: snapshots of the schema sections

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::document::{Document, Node, LOG};
use crate::error::{MochaError, Result};

const ID: &str = "ID";
const TIME: &str = "Time";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LogEntry {
    id: String,
    time: DateTime<Utc>,
    #[serde(skip)]
    snapshot: Vec<Node>,
}

impl LogEntry {
    /// Snapshot every non-log section of `document`
    pub fn capture(document: &Document) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            time: Utc::now(),
            snapshot: document.snapshot_sections(),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn time(&self) -> DateTime<Utc> {
        self.time
    }

    pub fn snapshot(&self) -> &[Node] {
        &self.snapshot
    }

    pub fn into_snapshot(self) -> Vec<Node> {
        self.snapshot
    }

    pub fn to_node(&self) -> Node {
        let mut node = Node::new(LOG)
            .with_attribute(ID, &self.id)
            .with_attribute(TIME, self.time.to_rfc3339());
        node.children = self.snapshot.clone();
        node
    }

    pub fn from_node(node: &Node) -> Result<Self> {
        let id = node
            .attribute(ID)
            .ok_or_else(|| MochaError::InvalidOperation("log entry without an ID".to_string()))?;
        let time = node
            .attribute(TIME)
            .and_then(|t| DateTime::parse_from_rfc3339(t).ok())
            .ok_or_else(|| {
                MochaError::InvalidOperation(format!("log entry '{}' has no valid time", id))
            })?;
        Ok(Self {
            id: id.to_string(),
            time: time.with_timezone(&Utc),
            snapshot: node.children.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::TABLES;

    #[test]
    fn test_capture_skips_logs() {
        let mut doc = Document::new();
        doc.add_child(TABLES, Node::new("People")).unwrap();
        let entry = LogEntry::capture(&doc);
        assert!(entry.snapshot().iter().all(|n| n.name != crate::document::LOGS));
        assert!(entry.snapshot().iter().any(|n| n.name == TABLES));
    }

    #[test]
    fn test_node_round_trip() {
        let entry = LogEntry::capture(&Document::new());
        let restored = LogEntry::from_node(&entry.to_node()).unwrap();
        assert_eq!(restored.id(), entry.id());
        assert_eq!(restored.snapshot(), entry.snapshot());
        assert_eq!(restored.time().timestamp_micros(), entry.time().timestamp_micros());
    }

    #[test]
    fn test_from_node_requires_id() {
        let err = LogEntry::from_node(&Node::new(LOG)).unwrap_err();
        assert!(matches!(err, MochaError::InvalidOperation(_)));
    }
}
