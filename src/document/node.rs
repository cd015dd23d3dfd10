//! Tree nodes and the path-addressed document

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::{MochaError, Result};

pub const ROOT_NODE: &str = "Mocha";
pub const ROOT_SECTION: &str = "Root";
pub const TABLES: &str = "Tables";
pub const SECTORS: &str = "Sectors";
pub const STACKS: &str = "Stacks";
pub const FILE_SYSTEM: &str = "FileSystem";
pub const LOGS: &str = "Logs";
pub const LOG: &str = "Log";
pub const DATA: &str = "Data";
pub const PASSWORD: &str = "Password";
pub const DESCRIPTION: &str = "Description";
pub const DATA_TYPE: &str = "DataType";
pub const VERSION: &str = "Version";
/// Marks a file-system node as a directory or a file
pub const ENTRY_TYPE: &str = "Type";
pub const DIRECTORY: &str = "Directory";
pub const FILE: &str = "File";

/// On-disk layout version written to the root node
pub const FORMAT_VERSION: &str = "1";

const SECTIONS: [&str; 6] = [ROOT_SECTION, SECTORS, STACKS, TABLES, FILE_SYSTEM, LOGS];

/// A named element with a text value, attributes and ordered children
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Node {
    pub name: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub value: String,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub attributes: BTreeMap<String, String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<Node>,
}

impl Node {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn with_value(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
            ..Self::default()
        }
    }

    pub fn with_attribute(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(key.into(), value.into());
        self
    }

    /// First child with the given name
    pub fn child(&self, name: &str) -> Option<&Node> {
        self.children.iter().find(|c| c.name == name)
    }

    pub fn child_mut(&mut self, name: &str) -> Option<&mut Node> {
        self.children.iter_mut().find(|c| c.name == name)
    }

    pub fn children_named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a Node> + 'a {
        self.children.iter().filter(move |c| c.name == name)
    }

    pub fn add_child(&mut self, node: Node) -> &mut Node {
        let index = self.children.len();
        self.children.push(node);
        &mut self.children[index]
    }

    pub fn remove_child(&mut self, name: &str) -> Option<Node> {
        let position = self.children.iter().position(|c| c.name == name)?;
        Some(self.children.remove(position))
    }

    /// Replace the child carrying `node.name` in place, or append it
    pub fn upsert_child(&mut self, node: Node) {
        match self.child_mut(&node.name) {
            Some(existing) => *existing = node,
            None => self.children.push(node),
        }
    }

    pub fn attribute(&self, key: &str) -> Option<&str> {
        self.attributes.get(key).map(String::as_str)
    }

    pub fn set_attribute(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.attributes.insert(key.into(), value.into());
    }

    pub fn remove_attribute(&mut self, key: &str) -> Option<String> {
        self.attributes.remove(key)
    }
}

/// The authoritative tree holding the whole database
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Document {
    root: Node,
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Document {
    /// An empty database with every section present
    pub fn new() -> Self {
        let mut root = Node::new(ROOT_NODE).with_attribute(VERSION, FORMAT_VERSION);
        for section in SECTIONS {
            root.children.push(empty_section(section));
        }
        Self { root }
    }

    pub fn root(&self) -> &Node {
        &self.root
    }

    /// Look up a node by `/`-delimited path relative to the root
    pub fn get(&self, path: &str) -> Option<&Node> {
        segments(path).try_fold(&self.root, |node, segment| node.child(segment))
    }

    pub fn get_mut(&mut self, path: &str) -> Option<&mut Node> {
        let mut node = &mut self.root;
        for segment in segments(path) {
            node = node.child_mut(segment)?;
        }
        Some(node)
    }

    pub fn exists(&self, path: &str) -> bool {
        self.get(path).is_some()
    }

    pub fn section(&self, name: &str) -> Result<&Node> {
        self.root
            .child(name)
            .ok_or_else(|| MochaError::NotFound(format!("section '{}'", name)))
    }

    pub fn section_mut(&mut self, name: &str) -> Result<&mut Node> {
        self.root
            .child_mut(name)
            .ok_or_else(|| MochaError::NotFound(format!("section '{}'", name)))
    }

    pub fn add_child(&mut self, parent: &str, node: Node) -> Result<&mut Node> {
        let parent_node = self
            .get_mut(parent)
            .ok_or_else(|| MochaError::NotFound(format!("element '{}'", parent)))?;
        Ok(parent_node.add_child(node))
    }

    /// Detach the node at `path`; the root itself cannot be removed
    pub fn remove(&mut self, path: &str) -> Option<Node> {
        let parts: Vec<&str> = segments(path).collect();
        let (last, parent) = parts.split_last()?;
        let parent_path = parent.join("/");
        self.get_mut(&parent_path)?.remove_child(last)
    }

    pub fn attribute(&self, path: &str, key: &str) -> Option<&str> {
        self.get(path).and_then(|node| node.attribute(key))
    }

    pub fn set_attribute(&mut self, path: &str, key: &str, value: &str) -> Result<()> {
        let node = self
            .get_mut(path)
            .ok_or_else(|| MochaError::NotFound(format!("element '{}'", path)))?;
        node.set_attribute(key, value);
        Ok(())
    }

    /// Clones of every section except the log section
    pub fn snapshot_sections(&self) -> Vec<Node> {
        self.root
            .children
            .iter()
            .filter(|c| c.name != LOGS)
            .cloned()
            .collect()
    }

    /// Replace every non-log section with the given ones, keeping logs
    pub fn restore_sections(&mut self, sections: Vec<Node>) {
        let logs = self
            .root
            .remove_child(LOGS)
            .unwrap_or_else(|| empty_section(LOGS));
        self.root.children = sections;
        self.root.children.push(logs);
        self.ensure_sections();
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Parse a serialized document, adding any section the file lacks
    pub fn from_json(content: &str) -> Result<Self> {
        let mut document: Document = serde_json::from_str(content)?;
        if document.root.name != ROOT_NODE {
            return Err(MochaError::InvalidOperation(format!(
                "not a MochaDB document (root element '{}')",
                document.root.name
            )));
        }
        document.ensure_sections();
        Ok(document)
    }

    fn ensure_sections(&mut self) {
        for section in SECTIONS {
            if self.root.child(section).is_none() {
                self.root.children.push(empty_section(section));
            }
        }
        if let Some(root_section) = self.root.child_mut(ROOT_SECTION) {
            for field in [PASSWORD, DESCRIPTION] {
                if root_section.child(field).is_none() {
                    root_section.children.push(Node::new(field));
                }
            }
        }
    }
}

fn empty_section(name: &str) -> Node {
    let mut node = Node::new(name);
    if name == ROOT_SECTION {
        node.children.push(Node::new(PASSWORD));
        node.children.push(Node::new(DESCRIPTION));
    }
    node
}

fn segments(path: &str) -> impl Iterator<Item = &str> {
    path.split('/').filter(|s| !s.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_document_has_sections() {
        let doc = Document::new();
        for section in SECTIONS {
            assert!(doc.exists(section), "missing {}", section);
        }
        assert!(doc.exists("Root/Password"));
        assert_eq!(doc.root().attribute(VERSION), Some(FORMAT_VERSION));
    }

    #[test]
    fn test_add_and_get_by_path() {
        let mut doc = Document::new();
        doc.add_child(TABLES, Node::new("People")).unwrap();
        doc.add_child("Tables/People", Node::new("Name")).unwrap();
        assert!(doc.exists("Tables/People/Name"));
        assert!(doc.exists("/Tables//People/"));
        assert!(!doc.exists("Tables/People/Age"));
    }

    #[test]
    fn test_add_child_missing_parent() {
        let mut doc = Document::new();
        let err = doc.add_child("Tables/Ghost", Node::new("x")).unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn test_remove_by_path() {
        let mut doc = Document::new();
        doc.add_child(TABLES, Node::new("People")).unwrap();
        let removed = doc.remove("Tables/People").unwrap();
        assert_eq!(removed.name, "People");
        assert!(doc.remove("Tables/People").is_none());
        assert!(doc.remove("").is_none());
    }

    #[test]
    fn test_attributes() {
        let mut doc = Document::new();
        doc.add_child(TABLES, Node::new("People")).unwrap();
        doc.set_attribute("Tables/People", DESCRIPTION, "humans").unwrap();
        assert_eq!(doc.attribute("Tables/People", DESCRIPTION), Some("humans"));
        assert!(doc.set_attribute("Tables/Nope", DESCRIPTION, "x").is_err());
    }

    #[test]
    fn test_json_round_trip() {
        let mut doc = Document::new();
        doc.add_child(SECTORS, Node::with_value("Motd", "hello")).unwrap();
        let json = doc.to_json().unwrap();
        assert_eq!(Document::from_json(&json).unwrap(), doc);
    }

    #[test]
    fn test_from_json_repairs_missing_sections() {
        let doc = Document::from_json(r#"{"name":"Mocha","children":[{"name":"Tables"}]}"#).unwrap();
        assert!(doc.exists(LOGS));
        assert!(doc.exists(FILE_SYSTEM));
        assert!(doc.exists("Root/Description"));
    }

    #[test]
    fn test_from_json_rejects_foreign_root() {
        let err = Document::from_json(r#"{"name":"Other"}"#).unwrap_err();
        assert!(matches!(err, MochaError::InvalidOperation(_)));
    }

    #[test]
    fn test_restore_sections_keeps_logs() {
        let mut doc = Document::new();
        let snapshot = doc.snapshot_sections();
        doc.add_child(TABLES, Node::new("People")).unwrap();
        doc.add_child(LOGS, Node::new(LOG)).unwrap();
        doc.restore_sections(snapshot);
        assert!(!doc.exists("Tables/People"));
        assert!(doc.exists("Logs/Log"));
    }
}
