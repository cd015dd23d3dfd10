//! Hierarchical key/value stacks addressed by `/` paths

use serde::Serialize;

use crate::document::{Node, DESCRIPTION};
use crate::error::{MochaError, Result};
use crate::schema::collection::{Collection, Named};
use crate::schema::naming::{check_name, check_value, path_segments, split_path};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StackItem {
    name: String,
    value: String,
    description: String,
    items: Collection<StackItem>,
}

impl StackItem {
    pub fn new(name: &str, value: &str) -> Result<Self> {
        check_name(name)?;
        check_value(value)?;
        Ok(Self {
            name: name.to_string(),
            value: value.to_string(),
            description: String::new(),
            items: Collection::new("stack item"),
        })
    }

    pub fn with_description(mut self, description: &str) -> Result<Self> {
        self.set_description(description)?;
        Ok(self)
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn set_value(&mut self, value: &str) -> Result<()> {
        check_value(value)?;
        self.value = value.to_string();
        Ok(())
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn set_description(&mut self, description: &str) -> Result<()> {
        check_value(description)?;
        self.description = description.to_string();
        Ok(())
    }

    pub fn items(&self) -> &Collection<StackItem> {
        &self.items
    }

    pub fn add_item(&mut self, item: StackItem) -> Result<()> {
        self.items.add(item)
    }

    fn to_node(&self) -> Node {
        let mut node = Node::with_value(&self.name, &self.value);
        if !self.description.is_empty() {
            node.set_attribute(DESCRIPTION, &self.description);
        }
        node.children = self.items.iter().map(StackItem::to_node).collect();
        node
    }

    fn from_node(node: &Node) -> Result<Self> {
        let mut item = StackItem::new(&node.name, &node.value)?;
        item.description = node.attribute(DESCRIPTION).unwrap_or_default().to_string();
        for child in &node.children {
            item.items.add(StackItem::from_node(child)?)?;
        }
        Ok(item)
    }
}

impl Named for StackItem {
    fn name(&self) -> &str {
        &self.name
    }

    fn set_name(&mut self, name: String) {
        self.name = name;
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Stack {
    name: String,
    description: String,
    items: Collection<StackItem>,
}

impl Stack {
    pub fn new(name: &str) -> Result<Self> {
        check_name(name)?;
        Ok(Self {
            name: name.to_string(),
            description: String::new(),
            items: Collection::new("stack item"),
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

    pub fn items(&self) -> &Collection<StackItem> {
        &self.items
    }

    pub fn find(&self, path: &str) -> Option<&StackItem> {
        let mut segments = path_segments(path);
        let first = self.items.get(segments.next()?)?;
        segments.try_fold(first, |item, segment| item.items.get(segment))
    }

    fn find_mut(&mut self, path: &str) -> Option<&mut StackItem> {
        let mut segments = path_segments(path);
        let mut item = self.items.get_mut(segments.next()?)?;
        for segment in segments {
            item = item.items.get_mut(segment)?;
        }
        Some(item)
    }

    pub fn exists(&self, path: &str) -> bool {
        self.find(path).is_some()
    }

    pub fn item(&self, path: &str) -> Result<&StackItem> {
        self.find(path)
            .ok_or_else(|| self.item_not_found(path))
    }

    pub(crate) fn item_mut(&mut self, path: &str) -> Result<&mut StackItem> {
        let missing = self.item_not_found(path);
        self.find_mut(path).ok_or(missing)
    }

    /// Add `item` under `parent`; an empty parent path means the stack root
    pub fn add_item(&mut self, parent: &str, item: StackItem) -> Result<()> {
        self.children_mut(parent)?.add(item)
    }

    pub fn remove_item(&mut self, path: &str) -> bool {
        let (parent, name) = split_path(path);
        match self.children_mut(parent) {
            Ok(items) => items.remove(name).is_some(),
            Err(_) => false,
        }
    }

    pub fn rename_item(&mut self, path: &str, new_name: &str) -> Result<()> {
        let (parent, name) = split_path(path);
        if name.is_empty() {
            return Err(self.item_not_found(path));
        }
        self.children_mut(parent)?.rename(name, new_name)
    }

    pub fn set_item_value(&mut self, path: &str, value: &str) -> Result<()> {
        self.item_mut(path)?.set_value(value)
    }

    pub fn set_item_description(&mut self, path: &str, description: &str) -> Result<()> {
        self.item_mut(path)?.set_description(description)
    }

    fn children_mut(&mut self, parent: &str) -> Result<&mut Collection<StackItem>> {
        if path_segments(parent).next().is_none() {
            return Ok(&mut self.items);
        }
        Ok(&mut self.item_mut(parent)?.items)
    }

    fn item_not_found(&self, path: &str) -> MochaError {
        MochaError::NotFound(format!("stack item '{}' in stack '{}'", path, self.name))
    }

    pub fn to_node(&self) -> Node {
        let mut node = Node::new(&self.name);
        if !self.description.is_empty() {
            node.set_attribute(DESCRIPTION, &self.description);
        }
        node.children = self.items.iter().map(StackItem::to_node).collect();
        node
    }

    pub fn from_node(node: &Node) -> Result<Self> {
        let mut stack = Stack::new(&node.name)?;
        stack.description = node.attribute(DESCRIPTION).unwrap_or_default().to_string();
        for child in &node.children {
            stack.items.add(StackItem::from_node(child)?)?;
        }
        Ok(stack)
    }
}

impl Named for Stack {
    fn name(&self) -> &str {
        &self.name
    }

    fn set_name(&mut self, name: String) {
        self.name = name;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> Stack {
        let mut stack = Stack::new("Config").unwrap();
        stack.add_item("", StackItem::new("Server", "").unwrap()).unwrap();
        stack
            .add_item("Server", StackItem::new("Port", "8080").unwrap())
            .unwrap();
        stack
    }

    #[test]
    fn test_find_by_path() {
        let stack = config();
        assert_eq!(stack.item("Server/Port").unwrap().value(), "8080");
        assert!(stack.exists("/Server/Port/"));
        assert!(!stack.exists("Port"));
        assert!(!stack.exists(""));
    }

    #[test]
    fn test_add_under_missing_parent() {
        let mut stack = config();
        let err = stack
            .add_item("Client", StackItem::new("Port", "1").unwrap())
            .unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn test_sibling_names_unique() {
        let mut stack = config();
        let err = stack
            .add_item("Server", StackItem::new("Port", "1").unwrap())
            .unwrap_err();
        assert!(matches!(err, MochaError::Conflict(_)));
        stack.add_item("", StackItem::new("Port", "1").unwrap()).unwrap();
    }

    #[test]
    fn test_rename_and_remove() {
        let mut stack = config();
        stack.rename_item("Server/Port", "HttpPort").unwrap();
        assert!(stack.exists("Server/HttpPort"));
        assert!(stack.remove_item("Server/HttpPort"));
        assert!(!stack.remove_item("Server/HttpPort"));
        assert!(!stack.remove_item("Nope/x"));
    }

    #[test]
    fn test_set_value_and_description() {
        let mut stack = config();
        stack.set_item_value("Server/Port", "9090").unwrap();
        stack.set_item_description("Server", "web server").unwrap();
        assert_eq!(stack.item("Server/Port").unwrap().value(), "9090");
        assert_eq!(stack.item("Server").unwrap().description(), "web server");
    }

    #[test]
    fn test_node_round_trip() {
        let stack = config().with_description("settings").unwrap();
        assert_eq!(Stack::from_node(&stack.to_node()).unwrap(), stack);
    }
}
