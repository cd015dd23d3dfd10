//! Load/store helpers shared by tables, stacks, sectors and disks

use crate::document::{Document, Node, FILE_SYSTEM, SECTORS, STACKS, TABLES};
use crate::error::{MochaError, Result};
use crate::schema::naming::check_name;
use crate::schema::{Disk, Named, Sector, Stack, Table};

/// An entity stored as one named child of a document section
pub(crate) trait Entity: Named + Sized {
    const SECTION: &'static str;
    const KIND: &'static str;

    fn to_node(&self) -> Node;
    fn from_node(node: &Node) -> Result<Self>;
}

impl Entity for Table {
    const SECTION: &'static str = TABLES;
    const KIND: &'static str = "table";

    fn to_node(&self) -> Node {
        Table::to_node(self)
    }

    fn from_node(node: &Node) -> Result<Self> {
        Table::from_node(node)
    }
}

impl Entity for Stack {
    const SECTION: &'static str = STACKS;
    const KIND: &'static str = "stack";

    fn to_node(&self) -> Node {
        Stack::to_node(self)
    }

    fn from_node(node: &Node) -> Result<Self> {
        Stack::from_node(node)
    }
}

impl Entity for Sector {
    const SECTION: &'static str = SECTORS;
    const KIND: &'static str = "sector";

    fn to_node(&self) -> Node {
        Sector::to_node(self)
    }

    fn from_node(node: &Node) -> Result<Self> {
        Sector::from_node(node)
    }
}

impl Entity for Disk {
    const SECTION: &'static str = FILE_SYSTEM;
    const KIND: &'static str = "disk";

    fn to_node(&self) -> Node {
        Disk::to_node(self)
    }

    fn from_node(node: &Node) -> Result<Self> {
        Disk::from_node(node)
    }
}

pub(crate) fn not_found<E: Entity>(name: &str) -> MochaError {
    MochaError::NotFound(format!("{} '{}'", E::KIND, name))
}

fn conflict<E: Entity>(name: &str) -> MochaError {
    MochaError::Conflict(format!("{} '{}' already exists", E::KIND, name))
}

fn node<'a, E: Entity>(doc: &'a Document, name: &str) -> Option<&'a Node> {
    doc.section(E::SECTION).ok()?.child(name)
}

pub(crate) fn exists<E: Entity>(doc: &Document, name: &str) -> bool {
    node::<E>(doc, name).is_some()
}

pub(crate) fn count<E: Entity>(doc: &Document) -> usize {
    doc.section(E::SECTION)
        .map(|section| section.children.len())
        .unwrap_or(0)
}

pub(crate) fn names<E: Entity>(doc: &Document) -> Result<Vec<String>> {
    Ok(doc
        .section(E::SECTION)?
        .children
        .iter()
        .map(|node| node.name.clone())
        .collect())
}

pub(crate) fn load<E: Entity>(doc: &Document, name: &str) -> Result<E> {
    let node = node::<E>(doc, name).ok_or_else(|| not_found::<E>(name))?;
    E::from_node(node)
}

pub(crate) fn load_all<E: Entity>(doc: &Document) -> Result<Vec<E>> {
    doc.section(E::SECTION)?
        .children
        .iter()
        .map(E::from_node)
        .collect()
}

/// Add a new entity; its name must be free
pub(crate) fn insert<E: Entity>(doc: &mut Document, entity: &E) -> Result<()> {
    check_name(entity.name())?;
    let section = doc.section_mut(E::SECTION)?;
    if section.child(entity.name()).is_some() {
        return Err(conflict::<E>(entity.name()));
    }
    section.children.push(entity.to_node());
    Ok(())
}

/// Load, change and store back one entity
pub(crate) fn edit<E: Entity, T>(
    doc: &mut Document,
    name: &str,
    change: impl FnOnce(&mut E) -> Result<T>,
) -> Result<T> {
    let mut entity = load::<E>(doc, name)?;
    let output = change(&mut entity)?;
    let node = entity.to_node();
    let section = doc.section_mut(E::SECTION)?;
    match section.child_mut(name) {
        Some(existing) => *existing = node,
        None => section.children.push(node),
    }
    Ok(output)
}

pub(crate) fn remove<E: Entity>(doc: &mut Document, name: &str) -> Result<bool> {
    Ok(doc.section_mut(E::SECTION)?.remove_child(name).is_some())
}

/// Rename in place; renaming to the current name only checks existence
pub(crate) fn rename<E: Entity>(doc: &mut Document, name: &str, new_name: &str) -> Result<()> {
    let section = doc.section_mut(E::SECTION)?;
    if section.child(name).is_none() {
        return Err(not_found::<E>(name));
    }
    if name == new_name {
        return Ok(());
    }
    check_name(new_name)?;
    if section.child(new_name).is_some() {
        return Err(conflict::<E>(new_name));
    }
    if let Some(node) = section.child_mut(name) {
        node.name = new_name.to_string();
    }
    Ok(())
}

pub(crate) fn clear<E: Entity>(doc: &mut Document) -> Result<()> {
    doc.section_mut(E::SECTION)?.children.clear();
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_conflict() {
        let mut doc = Document::new();
        let table = Table::new("People").unwrap();
        insert(&mut doc, &table).unwrap();
        let err = insert(&mut doc, &table).unwrap_err();
        assert!(matches!(err, MochaError::Conflict(_)));
        assert_eq!(count::<Table>(&doc), 1);
    }

    #[test]
    fn test_lookup_does_not_follow_paths() {
        let mut doc = Document::new();
        insert(&mut doc, &Stack::new("Config").unwrap()).unwrap();
        assert!(exists::<Stack>(&doc, "Config"));
        assert!(!exists::<Stack>(&doc, "Config/x"));
        assert!(!exists::<Table>(&doc, "Config"));
    }

    #[test]
    fn test_edit_stores_changes() {
        let mut doc = Document::new();
        insert(&mut doc, &Sector::new("Motd", "hi").unwrap()).unwrap();
        edit::<Sector, _>(&mut doc, "Motd", |sector| sector.set_data("bye")).unwrap();
        assert_eq!(load::<Sector>(&doc, "Motd").unwrap().data(), "bye");
    }

    #[test]
    fn test_rename() {
        let mut doc = Document::new();
        insert(&mut doc, &Table::new("A").unwrap()).unwrap();
        insert(&mut doc, &Table::new("B").unwrap()).unwrap();
        assert!(matches!(rename::<Table>(&mut doc, "A", "B"), Err(MochaError::Conflict(_))));
        assert!(rename::<Table>(&mut doc, "Z", "Y").unwrap_err().is_not_found());
        rename::<Table>(&mut doc, "A", "A").unwrap();
        rename::<Table>(&mut doc, "A", "C").unwrap();
        let names: Vec<String> = load_all::<Table>(&doc)
            .unwrap()
            .iter()
            .map(|t| t.name().to_string())
            .collect();
        assert_eq!(names, vec!["C", "B"]);
    }
}
