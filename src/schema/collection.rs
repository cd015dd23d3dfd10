//! Ordered collections with unique member names

use serde::{Serialize, Serializer};

use crate::error::{MochaError, Result};
use crate::schema::naming::check_name;

/// Something identified by a name within its parent
pub trait Named {
    fn name(&self) -> &str;

    /// Only collections rename members, after their uniqueness check
    #[doc(hidden)]
    fn set_name(&mut self, name: String);
}

/// Members keep insertion order; names are checked before any change is applied
#[derive(Debug, Clone, PartialEq)]
pub struct Collection<T> {
    kind: &'static str,
    items: Vec<T>,
}

impl<T: Named> Collection<T> {
    /// `kind` names the members in error messages ("table", "column", ...)
    pub fn new(kind: &'static str) -> Self {
        Self {
            kind,
            items: Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.items.iter()
    }

    pub(crate) fn iter_mut(&mut self) -> std::slice::IterMut<'_, T> {
        self.items.iter_mut()
    }

    pub fn as_slice(&self) -> &[T] {
        &self.items
    }

    pub fn get(&self, name: &str) -> Option<&T> {
        self.items.iter().find(|item| item.name() == name)
    }

    pub(crate) fn get_mut(&mut self, name: &str) -> Option<&mut T> {
        self.items.iter_mut().find(|item| item.name() == name)
    }

    pub fn position(&self, name: &str) -> Option<usize> {
        self.items.iter().position(|item| item.name() == name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.position(name).is_some()
    }

    pub fn names(&self) -> Vec<&str> {
        self.items.iter().map(Named::name).collect()
    }

    /// Look up a member or fail with `NotFound`
    pub fn require(&self, name: &str) -> Result<&T> {
        self.get(name)
            .ok_or_else(|| MochaError::NotFound(format!("{} '{}'", self.kind, name)))
    }

    pub(crate) fn require_mut(&mut self, name: &str) -> Result<&mut T> {
        let kind = self.kind;
        self.get_mut(name)
            .ok_or_else(|| MochaError::NotFound(format!("{} '{}'", kind, name)))
    }

    pub fn add(&mut self, item: T) -> Result<()> {
        check_name(item.name())?;
        if self.contains(item.name()) {
            return Err(MochaError::Conflict(format!(
                "{} '{}' already exists",
                self.kind,
                item.name()
            )));
        }
        self.items.push(item);
        Ok(())
    }

    pub fn remove(&mut self, name: &str) -> Option<T> {
        let position = self.position(name)?;
        Some(self.items.remove(position))
    }

    /// Rename a member; renaming to the current name only checks existence
    pub fn rename(&mut self, name: &str, new_name: &str) -> Result<()> {
        if name == new_name {
            return self.require(name).map(|_| ());
        }
        check_name(new_name)?;
        if self.contains(new_name) {
            return Err(MochaError::Conflict(format!(
                "{} '{}' already exists",
                self.kind, new_name
            )));
        }
        self.require_mut(name)?.set_name(new_name.to_string());
        Ok(())
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    pub fn into_vec(self) -> Vec<T> {
        self.items
    }
}

impl<'a, T> IntoIterator for &'a Collection<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

impl<T: Serialize> Serialize for Collection<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        self.items.serialize(serializer)
    }
}
