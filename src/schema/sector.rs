use std::collections::BTreeMap;

use serde::Serialize;

use crate::document::{Node, DESCRIPTION};
use crate::error::{MochaError, Result};
use crate::schema::collection::Named;
use crate::schema::naming::{check_attribute_name, check_name, check_value};

/// A named text value with a description and free-form attributes
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Sector {
    name: String,
    data: String,
    description: String,
    attributes: BTreeMap<String, String>,
}

impl Sector {
    pub fn new(name: &str, data: &str) -> Result<Self> {
        check_name(name)?;
        check_value(data)?;
        Ok(Self {
            name: name.to_string(),
            data: data.to_string(),
            description: String::new(),
            attributes: BTreeMap::new(),
        })
    }

    pub fn with_description(mut self, description: &str) -> Result<Self> {
        self.set_description(description)?;
        Ok(self)
    }

    pub fn data(&self) -> &str {
        &self.data
    }

    pub fn set_data(&mut self, data: &str) -> Result<()> {
        check_value(data)?;
        self.data = data.to_string();
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

    pub fn attributes(&self) -> &BTreeMap<String, String> {
        &self.attributes
    }

    pub fn attribute(&self, key: &str) -> Result<&str> {
        self.attributes.get(key).map(String::as_str).ok_or_else(|| {
            MochaError::NotFound(format!("attribute '{}' of sector '{}'", key, self.name))
        })
    }

    pub fn set_attribute(&mut self, key: &str, value: &str) -> Result<()> {
        check_attribute_name(key)?;
        check_value(value)?;
        self.attributes.insert(key.to_string(), value.to_string());
        Ok(())
    }

    pub fn remove_attribute(&mut self, key: &str) -> bool {
        self.attributes.remove(key).is_some()
    }

    pub fn to_node(&self) -> Node {
        let mut node = Node::with_value(&self.name, &self.data);
        node.attributes = self.attributes.clone();
        if !self.description.is_empty() {
            node.set_attribute(DESCRIPTION, &self.description);
        }
        node
    }

    pub fn from_node(node: &Node) -> Result<Self> {
        let mut sector = Sector::new(&node.name, &node.value)?;
        for (key, value) in &node.attributes {
            if key == DESCRIPTION {
                sector.description = value.clone();
            } else {
                sector.attributes.insert(key.clone(), value.clone());
            }
        }
        Ok(sector)
    }
}

impl Named for Sector {
    fn name(&self) -> &str {
        &self.name
    }

    fn set_name(&mut self, name: String) {
        self.name = name;
    }
}
