//! Virtual disks: directory trees of text files addressed by `/` paths

use serde::Serialize;

use crate::document::{Node, DESCRIPTION, DIRECTORY, ENTRY_TYPE, FILE};
use crate::error::{MochaError, Result};
use crate::schema::collection::{Collection, Named};
use crate::schema::naming::{check_name, check_value, path_segments, split_path};

/// A named text file
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DiskFile {
    name: String,
    content: String,
    description: String,
}

impl DiskFile {
    pub fn new(name: &str, content: &str) -> Result<Self> {
        check_name(name)?;
        check_value(content)?;
        Ok(Self {
            name: name.to_string(),
            content: content.to_string(),
            description: String::new(),
        })
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn set_content(&mut self, content: &str) -> Result<()> {
        check_value(content)?;
        self.content = content.to_string();
        Ok(())
    }

    /// Content length in bytes
    pub fn size(&self) -> usize {
        self.content.len()
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn set_description(&mut self, description: &str) -> Result<()> {
        check_value(description)?;
        self.description = description.to_string();
        Ok(())
    }

    fn to_node(&self) -> Node {
        let mut node = Node::with_value(&self.name, &self.content).with_attribute(ENTRY_TYPE, FILE);
        if !self.description.is_empty() {
            node.set_attribute(DESCRIPTION, &self.description);
        }
        node
    }

    fn from_node(node: &Node) -> Result<Self> {
        let mut file = DiskFile::new(&node.name, &node.value)?;
        file.description = node.attribute(DESCRIPTION).unwrap_or_default().to_string();
        Ok(file)
    }
}

impl Named for DiskFile {
    fn name(&self) -> &str {
        &self.name
    }

    fn set_name(&mut self, name: String) {
        self.name = name;
    }
}

/// Subdirectories and files sharing one name space
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Folder {
    directories: Collection<Directory>,
    files: Collection<DiskFile>,
}

impl Default for Folder {
    fn default() -> Self {
        Self {
            directories: Collection::new("directory"),
            files: Collection::new("file"),
        }
    }
}

impl Folder {
    pub fn directories(&self) -> &Collection<Directory> {
        &self.directories
    }

    pub fn files(&self) -> &Collection<DiskFile> {
        &self.files
    }

    pub fn contains(&self, name: &str) -> bool {
        self.directories.contains(name) || self.files.contains(name)
    }

    /// The folder at `path`; an empty path is this folder
    pub fn find(&self, path: &str) -> Option<&Folder> {
        path_segments(path).try_fold(self, |folder, segment| {
            folder.directories.get(segment).map(|d| &d.folder)
        })
    }

    fn find_mut(&mut self, path: &str) -> Option<&mut Folder> {
        let mut folder = self;
        for segment in path_segments(path) {
            folder = &mut folder.directories.get_mut(segment)?.folder;
        }
        Some(folder)
    }

    pub fn add_directory(&mut self, directory: Directory) -> Result<()> {
        self.check_free(&directory.name)?;
        self.directories.add(directory)
    }

    pub fn add_file(&mut self, file: DiskFile) -> Result<()> {
        self.check_free(&file.name)?;
        self.files.add(file)
    }

    fn rename_directory(&mut self, name: &str, new_name: &str) -> Result<()> {
        if name != new_name && self.files.contains(new_name) {
            return Err(taken(new_name));
        }
        self.directories.rename(name, new_name)
    }

    fn rename_file(&mut self, name: &str, new_name: &str) -> Result<()> {
        if name != new_name && self.directories.contains(new_name) {
            return Err(taken(new_name));
        }
        self.files.rename(name, new_name)
    }

    fn check_free(&self, name: &str) -> Result<()> {
        if self.contains(name) {
            return Err(taken(name));
        }
        Ok(())
    }

    fn to_nodes(&self) -> Vec<Node> {
        self.directories
            .iter()
            .map(Directory::to_node)
            .chain(self.files.iter().map(DiskFile::to_node))
            .collect()
    }

    fn from_nodes(nodes: &[Node]) -> Result<Self> {
        let mut folder = Folder::default();
        for node in nodes {
            match node.attribute(ENTRY_TYPE) {
                Some(DIRECTORY) => folder.add_directory(Directory::from_node(node)?)?,
                Some(FILE) => folder.add_file(DiskFile::from_node(node)?)?,
                other => {
                    return Err(MochaError::InvalidOperation(format!(
                        "'{}' has unknown entry type {:?}",
                        node.name, other
                    )))
                }
            }
        }
        Ok(folder)
    }
}

fn taken(name: &str) -> MochaError {
    MochaError::Conflict(format!("'{}' already exists in this directory", name))
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Directory {
    name: String,
    description: String,
    #[serde(flatten)]
    folder: Folder,
}

impl Directory {
    pub fn new(name: &str) -> Result<Self> {
        check_name(name)?;
        Ok(Self {
            name: name.to_string(),
            description: String::new(),
            folder: Folder::default(),
        })
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn set_description(&mut self, description: &str) -> Result<()> {
        check_value(description)?;
        self.description = description.to_string();
        Ok(())
    }

    pub fn folder(&self) -> &Folder {
        &self.folder
    }

    fn to_node(&self) -> Node {
        let mut node = Node::new(&self.name).with_attribute(ENTRY_TYPE, DIRECTORY);
        if !self.description.is_empty() {
            node.set_attribute(DESCRIPTION, &self.description);
        }
        node.children = self.folder.to_nodes();
        node
    }

    fn from_node(node: &Node) -> Result<Self> {
        let mut directory = Directory::new(&node.name)?;
        directory.description = node.attribute(DESCRIPTION).unwrap_or_default().to_string();
        directory.folder = Folder::from_nodes(&node.children)?;
        Ok(directory)
    }
}

impl Named for Directory {
    fn name(&self) -> &str {
        &self.name
    }

    fn set_name(&mut self, name: String) {
        self.name = name;
    }
}

/// A named root folder in the file-system section
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Disk {
    name: String,
    description: String,
    #[serde(flatten)]
    root: Folder,
}

impl Disk {
    pub fn new(name: &str) -> Result<Self> {
        check_name(name)?;
        Ok(Self {
            name: name.to_string(),
            description: String::new(),
            root: Folder::default(),
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

    pub fn root(&self) -> &Folder {
        &self.root
    }

    /// Contents of the directory at `path`, or of the disk root for an empty path
    pub fn folder(&self, path: &str) -> Result<&Folder> {
        self.root
            .find(path)
            .ok_or_else(|| self.missing("directory", path))
    }

    fn folder_mut(&mut self, path: &str) -> Result<&mut Folder> {
        let missing = self.missing("directory", path);
        self.root.find_mut(path).ok_or(missing)
    }

    pub fn directory(&self, path: &str) -> Result<&Directory> {
        let (parent, name) = split_path(path);
        self.root
            .find(parent)
            .and_then(|folder| folder.directories.get(name))
            .ok_or_else(|| self.missing("directory", path))
    }

    fn directory_mut(&mut self, path: &str) -> Result<&mut Directory> {
        let missing = self.missing("directory", path);
        let (parent, name) = split_path(path);
        self.root
            .find_mut(parent)
            .and_then(|folder| folder.directories.get_mut(name))
            .ok_or(missing)
    }

    pub fn exists_directory(&self, path: &str) -> bool {
        self.directory(path).is_ok()
    }

    pub fn file(&self, path: &str) -> Result<&DiskFile> {
        let (parent, name) = split_path(path);
        self.root
            .find(parent)
            .and_then(|folder| folder.files.get(name))
            .ok_or_else(|| self.missing("file", path))
    }

    fn file_mut(&mut self, path: &str) -> Result<&mut DiskFile> {
        let missing = self.missing("file", path);
        let (parent, name) = split_path(path);
        self.root
            .find_mut(parent)
            .and_then(|folder| folder.files.get_mut(name))
            .ok_or(missing)
    }

    pub fn exists_file(&self, path: &str) -> bool {
        self.file(path).is_ok()
    }

    /// Create the last segment of `path` inside its (existing) parent
    pub fn create_directory(&mut self, path: &str) -> Result<()> {
        let (parent, name) = split_path(path);
        let directory = Directory::new(name)?;
        self.folder_mut(parent)?.add_directory(directory)
    }

    pub fn create_file(&mut self, path: &str, content: &str) -> Result<()> {
        let (parent, name) = split_path(path);
        let file = DiskFile::new(name, content)?;
        self.folder_mut(parent)?.add_file(file)
    }

    /// Removes the directory with everything under it
    pub fn remove_directory(&mut self, path: &str) -> bool {
        let (parent, name) = split_path(path);
        match self.root.find_mut(parent) {
            Some(folder) => folder.directories.remove(name).is_some(),
            None => false,
        }
    }

    pub fn remove_file(&mut self, path: &str) -> bool {
        let (parent, name) = split_path(path);
        match self.root.find_mut(parent) {
            Some(folder) => folder.files.remove(name).is_some(),
            None => false,
        }
    }

    pub fn rename_directory(&mut self, path: &str, new_name: &str) -> Result<()> {
        let (parent, name) = split_path(path);
        if name.is_empty() {
            return Err(self.missing("directory", path));
        }
        self.folder_mut(parent)?.rename_directory(name, new_name)
    }

    pub fn rename_file(&mut self, path: &str, new_name: &str) -> Result<()> {
        let (parent, name) = split_path(path);
        if name.is_empty() {
            return Err(self.missing("file", path));
        }
        self.folder_mut(parent)?.rename_file(name, new_name)
    }

    pub fn set_directory_description(&mut self, path: &str, description: &str) -> Result<()> {
        self.directory_mut(path)?.set_description(description)
    }

    pub fn set_file_content(&mut self, path: &str, content: &str) -> Result<()> {
        self.file_mut(path)?.set_content(content)
    }

    pub fn set_file_description(&mut self, path: &str, description: &str) -> Result<()> {
        self.file_mut(path)?.set_description(description)
    }

    fn missing(&self, kind: &str, path: &str) -> MochaError {
        MochaError::NotFound(format!("{} '{}' on disk '{}'", kind, path, self.name))
    }

    pub fn to_node(&self) -> Node {
        let mut node = Node::new(&self.name);
        if !self.description.is_empty() {
            node.set_attribute(DESCRIPTION, &self.description);
        }
        node.children = self.root.to_nodes();
        node
    }

    pub fn from_node(node: &Node) -> Result<Self> {
        let mut disk = Disk::new(&node.name)?;
        disk.description = node.attribute(DESCRIPTION).unwrap_or_default().to_string();
        disk.root = Folder::from_nodes(&node.children)?;
        Ok(disk)
    }
}

impl Named for Disk {
    fn name(&self) -> &str {
        &self.name
    }

    fn set_name(&mut self, name: String) {
        self.name = name;
    }
}
