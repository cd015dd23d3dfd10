//! Persistence collaborators for the document

use std::fs;
use std::path::{Path, PathBuf};

use crate::document::Document;
use crate::error::Result;

/// Loads and saves whole documents; `save` is the commit point
pub trait Persistence {
    /// The stored document, or `None` when nothing has been saved yet
    fn load(&mut self) -> Result<Option<Document>>;

    fn save(&mut self, document: &Document) -> Result<()>;

    /// Where the document lives, for messages
    fn location(&self) -> String;
}

/// JSON file storage with write-then-rename replacement
#[derive(Debug, Clone)]
pub struct FilePersistence {
    path: PathBuf,
}

impl FilePersistence {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

impl Persistence for FilePersistence {
    fn load(&mut self) -> Result<Option<Document>> {
        if !self.path.exists() {
            return Ok(None);
        }
        let content = fs::read_to_string(&self.path)?;
        Ok(Some(Document::from_json(&content)?))
    }

    fn save(&mut self, document: &Document) -> Result<()> {
        // Serialize fully before touching the file system
        let content = document.to_json()?;

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let tmp_path = self.temp_path();
        fs::write(&tmp_path, content)?;
        fs::rename(&tmp_path, &self.path)?;

        log::trace!("wrote {}", self.path.display());
        Ok(())
    }

    fn location(&self) -> String {
        self.path.display().to_string()
    }
}

/// Keeps the last saved document in memory
#[derive(Debug, Clone, Default)]
pub struct MemoryPersistence {
    saved: Option<Document>,
}

impl MemoryPersistence {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from an already populated document
    pub fn with_document(document: Document) -> Self {
        Self {
            saved: Some(document),
        }
    }

    pub fn saved(&self) -> Option<&Document> {
        self.saved.as_ref()
    }
}

impl Persistence for MemoryPersistence {
    fn load(&mut self) -> Result<Option<Document>> {
        Ok(self.saved.clone())
    }

    fn save(&mut self, document: &Document) -> Result<()> {
        self.saved = Some(document.clone());
        Ok(())
    }

    fn location(&self) -> String {
        "memory".to_string()
    }
}
