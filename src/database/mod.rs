//! The database handle: owns the document and commits every change through
//! persistence.

mod entity;
mod filesystem;
mod logs;
mod sectors;
mod stacks;
mod tables;

use crate::document::{
    ChangeLogHook, Document, FilePersistence, MemoryPersistence, PendingSave, Persistence,
    SaveHook, DESCRIPTION, FILE_SYSTEM, MAX_LOGS, PASSWORD, ROOT_SECTION, SECTORS, STACKS, TABLES,
};
use crate::error::{MochaError, Result};
use crate::schema::naming::{check_password, check_value};

/// How a database handle is opened
#[derive(Debug, Clone)]
pub struct DatabaseOptions {
    pub read_only: bool,
    /// Must match the stored password when one is set
    pub password: Option<String>,
    /// Record a snapshot before every change
    pub log_changes: bool,
    pub max_logs: usize,
}

impl Default for DatabaseOptions {
    fn default() -> Self {
        Self {
            read_only: false,
            password: None,
            log_changes: false,
            max_logs: MAX_LOGS,
        }
    }
}

pub struct MochaDatabase {
    document: Document,
    persistence: Box<dyn Persistence>,
    hooks: Vec<Box<dyn SaveHook>>,
    options: DatabaseOptions,
    generation: u64,
}

impl std::fmt::Debug for MochaDatabase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MochaDatabase")
            .field("location", &self.persistence.location())
            .field("options", &self.options)
            .field("generation", &self.generation)
            .finish()
    }
}

impl MochaDatabase {
    /// Open the JSON database at `path`, creating it unless read-only
    pub fn open(path: impl Into<std::path::PathBuf>, options: DatabaseOptions) -> Result<Self> {
        Self::with_persistence(Box::new(FilePersistence::new(path)), options)
    }

    /// A fresh database that is never written to disk
    pub fn in_memory() -> Self {
        Self {
            document: Document::new(),
            persistence: Box::new(MemoryPersistence::new()),
            hooks: Vec::new(),
            options: DatabaseOptions::default(),
            generation: 0,
        }
    }

    pub fn with_persistence(
        mut persistence: Box<dyn Persistence>,
        options: DatabaseOptions,
    ) -> Result<Self> {
        let document = match persistence.load()? {
            Some(document) => document,
            None if options.read_only => {
                return Err(MochaError::NotFound(format!(
                    "database '{}'",
                    persistence.location()
                )));
            }
            None => {
                let document = Document::new();
                persistence.save(&document)?;
                log::debug!("created {}", persistence.location());
                document
            }
        };

        let stored = stored_password(&document);
        if !stored.is_empty() && options.password.as_deref() != Some(stored) {
            return Err(MochaError::InvalidOperation(
                "password does not match".to_string(),
            ));
        }

        let mut hooks: Vec<Box<dyn SaveHook>> = Vec::new();
        if options.log_changes {
            hooks.push(Box::new(ChangeLogHook::new(options.max_logs)));
        }

        log::debug!(
            "opened {} (read_only: {})",
            persistence.location(),
            options.read_only
        );
        Ok(Self {
            document,
            persistence,
            hooks,
            options,
            generation: 0,
        })
    }

    /// Register a hook run before every save
    pub fn add_hook(&mut self, hook: impl SaveHook + 'static) {
        self.hooks.push(Box::new(hook));
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    /// Number of saves made through this handle
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn is_read_only(&self) -> bool {
        self.options.read_only
    }

    pub fn options(&self) -> &DatabaseOptions {
        &self.options
    }

    pub fn location(&self) -> String {
        self.persistence.location()
    }

    /// Apply `edit` to a copy of the document and save it.
    ///
    /// Nothing is saved when the edit fails or leaves the document unchanged.
    pub(crate) fn commit<T>(
        &mut self,
        operation: &str,
        edit: impl FnOnce(&mut Document) -> Result<T>,
    ) -> Result<T> {
        self.commit_with(operation, false, edit)
    }

    /// Commit an edit of the log section itself
    pub(crate) fn commit_logs<T>(
        &mut self,
        operation: &str,
        edit: impl FnOnce(&mut Document) -> Result<T>,
    ) -> Result<T> {
        self.commit_with(operation, true, edit)
    }

    fn commit_with<T>(
        &mut self,
        operation: &str,
        touches_logs: bool,
        edit: impl FnOnce(&mut Document) -> Result<T>,
    ) -> Result<T> {
        if self.options.read_only {
            return Err(MochaError::InvalidOperation(format!(
                "{} is not allowed on a read-only database",
                operation
            )));
        }

        let mut next = self.document.clone();
        let output = edit(&mut next)?;
        if next == self.document {
            log::trace!("{} changed nothing, skipping save", operation);
            return Ok(output);
        }

        let mut pending = PendingSave {
            previous: &self.document,
            next: &mut next,
            operation,
            touches_logs,
        };
        for hook in self.hooks.iter_mut() {
            hook.before_save(&mut pending)?;
        }

        self.persistence.save(&next)?;
        self.document = next;
        self.generation += 1;
        log::debug!("{} committed, generation {}", operation, self.generation);
        Ok(output)
    }

    pub fn password(&self) -> String {
        stored_password(&self.document).to_string()
    }

    pub fn set_password(&mut self, password: &str) -> Result<()> {
        check_password(password)?;
        self.commit("SETPASSWORD", |doc| {
            root_field(doc, PASSWORD)?.value = password.to_string();
            Ok(())
        })?;
        self.options.password = Some(password.to_string()).filter(|p| !p.is_empty());
        Ok(())
    }

    pub fn description(&self) -> String {
        self.document
            .get(&format!("{}/{}", ROOT_SECTION, DESCRIPTION))
            .map(|node| node.value.clone())
            .unwrap_or_default()
    }

    pub fn set_description(&mut self, description: &str) -> Result<()> {
        check_value(description)?;
        self.commit("SETDESCRIPTION", |doc| {
            root_field(doc, DESCRIPTION)?.value = description.to_string();
            Ok(())
        })
    }

    /// Wipe tables, sectors, stacks, disks and the description; keep password and logs
    pub fn reset_mocha(&mut self) -> Result<()> {
        self.commit("RESETMOCHA", |doc| {
            for section in [TABLES, SECTORS, STACKS, FILE_SYSTEM] {
                doc.section_mut(section)?.children.clear();
            }
            root_field(doc, DESCRIPTION)?.value.clear();
            Ok(())
        })
    }

    /// Remove every table, sector, stack and disk
    pub fn clear_all(&mut self) -> Result<()> {
        self.commit("CLEARALL", |doc| {
            for section in [TABLES, SECTORS, STACKS, FILE_SYSTEM] {
                doc.section_mut(section)?.children.clear();
            }
            Ok(())
        })
    }
}

fn stored_password(document: &Document) -> &str {
    document
        .get(&format!("{}/{}", ROOT_SECTION, PASSWORD))
        .map(|node| node.value.as_str())
        .unwrap_or_default()
}

fn root_field<'a>(doc: &'a mut Document, field: &str) -> Result<&'a mut crate::document::Node> {
    doc.section_mut(ROOT_SECTION)?
        .child_mut(field)
        .ok_or_else(|| MochaError::NotFound(format!("{}/{}", ROOT_SECTION, field)))
}
