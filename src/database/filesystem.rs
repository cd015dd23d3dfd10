use crate::database::entity;
use crate::database::MochaDatabase;
use crate::error::Result;
use crate::schema::{Directory, Disk, DiskFile};

impl MochaDatabase {
    pub fn create_disk(&mut self, name: &str) -> Result<()> {
        let disk = Disk::new(name)?;
        self.add_disk(&disk)
    }

    pub fn add_disk(&mut self, disk: &Disk) -> Result<()> {
        self.commit("FILESYSTEM_CREATEDISK", |doc| entity::insert(doc, disk))
    }

    pub fn remove_disk(&mut self, name: &str) -> Result<bool> {
        self.commit("FILESYSTEM_REMOVEDISK", |doc| entity::remove::<Disk>(doc, name))
    }

    pub fn rename_disk(&mut self, name: &str, new_name: &str) -> Result<()> {
        self.commit("FILESYSTEM_RENAMEDISK", |doc| {
            entity::rename::<Disk>(doc, name, new_name)
        })
    }

    pub fn set_disk_description(&mut self, name: &str, description: &str) -> Result<()> {
        self.commit("FILESYSTEM_SETDISKDESCRIPTION", |doc| {
            entity::edit(doc, name, |disk: &mut Disk| disk.set_description(description))
        })
    }

    pub fn clear_disks(&mut self) -> Result<()> {
        self.commit("FILESYSTEM_CLEARDISKS", entity::clear::<Disk>)
    }

    /// Create the directory at `path`; its parent must already exist
    pub fn create_directory(&mut self, disk: &str, path: &str) -> Result<()> {
        self.commit("FILESYSTEM_CREATEDIRECTORY", |doc| {
            entity::edit(doc, disk, |d: &mut Disk| d.create_directory(path))
        })
    }

    /// Returns whether the directory existed; the disk must exist
    pub fn remove_directory(&mut self, disk: &str, path: &str) -> Result<bool> {
        self.commit("FILESYSTEM_REMOVEDIRECTORY", |doc| {
            entity::edit(doc, disk, |d: &mut Disk| Ok(d.remove_directory(path)))
        })
    }

    pub fn rename_directory(&mut self, disk: &str, path: &str, new_name: &str) -> Result<()> {
        self.commit("FILESYSTEM_RENAMEDIRECTORY", |doc| {
            entity::edit(doc, disk, |d: &mut Disk| d.rename_directory(path, new_name))
        })
    }

    pub fn set_directory_description(&mut self, disk: &str, path: &str, description: &str) -> Result<()> {
        self.commit("FILESYSTEM_SETDIRECTORYDESCRIPTION", |doc| {
            entity::edit(doc, disk, |d: &mut Disk| {
                d.set_directory_description(path, description)
            })
        })
    }

    pub fn create_file(&mut self, disk: &str, path: &str, content: &str) -> Result<()> {
        self.commit("FILESYSTEM_CREATEFILE", |doc| {
            entity::edit(doc, disk, |d: &mut Disk| d.create_file(path, content))
        })
    }

    pub fn remove_file(&mut self, disk: &str, path: &str) -> Result<bool> {
        self.commit("FILESYSTEM_REMOVEFILE", |doc| {
            entity::edit(doc, disk, |d: &mut Disk| Ok(d.remove_file(path)))
        })
    }

    pub fn rename_file(&mut self, disk: &str, path: &str, new_name: &str) -> Result<()> {
        self.commit("FILESYSTEM_RENAMEFILE", |doc| {
            entity::edit(doc, disk, |d: &mut Disk| d.rename_file(path, new_name))
        })
    }

    pub fn set_file_content(&mut self, disk: &str, path: &str, content: &str) -> Result<()> {
        self.commit("FILESYSTEM_SETFILECONTENT", |doc| {
            entity::edit(doc, disk, |d: &mut Disk| d.set_file_content(path, content))
        })
    }

    pub fn set_file_description(&mut self, disk: &str, path: &str, description: &str) -> Result<()> {
        self.commit("FILESYSTEM_SETFILEDESCRIPTION", |doc| {
            entity::edit(doc, disk, |d: &mut Disk| d.set_file_description(path, description))
        })
    }

    pub fn disk(&self, name: &str) -> Result<Disk> {
        entity::load(&self.document, name)
    }

    pub fn disks(&self) -> Result<Vec<Disk>> {
        entity::load_all(&self.document)
    }

    pub fn disk_count(&self) -> usize {
        entity::count::<Disk>(&self.document)
    }

    pub fn exists_disk(&self, name: &str) -> bool {
        entity::exists::<Disk>(&self.document, name)
    }

    pub fn disk_description(&self, name: &str) -> Result<String> {
        Ok(self.disk(name)?.description().to_string())
    }

    pub fn directory(&self, disk: &str, path: &str) -> Result<Directory> {
        self.disk(disk)?.directory(path).cloned()
    }

    pub fn exists_directory(&self, disk: &str, path: &str) -> bool {
        self.disk(disk).map(|d| d.exists_directory(path)).unwrap_or(false)
    }

    pub fn directory_description(&self, disk: &str, path: &str) -> Result<String> {
        Ok(self.directory(disk, path)?.description().to_string())
    }

    /// Subdirectories directly under `path`; an empty path lists the disk root
    pub fn directories(&self, disk: &str, path: &str) -> Result<Vec<Directory>> {
        Ok(self.disk(disk)?.folder(path)?.directories().iter().cloned().collect())
    }

    pub fn directory_count(&self, disk: &str, path: &str) -> Result<usize> {
        Ok(self.disk(disk)?.folder(path)?.directories().len())
    }

    /// Files directly under `path`; an empty path lists the disk root
    pub fn files(&self, disk: &str, path: &str) -> Result<Vec<DiskFile>> {
        Ok(self.disk(disk)?.folder(path)?.files().iter().cloned().collect())
    }

    pub fn file_count(&self, disk: &str, path: &str) -> Result<usize> {
        Ok(self.disk(disk)?.folder(path)?.files().len())
    }

    pub fn file(&self, disk: &str, path: &str) -> Result<DiskFile> {
        self.disk(disk)?.file(path).cloned()
    }

    pub fn exists_file(&self, disk: &str, path: &str) -> bool {
        self.disk(disk).map(|d| d.exists_file(path)).unwrap_or(false)
    }

    pub fn file_content(&self, disk: &str, path: &str) -> Result<String> {
        Ok(self.file(disk, path)?.content().to_string())
    }

    pub fn file_description(&self, disk: &str, path: &str) -> Result<String> {
        Ok(self.file(disk, path)?.description().to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::MochaError;

    #[test]
    fn test_directories_and_files() {
        let mut db = MochaDatabase::in_memory();
        db.create_disk("Work").unwrap();
        db.create_directory("Work", "docs").unwrap();
        db.create_directory("Work", "docs/api").unwrap();
        db.create_file("Work", "docs/index.md", "welcome").unwrap();

        assert_eq!(db.file_content("Work", "docs/index.md").unwrap(), "welcome");
        db.set_file_content("Work", "docs/index.md", "hi").unwrap();
        assert_eq!(db.file_content("Work", "docs/index.md").unwrap(), "hi");
        assert_eq!(db.directory_count("Work", "").unwrap(), 1);
        assert_eq!(db.file_count("Work", "docs").unwrap(), 1);

        db.rename_directory("Work", "docs", "manual").unwrap();
        assert!(db.exists_file("Work", "manual/index.md"));
        assert!(db.exists_directory("Work", "manual/api"));
        assert!(db.remove_file("Work", "manual/index.md").unwrap());
        assert!(!db.remove_file("Work", "manual/index.md").unwrap());
        assert!(db.remove_directory("Work", "manual").unwrap());
        assert_eq!(db.directories("Work", "").unwrap(), Vec::new());
    }

    #[test]
    fn test_missing_disk() {
        let mut db = MochaDatabase::in_memory();
        assert!(db.create_directory("Nope", "a").unwrap_err().is_not_found());
        assert!(db.remove_file("Nope", "a").unwrap_err().is_not_found());
        assert!(!db.exists_file("Nope", "a"));
        assert!(db.files("Nope", "").unwrap_err().is_not_found());
    }

    #[test]
    fn test_disk_names() {
        let mut db = MochaDatabase::in_memory();
        db.create_disk("A").unwrap();
        assert!(matches!(db.create_disk("A"), Err(MochaError::Conflict(_))));
        db.rename_disk("A", "B").unwrap();
        db.set_disk_description("B", "backup").unwrap();
        assert_eq!(db.disk_description("B").unwrap(), "backup");
        assert_eq!(db.disk_count(), 1);
        db.clear_disks().unwrap();
        assert!(!db.exists_disk("B"));
    }

    #[test]
    fn test_failed_edit_keeps_disk() {
        let mut db = MochaDatabase::in_memory();
        db.create_disk("Work").unwrap();
        db.create_file("Work", "a.txt", "one").unwrap();
        let generation = db.generation();
        assert!(db.create_file("Work", "a.txt", "two").is_err());
        assert_eq!(db.generation(), generation);
        assert_eq!(db.file_content("Work", "a.txt").unwrap(), "one");
    }
}
