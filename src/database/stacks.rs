use crate::database::entity;
use crate::database::MochaDatabase;
use crate::error::Result;
use crate::schema::{Stack, StackItem};

impl MochaDatabase {
    pub fn create_stack(&mut self, name: &str) -> Result<()> {
        let stack = Stack::new(name)?;
        self.add_stack(&stack)
    }

    pub fn add_stack(&mut self, stack: &Stack) -> Result<()> {
        self.commit("CREATESTACK", |doc| entity::insert(doc, stack))
    }

    pub fn remove_stack(&mut self, name: &str) -> Result<bool> {
        self.commit("REMOVESTACK", |doc| entity::remove::<Stack>(doc, name))
    }

    pub fn rename_stack(&mut self, name: &str, new_name: &str) -> Result<()> {
        self.commit("RENAMESTACK", |doc| {
            entity::rename::<Stack>(doc, name, new_name)
        })
    }

    pub fn set_stack_description(&mut self, name: &str, description: &str) -> Result<()> {
        self.commit("SETSTACKDESCRIPTION", |doc| {
            entity::edit(doc, name, |stack: &mut Stack| stack.set_description(description))
        })
    }

    pub fn clear_stacks(&mut self) -> Result<()> {
        self.commit("CLEARSTACKS", entity::clear::<Stack>)
    }

    /// Add an item under `parent` (a `/` path inside the stack, empty for the root)
    pub fn create_stack_item(&mut self, stack: &str, parent: &str, name: &str, value: &str) -> Result<()> {
        let item = StackItem::new(name, value)?;
        self.add_stack_item(stack, parent, &item)
    }

    pub fn add_stack_item(&mut self, stack: &str, parent: &str, item: &StackItem) -> Result<()> {
        self.commit("CREATESTACKITEM", |doc| {
            entity::edit(doc, stack, |s: &mut Stack| s.add_item(parent, item.clone()))
        })
    }

    /// Returns whether the item existed; the stack must exist
    pub fn remove_stack_item(&mut self, stack: &str, path: &str) -> Result<bool> {
        self.commit("REMOVESTACKITEM", |doc| {
            entity::edit(doc, stack, |s: &mut Stack| Ok(s.remove_item(path)))
        })
    }

    pub fn rename_stack_item(&mut self, stack: &str, path: &str, new_name: &str) -> Result<()> {
        self.commit("RENAMESTACKITEM", |doc| {
            entity::edit(doc, stack, |s: &mut Stack| s.rename_item(path, new_name))
        })
    }

    pub fn set_stack_item_value(&mut self, stack: &str, path: &str, value: &str) -> Result<()> {
        self.commit("SETSTACKITEMVALUE", |doc| {
            entity::edit(doc, stack, |s: &mut Stack| s.set_item_value(path, value))
        })
    }

    pub fn set_stack_item_description(&mut self, stack: &str, path: &str, description: &str) -> Result<()> {
        self.commit("SETSTACKITEMDESCRIPTION", |doc| {
            entity::edit(doc, stack, |s: &mut Stack| {
                s.set_item_description(path, description)
            })
        })
    }

    pub fn stack(&self, name: &str) -> Result<Stack> {
        entity::load(&self.document, name)
    }

    pub fn stacks(&self) -> Result<Vec<Stack>> {
        entity::load_all(&self.document)
    }

    pub fn stack_count(&self) -> usize {
        entity::count::<Stack>(&self.document)
    }

    pub fn exists_stack(&self, name: &str) -> bool {
        entity::exists::<Stack>(&self.document, name)
    }

    pub fn stack_description(&self, name: &str) -> Result<String> {
        Ok(self.stack(name)?.description().to_string())
    }

    pub fn stack_item(&self, stack: &str, path: &str) -> Result<StackItem> {
        self.stack(stack)?.item(path).cloned()
    }

    pub fn exists_stack_item(&self, stack: &str, path: &str) -> bool {
        self.stack(stack).map(|s| s.exists(path)).unwrap_or(false)
    }

    pub fn stack_item_value(&self, stack: &str, path: &str) -> Result<String> {
        Ok(self.stack_item(stack, path)?.value().to_string())
    }

    pub fn stack_item_description(&self, stack: &str, path: &str) -> Result<String> {
        Ok(self.stack_item(stack, path)?.description().to_string())
    }
}
