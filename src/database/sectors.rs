use crate::database::entity;
use crate::database::MochaDatabase;
use crate::error::Result;
use crate::schema::Sector;

impl MochaDatabase {
    pub fn create_sector(&mut self, name: &str, data: &str, description: &str) -> Result<()> {
        let sector = Sector::new(name, data)?.with_description(description)?;
        self.add_sector(&sector)
    }

    pub fn add_sector(&mut self, sector: &Sector) -> Result<()> {
        self.commit("CREATESECTOR", |doc| entity::insert(doc, sector))
    }

    pub fn remove_sector(&mut self, name: &str) -> Result<bool> {
        self.commit("REMOVESECTOR", |doc| entity::remove::<Sector>(doc, name))
    }

    pub fn rename_sector(&mut self, name: &str, new_name: &str) -> Result<()> {
        self.commit("RENAMESECTOR", |doc| {
            entity::rename::<Sector>(doc, name, new_name)
        })
    }

    pub fn set_sector_data(&mut self, name: &str, data: &str) -> Result<()> {
        self.commit("SETSECTORDATA", |doc| {
            entity::edit(doc, name, |sector: &mut Sector| sector.set_data(data))
        })
    }

    pub fn set_sector_description(&mut self, name: &str, description: &str) -> Result<()> {
        self.commit("SETSECTORDESCRIPTION", |doc| {
            entity::edit(doc, name, |sector: &mut Sector| {
                sector.set_description(description)
            })
        })
    }

    pub fn set_sector_attribute(&mut self, name: &str, key: &str, value: &str) -> Result<()> {
        self.commit("SETSECTORATTRIBUTE", |doc| {
            entity::edit(doc, name, |sector: &mut Sector| sector.set_attribute(key, value))
        })
    }

    /// Returns whether the attribute existed; the sector must exist
    pub fn remove_sector_attribute(&mut self, name: &str, key: &str) -> Result<bool> {
        self.commit("REMOVESECTORATTRIBUTE", |doc| {
            entity::edit(doc, name, |sector: &mut Sector| Ok(sector.remove_attribute(key)))
        })
    }

    pub fn clear_sectors(&mut self) -> Result<()> {
        self.commit("CLEARSECTORS", entity::clear::<Sector>)
    }

    pub fn sector(&self, name: &str) -> Result<Sector> {
        entity::load(&self.document, name)
    }

    pub fn sectors(&self) -> Result<Vec<Sector>> {
        entity::load_all(&self.document)
    }

    pub fn sector_count(&self) -> usize {
        entity::count::<Sector>(&self.document)
    }

    pub fn exists_sector(&self, name: &str) -> bool {
        entity::exists::<Sector>(&self.document, name)
    }

    pub fn sector_data(&self, name: &str) -> Result<String> {
        Ok(self.sector(name)?.data().to_string())
    }

    pub fn sector_description(&self, name: &str) -> Result<String> {
        Ok(self.sector(name)?.description().to_string())
    }

    pub fn sector_attribute(&self, name: &str, key: &str) -> Result<String> {
        Ok(self.sector(name)?.attribute(key)?.to_string())
    }
}
