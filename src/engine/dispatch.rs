//! Static dispatch table: argument count, then keyword

use std::collections::HashMap;
use std::sync::OnceLock;

use crate::database::MochaDatabase;
use crate::engine::result::MochaResult;
use crate::error::{MochaError, Result};
use crate::types::ScalarType;

/// Highest number of arguments any keyword takes
pub const MAX_ARITY: usize = 4;

pub type RunFn = fn(&mut MochaDatabase, &[&str]) -> Result<()>;
pub type FlagFn = fn(&mut MochaDatabase, &[&str]) -> Result<bool>;
pub type GetFn = fn(&MochaDatabase, &[&str]) -> Result<MochaResult>;

#[derive(Clone, Copy)]
pub enum Handler {
    /// Mutation returning nothing
    Run(RunFn),
    /// Removal reporting whether something was removed
    Flag(FlagFn),
    /// Read-only query
    Get(GetFn),
}

#[derive(Clone, Copy)]
pub struct Operation {
    pub keyword: &'static str,
    pub arity: usize,
    pub handler: Handler,
}

impl Operation {
    pub fn is_mutating(&self) -> bool {
        !matches!(self.handler, Handler::Get(_))
    }
}

impl std::fmt::Debug for Operation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Operation")
            .field("keyword", &self.keyword)
            .field("arity", &self.arity)
            .field("mutating", &self.is_mutating())
            .finish()
    }
}

/// One keyword map per argument count
fn table() -> &'static [HashMap<&'static str, Operation>] {
    static TABLE: OnceLock<Vec<HashMap<&'static str, Operation>>> = OnceLock::new();
    TABLE.get_or_init(|| {
        let mut table = vec![HashMap::new(); MAX_ARITY + 1];
        for operation in build() {
            table[operation.arity].insert(operation.keyword, operation);
        }
        table
    })
}

/// `keyword` must already be upper-cased
pub fn lookup(arity: usize, keyword: &str) -> Option<&'static Operation> {
    table().get(arity)?.get(keyword)
}

/// Every operation, ordered by argument count then keyword
pub fn operations() -> Vec<&'static Operation> {
    let mut all: Vec<&'static Operation> = table().iter().flat_map(|m| m.values()).collect();
    all.sort_by_key(|op| (op.arity, op.keyword));
    all
}

fn index(arg: &str) -> Result<usize> {
    arg.trim()
        .parse()
        .map_err(|_| MochaError::Command("invalid index".to_string()))
}

fn data_type(arg: &str) -> Result<ScalarType> {
    ScalarType::from_name(arg)
}

fn op(keyword: &'static str, arity: usize, handler: Handler) -> Operation {
    Operation {
        keyword,
        arity,
        handler,
    }
}

fn build() -> Vec<Operation> {
    use Handler::{Flag, Get, Run};

    vec![
        // database
        op("RESETMOCHA", 0, Run(|db, _| db.reset_mocha())),
        op("CLEARALL", 0, Run(|db, _| db.clear_all())),
        op("SETPASSWORD", 1, Run(|db, a| db.set_password(a[0]))),
        op("SETDESCRIPTION", 1, Run(|db, a| db.set_description(a[0]))),
        op("GETPASSWORD", 0, Get(|db, _| Ok(db.password().into()))),
        op("GETDESCRIPTION", 0, Get(|db, _| Ok(db.description().into()))),
        // tables
        op("RESETTABLES", 0, Run(|db, _| db.reset_tables())),
        op("CLEARTABLES", 0, Run(|db, _| db.clear_tables())),
        op("GETTABLES", 0, Get(|db, _| Ok(MochaResult::collection(db.tables()?)))),
        op("TABLECOUNT", 0, Get(|db, _| Ok(db.table_count().into()))),
        op("CREATETABLE", 1, Run(|db, a| db.create_table(a[0]))),
        op("REMOVETABLE", 1, Flag(|db, a| db.remove_table(a[0]))),
        op("RESETTABLE", 1, Run(|db, a| db.reset_table(a[0]))),
        op("ADDROW", 1, Run(|db, a| db.add_empty_row(a[0]))),
        op("GETTABLE", 1, Get(|db, a| Ok(db.table(a[0])?.into()))),
        op("EXISTSTABLE", 1, Get(|db, a| Ok(db.exists_table(a[0]).into()))),
        op("GETTABLEDESCRIPTION", 1, Get(|db, a| Ok(db.table_description(a[0])?.into()))),
        op("GETCOLUMNS", 1, Get(|db, a| Ok(MochaResult::collection(db.columns(a[0])?)))),
        op("COLUMNCOUNT", 1, Get(|db, a| Ok(db.column_count(a[0])?.into()))),
        op("GETROWS", 1, Get(|db, a| Ok(MochaResult::collection(db.rows(a[0])?)))),
        op("ROWCOUNT", 1, Get(|db, a| Ok(db.row_count(a[0])?.into()))),
        op("RENAMETABLE", 2, Run(|db, a| db.rename_table(a[0], a[1]))),
        op("SETTABLEDESCRIPTION", 2, Run(|db, a| db.set_table_description(a[0], a[1]))),
        // columns
        op("CREATECOLUMN", 2, Run(|db, a| db.create_column(a[0], a[1], ScalarType::String))),
        op("CREATECOLUMN", 3, Run(|db, a| db.create_column(a[0], a[1], data_type(a[2])?))),
        op("REMOVECOLUMN", 2, Flag(|db, a| db.remove_column(a[0], a[1]))),
        op("RENAMECOLUMN", 3, Run(|db, a| db.rename_column(a[0], a[1], a[2]))),
        op("SETCOLUMNDESCRIPTION", 3, Run(|db, a| db.set_column_description(a[0], a[1], a[2]))),
        op("SETCOLUMNDATATYPE", 3, Run(|db, a| {
            db.set_column_data_type(a[0], a[1], data_type(a[2])?)
        })),
        op("GETCOLUMN", 2, Get(|db, a| Ok(db.column(a[0], a[1])?.into()))),
        op("EXISTSCOLUMN", 2, Get(|db, a| Ok(db.exists_column(a[0], a[1]).into()))),
        op("GETCOLUMNDESCRIPTION", 2, Get(|db, a| Ok(db.column_description(a[0], a[1])?.into()))),
        op("GETCOLUMNDATATYPE", 2, Get(|db, a| Ok(db.column_data_type(a[0], a[1])?.into()))),
        // rows and data
        op("REMOVEROW", 2, Flag(|db, a| db.remove_row(a[0], index(a[1])?))),
        op("GETROW", 2, Get(|db, a| Ok(db.row(a[0], index(a[1])?)?.into()))),
        op("ADDDATA", 3, Run(|db, a| db.add_data(a[0], a[1], a[2]))),
        op("UPDATEDATA", 4, Run(|db, a| db.update_data(a[0], a[1], index(a[2])?, a[3]))),
        op("GETDATAS", 2, Get(|db, a| Ok(MochaResult::collection(db.datas(a[0], a[1])?)))),
        op("DATACOUNT", 2, Get(|db, a| Ok(db.data_count(a[0], a[1])?.into()))),
        op("GETDATA", 3, Get(|db, a| Ok(db.data(a[0], a[1], index(a[2])?)?.into()))),
        op("EXISTSDATA", 3, Get(|db, a| Ok(db.exists_data(a[0], a[1], a[2]).into()))),
        // stacks
        op("CLEARSTACKS", 0, Run(|db, _| db.clear_stacks())),
        op("GETSTACKS", 0, Get(|db, _| Ok(MochaResult::collection(db.stacks()?)))),
        op("STACKCOUNT", 0, Get(|db, _| Ok(db.stack_count().into()))),
        op("CREATESTACK", 1, Run(|db, a| db.create_stack(a[0]))),
        op("REMOVESTACK", 1, Flag(|db, a| db.remove_stack(a[0]))),
        op("GETSTACK", 1, Get(|db, a| Ok(db.stack(a[0])?.into()))),
        op("EXISTSSTACK", 1, Get(|db, a| Ok(db.exists_stack(a[0]).into()))),
        op("GETSTACKDESCRIPTION", 1, Get(|db, a| Ok(db.stack_description(a[0])?.into()))),
        op("RENAMESTACK", 2, Run(|db, a| db.rename_stack(a[0], a[1]))),
        op("SETSTACKDESCRIPTION", 2, Run(|db, a| db.set_stack_description(a[0], a[1]))),
        op("REMOVESTACKITEM", 2, Flag(|db, a| db.remove_stack_item(a[0], a[1]))),
        op("GETSTACKITEM", 2, Get(|db, a| Ok(db.stack_item(a[0], a[1])?.into()))),
        op("EXISTSSTACKITEM", 2, Get(|db, a| Ok(db.exists_stack_item(a[0], a[1]).into()))),
        op("GETSTACKITEMVALUE", 2, Get(|db, a| Ok(db.stack_item_value(a[0], a[1])?.into()))),
        op("GETSTACKITEMDESCRIPTION", 2, Get(|db, a| {
            Ok(db.stack_item_description(a[0], a[1])?.into())
        })),
        op("CREATESTACKITEM", 3, Run(|db, a| db.create_stack_item(a[0], "", a[1], a[2]))),
        op("CREATESTACKITEM", 4, Run(|db, a| db.create_stack_item(a[0], a[1], a[2], a[3]))),
        op("RENAMESTACKITEM", 3, Run(|db, a| db.rename_stack_item(a[0], a[1], a[2]))),
        op("SETSTACKITEMVALUE", 3, Run(|db, a| db.set_stack_item_value(a[0], a[1], a[2]))),
        op("SETSTACKITEMDESCRIPTION", 3, Run(|db, a| {
            db.set_stack_item_description(a[0], a[1], a[2])
        })),
        // sectors
        op("CLEARSECTORS", 0, Run(|db, _| db.clear_sectors())),
        op("GETSECTORS", 0, Get(|db, _| Ok(MochaResult::collection(db.sectors()?)))),
        op("SECTORCOUNT", 0, Get(|db, _| Ok(db.sector_count().into()))),
        op("CREATESECTOR", 1, Run(|db, a| db.create_sector(a[0], "", ""))),
        op("CREATESECTOR", 2, Run(|db, a| db.create_sector(a[0], a[1], ""))),
        op("CREATESECTOR", 3, Run(|db, a| db.create_sector(a[0], a[1], a[2]))),
        op("REMOVESECTOR", 1, Flag(|db, a| db.remove_sector(a[0]))),
        op("GETSECTOR", 1, Get(|db, a| Ok(db.sector(a[0])?.into()))),
        op("EXISTSSECTOR", 1, Get(|db, a| Ok(db.exists_sector(a[0]).into()))),
        op("GETSECTORDATA", 1, Get(|db, a| Ok(db.sector_data(a[0])?.into()))),
        op("GETSECTORDESCRIPTION", 1, Get(|db, a| Ok(db.sector_description(a[0])?.into()))),
        op("RENAMESECTOR", 2, Run(|db, a| db.rename_sector(a[0], a[1]))),
        op("SETSECTORDATA", 2, Run(|db, a| db.set_sector_data(a[0], a[1]))),
        op("SETSECTORDESCRIPTION", 2, Run(|db, a| db.set_sector_description(a[0], a[1]))),
        op("REMOVESECTORATTRIBUTE", 2, Flag(|db, a| db.remove_sector_attribute(a[0], a[1]))),
        op("GETSECTORATTRIBUTE", 2, Get(|db, a| Ok(db.sector_attribute(a[0], a[1])?.into()))),
        op("SETSECTORATTRIBUTE", 3, Run(|db, a| db.set_sector_attribute(a[0], a[1], a[2]))),
        // file system
        op("FILESYSTEM_CLEARDISKS", 0, Run(|db, _| db.clear_disks())),
        op("FILESYSTEM_GETDISKS", 0, Get(|db, _| Ok(MochaResult::collection(db.disks()?)))),
        op("FILESYSTEM_DISKCOUNT", 0, Get(|db, _| Ok(db.disk_count().into()))),
        op("FILESYSTEM_CREATEDISK", 1, Run(|db, a| db.create_disk(a[0]))),
        op("FILESYSTEM_REMOVEDISK", 1, Flag(|db, a| db.remove_disk(a[0]))),
        op("FILESYSTEM_GETDISK", 1, Get(|db, a| Ok(db.disk(a[0])?.into()))),
        op("FILESYSTEM_EXISTSDISK", 1, Get(|db, a| Ok(db.exists_disk(a[0]).into()))),
        op("FILESYSTEM_GETDISKDESCRIPTION", 1, Get(|db, a| Ok(db.disk_description(a[0])?.into()))),
        op("FILESYSTEM_RENAMEDISK", 2, Run(|db, a| db.rename_disk(a[0], a[1]))),
        op("FILESYSTEM_SETDISKDESCRIPTION", 2, Run(|db, a| db.set_disk_description(a[0], a[1]))),
        op("FILESYSTEM_CREATEDIRECTORY", 2, Run(|db, a| db.create_directory(a[0], a[1]))),
        op("FILESYSTEM_REMOVEDIRECTORY", 2, Flag(|db, a| db.remove_directory(a[0], a[1]))),
        op("FILESYSTEM_GETDIRECTORY", 2, Get(|db, a| Ok(db.directory(a[0], a[1])?.into()))),
        op("FILESYSTEM_EXISTSDIRECTORY", 2, Get(|db, a| Ok(db.exists_directory(a[0], a[1]).into()))),
        op("FILESYSTEM_GETDIRECTORYDESCRIPTION", 2, Get(|db, a| {
            Ok(db.directory_description(a[0], a[1])?.into())
        })),
        op("FILESYSTEM_GETDIRECTORIES", 2, Get(|db, a| {
            Ok(MochaResult::collection(db.directories(a[0], a[1])?))
        })),
        op("FILESYSTEM_DIRECTORYCOUNT", 2, Get(|db, a| Ok(db.directory_count(a[0], a[1])?.into()))),
        op("FILESYSTEM_CREATEFILE", 2, Run(|db, a| db.create_file(a[0], a[1], ""))),
        op("FILESYSTEM_CREATEFILE", 3, Run(|db, a| db.create_file(a[0], a[1], a[2]))),
        op("FILESYSTEM_REMOVEFILE", 2, Flag(|db, a| db.remove_file(a[0], a[1]))),
        op("FILESYSTEM_GETFILE", 2, Get(|db, a| Ok(db.file(a[0], a[1])?.into()))),
        op("FILESYSTEM_EXISTSFILE", 2, Get(|db, a| Ok(db.exists_file(a[0], a[1]).into()))),
        op("FILESYSTEM_GETFILECONTENT", 2, Get(|db, a| Ok(db.file_content(a[0], a[1])?.into()))),
        op("FILESYSTEM_GETFILEDESCRIPTION", 2, Get(|db, a| {
            Ok(db.file_description(a[0], a[1])?.into())
        })),
        op("FILESYSTEM_GETFILES", 2, Get(|db, a| Ok(MochaResult::collection(db.files(a[0], a[1])?)))),
        op("FILESYSTEM_FILECOUNT", 2, Get(|db, a| Ok(db.file_count(a[0], a[1])?.into()))),
        op("FILESYSTEM_RENAMEDIRECTORY", 3, Run(|db, a| db.rename_directory(a[0], a[1], a[2]))),
        op("FILESYSTEM_SETDIRECTORYDESCRIPTION", 3, Run(|db, a| {
            db.set_directory_description(a[0], a[1], a[2])
        })),
        op("FILESYSTEM_RENAMEFILE", 3, Run(|db, a| db.rename_file(a[0], a[1], a[2]))),
        op("FILESYSTEM_SETFILECONTENT", 3, Run(|db, a| db.set_file_content(a[0], a[1], a[2]))),
        op("FILESYSTEM_SETFILEDESCRIPTION", 3, Run(|db, a| {
            db.set_file_description(a[0], a[1], a[2])
        })),
        // logs
        op("CLEARLOGS", 0, Run(|db, _| db.clear_logs())),
        op("RESTORETOFIRSTLOG", 0, Run(|db, _| db.restore_to_first_log())),
        op("RESTORETOLASTLOG", 0, Run(|db, _| db.restore_to_last_log())),
        op("GETLOGS", 0, Get(|db, _| Ok(MochaResult::collection(db.logs()?)))),
        op("LOGCOUNT", 0, Get(|db, _| Ok(db.log_count().into()))),
        op("GETFIRSTLOG", 0, Get(|db, _| Ok(db.first_log()?.into()))),
        op("GETLASTLOG", 0, Get(|db, _| Ok(db.last_log()?.into()))),
        op("REMOVELOG", 1, Flag(|db, a| db.remove_log(a[0]))),
        op("RESTORETOLOG", 1, Run(|db, a| db.restore_to_log(a[0]))),
        op("GETLOG", 1, Get(|db, a| Ok(db.log(a[0])?.into()))),
        op("EXISTSLOG", 1, Get(|db, a| Ok(db.exists_log(a[0]).into()))),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::{classify, CommandKind};

    #[test]
    fn test_lookup_by_arity() {
        assert!(lookup(1, "CREATETABLE").is_some());
        assert!(lookup(2, "CREATETABLE").is_none());
        assert!(lookup(3, "UPDATEDATA").is_none());
        assert!(lookup(4, "UPDATEDATA").is_some());
        assert!(lookup(5, "UPDATEDATA").is_none());
    }

    #[test]
    fn test_overloaded_keywords() {
        assert!(lookup(2, "CREATECOLUMN").is_some());
        assert!(lookup(3, "CREATECOLUMN").is_some());
        for arity in 1..=3 {
            assert!(lookup(arity, "CREATESECTOR").is_some());
        }
        assert!(lookup(2, "FILESYSTEM_CREATEFILE").is_some());
        assert!(lookup(3, "FILESYSTEM_CREATEFILE").is_some());
    }

    #[test]
    fn test_handlers_agree_with_classifier() {
        for operation in operations() {
            let expected = if operation.is_mutating() {
                CommandKind::Mutating
            } else {
                CommandKind::ValueReturning
            };
            assert_eq!(
                classify(operation.keyword),
                Some(expected),
                "{}",
                operation.keyword
            );
        }
    }

    #[test]
    fn test_operations_sorted() {
        let all = operations();
        assert_eq!(all.first().map(|op| op.arity), Some(0));
        assert_eq!(all.last().map(|op| op.arity), Some(MAX_ARITY));
    }

    #[test]
    fn test_invalid_index() {
        let err = index("first").unwrap_err();
        assert_eq!(err.to_string(), "Command error: invalid index");
        assert_eq!(index(" 2 ").unwrap(), 2);
    }
}
