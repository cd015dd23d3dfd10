//! Command executor

use crate::database::MochaDatabase;
use crate::engine::dispatch::{self, Handler, Operation};
use crate::engine::result::MochaResult;
use crate::error::{MochaError, Result};
use crate::output::OutputFormat;
use crate::parser::{classify, is_break_query, parse_select, CommandKind, CommandLine};
use crate::schema::Table;

/// Presentation settings shared by the CLI, script runner and REPL
#[derive(Debug, Clone)]
pub struct ExecutionContext {
    pub output_format: OutputFormat,
    pub verbose: bool,
}

impl Default for ExecutionContext {
    fn default() -> Self {
        Self {
            output_format: OutputFormat::Human,
            verbose: false,
        }
    }
}

fn resolve(line: &CommandLine) -> Result<&'static Operation> {
    let operation = dispatch::lookup(line.arity(), &line.keyword).ok_or_else(|| {
        log::trace!("no {} taking {} arguments", line.keyword, line.arity());
        MochaError::invalid_query()
    })?;
    Ok(operation)
}

impl MochaDatabase {
    /// Execute a mutating command
    pub fn run(&mut self, command: &str) -> Result<()> {
        if is_break_query(command) {
            return Ok(());
        }
        if classify(command) != Some(CommandKind::Mutating) {
            return Err(MochaError::invalid_query());
        }

        let line = CommandLine::parse(command)?;
        let args = line.arg_refs();
        match resolve(&line)?.handler {
            Handler::Run(run) => run(self, &args),
            Handler::Flag(flag) => flag(self, &args).map(|_| ()),
            Handler::Get(_) => Err(MochaError::invalid_query()),
        }
    }

    /// Execute a value-returning or mutating command.
    ///
    /// `#KEYWORD:...` runs a mutation and reports it as a boolean: removals
    /// say whether something was removed, other mutations report `false`
    /// when their target does not exist. Unflagged mutations return
    /// `Empty`, except removals which still report what they removed.
    pub fn get_run(&mut self, command: &str) -> Result<MochaResult> {
        if is_break_query(command) {
            return Ok(MochaResult::Empty);
        }
        match classify(command) {
            Some(CommandKind::ValueReturning) | Some(CommandKind::Mutating) => {}
            _ => return Err(MochaError::invalid_query()),
        }

        let line = CommandLine::parse(command)?;
        let args = line.arg_refs();
        match (resolve(&line)?.handler, line.flagged) {
            (Handler::Get(get), _) => get(self, &args),
            (Handler::Flag(flag), _) => Ok(flag(self, &args)?.into()),
            (Handler::Run(run), true) => match run(self, &args) {
                Ok(()) => Ok(true.into()),
                Err(e) if e.is_not_found() => Ok(false.into()),
                Err(e) => Err(e),
            },
            (Handler::Run(run), false) => run(self, &args).map(|_| MochaResult::Empty),
        }
    }

    /// Run `SELECT <columns> FROM <table>`
    pub fn select(&self, query: &str) -> Result<Table> {
        let query = parse_select(query)?;
        self.table(&query.table)?.select(&query.column_refs())
    }

    /// Like `select`, but malformed select text yields `None`
    pub fn try_select(&self, query: &str) -> Result<Option<Table>> {
        match self.select(query) {
            Ok(table) => Ok(Some(table)),
            Err(MochaError::Command(message)) => {
                log::warn!("ignoring malformed select: {}", message);
                Ok(None)
            }
            Err(e) => Err(e),
        }
    }

    /// Classify a command and route it to `run`, `get_run` or `select`
    pub fn execute(&mut self, command: &str) -> Result<MochaResult> {
        if is_break_query(command) {
            return Ok(MochaResult::Empty);
        }
        match classify(command) {
            Some(CommandKind::Declarative) => Ok(self.select(command)?.into()),
            Some(CommandKind::ValueReturning) => self.get_run(command),
            Some(CommandKind::Mutating) => self.run(command).map(|_| MochaResult::Empty),
            None => Err(MochaError::invalid_query()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn people() -> MochaDatabase {
        let mut db = MochaDatabase::in_memory();
        db.run("CREATETABLE:People").unwrap();
        db.run("CREATECOLUMN:People:Name").unwrap();
        db.run("CREATECOLUMN:People:Age:Int32").unwrap();
        db
    }

    #[test]
    fn test_run_and_get_run() {
        let mut db = people();
        db.run("ADDDATA:People:Name:Alice").unwrap();
        assert_eq!(db.get_run("ROWCOUNT:People").unwrap().as_count(), Some(1));
        assert_eq!(db.get_run("EXISTSTABLE:People").unwrap().as_bool(), Some(true));
        assert_eq!(
            db.get_run("GETCOLUMNDATATYPE:People:Age").unwrap(),
            MochaResult::from(crate::types::ScalarType::Int32)
        );
    }

    #[test]
    fn test_keyword_case_insensitive() {
        let mut db = people();
        db.run("adddata:People:Name:Bob").unwrap();
        assert_eq!(db.get_run("rowcount:People").unwrap().as_count(), Some(1));
    }

    #[test]
    fn test_wrong_arity_is_invalid_query() {
        let mut db = people();
        db.run("ADDDATA:People:Name:Alice").unwrap();
        let err = db.run("UPDATEDATA:People:Name:0").unwrap_err();
        assert_eq!(err.to_string(), "Command error: invalid query");
        db.run("UPDATEDATA:People:Name:0:Carol").unwrap();
        assert_eq!(db.data("People", "Name", 0).unwrap().text(), "Carol");
        assert!(matches!(db.run("CREATETABLE:A:B:C:D:E"), Err(MochaError::Command(_))));
    }

    #[test]
    fn test_wrong_mode_is_invalid_query() {
        let mut db = people();
        assert!(matches!(db.run("GETTABLES"), Err(MochaError::Command(_))));
        assert!(matches!(db.run("DROPTABLE:People"), Err(MochaError::Command(_))));
        assert!(matches!(db.get_run("DROPTABLE:People"), Err(MochaError::Command(_))));
        assert!(matches!(
            db.get_run("SELECT Name FROM People"),
            Err(MochaError::Command(_))
        ));
        assert!(db.exists_table("People"));
    }

    #[test]
    fn test_get_run_accepts_mutations() {
        let mut db = people();
        assert_eq!(db.get_run("CREATETABLE:X").unwrap(), MochaResult::Empty);
        assert!(db.exists_table("X"));
        assert_eq!(db.get_run("REMOVETABLE:X").unwrap().as_bool(), Some(true));
        assert_eq!(db.get_run("REMOVETABLE:X").unwrap().as_bool(), Some(false));

        db.run("ADDDATA:People:Name:Alice").unwrap();
        let err = db.get_run("UPDATEDATA:People:Name:0").unwrap_err();
        assert_eq!(err.to_string(), "Command error: invalid query");
        assert_eq!(
            db.get_run("UPDATEDATA:People:Name:0:Carol").unwrap(),
            MochaResult::Empty
        );
        assert_eq!(db.data("People", "Name", 0).unwrap().text(), "Carol");
    }

    #[test]
    fn test_flagged_commands() {
        let mut db = people();
        assert_eq!(db.get_run("#REMOVETABLE:Ghost").unwrap().as_bool(), Some(false));
        assert_eq!(db.get_run("#CREATETABLE:Other").unwrap().as_bool(), Some(true));
        assert_eq!(db.get_run("#REMOVETABLE:Other").unwrap().as_bool(), Some(true));
        assert_eq!(db.get_run("#RENAMETABLE:Ghost:Spirit").unwrap().as_bool(), Some(false));
        assert!(matches!(
            db.get_run("#CREATETABLE:People"),
            Err(MochaError::Conflict(_))
        ));
    }

    #[test]
    fn test_plain_remove_discards_flag() {
        let mut db = people();
        db.run("REMOVETABLE:Ghost").unwrap();
        db.run("REMOVETABLE:People").unwrap();
        assert!(!db.exists_table("People"));
    }

    #[test]
    fn test_break_query_is_noop() {
        let mut db = people();
        let generation = db.generation();
        db.run("BREAKQUERY").unwrap();
        assert_eq!(db.execute("breakquery").unwrap(), MochaResult::Empty);
        assert_eq!(db.generation(), generation);
    }

    #[test]
    fn test_invalid_index() {
        let mut db = people();
        let err = db.get_run("GETROW:People:first").unwrap_err();
        assert_eq!(err.to_string(), "Command error: invalid index");
    }

    #[test]
    fn test_select() {
        let mut db = people();
        db.run("ADDDATA:People:Name:Alice").unwrap();
        db.run("ADDDATA:People:Name:Bob").unwrap();

        let table = db.select("SELECT Name FROM People").unwrap();
        assert_eq!(table.columns().names(), vec!["Name"]);
        let names: Vec<String> = table.rows().iter().map(|r| r.texts().join(",")).collect();
        assert_eq!(names, vec!["Alice", "Bob"]);

        assert!(matches!(db.select("SELECT Name People"), Err(MochaError::Command(_))));
        assert!(db.select("SELECT Name FROM Ghost").unwrap_err().is_not_found());
    }

    #[test]
    fn test_try_select() {
        let db = people();
        assert_eq!(db.try_select("SELECT FROM").unwrap(), None);
        assert!(db.try_select("SELECT Name FROM People").unwrap().is_some());
        assert!(db.try_select("SELECT Nope FROM People").is_err());
    }

    #[test]
    fn test_execute_routes_by_kind() {
        let mut db = people();
        assert_eq!(db.execute("ADDDATA:People:Name:Alice").unwrap(), MochaResult::Empty);
        assert_eq!(db.execute("ROWCOUNT:People").unwrap().as_count(), Some(1));
        let table = db.execute("SELECT Age FROM People").unwrap().into_table().unwrap();
        assert_eq!(table.row_count(), 1);
        assert!(db.execute("HELLO").is_err());
    }
}
