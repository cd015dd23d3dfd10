//! mocha - run MochaQ commands against a MochaDB file

use std::path::Path;

use anyhow::{bail, Context};
use clap::Parser;
use mochadb::cli::{Args, SubCommand};
use mochadb::script::{
    has_errors, read_script_file, validate_script, ScriptLine, ScriptRunner, ValidationOptions,
    ValidationSeverity,
};
use mochadb::{format_output, DatabaseOptions, MochaDatabase, MochaResult};

fn main() {
    let args = Args::parse();
    init_logging(args.verbose);

    if let Err(e) = run(args) {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

/// `RUST_LOG` wins; otherwise `-v` turns on debug output
fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default))
        .format_timestamp(None)
        .init();
}

fn run(args: Args) -> anyhow::Result<()> {
    let ctx = args.execution_context();
    let db_options = args.database_options();
    let validation = ValidationOptions {
        read_only: args.read_only,
        ..Default::default()
    };
    let database = args.database;

    let result = match args.command {
        SubCommand::Query { command } => open(&database, db_options)?.execute(&command)?,
        SubCommand::Run { command } => {
            open(&database, db_options)?.run(&command)?;
            MochaResult::Empty
        }
        SubCommand::Get { command } => open(&database, db_options)?.get_run(&command)?,
        SubCommand::Select { query } => open(&database, db_options)?.select(&query)?.into(),

        SubCommand::Script { file, keep_going } => {
            let lines = read_script(&file)?;
            let issues = validate_script(&lines, &validation);
            for issue in issues.iter().filter(|i| i.severity == ValidationSeverity::Warning) {
                eprintln!("Warning: {}", issue);
            }
            if has_errors(&issues) && !keep_going {
                for issue in issues.iter().filter(|i| i.severity == ValidationSeverity::Error) {
                    eprintln!("{}", issue);
                }
                bail!("script validation failed; fix errors or use --keep-going");
            }

            let mut db = open(&database, db_options)?;
            let result = ScriptRunner::new(&mut db, ctx.clone())
                .keep_going(keep_going)
                .run_script(&lines);

            if ctx.verbose {
                println!(
                    "\n--- Script completed: {} statements executed ---",
                    result.statements_executed
                );
            }
            if let Some((first, rest)) = result.failures.split_first() {
                for failure in rest {
                    eprintln!("Error: {}", failure);
                }
                bail!("{}", first);
            }
            return Ok(());
        }

        SubCommand::Check { file } => {
            let lines = read_script(&file)?;
            let issues = validate_script(&lines, &validation);
            for issue in &issues {
                println!("{}", issue);
            }
            if has_errors(&issues) {
                bail!("script validation failed");
            }
            println!("{}: {} command(s) OK", file.display(), lines.len());
            return Ok(());
        }

        #[cfg(feature = "repl")]
        SubCommand::Repl => {
            let mut db = open(&database, db_options)?;
            mochadb::repl::run_repl(&mut db, &ctx)?;
            return Ok(());
        }
        #[cfg(not(feature = "repl"))]
        SubCommand::Repl => bail!("REPL support not enabled. Rebuild with --features repl"),
    };

    println!("{}", format_output(&result, &ctx.output_format));
    Ok(())
}

fn open(database: &Path, options: DatabaseOptions) -> anyhow::Result<MochaDatabase> {
    let db = MochaDatabase::open(database, options)
        .with_context(|| format!("opening {}", database.display()))?;
    log::debug!("opened {}", db.location());
    Ok(db)
}

fn read_script(file: &Path) -> anyhow::Result<Vec<ScriptLine>> {
    read_script_file(file).with_context(|| format!("reading script {}", file.display()))
}
