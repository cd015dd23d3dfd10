//! Interactive REPL implementation

use crate::database::MochaDatabase;
use crate::engine::{operations, ExecutionContext, MAX_ARITY};
use crate::error::{MochaError, Result};
use crate::output::format_output;
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;

pub fn run_repl(db: &mut MochaDatabase, exec_ctx: &ExecutionContext) -> Result<()> {
    let mut rl = DefaultEditor::new()
        .map_err(|e| MochaError::IoError(std::io::Error::other(e.to_string())))?;

    println!("MochaDB v{} - Interactive Mode", env!("CARGO_PKG_VERSION"));
    println!("Type 'help' for commands, 'exit' to quit\n");

    let prompt = format!("mocha [{}]> ", db.location());

    loop {
        match rl.readline(&prompt) {
            Ok(line) => {
                let line = line.trim();
                if line.is_empty() {
                    continue;
                }

                match line.to_lowercase().as_str() {
                    "exit" | "quit" | "q" => {
                        println!("Goodbye!");
                        break;
                    }
                    "help" | "?" => {
                        print_help();
                        continue;
                    }
                    "clear" | "cls" => {
                        print!("\x1B[2J\x1B[1;1H");
                        continue;
                    }
                    _ => {}
                }

                let _ = rl.add_history_entry(line);

                let command = expand_shortcuts(line);
                match db.execute(&command) {
                    Ok(result) => {
                        let output = format_output(&result, &exec_ctx.output_format);
                        if !output.is_empty() {
                            println!("{}\n", output);
                        }
                    }
                    Err(e) => eprintln!("Error: {}\n", e),
                }
            }
            Err(ReadlineError::Interrupted) => {
                println!("^C");
                continue;
            }
            Err(ReadlineError::Eof) => {
                println!("Goodbye!");
                break;
            }
            Err(err) => {
                eprintln!("Error: {:?}", err);
                break;
            }
        }
    }

    Ok(())
}

/// Expand common shortcuts to full commands
fn expand_shortcuts(input: &str) -> String {
    match input.to_lowercase().as_str() {
        "tables" => "GETTABLES".to_string(),
        "stacks" => "GETSTACKS".to_string(),
        "sectors" => "GETSECTORS".to_string(),
        "logs" => "GETLOGS".to_string(),
        "disks" => "FILESYSTEM_GETDISKS".to_string(),
        _ => input.to_string(),
    }
}

fn print_help() {
    println!("\nMochaQ Commands\n===============");
    println!("KEYWORD:arg:arg...     run a command; '#' prefix reports a mutation as true/false");
    println!("SELECT a,b FROM t      project columns of a table\n");

    let all = operations();
    for arity in 0..=MAX_ARITY {
        let keywords: Vec<&str> = all
            .iter()
            .filter(|op| op.arity == arity)
            .map(|op| op.keyword)
            .collect();
        if keywords.is_empty() {
            continue;
        }
        println!("{} argument(s):", arity);
        for chunk in keywords.chunks(3) {
            let row: Vec<String> = chunk.iter().map(|k| format!("{:<36}", k)).collect();
            println!("  {}", row.join("").trim_end());
        }
        println!();
    }

    println!("SHORTCUTS:");
    println!("  tables, stacks, sectors, logs, disks - list entities");
    println!("\nREPL Commands:");
    println!("  help, ?                        - Show this help");
    println!("  clear, cls                     - Clear screen");
    println!("  exit, quit, q                  - Exit REPL\n");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expand_shortcuts() {
        assert_eq!(expand_shortcuts("tables"), "GETTABLES");
        assert_eq!(expand_shortcuts("Logs"), "GETLOGS");
        assert_eq!(expand_shortcuts("disks"), "FILESYSTEM_GETDISKS");
        assert_eq!(expand_shortcuts("ROWCOUNT:People"), "ROWCOUNT:People");
    }
}
