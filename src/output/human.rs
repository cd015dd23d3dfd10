//! Human-readable output formatting

use crate::engine::{MochaResult, ResultValue};
use crate::schema::{
    Collection, Column, Directory, Disk, Folder, Named, Sector, Stack, StackItem, Table,
};

const MAX_CELL: usize = 30;

pub fn format_human(result: &MochaResult) -> String {
    match result {
        MochaResult::Empty => "OK".to_string(),
        MochaResult::Single(value) => format_value(value),
        MochaResult::Collection(values) if values.is_empty() => "(none)".to_string(),
        MochaResult::Collection(values) => {
            let mut output = String::new();
            for (i, value) in values.iter().enumerate() {
                if i > 0 && is_block(value) {
                    output.push('\n');
                }
                output.push_str(&format_value(value));
                if !output.ends_with('\n') {
                    output.push('\n');
                }
            }
            output
        }
    }
}

fn is_block(value: &ResultValue) -> bool {
    matches!(
        value,
        ResultValue::Table(_)
            | ResultValue::Column(_)
            | ResultValue::Sector(_)
            | ResultValue::Stack(_)
            | ResultValue::Disk(_)
    )
}

fn format_value(value: &ResultValue) -> String {
    match value {
        ResultValue::Bool(b) => b.to_string(),
        ResultValue::Count(n) => n.to_string(),
        ResultValue::Text(s) => s.clone(),
        ResultValue::DataType(t) => t.to_string(),
        ResultValue::Data(d) => d.text(),
        ResultValue::Row(row) => row.texts().join(" | "),
        ResultValue::Column(column) => format_column(column),
        ResultValue::Table(table) => format_table(table),
        ResultValue::Sector(sector) => format_sector(sector),
        ResultValue::Stack(stack) => format_stack(stack),
        ResultValue::StackItem(item) => {
            let mut output = format!("{} = {}\n", item.name(), item.value());
            format_items(item.items(), 1, &mut output);
            output
        }
        ResultValue::Disk(disk) => format_disk(disk),
        ResultValue::Directory(directory) => format_directory(directory),
        ResultValue::File(file) => format!("{}  ({} bytes)", file.name(), file.size()),
        ResultValue::Log(log) => format!("{}  {}", log.id(), log.time().to_rfc3339()),
    }
}

fn heading(title: &str, description: &str) -> String {
    let mut output = format!("{}\n{}\n", title, "-".repeat(title.chars().count()));
    if !description.is_empty() {
        output.push_str(&format!("{}\n", description));
    }
    output
}

fn format_table(table: &Table) -> String {
    let title = format!("Table: {}", table.name());
    let mut output = heading(&title, table.description());

    if table.columns().is_empty() {
        output.push_str("(no columns)\n");
        return output;
    }

    let headers: Vec<String> = table
        .columns()
        .iter()
        .map(|c| format!("{} ({})", c.name(), c.data_type()))
        .collect();
    let cells: Vec<Vec<String>> = table
        .rows()
        .iter()
        .map(|row| row.texts().iter().map(|t| truncate(t, MAX_CELL)).collect())
        .collect();

    let widths: Vec<usize> = headers
        .iter()
        .enumerate()
        .map(|(i, header)| {
            cells
                .iter()
                .filter_map(|row| row.get(i))
                .map(|cell| cell.chars().count())
                .chain(std::iter::once(header.chars().count()))
                .max()
                .unwrap_or(0)
        })
        .collect();

    output.push_str(&grid_line(&headers, &widths));
    output.push_str(&"-".repeat(widths.iter().sum::<usize>() + 3 * widths.len().saturating_sub(1)));
    output.push('\n');
    for row in &cells {
        output.push_str(&grid_line(row, &widths));
    }
    output.push_str(&format!("\n{} row(s)\n", table.row_count()));
    output
}

fn grid_line(cells: &[String], widths: &[usize]) -> String {
    let line = cells
        .iter()
        .zip(widths)
        .map(|(cell, width)| format!("{:<width$}", cell, width = *width))
        .collect::<Vec<_>>()
        .join(" | ");
    format!("{}\n", line.trim_end())
}

fn format_column(column: &Column) -> String {
    let title = format!("Column: {} ({})", column.name(), column.data_type());
    let mut output = heading(&title, column.description());
    for (i, data) in column.datas().iter().enumerate() {
        output.push_str(&format!("{:<6} {}\n", i, truncate(&data.text(), 60)));
    }
    output
}

fn format_sector(sector: &Sector) -> String {
    let title = format!("Sector: {}", sector.name());
    let mut output = heading(&title, sector.description());
    output.push_str(&format!("Data: {}\n", sector.data()));
    for (key, value) in sector.attributes() {
        output.push_str(&format!("  {:<20} {}\n", key, value));
    }
    output
}

fn format_stack(stack: &Stack) -> String {
    let title = format!("Stack: {}", stack.name());
    let mut output = heading(&title, stack.description());
    format_items(stack.items(), 0, &mut output);
    output
}

fn format_items(items: &Collection<StackItem>, depth: usize, output: &mut String) {
    for item in items {
        output.push_str(&format!(
            "{}{} = {}\n",
            "  ".repeat(depth),
            item.name(),
            item.value()
        ));
        format_items(item.items(), depth + 1, output);
    }
}

fn format_disk(disk: &Disk) -> String {
    let title = format!("Disk: {}", disk.name());
    let mut output = heading(&title, disk.description());
    format_folder(disk.root(), 0, &mut output);
    output
}

fn format_directory(directory: &Directory) -> String {
    let mut output = format!("{}/\n", directory.name());
    format_folder(directory.folder(), 1, &mut output);
    output
}

/// Directories first, then files, each level indented two spaces
fn format_folder(folder: &Folder, depth: usize, output: &mut String) {
    let indent = "  ".repeat(depth);
    for directory in folder.directories() {
        output.push_str(&format!("{}{}/\n", indent, directory.name()));
        format_folder(directory.folder(), depth + 1, output);
    }
    for file in folder.files() {
        output.push_str(&format!("{}{}  ({} bytes)\n", indent, file.name(), file.size()));
    }
}

fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ScalarType;

    #[test]
    fn test_scalars() {
        assert_eq!(format_human(&MochaResult::Empty), "OK");
        assert_eq!(format_human(&true.into()), "true");
        assert_eq!(format_human(&3usize.into()), "3");
        assert_eq!(format_human(&ScalarType::Int32.into()), "Int32");
    }

    #[test]
    fn test_collection_one_per_line() {
        let result = MochaResult::collection(vec!["a".to_string(), "b".to_string()]);
        assert_eq!(format_human(&result), "a\nb\n");
        assert_eq!(format_human(&MochaResult::Collection(Vec::new())), "(none)");
    }

    #[test]
    fn test_table_grid() {
        let mut table = Table::new("People").unwrap();
        table.add_column(Column::new("Name", ScalarType::String).unwrap()).unwrap();
        table.add_data("Name", "Alice").unwrap();
        let out = format_human(&table.into());
        assert!(out.starts_with("Table: People\n-------------\n"));
        assert!(out.contains("Name (String)"));
        assert!(out.contains("Alice"));
        assert!(out.contains("1 row(s)"));
    }

    #[test]
    fn test_stack_tree() {
        let mut stack = Stack::new("Config").unwrap();
        stack.add_item("", StackItem::new("Net", "on").unwrap()).unwrap();
        stack.add_item("Net", StackItem::new("Port", "80").unwrap()).unwrap();
        let out = format_human(&stack.into());
        assert!(out.contains("Net = on\n  Port = 80\n"));
    }

    #[test]
    fn test_disk_tree() {
        let mut disk = Disk::new("Work").unwrap();
        disk.create_directory("src").unwrap();
        disk.create_file("src/main.rs", "fn main() {}").unwrap();
        disk.create_file("notes.txt", "").unwrap();
        let out = format_human(&disk.into());
        assert!(out.starts_with("Disk: Work\n"));
        assert!(out.contains("src/\n  main.rs  (12 bytes)\nnotes.txt  (0 bytes)\n"));
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("abcdefghijkl", 8), "abcde...");
        assert_eq!(truncate("ééééééééé", 5), "éé...");
    }
}
