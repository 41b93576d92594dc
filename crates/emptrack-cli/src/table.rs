//! Plain-text rendering of report tables.

use std::fmt::Write;

use emptrack_control::Table;

const GAP: &str = "  ";

fn width(cell: &str) -> usize {
    cell.chars().count()
}

fn push_line<S: AsRef<str>>(out: &mut String, cells: &[S], widths: &[usize]) {
    let mut line = String::new();
    for (i, (cell, &w)) in cells.iter().zip(widths).enumerate() {
        if i > 0 {
            line.push_str(GAP);
        }
        let _ = write!(line, "{:<w$}", cell.as_ref());
    }
    out.push_str(line.trim_end());
    out.push('\n');
}

/// Render a table as aligned columns under its title.
///
/// Cells are printed as given; columns are as wide as their widest cell.
pub fn render(table: &Table) -> String {
    let mut widths: Vec<usize> = table.headers.iter().map(|h| width(h)).collect();
    for row in &table.rows {
        for (w, cell) in widths.iter_mut().zip(row) {
            *w = (*w).max(width(cell));
        }
    }

    let mut out = String::new();
    out.push_str(&table.title);
    out.push('\n');
    push_line(&mut out, &table.headers, &widths);
    let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
    push_line(&mut out, &rule, &widths);

    if table.rows.is_empty() {
        out.push_str("(no rows)\n");
    }
    for row in &table.rows {
        push_line(&mut out, row, &widths);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn columns_fit_widest_cell() {
        let mut table = Table::new("Departments", &["id", "department_name"]);
        table.push_row(vec!["1".to_string(), "R&D".to_string()]);
        table.push_row(vec!["12".to_string(), "Human Resources Ops".to_string()]);

        let rendered = render(&table);
        let lines: Vec<&str> = rendered.lines().collect();
        assert_eq!(lines[0], "Departments");
        assert_eq!(lines[1], "id  department_name");
        assert_eq!(lines[2], "--  -------------------");
        assert_eq!(lines[3], "1   R&D");
        assert_eq!(lines[4], "12  Human Resources Ops");
    }

    #[test]
    fn empty_table_says_so() {
        let table = Table::new("Managers", &["id", "first_name"]);
        assert!(render(&table).ends_with("(no rows)\n"));
    }

    #[test]
    fn widths_count_characters() {
        let mut table = Table::new("Employees", &["first_name", "id"]);
        table.push_row(vec!["Zoë".to_string(), "1".to_string()]);
        let rendered = render(&table);
        assert!(rendered.contains("Zoë         1"));
    }
}
