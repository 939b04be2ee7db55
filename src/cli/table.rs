//! Aligned plain-text tables for list output.

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Alignment {
    Left,
    Right,
}

#[derive(Clone, Debug)]
pub struct Column {
    pub header: &'static str,
    pub alignment: Alignment,
    pub max_width: Option<usize>,
}

impl Column {
    pub const fn left(header: &'static str) -> Self {
        Self {
            header,
            alignment: Alignment::Left,
            max_width: None,
        }
    }

    pub const fn right(header: &'static str) -> Self {
        Self {
            header,
            alignment: Alignment::Right,
            max_width: None,
        }
    }

    pub const fn max_width(mut self, width: usize) -> Self {
        self.max_width = Some(width);
        self
    }
}

pub struct Table {
    columns: Vec<Column>,
    rows: Vec<Vec<String>>,
}

impl Table {
    pub fn new(columns: Vec<Column>) -> Self {
        Self {
            columns,
            rows: Vec::new(),
        }
    }

    pub fn push(&mut self, row: Vec<String>) {
        self.rows.push(row);
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    fn widths(&self) -> Vec<usize> {
        self.columns
            .iter()
            .enumerate()
            .map(|(idx, column)| {
                let widest = self
                    .rows
                    .iter()
                    .filter_map(|row| row.get(idx))
                    .map(|cell| visible_width(cell))
                    .fold(visible_width(column.header), usize::max);
                column.max_width.map_or(widest, |max| widest.min(max))
            })
            .collect()
    }

    pub fn render(&self) -> String {
        let widths = self.widths();
        let header: Vec<String> = self.columns.iter().map(|c| c.header.to_string()).collect();
        let mut lines = vec![self.render_row(&header, &widths)];
        lines.push(
            widths
                .iter()
                .map(|width| "-".repeat(*width))
                .collect::<Vec<_>>()
                .join("  "),
        );
        lines.extend(self.rows.iter().map(|row| self.render_row(row, &widths)));
        lines.join("\n")
    }

    fn render_row(&self, row: &[String], widths: &[usize]) -> String {
        self.columns
            .iter()
            .zip(widths)
            .enumerate()
            .map(|(idx, (column, width))| {
                let text = row.get(idx).map(String::as_str).unwrap_or("");
                let fitted = truncate(text, *width);
                let pad = " ".repeat(width.saturating_sub(visible_width(&fitted)));
                match column.alignment {
                    Alignment::Left => format!("{fitted}{pad}"),
                    Alignment::Right => format!("{pad}{fitted}"),
                }
            })
            .collect::<Vec<_>>()
            .join("  ")
            .trim_end()
            .to_string()
    }
}

/// Character count ignoring ANSI escape sequences.
fn visible_width(text: &str) -> usize {
    let mut width = 0;
    let mut chars = text.chars();
    while let Some(ch) = chars.next() {
        if ch == '\u{1b}' {
            for next in chars.by_ref() {
                if next.is_ascii_alphabetic() {
                    break;
                }
            }
            continue;
        }
        width += 1;
    }
    width
}

fn truncate(text: &str, width: usize) -> String {
    if visible_width(text) <= width || text.contains('\u{1b}') {
        return text.to_string();
    }
    let mut out: String = text.chars().take(width.saturating_sub(1)).collect();
    out.push('…');
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn columns_align_and_truncate() {
        let mut table = Table::new(vec![
            Column::right("ID"),
            Column::left("Name").max_width(6),
            Column::right("Amount"),
        ]);
        table.push(vec!["7".into(), "Groceries".into(), "12.50".into()]);
        table.push(vec!["12".into(), "Rent".into(), "900.00".into()]);

        let rendered = table.render();
        let lines: Vec<&str> = rendered.lines().collect();
        assert_eq!(lines[0], "ID  Name    Amount");
        assert_eq!(lines[2], " 7  Groce…   12.50");
        assert_eq!(lines[3], "12  Rent    900.00");
    }

    #[test]
    fn escape_sequences_do_not_count_towards_width() {
        assert_eq!(visible_width("\u{1b}[38;2;1;2;3mFood\u{1b}[0m"), 4);
    }
}
