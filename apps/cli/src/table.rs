//! Plain-text tables for command output
//!
//! Every command turns its records into [`Row`]s whose keys become the
//! header. Columns keep insertion order; columns whose cells are all
//! numeric are right-aligned. Cells may carry ANSI colors, which do not
//! count toward column widths.

use owo_colors::OwoColorize;
use tabled::builder::Builder;
use tabled::settings::object::Columns;
use tabled::settings::{Alignment, Style};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cell {
    text: String,
    numeric: bool,
}

impl Cell {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            numeric: false,
        }
    }

    pub fn number(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            numeric: true,
        }
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub fn is_numeric(&self) -> bool {
        self.numeric
    }
}

/// Ordered key to cell mapping
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Row {
    cells: Vec<(&'static str, Cell)>,
}

impl Row {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(mut self, key: &'static str, value: impl Into<String>) -> Self {
        self.push(key, Cell::text(value));
        self
    }

    pub fn number(mut self, key: &'static str, value: impl Into<String>) -> Self {
        self.push(key, Cell::number(value));
        self
    }

    /// Insert or replace the cell under `key`
    pub fn push(&mut self, key: &'static str, cell: Cell) {
        match self.cells.iter_mut().find(|(k, _)| *k == key) {
            Some((_, existing)) => *existing = cell,
            None => self.cells.push((key, cell)),
        }
    }

    pub fn keys(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.cells.iter().map(|(key, _)| *key)
    }

    pub fn cell(&self, key: &str) -> Option<&Cell> {
        self.cells.iter().find(|(k, _)| *k == key).map(|(_, cell)| cell)
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.cell(key).map(Cell::as_str)
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

/// Render rows under a header taken from the first row's keys
pub fn render(rows: &[Row]) -> String {
    let Some(first) = rows.first() else {
        return String::new();
    };
    let keys: Vec<&'static str> = first.keys().collect();

    let mut builder = Builder::default();
    builder.push_record(keys.iter().map(|key| key.to_string()));
    for row in rows {
        builder.push_record(
            keys.iter()
                .map(|key| row.get(key).unwrap_or_default().to_string()),
        );
    }

    let mut table = builder.build();
    table.with(Style::blank());
    for (index, key) in keys.iter().enumerate() {
        let numeric = rows
            .iter()
            .all(|row| row.cell(key).map_or(true, Cell::is_numeric));
        if numeric {
            table.modify(Columns::single(index), Alignment::right());
        }
    }
    table.to_string()
}

/// Green/red colorizer that can be switched off
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    enabled: bool,
}

impl Palette {
    pub fn new(enabled: bool) -> Self {
        Self { enabled }
    }

    pub fn plain() -> Self {
        Self::new(false)
    }

    pub fn green(&self, text: &str) -> String {
        if self.enabled {
            text.green().to_string()
        } else {
            text.to_string()
        }
    }

    pub fn red(&self, text: &str) -> String {
        if self.enabled {
            text.red().to_string()
        } else {
            text.to_string()
        }
    }

    /// Green when `good`, red otherwise
    pub fn colorize(&self, text: &str, good: bool) -> String {
        if good {
            self.green(text)
        } else {
            self.red(text)
        }
    }

    pub fn colorize_by(&self, text: &str, is_good: impl FnOnce(&str) -> bool) -> String {
        let good = is_good(text);
        self.colorize(text, good)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn header(rendered: &str) -> Vec<String> {
        rendered
            .lines()
            .next()
            .unwrap()
            .split_whitespace()
            .map(str::to_string)
            .collect()
    }

    #[test]
    fn test_columns_follow_insertion_order() {
        let rows = vec![
            Row::new().text("id", "ETH-USD").number("price", "123.45").text("status", "online"),
            Row::new().text("id", "BTC-GBP").number("price", "2000").text("status", "online"),
        ];
        let rendered = render(&rows);
        assert_eq!(header(&rendered), vec!["id", "price", "status"]);
        assert_eq!(rendered.lines().count(), 3);
        assert!(rendered.contains("ETH-USD"));
        assert!(rendered.contains("2000"));
    }

    #[test]
    fn test_numeric_columns_are_right_aligned() {
        let rows = vec![
            Row::new().text("name", "a").number("value", "1"),
            Row::new().text("name", "bbbbbbbb").number("value", "1000.25"),
        ];
        let rendered = render(&rows);
        let lines: Vec<&str> = rendered.lines().collect();

        // The short number ends where the long one does
        let short = lines[1].trim_end();
        let long = lines[2].trim_end();
        assert!(short.ends_with(" 1"));
        assert!(long.ends_with("1000.25"));
        assert_eq!(short.len(), long.len());
    }

    #[test]
    fn test_colors_do_not_change_widths() {
        let colored = Palette::new(true);
        let rows = vec![
            Row::new().text("side", colored.green("buy")).text("x", "1"),
            Row::new().text("side", colored.red("sell")).text("x", "2"),
        ];
        let rendered = render(&rows);
        assert!(rendered.contains("\u{1b}["));

        let plain = render(&[
            Row::new().text("side", "buy").text("x", "1"),
            Row::new().text("side", "sell").text("x", "2"),
        ]);
        let strip = |s: &str| {
            s.replace("\u{1b}[32m", "")
                .replace("\u{1b}[31m", "")
                .replace("\u{1b}[39m", "")
        };
        assert_eq!(strip(&rendered), plain);
    }

    #[test]
    fn test_empty_rows_render_nothing() {
        assert_eq!(render(&[]), "");
    }

    #[test]
    fn test_row_push_replaces_existing_key() {
        let mut row = Row::new().text("a", "1").text("b", "2");
        row.push("a", Cell::number("3"));
        assert_eq!(row.keys().collect::<Vec<_>>(), vec!["a", "b"]);
        assert_eq!(row.get("a"), Some("3"));
        assert_eq!(row.len(), 2);
    }

    #[test]
    fn test_palette() {
        let plain = Palette::plain();
        assert_eq!(plain.colorize("open", false), "open");
        assert_eq!(plain.colorize_by("buy", |s| s == "buy"), "buy");

        let colored = Palette::new(true);
        assert_eq!(colored.green("buy"), "\u{1b}[32mbuy\u{1b}[39m");
        assert_eq!(colored.red("no"), "\u{1b}[31mno\u{1b}[39m");
        assert_eq!(colored.colorize_by("sell", |s| s == "buy"), colored.red("sell"));
    }
}
