// File: crates/dashplot-ingest/src/delimited.rs
// Summary: Quote-aware, permissive CSV/TSV tokenizer.
// Notes:
// - `"` toggles quoted mode; `""` inside quotes is a literal quote.
// - Row breaks are `\n`, `\r` or `\r\n` outside quotes. Blank lines become rows
//   of one empty field; callers drop them with `without_blank_rows`.
// - An unterminated quote swallows the rest of the input; that is not an error.

/// One parsed row of raw field text.
pub type Row = Vec<String>;

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ParsedTable {
    rows: Vec<Row>,
}

impl ParsedTable {
    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn into_rows(self) -> Vec<Row> {
        self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Drop rows whose every field is whitespace; returns the table and how many were dropped.
    pub fn without_blank_rows(self) -> (Self, usize) {
        let before = self.rows.len();
        let rows: Vec<Row> = self.rows.into_iter().filter(|r| !is_blank_row(r)).collect();
        let dropped = before - rows.len();
        (Self { rows }, dropped)
    }
}

pub fn is_blank_row(row: &[String]) -> bool {
    row.iter().all(|cell| cell.trim().is_empty())
}

/// Split `text` into rows of fields separated by `delimiter`.
pub fn parse_delimited(text: &str, delimiter: char) -> ParsedTable {
    let mut rows = Vec::new();
    let mut row: Row = Vec::new();
    let mut field = String::new();
    let mut quoted = false;
    let mut chars = text.chars().peekable();

    while let Some(ch) = chars.next() {
        match ch {
            '"' if quoted && chars.peek() == Some(&'"') => {
                field.push('"');
                chars.next();
            }
            '"' => quoted = !quoted,
            c if c == delimiter && !quoted => row.push(std::mem::take(&mut field)),
            '\n' | '\r' if !quoted => {
                if ch == '\r' && chars.peek() == Some(&'\n') {
                    chars.next();
                }
                row.push(std::mem::take(&mut field));
                rows.push(std::mem::take(&mut row));
            }
            c => field.push(c),
        }
    }
    if !field.is_empty() || !row.is_empty() {
        row.push(field);
        rows.push(row);
    }
    ParsedTable { rows }
}
