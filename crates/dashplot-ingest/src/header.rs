// File: crates/dashplot-ingest/src/header.rs
// Summary: First-row header detection and its explicit override.
// Notes:
// - A row of plain words is always taken for a header, so an all-text first
//   data row is a known false positive. Use `HeaderMode::Absent` to opt out.

use std::str::FromStr;

use once_cell::sync::Lazy;
use regex::Regex;

static HEADER_CELL: Lazy<Option<Regex>> = Lazy::new(|| Regex::new(r"^[A-Za-z0-9_ .\-()#]+$").ok());
static NUMERIC_CELL: Lazy<Option<Regex>> = Lazy::new(|| Regex::new(r"^[0-9]+(\.[0-9]+)?$").ok());

/// True when `row` is non-empty and every cell is header-like text rather than a bare number.
pub fn looks_like_header<S: AsRef<str>>(row: &[S]) -> bool {
    let (Some(cell_re), Some(num_re)) = (HEADER_CELL.as_ref(), NUMERIC_CELL.as_ref()) else {
        return false;
    };
    !row.is_empty()
        && row.iter().all(|c| {
            let c = c.as_ref();
            cell_re.is_match(c) && !num_re.is_match(c)
        })
}

/// How the first row of a delimited table is treated.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum HeaderMode {
    /// Use [`looks_like_header`].
    #[default]
    Detect,
    Present,
    Absent,
}

impl HeaderMode {
    pub fn applies_to(self, first_row: &[String]) -> bool {
        match self {
            Self::Detect => looks_like_header(first_row),
            Self::Present => true,
            Self::Absent => false,
        }
    }
}

impl FromStr for HeaderMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "detect" | "auto" => Ok(Self::Detect),
            "present" | "yes" => Ok(Self::Present),
            "absent" | "no" => Ok(Self::Absent),
            other => Err(format!("unknown header mode `{other}` (expected detect, present or absent)")),
        }
    }
}
