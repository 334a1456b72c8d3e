// File: crates/dashplot-ingest/src/format.rs
// Summary: Input format resolution from MIME types, extensions and file names, plus ping-log sniffing.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveTime;
use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::IngestError;

/// A timestamp followed by at least two `host:n` samples.
static PING_SHAPE: Lazy<Option<Regex>> =
    Lazy::new(|| Regex::new(r"\b(\d{2}:\d{2}:\d{2})\s+\w+:\d+(?:\.\d+)?(?:\s+\w+:\d+(?:\.\d+)?)+").ok());

/// Lines shown when a text file is neither a table nor a ping log.
pub const PREVIEW_LINES: usize = 10;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DataFormat {
    Json,
    Csv,
    Tsv,
    PingLog,
}

impl DataFormat {
    /// `json` / `tsv` when the MIME type mentions them, otherwise CSV.
    pub fn from_mime(mime: &str) -> Self {
        let mime = mime.to_ascii_lowercase();
        if mime.contains("json") {
            Self::Json
        } else if mime.contains("tsv") {
            Self::Tsv
        } else {
            Self::Csv
        }
    }

    /// Format of a fetched resource from its path extension; unknown extensions read as CSV.
    pub fn from_extension(ext: &str) -> Self {
        match ext.to_ascii_lowercase().as_str() {
            "json" => Self::Json,
            "tsv" => Self::Tsv,
            _ => Self::Csv,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::Csv => "csv",
            Self::Tsv => "tsv",
            Self::PingLog => "pinglog",
        }
    }

    /// Field separator for delimited formats.
    pub fn delimiter(self) -> Option<char> {
        match self {
            Self::Csv => Some(','),
            Self::Tsv => Some('\t'),
            Self::Json | Self::PingLog => None,
        }
    }
}

impl fmt::Display for DataFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for DataFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "json" => Ok(Self::Json),
            "csv" => Ok(Self::Csv),
            "tsv" => Ok(Self::Tsv),
            "pinglog" | "ping" => Ok(Self::PingLog),
            other => Err(format!("unknown format `{other}` (expected json, csv, tsv or pinglog)")),
        }
    }
}

/// Whether `text` contains a `HH:MM:SS host:n host:n` line with a valid clock time.
pub fn looks_like_ping_log(text: &str) -> bool {
    let Some(re) = PING_SHAPE.as_ref() else {
        return false;
    };
    re.captures_iter(text)
        .any(|caps| caps.get(1).is_some_and(|t| NaiveTime::parse_from_str(t.as_str(), "%H:%M:%S").is_ok()))
}

/// Pick a format for a local file from its name (and, for `.txt`, its content).
pub fn route_file(name: &str, text: &str) -> Result<DataFormat, IngestError> {
    let name = name.to_ascii_lowercase();
    if name.ends_with(".json") {
        return Ok(DataFormat::Json);
    }
    if name.ends_with(".tsv") {
        return Ok(DataFormat::Tsv);
    }
    if name.ends_with(".txt") {
        if looks_like_ping_log(text) {
            return Ok(DataFormat::PingLog);
        }
        return Err(IngestError::UnrecognizedText { preview: preview(text) });
    }
    Ok(DataFormat::Csv)
}

/// The first [`PREVIEW_LINES`] lines of `text`.
pub fn preview(text: &str) -> String {
    text.lines().take(PREVIEW_LINES).collect::<Vec<_>>().join("\n")
}
