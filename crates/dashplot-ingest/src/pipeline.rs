// File: crates/dashplot-ingest/src/pipeline.rs
// Summary: Ingestion pipeline (source -> bytes -> format -> chart input) and the chart-file boundary.
// Notes:
// - `ingest` returns every failure as an `IngestError`.
// - `ChartLoader` is the boundary: failures become a note on the mount point,
//   successes become a mounted chart. Nothing escapes it.

use std::path::Path;

use chrono::NaiveTime;
use dashplot_core::series::parse_loose_number;
use dashplot_core::{mount_chart, ChartEnv, ChartHandle, ChartKind, ChartOptions, MountPoint, Record, Series, SeriesInput};
use serde_json::Value;

use crate::delimited::parse_delimited;
use crate::error::IngestError;
use crate::format::{route_file, DataFormat};
use crate::header::HeaderMode;
use crate::pinglog::aggregate_ping_log;
use crate::source::{file_name, parse_url, url_extension, Fetcher, Source};

/// Default chart title for ping logs.
pub const PING_TITLE: &str = "Ping Averages";

#[derive(Clone, Debug, Default)]
pub struct IngestOptions {
    /// Forces a format instead of inferring one from the source.
    pub format: Option<DataFormat>,
    pub header: HeaderMode,
    /// Ping-log window; see [`aggregate_ping_log`].
    pub limit: Option<usize>,
}

impl IngestOptions {
    pub fn with_format(mut self, format: DataFormat) -> Self {
        self.format = Some(format);
        self
    }

    pub fn with_header(mut self, header: HeaderMode) -> Self {
        self.header = header;
        self
    }

    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }
}

/// What lenient parsing let through.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct IngestReport {
    /// Data rows (delimited) or windowed lines (ping log) read.
    pub rows_read: usize,
    pub blank_rows_dropped: usize,
    pub header_row: bool,
    /// Cells that were not numbers and ended up as 0.
    pub values_coerced: usize,
    pub lines_skipped: usize,
    pub tokens_skipped: usize,
    pub ping_span: Option<(NaiveTime, NaiveTime)>,
}

#[derive(Clone, Debug)]
pub struct Ingested {
    pub input: SeriesInput,
    pub format: DataFormat,
    pub report: IngestReport,
}

impl Ingested {
    pub fn series(&self) -> Series {
        self.input.normalize()
    }
}

/// Read `source` and turn it into input for the series normalizer.
pub fn ingest(source: &Source, opts: &IngestOptions, fetcher: &dyn Fetcher) -> Result<Ingested, IngestError> {
    let (bytes, format) = load(source, opts.format, fetcher)?;
    tracing::debug!(source = %source.describe(), %format, len = bytes.len(), "ingesting");

    let ingested = match format {
        DataFormat::Json => Ingested { input: decode_json(&bytes)?, format, report: IngestReport::default() },
        DataFormat::Csv | DataFormat::Tsv => {
            let delim = format.delimiter().unwrap_or(',');
            let (input, report) = decode_delimited(&String::from_utf8_lossy(&bytes), delim, opts.header)?;
            Ingested { input, format, report }
        }
        DataFormat::PingLog => {
            let agg = aggregate_ping_log(&String::from_utf8_lossy(&bytes), opts.limit)?;
            let report = IngestReport {
                rows_read: agg.lines_used,
                lines_skipped: agg.lines_skipped,
                tokens_skipped: agg.tokens_skipped,
                ping_span: agg.span,
                ..Default::default()
            };
            Ingested { input: agg.to_input(), format, report }
        }
    };
    Ok(ingested)
}

/// Read the bytes behind `source`. A declared format skips inference.
fn load(source: &Source, declared: Option<DataFormat>, fetcher: &dyn Fetcher) -> Result<(Vec<u8>, DataFormat), IngestError> {
    match source {
        Source::Blob { bytes, mime } => Ok((bytes.clone(), declared.unwrap_or_else(|| DataFormat::from_mime(mime)))),
        Source::File(path) => {
            let bytes = std::fs::read(path)?;
            let format = match declared {
                Some(format) => format,
                None => route_file(&file_name(path), &String::from_utf8_lossy(&bytes))?,
            };
            Ok((bytes, format))
        }
        Source::Url(href) => {
            let url = parse_url(href)?;
            let body = fetcher.get(&url)?;
            if !body.is_success() {
                return Err(IngestError::Http { status: body.status });
            }
            let format = declared.unwrap_or_else(|| DataFormat::from_extension(&url_extension(&url)));
            Ok((body.bytes, format))
        }
    }
}

/// Arrays and objects are classified; any other JSON value is an empty input.
fn decode_json(bytes: &[u8]) -> Result<SeriesInput, IngestError> {
    let value: Value = serde_json::from_slice(bytes)?;
    Ok(match value {
        Value::Array(_) | Value::Object(_) => SeriesInput::classify(&value),
        _ => SeriesInput::Unrecognized,
    })
}

fn decode_delimited(text: &str, delim: char, header: HeaderMode) -> Result<(SeriesInput, IngestReport), IngestError> {
    let (table, blank_rows_dropped) = parse_delimited(text, delim).without_blank_rows();
    let mut rows = table.into_rows();
    if rows.is_empty() {
        return Err(IngestError::EmptyTable);
    }

    let header_row = header.applies_to(&rows[0]);
    let (label_col, value_col) = if header_row {
        let names: Vec<String> = rows.remove(0).iter().map(|h| h.trim().to_lowercase()).collect();
        let find = |name: &str| names.iter().position(|h| h == name);
        find("label").zip(find("value")).unwrap_or((0, 1))
    } else {
        (0, 1)
    };

    let mut values_coerced = 0;
    let records: Vec<Record> = rows
        .iter()
        .map(|row| {
            let value = parse_loose_number(cell(row, value_col));
            if !value.is_finite() {
                values_coerced += 1;
            }
            Record { label: Some(cell(row, label_col).to_string()), value: Some(value) }
        })
        .collect();
    if values_coerced > 0 {
        tracing::warn!(values_coerced, "non-numeric values read as 0");
    }

    let report = IngestReport {
        rows_read: records.len(),
        blank_rows_dropped,
        header_row,
        values_coerced,
        ..Default::default()
    };
    Ok((SeriesInput::Records(records), report))
}

fn cell(row: &[String], i: usize) -> &str {
    row.get(i).map(String::as_str).unwrap_or("")
}

/// Result of a boundary call: a chart, or the note shown instead.
pub enum Mounted {
    Chart(ChartHandle),
    Note(String),
}

impl Mounted {
    pub fn chart(&self) -> Option<&ChartHandle> {
        match self {
            Self::Chart(h) => Some(h),
            Self::Note(_) => None,
        }
    }

    pub fn note(&self) -> Option<&str> {
        match self {
            Self::Note(n) => Some(n),
            Self::Chart(_) => None,
        }
    }
}

/// Boundary that ingests a source and mounts a chart, or a note on failure.
pub struct ChartLoader<'a> {
    pub mount: &'a dyn MountPoint,
    pub env: &'a ChartEnv,
    pub fetcher: &'a dyn Fetcher,
}

impl<'a> ChartLoader<'a> {
    pub fn new(mount: &'a dyn MountPoint, env: &'a ChartEnv, fetcher: &'a dyn Fetcher) -> Self {
        Self { mount, env, fetcher }
    }

    /// Chart a JSON/CSV/TSV source (or a file routed by name). Failures become a `chartfile:` note.
    pub fn chart_file(&self, source: &Source, kind: ChartKind, ingest_opts: &IngestOptions, opts: ChartOptions) -> Mounted {
        match ingest(source, ingest_opts, self.fetcher) {
            Ok(ingested) => {
                let opts = if ingested.format == DataFormat::PingLog { opts.or(&ping_chart_defaults()) } else { opts };
                self.mount_ingested(&ingested, kind, opts)
            }
            Err(e) => {
                let prefix = if e.is_ping_log() { "pinglog" } else { "chartfile" };
                self.fail(prefix, source, e)
            }
        }
    }

    /// Chart a ping log as a bar chart of per-host averages. Failures become a `pinglog:` note.
    pub fn ping_log(&self, source: &Source, opts: ChartOptions) -> Mounted {
        let ingest_opts = IngestOptions { format: Some(DataFormat::PingLog), limit: opts.limit, ..Default::default() };
        match ingest(source, &ingest_opts, self.fetcher) {
            Ok(ingested) => self.mount_ingested(&ingested, ChartKind::Bar, opts.or(&ping_chart_defaults())),
            Err(e) => self.fail("pinglog", source, e),
        }
    }

    /// Open a local file the way a dropped file is handled: routed by name and content.
    pub fn open(&self, path: &Path, kind: ChartKind, ingest_opts: &IngestOptions, opts: ChartOptions) -> Mounted {
        self.chart_file(&Source::File(path.to_path_buf()), kind, ingest_opts, opts)
    }

    fn mount_ingested(&self, ingested: &Ingested, kind: ChartKind, opts: ChartOptions) -> Mounted {
        let series = ingested.series();
        tracing::debug!(points = series.len(), format = %ingested.format, report = ?ingested.report, "mounting chart");
        Mounted::Chart(mount_chart(self.mount, series, kind, opts, self.env))
    }

    fn fail(&self, prefix: &str, source: &Source, err: IngestError) -> Mounted {
        tracing::error!(source = %source.describe(), error = %err, "{prefix} failed");
        let note = match err {
            IngestError::UnrecognizedText { preview } => preview,
            other => format!("{prefix}: {other}"),
        };
        self.mount.append_note(&note);
        Mounted::Note(note)
    }
}

/// Title, height and top padding a ping-log chart gets unless the caller sets them.
pub fn ping_chart_defaults() -> ChartOptions {
    ChartOptions::default().with_title(PING_TITLE).with_height(180.0).with_padding_top(36.0)
}
