// File: crates/dashplot-demo/src/cli.rs
// Summary: Command-line arguments and their translation into chart/ingest options.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use dashplot_core::{ChartKind, ChartOptions, Palette, ThemeMode, ValueFormat};
use dashplot_ingest::{DataFormat, HeaderMode, IngestOptions};

#[derive(Parser, Debug)]
#[command(name = "dashplot")]
#[command(version, about = "Render a bar or pie chart from JSON, CSV, TSV or a ping log")]
#[command(long_about = "Render a bar or pie chart from JSON, CSV, TSV or a ping log.\n\n\
    The input is a local path or an http(s) URL. On failure the note that would\n\
    replace the chart is printed to stderr and the exit code is 1.")]
pub struct Cli {
    /// Input file path or http(s) URL
    pub input: String,

    /// Chart kind: bar or pie
    #[arg(short, long, default_value = "bar")]
    pub kind: ChartKind,

    /// Force the input format: json, csv, tsv or pinglog
    #[arg(short, long)]
    pub format: Option<DataFormat>,

    /// Header row handling for CSV/TSV: detect, present or absent
    #[arg(long, default_value = "detect")]
    pub header: HeaderMode,

    /// Chart title drawn in the top-left corner
    #[arg(short, long)]
    pub title: Option<String>,

    /// Logical chart height in pixels
    #[arg(long)]
    pub height: Option<f32>,

    /// Logical surface width in pixels
    #[arg(short, long, default_value_t = 640.0)]
    pub width: f32,

    /// Device pixel ratio
    #[arg(long, default_value_t = 1.0)]
    pub dpr: f32,

    /// Color theme: dark or light
    #[arg(long, default_value = "dark")]
    pub theme: ThemeMode,

    /// Comma-separated CSS colors overriding the palette
    #[arg(long, value_delimiter = ',')]
    pub palette: Vec<String>,

    /// Ping-log lines to average (0 = all)
    #[arg(short, long)]
    pub limit: Option<usize>,

    /// JSON file with chart options (camelCase keys); flags take precedence
    #[arg(long)]
    pub options: Option<PathBuf>,

    /// Print pie values as percentages
    #[arg(long)]
    pub percent: bool,

    /// Write the normalized series as CSV to stdout instead of rendering
    #[arg(long)]
    pub dump_series: bool,

    /// Output PNG path
    #[arg(short, long, default_value = "target/out/chart.png")]
    pub out: PathBuf,

    /// Increase log verbosity (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl Cli {
    pub fn log_level(&self) -> &'static str {
        match self.verbose {
            0 => "warn",
            1 => "info",
            _ => "debug",
        }
    }

    pub fn ingest_options(&self) -> IngestOptions {
        IngestOptions { format: self.format, header: self.header, limit: self.limit }
    }

    pub fn is_ping_log(&self) -> bool {
        self.format == Some(DataFormat::PingLog)
    }

    /// Options file (if any) overlaid with command-line flags.
    pub fn chart_options(&self) -> Result<ChartOptions> {
        let mut opts = match &self.options {
            Some(path) => load_options(path)?,
            None => ChartOptions::default(),
        };
        if let Some(title) = &self.title {
            opts.title = Some(title.clone());
        }
        if let Some(height) = self.height {
            opts.height = Some(height);
        }
        if let Some(limit) = self.limit {
            opts.limit = Some(limit);
        }
        if !self.palette.is_empty() {
            let palette = Palette::parse(&self.palette).map_err(anyhow::Error::msg).context("--palette")?;
            opts.palette = Some(palette);
        }
        if self.percent {
            opts.value_format = Some(ValueFormat::percent());
        }
        Ok(opts)
    }
}

fn load_options(path: &Path) -> Result<ChartOptions> {
    let text = std::fs::read_to_string(path).with_context(|| format!("reading options {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("parsing options {}", path.display()))
}

#[cfg(test)]
#[path = "cli_tests.rs"]
mod tests;
