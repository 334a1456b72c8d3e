// File: crates/dashplot-ingest/src/pinglog.rs
// Summary: Ping-log reader: averages `host:value` samples over the trailing lines of a log.
// Notes:
// - Line shape: `HH:MM:SS host:n host:n ...`. The first token is always discarded.
// - Malformed tokens are skipped and counted, never fatal on their own.

use chrono::NaiveTime;
use dashplot_core::{Record, Series, SeriesInput};
use indexmap::IndexMap;

use crate::error::IngestError;

/// Trailing lines used when no limit is given.
pub const DEFAULT_PING_LIMIT: usize = 20;

/// Per-host rounded means plus bookkeeping about what was skipped.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PingAggregate {
    /// `(host, rounded mean)` in first-seen order.
    pub averages: Vec<(String, f64)>,
    /// Non-blank lines in the whole log.
    pub lines_total: usize,
    /// Lines inside the trailing window.
    pub lines_used: usize,
    /// Windowed lines that contributed no sample.
    pub lines_skipped: usize,
    pub tokens_skipped: usize,
    pub samples: usize,
    /// Clock times of the first and last windowed lines with a parseable timestamp.
    pub span: Option<(NaiveTime, NaiveTime)>,
}

impl PingAggregate {
    pub fn to_input(&self) -> SeriesInput {
        SeriesInput::Records(self.averages.iter().map(|(h, v)| Record::new(h.clone(), *v)).collect())
    }

    pub fn series(&self) -> Series {
        Series::from_pairs(self.averages.iter().cloned())
    }
}

/// Aggregate the last `limit` non-blank lines (`None` = 20, `Some(0)` = all).
pub fn aggregate_ping_log(text: &str, limit: Option<usize>) -> Result<PingAggregate, IngestError> {
    let lines: Vec<&str> = text.trim().lines().filter(|l| !l.trim().is_empty()).collect();
    if lines.is_empty() {
        return Err(IngestError::EmptyLog);
    }
    let limit = match limit.unwrap_or(DEFAULT_PING_LIMIT) {
        0 => lines.len(),
        n => n.min(lines.len()),
    };
    let window = &lines[lines.len() - limit..];

    let mut by_host: IndexMap<String, Vec<f64>> = IndexMap::new();
    let mut agg = PingAggregate { lines_total: lines.len(), lines_used: window.len(), ..Default::default() };

    for line in window {
        let mut tokens = line.split_whitespace();
        let stamp = tokens.next().and_then(|t| NaiveTime::parse_from_str(t, "%H:%M:%S").ok());
        let mut contributed = false;
        for token in tokens {
            match parse_sample(token) {
                Some((host, value)) => {
                    by_host.entry(host.to_string()).or_default().push(value);
                    agg.samples += 1;
                    contributed = true;
                }
                None => agg.tokens_skipped += 1,
            }
        }
        if !contributed {
            agg.lines_skipped += 1;
        }
        if let Some(t) = stamp {
            agg.span = Some(match agg.span {
                Some((first, _)) => (first, t),
                None => (t, t),
            });
        }
    }

    if by_host.is_empty() {
        return Err(IngestError::NoPingPairs);
    }
    if agg.tokens_skipped > 0 {
        tracing::warn!(skipped = agg.tokens_skipped, "ping log: skipped malformed host:value tokens");
    }

    agg.averages = by_host
        .into_iter()
        .map(|(host, samples)| {
            let mean = samples.iter().sum::<f64>() / samples.len() as f64;
            (host, round_half_up(mean))
        })
        .collect();
    tracing::debug!(hosts = agg.averages.len(), samples = agg.samples, lines = agg.lines_used, "ping log aggregated");
    Ok(agg)
}

/// `host:value` with a non-empty host and a finite value; text after a second `:` is ignored.
fn parse_sample(token: &str) -> Option<(&str, f64)> {
    let mut parts = token.split(':');
    let host = parts.next().filter(|h| !h.is_empty())?;
    let value = parts.next().filter(|v| !v.is_empty())?;
    let n = value.parse::<f64>().ok().filter(|n| n.is_finite())?;
    Some((host, n))
}

fn round_half_up(x: f64) -> f64 {
    (x + 0.5).floor()
}
