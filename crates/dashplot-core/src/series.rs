// File: crates/dashplot-core/src/series.rs
// Summary: Canonical label/value series and the normalizer that builds it from loosely-typed inputs.
// Notes:
// - Classification inspects only the first element of an array; later elements are
//   coerced to the shape the first one selected.
// - Non-finite or missing values always end up as 0 in the canonical series.

use indexmap::IndexMap;
use serde_json::Value;

/// Canonical chart input: ordered `(label, value)` pairs.
/// Invariant: `labels.len() == data.len()` and every value is finite.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Series {
    labels: Vec<String>,
    data: Vec<f64>,
}

impl Series {
    /// Empty series.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Build from pairs; non-finite values become 0.
    pub fn from_pairs<L: Into<String>>(pairs: impl IntoIterator<Item = (L, f64)>) -> Self {
        let (labels, data) = pairs
            .into_iter()
            .map(|(l, v)| (l.into(), finite_or_zero(v)))
            .unzip();
        Self { labels, data }
    }

    pub fn labels(&self) -> &[String] { &self.labels }
    pub fn data(&self) -> &[f64] { &self.data }
    pub fn len(&self) -> usize { self.data.len() }
    pub fn is_empty(&self) -> bool { self.data.is_empty() }

    /// Iterate `(label, value)` pairs in order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> + '_ {
        self.labels.iter().map(String::as_str).zip(self.data.iter().copied())
    }

    /// Express this series as record input; normalizing it yields an equal series.
    pub fn to_input(&self) -> SeriesInput {
        SeriesInput::Records(
            self.iter()
                .map(|(l, v)| Record { label: Some(l.to_string()), value: Some(v) })
                .collect(),
        )
    }
}

/// A `{label, value}` record; either field may be missing.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Record {
    pub label: Option<String>,
    pub value: Option<f64>,
}

impl Record {
    pub fn new(label: impl Into<String>, value: f64) -> Self {
        Self { label: Some(label.into()), value: Some(value) }
    }
}

/// The accepted input shapes, decided once at the boundary by [`SeriesInput::classify`].
#[derive(Clone, Debug, PartialEq)]
pub enum SeriesInput {
    /// Key → value mapping in insertion order.
    Mapping(IndexMap<String, f64>),
    /// Array of `{label, value}` records.
    Records(Vec<Record>),
    /// Array of numbers; labels are 1-based positions.
    Numbers(Vec<f64>),
    /// Array of categorical samples; becomes a histogram.
    Strings(Vec<String>),
    /// Array of `[label, value]` arrays.
    Pairs(Vec<(String, f64)>),
    /// Null, empty, scalar or otherwise unrecognized input.
    Unrecognized,
}

impl SeriesInput {
    /// Classify a JSON value. Arrays dispatch on the type of their first element.
    pub fn classify(value: &Value) -> Self {
        match value {
            Value::Object(map) => Self::Mapping(
                map.iter().map(|(k, v)| (k.clone(), coerce_number(v))).collect(),
            ),
            Value::Array(items) => match items.first() {
                Some(Value::Object(_)) => Self::Records(items.iter().map(record_from_value).collect()),
                Some(Value::Number(_)) => Self::Numbers(items.iter().map(coerce_number).collect()),
                Some(Value::String(_)) => Self::Strings(items.iter().map(coerce_text).collect()),
                Some(Value::Array(_)) => Self::Pairs(items.iter().map(pair_from_value).collect()),
                _ => Self::Unrecognized,
            },
            _ => Self::Unrecognized,
        }
    }

    /// Normalize into the canonical series.
    pub fn normalize(&self) -> Series {
        match self {
            Self::Mapping(map) => Series::from_pairs(map.iter().map(|(k, v)| (k.clone(), *v))),
            Self::Records(records) => Series::from_pairs(records.iter().map(|r| {
                (r.label.clone().unwrap_or_default(), r.value.unwrap_or(0.0))
            })),
            Self::Numbers(values) => Series::from_pairs(
                values.iter().enumerate().map(|(i, v)| ((i + 1).to_string(), *v)),
            ),
            Self::Strings(samples) => {
                let mut counts: IndexMap<&str, f64> = IndexMap::new();
                for s in samples {
                    *counts.entry(s.as_str()).or_insert(0.0) += 1.0;
                }
                Series::from_pairs(counts.into_iter().map(|(k, n)| (k.to_string(), n)))
            }
            Self::Pairs(pairs) => Series::from_pairs(pairs.iter().cloned()),
            Self::Unrecognized => Series::empty(),
        }
    }
}

impl From<&Value> for SeriesInput {
    fn from(value: &Value) -> Self {
        Self::classify(value)
    }
}

/// Classify and normalize a JSON value in one step.
pub fn normalize(value: &Value) -> Series {
    SeriesInput::classify(value).normalize()
}

/// Loose numeric coercion: numbers as-is, booleans 1/0, null 0, text trimmed and parsed.
/// Unparseable inputs yield NaN, which the series later stores as 0.
pub fn coerce_number(value: &Value) -> f64 {
    match value {
        Value::Number(n) => n.as_f64().unwrap_or(f64::NAN),
        Value::Bool(b) => f64::from(u8::from(*b)),
        Value::Null => 0.0,
        Value::String(s) => parse_loose_number(s),
        Value::Array(_) | Value::Object(_) => f64::NAN,
    }
}

/// Parse text as a number the lenient way: surrounding whitespace ignored, empty is 0.
pub fn parse_loose_number(text: &str) -> f64 {
    let t = text.trim();
    if t.is_empty() {
        return 0.0;
    }
    t.parse::<f64>().unwrap_or(f64::NAN)
}

fn coerce_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

fn record_from_value(value: &Value) -> Record {
    let label = value.get("label").filter(|v| !v.is_null()).map(coerce_text);
    let value = value.get("value").filter(|v| !v.is_null()).map(coerce_number);
    Record { label, value }
}

fn pair_from_value(value: &Value) -> (String, f64) {
    match value {
        Value::Array(cells) => (
            cells.first().map(coerce_text).unwrap_or_default(),
            cells.get(1).map(coerce_number).unwrap_or(0.0),
        ),
        _ => (String::new(), 0.0),
    }
}

#[inline]
fn finite_or_zero(v: f64) -> f64 {
    if v.is_finite() { v } else { 0.0 }
}
