// File: crates/dashplot-core/src/options.rs
// Summary: Per-chart options (title, sizing, labels, palette override, value formatter).

use std::fmt;
use std::rc::Rc;
use std::str::FromStr;

use serde::Deserialize;

use crate::palette::Palette;

/// Which renderer draws a series.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartKind {
    #[default]
    Bar,
    Pie,
}

impl FromStr for ChartKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "bar" => Ok(Self::Bar),
            "pie" => Ok(Self::Pie),
            other => Err(format!("unknown chart kind `{other}` (expected bar or pie)")),
        }
    }
}

type FormatFn = dyn Fn(f64, f64) -> anyhow::Result<String>;

/// Maps `(value, fraction of total)` to the text drawn inside a pie slice.
#[derive(Clone)]
pub struct ValueFormat(Rc<FormatFn>);

impl ValueFormat {
    pub fn new(f: impl Fn(f64, f64) -> anyhow::Result<String> + 'static) -> Self {
        Self(Rc::new(f))
    }

    /// Formatter printing the fraction as a whole percentage.
    pub fn percent() -> Self {
        Self::new(|_, fraction| Ok(format!("{:.0}%", fraction * 100.0)))
    }

    pub fn format(&self, value: f64, fraction: f64) -> anyhow::Result<String> {
        (self.0)(value, fraction)
    }
}

impl fmt::Debug for ValueFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ValueFormat(..)")
    }
}

/// Recognized chart options; every field is optional and defaults per chart kind.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ChartOptions {
    pub title: Option<String>,
    /// Logical height; defaults to 180 (bar) or 220 (pie).
    pub height: Option<f32>,
    /// Axis ceiling override (bar only).
    pub max: Option<f64>,
    /// Defaults to 36 (bar) or 30 (pie).
    pub padding_top: Option<f32>,
    pub show_values: Option<bool>,
    /// Outside slice labels (pie only).
    pub show_labels: Option<bool>,
    pub palette: Option<Palette>,
    #[serde(skip)]
    pub value_format: Option<ValueFormat>,
    /// Trailing lines aggregated by the ping-log reader.
    pub limit: Option<usize>,
}

impl ChartOptions {
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_height(mut self, height: f32) -> Self {
        self.height = Some(height);
        self
    }

    pub fn with_max(mut self, max: f64) -> Self {
        self.max = Some(max);
        self
    }

    pub fn with_padding_top(mut self, padding_top: f32) -> Self {
        self.padding_top = Some(padding_top);
        self
    }

    pub fn with_palette(mut self, palette: Palette) -> Self {
        self.palette = Some(palette);
        self
    }

    pub fn with_value_format(mut self, format: ValueFormat) -> Self {
        self.value_format = Some(format);
        self
    }

    pub fn with_show_values(mut self, on: bool) -> Self {
        self.show_values = Some(on);
        self
    }

    pub fn with_show_labels(mut self, on: bool) -> Self {
        self.show_labels = Some(on);
        self
    }

    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn show_values(&self) -> bool { self.show_values.unwrap_or(true) }
    pub fn show_labels(&self) -> bool { self.show_labels.unwrap_or(true) }

    /// Fill unset fields from `defaults`; fields already set win.
    pub fn or(mut self, defaults: &ChartOptions) -> Self {
        self.title = self.title.or_else(|| defaults.title.clone());
        self.height = self.height.or(defaults.height);
        self.max = self.max.or(defaults.max);
        self.padding_top = self.padding_top.or(defaults.padding_top);
        self.show_values = self.show_values.or(defaults.show_values);
        self.show_labels = self.show_labels.or(defaults.show_labels);
        self.palette = self.palette.or_else(|| defaults.palette.clone());
        self.value_format = self.value_format.or_else(|| defaults.value_format.clone());
        self.limit = self.limit.or(defaults.limit);
        self
    }
}
