// File: crates/dashplot-core/src/pie.rs
// Summary: Pie chart layout (slices from 12 o'clock, clockwise) and its Skia painting pass.

use std::f64::consts::{FRAC_PI_2, TAU};

use skia_safe as skia;

use crate::bar::format_value;
use crate::error::RenderError;
use crate::geometry::{PointF, RectF};
use crate::options::ChartOptions;
use crate::palette::Palette;
use crate::series::Series;
use crate::text::{Align, Baseline, TextShaper};
use crate::theme::ThemeColors;
use crate::types::{
    LABEL_FONT_SIZE, PIE_FALLBACK_WIDTH, PIE_HEIGHT, PIE_LABEL_MIN_SWEEP, PIE_MIN_HEIGHT, PIE_MIN_RADIUS,
    PIE_PADDING_TOP, PIE_VALUE_MIN_SWEEP,
};

/// Leader line and anchor of an outside slice label.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SliceLabel {
    /// Leader start, at 92% of the radius.
    pub elbow: PointF,
    /// Leader end, 6px short of the anchor.
    pub line_end: PointF,
    pub anchor: PointF,
    /// Right-half slices are left-aligned, left-half slices right-aligned.
    pub align: Align,
}

#[derive(Clone, Debug, PartialEq)]
pub struct SliceGeom {
    pub index: usize,
    /// Value after clamping negatives to zero.
    pub value: f64,
    pub fraction: f64,
    /// Start angle in radians; -π/2 is 12 o'clock, angles grow clockwise.
    pub start: f64,
    pub sweep: f64,
    pub label: Option<SliceLabel>,
    /// Centre of the inside value text, at 62% of the radius.
    pub value_anchor: Option<PointF>,
}

impl SliceGeom {
    pub fn end(&self) -> f64 { self.start + self.sweep }
    pub fn mid(&self) -> f64 { self.start + self.sweep * 0.5 }
}

#[derive(Clone, Debug, PartialEq)]
pub struct PieLayout {
    pub width: f32,
    pub height: f32,
    pub center: PointF,
    pub radius: f32,
    /// Sum of clamped values, or 1 when that sum is zero.
    pub total: f64,
    pub slices: Vec<SliceGeom>,
}

/// Logical `(width, height)` of a pie chart on a surface `client_width` wide.
pub fn pie_size(client_width: f32, opts: &ChartOptions) -> (f32, f32) {
    let width = if client_width > 0.0 { client_width } else { PIE_FALLBACK_WIDTH };
    let height = opts.height.filter(|h| h.is_finite() && *h > 0.0).unwrap_or(PIE_HEIGHT);
    (width, height.max(PIE_MIN_HEIGHT))
}

impl PieLayout {
    pub fn compute(width: f32, height: f32, series: &Series, opts: &ChartOptions) -> Self {
        let padding_top = opts.padding_top.unwrap_or(PIE_PADDING_TOP);
        let center = PointF::new(width / 2.0, padding_top + (height - padding_top) / 2.0);
        let radius = (width.min(height - padding_top) * 0.35).max(PIE_MIN_RADIUS);

        let values: Vec<f64> = series.data().iter().map(|v| v.max(0.0) + 0.0).collect();
        let sum: f64 = values.iter().sum();
        let total = if sum > 0.0 { sum } else { 1.0 };

        let mut start = -FRAC_PI_2;
        let slices = values
            .iter()
            .enumerate()
            .map(|(i, &value)| {
                let fraction = value / total;
                let sweep = fraction * TAU;
                let mut slice = SliceGeom { index: i, value, fraction, start, sweep, label: None, value_anchor: None };
                let mid = slice.mid() as f32;
                if sweep > f64::from(PIE_LABEL_MIN_SWEEP) {
                    slice.label = Some(outside_label(center, radius, mid));
                }
                if sweep > f64::from(PIE_VALUE_MIN_SWEEP) {
                    slice.value_anchor = Some(center.polar(radius * 0.62, mid));
                }
                start += sweep;
                slice
            })
            .collect();

        Self { width, height, center, radius, total, slices }
    }

    /// Bounding box of the full circle.
    pub fn oval(&self) -> RectF {
        let (c, r) = (self.center, self.radius);
        RectF::from_ltrb(c.x - r, c.y - r, c.x + r, c.y + r)
    }
}

fn outside_label(center: PointF, radius: f32, mid: f32) -> SliceLabel {
    let is_right = mid.cos() >= 0.0;
    let side = if is_right { 1.0 } else { -1.0 };
    let elbow = center.polar(radius * 0.92, mid);
    let reach = center.polar(radius * 1.06, mid);
    let anchor = PointF::new(reach.x + 8.0 * side, reach.y);
    SliceLabel {
        elbow,
        line_end: PointF::new(anchor.x - 6.0 * side, anchor.y),
        anchor,
        align: if is_right { Align::Left } else { Align::Right },
    }
}

/// Text drawn inside each slice that has room for it, in slice order.
pub(crate) fn value_texts(layout: &PieLayout, opts: &ChartOptions) -> Result<Vec<Option<String>>, RenderError> {
    layout
        .slices
        .iter()
        .map(|s| {
            if s.value_anchor.is_none() {
                return Ok(None);
            }
            match &opts.value_format {
                Some(f) => f
                    .format(s.value, s.fraction)
                    .map(Some)
                    .map_err(|e| RenderError::ValueFormat { index: s.index, message: format!("{e:#}") }),
                None => Ok(Some(format_value(s.value))),
            }
        })
        .collect()
}

#[allow(clippy::too_many_arguments)]
pub(crate) fn paint_pie(
    canvas: &skia::Canvas,
    shaper: &TextShaper,
    layout: &PieLayout,
    series: &Series,
    opts: &ChartOptions,
    colors: &ThemeColors,
    palette: &Palette,
    values: &[Option<String>],
) {
    let oval = skia::Rect::from(layout.oval());
    let mut fill = skia::Paint::default();
    fill.set_anti_alias(true);
    fill.set_style(skia::paint::Style::Fill);
    for s in layout.slices.iter().filter(|s| s.sweep > 0.0) {
        fill.set_color(palette.color(s.index));
        canvas.draw_arc(oval, s.start.to_degrees() as f32, s.sweep.to_degrees() as f32, true, &fill);
    }

    if opts.show_labels() {
        let mut leader = skia::Paint::default();
        leader.set_color(colors.axis);
        leader.set_anti_alias(true);
        leader.set_style(skia::paint::Style::Stroke);
        leader.set_stroke_width(1.0);
        for s in &layout.slices {
            let Some(label) = s.label else { continue };
            canvas.draw_line(label.elbow, label.line_end, &leader);
            let name = series.labels().get(s.index).map(String::as_str).unwrap_or("");
            shaper.draw(
                canvas,
                name,
                (label.anchor.x, label.anchor.y),
                LABEL_FONT_SIZE,
                colors.text,
                label.align,
                Baseline::Middle,
                false,
            );
        }
    }

    if opts.show_values() {
        for (s, text) in layout.slices.iter().zip(values) {
            let (Some(anchor), Some(text)) = (s.value_anchor, text) else { continue };
            shaper.draw(
                canvas,
                text,
                (anchor.x, anchor.y),
                LABEL_FONT_SIZE,
                colors.text,
                Align::Center,
                Baseline::Middle,
                true,
            );
        }
    }
}
