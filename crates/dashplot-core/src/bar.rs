// File: crates/dashplot-core/src/bar.rs
// Summary: Bar chart layout (pure geometry) and its Skia painting pass.

use skia_safe as skia;

use crate::geometry::{clamp, PointF, RectF};
use crate::options::ChartOptions;
use crate::palette::Palette;
use crate::series::Series;
use crate::text::{Align, Baseline, TextShaper};
use crate::theme::ThemeColors;
use crate::types::{
    Insets, BAR_FALLBACK_WIDTH, BAR_GAP, BAR_HEIGHT, BAR_MIN_HEIGHT, BAR_MIN_WIDTH, BAR_PADDING_TOP,
    LABEL_FONT_SIZE,
};

/// One laid-out bar.
#[derive(Clone, Debug, PartialEq)]
pub struct BarGeom {
    pub index: usize,
    /// Value after clamping negatives to zero.
    pub value: f64,
    pub rect: RectF,
    /// Bottom-centre anchor of the value label.
    pub value_anchor: PointF,
    /// Baseline-centre anchor of the category label.
    pub label_anchor: PointF,
}

/// Geometry of a whole bar chart in logical pixels.
#[derive(Clone, Debug, PartialEq)]
pub struct BarLayout {
    pub width: f32,
    pub height: f32,
    pub insets: Insets,
    pub plot: RectF,
    pub ceiling: f64,
    pub bar_width: f32,
    pub bars: Vec<BarGeom>,
}

/// Logical `(width, height)` of a bar chart on a surface `client_width` wide.
pub fn bar_size(client_width: f32, opts: &ChartOptions) -> (f32, f32) {
    let width = if client_width > 0.0 { client_width } else { BAR_FALLBACK_WIDTH };
    let height = opts.height.filter(|h| h.is_finite() && *h > 0.0).unwrap_or(BAR_HEIGHT);
    (width, height.max(BAR_MIN_HEIGHT))
}

/// Axis ceiling: a usable `opts.max`, else `max(1, max(data))`.
pub fn bar_ceiling(series: &Series, opts: &ChartOptions) -> f64 {
    match opts.max {
        Some(m) if m.is_finite() && m > 0.0 => m,
        _ => series.data().iter().copied().fold(1.0, f64::max),
    }
}

impl BarLayout {
    pub fn compute(width: f32, height: f32, series: &Series, opts: &ChartOptions) -> Self {
        let insets = Insets::bar(opts.padding_top.unwrap_or(BAR_PADDING_TOP));
        let plot_w = (width - insets.hsum()).max(0.0);
        let plot_h = (height - insets.vsum()).max(0.0);
        let plot = RectF::from_ltwh(insets.left, insets.top, plot_w, plot_h);
        let ceiling = bar_ceiling(series, opts);

        let n = series.len().max(1) as f32;
        let bar_width = ((plot_w - (n - 1.0) * BAR_GAP) / n).max(BAR_MIN_WIDTH);

        let bars = series
            .data()
            .iter()
            .enumerate()
            .map(|(i, &v)| {
                let value = v.max(0.0) + 0.0;
                let ratio = clamp(value / ceiling, 0.0, 1.0) as f32;
                let bh = ratio * plot_h;
                let x = plot.left + i as f32 * (bar_width + BAR_GAP);
                let y = plot.bottom - bh;
                let rect = RectF::from_ltwh(x, y, bar_width, bh);
                BarGeom {
                    index: i,
                    value,
                    rect,
                    value_anchor: PointF::new(rect.center_x(), (y - 4.0).max(12.0)),
                    label_anchor: PointF::new(rect.center_x(), plot.bottom + 14.0),
                }
            })
            .collect();

        Self { width, height, insets, plot, ceiling, bar_width, bars }
    }
}

/// Shortest decimal text for a chart value (`6`, `2.5`).
pub fn format_value(v: f64) -> String {
    format!("{}", v + 0.0)
}

pub(crate) fn paint_bar(
    canvas: &skia::Canvas,
    shaper: &TextShaper,
    layout: &BarLayout,
    series: &Series,
    opts: &ChartOptions,
    colors: &ThemeColors,
    palette: &Palette,
) {
    let mut axis = skia::Paint::default();
    axis.set_color(colors.axis);
    axis.set_anti_alias(true);
    axis.set_stroke_width(1.0);
    let p = &layout.plot;
    canvas.draw_line((p.left, p.bottom), (p.right, p.bottom), &axis);

    let mut fill = skia::Paint::default();
    fill.set_anti_alias(true);
    fill.set_style(skia::paint::Style::Fill);

    for bar in &layout.bars {
        fill.set_color(palette.color(bar.index));
        canvas.draw_rect(skia::Rect::from(bar.rect), &fill);

        if opts.show_values() {
            shaper.draw(
                canvas,
                &format_value(bar.value),
                (bar.value_anchor.x, bar.value_anchor.y),
                LABEL_FONT_SIZE,
                colors.text,
                Align::Center,
                Baseline::Bottom,
                true,
            );
        }
        let label = series.labels().get(bar.index).map(String::as_str).unwrap_or("");
        shaper.draw(
            canvas,
            label,
            (bar.label_anchor.x, bar.label_anchor.y),
            LABEL_FONT_SIZE,
            colors.text,
            Align::Center,
            Baseline::Alphabetic,
            false,
        );
    }
}
