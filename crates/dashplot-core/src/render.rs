// File: crates/dashplot-core/src/render.rs
// Summary: Chart renderer; draws bar/pie charts into an offscreen DPR-scaled raster and commits it to a surface.

use skia_safe as skia;

use crate::bar::{bar_size, paint_bar, BarLayout};
use crate::error::RenderError;
use crate::options::{ChartKind, ChartOptions};
use crate::palette::resolve_palette;
use crate::pie::{paint_pie, pie_size, value_texts, PieLayout};
use crate::series::Series;
use crate::surface::{Committed, SharedSurface};
use crate::text::TextShaper;
use crate::theme::{ThemeColors, ThemeSource};
use crate::types::{TITLE_FONT_SIZE, TITLE_ORIGIN};

/// Draws charts onto [`SharedSurface`]s. Holds the font collection shared by all draws.
#[derive(Default)]
pub struct ChartRenderer {
    shaper: TextShaper,
}

impl ChartRenderer {
    pub fn new() -> Self {
        Self { shaper: TextShaper::new() }
    }

    /// Draw `series` as `kind`. On error the surface keeps its previous contents.
    pub fn draw(
        &self,
        kind: ChartKind,
        surface: &SharedSurface,
        series: &Series,
        opts: &ChartOptions,
        theme: &dyn ThemeSource,
    ) -> Result<(), RenderError> {
        match kind {
            ChartKind::Bar => self.draw_bar(surface, series, opts, theme).map(|_| ()),
            ChartKind::Pie => self.draw_pie(surface, series, opts, theme).map(|_| ()),
        }
    }

    pub fn draw_bar(
        &self,
        surface: &SharedSurface,
        series: &Series,
        opts: &ChartOptions,
        theme: &dyn ThemeSource,
    ) -> Result<BarLayout, RenderError> {
        let (width, height) = bar_size(surface.client_width(), opts);
        let layout = BarLayout::compute(width, height, series, opts);
        let colors = theme.colors();
        let palette = resolve_palette(opts);

        let mut raster = begin_raster(width, height, surface.device_pixel_ratio(), &colors)?;
        let canvas = raster.canvas();
        paint_bar(canvas, &self.shaper, &layout, series, opts, &colors, &palette);
        self.paint_title(canvas, opts, &colors);

        tracing::debug!(bars = layout.bars.len(), width, height, ceiling = layout.ceiling, "bar chart drawn");
        surface.commit(Committed { raster, style_height: height });
        Ok(layout)
    }

    pub fn draw_pie(
        &self,
        surface: &SharedSurface,
        series: &Series,
        opts: &ChartOptions,
        theme: &dyn ThemeSource,
    ) -> Result<PieLayout, RenderError> {
        let (width, height) = pie_size(surface.client_width(), opts);
        let layout = PieLayout::compute(width, height, series, opts);
        let values = if opts.show_values() { value_texts(&layout, opts)? } else { Vec::new() };
        let colors = theme.colors();
        let palette = resolve_palette(opts);

        let mut raster = begin_raster(width, height, surface.device_pixel_ratio(), &colors)?;
        let canvas = raster.canvas();
        paint_pie(canvas, &self.shaper, &layout, series, opts, &colors, &palette, &values);
        self.paint_title(canvas, opts, &colors);

        tracing::debug!(slices = layout.slices.len(), width, height, total = layout.total, "pie chart drawn");
        surface.commit(Committed { raster, style_height: height });
        Ok(layout)
    }

    fn paint_title(&self, canvas: &skia::Canvas, opts: &ChartOptions, colors: &ThemeColors) {
        if let Some(title) = opts.title.as_deref().filter(|t| !t.is_empty()) {
            let (x, y) = TITLE_ORIGIN;
            self.shaper.draw_left(canvas, title, x, y, TITLE_FONT_SIZE, colors.text);
        }
    }
}

/// Allocate a `floor(w*dpr) x floor(h*dpr)` raster, cleared to the background and
/// scaled so drawing happens in logical pixels.
fn begin_raster(width: f32, height: f32, dpr: f32, colors: &ThemeColors) -> Result<skia::Surface, RenderError> {
    let pw = ((width * dpr).floor() as i32).max(1);
    let ph = ((height * dpr).floor() as i32).max(1);
    let mut raster = skia::surfaces::raster_n32_premul((pw, ph))
        .ok_or(RenderError::SurfaceAllocation { width: pw, height: ph })?;
    let canvas = raster.canvas();
    canvas.clear(colors.background);
    canvas.scale((dpr, dpr));
    Ok(raster)
}
