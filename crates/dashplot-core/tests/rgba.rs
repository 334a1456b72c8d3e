// File: crates/dashplot-core/tests/rgba.rs
// Purpose: Validate the committed RGBA buffer shape, density scaling, and the colors that land in it.

use dashplot_core::{ChartKind, ChartOptions, ChartRenderer, FixedTheme, Palette, Series, SharedSurface, ThemeColors};

#[test]
fn render_rgba8_buffer_at_double_density() {
    let surface = SharedSurface::with_layout(120.0, 2.0);
    let series = Series::from_pairs([("", 1.0), ("", 2.0)]);
    let opts = ChartOptions::default().with_height(120.0).with_show_values(false);
    ChartRenderer::new()
        .draw_bar(&surface, &series, &opts, &FixedTheme(ThemeColors::dark()))
        .expect("bar render");

    let (px, w, h, stride) = surface.rgba8().expect("rgba readback");
    assert_eq!((w, h), (240, 240));
    assert_eq!(w as usize * h as usize * 4, px.len());
    assert_eq!(stride, (w as usize) * 4);

    // Top-left pixel is the dark background.
    assert_eq!(&px[0..4], &[0x1a, 0x1a, 0x1a, 255]);
}

#[test]
fn light_theme_background() {
    let surface = SharedSurface::with_layout(100.0, 1.0);
    let opts = ChartOptions::default().with_show_values(false).with_show_labels(false);
    ChartRenderer::new()
        .draw_pie(&surface, &Series::from_pairs([("", 1.0)]), &opts, &FixedTheme(ThemeColors::light()))
        .expect("pie render");
    let (px, w, _, _) = surface.rgba8().expect("rgba readback");
    assert_eq!(w, 100);
    assert_eq!(&px[0..4], &[250, 250, 252, 255]);
}

fn red_blue() -> ChartOptions {
    let palette = Palette::parse(&["#ff0000", "#0000ff"]).expect("palette");
    ChartOptions::default().with_palette(palette).with_show_values(false).with_show_labels(false)
}

fn pixel_at(px: &[u8], stride: usize, x: f32, y: f32) -> [u8; 4] {
    let i = y as usize * stride + x as usize * 4;
    [px[i], px[i + 1], px[i + 2], px[i + 3]]
}

#[test]
fn bars_are_filled_from_the_palette_in_order() {
    let surface = SharedSurface::with_layout(300.0, 1.0);
    let series = Series::from_pairs([("", 4.0), ("", 3.0), ("", 2.0)]);
    let layout = ChartRenderer::new()
        .draw_bar(&surface, &series, &red_blue(), &FixedTheme::default())
        .expect("bar render");
    let (px, _, _, stride) = surface.rgba8().expect("rgba readback");

    let want = [[255, 0, 0, 255], [0, 0, 255, 255], [255, 0, 0, 255]];
    for (bar, want) in layout.bars.iter().zip(want) {
        let (cx, cy) = (bar.rect.center_x(), bar.rect.top + bar.rect.height() / 2.0);
        assert_eq!(pixel_at(&px, stride, cx, cy), want, "bar {}", bar.index);
    }
}

#[test]
fn pie_slices_are_filled_from_the_palette_in_order() {
    let surface = SharedSurface::with_layout(320.0, 1.0);
    let series = Series::from_pairs([("", 1.0), ("", 1.0)]);
    let layout = ChartRenderer::new()
        .draw_pie(&surface, &series, &red_blue(), &FixedTheme::default())
        .expect("pie render");

    // Decode the exported PNG so the encoder path is covered too.
    let img = image::load_from_memory(&surface.png_bytes().expect("encode png")).expect("decode png").to_rgba8();
    let want = [[255, 0, 0, 255], [0, 0, 255, 255]];
    for (slice, want) in layout.slices.iter().zip(want) {
        let at = slice.value_anchor.expect("slice is wide enough for a value anchor");
        assert_eq!(img.get_pixel(at.x as u32, at.y as u32).0, want, "slice {}", slice.index);
    }
}

#[test]
fn rendering_is_deterministic() {
    let series = Series::from_pairs([("", 3.0), ("", 5.0), ("", 1.0), ("", 4.0)]);
    let render = |kind| {
        let surface = SharedSurface::with_layout(320.0, 1.0);
        ChartRenderer::new()
            .draw(kind, &surface, &series, &red_blue(), &FixedTheme::default())
            .expect("render");
        surface.png_bytes().expect("encode png")
    };
    assert_eq!(render(ChartKind::Pie), render(ChartKind::Pie));
    assert_eq!(render(ChartKind::Bar), render(ChartKind::Bar));
}
