// File: crates/dashplot-core/tests/palette.rs
// Purpose: Palette assignment, CSS color parsing, and option deserialization.

use dashplot_core::palette::{parse_css_color, resolve_palette, DEFAULT_PALETTE_HEX};
use dashplot_core::{color_for, default_palette, ChartKind, ChartOptions, Palette};
use skia_safe::Color;

#[test]
fn parses_css_color_forms() {
    assert_eq!(parse_css_color("#1db954"), Some(Color::from_argb(255, 0x1d, 0xb9, 0x54)));
    assert_eq!(parse_css_color("#fff"), Some(Color::from_argb(255, 255, 255, 255)));
    assert_eq!(parse_css_color("#00000080"), Some(Color::from_argb(128, 0, 0, 0)));
    assert_eq!(parse_css_color("rgb(1, 2, 3)"), Some(Color::from_argb(255, 1, 2, 3)));
    assert_eq!(parse_css_color("rgba(255,255,255,.12)"), Some(Color::from_argb(31, 255, 255, 255)));
    assert_eq!(parse_css_color("teal"), None);
    assert_eq!(parse_css_color("#12345"), None);
    assert_eq!(parse_css_color("rgb(1,2)"), None);
}

#[test]
fn builtin_palette_has_twelve_hues() {
    let p = Palette::builtin();
    assert_eq!(p.len(), DEFAULT_PALETTE_HEX.len());
    assert_eq!(p.len(), 12);
}

#[test]
fn override_palette_cycles_by_index() {
    let red = Color::from_argb(255, 255, 0, 0);
    let blue = Color::from_argb(255, 0, 0, 255);
    let opts = ChartOptions::default().with_palette(Palette::new(vec![red, blue]));
    assert_eq!(color_for(0, &opts), red);
    assert_eq!(color_for(1, &opts), blue);
    assert_eq!(color_for(2, &opts), red);
    assert_eq!(color_for(7, &opts), blue);
}

#[test]
fn empty_override_falls_back_to_default() {
    let opts = ChartOptions::default().with_palette(Palette::new(Vec::new()));
    assert_eq!(resolve_palette(&opts), default_palette());
    let plain = ChartOptions::default();
    let d = default_palette();
    assert_eq!(color_for(13, &plain), d.color(13 % d.len()));
}

#[test]
fn options_deserialize_from_json() {
    let opts: ChartOptions = serde_json::from_str(
        r##"{"title":"Load","height":240,"paddingTop":20,"showValues":false,"palette":["#000","rgb(1,2,3)"],"limit":5}"##,
    )
    .expect("valid options");
    assert_eq!(opts.title.as_deref(), Some("Load"));
    assert_eq!(opts.height, Some(240.0));
    assert_eq!(opts.padding_top, Some(20.0));
    assert!(!opts.show_values());
    assert!(opts.show_labels());
    assert_eq!(opts.palette.as_ref().map(Palette::len), Some(2));
    assert_eq!(opts.limit, Some(5));
}

#[test]
fn invalid_palette_entry_is_a_config_error() {
    let err = serde_json::from_str::<ChartOptions>(r#"{"palette":["nope"]}"#).unwrap_err();
    assert!(err.to_string().contains("invalid color"), "{err}");
}

#[test]
fn chart_kind_parses_by_name() {
    assert_eq!("Pie".parse::<ChartKind>(), Ok(ChartKind::Pie));
    assert_eq!("bar".parse::<ChartKind>(), Ok(ChartKind::Bar));
    assert!("line".parse::<ChartKind>().is_err());
}
