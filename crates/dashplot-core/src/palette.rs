// File: crates/dashplot-core/src/palette.rs
// Summary: Chart palettes, CSS color parsing, and the process-wide default palette.

use std::sync::RwLock;

use once_cell::sync::Lazy;
use serde::Deserialize;
use skia_safe as skia;

use crate::options::ChartOptions;

/// The built-in 12-hue palette.
pub const DEFAULT_PALETTE_HEX: [&str; 12] = [
    "#1db954", "#17a2b8", "#6f42c1", "#fd7e14",
    "#0d6efd", "#dc3545", "#20c997", "#ffc107",
    "#6610f2", "#198754", "#e83e8c", "#6c757d",
];

static DEFAULT_PALETTE: Lazy<RwLock<Palette>> = Lazy::new(|| RwLock::new(Palette::builtin()));

/// Ordered, cyclically indexed chart colors.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(try_from = "Vec<String>")]
pub struct Palette {
    colors: Vec<skia::Color>,
}

impl Palette {
    pub fn new(colors: Vec<skia::Color>) -> Self {
        Self { colors }
    }

    /// The built-in default hues.
    pub fn builtin() -> Self {
        Self::new(DEFAULT_PALETTE_HEX.iter().filter_map(|h| parse_css_color(h)).collect())
    }

    /// Parse every entry as a CSS color.
    pub fn parse<S: AsRef<str>>(entries: &[S]) -> Result<Self, String> {
        entries
            .iter()
            .map(|e| parse_css_color(e.as_ref()).ok_or_else(|| format!("invalid color `{}`", e.as_ref())))
            .collect::<Result<Vec<_>, _>>()
            .map(Self::new)
    }

    pub fn len(&self) -> usize { self.colors.len() }
    pub fn is_empty(&self) -> bool { self.colors.is_empty() }
    pub fn colors(&self) -> &[skia::Color] { &self.colors }

    /// Color for series index `i`: `colors[i mod len]`. An empty palette yields black.
    pub fn color(&self, i: usize) -> skia::Color {
        if self.colors.is_empty() {
            return skia::Color::BLACK;
        }
        self.colors[i % self.colors.len()]
    }
}

impl TryFrom<Vec<String>> for Palette {
    type Error = String;

    fn try_from(entries: Vec<String>) -> Result<Self, Self::Error> {
        Self::parse(&entries)
    }
}

/// Snapshot of the current process-wide default palette.
pub fn default_palette() -> Palette {
    match DEFAULT_PALETTE.read() {
        Ok(p) => p.clone(),
        Err(poisoned) => poisoned.into_inner().clone(),
    }
}

/// Replace the process-wide default. Empty palettes are ignored; returns whether it was applied.
pub fn set_default_palette(palette: Palette) -> bool {
    if palette.is_empty() {
        tracing::warn!("ignoring empty default palette");
        return false;
    }
    match DEFAULT_PALETTE.write() {
        Ok(mut p) => *p = palette,
        Err(poisoned) => *poisoned.into_inner() = palette,
    }
    true
}

/// Restore the built-in default palette.
pub fn reset_default_palette() {
    set_default_palette(Palette::builtin());
}

/// Palette in effect for one draw: the non-empty per-chart override, else the default.
pub fn resolve_palette(opts: &ChartOptions) -> Palette {
    match &opts.palette {
        Some(p) if !p.is_empty() => p.clone(),
        _ => default_palette(),
    }
}

/// Color assigned to series index `index` under `opts`.
pub fn color_for(index: usize, opts: &ChartOptions) -> skia::Color {
    resolve_palette(opts).color(index)
}

/// Parse `#rgb`, `#rrggbb`, `#rrggbbaa`, `rgb(r,g,b)` and `rgba(r,g,b,a)`.
pub fn parse_css_color(text: &str) -> Option<skia::Color> {
    let s = text.trim().to_ascii_lowercase();
    if let Some(hex) = s.strip_prefix('#') {
        return parse_hex(hex);
    }
    let (args, has_alpha) = if let Some(rest) = s.strip_prefix("rgba(") {
        (rest.strip_suffix(')')?, true)
    } else if let Some(rest) = s.strip_prefix("rgb(") {
        (rest.strip_suffix(')')?, false)
    } else {
        return None;
    };
    let parts: Vec<&str> = args.split(',').map(str::trim).collect();
    if parts.len() != if has_alpha { 4 } else { 3 } {
        return None;
    }
    let channel = |p: &str| p.parse::<f32>().ok().map(|v| v.clamp(0.0, 255.0).round() as u8);
    let (r, g, b) = (channel(parts[0])?, channel(parts[1])?, channel(parts[2])?);
    let a = if has_alpha {
        let a = parts[3].parse::<f32>().ok()?;
        (a.clamp(0.0, 1.0) * 255.0).round() as u8
    } else {
        255
    };
    Some(skia::Color::from_argb(a, r, g, b))
}

fn parse_hex(hex: &str) -> Option<skia::Color> {
    if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }
    let byte = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
    let nibble = |i: usize| u8::from_str_radix(&hex[i..=i], 16).ok().map(|n| n * 17);
    match hex.len() {
        3 => Some(skia::Color::from_argb(255, nibble(0)?, nibble(1)?, nibble(2)?)),
        6 => Some(skia::Color::from_argb(255, byte(0)?, byte(2)?, byte(4)?)),
        8 => Some(skia::Color::from_argb(byte(6)?, byte(0)?, byte(2)?, byte(4)?)),
        _ => None,
    }
}
