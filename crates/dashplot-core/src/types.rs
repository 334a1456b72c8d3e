// File: crates/dashplot-core/src/types.rs
// Summary: Shared layout constants (sizes, paddings, thresholds) and the padding type.

/// Default logical height of a bar chart.
pub const BAR_HEIGHT: f32 = 180.0;
/// Bar charts never shrink below this logical height.
pub const BAR_MIN_HEIGHT: f32 = 120.0;
/// Logical width used when the surface has not been laid out.
pub const BAR_FALLBACK_WIDTH: f32 = 300.0;
/// Default top padding of a bar chart (room for the title).
pub const BAR_PADDING_TOP: f32 = 36.0;
/// Fixed gap between neighbouring bars.
pub const BAR_GAP: f32 = 8.0;
/// Bars shrink to fit but never below this width.
pub const BAR_MIN_WIDTH: f32 = 4.0;

/// Default logical height of a pie chart.
pub const PIE_HEIGHT: f32 = 220.0;
/// Pie charts never shrink below this logical height.
pub const PIE_MIN_HEIGHT: f32 = 160.0;
/// Logical width used when the surface has not been laid out.
pub const PIE_FALLBACK_WIDTH: f32 = 320.0;
/// Default top padding of a pie chart.
pub const PIE_PADDING_TOP: f32 = 30.0;
/// Smallest pie radius in logical pixels.
pub const PIE_MIN_RADIUS: f32 = 40.0;
/// Slices at or below this sweep (radians) get no outside label.
pub const PIE_LABEL_MIN_SWEEP: f32 = 0.005;
/// Slices at or below this sweep (radians) get no inside value.
pub const PIE_VALUE_MIN_SWEEP: f32 = 0.02;

/// A surface narrower than this has not received layout yet.
pub const MIN_LAYOUT_WIDTH: f32 = 10.0;

/// Font size of value and category labels.
pub const LABEL_FONT_SIZE: f32 = 12.0;
/// Font size of the in-canvas title.
pub const TITLE_FONT_SIZE: f32 = 13.0;
/// Baseline anchor of the in-canvas title.
pub const TITLE_ORIGIN: (f32, f32) = (6.0, 14.0);

/// Plot margins, in logical pixels.
/// Contract: all fields are non-negative.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Insets {
    pub left: f32,
    pub right: f32,
    pub top: f32,
    pub bottom: f32,
}

impl Insets {
    /// Create new insets; negative inputs are clamped to zero.
    pub fn new(left: f32, right: f32, top: f32, bottom: f32) -> Self {
        Self { left: left.max(0.0), right: right.max(0.0), top: top.max(0.0), bottom: bottom.max(0.0) }
    }
    /// Bar chart padding with the given top padding.
    pub fn bar(top: f32) -> Self {
        Self::new(28.0, 12.0, top, 28.0)
    }
    /// Total horizontal inset (left + right).
    pub fn hsum(&self) -> f32 { self.left + self.right }
    /// Total vertical inset (top + bottom).
    pub fn vsum(&self) -> f32 { self.top + self.bottom }
}

impl Default for Insets {
    fn default() -> Self {
        Self::bar(BAR_PADDING_TOP)
    }
}
