// File: crates/dashplot-core/src/lib.rs
// Summary: Core library entry point; canonical series, palettes, themes, bar/pie rendering and responsive mounting.

pub mod bar;
pub mod error;
pub mod events;
pub mod geometry;
pub mod options;
pub mod page;
pub mod palette;
pub mod pie;
pub mod redraw;
pub mod render;
pub mod series;
pub mod surface;
pub mod text;
pub mod theme;
pub mod types;

pub use bar::{BarGeom, BarLayout};
pub use error::RenderError;
pub use events::{Subscribers, Subscription};
pub use options::{ChartKind, ChartOptions, ValueFormat};
pub use page::{MountPoint, MountedItem, Stack};
pub use palette::{color_for, default_palette, reset_default_palette, set_default_palette, Palette};
pub use pie::{PieLayout, SliceGeom, SliceLabel};
pub use redraw::{mount_chart, mount_chart_on, ChartEnv, ChartHandle, FrameQueue, FrameScheduler, RedrawStats};
pub use render::ChartRenderer;
pub use series::{normalize, Record, Series, SeriesInput};
pub use surface::SharedSurface;
pub use text::TextShaper;
pub use theme::{FixedTheme, ThemeColors, ThemeMode, ThemeSource, ThemeSwitch};
