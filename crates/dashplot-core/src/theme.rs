// File: crates/dashplot-core/src/theme.rs
// Summary: Light/Dark chart colors, the theme-source seam, and a switchable theme with change notification.

use std::cell::Cell;
use std::str::FromStr;

use skia_safe as skia;

use crate::events::{Callback, Subscribers, Subscription};

/// Colors a chart reads from the active theme at draw time.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ThemeColors {
    pub background: skia::Color,
    pub axis: skia::Color,
    pub text: skia::Color,
}

impl ThemeColors {
    pub fn dark() -> Self {
        Self {
            background: skia::Color::from_argb(255, 0x1a, 0x1a, 0x1a),
            axis: skia::Color::from_argb(31, 255, 255, 255), // rgba(255,255,255,.12)
            text: skia::Color::from_argb(255, 255, 255, 255),
        }
    }

    pub fn light() -> Self {
        Self {
            background: skia::Color::from_argb(255, 250, 250, 252),
            axis: skia::Color::from_argb(31, 0, 0, 0),
            text: skia::Color::from_argb(255, 20, 20, 30),
        }
    }
}

impl Default for ThemeColors {
    fn default() -> Self {
        Self::dark()
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ThemeMode {
    #[default]
    Dark,
    Light,
}

impl ThemeMode {
    pub fn name(self) -> &'static str {
        match self {
            Self::Dark => "dark",
            Self::Light => "light",
        }
    }

    pub fn colors(self) -> ThemeColors {
        match self {
            Self::Dark => ThemeColors::dark(),
            Self::Light => ThemeColors::light(),
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Self::Dark => Self::Light,
            Self::Light => Self::Dark,
        }
    }
}

impl FromStr for ThemeMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        [Self::Dark, Self::Light]
            .into_iter()
            .find(|m| m.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("unknown theme `{s}` (expected dark or light)"))
    }
}

/// The external theme collaborator: current colors plus change notification.
pub trait ThemeSource {
    fn colors(&self) -> ThemeColors;
    fn on_change(&self, callback: Callback) -> Subscription;
}

/// A theme that never changes.
#[derive(Clone, Copy, Debug, Default)]
pub struct FixedTheme(pub ThemeColors);

impl ThemeSource for FixedTheme {
    fn colors(&self) -> ThemeColors {
        self.0
    }

    fn on_change(&self, _callback: Callback) -> Subscription {
        Subscription::detached()
    }
}

/// Dark/light switch; every apply notifies subscribers, even when the mode is unchanged.
#[derive(Default)]
pub struct ThemeSwitch {
    mode: Cell<ThemeMode>,
    listeners: Subscribers,
}

impl ThemeSwitch {
    pub fn new(mode: ThemeMode) -> Self {
        Self { mode: Cell::new(mode), listeners: Subscribers::new() }
    }

    pub fn current(&self) -> ThemeMode {
        self.mode.get()
    }

    pub fn set_to(&self, mode: ThemeMode) {
        self.mode.set(mode);
        tracing::debug!(theme = mode.name(), "theme applied");
        self.listeners.notify();
    }

    pub fn toggle(&self) {
        self.set_to(self.current().toggled());
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }
}

impl ThemeSource for ThemeSwitch {
    fn colors(&self) -> ThemeColors {
        self.mode.get().colors()
    }

    fn on_change(&self, callback: Callback) -> Subscription {
        self.listeners.subscribe(callback)
    }
}
