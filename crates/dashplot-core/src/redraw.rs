// File: crates/dashplot-core/src/redraw.rs
// Summary: Responsive redraw controller: waits for layout, draws, then redraws on resize and theme change.
// Notes:
// - Everything here is single-threaded; callbacks hold weak references so the
//   `ChartHandle` is the only owner of a mounted chart.
// - No debounce: every resize or theme notification triggers a full redraw.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use crate::events::{Callback, Subscription};
use crate::options::{ChartKind, ChartOptions};
use crate::page::MountPoint;
use crate::render::ChartRenderer;
use crate::series::Series;
use crate::surface::SharedSurface;
use crate::theme::ThemeSource;
use crate::types::MIN_LAYOUT_WIDTH;

/// Work deferred to the next animation frame.
pub type FrameTask = Box<dyn FnOnce()>;

/// Host hook for "run this on the next frame".
pub trait FrameScheduler {
    fn request_frame(&self, task: FrameTask);
}

/// Manually pumped frame queue. Tasks queued while a frame runs wait for the next one.
#[derive(Default)]
pub struct FrameQueue {
    pending: RefCell<Vec<FrameTask>>,
}

impl FrameQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Run one frame; returns how many tasks ran.
    pub fn run_frame(&self) -> usize {
        let tasks = std::mem::take(&mut *self.pending.borrow_mut());
        let n = tasks.len();
        for task in tasks {
            task();
        }
        n
    }

    /// Run frames until nothing is queued or `max_frames` ran; returns frames run.
    pub fn run_until_idle(&self, max_frames: usize) -> usize {
        let mut frames = 0;
        while frames < max_frames && self.pending() > 0 {
            self.run_frame();
            frames += 1;
        }
        frames
    }

    pub fn pending(&self) -> usize {
        self.pending.borrow().len()
    }
}

impl FrameScheduler for FrameQueue {
    fn request_frame(&self, task: FrameTask) {
        self.pending.borrow_mut().push(task);
    }
}

/// Collaborators a mounted chart needs.
#[derive(Clone)]
pub struct ChartEnv {
    pub renderer: Rc<ChartRenderer>,
    pub theme: Rc<dyn ThemeSource>,
    pub frames: Rc<dyn FrameScheduler>,
}

impl ChartEnv {
    pub fn new(theme: Rc<dyn ThemeSource>, frames: Rc<dyn FrameScheduler>) -> Self {
        Self { renderer: Rc::new(ChartRenderer::new()), theme, frames }
    }
}

/// Counters for one mounted chart.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RedrawStats {
    pub draws: u64,
    pub failures: u64,
    /// Attempts postponed because the surface had no layout yet.
    pub deferrals: u64,
}

struct Controller {
    surface: SharedSurface,
    series: Series,
    kind: ChartKind,
    opts: ChartOptions,
    env: ChartEnv,
    stats: RedrawStats,
    resize_sub: Option<Subscription>,
    theme_sub: Option<Subscription>,
}

/// Owner of a mounted chart. Dropping it (or calling [`ChartHandle::dispose`])
/// unsubscribes from resize and theme changes and cancels pending retries.
pub struct ChartHandle {
    ctrl: Rc<RefCell<Controller>>,
}

impl ChartHandle {
    pub fn surface(&self) -> SharedSurface {
        self.ctrl.borrow().surface.clone()
    }

    pub fn kind(&self) -> ChartKind {
        self.ctrl.borrow().kind
    }

    pub fn series(&self) -> Series {
        self.ctrl.borrow().series.clone()
    }

    pub fn stats(&self) -> RedrawStats {
        self.ctrl.borrow().stats
    }

    /// Whether the resize and theme subscriptions are attached.
    pub fn is_observing(&self) -> bool {
        self.ctrl.borrow().resize_sub.is_some()
    }

    /// Attempt a draw now (deferring if the surface is not laid out).
    pub fn redraw(&self) {
        attempt(&self.ctrl);
    }

    pub fn dispose(self) {}
}

impl Drop for ChartHandle {
    fn drop(&mut self) {
        if let Ok(mut c) = self.ctrl.try_borrow_mut() {
            c.resize_sub.take();
            c.theme_sub.take();
        }
    }
}

/// Append a fresh surface to `mount` and draw `series` on it once it has layout.
pub fn mount_chart(
    mount: &dyn MountPoint,
    series: Series,
    kind: ChartKind,
    opts: ChartOptions,
    env: &ChartEnv,
) -> ChartHandle {
    mount_chart_on(mount, SharedSurface::new(), series, kind, opts, env)
}

/// Like [`mount_chart`] but with a caller-provided surface.
pub fn mount_chart_on(
    mount: &dyn MountPoint,
    surface: SharedSurface,
    series: Series,
    kind: ChartKind,
    opts: ChartOptions,
    env: &ChartEnv,
) -> ChartHandle {
    mount.append_surface(surface.clone());
    let ctrl = Rc::new(RefCell::new(Controller {
        surface,
        series,
        kind,
        opts,
        env: env.clone(),
        stats: RedrawStats::default(),
        resize_sub: None,
        theme_sub: None,
    }));
    schedule(&ctrl);
    ChartHandle { ctrl }
}

fn schedule(ctrl: &Rc<RefCell<Controller>>) {
    let weak = Rc::downgrade(ctrl);
    let frames = ctrl.borrow().env.frames.clone();
    frames.request_frame(Box::new(move || retry(&weak)));
}

fn retry(weak: &Weak<RefCell<Controller>>) {
    if let Some(ctrl) = weak.upgrade() {
        attempt(&ctrl);
    }
}

fn attempt(ctrl: &Rc<RefCell<Controller>>) {
    let width = ctrl.borrow().surface.client_width();
    if width < MIN_LAYOUT_WIDTH {
        ctrl.borrow_mut().stats.deferrals += 1;
        tracing::trace!(width, "surface not laid out; deferring draw");
        schedule(ctrl);
        return;
    }
    draw_once(ctrl);
    attach_observers(ctrl);
}

fn draw_once(ctrl: &Rc<RefCell<Controller>>) {
    let result = {
        let c = ctrl.borrow();
        c.env.renderer.draw(c.kind, &c.surface, &c.series, &c.opts, c.env.theme.as_ref())
    };
    let mut c = ctrl.borrow_mut();
    match result {
        Ok(()) => c.stats.draws += 1,
        Err(e) => {
            c.stats.failures += 1;
            tracing::error!(error = %e, kind = ?c.kind, "chart draw failed; keeping last good frame");
        }
    }
}

fn attach_observers(ctrl: &Rc<RefCell<Controller>>) {
    if ctrl.borrow().resize_sub.is_some() {
        return;
    }
    let on_resize: Callback = {
        let weak = Rc::downgrade(ctrl);
        Rc::new(move || retry(&weak))
    };
    let on_theme: Callback = {
        let weak = Rc::downgrade(ctrl);
        Rc::new(move || retry(&weak))
    };
    let (resize_sub, theme_sub) = {
        let c = ctrl.borrow();
        (c.surface.observe_resize(on_resize), c.env.theme.on_change(on_theme))
    };
    let mut c = ctrl.borrow_mut();
    c.resize_sub = Some(resize_sub);
    c.theme_sub = Some(theme_sub);
}
