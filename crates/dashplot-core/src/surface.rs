// File: crates/dashplot-core/src/surface.rs
// Summary: The drawing surface a chart renders onto: layout width, pixel density, committed raster, resize notifications.

use std::cell::RefCell;
use std::path::Path;
use std::rc::Rc;

use skia_safe as skia;

use crate::error::RenderError;
use crate::events::{Callback, Subscribers, Subscription};

/// A finished raster ready to replace the surface contents.
pub(crate) struct Committed {
    pub raster: skia::Surface,
    pub style_height: f32,
}

struct SurfaceState {
    layout_width: f32,
    device_pixel_ratio: f32,
    committed: Option<Committed>,
    commits: u64,
}

struct SurfaceInner {
    state: RefCell<SurfaceState>,
    resize: Subscribers,
}

/// Shared handle to a drawing surface. Clones refer to the same surface.
///
/// The host sets the laid-out width and device pixel ratio; renderers replace the
/// raster wholesale on each successful draw.
#[derive(Clone)]
pub struct SharedSurface {
    inner: Rc<SurfaceInner>,
}

impl Default for SharedSurface {
    fn default() -> Self {
        Self::new()
    }
}

impl SharedSurface {
    /// A surface that has not been laid out yet (width 0, density 1).
    pub fn new() -> Self {
        Self::with_layout(0.0, 1.0)
    }

    pub fn with_layout(width: f32, device_pixel_ratio: f32) -> Self {
        Self {
            inner: Rc::new(SurfaceInner {
                state: RefCell::new(SurfaceState {
                    layout_width: width.max(0.0),
                    device_pixel_ratio: sanitize_dpr(device_pixel_ratio),
                    committed: None,
                    commits: 0,
                }),
                resize: Subscribers::new(),
            }),
        }
    }

    /// Rendered width in logical pixels; 0 before layout.
    pub fn client_width(&self) -> f32 {
        self.inner.state.borrow().layout_width
    }

    /// Device pixel ratio, floored at 1.
    pub fn device_pixel_ratio(&self) -> f32 {
        self.inner.state.borrow().device_pixel_ratio
    }

    /// Host-side layout change. Observers run only when the width actually changes.
    pub fn set_layout_width(&self, width: f32) {
        let width = width.max(0.0);
        let changed = {
            let mut st = self.inner.state.borrow_mut();
            let changed = (st.layout_width - width).abs() > f32::EPSILON;
            st.layout_width = width;
            changed
        };
        if changed {
            self.inner.resize.notify();
        }
    }

    /// Host-side density change (e.g. the window moved to another display).
    pub fn set_device_pixel_ratio(&self, dpr: f32) {
        let dpr = sanitize_dpr(dpr);
        let changed = {
            let mut st = self.inner.state.borrow_mut();
            let changed = (st.device_pixel_ratio - dpr).abs() > f32::EPSILON;
            st.device_pixel_ratio = dpr;
            changed
        };
        if changed {
            self.inner.resize.notify();
        }
    }

    /// Observe size changes until the returned subscription is dropped.
    pub fn observe_resize(&self, callback: Callback) -> Subscription {
        self.inner.resize.subscribe(callback)
    }

    pub fn resize_observer_count(&self) -> usize {
        self.inner.resize.len()
    }

    /// Physical pixel size of the committed raster, if anything was drawn.
    pub fn physical_size(&self) -> Option<(i32, i32)> {
        self.inner.state.borrow().committed.as_ref().map(|c| (c.raster.width(), c.raster.height()))
    }

    /// Logical (styled) height of the committed raster.
    pub fn style_height(&self) -> Option<f32> {
        self.inner.state.borrow().committed.as_ref().map(|c| c.style_height)
    }

    /// Number of successful draws committed to this surface.
    pub fn commit_count(&self) -> u64 {
        self.inner.state.borrow().commits
    }

    pub(crate) fn commit(&self, frame: Committed) {
        let mut st = self.inner.state.borrow_mut();
        st.committed = Some(frame);
        st.commits += 1;
    }

    /// Encode the committed raster as PNG.
    pub fn png_bytes(&self) -> Result<Vec<u8>, RenderError> {
        let mut st = self.inner.state.borrow_mut();
        let committed = st.committed.as_mut().ok_or(RenderError::NothingDrawn)?;
        let image = committed.raster.image_snapshot();
        #[allow(deprecated)]
        let data = image
            .encode_to_data(skia::EncodedImageFormat::PNG)
            .ok_or(RenderError::Encode)?;
        Ok(data.as_bytes().to_vec())
    }

    /// Write the committed raster to `path` as PNG, creating parent directories.
    pub fn write_png(&self, path: impl AsRef<Path>) -> Result<(), RenderError> {
        let bytes = self.png_bytes()?;
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, bytes)?;
        Ok(())
    }

    /// Read back the committed raster as RGBA8: `(pixels, width, height, stride)`.
    pub fn rgba8(&self) -> Result<(Vec<u8>, u32, u32, usize), RenderError> {
        let mut st = self.inner.state.borrow_mut();
        let committed = st.committed.as_mut().ok_or(RenderError::NothingDrawn)?;
        let (w, h) = (committed.raster.width(), committed.raster.height());
        let info = skia::ImageInfo::new((w, h), skia::ColorType::RGBA8888, skia::AlphaType::Unpremul, None);
        let stride = w as usize * 4;
        let mut pixels = vec![0u8; stride * h as usize];
        if !committed.raster.read_pixels(&info, &mut pixels, stride, (0, 0)) {
            return Err(RenderError::ReadPixels);
        }
        Ok((pixels, w as u32, h as u32, stride))
    }
}

fn sanitize_dpr(dpr: f32) -> f32 {
    if dpr.is_finite() { dpr.max(1.0) } else { 1.0 }
}
