// File: crates/dashplot-core/src/error.rs
// Summary: Rendering errors.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("failed to create a {width}x{height} raster surface")]
    SurfaceAllocation { width: i32, height: i32 },
    #[error("PNG encoding failed")]
    Encode,
    #[error("reading back surface pixels failed")]
    ReadPixels,
    #[error("surface has no committed drawing yet")]
    NothingDrawn,
    #[error("value formatter failed for slice {index}: {message}")]
    ValueFormat { index: usize, message: String },
    #[error(transparent)]
    Io(#[from] std::io::Error),
}
