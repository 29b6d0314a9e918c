//! Tilepaint canvas crate.
//!
//! The toroidal paint engine (wraparound addressing, brush stamps, stroke
//! interpolation, blending), the tiling view transform, and image file I/O.
//! Everything here works on a [`PixelBuffer`] and is independent of the UI.

mod blend;
mod brush;
mod io;
mod stamp;
mod stroke;
mod view;
mod wrap;

pub use blend::rms_blend;
pub use brush::{Brush, BrushShape, SharedBrush};
pub use io::{load_image, save_image, ImageIoError};
pub use stamp::stamp;
pub use stroke::interpolate;
pub use view::{TileView, MAX_ZOOM, MIN_ZOOM, ZOOM_STEP};
pub use wrap::{wrap, wrap_point};

pub use tilepaint_engine::raster::{PixelBuffer, Rgba};
