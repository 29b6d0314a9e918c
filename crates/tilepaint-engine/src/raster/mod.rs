//! CPU raster target.
//!
//! Everything the application draws lands in a [`PixelBuffer`]; the window
//! runtime converts the finished frame into the presentation surface format.

mod buffer;
mod color;

pub use buffer::PixelBuffer;
pub use color::Rgba;
