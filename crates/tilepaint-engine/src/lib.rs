//! Tilepaint engine crate.
//!
//! Platform runtime, input, frame pacing and the CPU raster target used by
//! the canvas and UI layers.

pub mod core;
pub mod input;
pub mod logging;
pub mod time;
pub mod window;

pub mod coords;
pub mod raster;
pub mod text;
