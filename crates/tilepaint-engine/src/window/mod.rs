//! Window + runtime loop.
//!
//! Owns the `winit` EventLoop and Window and presents the software frame.

mod runtime;

pub use runtime::{Runtime, RuntimeConfig, RuntimeCtx};
