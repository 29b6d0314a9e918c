//! Time subsystem.
//!
//! One `FrameClock` per window; `tick()` once per presented frame.

mod frame_clock;

pub use frame_clock::{FrameClock, FrameTime};
