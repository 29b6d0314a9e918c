use crate::coords::Vec2;
use crate::input::{InputFrame, InputState};
use crate::raster::PixelBuffer;
use crate::window::RuntimeCtx;

/// Per-frame context passed to `core::App::on_frame`.
///
/// `frame` is sized to the logical window size; the runtime scales it to
/// physical pixels when presenting.
pub struct FrameCtx<'a> {
    pub frame: &'a mut PixelBuffer,
    pub input: &'a InputState,
    pub input_frame: &'a InputFrame,
    pub runtime: &'a mut RuntimeCtx,
}

impl FrameCtx<'_> {
    /// Logical size of the frame buffer.
    pub fn frame_size(&self) -> Vec2 {
        Vec2::new(self.frame.width() as f32, self.frame.height() as f32)
    }
}
