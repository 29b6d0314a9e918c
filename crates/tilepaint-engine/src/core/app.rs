use super::ctx::FrameCtx;

/// Control directive returned by app callbacks.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum AppControl {
    Continue,
    Exit,
}

/// Application contract implemented by higher layers.
pub trait App {
    /// Called once per paced frame. The app processes `ctx.input_frame` and
    /// draws the whole frame into `ctx.frame`.
    fn on_frame(&mut self, ctx: &mut FrameCtx<'_>) -> AppControl;
}
