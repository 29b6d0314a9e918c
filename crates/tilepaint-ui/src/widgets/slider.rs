use tilepaint_engine::coords::Vec2;
use tilepaint_engine::raster::Rgba;

/// Vertical slider mapping the handle position to `[min, max]`; top is `max`.
///
/// While held, the cursor's vertical offset in the track sets the value.
pub struct Slider {
    pub(crate) min: f32,
    pub(crate) max: f32,
    pub(crate) color: Rgba,
    pub(crate) percentage: f32,
    pub(crate) held: bool,
    on_change: Option<Box<dyn FnMut(f32)>>,
}

impl Slider {
    pub const WIDTH: f32 = 12.0;
    pub const HEIGHT: f32 = 60.0;
    /// Height of the draggable handle; the track is inset by half of it.
    pub const HANDLE: f32 = 6.0;

    pub fn new(min: f32, max: f32) -> Self {
        Self { min, max, color: Rgba::BLACK, percentage: 0.0, held: false, on_change: None }
    }

    /// Fill color of the track below the handle.
    pub fn color(mut self, color: Rgba) -> Self {
        self.color = color;
        self
    }

    /// Initial value, clamped into range.
    pub fn value(mut self, v: f32) -> Self {
        self.set_value(v);
        self
    }

    /// Called with the new value whenever the user moves the handle.
    pub fn on_change(mut self, f: impl FnMut(f32) + 'static) -> Self {
        self.on_change = Some(Box::new(f));
        self
    }

    #[inline]
    pub fn percentage(&self) -> f32 {
        self.percentage
    }

    #[inline]
    pub fn is_held(&self) -> bool {
        self.held
    }

    pub fn get_value(&self) -> f32 {
        self.min + self.percentage * (self.max - self.min)
    }

    /// Moves the handle without notifying `on_change`.
    pub fn set_value(&mut self, v: f32) {
        let span = self.max - self.min;
        self.percentage = if span.abs() < f32::EPSILON {
            0.0
        } else {
            ((v - self.min) / span).clamp(0.0, 1.0)
        };
    }

    /// Sets the handle from a cursor at `local_y` within a track of `height`
    /// and notifies `on_change`.
    pub(crate) fn drag_to(&mut self, local_y: f32, height: f32) {
        let travel = (height - Self::HANDLE).max(1.0);
        let pct = 1.0 - (local_y - Self::HANDLE / 2.0) / travel;
        self.percentage = pct.max(0.0).min(1.0);
        let value = self.get_value();
        if let Some(f) = &mut self.on_change {
            f(value);
        }
    }
}
