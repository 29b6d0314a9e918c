use std::cell::RefCell;
use std::rc::Rc;

use tilepaint_engine::raster::Rgba;

/// Stamp algorithm applied at each stroke sample.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Default)]
pub enum BrushShape {
    /// One pixel, full overwrite. Ignores the radius.
    #[default]
    Point,
    /// Disc footprint, alpha fading linearly to zero at the radius.
    SoftRound,
    /// Disc footprint, full overwrite.
    HardRound,
}

impl BrushShape {
    /// Caption used on the shape buttons.
    pub fn label(self) -> &'static str {
        match self {
            BrushShape::Point => "Pixel",
            BrushShape::SoftRound => "Brush",
            BrushShape::HardRound => "Circle",
        }
    }
}

/// Current painting tool settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Brush {
    pub shape: BrushShape,
    pub color: Rgba,
    radius: u32,
}

/// One brush shared by the tool controls and the paint surface.
pub type SharedBrush = Rc<RefCell<Brush>>;

impl Brush {
    pub const DEFAULT_COLOR: Rgba = Rgba::rgb(255, 0, 255);
    pub const DEFAULT_RADIUS: u32 = 5;

    /// Brush with `radius` clamped to at least 1.
    pub fn new(shape: BrushShape, color: Rgba, radius: u32) -> Self {
        Self { shape, color, radius: radius.max(1) }
    }

    pub fn shared(self) -> SharedBrush {
        Rc::new(RefCell::new(self))
    }

    #[inline]
    pub fn radius(&self) -> u32 {
        self.radius
    }

    pub fn set_radius(&mut self, radius: u32) {
        self.radius = radius.max(1);
    }

    pub fn increase_size(&mut self) {
        self.radius = self.radius.saturating_add(1);
    }

    /// Shrinks the radius by one, stopping at 1.
    pub fn decrease_size(&mut self) {
        self.radius = self.radius.saturating_sub(1).max(1);
    }

    /// Sets one color channel: 0 = red, 1 = green, 2 = blue, 3 = alpha.
    /// Other indices are ignored.
    pub fn set_channel(&mut self, channel: usize, value: u8) {
        match channel {
            0 => self.color.r = value,
            1 => self.color.g = value,
            2 => self.color.b = value,
            3 => self.color.a = value,
            _ => {}
        }
    }
}

impl Default for Brush {
    fn default() -> Self {
        Self::new(BrushShape::Point, Self::DEFAULT_COLOR, Self::DEFAULT_RADIUS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let brush = Brush::default();
        assert_eq!(brush.shape, BrushShape::Point);
        assert_eq!(brush.color, Rgba::new(255, 0, 255, 255));
        assert_eq!(brush.radius(), 5);
    }

    #[test]
    fn three_up_five_down_lands_on_three() {
        let mut brush = Brush::default();
        for _ in 0..3 {
            brush.increase_size();
        }
        for _ in 0..5 {
            brush.decrease_size();
        }
        assert_eq!(brush.radius(), 3);
    }

    #[test]
    fn radius_never_below_one() {
        let mut brush = Brush::new(BrushShape::HardRound, Rgba::BLACK, 0);
        assert_eq!(brush.radius(), 1);
        brush.decrease_size();
        assert_eq!(brush.radius(), 1);
        brush.set_radius(0);
        assert_eq!(brush.radius(), 1);
    }

    #[test]
    fn set_channel_writes_one_component() {
        let mut brush = Brush::default();
        brush.set_channel(1, 128);
        brush.set_channel(7, 1);
        assert_eq!(brush.color, Rgba::new(255, 128, 255, 255));
    }

    #[test]
    fn shared_brush_is_seen_by_every_holder() {
        let brush = Brush::default().shared();
        let other = SharedBrush::clone(&brush);
        other.borrow_mut().shape = BrushShape::SoftRound;
        assert_eq!(brush.borrow().shape, BrushShape::SoftRound);
    }
}
