use std::cell::RefCell;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use tilepaint_canvas::{
    interpolate, load_image, save_image, stamp, ImageIoError, PixelBuffer, Rgba, SharedBrush,
    TileView,
};
use tilepaint_engine::coords::{Rect, Vec2};

/// Read-only snapshot of a surface for status-line text.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct SurfaceStatus {
    pub image_loaded: bool,
    /// Buffer pixel under the cursor, when shown.
    pub pointer: Option<(u32, u32)>,
    pub zoom: f32,
}

impl Default for SurfaceStatus {
    fn default() -> Self {
        Self { image_loaded: false, pointer: None, zoom: 1.0 }
    }
}

impl SurfaceStatus {
    /// `Mouse position: (x, y)`, `No image loaded`, or empty while the
    /// cursor is elsewhere.
    pub fn coords_text(&self) -> String {
        if !self.image_loaded {
            return "No image loaded".to_string();
        }
        match self.pointer {
            Some((x, y)) => format!("Mouse position: ({x}, {y})"),
            None => String::new(),
        }
    }

    pub fn zoom_text(&self) -> String {
        format!("Zoom: {}%", (self.zoom * 100.0).round() as i32)
    }
}

/// Shared handle to a surface's status, read by computed text nodes.
pub type StatusHandle = Rc<RefCell<SurfaceStatus>>;

/// The tiled paint area: one image buffer viewed through a [`TileView`].
///
/// All positions passed in are local to the surface's rect.
pub struct PaintSurface {
    brush: SharedBrush,
    image: Option<PixelBuffer>,
    path: Option<PathBuf>,
    view: TileView,
    pub(crate) stroke_active: bool,
    pub(crate) panning: bool,
    status: StatusHandle,
}

impl PaintSurface {
    pub fn new(brush: SharedBrush) -> Self {
        Self {
            brush,
            image: None,
            path: None,
            view: TileView::default(),
            stroke_active: false,
            panning: false,
            status: Rc::new(RefCell::new(SurfaceStatus::default())),
        }
    }

    // ── state ─────────────────────────────────────────────────────────────

    #[inline]
    pub fn has_image(&self) -> bool {
        self.image.is_some()
    }

    #[inline]
    pub fn image(&self) -> Option<&PixelBuffer> {
        self.image.as_ref()
    }

    #[inline]
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    #[inline]
    pub fn view(&self) -> &TileView {
        &self.view
    }

    pub fn status(&self) -> StatusHandle {
        Rc::clone(&self.status)
    }

    fn dims(&self) -> Option<(u32, u32)> {
        self.image.as_ref().map(PixelBuffer::size)
    }

    /// Replaces the image and its source path.
    pub fn set_image(&mut self, image: PixelBuffer, path: Option<PathBuf>) {
        self.view.normalize(image.size());
        self.image = Some(image);
        self.path = path;
        self.stroke_active = false;
        self.status.borrow_mut().image_loaded = true;
    }

    // ── file operations ───────────────────────────────────────────────────

    /// Loads `path`. On failure the current image is kept.
    pub fn open(&mut self, path: &Path) -> Result<(), ImageIoError> {
        let image = load_image(path)?;
        self.set_image(image, Some(path.to_path_buf()));
        Ok(())
    }

    /// Writes the image back to where it came from. No-op without an image or path.
    pub fn save(&self) -> Result<(), ImageIoError> {
        match (&self.image, &self.path) {
            (Some(image), Some(path)) => save_image(image, path),
            _ => Ok(()),
        }
    }

    /// Writes the image to `path`, then reloads it from there so the buffer
    /// reflects what the format stored. No-op without an image.
    pub fn save_as(&mut self, path: &Path) -> Result<(), ImageIoError> {
        let Some(image) = &self.image else {
            return Ok(());
        };
        save_image(image, path)?;
        self.open(path)
    }

    // ── painting ──────────────────────────────────────────────────────────

    /// Stamps the brush once at `local`.
    pub fn paint_at(&mut self, local: Vec2) {
        let brush = self.brush.borrow();
        let Some(image) = self.image.as_mut() else {
            return;
        };
        let (x, y) = self.view.pixel_at(local, image.size());
        stamp(image, (x as i64, y as i64), &brush);
    }

    /// Paints the motion that ended at `local` after moving by `delta`.
    ///
    /// Stamps are spaced one buffer pixel apart, i.e. `zoom` screen pixels.
    pub fn stroke_to(&mut self, local: Vec2, delta: Vec2) {
        if self.image.is_none() {
            return;
        }
        for point in interpolate(local - delta, local, self.view.zoom()) {
            self.paint_at(point);
        }
    }

    /// Copies the pixel under `local` into the brush color.
    pub fn pick_color(&mut self, local: Vec2) -> Option<Rgba> {
        let image = self.image.as_ref()?;
        let (x, y) = self.view.pixel_at(local, image.size());
        let color = image.get(x, y)?;
        self.brush.borrow_mut().color = color;
        Some(color)
    }

    // ── view ──────────────────────────────────────────────────────────────

    /// One wheel step anchored at `local`; `direction` is +1 to zoom in.
    pub fn zoom_wheel(&mut self, local: Vec2, direction: f32) {
        let dims = self.dims();
        self.view.zoom_at(local, direction, dims);
        self.status.borrow_mut().zoom = self.view.zoom();
    }

    /// Button zoom anchored at the centre of a surface of `size`.
    pub fn step_zoom(&mut self, direction: f32, size: Vec2) {
        let dims = self.dims();
        self.view.step_zoom(direction, size / 2.0, dims);
        self.status.borrow_mut().zoom = self.view.zoom();
    }

    pub fn pan(&mut self, delta: Vec2) {
        let dims = self.dims();
        self.view.pan(delta, dims);
    }

    /// Refreshes the shared status for a cursor at `local`.
    pub(crate) fn refresh_status(&self, local: Vec2, inside: bool) {
        let pointer = match &self.image {
            Some(image) if inside || self.stroke_active => Some(self.view.pixel_at(local, image.size())),
            _ => None,
        };
        let mut status = self.status.borrow_mut();
        status.image_loaded = self.image.is_some();
        status.pointer = pointer;
        status.zoom = self.view.zoom();
    }

    /// Draws the tiled image into `region` of `target`.
    pub(crate) fn composite(&self, target: &mut PixelBuffer, region: Rect) {
        if let Some(image) = &self.image {
            self.view.composite(image, target, region);
        }
    }
}
