use std::path::PathBuf;

use tilepaint_canvas::{Brush, BrushShape, Rgba};
use tilepaint_engine::logging::LoggingConfig;
use tilepaint_engine::window::RuntimeConfig;

/// Font files tried in order; the first readable one becomes the UI font.
const FONT_CANDIDATES: &[&str] = &[
    "/usr/share/fonts/TTF/DejaVuSans.ttf",
    "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/noto/NotoSans-Regular.ttf",
    "/usr/share/fonts/truetype/noto/NotoSans-Regular.ttf",
    "/System/Library/Fonts/Supplemental/Arial.ttf",
    "C:\\Windows\\Fonts\\arial.ttf",
];

/// Everything the editor reads at startup.
#[derive(Debug, Clone)]
pub struct StudioConfig {
    pub title: String,
    /// Logical window size.
    pub width: u32,
    pub height: u32,
    pub target_fps: u32,

    pub brush_shape: BrushShape,
    pub brush_color: Rgba,
    pub brush_radius: u32,

    pub font_paths: Vec<PathBuf>,
    /// Image opened at startup, if any.
    pub initial_image: Option<PathBuf>,

    pub logging: LoggingConfig,
}

impl Default for StudioConfig {
    fn default() -> Self {
        Self {
            title: "tilepaint".to_string(),
            width: 640,
            height: 360,
            target_fps: 60,
            brush_shape: BrushShape::Point,
            brush_color: Brush::DEFAULT_COLOR,
            brush_radius: Brush::DEFAULT_RADIUS,
            font_paths: FONT_CANDIDATES.iter().map(PathBuf::from).collect(),
            initial_image: None,
            logging: LoggingConfig::default(),
        }
    }
}

impl StudioConfig {
    /// Defaults, with the first command-line argument as the image to open.
    pub fn from_args(mut args: impl Iterator<Item = String>) -> Self {
        Self {
            initial_image: args.nth(1).map(PathBuf::from),
            ..Self::default()
        }
    }

    pub fn runtime(&self) -> RuntimeConfig {
        RuntimeConfig {
            title: self.title.clone(),
            initial_size: (self.width, self.height),
            target_fps: self.target_fps,
        }
    }

    pub fn brush(&self) -> Brush {
        Brush::new(self.brush_shape, self.brush_color, self.brush_radius)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_editor() {
        let cfg = StudioConfig::default();
        assert_eq!((cfg.width, cfg.height), (640, 360));
        assert_eq!(cfg.brush(), Brush::default());
        assert_eq!(cfg.runtime().initial_size, (640, 360));
        assert!(!cfg.font_paths.is_empty());
    }

    #[test]
    fn first_argument_is_initial_image() {
        let args = ["tilepaint", "tile.png", "ignored"].map(String::from);
        let cfg = StudioConfig::from_args(args.into_iter());
        assert_eq!(cfg.initial_image, Some(PathBuf::from("tile.png")));
        assert_eq!(StudioConfig::from_args(std::iter::once("tilepaint".to_string())).initial_image, None);
    }
}
