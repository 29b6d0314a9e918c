use std::path::PathBuf;

use tilepaint_ui::UiScene;

/// Loads the first usable font from `paths` into `ui`.
///
/// Without one the editor still runs; labels are simply not drawn.
pub fn load_ui_font(ui: &mut UiScene, paths: &[PathBuf]) -> bool {
    for path in paths {
        let Ok(bytes) = std::fs::read(path) else {
            continue;
        };
        match ui.load_font(&bytes) {
            Ok(_) => {
                log::info!("ui font: {}", path.display());
                return true;
            }
            Err(e) => log::warn!("skipping {}: {e}", path.display()),
        }
    }
    log::warn!("no usable font found; text will not be drawn");
    false
}

#[cfg(test)]
mod tests {
    use super::*;
    use tilepaint_ui::prelude::Vec2;

    #[test]
    fn missing_and_broken_fonts_are_skipped() {
        let broken = std::env::temp_dir().join(format!("tilepaint-font-{}.ttf", std::process::id()));
        std::fs::write(&broken, b"not a font").unwrap();

        let mut ui = UiScene::new(Vec2::new(10.0, 10.0));
        let loaded = load_ui_font(&mut ui, &[PathBuf::from("/nonexistent/font.ttf"), broken.clone()]);
        let _ = std::fs::remove_file(&broken);

        assert!(!loaded);
        assert!(!ui.has_font());
    }
}
