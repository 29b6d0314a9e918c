//! File commands shared by the tool buttons and the keyboard shortcuts.

use std::path::{Path, PathBuf};

use rfd::FileDialog;
use tilepaint_ui::{NodeId, UiScene};

const IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "bmp", "gif", "ico", "tif", "tiff", "webp"];

/// Source of file paths chosen by the user. Calls block until answered;
/// `None` means cancelled.
pub trait FilePicker {
    fn choose_open_path(&mut self) -> Option<PathBuf>;
    fn choose_save_path(&mut self, current: Option<&Path>) -> Option<PathBuf>;
}

/// Native OS dialogs.
#[derive(Debug, Default)]
pub struct NativePicker;

impl FilePicker for NativePicker {
    fn choose_open_path(&mut self) -> Option<PathBuf> {
        FileDialog::new()
            .add_filter("Images", IMAGE_EXTENSIONS)
            .set_title("Open image")
            .pick_file()
    }

    fn choose_save_path(&mut self, current: Option<&Path>) -> Option<PathBuf> {
        let mut dialog = FileDialog::new()
            .add_filter("Images", IMAGE_EXTENSIONS)
            .set_title("Save image as");
        if let Some(name) = current.and_then(Path::file_name) {
            dialog = dialog.set_file_name(name.to_string_lossy());
        }
        if let Some(dir) = current.and_then(Path::parent) {
            dialog = dialog.set_directory(dir);
        }
        dialog.save_file()
    }
}

/// Asks for an image and loads it into `surface`.
pub fn open(ui: &mut UiScene, surface: NodeId, picker: &mut dyn FilePicker) {
    ui.block_hover();
    let Some(path) = picker.choose_open_path() else {
        log::debug!("open cancelled");
        return;
    };
    open_path(ui, surface, &path);
}

/// Loads `path` into `surface`; failures are logged and leave it unchanged.
pub fn open_path(ui: &mut UiScene, surface: NodeId, path: &Path) {
    let Some(s) = ui.surface_mut(surface) else {
        return;
    };
    if let Err(e) = s.open(path) {
        log::warn!("open failed: {e}");
    }
}

/// Writes the image back to its file; falls through to save-as when it has none.
pub fn save(ui: &mut UiScene, surface: NodeId, picker: &mut dyn FilePicker) {
    let Some(s) = ui.surface(surface) else {
        return;
    };
    if !s.has_image() {
        log::debug!("save: no image loaded");
        return;
    }
    if s.path().is_none() {
        save_as(ui, surface, picker);
        return;
    }
    if let Err(e) = s.save() {
        log::error!("save failed: {e}");
    }
}

/// Asks for a destination, writes the image there and reopens it from it.
pub fn save_as(ui: &mut UiScene, surface: NodeId, picker: &mut dyn FilePicker) {
    if !ui.surface(surface).is_some_and(|s| s.has_image()) {
        log::debug!("save as: no image loaded");
        return;
    }
    ui.block_hover();
    let current = ui.surface(surface).and_then(|s| s.path().map(Path::to_path_buf));
    let Some(path) = picker.choose_save_path(current.as_deref()) else {
        log::debug!("save as cancelled");
        return;
    };
    if let Some(s) = ui.surface_mut(surface) {
        if let Err(e) = s.save_as(&path) {
            log::error!("save as failed: {e}");
        }
    }
}
