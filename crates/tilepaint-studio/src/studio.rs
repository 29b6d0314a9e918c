use tilepaint_canvas::SharedBrush;
use tilepaint_engine::core::{App, AppControl, FrameCtx};
use tilepaint_engine::input::{InputFrame, InputState};
use tilepaint_ui::prelude::Vec2;
use tilepaint_ui::UiScene;

use crate::commands::{self, FilePicker};
use crate::config::StudioConfig;
use crate::fonts::load_ui_font;
use crate::layout::{events, EditorLayout};
use crate::shortcuts::{self, Shortcut};

/// The editor: scene, shared brush and file picker behind the engine's
/// [`App`] contract.
pub struct Studio<P: FilePicker> {
    ui: UiScene,
    layout: EditorLayout,
    brush: SharedBrush,
    picker: P,

    title: String,
    shown_title: String,
    size: Vec2,
}

impl<P: FilePicker> Studio<P> {
    pub fn new(config: &StudioConfig, picker: P) -> Self {
        let size = Vec2::new(config.width as f32, config.height as f32);
        let brush = config.brush().shared();
        let mut ui = UiScene::new(size);
        load_ui_font(&mut ui, &config.font_paths);
        let layout = EditorLayout::build(&mut ui, &brush, size);

        if let Some(path) = &config.initial_image {
            commands::open_path(&mut ui, layout.surface, path);
        }

        Self {
            ui,
            layout,
            brush,
            picker,
            title: config.title.clone(),
            shown_title: config.title.clone(),
            size,
        }
    }

    /// Window title: the app name followed by the open file's name.
    pub fn window_title(&self) -> String {
        let file = self
            .ui
            .surface(self.layout.surface)
            .and_then(|s| s.path())
            .and_then(|p| p.file_name())
            .map(|n| n.to_string_lossy().into_owned());
        match file {
            Some(name) => format!("{name} - {}", self.title),
            None => self.title.clone(),
        }
    }

    /// One frame of editor logic for a window of logical `size`.
    pub fn update(&mut self, input: &InputState, frame: &InputFrame, size: Vec2) -> AppControl {
        if size != self.size {
            self.size = size;
            self.layout.relayout(&mut self.ui, size);
        }

        for shortcut in shortcuts::collect(frame) {
            if self.run_shortcut(shortcut) == AppControl::Exit {
                return AppControl::Exit;
            }
        }

        self.ui.handle_input(input, frame);
        for event in self.ui.take_events() {
            self.handle_event(&event);
        }
        AppControl::Continue
    }

    fn run_shortcut(&mut self, shortcut: Shortcut) -> AppControl {
        log::debug!("shortcut {shortcut:?}");
        let surface = self.layout.surface;
        match shortcut {
            Shortcut::Open => commands::open(&mut self.ui, surface, &mut self.picker),
            Shortcut::Save => commands::save(&mut self.ui, surface, &mut self.picker),
            Shortcut::SaveAs => commands::save_as(&mut self.ui, surface, &mut self.picker),
            Shortcut::Exit => return AppControl::Exit,
        }
        AppControl::Continue
    }

    fn handle_event(&mut self, event: &str) {
        let surface = self.layout.surface;
        match event {
            events::OPEN => commands::open(&mut self.ui, surface, &mut self.picker),
            events::SAVE => commands::save(&mut self.ui, surface, &mut self.picker),
            events::SAVE_AS => commands::save_as(&mut self.ui, surface, &mut self.picker),
            events::ZOOM_IN | events::ZOOM_OUT => {
                let direction = if event == events::ZOOM_IN { 1.0 } else { -1.0 };
                let size = self.ui.rect(surface).map(|r| r.size).unwrap_or_default();
                if let Some(s) = self.ui.surface_mut(surface) {
                    s.step_zoom(direction, size);
                }
            }
            events::COLOR_PICKED => self.layout.sync_channels(&mut self.ui, &self.brush),
            other => log::warn!("unhandled ui event '{other}'"),
        }
    }
}

impl<P: FilePicker + 'static> App for Studio<P> {
    fn on_frame(&mut self, ctx: &mut FrameCtx<'_>) -> AppControl {
        let control = self.update(ctx.input, ctx.input_frame, ctx.frame_size());
        self.ui.render(ctx.frame);

        let title = self.window_title();
        if title != self.shown_title {
            ctx.runtime.set_title(title.clone());
            self.shown_title = title;
        }
        control
    }
}
