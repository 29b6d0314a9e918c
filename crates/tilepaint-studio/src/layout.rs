//! Scene assembly for the editor window and its resize handling.

use tilepaint_canvas::{BrushShape, SharedBrush};
use tilepaint_ui::prelude::*;

/// Height of the status bar along the bottom edge.
pub const STATUS_BAR_HEIGHT: f32 = 15.0;
const SMALL_TEXT: f32 = 11.0;

/// Named button events handled by the studio.
pub mod events {
    pub const OPEN: &str = "open";
    pub const SAVE: &str = "save";
    pub const SAVE_AS: &str = "save_as";
    pub const ZOOM_IN: &str = "zoom_in";
    pub const ZOOM_OUT: &str = "zoom_out";
    /// Emitted by the scene after a middle-click color pick.
    pub const COLOR_PICKED: &str = "color_picked";
}

/// Handles to the nodes the studio touches after assembly.
#[derive(Debug, Clone)]
pub struct EditorLayout {
    pub surface: NodeId,
    pub status_bar: NodeId,
    pub zoom_out: NodeId,
    pub zoom_in: NodeId,
    pub zoom_label: NodeId,
    pub tools_toggle: NodeId,
    pub tools: NodeId,
    /// Red, green and blue channel sliders.
    pub channels: [NodeId; 3],
}

impl EditorLayout {
    /// Builds the editor scene into `ui` for a window of `size`.
    pub fn build(ui: &mut UiScene, brush: &SharedBrush, size: Vec2) -> Self {
        let root = ui.root();
        let style = Style::default();
        let small = style.small_button();

        let surface = ui.add_child(root, Rect::default(), PaintSurface::new(SharedBrush::clone(brush)));
        let status = ui.surface(surface).map(|s| s.status()).unwrap_or_default();

        // ── status bar ────────────────────────────────────────────────────
        let status_bar = ui.add_child(root, Rect::default(), Container::fixed());
        let coords = StatusHandle::clone(&status);
        ui.add_child(
            status_bar,
            Rect::new(3.0, 1.0, 200.0, SMALL_TEXT),
            Text::computed(move || coords.borrow().coords_text(), SMALL_TEXT, Rgba::WHITE),
        );
        let zoom_label = ui.add_child(
            status_bar,
            Rect::default(),
            Text::computed(move || status.borrow().zoom_text(), SMALL_TEXT, Rgba::WHITE),
        );
        let zoom_out = ui.add_child(status_bar, Rect::default(), Button::emit("-", events::ZOOM_OUT).style(small.clone()));
        let zoom_in = ui.add_child(status_bar, Rect::default(), Button::emit("+", events::ZOOM_IN).style(small.clone()));

        // ── tools panel ───────────────────────────────────────────────────
        let tools = ui.add_child(root, Rect::new(10.0, 30.0, 170.0, 160.0), Container::panel().caption("Tools"));
        let tools_toggle = ui.add_child(status_bar, Rect::default(), Button::toggle("Tools", tools).style(small));

        ui.add_child(tools, Rect::new(5.0, 5.0, 42.0, 20.0), Button::emit("Open", events::OPEN));
        ui.add_child(tools, Rect::new(50.0, 5.0, 42.0, 20.0), Button::emit("Save", events::SAVE));
        ui.add_child(tools, Rect::new(95.0, 5.0, 70.0, 20.0), Button::emit("Save As", events::SAVE_AS));

        let shapes = [
            (BrushShape::Point, Rect::new(5.0, 30.0, 42.0, 20.0)),
            (BrushShape::SoftRound, Rect::new(50.0, 30.0, 48.0, 20.0)),
            (BrushShape::HardRound, Rect::new(101.0, 30.0, 54.0, 20.0)),
        ];
        for (shape, rect) in shapes {
            let brush = SharedBrush::clone(brush);
            ui.add_child(tools, rect, Button::on_press(shape.label(), move || brush.borrow_mut().shape = shape));
        }

        let shrink = SharedBrush::clone(brush);
        ui.add_child(tools, Rect::new(5.0, 55.0, 20.0, 20.0), Button::on_press("-", move || shrink.borrow_mut().decrease_size()));
        let size_of = SharedBrush::clone(brush);
        ui.add_child(
            tools,
            Rect::new(30.0, 58.0, 50.0, 13.0),
            Text::computed(move || format!("Size: {}", size_of.borrow().radius()), 13.0, Rgba::WHITE),
        );
        let grow = SharedBrush::clone(brush);
        ui.add_child(tools, Rect::new(85.0, 55.0, 20.0, 20.0), Button::on_press("+", move || grow.borrow_mut().increase_size()));

        let color = brush.borrow().color;
        let channel_colors = [Rgba::rgb(255, 0, 0), Rgba::rgb(0, 255, 0), Rgba::rgb(0, 0, 255)];
        let initial = [color.r, color.g, color.b];
        let mut channels = Vec::with_capacity(3);
        for (i, caption) in ["R", "G", "B"].into_iter().enumerate() {
            let x = 10.0 + 30.0 * i as f32;
            let target = SharedBrush::clone(brush);
            let slider = Slider::new(0.0, 255.0)
                .color(channel_colors[i])
                .value(f32::from(initial[i]))
                .on_change(move |v| target.borrow_mut().set_channel(i, v.round() as u8));
            channels.push(ui.add_child(tools, Rect::new(x, 80.0, Slider::WIDTH, Slider::HEIGHT), slider));
            ui.add_child(tools, Rect::new(x + 2.0, 142.0, 10.0, SMALL_TEXT), Text::new(caption, SMALL_TEXT, Rgba::WHITE));
        }

        let layout = Self {
            surface,
            status_bar,
            zoom_out,
            zoom_in,
            zoom_label,
            tools_toggle,
            tools,
            channels: [channels[0], channels[1], channels[2]],
        };
        layout.relayout(ui, size);
        layout
    }

    /// Re-positions everything that depends on the window size.
    pub fn relayout(&self, ui: &mut UiScene, size: Vec2) {
        let (w, h) = (size.x, size.y);
        ui.set_rect(ui.root(), Rect::new(0.0, 0.0, w, h));
        ui.set_rect(self.surface, Rect::new(0.0, 0.0, w, (h - STATUS_BAR_HEIGHT).max(0.0)));
        ui.set_rect(self.status_bar, Rect::new(0.0, h - STATUS_BAR_HEIGHT, w, STATUS_BAR_HEIGHT));

        // Right-aligned controls, right to left.
        ui.set_rect(self.tools_toggle, Rect::new(w - 45.0, 0.0, 42.0, STATUS_BAR_HEIGHT));
        ui.set_rect(self.zoom_in, Rect::new(w - 65.0, 0.0, 15.0, STATUS_BAR_HEIGHT));
        ui.set_rect(self.zoom_out, Rect::new(w - 82.0, 0.0, 15.0, STATUS_BAR_HEIGHT));
        ui.set_rect(self.zoom_label, Rect::new(w - 150.0, 1.0, 65.0, SMALL_TEXT));

        ui.clamp_to_parent(self.tools);
        log::debug!("layout for {w}x{h}");
    }

    /// Moves the channel sliders to the brush's current color without
    /// triggering their change handlers.
    pub fn sync_channels(&self, ui: &mut UiScene, brush: &SharedBrush) {
        let color = brush.borrow().color;
        for (id, value) in self.channels.iter().zip([color.r, color.g, color.b]) {
            if let Some(slider) = ui.slider_mut(*id) {
                slider.set_value(f32::from(value));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tilepaint_canvas::Brush;

    fn editor() -> (UiScene, EditorLayout, SharedBrush) {
        let mut ui = UiScene::new(Vec2::new(640.0, 360.0));
        let brush = Brush::default().shared();
        let layout = EditorLayout::build(&mut ui, &brush, Vec2::new(640.0, 360.0));
        (ui, layout, brush)
    }

    #[test]
    fn surface_fills_area_above_status_bar() {
        let (ui, layout, _) = editor();
        assert_eq!(ui.rect(layout.surface), Some(Rect::new(0.0, 0.0, 640.0, 345.0)));
        assert_eq!(ui.rect(layout.status_bar), Some(Rect::new(0.0, 345.0, 640.0, 15.0)));
        assert_eq!(ui.global_position(layout.tools_toggle), Vec2::new(595.0, 345.0));
    }

    #[test]
    fn relayout_tracks_window_size() {
        let (mut ui, layout, _) = editor();
        layout.relayout(&mut ui, Vec2::new(800.0, 600.0));
        assert_eq!(ui.rect(layout.surface), Some(Rect::new(0.0, 0.0, 800.0, 585.0)));
        assert_eq!(ui.global_position(layout.zoom_in), Vec2::new(735.0, 585.0));
        assert_eq!(ui.rect(ui.root()), Some(Rect::new(0.0, 0.0, 800.0, 600.0)));
    }

    #[test]
    fn shrinking_window_pulls_tools_back() {
        let (mut ui, layout, _) = editor();
        ui.set_rect(layout.tools, Rect::new(500.0, 300.0, 170.0, 160.0));
        layout.relayout(&mut ui, Vec2::new(320.0, 200.0));
        assert_eq!(ui.rect(layout.tools).map(|r| r.origin), Some(Vec2::new(150.0, 200.0)));
    }

    #[test]
    fn sliders_start_at_brush_color_and_sync_back() {
        let (mut ui, layout, brush) = editor();
        let values: Vec<f32> = layout.channels.iter().map(|id| ui.slider(*id).unwrap().get_value()).collect();
        assert_eq!(values, vec![255.0, 0.0, 255.0]);

        brush.borrow_mut().color = Rgba::rgb(0, 51, 255);
        layout.sync_channels(&mut ui, &brush);
        assert_eq!(ui.slider(layout.channels[1]).unwrap().get_value().round(), 51.0);
        // Syncing does not write back through the change handlers.
        assert_eq!(brush.borrow().color, Rgba::rgb(0, 51, 255));
    }
}
