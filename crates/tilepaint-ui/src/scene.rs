use slotmap::SlotMap;

use tilepaint_engine::coords::{Rect, Vec2};
use tilepaint_engine::raster::{PixelBuffer, Rgba};
use tilepaint_engine::text::{FontId, FontLoadError, FontSystem};

use crate::painter::Painter;
use crate::widget::{Node, NodeId, NodeKind};
use crate::widgets::button::Button;
use crate::widgets::container::Container;
use crate::widgets::slider::Slider;
use crate::widgets::surface::PaintSurface;

// ── UiScene ───────────────────────────────────────────────────────────────

/// Retained scene graph: an arena of nodes under one fixed root container.
///
/// Nodes are created once with [`add_child`](Self::add_child) and then
/// mutated in place. Input goes through [`handle_input`](Self::handle_input)
/// once per frame and [`render`](Self::render) draws the whole tree into
/// the frame buffer.
///
/// # Example
///
/// ```rust,ignore
/// let mut ui = UiScene::new(Vec2::new(640.0, 360.0));
/// ui.load_font(&bytes)?;
/// let tools = ui.add_child(ui.root(), Rect::new(20.0, 40.0, 120.0, 90.0), Container::panel().caption("Tools"));
/// ui.add_child(tools, Rect::new(5.0, 5.0, 50.0, 20.0), Button::emit("Open", "open"));
///
/// // every frame:
/// ui.handle_input(ctx.input, ctx.input_frame);
/// for event in ui.take_events() { /* ... */ }
/// ui.render(ctx.frame);
/// ```
pub struct UiScene {
    pub(crate) nodes: SlotMap<NodeId, Node>,
    root: NodeId,

    /// Pointer position in logical pixels as of the last input frame.
    pub(crate) cursor: Vec2,
    pub(crate) pointer_inside: bool,
    /// Set by [`block_hover`](Self::block_hover); skips the next hover pass.
    pub(crate) hover_blocked: bool,
    /// Wheel motion not yet worth a whole zoom step.
    pub(crate) wheel_notches: f32,
    pub(crate) events: Vec<String>,

    font_system: FontSystem,
    font: Option<FontId>,
}

impl UiScene {
    /// Empty scene whose root covers `size`.
    pub fn new(size: Vec2) -> Self {
        let mut nodes = SlotMap::with_key();
        let root = nodes.insert(Node::new(
            Rect::new(0.0, 0.0, size.x, size.y),
            None,
            NodeKind::Container(Container::fixed()),
        ));
        Self {
            nodes,
            root,
            cursor: Vec2::zero(),
            pointer_inside: false,
            hover_blocked: false,
            wheel_notches: 0.0,
            events: Vec::new(),
            font_system: FontSystem::new(),
            font: None,
        }
    }

    #[inline]
    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Loads a font; the first one loaded becomes the UI font.
    pub fn load_font(&mut self, bytes: &[u8]) -> Result<FontId, FontLoadError> {
        let id = self.font_system.load_font(bytes)?;
        self.font.get_or_insert(id);
        Ok(id)
    }

    #[inline]
    pub fn has_font(&self) -> bool {
        self.font.is_some()
    }

    // ── tree building ─────────────────────────────────────────────────────

    /// Adds `kind` under `parent` at the front of its z-order list.
    ///
    /// Movable panels get their close button here. If `parent` is not a
    /// container the node is created detached and never drawn or hit.
    pub fn add_child(&mut self, parent: NodeId, rect: Rect, kind: impl Into<NodeKind>) -> NodeId {
        let kind = kind.into();
        let list = kind.list();
        let attach = self.nodes.get(parent).is_some_and(|n| n.as_container().is_some());
        if !attach {
            log::warn!("add_child: parent is not a container; {} left detached", kind.name());
        }

        let id = self.nodes.insert(Node::new(rect, attach.then_some(parent), kind));
        if let Some(container) = self.nodes.get_mut(parent).and_then(Node::as_container_mut) {
            container.list_mut(list).push(id);
        }

        let close_style = match self.nodes.get(id).and_then(Node::as_container) {
            Some(c) if !c.fixed => Some(c.style.close_button()),
            _ => None,
        };
        if let Some(style) = close_style {
            let close = Button::toggle("x", id).style(style);
            let close_rect = self.close_rect_for(id);
            let button = self.add_child(id, close_rect, close);
            if let Some(c) = self.nodes.get_mut(id).and_then(Node::as_container_mut) {
                c.close_button = Some(button);
            }
        }
        id
    }

    fn close_rect_for(&self, panel: NodeId) -> Rect {
        match self.nodes.get(panel) {
            Some(node) => node
                .as_container()
                .map_or(Rect::default(), |c| c.close_button_rect(node.rect.width())),
            None => Rect::default(),
        }
    }

    // ── geometry ──────────────────────────────────────────────────────────

    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id)
    }

    /// Parent-relative rect.
    pub fn rect(&self, id: NodeId) -> Option<Rect> {
        self.nodes.get(id).map(|n| n.rect)
    }

    /// Moves or resizes a node. A panel's close button follows its right edge.
    pub fn set_rect(&mut self, id: NodeId, rect: Rect) {
        let Some(node) = self.nodes.get_mut(id) else {
            return;
        };
        node.rect = rect;
        let close = node.as_container().and_then(|c| c.close_button);
        if let Some(close) = close {
            let close_rect = self.close_rect_for(id);
            if let Some(button) = self.nodes.get_mut(close) {
                button.rect = close_rect;
            }
        }
    }

    /// Pulls a movable panel back inside its parent, as a drop does.
    pub fn clamp_to_parent(&mut self, id: NodeId) {
        let Some(parent_size) = self.nodes.get(id).and_then(|n| n.parent).and_then(|p| self.rect(p)).map(|r| r.size) else {
            return;
        };
        let clamped = match self.nodes.get(id) {
            Some(node) => node.as_container().map(|c| c.keep_on_screen(node.rect, parent_size)),
            None => None,
        };
        if let Some(rect) = clamped {
            self.set_rect(id, rect);
        }
    }

    /// Top-left of the node's rect in window coordinates.
    pub fn global_position(&self, id: NodeId) -> Vec2 {
        let mut pos = Vec2::zero();
        let mut current = Some(id);
        while let Some(node) = current.and_then(|n| self.nodes.get(n)) {
            pos += node.rect.origin;
            current = node.parent;
        }
        pos
    }

    /// Window-space box used for hit testing; includes a panel's title bar.
    pub fn global_bounding_box(&self, id: NodeId) -> Option<Rect> {
        let node = self.nodes.get(id)?;
        let global = self.global_position(id);
        Some(match node.as_container() {
            Some(c) => c.bounding_box(global, node.rect.size),
            None => node.rect.with_origin(global),
        })
    }

    // ── visibility & hover ────────────────────────────────────────────────

    pub fn is_visible(&self, id: NodeId) -> bool {
        self.nodes.get(id).is_some_and(|n| n.visible)
    }

    pub fn is_hovered(&self, id: NodeId) -> bool {
        self.nodes.get(id).is_some_and(|n| n.hovered)
    }

    /// The hovered non-container node, if any.
    pub fn hovered_leaf(&self) -> Option<NodeId> {
        self.nodes
            .iter()
            .find(|(_, n)| n.hovered && n.as_container().is_none())
            .map(|(id, _)| id)
    }

    /// Detaches a visible panel from its parent's list, or re-attaches a
    /// hidden one at the front. The subtree is kept either way.
    pub fn toggle_visibility(&mut self, id: NodeId) {
        let Some(node) = self.nodes.get(id) else {
            return;
        };
        if id == self.root {
            return;
        }
        let (visible, parent, list) = (node.visible, node.parent, node.kind.list());

        if let Some(container) = parent.and_then(|p| self.nodes.get_mut(p)).and_then(Node::as_container_mut) {
            let children = container.list_mut(list);
            children.retain(|c| *c != id);
            if !visible {
                children.push(id);
            }
        }

        if visible {
            self.set_subtree_hover(id, false);
        }
        if let Some(node) = self.nodes.get_mut(id) {
            node.visible = !visible;
        }
        log::debug!("{} {}", node_label(self, id), if visible { "hidden" } else { "shown" });
    }

    /// Forces the whole tree non-hovered and skips the next hover pass.
    ///
    /// Call before a blocking dialog so clicks queued meanwhile land nowhere.
    pub fn block_hover(&mut self) {
        self.set_subtree_hover(self.root, false);
        self.hover_blocked = true;
    }

    pub(crate) fn set_subtree_hover(&mut self, id: NodeId, hovered: bool) {
        let children: Vec<NodeId> = match self.nodes.get_mut(id) {
            Some(node) => {
                node.hovered = hovered;
                node.as_container().map(|c| c.all_children().collect()).unwrap_or_default()
            }
            None => return,
        };
        for child in children {
            self.set_subtree_hover(child, hovered);
        }
    }

    /// Drains the named events emitted by buttons since the last call.
    pub fn take_events(&mut self) -> Vec<String> {
        std::mem::take(&mut self.events)
    }

    // ── typed access ──────────────────────────────────────────────────────

    pub fn container(&self, id: NodeId) -> Option<&Container> {
        self.nodes.get(id)?.as_container()
    }

    pub fn surface(&self, id: NodeId) -> Option<&PaintSurface> {
        match &self.nodes.get(id)?.kind {
            NodeKind::Surface(s) => Some(s),
            _ => None,
        }
    }

    pub fn surface_mut(&mut self, id: NodeId) -> Option<&mut PaintSurface> {
        match &mut self.nodes.get_mut(id)?.kind {
            NodeKind::Surface(s) => Some(s),
            _ => None,
        }
    }

    pub fn slider(&self, id: NodeId) -> Option<&Slider> {
        match &self.nodes.get(id)?.kind {
            NodeKind::Slider(s) => Some(s),
            _ => None,
        }
    }

    pub fn slider_mut(&mut self, id: NodeId) -> Option<&mut Slider> {
        match &mut self.nodes.get_mut(id)?.kind {
            NodeKind::Slider(s) => Some(s),
            _ => None,
        }
    }

    // ── rendering ─────────────────────────────────────────────────────────

    /// Clears `frame` and draws the tree back to front.
    pub fn render(&self, frame: &mut PixelBuffer) {
        let mut painter = Painter::new(frame, &self.font_system, self.font);
        painter.clear(Rgba::BLACK);
        self.render_node(self.root, &mut painter);
    }

    fn render_node(&self, id: NodeId, painter: &mut Painter<'_>) {
        let Some(node) = self.nodes.get(id) else {
            return;
        };
        if !node.visible {
            return;
        }
        let global = self.global_position(id);
        let rect = node.rect.with_origin(global);

        match &node.kind {
            NodeKind::Container(c) => {
                painter.fill_rect(c.bounding_box(global, rect.size), c.style.panel_bg);
                if let Some(bar) = c.title_bar(global, rect.size) {
                    painter.fill_rect(bar, c.style.title_bar_bg);
                    painter.text(
                        &c.title,
                        c.style.title_bar_text_size,
                        c.style.title_bar_text,
                        Vec2::new(bar.x() + 3.0, bar.y() + 2.0),
                    );
                }
                // Child containers last so they sit above the leaves, matching hit order.
                let order = c
                    .surfaces
                    .iter()
                    .chain(&c.buttons)
                    .chain(&c.sliders)
                    .chain(&c.texts)
                    .chain(&c.containers);
                for child in order {
                    self.render_node(*child, painter);
                }
            }
            NodeKind::Button(b) => {
                let (bg, fg) = b.style.button_colors(node.hovered);
                painter.fill_rect(rect, bg);
                // Padded from the left, centered vertically.
                let size = b.style.button_text_size;
                let text_h = painter.measure_text(&b.label, size).y;
                let y = global.y + ((rect.height() - text_h) / 2.0).max(0.0);
                painter.text(&b.label, size, fg, Vec2::new(global.x + b.style.button_padding, y));
            }
            NodeKind::Slider(s) => render_slider(s, rect, painter),
            NodeKind::Text(t) => painter.text(&t.resolve(), t.size, t.color, global),
            NodeKind::Surface(s) => s.composite(painter.target, rect),
        }
    }
}

impl Default for UiScene {
    fn default() -> Self {
        Self::new(Vec2::new(640.0, 360.0))
    }
}

fn render_slider(slider: &Slider, rect: Rect, painter: &mut Painter<'_>) {
    let inset = (rect.width() - Slider::HANDLE) / 2.0;
    let track = Rect::new(rect.x() + inset, rect.y(), Slider::HANDLE, rect.height());
    let empty = (1.0 - slider.percentage) * rect.height();
    painter.fill_rect(track, slider.color);
    painter.fill_rect(Rect::new(track.x(), track.y(), track.width(), empty), Rgba::BLACK);

    let handle_y = rect.y() + (1.0 - slider.percentage) * (rect.height() - Slider::HANDLE);
    painter.fill_rect(Rect::new(rect.x(), handle_y, rect.width(), Slider::HANDLE), Rgba::WHITE);
}

pub(crate) fn node_label(scene: &UiScene, id: NodeId) -> String {
    match scene.nodes.get(id).map(|n| &n.kind) {
        Some(NodeKind::Container(c)) if !c.title.is_empty() => format!("panel '{}'", c.title),
        Some(NodeKind::Button(b)) => format!("button '{}'", b.label),
        Some(kind) => kind.name().to_string(),
        None => "stale node".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tilepaint_canvas::Brush;
    use crate::widgets::text::Text;

    fn scene_with_panel() -> (UiScene, NodeId) {
        let mut ui = UiScene::new(Vec2::new(640.0, 360.0));
        let panel = ui.add_child(ui.root(), Rect::new(100.0, 50.0, 120.0, 80.0), Container::panel().caption("Tools"));
        (ui, panel)
    }

    // ── building ──────────────────────────────────────────────────────────

    #[test]
    fn add_child_appends_in_z_order() {
        let (mut ui, panel) = scene_with_panel();
        let a = ui.add_child(panel, Rect::new(0.0, 0.0, 10.0, 10.0), Button::emit("a", "a"));
        let b = ui.add_child(panel, Rect::new(0.0, 0.0, 10.0, 10.0), Button::emit("b", "b"));
        let s = ui.add_child(panel, Rect::new(0.0, 0.0, 12.0, 60.0), Slider::new(0.0, 1.0));

        let c = ui.container(panel).unwrap();
        let close = c.close_button.unwrap();
        assert_eq!(c.buttons, vec![close, a, b]);
        assert_eq!(c.sliders, vec![s]);
        assert_eq!(ui.node(a).unwrap().parent(), Some(panel));
        assert_eq!(ui.container(ui.root()).unwrap().containers, vec![panel]);
    }

    #[test]
    fn fixed_containers_get_no_close_button() {
        let mut ui = UiScene::default();
        let bar = ui.add_child(ui.root(), Rect::new(0.0, 345.0, 640.0, 15.0), Container::fixed());
        assert!(ui.container(bar).unwrap().close_button.is_none());
        assert!(ui.container(bar).unwrap().buttons.is_empty());
    }

    #[test]
    fn child_of_leaf_is_detached() {
        let mut ui = UiScene::default();
        let text = ui.add_child(ui.root(), Rect::new(0.0, 0.0, 5.0, 5.0), Text::new("t", 11.0, Rgba::WHITE));
        let orphan = ui.add_child(text, Rect::new(0.0, 0.0, 5.0, 5.0), Button::emit("o", "o"));
        assert_eq!(ui.node(orphan).unwrap().parent(), None);
        assert!(!ui.container(ui.root()).unwrap().all_children().any(|c| c == orphan));
    }

    // ── geometry ──────────────────────────────────────────────────────────

    #[test]
    fn global_geometry_accumulates_parents() {
        let (mut ui, panel) = scene_with_panel();
        let button = ui.add_child(panel, Rect::new(5.0, 7.0, 30.0, 15.0), Button::emit("b", "b"));
        assert_eq!(ui.global_position(button), Vec2::new(105.0, 57.0));
        assert_eq!(ui.global_bounding_box(button), Some(Rect::new(105.0, 57.0, 30.0, 15.0)));
        assert_eq!(ui.global_bounding_box(panel), Some(Rect::new(100.0, 30.0, 120.0, 100.0)));
    }

    #[test]
    fn close_button_follows_resize() {
        let (mut ui, panel) = scene_with_panel();
        let close = ui.container(panel).unwrap().close_button.unwrap();
        assert_eq!(ui.rect(close), Some(Rect::new(100.0, -20.0, 20.0, 20.0)));
        ui.set_rect(panel, Rect::new(0.0, 20.0, 200.0, 80.0));
        assert_eq!(ui.rect(close), Some(Rect::new(180.0, -20.0, 20.0, 20.0)));
    }

    // ── visibility ────────────────────────────────────────────────────────

    #[test]
    fn toggle_detaches_and_reattaches() {
        let (mut ui, panel) = scene_with_panel();
        let other = ui.add_child(ui.root(), Rect::new(0.0, 200.0, 50.0, 50.0), Container::panel());

        ui.toggle_visibility(panel);
        assert!(!ui.is_visible(panel));
        assert_eq!(ui.container(ui.root()).unwrap().containers, vec![other]);

        ui.toggle_visibility(panel);
        assert!(ui.is_visible(panel));
        assert_eq!(ui.container(ui.root()).unwrap().containers, vec![other, panel]);

        ui.toggle_visibility(ui.root());
        assert!(ui.is_visible(ui.root()));
    }

    // ── rendering ─────────────────────────────────────────────────────────

    #[test]
    fn render_draws_panel_and_title_bar() {
        let (ui, _) = scene_with_panel();
        let mut frame = PixelBuffer::new(640, 360);
        ui.render(&mut frame);
        let style = crate::style::Style::default();
        // Root background.
        assert_eq!(frame.get(5, 5), Some(style.panel_bg));
        // Title bar above the panel rect, panel body below it.
        assert_eq!(frame.get(110, 35), Some(style.title_bar_bg));
        assert_eq!(frame.get(110, 100), Some(style.panel_bg));
        // Close button in the title bar's right corner.
        assert_eq!(frame.get(210, 35), Some(style.close_button().button_bg));
    }

    #[test]
    fn hidden_panels_are_not_drawn() {
        let (mut ui, panel) = scene_with_panel();
        let bar_bg = Rgba::rgb(1, 2, 3);
        ui.add_child(panel, Rect::new(0.0, 0.0, 120.0, 80.0), Container::fixed().style(crate::style::Style {
            panel_bg: bar_bg,
            ..Default::default()
        }));
        let mut frame = PixelBuffer::new(640, 360);
        ui.render(&mut frame);
        assert_eq!(frame.get(110, 60), Some(bar_bg));

        ui.toggle_visibility(panel);
        ui.render(&mut frame);
        assert_eq!(frame.get(110, 60), Some(crate::style::Style::default().panel_bg));
    }

    #[test]
    fn slider_draws_fill_below_handle() {
        let mut ui = UiScene::default();
        let red = Rgba::rgb(255, 0, 0);
        ui.add_child(ui.root(), Rect::new(10.0, 10.0, 12.0, 60.0), Slider::new(0.0, 1.0).color(red).value(0.5));
        let mut frame = PixelBuffer::new(64, 80);
        ui.render(&mut frame);
        // Upper half of the track is empty, lower half filled.
        assert_eq!(frame.get(16, 12), Some(Rgba::BLACK));
        assert_eq!(frame.get(16, 65), Some(red));
        // Handle spans the full width at the midpoint of its travel.
        assert_eq!(frame.get(10, 40), Some(Rgba::WHITE));
        assert_eq!(frame.get(21, 40), Some(Rgba::WHITE));
    }

    #[test]
    fn surface_composites_its_image() {
        let mut ui = UiScene::default();
        let mut surface = PaintSurface::new(Brush::default().shared());
        surface.set_image(PixelBuffer::filled(4, 4, Rgba::rgb(0, 200, 0)), None);
        ui.add_child(ui.root(), Rect::new(0.0, 0.0, 20.0, 10.0), surface);
        let mut frame = PixelBuffer::new(32, 32);
        ui.render(&mut frame);
        assert_eq!(frame.get(19, 9), Some(Rgba::rgb(0, 200, 0)));
        assert_ne!(frame.get(20, 9), Some(Rgba::rgb(0, 200, 0)));
    }
}
