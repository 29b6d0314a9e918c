//! Per-frame input routing: hover recomputation, then discrete events, then
//! the frame's accumulated pointer motion.

use tilepaint_engine::coords::Vec2;
use tilepaint_engine::input::{InputFrame, InputState};

use crate::event::UiEvent;
use crate::scene::{node_label, UiScene};
use crate::widget::{Node, NodeId, NodeKind};
use crate::widgets::button::ButtonAction;
use crate::widgets::container::raise;

impl UiScene {
    /// Routes one frame of input through the tree.
    pub fn handle_input(&mut self, state: &InputState, frame: &InputFrame) {
        self.pointer_inside = state.pointer_pos.is_some();
        self.cursor = state.pointer_or_origin();

        if std::mem::take(&mut self.hover_blocked) {
            log::debug!("hover pass skipped after blocking call");
        } else {
            self.update_hover();
        }

        for event in frame.events.iter().filter_map(UiEvent::from_input) {
            self.dispatch(event);
        }

        if !frame.pointer_delta.is_zero() {
            self.mouse_moved(frame.pointer_delta);
        }

        self.refresh_surfaces();
    }

    // ── hover ─────────────────────────────────────────────────────────────

    /// Recomputes hover flags from the root; at most one leaf ends up hovered.
    pub fn update_hover(&mut self) {
        let root = self.root();
        let inside = self.pointer_inside
            && self.global_bounding_box(root).is_some_and(|b| b.contains(self.cursor));
        self.propagate_hover(root, inside);
    }

    fn propagate_hover(&mut self, id: NodeId, hovered: bool) {
        let (candidates, texts) = match self.nodes.get_mut(id) {
            Some(node) => {
                node.hovered = hovered;
                match node.as_container() {
                    // Front of each list first; lists tested top-down.
                    Some(c) => (
                        c.containers
                            .iter()
                            .rev()
                            .chain(c.buttons.iter().rev())
                            .chain(c.sliders.iter().rev())
                            .chain(c.surfaces.iter().rev())
                            .copied()
                            .collect::<Vec<_>>(),
                        c.texts.clone(),
                    ),
                    None => return,
                }
            }
            None => return,
        };

        let winner = if hovered {
            candidates.iter().copied().find(|child| self.hit(*child))
        } else {
            None
        };

        for child in candidates.into_iter().chain(texts) {
            self.propagate_hover(child, Some(child) == winner);
        }
    }

    fn hit(&self, id: NodeId) -> bool {
        self.is_visible(id)
            && self.global_bounding_box(id).is_some_and(|b| b.contains(self.cursor))
    }

    // ── discrete events ───────────────────────────────────────────────────

    fn dispatch(&mut self, event: UiEvent) {
        match event {
            UiEvent::LeftDown => {
                let mut toggles = Vec::new();
                self.left_down(self.root(), &mut toggles);
                for target in toggles {
                    self.toggle_visibility(target);
                }
            }
            UiEvent::LeftUp => self.left_up(),
            UiEvent::RightDown => {
                if let Some((id, _)) = self.hovered_surface() {
                    if let Some(s) = self.surface_mut(id) {
                        s.panning = true;
                    }
                }
            }
            UiEvent::RightUp => {
                for node in self.nodes.values_mut() {
                    if let NodeKind::Surface(s) = &mut node.kind {
                        s.panning = false;
                    }
                }
            }
            UiEvent::MiddleDown => {
                if let Some((id, local)) = self.hovered_surface() {
                    let picked = self.surface_mut(id).and_then(|s| s.pick_color(local));
                    if let Some(color) = picked {
                        log::debug!("picked {color:?}");
                        self.events.push("color_picked".to_string());
                    }
                }
            }
            UiEvent::Wheel { lines } => {
                // Touchpads report fractions of a notch; zoom once per whole one.
                if self.wheel_notches.signum() != lines.signum() {
                    self.wheel_notches = 0.0;
                }
                self.wheel_notches += lines;
                let whole = self.wheel_notches.trunc();
                self.wheel_notches -= whole;
                if whole != 0.0 {
                    if let Some((id, local)) = self.hovered_surface() {
                        if let Some(s) = self.surface_mut(id) {
                            for _ in 0..whole.abs() as u32 {
                                s.zoom_wheel(local, whole.signum());
                            }
                        }
                    }
                }
            }
        }
    }

    /// The hovered paint surface and the cursor in its local coordinates.
    fn hovered_surface(&self) -> Option<(NodeId, Vec2)> {
        let id = self.nodes.iter().find_map(|(id, n)| match n.kind {
            NodeKind::Surface(_) if n.hovered => Some(id),
            _ => None,
        })?;
        Some((id, self.cursor - self.global_position(id)))
    }

    /// Depth-first over the whole tree; each node acts only if hovered.
    fn left_down(&mut self, id: NodeId, toggles: &mut Vec<NodeId>) {
        let Some(node) = self.nodes.get(id) else {
            return;
        };
        if !node.visible {
            return;
        }
        let hovered = node.hovered;
        let global = self.global_position(id);
        let local = self.cursor - global;
        let size = node.rect.size;
        let raises = match &node.kind {
            NodeKind::Container(c) => !c.fixed,
            NodeKind::Button(_) | NodeKind::Slider(_) => true,
            NodeKind::Text(_) | NodeKind::Surface(_) => false,
        };

        if hovered && raises {
            self.raise_in_parent(id);
        }

        let close_hovered = self
            .container(id)
            .and_then(|c| c.close_button)
            .is_some_and(|b| self.is_hovered(b));
        let cursor = self.cursor;
        let mut children = Vec::new();

        let Some(node) = self.nodes.get_mut(id) else {
            return;
        };
        match &mut node.kind {
            NodeKind::Container(c) => {
                if hovered && !close_hovered && c.title_bar(global, size).is_some_and(|bar| bar.contains(cursor)) {
                    c.title_bar_held = true;
                }
                children.extend(c.all_children());
            }
            NodeKind::Button(b) if hovered => {
                log::debug!("pressed '{}'", b.label);
                match &mut b.action {
                    ButtonAction::Callback(f) => f(),
                    ButtonAction::Emit(name) => self.events.push(name.clone()),
                    ButtonAction::ToggleVisibility(target) => toggles.push(*target),
                }
            }
            NodeKind::Slider(s) if hovered => {
                s.held = true;
                s.drag_to(local.y, size.y);
            }
            NodeKind::Surface(s) if hovered => {
                s.stroke_active = true;
                s.paint_at(local);
            }
            _ => {}
        }

        for child in children {
            self.left_down(child, toggles);
        }
    }

    fn raise_in_parent(&mut self, id: NodeId) {
        let Some(node) = self.nodes.get(id) else {
            return;
        };
        let (parent, list) = (node.parent, node.kind.list());
        if let Some(c) = parent.and_then(|p| self.nodes.get_mut(p)).and_then(Node::as_container_mut) {
            raise(c.list_mut(list), id);
        }
    }

    /// Releases every drag, stroke and slider hold; dropped panels are
    /// clamped back on screen.
    fn left_up(&mut self) {
        let ids: Vec<NodeId> = self.nodes.keys().collect();
        for id in ids {
            let parent_size = self
                .nodes
                .get(id)
                .and_then(|n| n.parent)
                .and_then(|p| self.rect(p))
                .map(|r| r.size);
            let Some(node) = self.nodes.get_mut(id) else {
                continue;
            };
            let rect = node.rect;
            let dropped = match &mut node.kind {
                NodeKind::Container(c) if c.title_bar_held => {
                    c.title_bar_held = false;
                    if let Some(parent_size) = parent_size {
                        node.rect = c.keep_on_screen(rect, parent_size);
                    }
                    true
                }
                NodeKind::Slider(s) => {
                    s.held = false;
                    false
                }
                NodeKind::Surface(s) => {
                    s.stroke_active = false;
                    false
                }
                _ => false,
            };
            if dropped {
                log::debug!("dropped {} at {:?}", node_label(self, id), self.rect(id));
            }
        }
    }

    // ── motion ────────────────────────────────────────────────────────────

    /// Applies the frame's pointer motion to whatever holds the pointer.
    pub(crate) fn mouse_moved(&mut self, delta: Vec2) {
        let ids: Vec<NodeId> = self.nodes.keys().collect();
        for id in ids {
            let global = self.global_position(id);
            let local = self.cursor - global;
            let Some(node) = self.nodes.get_mut(id) else {
                continue;
            };
            let height = node.rect.height();
            match &mut node.kind {
                NodeKind::Container(c) if c.title_bar_held => {
                    node.rect = node.rect.translated(delta);
                }
                NodeKind::Slider(s) if s.held => s.drag_to(local.y, height),
                NodeKind::Surface(s) => {
                    if s.stroke_active {
                        s.stroke_to(local, delta);
                    }
                    if s.panning {
                        s.pan(delta);
                    }
                }
                _ => {}
            }
        }
    }

    fn refresh_surfaces(&mut self) {
        for (id, node) in &self.nodes {
            if let NodeKind::Surface(s) = &node.kind {
                s.refresh_status(self.cursor - self.global_position(id), node.hovered);
            }
        }
    }
}
