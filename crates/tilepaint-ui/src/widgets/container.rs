use tilepaint_engine::coords::{Rect, Vec2};

use crate::style::Style;
use crate::widget::{ChildList, NodeId};

/// A panel holding other nodes.
///
/// Fixed containers have no title bar. Movable ones grow a title bar above
/// their rect that can be dragged and that hosts a close button.
///
/// Child lists are in z-order, back to front.
pub struct Container {
    pub(crate) fixed: bool,
    pub(crate) title: String,
    pub(crate) style: Style,
    pub(crate) title_bar_held: bool,
    pub(crate) close_button: Option<NodeId>,

    pub(crate) containers: Vec<NodeId>,
    pub(crate) surfaces: Vec<NodeId>,
    pub(crate) buttons: Vec<NodeId>,
    pub(crate) sliders: Vec<NodeId>,
    pub(crate) texts: Vec<NodeId>,
}

impl Container {
    fn new(fixed: bool) -> Self {
        Self {
            fixed,
            title: String::new(),
            style: Style::default(),
            title_bar_held: false,
            close_button: None,
            containers: Vec::new(),
            surfaces: Vec::new(),
            buttons: Vec::new(),
            sliders: Vec::new(),
            texts: Vec::new(),
        }
    }

    /// Container without a title bar; cannot be moved or closed.
    pub fn fixed() -> Self {
        Self::new(true)
    }

    /// Movable, closable panel.
    pub fn panel() -> Self {
        Self::new(false)
    }

    /// Title bar caption.
    pub fn caption(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn style(mut self, style: Style) -> Self {
        self.style = style;
        self
    }

    #[inline]
    pub fn title(&self) -> &str {
        &self.title
    }

    #[inline]
    pub fn is_dragging(&self) -> bool {
        self.title_bar_held
    }

    /// Height the title bar adds above the rect; zero for fixed containers.
    #[inline]
    pub fn title_bar_height(&self) -> f32 {
        if self.fixed { 0.0 } else { self.style.title_bar_height }
    }

    /// Bounding box including the title bar, given the rect at `global` origin.
    pub(crate) fn bounding_box(&self, global: Vec2, size: Vec2) -> Rect {
        let tb = self.title_bar_height();
        Rect::new(global.x, global.y - tb, size.x, size.y + tb)
    }

    /// Title bar rect for a movable container at `global`.
    pub(crate) fn title_bar(&self, global: Vec2, size: Vec2) -> Option<Rect> {
        (!self.fixed).then(|| Rect::new(global.x, global.y - self.style.title_bar_height, size.x, self.style.title_bar_height))
    }

    /// Local rect of the close button for a panel of `width`.
    pub(crate) fn close_button_rect(&self, width: f32) -> Rect {
        let h = self.style.title_bar_height;
        Rect::new(width - h, -h, h, h)
    }

    /// Clamps a movable panel's `local` rect so its title bar stays inside a
    /// parent of `parent_size`.
    ///
    /// Lower bounds apply first, so a panel wider than its parent ends up
    /// flush with the parent's right edge.
    pub(crate) fn keep_on_screen(&self, local: Rect, parent_size: Vec2) -> Rect {
        if self.fixed {
            return local;
        }
        let tb = self.style.title_bar_height;
        let x = local.x().max(0.0).min(parent_size.x - local.width());
        let y = local.y().max(tb).min(parent_size.y);
        local.with_origin(Vec2::new(x, y))
    }

    pub(crate) fn list_mut(&mut self, list: ChildList) -> &mut Vec<NodeId> {
        match list {
            ChildList::Containers => &mut self.containers,
            ChildList::Surfaces => &mut self.surfaces,
            ChildList::Buttons => &mut self.buttons,
            ChildList::Sliders => &mut self.sliders,
            ChildList::Texts => &mut self.texts,
        }
    }

    pub(crate) fn all_children(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.containers
            .iter()
            .chain(&self.surfaces)
            .chain(&self.buttons)
            .chain(&self.sliders)
            .chain(&self.texts)
            .copied()
    }
}

/// Moves `id` to the end (front) of `list` if present.
pub(crate) fn raise(list: &mut Vec<NodeId>, id: NodeId) {
    if let Some(pos) = list.iter().position(|n| *n == id) {
        let node = list.remove(pos);
        list.push(node);
    }
}
