use tilepaint_engine::coords::Rect;

use crate::widgets::button::Button;
use crate::widgets::container::Container;
use crate::widgets::slider::Slider;
use crate::widgets::surface::PaintSurface;
use crate::widgets::text::Text;

slotmap::new_key_type! {
    /// Handle to a node in a [`UiScene`](crate::scene::UiScene).
    pub struct NodeId;
}

/// One element of the scene graph.
///
/// `rect` is relative to the parent's top-left corner. Movable containers
/// draw their title bar above it.
pub struct Node {
    pub(crate) rect: Rect,
    pub(crate) parent: Option<NodeId>,
    pub(crate) visible: bool,
    pub(crate) hovered: bool,
    pub(crate) kind: NodeKind,
}

impl Node {
    pub(crate) fn new(rect: Rect, parent: Option<NodeId>, kind: NodeKind) -> Self {
        Self { rect, parent, visible: true, hovered: false, kind }
    }

    #[inline]
    pub fn rect(&self) -> Rect {
        self.rect
    }

    #[inline]
    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    #[inline]
    pub fn is_hovered(&self) -> bool {
        self.hovered
    }

    #[inline]
    pub fn is_visible(&self) -> bool {
        self.visible
    }

    #[inline]
    pub fn kind(&self) -> &NodeKind {
        &self.kind
    }

    pub(crate) fn as_container(&self) -> Option<&Container> {
        match &self.kind {
            NodeKind::Container(c) => Some(c),
            _ => None,
        }
    }

    pub(crate) fn as_container_mut(&mut self) -> Option<&mut Container> {
        match &mut self.kind {
            NodeKind::Container(c) => Some(c),
            _ => None,
        }
    }
}

/// The closed set of node variants.
pub enum NodeKind {
    Container(Container),
    Button(Button),
    Slider(Slider),
    Text(Text),
    Surface(PaintSurface),
}

/// Which of a container's z-order lists holds a node.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub(crate) enum ChildList {
    Containers,
    Surfaces,
    Buttons,
    Sliders,
    Texts,
}

impl NodeKind {
    pub(crate) fn list(&self) -> ChildList {
        match self {
            NodeKind::Container(_) => ChildList::Containers,
            NodeKind::Button(_) => ChildList::Buttons,
            NodeKind::Slider(_) => ChildList::Sliders,
            NodeKind::Text(_) => ChildList::Texts,
            NodeKind::Surface(_) => ChildList::Surfaces,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            NodeKind::Container(_) => "container",
            NodeKind::Button(_) => "button",
            NodeKind::Slider(_) => "slider",
            NodeKind::Text(_) => "text",
            NodeKind::Surface(_) => "surface",
        }
    }
}

impl From<Container> for NodeKind {
    fn from(c: Container) -> Self {
        NodeKind::Container(c)
    }
}

impl From<Button> for NodeKind {
    fn from(b: Button) -> Self {
        NodeKind::Button(b)
    }
}

impl From<Slider> for NodeKind {
    fn from(s: Slider) -> Self {
        NodeKind::Slider(s)
    }
}

impl From<Text> for NodeKind {
    fn from(t: Text) -> Self {
        NodeKind::Text(t)
    }
}

impl From<PaintSurface> for NodeKind {
    fn from(s: PaintSurface) -> Self {
        NodeKind::Surface(s)
    }
}
