//! tilepaint UI: retained scene graph drawn into a `tilepaint-engine` frame.
//!
//! # Quick start
//!
//! ```rust,ignore
//! use tilepaint_ui::prelude::*;
//!
//! let mut ui = UiScene::new(Vec2::new(640.0, 360.0));
//! ui.load_font(&font_bytes)?;
//!
//! let tools = ui.add_child(ui.root(), Rect::new(20.0, 40.0, 120.0, 90.0), Container::panel().caption("Tools"));
//! ui.add_child(tools, Rect::new(5.0, 5.0, 50.0, 20.0), Button::emit("Open", "open"));
//!
//! // In your frame callback:
//! ui.handle_input(ctx.input, ctx.input_frame);
//! for event in ui.take_events() {
//!     // "open", ...
//! }
//! ui.render(ctx.frame);
//! ```
//!
//! Nodes live in an arena owned by [`UiScene`](scene::UiScene) and are
//! addressed by [`NodeId`](widget::NodeId). Containers keep their children in
//! per-kind z-order lists; hover, clicks and drawing all walk those lists.

pub mod event;
pub mod painter;
pub mod router;
pub mod scene;
pub mod style;
pub mod widget;
pub mod widgets;

pub use scene::UiScene;
pub use widget::{Node, NodeId, NodeKind};

/// Everything needed to assemble a scene.
pub mod prelude {
    pub use crate::event::UiEvent;
    pub use crate::painter::Painter;
    pub use crate::scene::UiScene;
    pub use crate::style::Style;
    pub use crate::widget::{Node, NodeId, NodeKind};
    pub use crate::widgets::{
        button::{Button, ButtonAction},
        container::Container,
        slider::Slider,
        surface::{PaintSurface, StatusHandle, SurfaceStatus},
        text::{Text, TextContent},
    };

    pub use tilepaint_engine::coords::{Rect, Vec2};
    pub use tilepaint_engine::raster::Rgba;
}
