use crate::style::Style;
use crate::widget::NodeId;

/// What a button does when pressed.
pub enum ButtonAction {
    /// Runs a closure, typically one mutating shared state such as the brush.
    Callback(Box<dyn FnMut()>),
    /// Queues a named event for the application, read with
    /// [`UiScene::take_events`](crate::scene::UiScene::take_events).
    Emit(String),
    /// Detaches or re-attaches a panel.
    ToggleVisibility(NodeId),
}

/// A labelled button. Fires on left-down while hovered.
///
/// # Example
/// ```rust,ignore
/// let plus = Button::new("+", ButtonAction::Emit("zoom_in".into()));
/// let grow = Button::on_press("+", move || brush.borrow_mut().increase_size());
/// ```
pub struct Button {
    pub(crate) label: String,
    pub(crate) style: Style,
    pub(crate) action: ButtonAction,
}

impl Button {
    pub fn new(label: impl Into<String>, action: ButtonAction) -> Self {
        Self { label: label.into(), style: Style::default(), action }
    }

    /// Button running `f` when pressed.
    pub fn on_press(label: impl Into<String>, f: impl FnMut() + 'static) -> Self {
        Self::new(label, ButtonAction::Callback(Box::new(f)))
    }

    /// Button queuing the event `name` when pressed.
    pub fn emit(label: impl Into<String>, name: impl Into<String>) -> Self {
        Self::new(label, ButtonAction::Emit(name.into()))
    }

    /// Button toggling the visibility of panel `target`.
    pub fn toggle(label: impl Into<String>, target: NodeId) -> Self {
        Self::new(label, ButtonAction::ToggleVisibility(target))
    }

    pub fn style(mut self, style: Style) -> Self {
        self.style = style;
        self
    }

    #[inline]
    pub fn label(&self) -> &str {
        &self.label
    }
}
