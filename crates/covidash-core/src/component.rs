use crate::command::Command;
use crate::subscription::Subscription;
use ratatui::{layout::Rect, Frame};

/// A reusable sub-model that renders into a given [`Rect`] area.
///
/// `Component` mirrors [`Model`](crate::Model) except that
/// [`view`](Component::view) receives the `area` chosen by its parent, so
/// widgets can be arranged freely inside a layout.
///
/// # Composition pattern
///
/// Wrap the component's message type in a variant of the parent message and
/// lift its commands with [`Command::map`]:
///
/// ```rust,ignore
/// use covidash_core::{Model, Component, Command};
/// use ratatui::Frame;
///
/// struct App { table: TableWidget }
///
/// #[derive(Debug)]
/// enum AppMsg { Table(table::Message) }
///
/// impl Model for App {
///     type Message = AppMsg;
///     type Flags = Arc<dyn StatsSource>;
///
///     fn init(source: Self::Flags) -> (Self, Command<AppMsg>) {
///         (App { table: TableWidget::new(source) }, Command::none())
///     }
///
///     fn update(&mut self, msg: AppMsg) -> Command<AppMsg> {
///         match msg {
///             AppMsg::Table(m) => self.table.update(m).map(AppMsg::Table),
///         }
///     }
///
///     fn view(&self, frame: &mut Frame) {
///         self.table.view(frame, frame.area());
///     }
/// }
/// ```
pub trait Component: Send + 'static {
    /// The component's internal message type.
    type Message: Send + 'static;

    /// Process a message, mutate state, and return a [`Command`] for side effects.
    ///
    /// The returned command uses the component's own `Message` type; the
    /// parent should call [`.map()`](Command::map) to lift it.
    fn update(&mut self, msg: Self::Message) -> Command<Self::Message>;

    /// Render into a specific `area` of the [`Frame`].
    fn view(&self, frame: &mut Frame, area: Rect);

    /// Declare active subscriptions for this component.
    ///
    /// The parent collects these and includes them, mapped, in its own
    /// [`Model::subscriptions`](crate::Model::subscriptions).
    fn subscriptions(&self) -> Vec<Subscription<Self::Message>> {
        vec![]
    }

    /// Whether this component currently has focus.
    ///
    /// A hint for input routing.  The default implementation returns `false`.
    fn focused(&self) -> bool {
        false
    }
}
