//! Headless harnesses for driving models and components in plain `#[test]`s.
//!
//! Both harnesses queue what a command asks for instead of running it:
//! immediate messages wait in a message queue, async tasks wait in a task
//! queue. Tests decide when (and in which order) each task completes, which
//! is how fetch races are reproduced deterministically.

use crate::command::{Action, Command, CommandInner};
use crate::component::Component;
use crate::model::Model;
use futures::future::BoxFuture;
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::{Frame, Terminal};
use std::collections::VecDeque;

/// Commands collected from updates, waiting for the test to act on them.
struct Pending<Msg: Send + 'static> {
    messages: VecDeque<Msg>,
    tasks: VecDeque<BoxFuture<'static, Msg>>,
    quit_requested: bool,
}

impl<Msg: Send + 'static> Pending<Msg> {
    fn new() -> Self {
        Self {
            messages: VecDeque::new(),
            tasks: VecDeque::new(),
            quit_requested: false,
        }
    }

    fn collect(&mut self, cmd: Command<Msg>) {
        match cmd.inner {
            CommandInner::None => {}
            CommandInner::Action(Action::Message(msg)) => self.messages.push_back(msg),
            CommandInner::Action(Action::Quit) => self.quit_requested = true,
            CommandInner::Future(fut) => self.tasks.push_back(fut),
            CommandInner::Batch(cmds) => {
                for cmd in cmds {
                    self.collect(cmd);
                }
            }
        }
    }

    /// Run the task at `index` to completion on the current thread.
    fn complete(&mut self, index: usize) -> Option<Msg> {
        let task = self.tasks.remove(index)?;
        Some(futures::executor::block_on(task))
    }
}

/// A headless test harness that drives a [`Model`] without a real terminal.
///
/// # Example
///
/// ```rust,ignore
/// use covidash_core::testing::TestProgram;
///
/// let mut prog = TestProgram::<Dashboard>::new(flags);
/// prog.send(Msg::Search("France".into()));
/// prog.drain_messages();
/// prog.resolve_all();                      // let every fetch finish
/// assert!(prog.render_string(80, 24).contains("France"));
/// ```
pub struct TestProgram<M: Model> {
    model: M,
    pending: Pending<M::Message>,
}

impl<M: Model> TestProgram<M> {
    /// Create a test program by calling [`Model::init`] with the given flags.
    pub fn new(flags: M::Flags) -> Self {
        let (model, init_cmd) = M::init(flags);
        let mut program = Self {
            model,
            pending: Pending::new(),
        };
        program.pending.collect(init_cmd);
        program
    }

    /// Send a message, triggering a single update cycle.
    pub fn send(&mut self, msg: M::Message) {
        let cmd = self.model.update(msg);
        self.pending.collect(cmd);
    }

    /// Process queued immediate messages until none are left.
    pub fn drain_messages(&mut self) {
        while let Some(msg) = self.pending.messages.pop_front() {
            self.send(msg);
        }
    }

    /// Number of async tasks waiting to be resolved.
    pub fn pending_tasks(&self) -> usize {
        self.pending.tasks.len()
    }

    /// Complete the task at `index` (in issue order) and feed its message
    /// to `update`.  Returns `false` when there is no such task.
    pub fn resolve(&mut self, index: usize) -> bool {
        match self.pending.complete(index) {
            Some(msg) => {
                self.send(msg);
                true
            }
            None => false,
        }
    }

    /// Complete every queued task (including ones spawned while resolving),
    /// draining immediate messages after each.
    pub fn resolve_all(&mut self) {
        self.drain_messages();
        while self.resolve(0) {
            self.drain_messages();
        }
    }

    /// Whether any update so far returned [`Command::quit`].
    pub fn quit_requested(&self) -> bool {
        self.pending.quit_requested
    }

    /// Get a shared reference to the model for assertions.
    pub fn model(&self) -> &M {
        &self.model
    }

    /// Get a mutable reference to the model for direct test setup.
    pub fn model_mut(&mut self) -> &mut M {
        &mut self.model
    }

    /// Render the model to a ratatui [`Buffer`] of the given dimensions.
    pub fn render(&self, width: u16, height: u16) -> Buffer {
        render_with(width, height, |frame| self.model.view(frame))
    }

    /// Render the model and return the visible content as a plain string.
    pub fn render_string(&self, width: u16, height: u16) -> String {
        buffer_to_string(&self.render(width, height))
    }
}

/// A headless harness for a single [`Component`].
///
/// Works like [`TestProgram`] but owns a component directly, which is how
/// widgets are tested in isolation from any parent.
pub struct TestComponent<C: Component> {
    component: C,
    pending: Pending<C::Message>,
}

impl<C: Component> TestComponent<C> {
    /// Wrap an already-constructed component.
    pub fn new(component: C) -> Self {
        Self {
            component,
            pending: Pending::new(),
        }
    }

    /// Send a message, triggering a single update cycle.
    pub fn send(&mut self, msg: C::Message) {
        let cmd = self.component.update(msg);
        self.pending.collect(cmd);
    }

    /// Take the queued immediate messages without processing them.
    ///
    /// Useful for asserting on notifications a component emits for its parent.
    pub fn take_messages(&mut self) -> Vec<C::Message> {
        self.pending.messages.drain(..).collect()
    }

    /// Process queued immediate messages until none are left.
    pub fn drain_messages(&mut self) {
        while let Some(msg) = self.pending.messages.pop_front() {
            self.send(msg);
        }
    }

    /// Number of async tasks waiting to be resolved.
    pub fn pending_tasks(&self) -> usize {
        self.pending.tasks.len()
    }

    /// Complete the task at `index` (in issue order) and feed its message
    /// to `update`.  Returns `false` when there is no such task.
    pub fn resolve(&mut self, index: usize) -> bool {
        match self.pending.complete(index) {
            Some(msg) => {
                self.send(msg);
                true
            }
            None => false,
        }
    }

    /// Complete every queued task in issue order.
    pub fn resolve_all(&mut self) {
        self.drain_messages();
        while self.resolve(0) {
            self.drain_messages();
        }
    }

    /// Get a shared reference to the component for assertions.
    pub fn component(&self) -> &C {
        &self.component
    }

    /// Get a mutable reference to the component.
    pub fn component_mut(&mut self) -> &mut C {
        &mut self.component
    }

    /// Give the component back, e.g. to drop it and observe teardown.
    pub fn into_inner(self) -> C {
        self.component
    }

    /// Render the component over the whole buffer.
    pub fn render(&self, width: u16, height: u16) -> Buffer {
        render_with(width, height, |frame| {
            let area = frame.area();
            self.component.view(frame, area);
        })
    }

    /// Render the component and return the visible content as a plain string.
    pub fn render_string(&self, width: u16, height: u16) -> String {
        buffer_to_string(&self.render(width, height))
    }
}

fn render_with(width: u16, height: u16, draw: impl FnOnce(&mut Frame)) -> Buffer {
    let backend = ratatui::backend::TestBackend::new(width, height);
    // TestBackend cannot fail to initialize or draw.
    let mut terminal = Terminal::new(backend).expect("test backend");
    terminal.draw(draw).expect("test backend draw");
    terminal.backend().buffer().clone()
}

/// Concatenate each buffer row into a line; rows are separated by newlines.
pub fn buffer_to_string(buf: &Buffer) -> String {
    let area: Rect = buf.area;
    let mut output = String::new();
    for y in area.top()..area.bottom() {
        for x in area.left()..area.right() {
            output.push_str(buf[(x, y)].symbol());
        }
        if y + 1 < area.bottom() {
            output.push('\n');
        }
    }
    output
}
