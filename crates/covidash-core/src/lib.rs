//! Runtime for the **covidash** terminal dashboard.
//!
//! `covidash-core` provides the traits, types, and runtime the dashboard
//! widgets are built on.  The design follows the [Elm Architecture]: state
//! changes happen in `update`, rendering in `view`, and side effects such as
//! network fetches are returned as [`Command`]s that the runtime executes and
//! turns back into messages.
//!
//! # Key types
//!
//! | Type | Purpose |
//! |------|---------|
//! | [`Model`] | Top-level application trait (init / update / view) |
//! | [`Component`] | Reusable sub-model that renders into a [`ratatui::layout::Rect`] |
//! | [`Command`] | Describes a side effect to be executed by the runtime |
//! | [`Subscription`] | Long-lived event source (terminal events, timers) |
//! | [`Program`] | Wires a [`Model`] to a real terminal and drives the event loop |
//! | [`TestProgram`](testing::TestProgram) / [`TestComponent`](testing::TestComponent) | Headless harnesses with manually resolved async tasks |
//!
//! # Concurrency
//!
//! `update` is only ever called from the event loop, one message at a time.
//! Async work runs on tokio, but its result re-enters the model as a message,
//! so state owned by a model or component is never touched concurrently.
//!
//! [Elm Architecture]: https://guide.elm-lang.org/architecture/

pub mod command;
pub mod component;
pub mod event;
pub mod logging;
pub mod model;
pub mod runtime;
pub mod subscription;
pub mod subscriptions;
pub mod testing;

pub use command::Command;
pub use component::Component;
pub use event::TerminalEvent;
pub use logging::{init_file_logging, LoggingError};
pub use model::Model;
pub use runtime::{Program, ProgramError, ProgramOptions};
pub use subscription::{subscribe, Subscription, SubscriptionId, SubscriptionSource};
pub use subscriptions::{terminal_events, Every};

/// Run a covidash application with default options.
pub async fn run<M: Model>(flags: M::Flags) -> Result<M, ProgramError> {
    Program::<M>::new(flags)?.run().await
}

/// Run with custom options.
pub async fn run_with<M: Model>(
    flags: M::Flags,
    options: ProgramOptions,
) -> Result<M, ProgramError> {
    Program::<M>::with_options(flags, options)?.run().await
}
