//! **covidash**: a country-level COVID-19 dashboard for the terminal.
//!
//! This is the umbrella crate that re-exports everything needed to assemble
//! the dashboard from a single dependency:
//!
//! ```toml
//! [dependencies]
//! covidash = "0.1"
//! ```
//!
//! # Re-exports
//!
//! * All public items from [`covidash_core`] are available at the crate root
//!   ([`Model`], [`Component`], [`Command`], [`Subscription`], [`Program`],
//!   [`run`], [`run_with`], etc.).
//! * The [`widgets`] module re-exports [`covidash_widgets`] (search input,
//!   chart, map, table).
//! * The [`api`] module re-exports [`covidash_api`] (HTTP client, data
//!   source traits, [`FetchError`](api::FetchError)).
//! * [`ratatui`], [`crossterm`], and [`tokio`] are re-exported so downstream
//!   crates do not need to depend on them directly.
//!
//! # Quick start
//!
//! ```ignore
//! use covidash::api::{ApiConfig, HttpClient};
//! use covidash::widgets::TableWidget;
//! use std::sync::Arc;
//!
//! let client = Arc::new(HttpClient::new(ApiConfig::default())?);
//! let mut table = TableWidget::new(client);
//! let cmd = table.update(covidash::widgets::table::Message::CountryChanged("France".into()));
//! ```
//!
//! The full screen is [`dashboard::Dashboard`]; `demos/dashboard.rs` runs it.

pub use covidash_core::*;

pub mod dashboard;

pub mod widgets {
    pub use covidash_widgets::*;
}

pub mod api {
    pub use covidash_api::*;
}

// Re-export dependencies for use in demos and downstream crates
pub use crossterm;
pub use ratatui;
pub use tokio;
