//! Dashboard widgets for **covidash**.
//!
//! Every widget implements [`covidash_core::Component`]. The data widgets
//! take the parent's country selector through a `CountryChanged` message and
//! fetch on their own; the search input is the only one that talks back to
//! the parent.
//!
//! # Widgets
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`search_input`] | Country text box that emits a trimmed search term |
//! | [`chart`] | Bar chart, rebuilt for every country |
//! | [`map`] | World map with one marker, moved for every country |
//! | [`table`] | Loading / error / data table for the selected country |
//! | [`spinner`] | Animated loading indicator |
//!
//! # Utilities
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`selector`] | Decides when a selector change should fetch, and which result is current |
//! | [`surface`] | Named drawing target handed to chart and map libraries |
//! | [`format`] | Thousands grouping for numbers |

pub mod chart;
pub mod format;
pub mod map;
pub mod search_input;
pub mod selector;
pub mod spinner;
pub mod surface;
pub mod table;

#[cfg(test)]
mod fakes;

pub use chart::ChartWidget;
pub use map::MapWidget;
pub use search_input::SearchInput;
pub use table::TableWidget;
