//! Data sources for the covidash dashboard.
//!
//! Two public REST APIs feed the widgets:
//!
//! | Source | Endpoint | Record |
//! |--------|----------|--------|
//! | Disease statistics | `GET {base}/countries/{country}` | [`CountryStats`] |
//! | Country geodata | `GET {base}/name/{country}?fullText=true` | [`CountryLocation`] |
//!
//! Widgets never talk to [`HttpClient`] directly; they hold an
//! `Arc<dyn StatsSource>` or `Arc<dyn GeoSource>`, so tests can substitute a
//! fake. Every failure (transport, non-2xx status, bad payload) surfaces as a
//! single [`FetchError`].

mod client;
mod config;
mod error;
mod model;
mod source;

pub use client::HttpClient;
pub use config::{ApiConfig, DEFAULT_DISEASE_BASE_URL, DEFAULT_GEO_BASE_URL};
pub use error::{Cause, FetchError};
pub use model::{CountryLocation, CountryStats, LatLng};
pub use source::{GeoSource, StatsSource};
