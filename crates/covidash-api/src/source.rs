use crate::{CountryLocation, CountryStats, FetchError};
use futures::future::BoxFuture;

/// Something that can look up case statistics for a country.
///
/// The returned future owns everything it needs, so widgets can hand it
/// straight to [`Command::perform`](https://docs.rs/covidash-core) without
/// borrowing the source.
pub trait StatsSource: Send + Sync + 'static {
    /// Fetch the statistics record for `country`.
    fn country_stats(&self, country: &str) -> BoxFuture<'static, Result<CountryStats, FetchError>>;
}

/// Something that can locate a country by its exact name.
pub trait GeoSource: Send + Sync + 'static {
    /// Resolve `country` to its common name and a representative coordinate.
    fn locate(&self, country: &str) -> BoxFuture<'static, Result<CountryLocation, FetchError>>;
}
