use crate::model::{first_location, GeoRecord};
use crate::{ApiConfig, CountryLocation, CountryStats, FetchError, GeoSource, StatsSource};
use futures::future::{BoxFuture, FutureExt};
use reqwest::Url;

/// HTTP client for both public APIs.
///
/// Cloning is cheap: the underlying connection pool is shared.
#[derive(Debug, Clone)]
pub struct HttpClient {
    config: ApiConfig,
    http: reqwest::Client,
}

impl HttpClient {
    /// Build a client from `config`.
    pub fn new(config: ApiConfig) -> Result<Self, reqwest::Error> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        Ok(Self {
            http: builder.build()?,
            config,
        })
    }

    /// The configuration this client was built with.
    pub fn config(&self) -> &ApiConfig {
        &self.config
    }

    /// `GET {disease_base}/countries/{country}`.
    pub fn stats_url(&self, country: &str) -> Result<Url, FetchError> {
        endpoint(&self.config.disease_base_url, &["countries", country])
    }

    /// `GET {geo_base}/name/{country}?fullText=true`.
    pub fn geo_url(&self, country: &str) -> Result<Url, FetchError> {
        let mut url = endpoint(&self.config.geo_base_url, &["name", country])?;
        url.query_pairs_mut().append_pair("fullText", "true");
        Ok(url)
    }
}

/// Append `segments` to `base`, percent-encoding each one.
fn endpoint(base: &str, segments: &[&str]) -> Result<Url, FetchError> {
    let mut url = Url::parse(base)
        .map_err(|err| FetchError::request(format!("invalid base url {base}: {err}")))?;
    url.path_segments_mut()
        .map_err(|_| FetchError::request(format!("base url {base} cannot take a path")))?
        .pop_if_empty()
        .extend(segments);
    Ok(url)
}

impl StatsSource for HttpClient {
    fn country_stats(&self, country: &str) -> BoxFuture<'static, Result<CountryStats, FetchError>> {
        let request = self.stats_url(country).map(|url| {
            tracing::debug!(%url, "fetching country statistics");
            self.http.get(url)
        });
        async move {
            let response = request?.send().await?.error_for_status()?;
            Ok(response.json::<CountryStats>().await?)
        }
        .boxed()
    }
}

impl GeoSource for HttpClient {
    fn locate(&self, country: &str) -> BoxFuture<'static, Result<CountryLocation, FetchError>> {
        let request = self.geo_url(country).map(|url| {
            tracing::debug!(%url, "fetching country geodata");
            self.http.get(url)
        });
        async move {
            let response = request?.send().await?.error_for_status()?;
            first_location(response.json::<Vec<GeoRecord>>().await?)
        }
        .boxed()
    }
}
