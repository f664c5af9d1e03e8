use thiserror::Error;

/// Why a data source could not deliver a usable record.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Cause {
    /// The request never produced a response (connect, DNS, timeout).
    #[error("request failed: {0}")]
    Request(String),
    /// The server answered with a non-2xx status.
    #[error("unexpected status {0}")]
    Status(u16),
    /// The response body did not have the expected shape.
    #[error("malformed payload: {0}")]
    Malformed(String),
}

/// The single failure kind a widget has to handle: the data source is
/// unavailable. The [`Cause`] is kept for diagnostics only.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("data source unavailable: {cause}")]
pub struct FetchError {
    cause: Cause,
}

impl FetchError {
    /// Wrap a cause.
    pub fn new(cause: Cause) -> Self {
        Self { cause }
    }

    /// Transport-level failure.
    pub fn request(reason: impl Into<String>) -> Self {
        Self::new(Cause::Request(reason.into()))
    }

    /// Non-2xx response.
    pub fn status(code: u16) -> Self {
        Self::new(Cause::Status(code))
    }

    /// Undecodable or unexpected body.
    pub fn malformed(reason: impl Into<String>) -> Self {
        Self::new(Cause::Malformed(reason.into()))
    }

    /// What went wrong.
    pub fn cause(&self) -> &Cause {
        &self.cause
    }
}

impl From<reqwest::Error> for FetchError {
    fn from(error: reqwest::Error) -> Self {
        if let Some(status) = error.status() {
            FetchError::status(status.as_u16())
        } else if error.is_decode() {
            FetchError::malformed(error.to_string())
        } else {
            FetchError::request(error.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_names_the_single_kind() {
        assert_eq!(
            FetchError::status(404).to_string(),
            "data source unavailable: unexpected status 404"
        );
        assert_eq!(
            FetchError::request("connection refused").to_string(),
            "data source unavailable: request failed: connection refused"
        );
    }

    #[test]
    fn cause_is_inspectable() {
        let err = FetchError::malformed("latlng has 1 element");
        assert_eq!(err.cause(), &Cause::Malformed("latlng has 1 element".into()));
    }
}
