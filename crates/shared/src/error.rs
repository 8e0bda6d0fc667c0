//! Error taxonomy for the online simplification path.
//!
//! Every variant is recoverable: the orchestrator absorbs all of them by
//! falling back to the offline simplifier.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    /// No credential configured. Disables the online path, not a failure.
    #[error("no API key configured")]
    NoKey,
    /// Connection, DNS, TLS, or timeout trouble talking to the endpoint.
    #[error("network failure: {0}")]
    Network(String),
    /// The endpoint refused the request with a quota/rate signal.
    #[error("rate limited by the API")]
    RateLimited,
    /// A 2xx response that is missing the generated-text field.
    #[error("response missing generated text")]
    MalformedResponse,
}

impl ApiError {
    pub fn kind(&self) -> &'static str {
        match self {
            ApiError::NoKey => "no_key",
            ApiError::Network(_) => "network_failure",
            ApiError::RateLimited => "rate_limited",
            ApiError::MalformedResponse => "malformed_response",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_strings() {
        assert_eq!(ApiError::NoKey.kind(), "no_key");
        assert_eq!(ApiError::Network("refused".into()).kind(), "network_failure");
        assert_eq!(ApiError::RateLimited.kind(), "rate_limited");
        assert_eq!(ApiError::MalformedResponse.kind(), "malformed_response");
    }
}
