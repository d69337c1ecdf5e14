use std::fmt;

/// Why an upstream payload could not be turned into media.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Malformed {
    /// Neither `url` nor `media`/`items` present, or an empty carousel
    MissingContent,
    /// Unknown `type`, wrong field types, missing field for the declared type
    Invalid(String),
}

impl fmt::Display for Malformed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Malformed::MissingContent => write!(f, "no downloadable content in response"),
            Malformed::Invalid(msg) => write!(f, "{}", msg),
        }
    }
}

/// Structured error type for extraction requests.
///
/// Every failure of a single fetch → decode pass lands in one of these
/// categories; none of them is retried.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchError {
    /// Transport failure or a non-success HTTP status
    Network(String),
    /// Body missing or not JSON, or the upstream reported an error
    Service(String),
    /// Payload is JSON but not a recognizable media description
    MalformedResponse(Malformed),
    /// Anything else (e.g. request could not be built from configuration)
    Unknown(String),
}

impl fmt::Display for FetchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FetchError::Network(msg) => write!(f, "{}", msg),
            FetchError::Service(msg) => write!(f, "{}", msg),
            FetchError::MalformedResponse(reason) => write!(f, "malformed response: {}", reason),
            FetchError::Unknown(msg) => write!(f, "{}", msg),
        }
    }
}

impl std::error::Error for FetchError {}

impl FetchError {
    /// Returns subcategory for logging
    pub fn subcategory(&self) -> &'static str {
        match self {
            FetchError::Network(_) => "network",
            FetchError::Service(_) => "service",
            FetchError::MalformedResponse(_) => "malformed_response",
            FetchError::Unknown(_) => "unknown",
        }
    }

    /// Shorthand for `MalformedResponse(Malformed::Invalid(..))`
    pub fn invalid(msg: impl Into<String>) -> Self {
        FetchError::MalformedResponse(Malformed::Invalid(msg.into()))
    }
}

/// Classifies a reqwest failure: builder problems are configuration issues,
/// everything else happened on the wire.
impl From<reqwest::Error> for FetchError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_builder() {
            FetchError::Unknown(format!("failed to build request: {}", err))
        } else {
            FetchError::Network(format!("request failed: {}", err))
        }
    }
}
