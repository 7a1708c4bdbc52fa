//! Error types for dataverse-api.

use thiserror::Error;

/// Boxed error used for transport and body failures, independent of the
/// concrete [`Transport`](crate::Transport) in use.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid URL escape: {0}")]
    UrlDecode(String),

    #[error("signing request failed: {0}")]
    SigningTransport(#[source] BoxError),

    /// The signing service answered with a non-`OK` status. Displays the
    /// service message verbatim.
    #[error("{0}")]
    SigningRejected(String),

    #[error("malformed signed URL: {0}")]
    MalformedSignedUrl(#[from] url::ParseError),

    #[error("malformed signed URL query: {0}")]
    MalformedSignatureQuery(String),

    #[error("unknown user: {0}")]
    UnknownUser(String),

    #[error("missing signature fields: {}", .0.join(", "))]
    MissingSignatureFields(Vec<&'static str>),

    #[error("failed to encode request body: {0}")]
    Encode(#[source] serde_json::Error),

    #[error("invalid request: {0}")]
    InvalidRequest(String),

    #[error("request failed: {0}")]
    Transport(#[source] BoxError),

    #[error("failed to read response body: {0}")]
    Read(#[source] BoxError),

    #[error("failed to decode response body: {0}")]
    Decode(#[source] serde_json::Error),

    #[error(transparent)]
    Config(#[from] figment::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
