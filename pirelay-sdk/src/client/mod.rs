//! HTTP client for the upstream Pi Network payments API.
//!
//! Gated behind the `client` cargo feature so crates that only need the
//! wire types do not pull in `reqwest`.

mod payments;

pub use payments::{DEFAULT_BASE_URL, PiClient};

/// Errors produced by the Pi client.
///
/// A non-2xx upstream status is not an error here: it is returned as an
/// [`UpstreamResult`](crate::objects::UpstreamResult) so the caller can
/// forward the body verbatim.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// Transport-level failure (DNS, TLS, connection reset, …).
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    /// The payment URL could not be built.
    #[error("invalid url: {0}")]
    Url(#[from] url::ParseError),

    /// The request body could not be serialized.
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}
