use thiserror::Error;

/// Errors raised while talking to the remote gallery.
#[derive(Error, Debug)]
pub enum GalleryError {
    /// Connection, TLS, timeout or body read failure
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// Endpoint answered with a non-success HTTP status
    #[error("Unexpected HTTP status {status}: {body}")]
    Status { status: u16, body: String },

    /// Body was not a gallery payload
    #[error("Malformed gallery payload: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Gallery client id is not configured")]
    MissingClientId,

    #[error("Gallery client id cannot be used as a header value")]
    InvalidClientId,

    #[error("Gallery request timeout must be at least one second")]
    ZeroTimeout,
}

impl GalleryError {
    /// Status code reported by the endpoint, if the request got that far
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            Self::Network(err) => err.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}
