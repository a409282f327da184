use thiserror::Error;

#[derive(Error, Debug)]
pub enum ApiError {
    /// Connection failure, timeout, or a body that could not be read.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Unexpected HTTP status {0}")]
    Status(u16),

    /// The envelope came back with `success: false`.
    #[error("Request rejected ({status}): {message}")]
    Rejected { status: i32, message: String },

    #[error("Response envelope carried no payload")]
    MissingPayload,

    #[error("Malformed response body: {0}")]
    Decode(#[from] serde_json::Error),
}

impl ApiError {
    pub fn is_timeout(&self) -> bool {
        matches!(self, ApiError::Http(e) if e.is_timeout())
    }
}
