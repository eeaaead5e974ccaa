use reqwest::StatusCode;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ClientError {
    /// The request could not be sent or the connection failed mid-stream.
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The service answered with a non-success status.
    #[error("server returned {status}: {body}")]
    Status { status: StatusCode, body: String },

    /// The analysis pipeline reported a failure inside the event stream.
    #[error("analysis failed: {0}")]
    Analysis(String),

    /// The request was rejected before any network I/O.
    #[error("invalid request: {0}")]
    InvalidRequest(String),
}

pub type Result<T> = std::result::Result<T, ClientError>;
