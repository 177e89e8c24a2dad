use thiserror::Error;

/// Failure of a single request/response cycle.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TransportError {
    /// The server answered with a non-success status. `body` is the raw response text.
    #[error("server responded with {status}: {body}")]
    Status { status: u16, body: String },

    #[error("network error: {0}")]
    Network(String),

    #[error("could not decode response: {0}")]
    Decode(String),
}

impl From<reqwest::Error> for TransportError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_decode() {
            Self::Decode(e.to_string())
        } else {
            Self::Network(e.to_string())
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum EditorError {
    #[error("no row identifiers found for remove")]
    NoRowIdentifiers,

    #[error("editing is not available")]
    EditingUnavailable,

    #[error("row {0} is not on the current page")]
    UnknownRow(String),

    #[error(transparent)]
    Transport(#[from] TransportError),
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum GridError {
    #[error(transparent)]
    Transport(#[from] TransportError),

    #[error("unexpected response at {path}: {message}")]
    Response { path: String, message: String },

    #[error("server reported an error: {0}")]
    Server(String),

    #[error("no column named {0}")]
    UnknownColumn(String),

    #[error("page {0} is out of range")]
    PageOutOfRange(u64),
}
