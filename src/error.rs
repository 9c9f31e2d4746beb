//! Error Types
//!
//! Every failure the frontend can meet while talking to the backend or the
//! local mirror. None of them is fatal: callers log, report and move on.

pub type Result<T> = core::result::Result<T, Error>;

pub struct Error {
    pub inner: Box<ErrorKind>,
}

impl Error {
    pub fn new(kind: ErrorKind) -> Error {
        Error {
            inner: Box::new(kind),
        }
    }

    pub fn kind(&self) -> &ErrorKind {
        &self.inner
    }
}

impl std::fmt::Debug for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{:?}", self.inner)
    }
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}", self.inner)
    }
}

impl std::error::Error for Error {}

impl From<ErrorKind> for Error {
    fn from(kind: ErrorKind) -> Error {
        Error::new(kind)
    }
}

impl From<gloo_net::Error> for Error {
    fn from(e: gloo_net::Error) -> Error {
        match e {
            gloo_net::Error::SerdeError(e) => Error::new(ErrorKind::Decode(e.to_string())),
            other => Error::new(ErrorKind::Network(other.to_string())),
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Error {
        Error::new(ErrorKind::Decode(e.to_string()))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ErrorKind {
    /// Request never produced a response
    Network(String),
    /// Response with a non-success HTTP status
    Status { code: u16, message: String },
    /// Response body that does not match the expected shape
    Decode(String),
    /// Missing, unreadable or unwritable mirror entry
    Cache(String),
    /// Input rejected before any request was sent
    Validation(String),
    /// Backend answered but refused the operation
    Rejected(String),
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            ErrorKind::Network(e) => write!(f, "network error: {e}"),
            ErrorKind::Status { code, message } => write!(f, "server returned {code}: {message}"),
            ErrorKind::Decode(e) => write!(f, "unexpected response: {e}"),
            ErrorKind::Cache(e) => write!(f, "local cache error: {e}"),
            ErrorKind::Validation(e) => write!(f, "invalid input: {e}"),
            ErrorKind::Rejected(e) => write!(f, "request rejected: {e}"),
        }
    }
}
