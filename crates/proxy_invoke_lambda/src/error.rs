use std::fmt;
use std::io;

/// Any fault while building the request streams or running a handler.
#[derive(Debug)]
pub enum InvocationError {
    Io(io::Error),
    Serialization(serde_json::Error),
    Handler(String),
}

impl InvocationError {
    pub fn handler(message: impl Into<String>) -> Self {
        Self::Handler(message.into())
    }
}

impl fmt::Display for InvocationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(error) => write!(f, "stream I/O failed: {error}"),
            Self::Serialization(error) => write!(f, "JSON serialization failed: {error}"),
            Self::Handler(message) => write!(f, "handler failed: {message}"),
        }
    }
}

impl std::error::Error for InvocationError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(error) => Some(error),
            Self::Serialization(error) => Some(error),
            Self::Handler(_) => None,
        }
    }
}

impl From<io::Error> for InvocationError {
    fn from(error: io::Error) -> Self {
        Self::Io(error)
    }
}

impl From<serde_json::Error> for InvocationError {
    fn from(error: serde_json::Error) -> Self {
        Self::Serialization(error)
    }
}
