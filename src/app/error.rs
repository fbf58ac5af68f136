use std::fmt;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ReelError {
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("HTTP {status}: {message}")]
    HttpStatus { status: u16, message: String },

    #[error("Response parsing error: {0}")]
    Parse(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    /// Failure captured by a controller, surfaced again to the caller.
    #[error("{0}")]
    Fetch(ErrorInfo),
}

impl ReelError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ReelError::InvalidArgument(_) => ErrorKind::InvalidArgument,
            ReelError::Network(_) => ErrorKind::Network,
            ReelError::HttpStatus { status, .. } => ErrorKind::HttpStatus(*status),
            ReelError::Parse(_) => ErrorKind::Parse,
            ReelError::NotFound(_) => ErrorKind::NotFound,
            ReelError::Database(_) | ReelError::Io(_) => ErrorKind::Storage,
            ReelError::Config(_) => ErrorKind::Config,
            ReelError::Fetch(info) => info.kind,
        }
    }

    /// Flatten into the cloneable form kept by a
    /// [`FetchController`](crate::controller::FetchController).
    pub fn info(&self) -> ErrorInfo {
        if let ReelError::Fetch(info) = self {
            return info.clone();
        }
        ErrorInfo {
            kind: self.kind(),
            message: self.to_string(),
        }
    }
}

impl From<reqwest::Error> for ReelError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            ReelError::Network(format!("request timed out: {}", err))
        } else if err.is_decode() {
            // body arrived but could not be decompressed or decoded
            ReelError::Parse(err.to_string())
        } else {
            ReelError::Network(err.to_string())
        }
    }
}

impl From<serde_json::Error> for ReelError {
    fn from(err: serde_json::Error) -> Self {
        ReelError::Parse(err.to_string())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    InvalidArgument,
    Network,
    HttpStatus(u16),
    Parse,
    NotFound,
    Storage,
    Config,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorKind::InvalidArgument => write!(f, "invalid argument"),
            ErrorKind::Network => write!(f, "network"),
            ErrorKind::HttpStatus(code) => write!(f, "http status {}", code),
            ErrorKind::Parse => write!(f, "parse"),
            ErrorKind::NotFound => write!(f, "not found"),
            ErrorKind::Storage => write!(f, "storage"),
            ErrorKind::Config => write!(f, "config"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorInfo {
    pub kind: ErrorKind,
    pub message: String,
}

impl From<&ReelError> for ErrorInfo {
    fn from(err: &ReelError) -> Self {
        err.info()
    }
}

impl From<ReelError> for ErrorInfo {
    fn from(err: ReelError) -> Self {
        err.info()
    }
}

impl fmt::Display for ErrorInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

pub type Result<T> = std::result::Result<T, ReelError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_mapping() {
        assert_eq!(
            ReelError::InvalidArgument("x".into()).kind(),
            ErrorKind::InvalidArgument
        );
        assert_eq!(
            ReelError::HttpStatus {
                status: 503,
                message: "down".into()
            }
            .kind(),
            ErrorKind::HttpStatus(503)
        );
        assert_eq!(
            ReelError::Io(std::io::Error::other("disk")).kind(),
            ErrorKind::Storage
        );
    }

    #[test]
    fn test_info_carries_display_message() {
        let info = ReelError::NotFound("movie 7".into()).info();
        assert_eq!(info.kind, ErrorKind::NotFound);
        assert_eq!(info.message, "Not found: movie 7");
        assert_eq!(info.to_string(), "Not found: movie 7");
    }

    #[test]
    fn test_fetch_error_keeps_captured_info() {
        let captured = ReelError::HttpStatus {
            status: 502,
            message: "bad gateway".into(),
        }
        .info();
        let err = ReelError::Fetch(captured.clone());
        assert_eq!(err.kind(), ErrorKind::HttpStatus(502));
        assert_eq!(err.info(), captured);
        assert_eq!(err.to_string(), "HTTP 502: bad gateway");
    }

    #[test]
    fn test_json_error_is_parse() {
        let err: ReelError = serde_json::from_str::<u32>("nope").unwrap_err().into();
        assert_eq!(err.kind(), ErrorKind::Parse);
    }
}
