//! Error types for experimental-db
//!
//! Every failure belongs to one of three kinds (see [`ErrorKind`]):
//! connection failures raised by `connect`, query failures raised by the
//! lookups, and configuration failures raised while loading options.
//! Nothing is retried or recovered locally.

use thiserror::Error;

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;

/// Broad classification of an [`Error`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The session could not be established
    Connection,
    /// A lookup could not be executed or its rows could not be shaped
    Query,
    /// Connection options could not be loaded
    Config,
}

/// experimental-db error types
#[derive(Error, Debug)]
pub enum Error {
    /// Opening the database failed (missing database, rejected session)
    #[error("failed to connect to database '{database}': {reason}")]
    Connection {
        /// Database the session was opened against
        database: String,
        /// Backend-reported cause
        reason: String,
    },

    /// The backend cannot reach the requested host
    #[error("host unreachable: {0}")]
    HostUnreachable(String),

    /// Connection options failed validation before any I/O
    #[error("invalid connection options: {0}")]
    InvalidOptions(String),

    /// A lookup was issued before a session was established
    #[error("not connected: call connect() before querying")]
    NotConnected,

    /// The database rejected or failed a lookup
    #[error("query failed: {0}")]
    Query(#[from] rusqlite::Error),

    /// The queried table does not exist
    #[error("no such table: {0}")]
    MissingTable(String),

    /// A row lacks a column its table requires
    #[error("row from '{table}' is missing required column '{column}'")]
    MissingColumn {
        /// Table the row came from
        table: &'static str,
        /// Required column that was absent or NULL
        column: &'static str,
    },

    /// Configuration could not be parsed or is incomplete
    #[error("configuration error: {0}")]
    Config(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Classify this error.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::Connection { .. } | Self::HostUnreachable(_) | Self::InvalidOptions(_) => {
                ErrorKind::Connection
            }
            Self::NotConnected
            | Self::Query(_)
            | Self::MissingTable(_)
            | Self::MissingColumn { .. } => ErrorKind::Query,
            Self::Config(_) | Self::Io(_) => ErrorKind::Config,
        }
    }

    /// True for connection-kind failures.
    #[must_use]
    pub const fn is_connection(&self) -> bool {
        matches!(self.kind(), ErrorKind::Connection)
    }

    /// True for query-kind failures.
    #[must_use]
    pub const fn is_query(&self) -> bool {
        matches!(self.kind(), ErrorKind::Query)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_classification() {
        assert_eq!(Error::NotConnected.kind(), ErrorKind::Query);
        assert_eq!(
            Error::HostUnreachable("db.example.org".into()).kind(),
            ErrorKind::Connection
        );
        assert_eq!(Error::Config("bad".into()).kind(), ErrorKind::Config);
        assert!(Error::InvalidOptions("empty user".into()).is_connection());
        assert!(Error::MissingTable("stimuli".into()).is_query());
    }

    #[test]
    fn test_sqlite_error_is_query_kind() {
        let error: Error = rusqlite::Error::InvalidQuery.into();
        assert!(error.is_query());
        assert!(format!("{error}").starts_with("query failed"));
    }
}
