//! Error types for the CZDS API client.
//!
//! This module provides a single error type that covers every failure mode
//! of the client: authentication, zone list retrieval, zone download,
//! decompression and persistence.

use std::path::PathBuf;

use thiserror::Error;

use crate::models::ZoneId;

/// A specialized `Result` type for CZDS operations.
pub type Result<T> = std::result::Result<T, Error>;

/// The main error type for all CZDS API operations.
#[derive(Error, Debug)]
pub enum Error {
    /// No access token is held; authenticate before calling the API.
    #[error("Must refresh access token")]
    MustRefresh,

    /// The authentication endpoint rejected the credentials (401).
    #[error("ICANN credentials incorrect")]
    IncorrectCredentials,

    /// The authentication endpoint rate-limited the caller (429).
    #[error("Too many authentications too quickly")]
    TooManyAuthentications,

    /// The API rejected the shape of the request (400).
    #[error("Malformed request: {url}")]
    MalformedRequest {
        /// The URL that rejected the request
        url: String,
    },

    /// The API failed on its side (500).
    #[error("ICANN internal server error: {url}")]
    UpstreamInternalError {
        /// The URL that failed
        url: String,
    },

    /// The zone exists but the account is not entitled to it (403).
    #[error("Zone {zone} unavailable to you")]
    ZoneUnavailable {
        /// The requested zone
        zone: ZoneId,
    },

    /// The zone does not exist (404).
    #[error("Zone file {zone} does not exist")]
    ZoneNotExist {
        /// The requested zone
        zone: ZoneId,
    },

    /// The CZDS terms and conditions must be accepted for this zone (409).
    #[error("User must accept ICANN CZDS terms and conditions for zone {zone}")]
    TermsNotAccepted {
        /// The requested zone
        zone: ZoneId,
    },

    /// The API answered with a status this client has no mapping for.
    #[error("Unexpected HTTP status {status} from {url}")]
    UnexpectedStatus {
        /// HTTP status code
        status: u16,
        /// The URL that answered
        url: String,
    },

    /// HTTP transport failed (connection, TLS, timeout, body read)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON response body could not be decoded
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Zone body is not valid gzip, or is truncated
    #[error("Failed to decompress zone {zone}: {source}")]
    Gzip {
        /// The zone being decompressed
        zone: ZoneId,
        /// The decoder error
        #[source]
        source: std::io::Error,
    },

    /// Writing a zone file to disk failed
    #[error("IO error writing to {path}: {source}")]
    Io {
        /// The output path
        path: PathBuf,
        /// The underlying IO error
        #[source]
        source: std::io::Error,
    },

    /// URL parsing error
    #[error("URL parse error: {0}")]
    UrlParse(#[from] url::ParseError),

    /// Invalid input provided to a function
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// The batch was cancelled before this zone was fetched
    #[error("Download of zone {zone} cancelled")]
    Cancelled {
        /// The zone that was skipped
        zone: ZoneId,
    },

    /// A download worker panicked or was aborted
    #[error("Download task for zone {zone} failed: {message}")]
    Task {
        /// The zone the worker was handling
        zone: ZoneId,
        /// Join error description
        message: String,
    },
}

/// Classification of an [`Error`], convenient for matching and reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// See [`Error::MustRefresh`]
    MustRefresh,
    /// See [`Error::IncorrectCredentials`]
    IncorrectCredentials,
    /// See [`Error::TooManyAuthentications`]
    TooManyAuthentications,
    /// See [`Error::MalformedRequest`]
    MalformedRequest,
    /// See [`Error::UpstreamInternalError`]
    UpstreamInternalError,
    /// See [`Error::ZoneUnavailable`]
    ZoneUnavailable,
    /// See [`Error::ZoneNotExist`]
    ZoneNotExist,
    /// See [`Error::TermsNotAccepted`]
    TermsNotAccepted,
    /// Response body was not valid JSON or gzip
    Decode,
    /// Network-level failure
    Transport,
    /// See [`Error::UnexpectedStatus`]
    UnexpectedStatus,
    /// See [`Error::Io`]
    Io,
    /// Invalid caller input or configuration
    InvalidInput,
    /// See [`Error::Cancelled`]
    Cancelled,
    /// See [`Error::Task`]
    Task,
}

impl Error {
    /// Returns the [`ErrorKind`] of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::MustRefresh => ErrorKind::MustRefresh,
            Error::IncorrectCredentials => ErrorKind::IncorrectCredentials,
            Error::TooManyAuthentications => ErrorKind::TooManyAuthentications,
            Error::MalformedRequest { .. } => ErrorKind::MalformedRequest,
            Error::UpstreamInternalError { .. } => ErrorKind::UpstreamInternalError,
            Error::ZoneUnavailable { .. } => ErrorKind::ZoneUnavailable,
            Error::ZoneNotExist { .. } => ErrorKind::ZoneNotExist,
            Error::TermsNotAccepted { .. } => ErrorKind::TermsNotAccepted,
            Error::Json(_) | Error::Gzip { .. } => ErrorKind::Decode,
            Error::Http(_) => ErrorKind::Transport,
            Error::UnexpectedStatus { .. } => ErrorKind::UnexpectedStatus,
            Error::Io { .. } => ErrorKind::Io,
            Error::UrlParse(_) | Error::InvalidInput(_) => ErrorKind::InvalidInput,
            Error::Cancelled { .. } => ErrorKind::Cancelled,
            Error::Task { .. } => ErrorKind::Task,
        }
    }

    /// Returns `true` if the caller has to (re-)authenticate.
    ///
    /// # Example
    ///
    /// ```
    /// use czds_rs::Error;
    ///
    /// assert!(Error::MustRefresh.is_auth_error());
    /// assert!(Error::IncorrectCredentials.is_auth_error());
    /// ```
    pub fn is_auth_error(&self) -> bool {
        matches!(
            self,
            Error::MustRefresh | Error::IncorrectCredentials | Error::TooManyAuthentications
        )
    }

    /// Returns `true` if the zone is withheld from this account
    /// (not entitled, or terms not accepted).
    pub fn is_access_error(&self) -> bool {
        matches!(
            self,
            Error::ZoneUnavailable { .. } | Error::TermsNotAccepted { .. }
        )
    }

    /// Returns `true` if the same call might succeed later.
    ///
    /// The client never retries on its own; this is a hint for callers
    /// implementing their own back-off.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            Error::Http(_) | Error::TooManyAuthentications | Error::UpstreamInternalError { .. }
        )
    }

    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Error::Io {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn gzip(zone: &ZoneId, source: std::io::Error) -> Self {
        Error::Gzip {
            zone: zone.clone(),
            source,
        }
    }

    pub(crate) fn unexpected_status(status: reqwest::StatusCode, url: &str) -> Self {
        Error::UnexpectedStatus {
            status: status.as_u16(),
            url: url.to_string(),
        }
    }
}
