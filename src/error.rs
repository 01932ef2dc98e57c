//! Error types for jetbridge-rs.
//!
//! This module defines domain-specific error types organized by functional area.

use thiserror::Error;

/// Top-level error type encompassing all possible errors.
#[derive(Error, Debug)]
pub enum JetError {
    /// Connection-related errors
    #[error(transparent)]
    Connection(#[from] ConnectionError),

    /// Statement and query errors
    #[error(transparent)]
    Query(#[from] QueryError),

    /// Target-encoding configuration errors
    #[error(transparent)]
    Encoding(#[from] EncodingError),
}

/// Errors signaled while establishing or configuring a connection.
#[derive(Error, Debug)]
pub enum ConnectionError {
    /// The underlying driver could not open the data source
    #[error("Failed to connect to '{locator}': {message}")]
    ConnectFailed { locator: String, message: String },

    /// The driver rejected a connection attribute
    #[error("Driver rejected connection attribute: {0}")]
    AttributeRejected(String),

    /// The cached server-version attribute could not be read
    #[error("Server version unavailable: {0}")]
    VersionUnavailable(String),

    /// The connection has been closed
    #[error("Connection is closed")]
    Closed,
}

/// Errors signaled by the underlying driver during statement work.
#[derive(Error, Debug)]
pub enum QueryError {
    /// A plain command failed to execute
    #[error("Execution failed: {0}")]
    ExecutionFailed(String),

    /// The driver could not prepare the statement
    #[error("Failed to prepare statement: {0}")]
    PrepareFailed(String),

    /// Parameter binding was rejected
    #[error("Parameter binding failed for {param}: {message}")]
    BindFailed { param: String, message: String },

    /// A fetch operation failed
    #[error("Fetch failed: {0}")]
    FetchFailed(String),

    /// A native or emulated transaction command failed
    #[error("Transaction command failed: {0}")]
    TransactionFailed(String),

    /// The driver's quoting routine failed
    #[error("Failed to quote value: {0}")]
    QuoteFailed(String),
}

/// Errors in the target-encoding configuration.
#[derive(Error, Debug)]
pub enum EncodingError {
    /// The `charset` option named an encoding label the converter does not know
    #[error("Unknown target charset label '{0}'")]
    UnknownCharset(String),
}

impl JetError {
    /// Map to a five-character ODBC SQLSTATE class.
    pub fn sqlstate(&self) -> &'static str {
        match self {
            JetError::Connection(e) => e.sqlstate(),
            JetError::Query(e) => e.sqlstate(),
            JetError::Encoding(e) => e.sqlstate(),
        }
    }
}

impl ConnectionError {
    /// Map to a five-character ODBC SQLSTATE class.
    pub fn sqlstate(&self) -> &'static str {
        match self {
            ConnectionError::ConnectFailed { .. } => "08001",
            ConnectionError::AttributeRejected(_) => "HY092",
            ConnectionError::VersionUnavailable(_) => "HY000",
            ConnectionError::Closed => "08003",
        }
    }
}

impl QueryError {
    /// Map to a five-character ODBC SQLSTATE class.
    pub fn sqlstate(&self) -> &'static str {
        match self {
            QueryError::ExecutionFailed(_) => "HY000",
            QueryError::PrepareFailed(_) => "42000",
            QueryError::BindFailed { .. } => "07009",
            QueryError::FetchFailed(_) => "24000",
            QueryError::TransactionFailed(_) => "25000",
            QueryError::QuoteFailed(_) => "HY000",
        }
    }
}

impl EncodingError {
    /// Map to a five-character ODBC SQLSTATE class.
    pub fn sqlstate(&self) -> &'static str {
        match self {
            EncodingError::UnknownCharset(_) => "HY024",
        }
    }
}
