//! Driver boundary abstraction traits.
//!
//! This module defines the traits that abstract the underlying ODBC-style
//! engine binding. The adapters in [`crate::compat`] decorate these handles;
//! they never speak to an engine directly. Any binding that can satisfy this
//! surface (a real ODBC bridge, an in-memory fake for tests) plugs in here.

use crate::connection::params::ConnectParams;
use crate::error::{ConnectionError, QueryError};
use std::collections::HashMap;

use super::values::{
    AssocRow, BindEncoding, ErrorReporting, ParamIndex, ParameterType, Row, Value,
};

/// Entry point of an underlying driver: opens raw connection handles.
pub trait LegacyDriver {
    /// Open a connection to the data source named by the params' locator.
    ///
    /// The locator string is passed through verbatim; this layer does not
    /// parse DSN grammar.
    ///
    /// # Errors
    ///
    /// Returns `ConnectionError` if the engine refuses the connection.
    fn connect(&self, params: &ConnectParams) -> Result<Box<dyn DriverConnection>, ConnectionError>;
}

/// A raw connection handle of the underlying engine.
///
/// Every operation is a direct, blocking call into the driver. Failures are
/// signaled as errors once [`DriverConnection::set_error_reporting`] has
/// forced [`ErrorReporting::Strict`].
pub trait DriverConnection: Send {
    /// Set the connection's error-reporting mode.
    fn set_error_reporting(&mut self, mode: ErrorReporting) -> Result<(), ConnectionError>;

    /// Read the cached server-version attribute.
    ///
    /// The version is captured by the driver at connect time; reading it
    /// never issues a round-trip query.
    fn server_version(&self) -> Result<String, ConnectionError>;

    /// Begin a native transaction.
    fn begin(&mut self) -> Result<(), QueryError>;

    /// Commit the current native transaction.
    fn commit(&mut self) -> Result<(), QueryError>;

    /// Roll back the current native transaction.
    fn rollback(&mut self) -> Result<(), QueryError>;

    /// Execute a plain SQL command, returning the affected row count.
    fn exec(&mut self, sql: &str) -> Result<u64, QueryError>;

    /// Quote a value as a SQL literal for the given declared type.
    fn quote(&mut self, value: &str, ty: ParameterType) -> Result<String, QueryError>;

    /// Prepare a statement with driver options.
    fn prepare(
        &mut self,
        sql: &str,
        options: &HashMap<String, String>,
    ) -> Result<Box<dyn DriverStatement>, QueryError>;

    /// Execute a query directly, returning a statement positioned on its
    /// result set.
    fn query(&mut self, sql: &str) -> Result<Box<dyn DriverStatement>, QueryError>;
}

/// A raw prepared/executed statement handle of the underlying engine.
pub trait DriverStatement: Send {
    /// Bind a parameter with declared type, optional length, and optional
    /// engine-specific encoding flag. A length of 0 requests a
    /// driver-determined size.
    fn bind_param(
        &mut self,
        param: ParamIndex,
        value: Value,
        ty: ParameterType,
        length: Option<usize>,
        options: Option<BindEncoding>,
    ) -> Result<(), QueryError>;

    /// Execute the prepared statement with the currently bound parameters.
    fn execute(&mut self) -> Result<(), QueryError>;

    /// Fetch the first column of the next row, or `None` past the last row.
    fn fetch_one(&mut self) -> Result<Option<Value>, QueryError>;

    /// Fetch the next row positionally, or `None` past the last row.
    fn fetch_numeric(&mut self) -> Result<Option<Row>, QueryError>;

    /// Fetch the next row keyed by column name, or `None` past the last row.
    fn fetch_associative(&mut self) -> Result<Option<AssocRow>, QueryError>;

    /// Fetch all remaining rows positionally.
    fn fetch_all_numeric(&mut self) -> Result<Vec<Row>, QueryError>;

    /// Fetch all remaining rows keyed by column name.
    fn fetch_all_associative(&mut self) -> Result<Vec<AssocRow>, QueryError>;

    /// Fetch the first column of all remaining rows.
    fn fetch_first_column(&mut self) -> Result<Vec<Value>, QueryError>;
}
