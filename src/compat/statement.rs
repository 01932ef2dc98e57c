//! Statement adapter.
//!
//! This module provides the `Statement` type which wraps one raw statement
//! handle of the underlying engine and compensates for its defects: binding
//! metadata is rewritten for types the engine mishandles, and every string
//! value fetched out of a result set is transcoded from the legacy code page
//! into the target encoding chosen at connection time.

use crate::driver::values::{
    AssocRow, BindEncoding, ParamIndex, ParameterType, Row, Value,
};
use crate::driver::DriverStatement;
use crate::encoding::EncodingConverter;
use crate::error::QueryError;
use encoding_rs::Encoding;

/// Adapter over one prepared/executed statement of the underlying engine.
///
/// A `Statement` is produced by [`Connection::prepare`] and
/// [`Connection::query`](crate::compat::Connection::query); the connection
/// injects its target-encoding snapshot at creation time. The snapshot is
/// frozen: later changes to the connection's charset do not affect statements
/// that already exist.
///
/// [`Connection::prepare`]: crate::compat::Connection::prepare
///
/// # Example
///
/// ```no_run
/// # use jetbridge_rs::compat::Connection;
/// # use jetbridge_rs::error::JetError;
/// # fn example(conn: &mut Connection) -> Result<(), JetError> {
/// let mut stmt = conn.prepare("SELECT name FROM people WHERE id = ?", None)?;
/// stmt.bind_param(1, 42i64.into(), jetbridge_rs::ParameterType::Integer, None, None)?;
/// stmt.execute()?;
/// let name = stmt.fetch_one()?;
/// # Ok(())
/// # }
/// ```
pub struct Statement {
    /// Raw statement handle, owned 1:1
    raw: Box<dyn DriverStatement>,
    /// Encoding snapshot taken from the connection at creation
    converter: EncodingConverter,
}

impl Statement {
    /// Wrap a raw statement handle with no conversion configured.
    pub(crate) fn new(raw: Box<dyn DriverStatement>) -> Self {
        Self {
            raw,
            converter: EncodingConverter::identity(),
        }
    }

    /// Set the target encoding for fetched strings.
    ///
    /// Called once by the owning connection when the statement is produced.
    /// Idempotent if called again; application code normally never needs it.
    pub fn set_target_encoding(&mut self, target: Option<&'static Encoding>) {
        self.converter = EncodingConverter::new(target);
    }

    /// Get the target encoding this statement converts into, if any.
    pub fn target_encoding(&self) -> Option<&'static Encoding> {
        self.converter.target()
    }

    /// Bind a parameter, rewriting metadata the engine mishandles.
    ///
    /// Two rewrites are applied before delegation:
    ///
    /// * `Binary` and `LargeObject` parameters with no explicit encoding flag
    ///   get [`BindEncoding::Binary`] so the byte sequence is transmitted
    ///   untouched.
    /// * `Ascii` parameters are re-declared as `String` with a
    ///   driver-determined length (`0`) and [`BindEncoding::System`],
    ///   overriding whatever length or flag the caller supplied.
    ///
    /// All other declared types pass through unchanged.
    ///
    /// # Errors
    ///
    /// Returns `QueryError` if the underlying bind is rejected.
    pub fn bind_param(
        &mut self,
        param: impl Into<ParamIndex>,
        value: Value,
        ty: ParameterType,
        length: Option<usize>,
        options: Option<BindEncoding>,
    ) -> Result<(), QueryError> {
        let (ty, length, options) = match ty {
            ParameterType::Binary | ParameterType::LargeObject => {
                (ty, length, options.or(Some(BindEncoding::Binary)))
            }
            ParameterType::Ascii => (
                ParameterType::String,
                Some(0),
                Some(BindEncoding::System),
            ),
            _ => (ty, length, options),
        };

        self.raw.bind_param(param.into(), value, ty, length, options)
    }

    /// Execute the statement with the currently bound parameters.
    ///
    /// # Errors
    ///
    /// Returns `QueryError` if execution fails.
    pub fn execute(&mut self) -> Result<(), QueryError> {
        self.raw.execute()
    }

    /// Fetch the first column of the next row, transcoded.
    ///
    /// Returns `None` past the last row.
    pub fn fetch_one(&mut self) -> Result<Option<Value>, QueryError> {
        let value = self.raw.fetch_one()?;
        Ok(self.converter.convert_scalar(value))
    }

    /// Fetch the next row positionally, every string column transcoded.
    pub fn fetch_numeric(&mut self) -> Result<Option<Row>, QueryError> {
        let row = self.raw.fetch_numeric()?;
        Ok(row.map(|r| self.converter.convert_row(r)))
    }

    /// Fetch the next row keyed by column name, every string column transcoded.
    pub fn fetch_associative(&mut self) -> Result<Option<AssocRow>, QueryError> {
        let row = self.raw.fetch_associative()?;
        Ok(row.map(|r| self.converter.convert_assoc_row(r)))
    }

    /// Fetch all remaining rows positionally, row order and count preserved.
    pub fn fetch_all_numeric(&mut self) -> Result<Vec<Row>, QueryError> {
        let rows = self.raw.fetch_all_numeric()?;
        Ok(self.converter.convert_rows(rows))
    }

    /// Fetch all remaining rows keyed by column name, row order and count
    /// preserved.
    pub fn fetch_all_associative(&mut self) -> Result<Vec<AssocRow>, QueryError> {
        let rows = self.raw.fetch_all_associative()?;
        Ok(self.converter.convert_assoc_rows(rows))
    }

    /// Fetch the first column of all remaining rows, every element transcoded.
    pub fn fetch_first_column(&mut self) -> Result<Vec<Value>, QueryError> {
        let column = self.raw.fetch_first_column()?;
        Ok(self.converter.convert_column(column))
    }
}

impl std::fmt::Debug for Statement {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Statement")
            .field("target_encoding", &self.converter.target().map(|e| e.name()))
            .finish()
    }
}
