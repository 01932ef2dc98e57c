//! Transcoding of fetched values from the legacy code page to a target encoding.
//!
//! The engine returns all character data in a fixed single-byte Western code
//! page. This module provides the pure transformation functions that re-encode
//! those bytes into a caller-selected target encoding, fanned out over every
//! result shape the statement adapter produces: scalars, rows, row
//! collections, and flat columns. Inputs are consumed and new values returned;
//! nothing is mutated in place.

use crate::driver::values::{AssocRow, Row, Value};
use crate::error::EncodingError;
use encoding_rs::Encoding;

/// The fixed code page all raw engine strings are assumed to use.
///
/// Only the *target* encoding is configurable; the source side is a property
/// of the engine, not of the caller.
pub static SOURCE_ENCODING: &Encoding = &encoding_rs::WINDOWS_1252_INIT;

/// Converter holding the target encoding for one statement.
///
/// A converter with no target is the identity: every value passes through
/// byte-identical.
#[derive(Debug, Clone, Copy)]
pub struct EncodingConverter {
    target: Option<&'static Encoding>,
}

impl EncodingConverter {
    /// Create a converter with an optional target encoding.
    pub fn new(target: Option<&'static Encoding>) -> Self {
        Self { target }
    }

    /// Create the identity converter (no conversion requested).
    pub fn identity() -> Self {
        Self { target: None }
    }

    /// Resolve a charset label (e.g. `"UTF-8"`) into a converter.
    ///
    /// # Errors
    ///
    /// Returns [`EncodingError::UnknownCharset`] if the label is not a
    /// recognized encoding name.
    pub fn from_label(label: &str) -> Result<Self, EncodingError> {
        match Encoding::for_label(label.as_bytes()) {
            Some(encoding) => Ok(Self {
                target: Some(encoding),
            }),
            None => Err(EncodingError::UnknownCharset(label.to_string())),
        }
    }

    /// Get the target encoding, if any.
    pub fn target(&self) -> Option<&'static Encoding> {
        self.target
    }

    /// Check whether this converter passes values through unchanged.
    pub fn is_identity(&self) -> bool {
        self.target.is_none()
    }

    /// Transcode a single value.
    ///
    /// Text values are decoded from [`SOURCE_ENCODING`] and re-encoded into
    /// the target. Null, numeric, boolean, and binary values pass through
    /// untouched, as does everything when no target is configured.
    pub fn convert_value(&self, value: Value) -> Value {
        match (self.target, value) {
            (Some(target), Value::Text(bytes)) => {
                let (decoded, _) = SOURCE_ENCODING.decode_without_bom_handling(&bytes);
                let (encoded, _, _) = target.encode(&decoded);
                Value::Text(encoded.into_owned())
            }
            (_, value) => value,
        }
    }

    /// Transcode an optional scalar (absent values stay absent).
    pub fn convert_scalar(&self, value: Option<Value>) -> Option<Value> {
        value.map(|v| self.convert_value(v))
    }

    /// Transcode every value of a positional row.
    pub fn convert_row(&self, row: Row) -> Row {
        row.into_iter().map(|v| self.convert_value(v)).collect()
    }

    /// Transcode every value of a named row, keys untouched.
    pub fn convert_assoc_row(&self, row: AssocRow) -> AssocRow {
        row.into_iter()
            .map(|(key, v)| (key, self.convert_value(v)))
            .collect()
    }

    /// Transcode a collection of positional rows, order and count preserved.
    pub fn convert_rows(&self, rows: Vec<Row>) -> Vec<Row> {
        rows.into_iter().map(|row| self.convert_row(row)).collect()
    }

    /// Transcode a collection of named rows, order and count preserved.
    pub fn convert_assoc_rows(&self, rows: Vec<AssocRow>) -> Vec<AssocRow> {
        rows.into_iter()
            .map(|row| self.convert_assoc_row(row))
            .collect()
    }

    /// Transcode every element of a flat column.
    pub fn convert_column(&self, column: Vec<Value>) -> Vec<Value> {
        column.into_iter().map(|v| self.convert_value(v)).collect()
    }
}

impl Default for EncodingConverter {
    fn default() -> Self {
        Self::identity()
    }
}
