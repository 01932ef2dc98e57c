//! Underlying-driver boundary: abstraction traits and the value model.
//!
//! The engine binding itself lives outside this crate; these traits specify
//! exactly the call surface the adapters consume.

pub mod protocol;
pub mod values;

pub use protocol::{DriverConnection, DriverStatement, LegacyDriver};
pub use values::{
    AssocRow, BindEncoding, ErrorReporting, ParamIndex, ParameterType, Row, Value,
};
