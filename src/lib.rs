//! # jetbridge-rs
//!
//! Compatibility adapter for legacy Jet/Access-style ODBC engines that are
//! missing or misreporting two capabilities: native transaction control and
//! consistent text encoding.
//!
//! The crate decorates an underlying driver (abstracted by the traits in
//! [`driver`]) with two cooperating adapters: [`compat::Connection`] probes
//! and caches transaction support, emulating it with literal SQL commands
//! when absent, and repairs the driver's value-quoting defect;
//! [`compat::Statement`] rewrites parameter-binding metadata the engine
//! mishandles and transcodes every fetched string from the fixed legacy code
//! page into a caller-selected target encoding.
//!
//! Every operation is a direct, blocking call into the underlying driver.
//! Adapter methods take `&mut self`; use from one thread at a time.
//!
//! ## Example
//!
//! ```no_run
//! use jetbridge_rs::{ConnectParams, Connection, LegacyDriver};
//!
//! fn run(driver: &dyn LegacyDriver) -> Result<(), jetbridge_rs::JetError> {
//!     let params = ConnectParams::builder("DSN=Legacy;")
//!         .username("admin")
//!         .charset("UTF-8")
//!         .build();
//!
//!     let mut conn = Connection::establish(driver, &params)?;
//!
//!     conn.begin_transaction()?;
//!     let mut stmt = conn.query("SELECT name FROM people")?;
//!     let _names = stmt.fetch_first_column()?;
//!     conn.commit()?;
//!
//!     Ok(())
//! }
//! ```

// Module declarations
pub mod compat;
pub mod connection;
pub mod driver;
pub mod encoding;
pub mod error;

// Re-export public API
pub use compat::{Connection, Statement, TransactionStrategy};
pub use connection::params::{ConnectParams, ConnectParamsBuilder, Credentials};
pub use driver::values::{
    AssocRow, BindEncoding, ErrorReporting, ParamIndex, ParameterType, Row, Value,
};
pub use driver::{DriverConnection, DriverStatement, LegacyDriver};
pub use encoding::{EncodingConverter, SOURCE_ENCODING};
pub use error::{ConnectionError, EncodingError, JetError, QueryError};
