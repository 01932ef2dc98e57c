//! Compatibility adapters over the raw driver handles.
//!
//! The two types here are the caller-facing surface of the crate:
//! [`Connection`] decorates a raw connection handle, [`Statement`] decorates
//! a raw statement handle. Together they make a defective legacy engine
//! present as a transactional, UTF-capable data source.

mod connection;
mod statement;

pub use connection::{Connection, TransactionStrategy};
pub use statement::Statement;
