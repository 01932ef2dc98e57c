//! Connection configuration for legacy data sources.
//!
//! This module provides the connect-parameter surface: a verbatim locator
//! string, optional credentials, and a free-form options mapping.
//!
//! # Example
//!
//! ```
//! use jetbridge_rs::connection::ConnectParams;
//!
//! let params = ConnectParams::builder("DSN=Legacy;")
//!     .username("admin")
//!     .password("secret")
//!     .charset("UTF-8")
//!     .build();
//!
//! assert_eq!(params.locator(), "DSN=Legacy;");
//! assert_eq!(params.charset(), Some("UTF-8"));
//! ```

pub mod params;

pub use params::{ConnectParams, ConnectParamsBuilder, Credentials, OPTION_CHARSET};
