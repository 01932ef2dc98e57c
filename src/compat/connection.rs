//! Connection adapter.
//!
//! This module provides the `Connection` type which wraps one raw connection
//! handle of the underlying engine and makes it behave like a fully
//! transactional, UTF-capable data source: transaction support is probed at
//! runtime and emulated with literal SQL commands when the engine lacks it,
//! the driver's quoting defect is repaired, and every statement produced is
//! configured with the connection's target encoding.

use crate::connection::params::ConnectParams;
use crate::driver::values::{ErrorReporting, ParameterType};
use crate::driver::{DriverConnection, LegacyDriver};
use crate::error::{ConnectionError, EncodingError, JetError, QueryError};
use encoding_rs::Encoding;
use std::collections::HashMap;

use super::Statement;

/// SQL issued in place of a native begin when the engine lacks transactions.
const EMULATED_BEGIN: &str = "BEGIN TRANSACTION";
/// SQL issued in place of a native commit.
const EMULATED_COMMIT: &str = "COMMIT TRANSACTION";
/// SQL issued in place of a native rollback.
const EMULATED_ROLLBACK: &str = "ROLLBACK TRANSACTION";

/// How transaction control is carried out on this connection.
///
/// Resolved once per connection by a live probe; see
/// [`Connection::transactions_supported`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransactionStrategy {
    /// Delegate to the engine's built-in begin/commit/rollback
    Native,
    /// Issue literal `BEGIN/COMMIT/ROLLBACK TRANSACTION` commands
    Emulated,
}

/// Adapter over one connection of the underlying engine.
///
/// # Example
///
/// ```no_run
/// use jetbridge_rs::compat::Connection;
/// use jetbridge_rs::connection::ConnectParams;
/// use jetbridge_rs::driver::LegacyDriver;
///
/// # fn example(driver: &dyn LegacyDriver) -> Result<(), jetbridge_rs::JetError> {
/// let params = ConnectParams::builder("DSN=Legacy;")
///     .charset("UTF-8")
///     .build();
/// let mut conn = Connection::establish(driver, &params)?;
///
/// conn.begin_transaction()?;
/// let mut stmt = conn.query("SELECT name FROM people")?;
/// let names = stmt.fetch_first_column()?;
/// conn.commit()?;
/// # Ok(())
/// # }
/// ```
pub struct Connection {
    /// Raw connection handle, owned 1:1
    raw: Box<dyn DriverConnection>,
    /// Cached probe result; `None` until the first transaction operation
    transactions: Option<TransactionStrategy>,
    /// Target encoding injected into every statement this connection produces
    target_encoding: Option<&'static Encoding>,
}

impl Connection {
    /// Establish a connection through the given driver.
    ///
    /// The raw handle is switched to strict error reporting (failures are
    /// signaled, never silent status codes) and the `charset` option, if
    /// present, is resolved into the target encoding used by all statements
    /// this connection produces.
    ///
    /// # Errors
    ///
    /// Returns `ConnectionError` if the driver refuses the connection or the
    /// attribute change, and `EncodingError` if the `charset` label is not a
    /// recognized encoding name.
    pub fn establish(
        driver: &dyn LegacyDriver,
        params: &ConnectParams,
    ) -> Result<Self, JetError> {
        let mut raw = driver.connect(params)?;
        raw.set_error_reporting(ErrorReporting::Strict)?;

        let target_encoding = match params.charset() {
            Some(label) => Some(resolve_charset(label)?),
            None => None,
        };

        log::debug!(
            "connection established to '{}' (charset: {:?})",
            params.locator(),
            target_encoding.map(|e| e.name()),
        );

        Ok(Self {
            raw,
            transactions: None,
            target_encoding,
        })
    }

    /// Wrap an already-open raw handle.
    ///
    /// Used when the caller manages the connect step itself; strict error
    /// reporting must already be in force on the handle.
    pub fn from_raw(
        raw: Box<dyn DriverConnection>,
        target_encoding: Option<&'static Encoding>,
    ) -> Self {
        Self {
            raw,
            transactions: None,
            target_encoding,
        }
    }

    /// Check whether the engine supports native transactions.
    ///
    /// The first call probes the live connection: a native begin immediately
    /// followed by a native commit. Both succeeding records `Native`; any
    /// failure records `Emulated`. The probe therefore opens and immediately
    /// closes one real transaction, exactly once per connection; the cached
    /// result answers every later call without side effects.
    ///
    /// A probe failure is the one error this crate absorbs rather than
    /// propagates. It cannot distinguish an engine without transactions from
    /// a transient fault during the probe, so the suppressed error is logged.
    pub fn transactions_supported(&mut self) -> bool {
        self.strategy() == TransactionStrategy::Native
    }

    /// Begin a transaction, natively or emulated.
    ///
    /// # Errors
    ///
    /// Returns `QueryError` if the chosen begin command fails.
    pub fn begin_transaction(&mut self) -> Result<(), QueryError> {
        match self.strategy() {
            TransactionStrategy::Native => self.raw.begin(),
            TransactionStrategy::Emulated => self.raw.exec(EMULATED_BEGIN).map(|_| ()),
        }
    }

    /// Commit the current transaction, natively or emulated.
    ///
    /// # Errors
    ///
    /// Returns `QueryError` if the chosen commit command fails.
    pub fn commit(&mut self) -> Result<(), QueryError> {
        match self.strategy() {
            TransactionStrategy::Native => self.raw.commit(),
            TransactionStrategy::Emulated => self.raw.exec(EMULATED_COMMIT).map(|_| ()),
        }
    }

    /// Roll back the current transaction, natively or emulated.
    ///
    /// # Errors
    ///
    /// Returns `QueryError` if the chosen rollback command fails.
    pub fn rollback(&mut self) -> Result<(), QueryError> {
        match self.strategy() {
            TransactionStrategy::Native => self.raw.rollback(),
            TransactionStrategy::Emulated => self.raw.exec(EMULATED_ROLLBACK).map(|_| ()),
        }
    }

    /// Quote a value as a SQL literal, repairing the driver's quoting defect.
    ///
    /// Some engine driver versions terminate quoted values with a stray NUL
    /// byte. If the quoted literal ends with one, exactly that byte is
    /// stripped; otherwise the literal is returned unchanged.
    ///
    /// # Errors
    ///
    /// Returns `QueryError` if the underlying quote routine fails.
    pub fn quote(&mut self, value: &str, ty: ParameterType) -> Result<String, QueryError> {
        let mut quoted = self.raw.quote(value, ty)?;
        if quoted.ends_with('\0') {
            quoted.pop();
        }
        Ok(quoted)
    }

    /// Last auto-generated identifier.
    ///
    /// The engine has no reliable auto-increment retrieval; this always
    /// returns the literal `"0"`, signaling "unsupported" rather than failing.
    pub fn last_insert_id(&self, _name: Option<&str>) -> String {
        "0".to_string()
    }

    /// Get the server version reported by the driver.
    ///
    /// The version is a cached connect-time attribute; no query is issued.
    ///
    /// # Errors
    ///
    /// Returns `ConnectionError` if the attribute cannot be read.
    pub fn server_version(&self) -> Result<String, ConnectionError> {
        self.raw.server_version()
    }

    /// Whether obtaining the server version requires a live query.
    ///
    /// Always `false` for this driver family; the version is cached at
    /// connect time.
    pub fn requires_query_for_server_version(&self) -> bool {
        false
    }

    /// Execute a plain SQL command, returning the affected row count.
    ///
    /// # Errors
    ///
    /// Returns `QueryError` if execution fails.
    pub fn exec(&mut self, sql: &str) -> Result<u64, QueryError> {
        self.raw.exec(sql)
    }

    /// Execute a query, returning a statement positioned on its result set.
    ///
    /// The statement carries a snapshot of the connection's current target
    /// encoding.
    ///
    /// # Errors
    ///
    /// Returns `QueryError` if the query fails.
    pub fn query(&mut self, sql: &str) -> Result<Statement, QueryError> {
        let raw = self.raw.query(sql)?;
        Ok(self.adapt_statement(raw))
    }

    /// Prepare a statement.
    ///
    /// A `None` options argument is normalized to an empty options mapping
    /// before delegation. The returned statement carries a snapshot of the
    /// connection's current target encoding.
    ///
    /// # Errors
    ///
    /// Returns `QueryError` if preparation fails.
    pub fn prepare(
        &mut self,
        sql: &str,
        options: Option<&HashMap<String, String>>,
    ) -> Result<Statement, QueryError> {
        let empty = HashMap::new();
        let options = options.unwrap_or(&empty);
        let raw = self.raw.prepare(sql, options)?;
        Ok(self.adapt_statement(raw))
    }

    /// Change the target charset for statements created from now on.
    ///
    /// Statements that already exist keep the snapshot they were created
    /// with. `None` disables conversion.
    ///
    /// # Errors
    ///
    /// Returns `EncodingError` if the label is not a recognized encoding name.
    pub fn set_charset(&mut self, label: Option<&str>) -> Result<(), EncodingError> {
        self.target_encoding = match label {
            Some(label) => Some(resolve_charset(label)?),
            None => None,
        };
        Ok(())
    }

    /// Get the target encoding currently injected into new statements.
    pub fn target_encoding(&self) -> Option<&'static Encoding> {
        self.target_encoding
    }

    /// Resolve the transaction strategy, probing on first use.
    fn strategy(&mut self) -> TransactionStrategy {
        if let Some(strategy) = self.transactions {
            return strategy;
        }

        let strategy = match self.raw.begin() {
            Ok(()) => match self.raw.commit() {
                Ok(()) => TransactionStrategy::Native,
                Err(err) => {
                    log::warn!("transaction probe commit failed, emulating: {err}");
                    TransactionStrategy::Emulated
                }
            },
            Err(err) => {
                log::warn!("transaction probe begin failed, emulating: {err}");
                TransactionStrategy::Emulated
            }
        };

        log::debug!("transaction strategy resolved: {strategy:?}");
        self.transactions = Some(strategy);
        strategy
    }

    /// Wrap a raw statement and inject the current encoding snapshot.
    fn adapt_statement(&self, raw: Box<dyn crate::driver::DriverStatement>) -> Statement {
        let mut statement = Statement::new(raw);
        statement.set_target_encoding(self.target_encoding);
        statement
    }
}

impl std::fmt::Debug for Connection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Connection")
            .field("transactions", &self.transactions)
            .field(
                "target_encoding",
                &self.target_encoding.map(|e| e.name()),
            )
            .finish()
    }
}

/// Resolve a charset label against the known encodings.
fn resolve_charset(label: &str) -> Result<&'static Encoding, EncodingError> {
    Encoding::for_label(label.as_bytes())
        .ok_or_else(|| EncodingError::UnknownCharset(label.to_string()))
}
