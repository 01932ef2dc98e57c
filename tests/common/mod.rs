//! Common test utilities for jetbridge-rs integration tests.
//!
//! The adapters never talk to a real engine in these suites. Instead they run
//! against a scripted fake driver that records every call crossing the driver
//! boundary and serves canned result rows. Tests configure the fake through
//! [`FakeConfig`] (native vs missing transactions, the quoting defect, result
//! data) and then assert on the recorded call log.

#![allow(dead_code)]

use jetbridge_rs::connection::ConnectParams;
use jetbridge_rs::driver::{DriverConnection, DriverStatement, LegacyDriver};
use jetbridge_rs::{
    AssocRow, BindEncoding, ConnectionError, ErrorReporting, ParamIndex, ParameterType,
    QueryError, Row, Value,
};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

/// Shared record of every call made against the fake driver.
pub type CallLog = Arc<Mutex<Vec<String>>>;

/// Create an empty call log.
pub fn new_log() -> CallLog {
    Arc::new(Mutex::new(Vec::new()))
}

/// Snapshot the recorded calls.
pub fn recorded(log: &CallLog) -> Vec<String> {
    log.lock().unwrap().clone()
}

/// Count recorded calls starting with the given prefix.
pub fn count_calls(log: &CallLog, prefix: &str) -> usize {
    log.lock()
        .unwrap()
        .iter()
        .filter(|entry| entry.starts_with(prefix))
        .count()
}

/// Behavior knobs for the fake engine.
#[derive(Clone)]
pub struct FakeConfig {
    /// Whether native begin/commit/rollback succeed
    pub native_transactions: bool,
    /// Whether the quoting routine appends a stray NUL terminator
    pub quote_appends_nul: bool,
    /// Cached server-version attribute
    pub server_version: String,
    /// Column names served by every statement
    pub columns: Vec<String>,
    /// Rows served by every statement, in order
    pub rows: Vec<Row>,
}

impl Default for FakeConfig {
    fn default() -> Self {
        Self {
            native_transactions: true,
            quote_appends_nul: false,
            server_version: "4.0.9801.0".to_string(),
            columns: Vec::new(),
            rows: Vec::new(),
        }
    }
}

impl FakeConfig {
    /// Config for an engine without native transactions.
    pub fn without_transactions() -> Self {
        Self {
            native_transactions: false,
            ..Self::default()
        }
    }

    /// Attach result data served by every statement.
    pub fn with_rows(mut self, columns: &[&str], rows: Vec<Row>) -> Self {
        self.columns = columns.iter().map(|c| c.to_string()).collect();
        self.rows = rows;
        self
    }
}

/// Scripted fake of the underlying driver's entry point.
pub struct FakeDriver {
    config: FakeConfig,
    log: CallLog,
}

impl FakeDriver {
    pub fn new(config: FakeConfig) -> Self {
        Self {
            config,
            log: new_log(),
        }
    }

    /// Get the shared call log.
    pub fn log(&self) -> CallLog {
        Arc::clone(&self.log)
    }
}

impl LegacyDriver for FakeDriver {
    fn connect(
        &self,
        params: &ConnectParams,
    ) -> Result<Box<dyn DriverConnection>, ConnectionError> {
        self.log
            .lock()
            .unwrap()
            .push(format!("connect:{}", params.locator()));
        Ok(Box::new(FakeConnection {
            config: self.config.clone(),
            log: Arc::clone(&self.log),
        }))
    }
}

/// Scripted fake of a raw connection handle.
pub struct FakeConnection {
    config: FakeConfig,
    log: CallLog,
}

impl FakeConnection {
    pub fn new(config: FakeConfig, log: CallLog) -> Self {
        Self { config, log }
    }

    fn record(&self, entry: String) {
        self.log.lock().unwrap().push(entry);
    }

    fn statement(&self) -> Box<dyn DriverStatement> {
        Box::new(FakeStatement {
            columns: self.config.columns.clone(),
            rows: self.config.rows.clone(),
            cursor: 0,
            log: Arc::clone(&self.log),
        })
    }
}

impl DriverConnection for FakeConnection {
    fn set_error_reporting(&mut self, mode: ErrorReporting) -> Result<(), ConnectionError> {
        self.record(format!("set_error_reporting:{mode:?}"));
        Ok(())
    }

    fn server_version(&self) -> Result<String, ConnectionError> {
        Ok(self.config.server_version.clone())
    }

    fn begin(&mut self) -> Result<(), QueryError> {
        self.record("begin".to_string());
        if self.config.native_transactions {
            Ok(())
        } else {
            Err(QueryError::TransactionFailed(
                "engine has no transactions".to_string(),
            ))
        }
    }

    fn commit(&mut self) -> Result<(), QueryError> {
        self.record("commit".to_string());
        if self.config.native_transactions {
            Ok(())
        } else {
            Err(QueryError::TransactionFailed(
                "engine has no transactions".to_string(),
            ))
        }
    }

    fn rollback(&mut self) -> Result<(), QueryError> {
        self.record("rollback".to_string());
        if self.config.native_transactions {
            Ok(())
        } else {
            Err(QueryError::TransactionFailed(
                "engine has no transactions".to_string(),
            ))
        }
    }

    fn exec(&mut self, sql: &str) -> Result<u64, QueryError> {
        self.record(format!("exec:{sql}"));
        Ok(1)
    }

    fn quote(&mut self, value: &str, _ty: ParameterType) -> Result<String, QueryError> {
        self.record(format!("quote:{value}"));
        let mut quoted = format!("'{}'", value.replace('\'', "''"));
        if self.config.quote_appends_nul {
            quoted.push('\0');
        }
        Ok(quoted)
    }

    fn prepare(
        &mut self,
        sql: &str,
        options: &HashMap<String, String>,
    ) -> Result<Box<dyn DriverStatement>, QueryError> {
        self.record(format!("prepare:{sql}:{}", options.len()));
        Ok(self.statement())
    }

    fn query(&mut self, sql: &str) -> Result<Box<dyn DriverStatement>, QueryError> {
        self.record(format!("query:{sql}"));
        Ok(self.statement())
    }
}

/// Scripted fake of a raw statement handle.
pub struct FakeStatement {
    columns: Vec<String>,
    rows: Vec<Row>,
    cursor: usize,
    log: CallLog,
}

impl FakeStatement {
    fn record(&self, entry: String) {
        self.log.lock().unwrap().push(entry);
    }

    fn next_row(&mut self) -> Option<Row> {
        let row = self.rows.get(self.cursor).cloned();
        if row.is_some() {
            self.cursor += 1;
        }
        row
    }

    fn name_row(&self, row: Row) -> AssocRow {
        self.columns.iter().cloned().zip(row).collect()
    }
}

impl DriverStatement for FakeStatement {
    fn bind_param(
        &mut self,
        param: ParamIndex,
        _value: Value,
        ty: ParameterType,
        length: Option<usize>,
        options: Option<BindEncoding>,
    ) -> Result<(), QueryError> {
        self.record(format!("bind:{param}:{ty:?}:{length:?}:{options:?}"));
        Ok(())
    }

    fn execute(&mut self) -> Result<(), QueryError> {
        self.record("execute".to_string());
        Ok(())
    }

    fn fetch_one(&mut self) -> Result<Option<Value>, QueryError> {
        Ok(self.next_row().and_then(|row| row.into_iter().next()))
    }

    fn fetch_numeric(&mut self) -> Result<Option<Row>, QueryError> {
        Ok(self.next_row())
    }

    fn fetch_associative(&mut self) -> Result<Option<AssocRow>, QueryError> {
        let row = self.next_row();
        Ok(row.map(|row| self.name_row(row)))
    }

    fn fetch_all_numeric(&mut self) -> Result<Vec<Row>, QueryError> {
        let remaining = self.rows.split_off(self.cursor);
        self.cursor = self.rows.len();
        Ok(remaining)
    }

    fn fetch_all_associative(&mut self) -> Result<Vec<AssocRow>, QueryError> {
        let remaining = self.fetch_all_numeric()?;
        Ok(remaining
            .into_iter()
            .map(|row| self.name_row(row))
            .collect())
    }

    fn fetch_first_column(&mut self) -> Result<Vec<Value>, QueryError> {
        let remaining = self.fetch_all_numeric()?;
        Ok(remaining
            .into_iter()
            .filter_map(|row| row.into_iter().next())
            .collect())
    }
}
