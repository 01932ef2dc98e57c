//! Basic usage example for the jetbridge-rs compatibility adapters.
//!
//! No real engine binding ships with this crate, so the example plugs a tiny
//! in-memory driver into the boundary traits. It imitates the defects the
//! adapters exist to repair: no native transactions, a quoting routine that
//! appends a stray NUL terminator, and result strings in Windows-1252.

use jetbridge_rs::connection::ConnectParams;
use jetbridge_rs::driver::{DriverConnection, DriverStatement, LegacyDriver};
use jetbridge_rs::{
    AssocRow, BindEncoding, Connection, ConnectionError, ErrorReporting, ParamIndex,
    ParameterType, QueryError, Row, Value,
};
use std::collections::HashMap;
use std::error::Error;

const LOCATOR: &str = "Driver={Legacy Jet Driver};DBQ=demo.mdb";
const CHARSET: &str = "UTF-8";

/// In-memory stand-in for a defective legacy engine.
struct DemoDriver;

impl LegacyDriver for DemoDriver {
    fn connect(
        &self,
        _params: &ConnectParams,
    ) -> Result<Box<dyn DriverConnection>, ConnectionError> {
        Ok(Box::new(DemoConnection))
    }
}

struct DemoConnection;

impl DriverConnection for DemoConnection {
    fn set_error_reporting(&mut self, _mode: ErrorReporting) -> Result<(), ConnectionError> {
        Ok(())
    }

    fn server_version(&self) -> Result<String, ConnectionError> {
        Ok("4.0.9801.0".to_string())
    }

    fn begin(&mut self) -> Result<(), QueryError> {
        Err(QueryError::TransactionFailed(
            "this engine has no native transactions".to_string(),
        ))
    }

    fn commit(&mut self) -> Result<(), QueryError> {
        Err(QueryError::TransactionFailed(
            "this engine has no native transactions".to_string(),
        ))
    }

    fn rollback(&mut self) -> Result<(), QueryError> {
        Err(QueryError::TransactionFailed(
            "this engine has no native transactions".to_string(),
        ))
    }

    fn exec(&mut self, sql: &str) -> Result<u64, QueryError> {
        println!("  engine exec: {sql}");
        Ok(0)
    }

    fn quote(&mut self, value: &str, _ty: ParameterType) -> Result<String, QueryError> {
        // The defect: a stray NUL terminator on the quoted literal.
        Ok(format!("'{}'\0", value.replace('\'', "''")))
    }

    fn prepare(
        &mut self,
        _sql: &str,
        _options: &HashMap<String, String>,
    ) -> Result<Box<dyn DriverStatement>, QueryError> {
        Ok(Box::new(DemoStatement::new()))
    }

    fn query(&mut self, _sql: &str) -> Result<Box<dyn DriverStatement>, QueryError> {
        Ok(Box::new(DemoStatement::new()))
    }
}

struct DemoStatement {
    rows: Vec<Row>,
    cursor: usize,
}

impl DemoStatement {
    fn new() -> Self {
        Self {
            // "Señor café" content, as the engine stores it: Windows-1252.
            rows: vec![
                vec![Value::Integer(1), Value::Text(b"Se\xF1or".to_vec())],
                vec![Value::Integer(2), Value::Text(b"caf\xE9".to_vec())],
            ],
            cursor: 0,
        }
    }
}

impl DriverStatement for DemoStatement {
    fn bind_param(
        &mut self,
        param: ParamIndex,
        _value: Value,
        ty: ParameterType,
        length: Option<usize>,
        options: Option<BindEncoding>,
    ) -> Result<(), QueryError> {
        println!("  engine bind: {param} as {ty:?} (length {length:?}, encoding {options:?})");
        Ok(())
    }

    fn execute(&mut self) -> Result<(), QueryError> {
        Ok(())
    }

    fn fetch_one(&mut self) -> Result<Option<Value>, QueryError> {
        let value = self
            .rows
            .get(self.cursor)
            .and_then(|row| row.first().cloned());
        if value.is_some() {
            self.cursor += 1;
        }
        Ok(value)
    }

    fn fetch_numeric(&mut self) -> Result<Option<Row>, QueryError> {
        let row = self.rows.get(self.cursor).cloned();
        if row.is_some() {
            self.cursor += 1;
        }
        Ok(row)
    }

    fn fetch_associative(&mut self) -> Result<Option<AssocRow>, QueryError> {
        let row = self.fetch_numeric()?;
        Ok(row.map(|row| {
            ["id", "name"]
                .iter()
                .map(|c| c.to_string())
                .zip(row)
                .collect()
        }))
    }

    fn fetch_all_numeric(&mut self) -> Result<Vec<Row>, QueryError> {
        let remaining = self.rows.split_off(self.cursor);
        self.cursor = self.rows.len();
        Ok(remaining)
    }

    fn fetch_all_associative(&mut self) -> Result<Vec<AssocRow>, QueryError> {
        let rows = self.fetch_all_numeric()?;
        Ok(rows
            .into_iter()
            .map(|row| {
                ["id", "name"]
                    .iter()
                    .map(|c| c.to_string())
                    .zip(row)
                    .collect()
            })
            .collect())
    }

    fn fetch_first_column(&mut self) -> Result<Vec<Value>, QueryError> {
        let rows = self.fetch_all_numeric()?;
        Ok(rows
            .into_iter()
            .filter_map(|row| row.into_iter().next())
            .collect())
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    let params = ConnectParams::builder(LOCATOR)
        .username("admin")
        .charset(CHARSET)
        .build();

    let mut conn = Connection::establish(&DemoDriver, &params)?;
    println!("Connected, server version {}", conn.server_version()?);

    // First transaction call probes the engine and falls back to emulation.
    println!(
        "Native transactions: {}",
        conn.transactions_supported()
    );

    conn.begin_transaction()?;
    let quoted = conn.quote("O'Brien", ParameterType::String)?;
    println!("Repaired quote: {quoted}");
    conn.exec(&format!("INSERT INTO people (name) VALUES ({quoted})"))?;
    conn.commit()?;

    let mut stmt = conn.query("SELECT id, name FROM people ORDER BY id")?;
    for row in stmt.fetch_all_associative()? {
        let rendered: Vec<String> = row
            .iter()
            .map(|(key, value)| match value {
                Value::Text(bytes) => {
                    format!("{key}={}", String::from_utf8_lossy(bytes))
                }
                other => format!("{key}={other:?}"),
            })
            .collect();
        println!("Row: {}", rendered.join(", "));
    }

    println!("Done");
    Ok(())
}
