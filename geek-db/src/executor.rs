//! [`StatementExecutor`] over a rusqlite connection.

use geek_query::{ExecutionError, Params, RawRow, StatementExecutor, Value};
use rusqlite::types::{ToSql, Value as SqlValue, ValueRef};
use rusqlite::{Connection, ErrorCode};

/// Runs search statements against a borrowed SQLite connection.
pub struct SqliteExecutor<'c> {
    conn: &'c Connection,
}

impl<'c> SqliteExecutor<'c> {
    pub fn new(conn: &'c Connection) -> Self {
        Self { conn }
    }
}

impl StatementExecutor for SqliteExecutor<'_> {
    fn query_scalar(&self, sql: &str, params: &Params) -> Result<Value, ExecutionError> {
        let bound = bind(params);
        let refs = as_named(&bound);
        match self
            .conn
            .query_row(sql, refs.as_slice(), |row| row.get_ref(0).map(from_sql))
        {
            Ok(value) => Ok(value),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(Value::Null),
            Err(e) => Err(execution_error(sql, e)),
        }
    }

    fn query_rows(&self, sql: &str, params: &Params) -> Result<Vec<RawRow>, ExecutionError> {
        let bound = bind(params);
        let refs = as_named(&bound);
        let mut stmt = self.conn.prepare(sql).map_err(|e| execution_error(sql, e))?;
        let width = stmt.column_count();
        let mut rows = stmt
            .query(refs.as_slice())
            .map_err(|e| execution_error(sql, e))?;

        let mut out = Vec::new();
        while let Some(row) = rows.next().map_err(|e| execution_error(sql, e))? {
            let values = (0..width)
                .map(|i| row.get_ref(i).map(from_sql))
                .collect::<Result<Vec<_>, _>>()
                .map_err(|e| execution_error(sql, e))?;
            out.push(RawRow::from_columns(values));
        }
        Ok(out)
    }
}

fn bind(params: &Params) -> Vec<(String, SqlValue)> {
    params
        .iter()
        .map(|(name, value)| (format!(":{name}"), to_sql(value)))
        .collect()
}

fn as_named(bound: &[(String, SqlValue)]) -> Vec<(&str, &dyn ToSql)> {
    bound
        .iter()
        .map(|(name, value)| (name.as_str(), value as &dyn ToSql))
        .collect()
}

fn to_sql(value: &Value) -> SqlValue {
    match value {
        Value::Null => SqlValue::Null,
        Value::Bool(b) => SqlValue::Integer(i64::from(*b)),
        Value::Integer(n) => SqlValue::Integer(*n),
        Value::Real(r) => SqlValue::Real(*r),
        Value::Text(s) => SqlValue::Text(s.clone()),
        Value::Blob(b) => SqlValue::Blob(b.clone()),
        Value::Date(d) => SqlValue::Text(d.format("%Y-%m-%d").to_string()),
        Value::DateTime(dt) => SqlValue::Text(dt.format("%Y-%m-%d %H:%M:%S").to_string()),
    }
}

fn from_sql(value: ValueRef<'_>) -> Value {
    match value {
        ValueRef::Null => Value::Null,
        ValueRef::Integer(n) => Value::Integer(n),
        ValueRef::Real(r) => Value::Real(r),
        ValueRef::Text(bytes) => Value::Text(String::from_utf8_lossy(bytes).into_owned()),
        ValueRef::Blob(bytes) => Value::Blob(bytes.to_vec()),
    }
}

/// Connection-level failures are reported as an unavailable store, anything
/// else as a rejected statement.
fn execution_error(sql: &str, e: rusqlite::Error) -> ExecutionError {
    match &e {
        rusqlite::Error::SqliteFailure(failure, _)
            if matches!(
                failure.code,
                ErrorCode::CannotOpen
                    | ErrorCode::DatabaseBusy
                    | ErrorCode::DatabaseLocked
                    | ErrorCode::NotADatabase
            ) =>
        {
            ExecutionError::unavailable(e.to_string())
        }
        _ => ExecutionError::rejected(sql, e.to_string()),
    }
}
