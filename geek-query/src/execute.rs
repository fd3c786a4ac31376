//! Running planned statements against a store.

use crate::builder::{Params, Statements};
use crate::error::{ExecutionError, QueryError};
use crate::mapper::{map_row, Entity};
use crate::page::{Page, PageRequest};
use crate::plan::ProjectedField;
use crate::value::{RawRow, Value};

/// Store driver seam. Implementations bind `params` by name (`:name` in the
/// SQL text) and must not retry.
pub trait StatementExecutor {
    /// Execute a statement returning a single value. An empty result is
    /// reported as [`Value::Null`].
    fn query_scalar(&self, sql: &str, params: &Params) -> Result<Value, ExecutionError>;

    /// Execute a statement returning rows.
    fn query_rows(&self, sql: &str, params: &Params) -> Result<Vec<RawRow>, ExecutionError>;
}

impl<T: StatementExecutor + ?Sized> StatementExecutor for &T {
    fn query_scalar(&self, sql: &str, params: &Params) -> Result<Value, ExecutionError> {
        (**self).query_scalar(sql, params)
    }

    fn query_rows(&self, sql: &str, params: &Params) -> Result<Vec<RawRow>, ExecutionError> {
        (**self).query_rows(sql, params)
    }
}

/// Count, then fetch one page and map it.
///
/// The data statement is skipped entirely when the count is zero. An offset
/// past the end yields empty content with the real total.
pub fn run_paged<E, X>(
    executor: &X,
    statements: &Statements,
    projection: &[ProjectedField],
    page: PageRequest,
) -> Result<Page<E>, QueryError>
where
    E: Entity,
    X: StatementExecutor + ?Sized,
{
    let raw = executor.query_scalar(&statements.count_sql, &statements.params)?;
    let total = count_from(raw)?;
    if total == 0 {
        return Ok(Page::empty(page));
    }

    let params = statements.params.with_page(page);
    let rows = executor.query_rows(&statements.data_sql, &params)?;
    let content = rows
        .iter()
        .map(|row| map_row::<E>(projection, row))
        .collect::<Result<Vec<_>, _>>()?;

    log::debug!(
        "{}: {} of {} rows at offset {}",
        E::decl().type_name,
        content.len(),
        total,
        page.offset()
    );
    Ok(Page::new(content, page, total))
}

/// Interpret the count statement's result. Null counts as zero.
fn count_from(raw: Value) -> Result<u64, ExecutionError> {
    match raw {
        Value::Null => Ok(0),
        Value::Integer(n) => Ok(u64::try_from(n).unwrap_or(0)),
        Value::Real(r) if r.is_finite() && r >= 0.0 => Ok(r as u64),
        Value::Text(s) => s
            .trim()
            .parse()
            .map_err(|_| ExecutionError::NonNumericCount(s.clone())),
        other => Err(ExecutionError::NonNumericCount(other.to_string())),
    }
}
