//! Errors surfaced by a search.
//!
//! Metadata problems never show up here: they are absorbed during planning
//! (see [`crate::metadata::ResolutionError`]). What reaches the caller is
//! either a store failure or a structural mismatch while building entities.

use thiserror::Error;

/// The store rejected a statement or could not be reached.
#[derive(Debug, Error)]
pub enum ExecutionError {
    #[error("statement rejected: {message}")]
    Rejected { sql: String, message: String },
    #[error("store unavailable: {0}")]
    Unavailable(String),
    #[error("count statement returned a non-numeric value: {0}")]
    NonNumericCount(String),
}

impl ExecutionError {
    pub fn rejected(sql: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Rejected {
            sql: sql.into(),
            message: message.into(),
        }
    }

    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::Unavailable(message.into())
    }
}

/// An entity instance could not be created for a returned row.
#[derive(Debug, Error)]
pub enum RowMappingError {
    #[error("cannot instantiate `{entity}`: {reason}")]
    Instantiation { entity: &'static str, reason: String },
}

/// A single field could not be assigned. Never escalated by the mapper.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FieldError {
    #[error("no settable field `{0}`")]
    UnknownField(String),
    #[error("field `{field}` cannot hold a {got} value")]
    TypeMismatch { field: String, got: &'static str },
    #[error("field `{field}` cannot parse {raw:?}")]
    Unparseable { field: String, raw: String },
}

impl FieldError {
    pub fn mismatch(field: &str, got: &crate::value::FieldValue) -> Self {
        Self::TypeMismatch {
            field: field.to_string(),
            got: got.kind_name(),
        }
    }

    pub fn unparseable(field: &str, raw: &crate::value::Value) -> Self {
        Self::Unparseable {
            field: field.to_string(),
            raw: raw.to_string(),
        }
    }
}

/// Failure of a whole search call.
#[derive(Debug, Error)]
pub enum QueryError {
    #[error("query execution failed: {0}")]
    Execution(#[from] ExecutionError),
    #[error("row mapping failed: {0}")]
    RowMapping(#[from] RowMappingError),
    #[error("entity type `{0}` is not registered")]
    UnknownEntity(&'static str),
}
