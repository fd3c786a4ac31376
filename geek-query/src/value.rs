//! Dynamic values crossing the store boundary, and per-field coercion.
//!
//! A store driver hands the engine [`RawRow`]s made of tagged [`Value`]s. The
//! row mapper turns each value into a [`FieldValue`] matching the declared
//! [`FieldType`] of the projected field, or drops it when no sensible
//! conversion exists.

use std::fmt;

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};

use crate::metadata::FieldType;

/// A dynamically-typed value as produced or consumed by a store driver.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum Value {
    #[default]
    Null,
    Bool(bool),
    Integer(i64),
    Real(f64),
    Text(String),
    Blob(Vec<u8>),
    Date(NaiveDate),
    DateTime(NaiveDateTime),
}

const DATE_FORMAT: &str = "%Y-%m-%d";
const DATETIME_FORMATS: &[&str] = &["%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S%.f"];

impl Value {
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Short type label used in log and error messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "bool",
            Value::Integer(_) => "integer",
            Value::Real(_) => "real",
            Value::Text(_) => "text",
            Value::Blob(_) => "blob",
            Value::Date(_) => "date",
            Value::DateTime(_) => "datetime",
        }
    }

    /// Interpret the value as a timestamp.
    ///
    /// Native timestamps are returned as-is, dates become midnight, and text
    /// is parsed in the ISO-like layouts SQLite and Postgres emit.
    pub fn to_datetime(&self) -> Option<NaiveDateTime> {
        match self {
            Value::DateTime(dt) => Some(*dt),
            Value::Date(d) => Some(d.and_time(NaiveTime::MIN)),
            Value::Text(s) => {
                let s = s.trim();
                DATETIME_FORMATS
                    .iter()
                    .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
                    .or_else(|| {
                        NaiveDate::parse_from_str(s, DATE_FORMAT)
                            .ok()
                            .map(|d| d.and_time(NaiveTime::MIN))
                    })
            }
            _ => None,
        }
    }

    /// Interpret the value as a calendar date.
    pub fn to_date(&self) -> Option<NaiveDate> {
        match self {
            Value::Date(d) => Some(*d),
            Value::DateTime(dt) => Some(dt.date()),
            Value::Text(s) => NaiveDate::parse_from_str(s.trim(), DATE_FORMAT)
                .ok()
                .or_else(|| self.to_datetime().map(|dt| dt.date())),
            _ => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => f.write_str("null"),
            Value::Bool(b) => write!(f, "{b}"),
            Value::Integer(i) => write!(f, "{i}"),
            Value::Real(r) => write!(f, "{r}"),
            Value::Text(s) => f.write_str(s),
            Value::Blob(bytes) => f.write_str(&String::from_utf8_lossy(bytes)),
            Value::Date(d) => write!(f, "{}", d.format(DATE_FORMAT)),
            Value::DateTime(dt) => write!(f, "{}", dt.format("%Y-%m-%d %H:%M:%S")),
        }
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Integer(v)
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::Text(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::Text(v.to_string())
    }
}

// ── Rows ────────────────────────────────────────────────────────────────────

/// One result row as returned by the store.
///
/// Drivers collapse single-column results to [`RawRow::Single`]; the mapper
/// treats both shapes uniformly through [`RawRow::values`].
#[derive(Debug, Clone, PartialEq)]
pub enum RawRow {
    Single(Value),
    Columns(Vec<Value>),
}

impl RawRow {
    /// Build a row from its column values, collapsing a one-column row.
    pub fn from_columns(mut values: Vec<Value>) -> Self {
        if values.len() == 1 {
            if let Some(v) = values.pop() {
                return RawRow::Single(v);
            }
        }
        RawRow::Columns(values)
    }

    pub fn values(&self) -> &[Value] {
        match self {
            RawRow::Single(v) => std::slice::from_ref(v),
            RawRow::Columns(vs) => vs,
        }
    }
}

// ── Coercion ────────────────────────────────────────────────────────────────

/// A value already converted to the Rust type of its target field.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Int(i32),
    Long(i64),
    Float(f32),
    Double(f64),
    Text(String),
    Bool(bool),
    /// Temporal values are handed through in the store's representation.
    Temporal(Value),
}

impl FieldValue {
    pub fn kind_name(&self) -> &'static str {
        match self {
            FieldValue::Int(_) => "int",
            FieldValue::Long(_) => "long",
            FieldValue::Float(_) => "float",
            FieldValue::Double(_) => "double",
            FieldValue::Text(_) => "text",
            FieldValue::Bool(_) => "bool",
            FieldValue::Temporal(_) => "temporal",
        }
    }
}

/// Convert a raw store value to the representation of `target`.
///
/// `None` means "leave the field at its default": the raw value was null, or
/// it could not be converted. A failed conversion never affects other fields.
pub fn coerce(raw: &Value, target: FieldType) -> Option<FieldValue> {
    if raw.is_null() {
        return None;
    }
    match target {
        FieldType::Int => as_i64(raw)
            .and_then(|v| i32::try_from(v).ok())
            .map(FieldValue::Int),
        FieldType::Long => as_i64(raw).map(FieldValue::Long),
        FieldType::Float => as_f64(raw).map(|v| FieldValue::Float(v as f32)),
        FieldType::Double => as_f64(raw).map(FieldValue::Double),
        FieldType::Text => Some(FieldValue::Text(raw.to_string())),
        FieldType::Bool => match raw {
            Value::Bool(b) => Some(FieldValue::Bool(*b)),
            Value::Integer(i) => Some(FieldValue::Bool(*i != 0)),
            _ => None,
        },
        FieldType::Date | FieldType::DateTime | FieldType::Time => {
            Some(FieldValue::Temporal(raw.clone()))
        }
        FieldType::Bytes | FieldType::Reference(_) | FieldType::Collection(_) => None,
    }
}

fn as_i64(raw: &Value) -> Option<i64> {
    match raw {
        Value::Integer(i) => Some(*i),
        Value::Real(r) if r.is_finite() && *r >= i64::MIN as f64 && *r <= i64::MAX as f64 => {
            Some(r.trunc() as i64)
        }
        Value::Text(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn as_f64(raw: &Value) -> Option<f64> {
    match raw {
        Value::Integer(i) => Some(*i as f64),
        Value::Real(r) => Some(*r),
        Value::Text(s) => s.trim().parse().ok(),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numeric_text_parses_into_integer_field() {
        assert_eq!(
            coerce(&Value::Text("42".into()), FieldType::Int),
            Some(FieldValue::Int(42))
        );
    }

    #[test]
    fn unparseable_text_is_dropped() {
        assert_eq!(coerce(&Value::Text("forty".into()), FieldType::Int), None);
        assert_eq!(coerce(&Value::Text("1e".into()), FieldType::Double), None);
    }

    #[test]
    fn numbers_widen_and_narrow() {
        assert_eq!(
            coerce(&Value::Integer(7), FieldType::Double),
            Some(FieldValue::Double(7.0))
        );
        assert_eq!(
            coerce(&Value::Real(9.75), FieldType::Long),
            Some(FieldValue::Long(9))
        );
        assert_eq!(
            coerce(&Value::Integer(3), FieldType::Float),
            Some(FieldValue::Float(3.0))
        );
    }

    #[test]
    fn integer_out_of_range_for_int_is_dropped() {
        assert_eq!(coerce(&Value::Integer(i64::from(i32::MAX) + 1), FieldType::Int), None);
    }

    #[test]
    fn text_target_takes_any_string_form() {
        assert_eq!(
            coerce(&Value::Integer(12), FieldType::Text),
            Some(FieldValue::Text("12".into()))
        );
        assert_eq!(
            coerce(&Value::Bool(true), FieldType::Text),
            Some(FieldValue::Text("true".into()))
        );
    }

    #[test]
    fn temporal_passes_through_unchanged() {
        let raw = Value::Text("2024-03-01 10:00:00".into());
        assert_eq!(
            coerce(&raw, FieldType::DateTime),
            Some(FieldValue::Temporal(raw.clone()))
        );
    }

    #[test]
    fn null_and_unclassified_targets_yield_none() {
        assert_eq!(coerce(&Value::Null, FieldType::Text), None);
        assert_eq!(coerce(&Value::Integer(1), FieldType::Collection("X")), None);
        assert_eq!(coerce(&Value::Text("yes".into()), FieldType::Bool), None);
    }

    #[test]
    fn single_column_rows_collapse() {
        let row = RawRow::from_columns(vec![Value::Integer(5)]);
        assert_eq!(row, RawRow::Single(Value::Integer(5)));
        assert_eq!(row.values(), &[Value::Integer(5)]);
    }

    #[test]
    fn timestamps_parse_from_store_text() {
        let v = Value::Text("2023-11-05 08:30:00".into());
        let dt = v.to_datetime().unwrap();
        assert_eq!(dt.format("%H:%M").to_string(), "08:30");
        assert_eq!(
            Value::Text("2023-11-05".into()).to_date(),
            NaiveDate::from_ymd_opt(2023, 11, 5)
        );
    }
}
