//! Isomap core types: scalar values, record paths and the dynamic field accessor.
//!
//! Every document and model record implements [`Record`] (usually through
//! [`impl_record!`]), which lets [`get`] and [`set`] walk dotted paths such as
//! `AcctRptgReq.RptgReq[0].Acct.Id.Othr.Id` without per-field glue code.

#![forbid(unsafe_code)]

use std::fmt;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

pub mod access;
pub mod error;
mod macros;
pub mod path;

pub use access::{check_tree, count, get, is_blank, lookup, set, Field, Node, NodeMut, Record, Scalar, Sequence};
pub use error::{AccessError, AccessResult, Rejection};
pub use path::{Path, Segment};

pub mod prelude {
    pub use super::{AccessError, Field, Kind, Path, Record, Scalar, Value};
}

/// Kind of a scalar value, used in coercion errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Kind {
    Text,
    Bool,
    Int,
    Decimal,
    Date,
    DateTime,
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Kind::Text => "text",
            Kind::Bool => "bool",
            Kind::Int => "int",
            Kind::Decimal => "decimal",
            Kind::Date => "date",
            Kind::DateTime => "datetime",
        };
        f.write_str(s)
    }
}

/// A scalar moved between a document and a model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum Value {
    Text(String),
    Bool(bool),
    Int(i64),
    Decimal(f64),
    Date(NaiveDate),
    DateTime(DateTime<Utc>),
}

impl Value {
    pub fn kind(&self) -> Kind {
        match self {
            Value::Text(_) => Kind::Text,
            Value::Bool(_) => Kind::Bool,
            Value::Int(_) => Kind::Int,
            Value::Decimal(_) => Kind::Decimal,
            Value::Date(_) => Kind::Date,
            Value::DateTime(_) => Kind::DateTime,
        }
    }

    /// Zero values are not copied into documents: empty text, `false` and zero numbers.
    /// Dates are never empty; an unset date lives in an absent optional.
    pub fn is_empty(&self) -> bool {
        match self {
            Value::Text(s) => s.is_empty(),
            Value::Bool(b) => !*b,
            Value::Int(n) => *n == 0,
            Value::Decimal(d) => *d == 0.0,
            Value::Date(_) | Value::DateTime(_) => false,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self { Value::Text(s) => Some(s), _ => None }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Text(s) => f.write_str(s),
            Value::Bool(b) => write!(f, "{}", b),
            Value::Int(n) => write!(f, "{}", n),
            Value::Decimal(d) => write!(f, "{}", d),
            Value::Date(d) => write!(f, "{}", d),
            Value::DateTime(t) => write!(f, "{}", t.to_rfc3339()),
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self { Value::Text(s.to_string()) }
}

impl From<String> for Value {
    fn from(s: String) -> Self { Value::Text(s) }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self { Value::Bool(b) }
}

impl From<f64> for Value {
    fn from(d: f64) -> Self { Value::Decimal(d) }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self { Value::Int(n) }
}

impl From<DateTime<Utc>> for Value {
    fn from(t: DateTime<Utc>) -> Self { Value::DateTime(t) }
}

impl From<NaiveDate> for Value {
    fn from(d: NaiveDate) -> Self { Value::Date(d) }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_values_follow_zero_semantics() {
        assert!(Value::from("").is_empty());
        assert!(!Value::from("x").is_empty());
        assert!(Value::Bool(false).is_empty());
        assert!(Value::Decimal(0.0).is_empty());
        assert!(!Value::Int(7).is_empty());
        assert!(!Value::DateTime(DateTime::<Utc>::default()).is_empty());
    }

    #[test]
    fn value_serializes_with_kind_tag() {
        let v = serde_json::to_value(Value::from("ABC")).unwrap();
        assert_eq!(v, serde_json::json!({"kind": "text", "value": "ABC"}));
        assert_eq!(Value::Int(3).kind().to_string(), "int");
    }
}
