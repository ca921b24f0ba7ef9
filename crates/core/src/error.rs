use serde::{Deserialize, Serialize};

use crate::Kind;

/// Why a scalar refused a value. The walk attaches the path.
#[derive(Debug, Clone, PartialEq, thiserror::Error, Serialize, Deserialize)]
pub enum Rejection {
    #[error("expected {expected}, found {found}")]
    Kind { expected: Kind, found: Kind },
    #[error("{0}")]
    Constraint(String),
    #[error("cannot hold a scalar")]
    NotScalar,
}

/// Path accessor failures.
#[derive(Debug, Clone, PartialEq, thiserror::Error, Serialize, Deserialize)]
pub enum AccessError {
    #[error("invalid path '{0}'")]
    InvalidPath(String),
    #[error("field not found: {path}")]
    FieldNotFound { path: String },
    #[error("not indexable: {path}")]
    NotIndexable { path: String },
    #[error("index out of range: {path} (len {len})")]
    IndexOutOfRange { path: String, len: usize },
    #[error("absent: {path}")]
    Absent { path: String },
    #[error("not a scalar: {path}")]
    NotScalar { path: String },
    #[error("type mismatch at {path}: expected {expected}, found {found}")]
    TypeMismatch { path: String, expected: Kind, found: Kind },
    #[error("invalid value at {path}: {reason}")]
    Constraint { path: String, reason: String },
}

pub type AccessResult<T> = Result<T, AccessError>;

impl AccessError {
    /// Optional data that is simply not there.
    pub fn is_absence(&self) -> bool {
        matches!(self, AccessError::Absent { .. } | AccessError::IndexOutOfRange { .. })
    }

    /// The path does not fit the record shape it was walked against.
    pub fn is_structural(&self) -> bool {
        matches!(
            self,
            AccessError::FieldNotFound { .. } | AccessError::NotIndexable { .. } | AccessError::NotScalar { .. }
        )
    }

    pub(crate) fn rejected(path: String, rejection: Rejection) -> Self {
        match rejection {
            Rejection::Kind { expected, found } => AccessError::TypeMismatch { path, expected, found },
            Rejection::Constraint(reason) => AccessError::Constraint { path, reason },
            Rejection::NotScalar => AccessError::NotScalar { path },
        }
    }
}
