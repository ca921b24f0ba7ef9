//! Isomap engine: version-aware conversion between wire documents and stable models.
//!
//! - [`remap`]: declarative path maps (flat and fan-out rules) and their resolution
//!   against a concrete instance.
//! - [`registry`]: namespace-driven document dispatch and version-tag construction.
//! - [`convert`]: the required-field gate and the copy loops in both directions.
//! - [`processor`]: per-family orchestration tying the above together.

#![forbid(unsafe_code)]

use isomap_core::AccessError;

pub mod convert;
pub mod processor;
pub mod registry;
pub mod remap;
pub mod xml;

pub use processor::{Model, Processor};
pub use registry::{sniff, Document, DocumentRegistry, Registration, Sniffed, VersionTag};
pub use remap::{resolve, Direction, FlatEntry, MapError, PathMap, PathMapBuilder, Rule};

#[doc(hidden)]
pub use isomap_core as __core;

pub mod prelude {
    pub use super::{Direction, Document, EngineError, EngineResult, PathMap, Processor, Rule};
    pub use isomap_core::prelude::*;
}

/// Conversion failures surfaced to callers.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error("unknown namespace: {0}")]
    UnknownNamespace(String),
    #[error("no xmlns found on root element")]
    MissingNamespace,
    #[error("unsupported version: {0}")]
    UnknownVersion(String),
    #[error("duplicate registration: {0}")]
    DuplicateRegistration(String),
    #[error("invalid xml: {0}")]
    InvalidXml(String),
    #[error("missing required field: {0}")]
    MissingRequiredField(String),
    #[error("{field}: {source}")]
    Field {
        field: String,
        #[source]
        source: AccessError,
    },
    #[error("document validation: {0}")]
    Invalid(AccessError),
    #[error(transparent)]
    Access(#[from] AccessError),
    #[error("path map: {0}")]
    Map(#[from] MapError),
    #[error("xml serialization: {0}")]
    Serialize(String),
}

pub type EngineResult<T> = Result<T, EngineError>;

impl EngineError {
    /// Model field named by a `Field` or `MissingRequiredField` error.
    pub fn field(&self) -> Option<&str> {
        match self {
            EngineError::Field { field, .. } | EngineError::MissingRequiredField(field) => Some(field),
            _ => None,
        }
    }
}
