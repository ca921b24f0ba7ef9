//! Isomap message families.
//!
//! Each family module is configuration for the engine: a version tag enum,
//! the stable model, one document type per schema version, the per-version
//! path maps and the required model fields. [`Family`] erases the model type
//! behind JSON for callers that pick the family at runtime, and [`detect`]
//! identifies any supported payload from its root namespace.

#![forbid(unsafe_code)]

#[macro_use]
mod macros;

pub mod account_report;
pub mod account_reporting_request;
pub mod common;
pub mod connection_check;
mod family;

pub use common::FieldHelp;
pub use family::{detect, Detection, Family};

pub mod prelude {
    pub use super::{detect, Detection, Family, MessageError, MessageResult};
    pub use super::{account_report, account_reporting_request, connection_check};
}

#[derive(Debug, thiserror::Error)]
pub enum MessageError {
    #[error(transparent)]
    Engine(#[from] isomap_engine::EngineError),
    #[error("model json: {0}")]
    Json(#[from] serde_json::Error),
    #[error("unknown message family: {0}")]
    UnknownFamily(String),
    #[error("no registered family for namespace {namespace} (root message {})", .message.as_deref().unwrap_or("?"))]
    Unrecognized { namespace: String, message: Option<String> },
}

pub type MessageResult<T> = Result<T, MessageError>;
