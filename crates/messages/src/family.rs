//! Runtime family selection: JSON models in, XML out, and payload detection.

use std::fmt;
use std::str::FromStr;

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::debug;

use isomap_engine::{sniff, Direction, EngineError, FlatEntry, Model, PathMap, Processor, VersionTag};

use crate::{account_report, account_reporting_request, connection_check, FieldHelp, MessageError, MessageResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Family {
    AccountReportingRequest,
    AccountReport,
    ConnectionCheck,
}

macro_rules! dispatch {
    ($family:expr, $p:ident => $body:expr) => {
        match $family {
            Family::AccountReportingRequest => {
                let $p = account_reporting_request::processor()?;
                $body
            }
            Family::AccountReport => {
                let $p = account_report::processor()?;
                $body
            }
            Family::ConnectionCheck => {
                let $p = connection_check::processor()?;
                $body
            }
        }
    };
}

impl Family {
    pub const ALL: [Family; 3] = [Family::AccountReportingRequest, Family::AccountReport, Family::ConnectionCheck];

    pub fn name(self) -> &'static str {
        match self {
            Family::AccountReportingRequest => account_reporting_request::FAMILY,
            Family::AccountReport => account_report::FAMILY,
            Family::ConnectionCheck => connection_check::FAMILY,
        }
    }

    /// Message definition prefix shared by every version, e.g. `camt.052`.
    pub fn message(self) -> &'static str {
        match self {
            Family::AccountReportingRequest => "camt.060",
            Family::AccountReport => "camt.052",
            Family::ConnectionCheck => "admi.004",
        }
    }

    pub fn fields(self) -> &'static [FieldHelp] {
        match self {
            Family::AccountReportingRequest => account_reporting_request::FIELDS,
            Family::AccountReport => account_report::FIELDS,
            Family::ConnectionCheck => connection_check::FIELDS,
        }
    }

    pub fn required(self) -> &'static [&'static str] {
        match self {
            Family::AccountReportingRequest => account_reporting_request::REQUIRED,
            Family::AccountReport => account_report::REQUIRED,
            Family::ConnectionCheck => connection_check::REQUIRED,
        }
    }

    /// Registered version tags, oldest first.
    pub fn versions(self) -> MessageResult<Vec<String>> {
        dispatch!(self, p => Ok(p.versions().iter().map(|v| v.to_string()).collect()))
    }

    pub fn latest(self) -> MessageResult<String> { dispatch!(self, p => Ok(p.latest()?.to_string())) }

    pub fn version_for(self, namespace: &str) -> MessageResult<Option<String>> {
        dispatch!(self, p => Ok(p.registry().version_for(namespace).map(|v| v.to_string())))
    }

    /// Parse a wire payload of any registered version into the JSON model.
    pub fn parse_json(self, raw: &[u8]) -> MessageResult<(serde_json::Value, String)> {
        dispatch!(self, p => parse_json(p, raw))
    }

    /// Render a JSON model as XML; `version` defaults to the latest.
    pub fn render_json(self, json: &[u8], version: Option<&str>) -> MessageResult<String> {
        dispatch!(self, p => render_json(p, json, version))
    }

    /// Document facet check followed by the required-field gate. Returns the version tag.
    pub fn validate(self, raw: &[u8]) -> MessageResult<String> { dispatch!(self, p => validate(p, raw)) }

    pub fn path_map(self, version: &str) -> MessageResult<PathMap> { dispatch!(self, p => path_map(p, version)) }

    /// Flat entries a payload resolves to, in the document to model direction.
    pub fn resolve(self, raw: &[u8]) -> MessageResult<(String, Vec<FlatEntry>)> {
        dispatch!(self, p => resolve(p, raw))
    }
}

impl fmt::Display for Family {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(self.name()) }
}

/// Accepts the family name in any case with or without separators
/// (`account-report`) or a message name (`camt.052.001.08`).
impl FromStr for Family {
    type Err = MessageError;

    fn from_str(s: &str) -> MessageResult<Self> {
        let key = s.chars().filter(|c| c.is_ascii_alphanumeric() || *c == '.').collect::<String>().to_ascii_lowercase();
        Family::ALL
            .into_iter()
            .find(|f| f.name().to_ascii_lowercase() == key || key.starts_with(f.message()))
            .ok_or_else(|| MessageError::UnknownFamily(s.to_string()))
    }
}

fn parse_json<M, V>(p: &Processor<M, V>, raw: &[u8]) -> MessageResult<(serde_json::Value, String)>
where
    M: Model + Serialize,
    V: VersionTag,
{
    let (model, version) = p.parse(raw)?;
    Ok((serde_json::to_value(&model)?, version.to_string()))
}

fn render_json<M, V>(p: &Processor<M, V>, json: &[u8], version: Option<&str>) -> MessageResult<String>
where
    M: Model + DeserializeOwned,
    V: VersionTag + FromStr<Err = EngineError>,
{
    let model: M = serde_json::from_slice(json)?;
    let version = version.map(str::parse::<V>).transpose()?;
    Ok(p.write_xml(&model, version)?)
}

fn validate<M: Model, V: VersionTag>(p: &Processor<M, V>, raw: &[u8]) -> MessageResult<String> {
    let (doc, version) = p.registry().lookup(raw)?;
    doc.validate()?;
    let model = p.to_model(&*doc, version)?;
    p.check_required(&model)?;
    Ok(version.to_string())
}

fn path_map<M, V>(p: &Processor<M, V>, version: &str) -> MessageResult<PathMap>
where
    M: Model,
    V: VersionTag + FromStr<Err = EngineError>,
{
    let version: V = version.parse()?;
    Ok(p.registry().registration(version)?.path_map.clone())
}

fn resolve<M: Model, V: VersionTag>(p: &Processor<M, V>, raw: &[u8]) -> MessageResult<(String, Vec<FlatEntry>)> {
    let (doc, version) = p.registry().lookup(raw)?;
    let entries = p.resolve(doc.as_record(), version, Direction::ToModel)?;
    Ok((version.to_string(), entries))
}

/// What a payload is, read from its root element alone.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Detection {
    pub family: Family,
    pub version: String,
    pub namespace: String,
    /// First element under `Document`, e.g. `BkToCstmrAcctRpt`.
    pub message: Option<String>,
}

/// Identify the family and version of any supported payload by its namespace.
pub fn detect(raw: &[u8]) -> MessageResult<Detection> {
    let sniffed = sniff(raw)?;
    let namespace = sniffed.namespace.ok_or(EngineError::MissingNamespace)?;
    for family in Family::ALL {
        if let Some(version) = family.version_for(&namespace)? {
            debug!(family = family.name(), version = %version, "payload detected");
            return Ok(Detection { family, version, namespace, message: sniffed.message });
        }
    }
    Err(MessageError::Unrecognized { namespace, message: sniffed.message })
}
