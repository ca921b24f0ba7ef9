//! admi.004 connection check (system event notification), versions 01 and 02.

use chrono::{DateTime, Utc};
use once_cell::sync::OnceCell;
use serde::{Deserialize, Serialize};

use isomap_core::impl_record;
use isomap_engine::{document, DocumentRegistry, EngineResult, PathMap, Processor, Registration};

use crate::common::*;

pub const FAMILY: &str = "ConnectionCheck";

version_tags!(Version, "admi.004.001." {
    V01 => "01",
    V02 => "02",
});

pub const REQUIRED: &[&str] = &["EventType", "EventParam", "EventTime"];

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Message {
    pub event_type: String,
    pub event_param: String,
    pub event_time: Option<DateTime<Utc>>,
}
impl_record!(Message { "EventType" => event_type, "EventParam" => event_param, "EventTime" => event_time });

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Event {
    #[serde(rename = "EvtCd")]
    pub evt_cd: Max4AlphaNumericText,
    #[serde(rename = "EvtParam", default)]
    pub evt_param: Vec<Max35Text>,
    #[serde(rename = "EvtDesc", skip_serializing_if = "Option::is_none")]
    pub evt_desc: Option<Max140Text>,
    #[serde(rename = "EvtTm", skip_serializing_if = "Option::is_none")]
    pub evt_tm: Option<ISODateTime>,
}
impl_record!(Event { "EvtCd" => evt_cd, "EvtParam" => evt_param, "EvtDesc" => evt_desc, "EvtTm" => evt_tm });

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SystemEventNotification {
    #[serde(rename = "EvtInf")]
    pub evt_inf: Event,
}
impl_record!(SystemEventNotification { "EvtInf" => evt_inf });

document!(DocumentV01 { "Admi00400101" => body: SystemEventNotification });
document!(DocumentV02 { "SysEvtNtfctn" => body: SystemEventNotification });

pub fn path_map(version: Version) -> EngineResult<PathMap> {
    let root = match version {
        Version::V01 => "Admi00400101",
        Version::V02 => "SysEvtNtfctn",
    };
    let map = PathMap::builder()
        .flat(&format!("{}.EvtInf.EvtCd", root), "EventType")
        .flat(&format!("{}.EvtInf.EvtParam[0]", root), "EventParam")
        .flat(&format!("{}.EvtInf.EvtTm", root), "EventTime")
        .build()?;
    Ok(map)
}

static PROCESSOR: OnceCell<Processor<Message, Version>> = OnceCell::new();

pub fn processor() -> EngineResult<&'static Processor<Message, Version>> {
    PROCESSOR.get_or_try_init(|| {
        let registry = DocumentRegistry::new(vec![
            Registration::of::<DocumentV01>(Version::V01, Version::V01.namespace(), path_map(Version::V01)?),
            Registration::of::<DocumentV02>(Version::V02, Version::V02.namespace(), path_map(Version::V02)?),
        ])?;
        Processor::new(FAMILY, registry, REQUIRED)
    })
}

pub fn parse(raw: &[u8]) -> EngineResult<(Message, Version)> { processor()?.parse(raw) }

pub fn write_xml(model: &Message, version: Option<Version>) -> EngineResult<String> {
    processor()?.write_xml(model, version)
}

pub const FIELDS: &[FieldHelp] = &[
    FieldHelp {
        name: "EventType",
        title: "Event Type",
        type_name: "Max4AlphaNumericText",
        documentation: "Proprietary code used to specify an event that occurred in a system, e.g. PING.",
    },
    FieldHelp {
        name: "EventParam",
        title: "Event Parameter",
        type_name: "Max35Text",
        documentation: "Endpoint (logical terminal) of the participant that checks its connection.",
    },
    FieldHelp {
        name: "EventTime",
        title: "Event Time",
        type_name: "ISODateTime",
        documentation: "Date and time of the connection check.",
    },
];
