#![forbid(unsafe_code)]

use chrono::{TimeZone, Utc};

use isomap_engine::EngineError;
use isomap_messages::connection_check::{self as cc, Message, Version};
use isomap_messages::{Family, MessageError};

fn model() -> Message {
    Message {
        event_type: "PING".into(),
        event_param: "BMGMT001".into(),
        event_time: Some(Utc.with_ymd_and_hms(2025, 1, 15, 8, 0, 0).unwrap()),
    }
}

#[test]
fn both_roots_round_trip() {
    for (version, root) in [(Version::V01, "<Admi00400101>"), (Version::V02, "<SysEvtNtfctn>")] {
        let xml = cc::write_xml(&model(), Some(version)).unwrap();
        assert!(xml.contains(root), "{xml}");
        assert!(xml.contains("<EvtParam>BMGMT001</EvtParam>"), "{xml}");
        let (back, parsed) = cc::parse(xml.as_bytes()).unwrap();
        assert_eq!(parsed, version);
        assert_eq!(back, model());
    }
}

#[test]
fn event_code_is_limited_to_four_characters() {
    let mut m = model();
    m.event_type = "PINGS".into();
    let err = cc::write_xml(&m, None).unwrap_err();
    assert_eq!(err.field(), Some("EventType"));
}

const WITHOUT_PARAM: &str = r#"<Document xmlns="urn:iso:std:iso:20022:tech:xsd:admi.004.001.02">
  <SysEvtNtfctn>
    <EvtInf>
      <EvtCd>PING</EvtCd>
      <EvtTm>2025-01-15T08:00:00Z</EvtTm>
    </EvtInf>
  </SysEvtNtfctn>
</Document>"#;

#[test]
fn parse_is_lenient_and_the_checked_parse_is_not() {
    let p = cc::processor().unwrap();
    let (model, _) = p.parse(WITHOUT_PARAM.as_bytes()).unwrap();
    assert_eq!(model.event_type, "PING");
    assert!(model.event_param.is_empty());

    let err = p.parse_checked(WITHOUT_PARAM.as_bytes()).unwrap_err();
    assert!(matches!(err, EngineError::MissingRequiredField(ref f) if f == "EventParam"), "{err}");

    let err = Family::ConnectionCheck.validate(WITHOUT_PARAM.as_bytes()).unwrap_err();
    assert!(matches!(err, MessageError::Engine(EngineError::MissingRequiredField(_))), "{err}");
}
