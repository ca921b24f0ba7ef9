#![forbid(unsafe_code)]

use isomap_engine::EngineError;
use isomap_messages::{detect, Family, MessageError};

const MODEL: &str = r#"{
  "messageId": "M20250115",
  "createdDateTime": "2025-01-15T08:00:00Z",
  "reportRequestId": "RQ1",
  "requestedMsgNameId": "camt.052.001.08",
  "accountOwnerAgent": { "paymentSysCode": "USABA", "paymentSysMemberId": "011104238" }
}"#;

#[test]
fn json_model_renders_and_detects() {
    let xml = Family::AccountReportingRequest.render_json(MODEL.as_bytes(), Some("05")).unwrap();
    let found = detect(xml.as_bytes()).unwrap();
    assert_eq!(found.family, Family::AccountReportingRequest);
    assert_eq!(found.version, "camt.060.001.05");
    assert_eq!(found.namespace, "urn:iso:std:iso:20022:tech:xsd:camt.060.001.05");
    assert_eq!(found.message.as_deref(), Some("AcctRptgReq"));

    let (json, version) = Family::AccountReportingRequest.parse_json(xml.as_bytes()).unwrap();
    assert_eq!(version, "camt.060.001.05");
    assert_eq!(json["messageId"], "M20250115");
    assert_eq!(json["accountOwnerAgent"]["paymentSysMemberId"], "011104238");
    assert_eq!(json["accountOtherId"], "");
}

#[test]
fn unknown_version_tag_is_reported() {
    let err = Family::AccountReportingRequest.render_json(MODEL.as_bytes(), Some("09")).unwrap_err();
    assert!(matches!(err, MessageError::Engine(EngineError::UnknownVersion(_))), "{err}");
}

#[test]
fn unregistered_namespace_names_the_root_message() {
    let raw = br#"<Document xmlns="urn:iso:std:iso:20022:tech:xsd:pacs.008.001.08"><FIToFICstmrCdtTrf/></Document>"#;
    match detect(raw).unwrap_err() {
        MessageError::Unrecognized { namespace, message } => {
            assert!(namespace.ends_with("pacs.008.001.08"));
            assert_eq!(message.as_deref(), Some("FIToFICstmrCdtTrf"));
        }
        other => panic!("unexpected {other:?}"),
    }
}

#[test]
fn missing_namespace_and_broken_xml_fail() {
    let err = detect(b"<Document><SysEvtNtfctn/></Document>").unwrap_err();
    assert!(matches!(err, MessageError::Engine(EngineError::MissingNamespace)), "{err}");
    let err = detect(b"<Document xmlns=").unwrap_err();
    assert!(matches!(err, MessageError::Engine(EngineError::InvalidXml(_))), "{err}");
}

#[test]
fn path_maps_are_exposed_per_version() {
    let map = Family::ConnectionCheck.path_map("admi.004.001.01").unwrap();
    let json = serde_json::to_value(&map).unwrap();
    assert_eq!(json["rules"][1]["document"], "Admi00400101.EvtInf.EvtParam[0]");
    assert_eq!(json["rules"][1]["model"], "EventParam");
}
