#![forbid(unsafe_code)]

use chrono::{DateTime, TimeZone, Utc};

use isomap_engine::Document;
use isomap_messages::account_reporting_request::{self as arr, Agent, Message, SequenceRange, Version};

fn created() -> DateTime<Utc> { Utc.with_ymd_and_hms(2025, 1, 15, 8, 0, 0).unwrap() }

fn model() -> Message {
    Message {
        message_id: "20250115FEDRQ001".into(),
        created_date_time: Some(created()),
        report_request_id: "RQ1".into(),
        requested_msg_name_id: "camt.052.001.08".into(),
        account_other_id: "23456789".into(),
        account_property: "DDA".into(),
        account_owner_agent: Agent {
            business_id_code: "BOFAUS3NXXX".into(),
            payment_sys_code: "USABA".into(),
            payment_sys_member_id: "011104238".into(),
            bank_name: "Bank A".into(),
            other_type_id: "B1QDRCQR".into(),
        },
        from_to_sequence: SequenceRange { from_seq: "000001".into(), to_seq: "000100".into() },
    }
}

#[test]
fn every_version_round_trips_what_it_carries() {
    for &version in Version::ALL {
        let xml = arr::write_xml(&model(), Some(version)).unwrap();
        assert!(xml.starts_with("<?xml"), "{xml}");
        assert!(xml.contains(version.namespace()), "{xml}");
        let (back, parsed) = arr::parse(xml.as_bytes()).unwrap();
        assert_eq!(parsed, version);
        let mut expected = model();
        if version < Version::V04 {
            expected.from_to_sequence = SequenceRange::default();
        }
        assert_eq!(back, expected, "{version}");
    }
}

#[test]
fn agent_bic_element_is_renamed_after_version_02() {
    let v02 = arr::write_xml(&model(), Some(Version::V02)).unwrap();
    assert!(v02.contains("<BIC>BOFAUS3NXXX</BIC>"), "{v02}");
    assert!(!v02.contains("BICFI"));
    let v03 = arr::write_xml(&model(), Some(Version::V03)).unwrap();
    assert!(v03.contains("<BICFI>BOFAUS3NXXX</BICFI>"), "{v03}");
}

#[test]
fn reporting_sequence_lands_in_the_first_range() {
    let p = arr::processor().unwrap();
    let doc = p.render(&model(), Version::V06).unwrap();
    let typed = doc.as_any().downcast_ref::<arr::DocumentV06>().unwrap();
    let range = &typed.body.rptg_req[0].rptg_seq.as_ref().unwrap().fr_to_seq;
    assert_eq!(range.len(), 1);
    assert_eq!(range[0].to_seq.0, "000100");
}

#[test]
fn missing_agent_is_rejected_before_rendering() {
    let mut m = model();
    m.account_owner_agent = Agent::default();
    let err = arr::write_xml(&m, None).unwrap_err();
    assert_eq!(err.field(), Some("AccountOwnerAgent"));
}

#[test]
fn malformed_bic_names_the_model_field() {
    let mut m = model();
    m.account_owner_agent.business_id_code = "not a bic".into();
    let err = arr::processor().unwrap().render(&m, Version::V07).unwrap_err();
    assert_eq!(err.field(), Some("AccountOwnerAgent.BusinessIdCode"));
}

#[test]
fn default_version_is_the_latest() {
    let xml = arr::write_xml(&model(), None).unwrap();
    let (_, version) = arr::parse(xml.as_bytes()).unwrap();
    assert_eq!(version, Version::V07);
}
