//! camt.060 AccountReportingRequest, versions 02 to 07.
//!
//! Version 02 names the agent BIC element `BIC`, later versions `BICFI`.
//! Versions 04 and later carry the requested reporting sequence.

use chrono::{DateTime, Utc};
use once_cell::sync::OnceCell;
use serde::{Deserialize, Serialize};

use isomap_core::impl_record;
use isomap_engine::{document, DocumentRegistry, EngineResult, PathMap, Processor, Registration};

use crate::common::*;

pub const FAMILY: &str = "AccountReportingRequest";

version_tags!(Version, "camt.060.001." {
    V02 => "02",
    V03 => "03",
    V04 => "04",
    V05 => "05",
    V06 => "06",
    V07 => "07",
});

pub const REQUIRED: &[&str] =
    &["MessageId", "CreatedDateTime", "ReportRequestId", "RequestedMsgNameId", "AccountOwnerAgent"];

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Agent {
    pub business_id_code: String,
    pub payment_sys_code: String,
    pub payment_sys_member_id: String,
    pub bank_name: String,
    pub other_type_id: String,
}
impl_record!(Agent {
    "BusinessIdCode" => business_id_code,
    "PaymentSysCode" => payment_sys_code,
    "PaymentSysMemberId" => payment_sys_member_id,
    "BankName" => bank_name,
    "OtherTypeId" => other_type_id,
});

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SequenceRange {
    pub from_seq: String,
    pub to_seq: String,
}
impl_record!(SequenceRange { "FromSeq" => from_seq, "ToSeq" => to_seq });

/// Stable model shared by every camt.060 version.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Message {
    pub message_id: String,
    pub created_date_time: Option<DateTime<Utc>>,
    pub report_request_id: String,
    pub requested_msg_name_id: String,
    pub account_other_id: String,
    pub account_property: String,
    pub account_owner_agent: Agent,
    pub from_to_sequence: SequenceRange,
}
impl_record!(Message {
    "MessageId" => message_id,
    "CreatedDateTime" => created_date_time,
    "ReportRequestId" => report_request_id,
    "RequestedMsgNameId" => requested_msg_name_id,
    "AccountOtherId" => account_other_id,
    "AccountProperty" => account_property,
    "AccountOwnerAgent" => account_owner_agent,
    "FromToSequence" => from_to_sequence,
});

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GroupHeader {
    #[serde(rename = "MsgId")]
    pub msg_id: Max35Text,
    #[serde(rename = "CreDtTm")]
    pub cre_dt_tm: ISODateTime,
}
impl_record!(GroupHeader { "MsgId" => msg_id, "CreDtTm" => cre_dt_tm });

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Party<F> {
    #[serde(rename = "Agt", skip_serializing_if = "Option::is_none")]
    pub agt: Option<BranchAndFinancialInstitution<F>>,
}
impl_record!(Party<F> { "Agt" => agt });

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FromToSequence {
    #[serde(rename = "FrSeq")]
    pub fr_seq: Max35Text,
    #[serde(rename = "ToSeq")]
    pub to_seq: Max35Text,
}
impl_record!(FromToSequence { "FrSeq" => fr_seq, "ToSeq" => to_seq });

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SequenceRangeChoice {
    #[serde(rename = "FrToSeq", default)]
    pub fr_to_seq: Vec<FromToSequence>,
}
impl_record!(SequenceRangeChoice { "FrToSeq" => fr_to_seq });

/// Request entry for versions 02 and 03.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReportingRequest<F> {
    #[serde(rename = "Id", skip_serializing_if = "Option::is_none")]
    pub id: Option<Max35Text>,
    #[serde(rename = "ReqdMsgNmId")]
    pub reqd_msg_nm_id: Max35Text,
    #[serde(rename = "Acct", skip_serializing_if = "Option::is_none")]
    pub acct: Option<CashAccount>,
    #[serde(rename = "AcctOwnr")]
    pub acct_ownr: Party<F>,
}
impl_record!(ReportingRequest<F> {
    "Id" => id,
    "ReqdMsgNmId" => reqd_msg_nm_id,
    "Acct" => acct,
    "AcctOwnr" => acct_ownr,
});

/// Request entry for versions 04 to 07.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SequencedReportingRequest {
    #[serde(rename = "Id", skip_serializing_if = "Option::is_none")]
    pub id: Option<Max35Text>,
    #[serde(rename = "ReqdMsgNmId")]
    pub reqd_msg_nm_id: Max35Text,
    #[serde(rename = "Acct", skip_serializing_if = "Option::is_none")]
    pub acct: Option<CashAccount>,
    #[serde(rename = "AcctOwnr")]
    pub acct_ownr: Party<FinancialInstitutionIdentification>,
    #[serde(rename = "RptgSeq", skip_serializing_if = "Option::is_none")]
    pub rptg_seq: Option<SequenceRangeChoice>,
}
impl_record!(SequencedReportingRequest {
    "Id" => id,
    "ReqdMsgNmId" => reqd_msg_nm_id,
    "Acct" => acct,
    "AcctOwnr" => acct_ownr,
    "RptgSeq" => rptg_seq,
});

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(bound(deserialize = "R: Deserialize<'de>"))]
pub struct AccountReportingRequest<R> {
    #[serde(rename = "GrpHdr")]
    pub grp_hdr: GroupHeader,
    #[serde(rename = "RptgReq", default)]
    pub rptg_req: Vec<R>,
}
impl_record!(AccountReportingRequest<R> { "GrpHdr" => grp_hdr, "RptgReq" => rptg_req });

type RequestV02 = AccountReportingRequest<ReportingRequest<FinancialInstitutionIdentificationBic>>;
type RequestV03 = AccountReportingRequest<ReportingRequest<FinancialInstitutionIdentification>>;
type RequestV04 = AccountReportingRequest<SequencedReportingRequest>;

document!(DocumentV02 { "AcctRptgReq" => body: RequestV02 });
document!(DocumentV03 { "AcctRptgReq" => body: RequestV03 });
document!(DocumentV04 { "AcctRptgReq" => body: RequestV04 });
document!(DocumentV05 { "AcctRptgReq" => body: RequestV04 });
document!(DocumentV06 { "AcctRptgReq" => body: RequestV04 });
document!(DocumentV07 { "AcctRptgReq" => body: RequestV04 });

pub fn path_map(version: Version) -> EngineResult<PathMap> {
    let bic = match version {
        Version::V02 => "AcctRptgReq.RptgReq[0].AcctOwnr.Agt.FinInstnId.BIC",
        _ => "AcctRptgReq.RptgReq[0].AcctOwnr.Agt.FinInstnId.BICFI",
    };
    let mut builder = PathMap::builder()
        .flat("AcctRptgReq.GrpHdr.MsgId", "MessageId")
        .flat("AcctRptgReq.GrpHdr.CreDtTm", "CreatedDateTime")
        .flat("AcctRptgReq.RptgReq[0].Id", "ReportRequestId")
        .flat("AcctRptgReq.RptgReq[0].ReqdMsgNmId", "RequestedMsgNameId")
        .flat("AcctRptgReq.RptgReq[0].Acct.Id.Othr.Id", "AccountOtherId")
        .flat("AcctRptgReq.RptgReq[0].Acct.Tp.Prtry", "AccountProperty")
        .flat(bic, "AccountOwnerAgent.BusinessIdCode")
        .flat(
            "AcctRptgReq.RptgReq[0].AcctOwnr.Agt.FinInstnId.ClrSysMmbId.ClrSysId.Cd",
            "AccountOwnerAgent.PaymentSysCode",
        )
        .flat("AcctRptgReq.RptgReq[0].AcctOwnr.Agt.FinInstnId.ClrSysMmbId.MmbId", "AccountOwnerAgent.PaymentSysMemberId")
        .flat("AcctRptgReq.RptgReq[0].AcctOwnr.Agt.FinInstnId.Nm", "AccountOwnerAgent.BankName")
        .flat("AcctRptgReq.RptgReq[0].AcctOwnr.Agt.FinInstnId.Othr.Id", "AccountOwnerAgent.OtherTypeId");
    if version >= Version::V04 {
        builder = builder
            .flat("AcctRptgReq.RptgReq[0].RptgSeq.FrToSeq[0].FrSeq", "FromToSequence.FromSeq")
            .flat("AcctRptgReq.RptgReq[0].RptgSeq.FrToSeq[0].ToSeq", "FromToSequence.ToSeq");
    }
    Ok(builder.build()?)
}

fn registration(version: Version) -> EngineResult<Registration<Version>> {
    let map = path_map(version)?;
    let ns = version.namespace();
    Ok(match version {
        Version::V02 => Registration::of::<DocumentV02>(version, ns, map),
        Version::V03 => Registration::of::<DocumentV03>(version, ns, map),
        Version::V04 => Registration::of::<DocumentV04>(version, ns, map),
        Version::V05 => Registration::of::<DocumentV05>(version, ns, map),
        Version::V06 => Registration::of::<DocumentV06>(version, ns, map),
        Version::V07 => Registration::of::<DocumentV07>(version, ns, map),
    })
}

static PROCESSOR: OnceCell<Processor<Message, Version>> = OnceCell::new();

/// Process-wide processor for every camt.060 version, built on first use.
pub fn processor() -> EngineResult<&'static Processor<Message, Version>> {
    PROCESSOR.get_or_try_init(|| {
        let entries = Version::ALL.iter().map(|v| registration(*v)).collect::<EngineResult<Vec<_>>>()?;
        Processor::new(FAMILY, DocumentRegistry::new(entries)?, REQUIRED)
    })
}

pub fn parse(raw: &[u8]) -> EngineResult<(Message, Version)> { processor()?.parse(raw) }

pub fn write_xml(model: &Message, version: Option<Version>) -> EngineResult<String> {
    processor()?.write_xml(model, version)
}

pub const FIELDS: &[FieldHelp] = &[
    FieldHelp {
        name: "MessageId",
        title: "Message Identification",
        type_name: "Max35Text",
        documentation: "Point to point reference assigned by the instructing party to identify the message.",
    },
    FieldHelp {
        name: "CreatedDateTime",
        title: "Creation Date Time",
        type_name: "ISODateTime",
        documentation: "Date and time at which the message was created.",
    },
    FieldHelp {
        name: "ReportRequestId",
        title: "Report Request Identification",
        type_name: "Max35Text",
        documentation: "Identification of the reporting request.",
    },
    FieldHelp {
        name: "RequestedMsgNameId",
        title: "Requested Message Name Identification",
        type_name: "Max35Text",
        documentation: "Message name of the report being requested, e.g. camt.052.001.08.",
    },
    FieldHelp {
        name: "AccountOtherId",
        title: "Account Other Identification",
        type_name: "Max34Text",
        documentation: "Account identification using a scheme other than IBAN.",
    },
    FieldHelp {
        name: "AccountProperty",
        title: "Account Type Proprietary",
        type_name: "Max35Text",
        documentation: "Proprietary type of the account to report on.",
    },
    FieldHelp {
        name: "AccountOwnerAgent.BusinessIdCode",
        title: "Account Owner Agent BIC",
        type_name: "BICFIIdentifier",
        documentation: "Business identifier code of the agent owning the account.",
    },
    FieldHelp {
        name: "AccountOwnerAgent.PaymentSysCode",
        title: "Clearing System Code",
        type_name: "Max5Text",
        documentation: "Clearing system in which the agent is a member.",
    },
    FieldHelp {
        name: "AccountOwnerAgent.PaymentSysMemberId",
        title: "Clearing System Member Identification",
        type_name: "Max35Text",
        documentation: "Member identification of the agent in the clearing system.",
    },
    FieldHelp {
        name: "AccountOwnerAgent.BankName",
        title: "Agent Name",
        type_name: "Max140Text",
        documentation: "Name by which the agent is known.",
    },
    FieldHelp {
        name: "AccountOwnerAgent.OtherTypeId",
        title: "Agent Other Identification",
        type_name: "Max35Text",
        documentation: "Proprietary identification of the agent.",
    },
    FieldHelp {
        name: "FromToSequence",
        title: "Reporting Sequence",
        type_name: "SequenceRange1",
        documentation: "Range of report sequence numbers being requested (04 and later).",
    },
];

#[cfg(test)]
mod tests {
    use super::*;
    use isomap_engine::Rule;

    #[test]
    fn sequence_rules_start_at_version_04() {
        let count = |v| path_map(v).unwrap().rules().len();
        assert_eq!(count(Version::V03) + 2, count(Version::V04));
        assert_eq!(count(Version::V04), count(Version::V07));
    }

    #[test]
    fn version_02_maps_the_bic_element() {
        let map = path_map(Version::V02).unwrap();
        let bic = map.rules().iter().find(|r| r.model().to_string() == "AccountOwnerAgent.BusinessIdCode").unwrap();
        assert!(matches!(bic, Rule::Flat { .. }));
        assert!(bic.document().to_string().ends_with("FinInstnId.BIC"));
    }

    #[test]
    fn version_tags_parse_in_short_and_long_form() {
        assert_eq!("camt.060.001.05".parse::<Version>().unwrap(), Version::V05);
        assert_eq!("V03".parse::<Version>().unwrap(), Version::V03);
        assert_eq!("07".parse::<Version>().unwrap(), Version::V07);
        assert!("08".parse::<Version>().is_err());
        assert_eq!(Version::V02.namespace(), "urn:iso:std:iso:20022:tech:xsd:camt.060.001.02");
    }
}
