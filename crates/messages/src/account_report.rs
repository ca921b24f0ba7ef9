//! camt.052 BankToCustomerAccountReport, versions 02 to 12.
//!
//! The totals per bank transaction code come in three layouts: a flat net
//! amount (02, 03), a grouped net amount (04 to 06), and grouped totals with
//! credit and debit entry counts (07 and later, which also add credit lines
//! under each balance). Version 03 introduces the original business query.

use chrono::{DateTime, Utc};
use once_cell::sync::OnceCell;
use serde::{Deserialize, Serialize};

use isomap_core::impl_record;
use isomap_engine::{document, DocumentRegistry, EngineResult, PathMap, PathMapBuilder, Processor, Registration};

use crate::common::*;

pub const FAMILY: &str = "AccountReport";

version_tags!(Version, "camt.052.001." {
    V02 => "02",
    V03 => "03",
    V04 => "04",
    V05 => "05",
    V06 => "06",
    V07 => "07",
    V08 => "08",
    V09 => "09",
    V10 => "10",
    V11 => "11",
    V12 => "12",
});

pub const REQUIRED: &[&str] = &[
    "MessageId",
    "CreatedDateTime",
    "MessagePagination",
    "ReportTypeId",
    "ReportCreatedDate",
    "AccountOtherId",
    "AccountType",
    "RelatedAccountOtherId",
    "TransactionsSummary",
];

// ---- model ----

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Pagination {
    pub page_number: String,
    pub last_page_indicator: bool,
}
impl_record!(Pagination { "PageNumber" => page_number, "LastPageIndicator" => last_page_indicator });

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Amount {
    pub amount: f64,
    pub currency: String,
}
impl_record!(Amount { "Amount" => amount, "Currency" => currency });

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CreditLine {
    pub included: bool,
    #[serde(rename = "type")]
    pub kind: String,
    pub amount: Amount,
    pub date_time: Option<DateTime<Utc>>,
}
impl_record!(CreditLine { "Included" => included, "Type" => kind, "Amount" => amount, "DateTime" => date_time });

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Balance {
    pub balance_type_id: String,
    pub amount: Amount,
    pub credit_debit_indicator: String,
    pub date_time: Option<DateTime<Utc>>,
    pub cdt_lines: Vec<CreditLine>,
}
impl_record!(Balance {
    "BalanceTypeId" => balance_type_id,
    "Amount" => amount,
    "CreditDebitIndicator" => credit_debit_indicator,
    "DateTime" => date_time,
    "CdtLines" => cdt_lines,
});

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NumberAndSum {
    pub number_of_entries: String,
    pub sum: f64,
}
impl_record!(NumberAndSum { "NumberOfEntries" => number_of_entries, "Sum" => sum });

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TransactionsSummary {
    pub total_net_entry_amount: f64,
    pub credit_debit_indicator: String,
    pub credit_entries: NumberAndSum,
    pub debit_entries: NumberAndSum,
    pub bank_transaction_code: String,
    pub date: Option<DateTime<Utc>>,
}
impl_record!(TransactionsSummary {
    "TotalNetEntryAmount" => total_net_entry_amount,
    "CreditDebitIndicator" => credit_debit_indicator,
    "CreditEntries" => credit_entries,
    "DebitEntries" => debit_entries,
    "BankTransactionCode" => bank_transaction_code,
    "Date" => date,
});

/// Stable model shared by every camt.052 version.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Message {
    pub message_id: String,
    pub created_date_time: Option<DateTime<Utc>>,
    pub message_pagination: Pagination,
    pub original_business_msg_id: String,
    pub original_business_msg_name_id: String,
    pub original_business_msg_create_time: Option<DateTime<Utc>>,
    pub report_type_id: String,
    pub report_created_date: Option<DateTime<Utc>>,
    pub account_other_id: String,
    pub account_type: String,
    pub related_account_other_id: String,
    pub balances: Vec<Balance>,
    pub transactions_summary: Vec<TransactionsSummary>,
}
impl_record!(Message {
    "MessageId" => message_id,
    "CreatedDateTime" => created_date_time,
    "MessagePagination" => message_pagination,
    "OriginalBusinessMsgId" => original_business_msg_id,
    "OriginalBusinessMsgNameId" => original_business_msg_name_id,
    "OriginalBusinessMsgCreateTime" => original_business_msg_create_time,
    "ReportTypeId" => report_type_id,
    "ReportCreatedDate" => report_created_date,
    "AccountOtherId" => account_other_id,
    "AccountType" => account_type,
    "RelatedAccountOtherId" => related_account_other_id,
    "Balances" => balances,
    "TransactionsSummary" => transactions_summary,
});

// ---- documents ----

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Pagination1 {
    #[serde(rename = "PgNb")]
    pub pg_nb: Max5NumericText,
    #[serde(rename = "LastPgInd")]
    pub last_pg_ind: bool,
}
impl_record!(Pagination1 { "PgNb" => pg_nb, "LastPgInd" => last_pg_ind });

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OriginalBusinessQuery {
    #[serde(rename = "MsgId")]
    pub msg_id: Max35Text,
    #[serde(rename = "MsgNmId", skip_serializing_if = "Option::is_none")]
    pub msg_nm_id: Option<Max35Text>,
    #[serde(rename = "CreDtTm", skip_serializing_if = "Option::is_none")]
    pub cre_dt_tm: Option<ISODateTime>,
}
impl_record!(OriginalBusinessQuery { "MsgId" => msg_id, "MsgNmId" => msg_nm_id, "CreDtTm" => cre_dt_tm });

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GroupHeaderV02 {
    #[serde(rename = "MsgId")]
    pub msg_id: Max35Text,
    #[serde(rename = "CreDtTm")]
    pub cre_dt_tm: ISODateTime,
    #[serde(rename = "MsgPgntn", skip_serializing_if = "Option::is_none")]
    pub msg_pgntn: Option<Pagination1>,
}
impl_record!(GroupHeaderV02 { "MsgId" => msg_id, "CreDtTm" => cre_dt_tm, "MsgPgntn" => msg_pgntn });

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GroupHeader {
    #[serde(rename = "MsgId")]
    pub msg_id: Max35Text,
    #[serde(rename = "CreDtTm")]
    pub cre_dt_tm: ISODateTime,
    #[serde(rename = "MsgPgntn", skip_serializing_if = "Option::is_none")]
    pub msg_pgntn: Option<Pagination1>,
    #[serde(rename = "OrgnlBizQry", skip_serializing_if = "Option::is_none")]
    pub orgnl_biz_qry: Option<OriginalBusinessQuery>,
}
impl_record!(GroupHeader {
    "MsgId" => msg_id,
    "CreDtTm" => cre_dt_tm,
    "MsgPgntn" => msg_pgntn,
    "OrgnlBizQry" => orgnl_biz_qry,
});

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProprietaryBankTransactionCode {
    #[serde(rename = "Cd")]
    pub cd: Max35Text,
    #[serde(rename = "Issr", skip_serializing_if = "Option::is_none")]
    pub issr: Option<Max35Text>,
}
impl_record!(ProprietaryBankTransactionCode { "Cd" => cd, "Issr" => issr });

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BankTransactionCode {
    #[serde(rename = "Prtry", skip_serializing_if = "Option::is_none")]
    pub prtry: Option<ProprietaryBankTransactionCode>,
}
impl_record!(BankTransactionCode { "Prtry" => prtry });

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AmountAndDirection {
    #[serde(rename = "Amt")]
    pub amt: f64,
    #[serde(rename = "CdtDbtInd")]
    pub cdt_dbt_ind: CreditDebitCode,
}
impl_record!(AmountAndDirection { "Amt" => amt, "CdtDbtInd" => cdt_dbt_ind });

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NumberAndSumOfTransactions {
    #[serde(rename = "NbOfNtries", skip_serializing_if = "Option::is_none")]
    pub nb_of_ntries: Option<Max15NumericText>,
    #[serde(rename = "Sum", skip_serializing_if = "Option::is_none")]
    pub sum: Option<f64>,
}
impl_record!(NumberAndSumOfTransactions { "NbOfNtries" => nb_of_ntries, "Sum" => sum });

/// Totals layout for versions 02 and 03.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TotalsPerBankTransactionCodeV02 {
    #[serde(rename = "NbOfNtries", skip_serializing_if = "Option::is_none")]
    pub nb_of_ntries: Option<Max15NumericText>,
    #[serde(rename = "Sum", skip_serializing_if = "Option::is_none")]
    pub sum: Option<f64>,
    #[serde(rename = "TtlNetNtryAmt", skip_serializing_if = "Option::is_none")]
    pub ttl_net_ntry_amt: Option<f64>,
    #[serde(rename = "CdtDbtInd", skip_serializing_if = "Option::is_none")]
    pub cdt_dbt_ind: Option<CreditDebitCode>,
    #[serde(rename = "BkTxCd")]
    pub bk_tx_cd: BankTransactionCode,
}
impl_record!(TotalsPerBankTransactionCodeV02 {
    "NbOfNtries" => nb_of_ntries,
    "Sum" => sum,
    "TtlNetNtryAmt" => ttl_net_ntry_amt,
    "CdtDbtInd" => cdt_dbt_ind,
    "BkTxCd" => bk_tx_cd,
});

/// Totals layout for versions 04 to 06.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TotalsPerBankTransactionCodeV04 {
    #[serde(rename = "NbOfNtries", skip_serializing_if = "Option::is_none")]
    pub nb_of_ntries: Option<Max15NumericText>,
    #[serde(rename = "Sum", skip_serializing_if = "Option::is_none")]
    pub sum: Option<f64>,
    #[serde(rename = "TtlNetNtry", skip_serializing_if = "Option::is_none")]
    pub ttl_net_ntry: Option<AmountAndDirection>,
    #[serde(rename = "BkTxCd")]
    pub bk_tx_cd: BankTransactionCode,
}
impl_record!(TotalsPerBankTransactionCodeV04 {
    "NbOfNtries" => nb_of_ntries,
    "Sum" => sum,
    "TtlNetNtry" => ttl_net_ntry,
    "BkTxCd" => bk_tx_cd,
});

/// Totals layout for versions 07 and later.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TotalsPerBankTransactionCodeV07 {
    #[serde(rename = "NbOfNtries", skip_serializing_if = "Option::is_none")]
    pub nb_of_ntries: Option<Max15NumericText>,
    #[serde(rename = "Sum", skip_serializing_if = "Option::is_none")]
    pub sum: Option<f64>,
    #[serde(rename = "TtlNetNtry", skip_serializing_if = "Option::is_none")]
    pub ttl_net_ntry: Option<AmountAndDirection>,
    #[serde(rename = "CdtNtries", skip_serializing_if = "Option::is_none")]
    pub cdt_ntries: Option<NumberAndSumOfTransactions>,
    #[serde(rename = "DbtNtries", skip_serializing_if = "Option::is_none")]
    pub dbt_ntries: Option<NumberAndSumOfTransactions>,
    #[serde(rename = "BkTxCd")]
    pub bk_tx_cd: BankTransactionCode,
    #[serde(rename = "Dt", skip_serializing_if = "Option::is_none")]
    pub dt: Option<DateAndDateTimeChoice>,
}
impl_record!(TotalsPerBankTransactionCodeV07 {
    "NbOfNtries" => nb_of_ntries,
    "Sum" => sum,
    "TtlNetNtry" => ttl_net_ntry,
    "CdtNtries" => cdt_ntries,
    "DbtNtries" => dbt_ntries,
    "BkTxCd" => bk_tx_cd,
    "Dt" => dt,
});

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(bound(deserialize = "T: Deserialize<'de>"))]
pub struct TotalTransactions<T> {
    #[serde(rename = "TtlNtriesPerBkTxCd", default)]
    pub ttl_ntries_per_bk_tx_cd: Vec<T>,
}
impl_record!(TotalTransactions<T> { "TtlNtriesPerBkTxCd" => ttl_ntries_per_bk_tx_cd });

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BalanceType {
    #[serde(rename = "CdOrPrtry")]
    pub cd_or_prtry: CodeOrProprietary,
}
impl_record!(BalanceType { "CdOrPrtry" => cd_or_prtry });

/// Balance for versions 02 to 06.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CashBalance {
    #[serde(rename = "Tp")]
    pub tp: BalanceType,
    #[serde(rename = "Amt")]
    pub amt: CurrencyAndAmount,
    #[serde(rename = "CdtDbtInd")]
    pub cdt_dbt_ind: CreditDebitCode,
    #[serde(rename = "Dt")]
    pub dt: DateAndDateTimeChoice,
}
impl_record!(CashBalance { "Tp" => tp, "Amt" => amt, "CdtDbtInd" => cdt_dbt_ind, "Dt" => dt });

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CreditLine3 {
    #[serde(rename = "Incl")]
    pub incl: bool,
    #[serde(rename = "Tp", skip_serializing_if = "Option::is_none")]
    pub tp: Option<CodeOrProprietary>,
    #[serde(rename = "Amt", skip_serializing_if = "Option::is_none")]
    pub amt: Option<CurrencyAndAmount>,
    #[serde(rename = "Dt", skip_serializing_if = "Option::is_none")]
    pub dt: Option<DateAndDateTimeChoice>,
}
impl_record!(CreditLine3 { "Incl" => incl, "Tp" => tp, "Amt" => amt, "Dt" => dt });

/// Balance for versions 07 and later.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CashBalanceWithLines {
    #[serde(rename = "Tp")]
    pub tp: BalanceType,
    #[serde(rename = "CdtLine", default)]
    pub cdt_line: Vec<CreditLine3>,
    #[serde(rename = "Amt")]
    pub amt: CurrencyAndAmount,
    #[serde(rename = "CdtDbtInd")]
    pub cdt_dbt_ind: CreditDebitCode,
    #[serde(rename = "Dt")]
    pub dt: DateAndDateTimeChoice,
}
impl_record!(CashBalanceWithLines {
    "Tp" => tp,
    "CdtLine" => cdt_line,
    "Amt" => amt,
    "CdtDbtInd" => cdt_dbt_ind,
    "Dt" => dt,
});

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(bound(deserialize = "B: Deserialize<'de>, T: Deserialize<'de>"))]
pub struct AccountReport<B, T> {
    #[serde(rename = "Id")]
    pub id: Max35Text,
    #[serde(rename = "CreDtTm", skip_serializing_if = "Option::is_none")]
    pub cre_dt_tm: Option<ISODateTime>,
    #[serde(rename = "Acct")]
    pub acct: CashAccount,
    #[serde(rename = "RltdAcct", skip_serializing_if = "Option::is_none")]
    pub rltd_acct: Option<CashAccount>,
    #[serde(rename = "Bal", default)]
    pub bal: Vec<B>,
    #[serde(rename = "TxsSummry", skip_serializing_if = "Option::is_none")]
    pub txs_summry: Option<TotalTransactions<T>>,
}
impl_record!(AccountReport<B, T> {
    "Id" => id,
    "CreDtTm" => cre_dt_tm,
    "Acct" => acct,
    "RltdAcct" => rltd_acct,
    "Bal" => bal,
    "TxsSummry" => txs_summry,
});

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(bound(deserialize = "H: Deserialize<'de>, R: Deserialize<'de>"))]
pub struct BankToCustomerAccountReport<H, R> {
    #[serde(rename = "GrpHdr")]
    pub grp_hdr: H,
    #[serde(rename = "Rpt", default)]
    pub rpt: Vec<R>,
}
impl_record!(BankToCustomerAccountReport<H, R> { "GrpHdr" => grp_hdr, "Rpt" => rpt });

type ReportV02 = BankToCustomerAccountReport<GroupHeaderV02, AccountReport<CashBalance, TotalsPerBankTransactionCodeV02>>;
type ReportV03 = BankToCustomerAccountReport<GroupHeader, AccountReport<CashBalance, TotalsPerBankTransactionCodeV02>>;
type ReportV04 = BankToCustomerAccountReport<GroupHeader, AccountReport<CashBalance, TotalsPerBankTransactionCodeV04>>;
type ReportV07 =
    BankToCustomerAccountReport<GroupHeader, AccountReport<CashBalanceWithLines, TotalsPerBankTransactionCodeV07>>;

document!(DocumentV02 { "BkToCstmrAcctRpt" => body: ReportV02 });
document!(DocumentV03 { "BkToCstmrAcctRpt" => body: ReportV03 });
document!(DocumentV04 { "BkToCstmrAcctRpt" => body: ReportV04 });
document!(DocumentV05 { "BkToCstmrAcctRpt" => body: ReportV04 });
document!(DocumentV06 { "BkToCstmrAcctRpt" => body: ReportV04 });
document!(DocumentV07 { "BkToCstmrAcctRpt" => body: ReportV07 });
document!(DocumentV08 { "BkToCstmrAcctRpt" => body: ReportV07 });
document!(DocumentV09 { "BkToCstmrAcctRpt" => body: ReportV07 });
document!(DocumentV10 { "BkToCstmrAcctRpt" => body: ReportV07 });
document!(DocumentV11 { "BkToCstmrAcctRpt" => body: ReportV07 });
document!(DocumentV12 { "BkToCstmrAcctRpt" => body: ReportV07 });

// ---- path maps ----

const RPT: &str = "BkToCstmrAcctRpt.Rpt[0]";

fn totals(version: Version) -> impl FnOnce(PathMapBuilder) -> PathMapBuilder {
    move |b| {
        let b = if version <= Version::V03 {
            b.flat("TtlNetNtryAmt", "TotalNetEntryAmount").flat("CdtDbtInd", "CreditDebitIndicator")
        } else {
            b.flat("TtlNetNtry.Amt", "TotalNetEntryAmount").flat("TtlNetNtry.CdtDbtInd", "CreditDebitIndicator")
        };
        let b = b.flat("BkTxCd.Prtry.Cd", "BankTransactionCode");
        if version >= Version::V07 {
            b.flat("CdtNtries.NbOfNtries", "CreditEntries.NumberOfEntries")
                .flat("CdtNtries.Sum", "CreditEntries.Sum")
                .flat("DbtNtries.NbOfNtries", "DebitEntries.NumberOfEntries")
                .flat("DbtNtries.Sum", "DebitEntries.Sum")
                .flat("Dt.DtTm", "Date")
        } else {
            b
        }
    }
}

fn balances(version: Version) -> impl FnOnce(PathMapBuilder) -> PathMapBuilder {
    move |b| {
        let b = b
            .flat("Tp.CdOrPrtry.Prtry", "BalanceTypeId")
            .flat("Amt.Value", "Amount.Amount")
            .flat("Amt.Ccy", "Amount.Currency")
            .flat("CdtDbtInd", "CreditDebitIndicator")
            .flat("Dt.DtTm", "DateTime");
        if version >= Version::V07 {
            b.expand("CdtLine", "CdtLines", |l| {
                l.flat("Incl", "Included")
                    .flat("Tp.Prtry", "Type")
                    .flat("Amt.Value", "Amount.Amount")
                    .flat("Amt.Ccy", "Amount.Currency")
                    .flat("Dt.DtTm", "DateTime")
            })
        } else {
            b
        }
    }
}

pub fn path_map(version: Version) -> EngineResult<PathMap> {
    let at = |p: &str| format!("{}.{}", RPT, p);
    let mut builder = PathMap::builder()
        .flat("BkToCstmrAcctRpt.GrpHdr.MsgId", "MessageId")
        .flat("BkToCstmrAcctRpt.GrpHdr.CreDtTm", "CreatedDateTime")
        .flat("BkToCstmrAcctRpt.GrpHdr.MsgPgntn.PgNb", "MessagePagination.PageNumber")
        .flat("BkToCstmrAcctRpt.GrpHdr.MsgPgntn.LastPgInd", "MessagePagination.LastPageIndicator");
    if version >= Version::V03 {
        builder = builder
            .flat("BkToCstmrAcctRpt.GrpHdr.OrgnlBizQry.MsgId", "OriginalBusinessMsgId")
            .flat("BkToCstmrAcctRpt.GrpHdr.OrgnlBizQry.MsgNmId", "OriginalBusinessMsgNameId")
            .flat("BkToCstmrAcctRpt.GrpHdr.OrgnlBizQry.CreDtTm", "OriginalBusinessMsgCreateTime");
    }
    let builder = builder
        .flat(&at("Id"), "ReportTypeId")
        .flat(&at("CreDtTm"), "ReportCreatedDate")
        .flat(&at("Acct.Id.Othr.Id"), "AccountOtherId")
        .flat(&at("Acct.Tp.Prtry"), "AccountType")
        .flat(&at("RltdAcct.Id.Othr.Id"), "RelatedAccountOtherId")
        .expand(&at("TxsSummry.TtlNtriesPerBkTxCd"), "TransactionsSummary", totals(version))
        .expand(&at("Bal"), "Balances", balances(version));
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
        Version::V08 => Registration::of::<DocumentV08>(version, ns, map),
        Version::V09 => Registration::of::<DocumentV09>(version, ns, map),
        Version::V10 => Registration::of::<DocumentV10>(version, ns, map),
        Version::V11 => Registration::of::<DocumentV11>(version, ns, map),
        Version::V12 => Registration::of::<DocumentV12>(version, ns, map),
    })
}

static PROCESSOR: OnceCell<Processor<Message, Version>> = OnceCell::new();

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
        documentation: "Point to point reference assigned by the account servicer to identify the message.",
    },
    FieldHelp {
        name: "CreatedDateTime",
        title: "Creation Date Time",
        type_name: "ISODateTime",
        documentation: "Date and time at which the message was created.",
    },
    FieldHelp {
        name: "MessagePagination",
        title: "Message Pagination",
        type_name: "Pagination1",
        documentation: "Page number of the message and whether it is the last page.",
    },
    FieldHelp {
        name: "OriginalBusinessMsgId",
        title: "Original Business Query",
        type_name: "Max35Text",
        documentation: "Identification of the query that triggered the report (03 and later).",
    },
    FieldHelp {
        name: "ReportTypeId",
        title: "Report Identification",
        type_name: "Max35Text",
        documentation: "Unique identification of the report, e.g. ABMS or EOD.",
    },
    FieldHelp {
        name: "ReportCreatedDate",
        title: "Report Creation Date Time",
        type_name: "ISODateTime",
        documentation: "Date and time at which the report was created.",
    },
    FieldHelp {
        name: "AccountOtherId",
        title: "Account Identification",
        type_name: "Max34Text",
        documentation: "Account for which the report is sent.",
    },
    FieldHelp {
        name: "AccountType",
        title: "Account Type",
        type_name: "Max35Text",
        documentation: "Proprietary account type.",
    },
    FieldHelp {
        name: "RelatedAccountOtherId",
        title: "Related Account",
        type_name: "Max34Text",
        documentation: "Identification of the account linked to the reported account.",
    },
    FieldHelp {
        name: "Balances",
        title: "Balances",
        type_name: "CashBalance",
        documentation: "One entry per reported balance; credit lines are carried from version 07.",
    },
    FieldHelp {
        name: "TransactionsSummary",
        title: "Totals Per Bank Transaction Code",
        type_name: "TotalsPerBankTransactionCode",
        documentation: "One entry per bank transaction code with net amount and, from version 07, entry counts.",
    },
];
