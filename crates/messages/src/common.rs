//! ISO 20022 datatypes and components shared across families.

use std::fmt;

use chrono::{DateTime, NaiveDate, NaiveDateTime, SecondsFormat, TimeZone, Utc};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use isomap_core::{code_set, impl_record, restricted_text, Field, Kind, Node, NodeMut, Rejection, Scalar, Value};

static BIC: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[A-Z0-9]{4}[A-Z]{2}[A-Z0-9]{2}([A-Z0-9]{3})?$").unwrap());

fn numeric(s: &str) -> bool { s.bytes().all(|b| b.is_ascii_digit()) }

fn alphanumeric(s: &str) -> bool { s.bytes().all(|b| b.is_ascii_alphanumeric()) }

restricted_text!(Max35Text, 1, 35);
restricted_text!(Max70Text, 1, 70);
restricted_text!(Max140Text, 1, 140);
restricted_text!(Max34Text, 1, 34);
restricted_text!(Max5Text, 1, 5);
restricted_text!(Max5NumericText, 1, 5, numeric, "numeric");
restricted_text!(Max15NumericText, 1, 15, numeric, "numeric");
restricted_text!(Max4AlphaNumericText, 1, 4, alphanumeric, "alphanumeric");
restricted_text!(Exact4AlphaNumericText, 4, 4, alphanumeric, "alphanumeric");
restricted_text!(BICFIIdentifier, 8, 11, |s| BIC.is_match(s), "a BIC");
restricted_text!(ActiveOrHistoricCurrencyCode, 3, 3, |s| s.bytes().all(|b| b.is_ascii_uppercase()), "a currency code");

code_set!(CreditDebitCode { "CRDT", "DBIT" });

/// `ISODateTime` as it appears on the wire: RFC 3339, or a local time without
/// an offset (`2024-01-23T10:30:00`), which is read as UTC. Written back in UTC.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ISODateTime(pub DateTime<Utc>);

impl ISODateTime {
    pub fn parse(raw: &str) -> Option<ISODateTime> {
        let raw = raw.trim();
        if let Ok(t) = DateTime::parse_from_rfc3339(raw) {
            return Some(ISODateTime(t.with_timezone(&Utc)));
        }
        NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f").ok().map(|t| ISODateTime(Utc.from_utc_datetime(&t)))
    }
}

impl From<DateTime<Utc>> for ISODateTime {
    fn from(t: DateTime<Utc>) -> Self { ISODateTime(t) }
}

impl fmt::Display for ISODateTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0.to_rfc3339_opts(SecondsFormat::AutoSi, true))
    }
}

impl Serialize for ISODateTime {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> { serializer.collect_str(self) }
}

impl<'de> Deserialize<'de> for ISODateTime {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        ISODateTime::parse(&raw).ok_or_else(|| serde::de::Error::custom(format!("invalid ISODateTime '{}'", raw)))
    }
}

impl Scalar for ISODateTime {
    fn value(&self) -> Value { Value::DateTime(self.0) }
    fn assign(&mut self, value: Value) -> Result<(), Rejection> {
        match value {
            Value::DateTime(t) => {
                self.0 = t;
                Ok(())
            }
            other => Err(Rejection::Kind { expected: Kind::DateTime, found: other.kind() }),
        }
    }
}

impl Field for ISODateTime {
    fn node(&self) -> Node<'_> { Node::Scalar(self) }
    fn node_mut(&mut self) -> NodeMut<'_> { NodeMut::Scalar(self) }
}

/// `<Amt Ccy="USD">12.50</Amt>`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CurrencyAndAmount {
    #[serde(rename = "@Ccy")]
    pub ccy: ActiveOrHistoricCurrencyCode,
    #[serde(rename = "$text")]
    pub value: f64,
}
impl_record!(CurrencyAndAmount { "Ccy" => ccy, "Value" => value });

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DateAndDateTimeChoice {
    #[serde(rename = "Dt", skip_serializing_if = "Option::is_none")]
    pub dt: Option<NaiveDate>,
    #[serde(rename = "DtTm", skip_serializing_if = "Option::is_none")]
    pub dt_tm: Option<ISODateTime>,
}
impl_record!(DateAndDateTimeChoice { "Dt" => dt, "DtTm" => dt_tm });

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GenericAccountIdentification {
    #[serde(rename = "Id")]
    pub id: Max34Text,
}
impl_record!(GenericAccountIdentification { "Id" => id });

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AccountIdentificationChoice {
    #[serde(rename = "IBAN", skip_serializing_if = "Option::is_none")]
    pub iban: Option<Max34Text>,
    #[serde(rename = "Othr", skip_serializing_if = "Option::is_none")]
    pub othr: Option<GenericAccountIdentification>,
}
impl_record!(AccountIdentificationChoice { "IBAN" => iban, "Othr" => othr });

/// Code or proprietary choice, used for account, balance and credit line types.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CodeOrProprietary {
    #[serde(rename = "Cd", skip_serializing_if = "Option::is_none")]
    pub cd: Option<Max4AlphaNumericText>,
    #[serde(rename = "Prtry", skip_serializing_if = "Option::is_none")]
    pub prtry: Option<Max35Text>,
}
impl_record!(CodeOrProprietary { "Cd" => cd, "Prtry" => prtry });

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CashAccount {
    #[serde(rename = "Id")]
    pub id: AccountIdentificationChoice,
    #[serde(rename = "Tp", skip_serializing_if = "Option::is_none")]
    pub tp: Option<CodeOrProprietary>,
    #[serde(rename = "Ccy", skip_serializing_if = "Option::is_none")]
    pub ccy: Option<ActiveOrHistoricCurrencyCode>,
}
impl_record!(CashAccount { "Id" => id, "Tp" => tp, "Ccy" => ccy });

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ClearingSystemIdentificationChoice {
    #[serde(rename = "Cd", skip_serializing_if = "Option::is_none")]
    pub cd: Option<Max5Text>,
    #[serde(rename = "Prtry", skip_serializing_if = "Option::is_none")]
    pub prtry: Option<Max35Text>,
}
impl_record!(ClearingSystemIdentificationChoice { "Cd" => cd, "Prtry" => prtry });

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ClearingSystemMemberIdentification {
    #[serde(rename = "ClrSysId", skip_serializing_if = "Option::is_none")]
    pub clr_sys_id: Option<ClearingSystemIdentificationChoice>,
    #[serde(rename = "MmbId")]
    pub mmb_id: Max35Text,
}
impl_record!(ClearingSystemMemberIdentification { "ClrSysId" => clr_sys_id, "MmbId" => mmb_id });

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GenericFinancialIdentification {
    #[serde(rename = "Id")]
    pub id: Max35Text,
}
impl_record!(GenericFinancialIdentification { "Id" => id });

/// Financial institution identification in the older schemas, where the BIC
/// element is named `BIC`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FinancialInstitutionIdentificationBic {
    #[serde(rename = "BIC", skip_serializing_if = "Option::is_none")]
    pub bic: Option<BICFIIdentifier>,
    #[serde(rename = "ClrSysMmbId", skip_serializing_if = "Option::is_none")]
    pub clr_sys_mmb_id: Option<ClearingSystemMemberIdentification>,
    #[serde(rename = "Nm", skip_serializing_if = "Option::is_none")]
    pub nm: Option<Max140Text>,
    #[serde(rename = "Othr", skip_serializing_if = "Option::is_none")]
    pub othr: Option<GenericFinancialIdentification>,
}
impl_record!(FinancialInstitutionIdentificationBic {
    "BIC" => bic,
    "ClrSysMmbId" => clr_sys_mmb_id,
    "Nm" => nm,
    "Othr" => othr,
});

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FinancialInstitutionIdentification {
    #[serde(rename = "BICFI", skip_serializing_if = "Option::is_none")]
    pub bicfi: Option<BICFIIdentifier>,
    #[serde(rename = "ClrSysMmbId", skip_serializing_if = "Option::is_none")]
    pub clr_sys_mmb_id: Option<ClearingSystemMemberIdentification>,
    #[serde(rename = "Nm", skip_serializing_if = "Option::is_none")]
    pub nm: Option<Max140Text>,
    #[serde(rename = "Othr", skip_serializing_if = "Option::is_none")]
    pub othr: Option<GenericFinancialIdentification>,
}
impl_record!(FinancialInstitutionIdentification {
    "BICFI" => bicfi,
    "ClrSysMmbId" => clr_sys_mmb_id,
    "Nm" => nm,
    "Othr" => othr,
});

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BranchAndFinancialInstitution<F> {
    #[serde(rename = "FinInstnId")]
    pub fin_instn_id: F,
}
impl_record!(BranchAndFinancialInstitution<F> { "FinInstnId" => fin_instn_id });

/// Static text attached to the generated field helpers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FieldHelp {
    /// Model path, e.g. `AccountOwnerAgent.BankName`.
    pub name: &'static str,
    pub title: &'static str,
    #[serde(rename = "type")]
    pub type_name: &'static str,
    pub documentation: &'static str,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bic_accepts_eight_and_eleven_characters() {
        assert!(BICFIIdentifier::from("DEUTDEFF").validate().is_ok());
        assert!(BICFIIdentifier::from("DEUTDEFF500").validate().is_ok());
        assert!(BICFIIdentifier::from("DEUTDEF").validate().is_err());
        assert!(BICFIIdentifier::from("deutdeff").validate().is_err());
    }

    #[test]
    fn numeric_text_rejects_letters() {
        let mut n = Max15NumericText::default();
        assert!(n.assign(Value::from("12")).is_ok());
        assert!(matches!(n.assign(Value::from("1a")), Err(Rejection::Constraint(_))));
        assert_eq!(n, Max15NumericText::from("12"));
    }

    #[test]
    fn iso_date_time_reads_offsetless_local_times() {
        let local = ISODateTime::parse("2024-01-23T10:30:00").unwrap();
        assert_eq!(local.0, Utc.with_ymd_and_hms(2024, 1, 23, 10, 30, 0).unwrap());
        assert_eq!(ISODateTime::parse("2024-01-23T10:30:00.250").unwrap().0.timestamp_subsec_millis(), 250);
        let shifted = ISODateTime::parse("2024-01-23T12:30:00+02:00").unwrap();
        assert_eq!(shifted, local);
        assert_eq!(local.to_string(), "2024-01-23T10:30:00Z");
        assert!(ISODateTime::parse("2024-01-23").is_none());
        assert!(ISODateTime::parse("tomorrow").is_none());
    }

    #[test]
    fn iso_date_time_assigns_only_datetimes() {
        let mut t = ISODateTime::default();
        let at = Utc.with_ymd_and_hms(2024, 1, 23, 10, 30, 0).unwrap();
        assert!(t.assign(Value::DateTime(at)).is_ok());
        assert_eq!(t.value(), Value::DateTime(at));
        assert!(matches!(t.assign(Value::from("2024-01-23T10:30:00")), Err(Rejection::Kind { .. })));
    }

    #[test]
    fn credit_debit_is_a_closed_set() {
        let mut c = CreditDebitCode::default();
        assert!(c.assign(Value::from("DBIT")).is_ok());
        assert!(c.assign(Value::from("DEBIT")).is_err());
        assert!(matches!(c.assign(Value::Bool(true)), Err(Rejection::Kind { .. })));
    }
}
