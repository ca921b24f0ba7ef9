#![forbid(unsafe_code)]

use std::fmt;

use serde::{Deserialize, Serialize};

use isomap_core::{impl_record, Path};
use isomap_engine::{document, resolve, Direction, Document, DocumentRegistry, PathMap, Processor, Registration};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Amount {
    #[serde(rename = "@Ccy")]
    pub ccy: String,
    #[serde(rename = "$text")]
    pub value: f64,
}
impl_record!(Amount { "Ccy" => ccy, "Value" => value });

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CreditLine {
    #[serde(rename = "Incl")]
    pub incl: bool,
    #[serde(rename = "Amt", skip_serializing_if = "Option::is_none")]
    pub amt: Option<Amount>,
}
impl_record!(CreditLine { "Incl" => incl, "Amt" => amt });

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Balance {
    #[serde(rename = "Amt")]
    pub amt: Amount,
    #[serde(rename = "CdtLine", default)]
    pub cdt_line: Vec<CreditLine>,
}
impl_record!(Balance { "Amt" => amt, "CdtLine" => cdt_line });

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Report {
    #[serde(rename = "Bal", default)]
    pub bal: Vec<Balance>,
}
impl_record!(Report { "Bal" => bal });

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AccountReport {
    #[serde(rename = "Rpt", default)]
    pub rpt: Vec<Report>,
}
impl_record!(AccountReport { "Rpt" => rpt });

document!(AccountReportDocument { "BkToCstmrAcctRpt" => report: AccountReport });

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Line {
    pub included: bool,
    pub amount: f64,
}
impl_record!(Line { "Included" => included, "Amount" => amount });

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Bal {
    pub amount: f64,
    pub currency: String,
    pub lines: Vec<Line>,
}
impl_record!(Bal { "Amount" => amount, "Currency" => currency, "CdtLines" => lines });

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Statement {
    pub balances: Vec<Bal>,
}
impl_record!(Statement { "Balances" => balances });

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
struct V08;

impl fmt::Display for V08 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str("camt.052.001.08") }
}

fn map() -> PathMap {
    PathMap::builder()
        .expand("BkToCstmrAcctRpt.Rpt[0].Bal", "Balances", |b| {
            b.flat("Amt.Value", "Amount")
                .flat("Amt.Ccy", "Currency")
                .expand("CdtLine", "CdtLines", |b| b.flat("Incl", "Included").flat("Amt.Value", "Amount"))
        })
        .build()
        .unwrap()
}

fn processor() -> Processor<Statement, V08> {
    let registry = DocumentRegistry::new(vec![Registration::of::<AccountReportDocument>(
        V08,
        "urn:iso:std:iso:20022:tech:xsd:camt.052.001.08",
        map(),
    )])
    .unwrap();
    Processor::new("test.fanout", registry, &[]).unwrap()
}

fn bal(amount: f64, lines: &[f64]) -> Bal {
    Bal {
        amount,
        currency: "USD".into(),
        lines: lines.iter().map(|a| Line { included: true, amount: *a }).collect(),
    }
}

#[test]
fn resolved_entries_scale_with_elements_present() {
    let model = Statement { balances: vec![bal(10.0, &[]), bal(20.0, &[1.0, 2.0]), bal(30.0, &[3.0])] };
    let entries = resolve(&model, &map(), Direction::ToDocument).unwrap();
    // 3 balances x 2 fields + 3 credit lines x 2 fields
    assert_eq!(entries.len(), 3 * 2 + 3 * 2);
    assert_eq!(entries[0].source, Path::parse("Balances[0].Amount").unwrap());
    assert_eq!(entries[0].target, Path::parse("BkToCstmrAcctRpt.Rpt[0].Bal[0].Amt.Value").unwrap());
    assert!(entries
        .iter()
        .any(|e| e.target.to_string() == "BkToCstmrAcctRpt.Rpt[0].Bal[1].CdtLine[1].Amt.Value"));
}

#[test]
fn zero_elements_expand_to_nothing() {
    let entries = resolve(&Statement::default(), &map(), Direction::ToDocument).unwrap();
    assert!(entries.is_empty());
    let doc = AccountReportDocument::default();
    assert!(resolve(&doc, &map(), Direction::ToModel).unwrap().is_empty());

    let rendered = processor().render(&Statement::default(), V08).unwrap();
    let typed = rendered.as_any().downcast_ref::<AccountReportDocument>().unwrap();
    assert!(typed.report.rpt.is_empty());
}

#[test]
fn rendered_document_has_one_element_per_model_item() {
    let p = processor();
    let model = Statement { balances: vec![bal(10.0, &[]), bal(20.5, &[1.0, 2.0])] };
    let doc = p.render(&model, V08).unwrap();
    let typed = doc.as_any().downcast_ref::<AccountReportDocument>().unwrap();
    assert_eq!(typed.report.rpt.len(), 1);
    assert_eq!(typed.report.rpt[0].bal.len(), 2);
    assert_eq!(typed.report.rpt[0].bal[1].cdt_line.len(), 2);
    assert_eq!(typed.report.rpt[0].bal[1].amt, Amount { ccy: "USD".into(), value: 20.5 });

    let xml = doc.to_xml().unwrap();
    assert_eq!(xml.matches("<Bal>").count(), 2, "{xml}");
    let (back, _) = p.parse(xml.as_bytes()).unwrap();
    assert_eq!(back, model);
}

#[test]
fn document_side_counts_drive_parsing() {
    let mut doc = AccountReportDocument::default();
    doc.report.rpt.push(Report {
        bal: vec![
            Balance { amt: Amount { ccy: "EUR".into(), value: 5.0 }, cdt_line: vec![CreditLine::default(); 3] },
        ],
    });
    let entries = resolve(&doc, &map(), Direction::ToModel).unwrap();
    assert_eq!(entries.len(), 2 + 3 * 2);
    let model: Statement = isomap_engine::convert::to_model(&doc, &entries).unwrap();
    assert_eq!(model.balances.len(), 1);
    assert_eq!(model.balances[0].currency, "EUR");
    // Incl is present on every line, the absent amounts are skipped
    assert_eq!(model.balances[0].lines.len(), 3);
    assert!(model.balances[0].lines.iter().all(|l| l.amount == 0.0));
}
