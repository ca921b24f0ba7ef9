#![forbid(unsafe_code)]

use chrono::{TimeZone, Utc};
use isomap_core::access::MAX_GROWTH;
use isomap_core::{check_tree, count, get, impl_record, is_blank, lookup, restricted_text, set, AccessError, Path, Value};

restricted_text!(Max35Text, 1, 35);

#[derive(Debug, Clone, Default, PartialEq)]
struct Other { id: Max35Text }
impl_record!(Other { "Id" => id });

#[derive(Debug, Clone, Default, PartialEq)]
struct AccountId { othr: Option<Other> }
impl_record!(AccountId { "Othr" => othr });

#[derive(Debug, Clone, Default, PartialEq)]
struct Account { id: Option<AccountId>, nm: Option<String> }
impl_record!(Account { "Id" => id, "Nm" => nm });

#[derive(Debug, Clone, Default, PartialEq)]
struct Request { acct: Option<Account>, params: Vec<Max35Text> }
impl_record!(Request { "Acct" => acct, "Params" => params });

#[derive(Debug, Clone, Default, PartialEq)]
struct Root {
    msg_id: Max35Text,
    amount: f64,
    flag: bool,
    created: Option<chrono::DateTime<Utc>>,
    reqs: Vec<Request>,
}
impl_record!(Root { "MsgId" => msg_id, "Amt" => amount, "Flag" => flag, "CreDtTm" => created, "Req" => reqs });

fn p(s: &str) -> Path { Path::parse(s).unwrap() }

#[test]
fn set_vivifies_nested_optionals_and_sequences() {
    let mut root = Root::default();
    set(&mut root, &p("Req[1].Acct.Id.Othr.Id"), Value::from("ACC-1")).unwrap();
    assert_eq!(root.reqs.len(), 2);
    assert!(root.reqs[0].acct.is_none());
    assert_eq!(get(&root, &p("Req[1].Acct.Id.Othr.Id")).unwrap(), Value::from("ACC-1"));
}

#[test]
fn set_fills_indexed_scalar_sequences() {
    let mut root = Root::default();
    set(&mut root, &p("Req[0].Params[0]"), Value::from("node-a")).unwrap();
    assert_eq!(root.reqs[0].params, vec![Max35Text::from("node-a")]);
    assert_eq!(count(&root, &p("Req[0].Params")).unwrap(), 1);
}

#[test]
fn final_optional_scalar_is_allocated_on_write() {
    let mut root = Root::default();
    let t = Utc.with_ymd_and_hms(2024, 3, 1, 9, 30, 0).unwrap();
    set(&mut root, &p("CreDtTm"), Value::DateTime(t)).unwrap();
    assert_eq!(root.created, Some(t));
    set(&mut root, &p("Req[0].Acct.Nm"), Value::from("Operating")).unwrap();
    assert_eq!(root.reqs[0].acct.as_ref().and_then(|a| a.nm.clone()).as_deref(), Some("Operating"));
}

#[test]
fn reads_report_absence_without_mutation() {
    let root = Root { reqs: vec![Request::default()], ..Default::default() };
    let err = get(&root, &p("Req[0].Acct.Id.Othr.Id")).unwrap_err();
    assert_eq!(err, AccessError::Absent { path: "Req[0].Acct".into() });
    assert!(err.is_absence());

    let err = get(&root, &p("Req[3].Acct.Nm")).unwrap_err();
    assert_eq!(err, AccessError::IndexOutOfRange { path: "Req[3]".into(), len: 1 });
    assert!(err.is_absence());
    assert_eq!(root.reqs.len(), 1);
}

#[test]
fn structural_errors_are_distinguished() {
    let mut root = Root::default();
    assert!(matches!(get(&root, &p("Nope")), Err(AccessError::FieldNotFound { .. })));
    assert!(matches!(get(&root, &p("MsgId[0]")), Err(AccessError::NotIndexable { .. })));
    assert!(matches!(get(&root, &p("MsgId.Inner")), Err(AccessError::FieldNotFound { .. })));
    assert!(matches!(set(&mut root, &p("Req"), Value::from("x")), Err(AccessError::NotScalar { .. })));
    assert!(matches!(count(&root, &p("MsgId")), Err(AccessError::NotIndexable { .. })));
    assert!(get(&root, &p("Nope")).unwrap_err().is_structural());
}

#[test]
fn coercion_is_strict_except_int_widening() {
    let mut root = Root::default();
    set(&mut root, &p("Amt"), Value::Int(12)).unwrap();
    assert_eq!(root.amount, 12.0);
    let err = set(&mut root, &p("Flag"), Value::from("yes")).unwrap_err();
    assert!(matches!(err, AccessError::TypeMismatch { .. }), "{err}");
    let err = set(&mut root, &p("MsgId"), Value::Bool(true)).unwrap_err();
    assert!(matches!(err, AccessError::TypeMismatch { .. }), "{err}");
}

#[test]
fn restricted_text_rejects_overlong_values() {
    let mut root = Root::default();
    let long = "X".repeat(45);
    let err = set(&mut root, &p("MsgId"), Value::Text(long)).unwrap_err();
    match err {
        AccessError::Constraint { path, reason } => {
            assert_eq!(path, "MsgId");
            assert!(reason.contains("exceeds maximum 35"), "{reason}");
        }
        other => panic!("unexpected {other:?}"),
    }
    assert_eq!(root.msg_id, Max35Text::default());
}

#[test]
fn blankness_covers_records_and_sequences() {
    let root = Root::default();
    assert!(is_blank(lookup(&root, &p("Req")).unwrap()));
    assert!(matches!(lookup(&root, &p("CreDtTm")), Err(AccessError::Absent { .. })));
    let filled = Root { reqs: vec![Request::default()], ..Default::default() };
    assert!(!is_blank(lookup(&filled, &p("Req")).unwrap()));
    assert!(is_blank(lookup(&filled, &p("Req[0]")).unwrap()));
}

#[test]
fn blankness_sees_through_optionals() {
    let none: Option<String> = None;
    assert!(is_blank(&none));
    assert!(is_blank(&Some(String::new())));
    assert!(!is_blank(&Some("x".to_string())));
    let req = Request { acct: Some(Account { nm: Some(String::new()), ..Default::default() }), ..Default::default() };
    assert!(is_blank(&req));
    let req = Request { acct: Some(Account { nm: Some("Operating".into()), ..Default::default() }), ..Default::default() };
    assert!(!is_blank(&req));
}

#[test]
fn oversized_indices_are_refused_without_growing() {
    let mut root = Root::default();
    let err = set(&mut root, &p("Req[18446744073709551615].Acct.Nm"), Value::from("x")).unwrap_err();
    assert_eq!(err, AccessError::IndexOutOfRange { path: "Req[18446744073709551615]".into(), len: 0 });
    let err = set(&mut root, &p("Req[1000000000000].Acct.Nm"), Value::from("x")).unwrap_err();
    assert!(err.is_absence(), "{err}");
    assert!(root.reqs.is_empty());

    let edge = MAX_GROWTH - 1;
    set(&mut root, &Path::parse(&format!("Req[{}].Acct.Nm", edge)).unwrap(), Value::from("x")).unwrap();
    assert_eq!(root.reqs.len(), MAX_GROWTH);
    let beyond = 2 * MAX_GROWTH;
    let err = set(&mut root, &Path::parse(&format!("Req[{}].Acct.Nm", beyond)).unwrap(), Value::from("x")).unwrap_err();
    assert!(matches!(err, AccessError::IndexOutOfRange { len, .. } if len == MAX_GROWTH), "{err}");
}

#[test]
fn tree_check_reports_first_facet_violation() {
    let mut root = Root { msg_id: Max35Text::from("M1"), ..Default::default() };
    assert!(check_tree(&root).is_ok());
    root.reqs.push(Request { params: vec![Max35Text::from("ok"), Max35Text::from("")], ..Default::default() });
    let err = check_tree(&root).unwrap_err();
    assert!(matches!(err, AccessError::Constraint { ref path, .. } if path == "Req[0].Params[1]"), "{err}");
}
