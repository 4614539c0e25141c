mod common;

use common::{keys, to_json};
use odata_json::{
    read_payload_full, ContentType, DateKind, JsonCodec, ODataValue, ParseContext,
    SerializeContext,
};
use proptest::prelude::*;
use serde_json::{json, Value};

fn normalize(payload: Value) -> Value {
    to_json(read_payload_full(ODataValue::from(payload), false))
}

#[test]
fn guess_matrix() {
    let cases = [
        (json!("text"), Some("#String")),
        (json!(""), Some("#String")),
        (json!(true), Some("#Bool")),
        (json!(false), Some("#Bool")),
        (json!(0), Some("#Integer")),
        (json!(-12), Some("#Integer")),
        (json!(18446744073709551615u64), Some("#Integer")),
        (json!(3.0), Some("#Integer")),
        (json!(0.25), Some("#Decimal")),
        (json!(-1e-3), Some("#Decimal")),
        (json!(null), None),
    ];
    for (value, expected) in cases {
        let out = normalize(json!({ "P": value.clone() }));
        assert_eq!(
            out.get("P@odata.type").and_then(Value::as_str),
            expected,
            "guess for {value}"
        );
        assert_eq!(out["P"], value);
    }
}

#[test]
fn feed_entries_and_nested_objects_are_normalized() {
    let out = normalize(json!({
        "@odata.context": "http://host/svc/$metadata#Products",
        "value": [
            { "Id": 1, "Dims": { "Width": 1.5 } },
            { "Id": 2, "Tags": ["a", { "Label": "x" }] }
        ]
    }));
    assert_eq!(out["value"][0]["Id@odata.type"], "#Integer");
    assert_eq!(out["value"][0]["Dims"]["Width@odata.type"], "#Decimal");
    assert!(out["value"][0].get("Dims@odata.type").is_none());
    assert_eq!(out["value"][1]["Tags"][0], "a");
    assert_eq!(out["value"][1]["Tags"][1]["Label@odata.type"], "#String");
    assert!(out["value"][1].get("Tags@odata.type").is_none());
    assert!(out.get("@odata.context@odata.type").is_none());
}

#[test]
fn declared_annotations_are_never_replaced() {
    let out = normalize(json!({
        "Price": 3,
        "Price@odata.type": "#Decimal",
        "Code@odata.type": "#Edm.Guid",
        "Code": "0b1d"
    }));
    assert_eq!(out["Price@odata.type"], "#Decimal");
    assert_eq!(out["Code@odata.type"], "#Edm.Guid");
    let out_keys = keys(&read_payload_full(
        ODataValue::from(json!({ "Code@odata.type": "#Edm.Guid", "Code": "0b1d" })),
        false,
    ));
    assert_eq!(out_keys, vec!["Code@odata.type", "Code"]);
}

#[test]
fn iso_dates_recognized_with_offset() {
    let out = read_payload_full(
        ODataValue::from(json!({
            "At": "2013-05-01T10:00:00+02:00",
            "At@odata.type": "#DateTimeOffset"
        })),
        true,
    );
    let Some(ODataValue::DateTime(date)) = out.get("At") else {
        panic!("expected a date, got {:?}", out.get("At"));
    };
    assert_eq!(date.instant.to_rfc3339(), "2013-05-01T08:00:00+00:00");
    assert_eq!(date.kind, Some(DateKind::DateTimeOffset));
    assert_eq!(date.offset().as_deref(), Some("+02:00"));
    assert_eq!(
        to_json(out)["At"],
        json!("2013-05-01T10:00:00.000+02:00")
    );
}

#[test]
fn legacy_dates_recognized() {
    let out = read_payload_full(
        ODataValue::from(json!({
            "At": "/Date(1367402400000)/",
            "At@odata.type": "#Edm.DateTime"
        })),
        true,
    );
    assert_eq!(to_json(out)["At"], json!("2013-05-01T10:00:00.000Z"));
}

#[test]
fn oversized_legacy_offsets_stay_text_and_serialize() {
    let ctx = ParseContext {
        content_type: Some(ContentType::parse("application/json;odata.metadata=full")),
        recognize_dates: Some(true),
        ..Default::default()
    };
    let codec = JsonCodec::default();
    let out = codec
        .parse(
            r##"{"At":"/Date(0+40000000)/","At@odata.type":"#DateTimeOffset"}"##,
            &ctx,
        )
        .unwrap();
    assert_eq!(out.get("At"), Some(&ODataValue::from("/Date(0+40000000)/")));
    let text = codec
        .serialize(&out, &mut SerializeContext::default())
        .unwrap()
        .unwrap();
    assert!(text.contains(r#""At":"/Date(0+40000000)/""#));
}

#[test]
fn codec_routes_full_metadata() {
    let ctx = ParseContext {
        content_type: Some(ContentType::parse("application/json;odata.metadata=FULL")),
        recognize_dates: Some(true),
        ..Default::default()
    };
    let out = JsonCodec::default()
        .parse(
            r##"{"Qty":4,"When":"/Date(0)/","When@odata.type":"#DateTime"}"##,
            &ctx,
        )
        .unwrap();
    assert_eq!(out.get("Qty@odata.type"), Some(&ODataValue::from("#Integer")));
    assert!(matches!(out.get("When"), Some(ODataValue::DateTime(_))));
}

fn scalar() -> impl Strategy<Value = Value> {
    prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::from),
        any::<i64>().prop_map(Value::from),
        (-1.0e6f64..1.0e6).prop_map(|f| json!(f)),
        "[a-z]{0,8}".prop_map(Value::from),
    ]
}

proptest! {
    #[test]
    fn existing_annotations_survive(
        members in prop::collection::btree_map("[A-Z][a-z]{0,5}", (scalar(), prop::option::of("#[A-Z][a-z]{1,6}")), 0..8)
    ) {
        let mut input = serde_json::Map::new();
        for (name, (value, annotation)) in &members {
            input.insert(name.clone(), value.clone());
            if let Some(annotation) = annotation {
                input.insert(format!("{name}@odata.type"), Value::from(annotation.clone()));
            }
        }
        let out = normalize(Value::Object(input));
        for (name, (value, annotation)) in &members {
            prop_assert_eq!(&out[name.as_str()], value);
            let key = format!("{name}@odata.type");
            match annotation {
                Some(annotation) => prop_assert_eq!(out[key.as_str()].as_str(), Some(annotation.as_str())),
                None if value.is_null() => prop_assert!(out.get(&key).is_none()),
                None => prop_assert!(out.get(&key).is_some()),
            }
        }
    }

    #[test]
    fn normalizing_twice_is_stable(
        members in prop::collection::btree_map("[A-Z][a-z]{0,5}", scalar(), 0..8)
    ) {
        let input = Value::Object(members.into_iter().collect());
        let once = read_payload_full(ODataValue::from(input), false);
        let twice = read_payload_full(once.clone(), false);
        prop_assert_eq!(keys(&once), keys(&twice));
        prop_assert_eq!(once, twice);
    }
}
