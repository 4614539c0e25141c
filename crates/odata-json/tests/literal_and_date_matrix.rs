use odata_json::temporal::{minutes_to_offset, parse_date_time_offset, parse_json_date_string};
use odata_json::{format_literal, DateKind, ODataValue};
use serde_json::json;

#[test]
fn literal_wrapper_matrix() {
    let cases = [
        (json!("AQL/"), "Edm.Binary", "X'0102FF'"),
        (json!("2013-05-01T10:00:00"), "Edm.DateTime", "datetime'2013-05-01T10%3A00%3A00'"),
        (
            json!("2013-05-01T10:00:00+02:00"),
            "Edm.DateTimeOffset",
            "datetimeoffset'2013-05-01T10%3A00%3A00%2B02%3A00'",
        ),
        (json!(12.5), "Edm.Decimal", "12.5M"),
        (
            json!("00000000-0000-0000-0000-000000000001"),
            "Edm.Guid",
            "guid'00000000-0000-0000-0000-000000000001'",
        ),
        (json!(9007199254740993u64), "Edm.Int64", "9007199254740993L"),
        (json!(1.25), "Edm.Float", "1.25f"),
        (json!(1e3), "Edm.Double", "1000D"),
        (json!("POINT(1 2)"), "Edm.Geography", "geography'POINT(1%202)'"),
        (json!("POINT(1 2)"), "Edm.Geometry", "geometry'POINT(1%202)'"),
        (json!("PT5M"), "Edm.Time", "time'PT5M'"),
        (json!("a&b=c"), "Edm.String", "'a%26b%3Dc'"),
        (json!(7), "Edm.Int32", "7"),
        (json!(-7), "Edm.Int16", "-7"),
        (json!(true), "Edm.Boolean", "true"),
        (json!("x y"), "Ns.Unknown", "x%20y"),
    ];
    for (value, type_name, expected) in cases {
        assert_eq!(
            format_literal(&ODataValue::from(value.clone()), type_name),
            expected,
            "{value} as {type_name}"
        );
    }
}

#[test]
fn quotes_doubled_before_encoding() {
    let literal = format_literal(&ODataValue::from("it's 'quoted'"), "Edm.String");
    assert_eq!(literal, "'it''s%20''quoted'''");
}

#[test]
fn json_date_matrix() {
    let cases = [
        ("/Date(0)/", 0, None),
        ("/Date(1367402400000)/", 1_367_402_400_000, None),
        ("/Date(-1000)/", -1000, None),
        ("/Date(0+0)/", 0, Some("+00:00")),
        ("/Date(3600000+60)/", 0, Some("+01:00")),
        ("/Date(0-330)/", 19_800_000, Some("-05:30")),
    ];
    for (text, millis, offset) in cases {
        let date = parse_json_date_string(text).unwrap_or_else(|| panic!("{text} did not parse"));
        assert_eq!(date.instant.timestamp_millis(), millis, "{text}");
        assert_eq!(date.offset().as_deref(), offset, "{text}");
        let expected_kind = offset.map(|_| DateKind::DateTimeOffset);
        assert_eq!(date.kind, expected_kind, "{text}");
    }
}

#[test]
fn json_date_rejects() {
    for text in [
        "",
        "/Date()/",
        "/Date(abc)/",
        "Date(0)",
        "/Date(0)/ ",
        "/Date(1.5)/",
        "/Date(0+)/",
        "/Date(0+40000000)/",
        "/Date(0-1440)/",
        "/Date(99999999999999999999)/",
        "/Date(8640000000000001)/",
    ] {
        assert!(parse_json_date_string(text).is_none(), "{text:?} should not parse");
    }
}

#[test]
fn iso_date_matrix() {
    let cases = [
        ("2013-05-01T10:20:30Z", "2013-05-01T10:20:30+00:00", Some("+00:00")),
        ("2013-05-01T10:20:30.5-03:00", "2013-05-01T13:20:30.500+00:00", Some("-03:00")),
        ("2013-05-01T10:20:30", "2013-05-01T10:20:30+00:00", None),
        ("2013-05-01T10:20", "2013-05-01T10:20:00+00:00", None),
        ("2013-05-01T10:20+01:00", "2013-05-01T09:20:00+00:00", Some("+01:00")),
    ];
    for (text, utc, offset) in cases {
        let date = parse_date_time_offset(text, DateKind::DateTimeOffset)
            .unwrap_or_else(|| panic!("{text} did not parse"));
        assert_eq!(
            date.instant.to_rfc3339_opts(chrono::SecondsFormat::AutoSi, false),
            utc,
            "{text}"
        );
        assert_eq!(date.offset().as_deref(), offset, "{text}");
        assert_eq!(date.kind, Some(DateKind::DateTimeOffset));
    }
    assert!(parse_date_time_offset("yesterday", DateKind::DateTime).is_none());
    assert!(parse_date_time_offset("2013-13-01T00:00:00Z", DateKind::DateTime).is_none());
}

#[test]
fn offset_formatting() {
    assert_eq!(minutes_to_offset(0), "+00:00");
    assert_eq!(minutes_to_offset(-1), "-00:01");
    assert_eq!(minutes_to_offset(765), "+12:45");
    assert_eq!(minutes_to_offset(-720), "-12:00");
}
