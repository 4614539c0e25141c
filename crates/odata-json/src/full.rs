//! Full-metadata normalizer.
//!
//! Full-metadata payloads are mostly typed already, but servers omit
//! `@odata.type` for some primitives. Missing annotations are guessed from
//! the JSON value itself; the declared type is not consulted, so the guess
//! only distinguishes strings, booleans, integral and fractional numbers.

use std::collections::HashMap;

use tracing::debug;

use crate::annotations::{is_annotation, property_type_annotation, ODATA_TYPE};
use crate::temporal::{parse_date_time_offset, parse_json_date_string, DateKind};
use crate::value::{Map, ODataValue};

/// Backfill missing `<name>@odata.type` annotations throughout `data`.
///
/// With `recognize_dates`, string values annotated as `DateTime` or
/// `DateTimeOffset` become [`ODataValue::DateTime`]. Existing annotations are
/// never overwritten.
pub fn read_payload_full(data: ODataValue, recognize_dates: bool) -> ODataValue {
    match data {
        ODataValue::Object(object) => ODataValue::Object(normalize_object(object, recognize_dates)),
        other => other,
    }
}

fn normalize_member(value: ODataValue, recognize_dates: bool) -> ODataValue {
    match value {
        ODataValue::Object(object) => ODataValue::Object(normalize_object(object, recognize_dates)),
        other => other,
    }
}

fn normalize_object(object: Map, recognize_dates: bool) -> Map {
    let declared: HashMap<String, Option<String>> = object
        .iter()
        .filter(|(k, _)| k.ends_with(ODATA_TYPE) && k.len() > ODATA_TYPE.len())
        .map(|(k, v)| (k.clone(), v.as_str().map(str::to_string)))
        .collect();

    let mut out = Map::with_capacity(object.len());
    for (name, value) in object {
        if is_annotation(&name) {
            out.insert(name, value);
            continue;
        }
        match value {
            ODataValue::Array(items) => {
                let items = items
                    .into_iter()
                    .map(|item| normalize_member(item, recognize_dates))
                    .collect();
                out.insert(name, ODataValue::Array(items));
            }
            ODataValue::Object(member) => {
                out.insert(name, ODataValue::Object(normalize_object(member, recognize_dates)));
            }
            scalar => {
                let annotation = property_type_annotation(&name);
                match declared.get(&annotation) {
                    None => {
                        let guessed = guess_type(&scalar);
                        out.insert(name, scalar);
                        if let Some(guessed) = guessed {
                            out.insert(annotation, guessed.into());
                        }
                    }
                    Some(type_ref) => {
                        let scalar = match (recognize_dates, date_kind(type_ref.as_deref())) {
                            (true, Some(kind)) => recognize_date(scalar, kind),
                            _ => scalar,
                        };
                        out.insert(name, scalar);
                    }
                }
            }
        }
    }
    out
}

/// Annotation guessed from the JSON value; `None` for null.
fn guess_type(value: &ODataValue) -> Option<&'static str> {
    match value {
        ODataValue::String(_) => Some("#String"),
        ODataValue::Bool(_) => Some("#Bool"),
        ODataValue::Number(n) => {
            let integral = n.is_i64() || n.is_u64() || n.as_f64().is_some_and(|f| f.fract() == 0.0);
            Some(if integral { "#Integer" } else { "#Decimal" })
        }
        _ => None,
    }
}

fn date_kind(type_ref: Option<&str>) -> Option<DateKind> {
    match type_ref?.trim_start_matches('#') {
        "DateTimeOffset" | "Edm.DateTimeOffset" => Some(DateKind::DateTimeOffset),
        "DateTime" | "Edm.DateTime" => Some(DateKind::DateTime),
        _ => None,
    }
}

fn recognize_date(value: ODataValue, kind: DateKind) -> ODataValue {
    let ODataValue::String(text) = &value else {
        return value;
    };
    let parsed = parse_json_date_string(text).or_else(|| parse_date_time_offset(text, kind));
    match parsed {
        Some(date) => ODataValue::DateTime(date),
        None => {
            debug!(text = %text, "annotated date value did not parse");
            value
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn normalize(value: serde_json::Value, recognize_dates: bool) -> ODataValue {
        read_payload_full(ODataValue::from(value), recognize_dates)
    }

    #[test]
    fn test_guesses_follow_property() {
        let out = normalize(json!({"Name": "x", "Age": 3}), false);
        let keys: Vec<_> = out.as_object().unwrap().keys().cloned().collect();
        assert_eq!(keys, vec!["Name", "Name@odata.type", "Age", "Age@odata.type"]);
    }

    #[test]
    fn test_integral_float_is_integer() {
        let out = normalize(json!({"Qty": 2.0, "Price": 2.5}), false);
        assert_eq!(out.get("Qty@odata.type"), Some(&ODataValue::from("#Integer")));
        assert_eq!(out.get("Price@odata.type"), Some(&ODataValue::from("#Decimal")));
    }

    #[test]
    fn test_null_gets_no_guess() {
        let out = normalize(json!({"Note": null}), false);
        assert!(out.get("Note@odata.type").is_none());
    }

    #[test]
    fn test_date_left_as_text_without_recognition() {
        let out = normalize(
            json!({"At": "2013-05-01T10:00:00Z", "At@odata.type": "#DateTimeOffset"}),
            false,
        );
        assert_eq!(out.get("At"), Some(&ODataValue::from("2013-05-01T10:00:00Z")));
    }

    #[test]
    fn test_date_recognized() {
        let out = normalize(
            json!({"At": "/Date(0-60)/", "At@odata.type": "#DateTime"}),
            true,
        );
        match out.get("At") {
            Some(ODataValue::DateTime(date)) => {
                assert_eq!(date.instant.timestamp(), 3600);
                assert_eq!(date.offset().as_deref(), Some("-01:00"));
            }
            other => panic!("expected date, got {other:?}"),
        }
    }

    #[test]
    fn test_unparseable_date_kept() {
        let out = normalize(json!({"At": "soon", "At@odata.type": "#DateTimeOffset"}), true);
        assert_eq!(out.get("At"), Some(&ODataValue::from("soon")));
    }

    #[test]
    fn test_top_level_array_untouched() {
        let out = normalize(json!([{"a": 1}]), false);
        assert_eq!(out, ODataValue::from(json!([{"a": 1}])));
    }
}
