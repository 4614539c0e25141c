//! OData URI literal formatting, used to build entity keys.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use serde_json::Number;
use tracing::debug;

use crate::value::ODataValue;

/// Characters left unescaped by URI component encoding.
const URI_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// Render `value` of EDM type `type_name` as a URI literal.
///
/// The value is converted to text, every embedded single quote is doubled,
/// the result is percent-encoded, and the type's literal syntax is applied.
///
/// # Example
///
/// ```
/// use odata_json::{format_literal, ODataValue};
/// use serde_json::json;
///
/// assert_eq!(format_literal(&ODataValue::from(json!(1000000000000u64)), "Edm.Int64"), "1000000000000L");
/// assert_eq!(format_literal(&ODataValue::from(json!(3.14)), "Edm.Double"), "3.14D");
/// assert_eq!(format_literal(&ODataValue::from("Food"), "Edm.String"), "'Food'");
/// assert_eq!(format_literal(&ODataValue::from(json!(42)), "Edm.Int32"), "42");
/// ```
pub fn format_literal(value: &ODataValue, type_name: &str) -> String {
    let text = match type_name {
        "Edm.Binary" => binary_to_hex(value),
        _ => value_text(value),
    };
    let escaped = text.replace('\'', "''");
    let encoded = utf8_percent_encode(&escaped, URI_COMPONENT).to_string();
    match type_name {
        "Edm.Binary" => format!("X'{encoded}'"),
        "Edm.DateTime" => format!("datetime'{encoded}'"),
        "Edm.DateTimeOffset" => format!("datetimeoffset'{encoded}'"),
        "Edm.Decimal" => format!("{encoded}M"),
        "Edm.Guid" => format!("guid'{encoded}'"),
        "Edm.Int64" => format!("{encoded}L"),
        "Edm.Float" => format!("{encoded}f"),
        "Edm.Double" => format!("{encoded}D"),
        "Edm.Geography" => format!("geography'{encoded}'"),
        "Edm.Geometry" => format!("geometry'{encoded}'"),
        "Edm.Time" => format!("time'{encoded}'"),
        "Edm.String" => format!("'{encoded}'"),
        _ => encoded,
    }
}

/// Binary values travel as base64; literals carry upper-case hex.
fn binary_to_hex(value: &ODataValue) -> String {
    match value.as_str().map(|s| STANDARD.decode(s)) {
        Some(Ok(bytes)) => hex::encode_upper(bytes),
        Some(Err(err)) => {
            debug!(%err, "binary key value is not base64");
            value_text(value)
        }
        None => value_text(value),
    }
}

fn value_text(value: &ODataValue) -> String {
    match value {
        ODataValue::Null => "null".to_string(),
        ODataValue::Bool(b) => b.to_string(),
        ODataValue::Number(n) => number_text(n),
        ODataValue::String(s) => s.clone(),
        ODataValue::DateTime(date) => date.to_iso_string(),
        ODataValue::Duration(duration) => duration.to_string(),
        ODataValue::Array(_) | ODataValue::Object(_) => value.to_json_string().unwrap_or_default(),
    }
}

/// Integral floats render without a fractional part.
fn number_text(n: &Number) -> String {
    match n.as_f64() {
        Some(f)
            if !n.is_i64()
                && !n.is_u64()
                && f.is_finite()
                && f.fract() == 0.0
                && f.abs() < 1e21 =>
        {
            format!("{f:.0}")
        }
        _ => n.to_string(),
    }
}
