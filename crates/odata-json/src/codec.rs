//! Top-level parser and serializer.
//!
//! The parser decodes a payload and routes it to the annotator matching the
//! metadata level its content type declares. The serializer strips control
//! annotations a server would reject before encoding.

use odata_edm::EdmModel;
use odata_util::max_version;
use serde::Deserialize;
use tracing::trace;

use crate::annotations::{ODATA_PREFIX, SERIALIZABLE_TERMS};
use crate::content_type::{ContentType, MetadataLevel};
use crate::error::CodecError;
use crate::full::read_payload_full;
use crate::minimal::read_payload_minimal;
use crate::value::{Map, ODataValue};

/// Lowest data service version the JSON codec writes.
pub const MIN_DATA_SERVICE_VERSION: &str = "4.0";

/// Codec-wide options.
///
/// Deserializable so a host can keep them in its own configuration file;
/// every field defaults to `false`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CodecOptions {
    /// Turn annotated date strings into [`ODataValue::DateTime`] when reading
    /// full-metadata payloads.
    pub recognize_dates: bool,
    /// Raise classification and schema errors instead of degrading.
    pub strict: bool,
}

/// Per-call context for [`JsonCodec::parse`].
#[derive(Debug, Clone, Default)]
pub struct ParseContext<'m> {
    pub metadata: Option<&'m EdmModel>,
    pub content_type: Option<ContentType>,
    /// Overrides [`CodecOptions::recognize_dates`] for this call.
    pub recognize_dates: Option<bool>,
}

impl<'m> ParseContext<'m> {
    pub fn new(metadata: &'m EdmModel, content_type: ContentType) -> Self {
        Self {
            metadata: Some(metadata),
            content_type: Some(content_type),
            recognize_dates: None,
        }
    }
}

/// Per-call context for [`JsonCodec::serialize`]. The serializer fills in
/// the content type and raises the version when it handles a payload.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SerializeContext {
    pub content_type: Option<ContentType>,
    pub data_service_version: Option<String>,
}

/// Raw input to [`JsonCodec::parse`].
#[derive(Debug, Clone)]
pub enum PayloadSource<'a> {
    Text(&'a str),
    Value(serde_json::Value),
    Decoded(ODataValue),
}

impl<'a> From<&'a str> for PayloadSource<'a> {
    fn from(text: &'a str) -> Self {
        PayloadSource::Text(text)
    }
}

impl From<serde_json::Value> for PayloadSource<'_> {
    fn from(value: serde_json::Value) -> Self {
        PayloadSource::Value(value)
    }
}

impl From<ODataValue> for PayloadSource<'_> {
    fn from(value: ODataValue) -> Self {
        PayloadSource::Decoded(value)
    }
}

/// JSON codec for OData payloads.
///
/// # Example
///
/// ```
/// use odata_json::{ContentType, JsonCodec, ParseContext, SerializeContext};
///
/// let codec = JsonCodec::default();
/// let ctx = ParseContext {
///     content_type: Some(ContentType::parse("application/json;odata.metadata=full")),
///     ..Default::default()
/// };
/// let value = codec.parse(r#"{"Name":"Ann"}"#, &ctx).unwrap();
/// assert_eq!(value.get("Name@odata.type").and_then(|v| v.as_str()), Some("#String"));
///
/// let mut out = SerializeContext::default();
/// let text = codec.serialize(&value, &mut out).unwrap();
/// assert_eq!(text.as_deref(), Some(r##"{"Name":"Ann","Name@odata.type":"#String"}"##));
/// assert_eq!(out.data_service_version.as_deref(), Some("4.0"));
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonCodec {
    pub options: CodecOptions,
}

impl JsonCodec {
    pub const MEDIA_TYPE: &'static str = crate::content_type::JSON_MEDIA_TYPE;

    pub fn new(options: CodecOptions) -> Self {
        Self { options }
    }

    /// Decode `source` and annotate it according to the metadata level of
    /// `ctx.content_type` (minimal when absent).
    ///
    /// Payloads at level `none`, or at a level the codec does not recognize,
    /// are returned as decoded. Only a decode failure is an error in lenient
    /// mode.
    pub fn parse<'a>(
        &self,
        source: impl Into<PayloadSource<'a>>,
        ctx: &ParseContext<'_>,
    ) -> Result<ODataValue, CodecError> {
        let data = match source.into() {
            PayloadSource::Text(text) => {
                let value: serde_json::Value =
                    serde_json::from_str(text).map_err(CodecError::Decode)?;
                ODataValue::from(value)
            }
            PayloadSource::Value(value) => ODataValue::from(value),
            PayloadSource::Decoded(value) => value,
        };

        let level = match &ctx.content_type {
            Some(content_type) => content_type.metadata_level(),
            None => Some(MetadataLevel::Minimal),
        };
        trace!(?level, "routing payload");
        match level {
            Some(MetadataLevel::Minimal) => {
                read_payload_minimal(data, ctx.metadata, self.options.strict)
            }
            Some(MetadataLevel::Full) => {
                let recognize_dates = ctx
                    .recognize_dates
                    .unwrap_or(self.options.recognize_dates);
                Ok(read_payload_full(data, recognize_dates))
            }
            Some(MetadataLevel::None) | None => Ok(data),
        }
    }

    /// Encode `data` for a request body.
    ///
    /// Returns `Ok(None)` when the target content type is not JSON, leaving
    /// `ctx` untouched apart from the defaulted content type.
    pub fn serialize(
        &self,
        data: &ODataValue,
        ctx: &mut SerializeContext,
    ) -> Result<Option<String>, CodecError> {
        let content_type = ctx.content_type.get_or_insert_with(ContentType::json);
        if !content_type.is_json() {
            trace!(content_type = %content_type, "not a JSON target");
            return Ok(None);
        }
        let version = ctx
            .data_service_version
            .as_deref()
            .map_or(MIN_DATA_SERVICE_VERSION, |v| {
                max_version(v, MIN_DATA_SERVICE_VERSION)
            })
            .to_string();
        ctx.data_service_version = Some(version);

        let payload = format_request_payload(data);
        serde_json::to_string(&payload)
            .map(Some)
            .map_err(CodecError::Encode)
    }
}

/// Rebuild `data` keeping only members a server accepts on write.
///
/// # Example
///
/// ```
/// use odata_json::{format_request_payload, ODataValue};
/// use serde_json::json;
///
/// let data = ODataValue::from(json!({
///     "@odata.context": "http://host/svc/$metadata#People/$entity",
///     "@odata.type": "#Ns.Person",
///     "Name": "Ann",
///     "Name@odata.type": "#Edm.String",
///     "Friends@odata.navigationLink": "People(1)/Friends"
/// }));
/// let expected = ODataValue::from(json!({
///     "@odata.type": "#Ns.Person",
///     "Name": "Ann",
///     "Name@odata.type": "#Edm.String"
/// }));
/// assert_eq!(format_request_payload(&data), expected);
/// ```
pub fn format_request_payload(data: &ODataValue) -> ODataValue {
    match data {
        ODataValue::Array(items) => ODataValue::Array(items.iter().map(format_request_payload).collect()),
        ODataValue::Object(object) => {
            let filtered: Map = object
                .iter()
                .filter(|(name, _)| is_serializable_property(name))
                .map(|(name, value)| (name.clone(), format_request_payload(value)))
                .collect();
            ODataValue::Object(filtered)
        }
        primitive => primitive.clone(),
    }
}

/// Whether an object member survives serialization: plain members and the
/// `id` and `type` control terms do, other `@odata.` terms and empty names do
/// not.
pub fn is_serializable_property(name: &str) -> bool {
    if name.is_empty() {
        return false;
    }
    match name.find(ODATA_PREFIX) {
        None => true,
        Some(idx) => SERIALIZABLE_TERMS.contains(&&name[idx + ODATA_PREFIX.len()..]),
    }
}
