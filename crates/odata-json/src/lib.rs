//! JSON payload codec for OData clients.
//!
//! Reading classifies a payload from its `@odata.context` URL and fills in
//! the type and identity annotations its metadata level left out. Writing
//! strips the control annotations a server does not accept.
//!
//! # Example
//!
//! ```
//! use odata_json::{ContentType, EdmModel, JsonCodec, ParseContext};
//!
//! let model: EdmModel = r#"[{
//!     "namespace": "Shop",
//!     "entityType": [{
//!         "name": "Product",
//!         "key": [{ "propertyRef": [{ "name": "Id" }] }],
//!         "property": [
//!             { "name": "Id", "type": "Edm.Int32" },
//!             { "name": "Title", "type": "Edm.String" }
//!         ]
//!     }],
//!     "entityContainer": {
//!         "name": "Container",
//!         "entitySet": [{ "name": "Products", "entityType": "Shop.Product" }]
//!     }
//! }]"#.parse().unwrap();
//!
//! let payload = r#"{
//!     "@odata.context": "http://host/svc/$metadata#Products/$entity",
//!     "Id": 7,
//!     "Title": "Tea"
//! }"#;
//! let ctx = ParseContext::new(&model, ContentType::parse("application/json"));
//! let entry = JsonCodec::default().parse(payload, &ctx).unwrap();
//!
//! assert_eq!(entry.get("@odata.type").and_then(|v| v.as_str()), Some("#Shop.Product"));
//! assert_eq!(entry.get("@odata.id").and_then(|v| v.as_str()), Some("http://host/svc/Products(7)"));
//! assert_eq!(entry.get("@odata.editLink").and_then(|v| v.as_str()), Some("Products(7)"));
//! assert_eq!(entry.get("Title@odata.type").and_then(|v| v.as_str()), Some("#Edm.String"));
//! ```

mod annotations;
mod classify;
mod codec;
mod content_type;
mod context_url;
mod error;
mod full;
mod literal;
mod minimal;
mod payload;
pub mod temporal;
mod value;

pub mod cli;

pub use odata_edm::EdmModel;

pub use annotations::{
    is_annotation, ODATA_CONTEXT, ODATA_EDIT_LINK, ODATA_ID, ODATA_PREFIX, ODATA_TYPE,
};
pub use classify::{classify, service_root};
pub use codec::{
    format_request_payload, is_serializable_property, CodecOptions, JsonCodec, ParseContext,
    PayloadSource, SerializeContext, MIN_DATA_SERVICE_VERSION,
};
pub use content_type::{ContentType, MetadataLevel, JSON_MEDIA_TYPE};
pub use context_url::{split_clause, ContextUrlResolver};
pub use error::CodecError;
pub use full::read_payload_full;
pub use literal::format_literal;
pub use minimal::read_payload_minimal;
pub use payload::{DeltaKind, PayloadInfo, PayloadKind};
pub use temporal::{DateKind, DateValue, DurationValue};
pub use value::{Map, ODataValue};
