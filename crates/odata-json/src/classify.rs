//! Payload classification from the `@odata.context` annotation.

use odata_edm::EdmModel;

use crate::annotations::ODATA_CONTEXT;
use crate::context_url::ContextUrlResolver;
use crate::error::CodecError;
use crate::payload::{PayloadInfo, PayloadKind};
use crate::value::Map;

/// Classify a decoded payload object.
///
/// Returns `Ok(None)` when the payload carries no string context URL, in which
/// case callers treat it as opaque. A context URL without `#` names the
/// service document.
pub fn classify<'m>(
    payload: &Map,
    model: &'m EdmModel,
    strict: bool,
) -> Result<Option<PayloadInfo<'m>>, CodecError> {
    let Some(context) = payload.get(ODATA_CONTEXT).and_then(|v| v.as_str()) else {
        return Ok(None);
    };
    match context.rfind('#') {
        None => Ok(Some(PayloadInfo::of_kind(PayloadKind::ServiceDocument))),
        Some(idx) => ContextUrlResolver::new(model, strict)
            .resolve(&context[idx + 1..])
            .map(Some),
    }
}

/// The service root of a context URL: everything before its last `$metadata`
/// segment. URLs without `$metadata` keep everything before the fragment.
///
/// # Example
///
/// ```
/// use odata_json::service_root;
///
/// assert_eq!(
///     service_root("http://host/svc/$metadata#Customers"),
///     "http://host/svc/"
/// );
/// assert_eq!(service_root("http://host/svc/#Customers"), "http://host/svc/");
/// ```
pub fn service_root(context_url: &str) -> &str {
    let base = context_url
        .rfind('#')
        .map_or(context_url, |idx| &context_url[..idx]);
    base.rfind("$metadata").map_or(base, |idx| &base[..idx])
}
