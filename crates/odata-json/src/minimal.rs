//! Minimal-metadata reader.
//!
//! A minimal-metadata payload carries little more than its context URL. The
//! reader classifies it and stamps the type and identity annotations a
//! full-metadata payload would have carried, using the model as ground truth.

use std::collections::HashSet;

use odata_edm::{
    effective_key, effective_navigation_property, effective_property, element_type_name, EdmModel,
    StructuredType,
};
use tracing::{debug, trace};

use crate::annotations::{
    is_annotation, property_type_annotation, type_reference, ODATA_CONTEXT, ODATA_EDIT_LINK,
    ODATA_ID, ODATA_TYPE,
};
use crate::classify::{classify, service_root};
use crate::error::CodecError;
use crate::literal::format_literal;
use crate::payload::{DeltaKind, PayloadInfo, PayloadKind};
use crate::value::{Map, ODataValue};

/// Annotate a minimal-metadata payload.
///
/// Payloads are returned unchanged when no model (or an empty one) is given,
/// when they carry no context URL, and for every shape other than feeds and
/// entries.
pub fn read_payload_minimal(
    data: ODataValue,
    model: Option<&EdmModel>,
    strict: bool,
) -> Result<ODataValue, CodecError> {
    let Some(model) = model.filter(|m| !m.is_empty()) else {
        debug!("no model, minimal payload left unannotated");
        return Ok(data);
    };
    let ODataValue::Object(payload) = data else {
        return Ok(data);
    };
    let Some(info) = classify(&payload, model, strict)? else {
        return Ok(ODataValue::Object(payload));
    };
    let context = payload
        .get(ODATA_CONTEXT)
        .and_then(|v| v.as_str())
        .unwrap_or_default();
    let reader = MinimalReader {
        model,
        strict,
        service_root: service_root(context).to_string(),
    };

    if matches!(
        info.delta_kind,
        Some(DeltaKind::DeletedEntry | DeltaKind::Link | DeltaKind::DeletedLink)
    ) {
        trace!(delta = ?info.delta_kind, "delta payload left unannotated");
        return Ok(ODataValue::Object(payload));
    }

    let payload = match info.kind {
        Some(PayloadKind::Feed) => reader.read_feed(payload, &info)?,
        Some(PayloadKind::Entry) => reader.read_entry(payload, &info)?,
        Some(
            PayloadKind::ServiceDocument
            | PayloadKind::Property
            | PayloadKind::Collection
            | PayloadKind::Value
            | PayloadKind::EntityRefLink
            | PayloadKind::EntityRefLinks
            | PayloadKind::Delta,
        )
        | None => {
            trace!(kind = ?info.kind, "payload shape left unannotated");
            payload
        }
    };
    Ok(ODataValue::Object(payload))
}

struct MinimalReader<'m> {
    model: &'m EdmModel,
    strict: bool,
    service_root: String,
}

impl<'m> MinimalReader<'m> {
    fn read_feed(&self, mut feed: Map, info: &PayloadInfo<'m>) -> Result<Map, CodecError> {
        let items = match feed.get_mut("value") {
            Some(ODataValue::Array(items)) => std::mem::take(items),
            _ => {
                debug!("feed payload without a value array");
                return Ok(feed);
            }
        };
        let mut entries = Vec::with_capacity(items.len());
        for item in items {
            let ODataValue::Object(entry) = item else {
                entries.push(item);
                continue;
            };
            let own_type = entry
                .get(ODATA_TYPE)
                .and_then(|v| v.as_str())
                .map(str::to_string);
            let entry = match own_type {
                Some(type_ref) => {
                    let entry_info = self.derived_entry_info(info, &type_ref)?;
                    self.read_entry(entry, &entry_info)?
                }
                None => self.read_entry(entry, info)?,
            };
            entries.push(ODataValue::Object(entry));
        }
        feed.insert("value".to_string(), ODataValue::Array(entries));
        Ok(feed)
    }

    /// Per-entry classification for a feed member that names its own type.
    fn derived_entry_info(
        &self,
        feed_info: &PayloadInfo<'m>,
        type_ref: &str,
    ) -> Result<PayloadInfo<'m>, CodecError> {
        let type_name = type_ref.strip_prefix('#').unwrap_or(type_ref);
        let ty = self.model.lookup_entity_type(type_name);
        if ty.is_none() {
            self.schema_mismatch(type_name)?;
        }
        Ok(feed_info.with_type(type_name, ty.map(StructuredType::Entity)))
    }

    fn read_entry(&self, mut entry: Map, info: &PayloadInfo<'m>) -> Result<Map, CodecError> {
        if let Some(type_name) = &info.type_name {
            entry.insert(ODATA_TYPE.to_string(), type_reference(type_name).into());
        }
        let Some(ty) = info.ty else {
            return Ok(entry);
        };

        match effective_key(self.model, ty) {
            Some((owner, refs)) => {
                let key = self.entity_key(&entry, StructuredType::Entity(owner), refs)?;
                if let (Some(key), Some(name)) = (key, &info.name) {
                    let last_segment = format!("{name}{key}");
                    entry.insert(
                        ODATA_ID.to_string(),
                        format!("{}{last_segment}", self.service_root).into(),
                    );
                    entry.insert(ODATA_EDIT_LINK.to_string(), last_segment.into());
                }
            }
            None => self.schema_mismatch(&format!("key of {}", ty.name()))?,
        }

        self.read_properties(entry, ty)
    }

    /// `(value)` for a single key, `(name=value,...)` in key order otherwise.
    /// `None` when a key property cannot be rendered in lenient mode.
    fn entity_key(
        &self,
        entry: &Map,
        owner: StructuredType<'m>,
        refs: &[odata_edm::PropertyRef],
    ) -> Result<Option<String>, CodecError> {
        let mut parts = Vec::with_capacity(refs.len());
        for key_ref in refs {
            let Some(property) = effective_property(self.model, owner, &key_ref.name) else {
                self.schema_mismatch(&key_ref.name)?;
                return Ok(None);
            };
            let Some(value) = entry.get(&key_ref.name) else {
                if self.strict {
                    return Err(CodecError::MissingKeyValue {
                        property: key_ref.name.clone(),
                    });
                }
                debug!(property = %key_ref.name, "entity lacks key value, identity skipped");
                return Ok(None);
            };
            let literal = format_literal(value, &property.type_name);
            if refs.len() == 1 {
                parts.push(literal);
            } else {
                parts.push(format!("{}={literal}", key_ref.name));
            }
        }
        Ok(Some(format!("({})", parts.join(","))))
    }

    /// Annotate each property of a structured value.
    ///
    /// Scalars and collections get a `<name>@odata.type` annotation right
    /// after the property unless the payload already has one; objects and
    /// collection members are walked as nested complex values.
    fn read_properties(&self, object: Map, ty: StructuredType<'m>) -> Result<Map, CodecError> {
        let present: HashSet<String> = object
            .keys()
            .filter(|k| is_annotation(k))
            .cloned()
            .collect();
        let mut out = Map::with_capacity(object.len());
        for (name, value) in object {
            if is_annotation(&name) {
                out.insert(name, value);
                continue;
            }
            let Some(property) = effective_property(self.model, ty, &name) else {
                if effective_navigation_property(self.model, ty, &name).is_some() {
                    trace!(property = %name, "expanded navigation property left as is");
                } else {
                    self.schema_mismatch(&format!("{}.{name}", ty.name()))?;
                }
                out.insert(name, value);
                continue;
            };
            let declared = property.type_name.as_str();
            let annotation = property_type_annotation(&name);
            let (value, annotate) = match value {
                ODataValue::Array(items) => {
                    let items = items
                        .into_iter()
                        .map(|item| match item {
                            ODataValue::Object(member) => {
                                self.read_complex(member, declared).map(ODataValue::Object)
                            }
                            other => Ok(other),
                        })
                        .collect::<Result<Vec<_>, _>>()?;
                    (ODataValue::Array(items), true)
                }
                ODataValue::Object(member) => {
                    (ODataValue::Object(self.read_complex(member, declared)?), false)
                }
                scalar => (scalar, true),
            };
            out.insert(name, value);
            if annotate && !present.contains(&annotation) {
                out.insert(annotation, type_reference(declared).into());
            }
        }
        Ok(out)
    }

    /// Annotate a complex value declared as `declared` (possibly
    /// `Collection(...)`). A member naming its own type keeps it.
    fn read_complex(&self, mut object: Map, declared: &str) -> Result<Map, CodecError> {
        let type_name = match object.get(ODATA_TYPE).and_then(|v| v.as_str()) {
            Some(type_ref) => type_ref.strip_prefix('#').unwrap_or(type_ref).to_string(),
            // Declared element type is the fallback.
            None => element_type_name(declared).to_string(),
        };
        object.insert(ODATA_TYPE.to_string(), type_reference(&type_name).into());
        // Opaque values such as spatial types stop here.
        let Some(ty) = self.model.lookup_complex_type(&type_name) else {
            return Ok(object);
        };
        self.read_properties(object, StructuredType::Complex(ty))
    }

    fn schema_mismatch(&self, name: &str) -> Result<(), CodecError> {
        if self.strict {
            return Err(CodecError::schema_mismatch(name));
        }
        debug!(name, "missing from model, annotation skipped");
        Ok(())
    }
}
