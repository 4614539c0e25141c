//! Context-URL fragment resolution.
//!
//! A fragment is a `/`-separated list of segments, each optionally suffixed
//! with a parenthesized clause:
//!
//! ```text
//! Customers                       feed of an entity set
//! Customers/$entity               single entity of that set
//! Customers(Name,Address)/$entity projected entity
//! Customers/Ns.VipCustomer        derived-type cast
//! Customers/$entity/Address       property of an entity
//! Customers/$delta                delta feed
//! Me                              singleton
//! Collection(Ns.Address)          collection of complex values
//! Edm.String                      primitive value
//! ```
//!
//! Segments are consumed left to right. The first segment names the entity
//! set, singleton, primitive or collection; later segments narrow it.

use odata_edm::{effective_property, element_type_name, is_primitive_type, EdmModel, StructuredType};
use tracing::{debug, trace};

use crate::error::CodecError;
use crate::payload::{DeltaKind, PayloadInfo, PayloadKind};

/// Resolves context-URL fragments against a model.
///
/// In lenient mode an unrecognized segment or a lookup miss is logged and
/// skipped, leaving the classification partially populated. In strict mode it
/// fails with [`CodecError::UnclassifiedFragment`] or
/// [`CodecError::SchemaMismatch`].
#[derive(Debug, Clone, Copy)]
pub struct ContextUrlResolver<'m> {
    model: &'m EdmModel,
    strict: bool,
}

impl<'m> ContextUrlResolver<'m> {
    pub fn new(model: &'m EdmModel, strict: bool) -> Self {
        Self { model, strict }
    }

    /// Classify a fragment (the part of a context URL after `#`).
    pub fn resolve(&self, fragment: &str) -> Result<PayloadInfo<'m>, CodecError> {
        if !fragment.contains('/') {
            match fragment {
                "" => return Ok(PayloadInfo::of_kind(PayloadKind::ServiceDocument)),
                "Edm.Null" => {
                    let mut info = PayloadInfo::of_kind(PayloadKind::Value);
                    info.is_null_property = true;
                    return Ok(info);
                }
                "Collection($ref)" => return Ok(PayloadInfo::of_kind(PayloadKind::EntityRefLinks)),
                "$ref" => return Ok(PayloadInfo::of_kind(PayloadKind::EntityRefLink)),
                _ => {}
            }
        }

        let mut info = PayloadInfo::default();
        let mut offset = 0;
        for segment in fragment.split('/') {
            if info.type_name.is_none() {
                self.resolve_head(&mut info, segment, offset)?;
            } else {
                self.resolve_tail(&mut info, segment, offset)?;
            }
            offset += segment.len() + 1;
        }
        trace!(fragment, kind = ?info.kind, type_name = ?info.type_name, "classified context url");
        Ok(info)
    }

    /// The segment that establishes the classification.
    fn resolve_head(
        &self,
        info: &mut PayloadInfo<'m>,
        raw: &str,
        offset: usize,
    ) -> Result<(), CodecError> {
        let mut segment = raw;
        if raw.contains('(') {
            let Some((prefix, clause)) = split_clause(raw) else {
                return self.unclassified(raw, offset);
            };
            if prefix == "Collection" {
                info.kind = Some(PayloadKind::Collection);
                info.type_name = Some(clause.to_string());
                info.ty = self.model.lookup_structured_type(clause);
                return Ok(());
            }
            info.projection = Some(clause.to_string());
            segment = prefix;
        }

        let container = self.model.default_entity_container();
        if let Some(set) = container.and_then(|c| c.lookup_entity_set(segment)) {
            info.kind = Some(PayloadKind::Feed);
            info.ty = self.entity_type(&set.entity_type)?;
            info.type_name = Some(set.entity_type.clone());
            info.name = Some(segment.to_string());
            return Ok(());
        }
        if let Some(singleton) = container.and_then(|c| c.lookup_singleton(segment)) {
            info.kind = Some(PayloadKind::Entry);
            info.ty = self.entity_type(&singleton.entity_type)?;
            info.type_name = Some(singleton.entity_type.clone());
            info.name = Some(segment.to_string());
            return Ok(());
        }
        if is_primitive_type(segment) {
            info.kind = Some(PayloadKind::Value);
            info.type_name = Some(segment.to_string());
            info.ty = None;
            return Ok(());
        }
        self.unclassified(raw, offset)
    }

    /// A segment that narrows an established classification.
    fn resolve_tail(
        &self,
        info: &mut PayloadInfo<'m>,
        segment: &str,
        offset: usize,
    ) -> Result<(), CodecError> {
        if segment.ends_with("$entity") && info.kind == Some(PayloadKind::Feed) {
            info.kind = Some(PayloadKind::Entry);
            return Ok(());
        }

        if let Some(delta) = DeltaKind::from_segment(segment) {
            info.delta_kind = Some(delta);
            return Ok(());
        }

        if segment.contains('.') {
            info.ty = self.model.lookup_structured_type(segment);
            info.type_name = Some(segment.to_string());
            if info.ty.is_none() {
                return self.schema_mismatch(segment);
            }
            return Ok(());
        }

        if matches!(info.kind, Some(PayloadKind::Feed | PayloadKind::Entry)) {
            let property = info
                .ty
                .and_then(|ty| effective_property(self.model, ty, segment));
            let Some(property) = property else {
                return self.schema_mismatch(segment);
            };
            info.kind = Some(PayloadKind::Property);
            info.type_name = Some(property.type_name.clone());
            info.ty = self
                .model
                .lookup_complex_type(element_type_name(&property.type_name))
                .map(StructuredType::Complex);
            info.name = Some(segment.to_string());
            return Ok(());
        }

        self.unclassified(segment, offset)
    }

    fn entity_type(&self, name: &str) -> Result<Option<StructuredType<'m>>, CodecError> {
        match self.model.lookup_entity_type(name) {
            Some(ty) => Ok(Some(StructuredType::Entity(ty))),
            None => {
                self.schema_mismatch(name)?;
                Ok(None)
            }
        }
    }

    fn unclassified(&self, segment: &str, offset: usize) -> Result<(), CodecError> {
        if self.strict {
            return Err(CodecError::unclassified(segment, offset));
        }
        debug!(segment, offset, "unclassified context url segment");
        Ok(())
    }

    fn schema_mismatch(&self, name: &str) -> Result<(), CodecError> {
        if self.strict {
            return Err(CodecError::schema_mismatch(name));
        }
        debug!(name, "context url names something missing from the model");
        Ok(())
    }
}

/// Split `prefix(clause)` at the parenthesis matching the final `)`.
///
/// Scans backward from the end so nested `$select`/`$expand` clauses stay
/// inside `clause`. Returns `None` when the segment does not end with `)` or
/// the parentheses do not balance.
pub fn split_clause(segment: &str) -> Option<(&str, &str)> {
    let body = segment.strip_suffix(')')?;
    let mut depth = 1usize;
    for (idx, ch) in body.char_indices().rev() {
        match ch {
            ')' => depth += 1,
            '(' => {
                depth -= 1;
                if depth == 0 {
                    return Some((&body[..idx], &body[idx + 1..]));
                }
            }
            _ => {}
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_clause_simple() {
        assert_eq!(split_clause("Customers(Name)"), Some(("Customers", "Name")));
    }

    #[test]
    fn test_split_clause_nested() {
        assert_eq!(
            split_clause("Customers(Name,Orders(Id,Total))"),
            Some(("Customers", "Name,Orders(Id,Total)"))
        );
        assert_eq!(
            split_clause("Collection(Collection(Edm.String))"),
            Some(("Collection", "Collection(Edm.String)"))
        );
    }

    #[test]
    fn test_split_clause_unbalanced() {
        assert_eq!(split_clause("Customers(Name"), None);
        assert_eq!(split_clause("Customers)Name)"), None);
        assert_eq!(split_clause("Customers"), None);
    }

    #[test]
    fn test_split_clause_empty() {
        assert_eq!(split_clause("Customers()"), Some(("Customers", "")));
    }

    #[test]
    fn test_special_forms_without_model_content() {
        let model = EdmModel::default();
        let resolver = ContextUrlResolver::new(&model, true);
        assert_eq!(
            resolver.resolve("").unwrap().kind,
            Some(PayloadKind::ServiceDocument)
        );
        let null = resolver.resolve("Edm.Null").unwrap();
        assert_eq!(null.kind, Some(PayloadKind::Value));
        assert!(null.is_null_property);
    }

    #[test]
    fn test_offset_points_at_failing_segment() {
        let model = EdmModel::default();
        let err = ContextUrlResolver::new(&model, true)
            .resolve("Edm.String/Nope")
            .unwrap_err();
        match err {
            CodecError::UnclassifiedFragment { segment, offset } => {
                assert_eq!(segment, "Nope");
                assert_eq!(offset, 11);
            }
            other => panic!("unexpected error {other:?}"),
        }
    }
}
