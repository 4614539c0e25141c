//! Payload classification results.

use odata_edm::StructuredType;

/// Shape of a payload, as named by its context URL.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PayloadKind {
    ServiceDocument,
    Feed,
    Entry,
    Property,
    Collection,
    Value,
    EntityRefLink,
    EntityRefLinks,
    Delta,
}

/// Delta marker, orthogonal to [`PayloadKind`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeltaKind {
    Feed,
    DeletedEntry,
    Link,
    DeletedLink,
}

impl DeltaKind {
    /// Match a context-URL segment naming a delta marker.
    pub fn from_segment(segment: &str) -> Option<Self> {
        match segment {
            "$delta" => Some(DeltaKind::Feed),
            "$deletedEntity" => Some(DeltaKind::DeletedEntry),
            "$link" => Some(DeltaKind::Link),
            "$deletedLink" => Some(DeltaKind::DeletedLink),
            _ => None,
        }
    }
}

/// Classification of one payload against the model.
///
/// `kind` is `None` only when lenient resolution met a fragment it could not
/// classify.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PayloadInfo<'m> {
    pub kind: Option<PayloadKind>,
    pub delta_kind: Option<DeltaKind>,
    /// Resolved OData type name.
    pub type_name: Option<String>,
    /// Resolved structured type; `None` when `type_name` is primitive.
    pub ty: Option<StructuredType<'m>>,
    /// Entity set, singleton, or property that produced the classification.
    pub name: Option<String>,
    /// Raw parenthesized `$select`/`$expand` clause, kept uninterpreted.
    pub projection: Option<String>,
    pub is_null_property: bool,
}

impl<'m> PayloadInfo<'m> {
    pub fn of_kind(kind: PayloadKind) -> Self {
        Self {
            kind: Some(kind),
            ..Default::default()
        }
    }

    /// A copy with the type replaced, leaving the rest of the classification
    /// intact.
    pub fn with_type(&self, type_name: impl Into<String>, ty: Option<StructuredType<'m>>) -> Self {
        Self {
            type_name: Some(type_name.into()),
            ty,
            ..self.clone()
        }
    }
}
