//! Name-based lookups into the model.
//!
//! Every lookup returns `None` on a miss and never fails.

use crate::model::*;

/// An entity or complex type: the two kinds of structured type that carry
/// properties and may derive from a base type.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum StructuredType<'a> {
    Entity(&'a EntityType),
    Complex(&'a ComplexType),
}

impl<'a> StructuredType<'a> {
    pub fn name(&self) -> &'a str {
        match *self {
            StructuredType::Entity(ty) => &ty.name,
            StructuredType::Complex(ty) => &ty.name,
        }
    }

    pub fn base_type(&self) -> Option<&'a str> {
        match *self {
            StructuredType::Entity(ty) => ty.base_type.as_deref(),
            StructuredType::Complex(ty) => ty.base_type.as_deref(),
        }
    }

    /// Properties declared on this type itself, excluding inherited ones.
    pub fn properties(&self) -> &'a [Property] {
        match *self {
            StructuredType::Entity(ty) => &ty.property,
            StructuredType::Complex(ty) => &ty.property,
        }
    }

    /// Declared key, empty for complex types and keyless derived entity types.
    pub fn key_refs(&self) -> &'a [PropertyRef] {
        match *self {
            StructuredType::Entity(ty) => ty.key_refs(),
            StructuredType::Complex(_) => &[],
        }
    }

    pub fn as_entity(&self) -> Option<&'a EntityType> {
        match *self {
            StructuredType::Entity(ty) => Some(ty),
            StructuredType::Complex(_) => None,
        }
    }

    pub fn is_entity(&self) -> bool {
        matches!(self, StructuredType::Entity(_))
    }
}

/// Find a property by name in a property list.
pub fn lookup_property<'a>(properties: &'a [Property], name: &str) -> Option<&'a Property> {
    properties.iter().find(|p| p.name == name)
}

/// Split `Namespace.Name` at its last dot.
fn split_qualified(name: &str) -> Option<(&str, &str)> {
    name.rsplit_once('.')
}

impl Schema {
    fn matches_namespace(&self, namespace: &str) -> bool {
        self.namespace == namespace || self.alias.as_deref() == Some(namespace)
    }
}

impl EdmModel {
    /// Resolve a qualified entity type name (`Namespace.Name` or `Alias.Name`).
    pub fn lookup_entity_type(&self, qualified_name: &str) -> Option<&EntityType> {
        let (namespace, name) = split_qualified(qualified_name)?;
        self.schemas
            .iter()
            .filter(|schema| schema.matches_namespace(namespace))
            .flat_map(|schema| schema.entity_type.iter())
            .find(|ty| ty.name == name)
    }

    /// Resolve a qualified complex type name.
    pub fn lookup_complex_type(&self, qualified_name: &str) -> Option<&ComplexType> {
        let (namespace, name) = split_qualified(qualified_name)?;
        self.schemas
            .iter()
            .filter(|schema| schema.matches_namespace(namespace))
            .flat_map(|schema| schema.complex_type.iter())
            .find(|ty| ty.name == name)
    }

    /// Resolve a qualified name as an entity type, else as a complex type.
    pub fn lookup_structured_type(&self, qualified_name: &str) -> Option<StructuredType<'_>> {
        self.lookup_entity_type(qualified_name)
            .map(StructuredType::Entity)
            .or_else(|| {
                self.lookup_complex_type(qualified_name)
                    .map(StructuredType::Complex)
            })
    }

    /// The first entity container declared by any schema.
    pub fn default_entity_container(&self) -> Option<&EntityContainer> {
        self.schemas
            .iter()
            .find_map(|schema| schema.entity_container.as_ref())
    }
}

impl EntityContainer {
    pub fn lookup_entity_set(&self, name: &str) -> Option<&EntitySet> {
        self.entity_set.iter().find(|set| set.name == name)
    }

    pub fn lookup_singleton(&self, name: &str) -> Option<&Singleton> {
        self.singleton.iter().find(|s| s.name == name)
    }
}
