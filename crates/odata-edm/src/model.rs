//! EDM model types.
//!
//! Field names follow the JSON rendering of CSDL used by OData client
//! libraries (`entityType`, `propertyRef`, `baseType`, ...).

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::EdmError;

/// A complete model: the schemas of one service.
///
/// Deserializes from either a bare array of schemas or the wrapped
/// `{"dataServices": {"schema": [...]}}` document.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(from = "ModelDocument")]
pub struct EdmModel {
    pub schemas: Vec<Schema>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum ModelDocument {
    Schemas(Vec<Schema>),
    Wrapped {
        #[serde(rename = "dataServices")]
        data_services: DataServices,
    },
}

#[derive(Deserialize)]
struct DataServices {
    #[serde(default)]
    schema: Vec<Schema>,
}

impl From<ModelDocument> for EdmModel {
    fn from(doc: ModelDocument) -> Self {
        let schemas = match doc {
            ModelDocument::Schemas(schemas) => schemas,
            ModelDocument::Wrapped { data_services } => data_services.schema,
        };
        Self { schemas }
    }
}

impl EdmModel {
    pub fn new(schemas: Vec<Schema>) -> Self {
        Self { schemas }
    }

    /// Decode a model from its JSON document.
    pub fn from_json_str(text: &str) -> Result<Self, EdmError> {
        Ok(serde_json::from_str(text)?)
    }

    /// Whether the model carries any schema at all.
    pub fn is_empty(&self) -> bool {
        self.schemas.is_empty()
    }
}

impl FromStr for EdmModel {
    type Err = EdmError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_json_str(s)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Schema {
    pub namespace: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alias: Option<String>,
    #[serde(default)]
    pub entity_type: Vec<EntityType>,
    #[serde(default)]
    pub complex_type: Vec<ComplexType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub entity_container: Option<EntityContainer>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EntityType {
    pub name: String,
    /// Qualified name of the parent type; derived types inherit its
    /// properties and key.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_type: Option<String>,
    /// Absent on non-root types of a hierarchy.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub key: Vec<EntityKey>,
    #[serde(default)]
    pub property: Vec<Property>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub navigation_property: Vec<NavigationProperty>,
}

impl EntityType {
    /// The declared key properties, in key order. Empty when this type
    /// inherits its key.
    pub fn key_refs(&self) -> &[PropertyRef] {
        self.key
            .first()
            .map(|key| key.property_ref.as_slice())
            .unwrap_or(&[])
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EntityKey {
    #[serde(default)]
    pub property_ref: Vec<PropertyRef>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PropertyRef {
    pub name: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComplexType {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_type: Option<String>,
    #[serde(default)]
    pub property: Vec<Property>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Property {
    pub name: String,
    /// Primitive name, complex/entity type name, or `Collection(<type>)`.
    #[serde(rename = "type")]
    pub type_name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NavigationProperty {
    pub name: String,
    #[serde(rename = "type")]
    pub type_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub partner: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EntityContainer {
    pub name: String,
    #[serde(default)]
    pub entity_set: Vec<EntitySet>,
    #[serde(default)]
    pub singleton: Vec<Singleton>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EntitySet {
    pub name: String,
    pub entity_type: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Singleton {
    pub name: String,
    #[serde(rename = "type", alias = "entityType")]
    pub entity_type: String,
}
