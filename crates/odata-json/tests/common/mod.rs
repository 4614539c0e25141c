#![allow(dead_code)]

use odata_json::{EdmModel, ODataValue};
use serde_json::Value;

pub const SERVICE: &str = "http://host/svc/";

/// A small shop service: single, composite, and binary keys, a derived
/// entity type, nested and derived complex types, and a singleton.
pub const SHOP_MODEL: &str = r#"{
  "dataServices": {
    "schema": [{
      "namespace": "Shop",
      "alias": "S",
      "entityType": [
        {
          "name": "Product",
          "key": [{ "propertyRef": [{ "name": "Id" }] }],
          "property": [
            { "name": "Id", "type": "Edm.Int32" },
            { "name": "Title", "type": "Edm.String" },
            { "name": "Price", "type": "Edm.Decimal" },
            { "name": "Tags", "type": "Collection(Edm.String)" },
            { "name": "Dims", "type": "Shop.Dimensions" },
            { "name": "Released", "type": "Edm.DateTimeOffset" }
          ],
          "navigationProperty": [{ "name": "Category", "type": "Shop.Category" }]
        },
        {
          "name": "SpecialProduct",
          "baseType": "Shop.Product",
          "property": [{ "name": "Discount", "type": "Edm.Double" }]
        },
        {
          "name": "Category",
          "key": [{ "propertyRef": [{ "name": "Category" }, { "name": "Id" }] }],
          "property": [
            { "name": "Category", "type": "Edm.String" },
            { "name": "Id", "type": "Edm.Int32" },
            { "name": "Name", "type": "Edm.String" }
          ]
        },
        {
          "name": "Blob",
          "key": [{ "propertyRef": [{ "name": "Hash" }] }],
          "property": [
            { "name": "Hash", "type": "Edm.Binary" },
            { "name": "Size", "type": "Edm.Int64" }
          ]
        },
        {
          "name": "Person",
          "key": [{ "propertyRef": [{ "name": "Id" }] }],
          "property": [
            { "name": "Id", "type": "Edm.Int32" },
            { "name": "Name", "type": "Edm.String" },
            { "name": "Home", "type": "S.Address" },
            { "name": "Addresses", "type": "Collection(Shop.Address)" }
          ]
        }
      ],
      "complexType": [
        {
          "name": "Address",
          "property": [
            { "name": "Street", "type": "Edm.String" },
            { "name": "City", "type": "Edm.String" },
            { "name": "Location", "type": "Edm.GeographyPoint" }
          ]
        },
        {
          "name": "WorkAddress",
          "baseType": "Shop.Address",
          "property": [{ "name": "Company", "type": "Edm.String" }]
        },
        {
          "name": "Dimensions",
          "property": [
            { "name": "Width", "type": "Edm.Double" },
            { "name": "Height", "type": "Edm.Double" }
          ]
        }
      ],
      "entityContainer": {
        "name": "Container",
        "entitySet": [
          { "name": "Products", "entityType": "Shop.Product" },
          { "name": "Categories", "entityType": "Shop.Category" },
          { "name": "Blobs", "entityType": "Shop.Blob" },
          { "name": "People", "entityType": "Shop.Person" },
          { "name": "Orphans", "entityType": "Shop.Missing" }
        ],
        "singleton": [{ "name": "Me", "type": "Shop.Person" }]
      }
    }]
  }
}"#;

pub fn shop_model() -> EdmModel {
    EdmModel::from_json_str(SHOP_MODEL).unwrap_or_else(|e| panic!("fixture model: {e}"))
}

/// `http://host/svc/$metadata#<fragment>`
pub fn context(fragment: &str) -> String {
    format!("{SERVICE}$metadata#{fragment}")
}

pub fn to_json(value: ODataValue) -> Value {
    Value::from(value)
}

/// Member names of an object, in order.
pub fn keys(value: &ODataValue) -> Vec<String> {
    value
        .as_object()
        .map(|object| object.keys().cloned().collect())
        .unwrap_or_default()
}
