//! Entity data model (EDM) lookups for OData clients.
//!
//! The model is consumed as an already-parsed, read-only schema graph. This
//! crate only deserializes it and answers name-based questions about it; it
//! does not validate the model.
//!
//! # Example
//!
//! ```
//! use odata_edm::EdmModel;
//!
//! let model = EdmModel::from_json_str(r#"[{
//!     "namespace": "Shop",
//!     "entityType": [{
//!         "name": "Product",
//!         "key": [{ "propertyRef": [{ "name": "Id" }] }],
//!         "property": [{ "name": "Id", "type": "Edm.Int32" }]
//!     }],
//!     "entityContainer": {
//!         "name": "Container",
//!         "entitySet": [{ "name": "Products", "entityType": "Shop.Product" }]
//!     }
//! }]"#).unwrap();
//!
//! let set = model.default_entity_container().unwrap().lookup_entity_set("Products").unwrap();
//! assert_eq!(set.entity_type, "Shop.Product");
//! assert!(model.lookup_entity_type("Shop.Product").is_some());
//! ```

mod error;
pub use error::EdmError;

mod model;
pub use model::*;

mod lookup;
pub use lookup::{lookup_property, StructuredType};

mod hierarchy;
pub use hierarchy::{effective_key, effective_navigation_property, effective_property, BaseTypeChain};

pub mod primitive;
pub use primitive::{collection_element_type, element_type_name, is_primitive_type};
