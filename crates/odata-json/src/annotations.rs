//! Reserved annotation names on the wire.

/// Prefix shared by every OData control annotation term.
pub const ODATA_PREFIX: &str = "@odata.";
pub const ODATA_CONTEXT: &str = "@odata.context";
pub const ODATA_TYPE: &str = "@odata.type";
pub const ODATA_ID: &str = "@odata.id";
pub const ODATA_EDIT_LINK: &str = "@odata.editLink";

/// Terms the serializer keeps on outbound payloads.
pub const SERIALIZABLE_TERMS: &[&str] = &["id", "type"];

/// Whether an object member name is an annotation (`@term` or
/// `property@term`) rather than a property.
pub fn is_annotation(name: &str) -> bool {
    name.contains('@')
}

/// The `<property>@odata.type` member name for `property`.
pub fn property_type_annotation(property: &str) -> String {
    format!("{property}{ODATA_TYPE}")
}

/// A `#`-prefixed type reference as written in `@odata.type`.
pub fn type_reference(type_name: &str) -> String {
    format!("#{type_name}")
}
