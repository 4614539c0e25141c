//! Primitive type names and `Collection(...)` wrappers.

/// Primitive type names a context-URL fragment may name directly.
pub const PRIMITIVE_TYPE_NAMES: &[&str] = &[
    "Edm.Binary",
    "Edm.Boolean",
    "Edm.Byte",
    "Edm.Date",
    "Edm.DateTime",
    "Edm.DateTimeOffset",
    "Edm.Decimal",
    "Edm.Double",
    "Edm.Duration",
    "Edm.Float",
    "Edm.Guid",
    "Edm.Int16",
    "Edm.Int32",
    "Edm.Int64",
    "Edm.SByte",
    "Edm.Single",
    "Edm.Stream",
    "Edm.String",
    "Edm.Time",
    "Edm.TimeOfDay",
    "Edm.Geography",
    "Edm.GeographyPoint",
    "Edm.GeographyLineString",
    "Edm.GeographyPolygon",
    "Edm.GeographyMultiPoint",
    "Edm.GeographyMultiLineString",
    "Edm.GeographyMultiPolygon",
    "Edm.GeographyCollection",
    "Edm.Geometry",
    "Edm.GeometryPoint",
    "Edm.GeometryLineString",
    "Edm.GeometryPolygon",
    "Edm.GeometryMultiPoint",
    "Edm.GeometryMultiLineString",
    "Edm.GeometryMultiPolygon",
    "Edm.GeometryCollection",
];

/// Whether `name` is one of [`PRIMITIVE_TYPE_NAMES`].
///
/// # Example
///
/// ```
/// use odata_edm::is_primitive_type;
///
/// assert!(is_primitive_type("Edm.String"));
/// assert!(!is_primitive_type("Shop.Product"));
/// ```
pub fn is_primitive_type(name: &str) -> bool {
    PRIMITIVE_TYPE_NAMES.contains(&name)
}

/// The element type of a `Collection(<type>)` name, `None` for any other name.
///
/// # Example
///
/// ```
/// use odata_edm::collection_element_type;
///
/// assert_eq!(collection_element_type("Collection(Shop.Address)"), Some("Shop.Address"));
/// assert_eq!(collection_element_type("Shop.Address"), None);
/// ```
pub fn collection_element_type(name: &str) -> Option<&str> {
    name.strip_prefix("Collection(")?.strip_suffix(')')
}

/// `name` with any `Collection(...)` wrapper removed.
pub fn element_type_name(name: &str) -> &str {
    collection_element_type(name).unwrap_or(name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_element_type_name() {
        assert_eq!(element_type_name("Collection(Edm.String)"), "Edm.String");
        assert_eq!(element_type_name("Edm.String"), "Edm.String");
    }

    #[test]
    fn test_malformed_collection() {
        assert_eq!(collection_element_type("Collection(Edm.String"), None);
        assert_eq!(collection_element_type("Collection()"), Some(""));
    }

    #[test]
    fn test_spatial_types_are_primitive() {
        assert!(is_primitive_type("Edm.GeographyPoint"));
        assert!(is_primitive_type("Edm.GeometryCollection"));
    }
}
