//! Base-type chain walking.
//!
//! A derived type inherits its parent's properties and key. These helpers are
//! the only place the chain is walked.

use tracing::debug;

use crate::lookup::{lookup_property, StructuredType};
use crate::model::{EdmModel, EntityType, NavigationProperty, Property, PropertyRef};

/// Iterator over a type followed by its ancestors, nearest first.
///
/// Entity types resolve their `baseType` as entity types and complex types as
/// complex types. The walk stops at a root type, at an unresolvable base name,
/// or on a cycle.
pub struct BaseTypeChain<'a> {
    model: &'a EdmModel,
    next: Option<StructuredType<'a>>,
    seen: Vec<&'a str>,
}

impl<'a> BaseTypeChain<'a> {
    pub fn new(model: &'a EdmModel, start: StructuredType<'a>) -> Self {
        Self {
            model,
            next: Some(start),
            seen: Vec::new(),
        }
    }
}

impl<'a> Iterator for BaseTypeChain<'a> {
    type Item = StructuredType<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next.take()?;
        self.seen.push(current.name());
        if let Some(base) = current.base_type() {
            let parent = match current {
                StructuredType::Entity(_) => self
                    .model
                    .lookup_entity_type(base)
                    .map(StructuredType::Entity),
                StructuredType::Complex(_) => self
                    .model
                    .lookup_complex_type(base)
                    .map(StructuredType::Complex),
            };
            match parent {
                Some(parent) if self.seen.contains(&parent.name()) => {
                    debug!(type_name = current.name(), base, "base type cycle");
                }
                Some(parent) => self.next = Some(parent),
                None => debug!(type_name = current.name(), base, "unresolved base type"),
            }
        }
        Some(current)
    }
}

/// The nearest type in the chain that declares a non-empty key, together with
/// that key in declared order.
pub fn effective_key<'a>(
    model: &'a EdmModel,
    ty: StructuredType<'a>,
) -> Option<(&'a EntityType, &'a [PropertyRef])> {
    BaseTypeChain::new(model, ty).find_map(|ty| {
        let entity = ty.as_entity()?;
        let refs = entity.key_refs();
        (!refs.is_empty()).then_some((entity, refs))
    })
}

/// Find a property declared on `ty` or inherited from one of its ancestors.
pub fn effective_property<'a>(
    model: &'a EdmModel,
    ty: StructuredType<'a>,
    name: &str,
) -> Option<&'a Property> {
    BaseTypeChain::new(model, ty).find_map(|ty| lookup_property(ty.properties(), name))
}

/// Find a navigation property declared on an entity type or inherited.
pub fn effective_navigation_property<'a>(
    model: &'a EdmModel,
    ty: StructuredType<'a>,
    name: &str,
) -> Option<&'a NavigationProperty> {
    BaseTypeChain::new(model, ty).find_map(|ty| {
        ty.as_entity()?
            .navigation_property
            .iter()
            .find(|p| p.name == name)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn model() -> EdmModel {
        EdmModel::from_json_str(
            r#"[{
                "namespace": "Hr",
                "entityType": [
                    { "name": "Person", "key": [{ "propertyRef": [{ "name": "Id" }] }],
                      "property": [{ "name": "Id", "type": "Edm.Int32" }, { "name": "Name", "type": "Edm.String" }] },
                    { "name": "Employee", "baseType": "Hr.Person",
                      "property": [{ "name": "Salary", "type": "Edm.Decimal" }],
                      "navigationProperty": [{ "name": "Boss", "type": "Hr.Manager" }] },
                    { "name": "Manager", "baseType": "Hr.Employee",
                      "property": [{ "name": "Reports", "type": "Edm.Int32" }] },
                    { "name": "LoopA", "baseType": "Hr.LoopB", "property": [] },
                    { "name": "LoopB", "baseType": "Hr.LoopA", "property": [] }
                ]
            }]"#,
        )
        .unwrap()
    }

    fn entity<'a>(model: &'a EdmModel, name: &str) -> StructuredType<'a> {
        StructuredType::Entity(model.lookup_entity_type(name).unwrap())
    }

    #[test]
    fn test_chain_order() {
        let model = model();
        let names: Vec<_> = BaseTypeChain::new(&model, entity(&model, "Hr.Manager"))
            .map(|t| t.name())
            .collect();
        assert_eq!(names, vec!["Manager", "Employee", "Person"]);
    }

    #[test]
    fn test_effective_key_from_root() {
        let model = model();
        let (owner, refs) = effective_key(&model, entity(&model, "Hr.Manager")).unwrap();
        assert_eq!(owner.name, "Person");
        assert_eq!(refs.len(), 1);
        assert_eq!(refs[0].name, "Id");
    }

    #[test]
    fn test_effective_property_inherited() {
        let model = model();
        let manager = entity(&model, "Hr.Manager");
        assert_eq!(
            effective_property(&model, manager, "Name").unwrap().type_name,
            "Edm.String"
        );
        assert_eq!(
            effective_property(&model, manager, "Reports").unwrap().type_name,
            "Edm.Int32"
        );
        assert!(effective_property(&model, manager, "Nope").is_none());
    }

    #[test]
    fn test_cycle_terminates() {
        let model = model();
        let names: Vec<_> = BaseTypeChain::new(&model, entity(&model, "Hr.LoopA"))
            .map(|t| t.name())
            .collect();
        assert_eq!(names, vec!["LoopA", "LoopB"]);
        assert!(effective_key(&model, entity(&model, "Hr.LoopA")).is_none());
    }

    #[test]
    fn test_navigation_property_inherited() {
        let model = model();
        let manager = entity(&model, "Hr.Manager");
        let boss = effective_navigation_property(&model, manager, "Boss").unwrap();
        assert_eq!(boss.type_name, "Hr.Manager");
        assert!(effective_navigation_property(&model, manager, "Salary").is_none());
        assert!(effective_navigation_property(&model, entity(&model, "Hr.Person"), "Boss").is_none());
    }
}
