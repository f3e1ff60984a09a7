use std::collections::BTreeSet;

use crate::parse::{RefPath, SchemaMap, SchemaNode};

/// Resolves the ancestor interface names of a schema's `allOf` chain.
///
/// Returns `None` when the schema declares no `allOf`. Resolution is
/// transitive and depth-first: an ancestor's own ancestors are spliced in
/// ahead of it, so parents always precede children in the result. The
/// direct ancestor name is always included even when recursion already
/// emitted it; property combination layers each name in order, so the
/// duplication is harmless. Cycles in the `allOf` graph are skipped, and a
/// schema never resolves itself as an ancestor.
pub fn resolve_interfaces(
    schema_name: &str,
    schema: &SchemaNode,
    schemas: &SchemaMap,
) -> Option<Vec<String>> {
    let all_of = schema.all_of.as_ref()?;
    let mut names = Vec::new();
    let mut in_progress = BTreeSet::from([schema_name.to_owned()]);
    collect(all_of, schemas, &mut in_progress, &mut names);
    Some(names)
}

fn collect(
    all_of: &[SchemaNode],
    schemas: &SchemaMap,
    in_progress: &mut BTreeSet<String>,
    names: &mut Vec<String>,
) {
    for entry in all_of {
        let Some(reference) = &entry.reference else {
            continue;
        };
        let name = reference.name();
        if !in_progress.insert(name.to_owned()) {
            // The source data should be a DAG but is not guaranteed to be.
            continue;
        }
        if let Some(ancestor) = schemas.get(name)
            && let Some(nested) = &ancestor.all_of
        {
            collect(nested, schemas, in_progress, names);
        }
        in_progress.remove(name);
        names.push(name.to_owned());
    }
}

/// The direct ancestor names only, for `extends` clauses. Transitive
/// ancestors are reached through TypeScript's own inheritance.
pub fn direct_interfaces(schema: &SchemaNode) -> Option<Vec<&str>> {
    let all_of = schema.all_of.as_ref()?;
    let names: Vec<_> = all_of
        .iter()
        .filter_map(|entry| entry.reference.as_ref())
        .map(RefPath::name)
        .collect();
    (!names.is_empty()).then_some(names)
}
