use indexmap::IndexMap;

use crate::ir::{ArrayItems, NumberKind, PropertyShape, classify};
use crate::parse::{OverrideSchemas, RefPath, SchemaMap, SchemaNode, Ty};

/// Shared context for one schema's property walk.
#[derive(Clone, Copy, Debug)]
pub struct EmitContext<'a> {
    pub schema_name: &'a str,
    pub schemas: &'a SchemaMap,
    pub overrides: &'a OverrideSchemas,
}

impl EmitContext<'_> {
    /// Resolves a schema by name, honoring caller-supplied overrides
    /// ahead of the document's own definition.
    pub fn lookup(&self, name: &str) -> Option<&SchemaNode> {
        self.overrides.get(name).or_else(|| self.schemas.get(name))
    }
}

/// One property of the combined property map.
#[derive(Clone, Copy, Debug)]
pub struct Property<'a> {
    pub name: &'a str,
    pub node: &'a SchemaNode,
}

/// One leaf-rendering strategy.
///
/// The value synthesizer and the type renderer implement this over the
/// same closed shape set, so the dispatch lives in exactly one place:
/// [`emit_properties`].
pub trait PropertyEmitter {
    fn string(&mut self, ctx: &EmitContext<'_>, property: Property<'_>);
    fn number(&mut self, ctx: &EmitContext<'_>, property: Property<'_>, kind: NumberKind);
    fn boolean(&mut self, ctx: &EmitContext<'_>, property: Property<'_>);
    fn array(
        &mut self,
        ctx: &EmitContext<'_>,
        property: Property<'_>,
        items: Option<ArrayItems<'_>>,
    );
    fn one_of(&mut self, ctx: &EmitContext<'_>, property: Property<'_>, reference: &RefPath);
    fn reference(&mut self, ctx: &EmitContext<'_>, property: Property<'_>, reference: &RefPath);
    fn dictionary(
        &mut self,
        ctx: &EmitContext<'_>,
        property: Property<'_>,
        key: Option<&RefPath>,
        value: Option<&SchemaNode>,
    );
    fn untyped(&mut self, ctx: &EmitContext<'_>, property: Property<'_>);
    fn unsupported(&mut self, ctx: &EmitContext<'_>, property: Property<'_>, ty: Ty);
}

/// Walks a combined property map in declaration order, classifying each
/// property once and handing it to the strategy.
pub fn emit_properties(
    ctx: &EmitContext<'_>,
    properties: &IndexMap<String, SchemaNode>,
    emitter: &mut impl PropertyEmitter,
) {
    for (name, node) in properties {
        let property = Property { name, node };
        match classify(node) {
            PropertyShape::String => emitter.string(ctx, property),
            PropertyShape::Number(kind) => emitter.number(ctx, property, kind),
            PropertyShape::Boolean => emitter.boolean(ctx, property),
            PropertyShape::Array(items) => emitter.array(ctx, property, items),
            PropertyShape::Dictionary { key, value } => {
                emitter.dictionary(ctx, property, key, value);
            }
            PropertyShape::OneOf(reference) => emitter.one_of(ctx, property, reference),
            PropertyShape::Ref(reference) => emitter.reference(ctx, property, reference),
            PropertyShape::Untyped => emitter.untyped(ctx, property),
            PropertyShape::Unsupported(ty) => emitter.unsupported(ctx, property, ty),
        }
    }
}
