use crate::codegen::entropy::MockRng;
use crate::codegen::naming::{factory_name, import_list};
use crate::codegen::walk::{EmitContext, Property, PropertyEmitter, emit_properties};
use crate::error::UnsupportedVersionError;
use crate::ir::{ArrayItems, NumberKind, combine_properties, own_layer, resolve_interfaces};
use crate::parse::{Document, OverrideSchemas, RefPath, SchemaMap, SchemaNode, Ty};

/// Renders the mock-factory source for a whole document: the lint
/// preamble, one import of every generated type name, and one factory per
/// object schema.
pub fn generate_mocks(
    doc: &Document,
    overrides: &OverrideSchemas,
    types_path: &str,
) -> Result<String, UnsupportedVersionError> {
    let schemas = doc.schemas()?;
    let body = render_mocks(doc, overrides)?;
    Ok(format!(
        "/* eslint-disable @typescript-eslint/no-use-before-define */\n\
         /* eslint-disable @typescript-eslint/no-unused-vars */\n\
         import {{{}}} from '{types_path}';\n{body}",
        import_list(schemas),
    ))
}

/// Renders every schema's factory in declaration order. One schema's
/// failure never aborts the run; it degrades to a placeholder comment
/// naming the schema.
pub fn render_mocks(
    doc: &Document,
    overrides: &OverrideSchemas,
) -> Result<String, UnsupportedVersionError> {
    let schemas = doc.schemas()?;
    let mut out = String::new();
    for (name, schema) in schemas {
        if schema.ty == Some(Ty::Object) || schema.all_of.is_some() {
            tracing::debug!(schema = %name, "generating mock factory");
            out.push_str(&render_factory(name, schema, schemas, overrides));
        } else if schema.ty == Some(Ty::String) && schema.enum_values().is_some() {
            // Enums get no factory; consumers reference their first value
            // through the properties that point at them.
        } else {
            out.push_str(&format!("// TODO: ERROR! Something wrong with {name} \n"));
        }
    }
    out.push_str(" \n");
    Ok(out)
}

/// Renders one schema's mock factory, resolving multi-level inheritance
/// first so the factory carries every inherited property.
pub fn render_factory(
    schema_name: &str,
    schema: &SchemaNode,
    schemas: &SchemaMap,
    overrides: &OverrideSchemas,
) -> String {
    let interfaces = resolve_interfaces(schema_name, schema, schemas);
    let properties = combine_properties(own_layer(schema), schemas, interfaces.as_deref());
    let ctx = EmitContext {
        schema_name,
        schemas,
        overrides,
    };
    let mut emitter = ValueEmitter::default();
    emit_properties(&ctx, &properties, &mut emitter);

    let body = emitter.lines.join("\n");
    let name = factory_name(schema_name);
    format!(
        "\nexport const {name} = (overrides?: Partial<{schema_name}>): {schema_name} => {{\n  \
         return {{\n  {body}\n  ...overrides,\n  }};\n}};\n"
    )
}

/// The value-synthesis strategy: one literal representative value per
/// property. Every branch that cannot confidently produce a value emits a
/// visible placeholder instead of failing, so generation always completes.
#[derive(Debug, Default)]
struct ValueEmitter {
    lines: Vec<String>,
}

impl ValueEmitter {
    fn push(&mut self, property_name: &str, value: &str) {
        self.lines.push(format!("  {property_name}: {value},"));
    }

    /// A `overrides?.x || …` expression: the caller-supplied override for
    /// this property wins over the constructed default.
    fn push_own_prop(&mut self, property_name: &str, expression: &str) {
        self.push(
            property_name,
            &format!("overrides?.{property_name} || {expression}"),
        );
    }
}

impl PropertyEmitter for ValueEmitter {
    fn string(&mut self, ctx: &EmitContext<'_>, property: Property<'_>) {
        let value = string_value(
            ctx.schema_name,
            property.name,
            property.node.format.as_deref(),
        );
        self.push(property.name, &value);
    }

    fn number(&mut self, ctx: &EmitContext<'_>, property: Property<'_>, kind: NumberKind) {
        let mut rng = MockRng::for_property(ctx.schema_name, property.name);
        let value = match kind {
            NumberKind::Integer => rng
                .integer(property.node.minimum, property.node.maximum)
                .to_string(),
            NumberKind::Double => rng
                .double(property.node.minimum, property.node.maximum)
                .to_string(),
        };
        self.push(property.name, &value);
    }

    fn boolean(&mut self, _ctx: &EmitContext<'_>, property: Property<'_>) {
        // Deliberately not randomized.
        self.push(property.name, "true");
    }

    fn array(
        &mut self,
        ctx: &EmitContext<'_>,
        property: Property<'_>,
        items: Option<ArrayItems<'_>>,
    ) {
        let Some(items) = items else {
            return;
        };
        match items {
            ArrayItems::Ref(reference) => {
                let name = reference.name();
                match ctx.lookup(name) {
                    Some(schema) if schema.first_enum_value().is_some() => {
                        let first = schema.first_enum_value().unwrap_or_default();
                        self.push(property.name, &format!("['{first}']"));
                    }
                    found => {
                        if found.is_none() {
                            tracing::warn!(
                                property = property.name,
                                reference = reference.as_str(),
                                "array items reference an unknown schema",
                            );
                        }
                        let expression = format!("[{}()]", factory_name(name));
                        self.push_own_prop(property.name, &expression);
                    }
                }
            }
            ArrayItems::OneOf(reference) => {
                let name = reference.name();
                match ctx.lookup(name).and_then(SchemaNode::first_enum_value) {
                    Some(first) => self.push(property.name, &format!("['{first}']")),
                    None => {
                        self.lines
                            .push(format!("  TODO: FIX ERROR in {}: NULL,", property.name));
                    }
                }
            }
            ArrayItems::Number(kind) => {
                let mut rng = MockRng::for_property(ctx.schema_name, property.name);
                let value = match kind {
                    NumberKind::Integer => {
                        format!("[{},{}]", rng.wide_integer(), rng.wide_integer())
                    }
                    NumberKind::Double => {
                        format!("[{},{}]", rng.wide_double(), rng.wide_double())
                    }
                };
                self.push(property.name, &value);
            }
            ArrayItems::Other(_) => {
                let mut rng = MockRng::for_property(ctx.schema_name, property.name);
                self.push(property.name, &format!("['{}']", rng.word()));
            }
        }
    }

    fn one_of(&mut self, ctx: &EmitContext<'_>, property: Property<'_>, reference: &RefPath) {
        let name = reference.name();
        match ctx.lookup(name) {
            Some(schema) if schema.first_enum_value().is_some() => {
                let first = schema.first_enum_value().unwrap_or_default();
                self.push(property.name, &format!("'{first}'"));
            }
            found => {
                if found.is_none() {
                    tracing::warn!(
                        property = property.name,
                        reference = reference.as_str(),
                        "oneOf references an unknown schema",
                    );
                }
                self.push_own_prop(property.name, &format!("{}()", factory_name(name)));
            }
        }
    }

    fn reference(&mut self, ctx: &EmitContext<'_>, property: Property<'_>, reference: &RefPath) {
        let name = reference.name();
        match ctx.lookup(name) {
            Some(schema) if schema.first_enum_value().is_some() => {
                let first = schema.first_enum_value().unwrap_or_default();
                self.push(property.name, &format!("'{first}'"));
            }
            Some(_) => {
                self.push_own_prop(property.name, &format!("{}()", factory_name(name)));
            }
            None => {
                tracing::warn!(
                    property = property.name,
                    reference = reference.as_str(),
                    "property references an unknown schema",
                );
                self.lines.push(format!(
                    "  ERROR in {} ref:{}: NULL,",
                    property.name,
                    reference.as_str(),
                ));
            }
        }
    }

    fn dictionary(
        &mut self,
        ctx: &EmitContext<'_>,
        property: Property<'_>,
        key: Option<&RefPath>,
        value: Option<&SchemaNode>,
    ) {
        let Some(key) = key else {
            self.push(property.name, " // TODO: Wrong dictionary type");
            return;
        };
        let Some(keys) = ctx
            .lookup(key.name())
            .and_then(SchemaNode::enum_values)
            .map(<[String]>::to_vec)
        else {
            tracing::warn!(
                property = property.name,
                reference = key.as_str(),
                "dictionary key is not a known enum schema",
            );
            self.push(property.name, "\" // TODO: Wrong dictionary value\"");
            return;
        };

        let entries = dictionary_entry_values(ctx, property.name, value, keys.len());
        let mut text = String::from("{ ");
        for (key, value) in keys.iter().zip(entries) {
            text.push_str(&format!("\n\"{key}\": {value},"));
        }
        text.push_str("\n}");
        self.push(property.name, &text);
    }

    fn untyped(&mut self, _ctx: &EmitContext<'_>, property: Property<'_>) {
        let value = format!("'{}'", property.name.to_lowercase());
        self.push(property.name, &value);
    }

    fn unsupported(&mut self, _ctx: &EmitContext<'_>, property: Property<'_>, _ty: Ty) {
        self.push(property.name, "TODO: FIX");
    }
}

/// One value expression per dictionary key. The value shape is evaluated
/// once; primitive shapes draw a fresh value from the per-property
/// generator for every key.
fn dictionary_entry_values(
    ctx: &EmitContext<'_>,
    property_name: &str,
    value: Option<&SchemaNode>,
    count: usize,
) -> Vec<String> {
    const WRONG_VALUE: &str = "\" // TODO: Wrong dictionary value\"";

    let Some(node) = value else {
        return vec![WRONG_VALUE.to_owned(); count];
    };

    if let Some(reference) = &node.reference {
        let name = reference.name();
        let entry = match ctx.lookup(name).and_then(SchemaNode::first_enum_value) {
            Some(first) => format!("\"{first}\""),
            None => format!("{}()", factory_name(name)),
        };
        return vec![entry; count];
    }

    let mut rng = MockRng::for_property(ctx.schema_name, property_name);
    match node.ty {
        Some(Ty::Integer) => (0..count)
            .map(|_| rng.integer(Some(0.0), Some(100.0)).to_string())
            .collect(),
        Some(Ty::Number) => (0..count)
            .map(|_| rng.double(Some(0.0), Some(100.0)).to_string())
            .collect(),
        Some(Ty::String) => (0..count).map(|_| format!("'{}'", rng.word())).collect(),
        Some(Ty::Boolean) => vec!["true".to_owned(); count],
        Some(Ty::Array) => {
            let entry = match node.items.as_deref().and_then(|items| items.reference.as_ref()) {
                Some(reference) => {
                    let name = reference.name();
                    match ctx.lookup(name).and_then(SchemaNode::first_enum_value) {
                        Some(first) => format!("['{first}']"),
                        None => format!("[{}()]", factory_name(name)),
                    }
                }
                None => WRONG_VALUE.to_owned(),
            };
            vec![entry; count]
        }
        _ => vec![WRONG_VALUE.to_owned(); count],
    }
}

/// The representative string for one string-typed property.
///
/// The generator is reseeded from the stable per-property hash before any
/// branch consumes it, so the same (schema, property) pair always yields
/// the same value.
fn string_value(schema_name: &str, property_name: &str, format: Option<&str>) -> String {
    let mut rng = MockRng::for_property(schema_name, property_name);
    let Some(format) = format else {
        return format!("'{property_name}-{}'", schema_name.to_lowercase());
    };
    if matches!(format, "guid" | "uuid") || property_name == "id" {
        return format!("'{}'", rng.uuid());
    }
    match format {
        // A frozen reference instant, never wall-clock-derived.
        "date-time" | "time-span" | "duration" => "'2019-06-10T06:20:01.389Z'".to_owned(),
        "date" => "'2019-06-10'".to_owned(),
        "email" => format!("'{}'", rng.email()),
        "uri" => format!("'{}'", rng.url()),
        _ => "TODO: FIX".to_owned(),
    }
}
