use itertools::Itertools;

use crate::codegen::naming::type_name;
use crate::codegen::walk::{EmitContext, Property, PropertyEmitter, emit_properties};
use crate::error::UnsupportedVersionError;
use crate::ir::{ArrayItems, NumberKind, direct_interfaces, own_layer};
use crate::parse::{Document, OverrideSchemas, RefPath, SchemaMap, SchemaNode, Ty};

/// Renders the type-declaration source for a whole document: one
/// interface per object schema, one literal union per enum schema, a
/// placeholder comment for anything else.
pub fn generate_types(
    doc: &Document,
    overrides: &OverrideSchemas,
) -> Result<String, UnsupportedVersionError> {
    let schemas = doc.schemas()?;
    let v2 = doc.is_v2();
    let mut out = String::new();
    for (name, schema) in schemas {
        let rendered = if schema.ty == Some(Ty::Object) || schema.all_of.is_some() {
            tracing::debug!(schema = %name, "generating interface");
            Some(render_interface(
                type_name(name, v2),
                schema,
                schemas,
                overrides,
            ))
        } else if schema.ty == Some(Ty::String) && schema.enum_values().is_some() {
            let effective = overrides.get(name).unwrap_or(schema);
            render_enum(type_name(name, v2), effective)
        } else {
            None
        };
        match rendered {
            Some(fragment) => out.push_str(&fragment),
            None => out.push_str(&format!("// TODO: ERROR! Something wrong with {name} \n")),
        }
    }
    out.push_str(" \n");
    Ok(out)
}

/// Renders one object schema as a TypeScript interface.
///
/// Composite schemas extend their direct ancestors and declare only their
/// own property layer; inherited properties arrive through `extends`.
pub fn render_interface(
    type_name: &str,
    schema: &SchemaNode,
    schemas: &SchemaMap,
    overrides: &OverrideSchemas,
) -> String {
    let own = own_layer(schema);
    let extends = match direct_interfaces(schema) {
        Some(names) => format!(" extends {} ", names.iter().join(", ")),
        None => " ".to_owned(),
    };

    let mut emitter = DeclEmitter::default();
    emitter.out.push_str(&format!(
        "{}export interface {type_name}{extends}{{\n",
        doc_comment(
            own.description
                .as_deref()
                .or(schema.description.as_deref()),
        ),
    ));

    let ctx = EmitContext {
        schema_name: type_name,
        schemas,
        overrides,
    };
    if let Some(properties) = &own.properties {
        emit_properties(&ctx, properties, &mut emitter);
    }

    emitter.out.push_str("}\n");
    emitter.out
}

/// Renders one enum schema as a literal union type, preserving declared
/// order. Returns `None` when there are no values to render.
pub fn render_enum(type_name: &str, schema: &SchemaNode) -> Option<String> {
    let values = schema.enum_values()?;
    let union = values.iter().map(|value| format!("'{value}'")).join(" | ");
    Some(format!(
        "{}export type {type_name} = {union};\n",
        doc_comment(schema.description.as_deref()),
    ))
}

/// The type-text strategy: the parallel sibling of the value synthesizer,
/// emitting a TypeScript type fragment per property instead of a value.
#[derive(Debug, Default)]
struct DeclEmitter {
    out: String,
}

impl DeclEmitter {
    fn line(&mut self, property: Property<'_>, ty: &str) {
        let optional = if property.node.nullable { "?" } else { "" };
        let comment = constraint_comment(property.node)
            .map(|comment| format!(" // {comment}"))
            .unwrap_or_default();
        self.out.push_str(&format!(
            "{}    {}{optional}: {ty};{comment}\n",
            doc_comment(property.node.description.as_deref()),
            property.name,
        ));
    }
}

impl PropertyEmitter for DeclEmitter {
    fn string(&mut self, _ctx: &EmitContext<'_>, property: Property<'_>) {
        self.line(property, "string");
    }

    fn number(&mut self, _ctx: &EmitContext<'_>, property: Property<'_>, _kind: NumberKind) {
        self.line(property, "number");
    }

    fn boolean(&mut self, _ctx: &EmitContext<'_>, property: Property<'_>) {
        self.line(property, "boolean");
    }

    fn array(
        &mut self,
        _ctx: &EmitContext<'_>,
        property: Property<'_>,
        items: Option<ArrayItems<'_>>,
    ) {
        let Some(items) = items else {
            return;
        };
        let element = match items {
            ArrayItems::Ref(reference) | ArrayItems::OneOf(reference) => {
                reference.name().to_owned()
            }
            ArrayItems::Number(_) => "number".to_owned(),
            ArrayItems::Other(node) => match node.ty {
                Some(Ty::String) => "string".to_owned(),
                Some(Ty::Boolean) => "boolean".to_owned(),
                _ => "any".to_owned(),
            },
        };
        self.line(property, &format!("{element}[]"));
    }

    fn one_of(&mut self, _ctx: &EmitContext<'_>, property: Property<'_>, reference: &RefPath) {
        self.line(property, reference.name());
    }

    fn reference(&mut self, _ctx: &EmitContext<'_>, property: Property<'_>, reference: &RefPath) {
        self.line(property, reference.name());
    }

    fn dictionary(
        &mut self,
        _ctx: &EmitContext<'_>,
        property: Property<'_>,
        key: Option<&RefPath>,
        value: Option<&SchemaNode>,
    ) {
        const WRONG: &str = " \"// TODO: Something is wrong\" ";

        let Some(key) = key else {
            self.out.push_str(WRONG);
            return;
        };
        let Some(node) = value else {
            self.out.push_str(WRONG);
            return;
        };

        let value_ty = if let Some(reference) = &node.reference {
            reference.name().to_owned()
        } else {
            match node.ty {
                Some(Ty::Boolean) => "boolean".to_owned(),
                Some(Ty::Integer | Ty::Number) => "number".to_owned(),
                Some(Ty::String) => "string".to_owned(),
                Some(Ty::Array) => match node
                    .items
                    .as_deref()
                    .and_then(|items| items.reference.as_ref())
                {
                    Some(reference) => format!("{}[]", reference.name()),
                    None => WRONG.to_owned(),
                },
                Some(other) => {
                    format!(" \"// TODO: Something is wrong, type {other} is not supported\" ")
                }
                None => WRONG.to_owned(),
            }
        };

        let optional = if property.node.nullable { "?" } else { "" };
        self.out.push_str(&format!(
            "{}    {}{optional}: {{\n[key in {}]: {value_ty}; \n }}; \n",
            doc_comment(property.node.description.as_deref()),
            property.name,
            key.name(),
        ));
    }

    fn untyped(&mut self, _ctx: &EmitContext<'_>, property: Property<'_>) {
        self.line(property, "any");
    }

    fn unsupported(&mut self, _ctx: &EmitContext<'_>, property: Property<'_>, ty: Ty) {
        let optional = if property.node.nullable { "?" } else { "" };
        self.out.push_str(&format!(
            "{}    {}{optional}: any; // TODO: type {ty} is not supported\n",
            doc_comment(property.node.description.as_deref()),
            property.name,
        ));
    }
}

/// A `/** … */` block, applied identically at the interface level and the
/// per-property level; empty descriptions render nothing.
fn doc_comment(description: Option<&str>) -> String {
    match description {
        Some(description) if !description.is_empty() => {
            format!("/**\n * {description} \n */\n")
        }
        _ => String::new(),
    }
}

/// The trailing inline comment listing present constraint fields, joined
/// with `; ` in a fixed field order; `None` when no constraints are
/// present.
fn constraint_comment(node: &SchemaNode) -> Option<String> {
    let mut parts = Vec::new();
    if let Some(format) = &node.format {
        parts.push(format!("format: \"{format}\""));
    }
    if let Some(value) = node.min_length {
        parts.push(format!("minLength: {value}"));
    }
    if let Some(value) = node.max_length {
        parts.push(format!("maxLength: {value}"));
    }
    if let Some(value) = node.minimum {
        parts.push(format!("minimum: {value}"));
    }
    if let Some(value) = node.maximum {
        parts.push(format!("maximum: {value}"));
    }
    if let Some(value) = node.exclusive_minimum {
        parts.push(format!("exclusiveMinimum: {value}"));
    }
    if let Some(value) = node.exclusive_maximum {
        parts.push(format!("exclusiveMaximum: {value}"));
    }
    if let Some(value) = node.min_items {
        parts.push(format!("minItems: {value}"));
    }
    if let Some(value) = node.max_items {
        parts.push(format!("maxItems: {value}"));
    }
    if let Some(value) = node.unique_items {
        parts.push(format!("uniqueItems: {value}"));
    }
    (!parts.is_empty()).then(|| parts.join("; "))
}

#[cfg(test)]
mod tests {
    use super::*;

    use indoc::indoc;
    use pretty_assertions::assert_eq;

    fn parse(json: &str) -> Document {
        Document::from_yaml(json).unwrap()
    }

    fn types(doc: &Document) -> String {
        generate_types(doc, &OverrideSchemas::default()).unwrap()
    }

    #[test]
    fn test_string_property_with_constraints() {
        let doc = parse(indoc! {r##"
            {
              "openapi": "3.0.0",
              "components": {
                "schemas": {
                  "CreateBriefDto": {
                    "type": "object",
                    "properties": {
                      "title": { "type": "string", "minLength": 1, "maxLength": 255 },
                      "note": { "type": "string", "nullable": true }
                    }
                  }
                }
              }
            }
        "##});

        let rendered = types(&doc);
        let expected = indoc! {"
            export interface CreateBriefDto {
                title: string; // minLength: 1; maxLength: 255
                note?: string;
            }
        "};
        assert_eq!(rendered.strip_suffix(" \n").unwrap(), expected);
    }

    #[test]
    fn test_number_property_with_range_comment() {
        let doc = parse(indoc! {r##"
            {
              "openapi": "3.0.0",
              "components": {
                "schemas": {
                  "ServiceTypeDto": {
                    "type": "object",
                    "properties": {
                      "price": {
                        "type": "number",
                        "format": "decimal",
                        "minimum": 0,
                        "maximum": 100
                      },
                      "count": { "type": "integer" }
                    }
                  }
                }
              }
            }
        "##});

        let rendered = types(&doc);
        assert!(
            rendered
                .contains("    price: number; // format: \"decimal\"; minimum: 0; maximum: 100\n")
        );
        assert!(rendered.contains("    count: number;\n"));
    }

    #[test]
    fn test_extends_clause_lists_direct_ancestors() {
        let doc = parse(indoc! {r##"
            {
              "openapi": "3.0.0",
              "components": {
                "schemas": {
                  "ServiceTypeBasicDto": {
                    "type": "object",
                    "properties": { "code": { "type": "string" } }
                  },
                  "ServiceTypeDto": {
                    "allOf": [
                      { "$ref": "#/components/schemas/ServiceTypeBasicDto" },
                      {
                        "type": "object",
                        "properties": {
                          "priceRanges": {
                            "type": "array",
                            "nullable": true,
                            "items": { "$ref": "#/components/schemas/PriceRangeDto" }
                          }
                        }
                      }
                    ]
                  }
                }
              }
            }
        "##});

        let rendered = types(&doc);
        assert!(rendered.contains("export interface ServiceTypeBasicDto {\n"));
        assert!(
            rendered.contains("export interface ServiceTypeDto extends ServiceTypeBasicDto {\n")
        );
        // Only the own layer is declared; `code` arrives via extends.
        assert!(rendered.contains("    priceRanges?: PriceRangeDto[];\n"));
        let own_section = rendered.split("ServiceTypeDto extends").nth(1).unwrap();
        assert!(!own_section.contains("code"));
    }

    #[test]
    fn test_enum_renders_as_literal_union_with_description() {
        let doc = parse(indoc! {r##"
            {
              "openapi": "3.0.0",
              "components": {
                "schemas": {
                  "PriceTier": {
                    "type": "string",
                    "description": "Subscription tier.",
                    "x-enumNames": ["Community", "Bronze", "Silver"],
                    "enum": ["Community", "Bronze", "Silver"]
                  }
                }
              }
            }
        "##});

        let rendered = types(&doc);
        // The doc block keeps a trailing space after the description.
        let expected = "/**\n * Subscription tier. \n */\n\
                        export type PriceTier = 'Community' | 'Bronze' | 'Silver';\n";
        assert_eq!(rendered.strip_suffix(" \n").unwrap(), expected);
    }

    #[test]
    fn test_enum_override_replaces_values_and_description() {
        let doc = parse(indoc! {r##"
            {
              "openapi": "3.0.0",
              "components": {
                "schemas": {
                  "UserRole": {
                    "type": "string",
                    "description": "Machine role.",
                    "enum": ["ROLE_OWNER", "ROLE_VIEWER"]
                  }
                }
              }
            }
        "##});
        let overrides: OverrideSchemas = serde_json::from_str(
            r##"[{ "UserRole": { "type": "string", "description": "Project role.", "enum": ["owner", "viewer"] } }]"##,
        )
        .unwrap();

        let rendered = generate_types(&doc, &overrides).unwrap();
        assert!(rendered.contains("export type UserRole = 'owner' | 'viewer';"));
        assert!(rendered.contains(" * Project role. "));
        assert!(!rendered.contains("ROLE_OWNER"));
    }

    #[test]
    fn test_ref_and_one_of_properties_use_the_type_name() {
        let doc = parse(indoc! {r##"
            {
              "openapi": "3.0.0",
              "components": {
                "schemas": {
                  "BriefDto": {
                    "type": "object",
                    "properties": {
                      "briefType": { "$ref": "#/components/schemas/BriefType" },
                      "serviceType": {
                        "nullable": true,
                        "oneOf": [{ "$ref": "#/components/schemas/ServiceTypeBasicDto" }]
                      }
                    }
                  }
                }
              }
            }
        "##});

        let rendered = types(&doc);
        assert!(rendered.contains("    briefType: BriefType;\n"));
        assert!(rendered.contains("    serviceType?: ServiceTypeBasicDto;\n"));
    }

    #[test]
    fn test_array_variants() {
        let doc = parse(indoc! {r##"
            {
              "openapi": "3.0.0",
              "components": {
                "schemas": {
                  "Mixed": {
                    "type": "object",
                    "properties": {
                      "refs": {
                        "type": "array",
                        "items": { "$ref": "#/components/schemas/AssetDto" }
                      },
                      "tiers": {
                        "type": "array",
                        "nullable": true,
                        "items": {
                          "oneOf": [{ "$ref": "#/components/schemas/PriceTier" }]
                        }
                      },
                      "words": {
                        "type": "array",
                        "maxItems": 5,
                        "items": { "type": "string" }
                      },
                      "scores": {
                        "type": "array",
                        "items": { "type": "integer", "format": "int64" }
                      }
                    }
                  }
                }
              }
            }
        "##});

        let rendered = types(&doc);
        assert!(rendered.contains("    refs: AssetDto[];\n"));
        assert!(rendered.contains("    tiers?: PriceTier[];\n"));
        assert!(rendered.contains("    words: string[]; // maxItems: 5\n"));
        assert!(rendered.contains("    scores: number[];\n"));
    }

    #[test]
    fn test_dictionary_renders_a_mapped_type() {
        let doc = parse(indoc! {r##"
            {
              "openapi": "3.0.0",
              "components": {
                "schemas": {
                  "ServiceOfferKind": {
                    "type": "string",
                    "enum": ["Mastering", "Distribution"]
                  },
                  "UserMetadata": {
                    "type": "object",
                    "properties": {
                      "serviceOffers": {
                        "type": "object",
                        "nullable": true,
                        "x-dictionaryKey": { "$ref": "#/components/schemas/ServiceOfferKind" },
                        "additionalProperties": { "$ref": "#/components/schemas/BillingProviderKind" }
                      },
                      "permissions": {
                        "type": "object",
                        "x-dictionaryKey": { "$ref": "#/components/schemas/ServiceOfferKind" },
                        "additionalProperties": { "type": "boolean" }
                      },
                      "history": {
                        "type": "object",
                        "x-dictionaryKey": { "$ref": "#/components/schemas/ServiceOfferKind" },
                        "additionalProperties": {
                          "type": "array",
                          "items": { "$ref": "#/components/schemas/EventDto" }
                        }
                      }
                    }
                  }
                }
              }
            }
        "##});

        let rendered = types(&doc);
        assert!(rendered.contains(
            "    serviceOffers?: {\n[key in ServiceOfferKind]: BillingProviderKind; \n }; \n"
        ));
        assert!(
            rendered.contains("    permissions: {\n[key in ServiceOfferKind]: boolean; \n }; \n")
        );
        assert!(
            rendered.contains("    history: {\n[key in ServiceOfferKind]: EventDto[]; \n }; \n")
        );
    }

    #[test]
    fn test_untyped_property_renders_any() {
        let doc = parse(indoc! {r##"
            {
              "openapi": "3.0.0",
              "components": {
                "schemas": {
                  "Notification": {
                    "type": "object",
                    "properties": { "payload": { "nullable": true } }
                  }
                }
              }
            }
        "##});

        assert!(types(&doc).contains("    payload?: any;\n"));
    }

    #[test]
    fn test_property_description_becomes_a_doc_block() {
        let doc = parse(indoc! {r##"
            {
              "openapi": "3.0.0",
              "components": {
                "schemas": {
                  "AssetDto": {
                    "type": "object",
                    "description": "A stored asset.",
                    "properties": {
                      "name": { "type": "string", "description": "Display name." }
                    }
                  }
                }
              }
            }
        "##});

        let expected = "/**\n * A stored asset. \n */\n\
                        export interface AssetDto {\n\
                        /**\n * Display name. \n */\n    \
                        name: string;\n\
                        }\n";
        assert_eq!(types(&doc).strip_suffix(" \n").unwrap(), expected);
    }

    #[test]
    fn test_v2_bracketed_schema_key_is_truncated() {
        let doc = parse(indoc! {r##"
            {
              "swagger": "2.0",
              "definitions": {
                "ContentDto[AssetDto]": {
                  "type": "object",
                  "properties": { "total": { "type": "integer" } }
                }
              }
            }
        "##});

        let rendered = types(&doc);
        assert!(rendered.contains("export interface ContentDto {\n"));
        assert!(!rendered.contains("ContentDto[AssetDto]"));
    }

    #[test]
    fn test_unsupported_schema_degrades_to_a_placeholder_comment() {
        let doc = parse(indoc! {r##"
            {
              "openapi": "3.0.0",
              "components": {
                "schemas": {
                  "Count": { "type": "integer" }
                }
              }
            }
        "##});

        assert_eq!(types(&doc), "// TODO: ERROR! Something wrong with Count \n \n");
    }
}
