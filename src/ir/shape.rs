use crate::parse::{AdditionalProperties, RefPath, SchemaNode, Ty};

/// The closed set of property shapes both renderer families dispatch over.
///
/// Produced by [`classify`] after property combination, so the value
/// synthesizer and the type renderer never repeat field-presence checks.
#[derive(Clone, Copy, Debug)]
pub enum PropertyShape<'a> {
    String,
    Number(NumberKind),
    Boolean,
    /// `None` items means the property declared `type: array` with no
    /// items shape; nothing can be said about it.
    Array(Option<ArrayItems<'a>>),
    /// Enum-keyed dictionary: `x-dictionaryKey` paired with a value shape.
    /// `key` is `None` when the marker lacks a `$ref`; `value` is `None`
    /// when `additionalProperties` is a bare boolean.
    Dictionary {
        key: Option<&'a RefPath>,
        value: Option<&'a SchemaNode>,
    },
    /// The single-`$ref` "nullable reference" idiom.
    OneOf(&'a RefPath),
    Ref(&'a RefPath),
    /// No `type`, `$ref`, or `oneOf`: a genuinely free-form field.
    Untyped,
    /// A declared type outside the dispatchable set (a plain nested
    /// object, or `null`).
    Unsupported(Ty),
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum NumberKind {
    Integer,
    Double,
}

#[derive(Clone, Copy, Debug)]
pub enum ArrayItems<'a> {
    Ref(&'a RefPath),
    /// Items wrapped in the single-`$ref` `oneOf` idiom.
    OneOf(&'a RefPath),
    Number(NumberKind),
    /// Plain string items, or anything unrecognized.
    Other(&'a SchemaNode),
}

/// Classifies one property into the closed shape set.
///
/// Dictionary markers are checked first: when `x-dictionaryKey` and
/// `additionalProperties` are both present, dictionary dispatch wins over
/// any colliding `oneOf` (see DESIGN.md).
pub fn classify(property: &SchemaNode) -> PropertyShape<'_> {
    if property.dictionary_key.is_some() && property.additional_properties.is_some() {
        return PropertyShape::Dictionary {
            key: property
                .dictionary_key
                .as_deref()
                .and_then(|key| key.reference.as_ref()),
            value: property
                .additional_properties
                .as_ref()
                .and_then(AdditionalProperties::as_schema),
        };
    }
    match property.ty {
        Some(Ty::String) => return PropertyShape::String,
        Some(Ty::Integer) => return PropertyShape::Number(NumberKind::Integer),
        Some(Ty::Number) => return PropertyShape::Number(NumberKind::Double),
        Some(Ty::Boolean) => return PropertyShape::Boolean,
        Some(Ty::Array) => {
            return PropertyShape::Array(property.items.as_deref().map(classify_items));
        }
        Some(ty @ (Ty::Object | Ty::Null)) => return PropertyShape::Unsupported(ty),
        None => {}
    }
    if let Some(reference) = single_one_of_ref(property) {
        return PropertyShape::OneOf(reference);
    }
    if let Some(reference) = &property.reference {
        return PropertyShape::Ref(reference);
    }
    PropertyShape::Untyped
}

fn classify_items(items: &SchemaNode) -> ArrayItems<'_> {
    if let Some(reference) = &items.reference {
        return ArrayItems::Ref(reference);
    }
    if let Some(reference) = single_one_of_ref(items) {
        return ArrayItems::OneOf(reference);
    }
    match items.ty {
        Some(Ty::Integer) => ArrayItems::Number(NumberKind::Integer),
        Some(Ty::Number) => ArrayItems::Number(NumberKind::Double),
        _ => ArrayItems::Other(items),
    }
}

fn single_one_of_ref(node: &SchemaNode) -> Option<&RefPath> {
    node.one_of
        .as_ref()?
        .first()?
        .reference
        .as_ref()
}
