use itertools::Itertools;

use crate::parse::SchemaMap;

/// Picks the indefinite article by the first letter alone.
///
/// Deliberately crude ("an user", "a hour"); kept for compatibility with
/// the factory names existing consumers already import.
pub fn article(word: &str) -> &'static str {
    match word.chars().next().map(|c| c.to_ascii_lowercase()) {
        Some('a' | 'e' | 'i' | 'o' | 'u' | 'y') => "an",
        _ => "a",
    }
}

/// The factory function name for a schema: `aPetDtoAPI`, `anAssetDtoAPI`.
pub fn factory_name(type_name: &str) -> String {
    format!("{}{type_name}API", article(type_name))
}

/// Swagger v2 schema keys sometimes read `SomeDto[AnotherDto]`; the
/// rendered type name stops at the first bracket.
pub fn type_name(schema_name: &str, v2: bool) -> &str {
    if v2 && schema_name.contains('[') && schema_name.contains(']') {
        schema_name.split('[').next().unwrap_or(schema_name)
    } else {
        schema_name
    }
}

/// The import list for the mocks artifact, in declaration order.
pub fn import_list(schemas: &SchemaMap) -> String {
    schemas.keys().join(", ")
}
