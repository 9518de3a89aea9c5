//! Naming helpers shared by the converter.

use std::collections::HashSet;
use std::sync::LazyLock;

use indexmap::IndexMap;
use regex::Regex;
use serde_json::Value;

/// Local component schema reference prefix.
pub const SCHEMA_REF_PREFIX: &str = "#/components/schemas/";

/// Runs of characters that cannot appear in an enum member name.
///
/// Letters and decimal digits of any script are kept.
#[allow(clippy::expect_used)]
static NON_ALNUM_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^\p{Alphabetic}\p{Nd}]+").expect("valid pattern"));

/// Runs of characters that cannot appear in a synthesized operation id.
#[allow(clippy::expect_used)]
static NON_IDENT_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^A-Za-z0-9_]+").expect("valid pattern"));

/// Component name targeted by a local schema `$ref`, JSON-pointer unescaped.
///
/// Returns `None` for external refs and refs into other component kinds.
pub fn ref_to_schema_name(reference: &str) -> Option<String> {
    let name = reference.strip_prefix(SCHEMA_REF_PREFIX)?;
    if name.is_empty() || name.contains('/') {
        return None;
    }
    Some(name.replace("~1", "/").replace("~0", "~"))
}

/// Upper-case identifier for one enum literal, before collision handling.
pub fn enum_member_name(value: &Value, index: usize) -> String {
    let raw = match value {
        Value::String(text) => text.clone(),
        Value::Number(number) => number.to_string(),
        Value::Bool(true) => "TRUE".to_string(),
        Value::Bool(false) => "FALSE".to_string(),
        Value::Null | Value::Array(_) | Value::Object(_) => String::new(),
    };
    let name = NON_ALNUM_RUN
        .replace_all(&raw, "_")
        .trim_matches('_')
        .to_uppercase();

    if name.is_empty() {
        format!("VALUE_{index}")
    } else if name.starts_with(char::is_numeric) {
        format!("VALUE_{name}")
    } else {
        name
    }
}

/// Member names for a whole enum, unique within it and in literal order.
///
/// A colliding name gets `_<index>` appended, with the index increasing
/// until the result is free.
pub fn enum_member_names(values: &[Value]) -> Vec<String> {
    let mut taken = HashSet::new();
    values
        .iter()
        .enumerate()
        .map(|(index, value)| {
            let base = enum_member_name(value, index);
            let mut name = base.clone();
            let mut suffix = index;
            while taken.contains(&name) {
                name = format!("{base}_{suffix}");
                suffix += 1;
            }
            taken.insert(name.clone());
            name
        })
        .collect()
}

/// `<prefix>_<method>_<path>` id for operations that declare none.
pub fn synthesize_operation_id(prefix: &str, method: &str, path: &str) -> String {
    let id = format!("{prefix}_{method}_{}", normalize_path(path));
    id.to_lowercase().trim_matches('_').to_string()
}

/// Path or webhook name reduced to identifier characters.
fn normalize_path(path: &str) -> String {
    let stripped = match path.strip_prefix("#/") {
        Some(pointer) => pointer.rsplit('/').next().unwrap_or(pointer),
        None => path,
    };
    let without_braces: String = stripped.chars().filter(|c| !matches!(c, '{' | '}')).collect();
    NON_IDENT_RUN
        .replace_all(&without_braces, "_")
        .trim_matches('_')
        .to_string()
}

/// `application/json` when present, otherwise the first declared entry.
pub fn primary_media_type<V>(content: &IndexMap<String, V>) -> Option<(&String, &V)> {
    content
        .get_key_value("application/json")
        .or_else(|| content.first())
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_ref_to_schema_name() {
        assert_eq!(
            ref_to_schema_name("#/components/schemas/Pet").as_deref(),
            Some("Pet")
        );
        assert_eq!(
            ref_to_schema_name("#/components/schemas/a~1b~0c").as_deref(),
            Some("a/b~c")
        );
        assert_eq!(ref_to_schema_name("#/components/responses/Pet"), None);
        assert_eq!(ref_to_schema_name("other.json#/components/schemas/Pet"), None);
        assert_eq!(ref_to_schema_name("#/components/schemas/Pet/properties/id"), None);
    }

    #[test]
    fn test_enum_member_name() {
        assert_eq!(enum_member_name(&json!("active"), 0), "ACTIVE");
        assert_eq!(enum_member_name(&json!("inactive-1"), 1), "INACTIVE_1");
        assert_eq!(enum_member_name(&json!("  --  "), 2), "VALUE_2");
        assert_eq!(enum_member_name(&json!("1st"), 0), "VALUE_1ST");
        assert_eq!(enum_member_name(&json!(42), 0), "VALUE_42");
        assert_eq!(enum_member_name(&json!(-1.5), 0), "VALUE_1_5");
        assert_eq!(enum_member_name(&json!(true), 0), "TRUE");
    }

    #[test]
    fn test_enum_member_name_keeps_non_ascii_letters() {
        assert_eq!(enum_member_name(&json!("café"), 0), "CAFÉ");
        assert_eq!(enum_member_name(&json!("ñandú"), 0), "ÑANDÚ");
        assert_eq!(enum_member_name(&json!("über-cool"), 0), "ÜBER_COOL");
        assert_eq!(enum_member_name(&json!("東京"), 0), "東京");
        assert_eq!(enum_member_name(&json!("٣ items"), 0), "VALUE_٣_ITEMS");
    }

    #[test]
    fn test_enum_member_names_resolve_collisions() {
        let names = enum_member_names(&[json!("a-b"), json!("a_b"), json!("A B"), json!("")]);
        assert_eq!(names, vec!["A_B", "A_B_1", "A_B_2", "VALUE_3"]);
    }

    #[test]
    fn test_synthesize_operation_id() {
        assert_eq!(synthesize_operation_id("op", "get", "/pets/{id}"), "op_get_pets_id");
        assert_eq!(
            synthesize_operation_id("op", "post", "/v1/users/{user-id}/items.json"),
            "op_post_v1_users_user_id_items_json"
        );
        assert_eq!(synthesize_operation_id("op", "get", "/"), "op_get");
        assert_eq!(synthesize_operation_id("webhook", "post", "newPet"), "webhook_post_newpet");
        assert_eq!(
            synthesize_operation_id("webhook", "post", "#/components/pathItems/Ping"),
            "webhook_post_ping"
        );
    }

    #[test]
    fn test_primary_media_type() {
        let mut content = IndexMap::new();
        content.insert("text/plain".to_string(), 1);
        content.insert("application/json".to_string(), 2);
        assert_eq!(primary_media_type(&content).map(|(k, _)| k.as_str()), Some("application/json"));

        content.shift_remove("application/json");
        assert_eq!(primary_media_type(&content).map(|(_, v)| *v), Some(1));

        let empty: IndexMap<String, i32> = IndexMap::new();
        assert!(primary_media_type(&empty).is_none());
    }
}
