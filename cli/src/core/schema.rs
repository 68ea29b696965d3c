//! # Scaffold Schema Option Extraction
//!
//! File: cli/src/core/schema.rs
//!
//! ## Overview
//!
//! Generators describe their options with a JSON Schema. This module turns
//! such a schema into a flat, ordered list of [`OptionDescriptor`]s that the
//! command layer registers as command-line options.
//!
//! Besides the standard keywords, property schemas may carry a few
//! non-standard annotations:
//! - `aliases`: array of alternative option names
//! - `$default`: object describing a smart default (e.g. `{"$source": "argv", "index": 0}`)
//! - `hidden`: boolean, hides the option from help output
//! - `required`: boolean placed on the property itself
//!
//! The per-property `required: true` flag is the only form honored. The
//! standard parent-level `required: [...]` array is not interpreted; the walk
//! logs a warning when it meets one.
//!
//! ## Architecture
//!
//! 1. Parse the text with `serde_json` (`preserve_order`, so object keys keep
//!    their source order). Failure or a non-object root is a `ScaffoldError`.
//! 2. Walk the tree depth-first, post-order, through `properties` and `items`.
//! 3. Every node whose parent keyword is `properties` is decoded into an
//!    `OptionDescriptor`, unless it is nested and only root properties were
//!    requested.
//!
//! ## Examples
//!
//! ```rust
//! let schema = r#"{"properties": {"port": {"type": "number", "default": 8000}}}"#;
//! let options = schema::convert(schema, true)?;
//! assert_eq!(options[0].name, "port");
//! ```
//!
use crate::core::error::ScaffoldError;
use serde::Serialize;
use serde_json::{Map, Value};
use tracing::{debug, trace, warn};

/// A single command-line option derived from a schema property.
#[derive(Serialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct OptionDescriptor {
    /// The property key.
    pub name: String,
    /// Help text; empty when the schema has none.
    pub description: String,
    /// The schema `type` tag (`string`, `boolean`, `number`, ...); empty when absent.
    #[serde(rename = "type")]
    pub kind: String,
    /// Static default. Never a JSON object or `null`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default: Option<Value>,
    /// Smart default descriptor, taken from an object-valued `$default`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub smart_default: Option<Map<String, Value>>,
    pub required: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub aliases: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,
    pub hidden: bool,
}

impl OptionDescriptor {
    /// Decodes one property schema. Absent or mistyped fields fall back to
    /// their defaults; decoding never fails.
    pub fn decode(name: &str, schema: &Map<String, Value>) -> Self {
        let string_field = |key: &str| schema.get(key).and_then(Value::as_str).map(str::to_owned);
        let bool_field = |key: &str| schema.get(key).and_then(Value::as_bool).unwrap_or(false);

        let default = match schema.get("default") {
            None | Some(Value::Null) | Some(Value::Object(_)) => None,
            Some(value) => Some(value.clone()),
        };
        let smart_default = match schema.get("$default") {
            Some(Value::Object(map)) => Some(map.clone()),
            _ => None,
        };
        let aliases = match schema.get("aliases") {
            Some(Value::Array(items)) => Some(
                items
                    .iter()
                    .filter_map(|item| item.as_str().map(str::to_owned))
                    .collect(),
            ),
            _ => None,
        };

        OptionDescriptor {
            name: name.to_owned(),
            description: string_field("description").unwrap_or_default(),
            kind: string_field("type").unwrap_or_default(),
            default,
            smart_default,
            required: bool_field("required"),
            aliases,
            format: string_field("format"),
            hidden: bool_field("hidden"),
        }
    }
}

/// Parses schema text and checks that the root is a JSON object.
pub fn parse_schema(schema_text: &str) -> Result<Map<String, Value>, ScaffoldError> {
    match serde_json::from_str::<Value>(schema_text)? {
        Value::Object(map) => Ok(map),
        _ => Err(ScaffoldError::SchemaNotObject),
    }
}

/// Converts a JSON Schema into the ordered list of options it declares.
///
/// With `only_root_properties` set, properties nested inside other
/// properties or array items are left out. Descriptors appear in post-order:
/// a property's own nested properties come before it.
///
/// # Errors
///
/// `ScaffoldError::SchemaParse` for malformed JSON and
/// `ScaffoldError::SchemaNotObject` when the root is not an object. Nothing
/// else fails.
pub fn convert(
    schema_text: &str,
    only_root_properties: bool,
) -> Result<Vec<OptionDescriptor>, ScaffoldError> {
    let root = parse_schema(schema_text)?;
    let mut options = Vec::new();
    walk(&root, "", None, only_root_properties, &mut options);
    debug!(
        "Extracted {} option(s) from schema (root only: {})",
        options.len(),
        only_root_properties
    );
    Ok(options)
}

/// Where a node sits relative to its parent: the keyword that led to it and,
/// for `properties`, the property key.
struct Parent<'a> {
    keyword: &'a str,
    property: Option<&'a str>,
}

fn walk(
    node: &Map<String, Value>,
    pointer: &str,
    parent: Option<Parent<'_>>,
    only_root_properties: bool,
    options: &mut Vec<OptionDescriptor>,
) {
    if let Some(Value::Object(properties)) = node.get("properties") {
        for (key, child) in properties {
            if let Value::Object(child) = child {
                let child_pointer = format!("{}/properties/{}", pointer, escape_pointer_token(key));
                let parent = Parent {
                    keyword: "properties",
                    property: Some(key.as_str()),
                };
                walk(child, &child_pointer, Some(parent), only_root_properties, options);
            }
        }
    }

    match node.get("items") {
        Some(Value::Object(child)) => {
            let child_pointer = format!("{}/items", pointer);
            let parent = Parent {
                keyword: "items",
                property: None,
            };
            walk(child, &child_pointer, Some(parent), only_root_properties, options);
        }
        Some(Value::Array(children)) => {
            for (index, child) in children.iter().enumerate() {
                if let Value::Object(child) = child {
                    let child_pointer = format!("{}/items/{}", pointer, index);
                    let parent = Parent {
                        keyword: "items",
                        property: None,
                    };
                    walk(child, &child_pointer, Some(parent), only_root_properties, options);
                }
            }
        }
        _ => {}
    }

    if matches!(node.get("required"), Some(Value::Array(_))) {
        warn!(
            "Schema node '{}' uses a 'required' array, which is not supported; mark properties with \"required\": true instead.",
            if pointer.is_empty() { "#" } else { pointer }
        );
    }

    let Some(Parent {
        keyword: "properties",
        property: Some(name),
    }) = parent
    else {
        return;
    };

    if only_root_properties && is_property_nested(pointer) {
        trace!("Skipping nested property at '{}'", pointer);
        return;
    }
    options.push(OptionDescriptor::decode(name, node));
}

/// A property is nested when its pointer crosses more than one
/// `properties`/`items` segment.
fn is_property_nested(pointer: &str) -> bool {
    let mut tokens = pointer.split('/').skip(1);
    let mut depth = 0;
    while let Some(token) = tokens.next() {
        match token {
            "properties" => {
                depth += 1;
                // The property key itself may be named `properties` or `items`.
                tokens.next();
            }
            "items" => depth += 1,
            _ => {}
        }
    }
    depth > 1
}

/// RFC 6901 token escaping.
fn escape_pointer_token(token: &str) -> String {
    token.replace('~', "~0").replace('/', "~1")
}

// --- Unit Tests ---
#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn names(options: &[OptionDescriptor]) -> Vec<&str> {
        options.iter().map(|o| o.name.as_str()).collect()
    }

    #[test]
    fn test_preserves_declaration_order() {
        let schema = r#"{"properties": {"zeta": {}, "alpha": {}, "mid": {}, "beta": {}}}"#;
        for only_root in [true, false] {
            let options = convert(schema, only_root).unwrap();
            assert_eq!(names(&options), ["zeta", "alpha", "mid", "beta"]);
        }
    }

    #[test]
    fn test_nested_properties_filtered_for_root_only() {
        let schema = r#"{
            "properties": {
                "a": {"type": "string"},
                "b": {"type": "object", "properties": {"c": {"type": "number"}}}
            }
        }"#;
        assert_eq!(names(&convert(schema, true).unwrap()), ["a", "b"]);
        // Post-order: `c` is visited before its parent `b`.
        assert_eq!(names(&convert(schema, false).unwrap()), ["a", "c", "b"]);
    }

    #[test]
    fn test_array_items_properties_are_nested() {
        let schema = r#"{
            "properties": {
                "servers": {
                    "type": "array",
                    "items": {"type": "object", "properties": {"host": {"type": "string"}}}
                }
            }
        }"#;
        assert_eq!(names(&convert(schema, true).unwrap()), ["servers"]);
        assert_eq!(names(&convert(schema, false).unwrap()), ["host", "servers"]);
    }

    #[test]
    fn test_root_items_property_counts_once() {
        // `/items/properties/x` has two structural segments, so it is nested.
        let schema = r#"{"items": {"properties": {"x": {}}}}"#;
        assert!(convert(schema, true).unwrap().is_empty());
        assert_eq!(names(&convert(schema, false).unwrap()), ["x"]);
    }

    #[test]
    fn test_tuple_items_are_walked() {
        let schema = r#"{"items": [{"properties": {"first": {}}}, {"properties": {"second": {}}}]}"#;
        assert_eq!(names(&convert(schema, false).unwrap()), ["first", "second"]);
    }

    #[test]
    fn test_object_default_is_dropped() {
        let schema = r#"{"properties": {
            "config": {"default": {"x": 1}},
            "greeting": {"default": "hello"},
            "tags": {"default": ["a", "b"]},
            "nothing": {"default": null},
            "flag": {"default": false}
        }}"#;
        let options = convert(schema, true).unwrap();
        assert_eq!(options[0].default, None);
        assert_eq!(options[1].default, Some(json!("hello")));
        assert_eq!(options[2].default, Some(json!(["a", "b"])));
        assert_eq!(options[3].default, None);
        assert_eq!(options[4].default, Some(json!(false)));
    }

    #[test]
    fn test_smart_default_requires_object() {
        let schema = r#"{"properties": {
            "name": {"$default": {"$source": "argv", "index": 0}},
            "other": {"$default": "literal"},
            "empty": {"$default": null}
        }}"#;
        let options = convert(schema, true).unwrap();
        let expected = json!({"$source": "argv", "index": 0});
        assert_eq!(
            options[0].smart_default.as_ref(),
            expected.as_object()
        );
        assert_eq!(options[1].smart_default, None);
        assert_eq!(options[2].smart_default, None);
    }

    #[test]
    fn test_required_and_hidden_flags() {
        let schema = r#"{"properties": {
            "project": {"required": true, "hidden": true},
            "plain": {},
            "odd": {"required": "yes", "hidden": 1}
        }}"#;
        let options = convert(schema, true).unwrap();
        assert!(options[0].required);
        assert!(options[0].hidden);
        assert!(!options[1].required);
        assert!(!options[1].hidden);
        assert!(!options[2].required);
        assert!(!options[2].hidden);
    }

    #[test]
    fn test_standard_required_array_is_ignored() {
        let schema = r#"{"required": ["project"], "properties": {"project": {"type": "string"}}}"#;
        let options = convert(schema, true).unwrap();
        assert_eq!(options.len(), 1);
        assert!(!options[0].required);
    }

    #[test]
    fn test_aliases_only_from_arrays() {
        let schema = r#"{"properties": {
            "a": {"aliases": ["x", "y"]},
            "b": {"aliases": "x"},
            "c": {"aliases": {"x": true}},
            "d": {"aliases": ["z", 3]}
        }}"#;
        let options = convert(schema, true).unwrap();
        assert_eq!(options[0].aliases, Some(vec!["x".to_string(), "y".to_string()]));
        assert_eq!(options[1].aliases, None);
        assert_eq!(options[2].aliases, None);
        assert_eq!(options[3].aliases, Some(vec!["z".to_string()]));
    }

    #[test]
    fn test_missing_fields_degrade_to_defaults() {
        let schema = r#"{"properties": {"bare": {}, "typed": {"type": ["string", "null"], "description": 5, "format": "path"}}}"#;
        let options = convert(schema, true).unwrap();
        assert_eq!(
            options[0],
            OptionDescriptor {
                name: "bare".into(),
                description: String::new(),
                kind: String::new(),
                default: None,
                smart_default: None,
                required: false,
                aliases: None,
                format: None,
                hidden: false,
            }
        );
        assert_eq!(options[1].kind, "");
        assert_eq!(options[1].description, "");
        assert_eq!(options[1].format.as_deref(), Some("path"));
    }

    #[test]
    fn test_non_object_property_schemas_are_skipped() {
        let schema = r#"{"properties": {"yes": true, "real": {"type": "string"}}}"#;
        assert_eq!(names(&convert(schema, true).unwrap()), ["real"]);
    }

    #[test]
    fn test_escaped_keys_do_not_fake_nesting() {
        // A key containing '/' must not add path segments.
        let schema = r#"{"properties": {"a/properties/b": {"type": "string"}}}"#;
        assert_eq!(names(&convert(schema, true).unwrap()), ["a/properties/b"]);
    }

    #[test]
    fn test_invalid_json_is_parse_error() {
        let result = convert("{not valid json", true);
        assert!(matches!(result, Err(ScaffoldError::SchemaParse { .. })));
    }

    #[test]
    fn test_non_object_root_is_rejected() {
        assert!(matches!(
            convert("[1, 2, 3]", true),
            Err(ScaffoldError::SchemaNotObject)
        ));
        assert!(matches!(
            parse_schema("\"text\""),
            Err(ScaffoldError::SchemaNotObject)
        ));
    }

    #[test]
    fn test_end_to_end_example() {
        let schema = r#"{"properties": {"name": {"type": "string", "description": "Name", "aliases": ["n"]}, "port": {"type": "number", "default": 8000}}}"#;
        let options = convert(schema, true).unwrap();
        assert_eq!(
            serde_json::to_value(&options).unwrap(),
            json!([
                {"name": "name", "type": "string", "description": "Name", "aliases": ["n"], "required": false, "hidden": false},
                {"name": "port", "type": "number", "description": "", "default": 8000, "required": false, "hidden": false}
            ])
        );
    }

    #[test]
    fn test_is_property_nested() {
        assert!(!is_property_nested("/properties/a"));
        assert!(is_property_nested("/properties/a/properties/b"));
        assert!(is_property_nested("/properties/a/items"));
        assert!(!is_property_nested(""));
        // Keys named after the traversal keywords.
        assert!(!is_property_nested("/properties/items"));
        assert!(!is_property_nested("/properties/properties"));
        assert!(is_property_nested("/properties/items/properties/properties"));
        assert!(is_property_nested("/items/0/properties/x"));
    }
}
