//! Schema-to-type compiler.
//!
//! Turns a [`SchemaFragment`] into a TypeScript interface declaration. Every
//! property shape is matched exhaustively:
//!
//! | Schema                         | TypeScript                    |
//! |--------------------------------|-------------------------------|
//! | `string` / `boolean` / `null`  | same name                     |
//! | `number` / `integer`           | `number`                      |
//! | `array` with `items: T`        | `T[]` (`unknown[]` without)   |
//! | `object` with properties       | inline `{ a: T; b?: U }`      |
//! | `object` without properties    | `Record<string, unknown>`     |
//! | `type: ["string", "null"]`     | `string \| null`              |
//! | anything else                  | `unknown`                     |
//!
//! Output depends only on the fragment, so identical schemas always compile
//! to byte-identical text.

use crate::naming::is_identifier;
use mcp_toolgen_core::{PrimitiveType, PropertySchema, SchemaFragment};

/// Indentation of interface members.
pub const INDENT: &str = "    ";

/// Compiles `schema` into an `export interface` declaration named `type_name`.
///
/// Properties appear in source order, one per line. A property is marked
/// optional (`name?:`) only when the fragment has a `required` list that
/// omits it.
///
/// # Examples
///
/// ```
/// use mcp_toolgen_codegen::compiler::compile_interface;
/// use mcp_toolgen_core::SchemaFragment;
/// use serde_json::json;
///
/// let schema = SchemaFragment::parse(&json!({
///     "type": "object",
///     "properties": {
///         "a": { "type": "number" },
///         "b": { "type": "number" }
///     },
///     "required": ["a", "b"]
/// }))
/// .unwrap();
///
/// assert_eq!(
///     compile_interface("AddInput", &schema),
///     "export interface AddInput {\n    a: number;\n    b: number;\n}\n"
/// );
/// ```
#[must_use]
pub fn compile_interface(type_name: &str, schema: &SchemaFragment) -> String {
    if schema.is_empty() {
        return format!("export interface {type_name} {{}}\n");
    }

    let mut out = format!("export interface {type_name} {{\n");
    for (name, property) in &schema.properties {
        out.push_str(INDENT);
        out.push_str(&field_declaration(name, property, schema));
        out.push_str(";\n");
    }
    out.push_str("}\n");
    out
}

/// TypeScript type expression for a single property shape.
///
/// # Examples
///
/// ```
/// use mcp_toolgen_codegen::compiler::type_expression;
/// use mcp_toolgen_core::PropertySchema;
/// use serde_json::json;
///
/// let tags = PropertySchema::from_value(&json!({
///     "type": "array",
///     "items": { "type": "string" }
/// }));
/// assert_eq!(type_expression(&tags), "string[]");
///
/// let id = PropertySchema::from_value(&json!({ "type": "integer" }));
/// assert_eq!(type_expression(&id), "number");
/// ```
#[must_use]
pub fn type_expression(property: &PropertySchema) -> String {
    match property {
        PropertySchema::Primitive(primitive) => primitive_type(*primitive).to_string(),
        PropertySchema::Array(item) => match item.as_ref() {
            PropertySchema::Union(_) => format!("({})[]", type_expression(item)),
            _ => format!("{}[]", type_expression(item)),
        },
        PropertySchema::Object(fragment) if fragment.is_empty() => {
            "Record<string, unknown>".to_string()
        }
        PropertySchema::Object(fragment) => {
            let fields: Vec<String> = fragment
                .properties
                .iter()
                .map(|(name, nested)| field_declaration(name, nested, fragment))
                .collect();
            format!("{{ {} }}", fields.join("; "))
        }
        PropertySchema::Union(members) => members
            .iter()
            .map(type_expression)
            .collect::<Vec<_>>()
            .join(" | "),
        PropertySchema::Unknown => "unknown".to_string(),
    }
}

const fn primitive_type(primitive: PrimitiveType) -> &'static str {
    match primitive {
        PrimitiveType::String => "string",
        PrimitiveType::Number | PrimitiveType::Integer => "number",
        PrimitiveType::Boolean => "boolean",
        PrimitiveType::Null => "null",
    }
}

fn field_declaration(name: &str, property: &PropertySchema, parent: &SchemaFragment) -> String {
    let marker = if parent.is_required(name) { "" } else { "?" };
    format!("{}{marker}: {}", property_key(name), type_expression(property))
}

/// Property key as it must appear in a declaration.
///
/// Valid identifiers are used bare; anything else is single-quoted.
///
/// # Examples
///
/// ```
/// use mcp_toolgen_codegen::compiler::property_key;
///
/// assert_eq!(property_key("dirPath"), "dirPath");
/// assert_eq!(property_key("content-type"), "'content-type'");
/// ```
#[must_use]
pub fn property_key(name: &str) -> String {
    if is_identifier(name) {
        name.to_string()
    } else {
        string_literal(name)
    }
}

/// Single-quoted TypeScript string literal for `value`.
///
/// # Examples
///
/// ```
/// use mcp_toolgen_codegen::compiler::string_literal;
///
/// assert_eq!(string_literal("add"), "'add'");
/// assert_eq!(string_literal("it's"), r"'it\'s'");
/// ```
#[must_use]
pub fn string_literal(value: &str) -> String {
    let mut out = String::with_capacity(value.len() + 2);
    out.push('\'');
    for ch in value.chars() {
        match ch {
            '\\' => out.push_str("\\\\"),
            '\'' => out.push_str("\\'"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            '\u{2028}' => out.push_str("\\u2028"),
            '\u{2029}' => out.push_str("\\u2029"),
            c => out.push(c),
        }
    }
    out.push('\'');
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn fragment(value: &serde_json::Value) -> SchemaFragment {
        SchemaFragment::parse(value).unwrap()
    }

    #[test]
    fn test_compile_without_required_list() {
        let schema = fragment(&json!({
            "type": "object",
            "properties": { "dirPath": { "type": "string" } }
        }));
        assert_eq!(
            compile_interface("ListFilesInput", &schema),
            "export interface ListFilesInput {\n    dirPath: string;\n}\n"
        );
    }

    #[test]
    fn test_optional_marker() {
        let schema = fragment(&json!({
            "properties": {
                "path": { "type": "string" },
                "encoding": { "type": "string" }
            },
            "required": ["path"]
        }));
        let text = compile_interface("ReadFileInput", &schema);
        assert!(text.contains("    path: string;\n"));
        assert!(text.contains("    encoding?: string;\n"));
    }

    #[test]
    fn test_empty_interface() {
        let schema = fragment(&json!({ "type": "object", "properties": {} }));
        assert_eq!(
            compile_interface("PingInput", &schema),
            "export interface PingInput {}\n"
        );
    }

    #[test]
    fn test_unknown_and_untyped_properties() {
        let schema = fragment(&json!({
            "properties": {
                "anything": {},
                "when": { "type": "date-time" },
                "n": { "type": "null" }
            }
        }));
        let text = compile_interface("T", &schema);
        assert!(text.contains("anything: unknown;"));
        assert!(text.contains("when: unknown;"));
        assert!(text.contains("n: null;"));
    }

    #[test]
    fn test_nested_shapes() {
        let schema = fragment(&json!({
            "properties": {
                "matrix": {
                    "type": "array",
                    "items": { "type": "array", "items": { "type": "integer" } }
                },
                "meta": {
                    "type": "object",
                    "properties": {
                        "name": { "type": "string" },
                        "tags": { "type": "array", "items": { "type": "string" } }
                    },
                    "required": ["name"]
                },
                "extra": { "type": "object" },
                "maybe": { "type": ["string", "null"] },
                "mixed": { "type": "array", "items": { "type": ["number", "string"] } },
                "list": { "type": "array" }
            }
        }));

        let text = compile_interface("ComplexInput", &schema);
        assert!(text.contains("matrix: number[][];"));
        assert!(text.contains("meta: { name: string; tags?: string[] };"));
        assert!(text.contains("extra: Record<string, unknown>;"));
        assert!(text.contains("maybe: string | null;"));
        assert!(text.contains("mixed: (number | string)[];"));
        assert!(text.contains("list: unknown[];"));
    }

    #[test]
    fn test_quoted_keys() {
        let schema = fragment(&json!({
            "properties": {
                "content-type": { "type": "string" },
                "2fa": { "type": "boolean" },
                "$ref": { "type": "string" },
                "it's": { "type": "number" }
            }
        }));

        let text = compile_interface("HeadersInput", &schema);
        assert!(text.contains("'content-type': string;"));
        assert!(text.contains("'2fa': boolean;"));
        assert!(text.contains("$ref: string;"));
        assert!(text.contains(r"'it\'s': number;"));
    }

    #[test]
    fn test_compilation_is_deterministic() {
        let value = json!({
            "properties": {
                "z": { "type": "string" },
                "a": { "type": "number" },
                "m": { "type": "boolean" }
            },
            "required": ["a"]
        });

        let first = compile_interface("OrderInput", &fragment(&value));
        let second = compile_interface("OrderInput", &fragment(&value));
        assert_eq!(first, second);

        let z = first.find("z?:").unwrap();
        let a = first.find("a:").unwrap();
        let m = first.find("m?:").unwrap();
        assert!(z < a && a < m, "source order must be preserved:\n{first}");
    }

    #[test]
    fn test_string_literal_escapes() {
        assert_eq!(string_literal(r"a\b"), r"'a\\b'");
        assert_eq!(string_literal("line\nbreak"), r"'line\nbreak'");
    }
}
