//! Deterministic naming rules for generated declarations.
//!
//! Tool names are split into segments on `-`, `_` and runs of whitespace.
//! PascalCase uppercases the first letter of every segment; camelCase does the
//! same and then lowercases the very first letter. Letters inside a segment
//! are kept as they are, so `listFiles` stays `ListFiles` / `listFiles`.
//!
//! # Examples
//!
//! ```
//! use mcp_toolgen_codegen::naming::{to_camel_case, to_pascal_case};
//!
//! assert_eq!(to_pascal_case("write_file"), "WriteFile");
//! assert_eq!(to_camel_case("write_file"), "writeFile");
//! assert_eq!(to_pascal_case("already-Pascal"), "AlreadyPascal");
//! ```

use regex::Regex;
use std::sync::LazyLock;

static IDENTIFIER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[\p{L}\p{Nl}_$][\p{L}\p{Nl}\p{Mn}\p{Mc}\p{Nd}\p{Pc}$]*$").expect("valid regex")
});

const RESERVED_WORDS: &[&str] = &[
    "await", "break", "case", "catch", "class", "const", "continue", "debugger", "default",
    "delete", "do", "else", "enum", "export", "extends", "false", "finally", "for", "function",
    "if", "implements", "import", "in", "instanceof", "interface", "let", "new", "null",
    "package", "private", "protected", "public", "return", "static", "super", "switch", "this",
    "throw", "true", "try", "typeof", "var", "void", "while", "with", "yield",
];

fn segments(name: &str) -> impl Iterator<Item = &str> {
    name.split(|c: char| c == '-' || c == '_' || c.is_whitespace())
        .filter(|segment| !segment.is_empty())
}

fn capitalize(segment: &str) -> String {
    let mut chars = segment.chars();
    match chars.next() {
        None => String::new(),
        Some(first) => first.to_uppercase().chain(chars).collect(),
    }
}

/// Converts a tool name to PascalCase.
///
/// # Examples
///
/// ```
/// use mcp_toolgen_codegen::naming::to_pascal_case;
///
/// assert_eq!(to_pascal_case("listFiles"), "ListFiles");
/// assert_eq!(to_pascal_case("get user  data"), "GetUserData");
/// ```
#[must_use]
pub fn to_pascal_case(name: &str) -> String {
    segments(name).map(capitalize).collect()
}

/// Converts a tool name to camelCase.
///
/// # Examples
///
/// ```
/// use mcp_toolgen_codegen::naming::to_camel_case;
///
/// assert_eq!(to_camel_case("send_message"), "sendMessage");
/// assert_eq!(to_camel_case("Add"), "add");
/// ```
#[must_use]
pub fn to_camel_case(name: &str) -> String {
    let pascal = to_pascal_case(name);
    let mut chars = pascal.chars();
    match chars.next() {
        None => String::new(),
        Some(first) => first.to_lowercase().chain(chars).collect(),
    }
}

/// Name of the input declaration for `tool_name`.
#[must_use]
pub fn input_type_name(tool_name: &str) -> String {
    format!("{}Input", to_pascal_case(tool_name))
}

/// Name of the output declaration for `tool_name`.
#[must_use]
pub fn output_type_name(tool_name: &str) -> String {
    format!("{}Output", to_pascal_case(tool_name))
}

/// External name of the generated function.
///
/// camelCase when `use_camel_case` is set, the raw tool name otherwise.
///
/// # Examples
///
/// ```
/// use mcp_toolgen_codegen::naming::function_name;
///
/// assert_eq!(function_name("list_files", true), "listFiles");
/// assert_eq!(function_name("list_files", false), "list_files");
/// ```
#[must_use]
pub fn function_name(tool_name: &str, use_camel_case: bool) -> String {
    if use_camel_case {
        to_camel_case(tool_name)
    } else {
        tool_name.to_string()
    }
}

/// Returns `true` if `name` is syntactically a TypeScript identifier.
///
/// Reserved words pass; they are valid as property keys.
#[must_use]
pub fn is_identifier(name: &str) -> bool {
    IDENTIFIER.is_match(name)
}

/// Returns `true` if `name` can be declared as a function.
///
/// # Examples
///
/// ```
/// use mcp_toolgen_codegen::naming::is_valid_function_name;
///
/// assert!(is_valid_function_name("listFiles"));
/// assert!(!is_valid_function_name("2faTool"));
/// assert!(!is_valid_function_name("delete"));
/// ```
#[must_use]
pub fn is_valid_function_name(name: &str) -> bool {
    is_identifier(name) && !RESERVED_WORDS.contains(&name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pascal_case() {
        assert_eq!(to_pascal_case("write_file"), "WriteFile");
        assert_eq!(to_pascal_case("already-Pascal"), "AlreadyPascal");
        assert_eq!(to_pascal_case("add"), "Add");
        assert_eq!(to_pascal_case("listFiles"), "ListFiles");
        assert_eq!(to_pascal_case("__leading__and__trailing__"), "LeadingAndTrailing");
        assert_eq!(to_pascal_case("tab\tseparated\nname"), "TabSeparatedName");
        assert_eq!(to_pascal_case("v2_api"), "V2Api");
    }

    #[test]
    fn test_camel_case() {
        assert_eq!(to_camel_case("write_file"), "writeFile");
        assert_eq!(to_camel_case("ListFiles"), "listFiles");
        assert_eq!(to_camel_case("read-text-file"), "readTextFile");
        assert_eq!(to_camel_case("x"), "x");
    }

    #[test]
    fn test_empty_and_separator_only() {
        assert_eq!(to_pascal_case(""), "");
        assert_eq!(to_camel_case("---"), "");
    }

    #[test]
    fn test_unicode_segments() {
        assert_eq!(to_pascal_case("über_tool"), "ÜberTool");
        assert_eq!(to_camel_case("Édition_mode"), "éditionMode");
    }

    #[test]
    fn test_type_names() {
        assert_eq!(input_type_name("listFiles"), "ListFilesInput");
        assert_eq!(output_type_name("add"), "AddOutput");
    }

    #[test]
    fn test_function_name_validity() {
        assert!(is_valid_function_name(&function_name("send-chat_message", true)));
        assert!(is_valid_function_name(&function_name("read_file", false)));
        assert!(is_valid_function_name(&function_name("Édition_mode", true)));
        assert!(is_valid_function_name("$ref"));

        assert!(!is_valid_function_name(&function_name("2fa_tool", true)));
        assert!(!is_valid_function_name(&function_name("read.file", false)));
        assert!(!is_valid_function_name(&function_name("it's", true)));
        assert!(!is_valid_function_name(&function_name("---", true)));
        assert!(!is_valid_function_name("new"));
        assert!(is_identifier("new"));
    }
}
