//! Deterministic encoder.
//!
//! Output is a pure function of the document: mapping entries appear in
//! insertion order, indentation is one tab per nesting level, and the
//! quoting rule is closed under decoding (a string that would lex as an
//! integer or a reference token is quoted so it classifies back to a
//! string).

use pbx_core::{Dict, Document, ObjectId, Value};

/// Encode a document as legacy structured text.
pub(crate) fn write_document(document: &Document) -> String {
    let mut out = String::from("// !$*UTF8*$!\n{\n");
    write_entry(&mut out, 1, "archiveVersion", &Value::Integer(document.archive_version));
    write_entry(&mut out, 1, "classes", &Value::Dict(document.classes.clone()));
    write_entry(&mut out, 1, "objectVersion", &Value::Integer(document.object_version));

    push_indent(&mut out, 1);
    out.push_str("objects = {\n");
    for (id, body) in document.objects() {
        write_entry(&mut out, 2, id.as_str(), &Value::Dict(body.clone()));
    }
    push_indent(&mut out, 1);
    out.push_str("};\n");

    write_entry(
        &mut out,
        1,
        "rootObject",
        &Value::Reference(document.root_object.clone()),
    );
    out.push_str("}\n");
    out
}

fn write_entry(out: &mut String, indent: usize, key: &str, value: &Value) {
    push_indent(out, indent);
    push_key(out, key);
    out.push_str(" = ");
    write_value(out, indent, value);
    out.push_str(";\n");
}

fn write_value(out: &mut String, indent: usize, value: &Value) {
    match value {
        Value::String(s) => push_string(out, s),
        Value::Integer(n) => out.push_str(&n.to_string()),
        Value::Reference(id) => out.push_str(id.as_str()),
        Value::Array(items) => {
            out.push_str("(\n");
            for item in items {
                push_indent(out, indent + 1);
                write_value(out, indent + 1, item);
                out.push_str(",\n");
            }
            push_indent(out, indent);
            out.push(')');
        }
        Value::Dict(dict) => write_dict(out, indent, dict),
    }
}

fn write_dict(out: &mut String, indent: usize, dict: &Dict) {
    out.push_str("{\n");
    for (key, value) in dict.iter() {
        write_entry(out, indent + 1, key, value);
    }
    push_indent(out, indent);
    out.push('}');
}

fn push_indent(out: &mut String, indent: usize) {
    for _ in 0..indent {
        out.push('\t');
    }
}

/// Identifier-safe per the grammar: letters, digits, underscore.
fn is_identifier_safe(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(|b| b.is_ascii_alphanumeric() || b == b'_')
}

/// Keys never re-classify on decode, so they only need quoting when they
/// fall outside the identifier-safe set.
fn push_key(out: &mut String, key: &str) {
    if is_identifier_safe(key) {
        out.push_str(key);
    } else {
        push_quoted(out, key);
    }
}

/// String values additionally need quoting when a bare rendering would
/// decode as an integer or a reference.
fn push_string(out: &mut String, s: &str) {
    if is_identifier_safe(s) && s.parse::<i64>().is_err() && !ObjectId::matches(s) {
        out.push_str(s);
    } else {
        push_quoted(out, s);
    }
}

fn push_quoted(out: &mut String, s: &str) {
    out.push('"');
    for ch in s.chars() {
        match ch {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\t' => out.push_str("\\t"),
            _ => out.push(ch),
        }
    }
    out.push('"');
}
