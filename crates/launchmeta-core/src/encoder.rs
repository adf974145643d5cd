//! Re-serialization of a [`JsonValue`] tree.
//!
//! The encoder writes the decoder's own scalar convention: numbers, booleans,
//! null and literals are emitted bare, strings between quotes. [`encode`] and
//! [`encode_pretty`] write string contents untouched, which makes them the
//! exact inverse of [`StringMode::Raw`](crate::StringMode::Raw);
//! [`encode_escaped`] writes standard JSON escapes for trees decoded with
//! [`StringMode::Unescape`](crate::StringMode::Unescape).
//!
//! # Example
//! ```
//! use launchmeta_core::{decode, encode};
//! let value = decode(r#"{ "id": "1.21.5", "size": 42 }"#).unwrap();
//! assert_eq!(encode(&value), r#"{"id":"1.21.5","size":42}"#);
//! ```

use crate::types::JsonValue;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Strings {
    Raw,
    Escaped,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Layout {
    Compact(Strings),
    /// Two-space indentation, raw strings.
    Pretty,
}

impl Layout {
    fn strings(self) -> Strings {
        match self {
            Layout::Compact(strings) => strings,
            Layout::Pretty => Strings::Raw,
        }
    }

    fn key_separator(self) -> &'static str {
        match self {
            Layout::Compact(_) => ":",
            Layout::Pretty => ": ",
        }
    }

    fn newline_indent(self, depth: usize, out: &mut String) {
        if self == Layout::Pretty {
            out.push('\n');
            for _ in 0..depth {
                out.push_str("  ");
            }
        }
    }
}

/// Compact output with raw string contents.
pub fn encode(value: &JsonValue) -> String {
    write_value(value, Layout::Compact(Strings::Raw))
}

/// Compact output with JSON string escaping.
pub fn encode_escaped(value: &JsonValue) -> String {
    write_value(value, Layout::Compact(Strings::Escaped))
}

/// Two-space indented output with raw string contents.
pub fn encode_pretty(value: &JsonValue) -> String {
    write_value(value, Layout::Pretty)
}

/// An open container and the index of its next child.
enum Frame<'a> {
    Array(&'a [JsonValue], usize),
    Object(&'a [(String, JsonValue)], usize),
}

/// Walks the tree with an explicit stack, so nesting depth is bounded by
/// memory rather than by the call stack.
fn write_value<'a>(root: &'a JsonValue, layout: Layout) -> String {
    let strings = layout.strings();
    let mut out = String::new();
    let mut stack: Vec<Frame<'a>> = Vec::new();
    let mut pending = Some(root);

    loop {
        if let Some(value) = pending.take() {
            match value {
                JsonValue::Array(items) if items.is_empty() => out.push_str("[]"),
                JsonValue::Object(map) if map.is_empty() => out.push_str("{}"),
                JsonValue::Array(items) => {
                    out.push('[');
                    stack.push(Frame::Array(items, 0));
                }
                JsonValue::Object(map) => {
                    out.push('{');
                    stack.push(Frame::Object(map.entries(), 0));
                }
                scalar => write_scalar(scalar, strings, &mut out),
            }
        }

        let depth = stack.len();
        let Some(frame) = stack.last_mut() else {
            break;
        };
        let closing = match frame {
            Frame::Array(items, next) => match items.get(*next) {
                Some(item) => {
                    if *next > 0 {
                        out.push(',');
                    }
                    *next += 1;
                    layout.newline_indent(depth, &mut out);
                    pending = Some(item);
                    None
                }
                None => Some(']'),
            },
            Frame::Object(entries, next) => match entries.get(*next) {
                Some((key, item)) => {
                    if *next > 0 {
                        out.push(',');
                    }
                    *next += 1;
                    layout.newline_indent(depth, &mut out);
                    write_string(key, strings, &mut out);
                    out.push_str(layout.key_separator());
                    pending = Some(item);
                    None
                }
                None => Some('}'),
            },
        };
        if let Some(close) = closing {
            stack.pop();
            layout.newline_indent(depth - 1, &mut out);
            out.push(close);
        }
    }

    out
}

fn write_scalar(value: &JsonValue, strings: Strings, out: &mut String) {
    match value {
        JsonValue::Null => out.push_str("null"),
        JsonValue::Bool(b) => out.push_str(if *b { "true" } else { "false" }),
        JsonValue::Number(text) | JsonValue::Literal(text) => out.push_str(text),
        JsonValue::String(s) => write_string(s, strings, out),
        JsonValue::Array(_) | JsonValue::Object(_) => unreachable!("containers handled by caller"),
    }
}

fn write_string(s: &str, strings: Strings, out: &mut String) {
    out.push('"');
    match strings {
        Strings::Raw => out.push_str(s),
        Strings::Escaped => escape_into(s, out),
    }
    out.push('"');
}

fn escape_into(s: &str, out: &mut String) {
    for c in s.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            '\u{0008}' => out.push_str("\\b"),
            '\u{000C}' => out.push_str("\\f"),
            c if u32::from(c) < 0x20 => out.push_str(&format!("\\u{:04x}", u32::from(c))),
            c => out.push(c),
        }
    }
}
