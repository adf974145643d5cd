//! Lenient JSON decoder for launcher manifests.
//!
//! The decoder is a best-effort scanner over a small grammar subset, built for
//! trusted, well-formed manifest documents. It never fails on inner structure:
//! unexpected characters are skipped, unterminated strings and unbalanced
//! brackets clamp to the end of input, and unknown unquoted words are kept as
//! [`JsonValue::Literal`]. The only error is a top level that is neither an
//! object nor an array.
//!
//! # Scanning
//!
//! - An object strips one leading `{` and one trailing `}`, then reads
//!   `"key"` followed by any run of `:`/whitespace and a value. Anything else
//!   between entries is skipped.
//! - An array strips one leading `[` and one trailing `]`, then reads values
//!   separated by commas. Empty unquoted elements are dropped.
//! - A nested container is found by counting bracket depth from its opening
//!   character; the enclosed substring is decoded recursively.
//! - A string runs to the next `"`.
//! - An unquoted scalar runs to the next `,` or closing bracket and is trimmed.
//!
//! # Key design decisions
//!
//! - **Fast scan is the default**: depth counting ignores quotes, so a string
//!   containing `}` or `]` desynchronizes nesting. [`ScanMode::QuoteAware`]
//!   is the opt-in alternative that steps over quoted text and honors `\"`.
//! - **Raw strings are the default**: escape sequences are kept verbatim.
//!   [`StringMode::Unescape`] decodes them.
//! - **All slicing happens at ASCII delimiters**, so byte indexing never splits
//!   a UTF-8 sequence.
//! - **Nesting is bounded**: a container deeper than
//!   [`DecodeOptions::max_depth`] is not decoded. Its enclosed text, brackets
//!   included, is kept as a [`JsonValue::Literal`], so arbitrarily deep input
//!   cannot exhaust the stack and still re-encodes to the same text.

use crate::error::{LaunchmetaError, Result};
use crate::types::{JsonValue, Object, ObjectBuilder};

/// Nesting limit used by [`DecodeOptions::default`]. Matches serde_json's
/// recursion limit.
pub const DEFAULT_MAX_DEPTH: usize = 128;

/// How bracket depth and string ends are found.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ScanMode {
    /// Count every bracket, quoted or not; a string ends at the next `"`.
    #[default]
    Fast,
    /// Skip quoted text while counting depth; `\"` does not end a string.
    QuoteAware,
}

/// How string contents (keys and values) are produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StringMode {
    /// The characters between the quotes, untouched.
    #[default]
    Raw,
    /// Decode `\" \\ \/ \b \f \n \r \t \uXXXX`. Unknown escapes are kept as written.
    Unescape,
}

/// Decoder settings. The default reproduces the legacy launcher behavior.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecodeOptions {
    pub scan: ScanMode,
    pub strings: StringMode,
    /// Deepest container that is decoded; the top level counts as 1. A
    /// container nested below it becomes a [`JsonValue::Literal`] holding its
    /// raw text.
    pub max_depth: usize,
}

impl Default for DecodeOptions {
    fn default() -> Self {
        Self {
            scan: ScanMode::default(),
            strings: StringMode::default(),
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

impl DecodeOptions {
    /// Quote-aware scanning with escape decoding.
    pub fn strict_quotes() -> Self {
        Self {
            scan: ScanMode::QuoteAware,
            strings: StringMode::Unescape,
            ..Self::default()
        }
    }
}

/// Decode a document whose top level is an object or an array.
///
/// Returns [`LaunchmetaError::MalformedDocument`] when the first
/// non-whitespace character is neither `{` nor `[`.
pub fn decode(text: &str) -> Result<JsonValue> {
    Decoder::default().decode(text)
}

/// [`decode`] with explicit options.
pub fn decode_with(text: &str, options: &DecodeOptions) -> Result<JsonValue> {
    Decoder::new(*options).decode(text)
}

/// Decode an object body. Never fails; surrounding braces are optional.
pub fn decode_object(text: &str) -> Object {
    Decoder::default().decode_object(text)
}

/// [`decode_object`] with explicit options.
pub fn decode_object_with(text: &str, options: &DecodeOptions) -> Object {
    Decoder::new(*options).decode_object(text)
}

/// Decode an array body. Never fails; surrounding brackets are optional.
pub fn decode_array(text: &str) -> Vec<JsonValue> {
    Decoder::default().decode_array(text)
}

/// [`decode_array`] with explicit options.
pub fn decode_array_with(text: &str, options: &DecodeOptions) -> Vec<JsonValue> {
    Decoder::new(*options).decode_array(text)
}

/// A reusable decoder. Holds only its options; every call is independent.
#[derive(Debug, Clone, Copy, Default)]
pub struct Decoder {
    options: DecodeOptions,
}

impl Decoder {
    pub fn new(options: DecodeOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &DecodeOptions {
        &self.options
    }

    /// Top-level dispatch on the first non-whitespace character.
    pub fn decode(&self, text: &str) -> Result<JsonValue> {
        let trimmed = text.trim();
        match trimmed.chars().next() {
            Some('{') => Ok(JsonValue::Object(self.decode_object(trimmed))),
            Some('[') => Ok(JsonValue::Array(self.decode_array(trimmed))),
            found => Err(LaunchmetaError::MalformedDocument { found }),
        }
    }

    pub fn decode_object(&self, text: &str) -> Object {
        self.object_at(text, 1)
    }

    pub fn decode_array(&self, text: &str) -> Vec<JsonValue> {
        self.array_at(text, 1)
    }

    /// Decode an object body sitting at nesting level `depth`.
    fn object_at(&self, text: &str, depth: usize) -> Object {
        let body = strip_delimiters(text, '{', '}');
        let bytes = body.as_bytes();
        let mut map = ObjectBuilder::default();
        let mut i = 0;

        while i < bytes.len() {
            i = skip_whitespace(bytes, i);
            if i >= bytes.len() {
                break;
            }
            match bytes[i] {
                b',' => i += 1,
                b'"' => {
                    let key_start = i + 1;
                    let key_end = self.find_string_end(bytes, key_start);
                    let key = self.string_contents(&body[key_start..key_end]);
                    i = (key_end + 1).min(bytes.len());
                    while i < bytes.len() && (bytes[i] == b':' || bytes[i].is_ascii_whitespace()) {
                        i += 1;
                    }
                    let (value, next) = self.scan_value(body, i, b'}', depth);
                    map.insert(key, value);
                    i = next;
                }
                other => {
                    tracing::trace!(offset = i, byte = other, "skipping stray byte in object");
                    i += 1;
                }
            }
        }

        map.finish()
    }

    fn array_at(&self, text: &str, depth: usize) -> Vec<JsonValue> {
        let body = strip_delimiters(text, '[', ']');
        let bytes = body.as_bytes();
        let mut items = Vec::new();
        let mut i = 0;

        while i < bytes.len() {
            i = skip_whitespace(bytes, i);
            if i >= bytes.len() {
                break;
            }
            if bytes[i] == b',' {
                i += 1;
                continue;
            }
            let (value, next) = self.scan_value(body, i, b']', depth);
            // Empty unquoted elements (`[1,,2]`, trailing commas) are dropped.
            let empty = matches!(&value, JsonValue::Literal(s) if s.is_empty());
            if !empty {
                items.push(value);
            }
            // A stray `]` yields an empty scalar without advancing.
            i = next.max(i + 1);
        }

        items
    }

    /// Read one value starting at `start`, returning it with the index just
    /// past it. `close` is the enclosing container's closing byte, which also
    /// terminates an unquoted scalar; `depth` is that container's nesting level.
    fn scan_value(&self, body: &str, start: usize, close: u8, depth: usize) -> (JsonValue, usize) {
        let bytes = body.as_bytes();
        if start >= bytes.len() {
            return (JsonValue::Literal(String::new()), start);
        }
        let nested = depth + 1;
        match bytes[start] {
            b'[' => {
                let end = self.find_matching(bytes, start, b'[', b']');
                let text = &body[start..end];
                if nested > self.options.max_depth {
                    return (self.too_deep(text, nested), end);
                }
                (JsonValue::Array(self.array_at(text, nested)), end)
            }
            b'{' => {
                let end = self.find_matching(bytes, start, b'{', b'}');
                let text = &body[start..end];
                if nested > self.options.max_depth {
                    return (self.too_deep(text, nested), end);
                }
                (JsonValue::Object(self.object_at(text, nested)), end)
            }
            b'"' => {
                let end = self.find_string_end(bytes, start + 1);
                let value = JsonValue::String(self.string_contents(&body[start + 1..end]));
                (value, (end + 1).min(bytes.len()))
            }
            _ => {
                let end = bytes[start..]
                    .iter()
                    .position(|&b| b == b',' || b == close)
                    .map_or(bytes.len(), |p| start + p);
                (classify_scalar(body[start..end].trim()), end)
            }
        }
    }

    fn too_deep(&self, text: &str, depth: usize) -> JsonValue {
        tracing::debug!(
            depth,
            max_depth = self.options.max_depth,
            bytes = text.len(),
            "nesting limit reached, keeping container as literal"
        );
        JsonValue::Literal(text.to_string())
    }

    /// Index just past the bracket that closes the one at `start`, or the end
    /// of input if it never closes.
    fn find_matching(&self, bytes: &[u8], start: usize, open: u8, close: u8) -> usize {
        let mut depth = 0usize;
        let mut i = start;
        while i < bytes.len() {
            let b = bytes[i];
            if b == open {
                depth += 1;
            } else if b == close {
                depth = depth.saturating_sub(1);
                if depth == 0 {
                    return i + 1;
                }
            } else if b == b'"' && self.options.scan == ScanMode::QuoteAware {
                i = self.find_string_end(bytes, i + 1);
            }
            i += 1;
        }
        bytes.len()
    }

    /// Index of the quote closing a string whose contents start at `start`,
    /// or the end of input if unterminated.
    fn find_string_end(&self, bytes: &[u8], start: usize) -> usize {
        let mut i = start;
        while i < bytes.len() {
            match bytes[i] {
                b'\\' if self.options.scan == ScanMode::QuoteAware => i += 2,
                b'"' => return i,
                _ => i += 1,
            }
        }
        bytes.len()
    }

    fn string_contents(&self, raw: &str) -> String {
        match self.options.strings {
            StringMode::Raw => raw.to_string(),
            StringMode::Unescape => unescape(raw),
        }
    }
}

/// Remove one leading `open` and one trailing `close` if present. No balance check.
fn strip_delimiters(text: &str, open: char, close: char) -> &str {
    let text = text.trim();
    let text = text.strip_prefix(open).unwrap_or(text);
    text.strip_suffix(close).unwrap_or(text)
}

fn skip_whitespace(bytes: &[u8], mut i: usize) -> usize {
    while i < bytes.len() && bytes[i].is_ascii_whitespace() {
        i += 1;
    }
    i
}

/// Classify a trimmed unquoted scalar: keywords and JSON numbers become typed
/// values, everything else is kept verbatim as a literal.
fn classify_scalar(token: &str) -> JsonValue {
    match token {
        "null" => JsonValue::Null,
        "true" => JsonValue::Bool(true),
        "false" => JsonValue::Bool(false),
        _ if is_json_number(token) => JsonValue::Number(token.to_string()),
        _ => JsonValue::Literal(token.to_string()),
    }
}

/// `-?(0|[1-9][0-9]*)(\.[0-9]+)?([eE][+-]?[0-9]+)?`
fn is_json_number(s: &str) -> bool {
    let bytes = s.as_bytes();
    let mut i = 0;
    let digits = |i: &mut usize| {
        let start = *i;
        while *i < bytes.len() && bytes[*i].is_ascii_digit() {
            *i += 1;
        }
        *i - start
    };

    if bytes.get(i) == Some(&b'-') {
        i += 1;
    }
    match bytes.get(i) {
        Some(b'0') => i += 1,
        Some(b'1'..=b'9') => {
            digits(&mut i);
        }
        _ => return false,
    }
    if bytes.get(i) == Some(&b'.') {
        i += 1;
        if digits(&mut i) == 0 {
            return false;
        }
    }
    if matches!(bytes.get(i), Some(b'e' | b'E')) {
        i += 1;
        if matches!(bytes.get(i), Some(b'+' | b'-')) {
            i += 1;
        }
        if digits(&mut i) == 0 {
            return false;
        }
    }
    i == bytes.len()
}

/// Decode JSON string escapes. Malformed escapes are copied through unchanged.
fn unescape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut chars = s.chars().peekable();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('"') => out.push('"'),
            Some('\\') => out.push('\\'),
            Some('/') => out.push('/'),
            Some('b') => out.push('\u{0008}'),
            Some('f') => out.push('\u{000C}'),
            Some('n') => out.push('\n'),
            Some('r') => out.push('\r'),
            Some('t') => out.push('\t'),
            Some('u') => {
                let rest: String = chars.clone().take(4).collect();
                match parse_hex4(&rest) {
                    Some(high) => {
                        for _ in 0..4 {
                            chars.next();
                        }
                        push_code_unit(&mut out, high, &mut chars);
                    }
                    None => out.push_str("\\u"),
                }
            }
            Some(other) => {
                out.push('\\');
                out.push(other);
            }
            None => out.push('\\'),
        }
    }
    out
}

/// Push a decoded `\uXXXX` unit, consuming a following low surrogate escape
/// when `unit` is a high surrogate. Lone surrogates become U+FFFD.
fn push_code_unit(
    out: &mut String,
    unit: u16,
    chars: &mut std::iter::Peekable<std::str::Chars<'_>>,
) {
    if (0xD800..0xDC00).contains(&unit) {
        let lookahead: String = chars.clone().take(6).collect();
        if let Some(low) = lookahead
            .strip_prefix("\\u")
            .and_then(parse_hex4)
            .filter(|low| (0xDC00..0xE000).contains(low))
        {
            for _ in 0..6 {
                chars.next();
            }
            let code = 0x10000 + ((u32::from(unit) - 0xD800) << 10) + (u32::from(low) - 0xDC00);
            out.push(char::from_u32(code).unwrap_or('\u{FFFD}'));
            return;
        }
    }
    out.push(char::from_u32(u32::from(unit)).unwrap_or('\u{FFFD}'));
}

fn parse_hex4(s: &str) -> Option<u16> {
    if s.len() != 4 || !s.bytes().all(|b| b.is_ascii_hexdigit()) {
        return None;
    }
    u16::from_str_radix(s, 16).ok()
}
