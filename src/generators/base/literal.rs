//! Literal encoding for generated Objective-C.
//!
//! Two paths exist for numbers: the value path derives text from the typed
//! value and is always correct, the token path keeps the source spelling (hex
//! radix, exponent form) after fixing up Java-only syntax.

use crate::ast::{LiteralValue, PrimitiveKind};
use regex::Regex;
use std::sync::OnceLock;

const INT_MIN_LITERAL: &str = "((jint) 0x80000000)";
const LONG_MIN_LITERAL: &str = "((jlong) 0x8000000000000000LL)";

fn trigraph_regex() -> &'static Regex {
    static TRIGRAPH: OnceLock<Regex> = OnceLock::new();
    TRIGRAPH.get_or_init(|| {
        Regex::new(r#"^@".*\?\?[=/'()!<>-].*"$"#).expect("trigraph pattern is valid")
    })
}

/// Encodes a typed constant value.
pub fn generate(value: &LiteralValue) -> String {
    match value {
        LiteralValue::Boolean(b) => if *b { "true" } else { "false" }.to_string(),
        LiteralValue::Char(c) => generate_char(*c),
        LiteralValue::Byte(b) => b.to_string(),
        LiteralValue::Short(s) => s.to_string(),
        LiteralValue::Int(i) => generate_int(*i),
        LiteralValue::Long(l) => generate_long(*l),
        LiteralValue::Float(f) => generate_float(*f),
        LiteralValue::Double(d) => generate_double(*d),
        LiteralValue::String(s) => generate_string_literal(s),
    }
}

pub fn generate_int(value: i32) -> String {
    if value == i32::MIN {
        INT_MIN_LITERAL.to_string()
    } else {
        value.to_string()
    }
}

pub fn generate_long(value: i64) -> String {
    if value == i64::MIN {
        LONG_MIN_LITERAL.to_string()
    } else {
        format!("{}LL", value)
    }
}

pub fn generate_float(value: f32) -> String {
    if value.is_nan() {
        "JavaLangFloat_NaN".to_string()
    } else if value == f32::INFINITY {
        "JavaLangFloat_POSITIVE_INFINITY".to_string()
    } else if value == f32::NEG_INFINITY {
        "JavaLangFloat_NEGATIVE_INFINITY".to_string()
    } else if value == f32::MAX {
        "__FLT_MAX__".to_string()
    } else if value == f32::MIN_POSITIVE {
        "__FLT_MIN__".to_string()
    } else {
        // Debug formatting always carries a '.' or an exponent.
        format!("{:?}f", value)
    }
}

pub fn generate_double(value: f64) -> String {
    if value.is_nan() {
        "JavaLangDouble_NaN".to_string()
    } else if value == f64::INFINITY {
        "JavaLangDouble_POSITIVE_INFINITY".to_string()
    } else if value == f64::NEG_INFINITY {
        "JavaLangDouble_NEGATIVE_INFINITY".to_string()
    } else if value == f64::MAX {
        "__DBL_MAX__".to_string()
    } else if value == f64::MIN_POSITIVE {
        "__DBL_MIN__".to_string()
    } else {
        format!("{:?}", value)
    }
}

/// Printable ASCII is quoted, everything else becomes a hex code unit.
pub fn generate_char(value: u16) -> String {
    if (0x20..=0x7e).contains(&value) {
        let c = value as u8 as char;
        if c == '\'' || c == '\\' {
            format!("'\\{}'", c)
        } else {
            format!("'{}'", c)
        }
    } else {
        format!("0x{:04x}", value)
    }
}

/// True when every character fits the narrow (ASCII) execution set.
pub fn has_narrow_characters(value: &str) -> bool {
    value.is_ascii()
}

/// Encodes a string constant as `@"..."`, or as a `unichar` array
/// construction when the text holds non-ASCII characters.
pub fn generate_string_literal(value: &str) -> String {
    if !has_narrow_characters(value) {
        return build_string_from_chars(value);
    }
    let literal = format!("@\"{}\"", escape_string(value));
    split_trigraphs(&literal)
}

/// False for values whose encoding is a message send, which C does not
/// accept as a static initializer.
pub fn is_compile_time_constant(value: &LiteralValue) -> bool {
    match value {
        LiteralValue::String(s) => has_narrow_characters(s),
        _ => true,
    }
}

/// Splits `??x` sequences into adjacent literals so the preprocessor never
/// sees a trigraph.
pub fn split_trigraphs(literal: &str) -> String {
    if trigraph_regex().is_match(literal) {
        literal.replace("??", "?\" \"?")
    } else {
        literal.to_string()
    }
}

fn escape_string(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '"' => escaped.push_str("\\\""),
            '\\' => escaped.push_str("\\\\"),
            '\n' => escaped.push_str("\\n"),
            '\t' => escaped.push_str("\\t"),
            '\r' => escaped.push_str("\\r"),
            '\u{8}' => escaped.push_str("\\b"),
            '\u{c}' => escaped.push_str("\\f"),
            c if (c as u32) < 0x20 || c as u32 == 0x7f => {
                escaped.push_str(&format!("\\{:03o}", c as u32));
            }
            c => escaped.push(c),
        }
    }
    escaped
}

/// `[NSString stringWithCharacters:(unichar[]) { ... } length:N]`, one entry
/// per UTF-16 code unit.
pub fn build_string_from_chars(value: &str) -> String {
    let units: Vec<String> = value
        .encode_utf16()
        .map(|unit| format!("(int) 0x{:04x}", unit))
        .collect();
    format!(
        "[NSString stringWithCharacters:(unichar[]) {{ {} }} length:{}]",
        units.join(", "),
        units.len()
    )
}

/// Values whose spelling must come from the value path even when a token exists.
pub fn requires_value_path(value: &LiteralValue) -> bool {
    match value {
        LiteralValue::Int(i) => *i == i32::MIN,
        LiteralValue::Long(l) => *l == i64::MIN,
        LiteralValue::Float(f) => {
            !f.is_finite() || *f == f32::MAX || *f == f32::MIN_POSITIVE
        }
        LiteralValue::Double(d) => {
            !d.is_finite() || *d == f64::MAX || *d == f64::MIN_POSITIVE
        }
        _ => false,
    }
}

/// Encodes a number literal, preferring the source token when present.
pub fn generate_number(value: &LiteralValue, token: Option<&str>) -> String {
    match token {
        Some(token) if !requires_value_path(value) => {
            fix_number_token(token, value).unwrap_or_else(|| generate(value))
        }
        _ => generate(value),
    }
}

/// Rewrites a Java number token into C syntax.
///
/// Returns `None` when the token cannot be carried over (hex floats), in
/// which case the caller uses the value path.
pub fn fix_number_token(token: &str, value: &LiteralValue) -> Option<String> {
    let token = token.replace('_', "");
    let kind = literal_kind(value)?;
    match kind {
        PrimitiveKind::Float | PrimitiveKind::Double => {
            let mut text = token.as_str();
            if text.ends_with(['f', 'F', 'd', 'D']) && !is_hex(text) {
                text = &text[..text.len() - 1];
            }
            if is_hex(text) {
                return None;
            }
            let mut text = text.to_string();
            if !text.contains('.') && !text.contains(['e', 'E']) {
                text.push_str(".0");
            }
            if kind == PrimitiveKind::Float {
                text.push('f');
            }
            Some(text)
        }
        PrimitiveKind::Long => {
            let (text, radix) = normalize_integer_token(token.trim_end_matches(['l', 'L']))?;
            Some(signed_radix_literal(kind, format!("{}LL", text), radix))
        }
        _ => {
            let (text, radix) = normalize_integer_token(&token)?;
            Some(signed_radix_literal(kind, text, radix))
        }
    }
}

/// C reads hex literals that overflow the signed range as unsigned; the cast
/// restores Java's two's complement value.
fn signed_radix_literal(kind: PrimitiveKind, text: String, radix: bool) -> String {
    if radix {
        format!("({}) {}", kind.objc_name(), text)
    } else {
        text
    }
}

fn literal_kind(value: &LiteralValue) -> Option<PrimitiveKind> {
    match value {
        LiteralValue::Byte(_) => Some(PrimitiveKind::Byte),
        LiteralValue::Short(_) => Some(PrimitiveKind::Short),
        LiteralValue::Char(_) => Some(PrimitiveKind::Char),
        LiteralValue::Int(_) => Some(PrimitiveKind::Int),
        LiteralValue::Long(_) => Some(PrimitiveKind::Long),
        LiteralValue::Float(_) => Some(PrimitiveKind::Float),
        LiteralValue::Double(_) => Some(PrimitiveKind::Double),
        LiteralValue::Boolean(_) | LiteralValue::String(_) => None,
    }
}

fn is_hex(token: &str) -> bool {
    token.starts_with("0x") || token.starts_with("0X")
}

/// Lowercases the hex prefix and converts binary literals to hex. The flag
/// is set for hex output.
fn normalize_integer_token(token: &str) -> Option<(String, bool)> {
    if let Some(digits) = token
        .strip_prefix("0x")
        .or_else(|| token.strip_prefix("0X"))
    {
        return Some((format!("0x{}", digits), true));
    }
    if let Some(digits) = token
        .strip_prefix("0b")
        .or_else(|| token.strip_prefix("0B"))
    {
        let value = u64::from_str_radix(digits, 2).ok()?;
        return Some((format!("0x{:x}", value), true));
    }
    Some((token.to_string(), false))
}
