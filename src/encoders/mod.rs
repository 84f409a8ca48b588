//! Encoder implementations

pub mod json;
pub mod logfmt;
pub mod text;

pub use json::JsonEncoder;
pub use logfmt::LogfmtEncoder;
pub use text::TextEncoder;

pub use crate::core::Encoder;

use std::borrow::Cow;

pub const LEVEL_KEY: &str = "level";
pub const MESSAGE_KEY: &str = "message";
pub const TIME_KEY: &str = "time";

/// Prefix applied to fields whose key collides with a reserved key
pub const CLASH_PREFIX: &str = "fields.";

/// Output key for a field: reserved names move under [`CLASH_PREFIX`]
pub(crate) fn field_key(key: &str) -> Cow<'_, str> {
    if matches!(key, LEVEL_KEY | MESSAGE_KEY | TIME_KEY) {
        Cow::Owned(format!("{}{}", CLASH_PREFIX, key))
    } else {
        Cow::Borrowed(key)
    }
}

/// Replace every control character with a visible escape
///
/// `\n`, `\r` and `\t` keep their short forms; anything else (ESC, NUL,
/// DEL, C1 codes) becomes `\u{..}`.
pub(crate) fn escape_control(input: &str) -> Cow<'_, str> {
    if !input.chars().any(char::is_control) {
        return Cow::Borrowed(input);
    }

    let mut out = String::with_capacity(input.len() + 8);
    for c in input.chars() {
        match c {
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if c.is_control() => out.push_str(&format!("\\u{{{:x}}}", c as u32)),
            c => out.push(c),
        }
    }
    Cow::Owned(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_key_prefixes_reserved_names() {
        assert_eq!(field_key("level"), "fields.level");
        assert_eq!(field_key("message"), "fields.message");
        assert_eq!(field_key("time"), "fields.time");
        assert_eq!(field_key("order_id"), "order_id");
    }

    #[test]
    fn test_escape_control_characters() {
        assert_eq!(escape_control("plain"), "plain");
        assert_eq!(escape_control("a\nb\tc"), "a\\nb\\tc");
        assert_eq!(escape_control("\x1b[31mred"), "\\u{1b}[31mred");
        assert_eq!(escape_control("nul\0"), "nul\\u{0}");
    }
}
