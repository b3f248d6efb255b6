//! String literal escaping
//!
//! Renders text as a quoted literal of the target language using only
//! printable ASCII:
//! - `\\` and the active delimiter are backslash-escaped
//! - `${` is escaped inside template (backtick) literals
//! - `\b \t \n \v \f \r` use their short forms
//! - other C0 controls, DEL and Latin-1 use `\xHH`
//! - everything else uses `\uHHHH` per UTF-16 code unit
//!
//! [`unescape_literal`] is the exact inverse for literals produced here.

use punk_core::{PunkError, PunkResult, QuoteStyle};

/// Render `text` as a literal delimited by `style`
pub fn escape_literal(text: &str, style: QuoteStyle) -> String {
    let delimiter = style.delimiter();
    let mut out = String::with_capacity(text.len() + 2);
    out.push(delimiter);

    let mut chars = text.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            '\\' => out.push_str("\\\\"),
            c if c == delimiter => {
                out.push('\\');
                out.push(c);
            }
            '$' if style == QuoteStyle::Backtick && chars.peek() == Some(&'{') => {
                out.push_str("\\$");
            }
            '\u{8}' => out.push_str("\\b"),
            '\t' => out.push_str("\\t"),
            '\n' => out.push_str("\\n"),
            '\u{b}' => out.push_str("\\v"),
            '\u{c}' => out.push_str("\\f"),
            '\r' => out.push_str("\\r"),
            ' '..='~' => out.push(c),
            '\0'..='\u{ff}' => out.push_str(&format!("\\x{:02X}", c as u32)),
            _ => {
                let mut units = [0u16; 2];
                for unit in c.encode_utf16(&mut units) {
                    out.push_str(&format!("\\u{:04X}", unit));
                }
            }
        }
    }

    out.push(delimiter);
    out
}

/// Rendered length of `text` in `style`, without building the literal
pub fn escaped_len(text: &str, style: QuoteStyle) -> usize {
    let delimiter = style.delimiter();
    let mut len = 2;
    let mut chars = text.chars().peekable();
    while let Some(c) = chars.next() {
        len += match c {
            '\\' => 2,
            c if c == delimiter => 2,
            '$' if style == QuoteStyle::Backtick && chars.peek() == Some(&'{') => 2,
            '\u{8}' | '\t' | '\n' | '\u{b}' | '\u{c}' | '\r' => 2,
            ' '..='~' => 1,
            '\0'..='\u{ff}' => 4,
            _ => 6 * c.len_utf16(),
        };
    }
    len
}

/// Parse a literal produced by [`escape_literal`] back into text
pub fn unescape_literal(literal: &str) -> PunkResult<String> {
    let malformed = |why: &str| PunkError::InvalidLiteral(format!("{}: {:?}", why, literal));

    let mut chars = literal.chars();
    let delimiter = chars.next().ok_or_else(|| malformed("empty literal"))?;
    if !matches!(delimiter, '\'' | '"' | '`') || literal.len() < 2 || !literal.ends_with(delimiter) {
        return Err(malformed("unterminated literal"));
    }
    let body = &literal[1..literal.len() - 1];

    let mut units: Vec<u16> = Vec::with_capacity(body.len());
    let mut chars = body.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            if c == delimiter {
                return Err(malformed("bare delimiter"));
            }
            let mut buf = [0u16; 2];
            units.extend_from_slice(c.encode_utf16(&mut buf));
            continue;
        }

        let escaped = chars.next().ok_or_else(|| malformed("dangling escape"))?;
        let unit = match escaped {
            'b' => 0x08,
            't' => 0x09,
            'n' => 0x0a,
            'v' => 0x0b,
            'f' => 0x0c,
            'r' => 0x0d,
            'x' => read_hex(&mut chars, 2).ok_or_else(|| malformed("bad \\x escape"))?,
            'u' => read_hex(&mut chars, 4).ok_or_else(|| malformed("bad \\u escape"))?,
            other => {
                // identity escape; astral characters keep both code units
                let mut buf = [0u16; 2];
                units.extend_from_slice(other.encode_utf16(&mut buf));
                continue;
            }
        };
        units.push(unit);
    }

    String::from_utf16(&units).map_err(|_| malformed("unpaired surrogate"))
}

fn read_hex(chars: &mut std::str::Chars<'_>, digits: usize) -> Option<u16> {
    let mut value = 0u16;
    for _ in 0..digits {
        let digit = chars.next()?.to_digit(16)?;
        value = (value << 4) | digit as u16;
    }
    Some(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_plain_text() {
        assert_eq!(escape_literal("", QuoteStyle::Single), "''");
        assert_eq!(escape_literal("abc", QuoteStyle::Double), "\"abc\"");
        assert_eq!(escape_literal("a b", QuoteStyle::Backtick), "`a b`");
    }

    #[test]
    fn test_delimiters() {
        assert_eq!(escape_literal("it's", QuoteStyle::Single), "'it\\'s'");
        assert_eq!(escape_literal("it's", QuoteStyle::Double), "\"it's\"");
        assert_eq!(escape_literal("say \"hi\"", QuoteStyle::Double), "\"say \\\"hi\\\"\"");
        assert_eq!(escape_literal("`", QuoteStyle::Backtick), "`\\``");
        assert_eq!(escape_literal("\\", QuoteStyle::Single), "'\\\\'");
    }

    #[test]
    fn test_template_interpolation() {
        assert_eq!(escape_literal("${x}", QuoteStyle::Backtick), "`\\${x}`");
        assert_eq!(escape_literal("$x", QuoteStyle::Backtick), "`$x`");
        assert_eq!(escape_literal("${x}", QuoteStyle::Single), "'${x}'");
    }

    #[test]
    fn test_controls_and_unicode() {
        assert_eq!(escape_literal("\n\t\r", QuoteStyle::Single), "'\\n\\t\\r'");
        assert_eq!(escape_literal("\u{0}\u{7f}", QuoteStyle::Single), "'\\x00\\x7F'");
        assert_eq!(escape_literal("\u{e9}", QuoteStyle::Single), "'\\xE9'");
        assert_eq!(escape_literal("\u{3b1}", QuoteStyle::Single), "'\\u03B1'");
        assert_eq!(
            escape_literal("\u{1f600}", QuoteStyle::Single),
            "'\\uD83D\\uDE00'"
        );
    }

    #[test]
    fn test_unescape_rejects_garbage() {
        assert!(unescape_literal("").is_err());
        assert!(unescape_literal("'abc").is_err());
        assert!(unescape_literal("abc").is_err());
        assert!(unescape_literal("'a'b'").is_err());
        assert!(unescape_literal("'\\x4'").is_err());
        assert!(unescape_literal("'\\uD83D'").is_err());
    }

    #[test]
    fn test_unescape_identity_escapes() {
        assert_eq!(unescape_literal("'\\q\\$'").unwrap(), "q$");
        assert_eq!(unescape_literal("'\\\u{1f600}'").unwrap(), "\u{1f600}");
        assert_eq!(unescape_literal("\"a\\\u{10ffff}b\"").unwrap(), "a\u{10ffff}b");
    }

    proptest! {
        #[test]
        fn prop_escape_is_reversible(text in any::<String>()) {
            for style in QuoteStyle::ALL {
                let literal = escape_literal(&text, style);
                prop_assert!(literal.is_ascii());
                prop_assert_eq!(literal.len(), escaped_len(&text, style));
                prop_assert_eq!(unescape_literal(&literal).unwrap(), text.clone());
            }
        }
    }
}
