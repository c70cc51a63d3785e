//! Small shared helpers: input decoding and XML text escaping.

use std::borrow::Cow;

/// Decode host HTML bytes to a string.
///
/// Tries UTF-8 first (BOM handled by encoding_rs), then falls back to
/// Windows-1252, which is a superset of ISO-8859-1 and covers most legacy
/// pages. Returns `Cow` to avoid allocation for valid UTF-8.
pub(crate) fn decode_text(bytes: &[u8]) -> Cow<'_, str> {
    let (result, _encoding, malformed) = encoding_rs::UTF_8.decode(bytes);
    if !malformed {
        return result;
    }

    let (result, _, _) = encoding_rs::WINDOWS_1252.decode(bytes);
    result
}

/// Escape text for inclusion in XML content or attribute values.
pub(crate) fn escape_xml(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => result.push_str("&amp;"),
            '<' => result.push_str("&lt;"),
            '>' => result.push_str("&gt;"),
            '"' => result.push_str("&quot;"),
            '\'' => result.push_str("&#39;"),
            _ => result.push(c),
        }
    }
    result
}

/// Collapse runs of whitespace to single spaces and trim the ends.
///
/// The rendered-text analog of what a browser reports for a table cell.
pub(crate) fn normalize_ws(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_text_utf8() {
        assert_eq!(decode_text("héllo".as_bytes()), "héllo");
    }

    #[test]
    fn test_decode_text_windows_1252_fallback() {
        // 0xE9 is é in CP1252 but malformed as UTF-8
        assert_eq!(decode_text(&[b'h', 0xE9, b'l']), "hél");
    }

    #[test]
    fn test_escape_xml() {
        assert_eq!(escape_xml(r#"a<b>&"c'"#), "a&lt;b&gt;&amp;&quot;c&#39;");
        assert_eq!(escape_xml("plain"), "plain");
    }

    #[test]
    fn test_normalize_ws() {
        assert_eq!(normalize_ws("  New\n   York \t"), "New York");
        assert_eq!(normalize_ws(""), "");
    }
}
