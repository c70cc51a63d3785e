//! Host document parsing and source resolution.
//!
//! Export sources are resolved against a [`Document`] the caller parses
//! from markup. Resolution never mutates the document.

use std::borrow::Cow;

use scraper::{Html, Selector};

use crate::error::{Error, Result};
use crate::util;

/// A parsed host document that export sources are resolved against.
pub struct Document {
    html: Html,
}

impl Document {
    /// Parse a full HTML document from markup.
    pub fn parse(markup: &str) -> Self {
        Self {
            html: Html::parse_document(markup),
        }
    }

    /// Parse a document from raw bytes, detecting the encoding.
    pub fn from_bytes(bytes: &[u8]) -> Self {
        Self::parse(&decode_markup(bytes))
    }

    /// Resolve an export source to a [`Fragment`].
    ///
    /// The source is an element id first; when no element carries that id and
    /// the string itself contains markup, it is used directly as literal
    /// content. Anything else is [`Error::ElementNotFound`].
    pub fn resolve(&self, id_or_content: &str) -> Result<Fragment> {
        let selector = Selector::parse("[id]").expect("constant selector");
        for element in self.html.select(&selector) {
            if element.value().attr("id") == Some(id_or_content) {
                return Ok(Fragment::from_markup(element.html()));
            }
        }

        if id_or_content.contains('<') {
            return Ok(Fragment::from_markup(id_or_content.to_string()));
        }

        Err(Error::ElementNotFound(id_or_content.to_string()))
    }
}

/// Decode host HTML bytes, detecting the encoding (UTF-8 first, then
/// Windows-1252).
pub fn decode_markup(bytes: &[u8]) -> Cow<'_, str> {
    util::decode_text(bytes)
}

/// The resolved source of one export: the outer markup of the matched
/// element, or the literal content the caller supplied.
#[derive(Debug, Clone)]
pub struct Fragment {
    markup: String,
}

impl Fragment {
    pub fn from_markup(markup: String) -> Self {
        Self { markup }
    }

    /// The fragment's markup.
    pub fn markup(&self) -> &str {
        &self.markup
    }

    /// The fragment's rendered text content, whitespace-normalized.
    pub fn text(&self) -> String {
        let parsed = Html::parse_fragment(&self.markup);
        let text: String = parsed.root_element().text().collect::<Vec<_>>().join(" ");
        util::normalize_ws(&text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DOC: &str = r#"<html><body>
        <p id="intro">Hello</p>
        <table id="data"><tr><td>a</td></tr></table>
    </body></html>"#;

    #[test]
    fn test_resolve_by_id() {
        let doc = Document::parse(DOC);
        let fragment = doc.resolve("data").unwrap();
        assert!(fragment.markup().starts_with("<table"));
        assert!(fragment.markup().contains("<td>a</td>"));
    }

    #[test]
    fn test_resolve_missing_id() {
        let doc = Document::parse(DOC);
        let err = doc.resolve("nope").unwrap_err();
        assert!(matches!(err, Error::ElementNotFound(id) if id == "nope"));
    }

    #[test]
    fn test_resolve_literal_markup() {
        let doc = Document::parse(DOC);
        let fragment = doc.resolve("<p>inline</p>").unwrap();
        assert_eq!(fragment.markup(), "<p>inline</p>");
    }

    #[test]
    fn test_fragment_text() {
        let fragment = Fragment::from_markup("<p>Hello   <b>world</b></p>".to_string());
        assert_eq!(fragment.text(), "Hello world");
    }

    #[test]
    fn test_from_bytes_cp1252() {
        let doc = Document::from_bytes(b"<p id=\"x\">caf\xE9</p>");
        let fragment = doc.resolve("x").unwrap();
        assert_eq!(fragment.text(), "café");
    }
}
