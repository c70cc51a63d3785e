//! Data-URL / blob codec.
//!
//! Every adapter except JSON frames its payload as a base64 data-URL
//! (`data:<mime>;base64,<data>`). This module converts between that framing
//! and raw bytes.

use base64::Engine;
use base64::engine::general_purpose::STANDARD;

use crate::error::{Error, Result};

const BASE64_MARKER: &str = ";base64,";

/// Decoded binary content plus its declared MIME type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Blob {
    pub mime: String,
    pub data: Vec<u8>,
}

impl Blob {
    pub fn new(mime: impl Into<String>, data: Vec<u8>) -> Self {
        Self {
            mime: mime.into(),
            data,
        }
    }
}

/// Frame raw bytes as a base64 data-URL with the given MIME type.
pub fn encode(mime: &str, data: &[u8]) -> String {
    format!("data:{mime};base64,{}", STANDARD.encode(data))
}

/// Frame an already-encoded UTF-8 string as a base64 data-URL.
pub fn encode_text(mime: &str, text: &str) -> String {
    encode(mime, text.as_bytes())
}

/// Parse a data-URL back into a [`Blob`].
///
/// Fails with [`Error::MalformedDataUrl`] when the `data:<mime>;base64,`
/// prefix grammar does not match or the payload is not valid base64.
pub fn to_blob(data_url: &str) -> Result<Blob> {
    let malformed = || Error::MalformedDataUrl(preview(data_url));

    let rest = data_url.strip_prefix("data:").ok_or_else(malformed)?;
    let marker = rest.find(BASE64_MARKER).ok_or_else(malformed)?;
    let mime = &rest[..marker];
    let payload = &rest[marker + BASE64_MARKER.len()..];

    let data = STANDARD.decode(payload).map_err(|_| malformed())?;
    Ok(Blob::new(mime, data))
}

/// Strip the `data:<mime>;base64,` prefix, leaving the raw base64 payload.
///
/// A string without the prefix is returned unchanged; callers probe
/// optimistically and treat the miss as a no-op rather than an error.
pub fn strip_prefix(data_url: &str) -> &str {
    if let Some(rest) = data_url.strip_prefix("data:")
        && let Some(marker) = rest.find(BASE64_MARKER)
    {
        return &rest[marker + BASE64_MARKER.len()..];
    }
    data_url
}

/// Prepend a `data:<mime>;base64,` prefix to a raw base64 payload.
pub fn add_prefix(content: &str, mime: &str) -> String {
    format!("data:{mime};base64,{content}")
}

fn preview(s: &str) -> String {
    // keep error context short
    let cut = s.char_indices().nth(32).map_or(s.len(), |(i, _)| i);
    s[..cut].to_string()
}
