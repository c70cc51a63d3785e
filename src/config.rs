//! Export configuration: target format, source, and per-format options.

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::export::pdf::PdfDocument;

/// Supported export formats.
///
/// The tag doubles as the file extension appended by
/// [`ExportAs::save`](crate::ExportAs::save).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Format {
    Pdf,
    Png,
    Xlsx,
    Xls,
    Docx,
    Doc,
    Txt,
    Csv,
    Json,
    Xml,
}

impl Format {
    /// The lowercase format tag (`"pdf"`, `"xlsx"`, ...).
    pub fn as_str(self) -> &'static str {
        match self {
            Format::Pdf => "pdf",
            Format::Png => "png",
            Format::Xlsx => "xlsx",
            Format::Xls => "xls",
            Format::Docx => "docx",
            Format::Doc => "doc",
            Format::Txt => "txt",
            Format::Csv => "csv",
            Format::Json => "json",
            Format::Xml => "xml",
        }
    }

    /// File extension for this format (identical to the tag).
    pub fn extension(self) -> &'static str {
        self.as_str()
    }

    /// Declared MIME type of the encoded payload.
    ///
    /// `xls` and `xlsx` share the spreadsheetml type, and `txt` shares
    /// `text/csv` because its content is CSV saved under another extension.
    pub fn mime_type(self) -> &'static str {
        match self {
            Format::Pdf => "application/pdf",
            Format::Png => "image/png",
            Format::Xlsx | Format::Xls => {
                "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet"
            }
            Format::Docx | Format::Doc => {
                "application/vnd.openxmlformats-officedocument.wordprocessingml.document"
            }
            Format::Txt | Format::Csv => "text/csv",
            Format::Json => "text/json",
            Format::Xml => "text/xml",
        }
    }

    /// Parse a format tag, case-insensitively.
    ///
    /// Unrecognized tags are a contract violation and yield
    /// [`Error::UnsupportedFormat`], never a silent fallback.
    pub fn from_tag(tag: &str) -> Result<Format> {
        match tag.to_ascii_uppercase().as_str() {
            "PDF" => Ok(Format::Pdf),
            "PNG" => Ok(Format::Png),
            "XLSX" => Ok(Format::Xlsx),
            "XLS" => Ok(Format::Xls),
            "DOCX" => Ok(Format::Docx),
            "DOC" => Ok(Format::Doc),
            "TXT" => Ok(Format::Txt),
            "CSV" => Ok(Format::Csv),
            "JSON" => Ok(Format::Json),
            "XML" => Ok(Format::Xml),
            _ => Err(Error::UnsupportedFormat(tag.to_string())),
        }
    }

    /// Detect the format from a file path's extension.
    pub fn from_path(path: &Path) -> Result<Format> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .ok_or_else(|| Error::UnsupportedFormat(path.display().to_string()))?;
        Format::from_tag(ext)
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Format {
    type Err = Error;

    fn from_str(s: &str) -> Result<Format> {
        Format::from_tag(s)
    }
}

/// One export request.
///
/// Constructed per call and mutated in place by the dispatcher:
/// [`ExportAs::save`](crate::ExportAs::save) forces `download` on and rewrites
/// `file_name`, and the TXT adapter swaps the extension. Nothing is retained
/// between exports.
pub struct ExportConfig {
    /// Target format.
    pub format: Format,
    /// Element id to look up in the host document, or literal markup.
    ///
    /// Resolution tries the id first; a string containing markup is used
    /// directly as content when no element matches.
    pub source: String,
    /// When true the adapter saves a file instead of returning a payload.
    pub download: bool,
    /// Output file name including extension. Set by `save`; optional for
    /// `get`.
    pub file_name: Option<String>,
    /// Format-specific options, opaque to the dispatcher.
    pub options: ExportOptions,
}

impl ExportConfig {
    pub fn new(format: Format, source: impl Into<String>) -> Self {
        Self {
            format,
            source: source.into(),
            download: false,
            file_name: None,
            options: ExportOptions::default(),
        }
    }
}

/// Per-format option bags. Each adapter reads only its own bag.
#[derive(Default)]
pub struct ExportOptions {
    pub raster: RasterOptions,
    pub pdf: PdfOptions,
    pub sheet: SheetOptions,
    pub doc: DocOptions,
}

/// Options passed through verbatim to the configured
/// [`Rasterizer`](crate::Rasterizer). The PNG adapter does not interpret
/// them.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RasterOptions {
    /// Device scale factor.
    pub scale: Option<f64>,
    /// Background fill, CSS color syntax.
    pub background_color: Option<String>,
    /// Free-form extras for rasterizer implementations.
    #[serde(default)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// Callback invoked with the in-progress PDF before it is finalized.
///
/// Runs exactly once per export, whether the result is downloaded or
/// returned. Used for header/footer/page-number injection.
pub type PdfHook = Box<dyn Fn(&mut PdfDocument) + Send + Sync>;

/// PDF layout options.
pub struct PdfOptions {
    /// Page width in points.
    pub page_width: f32,
    /// Page height in points.
    pub page_height: f32,
    /// Margin on all sides in points.
    pub margin: f32,
    /// Body font size in points.
    pub font_size: f32,
    /// Optional pre-finalization hook.
    pub hook: Option<PdfHook>,
}

impl Default for PdfOptions {
    fn default() -> Self {
        // A4 portrait
        Self {
            page_width: 595.28,
            page_height: 841.89,
            margin: 48.0,
            font_size: 12.0,
            hook: None,
        }
    }
}

impl fmt::Debug for PdfOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PdfOptions")
            .field("page_width", &self.page_width)
            .field("page_height", &self.page_height)
            .field("margin", &self.margin)
            .field("font_size", &self.font_size)
            .field("hook", &self.hook.is_some())
            .finish()
    }
}

/// Workbook writer options.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SheetOptions {
    /// Worksheet name. Defaults to the output file name, then `Sheet1`.
    pub sheet_name: Option<String>,
}

/// Word-processor writer options.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DocOptions {
    /// Emit a landscape page section.
    pub landscape: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_tag_roundtrip() {
        for tag in [
            "pdf", "png", "xlsx", "xls", "docx", "doc", "txt", "csv", "json", "xml",
        ] {
            let format = Format::from_tag(tag).unwrap();
            assert_eq!(format.as_str(), tag);
            assert_eq!(format.extension(), tag);
        }
    }

    #[test]
    fn test_format_tag_case_insensitive() {
        assert_eq!(Format::from_tag("PDF").unwrap(), Format::Pdf);
        assert_eq!(Format::from_tag("Xlsx").unwrap(), Format::Xlsx);
    }

    #[test]
    fn test_unknown_tag_is_an_error() {
        let err = Format::from_tag("bmp").unwrap_err();
        assert!(matches!(err, Error::UnsupportedFormat(tag) if tag == "bmp"));
    }

    #[test]
    fn test_mime_contract() {
        assert_eq!(Format::Csv.mime_type(), "text/csv");
        assert_eq!(Format::Txt.mime_type(), "text/csv");
        assert_eq!(Format::Json.mime_type(), "text/json");
        assert_eq!(Format::Xml.mime_type(), "text/xml");
        assert_eq!(
            Format::Xls.mime_type(),
            "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet"
        );
        assert_eq!(Format::Xlsx.mime_type(), Format::Xls.mime_type());
        assert_eq!(Format::Png.mime_type(), "image/png");
        assert_eq!(Format::Pdf.mime_type(), "application/pdf");
    }

    #[test]
    fn test_format_from_path() {
        assert_eq!(
            Format::from_path(Path::new("out/report.xlsx")).unwrap(),
            Format::Xlsx
        );
        assert!(Format::from_path(Path::new("report.bmp")).is_err());
        assert!(Format::from_path(Path::new("report")).is_err());
    }
}
