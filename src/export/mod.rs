//! Export dispatch and format adapters.
//!
//! [`ExportAs`] is the single entry point. It resolves the configured source
//! against the host document, then routes the request to one adapter per
//! format through an exhaustive `match`, so an unhandled format is a compile
//! error rather than a runtime lookup miss.
//!
//! Every adapter follows one contract: with `download` unset it returns an
//! encoded payload (a data-URL, or live records for JSON) and touches
//! nothing; with `download` set it triggers exactly one file save and
//! returns [`ExportOutput::Downloaded`]. Source content is never modified.

use std::path::PathBuf;
use std::sync::Arc;

use crate::config::{ExportConfig, Format};
use crate::dom::{Document, Fragment};
use crate::download::Downloader;
use crate::error::Result;
use crate::raster::Rasterizer;

mod csv;
mod doc;
mod json;
pub(crate) mod pdf;
mod png;
mod sheet;
mod xml;

pub use csv::{CsvExporter, TxtExporter};
pub use doc::DocExporter;
pub use json::JsonExporter;
pub use pdf::{PdfDocument, PdfExporter, PdfPage, PdfText};
pub use png::PngExporter;
pub use sheet::SheetExporter;
pub use xml::XmlExporter;

/// What an export produced.
#[derive(Debug, Clone, PartialEq)]
pub enum ExportOutput {
    /// Base64-framed data-URL payload.
    DataUrl(String),
    /// Live records; only the JSON format returns these.
    Records(Vec<serde_json::Map<String, serde_json::Value>>),
    /// The payload was saved to disk; nothing is returned.
    Downloaded,
}

impl ExportOutput {
    pub fn as_data_url(&self) -> Option<&str> {
        match self {
            ExportOutput::DataUrl(url) => Some(url),
            _ => None,
        }
    }
}

/// Capabilities an adapter may draw on during one export.
pub struct ExportContext<'a> {
    pub downloader: &'a Downloader,
    pub rasterizer: Option<&'a dyn Rasterizer>,
}

impl ExportContext<'_> {
    /// Shared adapter tail: download the data-URL when the config asks for
    /// it, return it otherwise.
    pub(crate) fn finish(
        &self,
        config: &ExportConfig,
        data_url: String,
    ) -> Result<ExportOutput> {
        if config.download {
            let file_name = effective_file_name(config);
            self.downloader.save_data_url(&file_name, &data_url)?;
            Ok(ExportOutput::Downloaded)
        } else {
            Ok(ExportOutput::DataUrl(data_url))
        }
    }
}

pub(crate) fn effective_file_name(config: &ExportConfig) -> String {
    config
        .file_name
        .clone()
        .unwrap_or_else(|| format!("export.{}", config.format.extension()))
}

/// Per-format conversion implementation behind the dispatcher.
pub trait Exporter {
    /// Convert the resolved fragment according to `config`.
    fn export(
        &self,
        ctx: &ExportContext<'_>,
        fragment: &Fragment,
        config: &mut ExportConfig,
    ) -> Result<ExportOutput>;
}

/// The export service: resolves sources, dispatches to adapters, and owns
/// the download directory and optional host capabilities.
///
/// # Example
///
/// ```
/// use export_as::{Document, ExportAs, ExportConfig, Format};
///
/// let doc = Document::parse(
///     r#"<table id="t"><tr><th>Name</th></tr><tr><td>John</td></tr></table>"#,
/// );
/// let service = ExportAs::new();
/// let mut config = ExportConfig::new(Format::Csv, "t");
/// let output = service.get(&doc, &mut config)?;
/// assert!(output.as_data_url().unwrap().starts_with("data:text/csv;base64,"));
/// # Ok::<(), export_as::Error>(())
/// ```
pub struct ExportAs {
    downloader: Downloader,
    rasterizer: Option<Arc<dyn Rasterizer>>,
}

impl ExportAs {
    /// Create a service that saves downloads to the current directory.
    pub fn new() -> Self {
        Self {
            downloader: Downloader::default(),
            rasterizer: None,
        }
    }

    /// Save downloads beneath `dir` instead.
    pub fn with_output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.downloader = Downloader::new(dir);
        self
    }

    /// Supply the rasterization capability used by the PNG adapter.
    pub fn with_rasterizer(mut self, rasterizer: Arc<dyn Rasterizer>) -> Self {
        self.rasterizer = Some(rasterizer);
        self
    }

    /// Run one export and return its payload, or nothing if
    /// `config.download` asked for a file save.
    pub fn get(&self, document: &Document, config: &mut ExportConfig) -> Result<ExportOutput> {
        let fragment = document.resolve(&config.source)?;
        let ctx = ExportContext {
            downloader: &self.downloader,
            rasterizer: self.rasterizer.as_deref(),
        };

        match config.format {
            Format::Csv => CsvExporter.export(&ctx, &fragment, config),
            Format::Txt => TxtExporter.export(&ctx, &fragment, config),
            Format::Json => JsonExporter.export(&ctx, &fragment, config),
            Format::Xml => XmlExporter.export(&ctx, &fragment, config),
            Format::Xls | Format::Xlsx => SheetExporter.export(&ctx, &fragment, config),
            Format::Doc | Format::Docx => DocExporter.export(&ctx, &fragment, config),
            Format::Pdf => PdfExporter.export(&ctx, &fragment, config),
            Format::Png => PngExporter.export(&ctx, &fragment, config),
        }
    }

    /// Convenience wrapper guaranteeing a file save: forces `download`,
    /// names the file `<base_name>.<format>` regardless of any prior
    /// `file_name`, then runs [`get`](Self::get).
    pub fn save(
        &self,
        document: &Document,
        config: &mut ExportConfig,
        base_name: &str,
    ) -> Result<()> {
        config.download = true;
        config.file_name = Some(format!("{base_name}.{}", config.format.extension()));
        self.get(document, config).map(|_| ())
    }
}

impl Default for ExportAs {
    fn default() -> Self {
        Self::new()
    }
}
