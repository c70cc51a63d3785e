//! # export-as
//!
//! A library for exporting an HTML element, typically a table, to PDF,
//! PNG, CSV, TXT, XLS/XLSX, DOC/DOCX, JSON, or XML.
//!
//! ## Features
//!
//! - Resolve the export source by element id, or pass literal markup
//! - Return the encoded payload as a base64 data-URL, or save it to disk
//! - Table-aware adapters: CSV fields, JSON records, XML classes,
//!   spreadsheet cells, word-processor tables, PDF column layout
//! - Pluggable rasterization capability for PNG output
//!
//! ## Quick Start
//!
//! ```no_run
//! use export_as::{Document, ExportAs, ExportConfig, Format};
//!
//! let document = Document::parse(r#"
//!     <table id="people">
//!         <tr><th>Name</th><th>Age</th></tr>
//!         <tr><td>John</td><td>30</td></tr>
//!     </table>
//! "#);
//!
//! let service = ExportAs::new();
//!
//! // Retrieve the payload without saving anything
//! let mut config = ExportConfig::new(Format::Csv, "people");
//! let output = service.get(&document, &mut config)?;
//! assert!(output.as_data_url().unwrap().starts_with("data:text/csv;base64,"));
//!
//! // Or save `people.xlsx` beneath the output directory
//! let mut config = ExportConfig::new(Format::Xlsx, "people");
//! service.save(&document, &mut config, "people")?;
//! # Ok::<(), export_as::Error>(())
//! ```
//!
//! ## Capabilities
//!
//! Rasterization (for PNG) is consumed from the embedder, never
//! reimplemented: supply a [`Rasterizer`] through
//! [`ExportAs::with_rasterizer`]. All other formats are self-contained.

pub mod codec;
pub mod config;
pub mod dom;
pub mod download;
pub mod error;
pub mod export;
pub mod raster;
pub mod table;
pub(crate) mod util;

pub use config::{
    DocOptions, ExportConfig, ExportOptions, Format, PdfHook, PdfOptions, RasterOptions,
    SheetOptions,
};
pub use codec::Blob;
pub use dom::{Document, Fragment};
pub use download::Downloader;
pub use error::{Error, Result};
pub use export::{ExportAs, ExportOutput, Exporter, PdfDocument};
pub use raster::Rasterizer;
pub use table::Table;
