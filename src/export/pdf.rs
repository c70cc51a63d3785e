//! PDF adapter.
//!
//! Renders the element directly as text: table rows are laid out in aligned
//! columns, other content as wrapped paragraphs, paginated into a
//! [`PdfDocument`]. The optional hook from
//! [`PdfOptions`](crate::config::PdfOptions) runs exactly once on the
//! in-progress document before it is rendered to bytes, whether the result
//! is downloaded or returned.

use pdf_writer::{Content, Name, Pdf, Rect, Ref, Str};

use crate::codec;
use crate::config::{ExportConfig, PdfOptions};
use crate::dom::Fragment;
use crate::error::Result;
use crate::table::Table;

use super::{ExportContext, ExportOutput, Exporter};

/// Approximate glyph advance as a fraction of the font size, used for
/// column sizing and line wrapping with the built-in font.
const CHAR_WIDTH_FACTOR: f32 = 0.6;

/// Gap between table columns, in characters.
const COLUMN_GAP: usize = 2;

pub struct PdfExporter;

impl Exporter for PdfExporter {
    fn export(
        &self,
        ctx: &ExportContext<'_>,
        fragment: &Fragment,
        config: &mut ExportConfig,
    ) -> Result<ExportOutput> {
        let table = Table::extract(fragment);
        let options = &config.options.pdf;

        let mut document = if table.is_empty() {
            PdfDocument::from_text(&fragment.text(), options)
        } else {
            PdfDocument::from_table(&table, options)
        };

        if let Some(hook) = &options.hook {
            hook(&mut document);
        }

        let bytes = document.render();
        let data_url = codec::encode(config.format.mime_type(), &bytes);
        ctx.finish(config, data_url)
    }
}

/// One positioned text run.
#[derive(Debug, Clone, PartialEq)]
pub struct PdfText {
    pub x: f32,
    pub y: f32,
    pub size: f32,
    pub text: String,
}

/// One page of positioned text runs.
#[derive(Debug, Clone, Default)]
pub struct PdfPage {
    pub texts: Vec<PdfText>,
}

/// The in-progress document handed to the finalization hook.
///
/// Coordinates are PDF points with the origin at the bottom-left corner.
#[derive(Debug, Clone)]
pub struct PdfDocument {
    pub page_width: f32,
    pub page_height: f32,
    pub margin: f32,
    pub font_size: f32,
    pub pages: Vec<PdfPage>,
}

impl PdfDocument {
    fn empty(options: &PdfOptions) -> Self {
        Self {
            page_width: options.page_width,
            page_height: options.page_height,
            margin: options.margin,
            font_size: options.font_size,
            pages: vec![PdfPage::default()],
        }
    }

    /// Lay a table out in aligned columns, one row per line.
    pub fn from_table(table: &Table, options: &PdfOptions) -> Self {
        let mut document = Self::empty(options);
        let char_width = options.font_size * CHAR_WIDTH_FACTOR;

        let column_count = table.rows().iter().map(Vec::len).max().unwrap_or(0);
        let mut widths = vec![0usize; column_count];
        for row in table.rows() {
            for (j, cell) in row.iter().enumerate() {
                widths[j] = widths[j].max(cell.chars().count());
            }
        }

        let mut offsets = Vec::with_capacity(column_count);
        let mut x = options.margin;
        for width in &widths {
            offsets.push(x);
            x += (*width + COLUMN_GAP) as f32 * char_width;
        }

        let mut cursor = Cursor::start(&document);
        for row in table.rows() {
            let y = cursor.advance(&mut document);
            for (j, cell) in row.iter().enumerate() {
                if cell.is_empty() {
                    continue;
                }
                document.push_text(offsets[j], y, cell);
            }
        }
        document
    }

    /// Wrap plain text into left-aligned lines.
    pub fn from_text(text: &str, options: &PdfOptions) -> Self {
        let mut document = Self::empty(options);
        let char_width = options.font_size * CHAR_WIDTH_FACTOR;
        let usable = (options.page_width - 2.0 * options.margin).max(char_width);
        let max_chars = (usable / char_width).floor().max(1.0) as usize;

        let mut cursor = Cursor::start(&document);
        let mut line = String::new();
        for word in text.split_whitespace() {
            if !line.is_empty() && line.chars().count() + 1 + word.chars().count() > max_chars {
                let y = cursor.advance(&mut document);
                let x = document.margin;
                document.push_text(x, y, &line);
                line.clear();
            }
            if !line.is_empty() {
                line.push(' ');
            }
            line.push_str(word);
        }
        if !line.is_empty() {
            let y = cursor.advance(&mut document);
            let x = document.margin;
            document.push_text(x, y, &line);
        }
        document
    }

    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// Add a text run to an existing page; hooks use this for headers,
    /// footers, and page numbers. Out-of-range pages are ignored.
    pub fn add_text(&mut self, page: usize, x: f32, y: f32, size: f32, text: impl Into<String>) {
        if let Some(page) = self.pages.get_mut(page) {
            page.texts.push(PdfText {
                x,
                y,
                size,
                text: text.into(),
            });
        }
    }

    fn push_text(&mut self, x: f32, y: f32, text: &str) {
        let size = self.font_size;
        if let Some(page) = self.pages.last_mut() {
            page.texts.push(PdfText {
                x,
                y,
                size,
                text: text.to_string(),
            });
        }
    }

    /// Render the document to PDF bytes.
    pub fn render(&self) -> Vec<u8> {
        let mut pdf = Pdf::new();
        let mut alloc = Ref::new(1);

        let catalog_id = alloc.bump();
        let page_tree_id = alloc.bump();
        let font_id = alloc.bump();
        let font_name = Name(b"F1");

        let page_refs: Vec<(Ref, Ref)> = self
            .pages
            .iter()
            .map(|_| (alloc.bump(), alloc.bump()))
            .collect();

        pdf.catalog(catalog_id).pages(page_tree_id);
        pdf.pages(page_tree_id)
            .kids(page_refs.iter().map(|(page_id, _)| *page_id))
            .count(self.pages.len() as i32);
        pdf.type1_font(font_id).base_font(Name(b"Helvetica"));

        for (page, (page_id, content_id)) in self.pages.iter().zip(&page_refs) {
            {
                let mut page_writer = pdf.page(*page_id);
                page_writer.media_box(Rect::new(0.0, 0.0, self.page_width, self.page_height));
                page_writer.parent(page_tree_id);
                page_writer.contents(*content_id);
                page_writer.resources().fonts().pair(font_name, font_id);
            }

            let mut content = Content::new();
            for text in &page.texts {
                content.begin_text();
                content.set_font(font_name, text.size);
                content.next_line(text.x, text.y);
                content.show(Str(text.text.as_bytes()));
                content.end_text();
            }
            pdf.stream(*content_id, &content.finish());
        }

        pdf.finish()
    }
}

/// Tracks the vertical write position, breaking to a fresh page when the
/// bottom margin is reached.
struct Cursor {
    y: f32,
    line_height: f32,
}

impl Cursor {
    fn start(document: &PdfDocument) -> Self {
        Self {
            y: document.page_height - document.margin,
            line_height: document.font_size * 1.5,
        }
    }

    /// Move down one line and return the baseline for it.
    fn advance(&mut self, document: &mut PdfDocument) -> f32 {
        self.y -= self.line_height;
        if self.y < document.margin {
            document.pages.push(PdfPage::default());
            self.y = document.page_height - document.margin - self.line_height;
        }
        self.y
    }
}
