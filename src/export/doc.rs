//! DOC/DOCX adapter.
//!
//! Converts the element into a minimal WordprocessingML package: table rows
//! become a `w:tbl`, anything else becomes plain paragraphs. Both format
//! tags share this writer; only the file extension differs.

use std::io::{Cursor, Write};

use zip::CompressionMethod;
use zip::ZipWriter;
use zip::write::SimpleFileOptions;

use crate::codec;
use crate::config::{DocOptions, ExportConfig};
use crate::dom::Fragment;
use crate::error::Result;
use crate::table::Table;
use crate::util::escape_xml;

use super::{ExportContext, ExportOutput, Exporter};

/// WordprocessingML main namespace.
const W_NS: &str = "http://schemas.openxmlformats.org/wordprocessingml/2006/main";

/// A4 page size in twentieths of a point.
const PAGE_W: u32 = 11906;
const PAGE_H: u32 = 16838;

const CONTENT_TYPES: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types"><Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/><Default Extension="xml" ContentType="application/xml"/><Override PartName="/word/document.xml" ContentType="application/vnd.openxmlformats-officedocument.wordprocessingml.document.main+xml"/></Types>"#;

const PACKAGE_RELS: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships"><Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="word/document.xml"/></Relationships>"#;

pub struct DocExporter;

impl Exporter for DocExporter {
    fn export(
        &self,
        ctx: &ExportContext<'_>,
        fragment: &Fragment,
        config: &mut ExportConfig,
    ) -> Result<ExportOutput> {
        let document = document_xml(fragment, &config.options.doc);
        let package = write_package(&document)?;
        let data_url = codec::encode(config.format.mime_type(), &package);
        ctx.finish(config, data_url)
    }
}

fn write_package(document_xml: &str) -> Result<Vec<u8>> {
    let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
    let deflated = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);

    zip.start_file("[Content_Types].xml", deflated)?;
    zip.write_all(CONTENT_TYPES.as_bytes())?;

    zip.start_file("_rels/.rels", deflated)?;
    zip.write_all(PACKAGE_RELS.as_bytes())?;

    zip.start_file("word/document.xml", deflated)?;
    zip.write_all(document_xml.as_bytes())?;

    Ok(zip.finish()?.into_inner())
}

fn document_xml(fragment: &Fragment, options: &DocOptions) -> String {
    let mut xml = String::new();
    xml.push_str(r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#);
    xml.push_str(&format!(r#"<w:document xmlns:w="{W_NS}">"#));
    xml.push_str("<w:body>");

    let table = Table::extract(fragment);
    if table.is_empty() {
        write_paragraph(&mut xml, &fragment.text());
    } else {
        write_table(&mut xml, &table);
        // Word requires a paragraph after a trailing table
        xml.push_str("<w:p/>");
    }

    write_section(&mut xml, options);
    xml.push_str("</w:body>");
    xml.push_str("</w:document>");
    xml
}

fn write_table(xml: &mut String, table: &Table) {
    xml.push_str("<w:tbl>");
    xml.push_str(
        "<w:tblPr><w:tblW w:w=\"0\" w:type=\"auto\"/><w:tblBorders>\
         <w:top w:val=\"single\" w:sz=\"4\"/><w:left w:val=\"single\" w:sz=\"4\"/>\
         <w:bottom w:val=\"single\" w:sz=\"4\"/><w:right w:val=\"single\" w:sz=\"4\"/>\
         <w:insideH w:val=\"single\" w:sz=\"4\"/><w:insideV w:val=\"single\" w:sz=\"4\"/>\
         </w:tblBorders></w:tblPr>",
    );

    for row in table.rows() {
        xml.push_str("<w:tr>");
        for cell in row {
            xml.push_str("<w:tc>");
            write_paragraph(xml, cell);
            xml.push_str("</w:tc>");
        }
        xml.push_str("</w:tr>");
    }

    xml.push_str("</w:tbl>");
}

fn write_paragraph(xml: &mut String, text: &str) {
    if text.is_empty() {
        xml.push_str("<w:p/>");
        return;
    }
    xml.push_str("<w:p><w:r><w:t>");
    xml.push_str(&escape_xml(text));
    xml.push_str("</w:t></w:r></w:p>");
}

fn write_section(xml: &mut String, options: &DocOptions) {
    if options.landscape {
        xml.push_str(&format!(
            "<w:sectPr><w:pgSz w:w=\"{PAGE_H}\" w:h=\"{PAGE_W}\" w:orient=\"landscape\"/></w:sectPr>"
        ));
    } else {
        xml.push_str(&format!(
            "<w:sectPr><w:pgSz w:w=\"{PAGE_W}\" w:h=\"{PAGE_H}\"/></w:sectPr>"
        ));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Format;
    use crate::download::Downloader;
    use std::io::Read;
    use zip::ZipArchive;

    fn document_part(package: &[u8]) -> String {
        let mut archive = ZipArchive::new(Cursor::new(package.to_vec())).unwrap();
        let mut part = archive.by_name("word/document.xml").unwrap();
        let mut content = String::new();
        part.read_to_string(&mut content).unwrap();
        content
    }

    #[test]
    fn test_table_becomes_wordprocessing_table() {
        let fragment = Fragment::from_markup(
            "<table><tr><th>Name</th></tr><tr><td>John</td></tr></table>".to_string(),
        );
        let xml = document_xml(&fragment, &DocOptions::default());
        assert!(xml.contains("<w:tbl>"));
        assert!(xml.contains("<w:tc><w:p><w:r><w:t>John</w:t></w:r></w:p></w:tc>"));
        assert!(xml.contains("<w:pgSz w:w=\"11906\" w:h=\"16838\"/>"));
    }

    #[test]
    fn test_non_table_content_becomes_paragraph() {
        let fragment = Fragment::from_markup("<p>Hello <b>world</b></p>".to_string());
        let xml = document_xml(&fragment, &DocOptions::default());
        assert!(!xml.contains("<w:tbl>"));
        assert!(xml.contains("<w:t>Hello world</w:t>"));
    }

    #[test]
    fn test_landscape_section() {
        let fragment = Fragment::from_markup("<p>x</p>".to_string());
        let options = DocOptions { landscape: true };
        let xml = document_xml(&fragment, &options);
        assert!(xml.contains("w:orient=\"landscape\""));
        assert!(xml.contains("<w:pgSz w:w=\"16838\" w:h=\"11906\""));
    }

    #[test]
    fn test_cell_text_is_escaped() {
        let fragment =
            Fragment::from_markup("<table><tr><td>a &amp; b</td></tr></table>".to_string());
        let xml = document_xml(&fragment, &DocOptions::default());
        assert!(xml.contains("<w:t>a &amp; b</w:t>"));
    }

    #[test]
    fn test_package_layout_and_mime() {
        let dir = tempfile::tempdir().unwrap();
        let downloader = Downloader::new(dir.path());
        let ctx = ExportContext {
            downloader: &downloader,
            rasterizer: None,
        };
        let fragment = Fragment::from_markup("<table><tr><td>a</td></tr></table>".to_string());
        let mut config = ExportConfig::new(Format::Docx, "ignored");

        let output = DocExporter.export(&ctx, &fragment, &mut config).unwrap();
        let url = output.as_data_url().unwrap();
        assert!(url.starts_with(
            "data:application/vnd.openxmlformats-officedocument.wordprocessingml.document;base64,"
        ));

        let blob = codec::to_blob(url).unwrap();
        assert!(document_part(&blob.data).contains("<w:tbl>"));
    }
}
