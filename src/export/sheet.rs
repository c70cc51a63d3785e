//! XLS/XLSX adapter.
//!
//! Builds a single-sheet OOXML workbook: a zip container holding the
//! package boilerplate plus a worksheet of inline-string cells. Both format
//! tags share this writer and the spreadsheetml MIME type; only the file
//! extension differs.

use std::io::{Cursor, Write};

use quick_xml::Writer;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use zip::CompressionMethod;
use zip::ZipWriter;
use zip::write::SimpleFileOptions;

use crate::codec;
use crate::config::ExportConfig;
use crate::dom::Fragment;
use crate::error::Result;
use crate::table::Table;
use crate::util::escape_xml;

use super::{ExportContext, ExportOutput, Exporter};

const XML_HEADER: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#;

const CONTENT_TYPES: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types"><Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/><Default Extension="xml" ContentType="application/xml"/><Override PartName="/xl/workbook.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.sheet.main+xml"/><Override PartName="/xl/worksheets/sheet1.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.worksheet+xml"/></Types>"#;

const PACKAGE_RELS: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships"><Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="xl/workbook.xml"/></Relationships>"#;

const WORKBOOK_RELS: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships"><Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/worksheet" Target="worksheets/sheet1.xml"/></Relationships>"#;

pub struct SheetExporter;

impl Exporter for SheetExporter {
    fn export(
        &self,
        ctx: &ExportContext<'_>,
        fragment: &Fragment,
        config: &mut ExportConfig,
    ) -> Result<ExportOutput> {
        let table = Table::extract(fragment);
        let sheet_name = sheet_name(config);
        let workbook = write_workbook(&table, &sheet_name)?;
        let data_url = codec::encode(config.format.mime_type(), &workbook);
        ctx.finish(config, data_url)
    }
}

fn sheet_name(config: &ExportConfig) -> String {
    let name = config
        .options
        .sheet
        .sheet_name
        .clone()
        .or_else(|| config.file_name.clone())
        .unwrap_or_else(|| "Sheet1".to_string());
    // worksheet names are capped at 31 characters
    name.chars().take(31).collect()
}

fn write_workbook(table: &Table, sheet_name: &str) -> Result<Vec<u8>> {
    let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
    let deflated = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);

    zip.start_file("[Content_Types].xml", deflated)?;
    zip.write_all(CONTENT_TYPES.as_bytes())?;

    zip.start_file("_rels/.rels", deflated)?;
    zip.write_all(PACKAGE_RELS.as_bytes())?;

    zip.start_file("xl/workbook.xml", deflated)?;
    zip.write_all(workbook_xml(sheet_name).as_bytes())?;

    zip.start_file("xl/_rels/workbook.xml.rels", deflated)?;
    zip.write_all(WORKBOOK_RELS.as_bytes())?;

    zip.start_file("xl/worksheets/sheet1.xml", deflated)?;
    zip.write_all(&worksheet_xml(table)?)?;

    Ok(zip.finish()?.into_inner())
}

fn workbook_xml(sheet_name: &str) -> String {
    format!(
        "{XML_HEADER}\n<workbook xmlns=\"http://schemas.openxmlformats.org/spreadsheetml/2006/main\" \
         xmlns:r=\"http://schemas.openxmlformats.org/officeDocument/2006/relationships\">\
         <sheets><sheet name=\"{}\" sheetId=\"1\" r:id=\"rId1\"/></sheets></workbook>",
        escape_xml(sheet_name)
    )
}

fn worksheet_xml(table: &Table) -> Result<Vec<u8>> {
    let mut writer = Writer::new(Vec::new());
    writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), Some("yes"))))?;

    let mut worksheet = BytesStart::new("worksheet");
    worksheet.push_attribute((
        "xmlns",
        "http://schemas.openxmlformats.org/spreadsheetml/2006/main",
    ));
    writer.write_event(Event::Start(worksheet))?;
    writer.write_event(Event::Start(BytesStart::new("sheetData")))?;

    for (row_index, row) in table.rows().iter().enumerate() {
        let mut row_el = BytesStart::new("row");
        row_el.push_attribute(("r", (row_index + 1).to_string().as_str()));
        writer.write_event(Event::Start(row_el))?;

        for (col_index, cell) in row.iter().enumerate() {
            let reference = format!("{}{}", column_ref(col_index), row_index + 1);
            let mut cell_el = BytesStart::new("c");
            cell_el.push_attribute(("r", reference.as_str()));
            cell_el.push_attribute(("t", "inlineStr"));
            writer.write_event(Event::Start(cell_el))?;
            writer.write_event(Event::Start(BytesStart::new("is")))?;
            writer.write_event(Event::Start(BytesStart::new("t")))?;
            writer.write_event(Event::Text(BytesText::new(cell)))?;
            writer.write_event(Event::End(BytesEnd::new("t")))?;
            writer.write_event(Event::End(BytesEnd::new("is")))?;
            writer.write_event(Event::End(BytesEnd::new("c")))?;
        }

        writer.write_event(Event::End(BytesEnd::new("row")))?;
    }

    writer.write_event(Event::End(BytesEnd::new("sheetData")))?;
    writer.write_event(Event::End(BytesEnd::new("worksheet")))?;
    Ok(writer.into_inner())
}

/// Spreadsheet column reference for a zero-based index: A, B, ..., Z, AA.
fn column_ref(mut index: usize) -> String {
    let mut letters = Vec::new();
    loop {
        letters.push((b'A' + (index % 26) as u8) as char);
        if index < 26 {
            break;
        }
        index = index / 26 - 1;
    }
    letters.iter().rev().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Format;
    use crate::download::Downloader;
    use std::io::Read;
    use zip::ZipArchive;

    fn read_part(workbook: &[u8], name: &str) -> String {
        let mut archive = ZipArchive::new(Cursor::new(workbook.to_vec())).unwrap();
        let mut part = archive.by_name(name).unwrap();
        let mut content = String::new();
        part.read_to_string(&mut content).unwrap();
        content
    }

    fn sample_table() -> Table {
        Table::from_rows(vec![
            vec!["Name".to_string(), "Age".to_string()],
            vec!["John".to_string(), "30".to_string()],
        ])
    }

    #[test]
    fn test_column_ref() {
        assert_eq!(column_ref(0), "A");
        assert_eq!(column_ref(25), "Z");
        assert_eq!(column_ref(26), "AA");
        assert_eq!(column_ref(27), "AB");
        assert_eq!(column_ref(701), "ZZ");
    }

    #[test]
    fn test_workbook_contains_all_parts() {
        let workbook = write_workbook(&sample_table(), "Sheet1").unwrap();
        let mut archive = ZipArchive::new(Cursor::new(workbook)).unwrap();
        for part in [
            "[Content_Types].xml",
            "_rels/.rels",
            "xl/workbook.xml",
            "xl/_rels/workbook.xml.rels",
            "xl/worksheets/sheet1.xml",
        ] {
            assert!(archive.by_name(part).is_ok(), "missing {part}");
        }
    }

    #[test]
    fn test_worksheet_cells_are_inline_strings() {
        let workbook = write_workbook(&sample_table(), "Sheet1").unwrap();
        let sheet = read_part(&workbook, "xl/worksheets/sheet1.xml");
        assert!(sheet.contains(r#"<row r="1">"#));
        assert!(sheet.contains(r#"<c r="A1" t="inlineStr"><is><t>Name</t></is></c>"#));
        assert!(sheet.contains(r#"<c r="B2" t="inlineStr"><is><t>30</t></is></c>"#));
    }

    #[test]
    fn test_sheet_name_from_options_is_escaped_and_capped() {
        let workbook = write_workbook(&sample_table(), "P&L").unwrap();
        let wb = read_part(&workbook, "xl/workbook.xml");
        assert!(wb.contains(r#"name="P&amp;L""#));

        let long: String = "x".repeat(40);
        let mut config = ExportConfig::new(Format::Xlsx, "ignored");
        config.options.sheet.sheet_name = Some(long);
        assert_eq!(sheet_name(&config).len(), 31);
    }

    #[test]
    fn test_xls_and_xlsx_share_mime() {
        let dir = tempfile::tempdir().unwrap();
        let downloader = Downloader::new(dir.path());
        let ctx = ExportContext {
            downloader: &downloader,
            rasterizer: None,
        };
        let fragment = Fragment::from_markup("<table><tr><td>a</td></tr></table>".to_string());

        let mut xls = ExportConfig::new(Format::Xls, "ignored");
        let mut xlsx = ExportConfig::new(Format::Xlsx, "ignored");
        let xls_url = SheetExporter
            .export(&ctx, &fragment, &mut xls)
            .unwrap()
            .as_data_url()
            .unwrap()
            .to_string();
        let xlsx_url = SheetExporter
            .export(&ctx, &fragment, &mut xlsx)
            .unwrap()
            .as_data_url()
            .unwrap()
            .to_string();

        let prefix =
            "data:application/vnd.openxmlformats-officedocument.spreadsheetml.sheet;base64,";
        assert!(xls_url.starts_with(prefix));
        assert!(xlsx_url.starts_with(prefix));
    }
}
