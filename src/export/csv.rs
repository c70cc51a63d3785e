//! CSV and TXT adapters.

use crate::codec;
use crate::config::ExportConfig;
use crate::dom::Fragment;
use crate::error::Result;
use crate::table::Table;

use super::{ExportContext, ExportOutput, Exporter};

/// Quotes every cell, joins fields with commas and rows with newlines.
pub struct CsvExporter;

impl Exporter for CsvExporter {
    fn export(
        &self,
        ctx: &ExportContext<'_>,
        fragment: &Fragment,
        config: &mut ExportConfig,
    ) -> Result<ExportOutput> {
        let table = Table::extract(fragment);
        let content = render_csv(&table);
        let data_url = codec::encode_text(config.format.mime_type(), &content);
        ctx.finish(config, data_url)
    }
}

/// CSV content saved under a `.txt` extension; encoding is identical.
pub struct TxtExporter;

impl Exporter for TxtExporter {
    fn export(
        &self,
        ctx: &ExportContext<'_>,
        fragment: &Fragment,
        config: &mut ExportConfig,
    ) -> Result<ExportOutput> {
        if let Some(name) = config.file_name.take() {
            // replace any existing extension, never append a second one
            let base = name.split('.').next().unwrap_or(&name);
            config.file_name = Some(format!("{base}.txt"));
        }
        CsvExporter.export(ctx, fragment, config)
    }
}

pub(crate) fn render_csv(table: &Table) -> String {
    table
        .rows()
        .iter()
        .map(|row| {
            row.iter()
                .map(|cell| format!("\"{}\"", cell.replace('"', "\"\"")))
                .collect::<Vec<_>>()
                .join(",")
        })
        .collect::<Vec<_>>()
        .join("\n")
}
