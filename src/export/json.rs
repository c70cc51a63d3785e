//! JSON adapter.
//!
//! The first table row supplies the field keys: each header cell is
//! lowercased with spaces stripped. Every later row becomes one record in
//! header order. Unlike the other formats, a non-download export returns the
//! records themselves; only the file form is base64-framed.

use serde_json::{Map, Value};

use crate::codec;
use crate::config::ExportConfig;
use crate::dom::Fragment;
use crate::error::Result;
use crate::table::Table;

use super::{ExportContext, ExportOutput, Exporter, effective_file_name};

pub struct JsonExporter;

impl Exporter for JsonExporter {
    fn export(
        &self,
        ctx: &ExportContext<'_>,
        fragment: &Fragment,
        config: &mut ExportConfig,
    ) -> Result<ExportOutput> {
        let table = Table::extract(fragment);
        let records = to_records(&table);

        if config.download {
            let json = serde_json::to_string(&records)?;
            let data_url = codec::encode_text(config.format.mime_type(), &json);
            let file_name = effective_file_name(config);
            ctx.downloader.save_data_url(&file_name, &data_url)?;
            Ok(ExportOutput::Downloaded)
        } else {
            Ok(ExportOutput::Records(records))
        }
    }
}

fn to_records(table: &Table) -> Vec<Map<String, Value>> {
    let Some(header) = table.header() else {
        return Vec::new();
    };

    let keys: Vec<String> = header
        .iter()
        .map(|cell| cell.to_lowercase().replace(' ', ""))
        .collect();

    table
        .body()
        .iter()
        .map(|row| {
            let mut record = Map::new();
            // a short row leaves trailing keys unset; extra cells are dropped
            for (key, cell) in keys.iter().zip(row) {
                record.insert(key.clone(), Value::String(cell.clone()));
            }
            record
        })
        .collect()
}
