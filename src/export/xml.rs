//! XML adapter.
//!
//! Emits `<Root><Classes>…</Classes></Root>`: one `<Class>` per table row
//! with at least one cell, named after the first cell, holding one `<data>`
//! child per remaining cell.

use quick_xml::Writer;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};

use crate::codec;
use crate::config::ExportConfig;
use crate::dom::Fragment;
use crate::error::Result;
use crate::table::Table;

use super::{ExportContext, ExportOutput, Exporter};

pub struct XmlExporter;

impl Exporter for XmlExporter {
    fn export(
        &self,
        ctx: &ExportContext<'_>,
        fragment: &Fragment,
        config: &mut ExportConfig,
    ) -> Result<ExportOutput> {
        let table = Table::extract(fragment);
        let xml = render_xml(&table)?;
        let data_url = codec::encode(config.format.mime_type(), &xml);
        ctx.finish(config, data_url)
    }
}

fn render_xml(table: &Table) -> Result<Vec<u8>> {
    let mut writer = Writer::new(Vec::new());

    writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;
    writer.write_event(Event::Start(BytesStart::new("Root")))?;
    writer.write_event(Event::Start(BytesStart::new("Classes")))?;

    for row in table.rows() {
        let Some((name, data_cells)) = row.split_first() else {
            continue;
        };

        let mut class = BytesStart::new("Class");
        class.push_attribute(("name", name.as_str()));
        writer.write_event(Event::Start(class))?;

        for cell in data_cells {
            writer.write_event(Event::Start(BytesStart::new("data")))?;
            writer.write_event(Event::Text(BytesText::new(cell)))?;
            writer.write_event(Event::End(BytesEnd::new("data")))?;
        }

        writer.write_event(Event::End(BytesEnd::new("Class")))?;
    }

    writer.write_event(Event::End(BytesEnd::new("Classes")))?;
    writer.write_event(Event::End(BytesEnd::new("Root")))?;

    Ok(writer.into_inner())
}
