//! PNG adapter.
//!
//! Rasterization is a host capability, not something this crate performs:
//! the adapter hands the fragment markup and the request's
//! [`RasterOptions`](crate::config::RasterOptions) to the configured
//! [`Rasterizer`](crate::Rasterizer) verbatim and frames the returned PNG
//! bytes as a data-URL.

use crate::codec;
use crate::config::ExportConfig;
use crate::dom::Fragment;
use crate::error::{Error, Result};

use super::{ExportContext, ExportOutput, Exporter};

pub struct PngExporter;

impl Exporter for PngExporter {
    fn export(
        &self,
        ctx: &ExportContext<'_>,
        fragment: &Fragment,
        config: &mut ExportConfig,
    ) -> Result<ExportOutput> {
        let rasterizer = ctx.rasterizer.ok_or_else(|| {
            Error::Conversion("no rasterizer capability configured".to_string())
        })?;

        let png = rasterizer.rasterize(fragment.markup(), &config.options.raster)?;
        let data_url = codec::encode(config.format.mime_type(), &png);
        ctx.finish(config, data_url)
    }
}
