//! Rasterization capability.
//!
//! Rendering markup to pixels is a host capability, not something this
//! crate reimplements. Embedders supply an implementation through
//! [`ExportAs::with_rasterizer`](crate::ExportAs::with_rasterizer); the PNG
//! adapter delegates to it and frames whatever it returns.

use crate::config::RasterOptions;
use crate::error::Result;

/// Renders markup to an encoded PNG image.
///
/// Implementations receive the resolved fragment's markup and the request's
/// [`RasterOptions`] verbatim; interpretation of the options (scale,
/// background, extras) is entirely theirs. A failed render is reported as
/// [`Error::Conversion`](crate::Error::Conversion).
pub trait Rasterizer: Send + Sync {
    /// Render `markup` and return encoded PNG bytes.
    fn rasterize(&self, markup: &str, options: &RasterOptions) -> Result<Vec<u8>>;
}

impl<F> Rasterizer for F
where
    F: Fn(&str, &RasterOptions) -> Result<Vec<u8>> + Send + Sync,
{
    fn rasterize(&self, markup: &str, options: &RasterOptions) -> Result<Vec<u8>> {
        self(markup, options)
    }
}
