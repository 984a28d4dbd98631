//! Page rasterization for thumbnails
//!
//! Rendering is delegated to a [`PageRenderer`]. The Pdfium-backed
//! implementation needs the native Pdfium library and is only built with the
//! `pdfium` feature.

use std::path::Path;

use image::RgbaImage;

use crate::error::Result;

/// Rasterizes the pages of a document
///
/// Every call opens and releases the document itself; no handle outlives a
/// call.
pub trait PageRenderer {
    /// Number of pages in `path`
    fn page_count(&self, path: &Path) -> Result<usize>;

    /// Render the page at zero-based `index` at `scale` times its natural size
    fn render_page(&self, path: &Path, index: usize, scale: f32) -> Result<RgbaImage>;

    /// Render every page of `path`, in page order.
    ///
    /// Implementations that can keep the document open across pages should
    /// override this.
    fn render_pages(&self, path: &Path, scale: f32) -> Result<Vec<RgbaImage>> {
        let count = self.page_count(path)?;
        (0..count)
            .map(|index| self.render_page(path, index, scale))
            .collect()
    }
}

#[cfg(feature = "pdfium")]
pub use self::pdfium::PdfiumRenderer;

#[cfg(feature = "pdfium")]
mod pdfium {
    use std::path::Path;

    use image::RgbaImage;
    use pdfium_render::prelude::*;

    use super::PageRenderer;
    use crate::error::{Error, Result};

    /// [`PageRenderer`] backed by Pdfium.
    ///
    /// Looks for the Pdfium library in the working directory first, then
    /// falls back to the system library path.
    #[derive(Debug, Default, Clone, Copy)]
    pub struct PdfiumRenderer;

    impl PdfiumRenderer {
        pub fn new() -> Self {
            Self
        }

        fn bind(&self) -> Result<Pdfium> {
            let bindings = Pdfium::bind_to_library(Pdfium::pdfium_platform_library_name_at_path("./"))
                .or_else(|_| Pdfium::bind_to_system_library())
                .map_err(render_error)?;
            Ok(Pdfium::new(bindings))
        }
    }

    impl PageRenderer for PdfiumRenderer {
        fn page_count(&self, path: &Path) -> Result<usize> {
            let pdfium = self.bind()?;
            let document = pdfium.load_pdf_from_file(path, None).map_err(render_error)?;
            Ok(document.pages().len() as usize)
        }

        fn render_page(&self, path: &Path, index: usize, scale: f32) -> Result<RgbaImage> {
            let pdfium = self.bind()?;
            let document = pdfium.load_pdf_from_file(path, None).map_err(render_error)?;
            let page_index = u16::try_from(index)
                .map_err(|_| Error::Render(format!("page index {} out of range", index)))?;
            let page = document.pages().get(page_index).map_err(render_error)?;
            let config = PdfRenderConfig::new().scale_page_by_factor(scale);
            let bitmap = page.render_with_config(&config).map_err(render_error)?;
            Ok(bitmap.as_image().to_rgba8())
        }

        fn render_pages(&self, path: &Path, scale: f32) -> Result<Vec<RgbaImage>> {
            let pdfium = self.bind()?;
            let document = pdfium.load_pdf_from_file(path, None).map_err(render_error)?;
            let config = PdfRenderConfig::new().scale_page_by_factor(scale);

            let mut images = Vec::new();
            for (index, page) in document.pages().iter().enumerate() {
                let bitmap = page.render_with_config(&config).map_err(render_error)?;
                let image = bitmap.as_image().to_rgba8();
                log::debug!(
                    "rendered page {} at {}x{}",
                    index + 1,
                    image.width(),
                    image.height()
                );
                images.push(image);
            }
            Ok(images)
        }
    }

    fn render_error(e: PdfiumError) -> Error {
        Error::Render(e.to_string())
    }
}
