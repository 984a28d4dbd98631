//! Thumbnail preview of the split source
//!
//! A [`Preview`] owns the thumbnails of the loaded document together with the
//! page selection. Clicking a thumbnail toggles its page, and the range text
//! is re-derived from the selection after every change, so the grid
//! highlighting and the text field cannot drift apart.

use std::path::{Path, PathBuf};

use image::RgbaImage;

use crate::error::Result;
use crate::pdf::PageRenderer;
use crate::range::parse_page_range_within;
use crate::selection::PageSelection;

/// Layout and resolution of the thumbnail grid
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ThumbnailOptions {
    /// Render scale relative to the page's natural size
    pub scale: f32,
    /// Thumbnails per grid row
    pub columns: usize,
}

impl Default for ThumbnailOptions {
    fn default() -> Self {
        Self {
            scale: 0.2,
            columns: 4,
        }
    }
}

/// One rendered page and its place in the grid
#[derive(Debug, Clone)]
pub struct Thumbnail {
    /// Zero-based page index
    pub index: usize,
    pub row: usize,
    pub column: usize,
    pub image: RgbaImage,
}

impl Thumbnail {
    /// Label shown under the thumbnail
    pub fn label(&self) -> String {
        format!("Page {}", self.index + 1)
    }
}

#[derive(Debug, Clone, Default)]
pub struct Preview {
    options: ThumbnailOptions,
    source: Option<PathBuf>,
    thumbnails: Vec<Thumbnail>,
    selection: PageSelection,
}

impl Preview {
    pub fn new(options: ThumbnailOptions) -> Self {
        Self {
            options,
            ..Self::default()
        }
    }

    pub fn options(&self) -> ThumbnailOptions {
        self.options
    }

    /// Load thumbnails for `path`, replacing whatever was shown before.
    ///
    /// The old thumbnails and selection are cleared before rendering starts;
    /// if rendering fails the preview stays empty.
    pub fn load(&mut self, path: &Path, renderer: &dyn PageRenderer) -> Result<usize> {
        self.clear();

        let images = renderer.render_pages(path, self.options.scale)?;
        let columns = self.options.columns.max(1);

        self.thumbnails = images
            .into_iter()
            .enumerate()
            .map(|(index, image)| Thumbnail {
                index,
                row: index / columns,
                column: index % columns,
                image,
            })
            .collect();
        self.source = Some(path.to_path_buf());

        log::debug!(
            "loaded {} thumbnails for {}",
            self.thumbnails.len(),
            path.display()
        );
        Ok(self.thumbnails.len())
    }

    /// Drop the thumbnails, the source and the selection
    pub fn clear(&mut self) {
        self.thumbnails.clear();
        self.selection.clear();
        self.source = None;
    }

    /// Toggle the page behind a clicked thumbnail and return the new range
    /// text. Clicks outside the loaded pages are ignored.
    pub fn click(&mut self, index: usize) -> String {
        if index < self.thumbnails.len() {
            self.selection.toggle(index);
        } else {
            log::warn!("ignoring click on missing page index {}", index);
        }
        self.range_text()
    }

    /// Replace the selection with the pages named by a typed range string.
    ///
    /// On error the current selection is kept.
    pub fn set_range_text(&mut self, text: &str) -> Result<()> {
        let pages = parse_page_range_within(text, self.page_count() as u32)?;
        self.selection = PageSelection::from_page_numbers(pages);
        Ok(())
    }

    pub fn is_selected(&self, index: usize) -> bool {
        self.selection.contains(index)
    }

    /// Text-field view of the selection
    pub fn range_text(&self) -> String {
        self.selection.range_text()
    }

    pub fn selection(&self) -> &PageSelection {
        &self.selection
    }

    pub fn thumbnails(&self) -> &[Thumbnail] {
        &self.thumbnails
    }

    pub fn source(&self) -> Option<&Path> {
        self.source.as_deref()
    }

    pub fn page_count(&self) -> usize {
        self.thumbnails.len()
    }

    /// Number of grid rows
    pub fn rows(&self) -> usize {
        self.thumbnails.len().div_ceil(self.options.columns.max(1))
    }

    /// Write each thumbnail as `page-NNN.png` into `dir`
    pub fn save_thumbnails(&self, dir: &Path) -> Result<Vec<PathBuf>> {
        std::fs::create_dir_all(dir)?;
        let mut written = Vec::with_capacity(self.thumbnails.len());
        for thumbnail in &self.thumbnails {
            let path = dir.join(format!("page-{:03}.png", thumbnail.index + 1));
            thumbnail.image.save(&path)?;
            written.push(path);
        }
        Ok(written)
    }
}
