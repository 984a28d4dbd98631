//! Error types for the PDF toolbox library

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for the PDF toolbox library
#[derive(Error, Debug)]
pub enum Error {
    /// PDF processing error
    #[error("PDF error: {0}")]
    Pdf(#[from] lopdf::Error),

    /// Input document could not be opened or parsed
    #[error("Failed to open {}: {}", .path.display(), .source)]
    LoadFailed {
        path: PathBuf,
        #[source]
        source: lopdf::Error,
    },

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Thumbnail encoding error
    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),

    /// Page rendering error
    #[error("Render error: {0}")]
    Render(String),

    /// File not found
    #[error("File not found: {}", .0.display())]
    FileNotFound(PathBuf),

    /// Invalid PDF (no pages)
    #[error("PDF has no pages: {}", .0.display())]
    EmptyPdf(PathBuf),

    /// Merge list is empty
    #[error("No files selected: add at least one PDF to merge")]
    NoFilesSelected,

    /// Output file name is blank
    #[error("No output file name given")]
    EmptyFileName,

    /// Split was requested without a source document
    #[error("No source PDF selected")]
    NoSourceSelected,

    /// Page set is empty
    #[error("No pages selected")]
    NoPagesSelected,

    /// Page range expression could not be parsed
    #[error("Invalid page range: {0:?}")]
    InvalidPageRange(String),

    /// Page number outside of the document
    #[error("Page {page} is out of range (valid pages: 1-{total})")]
    PageOutOfRange { page: u32, total: u32 },

    /// General error
    #[error("{0}")]
    General(String),
}

impl Error {
    /// True for problems with user input that are caught before any I/O.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Error::NoFilesSelected
                | Error::EmptyFileName
                | Error::NoSourceSelected
                | Error::NoPagesSelected
                | Error::InvalidPageRange(_)
                | Error::PageOutOfRange { .. }
        )
    }
}
