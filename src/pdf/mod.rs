//! PDF manipulation module

pub mod document;
pub mod merge;
pub mod metadata;
pub mod render;
pub mod save;
pub mod split;

// Re-export commonly used items
pub use document::{open_document, open_nonempty_document};
pub use merge::{concatenate_documents, merge_pdfs, MergeOptions, MergeReport};
pub use metadata::{count_pages, extract_metadata, PdfMetadata};
pub use render::PageRenderer;
#[cfg(feature = "pdfium")]
pub use render::PdfiumRenderer;
pub use save::save_document;
pub use split::{extract_pages, split_pdf, validate_pages, SplitOptions};
