//! PDF Toolbox Library
//!
//! Merge several PDFs into one, or split selected pages out of a PDF.
//! This library provides:
//! - Merging PDF files in a user-defined order
//! - Extracting a page subset into a new PDF
//! - Page range expressions (`"1-3,5,7-9"`) and their inverse
//! - Thumbnail preview with click-to-select page selection
//! - A toolkit-independent [`workspace::Workspace`] that runs both flows
//!
//! # Example
//!
//! ```no_run
//! use pdf_toolbox::pdf::{SplitOptions, split_pdf};
//! use pdf_toolbox::range::parse_page_range;
//! use std::path::PathBuf;
//!
//! let options = SplitOptions {
//!     source_path: PathBuf::from("report.pdf"),
//!     pages: parse_page_range("1-3,5").unwrap(),
//!     output_path: PathBuf::from("summary.pdf"),
//! };
//!
//! split_pdf(&options).expect("Failed to split PDF");
//! ```

pub mod error;
pub mod merge_list;
pub mod pdf;
pub mod preview;
pub mod range;
pub mod selection;
pub mod workspace;

// Re-export commonly used items
pub use error::{Error, Result};
pub use merge_list::{Direction, MergeList};
pub use preview::{Preview, Thumbnail, ThumbnailOptions};
pub use range::{format_page_range, parse_page_range, parse_page_range_within};
pub use selection::PageSelection;
pub use workspace::{Dialogs, Notifier, Outcome, Severity, Workspace};
