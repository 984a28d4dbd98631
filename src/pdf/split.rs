//! Extracting a subset of pages into a new PDF

use std::collections::BTreeSet;
use std::path::PathBuf;

use lopdf::Document;

use crate::error::{Error, Result};
use super::document::open_document;
use super::save::save_document;

/// Options for splitting pages out of a PDF
#[derive(Debug, Clone)]
pub struct SplitOptions {
    /// Document to take pages from; it is never modified
    pub source_path: PathBuf,
    /// 1-based page numbers to keep
    pub pages: BTreeSet<u32>,
    /// Output PDF file path
    pub output_path: PathBuf,
}

/// Write the selected pages of `source_path` to `output_path`.
///
/// Pages always come out in ascending order of their original position.
/// The page set is validated against the source before anything is written.
///
/// Returns the number of pages written.
pub fn split_pdf(options: &SplitOptions) -> Result<usize> {
    if options.pages.is_empty() {
        return Err(Error::NoPagesSelected);
    }

    let source = open_document(&options.source_path)?;
    let mut extracted = extract_pages(&source, &options.pages)?;
    drop(source);

    save_document(&mut extracted, &options.output_path)?;

    log::info!(
        "extracted {} pages from {} into {}",
        options.pages.len(),
        options.source_path.display(),
        options.output_path.display()
    );

    Ok(options.pages.len())
}

/// Check that every page in `pages` exists in a document of `total` pages.
pub fn validate_pages(pages: &BTreeSet<u32>, total: u32) -> Result<()> {
    if pages.is_empty() {
        return Err(Error::NoPagesSelected);
    }
    // Sorted set: only the extremes can be out of range
    for &page in [pages.first(), pages.last()].into_iter().flatten() {
        if page == 0 || page > total {
            return Err(Error::PageOutOfRange { page, total });
        }
    }
    Ok(())
}

/// Build a copy of `source` holding only `pages` (1-based).
pub fn extract_pages(source: &Document, pages: &BTreeSet<u32>) -> Result<Document> {
    let total = source.get_pages().len() as u32;
    validate_pages(pages, total)?;

    let to_delete: Vec<u32> = (1..=total).filter(|page| !pages.contains(page)).collect();

    let mut doc = source.clone();
    if !to_delete.is_empty() {
        doc.delete_pages(&to_delete);
        doc.prune_objects();
    }
    doc.compress();

    log::debug!("kept {} of {} pages", pages.len(), total);
    Ok(doc)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set(pages: &[u32]) -> BTreeSet<u32> {
        pages.iter().copied().collect()
    }

    #[test]
    fn test_validate_accepts_pages_in_bounds() {
        assert!(validate_pages(&set(&[1, 3, 5]), 5).is_ok());
    }

    #[test]
    fn test_validate_rejects_past_end() {
        let err = validate_pages(&set(&[1, 6]), 5).unwrap_err();
        assert!(matches!(err, Error::PageOutOfRange { page: 6, total: 5 }));
        assert!(err.to_string().contains("1-5"));
    }

    #[test]
    fn test_validate_rejects_page_zero() {
        let err = validate_pages(&set(&[0, 2]), 5).unwrap_err();
        assert!(matches!(err, Error::PageOutOfRange { page: 0, .. }));
    }

    #[test]
    fn test_validate_rejects_empty() {
        assert!(matches!(validate_pages(&set(&[]), 5), Err(Error::NoPagesSelected)));
    }

    #[test]
    fn test_empty_selection_rejected_before_io() {
        let options = SplitOptions {
            source_path: PathBuf::from("does-not-exist.pdf"),
            pages: BTreeSet::new(),
            output_path: PathBuf::from("out.pdf"),
        };
        assert!(matches!(split_pdf(&options), Err(Error::NoPagesSelected)));
    }
}
