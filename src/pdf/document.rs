//! Opening source documents

use std::path::Path;

use lopdf::Document;

use crate::error::{Error, Result};

/// Load a PDF from disk, mapping failures to errors that name the file.
pub fn open_document(path: &Path) -> Result<Document> {
    if !path.exists() {
        return Err(Error::FileNotFound(path.to_path_buf()));
    }

    let doc = Document::load(path).map_err(|source| Error::LoadFailed {
        path: path.to_path_buf(),
        source,
    })?;

    log::debug!("opened {} ({} pages)", path.display(), doc.get_pages().len());
    Ok(doc)
}

/// Like [`open_document`], but rejects documents without pages.
pub fn open_nonempty_document(path: &Path) -> Result<Document> {
    let doc = open_document(path)?;
    if doc.get_pages().is_empty() {
        return Err(Error::EmptyPdf(path.to_path_buf()));
    }
    Ok(doc)
}
