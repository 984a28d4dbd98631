//! PDF merging functionality using lopdf

use std::collections::BTreeMap;
use std::path::PathBuf;

use lopdf::{Dictionary, Document, Object, ObjectId};

use crate::error::{Error, Result};
use super::document::open_nonempty_document;
use super::save::save_document;

/// Page attributes a page may inherit from its ancestors in the page tree
const INHERITABLE_KEYS: [&[u8]; 4] = [b"Resources", b"MediaBox", b"CropBox", b"Rotate"];

/// Guard against malformed, cyclic page trees
const MAX_TREE_DEPTH: usize = 64;

/// Options for merging PDFs
#[derive(Debug, Clone)]
pub struct MergeOptions {
    /// Input PDF file paths in the order they should be merged
    pub input_paths: Vec<PathBuf>,
    /// Output PDF file path
    pub output_path: PathBuf,
}

/// Summary of a finished merge
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MergeReport {
    pub documents: usize,
    pub pages: usize,
}

/// Merge multiple PDF files into a single PDF
///
/// Pages are concatenated in `input_paths` order. Every input is loaded and
/// validated before anything is written, so a bad input never produces an
/// output file.
///
/// # Example
///
/// ```no_run
/// use pdf_toolbox::pdf::{MergeOptions, merge_pdfs};
/// use std::path::PathBuf;
///
/// let options = MergeOptions {
///     input_paths: vec![
///         PathBuf::from("chapter1.pdf"),
///         PathBuf::from("chapter2.pdf"),
///     ],
///     output_path: PathBuf::from("book.pdf"),
/// };
///
/// merge_pdfs(&options).expect("Failed to merge");
/// ```
pub fn merge_pdfs(options: &MergeOptions) -> Result<MergeReport> {
    if options.input_paths.is_empty() {
        return Err(Error::NoFilesSelected);
    }

    let mut documents: Vec<Document> = Vec::with_capacity(options.input_paths.len());
    for path in &options.input_paths {
        documents.push(open_nonempty_document(path)?);
    }

    let documents_count = documents.len();
    let mut merged = concatenate_documents(documents)?;
    let pages = merged.get_pages().len();

    save_document(&mut merged, &options.output_path)?;

    log::info!(
        "merged {} files ({} pages) into {}",
        documents_count,
        pages,
        options.output_path.display()
    );

    Ok(MergeReport {
        documents: documents_count,
        pages,
    })
}

/// Build one document holding every page of `documents`, in order.
///
/// Based on the lopdf merge example: objects of each input are renumbered
/// into a shared id space, then a fresh catalog and flat page tree are built
/// on top of them.
pub fn concatenate_documents(documents: Vec<Document>) -> Result<Document> {
    if documents.is_empty() {
        return Err(Error::NoFilesSelected);
    }

    let mut max_id = 1;
    let mut page_ids: Vec<ObjectId> = Vec::new();
    let mut objects: BTreeMap<ObjectId, Object> = BTreeMap::new();

    for mut doc in documents {
        doc.renumber_objects_with(max_id);
        max_id = doc.max_id + 1;

        // get_pages() is keyed by page number, so values come out in page order
        let pages: Vec<ObjectId> = doc.get_pages().into_values().collect();
        for &page_id in &pages {
            inline_inherited_attributes(&mut doc, page_id)?;
        }

        page_ids.extend(pages);
        objects.extend(doc.objects);
    }

    let mut merged = Document::with_version("1.5");
    merged.objects.extend(objects);

    // new_object_id() must hand out ids above everything just inserted
    merged.max_id = max_id - 1;

    let pages_id = merged.new_object_id();
    let kids: Vec<Object> = page_ids.iter().map(|&id| Object::Reference(id)).collect();

    let mut pages_object = Dictionary::new();
    pages_object.set("Type", Object::Name(b"Pages".to_vec()));
    pages_object.set("Count", Object::Integer(page_ids.len() as i64));
    pages_object.set("Kids", Object::Array(kids));

    let catalog_id = merged.new_object_id();
    let mut catalog = Dictionary::new();
    catalog.set("Type", Object::Name(b"Catalog".to_vec()));
    catalog.set("Pages", Object::Reference(pages_id));

    merged.objects.insert(catalog_id, Object::Dictionary(catalog));
    merged.objects.insert(pages_id, Object::Dictionary(pages_object));
    merged.trailer.set("Root", Object::Reference(catalog_id));

    for &page_id in &page_ids {
        if let Ok(Object::Dictionary(dict)) = merged.get_object_mut(page_id) {
            dict.set("Parent", Object::Reference(pages_id));
        }
    }

    // Old catalogs and page tree nodes are unreachable now
    merged.prune_objects();
    merged.compress();

    Ok(merged)
}

/// Copy inherited attributes onto the page itself so they survive
/// re-parenting under a new page tree.
fn inline_inherited_attributes(doc: &mut Document, page_id: ObjectId) -> Result<()> {
    let mut inherited: Vec<(Vec<u8>, Object)> = Vec::new();
    {
        let page = doc.get_dictionary(page_id)?;
        let mut missing: Vec<&[u8]> = INHERITABLE_KEYS
            .iter()
            .copied()
            .filter(|key| !page.has(key))
            .collect();
        let mut parent = page.get(b"Parent").and_then(Object::as_reference).ok();

        let mut depth = 0;
        while let Some(parent_id) = parent {
            if missing.is_empty() || depth >= MAX_TREE_DEPTH {
                break;
            }
            let Ok(node) = doc.get_dictionary(parent_id) else {
                break;
            };
            missing.retain(|key| match node.get(key) {
                Ok(value) => {
                    inherited.push((key.to_vec(), value.clone()));
                    false
                }
                Err(_) => true,
            });
            parent = node.get(b"Parent").and_then(Object::as_reference).ok();
            depth += 1;
        }
    }

    if !inherited.is_empty() {
        let page = doc.get_dictionary_mut(page_id)?;
        for (key, value) in inherited {
            page.set(key, value);
        }
    }

    Ok(())
}
