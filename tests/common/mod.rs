//! Shared helpers for integration tests
//!
//! Test PDFs are generated with lopdf. Every page carries a "tag" as the
//! width of its MediaBox, so page identity can be checked after merge and
//! split.

#![allow(dead_code)]

use lopdf::content::{Content, Operation};
use lopdf::{Dictionary, Document, Object, ObjectId, Stream, StringFormat};
use std::path::Path;

/// Document with one page per tag, all under a flat page tree
pub fn tagged_document(tags: &[i64]) -> Document {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();

    let kids: Vec<Object> = tags
        .iter()
        .map(|&tag| Object::Reference(add_page(&mut doc, pages_id, tag)))
        .collect();

    let pages = Dictionary::from_iter(vec![
        ("Type", Object::Name(b"Pages".to_vec())),
        ("Count", Object::Integer(tags.len() as i64)),
        ("Kids", Object::Array(kids)),
    ]);
    doc.objects.insert(pages_id, Object::Dictionary(pages));

    set_catalog(&mut doc, pages_id);
    doc
}

/// Document whose pages sit under an intermediate page tree node that
/// carries `Rotate`, so the pages inherit it.
pub fn nested_document(tags: &[i64], rotate: i64) -> Document {
    let mut doc = Document::with_version("1.5");
    let root_id = doc.new_object_id();
    let inner_id = doc.new_object_id();

    let kids: Vec<Object> = tags
        .iter()
        .map(|&tag| Object::Reference(add_page(&mut doc, inner_id, tag)))
        .collect();

    let inner = Dictionary::from_iter(vec![
        ("Type", Object::Name(b"Pages".to_vec())),
        ("Parent", Object::Reference(root_id)),
        ("Count", Object::Integer(tags.len() as i64)),
        ("Rotate", Object::Integer(rotate)),
        ("Kids", Object::Array(kids)),
    ]);
    doc.objects.insert(inner_id, Object::Dictionary(inner));

    let root = Dictionary::from_iter(vec![
        ("Type", Object::Name(b"Pages".to_vec())),
        ("Count", Object::Integer(tags.len() as i64)),
        ("Kids", Object::Array(vec![Object::Reference(inner_id)])),
    ]);
    doc.objects.insert(root_id, Object::Dictionary(root));

    set_catalog(&mut doc, root_id);
    doc
}

fn set_catalog(doc: &mut Document, pages_id: ObjectId) {
    let catalog_id = doc.add_object(Dictionary::from_iter(vec![
        ("Type", Object::Name(b"Catalog".to_vec())),
        ("Pages", Object::Reference(pages_id)),
    ]));
    doc.trailer.set("Root", Object::Reference(catalog_id));
}

fn add_page(doc: &mut Document, parent: ObjectId, tag: i64) -> ObjectId {
    let content = Content {
        operations: vec![
            Operation::new("BT", vec![]),
            Operation::new("Tf", vec![Object::Name(b"F1".to_vec()), Object::Integer(12)]),
            Operation::new("Td", vec![Object::Integer(100), Object::Integer(700)]),
            Operation::new(
                "Tj",
                vec![Object::String(
                    format!("Page {}", tag).into_bytes(),
                    StringFormat::Literal,
                )],
            ),
            Operation::new("ET", vec![]),
        ],
    };
    let content_id = doc.add_object(Stream::new(Dictionary::new(), content.encode().unwrap()));

    doc.add_object(Dictionary::from_iter(vec![
        ("Type", Object::Name(b"Page".to_vec())),
        ("Parent", Object::Reference(parent)),
        (
            "MediaBox",
            Object::Array(vec![
                Object::Integer(0),
                Object::Integer(0),
                Object::Integer(tag),
                Object::Integer(792),
            ]),
        ),
        ("Contents", Object::Reference(content_id)),
    ]))
}

/// Write a flat tagged PDF to `path`
pub fn write_tagged_pdf(path: &Path, tags: &[i64]) {
    tagged_document(tags).save(path).expect("Failed to write test PDF");
}

/// Page tags of the PDF at `path`, in page order
pub fn page_tags(path: &Path) -> Vec<i64> {
    let doc = Document::load(path).expect("Failed to load PDF");
    document_tags(&doc)
}

pub fn document_tags(doc: &Document) -> Vec<i64> {
    doc.get_pages()
        .values()
        .map(|&page_id| {
            let page = doc.get_dictionary(page_id).expect("page dictionary");
            let media_box = page
                .get(b"MediaBox")
                .and_then(Object::as_array)
                .expect("page MediaBox");
            media_box[2].as_i64().expect("integer MediaBox width")
        })
        .collect()
}
