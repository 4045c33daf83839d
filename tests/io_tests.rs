#![allow(clippy::panic_in_result_fn)]
#![allow(clippy::panic)]
#![allow(clippy::unwrap_used)]
#![allow(clippy::indexing_slicing)]

use std::fs;

use tagtree::{Document, ErrorKind, IoError, NodeType};
use tempfile::tempdir;

#[test]
fn test_load_and_save_file() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("in.xml");
    let output = dir.path().join("out.xml");
    fs::write(&input, "<?xml version=\"1.0\"?>\n<root>\n  <item n=\"1\">one</item>\n</root>\n")
        .unwrap();

    let mut doc = tagtree::load_file(&input).unwrap();
    assert_eq!(doc.path(), Some(input.as_path()));
    let root = doc.root().unwrap();
    doc.tree_mut().add(root, NodeType::Comment, " added ").unwrap();

    assert!(doc.save_file_to(&output), "{}", doc.error());
    assert_eq!(doc.path(), Some(output.as_path()));
    assert_eq!(
        fs::read_to_string(&output).unwrap(),
        "<?xml version=\"1.0\"?>\n<root><item n=\"1\">one</item><!-- added --></root>\n"
    );

    let mut reloaded = Document::with_path(&output);
    assert!(reloaded.load_file());
    assert_eq!(reloaded.to_xml_string().unwrap(), doc.to_xml_string().unwrap());
}

#[test]
fn test_missing_file() {
    let dir = tempdir().unwrap();
    let mut doc = Document::new();
    assert!(!doc.load_file_from(dir.path().join("missing.xml")));
    assert!(doc.error().contains("file not found"));

    let err = tagtree::load_file(dir.path().join("missing.xml")).err().unwrap();
    assert!(err.is_io());
    assert!(matches!(err.kind(), ErrorKind::Io(IoError::FileNotFound(_))));
}

#[test]
fn test_save_into_missing_directory() {
    let dir = tempdir().unwrap();
    let mut doc = tagtree::from_str("<a/>").unwrap();
    assert!(!doc.save_file_to(dir.path().join("no/such/dir/out.xml")));
    assert!(!doc.error().is_empty());
}

#[test]
fn test_load_file_with_byte_order_mark() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("bom.xml");
    fs::write(&input, "\u{feff}<?xml version=\"1.0\"?>\n<root/>\n").unwrap();

    let doc = tagtree::load_file(&input).unwrap();
    assert!(doc.declaration().is_some());
    assert_eq!(doc.tree().value(doc.root().unwrap()).unwrap(), "root");
}

#[test]
fn test_load_reader() {
    let mut doc = Document::new();
    assert!(doc.load_reader("<a><b>text</b></a>".as_bytes()));
    assert_eq!(doc.tree().value(doc.root().unwrap()).unwrap(), "a");
}

#[test]
fn test_failed_file_load_keeps_partial_tree() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("broken.xml");
    fs::write(&path, "<a>\n  <b>ok</b>\n  <c>\n</a>\n").unwrap();

    let mut doc = Document::with_path(&path);
    assert!(!doc.load_file());
    assert!(doc.error().contains("line 4"));
    let root = doc.root().unwrap();
    assert_eq!(doc.tree().child_count(root).unwrap(), 2);
}
