#![allow(clippy::panic_in_result_fn)]
#![allow(clippy::panic)]
#![allow(clippy::unwrap_used)]
#![allow(clippy::indexing_slicing)]

use tagtree::{Document, ErrorKind, NodeType, Result, StructuralError, Tree};

fn load(input: &str) -> Document {
    let mut doc = Document::new();
    assert!(doc.load_str(input), "failed to load: {}", doc.error());
    doc
}

fn child_names(tree: &Tree, id: tagtree::NodeId) -> Vec<String> {
    tree.children(id)
        .unwrap()
        .iter()
        .map(|&c| tree.value(c).unwrap().to_string())
        .collect()
}

#[test]
fn test_declaration_and_nested_text() -> Result<()> {
    let doc = load(r#"<?xml version="1.0"?><a><b>hi</b></a>"#);
    let tree = doc.tree();
    let root = doc.root().unwrap();

    assert_eq!(tree.value(root)?, "a");
    assert_eq!(tree.node_type(root)?, NodeType::Element);
    assert_eq!(tree.child_count(root)?, 1);

    let b = tree.at(root, 0)?;
    assert_eq!(tree.value(b)?, "b");
    assert_eq!(tree.child_count(b)?, 1);
    let text = tree.front(b)?.unwrap();
    assert_eq!(tree.node_type(text)?, NodeType::Text);
    assert_eq!(tree.value(text)?, "hi");

    let declaration = doc.declaration().unwrap();
    assert_eq!(tree.value(declaration)?, r#"?xml version="1.0"?"#);
    Ok(())
}

#[test]
fn test_mismatched_tag_reports_error() {
    let mut doc = Document::new();
    assert!(!doc.load_str("<a><b></a>"));
    assert!(!doc.error().is_empty());
    assert!(doc.error().contains("tag mismatch"));
    assert!(doc.error().contains("line 1"));
}

#[test]
fn test_self_closing_child() -> Result<()> {
    let doc = load("<a><b/></a>");
    let tree = doc.tree();
    let root = doc.root().unwrap();
    assert_eq!(child_names(tree, root), vec!["b"]);
    let b = tree.at(root, 0)?;
    assert!(!tree.has_children(b)?);
    assert!(tree.can_have_children(b)?);
    Ok(())
}

#[test]
fn test_comments() -> Result<()> {
    let doc = load("<a><!----></a>");
    let comment = doc.tree().at(doc.root().unwrap(), 0)?;
    assert_eq!(doc.tree().node_type(comment)?, NodeType::Comment);
    assert_eq!(doc.tree().value(comment)?, "");

    for short in ["<a><!---></a>", "<a><!--></a>"] {
        let err = tagtree::from_str(short).err().unwrap();
        assert!(
            matches!(
                err.kind(),
                ErrorKind::Structural(StructuralError::CommentSyntax)
            ),
            "{short}: {err}"
        );
    }
    Ok(())
}

#[test]
fn test_attributes_in_source_order() -> Result<()> {
    let doc = load(r#"<item id="7" class='big' id="8"/>"#);
    let tree = doc.tree();
    let root = doc.root().unwrap();
    let pairs: Vec<(&str, &str)> = tree
        .attributes(root)?
        .iter()
        .map(|a| (a.key(), a.value()))
        .collect();
    assert_eq!(pairs, vec![("id", "7"), ("class", "big"), ("id", "8")]);
    assert_eq!(tree.attribute(root, "id")?.unwrap().value(), "7");
    assert!(tree.attribute(root, "missing")?.is_none());
    Ok(())
}

#[test]
fn test_catalog_file_structure() -> Result<()> {
    let doc = load(include_str!("input/catalog.xml"));
    let tree = doc.tree();
    let root = doc.root().unwrap();

    assert_eq!(tree.value(root)?, "catalog");
    assert_eq!(child_names(tree, root), vec!["book", "book", " more to come "]);

    let second = tree.at(root, 1)?;
    assert_eq!(tree.attribute(second, "id")?.unwrap().value(), "bk102");
    assert_eq!(tree.find_first(second, "out-of-print")?, 3);
    assert_eq!(tree.find_first(second, "isbn")?, 4);

    let title = tree.at(tree.at(root, 0)?, 1)?;
    assert_eq!(tree.value(tree.at(title, 0)?)?, "XML Developer's Guide");

    let top = doc.synthetic_root();
    assert_eq!(tree.child_count(top)?, 2);
    assert_eq!(tree.node_type(tree.at(top, 0)?)?, NodeType::Comment);
    Ok(())
}

#[test]
fn test_save_then_reload_matches() -> Result<()> {
    let original = load(include_str!("input/catalog.xml"));
    let serialized = original.to_xml_string()?;
    let reloaded = load(&serialized);

    let a = original.tree();
    let b = reloaded.tree();
    let left: Vec<_> = a
        .descendants(original.synthetic_root())?
        .map(|id| (a.node_type(id).unwrap(), a.value(id).unwrap().to_string()))
        .collect();
    let right: Vec<_> = b
        .descendants(reloaded.synthetic_root())?
        .map(|id| (b.node_type(id).unwrap(), b.value(id).unwrap().to_string()))
        .collect();
    assert_eq!(left, right);
    assert_eq!(reloaded.to_xml_string()?, serialized);
    Ok(())
}

#[test]
fn test_edit_then_serialize() -> Result<()> {
    let mut doc = load("<?xml version=\"1.0\"?>\n<root>\n  <old/>\n</root>\n");
    let root = doc.root().unwrap();
    let tree = doc.tree_mut();

    tree.insert(root, 0, NodeType::Element, "newTag")?;
    let tag = tree.insert(root, 1, NodeType::Element, "tag")?;
    tree.add(tag, NodeType::Text, "add a new tag")?;
    tree.add_attribute(tag, ("kind", "demo"))?;

    assert_eq!(
        doc.to_xml_string()?,
        "<?xml version=\"1.0\"?>\n<root><newTag/><tag kind=\"demo\">add a new tag</tag><old/></root>\n"
    );
    Ok(())
}

#[test]
fn test_content_after_root() {
    let mut doc = Document::new();
    assert!(!doc.load_str("<a/><b/>"));
    assert!(doc.load_str("<a/><!-- trailing -->"));
}

#[test]
fn test_unclosed_root() {
    let err = tagtree::from_str("<a><b></b>").err().unwrap();
    assert!(matches!(
        err.kind(),
        ErrorKind::Structural(StructuralError::NoRoot)
    ));
}

#[test]
fn test_declaration_only() {
    let err = tagtree::from_str("<?xml version=\"1.0\"?>").err().unwrap();
    assert!(matches!(
        err.kind(),
        ErrorKind::Structural(StructuralError::NoRootTag)
    ));
}

#[test]
fn test_attributes_disabled() -> Result<()> {
    let config = tagtree::ParserConfig::default().with_attributes(false);
    let mut doc = Document::new().with_config(config);
    assert!(doc.load_str(r#"<a id="1" not really attributes/>"#));
    assert!(doc.tree().attributes(doc.root().unwrap())?.is_empty());
    Ok(())
}

#[test]
fn test_malformed_attribute() {
    let err = tagtree::from_str("<a id=1/>").err().unwrap();
    assert!(matches!(
        err.kind(),
        ErrorKind::Structural(StructuralError::AttributeSyntax(_))
    ));
}
