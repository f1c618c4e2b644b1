//! Integration tests for loading erd.toml files from disk.

use erdkit_manifest::{ErdToml, Error};
use tempfile::TempDir;

const MANIFEST: &str = r#"
    [project]
    name = "library"
    description = "Books and the people who write them"
    rebuild_all = true

    [classes.Author]
    doc = """
    A person who writes books.
    """

    [classes.Author.fields.name]
    type = "str"
    description = "Pen name"

    [classes.Author.fields.books]
    type = "List['Book']"
    default_factory = "list"

    [classes.Book]

    [classes.Book.fields.title]
    type = "str"

    [classes.Book.fields.authors]
    type = "list[Author]"
"#;

#[test]
fn test_open_reads_and_parses() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let path = temp_dir.path().join(ErdToml::FILENAME);
    std::fs::write(&path, MANIFEST).expect("Failed to write erd.toml");

    let erd = ErdToml::open(&path).expect("Failed to open erd.toml");
    assert_eq!(erd.path(), path);
    assert_eq!(erd.content(), MANIFEST);
    assert_eq!(erd.manifest().project.name, "library");

    let ns = erd.namespace();
    let author = ns.get("library.Author").expect("Author not declared");
    let book = ns.get("Book").expect("Book not declared");

    // rebuild_all resolved the forward reference to Book
    let books = author.field("books").unwrap().info();
    assert!(books.annotation.forward_refs().is_empty());
    assert_eq!(books.annotation.referenced_classes(), vec![book.id()]);
    assert_eq!(author.docstring().as_deref(), Some("A person who writes books."));
}

#[test]
fn test_open_missing_file() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let path = temp_dir.path().join("missing.toml");

    let err = ErdToml::open(&path).unwrap_err();
    assert!(matches!(*err, Error::Io { .. }));
}

#[test]
fn test_open_reports_invalid_type() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let path = temp_dir.path().join(ErdToml::FILENAME);
    std::fs::write(&path, "[project]\nname = \"x\"\n\n[classes.A.fields.n]\ntype = \"Nope\"\n")
        .expect("Failed to write erd.toml");

    let err = ErdToml::open(&path).unwrap_err();
    match err.as_ref() {
        Error::InvalidType { ty, field, .. } => {
            assert_eq!(ty, "Nope");
            assert_eq!(field, "n");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}
