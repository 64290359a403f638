//! Integration tests for collection enumeration.

use blueprint_collection::{DocumentLoadError, load_documents};
use camino::Utf8PathBuf;
use pretty_assertions::assert_eq;
use proptest::prelude::*;
use std::fs;
use tempfile::TempDir;

fn collection_path(temp: &TempDir) -> Utf8PathBuf {
    Utf8PathBuf::from_path_buf(temp.path().join("blueprints")).expect("utf8 tempdir")
}

fn write(root: &Utf8PathBuf, rel: &str, contents: &str) {
    let path = root.join(rel);
    fs::create_dir_all(path.parent().expect("parent")).expect("mkdir");
    fs::write(path, contents).expect("write");
}

fn extensions() -> Vec<String> {
    vec!["yaml".to_string(), "yml".to_string()]
}

#[test]
fn missing_collection_is_empty() {
    let temp = tempfile::tempdir().expect("tempdir");
    let docs = load_documents(&collection_path(&temp), &extensions(), "General").expect("load");
    assert!(docs.is_empty());
}

#[test]
fn both_extensions_are_found_recursively() {
    let temp = tempfile::tempdir().expect("tempdir");
    let root = collection_path(&temp);
    write(&root, "a.yaml", "x: 1\n");
    write(&root, "lighting/b.yml", "x: 2\n");
    write(&root, "lighting/deep/c.yaml", "x: 3\n");
    write(&root, "notes.txt", "ignored\n");
    write(&root, "lighting/README.md", "ignored\n");

    let docs = load_documents(&root, &extensions(), "General").expect("load");
    let rels: Vec<&str> = docs.iter().map(|d| d.rel_path.as_str()).collect();
    assert_eq!(rels, vec!["a.yaml", "lighting/b.yml", "lighting/deep/c.yaml"]);

    let categories: Vec<&str> = docs.iter().map(|d| d.category.as_str()).collect();
    assert_eq!(categories, vec!["General", "lighting", "lighting/deep"]);
    assert_eq!(docs[1].contents.as_deref(), Ok("x: 2\n"));
}

#[test]
fn order_is_lexicographic_across_extensions() {
    let temp = tempfile::tempdir().expect("tempdir");
    let root = collection_path(&temp);
    // .yml files are globbed after .yaml ones but must interleave by path.
    write(&root, "b.yml", "");
    write(&root, "c.yaml", "");
    write(&root, "a.yml", "");

    let docs = load_documents(&root, &extensions(), "General").expect("load");
    let rels: Vec<&str> = docs.iter().map(|d| d.rel_path.as_str()).collect();
    assert_eq!(rels, vec!["a.yml", "b.yml", "c.yaml"]);
}

#[test]
fn sibling_files_sort_before_a_directory_sharing_their_prefix() {
    let temp = tempfile::tempdir().expect("tempdir");
    let root = collection_path(&temp);
    write(&root, "a/x.yaml", "");
    write(&root, "a-b.yaml", "");
    write(&root, "a.yaml", "");

    let docs = load_documents(&root, &extensions(), "General").expect("load");
    let rels: Vec<&str> = docs.iter().map(|d| d.rel_path.as_str()).collect();
    assert_eq!(rels, vec!["a-b.yaml", "a.yaml", "a/x.yaml"]);
}

#[test]
fn directories_with_a_yaml_suffix_are_not_documents() {
    let temp = tempfile::tempdir().expect("tempdir");
    let root = collection_path(&temp);
    fs::create_dir_all(root.join("odd.yaml")).expect("mkdir");
    write(&root, "odd.yaml/inner.yaml", "x: 1\n");

    let docs = load_documents(&root, &extensions(), "General").expect("load");
    let rels: Vec<&str> = docs.iter().map(|d| d.rel_path.as_str()).collect();
    assert_eq!(rels, vec!["odd.yaml/inner.yaml"]);
}

#[test]
fn invalid_utf8_is_a_per_document_error() {
    let temp = tempfile::tempdir().expect("tempdir");
    let root = collection_path(&temp);
    write(&root, "good.yaml", "x: 1\n");
    fs::write(root.join("bad.yaml"), [0xff, 0xfe, 0x00]).expect("write");

    let docs = load_documents(&root, &extensions(), "General").expect("load");
    assert_eq!(docs.len(), 2);
    assert_eq!(docs[0].rel_path.as_str(), "bad.yaml");
    assert!(matches!(docs[0].contents, Err(DocumentLoadError::Io { .. })));
    assert!(docs[1].contents.is_ok());
}

#[test]
fn custom_default_category_is_used_at_root() {
    let temp = tempfile::tempdir().expect("tempdir");
    let root = collection_path(&temp);
    write(&root, "a.yaml", "");

    let docs = load_documents(&root, &extensions(), "Misc").expect("load");
    assert_eq!(docs[0].category, "Misc");
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(16))]

    /// Creation order never leaks into enumeration order.
    #[test]
    fn enumeration_is_sorted_regardless_of_creation_order(
        names in prop::collection::btree_set("[a-z]{1,8}", 1..8),
        reverse in any::<bool>(),
    ) {
        let temp = tempfile::tempdir().expect("tempdir");
        let root = collection_path(&temp);
        let mut files: Vec<String> = names.iter().map(|n| format!("{n}.yaml")).collect();
        if reverse {
            files.reverse();
        }
        for f in &files {
            write(&root, f, "");
        }

        let docs = load_documents(&root, &extensions(), "General").expect("load");
        let rels: Vec<String> = docs.iter().map(|d| d.rel_path.to_string()).collect();
        let mut expected = files.clone();
        expected.sort();
        prop_assert_eq!(rels, expected);
    }
}
