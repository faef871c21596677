//! Tests for the configuration tree container

use super::streq;
use crate::app::services::rose_config::tree::{
    ConfigSection, ConfigTree, SectionState, format_section_id, split_section_id,
};

#[test]
fn test_split_section_id() {
    assert_eq!(
        split_section_id("namelist:streq(02205_4a1b2c3d)"),
        ("namelist:streq", Some("02205_4a1b2c3d"))
    );
    assert_eq!(split_section_id("env"), ("env", None));
}

#[test]
fn test_format_section_id() {
    assert_eq!(
        format_section_id("namelist:domain", "diag"),
        "namelist:domain(diag)"
    );
}

#[test]
fn test_insert_replaces_existing_section() {
    let mut tree = ConfigTree::new();
    tree.insert("env", ConfigSection::new().with_option("a", "1"));
    tree.insert("env", ConfigSection::new().with_option("b", "2"));

    assert_eq!(tree.len(), 1);
    let section = tree.get("env").unwrap();
    assert_eq!(section.option("a"), None);
    assert_eq!(section.option("b"), Some("2"));
}

#[test]
fn test_rename_preserves_content_exactly() {
    let mut tree = ConfigTree::new();
    let mut section = streq(2, 205, "DIAG", "TMONMN", "UP5");
    section.state = SectionState::UserIgnored;
    section.comments = vec!["kept from reference suite".to_string()];
    tree.insert("namelist:streq(old)", section.clone());

    tree.rename("namelist:streq(old)", "namelist:streq(new)").unwrap();

    assert!(!tree.contains("namelist:streq(old)"));
    assert_eq!(tree.get("namelist:streq(new)"), Some(&section));
}

#[test]
fn test_rename_to_occupied_identifier_fails() {
    let mut tree = ConfigTree::new();
    tree.insert("namelist:streq(a)", streq(2, 205, "DIAG", "TMONMN", "UP5"));
    tree.insert("namelist:streq(b)", streq(3, 236, "DIAG", "TMONMN", "UP5"));

    assert!(tree.rename("namelist:streq(a)", "namelist:streq(b)").is_err());
}

#[test]
fn test_rename_missing_section_fails() {
    let mut tree = ConfigTree::new();
    assert!(tree.rename("namelist:streq(a)", "namelist:streq(b)").is_err());
}

#[test]
fn test_ids_in_family() {
    let mut tree = ConfigTree::new();
    tree.insert("namelist:streq(a)", ConfigSection::new());
    tree.insert("namelist:domain(diag)", ConfigSection::new());
    tree.insert("namelist:streq(b)", ConfigSection::new());
    tree.insert("env", ConfigSection::new());

    assert_eq!(
        tree.ids_in_family("namelist:streq"),
        vec!["namelist:streq(a)".to_string(), "namelist:streq(b)".to_string()]
    );
}

#[test]
fn test_insertion_order_is_preserved() {
    let mut tree = ConfigTree::new();
    tree.insert("b", ConfigSection::new());
    tree.insert("a", ConfigSection::new());
    tree.insert("c", ConfigSection::new());

    assert_eq!(
        tree.section_ids(),
        vec!["b".to_string(), "a".to_string(), "c".to_string()]
    );
}

#[test]
fn test_tree_round_trips_through_json() {
    let mut tree = ConfigTree::new();
    tree.insert("namelist:streq(a)", streq(2, 205, "DIAG", "TMONMN", "UP5"));

    let json = serde_json::to_string(&tree).unwrap();
    let restored: ConfigTree = serde_json::from_str(&json).unwrap();
    assert_eq!(restored, tree);
}
