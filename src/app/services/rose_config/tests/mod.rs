//! Tests for the configuration tree subsystem

mod tree_tests;

use crate::app::services::rose_config::tree::{ConfigSection, ConfigTree};

/// A streq section for a code with the given profiles
pub fn streq(section: u32, item: u32, dom: &str, tim: &str, usage: &str) -> ConfigSection {
    ConfigSection::new()
        .with_option("dom_name", dom)
        .with_option("isec", section.to_string())
        .with_option("item", item.to_string())
        .with_option("package", "STD_GA7")
        .with_option("tim_name", tim)
        .with_option("use_name", usage)
}

/// A tree holding one correctly-content-addressed streq section
pub fn tree_with_streq(section: u32, item: u32) -> (ConfigTree, String) {
    use crate::app::services::rose_config::identity::content_index;
    use crate::app::services::rose_config::tree::format_section_id;

    let section_node = streq(section, item, "DIAG", "TMONMN", "UP5");
    let hash = content_index(&section_node, &[]);
    let id = format_section_id(
        "namelist:streq",
        &format!("{section:02}{item:03}_{hash}"),
    );
    let mut tree = ConfigTree::new();
    tree.insert(id.clone(), section_node);
    (tree, id)
}
