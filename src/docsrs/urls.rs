//! URL construction for docs.rs pages
//!
//! Crate names use hyphens on the registry but underscores in rustdoc
//! output paths; conversion happens here and nowhere else.

use crate::index::IndexedItem;

pub const DOCS_RS_BASE: &str = "https://docs.rs";

/// The version alias docs.rs resolves to the newest release.
pub const LATEST_VERSION: &str = "latest";

/// Crate name as it appears in rustdoc output paths.
fn rustdoc_crate_name(crate_name: &str) -> String {
    crate_name.replace('-', "_")
}

/// URL of the flat "all items" listing for one crate version.
pub fn all_items_url(crate_name: &str, version: &str) -> String {
    format!(
        "{DOCS_RS_BASE}/{crate_name}/{version}/{}/all.html",
        rustdoc_crate_name(crate_name)
    )
}

/// URL of the documentation page for a resolved item.
pub fn item_url(crate_name: &str, version: &str, item: &IndexedItem) -> String {
    let root = format!(
        "{DOCS_RS_BASE}/{crate_name}/{version}/{}",
        rustdoc_crate_name(crate_name)
    );
    let module_dir = item.module_path.replace("::", "/");

    match item.kind.url_prefix() {
        // Modules are directories with their own index page.
        None => {
            let dir = item.qualified_name.replace("::", "/");
            format!("{root}/{dir}/index.html")
        }
        Some(prefix) if module_dir.is_empty() => {
            format!("{root}/{prefix}.{}.html", item.bare_name)
        }
        Some(prefix) => {
            format!("{root}/{module_dir}/{prefix}.{}.html", item.bare_name)
        }
    }
}
