//! Item kinds and the indexed item model
//!
//! [`ItemKind`] is the closed set of publicly documented symbol kinds a
//! rustdoc "all items" page can list. Each kind knows the section id it
//! appears under on that page and the filename prefix its item page uses,
//! so the same enum drives both parsing and URL construction.

use serde::{Deserialize, Serialize};

/// Kind of a publicly documented symbol.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemKind {
    Module,
    Struct,
    Enum,
    Trait,
    Function,
    Macro,
    TypeAlias,
    Constant,
    Static,
    Union,
    Attribute,
    Derive,
}

impl ItemKind {
    /// Map a section id from the "all items" page to a kind.
    pub fn from_section_id(id: &str) -> Option<Self> {
        match id {
            "modules" => Some(Self::Module),
            "structs" => Some(Self::Struct),
            "enums" => Some(Self::Enum),
            "traits" => Some(Self::Trait),
            "functions" => Some(Self::Function),
            "macros" => Some(Self::Macro),
            // Rustdoc has used both ids for type aliases across versions.
            "types" | "type-aliases" => Some(Self::TypeAlias),
            "constants" => Some(Self::Constant),
            "statics" => Some(Self::Static),
            "unions" => Some(Self::Union),
            "attributes" => Some(Self::Attribute),
            "derives" => Some(Self::Derive),
            _ => None,
        }
    }

    /// Parse a caller-supplied kind filter.
    pub fn parse(value: &str) -> Option<Self> {
        match value.to_lowercase().as_str() {
            "module" | "mod" => Some(Self::Module),
            "struct" => Some(Self::Struct),
            "enum" => Some(Self::Enum),
            "trait" => Some(Self::Trait),
            "function" | "fn" => Some(Self::Function),
            "macro" => Some(Self::Macro),
            "type_alias" | "type-alias" | "type" => Some(Self::TypeAlias),
            "constant" | "const" => Some(Self::Constant),
            "static" => Some(Self::Static),
            "union" => Some(Self::Union),
            "attribute" | "attr" => Some(Self::Attribute),
            "derive" => Some(Self::Derive),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Module => "module",
            Self::Struct => "struct",
            Self::Enum => "enum",
            Self::Trait => "trait",
            Self::Function => "function",
            Self::Macro => "macro",
            Self::TypeAlias => "type_alias",
            Self::Constant => "constant",
            Self::Static => "static",
            Self::Union => "union",
            Self::Attribute => "attribute",
            Self::Derive => "derive",
        }
    }

    /// Filename prefix on the item's documentation page. Modules use
    /// `index.html` inside their directory instead and have no prefix.
    pub fn url_prefix(&self) -> Option<&'static str> {
        match self {
            Self::Module => None,
            Self::Struct => Some("struct"),
            Self::Enum => Some("enum"),
            Self::Trait => Some("trait"),
            Self::Function => Some("fn"),
            Self::Macro => Some("macro"),
            Self::TypeAlias => Some("type"),
            Self::Constant => Some("constant"),
            Self::Static => Some("static"),
            Self::Union => Some("union"),
            Self::Attribute => Some("attr"),
            Self::Derive => Some("derive"),
        }
    }
}

impl std::fmt::Display for ItemKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One publicly documented symbol from a crate's flat item listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexedItem {
    pub kind: ItemKind,
    /// Full `::`-separated path relative to the crate root.
    pub qualified_name: String,
    /// Final segment of the qualified name.
    pub bare_name: String,
    /// Qualified name minus the bare name; empty for root items.
    pub module_path: String,
}

impl IndexedItem {
    pub fn new(kind: ItemKind, qualified_name: impl Into<String>) -> Self {
        let qualified_name = qualified_name.into();
        let (module_path, bare_name) = match qualified_name.rsplit_once("::") {
            Some((module, bare)) => (module.to_string(), bare.to_string()),
            None => (String::new(), qualified_name.clone()),
        };
        Self {
            kind,
            qualified_name,
            bare_name,
            module_path,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn qualified_name_splits_into_module_and_bare() {
        let item = IndexedItem::new(ItemKind::Struct, "sync::mpsc::Sender");
        assert_eq!(item.bare_name, "Sender");
        assert_eq!(item.module_path, "sync::mpsc");
    }

    #[test]
    fn root_item_has_empty_module_path() {
        let item = IndexedItem::new(ItemKind::Function, "spawn");
        assert_eq!(item.bare_name, "spawn");
        assert_eq!(item.module_path, "");
    }

    #[test]
    fn section_ids_cover_both_type_alias_spellings() {
        assert_eq!(
            ItemKind::from_section_id("types"),
            Some(ItemKind::TypeAlias)
        );
        assert_eq!(
            ItemKind::from_section_id("type-aliases"),
            Some(ItemKind::TypeAlias)
        );
        assert_eq!(ItemKind::from_section_id("sidebar"), None);
    }

    #[test]
    fn kind_filter_accepts_short_forms() {
        assert_eq!(ItemKind::parse("fn"), Some(ItemKind::Function));
        assert_eq!(ItemKind::parse("Struct"), Some(ItemKind::Struct));
        assert_eq!(ItemKind::parse("widget"), None);
    }
}
