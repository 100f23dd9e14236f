//! Pure HTML-to-domain extraction for docs.rs pages
//!
//! Every function here takes the page body as text and returns owned
//! domain data, keeping the volatile presentation format isolated from
//! the rest of the system. A page missing the expected structure yields
//! an empty result, not an error: docs.rs pages vary in which sections
//! they include.

use scraper::{ElementRef, Html, Selector};

use crate::index::{IndexedItem, ItemKind};

fn selector(css: &str) -> Selector {
    Selector::parse(css).expect("static selector")
}

/// Parse the flat "all items" listing into indexed items.
///
/// The page lists one `<h3 id="structs">`-style heading per kind, each
/// followed by a `<ul class="all-items">` whose link text is the item's
/// qualified path relative to the crate root.
pub fn parse_all_items(html: &str) -> Vec<IndexedItem> {
    let doc = Html::parse_document(html);
    let headings = selector("h3[id]");
    let links = selector("li a");

    let mut items = Vec::new();
    for heading in doc.select(&headings) {
        let Some(kind) = heading
            .value()
            .attr("id")
            .and_then(ItemKind::from_section_id)
        else {
            continue;
        };

        let Some(list) = next_element_sibling(&heading) else {
            continue;
        };
        if list.value().name() != "ul" {
            continue;
        }

        for link in list.select(&links) {
            let name = link.text().collect::<String>().trim().to_string();
            if !name.is_empty() {
                items.push(IndexedItem::new(kind, name));
            }
        }
    }
    items
}

/// Extract the main documentation text from an item page.
///
/// Recent rustdoc wraps the top docblock in a `details.top-doc` toggle;
/// older output places it directly inside the main content section.
pub fn extract_item_docs(html: &str) -> Option<String> {
    let doc = Html::parse_document(html);
    for css in [
        "details.top-doc .docblock",
        "#main-content .docblock",
        ".docblock",
    ] {
        if let Some(block) = doc.select(&selector(css)).next() {
            let text = docblock_text(&block);
            if !text.is_empty() {
                return Some(text);
            }
        }
    }
    None
}

/// Extract the item's declaration (the `pre.item-decl` code block).
pub fn extract_item_declaration(html: &str) -> Option<String> {
    let doc = Html::parse_document(html);
    let decl = doc
        .select(&selector("pre.rust.item-decl"))
        .next()
        .or_else(|| doc.select(&selector(".item-decl pre")).next())?;
    let text = decl.text().collect::<String>().trim().to_string();
    (!text.is_empty()).then_some(text)
}

fn next_element_sibling<'a>(element: &ElementRef<'a>) -> Option<ElementRef<'a>> {
    element.next_siblings().find_map(ElementRef::wrap)
}

/// Flatten a docblock into plain text, one blank line between blocks.
fn docblock_text(block: &ElementRef<'_>) -> String {
    let mut parts = Vec::new();
    for child in block.children() {
        if let Some(el) = ElementRef::wrap(child) {
            let text = el.text().collect::<String>();
            let trimmed = text.trim();
            if !trimmed.is_empty() {
                parts.push(trimmed.to_string());
            }
        } else if let Some(text) = child.value().as_text() {
            let trimmed = text.trim();
            if !trimmed.is_empty() {
                parts.push(trimmed.to_string());
            }
        }
    }
    parts.join("\n\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL_ITEMS_PAGE: &str = r#"
        <html><body><main id="main-content">
        <h1>List of all items</h1>
        <h3 id="structs">Structs</h3>
        <ul class="all-items">
            <li><a href="sync/struct.Mutex.html">sync::Mutex</a></li>
            <li><a href="sync/struct.MutexGuard.html">sync::MutexGuard</a></li>
        </ul>
        <h3 id="functions">Functions</h3>
        <ul class="all-items">
            <li><a href="fn.spawn.html">spawn</a></li>
        </ul>
        <h3 id="types">Type Aliases</h3>
        <ul class="all-items">
            <li><a href="type.Result.html">Result</a></li>
        </ul>
        <h3 id="unrelated">Unrelated</h3>
        <ul><li><a href="x.html">ignored</a></li></ul>
        </main></body></html>
    "#;

    #[test]
    fn parses_items_grouped_by_section() {
        let items = parse_all_items(ALL_ITEMS_PAGE);
        assert_eq!(items.len(), 4);

        assert_eq!(items[0].kind, ItemKind::Struct);
        assert_eq!(items[0].qualified_name, "sync::Mutex");
        assert_eq!(items[0].bare_name, "Mutex");
        assert_eq!(items[0].module_path, "sync");

        assert_eq!(items[2].kind, ItemKind::Function);
        assert_eq!(items[2].qualified_name, "spawn");

        assert_eq!(items[3].kind, ItemKind::TypeAlias);
        assert_eq!(items[3].qualified_name, "Result");
    }

    #[test]
    fn page_without_item_sections_yields_no_items() {
        let items = parse_all_items("<html><body><p>not documentation</p></body></html>");
        assert!(items.is_empty());
    }

    #[test]
    fn extracts_top_docblock_from_item_page() {
        let html = r#"
            <html><body><main id="main-content">
            <pre class="rust item-decl"><code>pub struct Mutex&lt;T&gt; { /* private fields */ }</code></pre>
            <details class="toggle top-doc" open>
                <summary>Expand description</summary>
                <div class="docblock">
                    <p>An asynchronous mutual exclusion primitive.</p>
                    <p>This type acts similarly to <code>std::sync::Mutex</code>.</p>
                </div>
            </details>
            </main></body></html>
        "#;

        let docs = extract_item_docs(html).expect("docblock present");
        assert!(docs.starts_with("An asynchronous mutual exclusion primitive."));
        assert!(docs.contains("std::sync::Mutex"));

        let decl = extract_item_declaration(html).expect("declaration present");
        assert!(decl.starts_with("pub struct Mutex"));
    }

    #[test]
    fn missing_docblock_is_no_data_not_an_error() {
        assert_eq!(extract_item_docs("<html><body></body></html>"), None);
        assert_eq!(extract_item_declaration("<html><body></body></html>"), None);
    }
}
