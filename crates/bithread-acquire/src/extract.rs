// Readable text extraction from a fetched HTML page.
//
// Walks the content elements in document order and concatenates their text,
// skipping subtrees that never carry prose (scripts, navigation, forms, ...).

use crate::normalize;
use ego_tree::NodeRef;
use scraper::{Html, Node, Selector};
use std::ops::Deref;

/// Hard cap on extracted text, in characters.
pub const MAX_CHARS: usize = 20_000;

/// Elements whose whole subtree is dropped before extraction.
const STRIPPED_TAGS: &[&str] = &[
    "script", "style", "nav", "footer", "iframe", "img", "button", "form", "meta", "link",
];

const CONTENT_SELECTOR: &str = "h1, h2, h3, h4, h5, h6, p, article, section, div";

/// Readable page text plus the size it had before the character cap.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageText {
    /// At most [`MAX_CHARS`] characters.
    pub text: String,
    /// Character count of the full extracted text, before truncation.
    pub retrieved_chars: usize,
}

/// Extract the readable text of an HTML document.
///
/// Every heading and paragraph/article/section/div contributes the full text
/// of its subtree, so text inside nested containers is emitted once per
/// enclosing match. Headings are uppercased and wrapped as `**TEXT**` with
/// surrounding line breaks. Fragments are joined with single spaces and the
/// result is capped at [`MAX_CHARS`] characters.
pub fn extract_text(html: &str) -> String {
    extract_page(html).text
}

/// Like [`extract_text`], also reporting the untruncated length.
pub fn extract_page(html: &str) -> PageText {
    let document = Html::parse_document(html);
    let content_sel = Selector::parse(CONTENT_SELECTOR).expect("valid selector");

    let mut fragments = Vec::new();

    for element in document.select(&content_sel) {
        if has_stripped_ancestor(*element) {
            continue;
        }

        let mut text = String::new();
        collect_text(*element, &mut text);
        let trimmed = text.trim();
        if trimmed.is_empty() {
            continue;
        }

        if is_heading(element.value().name()) {
            fragments.push(format!("\n\n**{}**\n", trimmed.to_uppercase()));
        } else {
            fragments.push(trimmed.to_string());
        }
    }

    let full_text = normalize::normalize_text(&fragments.join(" "));
    let retrieved_chars = full_text.chars().count();
    tracing::info!(
        chars = retrieved_chars,
        fragments = fragments.len(),
        "Retrieved page text"
    );

    PageText {
        text: normalize::truncate_chars(&full_text, MAX_CHARS).to_string(),
        retrieved_chars,
    }
}

/// Collect all text under a node, skipping stripped subtrees.
fn collect_text(node: NodeRef<Node>, out: &mut String) {
    for child in node.children() {
        match child.value() {
            Node::Text(text) => out.push_str(text.deref()),
            Node::Element(elem) if is_stripped(elem.name()) => {}
            Node::Element(_) => collect_text(child, out),
            _ => {}
        }
    }
}

fn has_stripped_ancestor(node: NodeRef<Node>) -> bool {
    node.ancestors().any(|ancestor| {
        ancestor
            .value()
            .as_element()
            .is_some_and(|elem| is_stripped(elem.name()))
    })
}

fn is_stripped(tag: &str) -> bool {
    STRIPPED_TAGS.contains(&tag)
}

fn is_heading(tag: &str) -> bool {
    matches!(tag, "h1" | "h2" | "h3" | "h4" | "h5" | "h6")
}
