//! Flattening of mixed-content markup into line-oriented text.

use roxmltree::Node;

use super::vocabulary::TagVocabulary;
use crate::xml::get_tag_name;

/// Placeholder line emitted at the start of a table body.
const TABLE_BODY_MARKER: &str = "<tbody>";

/// Spacing corrections applied after fragments are joined with spaces.
const PUNCTUATION_FIXES: [(&str, &str); 6] = [
    ("( ", "("),
    (" )", ")"),
    (" .", "."),
    ("* ;", "*;"),
    ("* ,", "*,"),
    ("* .", "*."),
];

/// Reconstruct the text of a subtree.
///
/// Walks the subtree in document order (the node itself first), emitting
/// each element's trimmed text (stylized per the vocabulary) and tail,
/// followed by break, cell and table-body tokens. The fragments are then
/// joined, respaced and rewritten into a lightweight pipe-table notation.
///
/// # Examples
/// ```
/// use roxmltree::Document;
/// use clir_extractor::text::{create_lims_vocabulary, reconstruct_text};
///
/// let xml = "<Section><Label>5</Label><Text>Hello <Emphasis>world</Emphasis>.</Text></Section>";
/// let doc = Document::parse(xml).unwrap();
/// let text = reconstruct_text(doc.root_element(), &create_lims_vocabulary());
/// assert_eq!(text, "Hello *world*.");
/// ```
pub fn reconstruct_text(node: Node<'_, '_>, vocabulary: &TagVocabulary) -> String {
    let fragments = collect_fragments(node, vocabulary);
    let text = normalize_spacing(&fragments.join(" "));
    rewrite_table_lines(&text)
}

/// Text directly following a node, before its next sibling.
fn trailing_text<'a>(node: Node<'a, '_>) -> Option<&'a str> {
    node.next_sibling()
        .filter(|sibling| sibling.is_text())
        .and_then(|sibling| sibling.text())
}

fn non_empty(text: Option<&str>) -> Option<&str> {
    text.map(str::trim).filter(|t| !t.is_empty())
}

fn collect_fragments(node: Node<'_, '_>, vocabulary: &TagVocabulary) -> Vec<String> {
    let mut exclude = vocabulary.exclude_once();
    let mut fragments: Vec<String> = Vec::new();

    for current in node.descendants() {
        // Comments and processing instructions only carry their tail
        if current.is_comment() || current.is_pi() {
            if let Some(tail) = non_empty(trailing_text(current)) {
                fragments.push(tail.to_string());
            }
            continue;
        }
        if !current.is_element() {
            continue;
        }

        let tag = get_tag_name(current);
        if exclude.take(tag) {
            continue;
        }

        if let Some(text) = non_empty(current.text()) {
            let styled = match vocabulary.stylization(tag) {
                Some(style) => style.apply(text),
                None => text.to_string(),
            };
            fragments.push(styled);
        }
        if let Some(tail) = non_empty(trailing_text(current)) {
            fragments.push(tail.to_string());
        }
        if let Some(line_break) = vocabulary.break_after(tag) {
            fragments.push(line_break.to_string());
        }
        if vocabulary.is_pipe(tag) {
            fragments.push("|".to_string());
        }
        if vocabulary.is_table_body(tag) {
            fragments.push(format!("\n{TABLE_BODY_MARKER}"));
        }
    }

    fragments
}

/// Collapse join artifacts and fix spacing around punctuation.
fn normalize_spacing(joined: &str) -> String {
    let mut text = joined
        .replace(" \n ", "\n")
        .trim()
        .replace('\u{2002}', " ");
    for (from, to) in PUNCTUATION_FIXES {
        text = text.replace(from, to);
    }
    text.trim().to_string()
}

/// Markdown separator row with `cells` columns.
fn separator_row(cells: usize) -> String {
    format!("{}|", "| --- ".repeat(cells))
}

/// Turn pipe-terminated lines into table rows and resolve table-body markers.
fn rewrite_table_lines(text: &str) -> String {
    let mut lines: Vec<String> = text.split('\n').map(String::from).collect();

    for i in 0..lines.len() {
        let line = lines[i].trim().to_string();
        if line.ends_with('|') {
            lines[i] = format!("| {line}");
        }
        if line == TABLE_BODY_MARKER {
            let header = i
                .checked_sub(1)
                .map(|prev| lines[prev].as_str())
                .filter(|prev| prev.trim().ends_with('|'));
            let replacement = match header {
                Some(prev) => separator_row(prev.split('|').count().saturating_sub(2)),
                None => String::new(),
            };
            lines[i] = replacement;
        }
    }

    lines.join("\n")
}
