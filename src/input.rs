//! Host adapter: turns a markdown file into a rendered content tree.
//!
//! tree-sitter's block grammar already nests content under `section` nodes
//! keyed by heading level, so the content tree mirrors the document's real
//! structure. Headings keep their source row, which is all the line layout
//! needs to place them for visibility sampling. A trailing `{#custom-id}`
//! marker on a heading supplies a pre-existing anchor, which the extractor
//! reuses instead of synthesizing one.

use crate::content::{ContentNode, ContentTree, NodeKind};
use crate::formats::Format;
use std::path::Path;
use std::{fs, io};
use streaming_iterator::StreamingIterator;
use tree_sitter::{Parser, Query, QueryCursor};

/// A loaded document: raw source plus the content tree built from it.
pub struct Document {
    /// Raw markdown source, rendered line by line in the reading view.
    pub source: String,
    /// Content tree scanned by the outline extractor.
    pub tree: ContentTree,
}

/// Reads and parses a markdown document.
///
/// # Errors
///
/// Returns an error when the file cannot be read; the caller treats that as
/// "root not present yet" and retries rather than failing.
pub fn load_document(path: &Path, format: &impl Format) -> io::Result<Document> {
    let source = fs::read_to_string(path)?;
    let tree = build_tree(&source, format);
    Ok(Document { source, tree })
}

#[must_use]
/// Builds a content tree from markdown source.
///
/// Parse failures degrade to an empty tree (and therefore an empty outline,
/// which renders no panel) rather than surfacing an error.
pub fn build_tree(source: &str, format: &impl Format) -> ContentTree {
    let mut tree = ContentTree::new();

    let mut parser = Parser::new();
    if parser.set_language(&format.language()).is_err() {
        return tree;
    }
    let Some(parsed) = parser.parse(source, None) else {
        return tree;
    };
    let Ok(title_query) = Query::new(&format.language(), format.title_query()) else {
        return tree;
    };

    build_children(
        &mut tree,
        parsed.root_node(),
        None,
        source,
        format,
        &title_query,
    );
    tree
}

/// Appends `ts_node`'s named children under `parent`, recursing into
/// sections.
fn build_children(
    tree: &mut ContentTree,
    ts_node: tree_sitter::Node<'_>,
    parent: Option<usize>,
    source: &str,
    format: &impl Format,
    title_query: &Query,
) {
    let mut cursor = ts_node.walk();
    for child in ts_node.named_children(&mut cursor) {
        let row = child.start_position().row;
        if child.kind() == format.section_kind() {
            let id = tree.push(
                ContentNode {
                    kind: NodeKind::Section,
                    text: String::new(),
                    anchor: None,
                    row,
                    children: Vec::new(),
                },
                parent,
            );
            build_children(tree, child, Some(id), source, format, title_query);
        } else if child.kind() == format.heading_kind() {
            let raw = heading_title(child, source, title_query);
            let (text, anchor) = split_anchor(&raw);
            let kind = format
                .heading_rank(&child)
                .map_or(NodeKind::Body, NodeKind::Heading);
            tree.push(
                ContentNode {
                    kind,
                    text,
                    anchor,
                    row,
                    children: Vec::new(),
                },
                parent,
            );
        } else {
            tree.push(
                ContentNode {
                    kind: NodeKind::Body,
                    text: source[child.byte_range()].trim().to_string(),
                    anchor: None,
                    row,
                    children: Vec::new(),
                },
                parent,
            );
        }
    }
}

/// Pulls the display text out of a heading via the format's title query.
fn heading_title(heading: tree_sitter::Node<'_>, source: &str, title_query: &Query) -> String {
    let mut cursor = QueryCursor::new();
    let mut matches = cursor.matches(title_query, heading, source.as_bytes());
    while let Some(m) = matches.next() {
        if let Some(capture) = m.captures.first() {
            return source[capture.node.byte_range()].to_string();
        }
    }
    String::new()
}

/// Splits a trailing `{#anchor}` marker off a heading title.
///
/// The marker must close the title and contain no whitespace; anything else
/// is treated as literal text.
fn split_anchor(raw: &str) -> (String, Option<String>) {
    let trimmed = raw.trim();
    let marker = trimmed
        .strip_suffix('}')
        .and_then(|body| body.rfind("{#").map(|open| (open, &body[open + 2..])))
        .filter(|(_, anchor)| !anchor.is_empty() && !anchor.contains(char::is_whitespace));
    if let Some((open, anchor)) = marker {
        (
            trimmed[..open].trim_end().to_string(),
            Some(anchor.to_string()),
        )
    } else {
        (trimmed.to_string(), None)
    }
}

#[cfg(test)]
#[path = "tests/input.rs"]
mod tests;
