//! Markdown format implementation using tree-sitter-md.
//!
//! This module provides tree-sitter queries for parsing markdown documents
//! and extracting heading structure from ATX-style headings (# syntax).
//! Only the first three ranks are rank-tagged; deeper headings remain body
//! content and never enter the outline.

use crate::content::HeadingRank;
use crate::formats::Format;

/// Tree-sitter queries for ATX-style markdown headings (# syntax).
pub struct MarkdownFormat;

impl Format for MarkdownFormat {
    fn language(&self) -> tree_sitter::Language {
        tree_sitter_md::LANGUAGE.into()
    }

    fn section_kind(&self) -> &'static str {
        "section"
    }

    fn heading_kind(&self) -> &'static str {
        "atx_heading"
    }

    fn title_query(&self) -> &'static str {
        "(atx_heading (inline) @title)"
    }

    fn heading_rank(&self, heading: &tree_sitter::Node<'_>) -> Option<HeadingRank> {
        let mut cursor = heading.walk();
        for child in heading.children(&mut cursor) {
            match child.kind() {
                "atx_h1_marker" => return Some(HeadingRank::H1),
                "atx_h2_marker" => return Some(HeadingRank::H2),
                "atx_h3_marker" => return Some(HeadingRank::H3),
                _ => {}
            }
        }
        None
    }
}
