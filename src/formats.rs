//! Format trait and implementations for different document types.
//!
//! This module defines the `Format` trait which abstracts over different
//! document formats by providing tree-sitter queries and a rank-tagging
//! convention for heading nodes. The outline engine itself never sees a
//! format; only the host adapter in [`crate::input`] does.

use crate::content::HeadingRank;

pub mod markdown;

/// A parseable document format with rank-tagged headings.
pub trait Format {
    /// Tree-sitter grammar for the format.
    fn language(&self) -> tree_sitter::Language;

    /// Node kind of the grouping node a heading introduces.
    fn section_kind(&self) -> &str;

    /// Node kind of a heading node.
    fn heading_kind(&self) -> &str;

    /// Query capturing the display-text node inside a heading.
    fn title_query(&self) -> &str;

    /// Rank of a matched heading node, or `None` when the heading sits below
    /// the rank-tagging convention and stays out of the outline.
    fn heading_rank(&self, heading: &tree_sitter::Node<'_>) -> Option<HeadingRank>;
}
