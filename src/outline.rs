//! Outline extraction from a rendered content tree.
//!
//! The extractor walks rank-tagged headings in document order, drops the ones
//! with no visible text, and gives every survivor a stable identifier. A
//! heading that already carries an anchor keeps it; anything else gets a
//! synthesized anchor written back onto the node, so a second extraction over
//! an unchanged tree reproduces the identical outline.

use crate::content::{ContentTree, NodeKind};
use serde::Serialize;

/// Longest slug fragment kept in a synthesized anchor.
const SLUG_MAX: usize = 50;

#[derive(Clone, PartialEq, Eq, Debug, Serialize)]
/// One navigable heading in the outline.
pub struct OutlineEntry {
    /// Stable identifier, unique within an outline snapshot.
    pub id: String,
    /// Display label, trimmed heading text.
    pub text: String,
    /// Heading depth, 1 through 3.
    pub level: u8,
}

/// Ordered sequence of outline entries, insertion order = document order.
pub type Outline = Vec<OutlineEntry>;

/// Scans `tree` for rank-tagged headings and produces the outline.
///
/// Headings whose trimmed text is empty are excluded. The running index used
/// in synthesized anchors counts every rank-tagged heading, excluded or not,
/// which keeps identifiers stable when an empty heading later gains text and
/// disambiguates identical slugs by position.
///
/// Synthesized anchors are assigned back onto the source node; see
/// [`ContentTree::set_anchor`] for the ownership caveat.
pub fn extract(tree: &mut ContentTree) -> Outline {
    let mut entries = Vec::new();

    for (index, node_id) in tree.headings().into_iter().enumerate() {
        let node = tree.node(node_id);
        let NodeKind::Heading(rank) = node.kind else {
            continue;
        };

        let text = node.text.trim().to_string();
        if text.is_empty() {
            continue;
        }

        let id = if let Some(anchor) = &node.anchor {
            anchor.clone()
        } else {
            let id = format!("toc-heading-{index}-{}", slug(&text));
            tree.set_anchor(node_id, id.clone());
            id
        };

        entries.push(OutlineEntry {
            id,
            text,
            level: rank.depth(),
        });
    }

    entries
}

/// Derives a slug fragment from heading text: lower-cased, non-word
/// characters stripped, whitespace runs collapsed to single hyphens,
/// truncated to [`SLUG_MAX`] characters.
fn slug(text: &str) -> String {
    let lowered = text.to_lowercase();
    let kept: String = lowered
        .chars()
        .filter(|c| c.is_alphanumeric() || *c == '_' || *c == '-' || c.is_whitespace())
        .collect();

    kept.split_whitespace()
        .collect::<Vec<_>>()
        .join("-")
        .chars()
        .take(SLUG_MAX)
        .collect()
}

#[cfg(test)]
#[path = "tests/outline.rs"]
mod tests;
