//! Rendered content tree scanned by the outline extractor.
//!
//! The host renderer produces a tree of block nodes in which headings are
//! rank-tagged (three ranks). Nodes live in an arena and are addressed by
//! index, so the tree can be traversed and mutated without reference cycles.
//! The extractor writes anchors back onto heading nodes it does not otherwise
//! own; that side effect is part of the contract (deep links and re-extraction
//! both rely on the anchor surviving on the node).

/// Index of a node in the content tree arena.
pub type NodeId = usize;

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
/// Semantic rank of a heading node. Deeper ranks are not rank-tagged and do
/// not participate in outline extraction.
pub enum HeadingRank {
    /// Top-level heading.
    H1,
    /// Second-level heading.
    H2,
    /// Third-level heading.
    H3,
}

impl HeadingRank {
    #[must_use]
    /// Numeric depth of the rank, 1 through 3.
    pub fn depth(self) -> u8 {
        match self {
            Self::H1 => 1,
            Self::H2 => 2,
            Self::H3 => 3,
        }
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
/// Block kind of a content node.
pub enum NodeKind {
    /// Rank-tagged heading, eligible for outline extraction.
    Heading(HeadingRank),
    /// Grouping node introduced by the renderer (a heading's subtree).
    Section,
    /// Any other block: paragraph, code, list, quote, and so on.
    Body,
}

#[derive(Clone, Debug)]
/// One block node in the rendered content tree.
pub struct ContentNode {
    /// Block kind, determining extraction eligibility.
    pub kind: NodeKind,
    /// Trimmed text content. For headings this is the display label source.
    pub text: String,
    /// Stable identifier carried by the node, either supplied by the host
    /// renderer or assigned by the extractor.
    pub anchor: Option<String>,
    /// Row the node occupies in the rendered document (document coordinates).
    pub row: usize,
    /// Child nodes in document order.
    pub children: Vec<NodeId>,
}

#[derive(Clone, Default, Debug)]
/// Arena-backed tree of rendered content blocks.
pub struct ContentTree {
    nodes: Vec<ContentNode>,
    roots: Vec<NodeId>,
}

impl ContentTree {
    #[must_use]
    /// Creates an empty tree.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a node, attaching it to `parent` or to the root list.
    pub fn push(&mut self, node: ContentNode, parent: Option<NodeId>) -> NodeId {
        let id = self.nodes.len();
        self.nodes.push(node);
        match parent {
            Some(p) => self.nodes[p].children.push(id),
            None => self.roots.push(id),
        }
        id
    }

    #[must_use]
    /// Borrow a node by id.
    pub fn node(&self, id: NodeId) -> &ContentNode {
        &self.nodes[id]
    }

    /// Assigns a stable anchor onto a node.
    ///
    /// The extractor calls this for headings that arrive without one; the
    /// assignment persists for the lifetime of the tree so later extractions
    /// and deep links resolve to the same identifier.
    pub fn set_anchor(&mut self, id: NodeId, anchor: String) {
        self.nodes[id].anchor = Some(anchor);
    }

    #[must_use]
    /// Rank-tagged heading nodes in document (pre-order) order.
    pub fn headings(&self) -> Vec<NodeId> {
        let mut out = Vec::new();
        self.walk(&mut |id, node| {
            if matches!(node.kind, NodeKind::Heading(_)) {
                out.push(id);
            }
        });
        out
    }

    #[must_use]
    /// Resolves an anchor to the node carrying it.
    pub fn find_anchor(&self, anchor: &str) -> Option<NodeId> {
        self.nodes
            .iter()
            .position(|n| n.anchor.as_deref() == Some(anchor))
    }

    #[must_use]
    /// Number of nodes in the tree.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[must_use]
    /// Whether the tree holds no nodes at all.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Pre-order traversal over every node.
    fn walk(&self, visit: &mut impl FnMut(NodeId, &ContentNode)) {
        fn go(
            tree: &ContentTree,
            id: NodeId,
            visit: &mut impl FnMut(NodeId, &ContentNode),
        ) {
            visit(id, &tree.nodes[id]);
            for &child in &tree.nodes[id].children {
                go(tree, child, visit);
            }
        }
        for &root in &self.roots {
            go(self, root, visit);
        }
    }
}
