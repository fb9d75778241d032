//! Serializable DOM snapshot implementing [`DocumentQuery`]
//!
//! The snapshot is a plain element tree: enough of the page for the board
//! adapters to work on, captured by whatever runs in the browser and shipped
//! as JSON. Tests build the same trees by hand.

use serde::{Deserialize, Serialize};

use super::dom::{DocumentQuery, NodeId, Rect};
use crate::error::Result;

/// One element of a snapshot tree.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SnapshotNode {
    pub tag: String,
    pub id: Option<String>,
    /// Space separated, as in the `class` attribute.
    pub class: String,
    pub rect: Option<Rect>,
    pub transform: Option<String>,
    pub children: Vec<SnapshotNode>,
}

impl SnapshotNode {
    pub fn element(tag: &str) -> Self {
        Self {
            tag: tag.to_string(),
            ..Self::default()
        }
    }

    pub fn with_id(mut self, id: &str) -> Self {
        self.id = Some(id.to_string());
        self
    }

    pub fn with_class(mut self, class: &str) -> Self {
        self.class = class.to_string();
        self
    }

    pub fn with_size(mut self, width: f64, height: f64) -> Self {
        self.rect = Some(Rect { width, height });
        self
    }

    pub fn with_transform(mut self, transform: &str) -> Self {
        self.transform = Some(transform.to_string());
        self
    }

    pub fn child(mut self, child: SnapshotNode) -> Self {
        self.children.push(child);
        self
    }
}

#[derive(Debug, Clone)]
struct FlatNode {
    id: Option<String>,
    classes: Vec<String>,
    rect: Option<Rect>,
    transform: Option<String>,
    /// One past the last descendant's index.
    subtree_end: usize,
}

/// A snapshot flattened into document (pre-)order for querying.
#[derive(Debug, Clone, Deserialize)]
#[serde(from = "SnapshotNode")]
pub struct SnapshotDocument {
    nodes: Vec<FlatNode>,
}

impl SnapshotDocument {
    pub fn new(root: SnapshotNode) -> Self {
        let mut nodes = Vec::new();
        flatten(root, &mut nodes);
        Self { nodes }
    }

    pub fn from_json(raw: &str) -> Result<Self> {
        Ok(serde_json::from_str(raw)?)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    fn node(&self, node: NodeId) -> Option<&FlatNode> {
        self.nodes.get(node.0)
    }

    fn find(&self, pred: impl Fn(&FlatNode) -> bool) -> Option<NodeId> {
        self.nodes.iter().position(pred).map(NodeId)
    }
}

impl From<SnapshotNode> for SnapshotDocument {
    fn from(root: SnapshotNode) -> Self {
        Self::new(root)
    }
}

fn flatten(node: SnapshotNode, out: &mut Vec<FlatNode>) {
    let index = out.len();
    out.push(FlatNode {
        id: node.id,
        classes: node.class.split_whitespace().map(str::to_string).collect(),
        rect: node.rect,
        transform: node.transform,
        subtree_end: index + 1,
    });
    for child in node.children {
        flatten(child, out);
    }
    out[index].subtree_end = out.len();
}

impl DocumentQuery for SnapshotDocument {
    fn element_by_id(&self, id: &str) -> Option<NodeId> {
        self.find(|n| n.id.as_deref() == Some(id))
    }

    fn first_by_class(&self, class: &str) -> Option<NodeId> {
        self.find(|n| n.classes.iter().any(|c| c == class))
    }

    fn descendants(&self, root: NodeId) -> Vec<NodeId> {
        match self.node(root) {
            Some(n) => (root.0 + 1..n.subtree_end).map(NodeId).collect(),
            None => Vec::new(),
        }
    }

    fn class_list(&self, node: NodeId) -> Vec<String> {
        self.node(node).map(|n| n.classes.clone()).unwrap_or_default()
    }

    fn bounding_rect(&self, node: NodeId) -> Option<Rect> {
        self.node(node).and_then(|n| n.rect)
    }

    fn computed_transform(&self, node: NodeId) -> Option<String> {
        self.node(node).and_then(|n| n.transform.clone())
    }
}
