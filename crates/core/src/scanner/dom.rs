//! Read-only document access used by the board adapters

use serde::{Deserialize, Serialize};

/// Opaque handle to an element inside a [`DocumentQuery`] implementation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(pub usize);

/// Element bounding box size in CSS pixels. Piece transforms are relative to
/// the container, so its page offset is never needed.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub width: f64,
    pub height: f64,
}

/// The narrow slice of the DOM the scanner needs.
///
/// Implementations must not mutate anything; the scanner may call any method
/// repeatedly within a single pass.
pub trait DocumentQuery {
    /// Element with the given `id` attribute, if any.
    fn element_by_id(&self, id: &str) -> Option<NodeId>;

    /// First element in document order carrying `class`.
    fn first_by_class(&self, class: &str) -> Option<NodeId>;

    /// All descendants of `root` in document order, `root` excluded.
    fn descendants(&self, root: NodeId) -> Vec<NodeId>;

    fn class_list(&self, node: NodeId) -> Vec<String>;

    fn bounding_rect(&self, node: NodeId) -> Option<Rect>;

    /// Computed CSS `transform` value, e.g. `matrix(1, 0, 0, 1, 100, 600)`.
    fn computed_transform(&self, node: NodeId) -> Option<String>;

    fn has_class(&self, node: NodeId, class: &str) -> bool {
        self.class_list(node).iter().any(|c| c == class)
    }

    fn descendants_with_class(&self, root: NodeId, class: &str) -> Vec<NodeId> {
        self.descendants(root)
            .into_iter()
            .filter(|&node| self.has_class(node, class))
            .collect()
    }
}
