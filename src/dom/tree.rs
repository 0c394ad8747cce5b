//! Tree operations: create, attach, detach, replace, splice, walk.

use slotmap::{SecondaryMap, SlotMap};

use super::node::{NodeData, NodeId};

/// Empty slice constant for returning when a node has no children.
const EMPTY_CHILDREN: &[NodeId] = &[];

/// The central DOM tree, backed by a slotmap arena.
///
/// All nodes live in a single `SlotMap`. Parent/child relationships are stored
/// in secondary maps so that node removal is O(subtree size) and lookup is O(1).
///
/// The arena may hold several disconnected trees at once: freshly parsed
/// fragments stay detached until the instantiation engine splices them into
/// the document tree rooted at [`Dom::root`].
pub struct Dom {
    nodes: SlotMap<NodeId, NodeData>,
    children: SecondaryMap<NodeId, Vec<NodeId>>,
    parent: SecondaryMap<NodeId, NodeId>,
    root: Option<NodeId>,
}

impl Dom {
    /// Create an empty DOM.
    pub fn new() -> Self {
        Self {
            nodes: SlotMap::with_key(),
            children: SecondaryMap::new(),
            parent: SecondaryMap::new(),
            root: None,
        }
    }

    /// Create a detached node.
    pub fn create(&mut self, data: NodeData) -> NodeId {
        let id = self.nodes.insert(data);
        self.children.insert(id, Vec::new());
        id
    }

    /// Append `child` as the last child of `parent`.
    ///
    /// The child is detached from its previous position first.
    ///
    /// # Panics
    ///
    /// Panics (debug) if either node does not exist.
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) {
        debug_assert!(self.nodes.contains_key(parent), "parent does not exist");
        debug_assert!(self.nodes.contains_key(child), "child does not exist");
        self.detach(child);
        self.parent.insert(child, parent);
        self.children
            .get_mut(parent)
            .expect("parent must have children vec")
            .push(child);
    }

    /// Insert `child` as the first child of `parent`.
    pub fn prepend_child(&mut self, parent: NodeId, child: NodeId) {
        debug_assert!(self.nodes.contains_key(parent), "parent does not exist");
        self.detach(child);
        self.parent.insert(child, parent);
        self.children
            .get_mut(parent)
            .expect("parent must have children vec")
            .insert(0, child);
    }

    /// Insert `node` immediately before `reference` among its siblings.
    ///
    /// No-op if `reference` has no parent.
    pub fn insert_before(&mut self, reference: NodeId, node: NodeId) {
        let Some(parent) = self.parent(reference) else {
            return;
        };
        self.detach(node);
        let siblings = self
            .children
            .get_mut(parent)
            .expect("parent must have children vec");
        let idx = siblings
            .iter()
            .position(|&c| c == reference)
            .expect("reference must be listed under its parent");
        siblings.insert(idx, node);
        self.parent.insert(node, parent);
    }

    /// Insert `node` immediately after `reference` among its siblings.
    ///
    /// No-op if `reference` has no parent.
    pub fn insert_after(&mut self, reference: NodeId, node: NodeId) {
        let Some(parent) = self.parent(reference) else {
            return;
        };
        self.detach(node);
        let siblings = self
            .children
            .get_mut(parent)
            .expect("parent must have children vec");
        let idx = siblings
            .iter()
            .position(|&c| c == reference)
            .expect("reference must be listed under its parent");
        siblings.insert(idx + 1, node);
        self.parent.insert(node, parent);
    }

    /// Detach a node from its parent, keeping its subtree intact in the arena.
    ///
    /// If the node is the document root, the root is cleared.
    pub fn detach(&mut self, node: NodeId) {
        if let Some(parent_id) = self.parent.remove(node) {
            if let Some(siblings) = self.children.get_mut(parent_id) {
                siblings.retain(|&child| child != node);
            }
        }
        if self.root == Some(node) {
            self.root = None;
        }
    }

    /// Remove a node and all its descendants recursively.
    ///
    /// Returns the `NodeData` for the removed node, or `None` if it didn't exist.
    pub fn remove(&mut self, id: NodeId) -> Option<NodeData> {
        if !self.nodes.contains_key(id) {
            return None;
        }
        self.detach(id);
        self.remove_subtree(id)
    }

    /// Replace `old` with `new` at the same position in the tree.
    ///
    /// `old`'s entire subtree is removed from the arena; `new` keeps its own
    /// subtree. This is the single atomic replacement used when a mounted
    /// component root takes over its placeholder. If `old` was the document
    /// root, `new` becomes the root.
    pub fn replace(&mut self, old: NodeId, new: NodeId) {
        debug_assert!(self.nodes.contains_key(old), "old node does not exist");
        debug_assert!(self.nodes.contains_key(new), "new node does not exist");

        match self.parent(old) {
            Some(parent) => {
                self.detach(new);
                let siblings = self
                    .children
                    .get_mut(parent)
                    .expect("parent must have children vec");
                let idx = siblings
                    .iter()
                    .position(|&c| c == old)
                    .expect("old must be listed under its parent");
                siblings[idx] = new;
                self.parent.insert(new, parent);
                self.parent.remove(old);
                self.remove_subtree(old);
            }
            None => {
                self.detach(new);
                if self.root == Some(old) {
                    self.root = Some(new);
                }
                self.remove_subtree(old);
            }
        }
    }

    /// Replace `old` with a sequence of nodes spliced in at its position.
    ///
    /// Used by slot projection: the slot point is replaced by the projected
    /// fragment's top-level nodes, in order. `old`'s subtree is removed.
    /// No-op if `old` has no parent.
    pub fn replace_with_fragment(&mut self, old: NodeId, fragment: &[NodeId]) {
        let Some(parent) = self.parent(old) else {
            return;
        };
        // Detach incoming nodes before touching the sibling list so a node
        // moving within the same parent cannot corrupt the index.
        for &node in fragment {
            self.detach(node);
        }
        let siblings = self
            .children
            .get_mut(parent)
            .expect("parent must have children vec");
        let idx = siblings
            .iter()
            .position(|&c| c == old)
            .expect("old must be listed under its parent");
        siblings.splice(idx..=idx, fragment.iter().copied());
        for &node in fragment {
            self.parent.insert(node, parent);
        }
        self.parent.remove(old);
        self.remove_subtree(old);
    }

    /// Delete a subtree from the arena without touching any sibling lists
    /// above it. Callers must have detached `id` (or replaced its slot) first.
    fn remove_subtree(&mut self, id: NodeId) -> Option<NodeData> {
        let mut to_remove = vec![id];
        let mut removed_root_data = None;
        while let Some(current) = to_remove.pop() {
            if let Some(kids) = self.children.remove(current) {
                to_remove.extend(kids);
            }
            self.parent.remove(current);
            let data = self.nodes.remove(current);
            if current == id {
                removed_root_data = data;
            }
        }
        removed_root_data
    }

    /// Get the parent of a node, if it has one.
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.parent.get(id).copied()
    }

    /// Get the children of a node. Returns an empty slice if the node has no
    /// children or does not exist.
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.children
            .get(id)
            .map(Vec::as_slice)
            .unwrap_or(EMPTY_CHILDREN)
    }

    /// Walk from `id` up to the root, collecting ancestor node ids.
    ///
    /// The returned vec does **not** include `id` itself; it starts with the
    /// immediate parent and ends at the root.
    pub fn ancestors(&self, id: NodeId) -> Vec<NodeId> {
        let mut result = Vec::new();
        let mut current = id;
        while let Some(p) = self.parent.get(current).copied() {
            result.push(p);
            current = p;
        }
        result
    }

    /// Immutable access to a node's data.
    pub fn get(&self, id: NodeId) -> Option<&NodeData> {
        self.nodes.get(id)
    }

    /// Mutable access to a node's data.
    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut NodeData> {
        self.nodes.get_mut(id)
    }

    /// The current document root, if set.
    pub fn root(&self) -> Option<NodeId> {
        self.root
    }

    /// Explicitly set the document root.
    pub fn set_root(&mut self, id: NodeId) {
        self.root = Some(id);
    }

    /// Number of nodes in the arena (attached and detached).
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether the arena is empty.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Whether the arena contains a node with the given id.
    pub fn contains(&self, id: NodeId) -> bool {
        self.nodes.contains_key(id)
    }

    /// Pre-order depth-first traversal starting from `start` (inclusive).
    ///
    /// This is document order for the subtree.
    pub fn walk_depth_first(&self, start: NodeId) -> Vec<NodeId> {
        let mut result = Vec::new();
        let mut stack = vec![start];
        while let Some(current) = stack.pop() {
            if !self.nodes.contains_key(current) {
                continue;
            }
            result.push(current);
            // Push children in reverse so the first child is visited first.
            for &child in self.children(current).iter().rev() {
                stack.push(child);
            }
        }
        result
    }

    /// All descendants of `start` in document order, excluding `start` itself.
    pub fn descendants(&self, start: NodeId) -> Vec<NodeId> {
        let mut walk = self.walk_depth_first(start);
        if !walk.is_empty() {
            walk.remove(0);
        }
        walk
    }
}

impl Default for Dom {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::node::ElementData;

    /// Build a small test tree:
    /// ```text
    ///       root
    ///      /    \
    ///    a        b
    ///   / \
    ///  c   d
    /// ```
    fn build_tree() -> (Dom, NodeId, NodeId, NodeId, NodeId, NodeId) {
        let mut dom = Dom::new();
        let root = dom.create(NodeData::element("body"));
        dom.set_root(root);
        let a = dom.create(NodeData::element("div"));
        let b = dom.create(NodeData::element("aside"));
        let c = dom.create(NodeData::element("button"));
        let d = dom.create(NodeData::text("label"));
        dom.append_child(root, a);
        dom.append_child(root, b);
        dom.append_child(a, c);
        dom.append_child(a, d);
        (dom, root, a, b, c, d)
    }

    #[test]
    fn create_is_detached() {
        let mut dom = Dom::new();
        let id = dom.create(NodeData::element("div"));
        assert!(dom.contains(id));
        assert_eq!(dom.parent(id), None);
        assert_eq!(dom.root(), None);
    }

    #[test]
    fn append_child_parent_relationship() {
        let (dom, root, a, _b, c, _d) = build_tree();
        assert_eq!(dom.parent(a), Some(root));
        assert_eq!(dom.parent(c), Some(a));
        assert_eq!(dom.parent(root), None);
    }

    #[test]
    fn children_order() {
        let (dom, root, a, b, c, d) = build_tree();
        assert_eq!(dom.children(root), &[a, b]);
        assert_eq!(dom.children(a), &[c, d]);
        assert!(dom.children(c).is_empty());
    }

    #[test]
    fn prepend_child() {
        let (mut dom, root, a, _b, ..) = build_tree();
        let fresh = dom.create(NodeData::element("nav"));
        dom.prepend_child(root, fresh);
        assert_eq!(dom.children(root)[0], fresh);
        assert_eq!(dom.children(root)[1], a);
    }

    #[test]
    fn insert_before_and_after() {
        let (mut dom, root, a, b, ..) = build_tree();
        let x = dom.create(NodeData::element("x"));
        let y = dom.create(NodeData::element("y"));
        dom.insert_before(b, x);
        dom.insert_after(a, y);
        assert_eq!(dom.children(root), &[a, y, x, b]);
    }

    #[test]
    fn insert_before_detached_reference_is_noop() {
        let mut dom = Dom::new();
        let lone = dom.create(NodeData::element("div"));
        let node = dom.create(NodeData::element("span"));
        dom.insert_before(lone, node);
        assert_eq!(dom.parent(node), None);
    }

    #[test]
    fn append_moves_between_parents() {
        let (mut dom, _root, a, b, c, _d) = build_tree();
        dom.append_child(b, c);
        assert_eq!(dom.parent(c), Some(b));
        assert!(!dom.children(a).contains(&c));
        assert!(dom.children(b).contains(&c));
    }

    #[test]
    fn detach_keeps_subtree() {
        let (mut dom, root, a, _b, c, d) = build_tree();
        dom.detach(a);
        assert_eq!(dom.parent(a), None);
        assert!(!dom.children(root).contains(&a));
        // Subtree intact.
        assert_eq!(dom.children(a), &[c, d]);
        assert!(dom.contains(c));
    }

    #[test]
    fn remove_leaf() {
        let (mut dom, _root, a, _b, c, d) = build_tree();
        let removed = dom.remove(c);
        assert!(removed.is_some());
        assert!(!dom.contains(c));
        assert_eq!(dom.children(a), &[d]);
    }

    #[test]
    fn remove_subtree() {
        let (mut dom, root, a, b, c, d) = build_tree();
        dom.remove(a);
        assert!(!dom.contains(a));
        assert!(!dom.contains(c));
        assert!(!dom.contains(d));
        assert!(dom.contains(root));
        assert_eq!(dom.children(root), &[b]);
    }

    #[test]
    fn remove_root_clears_root() {
        let (mut dom, root, ..) = build_tree();
        dom.remove(root);
        assert!(dom.is_empty());
        assert_eq!(dom.root(), None);
    }

    #[test]
    fn remove_nonexistent() {
        let mut dom = Dom::new();
        let id = dom.create(NodeData::element("x"));
        dom.remove(id);
        assert!(dom.remove(id).is_none());
    }

    #[test]
    fn replace_keeps_position() {
        let (mut dom, root, a, b, c, d) = build_tree();
        let fresh = dom.create(NodeData::element("section"));
        dom.replace(a, fresh);
        assert_eq!(dom.children(root), &[fresh, b]);
        assert_eq!(dom.parent(fresh), Some(root));
        // Old subtree is gone.
        assert!(!dom.contains(a));
        assert!(!dom.contains(c));
        assert!(!dom.contains(d));
    }

    #[test]
    fn replace_root() {
        let (mut dom, root, ..) = build_tree();
        let fresh = dom.create(NodeData::element("html"));
        dom.detach(root); // root becomes a free-standing tree
        dom.set_root(root);
        dom.replace(root, fresh);
        assert_eq!(dom.root(), Some(fresh));
        assert!(!dom.contains(root));
    }

    #[test]
    fn replace_with_fragment_splices_in_order() {
        let (mut dom, root, a, b, ..) = build_tree();
        let x = dom.create(NodeData::element("x"));
        let y = dom.create(NodeData::element("y"));
        dom.replace_with_fragment(a, &[x, y]);
        assert_eq!(dom.children(root), &[x, y, b]);
        assert_eq!(dom.parent(x), Some(root));
        assert_eq!(dom.parent(y), Some(root));
        assert!(!dom.contains(a));
    }

    #[test]
    fn replace_with_empty_fragment_drops_node() {
        let (mut dom, root, a, b, ..) = build_tree();
        dom.replace_with_fragment(a, &[]);
        assert_eq!(dom.children(root), &[b]);
        assert!(!dom.contains(a));
    }

    #[test]
    fn replace_with_fragment_moves_children_out_of_old() {
        // Projection in place: replace a slot with nodes currently inside
        // another subtree (template children).
        let mut dom = Dom::new();
        let root = dom.create(NodeData::element("div"));
        dom.set_root(root);
        let slot = dom.create(NodeData::element("slot"));
        dom.append_child(root, slot);

        let template = dom.create(NodeData::element("template"));
        let content = dom.create(NodeData::element("b"));
        dom.append_child(template, content);

        dom.replace_with_fragment(slot, &[content]);
        assert_eq!(dom.children(root), &[content]);
        assert!(dom.children(template).is_empty());
        assert!(!dom.contains(slot));
    }

    #[test]
    fn ancestors() {
        let (dom, root, a, _b, c, _d) = build_tree();
        assert_eq!(dom.ancestors(c), vec![a, root]);
        assert_eq!(dom.ancestors(a), vec![root]);
        assert!(dom.ancestors(root).is_empty());
    }

    #[test]
    fn get_and_get_mut() {
        let (mut dom, _root, a, ..) = build_tree();
        assert_eq!(dom.get(a).unwrap().tag(), Some("div"));
        *dom.get_mut(a).unwrap() = NodeData::Element(ElementData::new("section"));
        assert_eq!(dom.get(a).unwrap().tag(), Some("section"));
    }

    #[test]
    fn walk_depth_first_is_document_order() {
        let (dom, root, a, b, c, d) = build_tree();
        assert_eq!(dom.walk_depth_first(root), vec![root, a, c, d, b]);
    }

    #[test]
    fn descendants_excludes_start() {
        let (dom, root, a, b, c, d) = build_tree();
        assert_eq!(dom.descendants(root), vec![a, c, d, b]);
        assert_eq!(dom.descendants(a), vec![c, d]);
        assert!(dom.descendants(c).is_empty());
    }

    #[test]
    fn default_impl() {
        let dom = Dom::default();
        assert!(dom.is_empty());
        assert_eq!(dom.root(), None);
    }
}
