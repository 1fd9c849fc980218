//! Arena-backed resource tree.
//!
//! Nodes live in a `Vec` owned by their [`Tree`] and refer to each other by
//! [`NodeId`]. `children` is the owning relation; `parent` is a plain index
//! back-reference. Nodes detached by [`Tree::clear`] stay in the arena but are
//! no longer reachable from the root; they go away with the tree, which is
//! rebuilt on every refresh anyway.

use super::{Extras, Status};
use std::io;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

/// Handle to a node inside the [`Tree`] that issued it. Using a handle with a
/// different tree is a logic error and may panic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(usize);

/// A resource tree node.
#[derive(Debug)]
pub struct Node {
    gvr: String,
    id: String,
    children: Vec<NodeId>,
    parent: Option<NodeId>,
    extras: Arc<RwLock<Extras>>,
}

impl Node {
    fn new(gvr: impl Into<String>, id: impl Into<String>, extras: Extras) -> Self {
        Self {
            gvr: gvr.into(),
            id: id.into(),
            children: Vec::new(),
            parent: None,
            extras: Arc::new(RwLock::new(extras)),
        }
    }

    /// Resource kind, e.g. `apps/v1/deployments`.
    pub fn gvr(&self) -> &str {
        &self.gvr
    }

    /// Resource instance, conventionally `namespace/name`.
    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    pub fn status(&self) -> Status {
        self.read_extras().status
    }

    pub fn info(&self) -> Option<String> {
        self.read_extras().info.clone()
    }

    /// Snapshot of the node attributes.
    pub fn extras(&self) -> Extras {
        self.read_extras().clone()
    }

    /// True if both nodes point at the same attribute storage.
    pub fn shares_extras(&self, other: &Node) -> bool {
        Arc::ptr_eq(&self.extras, &other.extras)
    }

    pub(crate) fn read_extras(&self) -> RwLockReadGuard<'_, Extras> {
        self.extras.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write_extras(&self) -> RwLockWriteGuard<'_, Extras> {
        self.extras.write().unwrap_or_else(PoisonError::into_inner)
    }
}

/// A resource tree. Not `Clone`: copying must pick between
/// [`Tree::deep_clone`] and [`Tree::shallow_clone`] explicitly.
#[derive(Debug)]
pub struct Tree {
    nodes: Vec<Node>,
    root: NodeId,
}

impl Tree {
    /// New tree whose root carries the given type and identity.
    pub fn new(gvr: impl Into<String>, id: impl Into<String>) -> Self {
        Self {
            nodes: vec![Node::new(gvr, id, Extras::default())],
            root: NodeId(0),
        }
    }

    /// New tree holding a single blank root.
    pub fn blank() -> Self {
        Self::new("", "")
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.0]
    }

    /// Create a detached node with the default `ok` status.
    pub fn insert(&mut self, gvr: impl Into<String>, id: impl Into<String>) -> NodeId {
        self.push(Node::new(gvr, id, Extras::default()))
    }

    fn push(&mut self, node: Node) -> NodeId {
        self.nodes.push(node);
        NodeId(self.nodes.len() - 1)
    }

    /// Append `child` to `parent` and bind its back-reference. A child that is
    /// already attached elsewhere is moved. Attaching a node under its own
    /// descendant would create a cycle and is not allowed.
    pub fn add(&mut self, parent: NodeId, child: NodeId) {
        debug_assert!(
            self.ancestors(parent).all(|n| n != child),
            "adding {child:?} under {parent:?} would create a cycle"
        );
        if let Some(old) = self.nodes[child.0].parent.take() {
            self.nodes[old.0].children.retain(|c| *c != child);
        }
        self.nodes[child.0].parent = Some(parent);
        self.nodes[parent.0].children.push(child);
    }

    /// Create a node and append it to `parent`.
    pub fn add_child(
        &mut self,
        parent: NodeId,
        gvr: impl Into<String>,
        id: impl Into<String>,
    ) -> NodeId {
        let child = self.insert(gvr, id);
        self.add(parent, child);
        child
    }

    /// Drop all descendants of `node`.
    pub fn clear(&mut self, node: NodeId) {
        for child in std::mem::take(&mut self.nodes[node.0].children) {
            self.nodes[child.0].parent = None;
        }
    }

    pub(crate) fn set_identity(&mut self, node: NodeId, gvr: &str, id: &str) {
        let n = &mut self.nodes[node.0];
        n.gvr = gvr.to_string();
        n.id = id.to_string();
    }

    pub(crate) fn children_mut(&mut self, node: NodeId) -> &mut Vec<NodeId> {
        &mut self.nodes[node.0].children
    }

    pub fn set_status(&mut self, node: NodeId, status: Status) {
        self.nodes[node.0].write_extras().status = status;
    }

    pub fn set_info(&mut self, node: NodeId, info: impl Into<String>) {
        self.nodes[node.0].write_extras().info = Some(info.into());
    }

    /// Mutate the attributes of `node` in place.
    pub fn update_extras<R>(&mut self, node: NodeId, f: impl FnOnce(&mut Extras) -> R) -> R {
        f(&mut self.nodes[node.0].write_extras())
    }

    pub fn child_count(&self, node: NodeId) -> usize {
        self.nodes[node.0].children.len()
    }

    /// Count nodes under `node` (inclusive) whose type is `gvr`. An empty
    /// `gvr` counts every node.
    pub fn count(&self, node: NodeId, gvr: &str) -> usize {
        self.walk(node)
            .filter(|(n, _)| gvr.is_empty() || self.nodes[n.0].gvr == gvr)
            .count()
    }

    /// Deepest level below `node`, seeded with `depth` for `node` itself.
    pub fn max_depth(&self, node: NodeId, depth: usize) -> usize {
        self.walk(node).map(|(_, d)| depth + d).max().unwrap_or(depth)
    }

    /// Number of parent hops up to the root; the root is level 0.
    pub fn level(&self, node: NodeId) -> usize {
        self.ancestors(node).count() - 1
    }

    /// Topmost node reachable by following parent links from `node`.
    pub fn root_of(&self, node: NodeId) -> NodeId {
        self.ancestors(node).last().unwrap_or(node)
    }

    pub fn is_leaf(&self, node: NodeId) -> bool {
        self.nodes[node.0].children.is_empty()
    }

    pub fn is_root(&self, node: NodeId) -> bool {
        self.nodes[node.0].parent.is_none()
    }

    /// True if the node has neither a type nor an identity.
    pub fn is_blank(&self, node: NodeId) -> bool {
        let n = &self.nodes[node.0];
        n.gvr.is_empty() && n.id.is_empty()
    }

    /// Detached copy of `node` without children. The copy SHARES the
    /// attribute storage of the source: updating one updates both.
    pub fn shallow_clone(&mut self, node: NodeId) -> NodeId {
        let src = &self.nodes[node.0];
        let copy = Node {
            gvr: src.gvr.clone(),
            id: src.id.clone(),
            children: Vec::new(),
            parent: None,
            extras: Arc::clone(&src.extras),
        };
        self.push(copy)
    }

    /// Value copy of everything reachable from the root, with fresh
    /// attribute storage. Detached nodes are not carried over.
    pub fn deep_clone(&self) -> Tree {
        let src = self.node(self.root);
        let mut out = Tree {
            nodes: vec![Node::new(src.gvr.clone(), src.id.clone(), src.extras())],
            root: NodeId(0),
        };
        let mut stack = vec![(self.root, out.root)];
        while let Some((from, to)) = stack.pop() {
            for &child in &self.nodes[from.0].children {
                let c = &self.nodes[child.0];
                let copy = out.push(Node::new(c.gvr.clone(), c.id.clone(), c.extras()));
                out.add(to, copy);
                stack.push((child, copy));
            }
        }
        out
    }

    /// Depth-first search from `node` (inclusive) for the first node with the
    /// given type and identity.
    pub fn find(&self, node: NodeId, gvr: &str, id: &str) -> Option<NodeId> {
        self.walk(node)
            .map(|(n, _)| n)
            .find(|n| self.nodes[n.0].gvr == gvr && self.nodes[n.0].id == id)
    }

    /// Pre-order, children-order traversal of `node` and its descendants,
    /// yielding each node with its depth relative to `node`.
    pub fn walk(&self, node: NodeId) -> Walk<'_> {
        Walk {
            tree: self,
            stack: vec![(node, 0)],
        }
    }

    /// `node` followed by each of its ancestors up to the root.
    pub fn ancestors(&self, node: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        std::iter::successors(Some(node), |n| self.nodes[n.0].parent)
    }

    /// Log an indented `type::identity` outline at debug level.
    pub fn dump(&self) {
        for (n, depth) in self.walk(self.root) {
            let node = &self.nodes[n.0];
            log::debug!("{}{}::{}", "  ".repeat(depth), node.gvr, node.id);
        }
    }

    /// Write the same outline as [`Tree::dump`] to `out`.
    pub fn dump_to(&self, out: &mut impl io::Write) -> io::Result<()> {
        for (n, depth) in self.walk(self.root) {
            let node = &self.nodes[n.0];
            writeln!(out, "{}{}::{}", "  ".repeat(depth), node.gvr, node.id)?;
        }
        Ok(())
    }
}

/// Iterator returned by [`Tree::walk`].
pub struct Walk<'a> {
    tree: &'a Tree,
    stack: Vec<(NodeId, usize)>,
}

impl Iterator for Walk<'_> {
    type Item = (NodeId, usize);

    fn next(&mut self) -> Option<Self::Item> {
        let tree = self.tree;
        let (node, depth) = self.stack.pop()?;
        let children = &tree.nodes[node.0].children;
        self.stack
            .extend(children.iter().rev().map(|c| (*c, depth + 1)));
        Some((node, depth))
    }
}
