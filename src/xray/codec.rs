//! Path codec: a node's root-to-leaf lineage as three aligned strings.
//!
//! Each chain joins one value per level with [`PATH_SEPARATOR`], leaf first
//! and root last, so segment `i` of every chain describes the same ancestor.

use super::{NodeId, PATH_SEPARATOR, Tree, XrayError};
use serde::{Deserialize, Serialize};

/// Flattened lineage of a node.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NodeSpec {
    pub type_chain: String,
    pub id_chain: String,
    pub status_chain: String,
}

/// One level of a [`NodeSpec`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Segment<'a> {
    pub gvr: &'a str,
    pub id: &'a str,
    pub status: &'a str,
}

impl NodeSpec {
    /// Split the chains into per-level segments, leaf first.
    pub fn segments(&self) -> Result<Vec<Segment<'_>>, XrayError> {
        let types: Vec<&str> = self.type_chain.split(PATH_SEPARATOR).collect();
        let ids: Vec<&str> = self.id_chain.split(PATH_SEPARATOR).collect();
        let statuses: Vec<&str> = self.status_chain.split(PATH_SEPARATOR).collect();
        if types.len() != ids.len() || ids.len() != statuses.len() {
            return Err(XrayError::MalformedSpec {
                types: types.len(),
                ids: ids.len(),
                statuses: statuses.len(),
            });
        }

        Ok(types
            .into_iter()
            .zip(ids)
            .zip(statuses)
            .map(|((gvr, id), status)| Segment { gvr, id, status })
            .collect())
    }

    /// Text handed to filter predicates: identity lineage then status lineage.
    pub fn haystack(&self) -> String {
        format!("{}{}", self.id_chain, self.status_chain)
    }
}

impl Tree {
    /// Lineage of `node` up to and including the root.
    pub fn spec(&self, node: NodeId) -> NodeSpec {
        let mut gvrs = Vec::new();
        let mut ids = Vec::new();
        let mut statuses = Vec::new();
        for n in self.ancestors(node) {
            let n = self.node(n);
            gvrs.push(n.gvr());
            ids.push(n.id());
            statuses.push(n.status().as_str());
        }

        NodeSpec {
            type_chain: gvrs.join(PATH_SEPARATOR),
            id_chain: ids.join(PATH_SEPARATOR),
            status_chain: statuses.join(PATH_SEPARATOR),
        }
    }

    /// Lineages of every leaf below `node`, depth first in children order.
    /// `node` itself is never yielded, even when it has no children.
    pub fn flatten(&self, node: NodeId) -> Flatten<'_> {
        Flatten {
            tree: self,
            stack: self.node(node).children().iter().rev().copied().collect(),
        }
    }
}

/// Lazy iterator returned by [`Tree::flatten`].
pub struct Flatten<'a> {
    tree: &'a Tree,
    stack: Vec<NodeId>,
}

impl Iterator for Flatten<'_> {
    type Item = NodeSpec;

    fn next(&mut self) -> Option<NodeSpec> {
        let tree = self.tree;
        while let Some(node) = self.stack.pop() {
            if tree.is_leaf(node) {
                return Some(tree.spec(node));
            }
            self.stack
                .extend(tree.node(node).children().iter().rev().copied());
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::xray::Status;
    use pretty_assertions::assert_eq;

    fn spec(types: &str, ids: &str, statuses: &str) -> NodeSpec {
        NodeSpec {
            type_chain: types.into(),
            id_chain: ids.into(),
            status_chain: statuses.into(),
        }
    }

    #[test]
    fn spec_is_leaf_first() {
        let mut tree = Tree::new("v1/namespaces", "default");
        let dp = tree.add_child(tree.root(), "apps/v1/deployments", "default/foo");
        let pod = tree.add_child(dp, "v1/pods", "default/foo-1");
        tree.set_status(pod, Status::Toast);

        assert_eq!(
            tree.spec(pod),
            spec(
                "v1/pods::apps/v1/deployments::v1/namespaces",
                "default/foo-1::default/foo::default",
                "toast::ok::ok",
            )
        );
        assert_eq!(tree.spec(tree.root()), spec("v1/namespaces", "default", "ok"));
    }

    #[test]
    fn flatten_yields_leaves_in_order() {
        let mut tree = Tree::new("v1/namespaces", "default");
        let dp = tree.add_child(tree.root(), "apps/v1/deployments", "default/foo");
        tree.add_child(dp, "v1/pods", "default/foo-1");
        tree.add_child(tree.root(), "v1/services", "default/svc");
        tree.add_child(dp, "v1/pods", "default/foo-2");

        let ids: Vec<String> = tree.flatten(tree.root()).map(|s| s.id_chain).collect();
        assert_eq!(
            ids,
            vec![
                "default/foo-1::default/foo::default",
                "default/foo-2::default/foo::default",
                "default/svc::default",
            ]
        );
        assert_eq!(tree.flatten(dp).count(), 2);
    }

    #[test]
    fn flatten_childless_node_is_empty() {
        let tree = Tree::new("v1/pods", "default/p1");
        assert_eq!(tree.flatten(tree.root()).next(), None);
    }

    #[test]
    fn segments_align() {
        let s = spec("a::b", "x::y", "toast::ok");
        assert_eq!(
            s.segments().unwrap(),
            vec![
                Segment { gvr: "a", id: "x", status: "toast" },
                Segment { gvr: "b", id: "y", status: "ok" },
            ]
        );
        assert_eq!(s.haystack(), "x::ytoast::ok");
    }

    #[test]
    fn segments_reject_misaligned_chains() {
        let s = spec("a::b", "x", "ok::ok::ok");
        assert_eq!(
            s.segments(),
            Err(XrayError::MalformedSpec {
                types: 2,
                ids: 1,
                statuses: 3
            })
        );
    }
}
