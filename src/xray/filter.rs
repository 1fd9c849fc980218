use super::{NodeId, NodeSpec, Tree, XrayError, hydrate};

impl Tree {
    /// Reduce the subtree at `node` to the branches whose leaves match.
    ///
    /// Every leaf lineage is offered to `matches` as `(query, haystack)`, where
    /// the haystack is the identity chain followed by the status chain. The
    /// surviving lineages are hydrated into a new, unsorted tree. `Ok(None)`
    /// means nothing matched.
    pub fn filter<F>(&self, node: NodeId, query: &str, matches: F) -> Result<Option<Tree>, XrayError>
    where
        F: Fn(&str, &str) -> bool,
    {
        let kept: Vec<NodeSpec> = self
            .flatten(node)
            .filter(|spec| matches(query, &spec.haystack()))
            .collect();
        if kept.is_empty() {
            log::debug!("filter {:?} matched nothing", query);
            return Ok(None);
        }
        log::debug!("filter {:?} kept {} leaves", query, kept.len());

        hydrate(&kept).map(Some)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::xray::Status;
    use pretty_assertions::assert_eq;

    fn contains(q: &str, hay: &str) -> bool {
        hay.contains(q)
    }

    fn sample() -> Tree {
        let mut tree = Tree::new("v1/namespaces", "default");
        let dp = tree.add_child(tree.root(), "apps/v1/deployments", "default/foo");
        tree.add_child(dp, "v1/pods", "default/foo-1");
        let bad = tree.add_child(dp, "v1/pods", "default/foo-2");
        tree.set_status(bad, Status::Toast);
        let sts = tree.add_child(tree.root(), "apps/v1/statefulsets", "default/db");
        tree.add_child(sts, "v1/pods", "default/db-0");
        tree
    }

    #[test]
    fn keeps_matching_branches_only() {
        let tree = sample();
        let filtered = tree.filter(tree.root(), "db", contains).unwrap().unwrap();
        let root = filtered.root();

        assert_eq!(filtered.node(root).id(), "default");
        assert_eq!(filtered.count(root, ""), 3);
        assert_eq!(filtered.count(root, "apps/v1/deployments"), 0);
        assert!(filtered.find(root, "v1/pods", "default/db-0").is_some());
    }

    #[test]
    fn matches_status_lineage() {
        let tree = sample();
        let filtered = tree.filter(tree.root(), "toast", contains).unwrap().unwrap();
        let leaves: Vec<String> = filtered
            .flatten(filtered.root())
            .map(|s| s.id_chain)
            .collect();
        assert_eq!(leaves, vec!["default/foo-2::default/foo::default"]);
    }

    #[test]
    fn no_match_is_none() {
        let tree = sample();
        assert!(tree.filter(tree.root(), "nope", contains).unwrap().is_none());
    }

    #[test]
    fn passes_query_through() {
        let tree = sample();
        let seen = std::cell::RefCell::new(Vec::new());
        let filtered = tree
            .filter(tree.root(), "q", |q, hay| {
                seen.borrow_mut().push((q.to_string(), hay.to_string()));
                true
            })
            .unwrap()
            .unwrap();
        assert!(!filtered.diff(&tree));

        let seen = seen.into_inner();
        assert_eq!(seen.len(), 3);
        assert_eq!(
            seen[0],
            (
                "q".to_string(),
                "default/foo-1::default/foo::defaultok::ok::ok".to_string()
            )
        );
    }
}
