//! Resource snapshots (snapshot.json): a nested description of the resources
//! visible at one refresh, turned into an unsorted [`Tree`].
//!
//! JSON shape:
//! {
//!   "gvr": "v1/namespaces",
//!   "id": "default",
//!   "status": "ok",              // optional, one of ok|toast|completed|noref
//!   "info": "3/3",               // optional display hint
//!   "extras": {"automount": "1"},// optional, carried through untouched
//!   "children": [ ... ]          // same shape, recursively
//! }
//!
//! Types and identities must not contain the lineage separator `::`; the
//! engine relies on that and never checks it, so this loader does.

use crate::Result;
use crate::diagnostics;
use crate::xray::{INFO_KEY, NodeId, NodeSpec, PATH_SEPARATOR, STATUS_KEY, Status, Tree};

use anyhow::{Context, bail};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::fs;

/// Raw node shape as it appears in snapshot.json.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawNode {
    #[serde(default)]
    pub gvr: String,

    #[serde(default)]
    pub id: String,

    #[serde(default)]
    pub status: Option<String>,

    #[serde(default)]
    pub info: Option<String>,

    #[serde(default)]
    pub extras: BTreeMap<String, String>,

    #[serde(default)]
    pub children: Vec<RawNode>,
}

impl RawNode {
    /// Validate every node and build the tree in input order.
    pub fn build(&self) -> Result<Tree> {
        let mut tree = Tree::new(self.gvr.clone(), self.id.clone());
        let root = tree.root();
        apply(&mut tree, root, self, "root")?;

        let mut stack: Vec<(NodeId, &RawNode, String)> = vec![(root, self, "root".to_string())];
        while let Some((parent, raw, at)) = stack.pop() {
            for (i, child) in raw.children.iter().enumerate() {
                let at = format!("{at}/children[{i}]");
                let node = tree.add_child(parent, child.gvr.clone(), child.id.clone());
                apply(&mut tree, node, child, &at)?;
                stack.push((node, child, at));
            }
        }

        Ok(tree)
    }
}

/// Check one raw node and copy its attributes onto `node`.
fn apply(tree: &mut Tree, node: NodeId, raw: &RawNode, at: &str) -> Result<()> {
    for (field, value) in [("gvr", &raw.gvr), ("id", &raw.id)] {
        if value.contains(PATH_SEPARATOR) {
            bail!(
                "{}",
                diagnostics::error_message(format!(
                    "{} at {} must not contain {:?}: {}",
                    field, at, PATH_SEPARATOR, value
                ))
            );
        }
    }
    if raw.gvr.is_empty() && raw.id.is_empty() && at != "root" {
        diagnostics::warn(format!("blank node at {}", at));
    }

    let status = match raw.status.as_deref() {
        None => Status::Ok,
        Some(s) => s.parse::<Status>().with_context(|| {
            diagnostics::error_message(format!("bad status at {}", at))
        })?,
    };

    for key in [STATUS_KEY, INFO_KEY] {
        if raw.extras.contains_key(key) {
            bail!(
                "{}",
                diagnostics::error_message(format!(
                    "extras at {} use the reserved key {:?}",
                    at, key
                ))
            );
        }
    }

    tree.update_extras(node, |extras| {
        extras.status = status;
        extras.info = raw.info.clone();
        extras.other = raw.extras.clone();
    });
    Ok(())
}

/// Load and build a snapshot file.
pub fn load_snapshot(path: &str) -> Result<Tree> {
    let text = fs::read_to_string(path)
        .with_context(|| diagnostics::error_message(format!("read snapshot file {}", path)))?;
    let raw: RawNode = serde_json::from_str(&text)
        .with_context(|| diagnostics::error_message(format!("parse snapshot file {}", path)))?;
    raw.build()
        .with_context(|| diagnostics::error_message(format!("invalid snapshot {}", path)))
}

/// Load a JSON array of flattened lineages.
pub fn load_specs(path: &str) -> Result<Vec<NodeSpec>> {
    let text = fs::read_to_string(path)
        .with_context(|| diagnostics::error_message(format!("read spec file {}", path)))?;
    serde_json::from_str(&text)
        .with_context(|| diagnostics::error_message(format!("parse spec file {}", path)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn parse(json: &str) -> RawNode {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn builds_in_input_order() {
        let raw = parse(
            r#"{
                "gvr": "v1/namespaces", "id": "default",
                "children": [
                    {"gvr": "apps/v1/deployments", "id": "default/foo", "info": "2/2",
                     "children": [
                        {"gvr": "v1/pods", "id": "default/foo-10", "status": "toast"},
                        {"gvr": "v1/pods", "id": "default/foo-2", "extras": {"node": "n1"}}
                     ]},
                    {"gvr": "v1/secrets", "id": "default/gone", "status": "noref"}
                ]
            }"#,
        );
        let tree = raw.build().unwrap();
        let root = tree.root();
        assert_eq!(tree.count(root, ""), 5);

        let dp = tree.find(root, "apps/v1/deployments", "default/foo").unwrap();
        assert_eq!(tree.node(dp).info().as_deref(), Some("2/2"));
        let ids: Vec<&str> = tree
            .node(dp)
            .children()
            .iter()
            .map(|c| tree.node(*c).id())
            .collect();
        assert_eq!(ids, vec!["default/foo-10", "default/foo-2"]);

        let p10 = tree.find(root, "v1/pods", "default/foo-10").unwrap();
        assert_eq!(tree.node(p10).status(), Status::Toast);
        let p2 = tree.find(root, "v1/pods", "default/foo-2").unwrap();
        assert_eq!(tree.node(p2).extras().get("node").as_deref(), Some("n1"));
        let gone = tree.find(root, "v1/secrets", "default/gone").unwrap();
        assert_eq!(tree.node(gone).status(), Status::MissingRef);
    }

    #[test]
    fn rejects_separator_in_identity() {
        let raw = parse(r#"{"gvr": "v1/namespaces", "id": "default", "children": [{"gvr": "v1/pods", "id": "a::b"}]}"#);
        let err = format!("{:#}", raw.build().unwrap_err());
        assert!(err.contains("root/children[0]"), "{err}");
        assert!(err.contains("a::b"), "{err}");
    }

    #[test]
    fn rejects_unknown_status() {
        let raw = parse(r#"{"gvr": "v1/pods", "id": "p", "status": "sad"}"#);
        let err = format!("{:#}", raw.build().unwrap_err());
        assert!(err.contains("bad status at root"), "{err}");
        assert!(err.contains("sad"), "{err}");
    }

    #[test]
    fn rejects_reserved_extras() {
        let raw = parse(r#"{"gvr": "v1/pods", "id": "p", "extras": {"status": "ok"}}"#);
        assert!(raw.build().is_err());
    }

    #[test]
    fn specs_deserialize() {
        let specs: Vec<NodeSpec> = serde_json::from_str(
            r#"[{"type_chain": "v1/pods::v1/namespaces", "id_chain": "default/p::default", "status_chain": "ok::ok"}]"#,
        )
        .unwrap();
        assert_eq!(specs.len(), 1);
        assert_eq!(specs[0].segments().unwrap().len(), 2);
    }
}
