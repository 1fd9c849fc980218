use crate::config::Config;
use crate::xray::{NodeId, Status, Tree};
use std::collections::BTreeMap;
use std::fmt::Write;

const TOAST: &str = "TOAST";

/// Render the tree as an indented outline, one node per line.
pub fn render_tree(tree: &Tree, cfg: &Config) -> String {
    let mut out = String::new();
    for (node, depth) in tree.walk(tree.root()) {
        let _ = writeln!(out, "{}{}", "  ".repeat(depth), title(tree, node, cfg.show_icons));
    }
    out
}

/// Display label of a single node.
///
/// `<kind>/<name>` where kind is the resource segment of the type and name is
/// the identity without its namespace. Internal nodes carry their child count,
/// nodes with an info hint show it in brackets, and unhealthy nodes get a
/// badge.
pub fn title(tree: &Tree, node: NodeId, show_icons: bool) -> String {
    let n = tree.node(node);
    let name = n.id().rsplit_once('/').map_or(n.id(), |(_, name)| name);
    let mut title = match (show_icons, kind(n.gvr())) {
        (true, _) => format!("{} {}", emoji_for(n.gvr()), name),
        (false, "") => name.to_string(),
        (false, kind) => format!("{}/{}", kind, name),
    };

    if !tree.is_leaf(node) {
        let _ = write!(title, "({})", tree.child_count(node));
    }
    if let Some(info) = n.info() {
        let _ = write!(title, " [{}]", info);
    }
    match n.status() {
        Status::Toast => {
            let _ = write!(title, "  {}", TOAST);
        }
        Status::MissingRef => {
            let _ = write!(title, "  {}_REF", TOAST);
        }
        Status::Ok | Status::Completed => {}
    }
    title
}

/// Resource segment of a type, e.g. `deployments` for `apps/v1/deployments`.
fn kind(gvr: &str) -> &str {
    gvr.rsplit('/').next().unwrap_or(gvr)
}

pub fn emoji_for(gvr: &str) -> &'static str {
    match gvr {
        "containers" => "🐳",
        "v1/namespaces" | "namespaces" => "🗂",
        "v1/pods" | "pods" => "🚛",
        "v1/services" | "services" => "💁‍♀️",
        "v1/serviceaccounts" | "serviceaccounts" => "💳",
        "v1/persistentvolumes" | "persistentvolumes" => "📚",
        "v1/persistentvolumeclaims" | "persistentvolumeclaims" => "🎟",
        "v1/secrets" | "secrets" => "🔒",
        "v1/configmaps" | "configmaps" => "🗺",
        "apps/v1/deployments" | "deployments" => "🪂",
        "apps/v1/statefulsets" | "statefulsets" => "🎎",
        "apps/v1/daemonsets" | "daemonsets" => "😈",
        _ => "📎",
    }
}

/// Resource name to emoji, for help screens.
pub fn emoji_legend() -> BTreeMap<&'static str, &'static str> {
    [
        "containers",
        "v1/namespaces",
        "v1/pods",
        "v1/services",
        "v1/serviceaccounts",
        "v1/persistentvolumes",
        "v1/persistentvolumeclaims",
        "v1/secrets",
        "v1/configmaps",
        "apps/v1/deployments",
        "apps/v1/statefulsets",
        "apps/v1/daemonsets",
    ]
    .into_iter()
    .map(|gvr| (kind(gvr), emoji_for(gvr)))
    .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn sample() -> Tree {
        let mut tree = Tree::new("", "cluster");
        let ns = tree.add_child(tree.root(), "v1/namespaces", "default");
        let dp = tree.add_child(ns, "apps/v1/deployments", "default/foo");
        tree.set_info(dp, "1/2");
        let pod = tree.add_child(dp, "v1/pods", "default/foo-1");
        tree.set_status(pod, Status::Toast);
        let sec = tree.add_child(ns, "v1/secrets", "default/gone");
        tree.set_status(sec, Status::MissingRef);
        tree
    }

    #[test]
    fn plain_outline() {
        let tree = sample();
        assert_eq!(
            render_tree(&tree, &Config::default()),
            "cluster(1)\n  namespaces/default(2)\n    deployments/foo(1) [1/2]\n      pods/foo-1  TOAST\n    secrets/gone  TOAST_REF\n"
        );
    }

    #[test]
    fn icon_titles() {
        let tree = sample();
        let pod = tree.find(tree.root(), "v1/pods", "default/foo-1").unwrap();
        assert_eq!(title(&tree, pod, true), "🚛 foo-1  TOAST");
        let unknown = Tree::new("batch/v1/jobs", "default/j");
        assert_eq!(title(&unknown, unknown.root(), true), "📎 j");
    }

    #[test]
    fn legend_keys_are_resources() {
        let legend = emoji_legend();
        assert_eq!(legend.len(), 12);
        assert_eq!(legend.get("deployments"), Some(&"🪂"));
        assert_eq!(legend.get("containers"), Some(&"🐳"));
    }
}
