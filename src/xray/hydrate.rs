use super::{NodeSpec, Status, Tree, XrayError};

/// Rebuild a tree from flattened lineages, merging shared ancestor prefixes.
///
/// Segments are replayed root-most first from a cursor that restarts at the
/// root for every spec. A blank cursor takes the segment values directly;
/// otherwise the cursor moves to the first node found depth first from it
/// (itself included) with the same type and identity, or to a new child when
/// there is none. A merged node keeps the status it was created with.
///
/// Matching is by (type, identity) only, so two distinct branches that share
/// a pair below the cursor collapse into the first one found.
pub fn hydrate<'a>(specs: impl IntoIterator<Item = &'a NodeSpec>) -> Result<Tree, XrayError> {
    let mut tree = Tree::blank();
    let root = tree.root();
    let mut count = 0usize;
    for spec in specs {
        let mut nav = root;
        for seg in spec.segments()?.iter().rev() {
            let status: Status = seg.status.parse()?;
            if tree.is_blank(nav) {
                tree.set_identity(nav, seg.gvr, seg.id);
                tree.set_status(nav, status);
                continue;
            }
            nav = match tree.find(nav, seg.gvr, seg.id) {
                Some(found) => found,
                None => {
                    let child = tree.add_child(nav, seg.gvr, seg.id);
                    tree.set_status(child, status);
                    child
                }
            };
        }
        count += 1;
    }
    log::trace!(
        "hydrated {} specs into {} nodes",
        count,
        tree.count(root, "")
    );

    Ok(tree)
}
