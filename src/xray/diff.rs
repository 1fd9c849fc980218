use super::{NodeId, Tree};

/// Structural comparison of two optional trees. Returns true when they differ.
///
/// Two absent trees are equal; exactly one absent tree is a difference.
/// Children are compared by position, so both trees must be sorted the same
/// way beforehand or a mere reordering reports a change.
pub fn diff(a: Option<&Tree>, b: Option<&Tree>) -> bool {
    match (a, b) {
        (None, None) => false,
        (Some(a), Some(b)) => a.diff_from(a.root(), b, b.root()),
        _ => true,
    }
}

impl Tree {
    /// True if this tree differs structurally from `other`.
    pub fn diff(&self, other: &Tree) -> bool {
        self.diff_from(self.root(), other, other.root())
    }

    /// Compare the subtree at `node` with the subtree at `other_node` of
    /// `other`.
    pub fn diff_from(&self, node: NodeId, other: &Tree, other_node: NodeId) -> bool {
        let mut stack = vec![(node, other_node)];
        while let Some((x, y)) = stack.pop() {
            let (a, b) = (self.node(x), other.node(y));
            if a.children().len() != b.children().len() {
                return true;
            }
            if a.id() != b.id() || a.gvr() != b.gvr() {
                return true;
            }
            if !a.shares_extras(b) && *a.read_extras() != *b.read_extras() {
                return true;
            }
            stack.extend(a.children().iter().copied().zip(b.children().iter().copied()));
        }
        false
    }
}
