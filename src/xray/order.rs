//! Natural sibling ordering: `pod-2` sorts before `pod-10`.

use super::Tree;
use std::cmp::Ordering;

/// Compare two strings treating embedded runs of ASCII digits as numbers.
///
/// Non-digit runs compare as plain text. Digit runs compare by value; equal
/// values with different zero padding fall through to the final tie-break,
/// which is the plain lexicographic order of the whole strings.
pub fn natural_cmp(a: &str, b: &str) -> Ordering {
    let (mut x, mut y) = (a, b);
    while !x.is_empty() && !y.is_empty() {
        let (cx, rx) = split_chunk(x);
        let (cy, ry) = split_chunk(y);
        let ord = match (is_digits(cx), is_digits(cy)) {
            (true, true) => cmp_numeric(cx, cy),
            _ => cx.cmp(cy),
        };
        if ord != Ordering::Equal {
            return ord;
        }
        x = rx;
        y = ry;
    }

    x.len().cmp(&y.len()).then_with(|| a.cmp(b))
}

fn is_digits(chunk: &str) -> bool {
    chunk.as_bytes().first().is_some_and(u8::is_ascii_digit)
}

/// Split off the leading run of digits or non-digits.
fn split_chunk(s: &str) -> (&str, &str) {
    let digits = is_digits(s);
    let end = s
        .char_indices()
        .find(|(_, c)| c.is_ascii_digit() != digits)
        .map_or(s.len(), |(i, _)| i);
    s.split_at(end)
}

fn cmp_numeric(a: &str, b: &str) -> Ordering {
    let a = a.trim_start_matches('0');
    let b = b.trim_start_matches('0');
    a.len().cmp(&b.len()).then_with(|| a.cmp(b))
}

impl Tree {
    /// Stable-sort the children of every node by natural order of identity.
    pub fn sort(&mut self) {
        let nodes: Vec<_> = self.walk(self.root()).map(|(n, _)| n).collect();
        for node in nodes {
            let mut children = std::mem::take(self.children_mut(node));
            children.sort_by(|a, b| natural_cmp(self.node(*a).id(), self.node(*b).id()));
            *self.children_mut(node) = children;
        }
    }
}
