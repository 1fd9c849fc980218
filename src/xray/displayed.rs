//! The tree currently on screen, swapped whole on every meaningful refresh.

use super::{Tree, XrayError, diff};
use std::sync::{Arc, PoisonError, RwLock};

/// Published tree plus the active filter query.
///
/// A producer builds a fresh tree per refresh and hands it to
/// [`Displayed::publish`]; readers grab the current `Arc<Tree>` and never see
/// it change underneath them. Attribute updates belong on the new tree before
/// it is published.
#[derive(Debug, Default)]
pub struct Displayed {
    current: RwLock<Option<Arc<Tree>>>,
    query: RwLock<Option<String>>,
}

impl Displayed {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sort `next` and swap it in if it differs from the current tree.
    /// Returns true when a redraw is needed.
    pub fn publish(&self, mut next: Tree) -> bool {
        next.sort();
        let mut current = self.current.write().unwrap_or_else(PoisonError::into_inner);
        if !diff(current.as_deref(), Some(&next)) {
            log::trace!("refresh produced an identical tree");
            return false;
        }
        log::debug!(
            "publishing tree with {} nodes",
            next.count(next.root(), "")
        );
        *current = Some(Arc::new(next));
        true
    }

    pub fn current(&self) -> Option<Arc<Tree>> {
        self.current
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Drop the published tree.
    pub fn reset(&self) {
        *self.current.write().unwrap_or_else(PoisonError::into_inner) = None;
    }

    pub fn set_query(&self, query: impl Into<String>) {
        *self.query.write().unwrap_or_else(PoisonError::into_inner) = Some(query.into());
    }

    pub fn clear_query(&self) {
        *self.query.write().unwrap_or_else(PoisonError::into_inner) = None;
    }

    pub fn query(&self) -> Option<String> {
        self.query
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// What should be drawn: the current tree, or its sorted reduction when a
    /// query is active. `None` when nothing is published or nothing matched.
    pub fn view<F>(&self, matches: F) -> Result<Option<Arc<Tree>>, XrayError>
    where
        F: Fn(&str, &str) -> bool,
    {
        let Some(tree) = self.current() else {
            return Ok(None);
        };
        let Some(query) = self.query() else {
            return Ok(Some(tree));
        };

        Ok(tree.filter(tree.root(), &query, matches)?.map(|mut t| {
            t.sort();
            Arc::new(t)
        }))
    }
}
