//! Resource relationship tree engine.
//!
//! A [`Tree`] is rebuilt from scratch on every refresh, normalized with
//! [`Tree::sort`], compared against the tree currently on screen with
//! [`diff`], and published through [`Displayed`] only when something changed.
//! Leaves can be flattened into [`NodeSpec`] lineages and rebuilt with
//! [`hydrate`], which is how [`Tree::filter`] reduces a tree to the branches
//! whose leaves match a query.
//!
//! The engine is single threaded: every operation assumes exclusive access to
//! the tree it runs on. Trees are `Send + Sync`, so a producer thread can build
//! one while readers hold the previously published `Arc<Tree>`.

mod codec;
mod diff;
mod displayed;
mod error;
mod extras;
mod filter;
mod hydrate;
mod node;
mod order;

pub use codec::{Flatten, NodeSpec, Segment};
pub use diff::diff;
pub use displayed::Displayed;
pub use error::XrayError;
pub use extras::{Extras, Status};
pub use hydrate::hydrate;
pub use node::{Node, NodeId, Tree, Walk};
pub use order::natural_cmp;

/// Joins per-level values in a lineage chain. Must never occur inside a type
/// or identity.
pub const PATH_SEPARATOR: &str = "::";

/// Reserved attribute key carrying the node status.
pub const STATUS_KEY: &str = "status";

/// Reserved attribute key carrying a free-form display hint.
pub const INFO_KEY: &str = "info";
