//! Resource relationship trees for a cluster dashboard.
//!
//! The [`xray`] module is the tree engine; the remaining modules are the thin
//! collaborators the command line tool wires around it.

pub mod config;
pub mod diagnostics;
pub mod matcher;
pub mod render;
pub mod snapshot;
pub mod xray;

pub type Result<T> = anyhow::Result<T>;
