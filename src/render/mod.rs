//! Presentation of engine trees. The engine exposes type, identity,
//! attributes and the leaf flag; everything about how they look lives here.

pub mod text;

pub use text::{emoji_for, emoji_legend, render_tree, title};
