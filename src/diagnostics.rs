//! Message formatting shared by the loader, matchers and the CLI.
//!
//! Errors are reported through `anyhow` at the application edge; warnings are
//! routed through the `log` facade so `RUST_LOG` decides whether they show.

use std::fmt::Display;

const PREFIX: &str = "xray";

/// Format an error message with the tool prefix.
pub fn error_message(msg: impl Display) -> String {
    format!("{PREFIX}: {msg}")
}

/// Emit a non-fatal warning.
pub fn warn(msg: impl Display) {
    log::warn!("{}", error_message(msg));
}
