//! Display and filter settings (config.json).
//!
//! JSON shape:
//! { "show_icons": true, "matcher": "regex" }
//!
//! Every field is optional; command line flags override the file.

use crate::Result;
use crate::diagnostics;
use crate::matcher::Matcher;

use anyhow::Context;
use serde::Deserialize;
use std::fs;

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Label nodes with an emoji per resource kind instead of its name.
    pub show_icons: bool,
    pub matcher: Matcher,
}

impl Config {
    pub fn load(path: &str) -> Result<Config> {
        let text = fs::read_to_string(path)
            .with_context(|| diagnostics::error_message(format!("read config file {}", path)))?;
        serde_json::from_str(&text)
            .with_context(|| diagnostics::error_message(format!("parse config file {}", path)))
    }

    /// Load `path` when given, defaults otherwise.
    pub fn load_or_default(path: Option<&str>) -> Result<Config> {
        path.map_or_else(|| Ok(Config::default()), Config::load)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn defaults() {
        let cfg: Config = serde_json::from_str("{}").unwrap();
        assert_eq!(cfg, Config::default());
        assert!(!cfg.show_icons);
        assert_eq!(cfg.matcher, Matcher::Substring);
        assert_eq!(Config::load_or_default(None).unwrap(), Config::default());
    }

    #[test]
    fn parses_fields() {
        let cfg: Config = serde_json::from_str(r#"{"show_icons": true, "matcher": "regex"}"#).unwrap();
        assert!(cfg.show_icons);
        assert_eq!(cfg.matcher, Matcher::Regex);
    }

    #[test]
    fn rejects_unknown_fields() {
        assert!(serde_json::from_str::<Config>(r#"{"icons": true}"#).is_err());
    }

    #[test]
    fn missing_file_reports_path() {
        let err = Config::load("/definitely/not/here.json").unwrap_err();
        assert!(format!("{err}").contains("/definitely/not/here.json"));
    }
}
