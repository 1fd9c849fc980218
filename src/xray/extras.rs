//! Node attributes: an enumerated status, an optional display hint and any
//! number of extra string pairs carried through untouched.

use super::{INFO_KEY, STATUS_KEY, XrayError};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Health of a resource as seen by the tree builder.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    /// All is cool.
    #[default]
    Ok,
    /// Not running, not ready or otherwise not up to snuff.
    Toast,
    /// Finished, e.g. a terminated workload.
    Completed,
    /// Reference to a resource that does not exist.
    #[serde(rename = "noref")]
    MissingRef,
}

impl Status {
    pub fn as_str(self) -> &'static str {
        match self {
            Status::Ok => "ok",
            Status::Toast => "toast",
            Status::Completed => "completed",
            Status::MissingRef => "noref",
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Status {
    type Err = XrayError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ok" => Ok(Status::Ok),
            "toast" => Ok(Status::Toast),
            "completed" => Ok(Status::Completed),
            "noref" => Ok(Status::MissingRef),
            other => Err(XrayError::UnknownStatus(other.to_string())),
        }
    }
}

/// Attributes attached to a tree node.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Extras {
    pub status: Status,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub info: Option<String>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub other: BTreeMap<String, String>,
}

impl Extras {
    pub fn with_status(status: Status) -> Self {
        Self {
            status,
            ..Self::default()
        }
    }

    /// Look up an attribute by its string key, including the reserved ones.
    pub fn get(&self, key: &str) -> Option<String> {
        match key {
            STATUS_KEY => Some(self.status.to_string()),
            INFO_KEY => self.info.clone(),
            _ => self.other.get(key).cloned(),
        }
    }

    /// Set an attribute by its string key. Setting `status` to a value outside
    /// the status vocabulary fails and leaves the attributes unchanged.
    pub fn set(&mut self, key: &str, value: impl Into<String>) -> Result<(), XrayError> {
        let value = value.into();
        match key {
            STATUS_KEY => self.status = value.parse()?,
            INFO_KEY => self.info = Some(value),
            _ => {
                self.other.insert(key.to_string(), value);
            }
        }
        Ok(())
    }
}
