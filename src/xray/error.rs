use thiserror::Error;

/// Failures raised by the tree engine. Absence (nothing found, nothing
/// matched) is never an error and is reported through `Option` instead.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum XrayError {
    /// The three chains of a lineage do not split into the same number of
    /// segments.
    #[error("malformed node spec: {types} type, {ids} identity and {statuses} status segments")]
    MalformedSpec {
        types: usize,
        ids: usize,
        statuses: usize,
    },

    #[error("unknown node status {0:?}")]
    UnknownStatus(String),
}
