//! Parse-session configuration
//!
//! Options controlling a single parse pass: record-type filtering, the
//! field-failure policy, and the schema version-selection heuristic.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Policy for records containing field-scoped decode failures.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum FieldFailurePolicy {
    /// Record the failing fields as null, append the row anyway (default)
    #[default]
    NullAndKeep,
    /// Drop the whole record when any field fails to decode
    RecordFatal,
}

/// Heuristic for choosing among multiple schema versions of one type code.
///
/// Neither unload family embeds an explicit version discriminator, so the
/// choice is driven by record length.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum VersionSelection {
    /// Highest version whose minimum layout length fits the record;
    /// falls back to the oldest version when none fits (default)
    #[default]
    LongestFitting,
    /// Always the newest registered version, regardless of record length
    Newest,
}

/// Options for one parse session.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ParseOptions {
    /// Restrict decoding to these record types (codes or well-known names).
    /// All other types are still read and counted for progress, but never
    /// decoded or tabled. `None` decodes every registered type.
    pub type_filter: Option<BTreeSet<String>>,

    /// What to do with records that contain field decode failures
    pub field_failure_policy: FieldFailurePolicy,

    /// How to pick a schema version when several share a type code
    pub version_selection: VersionSelection,
}

impl ParseOptions {
    /// Options restricted to the given record types (codes or names)
    pub fn with_types<I, S>(types: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            type_filter: Some(types.into_iter().map(Into::into).collect()),
            ..Self::default()
        }
    }
}
