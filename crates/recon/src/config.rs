use serde::{Deserialize, Serialize};

use crate::error::ReconcileError;

// ---------------------------------------------------------------------------
// Options
// ---------------------------------------------------------------------------

/// Options for [`crate::run`].
///
/// ```toml
/// reclassify = true
/// on_duplicate = "reject"
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ReconcileOptions {
    /// Match id-less new records against delete candidates by secondary key.
    pub reclassify: bool,
    pub on_duplicate: DuplicatePolicy,
}

impl Default for ReconcileOptions {
    fn default() -> Self {
        Self {
            reclassify: true,
            on_duplicate: DuplicatePolicy::LastWriteWins,
        }
    }
}

/// What to do when a side repeats an identity or secondary key.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DuplicatePolicy {
    /// Later records replace earlier ones. Each collision is logged.
    #[default]
    LastWriteWins,
    /// Fail before classifying anything.
    Reject,
}

// ---------------------------------------------------------------------------
// Parse
// ---------------------------------------------------------------------------

impl ReconcileOptions {
    pub fn from_toml(input: &str) -> Result<Self, ReconcileError> {
        toml::from_str(input).map_err(|e| ReconcileError::ConfigParse(e.to_string()))
    }
}
