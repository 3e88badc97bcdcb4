//! Run-history retention policy.

use serde::{Deserialize, Serialize};

/// Retention rule limiting how much run history the server keeps.
///
/// Both limits are string-encoded integers. An empty string means
/// "unlimited" and is distinct from the policy being absent altogether,
/// which is why jobs hold this type behind an `Option`.
#[derive(Debug, Default, Clone, PartialEq, Eq, Hash)]
#[derive(Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(schemars::JsonSchema))]
#[serde(rename_all = "camelCase", default)]
pub struct DiscardPolicy {
    /// Days of history to keep, or empty for no limit.
    pub days_to_keep: String,
    /// Number of runs to keep, or empty for no limit.
    pub builds_to_keep: String,
}

impl DiscardPolicy {
    /// Creates a policy with both limits set.
    pub fn new(days_to_keep: impl Into<String>, builds_to_keep: impl Into<String>) -> Self {
        Self {
            days_to_keep: days_to_keep.into(),
            builds_to_keep: builds_to_keep.into(),
        }
    }

    /// Returns a configured policy with no limits.
    pub fn unlimited() -> Self {
        Self::default()
    }

    /// Returns whether neither limit is set.
    #[must_use]
    pub fn is_unlimited(&self) -> bool {
        self.days_to_keep.is_empty() && self.builds_to_keep.is_empty()
    }
}
