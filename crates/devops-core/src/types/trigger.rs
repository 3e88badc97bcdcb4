//! Build and scan trigger types.

use serde::{Deserialize, Serialize};

/// Cron-scheduled trigger for pipeline jobs.
#[derive(Debug, Default, Clone, PartialEq, Eq, Hash)]
#[derive(Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(schemars::JsonSchema))]
#[serde(rename_all = "camelCase", default)]
pub struct CronTrigger {
    /// Cron expression, passed through without validation.
    pub schedule: String,
}

impl CronTrigger {
    /// Creates a trigger for the given cron expression.
    pub fn new(schedule: impl Into<String>) -> Self {
        Self {
            schedule: schedule.into(),
        }
    }
}

/// Periodic re-scan of a multi-branch pipeline's source provider.
///
/// Not interchangeable with [`CronTrigger`]: the server stores the scan
/// period as an interval and derives its own schedule from it.
#[derive(Debug, Default, Clone, PartialEq, Eq, Hash)]
#[derive(Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(schemars::JsonSchema))]
#[serde(rename_all = "camelCase", default)]
pub struct ScanTrigger {
    /// Scan interval in milliseconds, string-encoded.
    pub interval: String,
}

impl ScanTrigger {
    /// Creates a scan trigger with the given interval.
    pub fn new(interval: impl Into<String>) -> Self {
        Self {
            interval: interval.into(),
        }
    }
}

/// Webhook trigger authorized by a shared token.
#[derive(Debug, Default, Clone, PartialEq, Eq, Hash)]
#[derive(Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(schemars::JsonSchema))]
#[serde(rename_all = "camelCase", default)]
pub struct RemoteTrigger {
    /// Secret the server expects on remote build requests.
    pub token: String,
}

impl RemoteTrigger {
    /// Creates a remote trigger with the given token.
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
        }
    }
}

/// Jobs to invoke when a multi-branch scan creates or deletes a branch job.
#[derive(Debug, Default, Clone, PartialEq, Eq, Hash)]
#[derive(Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(schemars::JsonSchema))]
#[serde(rename_all = "camelCase", default)]
pub struct BranchEventTrigger {
    /// Comma-separated job names run when a branch appears.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub on_create_job_names: Option<String>,
    /// Comma-separated job names run when a branch disappears.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub on_delete_job_names: Option<String>,
}

impl BranchEventTrigger {
    /// Sets the jobs triggered on branch creation.
    #[must_use]
    pub fn with_on_create(mut self, job_names: impl Into<String>) -> Self {
        self.on_create_job_names = Some(job_names.into());
        self
    }

    /// Sets the jobs triggered on branch deletion.
    #[must_use]
    pub fn with_on_delete(mut self, job_names: impl Into<String>) -> Self {
        self.on_delete_job_names = Some(job_names.into());
        self
    }
}
