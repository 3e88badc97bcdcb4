//! Job-level models for the two supported job kinds.

use serde::{Deserialize, Serialize};

use super::{
    BranchEventTrigger, CronTrigger, DiscardPolicy, Parameter, RemoteTrigger, ScanTrigger,
    SourceDescription, SourceType,
};

/// Pipeline job whose script is stored in the job configuration.
#[derive(Debug, Default, Clone, PartialEq, Eq, Hash)]
#[derive(Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(schemars::JsonSchema))]
#[serde(rename_all = "camelCase", default)]
pub struct PipelineJob {
    pub name: String,
    pub description: String,
    /// Pipeline definition body.
    pub script: String,
    pub disable_concurrent_builds: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub discard_policy: Option<DiscardPolicy>,
    /// Ordered build parameters.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parameters: Option<Vec<Parameter>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cron_trigger: Option<CronTrigger>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remote_trigger: Option<RemoteTrigger>,
}

impl PipelineJob {
    /// Creates a job running the given pipeline script.
    pub fn new(script: impl Into<String>) -> Self {
        Self {
            script: script.into(),
            ..Default::default()
        }
    }

    /// Sets the job description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Sets the retention policy.
    #[must_use]
    pub fn with_discard_policy(mut self, policy: DiscardPolicy) -> Self {
        self.discard_policy = Some(policy);
        self
    }

    /// Sets the build parameters.
    #[must_use]
    pub fn with_parameters(mut self, parameters: Vec<Parameter>) -> Self {
        self.parameters = Some(parameters);
        self
    }
}

/// Pipeline that builds every branch discovered from a source provider.
#[derive(Debug, Default, Clone, PartialEq, Eq, Hash)]
#[derive(Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(schemars::JsonSchema))]
#[serde(rename_all = "camelCase", default)]
pub struct MultiBranchPipeline {
    pub name: String,
    pub description: String,
    /// Location of the pipeline definition inside the repository.
    pub script_path: String,
    pub source: SourceDescription,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub discard_policy: Option<DiscardPolicy>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scan_trigger: Option<ScanTrigger>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub branch_event_trigger: Option<BranchEventTrigger>,
}

impl MultiBranchPipeline {
    /// Creates a pipeline reading `script_path` from the given source.
    pub fn new(script_path: impl Into<String>, source: SourceDescription) -> Self {
        Self {
            script_path: script_path.into(),
            source,
            ..Default::default()
        }
    }

    /// Returns the source provider discriminant.
    #[must_use]
    pub const fn source_type(&self) -> SourceType {
        self.source.source_type()
    }
}
