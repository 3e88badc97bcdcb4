//! Source-control provider descriptions for multi-branch pipelines.

use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumIter, EnumString, IntoStaticStr};

/// Discriminant naming the source provider of a multi-branch pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[derive(AsRefStr, Display, EnumString, EnumIter, IntoStaticStr)]
#[derive(Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(schemars::JsonSchema))]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum SourceType {
    /// Plain Git repository.
    Git,
    /// GitHub repository.
    #[strum(serialize = "github")]
    #[serde(rename = "github")]
    GitHub,
    /// Subversion repository with branch discovery.
    Svn,
    /// Single Subversion directory without branch discovery.
    SingleSvn,
    /// Bitbucket Server repository.
    BitbucketServer,
}

/// Exactly one provider-specific source description.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[derive(Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(schemars::JsonSchema))]
#[serde(tag = "sourceType", rename_all = "snake_case")]
pub enum SourceDescription {
    /// Plain Git repository.
    Git(GitSource),
    /// GitHub repository.
    #[serde(rename = "github")]
    GitHub(HostedSource),
    /// Subversion repository with branch discovery.
    Svn(SvnSource),
    /// Single Subversion directory.
    SingleSvn(SingleSvnSource),
    /// Bitbucket Server repository.
    BitbucketServer(HostedSource),
}

impl SourceDescription {
    /// Returns the discriminant of the populated variant.
    #[must_use]
    pub const fn source_type(&self) -> SourceType {
        match self {
            Self::Git(_) => SourceType::Git,
            Self::GitHub(_) => SourceType::GitHub,
            Self::Svn(_) => SourceType::Svn,
            Self::SingleSvn(_) => SourceType::SingleSvn,
            Self::BitbucketServer(_) => SourceType::BitbucketServer,
        }
    }

    /// Returns the Git description, if this is a Git source.
    pub fn as_git(&self) -> Option<&GitSource> {
        match self {
            Self::Git(source) => Some(source),
            _ => None,
        }
    }

    /// Returns the GitHub description, if this is a GitHub source.
    pub fn as_github(&self) -> Option<&HostedSource> {
        match self {
            Self::GitHub(source) => Some(source),
            _ => None,
        }
    }

    /// Returns the Bitbucket Server description, if this is one.
    pub fn as_bitbucket_server(&self) -> Option<&HostedSource> {
        match self {
            Self::BitbucketServer(source) => Some(source),
            _ => None,
        }
    }

    /// Returns the Subversion description, if this is a Subversion source.
    pub fn as_svn(&self) -> Option<&SvnSource> {
        match self {
            Self::Svn(source) => Some(source),
            _ => None,
        }
    }

    /// Returns the single-directory Subversion description, if any.
    pub fn as_single_svn(&self) -> Option<&SingleSvnSource> {
        match self {
            Self::SingleSvn(source) => Some(source),
            _ => None,
        }
    }
}

impl Default for SourceDescription {
    fn default() -> Self {
        Self::Git(GitSource::default())
    }
}

/// Checkout tuning shared by the Git-based providers.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
#[derive(Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(schemars::JsonSchema))]
#[serde(rename_all = "camelCase", default)]
pub struct CloneOptions {
    /// Perform a shallow clone.
    pub shallow: bool,
    /// History depth for shallow clones.
    pub depth: u32,
    /// Clone timeout in minutes.
    pub timeout_minutes: u32,
}

/// Pull-request discovery from forked repositories.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
#[derive(Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(schemars::JsonSchema))]
#[serde(default)]
pub struct ForkDiscovery {
    /// Provider strategy code.
    pub strategy: u32,
    /// Provider trust-policy code; `0` leaves the policy unset.
    pub trust: u32,
}

/// Plain Git repository source.
#[derive(Debug, Default, Clone, PartialEq, Eq, Hash)]
#[derive(Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(schemars::JsonSchema))]
#[serde(rename_all = "camelCase", default)]
pub struct GitSource {
    pub url: String,
    pub credential_id: String,
    /// Discover all branches of the remote.
    pub discover_branches: bool,
    /// Branch-name filter; empty disables filtering.
    pub regex_filter: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub clone_options: Option<CloneOptions>,
}

/// Repository hosted on GitHub or Bitbucket Server.
///
/// Both providers describe a repository the same way; the
/// [`SourceDescription`] variant decides which provider it targets.
#[derive(Debug, Default, Clone, PartialEq, Eq, Hash)]
#[derive(Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(schemars::JsonSchema))]
#[serde(rename_all = "camelCase", default)]
pub struct HostedSource {
    pub owner: String,
    pub repo: String,
    pub credential_id: String,
    /// API endpoint; empty selects the provider default.
    pub api_uri: String,
    /// Branch discovery strategy code; `0` disables discovery.
    pub discover_branches: u32,
    /// Origin pull-request strategy code; `0` disables discovery.
    #[serde(rename = "discoverPRFromOrigin")]
    pub discover_pr_from_origin: u32,
    #[serde(rename = "discoverPRFromForks", skip_serializing_if = "Option::is_none")]
    pub discover_pr_from_forks: Option<ForkDiscovery>,
    /// Branch-name filter; empty disables filtering.
    pub regex_filter: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub clone_options: Option<CloneOptions>,
}

impl HostedSource {
    /// Creates a source for `owner/repo`.
    pub fn new(owner: impl Into<String>, repo: impl Into<String>) -> Self {
        Self {
            owner: owner.into(),
            repo: repo.into(),
            ..Default::default()
        }
    }
}

/// Subversion repository with branch discovery below a base URL.
#[derive(Debug, Default, Clone, PartialEq, Eq, Hash)]
#[derive(Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(schemars::JsonSchema))]
#[serde(rename_all = "camelCase", default)]
pub struct SvnSource {
    pub remote_base: String,
    pub credential_id: String,
    pub excluded_paths: String,
    pub included_paths: String,
}

/// Fixed Subversion directory built as a single branch.
#[derive(Debug, Default, Clone, PartialEq, Eq, Hash)]
#[derive(Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(schemars::JsonSchema))]
#[serde(rename_all = "camelCase", default)]
pub struct SingleSvnSource {
    pub remote: String,
    pub credential_id: String,
}
