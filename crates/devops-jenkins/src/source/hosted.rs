//! GitHub and Bitbucket Server sources.
//!
//! Both providers describe a repository with the same fields but use their
//! own plugin classes, trait element names and trust policies. Each provider
//! is a [`HostedProvider`] table; the encode and decode paths are shared and
//! never guess the provider from field values.

use devops_core::types::{ForkDiscovery, HostedSource};
use devops_core::{Error, Result};

use super::clone::{self, parse_value};
use super::regex;
use crate::TRACING_TARGET;
use crate::xml::{Element, TextField};

/// Element names and policy tables of one hosted provider.
pub(super) struct HostedProvider {
    pub class: &'static str,
    pub plugin: &'static str,
    /// Element holding the API endpoint.
    pub api_uri_tag: &'static str,
    pub branch_discovery_trait: &'static str,
    pub origin_pr_trait: &'static str,
    pub fork_pr_trait: &'static str,
    /// Class prefix of the fork trust policy, up to and including `$`.
    pub trust_class_prefix: &'static str,
    /// Trust-policy codes and their class suffixes.
    pub trust_policies: &'static [(u32, &'static str)],
}

pub(super) const GITHUB: HostedProvider = HostedProvider {
    class: "org.jenkinsci.plugins.github_branch_source.GitHubSCMSource",
    plugin: "github-branch-source",
    api_uri_tag: "apiUri",
    branch_discovery_trait: "org.jenkinsci.plugins.github__branch__source.BranchDiscoveryTrait",
    origin_pr_trait:
        "org.jenkinsci.plugins.github__branch__source.OriginPullRequestDiscoveryTrait",
    fork_pr_trait: "org.jenkinsci.plugins.github__branch__source.ForkPullRequestDiscoveryTrait",
    trust_class_prefix: "org.jenkinsci.plugins.github_branch_source.ForkPullRequestDiscoveryTrait$",
    trust_policies: &[
        (1, "TrustContributors"),
        (2, "TrustEveryone"),
        (3, "TrustPermission"),
        (4, "TrustNobody"),
    ],
};

pub(super) const BITBUCKET_SERVER: HostedProvider = HostedProvider {
    class: "com.cloudbees.jenkins.plugins.bitbucket.BitbucketSCMSource",
    plugin: "cloudbees-bitbucket-branch-source",
    api_uri_tag: "serverUrl",
    branch_discovery_trait: "com.cloudbees.jenkins.plugins.bitbucket.BranchDiscoveryTrait",
    origin_pr_trait: "com.cloudbees.jenkins.plugins.bitbucket.OriginPullRequestDiscoveryTrait",
    fork_pr_trait: "com.cloudbees.jenkins.plugins.bitbucket.ForkPullRequestDiscoveryTrait",
    trust_class_prefix: "com.cloudbees.jenkins.plugins.bitbucket.ForkPullRequestDiscoveryTrait$",
    trust_policies: &[(1, "TrustTeamForks"), (2, "TrustEveryone"), (3, "TrustNobody")],
};

impl HostedProvider {
    fn fields(&self) -> [TextField<HostedSource>; 4] {
        [
            TextField {
                tag: "credentialsId",
                get: |s| s.credential_id.as_str(),
                set: |s, v| s.credential_id = v,
                omit_empty: false,
            },
            TextField {
                tag: "repoOwner",
                get: |s| s.owner.as_str(),
                set: |s, v| s.owner = v,
                omit_empty: false,
            },
            TextField {
                tag: "repository",
                get: |s| s.repo.as_str(),
                set: |s, v| s.repo = v,
                omit_empty: false,
            },
            TextField {
                tag: self.api_uri_tag,
                get: |s| s.api_uri.as_str(),
                set: |s, v| s.api_uri = v,
                omit_empty: true,
            },
        ]
    }

    pub fn render(&self, source: &mut Element, hosted: &HostedSource) -> Result<()> {
        TextField::render_all(&self.fields(), source, hosted);

        let traits = source.element("traits");
        if hosted.discover_branches != 0 {
            traits
                .element(self.branch_discovery_trait)
                .leaf("strategyId", hosted.discover_branches.to_string());
        }
        if hosted.discover_pr_from_origin != 0 {
            traits
                .element(self.origin_pr_trait)
                .leaf("strategyId", hosted.discover_pr_from_origin.to_string());
        }
        if let Some(forks) = &hosted.discover_pr_from_forks {
            let trust_class = self.trust_class(forks.trust)?;
            traits
                .element(self.fork_pr_trait)
                .leaf("strategyId", forks.strategy.to_string())
                .push(Element::new("trust").with_attr("class", trust_class));
        }
        if let Some(options) = &hosted.clone_options {
            clone::render_clone_options(traits, options);
        }
        regex::render_regex_filter(traits, &hosted.regex_filter);
        Ok(())
    }

    pub fn parse(&self, source: &Element) -> Result<HostedSource> {
        let mut hosted: HostedSource = TextField::parse_all(&self.fields(), source)?;

        let traits = source.child("traits");
        let find = |tag: &str| traits.and_then(|t| t.child(tag));

        if let Some(branches) = find(self.branch_discovery_trait) {
            hosted.discover_branches = parse_value(branches, "strategyId")?;
        }
        if let Some(origin) = find(self.origin_pr_trait) {
            hosted.discover_pr_from_origin = parse_value(origin, "strategyId")?;
        }
        if let Some(forks) = find(self.fork_pr_trait) {
            hosted.discover_pr_from_forks = Some(ForkDiscovery {
                strategy: parse_value(forks, "strategyId")?,
                trust: forks
                    .child("trust")
                    .and_then(|trust| trust.attr("class"))
                    .map_or(0, |class| self.trust_code(class)),
            });
        }
        hosted.clone_options = clone::parse_clone_options(traits)?;
        hosted.regex_filter = regex::parse_regex_filter(traits)?;
        Ok(hosted)
    }

    /// Returns the trust class for `code`; `0` yields the bare prefix.
    fn trust_class(&self, code: u32) -> Result<String> {
        if code == 0 {
            return Ok(self.trust_class_prefix.to_owned());
        }

        self.trust_policies
            .iter()
            .find(|(c, _)| *c == code)
            .map(|(_, suffix)| format!("{}{suffix}", self.trust_class_prefix))
            .ok_or_else(|| {
                Error::encoding().with_message(format!(
                    "unknown fork trust code {code} for {}",
                    self.plugin
                ))
            })
    }

    /// Returns the code of a trust class, or `0` for unset or unknown policies.
    fn trust_code(&self, class: &str) -> u32 {
        let suffix = class.strip_prefix(self.trust_class_prefix);
        let code = suffix.and_then(|suffix| {
            self.trust_policies
                .iter()
                .find(|(_, s)| *s == suffix)
                .map(|(code, _)| *code)
        });

        match (suffix, code) {
            (_, Some(code)) => code,
            (Some(""), None) => 0,
            _ => {
                tracing::warn!(
                    target: TRACING_TARGET,
                    class,
                    plugin = self.plugin,
                    "Unknown fork trust policy, leaving it unset"
                );
                0
            }
        }
    }
}
