//! Plain Git source.

use devops_core::Result;
use devops_core::types::GitSource;

use super::{clone, regex};
use crate::xml::{Element, TextField};

pub(super) const CLASS: &str = "jenkins.plugins.git.GitSCMSource";
pub(super) const PLUGIN: &str = "git";

const BRANCH_DISCOVERY_TRAIT: &str = "jenkins.plugins.git.traits.BranchDiscoveryTrait";

const FIELDS: &[TextField<GitSource>] = &[
    TextField {
        tag: "remote",
        get: |s| s.url.as_str(),
        set: |s, v| s.url = v,
        omit_empty: false,
    },
    TextField {
        tag: "credentialsId",
        get: |s| s.credential_id.as_str(),
        set: |s, v| s.credential_id = v,
        omit_empty: true,
    },
];

pub(super) fn render(source: &mut Element, git: &GitSource) {
    TextField::render_all(FIELDS, source, git);

    let traits = source.element("traits");
    if git.discover_branches {
        traits.element(BRANCH_DISCOVERY_TRAIT);
    }
    if let Some(options) = &git.clone_options {
        clone::render_clone_options(traits, options);
    }
    regex::render_regex_filter(traits, &git.regex_filter);
}

pub(super) fn parse(source: &Element) -> Result<GitSource> {
    let mut git: GitSource = TextField::parse_all(FIELDS, source)?;

    let traits = source.child("traits");
    git.discover_branches = traits.is_some_and(|t| t.child(BRANCH_DISCOVERY_TRAIT).is_some());
    git.clone_options = clone::parse_clone_options(traits)?;
    git.regex_filter = regex::parse_regex_filter(traits)?;
    Ok(git)
}
