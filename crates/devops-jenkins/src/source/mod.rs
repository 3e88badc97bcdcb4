//! Branch sources of multi-branch projects.
//!
//! A project lists its sources as `jenkins.branch.BranchSource` entries, each
//! wrapping one provider-specific `source` block identified by its `class`
//! attribute. Encoding dispatches on the [`SourceDescription`] variant;
//! decoding matches the class against the providers this crate knows.

mod clone;
mod git;
mod hosted;
mod regex;
mod svn;

use devops_core::types::SourceDescription;
use devops_core::{Error, Result};

use self::hosted::{BITBUCKET_SERVER, GITHUB};
use crate::TRACING_TARGET;
use crate::xml::Element;

const BRANCH_SOURCE: &str = "jenkins.branch.BranchSource";
const NAMED_EXCEPTIONS_STRATEGY: &str = "jenkins.branch.NamedExceptionsBranchPropertyStrategy";

/// Appends one branch source to the `data` list of a `sources` block.
pub(crate) fn render_branch_source(
    data: &mut Element,
    id: &str,
    description: &SourceDescription,
) -> Result<()> {
    let branch_source = data.element(BRANCH_SOURCE);

    let (class, plugin) = provider(description);
    let source = branch_source.push(
        Element::new("source")
            .with_attr("class", class)
            .with_attr("plugin", plugin),
    );
    source.leaf("id", id);

    match description {
        SourceDescription::Git(git) => git::render(source, git),
        SourceDescription::GitHub(hosted) => GITHUB.render(source, hosted)?,
        SourceDescription::BitbucketServer(hosted) => BITBUCKET_SERVER.render(source, hosted)?,
        SourceDescription::Svn(svn) => svn::render_svn(source, svn),
        SourceDescription::SingleSvn(svn) => svn::render_single_svn(source, svn),
    }

    let strategy = branch_source
        .push(Element::new("strategy").with_attr("class", NAMED_EXCEPTIONS_STRATEGY));
    for list in ["defaultProperties", "namedExceptions"] {
        strategy.element(list).set_attr("class", "empty-list");
    }
    Ok(())
}

/// Returns the plugin class and plugin name of the source block.
fn provider(description: &SourceDescription) -> (&'static str, &'static str) {
    match description {
        SourceDescription::Git(_) => (git::CLASS, git::PLUGIN),
        SourceDescription::GitHub(_) => (GITHUB.class, GITHUB.plugin),
        SourceDescription::BitbucketServer(_) => (BITBUCKET_SERVER.class, BITBUCKET_SERVER.plugin),
        SourceDescription::Svn(_) => (svn::SVN_CLASS, svn::SVN_PLUGIN),
        SourceDescription::SingleSvn(_) => (svn::SINGLE_SVN_CLASS, svn::SINGLE_SVN_PLUGIN),
    }
}

/// Decodes the single recognized branch source of a `sources` block.
///
/// Fails with an unsupported-source-type error when no source, or more than
/// one, belongs to a known provider.
pub(crate) fn parse_branch_sources(sources: Option<&Element>) -> Result<SourceDescription> {
    let candidates = sources
        .and_then(|sources| sources.child("data"))
        .into_iter()
        .flat_map(|data| data.children_named(BRANCH_SOURCE))
        .filter_map(|branch_source| branch_source.child("source"));

    let mut found = Vec::new();
    for source in candidates {
        match parse_source(source)? {
            Some(description) => found.push(description),
            None => tracing::warn!(
                target: TRACING_TARGET,
                class = source.attr("class").unwrap_or_default(),
                "Skipping unrecognized branch source"
            ),
        }
    }

    match found.len() {
        1 => Ok(found.remove(0)),
        0 => Err(Error::unsupported_source_type()
            .with_message("no branch source of a supported provider")),
        n => Err(Error::unsupported_source_type()
            .with_message(format!("{n} branch sources found, expected exactly one"))),
    }
}

/// Decodes one `source` block, or returns `None` for unknown providers.
fn parse_source(source: &Element) -> Result<Option<SourceDescription>> {
    let description = match source.attr("class").unwrap_or_default() {
        git::CLASS => SourceDescription::Git(git::parse(source)?),
        class if class == GITHUB.class => SourceDescription::GitHub(GITHUB.parse(source)?),
        class if class == BITBUCKET_SERVER.class => {
            SourceDescription::BitbucketServer(BITBUCKET_SERVER.parse(source)?)
        }
        svn::SVN_CLASS => SourceDescription::Svn(svn::parse_svn(source)?),
        svn::SINGLE_SVN_CLASS if svn::is_single_svn(source) => {
            SourceDescription::SingleSvn(svn::parse_single_svn(source)?)
        }
        _ => return Ok(None),
    };
    Ok(Some(description))
}
