//! Clone options trait shared by the Git-based providers.

use std::str::FromStr;

use devops_core::types::CloneOptions;
use devops_core::{Error, Result};

use crate::xml::Element;

const CLONE_OPTION_TRAIT: &str = "jenkins.plugins.git.traits.CloneOptionTrait";
const CLONE_OPTION_CLASS: &str = "hudson.plugins.git.extensions.impl.CloneOption";

/// Appends the clone options trait. All three options are always written.
pub(super) fn render_clone_options(traits: &mut Element, options: &CloneOptions) {
    traits
        .element(CLONE_OPTION_TRAIT)
        .push(Element::new("extension").with_attr("class", CLONE_OPTION_CLASS))
        .leaf("shallow", options.shallow.to_string())
        .leaf("noTags", "false")
        .leaf("reference", "")
        .leaf("timeout", options.timeout_minutes.to_string())
        .leaf("depth", options.depth.to_string())
        .leaf("honorRefspec", "true");
}

/// Reads the clone options trait, if present.
pub(super) fn parse_clone_options(traits: Option<&Element>) -> Result<Option<CloneOptions>> {
    let Some(clone_trait) = traits.and_then(|t| t.child(CLONE_OPTION_TRAIT)) else {
        return Ok(None);
    };

    let extension = clone_trait.require("extension")?;
    Ok(Some(CloneOptions {
        shallow: parse_value(extension, "shallow")?,
        depth: parse_value(extension, "depth")?,
        timeout_minutes: parse_value(extension, "timeout")?,
    }))
}

/// Parses the text of a mandatory child element.
pub(super) fn parse_value<T>(element: &Element, tag: &str) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    let text = element.require(tag)?.text();
    text.parse().map_err(|error| {
        Error::malformed_document()
            .with_message(format!("invalid <{tag}> value {text:?}"))
            .with_source(error)
    })
}
