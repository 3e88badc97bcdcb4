//! Branch-name regex filter trait.

use devops_core::Result;

use crate::xml::Element;

const REGEX_FILTER_TRAIT: &str = "jenkins.scm.impl.trait.RegexSCMHeadFilterTrait";

/// Appends the filter trait unless `regex` is empty.
pub(super) fn render_regex_filter(traits: &mut Element, regex: &str) {
    if regex.is_empty() {
        return;
    }

    traits
        .push(Element::new(REGEX_FILTER_TRAIT).with_attr("plugin", "scm-api"))
        .leaf("regex", regex);
}

/// Reads the filter regex, or an empty string when no filter is set.
pub(super) fn parse_regex_filter(traits: Option<&Element>) -> Result<String> {
    match traits.and_then(|t| t.child(REGEX_FILTER_TRAIT)) {
        Some(filter) => Ok(filter.require("regex")?.text().to_owned()),
        None => Ok(String::new()),
    }
}
