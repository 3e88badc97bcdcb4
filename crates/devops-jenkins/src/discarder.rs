//! Retention policy blocks.
//!
//! Pipeline jobs store the policy as a log rotator inside their properties;
//! multi-branch projects store it as the orphaned-item strategy applied to
//! branch jobs that disappeared from the source.

use devops_core::Result;
use devops_core::types::DiscardPolicy;

use crate::xml::{Element, TextField};

pub(crate) const BUILD_DISCARDER_PROPERTY: &str = "jenkins.model.BuildDiscarderProperty";
const LOG_ROTATOR_CLASS: &str = "hudson.tasks.LogRotator";

pub(crate) const ORPHANED_ITEM_STRATEGY: &str = "orphanedItemStrategy";
const ORPHANED_ITEM_STRATEGY_CLASS: &str =
    "com.cloudbees.hudson.plugins.folder.computed.DefaultOrphanedItemStrategy";

const FIELDS: &[TextField<DiscardPolicy>] = &[
    TextField {
        tag: "daysToKeep",
        get: |p| p.days_to_keep.as_str(),
        set: |p, v| p.days_to_keep = v,
        omit_empty: false,
    },
    TextField {
        tag: "numToKeep",
        get: |p| p.builds_to_keep.as_str(),
        set: |p, v| p.builds_to_keep = v,
        omit_empty: false,
    },
];

/// Appends the build discarder property of a pipeline job.
pub(crate) fn render_build_discarder(properties: &mut Element, policy: &DiscardPolicy) {
    let strategy = properties
        .element(BUILD_DISCARDER_PROPERTY)
        .push(Element::new("strategy").with_attr("class", LOG_ROTATOR_CLASS));

    TextField::render_all(FIELDS, strategy, policy);
    strategy
        .leaf("artifactDaysToKeep", "-1")
        .leaf("artifactNumToKeep", "-1");
}

/// Reads the build discarder property of a pipeline job, if configured.
pub(crate) fn parse_build_discarder(properties: &Element) -> Result<Option<DiscardPolicy>> {
    let Some(property) = properties.child(BUILD_DISCARDER_PROPERTY) else {
        return Ok(None);
    };

    let strategy = property.require("strategy")?;
    TextField::parse_all(FIELDS, strategy).map(Some)
}

/// Appends the orphaned-item strategy of a multi-branch project.
pub(crate) fn render_orphaned_items(project: &mut Element, policy: &DiscardPolicy) {
    let strategy = project.push(
        Element::new(ORPHANED_ITEM_STRATEGY)
            .with_attr("class", ORPHANED_ITEM_STRATEGY_CLASS)
            .with_attr("plugin", "cloudbees-folder"),
    );

    strategy.leaf("pruneDeadBranches", "true");
    TextField::render_all(FIELDS, strategy, policy);
}

/// Reads the orphaned-item strategy of a multi-branch project, if configured.
pub(crate) fn parse_orphaned_items(project: &Element) -> Result<Option<DiscardPolicy>> {
    project
        .child(ORPHANED_ITEM_STRATEGY)
        .map(|strategy| TextField::parse_all(FIELDS, strategy))
        .transpose()
}
