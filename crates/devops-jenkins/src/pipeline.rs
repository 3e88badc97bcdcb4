//! Pipeline jobs whose script is stored in the job configuration.

use devops_core::types::PipelineJob;
use devops_core::{Error, Result};

use crate::xml::Element;
use crate::{discarder, parameter, trigger};

/// Root element of a pipeline job document.
pub(crate) const ROOT: &str = "flow-definition";

const DECLARATIVE_JOB_ACTION: &str =
    "org.jenkinsci.plugins.pipeline.modeldefinition.actions.DeclarativeJobAction";
const DECLARATIVE_PROPERTY_TRACKER_ACTION: &str =
    "org.jenkinsci.plugins.pipeline.modeldefinition.actions.DeclarativeJobPropertyTrackerAction";
const DISABLE_CONCURRENT_BUILDS_PROPERTY: &str =
    "org.jenkinsci.plugins.workflow.job.properties.DisableConcurrentBuildsJobProperty";
const CPS_FLOW_DEFINITION: &str = "org.jenkinsci.plugins.workflow.cps.CpsFlowDefinition";

/// Builds the document tree of a pipeline job.
pub(crate) fn render(job: &PipelineJob) -> Result<Element> {
    let mut flow = Element::new(ROOT).with_attr("plugin", "workflow-job");
    render_actions(&mut flow);

    flow.leaf("description", job.description.as_str());
    if !job.name.is_empty() {
        flow.leaf("displayName", job.name.as_str());
    }
    flow.leaf("keepDependencies", "false");

    let properties = flow.element("properties");
    if job.disable_concurrent_builds {
        properties.element(DISABLE_CONCURRENT_BUILDS_PROPERTY);
    }
    if let Some(policy) = &job.discard_policy {
        discarder::render_build_discarder(properties, policy);
    }
    if let Some(parameters) = &job.parameters {
        parameter::render_parameters(properties, parameters)?;
    }
    if let Some(cron) = &job.cron_trigger {
        trigger::render_cron_trigger(properties, cron);
    }

    flow.push(
        Element::new("definition")
            .with_attr("class", CPS_FLOW_DEFINITION)
            .with_attr("plugin", "workflow-cps"),
    )
    .leaf("script", job.script.as_str())
    .leaf("sandbox", "true");

    flow.element("triggers");
    if let Some(remote) = &job.remote_trigger {
        trigger::render_remote_trigger(&mut flow, remote);
    }
    flow.leaf("disabled", "false");
    Ok(flow)
}

/// The declarative pipeline plugin tracks the properties it manages here.
fn render_actions(flow: &mut Element) {
    let actions = flow.element("actions");
    actions.push(
        Element::new(DECLARATIVE_JOB_ACTION).with_attr("plugin", "pipeline-model-definition"),
    );

    let tracker = actions.push(
        Element::new(DECLARATIVE_PROPERTY_TRACKER_ACTION)
            .with_attr("plugin", "pipeline-model-definition"),
    );
    tracker.element("jobProperties");
    tracker.element("triggers");
    tracker.element("parameters");
}

/// Reads a pipeline job from its document tree.
pub(crate) fn parse(flow: &Element) -> Result<PipelineJob> {
    if flow.name() != ROOT {
        return Err(Error::malformed_document().with_message(format!(
            "expected <{ROOT}> root, found <{}>",
            flow.name()
        )));
    }

    let properties = flow.require("properties")?;
    let script = flow.require_path("definition/script")?;

    Ok(PipelineJob {
        name: flow.child_text("displayName").unwrap_or_default().to_owned(),
        description: flow.child_text("description").unwrap_or_default().to_owned(),
        script: script.text().to_owned(),
        disable_concurrent_builds: properties
            .child(DISABLE_CONCURRENT_BUILDS_PROPERTY)
            .is_some(),
        discard_policy: discarder::parse_build_discarder(properties)?,
        parameters: parameter::parse_parameters(properties)?,
        cron_trigger: trigger::parse_cron_trigger(properties)?,
        remote_trigger: trigger::parse_remote_trigger(flow),
    })
}
