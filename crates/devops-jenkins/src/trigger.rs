//! Trigger blocks: cron and remote triggers of pipeline jobs, scan and
//! branch-event triggers of multi-branch projects.

use devops_core::types::{BranchEventTrigger, CronTrigger, RemoteTrigger, ScanTrigger};
use devops_core::{Error, Result};

use crate::xml::Element;

pub(crate) const PIPELINE_TRIGGERS_PROPERTY: &str =
    "org.jenkinsci.plugins.workflow.job.properties.PipelineTriggersJobProperty";
const TIMER_TRIGGER: &str = "hudson.triggers.TimerTrigger";
const AUTH_TOKEN: &str = "authToken";

const PERIODIC_FOLDER_TRIGGER: &str =
    "com.cloudbees.hudson.plugins.folder.computed.PeriodicFolderTrigger";

pub(crate) const BRANCH_EVENT_PROPERTY: &str =
    "org.jenkinsci.plugins.workflow.multibranch.PipelineTriggerProperty";
const ON_CREATE: &str = "createActionJobsToTrigger";
const ON_DELETE: &str = "deleteActionJobsToTrigger";

const MINUTE_MILLIS: i64 = 60 * 1000;
const HOUR_MILLIS: i64 = 60 * MINUTE_MILLIS;

/// Appends the cron trigger property of a pipeline job.
pub(crate) fn render_cron_trigger(properties: &mut Element, trigger: &CronTrigger) {
    properties
        .element(PIPELINE_TRIGGERS_PROPERTY)
        .element("triggers")
        .element(TIMER_TRIGGER)
        .leaf("spec", trigger.schedule.as_str());
}

/// Reads the cron trigger of a pipeline job, if configured.
pub(crate) fn parse_cron_trigger(properties: &Element) -> Result<Option<CronTrigger>> {
    let Some(timer) = properties
        .child(PIPELINE_TRIGGERS_PROPERTY)
        .and_then(|property| property.child("triggers"))
        .and_then(|triggers| triggers.child(TIMER_TRIGGER))
    else {
        return Ok(None);
    };

    let schedule = timer.require("spec")?.text();
    Ok(Some(CronTrigger::new(schedule)))
}

/// Appends the remote build token of a pipeline job.
pub(crate) fn render_remote_trigger(flow: &mut Element, trigger: &RemoteTrigger) {
    flow.leaf(AUTH_TOKEN, trigger.token.as_str());
}

/// Reads the remote build token of a pipeline job, if configured.
pub(crate) fn parse_remote_trigger(flow: &Element) -> Option<RemoteTrigger> {
    flow.child_text(AUTH_TOKEN).map(RemoteTrigger::new)
}

/// Appends the periodic scan trigger to a multi-branch `triggers` block.
///
/// The server expects both the interval and a matching cron spec.
pub(crate) fn render_scan_trigger(triggers: &mut Element, trigger: &ScanTrigger) -> Result<()> {
    let millis: i64 = trigger.interval.parse().map_err(|error| {
        Error::encoding()
            .with_message(format!("scan interval {:?} is not an integer", trigger.interval))
            .with_source(error)
    })?;

    triggers
        .push(Element::new(PERIODIC_FOLDER_TRIGGER).with_attr("plugin", "cloudbees-folder"))
        .leaf("spec", cron_spec_for_interval(millis))
        .leaf("interval", trigger.interval.as_str());
    triggers.leaf("disabled", "false");
    Ok(())
}

/// Reads the periodic scan trigger of a multi-branch project, if configured.
pub(crate) fn parse_scan_trigger(triggers: Option<&Element>) -> Result<Option<ScanTrigger>> {
    let Some(periodic) = triggers.and_then(|t| t.child(PERIODIC_FOLDER_TRIGGER)) else {
        return Ok(None);
    };

    let interval = periodic.require("interval")?.text();
    Ok(Some(ScanTrigger::new(interval)))
}

/// Returns the cron spec the server pairs with a scan interval.
pub fn cron_spec_for_interval(millis: i64) -> &'static str {
    match millis {
        m if m <= 5 * MINUTE_MILLIS => "* * * * *",
        m if m <= 30 * MINUTE_MILLIS => "H/5 * * * *",
        m if m <= HOUR_MILLIS => "H/15 * * * *",
        m if m <= 8 * HOUR_MILLIS => "H/30 * * * *",
        m if m <= 24 * HOUR_MILLIS => "H H/4 * * *",
        m if m <= 48 * HOUR_MILLIS => "H H/12 * * *",
        _ => "H H * * *",
    }
}

/// Appends the branch-event trigger property of a multi-branch project.
pub(crate) fn render_branch_event_trigger(properties: &mut Element, trigger: &BranchEventTrigger) {
    let property = properties.push(
        Element::new(BRANCH_EVENT_PROPERTY).with_attr("plugin", "multibranch-action-triggers"),
    );

    if let Some(names) = &trigger.on_create_job_names {
        property.leaf(ON_CREATE, names.as_str());
    }
    if let Some(names) = &trigger.on_delete_job_names {
        property.leaf(ON_DELETE, names.as_str());
    }
}

/// Reads the branch-event trigger of a multi-branch project, if configured.
pub(crate) fn parse_branch_event_trigger(properties: &Element) -> Option<BranchEventTrigger> {
    properties
        .child(BRANCH_EVENT_PROPERTY)
        .map(|property| BranchEventTrigger {
            on_create_job_names: property.child_text(ON_CREATE).map(str::to_owned),
            on_delete_job_names: property.child_text(ON_DELETE).map(str::to_owned),
        })
}
