//! Multi-branch projects that build every branch of a source provider.

use devops_core::types::MultiBranchPipeline;
use devops_core::{Error, Result};

use crate::xml::Element;
use crate::{discarder, source, trigger};

/// Root element of a multi-branch project document.
pub(crate) const ROOT: &str =
    "org.jenkinsci.plugins.workflow.multibranch.WorkflowMultiBranchProject";

const FOLDER_CONFIG_PROPERTY: &str =
    "org.jenkinsci.plugins.pipeline.modeldefinition.config.FolderConfig";
const FOLDER_VIEWS_CLASS: &str = "jenkins.branch.MultiBranchProjectViewHolder";
const FOLDER_ICON_CLASS: &str = "jenkins.branch.MetadataActionFolderIcon";
const BRANCH_SOURCE_LIST_CLASS: &str = "jenkins.branch.MultiBranchProject$BranchSourceList";
const BRANCH_PROJECT_FACTORY_CLASS: &str =
    "org.jenkinsci.plugins.workflow.multibranch.WorkflowBranchProjectFactory";

const OWNER_REFERENCE: &str = "../..";

/// Builds the document tree of a multi-branch project.
///
/// `folder` scopes the generated branch source id.
pub(crate) fn render(folder: &str, job: &MultiBranchPipeline) -> Result<Element> {
    let mut project = Element::new(ROOT).with_attr("plugin", "workflow-multibranch");
    project.element("actions");

    project.leaf("description", job.description.as_str());
    if !job.name.is_empty() {
        project.leaf("displayName", job.name.as_str());
    }

    let properties = project.element("properties");
    let folder_config = properties.push(
        Element::new(FOLDER_CONFIG_PROPERTY).with_attr("plugin", "pipeline-model-definition"),
    );
    folder_config.element("dockerLabel");
    folder_config.push(Element::new("registry").with_attr("plugin", "docker-commons"));
    if let Some(branch_event) = &job.branch_event_trigger {
        trigger::render_branch_event_trigger(properties, branch_event);
    }

    project
        .push(Element::new("folderViews").with_attr("class", FOLDER_VIEWS_CLASS))
        .push(owner());
    project.element("healthMetrics");
    project
        .push(Element::new("icon").with_attr("class", FOLDER_ICON_CLASS))
        .push(owner());

    if let Some(policy) = &job.discard_policy {
        discarder::render_orphaned_items(&mut project, policy);
    }

    let triggers = project.element("triggers");
    if let Some(scan) = &job.scan_trigger {
        trigger::render_scan_trigger(triggers, scan)?;
    }
    project.leaf("disabled", "false");

    let sources = project.push(
        Element::new("sources")
            .with_attr("class", BRANCH_SOURCE_LIST_CLASS)
            .with_attr("plugin", "branch-api"),
    );
    let id = format!("{folder}{}", job.name);
    source::render_branch_source(sources.element("data"), &id, &job.source)?;
    sources.push(owner());

    let factory =
        project.push(Element::new("factory").with_attr("class", BRANCH_PROJECT_FACTORY_CLASS));
    factory.push(owner());
    factory.leaf("scriptPath", job.script_path.as_str());

    Ok(project)
}

/// Back reference from a nested block to the project element.
fn owner() -> Element {
    Element::new("owner")
        .with_attr("class", ROOT)
        .with_attr("reference", OWNER_REFERENCE)
}

/// Reads a multi-branch project from its document tree.
pub(crate) fn parse(project: &Element) -> Result<MultiBranchPipeline> {
    if project.name() != ROOT {
        return Err(Error::malformed_document().with_message(format!(
            "expected <{ROOT}> root, found <{}>",
            project.name()
        )));
    }

    let script_path = project.require_path("factory/scriptPath")?;
    let properties = project.child("properties");

    Ok(MultiBranchPipeline {
        name: project.child_text("displayName").unwrap_or_default().to_owned(),
        description: project.child_text("description").unwrap_or_default().to_owned(),
        script_path: script_path.text().to_owned(),
        source: source::parse_branch_sources(project.child("sources"))?,
        discard_policy: discarder::parse_orphaned_items(project)?,
        scan_trigger: trigger::parse_scan_trigger(project.child("triggers"))?,
        branch_event_trigger: properties.and_then(trigger::parse_branch_event_trigger),
    })
}

#[cfg(test)]
mod tests {
    use devops_core::ErrorKind;
    use devops_core::types::{
        BranchEventTrigger, DiscardPolicy, GitSource, ScanTrigger, SourceDescription,
    };

    use super::*;

    fn git_job() -> MultiBranchPipeline {
        MultiBranchPipeline::new(
            "Jenkinsfile",
            SourceDescription::Git(GitSource {
                url: "https://github.com/kubesphere/devops".to_owned(),
                ..GitSource::default()
            }),
        )
    }

    #[test]
    fn test_project_layout() {
        let job = MultiBranchPipeline {
            name: "demo".to_owned(),
            ..git_job()
        };
        let project = render("folder", &job).unwrap();

        assert_eq!(project.attr("plugin"), Some("workflow-multibranch"));
        assert!(project.child(discarder::ORPHANED_ITEM_STRATEGY).is_none());

        let id = project
            .find("sources/data/jenkins.branch.BranchSource/source/id")
            .unwrap();
        assert_eq!(id.text(), "folderdemo");

        let factory = project.require("factory").unwrap();
        assert_eq!(factory.attr("class"), Some(BRANCH_PROJECT_FACTORY_CLASS));
        assert_eq!(factory.child_text("scriptPath"), Some("Jenkinsfile"));
        assert_eq!(
            factory.require("owner").unwrap().attr("reference"),
            Some(OWNER_REFERENCE)
        );
    }

    #[test]
    fn test_full_project_roundtrip() {
        let job = MultiBranchPipeline {
            name: "demo".to_owned(),
            description: "for test".to_owned(),
            discard_policy: Some(DiscardPolicy::new("1", "2")),
            scan_trigger: Some(ScanTrigger::new("12345566")),
            branch_event_trigger: Some(
                BranchEventTrigger::default()
                    .with_on_create("abc")
                    .with_on_delete("ddd"),
            ),
            ..git_job()
        };

        let project = render("folder", &job).unwrap();
        assert_eq!(parse(&project).unwrap(), job);
    }

    #[test]
    fn test_missing_script_path_is_malformed() {
        let rendered = render("", &git_job()).unwrap();
        let sources = rendered.require("sources").unwrap().clone();
        let project = Element::new(ROOT).with_child(sources);

        let error = parse(&project).unwrap_err();
        assert_eq!(error.kind, ErrorKind::MalformedDocument);
    }

    #[test]
    fn test_wrong_root_is_malformed() {
        let error = parse(&Element::new(crate::pipeline::ROOT)).unwrap_err();
        assert_eq!(error.kind, ErrorKind::MalformedDocument);
    }
}
