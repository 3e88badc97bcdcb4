//! Entry point for rendering and parsing job documents.

use devops_core::types::{MultiBranchPipeline, PipelineJob};
use devops_core::{Error, Result};

use crate::xml::{Element, parse_document, render_document};
use crate::{RenderConfig, TRACING_TARGET, multibranch, pipeline};

/// A job document of either supported kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JenkinsJob {
    /// Pipeline job with an embedded script.
    Pipeline(PipelineJob),
    /// Multi-branch pipeline project.
    MultiBranch(MultiBranchPipeline),
}

/// Converts pipeline models to and from Jenkins `config.xml` documents.
///
/// The codec holds no state besides its [`RenderConfig`] and can be shared
/// freely between threads.
///
/// # Examples
///
/// ```rust,ignore
/// use devops_jenkins::{JenkinsCodec, RenderConfig};
/// use devops_jenkins::types::PipelineJob;
///
/// let codec = JenkinsCodec::new(RenderConfig::compact());
/// let xml = codec.render_pipeline(&PipelineJob::new("node { echo 'hello' }"))?;
/// assert_eq!(codec.parse_pipeline(&xml)?.script, "node { echo 'hello' }");
/// ```
#[derive(Debug, Clone, Default)]
pub struct JenkinsCodec {
    config: RenderConfig,
}

impl JenkinsCodec {
    /// Creates a codec with the given render configuration.
    pub fn new(config: RenderConfig) -> Self {
        Self { config }
    }

    /// Gets the render configuration.
    pub fn config(&self) -> &RenderConfig {
        &self.config
    }

    /// Renders a pipeline job document.
    pub fn render_pipeline(&self, job: &PipelineJob) -> Result<String> {
        tracing::debug!(
            target: TRACING_TARGET,
            kind = "pipeline",
            has_parameters = job.parameters.is_some(),
            "Rendering job document"
        );

        let document = self.render(&pipeline::render(job)?)?;

        tracing::debug!(
            target: TRACING_TARGET,
            kind = "pipeline",
            bytes = document.len(),
            "Job document rendered"
        );
        Ok(document)
    }

    /// Parses a pipeline job document.
    pub fn parse_pipeline(&self, text: &str) -> Result<PipelineJob> {
        tracing::debug!(
            target: TRACING_TARGET,
            kind = "pipeline",
            bytes = text.len(),
            "Parsing job document"
        );

        let job = pipeline::parse(&parse_document(text)?)?;

        tracing::debug!(target: TRACING_TARGET, kind = "pipeline", "Job document parsed");
        Ok(job)
    }

    /// Renders a multi-branch project document.
    ///
    /// `folder` prefixes the job name in the generated branch source id.
    pub fn render_multi_branch(&self, folder: &str, job: &MultiBranchPipeline) -> Result<String> {
        let source_type = job.source_type();
        tracing::debug!(
            target: TRACING_TARGET,
            kind = "multi_branch",
            source_type = %source_type,
            "Rendering job document"
        );

        let document = self.render(&multibranch::render(folder, job)?)?;

        tracing::debug!(
            target: TRACING_TARGET,
            kind = "multi_branch",
            source_type = %source_type,
            bytes = document.len(),
            "Job document rendered"
        );
        Ok(document)
    }

    /// Parses a multi-branch project document.
    pub fn parse_multi_branch(&self, text: &str) -> Result<MultiBranchPipeline> {
        tracing::debug!(
            target: TRACING_TARGET,
            kind = "multi_branch",
            bytes = text.len(),
            "Parsing job document"
        );

        let job = multibranch::parse(&parse_document(text)?)?;

        tracing::debug!(
            target: TRACING_TARGET,
            kind = "multi_branch",
            source_type = %job.source_type(),
            "Job document parsed"
        );
        Ok(job)
    }

    /// Parses a document of either kind, detected from its root element.
    pub fn parse_job(&self, text: &str) -> Result<JenkinsJob> {
        let root = parse_document(text)?;

        match root.name() {
            pipeline::ROOT => pipeline::parse(&root).map(JenkinsJob::Pipeline),
            multibranch::ROOT => multibranch::parse(&root).map(JenkinsJob::MultiBranch),
            other => Err(Error::malformed_document()
                .with_message(format!("unsupported job document root <{other}>"))),
        }
    }

    fn render(&self, root: &Element) -> Result<String> {
        render_document(root, &self.config)
    }
}

#[cfg(test)]
mod tests {
    use devops_core::ErrorKind;
    use devops_core::types::*;

    use super::*;

    const SCRIPT: &str = "node{echo 'hello'}";

    fn codec() -> JenkinsCodec {
        JenkinsCodec::default()
    }

    fn assert_pipeline_roundtrip(job: PipelineJob) {
        let codec = codec();
        let xml = codec.render_pipeline(&job).unwrap();
        assert_eq!(codec.parse_pipeline(&xml).unwrap(), job, "document:\n{xml}");
    }

    fn assert_multi_branch_roundtrip(job: MultiBranchPipeline) {
        let codec = codec();
        let xml = codec.render_multi_branch("", &job).unwrap();
        assert_eq!(codec.parse_multi_branch(&xml).unwrap(), job, "document:\n{xml}");
    }

    fn multi_branch(source: SourceDescription) -> MultiBranchPipeline {
        MultiBranchPipeline {
            description: "for test".to_owned(),
            ..MultiBranchPipeline::new("Jenkinsfile", source)
        }
    }

    fn kubesphere_hosted() -> HostedSource {
        HostedSource {
            credential_id: "github".to_owned(),
            api_uri: "https://api.github.com".to_owned(),
            discover_branches: 1,
            discover_pr_from_origin: 2,
            discover_pr_from_forks: Some(ForkDiscovery {
                strategy: 1,
                trust: 1,
            }),
            ..HostedSource::new("kubesphere", "devops")
        }
    }

    fn kubesphere_git() -> GitSource {
        GitSource {
            url: "https://github.com/kubesphere/devops".to_owned(),
            credential_id: "git".to_owned(),
            discover_branches: true,
            ..GitSource::default()
        }
    }

    #[test]
    fn test_pipeline_basics() {
        assert_pipeline_roundtrip(PipelineJob::new(SCRIPT).with_description("for test"));
        assert_pipeline_roundtrip(PipelineJob::new(SCRIPT));
        assert_pipeline_roundtrip(PipelineJob {
            disable_concurrent_builds: true,
            ..PipelineJob::new(SCRIPT)
        });
        assert_pipeline_roundtrip(PipelineJob {
            name: "demo".to_owned(),
            ..PipelineJob::new(SCRIPT)
        });
    }

    #[test]
    fn test_pipeline_discarder() {
        for (days, builds) in [("3", "5"), ("3", ""), ("", "21321"), ("", "")] {
            assert_pipeline_roundtrip(
                PipelineJob::new(SCRIPT)
                    .with_description("for test")
                    .with_discard_policy(DiscardPolicy::new(days, builds)),
            );
        }
    }

    #[test]
    fn test_pipeline_parameters() {
        let parameter = |name: &str, kind: ParameterKind, default_value: &str| {
            Parameter::new(name, kind, default_value).with_description("fortest")
        };

        assert_pipeline_roundtrip(
            PipelineJob::new(SCRIPT)
                .with_parameters(vec![parameter("d", ParameterKind::Choice, "a\nb")]),
        );
        assert_pipeline_roundtrip(PipelineJob::new(SCRIPT).with_parameters(vec![
            parameter("a", ParameterKind::String, "abc"),
            parameter("b", ParameterKind::Boolean, "false"),
            parameter("c", ParameterKind::Text, "password \n aaa"),
            parameter("d", ParameterKind::Choice, "a\nb"),
        ]));
    }

    #[test]
    fn test_pipeline_triggers() {
        let cron = CronTrigger::new("1 1 1 * * *");
        let remote = RemoteTrigger::new("abc");

        assert_pipeline_roundtrip(PipelineJob {
            cron_trigger: Some(cron.clone()),
            ..PipelineJob::new(SCRIPT)
        });
        assert_pipeline_roundtrip(PipelineJob {
            remote_trigger: Some(remote.clone()),
            ..PipelineJob::new(SCRIPT)
        });
        assert_pipeline_roundtrip(PipelineJob {
            cron_trigger: Some(cron),
            remote_trigger: Some(remote),
            ..PipelineJob::new(SCRIPT)
        });
    }

    #[test]
    fn test_script_text_is_preserved() {
        let script = "pipeline {\n  stages {\n    stage('a') { steps { sh 'echo \"<&>\"' } }\n  }\n}\r\n";
        assert_pipeline_roundtrip(PipelineJob::new(script));

        for config in [RenderConfig::compact(), RenderConfig::default().with_indent(4)] {
            let codec = JenkinsCodec::new(config);
            let xml = codec.render_pipeline(&PipelineJob::new(script)).unwrap();
            assert_eq!(codec.parse_pipeline(&xml).unwrap().script, script);
        }
    }

    #[test]
    fn test_absent_blocks_are_omitted() {
        let xml = codec().render_pipeline(&PipelineJob::new(SCRIPT)).unwrap();

        assert!(!xml.contains("BuildDiscarderProperty"));
        assert!(!xml.contains("ParametersDefinitionProperty"));
        assert!(!xml.contains("TimerTrigger"));
        assert!(!xml.contains("DisableConcurrentBuildsJobProperty"));
        assert!(!xml.contains("authToken"));
        assert!(xml.starts_with("<?xml"));
    }

    #[test]
    fn test_empty_parameters_are_not_absent() {
        let job = PipelineJob::new(SCRIPT).with_parameters(Vec::new());
        let xml = codec().render_pipeline(&job).unwrap();

        assert!(xml.contains("ParametersDefinitionProperty"));
        assert_eq!(codec().parse_pipeline(&xml).unwrap().parameters, Some(Vec::new()));
    }

    #[test]
    fn test_multi_branch_empty_sources() {
        assert_multi_branch_roundtrip(multi_branch(SourceDescription::Git(GitSource::default())));
        assert_multi_branch_roundtrip(multi_branch(SourceDescription::GitHub(
            HostedSource::default(),
        )));
        assert_multi_branch_roundtrip(multi_branch(SourceDescription::SingleSvn(
            SingleSvnSource::default(),
        )));
        assert_multi_branch_roundtrip(multi_branch(SourceDescription::Svn(SvnSource::default())));
    }

    #[test]
    fn test_multi_branch_discarder_and_scan_trigger() {
        assert_multi_branch_roundtrip(MultiBranchPipeline {
            discard_policy: Some(DiscardPolicy::new("1", "2")),
            ..multi_branch(SourceDescription::default())
        });
        assert_multi_branch_roundtrip(MultiBranchPipeline {
            scan_trigger: Some(ScanTrigger::new("12345566")),
            ..multi_branch(SourceDescription::default())
        });
    }

    #[test]
    fn test_multi_branch_sources() {
        let sources = [
            SourceDescription::Git(kubesphere_git()),
            SourceDescription::GitHub(kubesphere_hosted()),
            SourceDescription::BitbucketServer(kubesphere_hosted()),
            SourceDescription::Svn(SvnSource {
                remote_base: "https://api.svn.com/bcd".to_owned(),
                credential_id: "svn".to_owned(),
                excluded_paths: "truck".to_owned(),
                included_paths: "tag/*".to_owned(),
            }),
            SourceDescription::SingleSvn(SingleSvnSource {
                remote: "https://api.svn.com/bcd".to_owned(),
                credential_id: "svn".to_owned(),
            }),
        ];

        for source in sources {
            assert_multi_branch_roundtrip(MultiBranchPipeline {
                scan_trigger: Some(ScanTrigger::new("12345566")),
                ..multi_branch(source)
            });
        }
    }

    #[test]
    fn test_multi_branch_clone_options() {
        let options = CloneOptions {
            shallow: false,
            depth: 3,
            timeout_minutes: 20,
        };

        assert_multi_branch_roundtrip(multi_branch(SourceDescription::Git(GitSource {
            clone_options: Some(options.clone()),
            ..kubesphere_git()
        })));
        assert_multi_branch_roundtrip(multi_branch(SourceDescription::GitHub(HostedSource {
            clone_options: Some(options),
            ..kubesphere_hosted()
        })));
    }

    #[test]
    fn test_multi_branch_regex_filter() {
        assert_multi_branch_roundtrip(multi_branch(SourceDescription::Git(GitSource {
            regex_filter: ".*".to_owned(),
            ..kubesphere_git()
        })));
        assert_multi_branch_roundtrip(multi_branch(SourceDescription::GitHub(HostedSource {
            regex_filter: ".*".to_owned(),
            ..kubesphere_hosted()
        })));
    }

    #[test]
    fn test_multi_branch_branch_event_trigger() {
        let triggers = [
            BranchEventTrigger::default()
                .with_on_create("abc")
                .with_on_delete("ddd"),
            BranchEventTrigger::default().with_on_create("abc"),
            BranchEventTrigger::default().with_on_delete("ddd"),
        ];

        for trigger in triggers {
            assert_multi_branch_roundtrip(MultiBranchPipeline {
                branch_event_trigger: Some(trigger),
                ..multi_branch(SourceDescription::GitHub(HostedSource {
                    regex_filter: ".*".to_owned(),
                    ..kubesphere_hosted()
                }))
            });
        }
    }

    #[test]
    fn test_github_scenario() {
        let job = multi_branch(SourceDescription::GitHub(kubesphere_hosted()));
        let xml = codec().render_multi_branch("", &job).unwrap();

        assert!(xml.contains("<apiUri>https://api.github.com</apiUri>"));
        assert!(xml.contains("ForkPullRequestDiscoveryTrait$TrustContributors"));

        let parsed = codec().parse_multi_branch(&xml).unwrap();
        let hosted = parsed.source.as_github().unwrap();
        assert_eq!(hosted.owner, "kubesphere");
        assert_eq!(hosted.repo, "devops");
        assert_eq!(hosted.discover_branches, 1);
        assert_eq!(hosted.discover_pr_from_origin, 2);
    }

    #[test]
    fn test_discovery_codes_are_distinct() {
        for code in [1, 2, 3] {
            let hosted = HostedSource {
                discover_branches: code,
                discover_pr_from_origin: code,
                ..HostedSource::default()
            };
            for source in [
                SourceDescription::GitHub(hosted.clone()),
                SourceDescription::BitbucketServer(hosted.clone()),
            ] {
                let job = multi_branch(source);
                let xml = codec().render_multi_branch("", &job).unwrap();
                assert!(xml.contains(&format!("<strategyId>{code}</strategyId>")));
                assert_eq!(codec().parse_multi_branch(&xml).unwrap(), job);
            }
        }

        let job = multi_branch(SourceDescription::Git(kubesphere_git()));
        let xml = codec().render_multi_branch("", &job).unwrap();
        assert!(xml.contains("jenkins.plugins.git.traits.BranchDiscoveryTrait"));
        assert!(!xml.contains("strategyId"));

        let parsed = codec().parse_multi_branch(&xml).unwrap();
        assert!(parsed.source.as_git().unwrap().discover_branches);
    }

    #[test]
    fn test_file_parameter_default_fails() {
        let job = PipelineJob::new(SCRIPT).with_parameters(vec![Parameter::new(
            "upload",
            ParameterKind::File,
            "report.txt",
        )]);

        let error = codec().render_pipeline(&job).unwrap_err();
        assert_eq!(error.kind, ErrorKind::Encoding);
    }

    #[test]
    fn test_multi_branch_omissions() {
        let job = multi_branch(SourceDescription::Git(GitSource {
            url: "https://github.com/kubesphere/devops".to_owned(),
            ..GitSource::default()
        }));
        let xml = codec().render_multi_branch("", &job).unwrap();

        assert!(!xml.contains("RegexSCMHeadFilterTrait"));
        assert!(!xml.contains("CloneOptionTrait"));
        assert!(!xml.contains("BranchDiscoveryTrait"));
        assert!(!xml.contains("PeriodicFolderTrigger"));
        assert!(!xml.contains("PipelineTriggerProperty"));
        assert!(!xml.contains("orphanedItemStrategy"));
    }

    #[test]
    fn test_folder_scopes_source_id() {
        let job = MultiBranchPipeline {
            name: "demo".to_owned(),
            ..multi_branch(SourceDescription::default())
        };
        let xml = codec().render_multi_branch("project-a", &job).unwrap();

        assert!(xml.contains("<id>project-ademo</id>"));
        assert_eq!(codec().parse_multi_branch(&xml).unwrap(), job);
    }

    #[test]
    fn test_non_integer_scan_interval_fails() {
        let job = MultiBranchPipeline {
            scan_trigger: Some(ScanTrigger::new("daily")),
            ..multi_branch(SourceDescription::default())
        };
        let error = codec().render_multi_branch("", &job).unwrap_err();
        assert_eq!(error.kind, ErrorKind::Encoding);
    }

    #[test]
    fn test_malformed_documents() {
        let codec = codec();

        for text in ["", "not xml", "<flow-definition>", "<a></b>", "<project/>"] {
            let error = codec.parse_pipeline(text).unwrap_err();
            assert_eq!(error.kind, ErrorKind::MalformedDocument, "input: {text:?}");
        }

        let error = codec
            .parse_multi_branch("<flow-definition><properties/></flow-definition>")
            .unwrap_err();
        assert_eq!(error.kind, ErrorKind::MalformedDocument);
    }

    #[test]
    fn test_unsupported_source() {
        let xml = codec()
            .render_multi_branch("", &multi_branch(SourceDescription::default()))
            .unwrap()
            .replace(
                "jenkins.plugins.git.GitSCMSource",
                "io.jenkins.plugins.gitlabbranchsource.GitLabSCMSource",
            );

        let error = codec().parse_multi_branch(&xml).unwrap_err();
        assert_eq!(error.kind, ErrorKind::UnsupportedSourceType);
    }

    #[test]
    fn test_parse_job_detects_kind() {
        let codec = codec();

        let pipeline = PipelineJob::new(SCRIPT);
        let xml = codec.render_pipeline(&pipeline).unwrap();
        assert_eq!(codec.parse_job(&xml).unwrap(), JenkinsJob::Pipeline(pipeline));

        let project = multi_branch(SourceDescription::default());
        let xml = codec.render_multi_branch("", &project).unwrap();
        assert_eq!(
            codec.parse_job(&xml).unwrap(),
            JenkinsJob::MultiBranch(project)
        );

        let error = codec.parse_job("<project/>").unwrap_err();
        assert_eq!(error.kind, ErrorKind::MalformedDocument);
    }

    #[test]
    fn test_codec_is_thread_safe() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<JenkinsCodec>();
        assert_send_sync::<JenkinsJob>();
    }
}
