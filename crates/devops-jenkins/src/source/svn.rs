//! Subversion sources: a branch-discovering repository and a single
//! checkout location.

use devops_core::Result;
use devops_core::types::{SingleSvnSource, SvnSource};

use crate::xml::{Element, TextField};

pub(super) const SVN_CLASS: &str = "jenkins.scm.impl.subversion.SubversionSCMSource";
pub(super) const SVN_PLUGIN: &str = "subversion";

pub(super) const SINGLE_SVN_CLASS: &str = "jenkins.scm.impl.SingleSCMSource";
pub(super) const SINGLE_SVN_PLUGIN: &str = "scm-api";

const SUBVERSION_SCM_CLASS: &str = "hudson.scm.SubversionSCM";
const MODULE_LOCATION: &str = "hudson.scm.SubversionSCM_-ModuleLocation";
const UPDATE_UPDATER_CLASS: &str = "hudson.scm.subversion.UpdateUpdater";

const SVN_FIELDS: &[TextField<SvnSource>] = &[
    TextField {
        tag: "credentialsId",
        get: |s| s.credential_id.as_str(),
        set: |s, v| s.credential_id = v,
        omit_empty: true,
    },
    TextField {
        tag: "remoteBase",
        get: |s| s.remote_base.as_str(),
        set: |s, v| s.remote_base = v,
        omit_empty: true,
    },
    TextField {
        tag: "includes",
        get: |s| s.included_paths.as_str(),
        set: |s, v| s.included_paths = v,
        omit_empty: true,
    },
    TextField {
        tag: "excludes",
        get: |s| s.excluded_paths.as_str(),
        set: |s, v| s.excluded_paths = v,
        omit_empty: true,
    },
];

const LOCATION_FIELDS: &[TextField<SingleSvnSource>] = &[
    TextField {
        tag: "remote",
        get: |s| s.remote.as_str(),
        set: |s, v| s.remote = v,
        omit_empty: true,
    },
    TextField {
        tag: "credentialsId",
        get: |s| s.credential_id.as_str(),
        set: |s, v| s.credential_id = v,
        omit_empty: true,
    },
];

pub(super) fn render_svn(source: &mut Element, svn: &SvnSource) {
    TextField::render_all(SVN_FIELDS, source, svn);
}

pub(super) fn parse_svn(source: &Element) -> Result<SvnSource> {
    TextField::parse_all(SVN_FIELDS, source)
}

/// Writes a single-branch source wrapping one Subversion checkout.
pub(super) fn render_single_svn(source: &mut Element, svn: &SingleSvnSource) {
    source.leaf("name", "master");

    let scm = source.push(
        Element::new("scm")
            .with_attr("class", SUBVERSION_SCM_CLASS)
            .with_attr("plugin", SVN_PLUGIN),
    );

    let location = scm.element("locations").element(MODULE_LOCATION);
    TextField::render_all(LOCATION_FIELDS, location, svn);
    location
        .leaf("local", ".")
        .leaf("depthOption", "infinity")
        .leaf("ignoreExternalsOption", "true")
        .leaf("cancelProcessOnExternalsFail", "true");

    scm.leaf("excludedRegions", "")
        .leaf("includedRegions", "")
        .leaf("excludedUsers", "")
        .leaf("excludedRevprop", "")
        .leaf("excludedCommitMessages", "");
    scm.push(Element::new("workspaceUpdater").with_attr("class", UPDATE_UPDATER_CLASS));
    scm.leaf("ignoreDirPropChanges", "false")
        .leaf("filterChangelog", "false")
        .leaf("quietOperation", "true");
}

/// Returns whether a single-branch source wraps a Subversion checkout.
///
/// Single-branch sources can carry any SCM; only Subversion is modelled.
pub(super) fn is_single_svn(source: &Element) -> bool {
    source
        .child("scm")
        .is_some_and(|scm| scm.attr("class") == Some(SUBVERSION_SCM_CLASS))
}

pub(super) fn parse_single_svn(source: &Element) -> Result<SingleSvnSource> {
    let location = source.require_path(&format!("scm/locations/{MODULE_LOCATION}"))?;
    TextField::parse_all(LOCATION_FIELDS, location)
}

#[cfg(test)]
mod tests {
    use devops_core::ErrorKind;

    use super::*;

    #[test]
    fn test_svn_roundtrip() {
        let svn = SvnSource {
            remote_base: "https://svn.example.com/repo".to_owned(),
            credential_id: "svn".to_owned(),
            excluded_paths: "tags/*".to_owned(),
            included_paths: "trunk,branches/*".to_owned(),
        };
        let mut source = Element::new("source");
        render_svn(&mut source, &svn);

        assert_eq!(source.child_text("includes"), Some("trunk,branches/*"));
        assert_eq!(parse_svn(&source).unwrap(), svn);
    }

    #[test]
    fn test_empty_svn_omits_everything() {
        let mut source = Element::new("source");
        render_svn(&mut source, &SvnSource::default());

        assert!(source.children().is_empty());
        assert_eq!(parse_svn(&source).unwrap(), SvnSource::default());
    }

    #[test]
    fn test_single_svn_roundtrip() {
        let svn = SingleSvnSource {
            remote: "https://svn.example.com/repo/trunk".to_owned(),
            credential_id: "svn".to_owned(),
        };
        let mut source = Element::new("source");
        render_single_svn(&mut source, &svn);

        assert!(is_single_svn(&source));
        let location = source
            .find("scm/locations/hudson.scm.SubversionSCM_-ModuleLocation")
            .unwrap();
        assert_eq!(location.child_text("local"), Some("."));
        assert_eq!(parse_single_svn(&source).unwrap(), svn);
    }

    #[test]
    fn test_single_source_of_other_scm() {
        let mut source = Element::new("source");
        source
            .push(Element::new("scm").with_attr("class", "hudson.plugins.git.GitSCM"))
            .element("userRemoteConfigs");

        assert!(!is_single_svn(&source));
    }

    #[test]
    fn test_single_svn_without_location_is_malformed() {
        let mut source = Element::new("source");
        source.push(Element::new("scm").with_attr("class", SUBVERSION_SCM_CLASS));

        let error = parse_single_svn(&source).unwrap_err();
        assert_eq!(error.kind, ErrorKind::MalformedDocument);
    }
}
