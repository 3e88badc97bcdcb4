//! Document rendering configuration.

#[cfg(feature = "config")]
use clap::Args;
use serde::{Deserialize, Serialize};

/// Default indentation width of rendered documents.
pub const DEFAULT_INDENT: usize = 2;

/// Controls the layout of rendered documents.
///
/// Layout never affects the parsed model: leaf text is written verbatim
/// regardless of indentation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "config", derive(Args))]
pub struct RenderConfig {
    /// Spaces per nesting level; zero renders a single line
    #[cfg_attr(
        feature = "config",
        arg(long = "xml-indent", env = "XML_INDENT", default_value = "2")
    )]
    #[serde(default = "default_indent")]
    pub indent: usize,

    /// Emit the `<?xml ...?>` declaration
    #[cfg_attr(
        feature = "config",
        arg(
            long = "xml-declaration",
            env = "XML_DECLARATION",
            default_value = "true",
            action = clap::ArgAction::Set
        )
    )]
    #[serde(default = "default_xml_declaration")]
    pub xml_declaration: bool,
}

fn default_indent() -> usize {
    DEFAULT_INDENT
}

fn default_xml_declaration() -> bool {
    true
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            indent: default_indent(),
            xml_declaration: default_xml_declaration(),
        }
    }
}

impl RenderConfig {
    /// Returns a configuration that renders single-line documents.
    pub fn compact() -> Self {
        Self::default().with_indent(0)
    }

    /// Set the indentation width.
    #[must_use]
    pub fn with_indent(mut self, indent: usize) -> Self {
        self.indent = indent;
        self
    }

    /// Set whether the XML declaration is emitted.
    #[must_use]
    pub fn with_xml_declaration(mut self, xml_declaration: bool) -> Self {
        self.xml_declaration = xml_declaration;
        self
    }
}
