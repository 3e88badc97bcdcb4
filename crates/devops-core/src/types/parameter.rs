//! Typed build parameters.

use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumIter, EnumString, IntoStaticStr};

/// Kind of a build parameter, which selects its form widget on the server.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
#[derive(AsRefStr, Display, EnumString, EnumIter, IntoStaticStr)]
#[derive(Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(schemars::JsonSchema))]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum ParameterKind {
    /// Single-line string.
    #[default]
    String,
    /// Checkbox; the default is `"true"` or `"false"`.
    Boolean,
    /// Multi-line text.
    Text,
    /// Drop-down; the default lists the choices one per line.
    Choice,
    /// Masked string.
    Password,
    /// Uploaded file; carries no default value.
    File,
}

impl ParameterKind {
    /// Returns whether the server stores a default value for this kind.
    #[must_use]
    pub const fn has_default(&self) -> bool {
        !matches!(self, Self::File)
    }
}

/// A single build parameter.
#[derive(Debug, Default, Clone, PartialEq, Eq, Hash)]
#[derive(Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(schemars::JsonSchema))]
#[serde(rename_all = "camelCase", default)]
pub struct Parameter {
    /// Parameter name as referenced from the pipeline script.
    pub name: String,
    /// Default value; may span multiple lines.
    pub default_value: String,
    /// Parameter kind.
    #[serde(rename = "type")]
    pub kind: ParameterKind,
    /// Help text shown on the build form.
    pub description: String,
}

impl Parameter {
    /// Creates a parameter with an empty description.
    pub fn new(
        name: impl Into<String>,
        kind: ParameterKind,
        default_value: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            default_value: default_value.into(),
            kind,
            description: String::new(),
        }
    }

    /// Creates a choice parameter from an ordered list of choices.
    pub fn choice<I, S>(name: impl Into<String>, choices: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let choices: Vec<String> = choices
            .into_iter()
            .map(|choice| choice.as_ref().to_owned())
            .collect();
        Self::new(name, ParameterKind::Choice, choices.join("\n"))
    }

    /// Sets the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Returns the choices of a choice parameter, one per default-value line.
    pub fn choices(&self) -> impl Iterator<Item = &str> {
        self.default_value.split('\n')
    }
}
