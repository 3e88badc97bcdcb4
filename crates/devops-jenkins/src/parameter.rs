//! Build parameter definitions.

use devops_core::types::{Parameter, ParameterKind};
use devops_core::{Error, Result};

use crate::TRACING_TARGET;
use crate::xml::{Element, TextField};

pub(crate) const PARAMETERS_PROPERTY: &str = "hudson.model.ParametersDefinitionProperty";

/// Every parameter kind, in the order definitions are looked up.
const KINDS: [ParameterKind; 6] = [
    ParameterKind::String,
    ParameterKind::Boolean,
    ParameterKind::Text,
    ParameterKind::Choice,
    ParameterKind::Password,
    ParameterKind::File,
];

const FIELDS: &[TextField<Parameter>] = &[
    TextField {
        tag: "name",
        get: |p| p.name.as_str(),
        set: |p, v| p.name = v,
        omit_empty: false,
    },
    TextField {
        tag: "description",
        get: |p| p.description.as_str(),
        set: |p, v| p.description = v,
        omit_empty: true,
    },
];

fn definition_tag(kind: ParameterKind) -> &'static str {
    match kind {
        ParameterKind::String => "hudson.model.StringParameterDefinition",
        ParameterKind::Boolean => "hudson.model.BooleanParameterDefinition",
        ParameterKind::Text => "hudson.model.TextParameterDefinition",
        ParameterKind::Choice => "hudson.model.ChoiceParameterDefinition",
        ParameterKind::Password => "hudson.model.PasswordParameterDefinition",
        ParameterKind::File => "hudson.model.FileParameterDefinition",
    }
}

fn definition_kind(tag: &str) -> Option<ParameterKind> {
    KINDS.into_iter().find(|kind| definition_tag(*kind) == tag)
}

/// Appends the parameter definitions property, preserving list order.
///
/// File parameters have no default; a non-empty one is an encoding error.
pub(crate) fn render_parameters(
    properties: &mut Element,
    parameters: &[Parameter],
) -> Result<()> {
    if let Some(file) = parameters
        .iter()
        .find(|p| !p.kind.has_default() && !p.default_value.is_empty())
    {
        return Err(Error::encoding().with_message(format!(
            "{} parameter {:?} cannot carry a default value",
            file.kind, file.name
        )));
    }

    let definitions = properties
        .element(PARAMETERS_PROPERTY)
        .element("parameterDefinitions");

    for parameter in parameters {
        let definition = definitions.element(definition_tag(parameter.kind));
        TextField::render_all(FIELDS, definition, parameter);

        match parameter.kind {
            ParameterKind::Choice => {
                let array = definition
                    .push(Element::new("choices").with_attr("class", "java.util.Arrays$ArrayList"))
                    .push(Element::new("a").with_attr("class", "string-array"));
                for choice in parameter.choices() {
                    array.leaf("string", choice);
                }
            }
            kind if kind.has_default() => {
                definition.leaf("defaultValue", parameter.default_value.as_str());
            }
            _ => {}
        }
    }
    Ok(())
}

/// Reads the parameter definitions property, if configured.
///
/// Definitions of kinds this crate does not model are skipped.
pub(crate) fn parse_parameters(properties: &Element) -> Result<Option<Vec<Parameter>>> {
    let Some(property) = properties.child(PARAMETERS_PROPERTY) else {
        return Ok(None);
    };
    let Some(definitions) = property.child("parameterDefinitions") else {
        return Ok(Some(Vec::new()));
    };

    let mut parameters = Vec::with_capacity(definitions.children().len());
    for definition in definitions.children() {
        let Some(kind) = definition_kind(definition.name()) else {
            tracing::warn!(
                target: TRACING_TARGET,
                definition = definition.name(),
                "Skipping unsupported parameter definition"
            );
            continue;
        };

        let mut parameter: Parameter = TextField::parse_all(FIELDS, definition)?;
        parameter.kind = kind;
        parameter.default_value = match kind {
            ParameterKind::Choice => parse_choices(definition)?,
            kind if kind.has_default() => definition.require("defaultValue")?.text().to_owned(),
            _ => String::new(),
        };
        parameters.push(parameter);
    }

    Ok(Some(parameters))
}

/// Joins the choices of a choice definition with newlines.
///
/// Accepts both the array-backed list this crate writes and the plain
/// `<choices><string/>...</choices>` list written by newer servers.
fn parse_choices(definition: &Element) -> Result<String> {
    let choices = definition.require("choices")?;
    let list = choices.child("a").unwrap_or(choices);

    let values: Vec<&str> = list.children_named("string").map(Element::text).collect();
    Ok(values.join("\n"))
}
