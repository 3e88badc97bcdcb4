//! Declarative tag-to-field tables for flat blocks.
//!
//! A table lists, in document order, which child element carries which
//! string field of a model type. Rendering and parsing walk the same table,
//! which keeps both directions symmetric.

use devops_core::Result;

use super::Element;

/// Maps one child element to one string field of `T`.
pub(crate) struct TextField<T> {
    /// Child element name.
    pub tag: &'static str,
    pub get: fn(&T) -> &str,
    pub set: fn(&mut T, String),
    /// Omit the element when the field is empty, and read a missing element
    /// back as empty. Mandatory fields are always rendered and must be present.
    pub omit_empty: bool,
}

impl<T> TextField<T> {
    /// Appends one child per field of `value` to `parent`.
    pub fn render_all(fields: &[Self], parent: &mut Element, value: &T) {
        for field in fields {
            let text = (field.get)(value);
            if field.omit_empty && text.is_empty() {
                continue;
            }
            parent.leaf(field.tag, text);
        }
    }

    /// Fills the fields of `value` from the children of `element`.
    pub fn parse_into(fields: &[Self], element: &Element, value: &mut T) -> Result<()> {
        for field in fields {
            match element.child(field.tag) {
                Some(child) => (field.set)(value, child.text().to_owned()),
                None if field.omit_empty => (field.set)(value, String::new()),
                None => return Err(super::missing(field.tag, element.name())),
            }
        }
        Ok(())
    }

    /// Parses a fresh `T` from the children of `element`.
    pub fn parse_all(fields: &[Self], element: &Element) -> Result<T>
    where
        T: Default,
    {
        let mut value = T::default();
        Self::parse_into(fields, element, &mut value)?;
        Ok(value)
    }
}
