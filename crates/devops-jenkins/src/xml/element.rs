//! Generic element tree shared by the renderer and the parser.

use devops_core::{Error, Result};

/// A single XML element with its attributes, text and children.
///
/// Text is only meaningful on leaf elements; whitespace between child
/// elements is collected but never read back.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Element {
    name: String,
    attributes: Vec<(String, String)>,
    text: String,
    children: Vec<Element>,
}

impl Element {
    /// Creates an empty element.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Adds an attribute.
    #[must_use]
    pub fn with_attr(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.push((key.into(), value.into()));
        self
    }

    /// Sets the text content.
    #[must_use]
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }

    /// Adds a child element.
    #[must_use]
    pub fn with_child(mut self, child: Element) -> Self {
        self.children.push(child);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn attributes(&self) -> &[(String, String)] {
        &self.attributes
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn children(&self) -> &[Element] {
        &self.children
    }

    /// Returns the value of the attribute `key`.
    pub fn attr(&self, key: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Returns the first child named `name`.
    pub fn child(&self, name: &str) -> Option<&Element> {
        self.children.iter().find(|child| child.name == name)
    }

    /// Returns every child named `name`, in document order.
    pub fn children_named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a Element> {
        self.children.iter().filter(move |child| child.name == name)
    }

    /// Follows a `/`-separated path of child names.
    pub fn find(&self, path: &str) -> Option<&Element> {
        path.split('/')
            .try_fold(self, |element, name| element.child(name))
    }

    /// Returns the text of the first child named `name`.
    pub fn child_text(&self, name: &str) -> Option<&str> {
        self.child(name).map(Element::text)
    }

    /// Returns the first child named `name` or a malformed-document error.
    pub fn require(&self, name: &str) -> Result<&Element> {
        self.child(name).ok_or_else(|| missing(name, &self.name))
    }

    /// Follows `path` or fails with a malformed-document error.
    pub fn require_path(&self, path: &str) -> Result<&Element> {
        self.find(path).ok_or_else(|| missing(path, &self.name))
    }

    /// Adds an attribute in place.
    pub fn set_attr(&mut self, key: impl Into<String>, value: impl Into<String>) -> &mut Self {
        self.attributes.push((key.into(), value.into()));
        self
    }

    /// Appends `child` and returns a mutable reference to it.
    pub fn push(&mut self, child: Element) -> &mut Element {
        self.children.push(child);
        let last = self.children.len() - 1;
        &mut self.children[last]
    }

    /// Appends an empty child named `name` and returns it.
    pub fn element(&mut self, name: impl Into<String>) -> &mut Element {
        self.push(Element::new(name))
    }

    /// Appends a text-only child and returns `self` for chaining.
    pub fn leaf(&mut self, name: impl Into<String>, text: impl Into<String>) -> &mut Self {
        self.children.push(Element::new(name).with_text(text));
        self
    }

    pub(crate) fn append_text(&mut self, text: &str) {
        self.text.push_str(text);
    }
}

/// Builds the error reported when a mandatory element is absent.
pub(crate) fn missing(name: &str, parent: &str) -> Error {
    Error::malformed_document().with_message(format!("missing <{name}> in <{parent}>"))
}
