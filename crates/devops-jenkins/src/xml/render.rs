//! Serializes an element tree into document text.

use std::io::Write;

use devops_core::{Error, Result};
use quick_xml::Writer;
use quick_xml::escape::escape;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};

use super::Element;
use crate::RenderConfig;

/// Renders `root` as a complete document.
pub(crate) fn render_document(root: &Element, config: &RenderConfig) -> Result<String> {
    let mut writer = if config.indent > 0 {
        Writer::new_with_indent(Vec::new(), b' ', config.indent)
    } else {
        Writer::new(Vec::new())
    };

    if config.xml_declaration {
        writer
            .write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))
            .map_err(write_error)?;
    }

    write_element(&mut writer, root)?;
    Ok(String::from_utf8(writer.into_inner())?)
}

fn write_element<W: Write>(writer: &mut Writer<W>, element: &Element) -> Result<()> {
    let mut start = BytesStart::new(element.name());
    for (key, value) in element.attributes() {
        start.push_attribute((key.as_str(), value.as_str()));
    }

    if element.children().is_empty() && element.text().is_empty() {
        return writer.write_event(Event::Empty(start)).map_err(write_error);
    }

    writer.write_event(Event::Start(start)).map_err(write_error)?;
    if element.children().is_empty() {
        let text = escape_text(element.text());
        writer
            .write_event(Event::Text(BytesText::from_escaped(text)))
            .map_err(write_error)?;
    } else {
        for child in element.children() {
            write_element(writer, child)?;
        }
    }

    writer
        .write_event(Event::End(BytesEnd::new(element.name())))
        .map_err(write_error)
}

/// Escapes markup characters and carriage returns.
///
/// A literal `\r` would be folded into `\n` by any conforming parser, so it
/// is written as a character reference instead.
fn escape_text(text: &str) -> String {
    escape(text).replace('\r', "&#13;")
}

fn write_error<E>(error: E) -> Error
where
    E: std::error::Error + Send + Sync + 'static,
{
    Error::encoding()
        .with_message("failed to write document")
        .with_source(error)
}
