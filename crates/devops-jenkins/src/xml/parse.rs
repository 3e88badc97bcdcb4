//! Builds an element tree from document text.

use devops_core::{Error, Result};
use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};

use super::Element;

/// Parses `text` into its root element.
///
/// Declarations, comments and processing instructions are dropped. Text and
/// CDATA sections are unescaped and kept verbatim, whitespace included.
pub(crate) fn parse_document(text: &str) -> Result<Element> {
    let mut reader = Reader::from_str(text);
    let mut stack: Vec<Element> = Vec::new();
    let mut root = None;

    loop {
        let event = reader.read_event().map_err(|error| {
            let position = reader.buffer_position();
            malformed(error).with_message(format!("invalid XML near byte {position}"))
        })?;

        match event {
            Event::Start(start) => {
                if root.is_some() {
                    return Err(trailing_content());
                }
                stack.push(open_element(&start)?);
            }
            Event::Empty(start) => {
                let element = open_element(&start)?;
                close_element(&mut stack, &mut root, element)?;
            }
            Event::End(_) => {
                let element = stack.pop().ok_or_else(|| {
                    Error::malformed_document().with_message("unexpected closing tag")
                })?;
                close_element(&mut stack, &mut root, element)?;
            }
            Event::Text(content) => {
                let content = content.unescape().map_err(malformed)?;
                match stack.last_mut() {
                    Some(current) => current.append_text(&content),
                    None if content.trim().is_empty() => {}
                    None => return Err(trailing_content()),
                }
            }
            Event::CData(content) => {
                let bytes = content.into_inner();
                let content = std::str::from_utf8(&bytes)?;
                match stack.last_mut() {
                    Some(current) => current.append_text(content),
                    None => return Err(trailing_content()),
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }

    if let Some(open) = stack.last() {
        return Err(Error::malformed_document()
            .with_message(format!("unclosed element <{}>", open.name())));
    }

    root.ok_or_else(|| Error::malformed_document().with_message("document has no root element"))
}

fn open_element(start: &BytesStart<'_>) -> Result<Element> {
    let qname = start.name();
    let name = std::str::from_utf8(qname.as_ref())?;
    let mut element = Element::new(name);

    for attribute in start.attributes() {
        let attribute = attribute.map_err(malformed)?;
        let key = std::str::from_utf8(attribute.key.as_ref())?;
        let value = attribute.unescape_value().map_err(malformed)?;
        element.set_attr(key, value);
    }

    Ok(element)
}

fn close_element(
    stack: &mut [Element],
    root: &mut Option<Element>,
    element: Element,
) -> Result<()> {
    match stack.last_mut() {
        Some(parent) => {
            parent.push(element);
        }
        None if root.is_none() => *root = Some(element),
        None => return Err(trailing_content()),
    }
    Ok(())
}

fn trailing_content() -> Error {
    Error::malformed_document().with_message("content outside the root element")
}

fn malformed<E>(error: E) -> Error
where
    E: std::error::Error + Send + Sync + 'static,
{
    Error::malformed_document()
        .with_message("invalid XML")
        .with_source(error)
}
