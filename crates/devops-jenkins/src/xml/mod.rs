//! Minimal XML document model used by the job codecs.
//!
//! Documents are rendered from and parsed into an [`Element`] tree with
//! `quick-xml`; job-specific code only ever deals with the tree.

mod element;
mod field;
mod parse;
mod render;

pub use element::Element;
pub(crate) use element::missing;
pub(crate) use field::TextField;
pub(crate) use parse::parse_document;
pub(crate) use render::render_document;
