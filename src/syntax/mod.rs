//! Reading and writing of Qt Linguist `.ts` catalog files.
//!
//! A `.ts` file is an XML document: a `<TS>` root carrying the target
//! language, containing `<context>` blocks that group `<message>` entries
//! by the UI component that displays them.

mod model;
mod reader;
mod writer;

pub use model::{
    TsContext,
    TsDocument,
    TsMessage,
};
pub use reader::parse_document;
pub use writer::write_document;

use thiserror::Error;

/// Errors raised while reading a `.ts` document.
#[derive(Error, Debug)]
pub enum SyntaxError {
    /// Underlying XML reader error.
    #[error("XML error: {0}")]
    Xml(#[from] quick_xml::Error),

    /// Malformed attribute list on an element.
    #[error("malformed attribute: {0}")]
    Attr(#[from] quick_xml::events::attributes::AttrError),

    /// Entity or escape sequence that cannot be resolved.
    #[error("escape error: {0}")]
    Escape(#[from] quick_xml::escape::EscapeError),

    /// I/O failure while writing a document.
    #[error("write error: {0}")]
    Io(#[from] std::io::Error),

    /// The document root element is not `<TS>`.
    #[error("root element is not <TS>")]
    NotTsDocument,

    /// A `<context>` block without a `<name>` element.
    #[error("<context> is missing its <name>")]
    MissingContextName,

    /// A `<message>` without a `<source>` element.
    #[error("<message> in context '{context}' is missing its <source>")]
    MissingSource {
        /// Name of the enclosing context.
        context: String,
    },

    /// Document ended before the expected closing tag.
    #[error("unexpected end of document")]
    UnexpectedEof,
}
