//! Event-driven `.ts` parser built on `quick-xml`.

use quick_xml::Reader;
use quick_xml::events::{
    BytesRef,
    BytesStart,
    Event,
};

use super::{
    SyntaxError,
    TsContext,
    TsDocument,
    TsMessage,
};
use crate::types::{
    MessageStatus,
    SourceLocation,
};

/// Parse the text of a `.ts` file into a [`TsDocument`].
///
/// Unknown elements are skipped so that files written by newer lupdate
/// versions still load.
///
/// # Errors
/// Returns [`SyntaxError`] on malformed XML, a non-`<TS>` root, or a
/// context/message missing its required child element.
pub fn parse_document(text: &str) -> Result<TsDocument, SyntaxError> {
    let mut reader = Reader::from_str(text);
    reader.config_mut().trim_text(true);

    let mut document = TsDocument::default();
    let mut root_seen = false;

    loop {
        match reader.read_event()? {
            Event::Start(e) => match e.name().as_ref() {
                b"TS" => {
                    root_seen = true;
                    read_root_attributes(&e, &mut document)?;
                }
                b"context" if root_seen => {
                    document.contexts.push(parse_context(&mut reader)?);
                }
                _ if !root_seen => return Err(SyntaxError::NotTsDocument),
                _ => {
                    reader.read_to_end(e.name())?;
                }
            },
            Event::Eof => break,
            _ => {}
        }
    }

    if !root_seen {
        return Err(SyntaxError::NotTsDocument);
    }

    Ok(document)
}

/// Copy `version`, `language` and `sourcelanguage` off the `<TS>` root.
fn read_root_attributes(
    e: &BytesStart<'_>,
    document: &mut TsDocument,
) -> Result<(), SyntaxError> {
    if let Some(version) = attr_value(e, b"version")? {
        document.version = version;
    }
    document.language = attr_value(e, b"language")?;
    document.source_language = attr_value(e, b"sourcelanguage")?;
    Ok(())
}

/// Parse one `<context>` block up to its closing tag.
fn parse_context(reader: &mut Reader<&[u8]>) -> Result<TsContext, SyntaxError> {
    let mut name: Option<String> = None;
    let mut messages = Vec::new();

    loop {
        match reader.read_event()? {
            Event::Start(e) => match e.name().as_ref() {
                b"name" => name = Some(read_text(reader, b"name")?),
                b"message" => {
                    let numerus = attr_value(&e, b"numerus")?.as_deref() == Some("yes");
                    let context_name = name.clone().unwrap_or_default();
                    messages.push(parse_message(reader, numerus, &context_name)?);
                }
                _ => {
                    reader.read_to_end(e.name())?;
                }
            },
            Event::End(e) if e.name().as_ref() == b"context" => break,
            Event::Eof => return Err(SyntaxError::UnexpectedEof),
            _ => {}
        }
    }

    let name = name.ok_or(SyntaxError::MissingContextName)?;
    Ok(TsContext { name, messages })
}

/// Parse one `<message>` up to its closing tag.
fn parse_message(
    reader: &mut Reader<&[u8]>,
    numerus: bool,
    context_name: &str,
) -> Result<TsMessage, SyntaxError> {
    let mut message = TsMessage { numerus, ..TsMessage::default() };
    let mut source: Option<String> = None;

    loop {
        match reader.read_event()? {
            Event::Start(e) => match e.name().as_ref() {
                b"source" => source = Some(read_text(reader, b"source")?),
                b"translation" => {
                    message.status =
                        MessageStatus::from_type_attr(attr_value(&e, b"type")?.as_deref());
                    read_translation_body(reader, &mut message)?;
                }
                b"comment" => message.comment = non_empty(read_text(reader, b"comment")?),
                b"extracomment" => {
                    message.extra_comment = non_empty(read_text(reader, b"extracomment")?);
                }
                b"translatorcomment" => {
                    message.translator_comment =
                        non_empty(read_text(reader, b"translatorcomment")?);
                }
                _ => {
                    reader.read_to_end(e.name())?;
                }
            },
            Event::Empty(e) => match e.name().as_ref() {
                b"location" => {
                    if let Some(location) = read_location(&e)? {
                        message.locations.push(location);
                    }
                }
                b"translation" => {
                    message.status =
                        MessageStatus::from_type_attr(attr_value(&e, b"type")?.as_deref());
                }
                _ => {}
            },
            Event::End(e) if e.name().as_ref() == b"message" => break,
            Event::Eof => return Err(SyntaxError::UnexpectedEof),
            _ => {}
        }
    }

    message.source =
        source.ok_or_else(|| SyntaxError::MissingSource { context: context_name.to_string() })?;
    Ok(message)
}

/// Parse the body of a `<translation>` element: plain text or
/// `<numerusform>` children.
fn read_translation_body(
    reader: &mut Reader<&[u8]>,
    message: &mut TsMessage,
) -> Result<(), SyntaxError> {
    loop {
        match reader.read_event()? {
            Event::Text(e) => {
                message.translation.push_str(&e.decode().map_err(quick_xml::Error::from)?);
            }
            Event::GeneralRef(e) => push_reference(&mut message.translation, &e)?,
            Event::CData(e) => {
                message.translation.push_str(&String::from_utf8_lossy(e.as_ref()));
            }
            Event::Start(e) => match e.name().as_ref() {
                b"numerusform" => {
                    message.numerus_forms.push(read_text(reader, b"numerusform")?);
                }
                // Only the first length variant is kept; shorter variants
                // exist for space-constrained UIs we do not model.
                b"lengthvariant" => {
                    let variant = read_text(reader, b"lengthvariant")?;
                    if message.translation.is_empty() {
                        message.translation = variant;
                    }
                }
                _ => {
                    reader.read_to_end(e.name())?;
                }
            },
            Event::Empty(e) if e.name().as_ref() == b"numerusform" => {
                message.numerus_forms.push(String::new());
            }
            Event::End(e) if e.name().as_ref() == b"translation" => break,
            Event::Eof => return Err(SyntaxError::UnexpectedEof),
            _ => {}
        }
    }
    Ok(())
}

/// Parse a `<location/>` hint. Returns `None` for relative locations
/// (`line="+3"`) whose absolute line cannot be recovered here.
fn read_location(e: &BytesStart<'_>) -> Result<Option<SourceLocation>, SyntaxError> {
    let Some(filename) = attr_value(e, b"filename")? else {
        return Ok(None);
    };
    let line = attr_value(e, b"line")?.and_then(|l| l.parse::<u32>().ok());
    Ok(line.map(|line| SourceLocation { filename, line }))
}

/// Collect the text content of an element, skipping nested markup.
fn read_text(reader: &mut Reader<&[u8]>, end_tag: &[u8]) -> Result<String, SyntaxError> {
    let mut text = String::new();
    loop {
        match reader.read_event()? {
            Event::Text(e) => text.push_str(&e.decode().map_err(quick_xml::Error::from)?),
            Event::GeneralRef(e) => push_reference(&mut text, &e)?,
            Event::CData(e) => text.push_str(&String::from_utf8_lossy(e.as_ref())),
            Event::Start(e) => {
                reader.read_to_end(e.name())?;
            }
            Event::End(e) if e.name().as_ref() == end_tag => break,
            Event::Eof => return Err(SyntaxError::UnexpectedEof),
            _ => {}
        }
    }
    Ok(text)
}

/// Resolve an entity reference inside text content: character references
/// and the five predefined XML entities. Anything else is dropped.
fn push_reference(text: &mut String, reference: &BytesRef<'_>) -> Result<(), SyntaxError> {
    if let Some(ch) = reference.resolve_char_ref()? {
        text.push(ch);
        return Ok(());
    }
    match &**reference {
        b"amp" => text.push('&'),
        b"lt" => text.push('<'),
        b"gt" => text.push('>'),
        b"apos" => text.push('\''),
        b"quot" => text.push('"'),
        unknown => {
            tracing::debug!(
                entity = %String::from_utf8_lossy(unknown),
                "Skipping unknown entity reference"
            );
        }
    }
    Ok(())
}

/// Look up one attribute by name, unescaped.
fn attr_value(e: &BytesStart<'_>, key: &[u8]) -> Result<Option<String>, SyntaxError> {
    for attr in e.attributes() {
        let attr = attr?;
        if attr.key.as_ref() == key {
            return Ok(Some(attr.unescape_value()?.into_owned()));
        }
    }
    Ok(None)
}

/// Map empty strings to `None`.
fn non_empty(text: String) -> Option<String> {
    if text.is_empty() { None } else { Some(text) }
}
