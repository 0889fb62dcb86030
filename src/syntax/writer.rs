//! Serialization of a [`TsDocument`] back to Linguist-compatible XML.

use quick_xml::Writer;
use quick_xml::events::{
    BytesDecl,
    BytesEnd,
    BytesStart,
    BytesText,
    Event,
};

use super::{
    SyntaxError,
    TsDocument,
    TsMessage,
};

/// Serialize a document to `.ts` XML, indented the way lupdate writes it.
///
/// # Errors
/// Returns [`SyntaxError`] when the underlying writer fails.
pub fn write_document(document: &TsDocument) -> Result<String, SyntaxError> {
    let mut writer = Writer::new_with_indent(Vec::new(), b' ', 4);

    writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("utf-8"), None)))?;
    writer.write_event(Event::DocType(BytesText::new("TS")))?;

    let mut root = BytesStart::new("TS");
    if !document.version.is_empty() {
        root.push_attribute(("version", document.version.as_str()));
    }
    if let Some(language) = &document.language {
        root.push_attribute(("language", language.as_str()));
    }
    if let Some(source_language) = &document.source_language {
        root.push_attribute(("sourcelanguage", source_language.as_str()));
    }
    writer.write_event(Event::Start(root))?;

    for context in &document.contexts {
        writer.write_event(Event::Start(BytesStart::new("context")))?;
        write_text_element(&mut writer, "name", &context.name)?;
        for message in &context.messages {
            write_message(&mut writer, message)?;
        }
        writer.write_event(Event::End(BytesEnd::new("context")))?;
    }

    writer.write_event(Event::End(BytesEnd::new("TS")))?;

    Ok(String::from_utf8_lossy(&writer.into_inner()).into_owned())
}

/// Write one `<message>` element.
fn write_message(writer: &mut Writer<Vec<u8>>, message: &TsMessage) -> Result<(), SyntaxError> {
    let mut start = BytesStart::new("message");
    if message.numerus {
        start.push_attribute(("numerus", "yes"));
    }
    writer.write_event(Event::Start(start))?;

    for location in &message.locations {
        let mut loc = BytesStart::new("location");
        loc.push_attribute(("filename", location.filename.as_str()));
        loc.push_attribute(("line", location.line.to_string().as_str()));
        writer.write_event(Event::Empty(loc))?;
    }

    write_text_element(writer, "source", &message.source)?;
    if let Some(comment) = &message.comment {
        write_text_element(writer, "comment", comment)?;
    }
    if let Some(extra_comment) = &message.extra_comment {
        write_text_element(writer, "extracomment", extra_comment)?;
    }
    if let Some(translator_comment) = &message.translator_comment {
        write_text_element(writer, "translatorcomment", translator_comment)?;
    }

    write_translation(writer, message)?;

    writer.write_event(Event::End(BytesEnd::new("message")))?;
    Ok(())
}

/// Write the `<translation>` element with its status attribute and either
/// plain text or numerus forms.
fn write_translation(writer: &mut Writer<Vec<u8>>, message: &TsMessage) -> Result<(), SyntaxError> {
    let mut start = BytesStart::new("translation");
    if let Some(status) = message.status.type_attr() {
        start.push_attribute(("type", status));
    }
    writer.write_event(Event::Start(start))?;

    if message.numerus {
        for form in &message.numerus_forms {
            write_text_element(writer, "numerusform", form)?;
        }
    } else if !message.translation.is_empty() {
        writer.write_event(Event::Text(BytesText::new(&message.translation)))?;
    }

    writer.write_event(Event::End(BytesEnd::new("translation")))?;
    Ok(())
}

/// Write `<name>text</name>` style elements.
fn write_text_element(
    writer: &mut Writer<Vec<u8>>,
    name: &str,
    text: &str,
) -> Result<(), SyntaxError> {
    writer.write_event(Event::Start(BytesStart::new(name)))?;
    if !text.is_empty() {
        writer.write_event(Event::Text(BytesText::new(text)))?;
    }
    writer.write_event(Event::End(BytesEnd::new(name)))?;
    Ok(())
}
