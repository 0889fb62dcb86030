//! Shared helpers for unit tests that need in-memory catalogs.
#![cfg(test)]

use crate::catalog::Catalog;
use crate::syntax::{
    TsContext,
    TsDocument,
    TsMessage,
};
use crate::types::MessageStatus;

/// A finished message with the given source and translation.
pub(crate) fn finished(source: &str, translation: &str) -> TsMessage {
    with_status(source, translation, MessageStatus::Finished)
}

/// A message with an explicit status.
pub(crate) fn with_status(source: &str, translation: &str, status: MessageStatus) -> TsMessage {
    TsMessage {
        source: source.to_string(),
        translation: translation.to_string(),
        status,
        ..TsMessage::default()
    }
}

/// A single-context catalog for the given language.
pub(crate) fn make_catalog(language: &str, context: &str, messages: Vec<TsMessage>) -> Catalog {
    Catalog::from_document(TsDocument {
        version: "2.1".to_string(),
        language: Some(language.to_string()),
        source_language: None,
        contexts: vec![TsContext { name: context.to_string(), messages }],
    })
}
