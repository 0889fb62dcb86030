//! Typed model of a parsed `.ts` document.

use crate::types::{
    MessageStatus,
    SourceLocation,
};

/// A whole `.ts` file: root attributes plus its context blocks.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TsDocument {
    /// TS format version, e.g. "2.1".
    pub version: String,
    /// Target language attribute, e.g. "de_DE".
    pub language: Option<String>,
    /// Source language attribute, e.g. "en_US".
    pub source_language: Option<String>,
    /// Context blocks in file order.
    pub contexts: Vec<TsContext>,
}

/// One `<context>` block: a component name and its messages.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TsContext {
    /// Context name, e.g. "PixCache" or "SettingsWidget".
    pub name: String,
    /// Messages in file order.
    pub messages: Vec<TsMessage>,
}

/// One `<message>` entry.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TsMessage {
    /// Original (source-language) text, the lookup key.
    pub source: String,
    /// Translated text. Empty when unfinished or numerus.
    pub translation: String,
    /// True when the message carries `numerus="yes"`.
    pub numerus: bool,
    /// Plural forms in rule order. Empty for non-numerus messages.
    pub numerus_forms: Vec<String>,
    /// Completion status from the `<translation>` `type` attribute.
    pub status: MessageStatus,
    /// Disambiguation comment. Two messages may share a source string and
    /// differ only in this.
    pub comment: Option<String>,
    /// Comment written by the developer for translators.
    pub extra_comment: Option<String>,
    /// Comment left by the translator.
    pub translator_comment: Option<String>,
    /// Source-location hints.
    pub locations: Vec<SourceLocation>,
}

impl TsMessage {
    /// True when lookup may return this entry: finished and non-empty.
    #[must_use]
    pub fn has_translation(&self) -> bool {
        if self.status != MessageStatus::Finished {
            return false;
        }
        if self.numerus {
            !self.numerus_forms.is_empty() && self.numerus_forms.iter().any(|f| !f.is_empty())
        } else {
            !self.translation.is_empty()
        }
    }
}

#[cfg(test)]
mod tests {
    use googletest::prelude::*;
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case::finished("Hallo", MessageStatus::Finished, true)]
    #[case::unfinished("Hallo", MessageStatus::Unfinished, false)]
    #[case::vanished("Hallo", MessageStatus::Vanished, false)]
    #[case::empty_text("", MessageStatus::Finished, false)]
    fn test_has_translation(
        #[case] translation: &str,
        #[case] status: MessageStatus,
        #[case] expected: bool,
    ) {
        let message = TsMessage {
            source: "hello".to_string(),
            translation: translation.to_string(),
            status,
            ..TsMessage::default()
        };

        assert_that!(message.has_translation(), eq(expected));
    }

    #[rstest]
    #[case::forms(vec!["%n Datei".to_string(), "%n Dateien".to_string()], true)]
    #[case::no_forms(vec![], false)]
    #[case::empty_forms(vec![String::new(), String::new()], false)]
    fn test_has_translation_numerus(#[case] forms: Vec<String>, #[case] expected: bool) {
        let message = TsMessage {
            source: "%n file(s)".to_string(),
            numerus: true,
            numerus_forms: forms,
            ..TsMessage::default()
        };

        assert_that!(message.has_translation(), eq(expected));
    }
}
