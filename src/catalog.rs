//! Loaded translation catalog and lookup.
//!
//! A [`Catalog`] is the immutable, indexed form of one `.ts` file. Lookups
//! are keyed by (context, source string) with an optional disambiguation
//! comment, and fall back to the source text whenever no finished
//! translation exists.

use std::collections::HashMap;
use std::path::{
    Path,
    PathBuf,
};

use thiserror::Error;
use unic_langid::LanguageIdentifier;

use crate::plural::PluralRule;
use crate::syntax::{
    self,
    SyntaxError,
    TsDocument,
    TsMessage,
};

/// Errors raised while loading a catalog file.
#[derive(Error, Debug)]
pub enum CatalogError {
    /// The file could not be read.
    #[error("failed to read catalog file {path}: {source}")]
    Io {
        /// Path of the offending file.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The file is not a well-formed `.ts` document.
    #[error("failed to parse catalog file {path}: {source}")]
    Syntax {
        /// Path of the offending file.
        path: PathBuf,
        /// Underlying parse error.
        #[source]
        source: SyntaxError,
    },
}

/// Lookup key inside a context.
///
/// Two messages may share a source string and differ only in their
/// disambiguation comment.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct MessageKey {
    /// Source-language text.
    source: String,
    /// Disambiguation comment, if any.
    comment: Option<String>,
}

/// Messages of one context plus their lookup index.
#[derive(Debug, Clone, Default)]
struct ContextEntries {
    /// Messages in file order.
    messages: Vec<TsMessage>,
    /// (source, comment) to position in `messages`.
    index: HashMap<MessageKey, usize>,
}

/// An immutable, indexed translation catalog for one target language.
#[derive(Debug, Clone)]
pub struct Catalog {
    /// Raw language attribute as written in the file, e.g. "de_DE".
    language: Option<String>,
    /// Parsed language, used for plural rules and locale matching.
    language_id: Option<LanguageIdentifier>,
    /// Source language attribute, e.g. "en_US".
    source_language: Option<String>,
    /// Where the catalog was loaded from, if it came from disk.
    file_path: Option<PathBuf>,
    /// Plural rule of the target language.
    plural_rule: PluralRule,
    /// Context name to its entries.
    contexts: HashMap<String, ContextEntries>,
}

impl Catalog {
    /// Load and index a `.ts` file.
    ///
    /// The language comes from the root `language` attribute; when that is
    /// absent the file stem is tried (e.g. `translations/de.ts`).
    ///
    /// # Errors
    /// [`CatalogError::Io`] when the file cannot be read,
    /// [`CatalogError::Syntax`] when it is not a valid `.ts` document.
    pub fn load(path: &Path) -> Result<Self, CatalogError> {
        tracing::debug!(path = %path.display(), "Loading catalog");
        let text = std::fs::read_to_string(path)
            .map_err(|source| CatalogError::Io { path: path.to_path_buf(), source })?;

        let document = syntax::parse_document(&text)
            .map_err(|source| CatalogError::Syntax { path: path.to_path_buf(), source })?;

        let mut catalog = Self::from_document(document);
        if catalog.language.is_none()
            && let Some(stem) = detect_language_from_stem(path)
        {
            tracing::debug!(language = %stem, "Detected catalog language from file name");
            catalog.set_language(Some(stem));
        }
        catalog.file_path = Some(path.to_path_buf());
        Ok(catalog)
    }

    /// Index an already-parsed document.
    #[must_use]
    pub fn from_document(document: TsDocument) -> Self {
        let mut catalog = Self {
            language: None,
            language_id: None,
            source_language: document.source_language,
            file_path: None,
            plural_rule: PluralRule::Dual,
            contexts: HashMap::new(),
        };
        catalog.set_language(document.language);

        for context in document.contexts {
            let entries = catalog.contexts.entry(context.name.clone()).or_default();
            for message in context.messages {
                let key = MessageKey {
                    source: message.source.clone(),
                    comment: message.comment.clone(),
                };
                let position = entries.messages.len();
                if let Some(previous) = entries.index.insert(key, position) {
                    tracing::warn!(
                        context = %context.name,
                        source = %message.source,
                        previous,
                        "Duplicate message entry, later one wins"
                    );
                }
                entries.messages.push(message);
            }
        }

        catalog
    }

    /// Set the language and derive the parsed identifier and plural rule.
    fn set_language(&mut self, language: Option<String>) {
        self.language_id = language.as_deref().and_then(|raw| {
            let normalized = raw.replace('_', "-");
            match normalized.parse::<LanguageIdentifier>() {
                Ok(id) => Some(id),
                Err(err) => {
                    tracing::warn!(language = %raw, ?err, "Unparseable catalog language");
                    None
                }
            }
        });
        self.plural_rule =
            self.language_id.as_ref().map_or(PluralRule::Dual, PluralRule::for_language);
        self.language = language;
    }

    /// Raw language attribute, e.g. "de_DE".
    #[must_use]
    pub fn language(&self) -> Option<&str> {
        self.language.as_deref()
    }

    /// Parsed language identifier, if the attribute was valid.
    #[must_use]
    pub const fn language_id(&self) -> Option<&LanguageIdentifier> {
        self.language_id.as_ref()
    }

    /// Source language attribute, e.g. "en_US".
    #[must_use]
    pub fn source_language(&self) -> Option<&str> {
        self.source_language.as_deref()
    }

    /// Path the catalog was loaded from.
    #[must_use]
    pub fn file_path(&self) -> Option<&Path> {
        self.file_path.as_deref()
    }

    /// Plural rule of the target language.
    #[must_use]
    pub const fn plural_rule(&self) -> PluralRule {
        self.plural_rule
    }

    /// Context names, in no particular order.
    pub fn contexts(&self) -> impl Iterator<Item = &str> {
        self.contexts.keys().map(String::as_str)
    }

    /// Messages of one context in file order. Empty for unknown contexts.
    #[must_use]
    pub fn messages(&self, context: &str) -> &[TsMessage] {
        self.contexts.get(context).map_or(&[], |entries| entries.messages.as_slice())
    }

    /// The message entry for a key, regardless of status.
    fn entry(&self, context: &str, source: &str, comment: Option<&str>) -> Option<&TsMessage> {
        let entries = self.contexts.get(context)?;
        let key = MessageKey {
            source: source.to_string(),
            comment: comment.map(ToString::to_string),
        };
        entries.index.get(&key).and_then(|&position| entries.messages.get(position))
    }

    /// Finished translation for (context, source), or `None`.
    ///
    /// Unfinished, vanished and empty entries all report `None`. For
    /// numerus messages the singular form is returned; use
    /// [`translate_plural`](Self::translate_plural) for counts.
    #[must_use]
    pub fn lookup(&self, context: &str, source: &str) -> Option<&str> {
        self.lookup_with_comment(context, source, None)
    }

    /// [`lookup`](Self::lookup) with a disambiguation comment.
    ///
    /// Falls back to the comment-less entry when no comment-specific one
    /// exists, mirroring what Qt's translator does.
    #[must_use]
    pub fn lookup_with_comment(
        &self,
        context: &str,
        source: &str,
        comment: Option<&str>,
    ) -> Option<&str> {
        let message = self
            .entry(context, source, comment)
            .filter(|m| m.has_translation())
            .or_else(|| {
                comment
                    .and_then(|_| self.entry(context, source, None))
                    .filter(|m| m.has_translation())
            })?;

        if message.numerus {
            message.numerus_forms.iter().find(|form| !form.is_empty()).map(String::as_str)
        } else {
            Some(message.translation.as_str())
        }
    }

    /// Translation for (context, source), falling back to the source text.
    #[must_use]
    pub fn translate<'a>(&'a self, context: &str, source: &'a str) -> &'a str {
        self.lookup(context, source).unwrap_or(source)
    }

    /// [`translate`](Self::translate) with a disambiguation comment.
    #[must_use]
    pub fn translate_with_comment<'a>(
        &'a self,
        context: &str,
        source: &'a str,
        comment: Option<&str>,
    ) -> &'a str {
        self.lookup_with_comment(context, source, comment).unwrap_or(source)
    }

    /// Plural-aware translation with `%n` substituted by `n`.
    ///
    /// Numerus messages select the form by the catalog language's plural
    /// rule. Non-numerus messages behave like [`translate`](Self::translate).
    /// Missing translations fall back to the source text, still with `%n`
    /// substituted.
    #[must_use]
    pub fn translate_plural(&self, context: &str, source: &str, n: u64) -> String {
        let text = self
            .entry(context, source, None)
            .filter(|m| m.has_translation())
            .map_or(source, |message| {
                if message.numerus {
                    self.select_form(message, n).unwrap_or(source)
                } else {
                    message.translation.as_str()
                }
            });

        substitute_count(text, n)
    }

    /// Chosen numerus form for a count, skipping empty forms.
    fn select_form<'a>(&self, message: &'a TsMessage, n: u64) -> Option<&'a str> {
        let index = self.plural_rule.select(n);
        message
            .numerus_forms
            .get(index)
            .filter(|form| !form.is_empty())
            // Incomplete catalogs may carry fewer forms than the rule wants.
            .or_else(|| message.numerus_forms.iter().rev().find(|form| !form.is_empty()))
            .map(String::as_str)
    }
}

/// Replace `%n` / `%Ln` placeholders with the count.
pub(crate) fn substitute_count(text: &str, n: u64) -> String {
    text.replace("%Ln", &n.to_string()).replace("%n", &n.to_string())
}

/// Language from the file stem, accepted only when it parses as a
/// language identifier (`de.ts`, `en_GB.ts`, not `notes.ts`).
fn detect_language_from_stem(path: &Path) -> Option<String> {
    let stem = path.file_stem()?.to_string_lossy();
    let normalized = stem.replace('_', "-");
    normalized.parse::<LanguageIdentifier>().ok().map(|_| stem.into_owned())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use googletest::prelude::*;
    use rstest::rstest;

    use super::*;
    use crate::syntax::TsContext;
    use crate::test_utils::{
        finished,
        make_catalog,
        with_status,
    };
    use crate::types::MessageStatus;

    fn sample_catalog() -> Catalog {
        make_catalog(
            "de_DE",
            "PdfMaster",
            vec![
                finished("Open file", "Datei öffnen"),
                with_status("Save drawings", "", MessageStatus::Unfinished),
                with_status("old entry", "alter Eintrag", MessageStatus::Vanished),
                with_status("empty but finished", "", MessageStatus::Finished),
            ],
        )
    }

    #[googletest::test]
    fn test_translate_finished() {
        let catalog = sample_catalog();

        expect_that!(catalog.translate("PdfMaster", "Open file"), eq("Datei öffnen"));
        expect_that!(catalog.lookup("PdfMaster", "Open file"), some(eq("Datei öffnen")));
    }

    #[rstest]
    #[case::unfinished("Save drawings")]
    #[case::vanished("old entry")]
    #[case::empty_translation("empty but finished")]
    #[case::unknown_source("never extracted")]
    fn test_translate_falls_back_to_source(#[case] source: &str) {
        let catalog = sample_catalog();

        assert_eq!(catalog.translate("PdfMaster", source), source);
        assert!(catalog.lookup("PdfMaster", source).is_none());
    }

    #[googletest::test]
    fn test_translate_unknown_context_falls_back() {
        let catalog = sample_catalog();

        expect_that!(catalog.translate("PixCache", "Open file"), eq("Open file"));
    }

    #[googletest::test]
    fn test_language_and_plural_rule() {
        let catalog = sample_catalog();

        expect_that!(catalog.language(), some(eq("de_DE")));
        expect_that!(catalog.language_id().map(|id| id.language.as_str()), some(eq("de")));
        expect_that!(catalog.plural_rule(), eq(crate::plural::PluralRule::Dual));
    }

    #[googletest::test]
    fn test_comment_disambiguation() {
        let mut plain = finished("Close", "Schließen");
        plain.comment = None;
        let mut dialog = finished("Close", "Dialog schließen");
        dialog.comment = Some("close the settings dialog".to_string());

        let catalog = make_catalog("de", "SettingsWidget", vec![plain, dialog]);

        expect_that!(
            catalog.translate_with_comment(
                "SettingsWidget",
                "Close",
                Some("close the settings dialog")
            ),
            eq("Dialog schließen")
        );
        expect_that!(
            catalog.translate_with_comment("SettingsWidget", "Close", None),
            eq("Schließen")
        );
        // Unknown comment falls back to the comment-less entry
        expect_that!(
            catalog.translate_with_comment("SettingsWidget", "Close", Some("other")),
            eq("Schließen")
        );
    }

    #[googletest::test]
    fn test_translate_plural_dual() {
        let mut message = finished("%n file(s)", "");
        message.numerus = true;
        message.numerus_forms = vec!["%n Datei".to_string(), "%n Dateien".to_string()];

        let catalog = make_catalog("de_DE", "Master", vec![message]);

        expect_that!(catalog.translate_plural("Master", "%n file(s)", 1), eq("1 Datei"));
        expect_that!(catalog.translate_plural("Master", "%n file(s)", 5), eq("5 Dateien"));
        expect_that!(catalog.translate_plural("Master", "%n file(s)", 0), eq("0 Dateien"));
    }

    #[googletest::test]
    fn test_translate_plural_polish_three_forms() {
        let mut message = finished("%n page(s)", "");
        message.numerus = true;
        message.numerus_forms =
            vec!["%n strona".to_string(), "%n strony".to_string(), "%n stron".to_string()];

        let catalog = make_catalog("pl", "Tool", vec![message]);

        expect_that!(catalog.translate_plural("Tool", "%n page(s)", 1), eq("1 strona"));
        expect_that!(catalog.translate_plural("Tool", "%n page(s)", 3), eq("3 strony"));
        expect_that!(catalog.translate_plural("Tool", "%n page(s)", 12), eq("12 stron"));
    }

    #[googletest::test]
    fn test_translate_plural_missing_substitutes_source() {
        let catalog = sample_catalog();

        expect_that!(
            catalog.translate_plural("PdfMaster", "%n page(s) loaded", 3),
            eq("3 page(s) loaded")
        );
    }

    #[googletest::test]
    fn test_translate_plural_non_numerus_message() {
        let catalog =
            make_catalog("de", "SlideNumberWidget", vec![finished("page %n", "Seite %n")]);

        expect_that!(catalog.translate_plural("SlideNumberWidget", "page %n", 7), eq("Seite 7"));
    }

    #[googletest::test]
    fn test_translate_plural_skips_empty_form() {
        let mut message = finished("%n minute(s)", "");
        message.numerus = true;
        message.numerus_forms = vec![String::new(), "%n Minuten".to_string()];

        let catalog = make_catalog("de", "TimerWidget", vec![message]);

        expect_that!(catalog.translate_plural("TimerWidget", "%n minute(s)", 1), eq("1 Minuten"));
    }

    #[googletest::test]
    fn test_lookup_numerus_returns_first_form() {
        let mut message = finished("%n file(s)", "");
        message.numerus = true;
        message.numerus_forms = vec!["%n Datei".to_string(), "%n Dateien".to_string()];

        let catalog = make_catalog("de", "Master", vec![message]);

        expect_that!(catalog.lookup("Master", "%n file(s)"), some(eq("%n Datei")));
    }

    #[googletest::test]
    fn test_duplicate_entry_later_wins() {
        let catalog = make_catalog(
            "de",
            "Tool",
            vec![finished("pen", "Stift (alt)"), finished("pen", "Stift")],
        );

        expect_that!(catalog.translate("Tool", "pen"), eq("Stift"));
    }

    #[googletest::test]
    fn test_from_document_merges_repeated_contexts() {
        let document = TsDocument {
            version: "2.1".to_string(),
            language: Some("it".to_string()),
            source_language: None,
            contexts: vec![
                TsContext {
                    name: "Tool".to_string(),
                    messages: vec![finished("pen", "penna")],
                },
                TsContext {
                    name: "Tool".to_string(),
                    messages: vec![finished("eraser", "gomma")],
                },
            ],
        };

        let catalog = Catalog::from_document(document);

        expect_that!(catalog.translate("Tool", "pen"), eq("penna"));
        expect_that!(catalog.translate("Tool", "eraser"), eq("gomma"));
        expect_that!(catalog.messages("Tool").len(), eq(2));
    }

    #[googletest::test]
    fn test_unparseable_language_keeps_raw_string() {
        let catalog = make_catalog("not a language!", "Tool", vec![]);

        expect_that!(catalog.language(), some(eq("not a language!")));
        expect_that!(catalog.language_id(), none());
        expect_that!(catalog.plural_rule(), eq(crate::plural::PluralRule::Dual));
    }

    mod load {
        use std::fs;

        use tempfile::TempDir;

        use super::*;

        const MINIMAL: &str = r#"<TS version="2.1" language="it">
<context>
    <name>Clock</name>
    <message><source>paused</source><translation>in pausa</translation></message>
</context>
</TS>"#;

        #[googletest::test]
        fn test_load_reads_and_indexes() {
            let temp_dir = TempDir::new().unwrap();
            let path = temp_dir.path().join("it.ts");
            fs::write(&path, MINIMAL).unwrap();

            let catalog = Catalog::load(&path).unwrap();

            expect_that!(catalog.language(), some(eq("it")));
            expect_that!(catalog.translate("Clock", "paused"), eq("in pausa"));
            expect_that!(catalog.file_path(), some(eq(path.as_path())));
        }

        #[googletest::test]
        fn test_load_language_from_file_stem() {
            let temp_dir = TempDir::new().unwrap();
            let path = temp_dir.path().join("en_GB.ts");
            let without_language = MINIMAL.replace(r#" language="it""#, "");
            fs::write(&path, without_language).unwrap();

            let catalog = Catalog::load(&path).unwrap();

            expect_that!(catalog.language(), some(eq("en_GB")));
            expect_that!(catalog.language_id().map(|id| id.language.as_str()), some(eq("en")));
        }

        #[googletest::test]
        fn test_load_missing_file_is_io_error() {
            let temp_dir = TempDir::new().unwrap();

            let result = Catalog::load(&temp_dir.path().join("missing.ts"));

            assert_that!(result, err(pat!(CatalogError::Io { .. })));
        }

        #[googletest::test]
        fn test_load_malformed_file_is_syntax_error() {
            let temp_dir = TempDir::new().unwrap();
            let path = temp_dir.path().join("broken.ts");
            fs::write(&path, "<html>nope</html>").unwrap();

            let result = Catalog::load(&path);

            assert_that!(result, err(pat!(CatalogError::Syntax { .. })));
        }
    }

    #[rstest]
    #[case::simple("de.ts", Some("de"))]
    #[case::with_region("en_GB.ts", Some("en_GB"))]
    #[case::hyphenated("pt-BR.ts", Some("pt-BR"))]
    #[case::not_a_language("notes.ts", None)]
    fn test_detect_language_from_stem(#[case] name: &str, #[case] expected: Option<&str>) {
        let result = detect_language_from_stem(Path::new(name));

        assert_eq!(result.as_deref(), expected);
    }
}
