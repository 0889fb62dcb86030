//! Catalog completeness reporting.
//!
//! Mirrors the summary a release tool prints for a catalog: how many
//! messages have usable translations, per context and overall.

use serde::Serialize;

use crate::catalog::Catalog;
use crate::types::MessageStatus;

/// Completeness summary of one catalog.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogStats {
    /// Catalog language, when known.
    pub language: Option<String>,
    /// File the catalog was loaded from, when known.
    pub file: Option<String>,
    /// All messages, including vanished ones.
    pub total: usize,
    /// Messages with a usable translation.
    pub finished: usize,
    /// Messages still waiting for a translation.
    pub unfinished: usize,
    /// Messages no longer referenced by the UI.
    pub vanished: usize,
    /// `finished` as a percentage of the translatable messages
    /// (vanished entries excluded). 100 for an empty catalog.
    pub percent_finished: usize,
    /// Per-context breakdown, sorted by context name.
    pub contexts: Vec<ContextStats>,
}

/// Completeness summary of one context.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ContextStats {
    /// Context name.
    pub name: String,
    /// Messages with a usable translation.
    pub finished: usize,
    /// Messages still waiting for a translation.
    pub unfinished: usize,
    /// Messages no longer referenced by the UI.
    pub vanished: usize,
}

/// One entry reported by a completeness check.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct IncompleteEntry {
    /// Context the entry belongs to.
    pub context: String,
    /// Source string of the entry.
    pub source: String,
    /// Why the entry is reported.
    pub status: MessageStatus,
}

/// Compute the completeness summary for a catalog.
#[must_use]
pub fn catalog_stats(catalog: &Catalog) -> CatalogStats {
    let mut contexts = Vec::new();
    let mut names: Vec<&str> = catalog.contexts().collect();
    names.sort_unstable();

    for name in names {
        let mut stats = ContextStats {
            name: name.to_string(),
            finished: 0,
            unfinished: 0,
            vanished: 0,
        };
        for message in catalog.messages(name) {
            if message.status == MessageStatus::Vanished {
                stats.vanished += 1;
            } else if message.has_translation() {
                stats.finished += 1;
            } else {
                stats.unfinished += 1;
            }
        }
        contexts.push(stats);
    }

    let finished: usize = contexts.iter().map(|c| c.finished).sum();
    let unfinished: usize = contexts.iter().map(|c| c.unfinished).sum();
    let vanished: usize = contexts.iter().map(|c| c.vanished).sum();
    let translatable = finished + unfinished;
    let percent_finished =
        if translatable == 0 { 100 } else { finished * 100 / translatable };

    CatalogStats {
        language: catalog.language().map(ToString::to_string),
        file: catalog.file_path().map(|p| p.display().to_string()),
        total: finished + unfinished + vanished,
        finished,
        unfinished,
        vanished,
        percent_finished,
        contexts,
    }
}

/// Entries a completeness check should report: unfinished and vanished
/// messages, in context order.
#[must_use]
pub fn incomplete_entries(catalog: &Catalog) -> Vec<IncompleteEntry> {
    let mut names: Vec<&str> = catalog.contexts().collect();
    names.sort_unstable();

    let mut entries = Vec::new();
    for name in names {
        for message in catalog.messages(name) {
            let status = if message.status == MessageStatus::Vanished {
                MessageStatus::Vanished
            } else if message.has_translation() {
                continue;
            } else {
                MessageStatus::Unfinished
            };
            entries.push(IncompleteEntry {
                context: name.to_string(),
                source: message.source.clone(),
                status,
            });
        }
    }
    entries
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use googletest::prelude::*;

    use super::*;
    use crate::catalog::Catalog;
    use crate::syntax::{
        TsContext,
        TsDocument,
    };
    use crate::test_utils::{
        finished,
        make_catalog,
        with_status,
    };

    fn sample_catalog() -> Catalog {
        Catalog::from_document(TsDocument {
            version: "2.1".to_string(),
            language: Some("de_DE".to_string()),
            source_language: None,
            contexts: vec![
                TsContext {
                    name: "Tool".to_string(),
                    messages: vec![
                        finished("pen", "Stift"),
                        finished("eraser", "Radierer"),
                        with_status("highlighter", "", crate::types::MessageStatus::Unfinished),
                    ],
                },
                TsContext {
                    name: "Master".to_string(),
                    messages: vec![
                        finished("Open file", "Datei öffnen"),
                        with_status("old", "alt", crate::types::MessageStatus::Vanished),
                    ],
                },
            ],
        })
    }

    #[googletest::test]
    fn test_catalog_stats_counts() {
        let stats = catalog_stats(&sample_catalog());

        expect_that!(stats.language, some(eq("de_DE")));
        expect_that!(stats.total, eq(5));
        expect_that!(stats.finished, eq(3));
        expect_that!(stats.unfinished, eq(1));
        expect_that!(stats.vanished, eq(1));
        expect_that!(stats.percent_finished, eq(75));
    }

    #[googletest::test]
    fn test_catalog_stats_contexts_sorted() {
        let stats = catalog_stats(&sample_catalog());

        expect_that!(
            stats.contexts,
            elements_are![
                eq(ContextStats {
                    name: "Master".to_string(),
                    finished: 1,
                    unfinished: 0,
                    vanished: 1,
                }),
                eq(ContextStats {
                    name: "Tool".to_string(),
                    finished: 2,
                    unfinished: 1,
                    vanished: 0,
                }),
            ]
        );
    }

    #[googletest::test]
    fn test_empty_catalog_is_complete() {
        let stats = catalog_stats(&make_catalog("it", "Clock", vec![]));

        expect_that!(stats.total, eq(0));
        expect_that!(stats.percent_finished, eq(100));
    }

    #[googletest::test]
    fn test_finished_but_empty_counts_as_unfinished() {
        let catalog = make_catalog(
            "it",
            "Clock",
            vec![with_status("paused", "", crate::types::MessageStatus::Finished)],
        );

        let stats = catalog_stats(&catalog);

        expect_that!(stats.finished, eq(0));
        expect_that!(stats.unfinished, eq(1));
    }

    #[googletest::test]
    fn test_incomplete_entries() {
        let entries = incomplete_entries(&sample_catalog());

        expect_that!(
            entries,
            elements_are![
                eq(IncompleteEntry {
                    context: "Master".to_string(),
                    source: "old".to_string(),
                    status: crate::types::MessageStatus::Vanished,
                }),
                eq(IncompleteEntry {
                    context: "Tool".to_string(),
                    source: "highlighter".to_string(),
                    status: crate::types::MessageStatus::Unfinished,
                }),
            ]
        );
    }

    #[googletest::test]
    fn test_stats_serialize_camel_case() {
        let stats = catalog_stats(&sample_catalog());

        let json = serde_json::to_value(&stats).unwrap();

        expect_that!(json["percentFinished"].as_u64(), some(eq(75)));
        expect_that!(json["contexts"][0]["name"].as_str(), some(eq("Master")));
    }
}
