//! Multi-locale catalog store with fallback resolution.
//!
//! Holds one [`Catalog`] per target language, an active locale that can be
//! switched at runtime, and a fallback chain consulted when the active
//! catalog has no finished translation. The final fallback is always the
//! source text itself.

use std::collections::HashMap;
use std::path::PathBuf;

use thiserror::Error;
use unic_langid::LanguageIdentifier;

use crate::catalog::Catalog;

/// Errors raised when populating a store.
#[derive(Error, Debug)]
pub enum StoreError {
    /// The catalog has no language attribute and none was detectable.
    #[error("catalog {path:?} has no resolvable language")]
    MissingLanguage {
        /// File the catalog came from, when known.
        path: Option<PathBuf>,
    },
}

/// Collection of catalogs keyed by language, with an active locale.
#[derive(Debug, Clone, Default)]
pub struct CatalogStore {
    /// Loaded catalogs keyed by their parsed language.
    catalogs: HashMap<LanguageIdentifier, Catalog>,
    /// Locale used first by lookups.
    active: Option<LanguageIdentifier>,
    /// Locales consulted when the active catalog misses, in order.
    fallback: Vec<LanguageIdentifier>,
}

impl CatalogStore {
    /// An empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a catalog, keyed by its language. A later catalog for the same
    /// language replaces the earlier one.
    ///
    /// # Errors
    /// [`StoreError::MissingLanguage`] when the catalog's language could
    /// not be parsed.
    pub fn insert(&mut self, catalog: Catalog) -> Result<(), StoreError> {
        let Some(language) = catalog.language_id().cloned() else {
            return Err(StoreError::MissingLanguage {
                path: catalog.file_path().map(PathBuf::from),
            });
        };

        if self.catalogs.insert(language.clone(), catalog).is_some() {
            tracing::warn!(locale = %language, "Replacing already-loaded catalog");
        }
        Ok(())
    }

    /// Loaded locales, sorted for deterministic output.
    #[must_use]
    pub fn available_locales(&self) -> Vec<&LanguageIdentifier> {
        let mut locales: Vec<_> = self.catalogs.keys().collect();
        locales.sort_by_key(|locale| locale.to_string());
        locales
    }

    /// Catalog for an exact locale key.
    #[must_use]
    pub fn catalog_for(&self, locale: &LanguageIdentifier) -> Option<&Catalog> {
        self.catalogs.get(locale)
    }

    /// Iterate all loaded catalogs.
    pub fn catalogs(&self) -> impl Iterator<Item = &Catalog> {
        self.catalogs.values()
    }

    /// Currently active locale.
    #[must_use]
    pub const fn active_locale(&self) -> Option<&LanguageIdentifier> {
        self.active.as_ref()
    }

    /// Locales consulted after the active one.
    pub fn set_fallback_chain(&mut self, chain: Vec<LanguageIdentifier>) {
        self.fallback = chain;
    }

    /// Switch the active locale to the best match for `requested`.
    ///
    /// Returns the locale actually activated, or `None` (leaving the
    /// active locale unchanged) when nothing matches.
    pub fn set_active_locale(
        &mut self,
        requested: &LanguageIdentifier,
    ) -> Option<LanguageIdentifier> {
        let resolved = self.resolve_locale(requested)?.clone();
        tracing::debug!(requested = %requested, resolved = %resolved, "Switching active locale");
        self.active = Some(resolved.clone());
        Some(resolved)
    }

    /// [`set_active_locale`](Self::set_active_locale) from the OS locale.
    pub fn set_active_from_system(&mut self) -> Option<LanguageIdentifier> {
        let locale = sys_locale::get_locale()?;
        let requested = locale.parse::<LanguageIdentifier>().ok()?;
        self.set_active_locale(&requested)
    }

    /// Best available locale for a request: exact key, then wildcard
    /// match on missing subtags, then same primary language.
    #[must_use]
    pub fn resolve_locale(&self, requested: &LanguageIdentifier) -> Option<&LanguageIdentifier> {
        if let Some((exact, _)) = self.catalogs.get_key_value(requested) {
            return Some(exact);
        }

        let available = self.available_locales();
        if let Some(wildcard) = available
            .iter()
            .copied()
            .find(|candidate| candidate.matches(requested, true, true))
        {
            return Some(wildcard);
        }

        available
            .into_iter()
            .find(|candidate| candidate.language == requested.language)
    }

    /// Translation for (context, source) through the fallback chain,
    /// ending at the source text.
    #[must_use]
    pub fn translate<'a>(&'a self, context: &str, source: &'a str) -> &'a str {
        self.chain()
            .find_map(|catalog| catalog.lookup(context, source))
            .unwrap_or(source)
    }

    /// Plural-aware translation through the fallback chain.
    #[must_use]
    pub fn translate_plural(&self, context: &str, source: &str, n: u64) -> String {
        for catalog in self.chain() {
            if catalog.lookup(context, source).is_some() {
                return catalog.translate_plural(context, source, n);
            }
        }
        crate::catalog::substitute_count(source, n)
    }

    /// Active catalog followed by resolved fallback catalogs.
    fn chain(&self) -> impl Iterator<Item = &Catalog> {
        self.active
            .iter()
            .chain(self.fallback.iter())
            .filter_map(|locale| {
                self.resolve_locale(locale).and_then(|resolved| self.catalogs.get(resolved))
            })
    }
}
