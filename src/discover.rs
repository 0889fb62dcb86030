//! Discovery and parallel loading of catalog files.
//!
//! Walks a scan root for `.ts` files matching the configured pattern,
//! loads them on worker threads and assembles a [`CatalogStore`] with the
//! configured (or system) locale activated.

use std::path::{
    Path,
    PathBuf,
};
use std::sync::Mutex;

use globset::{
    Glob,
    GlobSet,
    GlobSetBuilder,
};
use ignore::WalkBuilder;
use thiserror::Error;
use unic_langid::LanguageIdentifier;

use crate::catalog::Catalog;
use crate::config::CatalogSettings;
use crate::store::CatalogStore;

/// Errors raised while scanning for catalog files.
#[derive(Error, Debug)]
pub enum DiscoverError {
    /// A glob pattern could not be compiled.
    #[error("invalid pattern: {0}")]
    Pattern(String),
}

/// Scan `root` and build a store from every loadable catalog.
///
/// Unreadable or malformed files are logged and skipped; a broken catalog
/// must not take down the application that ships it.
///
/// # Errors
/// [`DiscoverError::Pattern`] when a configured glob cannot be compiled.
pub fn discover_catalogs(
    root: &Path,
    settings: &CatalogSettings,
) -> Result<CatalogStore, DiscoverError> {
    let files = find_catalog_files(root, settings)?;
    tracing::debug!(count = files.len(), root = %root.display(), "Discovered catalog files");

    let mut store = CatalogStore::new();
    for catalog in load_catalogs_parallel(&files, thread_count(settings)) {
        if let Err(err) = store.insert(catalog) {
            tracing::warn!(%err, "Skipping catalog without language");
        }
    }

    store.set_fallback_chain(
        settings.fallback_locales.iter().filter_map(|raw| parse_locale(raw)).collect(),
    );
    if let Some(raw) = &settings.default_locale {
        if let Some(requested) = parse_locale(raw) {
            let _ = store.set_active_locale(&requested);
        }
    } else {
        let _ = store.set_active_from_system();
    }

    Ok(store)
}

/// Parse a settings locale string, warning on failure.
fn parse_locale(raw: &str) -> Option<LanguageIdentifier> {
    match raw.replace('_', "-").parse::<LanguageIdentifier>() {
        Ok(locale) => Some(locale),
        Err(err) => {
            tracing::warn!(locale = %raw, ?err, "Ignoring unparseable locale in settings");
            None
        }
    }
}

/// Find catalog files under the scan root.
fn find_catalog_files(
    root: &Path,
    settings: &CatalogSettings,
) -> Result<Vec<PathBuf>, DiscoverError> {
    let include_set = build_glob_set(std::slice::from_ref(&settings.catalog_pattern))?;
    let exclude_set = build_glob_set(&settings.exclude_patterns)?;

    let mut found_files = Vec::new();
    for result in WalkBuilder::new(root)
        .hidden(false)
        .git_ignore(true)
        .git_global(true)
        .git_exclude(true)
        .follow_links(false)
        .build()
    {
        let entry = match result {
            Ok(entry) => entry,
            Err(err) => {
                tracing::debug!(?err, "Failed to read directory entry");
                continue;
            }
        };

        if !entry.file_type().is_some_and(|ft| ft.is_file()) {
            continue;
        }

        let path = entry.path();
        let Ok(relative_path) = path.strip_prefix(root) else {
            continue;
        };
        if !include_set.is_match(relative_path) || exclude_set.is_match(relative_path) {
            continue;
        }

        found_files.push(path.to_path_buf());
    }

    found_files.sort();
    Ok(found_files)
}

/// Compile a list of globs into one matcher.
fn build_glob_set(patterns: &[String]) -> Result<GlobSet, DiscoverError> {
    let mut builder = GlobSetBuilder::new();
    for pattern in patterns {
        let glob = Glob::new(pattern)
            .map_err(|e| DiscoverError::Pattern(format!("Invalid pattern '{pattern}': {e}")))?;
        builder.add(glob);
    }
    builder
        .build()
        .map_err(|e| DiscoverError::Pattern(format!("Failed to build pattern set: {e}")))
}

/// Load catalogs on worker threads, skipping files that fail to load.
fn load_catalogs_parallel(files: &[PathBuf], threads: usize) -> Vec<Catalog> {
    if files.is_empty() {
        return Vec::new();
    }

    let results = Mutex::new(Vec::with_capacity(files.len()));
    let chunk_size = files.len().div_ceil(threads).max(1);

    std::thread::scope(|scope| {
        let results = &results;
        for chunk in files.chunks(chunk_size) {
            scope.spawn(move || {
                for path in chunk {
                    match Catalog::load(path) {
                        Ok(catalog) => {
                            let mut guard = results
                                .lock()
                                .unwrap_or_else(std::sync::PoisonError::into_inner);
                            guard.push(catalog);
                        }
                        Err(err) => {
                            tracing::warn!(path = %path.display(), %err, "Skipping catalog");
                        }
                    }
                }
            });
        }
    });

    results.into_inner().unwrap_or_else(std::sync::PoisonError::into_inner)
}

/// Worker thread count: configured value, or 80% of CPU cores (minimum 1).
fn thread_count(settings: &CatalogSettings) -> usize {
    settings.indexing.num_threads.unwrap_or_else(|| (num_cpus::get() * 4 / 5).max(1)).max(1)
}
