//! Translation loading and the process-wide translation cache.
//!
//! A [`TranslationSource`] knows how to produce a translation for a key; the
//! [`TranslationStore`] keeps at most one loaded copy per key for the life of
//! the process. Two requests missing the cache at the same time both load and
//! the last insert wins; the copies are equal, so nothing is torn.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, PoisonError, RwLock};

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info};

use crate::models::{Translation, TranslationBook};
use crate::registry::Registry;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),
    #[error("translation '{0}' not found")]
    UnknownTranslation(String),
    #[error("corrupt translation data: {0}")]
    Corrupt(String),
}

/// Where translations come from
pub trait TranslationSource: Send + Sync {
    /// Keys this source can load, sorted
    fn available(&self) -> Result<Vec<String>, StoreError>;

    /// Load one translation. Unknown keys fail with `UnknownTranslation`.
    fn load(&self, key: &str) -> Result<Translation, StoreError>;
}

/// Translation keys double as file names, so only a safe alphabet is allowed.
pub fn is_valid_key(key: &str) -> bool {
    !key.is_empty()
        && key.len() <= 64
        && key
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || b == b'-' || b == b'_')
}

/// One book of the JSON interchange format
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonBook {
    #[serde(alias = "code")]
    pub abbrev: String,
    pub name: String,
    pub chapters: Vec<Vec<String>>,
}

/// Parse a translation from the JSON interchange format (an array of books).
/// A leading byte-order mark is ignored.
pub fn parse_translation_json(key: &str, content: &str) -> Result<Translation, StoreError> {
    let content = content.strip_prefix('\u{feff}').unwrap_or(content);
    let books: Vec<JsonBook> = serde_json::from_str(content)?;
    Ok(Translation {
        key: key.to_string(),
        books: books
            .into_iter()
            .map(|b| TranslationBook {
                code: b.abbrev,
                name: b.name,
                chapters: b.chapters,
            })
            .collect(),
    })
}

/// Serialize a translation to the JSON interchange format.
pub fn translation_to_json(translation: &Translation) -> Result<String, StoreError> {
    let books: Vec<JsonBook> = translation
        .books
        .iter()
        .map(|b| JsonBook {
            abbrev: b.code.clone(),
            name: b.name.clone(),
            chapters: b.chapters.clone(),
        })
        .collect();
    Ok(serde_json::to_string(&books)?)
}

/// A directory of `<key>.json` files
#[derive(Debug, Clone)]
pub struct JsonDirSource {
    dir: PathBuf,
}

impl JsonDirSource {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

impl TranslationSource for JsonDirSource {
    fn available(&self) -> Result<Vec<String>, StoreError> {
        let mut keys = Vec::new();
        for entry in fs::read_dir(&self.dir)? {
            let path = entry?.path();
            if path.extension().and_then(|e| e.to_str()) != Some("json") {
                continue;
            }
            if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                if is_valid_key(stem) {
                    keys.push(stem.to_string());
                }
            }
        }
        keys.sort();
        Ok(keys)
    }

    fn load(&self, key: &str) -> Result<Translation, StoreError> {
        if !is_valid_key(key) {
            return Err(StoreError::UnknownTranslation(key.to_string()));
        }
        let path = self.dir.join(format!("{}.json", key));
        let content = match fs::read_to_string(&path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(StoreError::UnknownTranslation(key.to_string()));
            }
            Err(e) => return Err(e.into()),
        };
        debug!(path = %path.display(), "reading translation file");
        parse_translation_json(key, &content)
    }
}

/// Translations held in memory; used for fixtures and tests
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    translations: HashMap<String, Translation>,
}

impl MemorySource {
    pub fn new(translations: impl IntoIterator<Item = Translation>) -> Self {
        Self {
            translations: translations
                .into_iter()
                .map(|t| (t.key.clone(), t))
                .collect(),
        }
    }
}

impl TranslationSource for MemorySource {
    fn available(&self) -> Result<Vec<String>, StoreError> {
        let mut keys: Vec<String> = self.translations.keys().cloned().collect();
        keys.sort();
        Ok(keys)
    }

    fn load(&self, key: &str) -> Result<Translation, StoreError> {
        self.translations
            .get(key)
            .cloned()
            .ok_or_else(|| StoreError::UnknownTranslation(key.to_string()))
    }
}

/// Rewrite book codes the registry knows under another alias (for example
/// `jó` or `atos`) to their canonical code, so code lookups and cross-book
/// pagination line up with the registry.
pub fn canonicalize_codes(translation: &mut Translation, registry: &Registry) {
    for book in &mut translation.books {
        if let Some(canonical) = registry.by_code(&book.code) {
            book.code = canonical.code.clone();
            continue;
        }
        let resolved = registry
            .resolve(&book.code)
            .or_else(|| registry.resolve(&book.name));
        if let Some(canonical) = resolved {
            debug!(from = %book.code, to = %canonical.code, "canonicalized book code");
            book.code = canonical.code.clone();
        }
    }
}

/// Loads translations on first use and keeps them for the process lifetime.
pub struct TranslationStore {
    source: Box<dyn TranslationSource>,
    registry: Arc<Registry>,
    cache: RwLock<HashMap<String, Arc<Translation>>>,
}

impl TranslationStore {
    pub fn new(source: impl TranslationSource + 'static, registry: Arc<Registry>) -> Self {
        Self {
            source: Box::new(source),
            registry,
            cache: RwLock::new(HashMap::new()),
        }
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    pub fn available(&self) -> Result<Vec<String>, StoreError> {
        self.source.available()
    }

    pub fn is_cached(&self, key: &str) -> bool {
        self.cache
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .contains_key(key)
    }

    /// Get a translation, loading it on a cache miss.
    pub fn get(&self, key: &str) -> Result<Arc<Translation>, StoreError> {
        let key = key.trim();
        if let Some(hit) = self
            .cache
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(key)
        {
            return Ok(Arc::clone(hit));
        }

        debug!(translation = %key, "translation cache miss");
        let mut translation = self.source.load(key)?;
        canonicalize_codes(&mut translation, &self.registry);
        translation.check_dense().map_err(StoreError::Corrupt)?;

        let stats = translation.stats();
        info!(
            translation = %key,
            books = stats.book_count,
            chapters = stats.chapter_count,
            verses = stats.verse_count,
            "loaded translation"
        );

        let translation = Arc::new(translation);
        self.cache
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(key.to_string(), Arc::clone(&translation));
        Ok(translation)
    }

    /// Load several translations in parallel to warm the cache.
    pub fn preload(&self, keys: &[String]) -> Result<(), StoreError> {
        keys.par_iter().try_for_each(|key| self.get(key).map(|_| ()))
    }
}
