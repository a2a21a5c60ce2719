//! Reading operations as the HTTP and command-line layers call them.
//!
//! Every method takes its inputs as strings, exactly as they arrive from a
//! URL or an argument list, and returns plain records.

use std::sync::Arc;

use thiserror::Error;

use crate::config::ReaderConfig;
use crate::db::SqliteSource;
use crate::error::{ErrorKind, LookupError};
use crate::locate::{find_chapter, locate_book};
use crate::models::{
    chapter_reference, BookSummary, CanonicalBook, ChapterRangeView, ChapterView, PassageView,
    Resolution, SearchResults, Translation, TranslationBook, TranslationStats,
};
use crate::pagination::{reading_pagination, verse_pagination};
use crate::passage::{chapter_range, parse_number, parse_optional_number, select_verses, verse_range};
use crate::registry::Registry;
use crate::search::{parse_limit, search_verses, DEFAULT_SEARCH_LIMIT};
use crate::store::{JsonDirSource, StoreError, TranslationStore};

#[derive(Error, Debug)]
pub enum ReaderError {
    #[error(transparent)]
    Lookup(#[from] LookupError),
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl ReaderError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ReaderError::Lookup(e) => e.kind(),
            ReaderError::Store(StoreError::UnknownTranslation(_)) => ErrorKind::NotFound,
            ReaderError::Store(_) => ErrorKind::Internal,
        }
    }
}

pub struct Reader {
    store: TranslationStore,
    search_limit: usize,
    max_search_limit: usize,
}

impl Reader {
    pub fn new(store: TranslationStore) -> Self {
        Self {
            store,
            search_limit: DEFAULT_SEARCH_LIMIT,
            max_search_limit: 100,
        }
    }

    /// Build a reader over the source the configuration names: the SQLite
    /// database when set, the JSON directory otherwise.
    pub fn from_config(config: &ReaderConfig, registry: Arc<Registry>) -> Self {
        let store = match &config.database {
            Some(db) => TranslationStore::new(SqliteSource::new(db), registry),
            None => TranslationStore::new(JsonDirSource::new(&config.data_dir), registry),
        };
        Self::new(store).with_search_limits(config.search_limit, config.max_search_limit)
    }

    pub fn with_search_limits(mut self, default: usize, max: usize) -> Self {
        self.search_limit = default;
        self.max_search_limit = max;
        self
    }

    pub fn registry(&self) -> &Registry {
        self.store.registry()
    }

    pub fn store(&self) -> &TranslationStore {
        &self.store
    }

    pub fn translations(&self) -> Result<Vec<String>, ReaderError> {
        Ok(self.store.available()?)
    }

    pub fn stats(&self, key: &str) -> Result<TranslationStats, ReaderError> {
        Ok(self.store.get(key)?.stats())
    }

    pub fn books(&self, key: &str) -> Result<Vec<BookSummary>, ReaderError> {
        let translation = self.store.get(key)?;
        Ok(translation
            .books
            .iter()
            .map(|b| self.summary(b))
            .collect())
    }

    pub fn book(&self, key: &str, token: &str) -> Result<BookSummary, ReaderError> {
        let translation = self.store.get(key)?;
        let found = locate_book(self.registry(), &translation, token)?;
        Ok(self.summary(found.book))
    }

    /// Resolve a token and report which strategy matched
    pub fn resolve(&self, key: &str, token: &str) -> Result<Resolution, ReaderError> {
        let translation = self.store.get(key)?;
        let found = locate_book(self.registry(), &translation, token)?;
        Ok(Resolution {
            token: token.to_string(),
            normalized: self.registry().aliases().normalize(token),
            strategy: found.strategy.to_string(),
            book: self.summary(found.book),
        })
    }

    /// One chapter with pagination that continues into neighbouring books.
    pub fn chapter(&self, key: &str, token: &str, chapter: &str) -> Result<ChapterView, ReaderError> {
        self.chapter_slice(key, token, chapter, None, None)
    }

    /// Like [`Reader::chapter`], narrowed to verses `from..=to`. The
    /// pagination still refers to whole chapters.
    pub fn chapter_slice(
        &self,
        key: &str,
        token: &str,
        chapter: &str,
        from: Option<&str>,
        to: Option<&str>,
    ) -> Result<ChapterView, ReaderError> {
        let translation = self.store.get(key)?;
        let book = locate_book(self.registry(), &translation, token)?.book;
        let number = parse_number(chapter, "chapter")?;
        let verses = find_chapter(book, number)?;

        let from = parse_optional_number(from, "from")?;
        let to = parse_optional_number(to, "to")?;
        let records = verse_range(verses, from, to)?;
        let pagination = reading_pagination(self.registry(), &translation, book, number)?;

        Ok(ChapterView {
            translation: translation.key.clone(),
            book_code: book.code.clone(),
            book_name: book.name.clone(),
            chapter: number,
            reference: chapter_reference(&book.name, number),
            verse_count: verses.len() as u32,
            verses: records,
            pagination,
        })
    }

    /// Chapters `from..=to` of a book; both default to the book's bounds.
    pub fn chapters(
        &self,
        key: &str,
        token: &str,
        from: Option<&str>,
        to: Option<&str>,
    ) -> Result<ChapterRangeView, ReaderError> {
        let translation = self.store.get(key)?;
        let book = locate_book(self.registry(), &translation, token)?.book;
        let from = parse_optional_number(from, "from")?.unwrap_or(1);
        let to = parse_optional_number(to, "to")?.unwrap_or(book.chapters.len() as u32);
        let chapters = chapter_range(book, from, to)?;

        Ok(ChapterRangeView {
            translation: translation.key.clone(),
            book_code: book.code.clone(),
            book_name: book.name.clone(),
            from,
            to,
            chapters,
        })
    }

    /// Verses selected by a range expression. A single verse also carries
    /// verse pagination.
    pub fn passage(
        &self,
        key: &str,
        token: &str,
        chapter: &str,
        expr: &str,
    ) -> Result<PassageView, ReaderError> {
        let translation = self.store.get(key)?;
        let book = locate_book(self.registry(), &translation, token)?.book;
        let number = parse_number(chapter, "chapter")?;
        let (selection, verses) = select_verses(book, number, expr)?;

        let pagination = match selection.single() {
            Some(verse) => Some(verse_pagination(book, number, verse)?),
            None => None,
        };

        Ok(PassageView {
            translation: translation.key.clone(),
            book_code: book.code.clone(),
            book_name: book.name.clone(),
            chapter: number,
            selection: selection.to_string(),
            reference: format!("{} {}:{}", book.name, number, selection),
            verses,
            pagination,
        })
    }

    pub fn search(
        &self,
        key: &str,
        query: &str,
        limit: Option<&str>,
    ) -> Result<SearchResults, ReaderError> {
        let limit = parse_limit(limit, self.search_limit, self.max_search_limit)?;
        let translation = self.store.get(key)?;
        let results = search_verses(&translation, query, limit)?;

        Ok(SearchResults {
            translation: translation.key.clone(),
            query: query.trim().to_string(),
            limit,
            results,
        })
    }

    /// Canonical books whose code, names or abbreviations start with `prefix`
    pub fn suggest(&self, prefix: &str) -> Vec<CanonicalBook> {
        let registry = self.registry();
        registry
            .aliases()
            .search(prefix)
            .iter()
            .filter_map(|name| registry.books().iter().find(|b| &b.name_en == name))
            .cloned()
            .collect()
    }

    /// Get a loaded translation directly
    pub fn translation(&self, key: &str) -> Result<Arc<Translation>, ReaderError> {
        Ok(self.store.get(key)?)
    }

    fn summary(&self, book: &TranslationBook) -> BookSummary {
        BookSummary {
            code: book.code.clone(),
            name: book.name.clone(),
            name_en: self.registry().by_code(&book.code).map(|c| c.name_en.clone()),
            chapter_count: book.chapter_count(),
            verse_count: book.verse_count(),
        }
    }
}
