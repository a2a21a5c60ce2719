//! Biblia Lookup Library
//!
//! Book, chapter and verse lookup for Portuguese Bible translations.
//! Book tokens are resolved through a canonical registry of 73 books and an
//! alias table, so `gn`, `Gênesis`, `Genesis` and `gen` all reach the same
//! book.
//!
//! # Example
//!
//! ```no_run
//! use biblia::prelude::*;
//! use std::sync::Arc;
//!
//! let registry = Arc::new(Registry::standard());
//! let store = TranslationStore::new(JsonDirSource::new("data"), registry);
//! let reader = Reader::new(store);
//!
//! // Chapter 1 of Genesis with pagination into the neighbouring book
//! let chapter = reader.chapter("acf", "Gênesis", "1").unwrap();
//! println!("{} ({} verses)", chapter.reference, chapter.verse_count);
//!
//! // Selected verses
//! let passage = reader.passage("acf", "jo", "3", "16-17").unwrap();
//! for verse in &passage.verses {
//!     println!("{} {}", verse.number, verse.text);
//! }
//! ```
//!
//! # Lower-level lookups
//!
//! ```no_run
//! use biblia::prelude::*;
//!
//! let registry = Registry::standard();
//! let content = std::fs::read_to_string("data/acf.json").unwrap();
//! let translation = parse_translation_json("acf", &content).unwrap();
//!
//! let book = find_book(&registry, &translation, "genesis").unwrap();
//! let chapter = find_chapter(book, 1).unwrap();
//! println!("{}", find_verse(chapter, 1).unwrap());
//! ```

pub mod alias;
pub mod config;
pub mod db;
pub mod error;
pub mod locate;
pub mod models;
pub mod output;
pub mod pagination;
pub mod passage;
pub mod reader;
pub mod registry;
pub mod search;
pub mod selection;
pub mod server;
pub mod store;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::alias::{AliasCollision, AliasIndex};
    pub use crate::config::{ConfigError, ReaderConfig};
    pub use crate::db::{import_translation, load_translation, SqliteSource};
    pub use crate::error::{ErrorKind, LookupError};
    pub use crate::locate::{
        find_book, find_chapter, find_verse, locate_book, BookMatch, Strategy, RESOLUTION_ORDER,
    };
    pub use crate::models::{
        chapter_reference, verse_reference, BookSummary, CanonicalBook, Chapter,
        ChapterPagination, ChapterRangeView, ChapterText, ChapterView, PaginationRef,
        PassageView, Resolution, SearchMatch, SearchResults, Translation, TranslationBook,
        TranslationStats, VerseNeighbor, VersePagination, VerseRecord,
    };
    pub use crate::output::{
        format_chapter, format_chapters, format_passage, format_search_match, format_verse,
        print_books, print_resolution, print_search_results, print_stats, write_csv,
        write_json, write_json_file, OutputError,
    };
    pub use crate::pagination::{chapter_pagination, reading_pagination, verse_pagination};
    pub use crate::passage::{
        chapter_range, parse_number, parse_optional_number, select_verses, verse_range,
    };
    pub use crate::reader::{Reader, ReaderError};
    pub use crate::registry::{Registry, STANDARD_ABBREVIATIONS, STANDARD_BOOKS};
    pub use crate::search::{parse_limit, search_verses, DEFAULT_SEARCH_LIMIT};
    pub use crate::selection::{VerseSelection, MAX_VERSE_NUMBER};
    pub use crate::server::{build_router, serve, AppState, ServerError};
    pub use crate::store::{
        canonicalize_codes, is_valid_key, parse_translation_json, translation_to_json,
        JsonDirSource, MemorySource, StoreError, TranslationSource, TranslationStore,
    };
}

// Re-export commonly used types at the crate root
pub use error::{ErrorKind, LookupError};
pub use models::{Translation, TranslationBook};
pub use reader::{Reader, ReaderError};
pub use registry::Registry;
