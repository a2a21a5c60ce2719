//! Book, chapter and verse lookup within a translation.
//!
//! A book token is resolved by trying each [`Strategy`] of
//! [`RESOLUTION_ORDER`] in turn; the first one that yields a book wins.
//! Callers that link to books by code, by localized name or by abbreviation
//! rely on this exact order.

use std::fmt;

use crate::error::LookupError;
use crate::models::{Chapter, Translation, TranslationBook};
use crate::registry::Registry;

/// A single way of matching a book token against a translation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    /// Case-insensitive equality with the book's code
    ExactCode,
    /// Case-insensitive equality with the book's name in the translation
    ExactName,
    /// The token and the book's name normalize to the same canonical name
    NormalizedAlias,
    /// The token names a registry book (code, English or Portuguese name)
    /// whose code the translation carries
    RegistryCrossReference,
    /// The book name contains the token, or the token contains the name
    Substring,
}

pub const RESOLUTION_ORDER: [Strategy; 5] = [
    Strategy::ExactCode,
    Strategy::ExactName,
    Strategy::NormalizedAlias,
    Strategy::RegistryCrossReference,
    Strategy::Substring,
];

/// Inputs shared by every strategy for one lookup
struct Query<'a> {
    token: String,
    normalized: String,
    registry: &'a Registry,
}

impl Strategy {
    /// Index of the matching book in translation order
    fn find(self, query: &Query<'_>, translation: &Translation) -> Option<usize> {
        let books = &translation.books;
        match self {
            Strategy::ExactCode => books.iter().position(|b| b.code.to_lowercase() == query.token),
            Strategy::ExactName => books.iter().position(|b| b.name.to_lowercase() == query.token),
            Strategy::NormalizedAlias => {
                let aliases = query.registry.aliases();
                books
                    .iter()
                    .position(|b| aliases.normalize(&b.name) == query.normalized)
            }
            Strategy::RegistryCrossReference => {
                let canonical = query.registry.cross_reference(&query.token)?;
                books
                    .iter()
                    .position(|b| b.code.eq_ignore_ascii_case(&canonical.code))
            }
            Strategy::Substring => books.iter().position(|b| {
                let name = b.name.to_lowercase();
                name.contains(&query.token) || query.token.contains(&name)
            }),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Strategy::ExactCode => "exact_code",
            Strategy::ExactName => "exact_name",
            Strategy::NormalizedAlias => "normalized_alias",
            Strategy::RegistryCrossReference => "registry_cross_reference",
            Strategy::Substring => "substring",
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A resolved book together with how it was found
#[derive(Debug, Clone, Copy)]
pub struct BookMatch<'t> {
    pub index: usize,
    pub book: &'t TranslationBook,
    pub strategy: Strategy,
}

/// Resolve a book token, reporting the strategy that matched.
pub fn locate_book<'t>(
    registry: &Registry,
    translation: &'t Translation,
    token: &str,
) -> Result<BookMatch<'t>, LookupError> {
    let query = Query {
        token: token.trim().to_lowercase(),
        normalized: registry.aliases().normalize(token),
        registry,
    };

    if !query.token.is_empty() {
        for strategy in RESOLUTION_ORDER {
            if let Some(index) = strategy.find(&query, translation) {
                return Ok(BookMatch {
                    index,
                    book: &translation.books[index],
                    strategy,
                });
            }
        }
    }

    Err(LookupError::not_found(format!(
        "book '{}' not found (normalized: '{}')",
        token.trim(),
        query.normalized
    )))
}

/// Resolve a book token to a book of the translation.
pub fn find_book<'t>(
    registry: &Registry,
    translation: &'t Translation,
    token: &str,
) -> Result<&'t TranslationBook, LookupError> {
    locate_book(registry, translation, token).map(|m| m.book)
}

/// Get chapter `number` (1-based) of a book.
pub fn find_chapter(book: &TranslationBook, number: u32) -> Result<&Chapter, LookupError> {
    if number == 0 || number as usize > book.chapters.len() {
        return Err(LookupError::not_found(format!(
            "chapter {} not found in {} ({} chapters)",
            number,
            book.name,
            book.chapters.len()
        )));
    }
    Ok(&book.chapters[number as usize - 1])
}

/// Get verse `number` (1-based) of a chapter.
pub fn find_verse(chapter: &Chapter, number: u32) -> Result<&str, LookupError> {
    if number == 0 || number as usize > chapter.len() {
        return Err(LookupError::not_found(format!(
            "verse {} not found ({} verses)",
            number,
            chapter.len()
        )));
    }
    Ok(chapter[number as usize - 1].as_str())
}
