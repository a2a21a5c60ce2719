//! Data structures for the biblia lookup layer.

use serde::{Deserialize, Serialize};

/// A book in the canonical registry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CanonicalBook {
    pub code: String,
    pub name_en: String,
    pub name_pt: String,
}

/// Ordered verse texts of one chapter (verse N lives at index N - 1)
pub type Chapter = Vec<String>;

/// A single book as stored in a translation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranslationBook {
    pub code: String,
    pub name: String,
    pub chapters: Vec<Chapter>,
}

impl TranslationBook {
    /// Get the number of chapters
    pub fn chapter_count(&self) -> usize {
        self.chapters.len()
    }

    /// Get the total number of verses across all chapters
    pub fn verse_count(&self) -> usize {
        self.chapters.iter().map(|c| c.len()).sum()
    }
}

/// One complete text of all books for a translation key
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Translation {
    pub key: String,
    pub books: Vec<TranslationBook>,
}

impl Translation {
    /// Find a book by its exact code (case-insensitive)
    pub fn book_by_code(&self, code: &str) -> Option<&TranslationBook> {
        self.books.iter().find(|b| b.code.eq_ignore_ascii_case(code))
    }

    /// Check that every book has chapters and every chapter has verses.
    /// Returns a description of the first violation.
    pub fn check_dense(&self) -> Result<(), String> {
        if self.books.is_empty() {
            return Err(format!("translation '{}' has no books", self.key));
        }
        for book in &self.books {
            if book.chapters.is_empty() {
                return Err(format!("book '{}' has no chapters", book.code));
            }
            if let Some(idx) = book.chapters.iter().position(|c| c.is_empty()) {
                return Err(format!("book '{}' chapter {} has no verses", book.code, idx + 1));
            }
        }
        Ok(())
    }

    pub fn stats(&self) -> TranslationStats {
        TranslationStats {
            key: self.key.clone(),
            book_count: self.books.len(),
            chapter_count: self.books.iter().map(|b| b.chapter_count()).sum(),
            verse_count: self.books.iter().map(|b| b.verse_count()).sum(),
        }
    }
}

/// Translation statistics
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranslationStats {
    pub key: String,
    pub book_count: usize,
    pub chapter_count: usize,
    pub verse_count: usize,
}

/// Pointer to an adjacent chapter, possibly in another book
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaginationRef {
    pub number: u32,
    pub reference: String,
    pub verse_count: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub book_code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub book_name: Option<String>,
}

/// Previous/next chapter neighbours
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChapterPagination {
    pub prev: Option<PaginationRef>,
    pub next: Option<PaginationRef>,
}

/// Pointer to an adjacent verse
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerseNeighbor {
    pub chapter: u32,
    pub verse: u32,
    pub reference: String,
}

/// Previous/next verse neighbours, plus the neighbouring chapter at verse edges
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VersePagination {
    pub prev_verse: Option<VerseNeighbor>,
    pub next_verse: Option<VerseNeighbor>,
    pub prev_chapter: Option<VerseNeighbor>,
    pub next_chapter: Option<VerseNeighbor>,
}

/// A verse number with its text
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerseRecord {
    pub number: u32,
    pub text: String,
}

/// A single search hit
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchMatch {
    pub book_code: String,
    pub book_name: String,
    pub chapter: u32,
    pub verse: u32,
    pub reference: String,
    pub text: String,
}

/// Search response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchResults {
    pub translation: String,
    pub query: String,
    pub limit: usize,
    pub results: Vec<SearchMatch>,
}

/// Book listing entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookSummary {
    pub code: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name_en: Option<String>,
    pub chapter_count: usize,
    pub verse_count: usize,
}

/// A chapter (or a verse slice of it) with reading pagination
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChapterView {
    pub translation: String,
    pub book_code: String,
    pub book_name: String,
    pub chapter: u32,
    pub reference: String,
    pub verse_count: u32,
    pub verses: Vec<VerseRecord>,
    pub pagination: ChapterPagination,
}

/// Consecutive chapters of one book
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChapterRangeView {
    pub translation: String,
    pub book_code: String,
    pub book_name: String,
    pub from: u32,
    pub to: u32,
    pub chapters: Vec<ChapterText>,
}

/// A chapter number with its verses
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChapterText {
    pub number: u32,
    pub verses: Vec<VerseRecord>,
}

/// Verses selected by a range expression
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PassageView {
    pub translation: String,
    pub book_code: String,
    pub book_name: String,
    pub chapter: u32,
    pub selection: String,
    pub reference: String,
    pub verses: Vec<VerseRecord>,
    /// Present only when the selection is a single verse
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pagination: Option<VersePagination>,
}

/// Outcome of resolving a book token
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Resolution {
    pub token: String,
    pub normalized: String,
    pub strategy: String,
    pub book: BookSummary,
}

/// Format a chapter reference, e.g. "Gênesis 1"
pub fn chapter_reference(book_name: &str, chapter: u32) -> String {
    format!("{} {}", book_name, chapter)
}

/// Format a verse reference, e.g. "Gênesis 1:2"
pub fn verse_reference(book_name: &str, chapter: u32, verse: u32) -> String {
    format!("{} {}:{}", book_name, chapter, verse)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn book(code: &str, chapters: &[usize]) -> TranslationBook {
        TranslationBook {
            code: code.to_string(),
            name: code.to_uppercase(),
            chapters: chapters
                .iter()
                .map(|&n| (1..=n).map(|v| format!("v{}", v)).collect())
                .collect(),
        }
    }

    #[test]
    fn test_stats() {
        let t = Translation {
            key: "t".to_string(),
            books: vec![book("gn", &[3, 2]), book("ex", &[4])],
        };
        let stats = t.stats();
        assert_eq!(stats.book_count, 2);
        assert_eq!(stats.chapter_count, 3);
        assert_eq!(stats.verse_count, 9);
    }

    #[test]
    fn test_check_dense_rejects_empty_chapter() {
        let t = Translation {
            key: "t".to_string(),
            books: vec![book("gn", &[3, 0])],
        };
        let err = t.check_dense().unwrap_err();
        assert!(err.contains("chapter 2"));
    }

    #[test]
    fn test_book_by_code_ignores_case() {
        let t = Translation {
            key: "t".to_string(),
            books: vec![book("gn", &[1])],
        };
        assert!(t.book_by_code("GN").is_some());
        assert!(t.book_by_code("ex").is_none());
    }

    #[test]
    fn test_references() {
        assert_eq!(chapter_reference("Gênesis", 1), "Gênesis 1");
        assert_eq!(verse_reference("Gênesis", 1, 2), "Gênesis 1:2");
    }
}
