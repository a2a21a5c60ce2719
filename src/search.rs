//! Substring search over verse text.
//!
//! No ranking and no tokenization: verses are scanned book by book, chapter
//! by chapter, and the first `limit` containing the query are returned.

use crate::error::LookupError;
use crate::models::{verse_reference, SearchMatch, Translation};

pub const DEFAULT_SEARCH_LIMIT: usize = 20;

/// Case-insensitive containment search, in translation order.
pub fn search_verses(
    translation: &Translation,
    query: &str,
    limit: usize,
) -> Result<Vec<SearchMatch>, LookupError> {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return Err(LookupError::validation("search query must not be empty"));
    }

    let mut matches = Vec::new();
    if limit == 0 {
        return Ok(matches);
    }

    for book in &translation.books {
        for (c, chapter) in book.chapters.iter().enumerate() {
            for (v, text) in chapter.iter().enumerate() {
                if !text.to_lowercase().contains(&needle) {
                    continue;
                }
                let (chapter_number, verse_number) = (c as u32 + 1, v as u32 + 1);
                matches.push(SearchMatch {
                    book_code: book.code.clone(),
                    book_name: book.name.clone(),
                    chapter: chapter_number,
                    verse: verse_number,
                    reference: verse_reference(&book.name, chapter_number, verse_number),
                    text: text.clone(),
                });
                if matches.len() >= limit {
                    return Ok(matches);
                }
            }
        }
    }

    Ok(matches)
}

/// Parse the optional `limit` parameter.
///
/// Absent or blank means `default`; values above `max` are clamped.
pub fn parse_limit(input: Option<&str>, default: usize, max: usize) -> Result<usize, LookupError> {
    let Some(raw) = input.map(str::trim).filter(|s| !s.is_empty()) else {
        return Ok(default.min(max));
    };
    match raw.parse::<usize>() {
        Ok(0) => Err(LookupError::validation("limit must be at least 1")),
        Ok(n) => Ok(n.min(max)),
        Err(_) => Err(LookupError::validation(format!(
            "limit must be a number, got '{}'",
            raw
        ))),
    }
}
