//! Verse and chapter range queries over a located book.

use crate::error::LookupError;
use crate::locate::find_chapter;
use crate::models::{Chapter, ChapterText, TranslationBook, VerseRecord};
use crate::selection::VerseSelection;

/// Parse a chapter or verse number as received from a URL or command line.
///
/// Only digits are accepted; range checks are left to the find operations so
/// that `0` reports as not found rather than as malformed.
pub fn parse_number(input: &str, what: &str) -> Result<u32, LookupError> {
    let trimmed = input.trim();
    if trimmed.is_empty() || !trimmed.bytes().all(|b| b.is_ascii_digit()) {
        return Err(LookupError::validation(format!(
            "{} must be a number, got '{}'",
            what, input
        )));
    }
    trimmed
        .parse::<u32>()
        .map_err(|_| LookupError::validation(format!("{} '{}' is out of range", what, input)))
}

/// Parse an optional bound, treating an absent or blank value as `None`.
pub fn parse_optional_number(input: Option<&str>, what: &str) -> Result<Option<u32>, LookupError> {
    match input.map(str::trim).filter(|s| !s.is_empty()) {
        Some(s) => parse_number(s, what).map(Some),
        None => Ok(None),
    }
}

fn records(chapter: &Chapter, from: u32, to: u32) -> Vec<VerseRecord> {
    chapter
        .iter()
        .enumerate()
        .map(|(i, text)| (i as u32 + 1, text))
        .filter(|(n, _)| *n >= from && *n <= to)
        .map(|(number, text)| VerseRecord {
            number,
            text: text.clone(),
        })
        .collect()
}

/// Verses `from..=to` of a chapter.
///
/// `from` defaults to 1 and `to` to the chapter length. The result is clamped
/// to the chapter, so it may be empty when `from` lies past the last verse.
pub fn verse_range(
    chapter: &Chapter,
    from: Option<u32>,
    to: Option<u32>,
) -> Result<Vec<VerseRecord>, LookupError> {
    let len = chapter.len() as u32;
    let from = from.unwrap_or(1);
    let to = to.unwrap_or(len);

    if from == 0 || to == 0 {
        return Err(LookupError::validation("verse numbers start at 1"));
    }
    if from > to {
        return Err(LookupError::validation(format!(
            "invalid verse range: from ({}) > to ({})",
            from, to
        )));
    }

    Ok(records(chapter, from, to.min(len)))
}

/// Chapters `from..=to` of a book, each with all of its verses.
pub fn chapter_range(
    book: &TranslationBook,
    from: u32,
    to: u32,
) -> Result<Vec<ChapterText>, LookupError> {
    if from > to {
        return Err(LookupError::validation(format!(
            "invalid chapter range: from ({}) > to ({})",
            from, to
        )));
    }
    let count = book.chapters.len() as u32;
    if from < 1 || to > count {
        return Err(LookupError::validation(format!(
            "chapter range {}-{} is outside 1-{} for {}",
            from, to, count, book.name
        )));
    }

    Ok((from..=to)
        .map(|number| {
            let chapter = &book.chapters[number as usize - 1];
            ChapterText {
                number,
                verses: records(chapter, 1, chapter.len() as u32),
            }
        })
        .collect())
}

/// Verses picked by a range expression such as `5,7,9-11`.
///
/// A malformed expression is a validation error; a well-formed one naming a
/// verse past the end of the chapter is not found.
pub fn select_verses(
    book: &TranslationBook,
    chapter_number: u32,
    expr: &str,
) -> Result<(VerseSelection, Vec<VerseRecord>), LookupError> {
    let chapter = find_chapter(book, chapter_number)?;
    let selection = VerseSelection::parse(expr).ok_or_else(|| {
        LookupError::validation(format!("invalid verse range expression '{}'", expr))
    })?;

    let len = chapter.len() as u32;
    if selection.last() > len {
        return Err(LookupError::not_found(format!(
            "verse {} not found in {} {} ({} verses)",
            selection.last(),
            book.name,
            chapter_number,
            len
        )));
    }

    let verses = selection
        .verses()
        .iter()
        .map(|&number| VerseRecord {
            number,
            text: chapter[number as usize - 1].clone(),
        })
        .collect();

    Ok((selection, verses))
}
