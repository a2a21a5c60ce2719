//! Previous/next navigation for chapters and verses.
//!
//! [`chapter_pagination`] and [`verse_pagination`] stay inside one book.
//! [`reading_pagination`] is what the reading view uses: at the first or last
//! chapter of a book it continues into the neighbouring book, following the
//! registry's canonical order.

use crate::error::LookupError;
use crate::locate::{find_chapter, find_verse};
use crate::models::{
    chapter_reference, verse_reference, ChapterPagination, PaginationRef, Translation,
    TranslationBook, VerseNeighbor, VersePagination,
};
use crate::registry::Registry;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Direction {
    Back,
    Forward,
}

fn chapter_ref(book: &TranslationBook, number: u32) -> PaginationRef {
    PaginationRef {
        number,
        reference: chapter_reference(&book.name, number),
        verse_count: book.chapters[number as usize - 1].len() as u32,
        book_code: None,
        book_name: None,
    }
}

fn verse_neighbor(book: &TranslationBook, chapter: u32, verse: u32) -> VerseNeighbor {
    VerseNeighbor {
        chapter,
        verse,
        reference: verse_reference(&book.name, chapter, verse),
    }
}

/// Neighbouring chapters within one book; `None` at the book's edges.
pub fn chapter_pagination(
    book: &TranslationBook,
    chapter: u32,
) -> Result<ChapterPagination, LookupError> {
    find_chapter(book, chapter)?;
    let count = book.chapters.len() as u32;

    Ok(ChapterPagination {
        prev: (chapter > 1).then(|| chapter_ref(book, chapter - 1)),
        next: (chapter < count).then(|| chapter_ref(book, chapter + 1)),
    })
}

/// Neighbouring verses within one book.
///
/// At the first verse of a chapter the previous chapter is surfaced with its
/// last verse; at the last verse the next chapter with its first verse. Both
/// are `None` when the chapter edge is also the book's edge.
pub fn verse_pagination(
    book: &TranslationBook,
    chapter: u32,
    verse: u32,
) -> Result<VersePagination, LookupError> {
    let current = find_chapter(book, chapter)?;
    find_verse(current, verse)?;
    let last_verse = current.len() as u32;
    let chapter_count = book.chapters.len() as u32;

    let prev_chapter = (verse == 1 && chapter > 1).then(|| {
        let prev_len = book.chapters[chapter as usize - 2].len() as u32;
        verse_neighbor(book, chapter - 1, prev_len)
    });
    let next_chapter =
        (verse == last_verse && chapter < chapter_count).then(|| verse_neighbor(book, chapter + 1, 1));

    Ok(VersePagination {
        prev_verse: (verse > 1).then(|| verse_neighbor(book, chapter, verse - 1)),
        next_verse: (verse < last_verse).then(|| verse_neighbor(book, chapter, verse + 1)),
        prev_chapter,
        next_chapter,
    })
}

/// Chapter pagination that crosses book boundaries.
///
/// At chapter 1 `prev` points at the last chapter of the previous book the
/// translation carries; at the last chapter `next` points at chapter 1 of the
/// next one. Cross-book references carry the target book's code and name.
pub fn reading_pagination(
    registry: &Registry,
    translation: &Translation,
    book: &TranslationBook,
    chapter: u32,
) -> Result<ChapterPagination, LookupError> {
    let mut pagination = chapter_pagination(book, chapter)?;

    if pagination.prev.is_none() {
        pagination.prev = neighbour_book(registry, translation, book, Direction::Back)
            .map(|prev| cross_book_ref(prev, prev.chapters.len() as u32));
    }
    if pagination.next.is_none() {
        pagination.next = neighbour_book(registry, translation, book, Direction::Forward)
            .map(|next| cross_book_ref(next, 1));
    }

    Ok(pagination)
}

fn cross_book_ref(book: &TranslationBook, number: u32) -> PaginationRef {
    PaginationRef {
        book_code: Some(book.code.clone()),
        book_name: Some(book.name.clone()),
        ..chapter_ref(book, number)
    }
}

/// The closest book in `direction` that the translation contains.
/// Registry order decides; books unknown to the registry fall back to the
/// translation's own order.
fn neighbour_book<'t>(
    registry: &Registry,
    translation: &'t Translation,
    book: &TranslationBook,
    direction: Direction,
) -> Option<&'t TranslationBook> {
    match registry.position(&book.code) {
        Some(pos) => {
            let canon = registry.books();
            match direction {
                Direction::Back => canon[..pos]
                    .iter()
                    .rev()
                    .find_map(|c| translation.book_by_code(&c.code)),
                Direction::Forward => canon[pos + 1..]
                    .iter()
                    .find_map(|c| translation.book_by_code(&c.code)),
            }
        }
        None => {
            let idx = translation
                .books
                .iter()
                .position(|b| b.code.eq_ignore_ascii_case(&book.code))?;
            match direction {
                Direction::Back => idx.checked_sub(1).map(|i| &translation.books[i]),
                Direction::Forward => translation.books.get(idx + 1),
            }
        }
    }
}
