//! Output formatting for lookup results (plain text, JSON, CSV).

use crate::models::{
    BookSummary, ChapterRangeView, ChapterView, PassageView, Resolution, SearchMatch,
    SearchResults, TranslationStats, VerseRecord,
};
use serde::Serialize;
use std::io::{self, Write};
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum OutputError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Write any result as pretty JSON.
pub fn write_json<W: Write, T: Serialize + ?Sized>(value: &T, writer: &mut W) -> Result<(), OutputError> {
    let json = serde_json::to_string_pretty(value)?;
    writer.write_all(json.as_bytes())?;
    writer.write_all(b"\n")?;
    Ok(())
}

/// Write any result as JSON to a file.
pub fn write_json_file<T: Serialize + ?Sized>(value: &T, path: &Path) -> Result<(), OutputError> {
    let mut file = std::fs::File::create(path)?;
    write_json(value, &mut file)
}

/// Write search hits as CSV.
pub fn write_csv<W: Write>(matches: &[SearchMatch], writer: &mut W) -> Result<(), OutputError> {
    writeln!(writer, "book_code,book_name,chapter,verse,reference,text")?;

    for m in matches {
        writeln!(
            writer,
            "{},{},{},{},{},{}",
            csv_field(&m.book_code),
            csv_field(&m.book_name),
            m.chapter,
            m.verse,
            csv_field(&m.reference),
            csv_field(&m.text)
        )?;
    }

    Ok(())
}

fn csv_field(value: &str) -> String {
    if value.contains([',', '"', '\n']) {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}

/// Format one verse as "N text".
pub fn format_verse(verse: &VerseRecord) -> String {
    format!("{:>3} {}", verse.number, verse.text)
}

/// Format a chapter with its heading and pagination footer.
pub fn format_chapter(view: &ChapterView) -> String {
    let mut out = format!("{} ({})\n\n", view.reference, view.translation);
    for verse in &view.verses {
        out.push_str(&format_verse(verse));
        out.push('\n');
    }

    let prev = view.pagination.prev.as_ref().map(|p| pagination_label(p.book_name.as_deref(), &p.reference));
    let next = view.pagination.next.as_ref().map(|p| pagination_label(p.book_name.as_deref(), &p.reference));
    if prev.is_some() || next.is_some() {
        out.push('\n');
        out.push_str(&format!(
            "<< {}  |  {} >>",
            prev.as_deref().unwrap_or("-"),
            next.as_deref().unwrap_or("-")
        ));
        out.push('\n');
    }
    out
}

/// Cross-book references already carry the target book's name.
fn pagination_label(book_name: Option<&str>, reference: &str) -> String {
    match book_name {
        Some(name) if !reference.starts_with(name) => format!("{} ({})", reference, name),
        _ => reference.to_string(),
    }
}

/// Format consecutive chapters, each under its own heading.
pub fn format_chapters(view: &ChapterRangeView) -> String {
    let mut out = String::new();
    for chapter in &view.chapters {
        out.push_str(&format!("{} {}\n\n", view.book_name, chapter.number));
        for verse in &chapter.verses {
            out.push_str(&format_verse(verse));
            out.push('\n');
        }
        out.push('\n');
    }
    out
}

pub fn format_passage(view: &PassageView) -> String {
    let mut out = format!("{} ({})\n\n", view.reference, view.translation);
    for verse in &view.verses {
        out.push_str(&format_verse(verse));
        out.push('\n');
    }

    if let Some(p) = &view.pagination {
        let prev = p.prev_verse.as_ref().or(p.prev_chapter.as_ref());
        let next = p.next_verse.as_ref().or(p.next_chapter.as_ref());
        out.push('\n');
        out.push_str(&format!(
            "<< {}  |  {} >>\n",
            prev.map(|n| n.reference.as_str()).unwrap_or("-"),
            next.map(|n| n.reference.as_str()).unwrap_or("-")
        ));
    }
    out
}

/// Format a search hit as a human-readable string.
pub fn format_search_match(m: &SearchMatch) -> String {
    format!("{}: {}", m.reference, truncate_text(&m.text, 120))
}

/// Truncate text to a maximum length, adding ellipsis if needed.
fn truncate_text(text: &str, max_len: usize) -> String {
    if text.chars().count() <= max_len {
        text.to_string()
    } else {
        let truncated: String = text.chars().take(max_len - 3).collect();
        format!("{}...", truncated)
    }
}

/// Print search hits in a human-readable format.
pub fn print_search_results(results: &SearchResults) {
    println!(
        "\n=== Search \"{}\" in {} ({} results, limit {}) ===",
        results.query,
        results.translation,
        results.results.len(),
        results.limit
    );
    for m in &results.results {
        println!("{}", format_search_match(m));
    }
}

pub fn print_books(books: &[BookSummary]) {
    for book in books {
        println!(
            "{:<5} {:<28} {:>3} chapters {:>5} verses",
            book.code, book.name, book.chapter_count, book.verse_count
        );
    }
}

/// Write a summary report to stdout.
pub fn print_stats(stats: &TranslationStats) {
    println!("\n=== Translation {} ===", stats.key);
    println!("  Books: {}", stats.book_count);
    println!("  Chapters: {}", stats.chapter_count);
    println!("  Verses: {}", stats.verse_count);
}

pub fn print_resolution(resolution: &Resolution) {
    println!(
        "{} -> {} ({}) via {}",
        resolution.token, resolution.book.code, resolution.book.name, resolution.strategy
    );
    println!("  normalized: {}", resolution.normalized);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ChapterPagination, PaginationRef, VerseNeighbor, VersePagination};

    fn create_test_match() -> SearchMatch {
        SearchMatch {
            book_code: "jo".to_string(),
            book_name: "João".to_string(),
            chapter: 3,
            verse: 16,
            reference: "João 3:16".to_string(),
            text: "Porque Deus amou o mundo de tal maneira, que deu o seu Filho".to_string(),
        }
    }

    fn verses(texts: &[&str]) -> Vec<VerseRecord> {
        texts
            .iter()
            .enumerate()
            .map(|(i, t)| VerseRecord {
                number: i as u32 + 1,
                text: t.to_string(),
            })
            .collect()
    }

    #[test]
    fn test_write_csv_quotes_commas() {
        let mut output = Vec::new();
        write_csv(&[create_test_match()], &mut output).unwrap();

        let csv = String::from_utf8(output).unwrap();
        assert!(csv.starts_with("book_code,book_name")); // Header
        assert!(csv.contains("jo,João,3,16,João 3:16,\"Porque Deus amou o mundo de tal maneira, que"));
        assert_eq!(csv.lines().count(), 2);
    }

    #[test]
    fn test_write_csv_empty() {
        let mut output = Vec::new();
        write_csv(&[], &mut output).unwrap();

        let csv = String::from_utf8(output).unwrap();
        assert_eq!(csv.lines().count(), 1);
    }

    #[test]
    fn test_write_json() {
        let mut output = Vec::new();
        write_json(&create_test_match(), &mut output).unwrap();

        let value: serde_json::Value = serde_json::from_slice(&output).unwrap();
        assert_eq!(value["reference"], "João 3:16");
        assert_eq!(value["verse"], 16);
    }

    #[test]
    fn test_format_chapter_footer() {
        let view = ChapterView {
            translation: "acf".to_string(),
            book_code: "gn".to_string(),
            book_name: "Gênesis".to_string(),
            chapter: 50,
            reference: "Gênesis 50".to_string(),
            verse_count: 2,
            verses: verses(&["A", "B"]),
            pagination: ChapterPagination {
                prev: Some(PaginationRef {
                    number: 49,
                    reference: "Gênesis 49".to_string(),
                    verse_count: 33,
                    book_code: None,
                    book_name: None,
                }),
                next: Some(PaginationRef {
                    number: 1,
                    reference: "Êxodo 1".to_string(),
                    verse_count: 22,
                    book_code: Some("ex".to_string()),
                    book_name: Some("Êxodo".to_string()),
                }),
            },
        };

        let text = format_chapter(&view);
        assert!(text.starts_with("Gênesis 50 (acf)"));
        assert!(text.contains("  1 A\n  2 B\n"));
        assert!(text.contains("<< Gênesis 49  |  Êxodo 1 >>"));
    }

    #[test]
    fn test_format_passage_uses_chapter_neighbour_at_edge() {
        let view = PassageView {
            translation: "acf".to_string(),
            book_code: "gn".to_string(),
            book_name: "Gênesis".to_string(),
            chapter: 2,
            selection: "1".to_string(),
            reference: "Gênesis 2:1".to_string(),
            verses: verses(&["A"]),
            pagination: Some(VersePagination {
                prev_verse: None,
                next_verse: Some(VerseNeighbor {
                    chapter: 2,
                    verse: 2,
                    reference: "Gênesis 2:2".to_string(),
                }),
                prev_chapter: Some(VerseNeighbor {
                    chapter: 1,
                    verse: 31,
                    reference: "Gênesis 1:31".to_string(),
                }),
                next_chapter: None,
            }),
        };

        assert!(format_passage(&view).contains("<< Gênesis 1:31  |  Gênesis 2:2 >>"));
    }

    #[test]
    fn test_truncate_text() {
        assert_eq!(truncate_text("curto", 10), "curto");
        assert_eq!(truncate_text("abcdefghijkl", 8), "abcde...");
    }
}
