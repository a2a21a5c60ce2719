//! SQLite storage for translations.
//!
//! Layout: one `books` row per book (ordered by `position`) and one `verses`
//! row per verse, both keyed by translation. Chapter and verse numbers must be
//! contiguous from 1; a gap is reported as corrupt data.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use indicatif::{ProgressBar, ProgressStyle};
use rusqlite::{params, Connection, OpenFlags};

use crate::models::{Translation, TranslationBook};
use crate::store::{StoreError, TranslationSource};

const SCHEMA: &str = "
CREATE TABLE IF NOT EXISTS books (
    translation TEXT NOT NULL,
    position    INTEGER NOT NULL,
    code        TEXT NOT NULL,
    name        TEXT NOT NULL,
    PRIMARY KEY (translation, code)
);
CREATE TABLE IF NOT EXISTS verses (
    translation TEXT NOT NULL,
    book_code   TEXT NOT NULL,
    chapter     INTEGER NOT NULL,
    verse       INTEGER NOT NULL,
    text        TEXT NOT NULL,
    PRIMARY KEY (translation, book_code, chapter, verse)
);
";

/// Translations stored in a SQLite database
#[derive(Debug, Clone)]
pub struct SqliteSource {
    db_path: PathBuf,
}

impl SqliteSource {
    pub fn new(db_path: impl Into<PathBuf>) -> Self {
        Self {
            db_path: db_path.into(),
        }
    }

    fn open(&self) -> Result<Connection, StoreError> {
        Ok(Connection::open_with_flags(
            &self.db_path,
            OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX,
        )?)
    }
}

impl TranslationSource for SqliteSource {
    fn available(&self) -> Result<Vec<String>, StoreError> {
        let conn = self.open()?;
        let mut stmt = conn.prepare("SELECT DISTINCT translation FROM books ORDER BY translation")?;
        let mut rows = stmt.query([])?;

        let mut keys = Vec::new();
        while let Some(row) = rows.next()? {
            keys.push(row.get(0)?);
        }
        Ok(keys)
    }

    fn load(&self, key: &str) -> Result<Translation, StoreError> {
        let conn = self.open()?;
        load_translation(&conn, key)
    }
}

/// Load one translation from an open connection.
pub fn load_translation(conn: &Connection, key: &str) -> Result<Translation, StoreError> {
    let mut stmt =
        conn.prepare("SELECT code, name FROM books WHERE translation = ? ORDER BY position")?;
    let mut rows = stmt.query([key])?;

    let mut books = Vec::new();
    let mut by_code = HashMap::new();
    while let Some(row) = rows.next()? {
        let code: String = row.get(0)?;
        let name: String = row.get(1)?;
        by_code.insert(code.clone(), books.len());
        books.push(TranslationBook {
            code,
            name,
            chapters: Vec::new(),
        });
    }

    if books.is_empty() {
        return Err(StoreError::UnknownTranslation(key.to_string()));
    }

    let mut stmt = conn.prepare(
        "SELECT v.book_code, v.chapter, v.verse, v.text
         FROM verses v
         JOIN books b ON b.translation = v.translation AND b.code = v.book_code
         WHERE v.translation = ?
         ORDER BY b.position, v.chapter, v.verse",
    )?;
    let mut rows = stmt.query([key])?;

    while let Some(row) = rows.next()? {
        let code: String = row.get(0)?;
        let chapter: u32 = row.get(1)?;
        let verse: u32 = row.get(2)?;
        let text: String = row.get(3)?;

        let Some(&idx) = by_code.get(&code) else {
            continue;
        };
        let book = &mut books[idx];

        // Rows arrive ordered, so a new chapter must be exactly the next one
        let have = book.chapters.len() as u32;
        if chapter == have + 1 {
            book.chapters.push(Vec::new());
        } else if chapter != have {
            return Err(StoreError::Corrupt(format!(
                "{} {}: chapter {} follows chapter {}",
                key, code, chapter, have
            )));
        }

        let current = book.chapters.last_mut().ok_or_else(|| {
            StoreError::Corrupt(format!("{} {}: verse before first chapter", key, code))
        })?;
        if verse != current.len() as u32 + 1 {
            return Err(StoreError::Corrupt(format!(
                "{} {} {}: verse {} follows verse {}",
                key,
                code,
                chapter,
                verse,
                current.len()
            )));
        }
        current.push(text);
    }

    Ok(Translation {
        key: key.to_string(),
        books,
    })
}

/// Write a translation into a SQLite database, replacing any earlier copy
/// under the same key. Returns the number of verses written.
pub fn import_translation(
    db_path: &Path,
    translation: &Translation,
    show_progress: bool,
) -> Result<usize, StoreError> {
    let mut conn = Connection::open(db_path)?;
    conn.execute_batch(SCHEMA)?;

    let total = translation.stats().verse_count;
    let progress = if show_progress {
        let pb = ProgressBar::new(total as u64);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} verses")
                .unwrap_or_else(|_| ProgressStyle::default_bar())
                .progress_chars("#>-"),
        );
        Some(pb)
    } else {
        None
    };

    let tx = conn.transaction()?;
    tx.execute("DELETE FROM verses WHERE translation = ?", [&translation.key])?;
    tx.execute("DELETE FROM books WHERE translation = ?", [&translation.key])?;

    let mut written = 0usize;
    {
        let mut insert_book = tx.prepare(
            "INSERT INTO books (translation, position, code, name) VALUES (?, ?, ?, ?)",
        )?;
        let mut insert_verse = tx.prepare(
            "INSERT INTO verses (translation, book_code, chapter, verse, text)
             VALUES (?, ?, ?, ?, ?)",
        )?;

        for (position, book) in translation.books.iter().enumerate() {
            insert_book.execute(params![translation.key, position as i64, book.code, book.name])?;

            for (c, chapter) in book.chapters.iter().enumerate() {
                for (v, text) in chapter.iter().enumerate() {
                    insert_verse.execute(params![
                        translation.key,
                        book.code,
                        c as i64 + 1,
                        v as i64 + 1,
                        text
                    ])?;
                    written += 1;
                }
                if let Some(ref pb) = progress {
                    pb.inc(chapter.len() as u64);
                }
            }
        }
    }
    tx.commit()?;

    if let Some(pb) = progress {
        pb.finish_with_message("done");
    }

    Ok(written)
}
