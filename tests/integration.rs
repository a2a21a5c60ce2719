//! Integration tests for biblia.
//!
//! These tests exercise book resolution, pagination, passage selection and
//! search end to end over fixture translations.

use std::sync::Arc;

use biblia::db::{import_translation, SqliteSource};
use biblia::error::ErrorKind;
use biblia::locate::{find_book, find_chapter, find_verse};
use biblia::models::{Translation, TranslationBook};
use biblia::pagination::{chapter_pagination, reading_pagination};
use biblia::passage::chapter_range;
use biblia::reader::Reader;
use biblia::registry::{Registry, STANDARD_ABBREVIATIONS, STANDARD_BOOKS};
use biblia::search::search_verses;
use biblia::selection::VerseSelection;
use biblia::store::{translation_to_json, JsonDirSource, MemorySource, TranslationStore};

/// Helper to create a book whose verse texts name their own position.
fn create_book(code: &str, name: &str, verses_per_chapter: &[usize]) -> TranslationBook {
    TranslationBook {
        code: code.to_string(),
        name: name.to_string(),
        chapters: verses_per_chapter
            .iter()
            .enumerate()
            .map(|(c, &n)| {
                (1..=n)
                    .map(|v| format!("{} {}:{} texto", code, c + 1, v))
                    .collect()
            })
            .collect(),
    }
}

/// A translation carrying every registry book under its Portuguese name.
fn create_full_translation(key: &str) -> Translation {
    Translation {
        key: key.to_string(),
        books: STANDARD_BOOKS
            .iter()
            .map(|&(code, _, name_pt)| create_book(code, name_pt, &[3, 2, 4]))
            .collect(),
    }
}

fn create_abc_translation() -> Translation {
    Translation {
        key: "t".to_string(),
        books: vec![TranslationBook {
            code: "gn".to_string(),
            name: "Gênesis".to_string(),
            chapters: vec![vec!["A".to_string(), "B".to_string(), "C".to_string()]],
        }],
    }
}

#[test]
fn test_every_code_finds_its_book() {
    let registry = Registry::standard();
    let t = create_full_translation("acf");

    for &(code, _, _) in STANDARD_BOOKS {
        let book = find_book(&registry, &t, code).unwrap();
        assert!(book.code.eq_ignore_ascii_case(code), "code {} found {}", code, book.code);

        let upper = find_book(&registry, &t, &code.to_uppercase()).unwrap();
        assert_eq!(upper.code, book.code);
    }
}

#[test]
fn test_every_abbreviation_finds_its_book_in_portuguese_translation() {
    let registry = Registry::standard();
    let t = create_full_translation("acf");

    for &(name_en, abbreviations) in STANDARD_ABBREVIATIONS {
        let expected = registry
            .books()
            .iter()
            .find(|b| b.name_en == name_en)
            .unwrap();
        for alias in abbreviations {
            let book = find_book(&registry, &t, alias).unwrap();
            assert_eq!(book.code, expected.code, "alias {}", alias);

            let upper = find_book(&registry, &t, &alias.to_uppercase()).unwrap();
            assert_eq!(upper.code, expected.code, "alias {}", alias);
        }
    }
}

#[test]
fn test_code_names_and_abbreviation_reach_the_same_book() {
    let registry = Registry::standard();
    let t = create_full_translation("acf");

    let by_code = find_book(&registry, &t, "gn").unwrap();
    for token in ["Gênesis", "Genesis", "gen"] {
        let book = find_book(&registry, &t, token).unwrap();
        assert!(std::ptr::eq(book, by_code), "token {}", token);
    }
    assert_eq!(find_book(&registry, &t, "ps").unwrap().code, "sl");
    assert_eq!(find_book(&registry, &t, "rev").unwrap().code, "ap");
}

#[test]
fn test_every_alias_normalizes_to_its_book() {
    let registry = Registry::standard();
    let aliases = registry.aliases();

    for book in registry.books() {
        let expected = aliases.normalize(&book.name_en);
        let registered = aliases.aliases_for(&book.name_en);
        assert!(registered.contains(&book.code.to_lowercase()));
        assert!(registered.len() >= 2);

        for alias in registered {
            assert_eq!(aliases.normalize(&alias), expected, "alias {}", alias);
        }
    }
}

#[test]
fn test_verse_expression_examples() {
    let parse = |s: &str| VerseSelection::parse(s).map(|v| v.verses().to_vec());

    assert_eq!(parse("5"), Some(vec![5]));
    assert_eq!(parse("5-7"), Some(vec![5, 6, 7]));
    assert_eq!(parse("5,7,9-11"), Some(vec![5, 7, 9, 10, 11]));
    assert_eq!(parse("7-5"), None);
    assert_eq!(parse("0-3"), None);
    assert_eq!(parse(""), None);
}

#[test]
fn test_verse_expression_canonical_form_reparses() {
    for expr in ["5", "9-11,5,7", "1,2,3", "3-4,4-6, 10", "12,1-2"] {
        let first = VerseSelection::parse(expr).unwrap();
        let again = VerseSelection::parse(&first.to_string()).unwrap();
        assert_eq!(first, again, "expression {}", expr);
    }
}

#[test]
fn test_chapter_pagination_edges_and_middle() {
    let book = create_book("gn", "Gênesis", &[1, 1, 1, 1, 1]);
    let n = 5;

    assert!(chapter_pagination(&book, 1).unwrap().prev.is_none());
    assert!(chapter_pagination(&book, n).unwrap().next.is_none());

    for k in 2..n {
        let p = chapter_pagination(&book, k).unwrap();
        assert_eq!(p.prev.unwrap().number, k - 1);
        assert_eq!(p.next.unwrap().number, k + 1);
    }
}

#[test]
fn test_chapter_out_of_bounds_is_not_found() {
    let book = create_book("gn", "Gênesis", &[2, 2, 2]);

    assert_eq!(find_chapter(&book, 0).unwrap_err().kind(), ErrorKind::NotFound);
    assert_eq!(find_chapter(&book, 4).unwrap_err().kind(), ErrorKind::NotFound);
    assert!(find_chapter(&book, 3).is_ok());
}

#[test]
fn test_search_respects_limit_and_order() {
    let t = create_full_translation("acf");

    for limit in [1, 5, 40] {
        let found = search_verses(&t, "TEXTO", limit).unwrap();
        assert_eq!(found.len(), limit);

        let positions: Vec<(usize, u32, u32)> = found
            .iter()
            .map(|m| {
                let book = t.books.iter().position(|b| b.code == m.book_code).unwrap();
                (book, m.chapter, m.verse)
            })
            .collect();
        let mut sorted = positions.clone();
        sorted.sort();
        assert_eq!(positions, sorted);
    }
}

#[test]
fn test_chapter_range_reversed_is_always_validation() {
    let book = create_book("gn", "Gênesis", &[1, 1, 1]);

    for (from, to) in [(2, 1), (3, 2), (9, 1), (3, 0)] {
        let err = chapter_range(&book, from, to).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Validation, "{}-{}", from, to);
    }
    assert_eq!(chapter_range(&book, 1, 3).unwrap().len(), 3);
}

#[test]
fn test_end_to_end_verse_lookup() {
    let registry = Registry::standard();
    let t = create_abc_translation();

    let book = find_book(&registry, &t, "genesis").unwrap();
    let verse = find_verse(find_chapter(book, 1).unwrap(), 2).unwrap();
    assert_eq!(verse, "B");

    let by_name = find_book(&registry, &t, "Gênesis").unwrap();
    let by_code = find_book(&registry, &t, "gn").unwrap();
    assert!(std::ptr::eq(by_name, by_code));
    assert!(std::ptr::eq(by_code, book));
}

#[test]
fn test_reading_pagination_crosses_books() {
    let registry = Registry::standard();
    let t = create_full_translation("acf");
    let gn = find_book(&registry, &t, "gn").unwrap();
    let ex = find_book(&registry, &t, "ex").unwrap();
    let ap = find_book(&registry, &t, "ap").unwrap();

    let next = reading_pagination(&registry, &t, gn, 3).unwrap().next.unwrap();
    assert_eq!(next.book_code.as_deref(), Some("ex"));
    assert_eq!(next.number, 1);
    assert_eq!(next.reference, "Êxodo 1");

    let prev = reading_pagination(&registry, &t, ex, 1).unwrap().prev.unwrap();
    assert_eq!(prev.book_code.as_deref(), Some("gn"));
    assert_eq!(prev.number, 3);

    assert!(reading_pagination(&registry, &t, gn, 1).unwrap().prev.is_none());
    assert!(reading_pagination(&registry, &t, ap, 3).unwrap().next.is_none());
}

#[test]
fn test_json_and_sqlite_sources_agree() {
    let dir = tempfile::tempdir().unwrap();
    let t = create_full_translation("acf");

    std::fs::write(dir.path().join("acf.json"), translation_to_json(&t).unwrap()).unwrap();
    let db_path = dir.path().join("biblia.db");
    import_translation(&db_path, &t, false).unwrap();

    let registry = Arc::new(Registry::standard());
    let json_store = TranslationStore::new(JsonDirSource::new(dir.path()), Arc::clone(&registry));
    let sqlite_store = TranslationStore::new(SqliteSource::new(&db_path), registry);

    let from_json = json_store.get("acf").unwrap();
    let from_sqlite = sqlite_store.get("acf").unwrap();
    assert_eq!(*from_json, *from_sqlite);
    assert_eq!(from_json.stats().book_count, STANDARD_BOOKS.len());
}

#[test]
fn test_reader_over_json_directory() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(
        dir.path().join("acf.json"),
        translation_to_json(&create_full_translation("acf")).unwrap(),
    )
    .unwrap();

    let registry = Arc::new(Registry::standard());
    let reader = Reader::new(TranslationStore::new(JsonDirSource::new(dir.path()), registry));

    assert_eq!(reader.translations().unwrap(), vec!["acf"]);

    let chapter = reader.chapter("acf", "Malaquias", "3").unwrap();
    assert_eq!(chapter.book_code, "ml");
    assert_eq!(chapter.pagination.next.unwrap().book_code.as_deref(), Some("mt"));

    let passage = reader.passage("acf", "jo", "3", "4,2-3").unwrap();
    assert_eq!(passage.reference, "João 3:2-4");
    assert_eq!(passage.verses[0].text, "jo 3:2 texto");

    let err = reader.passage("acf", "jo", "3", "5").unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotFound);
    let err = reader.chapter("nvi", "jo", "1").unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotFound);
}

#[test]
fn test_memory_source_test_double() {
    let registry = Arc::new(Registry::standard());
    let store = TranslationStore::new(MemorySource::new(vec![create_abc_translation()]), registry);
    let reader = Reader::new(store);

    let view = reader.chapter_slice("t", "gn", "1", Some("2"), None).unwrap();
    let texts: Vec<&str> = view.verses.iter().map(|v| v.text.as_str()).collect();
    assert_eq!(texts, vec!["B", "C"]);
    assert!(view.pagination.prev.is_none());
    assert!(view.pagination.next.is_none());
}
