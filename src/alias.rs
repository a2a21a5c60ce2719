//! Alias resolution for book identifiers.
//!
//! Every canonical entry registers its code, English name, Portuguese name and
//! abbreviations as lower-cased keys pointing at the lower-cased English name.
//! When two books register the same key the later registration wins; such
//! overwrites are kept as [`AliasCollision`]s so a misconfigured table can be
//! spotted at startup.

use std::collections::{BTreeSet, HashMap};

use tracing::warn;

use crate::models::CanonicalBook;

/// An alias that was registered by more than one canonical book
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AliasCollision {
    pub alias: String,
    pub previous: String,
    pub replacement: String,
}

/// Keys registered for one canonical entry, in registration order
#[derive(Debug, Clone)]
struct AliasEntry {
    name: String,
    keys: Vec<String>,
}

/// Reverse lookup from alias to canonical name. Read-only once built.
#[derive(Debug, Clone, Default)]
pub struct AliasIndex {
    lookup: HashMap<String, String>,
    entries: Vec<AliasEntry>,
    collisions: Vec<AliasCollision>,
}

fn key_of(token: &str) -> String {
    token.trim().to_lowercase()
}

impl AliasIndex {
    /// Build the index from canonical books and an abbreviation table keyed
    /// by English name. Abbreviation rows naming unknown books are ignored.
    pub fn build(books: &[CanonicalBook], abbreviations: &[(&str, &[&str])]) -> Self {
        let mut index = AliasIndex::default();

        for book in books {
            let mut keys = vec![
                key_of(&book.code),
                key_of(&book.name_en),
                key_of(&book.name_pt),
            ];
            if let Some((_, extra)) = abbreviations
                .iter()
                .find(|(name, _)| name.eq_ignore_ascii_case(&book.name_en))
            {
                keys.extend(extra.iter().map(|a| key_of(a)));
            }
            keys.retain(|k| !k.is_empty());

            let target = key_of(&book.name_en);
            for key in &keys {
                index.register(key, &target);
            }
            keys.dedup();
            index.entries.push(AliasEntry {
                name: book.name_en.clone(),
                keys,
            });
        }

        for (name, _) in abbreviations {
            if !books.iter().any(|b| b.name_en.eq_ignore_ascii_case(name)) {
                warn!(book = %name, "abbreviations for unknown book ignored");
            }
        }

        // Keys taken over by a later book no longer belong to this entry
        let lookup = &index.lookup;
        for entry in index.entries.iter_mut() {
            let target = key_of(&entry.name);
            entry.keys.retain(|k| lookup.get(k) == Some(&target));
        }

        index
    }

    fn register(&mut self, key: &str, target: &str) {
        if let Some(previous) = self.lookup.insert(key.to_string(), target.to_string()) {
            if previous != target {
                warn!(alias = %key, %previous, replacement = %target, "alias collision");
                self.collisions.push(AliasCollision {
                    alias: key.to_string(),
                    previous,
                    replacement: target.to_string(),
                });
            }
        }
    }

    /// Map a token to its canonical name, or return the lower-cased input.
    /// Never fails.
    pub fn normalize(&self, token: &str) -> String {
        let key = key_of(token);
        match self.lookup.get(&key) {
            Some(name) => name.clone(),
            None => key,
        }
    }

    pub fn is_known(&self, token: &str) -> bool {
        self.lookup.contains_key(&key_of(token))
    }

    /// All aliases resolving to the same canonical name as `name`
    pub fn aliases_for(&self, name: &str) -> BTreeSet<String> {
        let target = self.normalize(name);
        self.lookup
            .iter()
            .filter(|(_, v)| **v == target)
            .map(|(k, _)| k.clone())
            .collect()
    }

    /// Canonical names whose code, names or abbreviations start with `prefix`,
    /// in registry order.
    pub fn search(&self, prefix: &str) -> Vec<String> {
        let prefix = key_of(prefix);
        if prefix.is_empty() {
            return Vec::new();
        }
        self.entries
            .iter()
            .filter(|e| e.keys.iter().any(|k| k.starts_with(&prefix)))
            .map(|e| e.name.clone())
            .collect()
    }

    pub fn collisions(&self) -> &[AliasCollision] {
        &self.collisions
    }

    pub fn len(&self) -> usize {
        self.lookup.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lookup.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::{Registry, STANDARD_ABBREVIATIONS};

    fn book(code: &str, en: &str, pt: &str) -> CanonicalBook {
        CanonicalBook {
            code: code.to_string(),
            name_en: en.to_string(),
            name_pt: pt.to_string(),
        }
    }

    #[test]
    fn test_normalize_known_tokens() {
        let registry = Registry::standard();
        let aliases = registry.aliases();

        assert_eq!(aliases.normalize("gn"), "genesis");
        assert_eq!(aliases.normalize("  Gênesis "), "genesis");
        assert_eq!(aliases.normalize("GEN"), "genesis");
        assert_eq!(aliases.normalize("Cântico dos Cânticos"), "song of solomon");
    }

    #[test]
    fn test_normalize_unknown_falls_back_to_lowercase() {
        let registry = Registry::standard();
        assert_eq!(registry.aliases().normalize("  Enoque "), "enoque");
        assert!(!registry.aliases().is_known("Enoque"));
    }

    #[test]
    fn test_every_alias_normalizes_like_its_book() {
        let registry = Registry::standard();
        let aliases = registry.aliases();

        for book in registry.books() {
            let expected = aliases.normalize(&book.name_pt);
            for alias in aliases.aliases_for(&book.name_en) {
                assert_eq!(aliases.normalize(&alias), expected, "alias {}", alias);
            }
            assert_eq!(aliases.normalize(&book.code), expected);
        }
    }

    #[test]
    fn test_aliases_for_contains_all_registrations() {
        let registry = Registry::standard();
        let set = registry.aliases().aliases_for("Job");

        assert!(set.contains("job"));
        assert!(set.contains("jó"));
        assert!(set.contains("jb"));
        // Any alias works as the query
        assert_eq!(registry.aliases().aliases_for("jb"), set);
    }

    #[test]
    fn test_search_by_prefix_in_registry_order() {
        let registry = Registry::standard();
        let found = registry.aliases().search("1 T");

        assert_eq!(
            found,
            vec!["1 Thessalonians".to_string(), "1 Timothy".to_string()]
        );
    }

    #[test]
    fn test_search_has_no_duplicates() {
        let registry = Registry::standard();
        // "gen", "ge", "gênesis" and "genesis" all match; Genesis appears once
        let found = registry.aliases().search("ge");
        assert_eq!(found.iter().filter(|n| *n == "Genesis").count(), 1);
    }

    #[test]
    fn test_search_blank_prefix() {
        let registry = Registry::standard();
        assert!(registry.aliases().search("   ").is_empty());
    }

    #[test]
    fn test_last_registration_wins_on_collision() {
        let books = vec![book("aa", "Alpha", "Alfa"), book("bb", "Beta", "Beta")];
        let index = AliasIndex::build(&books, &[("Alpha", &["x"]), ("Beta", &["x"])]);

        assert_eq!(index.normalize("x"), "beta");
        assert_eq!(index.collisions().len(), 1);
        assert_eq!(index.collisions()[0].previous, "alpha");
        assert_eq!(index.collisions()[0].replacement, "beta");
        assert!(!index.aliases_for("Alpha").contains("x"));
    }

    #[test]
    fn test_search_skips_book_that_lost_an_alias() {
        let books = vec![book("aa", "Alpha", "Alfa"), book("bb", "Beta", "Beta")];
        let index = AliasIndex::build(&books, &[("Alpha", &["x"]), ("Beta", &["x"])]);

        assert_eq!(index.search("x"), vec!["Beta".to_string()]);
        // Alpha still matches through the keys it kept
        assert_eq!(index.search("al"), vec!["Alpha".to_string()]);
    }

    #[test]
    fn test_same_name_in_both_languages_is_not_a_collision() {
        let books = vec![book("dn", "Daniel", "Daniel")];
        let index = AliasIndex::build(&books, STANDARD_ABBREVIATIONS);
        assert!(index.collisions().is_empty());
        assert_eq!(index.normalize("dan"), "daniel");
    }
}
