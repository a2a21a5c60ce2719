//! Canonical book registry.
//!
//! The standard table lists the 73 books of the extended canon in Catholic
//! canonical order. Table order is the canonical sequence used when reading
//! pagination crosses from one book into the next. Translations with the
//! 66-book canon simply lack the deuterocanonical entries.

use crate::alias::AliasIndex;
use crate::models::CanonicalBook;

/// (code, English name, Portuguese name)
pub const STANDARD_BOOKS: &[(&str, &str, &str)] = &[
    ("gn", "Genesis", "Gênesis"),
    ("ex", "Exodus", "Êxodo"),
    ("lv", "Leviticus", "Levítico"),
    ("nm", "Numbers", "Números"),
    ("dt", "Deuteronomy", "Deuteronômio"),
    ("js", "Joshua", "Josué"),
    ("jz", "Judges", "Juízes"),
    ("rt", "Ruth", "Rute"),
    ("1sm", "1 Samuel", "1 Samuel"),
    ("2sm", "2 Samuel", "2 Samuel"),
    ("1rs", "1 Kings", "1 Reis"),
    ("2rs", "2 Kings", "2 Reis"),
    ("1cr", "1 Chronicles", "1 Crônicas"),
    ("2cr", "2 Chronicles", "2 Crônicas"),
    ("ed", "Ezra", "Esdras"),
    ("ne", "Nehemiah", "Neemias"),
    ("tb", "Tobit", "Tobias"),
    ("jt", "Judith", "Judite"),
    ("et", "Esther", "Ester"),
    ("1mc", "1 Maccabees", "1 Macabeus"),
    ("2mc", "2 Maccabees", "2 Macabeus"),
    ("job", "Job", "Jó"),
    ("sl", "Psalms", "Salmos"),
    ("pv", "Proverbs", "Provérbios"),
    ("ec", "Ecclesiastes", "Eclesiastes"),
    ("ct", "Song of Solomon", "Cânticos"),
    ("sb", "Wisdom", "Sabedoria"),
    ("eclo", "Sirach", "Eclesiástico"),
    ("is", "Isaiah", "Isaías"),
    ("jr", "Jeremiah", "Jeremias"),
    ("lm", "Lamentations", "Lamentações"),
    ("br", "Baruch", "Baruc"),
    ("ez", "Ezekiel", "Ezequiel"),
    ("dn", "Daniel", "Daniel"),
    ("os", "Hosea", "Oséias"),
    ("jl", "Joel", "Joel"),
    ("am", "Amos", "Amós"),
    ("ob", "Obadiah", "Obadias"),
    ("jn", "Jonah", "Jonas"),
    ("mq", "Micah", "Miquéias"),
    ("na", "Nahum", "Naum"),
    ("hc", "Habakkuk", "Habacuque"),
    ("sf", "Zephaniah", "Sofonias"),
    ("ag", "Haggai", "Ageu"),
    ("zc", "Zechariah", "Zacarias"),
    ("ml", "Malachi", "Malaquias"),
    ("mt", "Matthew", "Mateus"),
    ("mc", "Mark", "Marcos"),
    ("lc", "Luke", "Lucas"),
    ("jo", "John", "João"),
    ("at", "Acts", "Atos"),
    ("rm", "Romans", "Romanos"),
    ("1co", "1 Corinthians", "1 Coríntios"),
    ("2co", "2 Corinthians", "2 Coríntios"),
    ("gl", "Galatians", "Gálatas"),
    ("ef", "Ephesians", "Efésios"),
    ("fp", "Philippians", "Filipenses"),
    ("cl", "Colossians", "Colossenses"),
    ("1ts", "1 Thessalonians", "1 Tessalonicenses"),
    ("2ts", "2 Thessalonians", "2 Tessalonicenses"),
    ("1tm", "1 Timothy", "1 Timóteo"),
    ("2tm", "2 Timothy", "2 Timóteo"),
    ("tt", "Titus", "Tito"),
    ("fm", "Philemon", "Filemom"),
    ("hb", "Hebrews", "Hebreus"),
    ("tg", "James", "Tiago"),
    ("1pe", "1 Peter", "1 Pedro"),
    ("2pe", "2 Peter", "2 Pedro"),
    ("1jo", "1 John", "1 João"),
    ("2jo", "2 John", "2 João"),
    ("3jo", "3 John", "3 João"),
    ("jd", "Jude", "Judas"),
    ("ap", "Revelation", "Apocalipse"),
];

/// Supplementary abbreviations, keyed by canonical English name.
/// Includes the unaccented Portuguese spellings users commonly type.
pub const STANDARD_ABBREVIATIONS: &[(&str, &[&str])] = &[
    ("Genesis", &["gen", "ge", "gên"]),
    ("Exodus", &["exo", "exod", "exodo", "êx"]),
    ("Leviticus", &["lev", "le", "levitico"]),
    ("Numbers", &["num", "nu", "numeros"]),
    ("Deuteronomy", &["deut", "deu", "deuteronomio"]),
    ("Joshua", &["josh", "jos", "josue"]),
    ("Judges", &["judg", "jdg", "juizes"]),
    ("Ruth", &["ru", "rth"]),
    ("1 Samuel", &["1sam", "1 sam", "1samuel", "i samuel"]),
    ("2 Samuel", &["2sam", "2 sam", "2samuel", "ii samuel"]),
    ("1 Kings", &["1kgs", "1 kgs", "1ki", "1reis", "i reis"]),
    ("2 Kings", &["2kgs", "2 kgs", "2ki", "2reis", "ii reis"]),
    ("1 Chronicles", &["1chr", "1 chr", "1ch", "1 cronicas", "1cronicas"]),
    ("2 Chronicles", &["2chr", "2 chr", "2ch", "2 cronicas", "2cronicas"]),
    ("Ezra", &["ezr", "esd"]),
    ("Nehemiah", &["neh"]),
    ("Tobit", &["tob"]),
    ("Judith", &["jdt", "jdth"]),
    ("Esther", &["est", "esth"]),
    ("1 Maccabees", &["1mac", "1 mac", "1macc", "1 macabeus"]),
    ("2 Maccabees", &["2mac", "2 mac", "2macc", "2 macabeus"]),
    ("Job", &["jó", "jb"]),
    ("Psalms", &["ps", "psa", "psalm", "salmo", "sal"]),
    ("Proverbs", &["prov", "pr", "prv", "proverbios"]),
    ("Ecclesiastes", &["eccl", "ecc", "ecl", "qoh"]),
    ("Song of Solomon", &["song", "sos", "song of songs", "canticos", "cantares", "cântico dos cânticos"]),
    ("Wisdom", &["wis", "sab", "sabedoria de salomão"]),
    ("Sirach", &["sir", "ecclus", "eclesiastico"]),
    ("Isaiah", &["isa", "isaias"]),
    ("Jeremiah", &["jer"]),
    ("Lamentations", &["lam", "lamentacoes"]),
    ("Baruch", &["bar", "baruque"]),
    ("Ezekiel", &["ezek", "eze", "ezk"]),
    ("Daniel", &["dan"]),
    ("Hosea", &["hos", "oseias"]),
    ("Joel", &["joe"]),
    ("Amos", &["amo"]),
    ("Obadiah", &["obad", "abd", "abdias"]),
    ("Jonah", &["jon", "jnh"]),
    ("Micah", &["mic", "miqueias"]),
    ("Nahum", &["nah", "nam"]),
    ("Habakkuk", &["hab", "habacuc"]),
    ("Zephaniah", &["zeph", "zep", "sof"]),
    ("Haggai", &["hag", "hg"]),
    ("Zechariah", &["zech", "zec", "zac"]),
    ("Malachi", &["mal"]),
    ("Matthew", &["matt", "mat", "mth"]),
    ("Mark", &["mrk", "mk", "mar"]),
    ("Luke", &["luk", "lk"]),
    ("John", &["joh", "jhn", "joao"]),
    ("Acts", &["act", "atos dos apóstolos", "atos dos apostolos"]),
    ("Romans", &["rom", "ro"]),
    ("1 Corinthians", &["1cor", "1 cor", "1 corintios", "1corintios"]),
    ("2 Corinthians", &["2cor", "2 cor", "2 corintios", "2corintios"]),
    ("Galatians", &["gal", "galatas"]),
    ("Ephesians", &["eph", "efesios"]),
    ("Philippians", &["phil", "php", "fil"]),
    ("Colossians", &["col"]),
    ("1 Thessalonians", &["1thess", "1 thess", "1th", "1tes"]),
    ("2 Thessalonians", &["2thess", "2 thess", "2th", "2tes"]),
    ("1 Timothy", &["1tim", "1 tim", "1 timoteo"]),
    ("2 Timothy", &["2tim", "2 tim", "2 timoteo"]),
    ("Titus", &["tit"]),
    ("Philemon", &["phlm", "phm", "filemon"]),
    ("Hebrews", &["heb"]),
    ("James", &["jas", "jam", "tia"]),
    ("1 Peter", &["1pet", "1 pet", "1pd", "1pedro"]),
    ("2 Peter", &["2pet", "2 pet", "2pd", "2pedro"]),
    ("1 John", &["1jn", "1john", "1 joao", "1joao"]),
    ("2 John", &["2jn", "2john", "2 joao", "2joao"]),
    ("3 John", &["3jn", "3john", "3 joao", "3joao"]),
    ("Jude", &["jud"]),
    ("Revelation", &["rev", "re", "apoc", "revelations"]),
];

/// Canonical book table plus the alias index built from it.
///
/// Constructed once by the startup sequence and shared read-only.
#[derive(Debug, Clone)]
pub struct Registry {
    books: Vec<CanonicalBook>,
    aliases: AliasIndex,
}

impl Registry {
    /// Build a registry from a canonical table and an abbreviation table
    pub fn new(books: Vec<CanonicalBook>, abbreviations: &[(&str, &[&str])]) -> Self {
        let aliases = AliasIndex::build(&books, abbreviations);
        Self { books, aliases }
    }

    /// Registry with the standard 73-book table
    pub fn standard() -> Self {
        let books = STANDARD_BOOKS
            .iter()
            .map(|&(code, name_en, name_pt)| CanonicalBook {
                code: code.to_string(),
                name_en: name_en.to_string(),
                name_pt: name_pt.to_string(),
            })
            .collect();
        Self::new(books, STANDARD_ABBREVIATIONS)
    }

    pub fn books(&self) -> &[CanonicalBook] {
        &self.books
    }

    pub fn aliases(&self) -> &AliasIndex {
        &self.aliases
    }

    /// Get a canonical book by code (case-insensitive)
    pub fn by_code(&self, code: &str) -> Option<&CanonicalBook> {
        let code = code.trim();
        self.books.iter().find(|b| b.code.eq_ignore_ascii_case(code))
    }

    /// Position of a code in canonical order
    pub fn position(&self, code: &str) -> Option<usize> {
        let code = code.trim();
        self.books.iter().position(|b| b.code.eq_ignore_ascii_case(code))
    }

    /// Match a token against registry codes, English names and Portuguese
    /// names only (no abbreviations).
    pub fn cross_reference(&self, token: &str) -> Option<&CanonicalBook> {
        let token = token.trim().to_lowercase();
        if token.is_empty() {
            return None;
        }
        self.books.iter().find(|b| {
            b.code.to_lowercase() == token
                || b.name_en.to_lowercase() == token
                || b.name_pt.to_lowercase() == token
        })
    }

    /// Resolve any registered alias to a canonical book
    pub fn resolve(&self, token: &str) -> Option<&CanonicalBook> {
        if !self.aliases.is_known(token) {
            return None;
        }
        let name = self.aliases.normalize(token);
        self.books.iter().find(|b| b.name_en.to_lowercase() == name)
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::standard()
    }
}
