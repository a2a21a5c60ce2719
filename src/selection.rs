//! Verse-range expressions such as `5`, `5-7` or `5,7,9-11`.
//!
//! A range token always expands to every verse it spans, so `5-7` selects
//! 5, 6 and 7 even when the selection that produced a share link skipped 6.
//! Existing links depend on that reading.

use std::fmt;

/// Ranges expand verse by verse only up to this number. No chapter comes
/// close. A larger range end is kept as the selection's last verse, so
/// `1-4000000000` stays small and still reports the missing verse.
pub const MAX_VERSE_NUMBER: u32 = 999;

/// Non-empty, strictly increasing set of verse numbers (all >= 1)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerseSelection {
    verses: Vec<u32>,
}

impl VerseSelection {
    /// Parse a range expression. Returns `None` when the expression is empty
    /// or any token is malformed; callers decide how to report that.
    pub fn parse(expr: &str) -> Option<Self> {
        let mut verses = Vec::new();

        for token in expr.split(',') {
            let token = token.trim();
            if token.is_empty() {
                return None;
            }
            match token.split_once('-') {
                Some((start, end)) => {
                    let start = parse_verse(start)?;
                    let end = parse_verse(end)?;
                    if end < start {
                        return None;
                    }
                    verses.extend(start..=end.min(MAX_VERSE_NUMBER));
                    if end > MAX_VERSE_NUMBER {
                        verses.push(end);
                    }
                }
                None => verses.push(parse_verse(token)?),
            }
        }

        verses.sort_unstable();
        verses.dedup();
        if verses.is_empty() {
            return None;
        }
        Some(Self { verses })
    }

    pub fn verses(&self) -> &[u32] {
        &self.verses
    }

    pub fn first(&self) -> u32 {
        self.verses[0]
    }

    pub fn last(&self) -> u32 {
        self.verses[self.verses.len() - 1]
    }

    pub fn len(&self) -> usize {
        self.verses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.verses.is_empty()
    }

    /// The single selected verse, if exactly one is selected
    pub fn single(&self) -> Option<u32> {
        match self.verses.as_slice() {
            [only] => Some(*only),
            _ => None,
        }
    }

    /// Consecutive runs as inclusive (start, end) pairs
    pub fn runs(&self) -> Vec<(u32, u32)> {
        let mut runs: Vec<(u32, u32)> = Vec::new();
        for &v in &self.verses {
            match runs.last_mut() {
                Some((_, end)) if end.checked_add(1) == Some(v) => *end = v,
                _ => runs.push((v, v)),
            }
        }
        runs
    }
}

fn parse_verse(s: &str) -> Option<u32> {
    let s = s.trim();
    if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    match s.parse::<u32>() {
        Ok(n) if n >= 1 => Some(n),
        _ => None,
    }
}

/// Canonical form: runs joined by commas, e.g. `5-7,9`
impl fmt::Display for VerseSelection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (start, end)) in self.runs().into_iter().enumerate() {
            if i > 0 {
                f.write_str(",")?;
            }
            if start == end {
                write!(f, "{}", start)?;
            } else {
                write!(f, "{}-{}", start, end)?;
            }
        }
        Ok(())
    }
}
