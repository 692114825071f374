//! Canonical form of words and guessed letters.
//!
//! Everything the game compares goes through here: the stored secret and
//! every guess. Input is decomposed (NFD), combining marks are dropped,
//! anything that is neither an ASCII word character (`A-Z`, `a-z`, `0-9`,
//! `_`) nor whitespace is removed, and the rest is uppercased.

use unicode_normalization::UnicodeNormalization;

use crate::error::GameError;

/// A normalized, non-empty secret word.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Word(String);

impl Word {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn chars(&self) -> impl Iterator<Item = char> + '_ {
        self.0.chars()
    }

    /// Number of characters (not bytes).
    pub fn len(&self) -> usize {
        self.0.chars().count()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn contains(&self, letter: char) -> bool {
        self.0.contains(letter)
    }
}

fn is_combining_mark(c: char) -> bool {
    ('\u{0300}'..='\u{036f}').contains(&c)
}

fn is_word_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

// Past the filter every non-whitespace char is ASCII, so uppercasing last
// cannot expand a character or reintroduce marks.
fn canonical(raw: &str) -> String {
    let kept: String = raw
        .nfd()
        .filter(|c| !is_combining_mark(*c))
        .filter(|c| is_word_char(*c) || c.is_whitespace())
        .map(|c| c.to_ascii_uppercase())
        .collect();
    kept.trim().to_string()
}

/// Normalizes a raw secret word.
pub fn normalize(raw: &str) -> Result<Word, GameError> {
    let word = canonical(raw);
    if word.is_empty() {
        return Err(GameError::InvalidWord);
    }
    Ok(Word(word))
}

/// Normalizes a raw guess down to the single letter it stands for.
pub fn normalize_letter(raw: &str) -> Result<char, GameError> {
    let letter = canonical(raw);
    let mut chars = letter.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Ok(c),
        _ => Err(GameError::InvalidGuess),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strips_accents_and_punctuation() {
        assert_eq!(normalize("café!").unwrap().as_str(), "CAFE");
        assert_eq!(normalize("Ça va?").unwrap().as_str(), "CA VA");
        assert_eq!(normalize("  pão-de-ló ").unwrap().as_str(), "PAODELO");
    }

    #[test]
    fn test_non_ascii_letters_are_dropped() {
        assert_eq!(normalize("Ørsted").unwrap().as_str(), "RSTED");
        assert_eq!(normalize("straße").unwrap().as_str(), "STRAE");
        assert_eq!(normalize("Привет"), Err(GameError::InvalidWord));
        assert_eq!(normalize("ᾳ"), Err(GameError::InvalidWord));
    }

    #[test]
    fn test_blank_input_is_invalid() {
        assert_eq!(normalize("   "), Err(GameError::InvalidWord));
        assert_eq!(normalize(""), Err(GameError::InvalidWord));
        assert_eq!(normalize("?!."), Err(GameError::InvalidWord));
    }

    #[test]
    fn test_normalize_is_idempotent() {
        let samples = [
            "café!", "Ça va?", "hello world", "snake_case", "Ångström", "naïve", "ÉCOLE", "x",
            "  spaced  out  ", "123abc", "straße",
        ];
        for raw in samples {
            let once = normalize(raw).unwrap();
            let twice = normalize(once.as_str()).unwrap();
            assert_eq!(once, twice, "not idempotent for {raw:?}");
        }
    }

    #[test]
    fn test_len_counts_chars() {
        let word = normalize("ÑANDÚ").unwrap();
        assert_eq!(word.as_str(), "NANDU");
        assert_eq!(word.len(), 5);
    }

    #[test]
    fn test_normalize_letter() {
        assert_eq!(normalize_letter("a"), Ok('A'));
        assert_eq!(normalize_letter("é"), Ok('E'));
        assert_eq!(normalize_letter(" c "), Ok('C'));
    }

    #[test]
    fn test_normalize_letter_rejects_non_letters() {
        assert_eq!(normalize_letter(""), Err(GameError::InvalidGuess));
        assert_eq!(normalize_letter(" "), Err(GameError::InvalidGuess));
        assert_eq!(normalize_letter("!"), Err(GameError::InvalidGuess));
        assert_eq!(normalize_letter("ab"), Err(GameError::InvalidGuess));
        assert_eq!(normalize_letter("ß"), Err(GameError::InvalidGuess));
        assert_eq!(normalize_letter("ж"), Err(GameError::InvalidGuess));
    }
}
