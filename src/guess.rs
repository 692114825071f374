//! Per-round guess state and the rule for applying one guessed letter.

use crate::word::Word;

/// Rendering of a hidden slot.
pub const PLACEHOLDER: char = '_';

/// One position of the secret word as the guesser sees it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Slot {
    Hidden,
    Revealed(char),
}

impl Slot {
    pub fn is_revealed(&self) -> bool {
        matches!(self, Self::Revealed(_))
    }

    pub fn render(&self) -> char {
        match self {
            Self::Hidden => PLACEHOLDER,
            Self::Revealed(c) => *c,
        }
    }
}

/// State of a round that has a word.
///
/// `letters` always has one slot per character of `word`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Round {
    word: Word,
    letters: Vec<Slot>,
    correct_guesses: Vec<char>,
    wrong_guesses: Vec<char>,
    remaining_attempts: u32,
}

/// What a single guess did to the round.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuessOutcome {
    /// The letter is in the word; `revealed` positions were uncovered.
    Hit { revealed: usize },
    Miss,
    /// The letter had already been tried; nothing was counted.
    Repeated,
}

impl Round {
    /// Starts a round with every letter hidden. Whitespace inside the word
    /// is not guessable and starts out revealed.
    pub fn new(word: Word, max_attempts: u32) -> Self {
        let letters = word
            .chars()
            .map(|c| if c.is_whitespace() { Slot::Revealed(c) } else { Slot::Hidden })
            .collect();
        Self {
            word,
            letters,
            correct_guesses: Vec::new(),
            wrong_guesses: Vec::new(),
            remaining_attempts: max_attempts,
        }
    }

    pub fn word(&self) -> &Word {
        &self.word
    }

    pub fn letters(&self) -> &[Slot] {
        &self.letters
    }

    pub fn correct_guesses(&self) -> &[char] {
        &self.correct_guesses
    }

    pub fn wrong_guesses(&self) -> &[char] {
        &self.wrong_guesses
    }

    pub fn remaining_attempts(&self) -> u32 {
        self.remaining_attempts
    }

    pub fn revealed_count(&self) -> usize {
        self.letters.iter().filter(|s| s.is_revealed()).count()
    }

    pub fn is_fully_revealed(&self) -> bool {
        self.revealed_count() == self.word.len()
    }

    fn already_tried(&self, letter: char) -> bool {
        self.correct_guesses.contains(&letter) || self.wrong_guesses.contains(&letter)
    }

    fn reveal(&mut self, letter: char) -> usize {
        let mut revealed = 0;
        for (slot, c) in self.letters.iter_mut().zip(self.word.chars()) {
            if c == letter && !slot.is_revealed() {
                *slot = Slot::Revealed(c);
                revealed += 1;
            }
        }
        revealed
    }
}

/// Applies an already normalized letter to the round.
///
/// A repeated letter never touches the guess sets or the attempt counter,
/// but its positions are still revealed.
pub fn evaluate(round: &mut Round, letter: char) -> GuessOutcome {
    if round.already_tried(letter) {
        round.reveal(letter);
        return GuessOutcome::Repeated;
    }

    if round.word.contains(letter) {
        round.correct_guesses.push(letter);
        let revealed = round.reveal(letter);
        GuessOutcome::Hit { revealed }
    } else {
        round.wrong_guesses.push(letter);
        round.remaining_attempts = round.remaining_attempts.saturating_sub(1);
        GuessOutcome::Miss
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::word::normalize;

    fn round(word: &str, max_attempts: u32) -> Round {
        Round::new(normalize(word).unwrap(), max_attempts)
    }

    fn rendered(round: &Round) -> String {
        round.letters().iter().map(Slot::render).collect()
    }

    #[test]
    fn test_new_round_is_hidden() {
        let r = round("cat", 5);
        assert_eq!(r.letters(), &[Slot::Hidden; 3]);
        assert_eq!(rendered(&r), "___");
        assert_eq!(r.remaining_attempts(), 5);
    }

    #[test]
    fn test_whitespace_starts_revealed() {
        let r = round("ice cream", 5);
        assert_eq!(rendered(&r), "___ _____");
        assert_eq!(r.revealed_count(), 1);
    }

    #[test]
    fn test_hit_reveals_only_matching_positions() {
        let mut r = round("cat", 5);
        assert_eq!(evaluate(&mut r, 'A'), GuessOutcome::Hit { revealed: 1 });
        assert_eq!(r.letters(), &[Slot::Hidden, Slot::Revealed('A'), Slot::Hidden]);
        assert_eq!(r.correct_guesses(), &['A']);
        assert_eq!(r.remaining_attempts(), 5);
    }

    #[test]
    fn test_hit_reveals_every_occurrence() {
        let mut r = round("banana", 5);
        assert_eq!(evaluate(&mut r, 'A'), GuessOutcome::Hit { revealed: 3 });
        assert_eq!(rendered(&r), "_A_A_A");
    }

    #[test]
    fn test_repeated_guess_is_not_counted_twice() {
        let mut r = round("cat", 5);
        evaluate(&mut r, 'A');
        assert_eq!(evaluate(&mut r, 'A'), GuessOutcome::Repeated);
        assert_eq!(r.correct_guesses(), &['A']);

        evaluate(&mut r, 'Z');
        assert_eq!(evaluate(&mut r, 'Z'), GuessOutcome::Repeated);
        assert_eq!(r.wrong_guesses(), &['Z']);
        assert_eq!(r.remaining_attempts(), 4);
    }

    #[test]
    fn test_miss_saturates_at_zero() {
        let mut r = round("cat", 2);
        for letter in ['X', 'Y', 'Z', 'Q'] {
            assert_eq!(evaluate(&mut r, letter), GuessOutcome::Miss);
        }
        assert_eq!(r.remaining_attempts(), 0);
        assert_eq!(r.wrong_guesses(), &['X', 'Y', 'Z', 'Q']);
    }

    #[test]
    fn test_underscore_in_word_is_guessable() {
        let mut r = round("a_b", 5);
        evaluate(&mut r, 'A');
        evaluate(&mut r, 'B');
        assert!(!r.is_fully_revealed());
        evaluate(&mut r, '_');
        assert!(r.is_fully_revealed());
    }
}
