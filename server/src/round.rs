//! Round state and guess scoring
//!
//! Pure game logic with no I/O, mutated only by the session task. The
//! session drives one `Round` from word submission to a terminal phase and
//! turns each [`GuessOutcome`] into the protocol lines for the players.

use shared::{INITIAL_CHANCES, PLACEHOLDER};

/// Phases of one round, in order of progression.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    AwaitingWord,
    AwaitingClue,
    Guessing,
    RoundWon,
    RoundLost,
}

/// What a single guess did to the round.
#[derive(Debug, PartialEq, Eq)]
pub enum GuessOutcome {
    /// Input was not exactly one character. No chance consumed.
    Invalid,
    /// Letter was guessed before (case-insensitively). No chance consumed.
    AlreadyGuessed(char),
    /// Letter appears in the secret word; pattern is the updated view.
    Correct { letter: char, pattern: String },
    /// Letter does not appear; one chance consumed.
    Incorrect { letter: char, remaining: u32 },
}

/// One chooser/guesser cycle: secret word, clue, revealed pattern,
/// already-guessed letters and the remaining-chances counter.
#[derive(Debug)]
pub struct Round {
    secret: String,
    clue: String,
    pattern: Vec<char>,
    guessed: Vec<char>,
    remaining: u32,
    phase: Phase,
}

impl Round {
    pub fn new() -> Self {
        Self {
            secret: String::new(),
            clue: String::new(),
            pattern: Vec::new(),
            guessed: Vec::new(),
            remaining: INITIAL_CHANCES,
            phase: Phase::AwaitingWord,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn secret(&self) -> &str {
        &self.secret
    }

    pub fn clue(&self) -> &str {
        &self.clue
    }

    pub fn remaining(&self) -> u32 {
        self.remaining
    }

    /// Current revealed pattern, unguessed positions as the placeholder.
    pub fn pattern(&self) -> String {
        self.pattern.iter().collect()
    }

    pub fn is_solved(&self) -> bool {
        !self.pattern.contains(&PLACEHOLDER)
    }

    /// Accepts the chooser's secret word and builds the all-placeholder
    /// pattern. Returns false for a blank word, which would otherwise
    /// produce a zero-length pattern and a round that is over on entry.
    pub fn set_word(&mut self, word: &str) -> bool {
        debug_assert_eq!(self.phase, Phase::AwaitingWord);
        let word = word.trim();
        if word.is_empty() {
            return false;
        }
        self.secret = word.to_string();
        self.pattern = vec![PLACEHOLDER; word.chars().count()];
        self.phase = Phase::AwaitingClue;
        true
    }

    pub fn set_clue(&mut self, clue: &str) {
        debug_assert_eq!(self.phase, Phase::AwaitingClue);
        self.clue = clue.to_string();
        self.phase = Phase::Guessing;
    }

    /// Scores one guess and advances the phase on win or loss.
    ///
    /// Matching is case-insensitive on both sides; revealed characters keep
    /// the secret word's original casing. A letter is only ever scored
    /// once — repeats are rejected before the chance counter is touched.
    pub fn guess(&mut self, input: &str) -> GuessOutcome {
        debug_assert_eq!(self.phase, Phase::Guessing);
        let mut chars = input.chars();
        let letter = match (chars.next(), chars.next()) {
            (Some(c), None) => c,
            _ => return GuessOutcome::Invalid,
        };

        let folded = fold(letter);
        if self.guessed.contains(&folded) {
            return GuessOutcome::AlreadyGuessed(letter);
        }
        self.guessed.push(folded);

        let mut hit = false;
        for (i, c) in self.secret.chars().enumerate() {
            if fold(c) == folded {
                self.pattern[i] = c;
                hit = true;
            }
        }

        let outcome = if hit {
            GuessOutcome::Correct {
                letter,
                pattern: self.pattern(),
            }
        } else {
            self.remaining -= 1;
            GuessOutcome::Incorrect {
                letter,
                remaining: self.remaining,
            }
        };

        if self.is_solved() {
            self.phase = Phase::RoundWon;
        } else if self.remaining == 0 {
            self.phase = Phase::RoundLost;
        }
        outcome
    }
}

/// Lowercase fold for letter comparison. Covers non-ASCII letters too;
/// multi-character expansions keep their first character.
fn fold(letter: char) -> char {
    letter.to_lowercase().next().unwrap_or(letter)
}
