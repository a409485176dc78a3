//! Wire-protocol vocabulary shared by the server and client.
//!
//! The protocol is newline-terminated UTF-8 text over TCP, one connection
//! per player. Every line the server emits is produced by a constant or
//! formatter in this crate so that the exact strings stay compatible with
//! any front-end already speaking this protocol.

/// Default TCP port the server listens on.
pub const DEFAULT_PORT: u16 = 5000;

/// Listen backlog for the server socket.
pub const BACKLOG: u32 = 10;

/// A session is always exactly two players.
pub const MAX_PLAYERS: usize = 2;

/// Wrong guesses allowed per round before the guesser loses.
pub const INITIAL_CHANCES: u32 = 6;

/// Placeholder shown for unrevealed positions of the secret word.
pub const PLACEHOLDER: char = '_';

/// Prefix marking an inbound line as free-form chat rather than game input.
pub const CHAT_PREFIX: &str = "@chat:";

/// An inbound line after classification.
///
/// `Chat` carries the payload with the prefix stripped and trimmed; `Game`
/// carries the raw line for whichever state currently expects input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Line {
    Chat(String),
    Game(String),
}

/// Classifies a raw inbound line as chat or game input.
pub fn classify(raw: &str) -> Line {
    match raw.strip_prefix(CHAT_PREFIX) {
        Some(rest) => Line::Chat(rest.trim().to_string()),
        None => Line::Game(raw.to_string()),
    }
}

/// Formats a chat notice for redistribution to every player.
pub fn chat_notice(sender: &str, text: &str) -> String {
    format!("{} [{}] {}", CHAT_PREFIX, sender, text)
}

/// True for a case-insensitive "yes" replay answer.
pub fn is_affirmative(answer: &str) -> bool {
    answer.trim().eq_ignore_ascii_case("yes")
}

// Server -> client lines. Constants where the text is fixed, formatters
// where a name, letter, count or pattern is interpolated.

pub const ENTER_NAME: &str = "Enter your name:";
pub const ENTER_SECRET_WORD: &str = "Enter the secret word:";
pub const INVALID_WORD: &str = "Invalid word! Enter a non-empty word.";
pub const ENTER_CLUE: &str = "Enter Clue for the word:";
pub const YOUR_TURN: &str = "It's your turn to guess.";
pub const ENTER_LETTER: &str = "Enter a letter:";
pub const INVALID_GUESS: &str = "Invalid guess! Enter a single letter.";
pub const GUESSER_WON: &str = "Congratulations! You won the game!!!";
pub const REPLAY_PROMPT: &str = "Do you wanna play another game?";
pub const NEW_GAME: &str = "Starting New Game...";
pub const DISCONNECTING: &str = "Disconnecting from server...";

pub fn welcome(name: &str) -> String {
    format!("Welcome, {}!", name)
}

pub fn word_entered(chooser: &str, guesser: &str) -> String {
    format!(
        "{} has entered the secret word. {} starts guessing.",
        chooser, guesser
    )
}

pub fn clue_line(clue: &str) -> String {
    format!("Clue: {}", clue)
}

/// Pattern view sent to the guesser.
pub fn current_word(pattern: &str) -> String {
    format!("Current word: {}", pattern)
}

/// Full secret word, sent to the chooser only.
pub fn full_word(secret: &str) -> String {
    format!("Word: {}", secret)
}

pub fn guessing(guesser: &str) -> String {
    format!("{} is guessing...", guesser)
}

pub fn guessed_letter(letter: char) -> String {
    format!("Guessed letter: {}", letter)
}

pub fn you_guessed(letter: char) -> String {
    format!("You guessed: {}", letter)
}

pub fn already_guessed(letter: char) -> String {
    format!("The letter {} has already been guessed", letter)
}

pub fn incorrect_guess(letter: char, remaining: u32) -> String {
    format!(
        "Incorrect guess! Guessed Letter: {}  Remaining chances: {}",
        letter, remaining
    )
}

pub fn correct_guess(letter: char, pattern: &str) -> String {
    format!(
        "Correct guess! Guessed Letter: {} Updated word: {}",
        letter, pattern
    )
}

pub fn chooser_lost(guesser: &str) -> String {
    format!("You lose, {} won the game", guesser)
}

pub fn word_was(secret: &str) -> String {
    format!("Game over! The word was: {}", secret)
}

pub fn chooser_won(guesser: &str) -> String {
    format!("Congratulations! {} is out of guesses, You win!!!", guesser)
}

pub fn wont_play(name: &str) -> String {
    format!("{} doesn't want to play, disconnecting from server...", name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classify_chat_strips_prefix_and_trims() {
        assert_eq!(
            classify("@chat: hello there "),
            Line::Chat("hello there".to_string())
        );
        assert_eq!(classify("@chat:hi"), Line::Chat("hi".to_string()));
    }

    #[test]
    fn classify_game_keeps_raw_payload() {
        assert_eq!(classify("cat"), Line::Game("cat".to_string()));
        // Prefix must match exactly from the start of the line
        assert_eq!(
            classify(" @chat:hi"),
            Line::Game(" @chat:hi".to_string())
        );
    }

    #[test]
    fn chat_notice_format_matches_protocol() {
        assert_eq!(chat_notice("Alice", "hi Bob"), "@chat: [Alice] hi Bob");
    }

    #[test]
    fn replay_answer_is_case_insensitive() {
        assert!(is_affirmative("yes"));
        assert!(is_affirmative("YES"));
        assert!(is_affirmative("  Yes "));
        assert!(!is_affirmative("no"));
        assert!(!is_affirmative("yess"));
        assert!(!is_affirmative(""));
    }

    #[test]
    fn formatted_lines_match_protocol_table() {
        assert_eq!(welcome("Ann"), "Welcome, Ann!");
        assert_eq!(clue_line("animal"), "Clue: animal");
        assert_eq!(current_word("c__"), "Current word: c__");
        assert_eq!(full_word("cat"), "Word: cat");
        assert_eq!(guessing("Bob"), "Bob is guessing...");
        assert_eq!(
            already_guessed('c'),
            "The letter c has already been guessed"
        );
        assert_eq!(
            incorrect_guess('z', 5),
            "Incorrect guess! Guessed Letter: z  Remaining chances: 5"
        );
        assert_eq!(
            correct_guess('c', "c__"),
            "Correct guess! Guessed Letter: c Updated word: c__"
        );
        assert_eq!(chooser_lost("Bob"), "You lose, Bob won the game");
        assert_eq!(word_was("dog"), "Game over! The word was: dog");
        assert_eq!(
            chooser_won("Bob"),
            "Congratulations! Bob is out of guesses, You win!!!"
        );
        assert_eq!(
            wont_play("Ann"),
            "Ann doesn't want to play, disconnecting from server..."
        );
    }
}
