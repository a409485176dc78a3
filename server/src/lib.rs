//! # Word Game Server Library
//!
//! Authoritative server for a two-player, turn-based word-guessing game
//! played over persistent line-oriented TCP connections. One player (the
//! chooser) submits a secret word and clue; the other (the guesser) guesses
//! letters against a revealed pattern with six chances per round. Free-form
//! chat is interleaved on the same connections without disturbing the turn
//! protocol.
//!
//! ## Architecture
//!
//! ### Single Controlling Task
//! All round and roster state is owned by one session task. There is no
//! parallel mutation of game state: the only objects touched by more than
//! one task are the connections, whose read sides live in per-connection
//! reader tasks and whose write sides belong to the session task.
//!
//! ### Channel-Based Fan-In
//! Each reader task forwards complete lines into an unbounded channel. The
//! session task polls those channels non-blockingly each tick, classifies
//! every ready line as chat or game input, fans chat out immediately, and
//! sleeps briefly when nothing was ready. A channel closing is the sole
//! disconnect signal and ends the session.
//!
//! ## Module Organization
//!
//! ### Connection Module (`connection`)
//! Name handshake, per-connection reader task, non-blocking line polling,
//! line writes and close.
//!
//! ### Multiplexer Module (`multiplexer`)
//! `await_game_input` — blocks until the specific expected player's
//! non-chat line arrives while servicing chat from anyone; broadcasts.
//!
//! ### Round Module (`round`)
//! Pure round state machine: word, clue, revealed pattern, guessed-letter
//! set and remaining chances. No I/O, fully unit-testable.
//!
//! ### Session Module (`session`)
//! Player admission, random role assignment per round, the round driver,
//! replay negotiation and teardown.
//!
//! ## Usage Example
//!
//! ```rust,no_run
//! use tokio::net::TcpListener;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
//!     let listener = TcpListener::bind("0.0.0.0:5000").await?;
//!     // Admits exactly two players, runs rounds until replay negotiation
//!     // ends the session, then closes both connections.
//!     server::session::run(listener).await?;
//!     Ok(())
//! }
//! ```

pub mod connection;
pub mod multiplexer;
pub mod round;
pub mod session;
