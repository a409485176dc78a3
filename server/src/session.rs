//! Session orchestration
//!
//! Admits exactly two players, then runs rounds on a single controlling
//! task: pick a chooser at random, drive the round state machine through
//! the multiplexer, negotiate a replay, and tear both connections down when
//! the session ends for any reason.

use crate::connection;
use crate::multiplexer::{Disconnected, Multiplexer};
use crate::round::{GuessOutcome, Phase, Round};
use log::{info, warn};
use rand::Rng;
use shared::MAX_PLAYERS;
use tokio::net::TcpListener;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Accepts two players, runs the session to completion and closes both
/// connections. A disconnect mid-session ends the session cleanly rather
/// than propagating as an error.
pub async fn run(listener: TcpListener) -> Result<(), BoxError> {
    let mut mux = admit_players(&listener).await?;
    info!(
        "Both players admitted: {}, {}",
        mux.name(0),
        mux.name(1)
    );

    match play(&mut mux).await {
        Ok(()) => info!("Session finished"),
        Err(Disconnected { player }) => {
            warn!("{} disconnected, ending session", player);
        }
    }

    mux.close_all().await;
    Ok(())
}

/// Accepts connections until exactly two are present and waits for both
/// name handshakes to finish.
///
/// Each handshake runs on its own task so a slow first player never delays
/// the second player's prompt; joining the task is the one-shot completion
/// signal the controller blocks on.
async fn admit_players(listener: &TcpListener) -> Result<Multiplexer, BoxError> {
    let mut pending = Vec::with_capacity(MAX_PLAYERS);
    while pending.len() < MAX_PLAYERS {
        let (stream, addr) = listener.accept().await?;
        info!("Client connected: {}", addr);
        pending.push(tokio::spawn(connection::admit(stream)));
    }

    let mut players = Vec::with_capacity(MAX_PLAYERS);
    for handle in pending {
        players.push(handle.await??);
    }
    Ok(Multiplexer::new(players))
}

/// Round loop: random roles each round, replay negotiation between rounds.
async fn play(mux: &mut Multiplexer) -> Result<(), Disconnected> {
    loop {
        // Re-randomized every round, not alternated. ThreadRng is not held
        // across await points.
        let chooser = rand::thread_rng().gen_range(0..MAX_PLAYERS);
        let guesser = (chooser + 1) % MAX_PLAYERS;
        info!("New round: {} chooses, {} guesses", mux.name(chooser), mux.name(guesser));

        run_round(mux, chooser, guesser).await?;

        if !negotiate_replay(mux).await? {
            return Ok(());
        }
    }
}

/// Drives one round from word submission to a terminal phase.
async fn run_round(
    mux: &mut Multiplexer,
    chooser: usize,
    guesser: usize,
) -> Result<(), Disconnected> {
    let mut round = Round::new();

    loop {
        mux.send_to(chooser, shared::ENTER_SECRET_WORD).await?;
        let word = mux.await_game_input(chooser).await?;
        if round.set_word(&word) {
            break;
        }
        mux.send_to(chooser, shared::INVALID_WORD).await?;
    }

    mux.send_to(chooser, shared::ENTER_CLUE).await?;
    let clue = mux.await_game_input(chooser).await?;
    round.set_clue(&clue);

    let chooser_name = mux.name(chooser).to_string();
    let guesser_name = mux.name(guesser).to_string();
    mux.broadcast(&shared::word_entered(&chooser_name, &guesser_name))
        .await?;
    mux.send_to(guesser, shared::YOUR_TURN).await?;

    while round.phase() == Phase::Guessing {
        mux.broadcast(&shared::clue_line(round.clue())).await?;
        mux.send_to(guesser, &shared::current_word(&round.pattern()))
            .await?;
        mux.send_to(chooser, &shared::full_word(round.secret()))
            .await?;
        mux.send_to(chooser, &shared::guessing(&guesser_name)).await?;
        mux.send_to(guesser, shared::ENTER_LETTER).await?;

        let input = mux.await_game_input(guesser).await?;
        match round.guess(&input) {
            GuessOutcome::Invalid => {
                mux.send_to(guesser, shared::INVALID_GUESS).await?;
            }
            GuessOutcome::AlreadyGuessed(letter) => {
                mux.send_to(chooser, &shared::guessed_letter(letter)).await?;
                mux.send_to(guesser, &shared::you_guessed(letter)).await?;
                mux.broadcast(&shared::already_guessed(letter)).await?;
            }
            GuessOutcome::Correct { letter, pattern } => {
                mux.send_to(chooser, &shared::guessed_letter(letter)).await?;
                mux.send_to(guesser, &shared::you_guessed(letter)).await?;
                mux.broadcast(&shared::correct_guess(letter, &pattern)).await?;
            }
            GuessOutcome::Incorrect { letter, remaining } => {
                mux.send_to(chooser, &shared::guessed_letter(letter)).await?;
                mux.send_to(guesser, &shared::you_guessed(letter)).await?;
                mux.broadcast(&shared::incorrect_guess(letter, remaining))
                    .await?;
            }
        }
    }

    match round.phase() {
        Phase::RoundWon => {
            mux.send_to(guesser, &shared::current_word(&round.pattern()))
                .await?;
            mux.send_to(chooser, &shared::full_word(round.secret()))
                .await?;
            mux.send_to(guesser, shared::GUESSER_WON).await?;
            mux.send_to(chooser, &shared::chooser_lost(&guesser_name))
                .await?;
        }
        Phase::RoundLost => {
            mux.send_to(guesser, &shared::word_was(round.secret())).await?;
            mux.send_to(chooser, &shared::chooser_won(&guesser_name))
                .await?;
        }
        phase => unreachable!("round ended in non-terminal phase {:?}", phase),
    }
    Ok(())
}

/// Asks both players whether to play again, in admission order. Both must
/// answer a case-insensitive "yes" for a new round to start.
async fn negotiate_replay(mux: &mut Multiplexer) -> Result<bool, Disconnected> {
    mux.broadcast(shared::REPLAY_PROMPT).await?;
    let first = mux.await_game_input(0).await?;
    let second = mux.await_game_input(1).await?;

    match (shared::is_affirmative(&first), shared::is_affirmative(&second)) {
        (true, true) => {
            mux.broadcast(shared::NEW_GAME).await?;
            Ok(true)
        }
        (true, false) => {
            let quitter = mux.name(1).to_string();
            mux.send_to(0, &shared::wont_play(&quitter)).await?;
            mux.send_to(1, shared::DISCONNECTING).await?;
            Ok(false)
        }
        (false, true) => {
            let quitter = mux.name(0).to_string();
            mux.send_to(1, &shared::wont_play(&quitter)).await?;
            mux.send_to(0, shared::DISCONNECTING).await?;
            Ok(false)
        }
        (false, false) => {
            mux.broadcast(shared::DISCONNECTING).await?;
            Ok(false)
        }
    }
}
