//! Input multiplexing across both player connections
//!
//! All game-turn coordination runs on the single session task. That task
//! asks the multiplexer for the next game line from one specific player;
//! the multiplexer scans every connection each tick, fans chat out to both
//! players immediately, rebroadcasts stray game lines from the idle player
//! as chat, and only returns when the expected player's non-chat line
//! arrives or a connection reports end-of-stream.

use crate::connection::{Connection, Inbound};
use log::{debug, warn};
use std::fmt;
use std::time::Duration;
use tokio::time::sleep;

/// Sleep between scans when no connection had a line ready. Tunable, not
/// user-visible.
const POLL_INTERVAL: Duration = Duration::from_millis(50);

/// A peer hung up or its socket failed. Always fatal to the session.
#[derive(Debug)]
pub struct Disconnected {
    pub player: String,
}

impl fmt::Display for Disconnected {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "player {} disconnected", self.player)
    }
}

impl std::error::Error for Disconnected {}

/// Owns both connections in admission order and performs all reads, writes
/// and broadcasts on behalf of the session controller.
#[derive(Debug)]
pub struct Multiplexer {
    players: Vec<Connection>,
}

impl Multiplexer {
    /// `players` must be in admission order; it determines scan order,
    /// role rotation and who is addressed first during replay negotiation.
    pub fn new(players: Vec<Connection>) -> Self {
        Self { players }
    }

    pub fn name(&self, idx: usize) -> &str {
        self.players[idx].name()
    }

    /// Sends one line to a single player.
    pub async fn send_to(&mut self, idx: usize, line: &str) -> Result<(), Disconnected> {
        let player = &mut self.players[idx];
        if let Err(e) = player.send(line).await {
            warn!("Write to {} failed: {}", player.name(), e);
            return Err(Disconnected {
                player: player.name().to_string(),
            });
        }
        Ok(())
    }

    /// Sends one line to every player, in admission order.
    pub async fn broadcast(&mut self, line: &str) -> Result<(), Disconnected> {
        for idx in 0..self.players.len() {
            self.send_to(idx, line).await?;
        }
        Ok(())
    }

    /// Blocks until the expected player sends a non-chat line and returns
    /// its payload.
    ///
    /// While waiting, every ready line from any player is serviced: chat is
    /// broadcast to both players (sender included), and a non-chat line
    /// from the player who is not expected is rebroadcast as chat so stray
    /// input never corrupts the turn protocol. There is deliberately no
    /// timeout — a silent player blocks the round until they answer or
    /// hang up.
    pub async fn await_game_input(&mut self, expected: usize) -> Result<String, Disconnected> {
        loop {
            let mut processed = false;
            for idx in 0..self.players.len() {
                match self.players[idx].poll_line() {
                    Inbound::Empty => continue,
                    Inbound::Closed => {
                        return Err(Disconnected {
                            player: self.players[idx].name().to_string(),
                        })
                    }
                    Inbound::Line(raw) => {
                        processed = true;
                        let sender = self.players[idx].name().to_string();
                        match shared::classify(&raw) {
                            shared::Line::Chat(text) => {
                                debug!("Chat from {}: {}", sender, text);
                                self.broadcast(&shared::chat_notice(&sender, &text)).await?;
                            }
                            shared::Line::Game(payload) => {
                                if idx == expected {
                                    return Ok(payload);
                                }
                                // Out-of-turn game input is treated as chat.
                                self.broadcast(&shared::chat_notice(&sender, &payload))
                                    .await?;
                            }
                        }
                    }
                }
            }
            if !processed {
                sleep(POLL_INTERVAL).await;
            }
        }
    }

    /// Closes both connections unconditionally.
    pub async fn close_all(self) {
        for player in self.players {
            player.close().await;
        }
    }
}
