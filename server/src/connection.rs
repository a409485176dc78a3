//! Per-player connection handling
//!
//! Each accepted socket goes through a one-time name handshake and is then
//! wrapped in a [`Connection`]: the read half moves into a dedicated reader
//! task that forwards complete lines into an unbounded channel, and the
//! session task polls that channel without ever blocking on the socket.
//! The channel closing is the sole disconnect signal — the reader task
//! exits on end-of-stream or a read error and drops its sender.

use log::{debug, info, warn};
use std::io;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::net::tcp::OwnedWriteHalf;
use tokio::net::TcpStream;
use tokio::sync::mpsc;
use tokio::sync::mpsc::error::TryRecvError;

/// Result of a non-blocking poll of a connection's inbound line queue.
#[derive(Debug)]
pub enum Inbound {
    /// A complete line was waiting.
    Line(String),
    /// Nothing ready right now.
    Empty,
    /// The peer hung up; no further lines will arrive.
    Closed,
}

/// One player's bidirectional text stream plus their display name.
///
/// The write side is owned here and only ever touched by the session task;
/// the read side lives in the reader task spawned during [`admit`].
#[derive(Debug)]
pub struct Connection {
    name: String,
    lines: mpsc::UnboundedReceiver<String>,
    writer: OwnedWriteHalf,
}

/// Runs the name-collection handshake on a fresh socket and promotes it to
/// a [`Connection`].
///
/// Blocks until the client has sent a name line. Intended to run on its own
/// task per accepted socket; the session controller joins the task as the
/// admission completion signal.
pub async fn admit(stream: TcpStream) -> io::Result<Connection> {
    let peer = stream.peer_addr()?;
    let (read_half, mut writer) = stream.into_split();
    let mut reader = BufReader::new(read_half).lines();

    send_line(&mut writer, shared::ENTER_NAME).await?;
    let name = match reader.next_line().await? {
        Some(line) => line.trim().to_string(),
        None => {
            return Err(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                "client disconnected before sending a name",
            ))
        }
    };
    info!("Player joined: {} ({})", name, peer);
    send_line(&mut writer, &shared::welcome(&name)).await?;

    let (tx, rx) = mpsc::unbounded_channel();
    tokio::spawn(async move {
        loop {
            match reader.next_line().await {
                Ok(Some(line)) => {
                    if tx.send(line).is_err() {
                        // Session is gone, stop reading.
                        break;
                    }
                }
                Ok(None) => {
                    debug!("End of stream from {}", peer);
                    break;
                }
                Err(e) => {
                    warn!("Read error from {}: {}", peer, e);
                    break;
                }
            }
        }
    });

    Ok(Connection {
        name,
        lines: rx,
        writer,
    })
}

impl Connection {
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Non-blocking check for the next inbound line.
    pub fn poll_line(&mut self) -> Inbound {
        match self.lines.try_recv() {
            Ok(line) => Inbound::Line(line),
            Err(TryRecvError::Empty) => Inbound::Empty,
            Err(TryRecvError::Disconnected) => Inbound::Closed,
        }
    }

    /// Writes one newline-terminated line to the player.
    pub async fn send(&mut self, line: &str) -> io::Result<()> {
        send_line(&mut self.writer, line).await
    }

    /// Shuts down the write side. The reader task exits on its own once the
    /// peer closes in response.
    pub async fn close(mut self) {
        if let Err(e) = self.writer.shutdown().await {
            debug!("Error closing connection to {}: {}", self.name, e);
        }
    }
}

async fn send_line(writer: &mut OwnedWriteHalf, line: &str) -> io::Result<()> {
    writer.write_all(line.as_bytes()).await?;
    writer.write_all(b"\n").await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
    use tokio::net::{TcpListener, TcpStream};

    async fn handshake_pair() -> (Connection, BufReader<TcpStream>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        let client = tokio::spawn(async move {
            let stream = TcpStream::connect(addr).await.unwrap();
            let mut reader = BufReader::new(stream);
            let mut prompt = String::new();
            reader.read_line(&mut prompt).await.unwrap();
            assert_eq!(prompt.trim_end(), shared::ENTER_NAME);
            reader
                .get_mut()
                .write_all(b"Alice\n")
                .await
                .unwrap();
            let mut welcome = String::new();
            reader.read_line(&mut welcome).await.unwrap();
            assert_eq!(welcome.trim_end(), "Welcome, Alice!");
            reader
        });

        let (stream, _) = listener.accept().await.unwrap();
        let conn = admit(stream).await.unwrap();
        (conn, client.await.unwrap())
    }

    #[tokio::test]
    async fn handshake_sets_name() {
        let (conn, _client) = handshake_pair().await;
        assert_eq!(conn.name(), "Alice");
    }

    #[tokio::test]
    async fn poll_line_is_non_blocking() {
        let (mut conn, mut client) = handshake_pair().await;
        assert!(matches!(conn.poll_line(), Inbound::Empty));

        client.get_mut().write_all(b"hello\n").await.unwrap();
        // Give the reader task a moment to forward the line.
        tokio::time::sleep(std::time::Duration::from_millis(100)).await;

        match conn.poll_line() {
            Inbound::Line(line) => assert_eq!(line, "hello"),
            other => panic!("expected a line, got {:?}", other),
        }
        assert!(matches!(conn.poll_line(), Inbound::Empty));
    }

    #[tokio::test]
    async fn peer_hangup_reports_closed() {
        let (mut conn, client) = handshake_pair().await;
        drop(client);
        tokio::time::sleep(std::time::Duration::from_millis(100)).await;
        assert!(matches!(conn.poll_line(), Inbound::Closed));
    }

    #[tokio::test]
    async fn send_delivers_one_line() {
        let (mut conn, mut client) = handshake_pair().await;
        conn.send("Enter a letter:").await.unwrap();
        let mut line = String::new();
        client.read_line(&mut line).await.unwrap();
        assert_eq!(line, "Enter a letter:\n");
    }
}
