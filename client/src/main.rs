//! Terminal client for the word-guessing server.
//!
//! Prints every server line to stdout and forwards every stdin line to the
//! server. Game prompts, chat (`@chat:<text>`) and replay answers all
//! travel over the same connection; type `exit` to quit.

use clap::Parser;
use log::debug;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::net::TcpStream;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Server address to connect to
    #[arg(short = 's', long, default_value_t = format!("127.0.0.1:{}", shared::DEFAULT_PORT))]
    server: String,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let args = Args::parse();

    let stream = TcpStream::connect(&args.server).await?;
    println!("Connected to server.");

    let (read_half, mut write_half) = stream.into_split();
    let mut server_lines = BufReader::new(read_half).lines();
    let mut stdin_lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        tokio::select! {
            line = server_lines.next_line() => {
                match line? {
                    Some(line) => println!("{}", line),
                    None => {
                        println!("Disconnected from server.");
                        break;
                    }
                }
            }
            line = stdin_lines.next_line() => {
                match line? {
                    Some(line) => {
                        debug!("Sending: {}", line);
                        write_half.write_all(line.as_bytes()).await?;
                        write_half.write_all(b"\n").await?;
                        if line.eq_ignore_ascii_case("exit") {
                            println!("Disconnected from server.");
                            break;
                        }
                    }
                    None => break,
                }
            }
        }
    }

    Ok(())
}
