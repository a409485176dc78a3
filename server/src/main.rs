use clap::Parser;
use log::info;
use std::net::SocketAddr;
use tokio::net::{TcpListener, TcpSocket};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Server IP address to bind to
    #[arg(short = 'H', long, default_value = "0.0.0.0")]
    host: String,

    /// Server port to listen on
    #[arg(short, long, default_value_t = shared::DEFAULT_PORT)]
    port: u16,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    env_logger::init();

    if std::env::var("RUST_LOG").is_err() {
        eprintln!("Set RUST_LOG=info for detailed logging");
    }

    let args = Args::parse();

    let addr = if args.host.contains(':') {
        format!("[{}]:{}", args.host, args.port).parse()?
    } else {
        format!("{}:{}", args.host, args.port).parse()?
    };
    let listener = bind(addr)?;
    info!("Server is running on port {}", args.port);

    tokio::select! {
        result = server::session::run(listener) => {
            result?;
        }
        _ = tokio::signal::ctrl_c() => {
            info!("Received Ctrl+C, shutting down gracefully...");
        }
    }

    Ok(())
}

/// Binds a listener with the protocol's small explicit backlog, matching
/// the socket family to the requested address.
fn bind(addr: SocketAddr) -> std::io::Result<TcpListener> {
    let socket = match addr {
        SocketAddr::V4(_) => TcpSocket::new_v4()?,
        SocketAddr::V6(_) => TcpSocket::new_v6()?,
    };
    socket.set_reuseaddr(true)?;
    socket.bind(addr)?;
    socket.listen(shared::BACKLOG)
}
