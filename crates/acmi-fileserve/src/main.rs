//! Serves a local ACMI recording (plain text, gzip, or zip) over TCP
//! using the same four-line handshake as a live telemetry source, so
//! `acmi-ingest` can be pointed at a file for bench/batch runs exactly
//! as it would a live server.

mod source;

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "acmi-fileserve", version)]
struct Args {
    /// ACMI recording to serve. A `.gz` suffix is decompressed with
    /// gzip; a `.zip` suffix serves the first entry.
    file: PathBuf,

    /// Port to listen on.
    #[arg(long, default_value_t = 42_674)]
    port: u16,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| "acmi_fileserve=info,info".into()),
        )
        .init();

    let args = Args::parse();
    let bytes = Arc::new(
        tokio::task::spawn_blocking(move || source::load(&args.file))
            .await
            .context("decompression task panicked")??,
    );

    let addr: SocketAddr = ([127, 0, 0, 1], args.port).into();
    let listener = TcpListener::bind(addr).await?;
    info!(%addr, bytes = bytes.len(), "serving recording");

    loop {
        let (socket, peer) = listener.accept().await?;
        let bytes = Arc::clone(&bytes);
        tokio::spawn(async move {
            if let Err(e) = handle_connection(socket, &bytes).await {
                warn!(%peer, error = %e, "connection ended with error");
            }
        });
    }
}

async fn handle_connection(mut socket: tokio::net::TcpStream, bytes: &[u8]) -> anyhow::Result<()> {
    consume_handshake(&mut socket).await?;
    socket.write_all(b"acmi-fileserve\n").await?;
    socket.write_all(bytes).await?;
    socket.shutdown().await?;
    Ok(())
}

/// Reads and discards the incoming handshake, up to and including its
/// NUL terminator.
async fn consume_handshake(socket: &mut tokio::net::TcpStream) -> anyhow::Result<()> {
    let mut byte = [0u8; 1];
    loop {
        let n = socket.read(&mut byte).await?;
        if n == 0 {
            anyhow::bail!("connection closed before handshake completed");
        }
        if byte[0] == 0 {
            return Ok(());
        }
    }
}
