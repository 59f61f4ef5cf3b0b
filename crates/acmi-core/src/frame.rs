//! Line Framer (C1): reads newline-terminated ACMI frames off any buffered
//! async byte source, and performs the four-line handshake.
//!
//! Generic over `AsyncBufRead`/`AsyncWrite` rather than `TcpStream`
//! directly, so the handshake and frame reader can be driven against a
//! `tokio::io::duplex` pair in tests without a real socket.

use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};

use crate::error::{AcmiError, Result};

const STREAM_PROTOCOL: &str = "XtraLib.Stream.0";
const TACVIEW_PROTOCOL: &str = "Tacview.RealTimeTelemetry.0";

/// Performs the client side of the ACMI real-time telemetry handshake:
/// four LF-separated tokens terminated by a NUL byte, then reads and
/// discards the single-line server acknowledgement.
pub async fn handshake<W, R>(
    mut writer: W,
    mut reader: R,
    client_name: &str,
    client_password: &str,
) -> Result<()>
where
    W: AsyncWrite + Unpin,
    R: AsyncBufRead + Unpin,
{
    let payload = format!(
        "{STREAM_PROTOCOL}\n{TACVIEW_PROTOCOL}\n{client_name}\n{client_password}\0"
    );
    writer.write_all(payload.as_bytes()).await?;
    writer.flush().await?;

    let mut ack = Vec::new();
    let n = reader.read_until(b'\n', &mut ack).await?;
    if n == 0 {
        return Err(AcmiError::Handshake(
            "peer closed connection during handshake".to_string(),
        ));
    }
    Ok(())
}

/// Reads one newline-terminated frame, stripped of its trailing `\n`.
/// Returns `Ok(None)` on a clean EOF (peer closed with no partial data).
pub async fn read_frame<R>(reader: &mut R) -> Result<Option<Vec<u8>>>
where
    R: AsyncBufRead + Unpin,
{
    let mut buf = Vec::new();
    let n = reader.read_until(b'\n', &mut buf).await?;
    if n == 0 {
        return Ok(None);
    }
    if buf.last() == Some(&b'\n') {
        buf.pop();
    }
    if buf.last() == Some(&b'\r') {
        buf.pop();
    }
    if buf.is_empty() {
        return Err(AcmiError::EndOfFile);
    }
    Ok(Some(buf))
}
