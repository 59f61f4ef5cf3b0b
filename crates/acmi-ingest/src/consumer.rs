//! Consumer Loop (C8): the single cooperative task that drives the line
//! framer, the engine (C2-C6), and the bulk writer (C7) end to end.

use std::time::Duration;

use acmi_core::engine::{Engine, Outcome};
use acmi_core::frame;
use acmi_db::BulkWriter;
use acmi_types::{Event, RunConfig, SessionStatus};
use anyhow::{Context, Result};
use tokio::io::{AsyncBufRead, BufReader};
use tokio::net::TcpStream;
use tokio::sync::watch;
use tracing::{info, warn};

const HANDSHAKE_RETRY_BACKOFF: Duration = Duration::from_secs(3);

/// Connects to `host:port`, retrying indefinitely on a fixed 3-second
/// back-off until a connection succeeds or `cancel` fires.
pub async fn connect_with_retry(
    host: &str,
    port: u16,
    cancel: &mut watch::Receiver<bool>,
) -> Result<Option<TcpStream>> {
    loop {
        match TcpStream::connect((host, port)).await {
            Ok(stream) => return Ok(Some(stream)),
            Err(e) => {
                warn!(host, port, error = %e, "connection failed, retrying in 3s");
                tokio::select! {
                    _ = tokio::time::sleep(HANDSHAKE_RETRY_BACKOFF) => {}
                    _ = cancel.changed() => {
                        if *cancel.borrow() {
                            return Ok(None);
                        }
                    }
                }
            }
        }
    }
}

pub async fn run(config: RunConfig, pool: deadpool_postgres::Pool, mut cancel: watch::Receiver<bool>) -> Result<()> {
    let Some(stream) = connect_with_retry(&config.host, config.port, &mut cancel).await? else {
        info!("cancelled before a connection was established");
        return Ok(());
    };

    let (read_half, write_half) = stream.into_split();
    let mut reader = BufReader::new(read_half);
    frame::handshake(write_half, &mut reader, &config.client_name, &config.client_password)
        .await
        .context("handshake failed")?;

    drive(&mut reader, config, pool, cancel).await
}

async fn drive<R>(
    reader: &mut R,
    config: RunConfig,
    pool: deadpool_postgres::Pool,
    mut cancel: watch::Receiver<bool>,
) -> Result<()>
where
    R: AsyncBufRead + Unpin,
{
    let mut engine = Engine::new();
    let mut writer = BulkWriter::new(pool.clone(), config.batch_size);
    let mut iters: u64 = 0;
    let mut status = SessionStatus::Running;
    let mut final_error: Option<anyhow::Error> = None;

    'outer: loop {
        let frame = tokio::select! {
            frame = frame::read_frame(reader) => frame,
            _ = cancel.changed() => {
                if *cancel.borrow() {
                    info!("cancellation requested, shutting down gracefully");
                    break 'outer;
                }
                continue;
            }
        };

        let raw = match frame {
            Ok(Some(raw)) => raw,
            Ok(None) => break 'outer,
            Err(acmi_core::AcmiError::EndOfFile) => break 'outer,
            Err(e) => {
                status = SessionStatus::Error;
                final_error = Some(e.into());
                break 'outer;
            }
        };

        match engine.process(&raw) {
            Ok(Outcome::HeaderAccumulated) => {}
            Ok(Outcome::SessionReady) => {
                let client = pool.get().await?;
                let session_id = match acmi_db::session::bind_session(&client, &engine.reference.session, config.overwrite).await {
                    Ok(id) => id,
                    Err(acmi_db::DbError::DuplicateSession(start_time)) => {
                        status = SessionStatus::Error;
                        final_error = Some(anyhow::anyhow!(
                            "session with start_time {start_time} already processed; \
                             re-run with --overwrite"
                        ));
                        break 'outer;
                    }
                    Err(e) => return Err(e.into()),
                };
                engine.bind_session_id(session_id);
                info!(session_id, "session bound");
            }
            Ok(Outcome::Tick(_)) => {
                if let Some(session_id) = engine.reference.session_id() {
                    writer.maybe_flush(session_id).await?;
                }
            }
            Ok(Outcome::Created(rec)) => {
                let client = pool.get().await?;
                let id = acmi_db::object::create_single(&client, &rec).await?;
                engine.bind_object_id(rec.tac_id, id);
                let rec = engine.store.get(rec.tac_id).unwrap().clone();
                writer.add(Event::from(&rec));
            }
            Ok(Outcome::Updated(rec)) => {
                if rec.id.is_some() {
                    writer.add(Event::from(&rec));
                }
            }
            Ok(Outcome::Removed { rec, impact }) => {
                if rec.id.is_some() {
                    writer.add(Event::from(&rec));
                }
                if let Some(impact) = impact {
                    writer.queue_impact(impact);
                }
            }
            Err(e) => {
                status = SessionStatus::Error;
                final_error = Some(e.into());
                break 'outer;
            }
        }

        iters += 1;
        if let Some(max) = config.max_iters {
            if iters >= max {
                info!(max_iters = max, "max iterations reached");
                break 'outer;
            }
        }
    }

    if status == SessionStatus::Running {
        status = SessionStatus::Success;
    }

    if let Some(session_id) = engine.reference.session_id() {
        writer.cleanup(session_id).await?;
        let client = pool.get().await?;
        acmi_db::session::close_session(&client, session_id, status).await?;
    }

    if let Some(err) = final_error {
        return Err(err);
    }
    Ok(())
}
