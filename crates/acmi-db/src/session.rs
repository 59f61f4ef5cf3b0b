//! Session-row lifecycle: bind once per recording, mark terminal status,
//! create the per-session event partition.

use acmi_types::{Session, SessionStatus};
use tokio_postgres::error::SqlState;
use deadpool_postgres::GenericClient;

use crate::error::{DbError, Result};

/// Inserts the session row and creates its `event_<id>` partition.
/// A unique-violation on `start_time` surfaces as [`DbError::DuplicateSession`];
/// when `overwrite` is set the prior row (and its cascading children) is
/// deleted first instead.
pub async fn bind_session(
    client: &impl GenericClient,
    session: &Session,
    overwrite: bool,
) -> Result<i32> {
    if overwrite {
        if let Some(start_time) = session.start_time {
            client
                .execute("DELETE FROM session WHERE start_time = $1", &[&start_time])
                .await?;
        }
    }

    let status = SessionStatus::Running.as_str();
    let row = client
        .query_one(
            "INSERT INTO session (start_time, datasource, author, file_version, title, lat, \
             lon, client_version, status) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9) \
             RETURNING session_id",
            &[
                &session.start_time,
                &session.datasource,
                &session.author,
                &session.file_version,
                &session.title,
                &session.lat,
                &session.lon,
                &session.client_version,
                &status,
            ],
        )
        .await
        .map_err(|e| {
            if e.code() == Some(&SqlState::UNIQUE_VIOLATION) {
                DbError::DuplicateSession(
                    session
                        .start_time
                        .map(|t| t.to_string())
                        .unwrap_or_default(),
                )
            } else {
                DbError::Postgres(e)
            }
        })?;

    let session_id: i32 = row.get("session_id");
    create_event_partition(client, session_id).await?;
    Ok(session_id)
}

async fn create_event_partition(client: &impl GenericClient, session_id: i32) -> Result<()> {
    client
        .batch_execute(&format!(
            "CREATE TABLE IF NOT EXISTS event_{session_id} PARTITION OF event \
             FOR VALUES IN ({session_id})"
        ))
        .await?;
    Ok(())
}

pub async fn close_session(
    client: &impl GenericClient,
    session_id: i32,
    status: SessionStatus,
) -> Result<()> {
    let status = status.as_str();
    client
        .execute(
            "UPDATE session SET status = $1 WHERE session_id = $2",
            &[&status, &session_id],
        )
        .await?;
    Ok(())
}
