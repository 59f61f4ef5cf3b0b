//! Bulk Writer (C7): batches event snapshots, flushes them through a
//! staging table, and promotes into the canonical `event` partition and
//! the latest-state `object` row.

use acmi_types::{Event, Impact};
use deadpool_postgres::Pool;
use tracing::{debug, info};
use uuid::Uuid;

use crate::binary_copy::{self, EVENT_COLUMNS};
use crate::error::Result;

const UPDATE_SET: &str = "last_seen = EXCLUDED.last_seen, alive = EXCLUDED.alive, \
    lat = EXCLUDED.lat, lon = EXCLUDED.lon, alt = EXCLUDED.alt, roll = EXCLUDED.roll, \
    pitch = EXCLUDED.pitch, yaw = EXCLUDED.yaw, u_coord = EXCLUDED.u_coord, \
    v_coord = EXCLUDED.v_coord, heading = EXCLUDED.heading, \
    velocity_kts = EXCLUDED.velocity_kts, updates = EXCLUDED.updates";

pub struct BulkWriter {
    pool: Pool,
    batch_size: usize,
    buffer: Vec<Event>,
    impacts: Vec<Impact>,
}

impl BulkWriter {
    pub fn new(pool: Pool, batch_size: usize) -> Self {
        BulkWriter {
            pool,
            batch_size,
            buffer: Vec::new(),
            impacts: Vec::new(),
        }
    }

    pub fn add(&mut self, event: Event) {
        self.buffer.push(event);
    }

    pub fn queue_impact(&mut self, impact: Impact) {
        self.impacts.push(impact);
    }

    pub fn buffered_len(&self) -> usize {
        self.buffer.len()
    }

    /// Called on every time-tick frame; flushes only once the buffer has
    /// reached `batch_size`.
    pub async fn maybe_flush(&mut self, session_id: i32) -> Result<()> {
        if self.buffer.len() >= self.batch_size {
            self.flush(session_id).await?;
        }
        Ok(())
    }

    /// Unconditional flush, called at shutdown.
    pub async fn cleanup(&mut self, session_id: i32) -> Result<()> {
        self.flush(session_id).await
    }

    async fn flush(&mut self, session_id: i32) -> Result<()> {
        if self.buffer.is_empty() && self.impacts.is_empty() {
            return Ok(());
        }

        let mut client = self.pool.get().await?;
        let txn = client.transaction().await?;
        let staging = format!("staging_{}", Uuid::new_v4().simple());

        if !self.buffer.is_empty() {
            txn.batch_execute(&format!(
                "CREATE UNLOGGED TABLE \"{staging}\" (LIKE event_{session_id} INCLUDING DEFAULTS)"
            ))
            .await?;

            let copy_stmt = format!("COPY \"{staging}\" ({EVENT_COLUMNS}) FROM STDIN BINARY");
            binary_copy::write_events(&txn, &copy_stmt, &self.buffer).await?;

            debug!(rows = self.buffer.len(), %staging, "copied event batch into staging table");

            txn.batch_execute(&format!(
                "CREATE INDEX ON \"{staging}\" (id, updates DESC);
                 INSERT INTO event_{session_id} SELECT * FROM \"{staging}\";
                 INSERT INTO object (id, session_id, last_seen, alive, lat, lon, alt, roll, \
                     pitch, yaw, u_coord, v_coord, heading, velocity_kts, updates)
                 SELECT id, session_id, last_seen, alive, lat, lon, alt, roll, pitch, yaw, \
                     u_coord, v_coord, heading, velocity_kts, updates
                 FROM (
                     SELECT *, row_number() OVER (PARTITION BY id ORDER BY updates DESC) AS rn
                     FROM \"{staging}\"
                 ) evt
                 WHERE rn = 1
                 ON CONFLICT (id) DO UPDATE SET {UPDATE_SET}
                 WHERE object.updates < EXCLUDED.updates;
                 DROP TABLE \"{staging}\";"
            ))
            .await?;
        }

        if !self.impacts.is_empty() {
            let insert_stmt = txn
                .prepare(
                    "INSERT INTO impact (session_id, killer, target, weapon, time_offset, \
                     impact_dist) VALUES ($1, $2, $3, $4, $5, $6)",
                )
                .await?;
            // `impacted`/`impacted_dist` on the weapon's own object row are the
            // same resolution that produced this Impact row; neither the Event
            // snapshot nor the `event` table carries relational fields (they are
            // out of scope for a per-tick kinematic record), so this is the one
            // place that writes them rather than routing them through the
            // batched event upsert above.
            let object_stmt = txn
                .prepare("UPDATE object SET impacted = $1, impacted_dist = $2 WHERE id = $3")
                .await?;
            for impact in &self.impacts {
                txn.execute(
                    &insert_stmt,
                    &[
                        &impact.session_id,
                        &impact.killer,
                        &impact.target,
                        &impact.weapon,
                        &impact.time_offset,
                        &impact.impact_dist,
                    ],
                )
                .await?;
                txn.execute(
                    &object_stmt,
                    &[&impact.target, &impact.impact_dist, &impact.weapon],
                )
                .await?;
            }
        }

        txn.commit().await?;
        info!(
            events = self.buffer.len(),
            impacts = self.impacts.len(),
            session_id,
            "promoted event batch"
        );
        self.buffer.clear();
        self.impacts.clear();
        Ok(())
    }
}
