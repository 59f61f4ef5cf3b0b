//! The out-of-band single-row insert issued the first time a record is
//! observed, populating `ObjectRec.id` so later frames (parent/impact
//! resolution, event snapshots) can reference it.

use acmi_types::ObjectRec;
use deadpool_postgres::GenericClient;

use crate::error::Result;

const INSERT_SQL: &str = "INSERT INTO object \
    (tac_id, session_id, name, color, country, grp, pilot, type, alive, coalition, \
     first_seen, last_seen, lat, lon, alt, roll, pitch, yaw, u_coord, v_coord, heading, \
     velocity_kts, updates, can_be_parent, parent, parent_dist) \
    VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16, $17, $18, \
            $19, $20, $21, $22, $23, $24, $25, $26) \
    RETURNING id";

/// `rec` must already carry the parent resolved by the Relationship
/// Resolver (C5) — `create_single` is called after `resolve_and_assign_parent`
/// has run, so `rec.parent`/`rec.parent_dist` are the final values for this row.
pub async fn create_single(client: &impl GenericClient, rec: &ObjectRec) -> Result<i32> {
    let color = rec.color.map(color_label);
    let coalition = rec.coalition.map(coalition_label);
    let row = client
        .query_one(
            INSERT_SQL,
            &[
                &(rec.tac_id as i32),
                &rec.session_id,
                &rec.name,
                &color,
                &rec.country,
                &rec.grp,
                &rec.pilot,
                &rec.rec_type,
                &rec.alive,
                &coalition,
                &rec.first_seen,
                &rec.last_seen,
                &rec.lat,
                &rec.lon,
                &rec.alt,
                &rec.roll,
                &rec.pitch,
                &rec.yaw,
                &rec.u_coord,
                &rec.v_coord,
                &rec.heading,
                &rec.velocity_kts,
                &rec.updates,
                &rec.can_be_parent,
                &rec.parent,
                &rec.parent_dist,
            ],
        )
        .await?;
    Ok(row.get("id"))
}

fn color_label(color: acmi_types::Color) -> &'static str {
    match color {
        acmi_types::Color::Red => "Red",
        acmi_types::Color::Blue => "Blue",
        acmi_types::Color::Violet => "Violet",
        acmi_types::Color::Grey => "Grey",
    }
}

fn coalition_label(coalition: acmi_types::Coalition) -> &'static str {
    match coalition {
        acmi_types::Coalition::Enemies => "Enemies",
        acmi_types::Coalition::Allies => "Allies",
        acmi_types::Coalition::Neutral => "Neutral",
        acmi_types::Coalition::Neutrals => "Neutrals",
    }
}
