//! Packs `Event` rows into the Postgres binary COPY wire format.
//!
//! `tokio_postgres::binary_copy::BinaryCopyInWriter` already implements
//! the exact layout this pipeline's reference design describes by hand
//! (the `PGCOPY\n\377\r\n\0` signature, the two zero words, the per-row
//! `int16` field count, and `(int32 length, bytes)*` framing terminated
//! by `int16 -1`) — so the field list below is the one place that layout
//! is pinned, rather than a hand-rolled packer.

use acmi_types::Event;
use futures::pin_mut;
use tokio_postgres::binary_copy::BinaryCopyInWriter;
use tokio_postgres::types::{ToSql, Type};
use tokio_postgres::Transaction;

use crate::error::Result;

pub const EVENT_COLUMNS: &str = "id, session_id, last_seen, alive, lat, lon, alt, roll, pitch, \
yaw, u_coord, v_coord, heading, velocity_kts, updates";

pub fn event_column_types() -> Vec<Type> {
    vec![
        Type::INT4,
        Type::INT4,
        Type::FLOAT4,
        Type::BOOL,
        Type::FLOAT4,
        Type::FLOAT4,
        Type::FLOAT4,
        Type::FLOAT4,
        Type::FLOAT4,
        Type::FLOAT4,
        Type::FLOAT4,
        Type::FLOAT4,
        Type::FLOAT4,
        Type::FLOAT4,
        Type::INT4,
    ]
}

/// Streams `events` into `copy_stmt` (a `COPY ... FROM STDIN BINARY`
/// statement already addressed at the target staging table).
pub async fn write_events(
    client: &Transaction<'_>,
    copy_stmt: &str,
    events: &[Event],
) -> Result<()> {
    let sink = client.copy_in(copy_stmt).await?;
    let writer = BinaryCopyInWriter::new(sink, &event_column_types());
    pin_mut!(writer);

    for event in events {
        let row: [&(dyn ToSql + Sync); 15] = [
            &event.id,
            &event.session_id,
            &event.last_seen,
            &event.alive,
            &event.lat,
            &event.lon,
            &event.alt,
            &event.roll,
            &event.pitch,
            &event.yaw,
            &event.u_coord,
            &event.v_coord,
            &event.heading,
            &event.velocity_kts,
            &event.updates,
        ];
        writer.as_mut().write(&row).await?;
    }

    writer.finish().await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn column_list_and_type_vec_agree_on_width() {
        let names: Vec<&str> = EVENT_COLUMNS.split(',').map(str::trim).collect();
        assert_eq!(names.len(), event_column_types().len());
        assert_eq!(names.len(), 15);
    }

    #[test]
    fn bool_column_is_the_fourth_field() {
        let names: Vec<&str> = EVENT_COLUMNS.split(',').map(str::trim).collect();
        assert_eq!(names[3], "alive");
        assert_eq!(event_column_types()[3], Type::BOOL);
    }
}
