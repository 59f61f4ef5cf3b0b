use serde::{Deserialize, Serialize};

/// One point-in-time snapshot of an object, written in bulk via binary COPY
/// into the per-session `event_<id>` partition.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Event {
    pub id: i32,
    pub session_id: i32,
    pub last_seen: f32,
    pub alive: bool,
    pub lat: f32,
    pub lon: f32,
    pub alt: f32,
    pub roll: f32,
    pub pitch: f32,
    pub yaw: f32,
    pub u_coord: f32,
    pub v_coord: f32,
    pub heading: f32,
    pub velocity_kts: f32,
    pub updates: i32,
}

impl From<&crate::object::ObjectRec> for Event {
    fn from(rec: &crate::object::ObjectRec) -> Self {
        Event {
            id: rec.id.expect("event snapshot requires a written object id"),
            session_id: rec.session_id,
            last_seen: rec.last_seen as f32,
            alive: rec.alive,
            lat: rec.lat as f32,
            lon: rec.lon as f32,
            alt: rec.alt,
            roll: rec.roll,
            pitch: rec.pitch,
            yaw: rec.yaw,
            u_coord: rec.u_coord,
            v_coord: rec.v_coord,
            heading: rec.heading,
            velocity_kts: rec.velocity_kts,
            updates: rec.updates,
        }
    }
}
