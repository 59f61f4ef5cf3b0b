use serde::{Deserialize, Serialize};

use crate::session::{Coalition, Color};

/// The latest known state of one tracked ACMI object.
///
/// Field defaults mirror the reference dataclass this type is modeled on:
/// altitude defaults to 1 (ground-level objects often omit `T=` altitude
/// entirely), the attitude/derived fields default to zero.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ObjectRec {
    pub tac_id: u32,
    pub id: Option<i32>,
    pub session_id: i32,

    pub name: Option<String>,
    pub color: Option<Color>,
    pub country: Option<String>,
    pub grp: Option<String>,
    pub pilot: Option<String>,
    pub rec_type: Option<String>,
    pub coalition: Option<Coalition>,

    pub alive: bool,
    pub first_seen: f64,
    pub last_seen: f64,
    pub secs_since_last_seen: f64,

    pub lat: f64,
    pub lon: f64,
    pub alt: f32,
    pub roll: f32,
    pub pitch: f32,
    pub yaw: f32,
    pub u_coord: f32,
    pub v_coord: f32,
    pub heading: f32,
    pub velocity_kts: f32,

    pub impacted: Option<i32>,
    pub impacted_dist: Option<f32>,
    pub parent: Option<i32>,
    pub parent_dist: Option<f32>,

    pub updates: i32,
    pub can_be_parent: bool,
    pub should_have_parent: bool,
    pub written: bool,
}

impl ObjectRec {
    pub fn new(tac_id: u32, session_id: i32, first_seen: f64) -> Self {
        ObjectRec {
            tac_id,
            id: None,
            session_id,
            name: None,
            color: None,
            country: None,
            grp: None,
            pilot: None,
            rec_type: None,
            coalition: None,
            alive: true,
            first_seen,
            last_seen: first_seen,
            secs_since_last_seen: 0.0,
            lat: 0.0,
            lon: 0.0,
            alt: 1.0,
            roll: 0.0,
            pitch: 0.0,
            yaw: 0.0,
            u_coord: 0.0,
            v_coord: 0.0,
            heading: 0.0,
            velocity_kts: 0.0,
            impacted: None,
            impacted_dist: None,
            parent: None,
            parent_dist: None,
            updates: 1,
            can_be_parent: false,
            should_have_parent: false,
            written: false,
        }
    }

    /// Types that can never be a parent: decoys, misc debris, weapons in
    /// flight, projectiles, and ground/air parachutists.
    pub fn type_can_be_parent(rec_type: &str) -> bool {
        const EXCLUDED: [&str; 5] = [
            "Decoy",
            "Misc",
            "Weapon",
            "Projectile",
            "Ground+Light+Human+Air+Parachutist",
        ];
        !EXCLUDED.iter().any(|needle| rec_type.contains(needle))
    }

    /// Types that are expected to have a parent resolved on first sighting.
    pub fn type_should_have_parent(rec_type: &str) -> bool {
        const INCLUDED: [&str; 5] = ["Weapon", "Projectile", "Decoy", "Container", "Flare"];
        INCLUDED.iter().any(|needle| rec_type.contains(needle))
    }
}
