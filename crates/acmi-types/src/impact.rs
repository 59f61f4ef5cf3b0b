use serde::{Deserialize, Serialize};

/// A resolved weapon-to-target impact, queued for a prepared-statement
/// insert alongside the next event flush.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Impact {
    pub session_id: i32,
    /// The weapon's resolved parent, if one was found at creation time.
    pub killer: Option<i32>,
    pub target: i32,
    pub weapon: i32,
    pub time_offset: f64,
    pub impact_dist: f32,
}
