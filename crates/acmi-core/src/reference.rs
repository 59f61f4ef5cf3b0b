//! Reference State (C2): accumulates the session header fields and owns
//! the monotonic time offset.
//!
//! Session-row persistence itself is a database concern (`acmi-db`); this
//! type only tracks when enough header fields are known to bind one
//! (`all_refs`) and hands the caller the accumulated `Session` to insert.

use acmi_types::Session;
use chrono::{NaiveDateTime, Timelike};

use crate::error::{AcmiError, Result};

const RECORDING_TIME_FMT: &str = "%Y-%m-%dT%H:%M:%S%.fZ";

#[derive(Debug, Default)]
pub struct Ref {
    pub session: Session,
    pub all_refs: bool,
    pub time_offset: f64,
    pub time_since_last: f64,
}

impl Ref {
    pub fn new() -> Self {
        Ref::default()
    }

    /// Applies one `0,<KEY>=<VAL>` header's fields. Returns `true` the
    /// instant `all_refs` newly becomes true (lat, lon, and start_time all
    /// known) — the caller must then insert the session row and call
    /// [`Ref::bind_session_id`]. After `session_id` is bound, header
    /// frames are accepted but ignored (the pre-`all_refs` gate is
    /// authoritative; this keeps stray `0,…` frames from re-triggering
    /// session creation).
    pub fn apply_header(&mut self, fields: &[(String, String)]) -> Result<bool> {
        if self.session.session_id.is_some() {
            return Ok(false);
        }

        for (key, val) in fields {
            match key.as_str() {
                "ReferenceLatitude" => {
                    self.session.lat = Some(val.parse().map_err(|_| {
                        AcmiError::MalformedFrame(format!("bad ReferenceLatitude: {val}"))
                    })?);
                }
                "ReferenceLongitude" => {
                    self.session.lon = Some(val.parse().map_err(|_| {
                        AcmiError::MalformedFrame(format!("bad ReferenceLongitude: {val}"))
                    })?);
                }
                "DataSource" => self.session.datasource = Some(val.clone()),
                "Title" => self.session.title = Some(val.clone()),
                "Author" => self.session.author = Some(val.clone()),
                "FileVersion" => {
                    self.session.file_version = val.parse().ok();
                }
                "RecordingTime" => {
                    self.session.start_time = Some(parse_recording_time(val)?);
                }
                _ => {}
            }
        }

        let became_ready = !self.all_refs && self.is_ready();
        if became_ready {
            self.all_refs = true;
        }
        Ok(became_ready)
    }

    fn is_ready(&self) -> bool {
        self.session.lat.is_some()
            && self.session.lon.is_some()
            && self.session.start_time.is_some()
    }

    pub fn bind_session_id(&mut self, session_id: i32) {
        self.session.session_id = Some(session_id);
    }

    pub fn session_id(&self) -> Option<i32> {
        self.session.session_id
    }

    /// Advances the time base from a `#<seconds>` tick.
    pub fn update_time(&mut self, offset: f64) {
        self.time_since_last = offset - self.time_offset;
        self.time_offset = offset;
    }
}

fn parse_recording_time(raw: &str) -> Result<NaiveDateTime> {
    let parsed = NaiveDateTime::parse_from_str(raw, RECORDING_TIME_FMT)
        .map_err(|e| AcmiError::MalformedFrame(format!("bad RecordingTime {raw}: {e}")))?;
    // Truncate to second precision: the session row is UNIQUE on
    // start_time and traces disagree on sub-second digits for the same
    // recording.
    Ok(parsed.with_nanosecond(0).unwrap_or(parsed))
}
