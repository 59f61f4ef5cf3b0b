//! Orchestrates C2–C6 per frame: the reference state, the object store,
//! field application, and the relationship resolver. This is the piece
//! the consumer loop (C8, in `acmi-ingest`) drives one frame at a time;
//! everything here is pure and synchronous so it is fully testable
//! without a socket or a database.

use acmi_types::{Coalition, Color, Impact, ObjectRec};

use crate::decode::{self, Coords, Frame};
use crate::error::{AcmiError, Result};
use crate::geo;
use crate::reference::Ref;
use crate::resolver::{self, ContactKind};
use crate::store::ObjectStore;

#[derive(Debug, Clone)]
pub enum Outcome {
    /// A header field was absorbed; session not yet ready to bind.
    HeaderAccumulated,
    /// `all_refs` just became true. The caller must insert the session
    /// row and call [`Engine::bind_session_id`] before the next frame.
    SessionReady,
    Tick(f64),
    /// A brand-new object was created. The caller must assign a
    /// persisted id via [`Engine::bind_object_id`] before the next frame,
    /// then may snapshot an event row from the returned record.
    Created(ObjectRec),
    Updated(ObjectRec),
    Removed {
        rec: ObjectRec,
        impact: Option<Impact>,
    },
}

#[derive(Default)]
pub struct Engine {
    pub reference: Ref,
    pub store: ObjectStore,
}

impl Engine {
    pub fn new() -> Self {
        Engine::default()
    }

    pub fn bind_session_id(&mut self, session_id: i32) {
        self.reference.bind_session_id(session_id);
    }

    pub fn bind_object_id(&mut self, tac_id: u32, id: i32) {
        if let Some(rec) = self.store.get_mut(tac_id) {
            rec.id = Some(id);
            rec.written = true;
        }
    }

    pub fn process(&mut self, raw: &[u8]) -> Result<Outcome> {
        match decode::decode(raw)? {
            Frame::Header(fields) => {
                let became_ready = self.reference.apply_header(&fields)?;
                Ok(if became_ready {
                    Outcome::SessionReady
                } else {
                    Outcome::HeaderAccumulated
                })
            }
            Frame::Tick(secs) => {
                self.reference.update_time(secs);
                Ok(Outcome::Tick(secs))
            }
            Frame::Update { tac_id, fields } => self.apply_update(tac_id, &fields),
            Frame::Remove { tac_id } => self.apply_removal(tac_id),
        }
    }

    fn apply_update(&mut self, tac_id: u32, fields: &[(String, String)]) -> Result<Outcome> {
        let session_id = self
            .reference
            .session_id()
            .ok_or_else(|| AcmiError::MalformedFrame("object update before session bound".into()))?;

        let is_new = !self.store.contains(tac_id);
        if is_new {
            self.store
                .insert(ObjectRec::new(tac_id, session_id, self.reference.time_offset));
        }

        {
            let rec = self.store.get_mut(tac_id).expect("just inserted or present");
            let prev_ecef = geo::geodetic_to_ecef(rec.lat, rec.lon, rec.alt as f64);
            if !is_new {
                rec.secs_since_last_seen = self.reference.time_offset - rec.last_seen;
                rec.last_seen = self.reference.time_offset;
                rec.updates += 1;
            }
            apply_fields(rec, fields, self.reference.session.lat, self.reference.session.lon)?;

            let new_ecef = geo::geodetic_to_ecef(rec.lat, rec.lon, rec.alt as f64);
            if rec.secs_since_last_seen > 0.0 {
                let dist = geo::distance(prev_ecef, new_ecef);
                rec.velocity_kts = geo::velocity_kts(dist, rec.secs_since_last_seen);
            }
        }

        let should_resolve_parent = {
            let rec = self.store.get(tac_id).unwrap();
            rec.updates == 1 && rec.should_have_parent
        };
        if should_resolve_parent {
            self.resolve_and_assign_parent(tac_id);
        }

        let rec = self.store.get(tac_id).unwrap().clone();
        Ok(if is_new {
            Outcome::Created(rec)
        } else {
            Outcome::Updated(rec)
        })
    }

    fn resolve_and_assign_parent(&mut self, tac_id: u32) {
        let subject = self.store.get(tac_id).unwrap().clone();
        let Some(contact) = resolver::resolve(&self.store, &subject, ContactKind::Parent) else {
            return;
        };
        let Some(candidate) = self.store.get(contact.tac_id) else {
            return;
        };
        let Some(parent_id) = candidate.id else {
            return;
        };
        let rec = self.store.get_mut(tac_id).unwrap();
        rec.parent = Some(parent_id);
        rec.parent_dist = Some(contact.dist as f32);
    }

    fn apply_removal(&mut self, tac_id: u32) -> Result<Outcome> {
        let rec = self
            .store
            .get_mut(tac_id)
            .ok_or_else(|| AcmiError::MalformedFrame(format!("removal of unknown id {tac_id:x}")))?;
        rec.alive = false;
        rec.updates += 1;

        let is_weapon = rec
            .rec_type
            .as_deref()
            .is_some_and(|t| t.contains("Weapon") || t.contains("Projectile"));

        let mut impact = None;
        if is_weapon {
            let subject = self.store.get(tac_id).unwrap().clone();
            if let Some(contact) = resolver::resolve(&self.store, &subject, ContactKind::Impacted) {
                if let Some(target) = self.store.get(contact.tac_id) {
                    if let (Some(target_id), Some(weapon_id)) = (target.id, subject.id) {
                        impact = Some(Impact {
                            session_id: subject.session_id,
                            killer: subject.parent,
                            target: target_id,
                            weapon: weapon_id,
                            time_offset: self.reference.time_offset,
                            impact_dist: contact.dist as f32,
                        });
                    }
                }
            }
        }

        let rec = self.store.get(tac_id).unwrap().clone();
        Ok(Outcome::Removed { rec, impact })
    }
}

fn apply_fields(
    rec: &mut ObjectRec,
    fields: &[(String, String)],
    origin_lat: Option<f64>,
    origin_lon: Option<f64>,
) -> Result<()> {
    for (key, val) in fields {
        match key.as_str() {
            "Name" => rec.name = Some(val.clone()),
            "Color" => rec.color = Color::parse(val),
            "Country" => rec.country = Some(val.clone()),
            "Group" => rec.grp = Some(val.clone()),
            "Pilot" => rec.pilot = Some(val.clone()),
            "Coalition" => rec.coalition = Coalition::parse(val),
            "Type" => {
                rec.rec_type = Some(val.clone());
                rec.can_be_parent = ObjectRec::type_can_be_parent(val);
                rec.should_have_parent = ObjectRec::type_should_have_parent(val);
            }
            "T" => {
                let coords = decode::parse_coords(val)?;
                apply_coords(rec, coords, origin_lat, origin_lon);
            }
            _ => {}
        }
    }
    Ok(())
}

fn apply_coords(rec: &mut ObjectRec, coords: Coords, origin_lat: Option<f64>, origin_lon: Option<f64>) {
    if let Some(lon) = coords.lon {
        rec.lon = lon + origin_lon.unwrap_or(0.0);
    }
    if let Some(lat) = coords.lat {
        rec.lat = lat + origin_lat.unwrap_or(0.0);
    }
    if let Some(alt) = coords.alt {
        rec.alt = alt;
    }
    if let Some(roll) = coords.roll {
        rec.roll = roll;
    }
    if let Some(pitch) = coords.pitch {
        rec.pitch = pitch;
    }
    if let Some(yaw) = coords.yaw {
        rec.yaw = yaw;
    }
    if let Some(u) = coords.u_coord {
        rec.u_coord = u;
    }
    if let Some(v) = coords.v_coord {
        rec.v_coord = v;
    }
    if let Some(heading) = coords.heading {
        rec.heading = heading;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn header(key: &str, val: &str) -> Vec<(String, String)> {
        vec![(key.to_string(), val.to_string())]
    }

    #[test]
    fn session_becomes_ready_after_lat_lon_and_time() {
        let mut engine = Engine::new();
        engine.process(b"0,ReferenceLatitude=0.0").unwrap();
        engine.process(b"0,ReferenceLongitude=0.0").unwrap();
        let outcome = engine
            .process(b"0,RecordingTime=2019-01-01T12:12:01.101Z")
            .unwrap();
        assert!(matches!(outcome, Outcome::SessionReady));
    }

    #[test]
    fn creation_then_update_changes_position_but_not_descriptive_fields() {
        let mut engine = Engine::new();
        engine.bind_session_id(1);

        let outcome = engine
            .process(
                b"802,T=6.3596289|5.139203|342.67|||7.3|729234.25|-58312.28|,\
Type=Ground+Static+Aerodrome,Name=FARP,Color=Blue,Coalition=Enemies,Country=us",
            )
            .unwrap();
        let Outcome::Created(rec) = outcome else {
            panic!("expected creation");
        };
        engine.bind_object_id(0x802, 1);
        assert_eq!(rec.name.as_deref(), Some("FARP"));

        let outcome = engine.process(b"802,T=123.45|678.09|234.2||").unwrap();
        let Outcome::Updated(rec) = outcome else {
            panic!("expected update");
        };
        assert_eq!(rec.lon, 123.45);
        assert_eq!(rec.lat, 678.09);
        assert_eq!(rec.alt, 234.2);
        assert_eq!(rec.name.as_deref(), Some("FARP"));
    }

    #[test]
    fn missing_alt_defaults_to_one() {
        let mut engine = Engine::new();
        engine.bind_session_id(1);
        let outcome = engine.process(b"900,T=1.0|2.0|").unwrap();
        let Outcome::Created(rec) = outcome else {
            panic!("expected creation");
        };
        assert_eq!(rec.alt, 1.0);
    }

    #[test]
    fn negative_altitude_is_preserved() {
        let mut engine = Engine::new();
        engine.bind_session_id(1);
        engine.process(b"901,T=6.96369|4.0232604|5||").unwrap();
        let outcome = engine.process(b"901,T=6.96369|4.0232604|-2||").unwrap();
        let Outcome::Updated(rec) = outcome else {
            panic!("expected update");
        };
        assert_eq!(rec.alt, -2.0);
    }

    #[test]
    fn weapon_removal_resolves_impact_against_nearby_air_target() {
        let mut engine = Engine::new();
        engine.bind_session_id(1);

        engine
            .process(b"1,T=0.0001|0.0001|1000,Type=Air+FixedWing,Color=Red")
            .unwrap();
        engine.bind_object_id(1, 10);

        engine
            .process(b"2,T=0.0|0.0|1000,Type=Weapon+Missile,Color=Blue")
            .unwrap();
        engine.bind_object_id(2, 20);

        let outcome = engine.process(b"-2").unwrap();
        let Outcome::Removed { rec, impact } = outcome else {
            panic!("expected removal");
        };
        assert!(!rec.alive);
        let impact = impact.expect("expected resolved impact");
        assert_eq!(impact.target, 10);
        assert_eq!(impact.weapon, 20);
    }
}
