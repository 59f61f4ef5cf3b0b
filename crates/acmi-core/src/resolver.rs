//! Relationship Resolver (C5): parent search at creation, impact search at
//! death, both a linear scan over the object store under color/type/time/
//! alive filters.

use acmi_types::{Color, ObjectRec};

use crate::geo::{self, Ecef};
use crate::store::ObjectStore;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContactKind {
    Parent,
    Impacted,
}

#[derive(Debug, Clone, Copy)]
pub struct Contact {
    pub tac_id: u32,
    pub dist: f64,
}

const PARENT_MAX_DIST_M: f64 = 200.0;
const STALE_LOOKBACK_SECS: f64 = 2.5;

fn acceptable_colors(subject_color: Option<Color>, kind: ContactKind) -> Vec<Color> {
    match kind {
        ContactKind::Parent => match subject_color {
            Some(Color::Violet) => vec![Color::Red, Color::Blue, Color::Grey],
            Some(other) => vec![other],
            None => vec![],
        },
        ContactKind::Impacted => match subject_color {
            Some(c) => vec![c.opposing()],
            None => vec![Color::Blue],
        },
    }
}

fn is_stale(subject: &ObjectRec, candidate: &ObjectRec) -> bool {
    let cutoff = subject.last_seen - STALE_LOOKBACK_SECS;
    if cutoff <= candidate.last_seen {
        return false;
    }
    let is_live_ground = candidate
        .rec_type
        .as_deref()
        .is_some_and(|t| t.contains("Ground"))
        && candidate.alive;
    !is_live_ground
}

/// Finds the closest eligible contact for `subject` in `store`, per the
/// color/type/time/alive rules specific to `kind`. Ties among equal
/// distances resolve in the store's natural iteration order, which
/// reflects insertion order for a fresh session run.
pub fn resolve(store: &ObjectStore, subject: &ObjectRec, kind: ContactKind) -> Option<Contact> {
    let acceptable = acceptable_colors(subject.color, kind);
    if acceptable.is_empty() {
        return None;
    }

    let subject_ecef = geodetic_ecef(subject);

    let mut best: Option<Contact> = None;
    for candidate in store.values() {
        if candidate.tac_id == subject.tac_id {
            continue;
        }
        let Some(candidate_color) = candidate.color else {
            continue;
        };
        if !acceptable.contains(&candidate_color) {
            continue;
        }
        if !candidate.can_be_parent {
            continue;
        }

        if kind == ContactKind::Impacted
            && !candidate
                .rec_type
                .as_deref()
                .is_some_and(|t| t.starts_with("Air+"))
        {
            continue;
        }

        if is_stale(subject, candidate) {
            continue;
        }

        let dist = geo::distance(subject_ecef, geodetic_ecef(candidate));
        if best.map_or(true, |b| dist < b.dist) {
            best = Some(Contact {
                tac_id: candidate.tac_id,
                dist,
            });
        }
    }

    match kind {
        ContactKind::Parent => best.filter(|c| c.dist <= PARENT_MAX_DIST_M),
        ContactKind::Impacted => best,
    }
}

fn geodetic_ecef(rec: &ObjectRec) -> Ecef {
    geo::geodetic_to_ecef(rec.lat, rec.lon, rec.alt as f64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use acmi_types::Coalition;

    fn rec(tac_id: u32, color: Color, rec_type: &str, lat: f64, lon: f64) -> ObjectRec {
        let mut r = ObjectRec::new(tac_id, 1, 0.0);
        r.color = Some(color);
        r.coalition = Some(Coalition::Enemies);
        r.rec_type = Some(rec_type.to_string());
        r.lat = lat;
        r.lon = lon;
        r.can_be_parent = ObjectRec::type_can_be_parent(rec_type);
        r.should_have_parent = ObjectRec::type_should_have_parent(rec_type);
        r
    }

    #[test]
    fn parent_search_picks_closest_same_color_eligible_aircraft() {
        let mut store = ObjectStore::new();
        let near = rec(1, Color::Blue, "Air+FixedWing", 0.0001, 0.0001);
        let far = rec(2, Color::Blue, "Air+FixedWing", 1.0, 1.0);
        store.insert(near);
        store.insert(far);

        let weapon = rec(3, Color::Blue, "Weapon+Missile", 0.0, 0.0);
        let contact = resolve(&store, &weapon, ContactKind::Parent).unwrap();
        assert_eq!(contact.tac_id, 1);
    }

    #[test]
    fn parent_search_rejects_candidate_beyond_200_meters() {
        let mut store = ObjectStore::new();
        store.insert(rec(1, Color::Blue, "Air+FixedWing", 10.0, 10.0));

        let weapon = rec(3, Color::Blue, "Weapon+Missile", 0.0, 0.0);
        assert!(resolve(&store, &weapon, ContactKind::Parent).is_none());
    }

    #[test]
    fn parent_search_excludes_weapon_and_decoy_candidates() {
        let mut store = ObjectStore::new();
        store.insert(rec(1, Color::Blue, "Weapon+Missile", 0.0, 0.0));
        store.insert(rec(2, Color::Blue, "Decoy+Flare", 0.0, 0.0));

        let weapon = rec(3, Color::Blue, "Weapon+Missile", 0.0, 0.0);
        assert!(resolve(&store, &weapon, ContactKind::Parent).is_none());
    }

    #[test]
    fn violet_subject_accepts_red_blue_and_grey_parents() {
        let mut store = ObjectStore::new();
        store.insert(rec(1, Color::Grey, "Air+FixedWing", 0.0, 0.0));

        let weapon = rec(3, Color::Violet, "Weapon+Missile", 0.0, 0.0);
        assert!(resolve(&store, &weapon, ContactKind::Parent).is_some());
    }

    #[test]
    fn impact_search_requires_opposite_color_and_air_prefix() {
        let mut store = ObjectStore::new();
        store.insert(rec(1, Color::Blue, "Air+FixedWing", 0.0001, 0.0001));
        store.insert(rec(2, Color::Red, "Ground+Static", 0.0001, 0.0001));

        let weapon = rec(3, Color::Red, "Weapon+Missile", 0.0, 0.0);
        let contact = resolve(&store, &weapon, ContactKind::Impacted).unwrap();
        assert_eq!(contact.tac_id, 1);
    }

    #[test]
    fn impact_search_excludes_air_prefixed_decoy_candidate() {
        let mut store = ObjectStore::new();
        store.insert(rec(1, Color::Blue, "Air+Decoy+Flare", 0.0001, 0.0001));

        let weapon = rec(3, Color::Red, "Weapon+Missile", 0.0, 0.0);
        assert!(resolve(&store, &weapon, ContactKind::Impacted).is_none());
    }

    #[test]
    fn impact_search_has_no_distance_ceiling() {
        let mut store = ObjectStore::new();
        store.insert(rec(1, Color::Blue, "Air+FixedWing", 10.0, 10.0));

        let weapon = rec(3, Color::Red, "Weapon+Missile", 0.0, 0.0);
        assert!(resolve(&store, &weapon, ContactKind::Impacted).is_some());
    }

    #[test]
    fn stale_non_ground_candidate_is_excluded() {
        let mut store = ObjectStore::new();
        let mut stale = rec(1, Color::Blue, "Air+FixedWing", 0.0001, 0.0001);
        stale.last_seen = 0.0;
        store.insert(stale);

        let mut weapon = rec(3, Color::Blue, "Weapon+Missile", 0.0, 0.0);
        weapon.last_seen = 10.0;
        assert!(resolve(&store, &weapon, ContactKind::Parent).is_none());
    }

    #[test]
    fn stale_but_live_ground_candidate_is_still_eligible() {
        let mut store = ObjectStore::new();
        let mut stale_ground = rec(1, Color::Blue, "Ground+Vehicle", 0.0001, 0.0001);
        stale_ground.alive = true;
        stale_ground.last_seen = 0.0;
        stale_ground.can_be_parent = true;
        store.insert(stale_ground);

        let mut weapon = rec(3, Color::Blue, "Weapon+Missile", 0.0, 0.0);
        weapon.last_seen = 10.0;
        assert!(resolve(&store, &weapon, ContactKind::Parent).is_some());
    }
}
