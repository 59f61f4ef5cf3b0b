//! Object Store (C4): the in-memory map from `tac_id` to `ObjectRec`.
//!
//! No eviction, no secondary index — per-session object counts are bounded
//! and the relationship resolver scans the values directly, the way a
//! small `FxHashMap`-backed table is scanned elsewhere in this codebase's
//! lineage rather than reaching for a spatial index.

use acmi_types::ObjectRec;
use rustc_hash::FxHashMap;

#[derive(Debug, Default)]
pub struct ObjectStore {
    objects: FxHashMap<u32, ObjectRec>,
}

impl ObjectStore {
    pub fn new() -> Self {
        ObjectStore {
            objects: FxHashMap::default(),
        }
    }

    pub fn get(&self, tac_id: u32) -> Option<&ObjectRec> {
        self.objects.get(&tac_id)
    }

    pub fn get_mut(&mut self, tac_id: u32) -> Option<&mut ObjectRec> {
        self.objects.get_mut(&tac_id)
    }

    pub fn insert(&mut self, rec: ObjectRec) {
        self.objects.insert(rec.tac_id, rec);
    }

    pub fn contains(&self, tac_id: u32) -> bool {
        self.objects.contains_key(&tac_id)
    }

    pub fn values(&self) -> impl Iterator<Item = &ObjectRec> {
        self.objects.values()
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_then_get_round_trips() {
        let mut store = ObjectStore::new();
        store.insert(ObjectRec::new(0x802, 1, 0.0));
        assert!(store.contains(0x802));
        assert_eq!(store.get(0x802).unwrap().tac_id, 0x802);
    }

    #[test]
    fn get_mut_allows_in_place_update() {
        let mut store = ObjectStore::new();
        store.insert(ObjectRec::new(0x802, 1, 0.0));
        store.get_mut(0x802).unwrap().updates += 1;
        assert_eq!(store.get(0x802).unwrap().updates, 1);
    }
}
