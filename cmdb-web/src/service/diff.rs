//! component diff engine
//!
//! Keyed set difference between the stored component rows S and the incoming
//! facts I for one asset and one component kind:
//!
//!   insert = I \ S, update = {k in S∩I : fields differ}, retire = S \ I
//!
//! The natural key (slot / serial / model+mac) is immutable once a row
//! exists: a swapped stick or disk shows up as retire + insert, never as an
//! update. Retired rows are deleted outright; the event log is the only
//! history kept.

use std::collections::BTreeMap;

pub trait ComponentFact {
    fn natural_key(&self) -> String;
    /// Mutable attributes only; key fields are excluded by construction.
    fn fields_eq(&self, other: &Self) -> bool;
}

#[derive(Debug, Clone)]
pub struct ComponentDiff<T> {
    pub insert: Vec<T>,
    pub update: Vec<T>,
    pub retire: Vec<T>,
}

impl<T> Default for ComponentDiff<T> {
    fn default() -> Self {
        Self {
            insert: Vec::new(),
            update: Vec::new(),
            retire: Vec::new(),
        }
    }
}

impl<T> ComponentDiff<T> {
    pub fn is_empty(&self) -> bool {
        self.insert.is_empty() && self.update.is_empty() && self.retire.is_empty()
    }
}

pub fn diff_components<T>(stored: &[T], incoming: &[T]) -> ComponentDiff<T>
where
    T: ComponentFact + Clone,
{
    let stored_map: BTreeMap<String, &T> =
        stored.iter().map(|c| (c.natural_key(), c)).collect();
    let incoming_map: BTreeMap<String, &T> =
        incoming.iter().map(|c| (c.natural_key(), c)).collect();

    let mut diff = ComponentDiff::default();
    for (key, inc) in &incoming_map {
        match stored_map.get(key) {
            None => diff.insert.push((*inc).clone()),
            Some(st) if !st.fields_eq(inc) => diff.update.push((*inc).clone()),
            Some(_) => {}
        }
    }
    for (key, st) in &stored_map {
        if !incoming_map.contains_key(key) {
            diff.retire.push((*st).clone());
        }
    }
    diff
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::service::fact::{DiskFact, NicFact, RamFact};

    fn stick(slot: &str, capacity: i64) -> RamFact {
        RamFact {
            slot: slot.to_string(),
            capacity,
            model: "DDR4".to_string(),
            manufacturer: "Samsung".to_string(),
            sn: format!("SN-{slot}"),
        }
    }

    #[test]
    fn identical_sets_produce_empty_diff() {
        let stored = vec![stick("A1", 16), stick("A2", 16)];
        let diff = diff_components(&stored, &stored.clone());
        assert!(diff.is_empty());
    }

    #[test]
    fn removed_plus_added_slot_is_one_retire_one_insert() {
        let stored = vec![stick("A1", 16), stick("A2", 16)];
        let incoming = vec![stick("A1", 16), stick("B1", 32)];
        let diff = diff_components(&stored, &incoming);
        assert_eq!(diff.insert.len(), 1);
        assert_eq!(diff.insert[0].slot, "B1");
        assert_eq!(diff.retire.len(), 1);
        assert_eq!(diff.retire[0].slot, "A2");
        // never a spurious update
        assert!(diff.update.is_empty());
    }

    #[test]
    fn changed_fields_update_in_place() {
        let stored = vec![stick("A1", 16)];
        let mut incoming = stored.clone();
        incoming[0].capacity = 32;
        let diff = diff_components(&stored, &incoming);
        assert!(diff.insert.is_empty() && diff.retire.is_empty());
        assert_eq!(diff.update.len(), 1);
        assert_eq!(diff.update[0].capacity, 32);
    }

    #[test]
    fn disk_swap_in_same_bay_is_retire_plus_insert() {
        // 同槽位换盘：serial 变了,身份就变了
        let stored = vec![DiskFact {
            sn: "OLD".to_string(),
            slot: "0".to_string(),
            capacity: 500,
            ..Default::default()
        }];
        let incoming = vec![DiskFact {
            sn: "NEW".to_string(),
            slot: "0".to_string(),
            capacity: 1000,
            ..Default::default()
        }];
        let diff = diff_components(&stored, &incoming);
        assert_eq!(diff.insert.len(), 1);
        assert_eq!(diff.retire.len(), 1);
        assert!(diff.update.is_empty());
    }

    #[test]
    fn nic_key_includes_model() {
        let a = NicFact {
            model: "virtio".to_string(),
            mac: "00:00:00:00:00:00".to_string(),
            ..Default::default()
        };
        let b = NicFact {
            model: "e1000".to_string(),
            mac: "00:00:00:00:00:00".to_string(),
            ..Default::default()
        };
        let diff = diff_components(&[a], &[b]);
        assert_eq!(diff.insert.len(), 1);
        assert_eq!(diff.retire.len(), 1);
    }

    #[test]
    fn first_time_insert_is_plain_fanout() {
        let incoming = vec![stick("A1", 16), stick("A2", 16)];
        let diff = diff_components(&[], &incoming);
        assert_eq!(diff.insert.len(), 2);
        assert!(diff.update.is_empty() && diff.retire.is_empty());
    }
}
