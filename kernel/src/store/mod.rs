// Collection Store
//
// Authoritative, insertion-ordered list of records for one entity
// type. Records are replaced wholesale and handed out behind `Arc`,
// so a record obtained earlier never observes a later mutation.

use std::collections::BTreeSet;
use std::sync::Arc;

use crate::entity::{Entity, Record, RecordId};

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum StoreError {
    #[error("duplicate {kind} identifier {id}")]
    DuplicateId { kind: &'static str, id: RecordId },

    #[error("{kind} {id} fails validation: {reason}")]
    InvalidRecord {
        kind: &'static str,
        id: RecordId,
        reason: String,
    },

    #[error("{kind} identifiers exhausted after {last}")]
    IdsExhausted { kind: &'static str, last: RecordId },
}

#[derive(Debug)]
pub struct CollectionStore<E> {
    records: Vec<Arc<Record<E>>>,
    /// Highest identifier ever held, including removed records.
    high_water: u64,
}

impl<E> Default for CollectionStore<E> {
    fn default() -> Self {
        Self {
            records: Vec::new(),
            high_water: 0,
        }
    }
}

impl<E: Entity> CollectionStore<E> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a store from seed records, keeping their identifiers.
    ///
    /// Rejects duplicate identifiers and records that would not pass
    /// the editor's own validation.
    pub fn from_records<I>(records: I) -> Result<Self, StoreError>
    where
        I: IntoIterator<Item = Record<E>>,
    {
        let mut seen = BTreeSet::new();
        let mut store = Self::new();

        for record in records {
            if !seen.insert(record.id) {
                return Err(StoreError::DuplicateId {
                    kind: E::KIND,
                    id: record.id,
                });
            }

            if let Err(errors) = E::finalize(&record.fields.to_draft()) {
                let reason = errors
                    .iter()
                    .map(|(field, message)| format!("{field}: {message}"))
                    .collect::<Vec<_>>()
                    .join(", ");
                return Err(StoreError::InvalidRecord {
                    kind: E::KIND,
                    id: record.id,
                    reason,
                });
            }

            store.high_water = store.high_water.max(record.id.0);
            store.records.push(Arc::new(record));
        }

        Ok(store)
    }

    /// Identifier the next `add` will assign, or `None` once the
    /// identifier space is used up.
    pub fn next_id(&self) -> Option<RecordId> {
        let max_existing = self.records.iter().map(|r| r.id.0).max().unwrap_or(0);
        self.high_water.max(max_existing).checked_add(1).map(RecordId)
    }

    /// Assign an identifier to a candidate and append it.
    pub fn add(&mut self, candidate: E) -> Result<Arc<Record<E>>, StoreError> {
        let id = self.next_id().ok_or(StoreError::IdsExhausted {
            kind: E::KIND,
            last: RecordId(self.high_water),
        })?;
        let record = Arc::new(Record::new(id, candidate));

        self.high_water = id.0;
        self.records.push(Arc::clone(&record));

        tracing::debug!(kind = E::KIND, %id, "record added");
        Ok(record)
    }

    /// Replace the record with `id`.
    ///
    /// Returns `false` and leaves the store untouched when `id` is not
    /// present; callers only ever pass identifiers read from the store.
    pub fn update(&mut self, id: RecordId, candidate: E) -> bool {
        match self.records.iter_mut().find(|r| r.id == id) {
            Some(slot) => {
                *slot = Arc::new(Record::new(id, candidate));
                tracing::debug!(kind = E::KIND, %id, "record replaced");
                true
            }
            None => {
                tracing::warn!(kind = E::KIND, %id, "update for unknown record ignored");
                false
            }
        }
    }

    /// Delete the record with `id`, if present.
    pub fn remove(&mut self, id: RecordId) -> Option<Arc<Record<E>>> {
        let Some(index) = self.records.iter().position(|r| r.id == id) else {
            tracing::warn!(kind = E::KIND, %id, "remove for unknown record ignored");
            return None;
        };

        tracing::debug!(kind = E::KIND, %id, "record removed");
        Some(self.records.remove(index))
    }

    pub fn get(&self, id: RecordId) -> Option<&Record<E>> {
        self.records.iter().find(|r| r.id == id).map(Arc::as_ref)
    }

    pub fn contains(&self, id: RecordId) -> bool {
        self.get(id).is_some()
    }

    /// Records in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &Record<E>> {
        self.records.iter().map(Arc::as_ref)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::role::{Permission, Role};

    fn role(name: &str, permissions: &[Permission]) -> Role {
        Role {
            name: name.into(),
            permissions: permissions.iter().copied().collect(),
        }
    }

    fn ids(store: &CollectionStore<Role>) -> Vec<u64> {
        store.iter().map(|r| r.id.0).collect()
    }

    fn seeded(count: u64) -> CollectionStore<Role> {
        let records = (1..=count)
            .map(|n| Record::new(RecordId(n), role(&format!("r{n}"), &[Permission::Read])));
        CollectionStore::from_records(records).unwrap()
    }

    #[test]
    fn first_add_gets_identifier_one() {
        let mut store = CollectionStore::new();
        let record = store.add(role("Admin", &[Permission::Read])).unwrap();
        assert_eq!(record.id, RecordId(1));
    }

    #[test]
    fn sequential_adds_are_distinct_and_increasing() {
        let mut store = CollectionStore::new();
        let assigned: Vec<_> = (0..5)
            .map(|n| store.add(role(&format!("r{n}"), &[Permission::Read])).unwrap().id)
            .collect();

        assert!(assigned.windows(2).all(|w| w[0] < w[1]));
        assert_eq!(assigned.first(), Some(&RecordId(1)));
        assert_eq!(assigned.last(), Some(&RecordId(5)));
    }

    #[test]
    fn removed_identifier_is_never_reused() {
        let mut store = seeded(3);

        store.remove(RecordId(3));
        let added = store.add(role("Auditor", &[Permission::Read])).unwrap();

        assert_eq!(added.id, RecordId(4));
        assert_eq!(ids(&store), vec![1, 2, 4]);
    }

    #[test]
    fn add_after_interior_removal_does_not_collide() {
        let mut store = seeded(3);

        store.remove(RecordId(1));
        let added = store.add(role("Auditor", &[Permission::Read])).unwrap();

        // A `len + 1` policy would hand out 3 again here.
        assert_eq!(added.id, RecordId(4));
    }

    #[test]
    fn remove_keeps_other_identifiers() {
        let mut store = seeded(3);

        let removed = store.remove(RecordId(2)).unwrap();
        assert_eq!(removed.id, RecordId(2));
        assert_eq!(ids(&store), vec![1, 3]);
    }

    #[test]
    fn remove_unknown_is_noop() {
        let mut store = seeded(2);
        assert!(store.remove(RecordId(9)).is_none());
        assert_eq!(ids(&store), vec![1, 2]);
    }

    #[test]
    fn update_replaces_in_place_order() {
        let mut store = seeded(3);

        assert!(store.update(RecordId(2), role("Renamed", &[Permission::Delete])));

        assert_eq!(ids(&store), vec![1, 2, 3]);
        assert_eq!(store.get(RecordId(2)).unwrap().fields.name, "Renamed");
    }

    #[test]
    fn update_unknown_is_noop() {
        let mut store = seeded(1);
        let before: Vec<_> = store.iter().cloned().collect();

        assert!(!store.update(RecordId(5), role("Ghost", &[Permission::Read])));
        assert_eq!(store.iter().cloned().collect::<Vec<_>>(), before);
    }

    #[test]
    fn added_record_is_unaffected_by_later_update() {
        let mut store = CollectionStore::new();
        let added = store.add(role("Original", &[Permission::Read])).unwrap();

        store.update(added.id, role("Changed", &[Permission::Create]));

        assert_eq!(added.fields.name, "Original");
        assert_eq!(store.get(added.id).unwrap().fields.name, "Changed");
    }

    #[test]
    fn add_fails_once_identifiers_run_out() {
        let records = vec![Record::new(RecordId(u64::MAX), role("last", &[Permission::Read]))];
        let mut store = CollectionStore::from_records(records).unwrap();

        assert_eq!(store.next_id(), None);
        let err = store.add(role("overflow", &[Permission::Read])).unwrap_err();
        assert_eq!(
            err,
            StoreError::IdsExhausted {
                kind: "role",
                last: RecordId(u64::MAX),
            }
        );
        assert_eq!(ids(&store), vec![u64::MAX]);
    }

    #[test]
    fn duplicate_seed_identifiers_are_rejected() {
        let records = vec![
            Record::new(RecordId(1), role("a", &[Permission::Read])),
            Record::new(RecordId(1), role("b", &[Permission::Read])),
        ];

        let err = CollectionStore::from_records(records).unwrap_err();
        assert_eq!(
            err,
            StoreError::DuplicateId {
                kind: "role",
                id: RecordId(1)
            }
        );
    }

    #[test]
    fn invalid_seed_record_is_rejected() {
        let records = vec![Record::new(RecordId(4), role("Empty", &[]))];

        let err = CollectionStore::from_records(records).unwrap_err();
        assert!(err.to_string().contains("permissions"), "unexpected error: {err}");
    }

    #[test]
    fn seeded_gaps_continue_after_highest() {
        let records = vec![
            Record::new(RecordId(7), role("a", &[Permission::Read])),
            Record::new(RecordId(2), role("b", &[Permission::Read])),
        ];
        let mut store = CollectionStore::from_records(records).unwrap();

        assert_eq!(store.add(role("c", &[Permission::Read])).unwrap().id, RecordId(8));
    }
}
