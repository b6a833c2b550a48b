//! # Collections
//!
//! An ordered, id-keyed list of records. Reads are public; writes are
//! crate-private so that every mutation goes through [`Store::apply`].
//!
//! [`Store::apply`]: crate::store::Store::apply

use serde::{Deserialize, Serialize};

use crate::draft::IdScheme;
use crate::error::{CoreError, CoreResult};
use crate::filter::{FilterState, Record};
use crate::validation::validate_record_id;

/// Records of one kind, in insertion order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Collection<T> {
    items: Vec<T>,
}

impl<T> Default for Collection<T> {
    fn default() -> Self {
        Collection { items: Vec::new() }
    }
}

impl<T: Record> Collection<T> {
    pub fn new(items: Vec<T>) -> Self {
        Collection { items }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    #[inline]
    pub fn as_slice(&self) -> &[T] {
        &self.items
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.items.iter()
    }

    pub fn get(&self, id: &str) -> Option<&T> {
        self.items.iter().find(|item| item.id() == id)
    }

    /// Like [`get`](Self::get), failing with `RecordNotFound`, or with a
    /// validation error for a blank id.
    pub fn require(&self, id: &str) -> CoreResult<&T> {
        let index = self.index_of(id)?;
        Ok(&self.items[index])
    }

    pub fn contains(&self, id: &str) -> bool {
        self.get(id).is_some()
    }

    /// The visible subset under a filter state.
    pub fn filter(&self, state: &FilterState) -> Vec<&T> {
        state.apply(&self.items)
    }

    pub fn next_id(&self, scheme: IdScheme) -> String {
        scheme.next_id(self.items.iter().map(|item| item.id()))
    }

    // -------------------------------------------------------------------------
    // Crate-private writes
    // -------------------------------------------------------------------------

    pub(crate) fn push(&mut self, item: T) {
        self.items.push(item);
    }

    /// Runs `change` on a copy of the record and writes the copy back only
    /// if `change` succeeds.
    pub(crate) fn update<R>(
        &mut self,
        id: &str,
        change: impl FnOnce(&mut T) -> CoreResult<R>,
    ) -> CoreResult<(R, T)>
    where
        T: Clone,
    {
        let index = self.index_of(id)?;
        let mut draft = self.items[index].clone();
        let result = change(&mut draft)?;
        self.items[index] = draft.clone();
        Ok((result, draft))
    }

    pub(crate) fn remove(&mut self, id: &str) -> CoreResult<T> {
        let index = self.index_of(id)?;
        Ok(self.items.remove(index))
    }

    fn index_of(&self, id: &str) -> CoreResult<usize> {
        let id = validate_record_id(id)?;
        self.items
            .iter()
            .position(|item| item.id() == id)
            .ok_or_else(|| not_found::<T>(&id))
    }
}

impl<T> From<Vec<T>> for Collection<T> {
    fn from(items: Vec<T>) -> Self {
        Collection { items }
    }
}

impl<'a, T> IntoIterator for &'a Collection<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

fn not_found<T: Record>(id: &str) -> CoreError {
    CoreError::RecordNotFound {
        kind: T::KIND,
        id: id.to_string(),
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures;
    use crate::status::BedStatus;

    #[test]
    fn test_get_and_require() {
        let beds = Collection::new(fixtures::beds());
        assert_eq!(beds.get("1").map(|b| b.name.as_str()), Some("ICU-01"));
        assert!(beds.get("99").is_none());

        let err = beds.require("99").unwrap_err();
        assert_eq!(err.to_string(), "bed not found: 99");
    }

    #[test]
    fn test_blank_id_is_a_validation_error() {
        let mut beds = Collection::new(fixtures::beds());
        let before = beds.clone();

        assert!(matches!(beds.require("  "), Err(CoreError::Validation(_))));
        let err = beds.update("", |_| Ok(())).unwrap_err();
        assert_eq!(err.to_string(), "Validation error: id is required");
        assert!(matches!(beds.remove(""), Err(CoreError::Validation(_))));
        assert_eq!(beds, before);
    }

    #[test]
    fn test_update_failure_leaves_record() {
        let mut beds = Collection::new(fixtures::beds());
        let before = beds.clone();

        let result: CoreResult<((), _)> = beds.update("1", |bed| {
            bed.status = BedStatus::Blocked;
            Err(CoreError::RecordNotFound {
                kind: crate::types::RecordKind::Bed,
                id: "1".to_string(),
            })
        });

        assert!(result.is_err());
        assert_eq!(beds, before);
    }

    #[test]
    fn test_update_writes_back() {
        let mut beds = Collection::new(fixtures::beds());
        let (_, bed) = beds
            .update("2", |bed| {
                bed.status = BedStatus::Occupied;
                Ok(())
            })
            .unwrap();
        assert_eq!(bed.status, BedStatus::Occupied);
        assert_eq!(beds.require("2").unwrap().status, BedStatus::Occupied);
    }

    #[test]
    fn test_remove() {
        let mut requests = Collection::new(fixtures::requests());
        let len = requests.len();
        let removed = requests.remove("REQ-002").unwrap();
        assert_eq!(removed.id, "REQ-002");
        assert_eq!(requests.len(), len - 1);
        assert!(requests.remove("REQ-002").is_err());
    }

    #[test]
    fn test_serializes_as_array() {
        let beds = Collection::new(fixtures::beds());
        let json = serde_json::to_value(&beds).unwrap();
        assert!(json.is_array());
    }
}
