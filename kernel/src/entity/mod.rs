// Entity Model
//
// Records held by a collection, the drafts they are built from,
// and the per-entity hooks the generic controller relies on.

use std::fmt;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::validate::ValidationErrors;

pub mod account;
pub mod role;

/// Stable identifier assigned by a collection store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordId(pub u64);

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A persisted record: an identifier plus the entity's fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record<E> {
    pub id: RecordId,
    #[serde(flatten)]
    pub fields: E,
}

impl<E> Record<E> {
    pub fn new(id: RecordId, fields: E) -> Self {
        Self { id, fields }
    }
}

/// Match-all sentinel or a single categorical value.
///
/// On the wire `null` (or a missing key) means "all".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Option<T>", into = "Option<T>")]
#[serde(bound(serialize = "T: Clone + Serialize", deserialize = "T: Deserialize<'de>"))]
pub enum Selector<T> {
    All,
    Only(T),
}

impl<T> Default for Selector<T> {
    fn default() -> Self {
        Selector::All
    }
}

impl<T: PartialEq> Selector<T> {
    /// Exact-match test against a single value.
    pub fn admits(&self, value: &T) -> bool {
        match self {
            Selector::All => true,
            Selector::Only(wanted) => wanted == value,
        }
    }

    /// Set-membership test: passes if any of `values` is the selected one.
    pub fn admits_any<'a, I>(&self, values: I) -> bool
    where
        T: 'a,
        I: IntoIterator<Item = &'a T>,
    {
        match self {
            Selector::All => true,
            Selector::Only(wanted) => values.into_iter().any(|v| v == wanted),
        }
    }
}

impl<T> From<Option<T>> for Selector<T> {
    fn from(value: Option<T>) -> Self {
        value.map_or(Selector::All, Selector::Only)
    }
}

impl<T> From<Selector<T>> for Option<T> {
    fn from(value: Selector<T>) -> Self {
        match value {
            Selector::All => None,
            Selector::Only(v) => Some(v),
        }
    }
}

/// Shape of one managed collection.
///
/// Implementors are plain value types; the store, projector, editor
/// and gate are generic over this trait and never inspect fields
/// directly.
pub trait Entity: Clone + fmt::Debug + PartialEq + Serialize + DeserializeOwned {
    /// In-progress, possibly incomplete copy of the entity.
    type Draft: Default + Clone + fmt::Debug + PartialEq;

    /// Field names used as keys in validation errors.
    type Field: Copy + Ord + fmt::Debug + fmt::Display + Serialize;

    /// A single field change applied to a draft.
    type Edit: fmt::Debug + DeserializeOwned;

    /// Categorical filter selectors for the view.
    type Filter: Default + Clone + fmt::Debug + PartialEq + DeserializeOwned;

    /// Collection name used in logs.
    const KIND: &'static str;

    /// Copy all fields into a fresh draft.
    fn to_draft(&self) -> Self::Draft;

    fn apply_edit(draft: &mut Self::Draft, edit: Self::Edit);

    /// Validate a draft and, if it passes, build the finalized entity.
    fn finalize(draft: &Self::Draft) -> Result<Self, ValidationErrors<Self::Field>>;

    /// Fields the free-text search is matched against.
    fn searchable(&self) -> Vec<&str>;

    fn matches_filter(&self, filter: &Self::Filter) -> bool;
}
