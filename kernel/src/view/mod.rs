// View Projection
//
// Derives the visible rows from a collection and the current query.
// Pure and recomputed on demand; nothing here caches results.

use crate::entity::{Entity, Record};

/// Search text plus categorical filters for one collection.
#[derive(Debug, Clone, PartialEq)]
pub struct Query<E: Entity> {
    pub search: String,
    pub filter: E::Filter,
}

impl<E: Entity> Default for Query<E> {
    fn default() -> Self {
        Self {
            search: String::new(),
            filter: E::Filter::default(),
        }
    }
}

impl<E: Entity> Query<E> {
    pub fn new(search: impl Into<String>, filter: E::Filter) -> Self {
        Self {
            search: search.into(),
            filter,
        }
    }
}

/// Case-insensitive substring match on any searchable field, and
/// every active filter selector. `needle` is already lowercased.
fn admits<E: Entity>(entity: &E, needle: &str, filter: &E::Filter) -> bool {
    let found = needle.is_empty()
        || entity
            .searchable()
            .into_iter()
            .any(|field| field.to_lowercase().contains(needle));

    found && entity.matches_filter(filter)
}

/// Project `records` through `query`, keeping their original order.
///
/// An empty result is a normal outcome; rendering "no data" is up to
/// the caller.
pub fn project<'a, E, I>(records: I, query: &Query<E>) -> Vec<&'a Record<E>>
where
    E: Entity + 'a,
    I: IntoIterator<Item = &'a Record<E>>,
{
    let needle = query.search.to_lowercase();

    records
        .into_iter()
        .filter(|record| admits(&record.fields, &needle, &query.filter))
        .collect()
}
