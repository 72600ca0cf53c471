//! `__ref__` relation-scoped attribute mirroring (§4.6, §9).
//!
//! A field like `marriage_date__ref__p2` describes the relation between its
//! owner and `p2`; saving or deleting it should mirror the reverse key on
//! `p2` so either side's record tells the same story.

use crate::graph::PersonGraph;
use crate::person::{ref_attr_key, split_ref_attr_key, PersonId, Scalar};

/// After `person_id`'s `data` has been updated, mirror every `__ref__` key
/// it carries onto the referenced person's own `data`.
pub fn apply_ref_mirrors(graph: &mut PersonGraph, person_id: &PersonId) {
    let mirrors: Vec<(String, PersonId, Scalar)> = match graph.get(person_id) {
        Some(person) => person
            .data
            .iter()
            .filter_map(|(key, value)| {
                let (field, other) = split_ref_attr_key(key)?;
                Some((field.to_string(), other, value.clone()))
            })
            .collect(),
        None => return,
    };

    for (field, other_id, value) in mirrors {
        if !graph.contains(&other_id) {
            continue;
        }
        let mirror_key = ref_attr_key(&field, person_id);
        if let Some(other) = graph.get_mut(&other_id) {
            other.data.insert(mirror_key, value);
        }
    }
}

/// Before (or upon) removing `deleted_id`, strip any `__ref__` keys other
/// people hold that point back at it — an orphaned mirror is worse than no
/// mirror at all.
pub fn strip_ref_mirrors(graph: &mut PersonGraph, deleted_id: &PersonId) {
    let ids: Vec<PersonId> = graph.ids().cloned().collect();
    for id in ids {
        if let Some(person) = graph.get_mut(&id) {
            person.data.retain(|key, _| {
                split_ref_attr_key(key)
                    .map(|(_, other)| other != *deleted_id)
                    .unwrap_or(true)
            });
        }
    }
}
