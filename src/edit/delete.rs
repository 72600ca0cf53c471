//! Delete person (§4.6): removes a person after checking that doing so
//! would not disconnect any of her relatives from the rest of the tree
//! (§8 "Deletion safety").

use crate::error::GraphError;
use crate::graph::{relatives_connected_without_person, PersonGraph};
use crate::person::{ParentSlot, PersonId};

use super::ref_attrs;

/// Remove `id` from the graph, detaching her from every relative first.
/// If removal would strand a relative that is only reachable through her
/// (an articulation point), she is demoted to `unknown` instead — kept in
/// place with only her gender, relations untouched (§3, §4.6, §8 "Delete
/// safety").
pub fn delete_person(graph: &mut PersonGraph, id: &PersonId) -> Result<(), GraphError> {
    if !graph.contains(id) {
        return Err(GraphError::ReferenceNotFound(id.clone()));
    }
    if !relatives_connected_without_person(graph, id) {
        if let Some(person) = graph.get_mut(id) {
            person.demote_to_unknown();
        }
        ref_attrs::strip_ref_mirrors(graph, id);
        return Ok(());
    }

    let (father, mother, spouses, children) = {
        let person = graph.get(id).unwrap();
        (
            person.rels.father.clone(),
            person.rels.mother.clone(),
            person.rels.spouses.clone(),
            person.rels.children.clone(),
        )
    };

    if father.is_some() {
        graph.unlink_parent(id, ParentSlot::Father);
    }
    if mother.is_some() {
        graph.unlink_parent(id, ParentSlot::Mother);
    }
    for spouse in &spouses {
        graph.unlink_spouses(id, spouse);
    }
    for child in &children {
        if let Some(slot) = graph.get(child).and_then(|c| c.rels.parent_slot_of(id)) {
            let _ = graph.set_parent(child, slot, None);
        }
    }

    ref_attrs::strip_ref_mirrors(graph, id);
    graph.remove(id);

    for spouse in &spouses {
        cascade_delete_placeholder(graph, spouse);
    }

    graph.ensure_nonempty();
    Ok(())
}

/// A placeholder spouse left with no remaining link to the deleted person
/// and no children of her own is clutter, not data — clean it up.
fn cascade_delete_placeholder(graph: &mut PersonGraph, id: &PersonId) {
    let should_remove = graph
        .get(id)
        .map(|p| p.to_add && p.rels.children.is_empty() && p.rels.spouses.is_empty())
        .unwrap_or(false);
    if should_remove {
        graph.remove(id);
    }
}
