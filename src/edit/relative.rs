//! Add new relative / link existing relative (§4.6): wiring a new or
//! already-present person onto a target as father, mother, son, daughter,
//! or spouse.

use crate::error::GraphError;
use crate::graph::PersonGraph;
use crate::person::{Gender, ParentSlot, PersonId, RelType};

use super::create;

/// The other parent of a child being added, as carried by `_new_rel_data`.
#[derive(Debug, Clone)]
pub enum OtherParent {
    /// Wire an existing person in as the co-parent.
    Existing(PersonId),
    /// Materialize a fresh `to_add` placeholder as the co-parent
    /// (`_new_rel_data.other_parent_id = "_new"`).
    New,
}

/// Add `new_person` (already inserted, e.g. via [`create::new_person`]) to
/// `target` as `rel_type`.
pub fn add_new_relative(
    graph: &mut PersonGraph,
    target: &PersonId,
    rel_type: RelType,
    new_person: &PersonId,
    other_parent: Option<OtherParent>,
) -> Result<(), GraphError> {
    if !graph.contains(target) {
        return Err(GraphError::ReferenceNotFound(target.clone()));
    }
    if !graph.contains(new_person) {
        return Err(GraphError::ReferenceNotFound(new_person.clone()));
    }
    match rel_type {
        RelType::Son | RelType::Daughter => add_child(graph, target, new_person, other_parent),
        RelType::Father | RelType::Mother => add_parent(graph, target, rel_type, new_person),
        RelType::Spouse => add_spouse(graph, target, new_person),
    }
}

/// Like [`add_new_relative`], but for a person already present in the
/// graph — the path used when the user picks from "link existing" rather
/// than filling out a blank card.
pub fn link_existing_relative(
    graph: &mut PersonGraph,
    target: &PersonId,
    rel_type: RelType,
    existing: &PersonId,
) -> Result<(), GraphError> {
    add_new_relative(graph, target, rel_type, existing, None)
}

/// Clears the `to_add` flag once real data has been saved for a synthetic
/// placeholder (§4.6 "Move to-add to added"). Per §9 Open Questions, the
/// placeholder keeps its original id.
pub fn move_to_added(graph: &mut PersonGraph, id: &PersonId) {
    if let Some(p) = graph.get_mut(id) {
        p.to_add = false;
    }
}

fn add_child(
    graph: &mut PersonGraph,
    target: &PersonId,
    child: &PersonId,
    other_parent: Option<OtherParent>,
) -> Result<(), GraphError> {
    let target_gender = graph.get(target).map(|p| p.gender()).unwrap_or(Gender::Unset);
    let target_slot = match target_gender {
        Gender::F => ParentSlot::Mother,
        _ => ParentSlot::Father,
    };
    graph.set_parent(child, target_slot, Some(target.clone()))?;

    let co_parent_slot = match target_slot {
        ParentSlot::Father => ParentSlot::Mother,
        ParentSlot::Mother => ParentSlot::Father,
    };

    match other_parent {
        Some(OtherParent::Existing(other_id)) => {
            graph.set_parent(child, co_parent_slot, Some(other_id.clone()))?;
            let already_spouses = graph.get(target).map(|p| p.rels.has_spouse(&other_id)).unwrap_or(true);
            if !already_spouses {
                let _ = graph.link_spouses(target, &other_id);
            }
        }
        Some(OtherParent::New) => {
            let placeholder_gender = co_parent_slot.required_gender();
            let placeholder = create::new_person_with_gender(graph, placeholder_gender);
            if let Some(p) = graph.get_mut(&placeholder) {
                p.to_add = true;
            }
            graph.set_parent(child, co_parent_slot, Some(placeholder.clone()))?;
            graph.link_spouses(target, &placeholder)?;
        }
        None => {}
    }
    Ok(())
}

fn add_parent(
    graph: &mut PersonGraph,
    target: &PersonId,
    rel_type: RelType,
    new_parent: &PersonId,
) -> Result<(), GraphError> {
    let slot = match rel_type {
        RelType::Father => ParentSlot::Father,
        RelType::Mother => ParentSlot::Mother,
        _ => unreachable!("add_parent only called for Father/Mother"),
    };

    // If the target already had a `to_add` placeholder in this slot,
    // delete that placeholder before installing the real parent.
    let prior = graph.get(target).and_then(|p| match slot {
        ParentSlot::Father => p.rels.father.clone(),
        ParentSlot::Mother => p.rels.mother.clone(),
    });
    if let Some(prior_id) = prior {
        if graph.get(&prior_id).map(|p| p.to_add).unwrap_or(false) {
            let spouses: Vec<PersonId> = graph.get(&prior_id).map(|p| p.rels.spouses.clone()).unwrap_or_default();
            graph.unlink_parent(target, slot);
            for spouse in spouses {
                graph.unlink_spouses(&prior_id, &spouse);
            }
            graph.remove(&prior_id);
        }
    }

    graph.set_parent(target, slot, Some(new_parent.clone()))?;

    // Wire the other existing parent, if any, as the new parent's spouse.
    let other_slot = match slot {
        ParentSlot::Father => ParentSlot::Mother,
        ParentSlot::Mother => ParentSlot::Father,
    };
    let other_existing = graph.get(target).and_then(|p| match other_slot {
        ParentSlot::Father => p.rels.father.clone(),
        ParentSlot::Mother => p.rels.mother.clone(),
    });
    if let Some(other_id) = other_existing {
        let already_spouses = graph.get(new_parent).map(|p| p.rels.has_spouse(&other_id)).unwrap_or(true);
        if !already_spouses {
            let _ = graph.link_spouses(new_parent, &other_id);
        }
    }
    Ok(())
}

fn add_spouse(graph: &mut PersonGraph, target: &PersonId, new_spouse: &PersonId) -> Result<(), GraphError> {
    let existing_to_add = graph
        .get(target)
        .map(|p| p.rels.spouses.clone())
        .unwrap_or_default()
        .into_iter()
        .find(|s| graph.get(s).map(|p| p.to_add).unwrap_or(false));

    if let Some(placeholder) = existing_to_add {
        graph.unlink_spouses(target, &placeholder);
        graph.remove(&placeholder);
    }

    graph.link_spouses(target, new_spouse)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::edit::create;
    use crate::person::{Person, Scalar};

    fn seed() -> (PersonGraph, PersonId) {
        let mut g = PersonGraph::new();
        let dad = PersonId::from("dad");
        g.insert(Person::new(dad.clone()));
        g.get_mut(&dad).unwrap().set_gender(Gender::M);
        (g, dad)
    }

    #[test]
    fn test_add_child_with_new_other_parent_placeholder() {
        let (mut g, dad) = seed();
        let child = create::new_person(&mut g);
        add_new_relative(&mut g, &dad, RelType::Son, &child, Some(OtherParent::New)).unwrap();

        let child_person = g.get(&child).unwrap();
        let mother_id = child_person.rels.mother.clone().unwrap();
        assert!(g.get(&mother_id).unwrap().to_add);
        assert!(g.get(&dad).unwrap().rels.has_spouse(&mother_id));
        assert!(g.get(&dad).unwrap().rels.has_child(&child));
    }

    #[test]
    fn test_add_child_with_existing_other_parent() {
        let (mut g, dad) = seed();
        let mom = create::new_person_with_gender(&mut g, Gender::F);
        let child = create::new_person(&mut g);
        add_new_relative(&mut g, &dad, RelType::Daughter, &child, Some(OtherParent::Existing(mom.clone()))).unwrap();

        assert_eq!(g.get(&child).unwrap().rels.mother, Some(mom.clone()));
        assert!(g.get(&dad).unwrap().rels.has_spouse(&mom));
    }

    #[test]
    fn test_add_parent_replaces_to_add_placeholder() {
        let mut g = PersonGraph::new();
        let kid = PersonId::from("kid");
        g.insert(Person::new(kid.clone()));
        let placeholder = PersonId::from("ph");
        g.insert(Person::new_to_add(placeholder.clone(), Gender::F));
        g.set_parent(&kid, ParentSlot::Mother, Some(placeholder.clone())).unwrap();

        let real_mom = create::new_person_with_gender(&mut g, Gender::F);
        add_new_relative(&mut g, &kid, RelType::Mother, &real_mom, None).unwrap();

        assert_eq!(g.get(&kid).unwrap().rels.mother, Some(real_mom));
        assert!(!g.contains(&placeholder));
    }

    #[test]
    fn test_add_spouse_removes_existing_placeholder() {
        let (mut g, dad) = seed();
        let placeholder = PersonId::from("ph");
        g.insert(Person::new_to_add(placeholder.clone(), Gender::F));
        g.link_spouses(&dad, &placeholder).unwrap();

        let real_spouse = create::new_person_with_gender(&mut g, Gender::F);
        add_new_relative(&mut g, &dad, RelType::Spouse, &real_spouse, None).unwrap();

        assert!(!g.contains(&placeholder));
        assert!(g.get(&dad).unwrap().rels.has_spouse(&real_spouse));
    }

    #[test]
    fn test_link_existing_relative_does_not_create_person() {
        let (mut g, dad) = seed();
        let mom = create::new_person_with_gender(&mut g, Gender::F);
        let before = g.len();
        link_existing_relative(&mut g, &dad, RelType::Spouse, &mom).unwrap();
        assert_eq!(g.len(), before);
        assert!(g.get(&dad).unwrap().rels.has_spouse(&mom));
    }

    #[test]
    fn test_move_to_added_clears_flag_keeps_id() {
        let mut g = PersonGraph::new();
        let ph = PersonId::from("ph");
        g.insert(Person::new_to_add(ph.clone(), Gender::F));
        g.get_mut(&ph).unwrap().data.insert("first_name".into(), Scalar::Text("Ada".into()));
        move_to_added(&mut g, &ph);
        assert!(!g.get(&ph).unwrap().to_add);
        assert_eq!(g.get(&ph).unwrap().id, ph);
    }
}
