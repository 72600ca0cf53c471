//! Synthetic Augmentor (§4.1): back-fill a `to_add` placeholder spouse for
//! every person who has a child but no partner of opposite gender on
//! record, so every child's father and mother slot is filled.

use crate::person::{Gender, Person, PersonId};

use super::PersonGraph;

/// Run the augmentor over `graph` in place. Idempotent: a person who
/// already has an opposite-gender spouse covering all their children is
/// left untouched, and a previously-created placeholder is reused rather
/// than duplicated.
pub fn augment(graph: &mut PersonGraph) {
    let candidates: Vec<PersonId> = graph.ids().cloned().collect();

    for parent_id in candidates {
        let Some(parent) = graph.get(&parent_id) else {
            continue;
        };
        if parent.rels.children.is_empty() {
            continue;
        }
        let parent_gender = parent.gender();
        if parent_gender == Gender::Unset {
            // Nothing to oppose; a placeholder's gender must be the
            // opposite of a known gender.
            continue;
        }

        let orphan_children: Vec<PersonId> = parent
            .rels
            .children
            .iter()
            .filter(|child_id| {
                let Some(child) = graph.get(child_id) else {
                    return false;
                };
                let other_slot_filled = match parent_gender {
                    Gender::M => child.rels.mother.is_some(),
                    Gender::F => child.rels.father.is_some(),
                    Gender::Unset => true,
                };
                !other_slot_filled
            })
            .cloned()
            .collect();

        if orphan_children.is_empty() {
            continue;
        }

        let placeholder_id = PersonId::from(format!("{parent_id}__to_add_spouse"));
        if !graph.contains(&placeholder_id) {
            let placeholder = Person::new_to_add(placeholder_id.clone(), parent_gender.opposite());
            graph.insert(placeholder);
            let _ = graph.link_spouses(&parent_id, &placeholder_id);
        }

        for child_id in orphan_children {
            let slot = match parent_gender {
                Gender::M => crate::person::ParentSlot::Mother,
                Gender::F => crate::person::ParentSlot::Father,
                Gender::Unset => unreachable!(),
            };
            let _ = graph.set_parent(&child_id, slot, Some(placeholder_id.clone()));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::person::ParentSlot;

    #[test]
    fn test_augment_fills_missing_mother() {
        let mut g = PersonGraph::new();
        g.insert(Person::new(PersonId::from("dad")));
        g.insert(Person::new(PersonId::from("kid")));
        g.get_mut(&PersonId::from("dad")).unwrap().set_gender(Gender::M);
        g.set_parent(&PersonId::from("kid"), ParentSlot::Father, Some(PersonId::from("dad")))
            .unwrap();

        augment(&mut g);

        let kid = g.get(&PersonId::from("kid")).unwrap();
        let mother_id = kid.rels.mother.clone().expect("mother backfilled");
        let mother = g.get(&mother_id).unwrap();
        assert!(mother.to_add);
        assert_eq!(mother.gender(), Gender::F);
        assert!(g.get(&PersonId::from("dad")).unwrap().rels.has_spouse(&mother_id));
    }

    #[test]
    fn test_augment_skips_person_with_no_children() {
        let mut g = PersonGraph::new();
        g.insert(Person::new(PersonId::from("solo")));
        let before = g.len();
        augment(&mut g);
        assert_eq!(g.len(), before);
    }

    #[test]
    fn test_augment_skips_already_covered_parent() {
        let mut g = PersonGraph::new();
        g.insert(Person::new(PersonId::from("dad")));
        g.insert(Person::new(PersonId::from("mom")));
        g.insert(Person::new(PersonId::from("kid")));
        g.get_mut(&PersonId::from("dad")).unwrap().set_gender(Gender::M);
        g.get_mut(&PersonId::from("mom")).unwrap().set_gender(Gender::F);
        g.set_parent(&PersonId::from("kid"), ParentSlot::Father, Some(PersonId::from("dad")))
            .unwrap();
        g.set_parent(&PersonId::from("kid"), ParentSlot::Mother, Some(PersonId::from("mom")))
            .unwrap();
        g.link_spouses(&PersonId::from("dad"), &PersonId::from("mom")).unwrap();

        let before = g.len();
        augment(&mut g);
        assert_eq!(g.len(), before);
    }

    #[test]
    fn test_augment_is_idempotent() {
        let mut g = PersonGraph::new();
        g.insert(Person::new(PersonId::from("dad")));
        g.insert(Person::new(PersonId::from("kid")));
        g.get_mut(&PersonId::from("dad")).unwrap().set_gender(Gender::M);
        g.set_parent(&PersonId::from("kid"), ParentSlot::Father, Some(PersonId::from("dad")))
            .unwrap();

        augment(&mut g);
        let after_first = g.len();
        augment(&mut g);
        assert_eq!(g.len(), after_first);
    }
}
