//! Hide/show branch toggles (§4.6, §8 "Hide/show roundtrip").
//!
//! Hiding a branch must be exactly reversible: showing it again restores
//! the identical relation state, not merely an equivalent-looking one.

use crate::person::{ParentSlot, PersonId, Rels};
use crate::graph::PersonGraph;

/// Detach `id`'s father and mother into `hidden_rels`, leaving her
/// ancestor side blank in the layout until [`show_ancestors`] restores it.
pub fn hide_ancestors(graph: &mut PersonGraph, id: &PersonId) {
    let Some(person) = graph.get(id) else { return };
    if person.hidden_rels.is_some() {
        return;
    }
    let father = person.rels.father.clone();
    let mother = person.rels.mother.clone();
    if father.is_none() && mother.is_none() {
        return;
    }

    if father.is_some() {
        graph.unlink_parent(id, ParentSlot::Father);
    }
    if mother.is_some() {
        graph.unlink_parent(id, ParentSlot::Mother);
    }

    if let Some(p) = graph.get_mut(id) {
        p.hidden_rels = Some(Rels {
            father,
            mother,
            spouses: Vec::new(),
            children: Vec::new(),
        });
    }
}

/// Reattach the father/mother stashed by [`hide_ancestors`].
pub fn show_ancestors(graph: &mut PersonGraph, id: &PersonId) {
    let Some(stashed) = graph.get_mut(id).and_then(|p| p.hidden_rels.take()) else { return };
    if let Some(father) = stashed.father {
        let _ = graph.set_parent(id, ParentSlot::Father, Some(father));
    }
    if let Some(mother) = stashed.mother {
        let _ = graph.set_parent(id, ParentSlot::Mother, Some(mother));
    }
}

/// Remove `child` from `parent`'s visible `children`, stashing it on
/// `parent`'s `hidden_rels.children` for restoration. Per §4.6, hiding a
/// descendant branch moves the child id symmetrically off of *each* of its
/// co-parents, not just the one the toggle was invoked from, so the branch
/// disappears from the layout no matter which parent the renderer walked
/// down from. The child's own `father`/`mother` fields are untouched — the
/// descendant hierarchy is built by walking `children` downward (§4.2), so
/// detaching her from both parents' lists is enough to drop the whole
/// branch below from the layout.
pub fn hide_child(graph: &mut PersonGraph, parent: &PersonId, child: &PersonId) {
    let Some(person) = graph.get(parent) else { return };
    if !person.rels.has_child(child) {
        return;
    }

    let co_parents = co_parents_of(graph, child);
    for p_id in co_parents {
        if let Some(p) = graph.get_mut(&p_id) {
            if p.rels.has_child(child) {
                p.rels.children.retain(|c| c != child);
                let hidden = p.hidden_rels.get_or_insert_with(Rels::default);
                if !hidden.children.iter().any(|c| c == child) {
                    hidden.children.push(child.clone());
                }
            }
        }
    }
}

/// Restore a child previously hidden by [`hide_child`], onto every
/// co-parent it was stashed under.
pub fn show_child(graph: &mut PersonGraph, _parent: &PersonId, child: &PersonId) {
    let co_parents = co_parents_of(graph, child);
    for p_id in co_parents {
        let was_hidden = graph
            .get(&p_id)
            .and_then(|p| p.hidden_rels.as_ref())
            .map(|h| h.children.iter().any(|c| c == child))
            .unwrap_or(false);
        if !was_hidden {
            continue;
        }
        if let Some(p) = graph.get_mut(&p_id) {
            if !p.rels.has_child(child) {
                p.rels.children.push(child.clone());
            }
            if let Some(hidden) = p.hidden_rels.as_mut() {
                hidden.children.retain(|c| c != child);
                if hidden.father.is_none() && hidden.mother.is_none() && hidden.children.is_empty() {
                    p.hidden_rels = None;
                }
            }
        }
    }
}

/// Both parent ids of `child` that actually link to her (father and/or
/// mother), regardless of which one the caller named.
fn co_parents_of(graph: &PersonGraph, child: &PersonId) -> Vec<PersonId> {
    let Some(person) = graph.get(child) else { return Vec::new() };
    person.rels.father.iter().chain(person.rels.mother.iter()).cloned().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::person::{Gender, Person};

    fn seed_parent_child() -> (PersonGraph, PersonId, PersonId) {
        let mut g = PersonGraph::new();
        let dad = PersonId::from("dad");
        let kid = PersonId::from("kid");
        g.insert(Person::new(dad.clone()));
        g.insert(Person::new(kid.clone()));
        g.get_mut(&dad).unwrap().set_gender(Gender::M);
        g.set_parent(&kid, ParentSlot::Father, Some(dad.clone())).unwrap();
        (g, dad, kid)
    }

    #[test]
    fn test_hide_show_ancestors_roundtrip() {
        let (mut g, dad, kid) = seed_parent_child();
        let before = g.get(&kid).unwrap().rels.clone();

        hide_ancestors(&mut g, &kid);
        assert_eq!(g.get(&kid).unwrap().rels.father, None);
        assert!(!g.get(&dad).unwrap().rels.has_child(&kid));

        show_ancestors(&mut g, &kid);
        assert_eq!(g.get(&kid).unwrap().rels, before);
        assert!(g.get(&dad).unwrap().rels.has_child(&kid));
    }

    #[test]
    fn test_hide_show_child_roundtrip() {
        let (mut g, dad, kid) = seed_parent_child();

        hide_child(&mut g, &dad, &kid);
        assert!(!g.get(&dad).unwrap().rels.has_child(&kid));
        assert_eq!(g.get(&kid).unwrap().rels.father, Some(dad.clone()));

        show_child(&mut g, &dad, &kid);
        assert!(g.get(&dad).unwrap().rels.has_child(&kid));
    }

    #[test]
    fn test_hide_ancestors_is_noop_without_parents() {
        let mut g = PersonGraph::new();
        let solo = PersonId::from("solo");
        g.insert(Person::new(solo.clone()));
        hide_ancestors(&mut g, &solo);
        assert!(g.get(&solo).unwrap().hidden_rels.is_none());
    }

    #[test]
    fn test_show_child_noop_if_not_hidden() {
        let (mut g, dad, kid) = seed_parent_child();
        show_child(&mut g, &dad, &kid);
        assert!(g.get(&dad).unwrap().rels.has_child(&kid));
    }

    #[test]
    fn test_hide_child_detaches_from_both_co_parents() {
        let mut g = PersonGraph::new();
        let dad = PersonId::from("dad");
        let mom = PersonId::from("mom");
        let kid = PersonId::from("kid");
        g.insert(Person::new(dad.clone()));
        g.insert(Person::new(mom.clone()));
        g.insert(Person::new(kid.clone()));
        g.get_mut(&dad).unwrap().set_gender(Gender::M);
        g.get_mut(&mom).unwrap().set_gender(Gender::F);
        g.set_parent(&kid, ParentSlot::Father, Some(dad.clone())).unwrap();
        g.set_parent(&kid, ParentSlot::Mother, Some(mom.clone())).unwrap();

        hide_child(&mut g, &dad, &kid);
        assert!(!g.get(&dad).unwrap().rels.has_child(&kid));
        assert!(!g.get(&mom).unwrap().rels.has_child(&kid));

        show_child(&mut g, &dad, &kid);
        assert!(g.get(&dad).unwrap().rels.has_child(&kid));
        assert!(g.get(&mom).unwrap().rels.has_child(&kid));
    }
}
