//! Get link candidates (§4.6): the pre-filtered list of existing people a
//! "link existing relative" selector offers for a given target + relation.

use std::collections::HashSet;

use crate::graph::{ancestors_of, descendants_of, PersonGraph};
use crate::person::{PersonId, RelType};

/// Every real, non-placeholder person eligible to be linked as `rel_type`
/// of `target`: not `target` herself, not `subject` (the person whose
/// form is mid-edit, if any), not already a spouse of `target`, and — to
/// avoid creating a cycle — not among `target`'s ancestors or descendants
/// (plus, when adding a child, not a descendant of `target`'s existing
/// spouses either).
pub fn link_candidates(
    graph: &PersonGraph,
    target: &PersonId,
    rel_type: RelType,
    subject: Option<&PersonId>,
) -> Vec<PersonId> {
    let mut excluded: HashSet<PersonId> = HashSet::new();
    excluded.insert(target.clone());
    if let Some(s) = subject {
        excluded.insert(s.clone());
    }

    if rel_type.is_parent() || rel_type.is_child() {
        excluded.extend(ancestors_of(graph, target));
        excluded.extend(descendants_of(graph, target));
    }

    if rel_type.is_child() {
        if let Some(person) = graph.get(target) {
            for spouse in &person.rels.spouses {
                excluded.extend(descendants_of(graph, spouse));
            }
        }
    }

    let target_spouses: HashSet<PersonId> = graph
        .get(target)
        .map(|p| p.rels.spouses.iter().cloned().collect())
        .unwrap_or_default();

    graph
        .iter()
        .filter(|(id, p)| !p.to_add && !excluded.contains(*id) && !target_spouses.contains(*id))
        .map(|(id, _)| id.clone())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::person::{Gender, ParentSlot, Person};

    fn p(id: &str) -> Person {
        Person::new(PersonId::from(id))
    }

    #[test]
    fn test_excludes_target_and_existing_spouse() {
        let mut g = PersonGraph::new();
        g.insert(p("a"));
        g.insert(p("b"));
        g.insert(p("c"));
        g.link_spouses(&PersonId::from("a"), &PersonId::from("b")).unwrap();

        let candidates = link_candidates(&g, &PersonId::from("a"), RelType::Spouse, None);
        assert!(!candidates.contains(&PersonId::from("a")));
        assert!(!candidates.contains(&PersonId::from("b")));
        assert!(candidates.contains(&PersonId::from("c")));
    }

    #[test]
    fn test_excludes_placeholder_persons() {
        let mut g = PersonGraph::new();
        g.insert(p("a"));
        g.insert(Person::new_to_add(PersonId::from("ph"), Gender::F));
        let candidates = link_candidates(&g, &PersonId::from("a"), RelType::Spouse, None);
        assert!(!candidates.contains(&PersonId::from("ph")));
    }

    #[test]
    fn test_excludes_own_ancestors_when_adding_child() {
        let mut g = PersonGraph::new();
        g.insert(p("gp"));
        g.insert(p("parent"));
        g.insert(p("target"));
        g.get_mut(&PersonId::from("gp")).unwrap().set_gender(Gender::M);
        g.get_mut(&PersonId::from("parent")).unwrap().set_gender(Gender::M);
        g.set_parent(&PersonId::from("parent"), ParentSlot::Father, Some(PersonId::from("gp")))
            .unwrap();
        g.set_parent(&PersonId::from("target"), ParentSlot::Father, Some(PersonId::from("parent")))
            .unwrap();

        let candidates = link_candidates(&g, &PersonId::from("target"), RelType::Son, None);
        assert!(!candidates.contains(&PersonId::from("gp")));
        assert!(!candidates.contains(&PersonId::from("parent")));
    }

    #[test]
    fn test_excludes_in_flight_subject() {
        let mut g = PersonGraph::new();
        g.insert(p("a"));
        g.insert(p("subject"));
        let candidates = link_candidates(&g, &PersonId::from("a"), RelType::Spouse, Some(&PersonId::from("subject")));
        assert!(!candidates.contains(&PersonId::from("subject")));
    }
}
