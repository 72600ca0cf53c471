//! `PersonGraph`: the authoritative collection (§3) plus the reciprocity-
//! preserving link/unlink primitives every Edit Operation is built from.

use std::collections::HashMap;

use petgraph::stable_graph::{NodeIndex, StableGraph};
use petgraph::Directed;

use crate::error::GraphError;
use crate::person::{Gender, Person, PersonId, ParentSlot};

/// Edge kind in the topology graph. Parent→child edges are directed;
/// spouse edges are stored as a pair of opposing directed edges so
/// `neighbors_undirected` (used by connectivity queries) finds both ends
/// without needing a separate undirected graph type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RelEdge {
    ParentChild,
    Spouse,
}

#[derive(Clone)]
pub struct PersonGraph {
    persons: HashMap<PersonId, Person>,
    /// Insertion order, oldest first. Drives "first person in the graph"
    /// (§4.6 delete-safety, connectivity fallback).
    order: Vec<PersonId>,
    topology: StableGraph<PersonId, RelEdge, Directed>,
    index: HashMap<PersonId, NodeIndex>,
}

impl PersonGraph {
    pub fn new() -> Self {
        Self {
            persons: HashMap::new(),
            order: Vec::new(),
            topology: StableGraph::new(),
            index: HashMap::new(),
        }
    }

    /// An empty graph is never valid per the store's failure semantics
    /// (§4.5): ensure at least one blank person exists.
    pub fn ensure_nonempty(&mut self) {
        if self.persons.is_empty() {
            let id = PersonId::from(uuid::Uuid::new_v4().to_string());
            self.insert(Person::new(id));
        }
    }

    pub fn insert(&mut self, person: Person) {
        let id = person.id.clone();
        if !self.index.contains_key(&id) {
            let idx = self.topology.add_node(id.clone());
            self.index.insert(id.clone(), idx);
            self.order.push(id.clone());
        }
        self.persons.insert(id, person);
    }

    /// Remove a person record and all incident topology edges. Does not
    /// cascade to relatives' `rels` — callers (edit operations) must do
    /// that with `unlink_parent`/`unlink_spouses` first, or accept that
    /// the relatives now point at a dangling id (a bug, never a valid
    /// end state per §3).
    pub fn remove(&mut self, id: &PersonId) -> Option<Person> {
        if let Some(idx) = self.index.remove(id) {
            self.topology.remove_node(idx);
        }
        self.order.retain(|o| o != id);
        self.persons.remove(id)
    }

    pub fn get(&self, id: &PersonId) -> Option<&Person> {
        self.persons.get(id)
    }

    pub fn get_mut(&mut self, id: &PersonId) -> Option<&mut Person> {
        self.persons.get_mut(id)
    }

    pub fn contains(&self, id: &PersonId) -> bool {
        self.persons.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.persons.len()
    }

    pub fn is_empty(&self) -> bool {
        self.persons.is_empty()
    }

    pub fn ids(&self) -> impl Iterator<Item = &PersonId> {
        self.persons.keys()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&PersonId, &Person)> {
        self.persons.iter()
    }

    /// The oldest person still present — the fallback focus and the BFS
    /// target for "connected to first person" (§4.6).
    pub fn first_person(&self) -> Option<&PersonId> {
        self.order.first()
    }

    pub(crate) fn topology(&self) -> &StableGraph<PersonId, RelEdge, Directed> {
        &self.topology
    }

    pub(crate) fn index_of(&self, id: &PersonId) -> Option<NodeIndex> {
        self.index.get(id).copied()
    }

    // ---------------------------------------------------------------
    // Reciprocity-preserving primitives
    // ---------------------------------------------------------------

    /// Set (or clear) a parent slot on `child`, maintaining reciprocity
    /// and the gender-at-parent-slot invariant (§3).
    pub fn set_parent(
        &mut self,
        child: &PersonId,
        slot: ParentSlot,
        parent: Option<PersonId>,
    ) -> Result<(), GraphError> {
        if !self.contains(child) {
            return Err(GraphError::ReferenceNotFound(child.clone()));
        }
        if let Some(p) = &parent {
            if !self.contains(p) {
                return Err(GraphError::ReferenceNotFound(p.clone()));
            }
            if p == child {
                return Err(GraphError::SelfAncestry {
                    who: child.clone(),
                    via: p.clone(),
                });
            }
        }

        // Detach the previous parent in this slot, if any.
        let prior = match slot {
            ParentSlot::Father => self.persons[child].rels.father.clone(),
            ParentSlot::Mother => self.persons[child].rels.mother.clone(),
        };
        if let Some(prior_id) = &prior {
            if Some(prior_id) != parent.as_ref() {
                self.remove_topology_edge(prior_id, child, RelEdge::ParentChild);
                if let Some(prior_person) = self.persons.get_mut(prior_id) {
                    prior_person.rels.children.retain(|c| c != child);
                }
            }
        }

        if let Some(new_parent) = &parent {
            let required = slot.required_gender();
            let actual = self.persons[new_parent].gender();
            match actual {
                Gender::Unset => {
                    self.persons.get_mut(new_parent).unwrap().set_gender(required);
                }
                g if g == required => {}
                g => {
                    return Err(GraphError::GenderMismatch {
                        who: new_parent.clone(),
                        required,
                        actual: g,
                    });
                }
            }

            if Some(new_parent) != prior.as_ref() {
                self.add_topology_edge(new_parent, child, RelEdge::ParentChild);
                let parent_person = self.persons.get_mut(new_parent).unwrap();
                if !parent_person.rels.children.iter().any(|c| c == child) {
                    parent_person.rels.children.push(child.clone());
                }
            }
        }

        let child_person = self.persons.get_mut(child).unwrap();
        match slot {
            ParentSlot::Father => child_person.rels.father = parent,
            ParentSlot::Mother => child_person.rels.mother = parent,
        }
        Ok(())
    }

    pub fn unlink_parent(&mut self, child: &PersonId, slot: ParentSlot) -> Option<PersonId> {
        let prior = self.get(child).and_then(|p| match slot {
            ParentSlot::Father => p.rels.father.clone(),
            ParentSlot::Mother => p.rels.mother.clone(),
        });
        let _ = self.set_parent(child, slot, None);
        prior
    }

    pub fn link_spouses(&mut self, a: &PersonId, b: &PersonId) -> Result<(), GraphError> {
        if !self.contains(a) {
            return Err(GraphError::ReferenceNotFound(a.clone()));
        }
        if !self.contains(b) {
            return Err(GraphError::ReferenceNotFound(b.clone()));
        }
        if self.persons[a].rels.has_spouse(b) {
            return Err(GraphError::AlreadySpouses(a.clone(), b.clone()));
        }
        self.add_topology_edge(a, b, RelEdge::Spouse);
        self.add_topology_edge(b, a, RelEdge::Spouse);
        self.persons.get_mut(a).unwrap().rels.spouses.push(b.clone());
        self.persons.get_mut(b).unwrap().rels.spouses.push(a.clone());
        Ok(())
    }

    /// Change `id`'s gender, refusing if she has at least one real (not
    /// `to_add`) child — changing gender out from under an existing
    /// parent-slot reference would break the gender-at-parent-slot
    /// invariant (§3). The unconditional form (`Person::set_gender`, used
    /// at person creation and by the augmentor before any child exists) is
    /// always safe and bypasses this check by construction.
    pub fn set_gender(&mut self, id: &PersonId, gender: Gender) -> Result<(), GraphError> {
        let Some(person) = self.persons.get(id) else {
            return Err(GraphError::ReferenceNotFound(id.clone()));
        };
        if person.has_real_children() && !person.to_add {
            return Err(GraphError::GenderLocked(id.clone()));
        }
        self.persons.get_mut(id).unwrap().set_gender(gender);
        Ok(())
    }

    pub fn unlink_spouses(&mut self, a: &PersonId, b: &PersonId) {
        self.remove_topology_edge(a, b, RelEdge::Spouse);
        self.remove_topology_edge(b, a, RelEdge::Spouse);
        if let Some(p) = self.persons.get_mut(a) {
            p.rels.spouses.retain(|s| s != b);
        }
        if let Some(p) = self.persons.get_mut(b) {
            p.rels.spouses.retain(|s| s != a);
        }
    }

    fn add_topology_edge(&mut self, from: &PersonId, to: &PersonId, kind: RelEdge) {
        if let (Some(&fi), Some(&ti)) = (self.index.get(from), self.index.get(to)) {
            let exists = self
                .topology
                .edges_connecting(fi, ti)
                .any(|e| *e.weight() == kind);
            if !exists {
                self.topology.add_edge(fi, ti, kind);
            }
        }
    }

    fn remove_topology_edge(&mut self, from: &PersonId, to: &PersonId, kind: RelEdge) {
        if let (Some(&fi), Some(&ti)) = (self.index.get(from), self.index.get(to)) {
            let edge = self
                .topology
                .edges_connecting(fi, ti)
                .find(|e| *e.weight() == kind)
                .map(|e| e.id());
            if let Some(e) = edge {
                self.topology.remove_edge(e);
            }
        }
    }
}

impl Default for PersonGraph {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use petgraph::visit::EdgeRef;

    fn p(id: &str) -> Person {
        Person::new(PersonId::from(id))
    }

    #[test]
    fn test_ensure_nonempty_inserts_blank_person() {
        let mut g = PersonGraph::new();
        assert!(g.is_empty());
        g.ensure_nonempty();
        assert_eq!(g.len(), 1);
    }

    #[test]
    fn test_set_parent_reciprocity() {
        let mut g = PersonGraph::new();
        g.insert(p("dad"));
        g.insert(p("kid"));
        g.set_parent(&PersonId::from("kid"), ParentSlot::Father, Some(PersonId::from("dad")))
            .unwrap();

        assert_eq!(g.get(&PersonId::from("kid")).unwrap().rels.father, Some(PersonId::from("dad")));
        assert!(g.get(&PersonId::from("dad")).unwrap().rels.children.contains(&PersonId::from("kid")));
        assert_eq!(g.get(&PersonId::from("dad")).unwrap().gender(), Gender::M);
    }

    #[test]
    fn test_set_parent_rejects_gender_mismatch() {
        let mut g = PersonGraph::new();
        let mut mom = p("mom");
        mom.set_gender(Gender::F);
        g.insert(mom);
        g.insert(p("kid"));

        let err = g
            .set_parent(&PersonId::from("kid"), ParentSlot::Father, Some(PersonId::from("mom")))
            .unwrap_err();
        assert!(matches!(err, GraphError::GenderMismatch { .. }));
    }

    #[test]
    fn test_set_parent_replaces_prior_parent() {
        let mut g = PersonGraph::new();
        g.insert(p("dad1"));
        g.insert(p("dad2"));
        g.insert(p("kid"));
        g.set_parent(&PersonId::from("kid"), ParentSlot::Father, Some(PersonId::from("dad1")))
            .unwrap();
        g.set_parent(&PersonId::from("kid"), ParentSlot::Father, Some(PersonId::from("dad2")))
            .unwrap();

        assert!(!g.get(&PersonId::from("dad1")).unwrap().rels.children.contains(&PersonId::from("kid")));
        assert!(g.get(&PersonId::from("dad2")).unwrap().rels.children.contains(&PersonId::from("kid")));
    }

    #[test]
    fn test_self_parent_rejected() {
        let mut g = PersonGraph::new();
        g.insert(p("a"));
        let err = g
            .set_parent(&PersonId::from("a"), ParentSlot::Father, Some(PersonId::from("a")))
            .unwrap_err();
        assert!(matches!(err, GraphError::SelfAncestry { .. }));
    }

    #[test]
    fn test_link_unlink_spouses_reciprocity() {
        let mut g = PersonGraph::new();
        g.insert(p("a"));
        g.insert(p("b"));
        g.link_spouses(&PersonId::from("a"), &PersonId::from("b")).unwrap();

        assert!(g.get(&PersonId::from("a")).unwrap().rels.has_spouse(&PersonId::from("b")));
        assert!(g.get(&PersonId::from("b")).unwrap().rels.has_spouse(&PersonId::from("a")));

        g.unlink_spouses(&PersonId::from("a"), &PersonId::from("b"));
        assert!(!g.get(&PersonId::from("a")).unwrap().rels.has_spouse(&PersonId::from("b")));
        assert!(!g.get(&PersonId::from("b")).unwrap().rels.has_spouse(&PersonId::from("a")));
    }

    #[test]
    fn test_duplicate_spouse_link_rejected() {
        let mut g = PersonGraph::new();
        g.insert(p("a"));
        g.insert(p("b"));
        g.link_spouses(&PersonId::from("a"), &PersonId::from("b")).unwrap();
        let err = g.link_spouses(&PersonId::from("a"), &PersonId::from("b")).unwrap_err();
        assert!(matches!(err, GraphError::AlreadySpouses(..)));
    }

    #[test]
    fn test_set_gender_locked_by_real_child() {
        let mut g = PersonGraph::new();
        g.insert(p("dad"));
        g.insert(p("kid"));
        g.set_parent(&PersonId::from("kid"), ParentSlot::Father, Some(PersonId::from("dad")))
            .unwrap();

        let err = g.set_gender(&PersonId::from("dad"), Gender::F).unwrap_err();
        assert!(matches!(err, GraphError::GenderLocked(_)));
        assert_eq!(g.get(&PersonId::from("dad")).unwrap().gender(), Gender::M);
    }

    #[test]
    fn test_set_gender_allowed_without_real_children() {
        let mut g = PersonGraph::new();
        g.insert(p("solo"));
        g.set_gender(&PersonId::from("solo"), Gender::F).unwrap();
        assert_eq!(g.get(&PersonId::from("solo")).unwrap().gender(), Gender::F);
    }

    #[test]
    fn test_remove_clears_topology_edges() {
        let mut g = PersonGraph::new();
        g.insert(p("dad"));
        g.insert(p("kid"));
        g.set_parent(&PersonId::from("kid"), ParentSlot::Father, Some(PersonId::from("dad")))
            .unwrap();
        g.remove(&PersonId::from("kid"));

        let idx = g.index_of(&PersonId::from("dad")).unwrap();
        assert_eq!(g.topology().edges(idx).count(), 0);
    }

    #[test]
    fn test_first_person_is_oldest_surviving() {
        let mut g = PersonGraph::new();
        g.insert(p("a"));
        g.insert(p("b"));
        assert_eq!(g.first_person(), Some(&PersonId::from("a")));
        g.remove(&PersonId::from("a"));
        assert_eq!(g.first_person(), Some(&PersonId::from("b")));
    }
}
