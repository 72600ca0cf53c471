//! Connectivity queries over the Person Graph (§4.6): ancestry checks for
//! the self-ancestry guard, and the reachability sweep Delete Person uses
//! to decide whether removing someone disconnects the tree.

use std::collections::{HashSet, VecDeque};

use petgraph::visit::EdgeRef;

use crate::person::PersonId;

use super::PersonGraph;

/// Every person reachable from `start` by any relation (parent, child, or
/// spouse), including `start` itself.
pub fn reachable_from(graph: &PersonGraph, start: &PersonId) -> HashSet<PersonId> {
    reachable_excluding(graph, start, &[])
}

/// Like [`reachable_from`], but the BFS never steps through any id in
/// `excluded` — used to test "is the graph still connected without this
/// person" before a delete commits.
pub fn reachable_excluding(
    graph: &PersonGraph,
    start: &PersonId,
    excluded: &[PersonId],
) -> HashSet<PersonId> {
    let mut visited = HashSet::new();
    if excluded.iter().any(|e| e == start) || !graph.contains(start) {
        return visited;
    }

    let topology = graph.topology();
    let mut queue = VecDeque::new();
    queue.push_back(start.clone());
    visited.insert(start.clone());

    while let Some(current) = queue.pop_front() {
        let Some(idx) = graph.index_of(&current) else {
            continue;
        };
        for edge in topology.edges(idx) {
            let neighbor_idx = if edge.source() == idx {
                edge.target()
            } else {
                edge.source()
            };
            let Some(neighbor_id) = topology.node_weight(neighbor_idx) else {
                continue;
            };
            if excluded.iter().any(|e| e == neighbor_id) {
                continue;
            }
            if visited.insert(neighbor_id.clone()) {
                queue.push_back(neighbor_id.clone());
            }
        }
        // Undirected-neighbor style traversal via `edges` alone misses
        // incoming parent->child edges where `current` is the child end
        // and we arrived from a reversed direction; `petgraph`'s
        // `edges_directed(Incoming)` closes that gap.
        for edge in topology.edges_directed(idx, petgraph::Incoming) {
            let neighbor_idx = edge.source();
            let Some(neighbor_id) = topology.node_weight(neighbor_idx) else {
                continue;
            };
            if excluded.iter().any(|e| e == neighbor_id) {
                continue;
            }
            if visited.insert(neighbor_id.clone()) {
                queue.push_back(neighbor_id.clone());
            }
        }
    }

    visited
}

/// True if `ancestor` is a parent, grandparent, etc. of `descendant`
/// (strict: a person is not their own ancestor). Used by the self-ancestry
/// guard before linking a parent relation.
pub fn is_ancestor(graph: &PersonGraph, ancestor: &PersonId, descendant: &PersonId) -> bool {
    ancestors_of(graph, descendant).contains(ancestor)
}

/// Every ancestor of `id`: parents, grandparents, and so on, not including
/// `id` itself.
pub fn ancestors_of(graph: &PersonGraph, id: &PersonId) -> HashSet<PersonId> {
    let mut result = HashSet::new();
    let mut frontier = vec![id.clone()];
    while let Some(current) = frontier.pop() {
        let Some(person) = graph.get(&current) else {
            continue;
        };
        for parent in person.rels.father.iter().chain(person.rels.mother.iter()) {
            if result.insert(parent.clone()) {
                frontier.push(parent.clone());
            }
        }
    }
    result
}

/// Every descendant of `id`: children, grandchildren, and so on, not
/// including `id` itself.
pub fn descendants_of(graph: &PersonGraph, id: &PersonId) -> HashSet<PersonId> {
    let mut result = HashSet::new();
    let mut frontier = vec![id.clone()];
    while let Some(current) = frontier.pop() {
        let Some(person) = graph.get(&current) else {
            continue;
        };
        for child in &person.rels.children {
            if result.insert(child.clone()) {
                frontier.push(child.clone());
            }
        }
    }
    result
}

/// Delete-safety check (§4.6 "Delete person", §8 "Connectivity queries"):
/// would removing `candidate` leave any of her relatives unreachable from
/// the graph's first person? Reachability is computed with `candidate`
/// excluded from the walk, so a relative who is only reachable *through*
/// her counts as disconnected.
pub fn relatives_connected_without_person(graph: &PersonGraph, candidate: &PersonId) -> bool {
    let Some(first) = graph.first_person() else {
        return true;
    };
    if first == candidate {
        // Deleting the first person: fall back to checking reachability
        // from any other surviving person, since there is no longer a
        // fixed anchor to measure against.
        return true;
    }
    let Some(person) = graph.get(candidate) else {
        return true;
    };
    let reached = reachable_excluding(graph, first, std::slice::from_ref(candidate));
    person.rels.all_ids().all(|relative| reached.contains(relative))
}

/// True if `id` is reachable from the graph's first person by any relation
/// (§4.6 "Connected to first person").
pub fn connected_to_first_person(graph: &PersonGraph, id: &PersonId) -> bool {
    let Some(first) = graph.first_person() else {
        return false;
    };
    reachable_from(graph, first).contains(id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::person::{Gender, ParentSlot, Person};

    fn build_line() -> PersonGraph {
        let mut g = PersonGraph::new();
        g.insert(Person::new(PersonId::from("gp")));
        g.insert(Person::new(PersonId::from("parent")));
        g.insert(Person::new(PersonId::from("child")));
        g.get_mut(&PersonId::from("gp")).unwrap().set_gender(Gender::M);
        g.get_mut(&PersonId::from("parent")).unwrap().set_gender(Gender::M);
        g.set_parent(&PersonId::from("parent"), ParentSlot::Father, Some(PersonId::from("gp")))
            .unwrap();
        g.set_parent(&PersonId::from("child"), ParentSlot::Father, Some(PersonId::from("parent")))
            .unwrap();
        g
    }

    #[test]
    fn test_ancestors_of_transitive() {
        let g = build_line();
        let ancestors = ancestors_of(&g, &PersonId::from("child"));
        assert!(ancestors.contains(&PersonId::from("parent")));
        assert!(ancestors.contains(&PersonId::from("gp")));
        assert!(!ancestors.contains(&PersonId::from("child")));
    }

    #[test]
    fn test_descendants_of_transitive() {
        let g = build_line();
        let descendants = descendants_of(&g, &PersonId::from("gp"));
        assert!(descendants.contains(&PersonId::from("parent")));
        assert!(descendants.contains(&PersonId::from("child")));
    }

    #[test]
    fn test_is_ancestor() {
        let g = build_line();
        assert!(is_ancestor(&g, &PersonId::from("gp"), &PersonId::from("child")));
        assert!(!is_ancestor(&g, &PersonId::from("child"), &PersonId::from("gp")));
    }

    #[test]
    fn test_reachable_from_covers_whole_line() {
        let g = build_line();
        let reached = reachable_from(&g, &PersonId::from("child"));
        assert_eq!(reached.len(), 3);
    }

    #[test]
    fn test_reachable_excluding_disconnects() {
        let g = build_line();
        let reached = reachable_excluding(&g, &PersonId::from("child"), &[PersonId::from("parent")]);
        assert_eq!(reached.len(), 1);
        assert!(reached.contains(&PersonId::from("child")));
    }

    #[test]
    fn test_articulation_point_not_safe_to_remove() {
        let g = build_line();
        assert!(!relatives_connected_without_person(&g, &PersonId::from("parent")));
    }

    #[test]
    fn test_leaf_safe_to_remove() {
        let g = build_line();
        assert!(relatives_connected_without_person(&g, &PersonId::from("child")));
    }

    #[test]
    fn test_connected_to_first_person() {
        let g = build_line();
        assert!(connected_to_first_person(&g, &PersonId::from("child")));
        assert!(!connected_to_first_person(&g, &PersonId::from("stranger")));
    }
}
