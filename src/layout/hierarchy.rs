//! Hierarchy construction (§4.2 steps 3-5): build the ancestor and
//! descendant trees rooted at the focus, ordered and trimmed to depth.

use crate::graph::PersonGraph;
use crate::person::PersonId;

use super::config::LayoutConfig;

/// One node of a built hierarchy — a tree arena entry, not yet a
/// `LayoutNode`. `is_ancestry` distinguishes which side it belongs to for
/// the merge step.
#[derive(Debug, Clone)]
pub struct HierNode {
    pub id: PersonId,
    pub depth: u32,
    pub parent: Option<usize>,
    pub children: Vec<usize>,
    pub is_ancestry: bool,
}

/// Build the descendant hierarchy rooted at `focus`: children are the
/// focus's (and each descendant's) `rels.children`, sorted per
/// `sort_children`, with in-flight new-relation children moved to the end,
/// then reordered by spouse order (§4.2 step 3).
pub fn build_descendant_hierarchy(
    graph: &PersonGraph,
    focus: &PersonId,
    config: &LayoutConfig,
    max_depth: Option<u32>,
) -> Vec<HierNode> {
    let mut arena = vec![HierNode {
        id: focus.clone(),
        depth: 0,
        parent: None,
        children: Vec::new(),
        is_ancestry: false,
    }];

    let mut frontier = vec![0usize];
    while let Some(idx) = frontier.pop() {
        let depth = arena[idx].depth;
        if let Some(limit) = max_depth {
            if depth >= limit {
                continue;
            }
        }
        let parent_id = arena[idx].id.clone();
        let Some(parent_person) = graph.get(&parent_id) else {
            continue;
        };

        let mut child_ids: Vec<PersonId> = parent_person.rels.children.clone();
        order_children_by_spouses(graph, &parent_id, &mut child_ids);

        if let Some(cmp) = &config.sort_children {
            child_ids.sort_by(|a, b| {
                let pa = graph.get(a);
                let pb = graph.get(b);
                match (pa, pb) {
                    (Some(pa), Some(pb)) => cmp(pa, pb),
                    _ => std::cmp::Ordering::Equal,
                }
            });
        }

        // Move children with an in-flight new-relation record to the end.
        child_ids.sort_by_key(|c| {
            graph
                .get(c)
                .map(|p| p.new_rel_data.is_some())
                .unwrap_or(false)
        });

        for child_id in child_ids {
            let child_idx = arena.len();
            arena.push(HierNode {
                id: child_id,
                depth: depth + 1,
                parent: Some(idx),
                children: Vec::new(),
                is_ancestry: false,
            });
            arena[idx].children.push(child_idx);
            frontier.push(child_idx);
        }
    }

    if let Some(hook) = &config.modify_tree_hierarchy {
        let mut ids: Vec<PersonId> = arena.iter().map(|n| n.id.clone()).collect();
        hook(&mut ids);
    }

    arena
}

/// Build the ancestor hierarchy rooted at `focus`: each node's children are
/// `[father, mother]` (§4.2 step 4).
pub fn build_ancestor_hierarchy(
    graph: &PersonGraph,
    focus: &PersonId,
    max_depth: Option<u32>,
) -> Vec<HierNode> {
    let mut arena = vec![HierNode {
        id: focus.clone(),
        depth: 0,
        parent: None,
        children: Vec::new(),
        is_ancestry: true,
    }];

    let mut frontier = vec![0usize];
    while let Some(idx) = frontier.pop() {
        let depth = arena[idx].depth;
        if let Some(limit) = max_depth {
            if depth >= limit {
                continue;
            }
        }
        let Some(person) = graph.get(&arena[idx].id) else {
            continue;
        };

        for parent_id in [person.rels.father.clone(), person.rels.mother.clone()]
            .into_iter()
            .flatten()
        {
            let parent_idx = arena.len();
            arena.push(HierNode {
                id: parent_id,
                depth: depth + 1,
                parent: Some(idx),
                children: Vec::new(),
                is_ancestry: true,
            });
            arena[idx].children.push(parent_idx);
            frontier.push(parent_idx);
        }
    }

    arena
}

/// Reorder `child_ids` (all children of `parent_id`) so that children of
/// earlier-listed spouses come first; for a female parent the sequence is
/// mirrored so the spouse order still reads outward from the focus.
fn order_children_by_spouses(graph: &PersonGraph, parent_id: &PersonId, child_ids: &mut [PersonId]) {
    let Some(parent) = graph.get(parent_id) else {
        return;
    };
    if parent.rels.spouses.len() < 2 {
        return;
    }

    let spouse_rank = |other_parent: Option<&PersonId>| -> usize {
        match other_parent {
            Some(op) => parent
                .rels
                .spouses
                .iter()
                .position(|s| s == op)
                .unwrap_or(usize::MAX),
            None => usize::MAX,
        }
    };

    let is_father = parent.gender() == crate::person::Gender::M;

    child_ids.sort_by_key(|child_id| {
        let child = graph.get(child_id);
        let other_parent = child.and_then(|c| {
            if is_father {
                c.rels.mother.as_ref()
            } else {
                c.rels.father.as_ref()
            }
        });
        spouse_rank(other_parent)
    });

    if !is_father {
        child_ids.reverse();
    }
}

/// Trim a hierarchy so no node has `depth` greater than `max_depth`,
/// dropping their subtrees (§4.2 step 5, also used for `one_level_rels`).
pub fn trim_to_depth(arena: &mut Vec<HierNode>, max_depth: u32) {
    let keep: Vec<bool> = arena.iter().map(|n| n.depth <= max_depth).collect();
    for node in arena.iter_mut() {
        node.children.retain(|&c| keep[c]);
    }
}
