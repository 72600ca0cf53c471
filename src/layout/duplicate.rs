//! Duplicate-branch resolution (§4.3): collapse repeated appearances of
//! the same person's subtree into a single expanded appearance plus
//! toggle handles on the rest.
//!
//! Both hierarchy sides share the same grouping rule (nodes with an
//! identical child-id set are one duplicate group) but key each member's
//! toggle context differently: the ancestor side keys on the single
//! parent id (`_tgdp[parent_id]`, §4.3), the descendant side keys on the
//! `(parent, spouse)` pair (`_tgdp_sp[parent_id][spouse_id]`), since the
//! same parent can produce structurally-identical subtrees under more
//! than one spouse.

use std::collections::HashMap;

use crate::graph::PersonGraph;

use super::hierarchy::HierNode;

/// Per-node toggle state produced by duplicate resolution. `value`'s sign
/// is open(+)/closed(-); magnitude is a timestamp, so "most recently
/// toggled open" is a max-by-value within a group. `context` is the
/// per-member storage key (§4.3 `_tgdp`/`_tgdp_sp`): `parent_id` on the
/// ancestor side, `parent_id::spouse_id` on the descendant side.
#[derive(Debug, Clone)]
pub struct ToggleState {
    pub value: i64,
    pub toggle_id: String,
    pub context: String,
}

/// Ancestor-side duplicate resolution: per-member context is the single
/// parent id (or `"main"` at the root).
pub fn resolve_ancestor_toggles(
    arena: &[HierNode],
    on_toggle_one_close_others: bool,
    now: i64,
) -> HashMap<usize, ToggleState> {
    resolve_groups(arena, on_toggle_one_close_others, now, |idx| ancestor_context(arena, idx))
}

/// Descendant-side duplicate resolution: per-member context is the
/// `(parent, spouse)` pair under which this appearance hangs — the
/// "spouse" being whichever of the node's two biological parents is not
/// the hierarchy tree-parent.
pub fn resolve_descendant_toggles(
    arena: &[HierNode],
    graph: &PersonGraph,
    on_toggle_one_close_others: bool,
    now: i64,
) -> HashMap<usize, ToggleState> {
    resolve_groups(arena, on_toggle_one_close_others, now, |idx| descendant_context(arena, graph, idx))
}

fn ancestor_context(arena: &[HierNode], idx: usize) -> String {
    match arena[idx].parent {
        Some(p) => arena[p].id.to_string(),
        None => "main".to_string(),
    }
}

fn descendant_context(arena: &[HierNode], graph: &PersonGraph, idx: usize) -> String {
    let parent_id = arena[idx].parent.map(|p| arena[p].id.clone());
    let parent_key = parent_id.as_ref().map(|p| p.to_string()).unwrap_or_else(|| "main".to_string());

    let spouse = graph.get(&arena[idx].id).and_then(|person| match &parent_id {
        Some(pid) if person.rels.father.as_ref() == Some(pid) => person.rels.mother.clone(),
        Some(pid) if person.rels.mother.as_ref() == Some(pid) => person.rels.father.clone(),
        _ => None,
    });

    format!("{parent_key}::{}", spouse.map(|s| s.to_string()).unwrap_or_default())
}

/// Find duplicate groups (nodes sharing the same child-id set) and assign
/// toggle state to each member. Returns a map from arena index to its
/// toggle state; only members of a group with size > 1 are present.
///
/// The correlation id (`toggle_id`) is derived from the shared child-id
/// set rather than an iteration-order counter, so two runs over the same
/// graph assign the same ids regardless of hash-map iteration order (§8
/// "Layout determinism").
fn resolve_groups(
    arena: &[HierNode],
    on_toggle_one_close_others: bool,
    now: i64,
    context_of: impl Fn(usize) -> String,
) -> HashMap<usize, ToggleState> {
    let mut groups: HashMap<Vec<String>, Vec<usize>> = HashMap::new();

    for (idx, node) in arena.iter().enumerate() {
        if node.children.is_empty() {
            continue;
        }
        let mut child_ids: Vec<String> = node
            .children
            .iter()
            .map(|&c| arena[c].id.as_str().to_string())
            .collect();
        child_ids.sort();
        groups.entry(child_ids).or_default().push(idx);
    }

    let mut result = HashMap::new();

    for (child_key, members) in groups {
        if members.len() < 2 {
            continue;
        }
        let toggle_id = format!("dup-{}", child_key.join(","));

        for &idx in &members {
            result.insert(
                idx,
                ToggleState {
                    value: -1,
                    toggle_id: toggle_id.clone(),
                    context: context_of(idx),
                },
            );
        }

        if on_toggle_one_close_others {
            let any_expanded = members.iter().any(|idx| result[idx].value > 0);
            if !any_expanded {
                // Deterministic pick: lexicographically-first context,
                // rather than arena-scan order, so the chosen member is
                // stable under the same per-member storage key used to
                // persist state across recomputation.
                let first = *members
                    .iter()
                    .min_by(|&&a, &&b| result[&a].context.cmp(&result[&b].context))
                    .unwrap();
                result.get_mut(&first).unwrap().value = now;
            } else {
                let winner = *members.iter().max_by_key(|idx| result[idx].value).unwrap();
                for &idx in &members {
                    if idx != winner {
                        result.get_mut(&idx).unwrap().value = -1;
                    }
                }
            }
        }
    }

    result
}

/// Apply toggle state: for every member whose value is negative, delete
/// its children from the arena (so the layout never lays them out) while
/// leaving the node itself present as a collapsed handle.
pub fn apply_collapse(arena: &mut [HierNode], toggles: &HashMap<usize, ToggleState>) {
    for (&idx, state) in toggles {
        if state.value < 0 {
            arena[idx].children.clear();
        }
    }
}
