//! The Layout Engine pipeline (§4.2).

use std::collections::{HashMap, HashSet};

use crate::graph::{self, PersonGraph};
use crate::person::{Gender, PersonId};

use super::config::LayoutConfig;
use super::duplicate::{apply_collapse, resolve_ancestor_toggles, resolve_descendant_toggles};
use super::hierarchy::{build_ancestor_hierarchy, build_descendant_hierarchy, trim_to_depth, HierNode};
use super::node::{Layout, LayoutDim, LayoutNode};
use super::privacy::compute_privacy;
use super::tidy_tree::{layout as run_tidy, SeparationFn, TidyNode, UniformSeparation};

/// Run the full Layout Engine pipeline against `graph` for `main_id`,
/// returning the positioned, wired, and annotated layout.
///
/// `graph` is taken by value because augmentation (step 1) may insert
/// placeholder persons; callers that want those persisted should run
/// `graph::augment` themselves first and pass `single_parent_empty_card =
/// false`, or clone before calling.
///
/// `toggle_clock` is the recency timestamp fed to duplicate-branch
/// resolution (§4.3): a monotonically increasing value the caller owns
/// (`ReactiveStore` bumps it once per recomputation) so "keep the most
/// recently opened duplicate" has a real clock to compare against instead
/// of a constant that ties every member.
pub fn compute_layout(mut graph: PersonGraph, main_id: Option<&PersonId>, config: &LayoutConfig, toggle_clock: i64) -> Layout {
    // Step 1.
    if config.single_parent_empty_card {
        graph::augment(&mut graph);
    }
    graph.ensure_nonempty();

    // Step 2.
    let focus = main_id
        .filter(|id| graph.contains(id))
        .cloned()
        .or_else(|| graph.first_person().cloned())
        .expect("graph is non-empty after ensure_nonempty");

    // Steps 3-4.
    let desc_max = if config.one_level_rels { Some(1) } else { config.progeny_depth };
    let anc_max = if config.one_level_rels { Some(1) } else { config.ancestry_depth };
    let mut descendants = build_descendant_hierarchy(&graph, &focus, config, desc_max);
    let mut ancestors = build_ancestor_hierarchy(&graph, &focus, anc_max);

    // Step 5 (redundant with max-depth above when the depth is already
    // bounded at build time, but covers the `one_level_rels` override
    // uniformly for graphs built without a depth cap).
    if config.one_level_rels {
        trim_to_depth(&mut descendants, 1);
        trim_to_depth(&mut ancestors, 1);
    }

    // Step 6.
    let desc_toggles = resolve_descendant_toggles(&descendants, &graph, config.on_toggle_one_close_others, toggle_clock);
    let anc_toggles = resolve_ancestor_toggles(&ancestors, config.on_toggle_one_close_others, toggle_clock);
    if config.duplicate_branch_toggle {
        apply_collapse(&mut descendants, &desc_toggles);
        apply_collapse(&mut ancestors, &anc_toggles);
    }

    // Step 7.
    let desc_x = layout_descendants(&graph, &descendants);
    let anc_x = run_tidy(
        0,
        &mut to_tidy_arena(&ancestors),
        &UniformSeparation(1.0),
    );

    // Step 8: center both roots at x = 0, flip ancestor y, concatenate.
    let desc_root_shift = desc_x.first().copied().unwrap_or(0.0);
    let anc_root_shift = anc_x.first().copied().unwrap_or(0.0);

    let mut nodes: Vec<LayoutNode> = Vec::with_capacity(descendants.len() + ancestors.len());
    // index in `nodes` <-> arena index, kept in two parallel maps so wiring
    // (step 9) can look a hierarchy-parent index back up.
    let mut desc_node_idx: HashMap<usize, usize> = HashMap::new();
    let mut anc_node_idx: HashMap<usize, usize> = HashMap::new();

    for (arena_idx, hn) in descendants.iter().enumerate() {
        let x = (desc_x[arena_idx] - desc_root_shift) * config.node_separation;
        let y = hn.depth as f32 * config.level_separation;
        let mut node = LayoutNode::new(hn.id.to_string(), hn.id.clone(), hn.depth as i32, false);
        node.x = x;
        node.y = y;
        desc_node_idx.insert(arena_idx, nodes.len());
        nodes.push(node);
    }
    for (arena_idx, hn) in ancestors.iter().enumerate() {
        if arena_idx == 0 {
            // The ancestor root *is* the focus, already present from the
            // descendant side.
            anc_node_idx.insert(arena_idx, desc_node_idx[&0]);
            continue;
        }
        let x = (anc_x[arena_idx] - anc_root_shift) * config.node_separation;
        let y = -(hn.depth as f32) * config.level_separation;
        let mut node = LayoutNode::new(hn.id.to_string(), hn.id.clone(), -(hn.depth as i32), true);
        node.x = x;
        node.y = y;
        anc_node_idx.insert(arena_idx, nodes.len());
        nodes.push(node);
    }

    // §4.3 output wiring: stamp each duplicate-group member's toggle
    // state onto its `LayoutNode` (arena index -> node index via the maps
    // built above). Gated the same as `apply_collapse` above — both are
    // only meaningful when duplicate-branch toggling is turned on.
    if config.duplicate_branch_toggle {
        for (&arena_idx, state) in &desc_toggles {
            if let Some(&node_idx) = desc_node_idx.get(&arena_idx) {
                nodes[node_idx].toggle = Some(state.value);
                nodes[node_idx].toggle_id = Some(state.toggle_id.clone());
            }
        }
        for (&arena_idx, state) in &anc_toggles {
            if let Some(&node_idx) = anc_node_idx.get(&arena_idx) {
                nodes[node_idx].toggle = Some(state.value);
                nodes[node_idx].toggle_id = Some(state.toggle_id.clone());
            }
        }
    }

    // Step 16 (moved ahead of step 9): assign disambiguating `tid`s now,
    // before any collection below starts referencing nodes by tid string.
    // Spec order lists tid assignment last, but every wiring step from here
    // on keys nodes by `tid`, and two duplicate appearances of the same
    // person both start with `tid == id` at construction — assigning the
    // suffix late would make those keys collide. The final `tid`/`duplicate`
    // values are identical either way; only the computation's position in
    // the pipeline moves.
    assign_tids(&mut nodes);

    // Step 9: wire parents/children by hierarchy-parent pointer, and keep
    // a side table of literal tree-parent tids for edge wiring (step 17),
    // since "tree-parent" and the rendered parents/children collections
    // diverge on the ancestor side.
    let mut tree_parent_tid: Vec<Option<String>> = vec![None; nodes.len()];

    for (arena_idx, hn) in descendants.iter().enumerate() {
        if let Some(parent_arena) = hn.parent {
            let parent_idx = desc_node_idx[&parent_arena];
            let child_idx = desc_node_idx[&arena_idx];
            let parent_tid = nodes[parent_idx].tid.clone();
            let child_tid = nodes[child_idx].tid.clone();
            nodes[child_idx].parents.push(parent_tid);
            nodes[parent_idx].children.push(child_tid);
            tree_parent_tid[child_idx] = Some(nodes[parent_idx].tid.clone());
        }
    }
    for (arena_idx, hn) in ancestors.iter().enumerate() {
        if arena_idx == 0 {
            continue;
        }
        if let Some(parent_arena) = hn.parent {
            // `hn.parent` is the hierarchy parent — genealogically the
            // *descendant* of this ancestor node (e.g. focus is the
            // hierarchy-parent of father). So this node is added to the
            // hierarchy-parent's `parents` collection, not the reverse.
            let node_idx = anc_node_idx[&arena_idx];
            let hierarchy_parent_idx = anc_node_idx[&parent_arena];
            let node_tid = nodes[node_idx].tid.clone();
            nodes[hierarchy_parent_idx].parents.push(node_tid.clone());
            tree_parent_tid[node_idx] = Some(nodes[hierarchy_parent_idx].tid.clone());
        }
    }

    // Step 10: place spouses of every non-ancestor node.
    place_spouses(&graph, &mut nodes, config.node_separation, config.sort_spouses.as_ref());

    // Step 11: parent-side attach points.
    compute_attach_points(&graph, &mut nodes);

    // Step 12: orient for horizontal mode.
    if config.is_horizontal {
        for node in &mut nodes {
            std::mem::swap(&mut node.x, &mut node.y);
            std::mem::swap(&mut node.psx, &mut node.psy);
            std::mem::swap(&mut node.sx, &mut node.sy);
        }
    }

    // Step 13: siblings of focus.
    if config.show_siblings_of_main && !config.one_level_rels {
        add_siblings_of_focus(&graph, &focus, &mut nodes, config);
    }

    // Step 14: all_rels_displayed.
    let present: HashSet<PersonId> = nodes.iter().map(|n| n.id.clone()).collect();
    for node in &mut nodes {
        if let Some(person) = graph.get(&node.id) {
            node.all_rels_displayed = person.rels.all_ids().all(|id| present.contains(id));
        }
    }

    // Step 15: privacy.
    if let Some(predicate) = &config.private_cards_condition {
        let roots: Vec<PersonId> = nodes.iter().map(|n| n.id.clone()).collect();
        let privacy = compute_privacy(&graph, &roots, predicate);
        for node in &mut nodes {
            node.is_private = privacy.get(&node.id).copied().unwrap_or(false);
        }
    }

    // Step 17: edge endpoints.
    wire_edges(&graph, &mut nodes, &tree_parent_tid, &focus);

    // Step 19: dimensions.
    let dim = compute_dim(&nodes, config);

    Layout {
        nodes,
        dim,
        main_id: focus,
        is_horizontal: config.is_horizontal,
    }
}

fn to_tidy_arena(arena: &[HierNode]) -> Vec<TidyNode> {
    arena
        .iter()
        .map(|hn| {
            let mut tn = TidyNode::new(hn.depth, hn.parent);
            tn.children = hn.children.clone();
            tn
        })
        .collect()
}

/// The descendant tree's separation function (§4.2 step 7): base 1.0,
/// +0.25 for fully-different parents, +0.125 for half-siblings, plus a
/// spouse-count reservation. Never applied to the ancestor tree.
fn layout_descendants(graph: &PersonGraph, arena: &[HierNode]) -> Vec<f32> {
    let mut tidy_arena = to_tidy_arena(arena);
    let sep = DescendantSeparation { graph, arena };
    run_tidy(0, &mut tidy_arena, &sep)
}

struct DescendantSeparation<'a> {
    graph: &'a PersonGraph,
    arena: &'a [HierNode],
}

impl<'a> SeparationFn for DescendantSeparation<'a> {
    fn separation(&self, left: usize, right: usize, _nodes: &[TidyNode]) -> f32 {
        let mut sep = 1.0f32;
        let (Some(a), Some(b)) = (self.graph.get(&self.arena[left].id), self.graph.get(&self.arena[right].id)) else {
            return sep;
        };

        let shared = shared_parent_count(a, b);
        if shared == 0 {
            sep += 0.25;
        } else if shared == 1 {
            sep += 0.125;
        }

        sep += 0.5 * (a.rels.spouses.len() + b.rels.spouses.len()) as f32;
        sep
    }
}

fn shared_parent_count(a: &crate::person::Person, b: &crate::person::Person) -> u8 {
    let mut count = 0;
    if a.rels.father.is_some() && a.rels.father == b.rels.father {
        count += 1;
    }
    if a.rels.mother.is_some() && a.rels.mother == b.rels.mother {
        count += 1;
    }
    count
}

fn place_spouses(
    graph: &PersonGraph,
    nodes: &mut Vec<LayoutNode>,
    node_separation: f32,
    sort_spouses: Option<&super::config::SortFn>,
) {
    let descendant_tids: Vec<String> = nodes
        .iter()
        .filter(|n| !n.is_ancestry)
        .map(|n| n.tid.clone())
        .collect();

    for tid in descendant_tids.into_iter().rev() {
        let Some(idx) = nodes.iter().position(|n| n.tid == tid) else {
            continue;
        };
        let id = nodes[idx].id.clone();
        let Some(person) = graph.get(&id) else {
            continue;
        };
        let mut spouse_ids = person.rels.spouses.clone();
        if spouse_ids.is_empty() {
            continue;
        }
        if let Some(cmp) = sort_spouses {
            spouse_ids.sort_by(|a, b| match (graph.get(a), graph.get(b)) {
                (Some(pa), Some(pb)) => cmp(pa, pb),
                _ => std::cmp::Ordering::Equal,
            });
        }

        let side: f32 = match person.gender() {
            Gender::M => -1.0,
            _ => 1.0,
        };
        let k = spouse_ids.len() as f32;
        let base_x = nodes[idx].x;
        let base_y = nodes[idx].y;
        nodes[idx].x += (k / 2.0) * node_separation * side;

        for (i, spouse_id) in spouse_ids.iter().enumerate() {
            let spouse_tid = format!("{spouse_id}__spouse_of__{tid}");
            let offset = (i as f32 + 1.0) * node_separation * side;
            let mut spouse_node = LayoutNode::new(spouse_tid.clone(), spouse_id.clone(), nodes[idx].depth, false);
            spouse_node.added = graph.get(spouse_id).map(|p| p.to_add).unwrap_or(false);
            spouse_node.spouse_of = Some(tid.clone());
            spouse_node.x = base_x + offset;
            spouse_node.y = base_y;
            if i == 0 {
                spouse_node.sx = base_x + offset - (node_separation / 2.0) * side;
            } else {
                spouse_node.sx = spouse_node.x;
            }
            spouse_node.sy = spouse_node.y;
            nodes[idx].spouses.push(spouse_tid.clone());
            nodes.push(spouse_node);
        }
    }

    // "If a node has two parents, tighten their horizontal gap to exactly
    // `node_separation` around their midpoint" — applies to any node whose
    // `parents` collection holds two entries (the focus, via the ancestor
    // merge in step 9).
    let tid_index: HashMap<String, usize> = nodes.iter().enumerate().map(|(i, n)| (n.tid.clone(), i)).collect();
    for i in 0..nodes.len() {
        if nodes[i].parents.len() == 2 {
            let p0 = tid_index.get(&nodes[i].parents[0]).copied();
            let p1 = tid_index.get(&nodes[i].parents[1]).copied();
            if let (Some(p0), Some(p1)) = (p0, p1) {
                let mid = (nodes[p0].x + nodes[p1].x) / 2.0;
                let (lo, hi) = if nodes[p0].x <= nodes[p1].x { (p0, p1) } else { (p1, p0) };
                nodes[lo].x = mid - node_separation / 2.0;
                nodes[hi].x = mid + node_separation / 2.0;
            }
        }
    }
}

/// Step 11: for every non-root descendant, find among its layout-parent and
/// that parent's spouses the one matching the child's biological parent; if
/// both biological parents are present prefer the synthetic-`added` one,
/// else whichever single parent is available.
fn compute_attach_points(graph: &PersonGraph, nodes: &mut [LayoutNode]) {
    let lookup: HashMap<String, usize> = nodes.iter().enumerate().map(|(i, n)| (n.tid.clone(), i)).collect();

    for i in 0..nodes.len() {
        if nodes[i].is_ancestry || nodes[i].parents.is_empty() {
            continue;
        }
        let Some(person) = graph.get(&nodes[i].id) else {
            continue;
        };
        let father = person.rels.father.clone();
        let mother = person.rels.mother.clone();
        let Some(&parent_idx) = lookup.get(&nodes[i].parents[0]) else {
            continue;
        };

        let mut candidates: Vec<usize> = vec![parent_idx];
        candidates.extend(nodes[parent_idx].spouses.iter().filter_map(|t| lookup.get(t).copied()));

        let matches: Vec<usize> = candidates
            .into_iter()
            .filter(|&idx| {
                let pid = &nodes[idx].id;
                Some(pid) == father.as_ref() || Some(pid) == mother.as_ref()
            })
            .collect();

        let chosen = if matches.len() > 1 {
            matches.iter().copied().find(|&idx| nodes[idx].added).unwrap_or(matches[0])
        } else {
            matches.first().copied()
        };

        if let Some(chosen) = chosen {
            if nodes[chosen].spouse_of.is_some() {
                nodes[i].psx = nodes[chosen].sx;
                nodes[i].psy = nodes[chosen].sy;
            } else {
                nodes[i].psx = nodes[chosen].x;
                nodes[i].psy = nodes[chosen].y;
            }
        }
    }
}

fn add_siblings_of_focus(graph: &PersonGraph, focus: &PersonId, nodes: &mut Vec<LayoutNode>, config: &LayoutConfig) {
    let Some(person) = graph.get(focus) else {
        return;
    };
    let mut sibling_ids: Vec<PersonId> = Vec::new();
    let mut seen = HashSet::new();
    for parent_id in person.rels.father.iter().chain(person.rels.mother.iter()) {
        if let Some(parent) = graph.get(parent_id) {
            for child in &parent.rels.children {
                if child != focus && seen.insert(child.clone()) {
                    sibling_ids.push(child.clone());
                }
            }
        }
    }
    if sibling_ids.is_empty() {
        return;
    }

    let Some(focus_idx) = nodes.iter().position(|n| &n.id == focus && !n.is_ancestry) else {
        return;
    };
    let focus_parents = nodes[focus_idx].parents.clone();
    let focus_x = nodes[focus_idx].x;
    let focus_y = nodes[focus_idx].y;

    sibling_ids.sort_by_key(|id| {
        let has_mother = graph.get(id).map(|p| p.rels.mother.is_some()).unwrap_or(false);
        !has_mother
    });

    let mut left_offset = 1.0;
    let mut right_offset = 1.0;
    for (i, sibling_id) in sibling_ids.into_iter().enumerate() {
        let on_left = i % 2 == 0;
        let step = if on_left {
            let o = left_offset;
            left_offset += 1.0;
            -o
        } else {
            let o = right_offset;
            right_offset += 1.0;
            o
        };
        let tid = sibling_id.to_string();
        let mut node = LayoutNode::new(tid, sibling_id, nodes[focus_idx].depth, false);
        node.sibling = true;
        node.x = focus_x + step * config.node_separation;
        node.y = focus_y;
        node.parents = focus_parents.clone();
        nodes.push(node);
    }
}

/// First occurrence of an id keeps `tid == id`; each later occurrence
/// gets `tid = id--xN`. §4.2 step 16 and §3 both specify that `duplicate`
/// — the appearance count — is set on *every* appearance once the
/// multiplicity exceeds one, not only on the later occurrences, so a
/// first counting pass establishes each id's total before the per-node
/// assignment pass runs.
fn assign_tids(nodes: &mut [LayoutNode]) {
    let mut totals: HashMap<String, u32> = HashMap::new();
    for node in nodes.iter() {
        *totals.entry(node.id.to_string()).or_insert(0) += 1;
    }

    let mut seen: HashMap<String, u32> = HashMap::new();
    for node in nodes.iter_mut() {
        let base = node.id.to_string();
        let total = totals[&base];
        if total <= 1 {
            continue;
        }
        node.duplicate = Some(total);
        let occurrence = seen.entry(base.clone()).or_insert(0);
        *occurrence += 1;
        if *occurrence > 1 {
            node.tid = format!("{base}--x{occurrence}");
        }
    }
}

/// Step 17: edge endpoints. Focused node: `to = []`, `to_ancestry =
/// parents`. Ancestor: `from = [tree-parent]`, `to = parents`. Descendant:
/// `from = [p1, p2]` where `p1` is the layout-parent and `p2` the matching
/// spouse of `p1`, with the back-pointer registered on each `from`.
/// Synthetic spouses: `from = []`, `from_spouse = spouse`.
fn wire_edges(graph: &PersonGraph, nodes: &mut [LayoutNode], tree_parent_tid: &[Option<String>], focus: &PersonId) {
    let lookup: HashMap<String, usize> = nodes.iter().enumerate().map(|(i, n)| (n.tid.clone(), i)).collect();
    let mut back_pointers: Vec<Vec<String>> = vec![Vec::new(); nodes.len()];

    for i in 0..nodes.len() {
        if nodes[i].spouse_of.is_some() {
            nodes[i].from_spouse = nodes[i].spouse_of.clone();
            continue;
        }
        if &nodes[i].id == focus && !nodes[i].is_ancestry {
            nodes[i].to = Vec::new();
            nodes[i].to_ancestry = nodes[i].parents.clone();
            continue;
        }
        if nodes[i].is_ancestry {
            nodes[i].from = tree_parent_tid[i].clone().into_iter().collect();
            nodes[i].to = nodes[i].parents.clone();
            continue;
        }
        // Descendant, non-focus.
        if let Some(p1_tid) = nodes[i].parents.first().cloned() {
            let mut from = vec![p1_tid.clone()];
            if let Some(&p1_idx) = lookup.get(&p1_tid) {
                if let Some(p2_tid) = matching_spouse_tid(graph, nodes, &lookup, p1_idx, &nodes[i].id) {
                    from.push(p2_tid);
                }
            }
            back_pointers[i] = from.clone();
            nodes[i].from = from;
        }
    }

    for (i, back) in back_pointers.into_iter().enumerate() {
        for f in back {
            if let Some(&idx) = lookup.get(&f) {
                if !nodes[idx].to.contains(&nodes[i].tid) {
                    nodes[idx].to.push(nodes[i].tid.clone());
                }
            }
        }
    }
}

/// Among `p1`'s spouse attachments, find the one whose underlying person is
/// `child`'s other biological parent.
fn matching_spouse_tid(
    graph: &PersonGraph,
    nodes: &[LayoutNode],
    lookup: &HashMap<String, usize>,
    p1_idx: usize,
    child_id: &PersonId,
) -> Option<String> {
    let child = graph.get(child_id)?;
    let other_parents = [child.rels.father.as_ref(), child.rels.mother.as_ref()];
    nodes[p1_idx].spouses.iter().find_map(|tid| {
        let &idx = lookup.get(tid)?;
        if other_parents.contains(&Some(&nodes[idx].id)) {
            Some(tid.clone())
        } else {
            None
        }
    })
}

fn compute_dim(nodes: &[LayoutNode], config: &LayoutConfig) -> LayoutDim {
    if nodes.is_empty() {
        return LayoutDim::default();
    }
    let min_x = nodes.iter().map(|n| n.x).fold(f32::INFINITY, f32::min);
    let max_x = nodes.iter().map(|n| n.x).fold(f32::NEG_INFINITY, f32::max);
    let min_y = nodes.iter().map(|n| n.y).fold(f32::INFINITY, f32::min);
    let max_y = nodes.iter().map(|n| n.y).fold(f32::NEG_INFINITY, f32::max);

    LayoutDim {
        width: (max_x - min_x) + config.node_separation,
        height: (max_y - min_y) + config.level_separation,
        x_off: -min_x + config.node_separation / 2.0,
        y_off: -min_y + config.level_separation / 2.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::person::{ParentSlot, Person};

    fn single_child_both_parents() -> PersonGraph {
        let mut g = PersonGraph::new();
        g.insert(Person::new(PersonId::from("a")));
        g.insert(Person::new(PersonId::from("b")));
        g.insert(Person::new(PersonId::from("c")));
        g.get_mut(&PersonId::from("a")).unwrap().set_gender(Gender::M);
        g.get_mut(&PersonId::from("b")).unwrap().set_gender(Gender::F);
        g.set_parent(&PersonId::from("c"), ParentSlot::Father, Some(PersonId::from("a")))
            .unwrap();
        g.set_parent(&PersonId::from("c"), ParentSlot::Mother, Some(PersonId::from("b")))
            .unwrap();
        g.link_spouses(&PersonId::from("a"), &PersonId::from("b")).unwrap();
        g
    }

    #[test]
    fn test_focus_at_origin() {
        let g = single_child_both_parents();
        let config = LayoutConfig::default();
        let layout = compute_layout(g, Some(&PersonId::from("c")), &config, 1);
        let focus_node = layout.nodes.iter().find(|n| n.id == PersonId::from("c")).unwrap();
        assert!((focus_node.x).abs() < 0.01);
        assert!((focus_node.y).abs() < 0.01);
    }

    #[test]
    fn test_ancestors_have_negative_y() {
        let g = single_child_both_parents();
        let config = LayoutConfig::default();
        let layout = compute_layout(g, Some(&PersonId::from("c")), &config, 1);
        let a = layout.nodes.iter().find(|n| n.id == PersonId::from("a")).unwrap();
        assert!(a.y < 0.0);
    }

    #[test]
    fn test_layout_totality_all_rels_displayed() {
        let g = single_child_both_parents();
        let config = LayoutConfig::default();
        let layout = compute_layout(g, Some(&PersonId::from("c")), &config, 1);
        let focus_node = layout.nodes.iter().find(|n| n.id == PersonId::from("c")).unwrap();
        assert!(focus_node.all_rels_displayed);
    }

    #[test]
    fn test_empty_graph_gets_blank_focus() {
        let g = PersonGraph::new();
        let config = LayoutConfig::default();
        let layout = compute_layout(g, None, &config, 1);
        assert_eq!(layout.nodes.len(), 1);
    }

    #[test]
    fn test_is_horizontal_swaps_axes() {
        let g = single_child_both_parents();
        let mut config = LayoutConfig::default();
        config.is_horizontal = true;
        let layout = compute_layout(g.clone(), Some(&PersonId::from("c")), &config, 1);
        let mut baseline_config = LayoutConfig::default();
        baseline_config.is_horizontal = false;
        let baseline = compute_layout(g, Some(&PersonId::from("c")), &baseline_config, 1);

        let a_h = layout.nodes.iter().find(|n| n.id == PersonId::from("a")).unwrap();
        let a_v = baseline.nodes.iter().find(|n| n.id == PersonId::from("a")).unwrap();
        assert!((a_h.x - a_v.y).abs() < 0.01);
        assert!((a_h.y - a_v.x).abs() < 0.01);
    }

    #[test]
    fn test_duplicate_ancestor_carries_toggle_and_duplicate_count() {
        // `gp` is reached twice — once as `f1`'s father, once as `m1`'s
        // father — a shared-ancestor convergence (§4.3, §8 scenario 4).
        let mut g = PersonGraph::new();
        for id in ["person", "f1", "m1", "gp", "ggp"] {
            g.insert(Person::new(PersonId::from(id)));
        }
        g.get_mut(&PersonId::from("f1")).unwrap().set_gender(Gender::M);
        g.get_mut(&PersonId::from("m1")).unwrap().set_gender(Gender::F);
        g.get_mut(&PersonId::from("gp")).unwrap().set_gender(Gender::M);
        g.get_mut(&PersonId::from("ggp")).unwrap().set_gender(Gender::M);

        g.set_parent(&PersonId::from("person"), ParentSlot::Father, Some(PersonId::from("f1"))).unwrap();
        g.set_parent(&PersonId::from("person"), ParentSlot::Mother, Some(PersonId::from("m1"))).unwrap();
        g.set_parent(&PersonId::from("f1"), ParentSlot::Father, Some(PersonId::from("gp"))).unwrap();
        g.set_parent(&PersonId::from("m1"), ParentSlot::Father, Some(PersonId::from("gp"))).unwrap();
        g.set_parent(&PersonId::from("gp"), ParentSlot::Father, Some(PersonId::from("ggp"))).unwrap();

        let mut config = LayoutConfig::default();
        config.duplicate_branch_toggle = true;
        let layout = compute_layout(g, Some(&PersonId::from("person")), &config, 42);

        let gp_nodes: Vec<_> = layout.nodes.iter().filter(|n| n.id == PersonId::from("gp")).collect();
        assert_eq!(gp_nodes.len(), 2);
        assert!(gp_nodes.iter().all(|n| n.duplicate == Some(2)));
        assert!(gp_nodes.iter().all(|n| n.toggle.is_some() && n.toggle_id.is_some()));
        assert_eq!(gp_nodes[0].toggle_id, gp_nodes[1].toggle_id);
        assert!(gp_nodes.iter().any(|n| n.tid == "gp"));
        assert!(gp_nodes.iter().any(|n| n.tid == "gp--x2"));
    }

    #[test]
    fn test_assign_tids_marks_duplicate_on_first_occurrence_too() {
        let mut nodes = vec![
            LayoutNode::new("shared".to_string(), PersonId::from("shared"), 0, false),
            LayoutNode::new("shared".to_string(), PersonId::from("shared"), 0, false),
            LayoutNode::new("unique".to_string(), PersonId::from("unique"), 0, false),
        ];
        assign_tids(&mut nodes);
        assert_eq!(nodes[0].duplicate, Some(2));
        assert_eq!(nodes[1].duplicate, Some(2));
        assert_eq!(nodes[2].duplicate, None);
        assert_eq!(nodes[0].tid, "shared");
        assert_eq!(nodes[1].tid, "shared--x2");
    }

    #[test]
    fn test_determinism() {
        let g = single_child_both_parents();
        let config = LayoutConfig::default();
        let layout1 = compute_layout(g.clone(), Some(&PersonId::from("c")), &config, 1);
        let layout2 = compute_layout(g, Some(&PersonId::from("c")), &config, 1);
        for (n1, n2) in layout1.nodes.iter().zip(layout2.nodes.iter()) {
            assert_eq!(n1.tid, n2.tid);
            assert!((n1.x - n2.x).abs() < 0.001);
            assert!((n1.y - n2.y).abs() < 0.001);
        }
    }
}
