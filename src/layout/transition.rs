//! Enter/exit animation prep (§4.2 step 18): given the previous and next
//! computed layouts, tag each next-layout node with where it should
//! animate *from*, and report which previous nodes vanished and where
//! they should animate *to*.
//!
//! Matching is by `tid`, not by person id — `tid` is what's unique per
//! appearance (duplicates included), so a duplicate appearance that
//! persists across a re-layout is tracked as the same visual node.

use std::collections::HashMap;

use super::node::Layout;

/// Set `prev_x`/`prev_y` on every node of `next`: the node's own previous
/// position if it existed in `prev`, its parent-side attach point if it is
/// newly entering with a known attach point, or its own final position
/// (i.e. no visible motion) if neither is available — the case for the
/// focus node itself, which should never appear to fly in from off-screen.
pub fn apply_enter_exit(prev: &Layout, next: &mut Layout) {
    let prev_by_tid: HashMap<&str, (f32, f32)> =
        prev.nodes.iter().map(|n| (n.tid.as_str(), (n.x, n.y))).collect();

    for node in &mut next.nodes {
        if let Some(&(px, py)) = prev_by_tid.get(node.tid.as_str()) {
            node.prev_x = px;
            node.prev_y = py;
        } else if node.psx != 0.0 || node.psy != 0.0 {
            node.prev_x = node.psx;
            node.prev_y = node.psy;
        } else {
            node.prev_x = node.x;
            node.prev_y = node.y;
        }
    }
}

/// The distance (layout units) an exiting card slides outward, per §4.2's
/// enter/exit contract.
const EXIT_DISTANCE: f32 = 400.0;

/// Nodes present in `prev` but absent from `next`, as `(tid, exit_x,
/// exit_y)` — the target a renderer should animate the outgoing card
/// toward: its last position, slid `EXIT_DISTANCE` further outward in the
/// direction of its own quadrant (§4.2 "Enter/exit positions").
pub fn exiting_nodes(prev: &Layout, next: &Layout) -> Vec<(String, f32, f32)> {
    let next_tids: std::collections::HashSet<&str> = next.nodes.iter().map(|n| n.tid.as_str()).collect();
    prev.nodes
        .iter()
        .filter(|n| !next_tids.contains(n.tid.as_str()))
        .map(|n| {
            let (dx, dy) = quadrant_direction(n.x, n.y);
            (n.tid.clone(), n.x + dx * EXIT_DISTANCE, n.y + dy * EXIT_DISTANCE)
        })
        .collect()
}

/// Coarse compass direction from `(0, 0)` to `(x, y)`, used by renderers
/// that want to slide exiting cards off in the direction they were
/// already heading rather than straight toward the origin.
pub fn quadrant_direction(x: f32, y: f32) -> (f32, f32) {
    let dx = if x > 0.0 {
        1.0
    } else if x < 0.0 {
        -1.0
    } else {
        0.0
    };
    let dy = if y > 0.0 {
        1.0
    } else if y < 0.0 {
        -1.0
    } else {
        0.0
    };
    (dx, dy)
}
