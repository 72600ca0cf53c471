//! The layout-node output shape (§3 "Layout-node").

use crate::person::PersonId;

/// One visible appearance of a person in a computed layout. A person with
/// duplicate appearances (§4.3) or a synthetic spouse (§4.1) produces one
/// `LayoutNode` per appearance, each with its own `tid`.
#[derive(Debug, Clone)]
pub struct LayoutNode {
    /// Layout-unique id: `person.id`, or `person.id--xN` for the N-th
    /// duplicate appearance of the same person.
    pub tid: String,
    pub id: PersonId,

    pub x: f32,
    pub y: f32,
    /// Enter/exit coordinates for animation; equal to `(x, y)` until the
    /// renderer-facing helper sets them for a transition.
    pub prev_x: f32,
    pub prev_y: f32,

    /// Generation distance from the focus; negative for ancestors.
    pub depth: i32,

    pub is_ancestry: bool,
    /// True if this node was added by the show-siblings-of-main step.
    pub sibling: bool,
    /// True if this is a synthetic `to_add` spouse placeholder.
    pub added: bool,
    /// If this node is a spouse attachment, the tid of the person it is a
    /// spouse of.
    pub spouse_of: Option<String>,

    /// A spouse attachment's child-attach point (§4.2 step 10): offset
    /// inward from `(x, y)` for the first spouse, equal to `(x, y)`
    /// otherwise. Unused on non-spouse nodes.
    pub sx: f32,
    pub sy: f32,

    /// Tids of this node's layout-parents.
    pub parents: Vec<String>,
    /// Tids of this node's layout-children.
    pub children: Vec<String>,
    /// Tids of this node's spouse attachments.
    pub spouses: Vec<String>,

    /// Edge source tids (see §4.2 step 17).
    pub from: Vec<String>,
    /// Edge target tids.
    pub to: Vec<String>,
    /// Ancestor-edge targets for the focus node.
    pub to_ancestry: Vec<String>,
    /// Back-pointer used by synthetic spouses with no `from`.
    pub from_spouse: Option<String>,

    /// Parent-side attach point for drawing this node's child edge to the
    /// midpoint between its two parents.
    pub psx: f32,
    pub psy: f32,

    /// True iff every id in `rels` is present somewhere in the layout.
    pub all_rels_displayed: bool,

    pub is_private: bool,

    /// Count of appearances of this person's id in the layout, if > 1.
    pub duplicate: Option<u32>,

    /// Duplicate-branch toggle state (§4.3).
    pub toggle: Option<i64>,
    pub toggle_id: Option<String>,
}

impl LayoutNode {
    pub fn new(tid: String, id: PersonId, depth: i32, is_ancestry: bool) -> Self {
        Self {
            tid,
            id,
            x: 0.0,
            y: 0.0,
            prev_x: 0.0,
            prev_y: 0.0,
            depth,
            is_ancestry,
            sibling: false,
            added: false,
            spouse_of: None,
            sx: 0.0,
            sy: 0.0,
            parents: Vec::new(),
            children: Vec::new(),
            spouses: Vec::new(),
            from: Vec::new(),
            to: Vec::new(),
            to_ancestry: Vec::new(),
            from_spouse: None,
            psx: 0.0,
            psy: 0.0,
            all_rels_displayed: false,
            is_private: false,
            duplicate: None,
            toggle: None,
            toggle_id: None,
        }
    }
}

/// Overall layout dimensions (§3, §4.2 step 19).
#[derive(Debug, Clone, Copy, Default)]
pub struct LayoutDim {
    pub width: f32,
    pub height: f32,
    pub x_off: f32,
    pub y_off: f32,
}

/// The full layout object handed to the renderer.
#[derive(Debug, Clone)]
pub struct Layout {
    pub nodes: Vec<LayoutNode>,
    pub dim: LayoutDim,
    pub main_id: PersonId,
    pub is_horizontal: bool,
}
