//! The Layout Engine (§4.2): positions a Person Graph into a two-sided
//! tidy tree around a focus person, resolves duplicate branches (§4.3),
//! and annotates privacy (§4.4).

pub mod config;
pub mod duplicate;
pub mod engine;
pub mod hierarchy;
pub mod node;
pub mod privacy;
pub mod tidy_tree;
pub mod transition;

pub use config::{LayoutConfig, PrivacyPredicate, SortFn, TreeHierarchyHook};
pub use engine::compute_layout;
pub use node::{Layout, LayoutDim, LayoutNode};
pub use transition::{apply_enter_exit, exiting_nodes, quadrant_direction};
